use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};
use dissect_core::adapt::{normalize_line, LogExtractor, SegmentRule};

use crate::commands::util::open_input;

/// Write `convert(line)` for every non-blank line of `input`.
fn convert_lines<R, W, F>(input: R, out: &mut W, mut convert: F) -> Result<usize>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Option<String>,
{
    let mut written = 0;
    for line in input.lines() {
        let line = line.context("Failed to read input line")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(converted) = convert(line) {
            writeln!(out, "{}", converted)?;
            written += 1;
        }
    }
    out.flush()?;
    Ok(written)
}

pub fn run_normalize<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<usize> {
    convert_lines(input, out, |line| Some(normalize_line(line)))
}

pub fn run_apply_rule<R: BufRead, W: Write>(
    rule: &SegmentRule,
    input: R,
    out: &mut W,
) -> Result<usize> {
    convert_lines(input, out, |line| Some(rule.apply(line)))
}

pub fn run_from_log<R: BufRead, W: Write>(input: R, out: &mut W) -> Result<usize> {
    let extractor = LogExtractor::new()?;
    convert_lines(input, out, |line| extractor.extract(line).map(str::to_string))
}

/// Normalize hyphen/space separated predictions into scorer input.
pub fn normalize_command(target: &Path) -> Result<()> {
    let written = run_normalize(open_input(target)?, &mut io::stdout().lock())?;
    log::info!("Normalized {} lines from {}", written, target.display());
    Ok(())
}

/// Cut each line of `target` with the field widths from `rule`.
pub fn apply_rule_command(rule: &Path, target: &Path) -> Result<()> {
    let rule_text = fs::read_to_string(rule)
        .with_context(|| format!("Failed to read rule file {}", rule.display()))?;
    let rule_spec = SegmentRule::parse(&rule_text)
        .with_context(|| format!("Invalid rule file {}", rule.display()))?;
    log::debug!("Rule widths: {:?}", rule_spec.widths);

    let written = run_apply_rule(&rule_spec, open_input(target)?, &mut io::stdout().lock())?;
    log::info!("Applied rule to {} lines from {}", written, target.display());
    Ok(())
}

/// Extract `ByteF <n>: ...` predictions from an inference log.
pub fn from_log_command(target: &Path) -> Result<()> {
    let written = run_from_log(open_input(target)?, &mut io::stdout().lock())?;
    log::info!("Extracted {} predictions from {}", written, target.display());
    Ok(())
}
