use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use dissect_core::emit::{emit, EmitOptions, EmitSummary, OutputFormat, StreamTable};

use crate::commands::util::open_input;

/// Dissect every datagram in `target`, writing results to `out`.
pub fn run_dissect<W: Write>(
    target: &Path,
    options: &EmitOptions,
    out: &mut W,
) -> Result<(EmitSummary, StreamTable)> {
    let reader = open_input(target)?;
    emit(reader, out, options, StreamTable::new())
        .with_context(|| format!("Failed to dissect {}", target.display()))
}

/// Emit ground-truth dissection lines for `target` on stdout.
pub fn dissect_command(
    target: &Path,
    count: Option<usize>,
    format: OutputFormat,
    show_streams: bool,
) -> Result<()> {
    let options = EmitOptions { count, format };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let (summary, streams) = run_dissect(target, &options, &mut out)?;

    for (protocol, n) in &summary.by_protocol {
        log::info!("  {}: {}", protocol, n);
    }

    if show_streams {
        print_streams(&mut io::stderr().lock(), &streams)?;
    }

    Ok(())
}

/// Print one protocol name per retained line of `target`.
pub fn classify_command(target: &Path, count: Option<usize>) -> Result<()> {
    dissect_command(target, count, OutputFormat::Protocol, false)
}

fn print_streams<W: Write>(out: &mut W, streams: &StreamTable) -> Result<()> {
    writeln!(out, "Streams ({}):", streams.len())?;
    if streams.is_empty() {
        writeln!(out, "  (none)")?;
        return Ok(());
    }
    for (ssrc, stats) in streams.iter() {
        let payload_types = stats
            .payload_types
            .iter()
            .map(|pt| pt.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(
            out,
            "  - {} srtp={} srtcp={} pt=[{}]",
            ssrc, stats.srtp_packets, stats.srtcp_packets, payload_types
        )?;
    }
    Ok(())
}
