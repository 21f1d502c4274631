use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dissect_core::config::{LogLevel, ToolConfig};
use dissect_core::emit::OutputFormat;
use dissect_core::text::TextEncoding;
use media_dissect::commands::{
    apply_rule_command, classify_command, dissect_command, from_log_command, normalize_command,
    score_command,
};

/// Ground-truth dissection and boundary scoring for encrypted media datagrams.
///
/// This CLI is a thin wrapper around `dissect-core` (exposed in code as
/// `dissect_core`). All substantive logic lives in the library so it can be
/// tested thoroughly and reused from other frontends.
#[derive(Parser, Debug)]
#[command(
    name = "media-dissect",
    version,
    about = "Ground-truth dissection and boundary scoring for SRTP/SRTCP/STUN/DTLS datagrams",
    long_about = None
)]
struct Cli {
    /// Optional YAML or JSON configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace). Overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tool and library version.
    Version,

    /// Dissect one hex-encoded UDP payload per line into reference segments.
    ///
    /// Writes one dissection line per non-blank input line to stdout, in
    /// input order. Malformed lines are reported on stderr and skipped.
    Dissect {
        /// Input file with one hex-encoded datagram per line.
        #[arg(long)]
        target: PathBuf,

        /// Only process this many non-blank lines.
        #[arg(long)]
        count: Option<usize>,

        /// Output format: text, json or protocol.
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Print the per-SSRC stream table to stderr when done.
        #[arg(long, default_value_t = false)]
        streams: bool,
    },

    /// Print the protocol chosen for each non-blank input line.
    Classify {
        /// Input file with one hex-encoded datagram per line.
        #[arg(long)]
        target: PathBuf,

        /// Only process this many non-blank lines.
        #[arg(long)]
        count: Option<usize>,
    },

    /// Score a prediction file against a ground-truth file.
    ///
    /// Lines are paired in order; pairing stops at the shorter file.
    Score {
        /// Path to the ground-truth dissection file.
        #[arg(long)]
        ground: PathBuf,

        /// Path to the prediction file.
        #[arg(long)]
        target: PathBuf,

        /// Text encoding for both files (utf-8, ascii, latin-1).
        #[arg(long)]
        encoding: Option<TextEncoding>,

        /// Emit JSON instead of the text report.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Normalize hyphen/space separated hex predictions.
    Normalize {
        #[arg(long)]
        target: PathBuf,
    },

    /// Split each hex line using the field widths of a rule file.
    ApplyRule {
        /// Rule file; its first non-blank line gives the field widths.
        #[arg(long)]
        rule: PathBuf,

        #[arg(long)]
        target: PathBuf,
    },

    /// Extract `ByteF <n>: ...` predictions from an inference log.
    FromLog {
        #[arg(long)]
        target: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ToolConfig::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let level = cli.log_level.unwrap_or(config.log.level);
    simple_logger::init_with_level(level.as_level())?;

    match cli.command.unwrap_or(Command::Version) {
        Command::Version => version_command(),
        Command::Dissect { target, count, format, streams } => dissect_command(
            &target,
            count.or(config.dissect.count),
            format.unwrap_or(config.dissect.format),
            streams,
        )?,
        Command::Classify { target, count } => {
            classify_command(&target, count.or(config.dissect.count))?
        }
        Command::Score { ground, target, encoding, json } => {
            score_command(&ground, &target, encoding.unwrap_or(config.score.encoding), json)?
        }
        Command::Normalize { target } => normalize_command(&target)?,
        Command::ApplyRule { rule, target } => apply_rule_command(&rule, &target)?,
        Command::FromLog { target } => from_log_command(&target)?,
    }

    Ok(())
}

fn version_command() {
    // NOTE: crate name `dissect-core` in Cargo.toml is `dissect_core` in Rust code.
    println!("media-dissect v{}", env!("CARGO_PKG_VERSION"));
    println!("dissect-core v{}", dissect_core::version());
}
