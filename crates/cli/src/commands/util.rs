use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of a file and return it as a hex string.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open file for hashing: {}", path.display()))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader
            .read(&mut buf)
            .with_context(|| format!("Failed to read file for hashing: {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Open an input file for buffered line reading, failing with the path in
/// the error message.
pub fn open_input(path: &Path) -> Result<BufReader<fs::File>> {
    let file = fs::File::open(path)
        .with_context(|| format!("File not found or unreadable: {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Format a metric with four decimals.
pub fn format_metric(value: f64) -> String {
    format!("{:.4}", value)
}
