//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::Utf8Path;
use reprise_core::ingest;

pub mod analyze;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a document from disk, validating its size against the configured
/// limit before the content is loaded.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let document =
        ingest::extract_text(path, max_bytes).with_context(|| format!("failed to load {path}"))?;
    Ok(document.text)
}

/// Read all of `reader`, failing once more than `max_bytes` arrive.
///
/// At most `max_bytes + 1` bytes are buffered.
pub fn read_input_stream<R: Read>(reader: R, max_bytes: Option<usize>) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    match max_bytes {
        Some(limit) => {
            let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
            reader
                .take(cap)
                .read_to_end(&mut buf)
                .context("failed to read standard input")?;
        }
        None => {
            let mut reader = reader;
            reader
                .read_to_end(&mut buf)
                .context("failed to read standard input")?;
        }
    }
    ingest::check_input_size(buf.len(), max_bytes)?;
    String::from_utf8(buf).context("standard input is not valid UTF-8")
}
