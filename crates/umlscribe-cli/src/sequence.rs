//! Request numbering for batch generation.

use std::path::{Path, PathBuf};

/// Hands out increasing request numbers, starting at 1.
///
/// Owned by the caller that issues the requests; there is no shared counter.
#[derive(Debug, Default)]
pub struct RequestSequence {
    last: u64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next request number.
    pub fn next(&mut self) -> u64 {
        self.last += 1;
        self.last
    }
}

/// Returns where the output of request `id` goes.
///
/// A single request writes to `base` unchanged. In a batch every request
/// gets the number appended to the file stem: `diagram.puml` becomes
/// `diagram-2.puml`.
pub fn output_path(base: &Path, id: u64, batch: bool) -> PathBuf {
    if !batch {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match base.extension() {
        Some(ext) => format!("{stem}-{id}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{id}"),
    };
    base.with_file_name(name)
}
