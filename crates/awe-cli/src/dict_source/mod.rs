mod cin;
mod tsv;

#[cfg(test)]
mod tests;

use std::fs;
use std::io;
use std::path::Path;

use awe_core::dict::BinaryDictionaryBuilder;

pub use cin::CinSource;
pub use tsv::TsvSource;

/// A text format that can be compiled into a binary dictionary.
pub trait DictSource {
    /// Parse `content` into `(key, word)` pairs in the order they should be
    /// pushed; the first word for a key ranks highest.
    fn parse(&self, content: &str) -> Result<Vec<(String, String)>, DictSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DictSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("dictionary error: {0}")]
    Dict(#[from] awe_core::dict::DictError),
}

/// Read `path` with `source` and queue every pair into a builder.
pub fn build_from_file(
    source: &dyn DictSource,
    path: &Path,
) -> Result<BinaryDictionaryBuilder, DictSourceError> {
    let content = fs::read_to_string(path)?;
    let pairs = source.parse(&content)?;
    let mut builder = BinaryDictionaryBuilder::new();
    for (key, word) in &pairs {
        builder.push(key, word)?;
    }
    Ok(builder)
}

/// Create a `DictSource` by format name. Returns `None` for unknown names.
pub fn from_name(name: &str) -> Option<Box<dyn DictSource>> {
    match name {
        "cin" => Some(Box::new(CinSource)),
        "tsv" => Some(Box::new(TsvSource)),
        _ => None,
    }
}

/// Guess the format from a file extension, defaulting to TSV.
pub fn format_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("cin") => "cin",
        _ => "tsv",
    }
}
