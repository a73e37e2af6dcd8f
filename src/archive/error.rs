use std::io;

use thiserror::Error;
use zip::result::ZipError;

/// Errors produced while re-encoding an archive
#[derive(Debug, Error)]
pub enum RezipError {
    /// The input is not a parseable ZIP archive.
    #[error("malformed archive: {0}")]
    MalformedArchive(#[source] ZipError),

    /// Several central-directory records share a name; the reader keeps only
    /// one of them per name.
    #[error("archive records {recorded} entries but only {distinct} distinct names")]
    DuplicateEntries { recorded: u64, distinct: usize },

    /// An entry's data failed decompression or integrity checks.
    #[error("corrupt entry {entry}: {source}")]
    CorruptEntry { entry: String, source: ZipError },

    /// An entry uses encryption or a compression method that cannot be decoded.
    #[error("unsupported entry {entry}: {source}")]
    UnsupportedEntry { entry: String, source: ZipError },

    /// The output archive could not be assembled.
    #[error("failed to encode {entry}: {source}")]
    Encode { entry: String, source: ZipError },

    /// Reading the input or writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RezipError {
    /// Classify a failure to read entry `entry` from the source archive.
    pub(crate) fn reading(entry: String, source: ZipError) -> Self {
        match source {
            ZipError::UnsupportedArchive(_) => RezipError::UnsupportedEntry { entry, source },
            source => RezipError::CorruptEntry { entry, source },
        }
    }
}
