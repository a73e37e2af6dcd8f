//! ZIP archive re-encoding.
//!
//! Container parsing and writing, as well as the deflate codec, come from the
//! `zip` crate. This module only decides what goes into each output entry.
//!
//! ## Architecture
//!
//! - [`structures`]: options, per-entry metadata and entry summaries
//! - [`transcoder`]: the read-decompress-rewrite loop
//! - [`listing`]: read-only summary of an encoded archive
//! - [`records`]: the few raw records the `zip` crate keeps to itself
//! - [`error`]: the error taxonomy shared by all of the above
//!
//! ## Metadata
//!
//! Without `--deterministic`, each entry keeps its modification time, unix
//! permission bits and extra fields. With it, every entry gets the DOS epoch
//! (1980-01-01 00:00:00), `0o644` (`0o755` for directories) and no extra
//! fields. In both modes per-entry comments are dropped and the OS-origin
//! tag is whatever the writer stamps on every entry.
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - The whole input and output archives are held in memory
//! - Entries sharing a name are rejected

mod error;
mod listing;
mod records;
mod structures;
mod transcoder;

pub use error::RezipError;
pub use listing::list_entries;
pub use records::ExtraField;
pub use structures::*;
pub use transcoder::rezip;
