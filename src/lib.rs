//! # rezip
//!
//! Re-encode a ZIP archive read from standard input and write it to standard
//! output.
//!
//! Entry names, payloads, their order and the archive comment are carried
//! over unchanged. Every entry is written with one compression method,
//! deflate or store. Storing entries uncompressed lets version control
//! systems such as git delta ZIP-based documents (OpenDocument, docx, jar)
//! efficiently. With deterministic mode, per-entry timestamps and attributes
//! are reset, so two archives holding the same names and contents produce
//! byte-identical output regardless of when or where they were created.
//!
//! ## Example
//!
//! ```no_run
//! use rezip::{CompressionMode, RezipOptions, rezip};
//!
//! fn main() -> anyhow::Result<()> {
//!     let input = std::fs::read("document.odt")?;
//!     let options = RezipOptions {
//!         compression: CompressionMode::Store,
//!         deterministic: true,
//!     };
//!     let output = rezip(&input, &options)?;
//!     std::fs::write("document.stored.odt", output)?;
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod io;

pub use archive::{
    CompressionMode, EntryMetadata, EntrySummary, RezipError, RezipOptions, list_entries, rezip,
};
pub use cli::Cli;
pub use io::{read_input, write_output};
