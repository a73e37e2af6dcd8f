//! Archive re-encoding.
//!
//! The source archive is opened from an in-memory buffer, every entry is
//! fully decompressed and written again into a fresh in-memory archive, and
//! the finished bytes are returned only once the central directory has been
//! written. Nothing is handed back on failure, so callers never emit a
//! partial archive.

use std::io::{Cursor, Read, Seek, Write};

use log::{debug, trace, warn};
use zip::result::{ZipError, ZipResult};
use zip::write::FullFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::error::RezipError;
use super::records::recorded_entry_count;
use super::structures::{CompressionMode, EntryMetadata, RezipOptions};

/// One decompressed entry of the source archive.
#[derive(Debug)]
struct SourceEntry {
    name: String,
    payload: Vec<u8>,
    metadata: EntryMetadata,
    is_dir: bool,
}

/// Re-encode the archive in `input` according to `options`.
///
/// Entry order, names, payloads and the archive comment are carried over
/// unchanged. Every entry is written with `options.compression`; metadata is
/// copied from the source or, in deterministic mode, replaced with
/// [`EntryMetadata::canonical`].
///
/// # Errors
///
/// - [`RezipError::MalformedArchive`] if the central directory cannot be read
/// - [`RezipError::DuplicateEntries`] if several entries share a name
/// - [`RezipError::CorruptEntry`] if an entry fails to decompress
/// - [`RezipError::UnsupportedEntry`] for encrypted or undecodable entries
/// - [`RezipError::Encode`] if the output archive cannot be assembled
pub fn rezip(input: &[u8], options: &RezipOptions) -> Result<Vec<u8>, RezipError> {
    let mut archive =
        ZipArchive::new(Cursor::new(input)).map_err(RezipError::MalformedArchive)?;
    check_entry_count(input, &archive)?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

    debug!(
        "re-encoding {} entries ({:?}, deterministic: {})",
        archive.len(),
        options.compression,
        options.deterministic
    );

    for index in 0..archive.len() {
        let entry = read_entry(&mut archive, index, options.deterministic)?;
        trace!(
            "{}: {} bytes, modified {:?}",
            entry.name,
            entry.payload.len(),
            entry.metadata.last_modified
        );
        write_entry(&mut writer, &entry, options.compression)?;
    }

    writer.set_raw_comment(archive.comment().into());

    let output = writer.finish().map_err(|source| RezipError::Encode {
        entry: "central directory".to_string(),
        source,
    })?;
    Ok(output.into_inner())
}

/// Fail if the reader collapsed entries that share a name.
///
/// Duplicates cannot be written back either: the writer refuses a name it
/// has already seen.
fn check_entry_count<R: Read + Seek>(
    input: &[u8],
    archive: &ZipArchive<R>,
) -> Result<(), RezipError> {
    match recorded_entry_count(input, archive.comment().len()) {
        Some(recorded) if recorded != archive.len() as u64 => Err(RezipError::DuplicateEntries {
            recorded,
            distinct: archive.len(),
        }),
        Some(_) => Ok(()),
        None => {
            debug!("no end of central directory record found, skipping entry count check");
            Ok(())
        }
    }
}

/// Read and fully decompress entry `index`.
fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    index: usize,
    deterministic: bool,
) -> Result<SourceEntry, RezipError> {
    let mut file = archive
        .by_index(index)
        .map_err(|source| RezipError::reading(format!("#{index}"), source))?;
    let name = file.name().to_string();

    let mut payload = Vec::new();
    if let Err(err) = file.read_to_end(&mut payload) {
        return Err(RezipError::reading(name, ZipError::Io(err)));
    }

    let is_dir = file.is_dir() && payload.is_empty();
    let metadata = if deterministic {
        EntryMetadata::canonical(is_dir)
    } else {
        if !file.comment().is_empty() {
            warn!("{name}: entry comment is not carried over");
        }
        EntryMetadata::from_source(file.last_modified(), file.unix_mode(), file.extra_data())
    };

    Ok(SourceEntry {
        name,
        payload,
        metadata,
        is_dir,
    })
}

/// Append `entry` to `writer` using `compression`.
///
/// The writer's directory records are always stored, so they are only used
/// in store mode. Under deflate a directory is written like a file: its name
/// keeps the trailing `/`, but the type bits in its attributes say
/// "regular file".
fn write_entry<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    entry: &SourceEntry,
    compression: CompressionMode,
) -> Result<(), RezipError> {
    let result = entry
        .metadata
        .file_options(compression, entry.payload.len() as u64)
        .and_then(|options| append(writer, entry, compression, options));

    result.map_err(|source| RezipError::Encode {
        entry: entry.name.clone(),
        source,
    })
}

fn append<W: Write + Seek>(
    writer: &mut ZipWriter<W>,
    entry: &SourceEntry,
    compression: CompressionMode,
    options: FullFileOptions<'static>,
) -> ZipResult<()> {
    if entry.is_dir && compression == CompressionMode::Store {
        writer.add_directory(entry.name.clone(), options)
    } else {
        writer
            .start_file(entry.name.clone(), options)
            .and_then(|()| writer.write_all(&entry.payload).map_err(ZipError::Io))
    }
}
