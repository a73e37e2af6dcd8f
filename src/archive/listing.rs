use std::io::Cursor;

use zip::ZipArchive;

use super::error::RezipError;
use super::structures::EntrySummary;

/// List the entries of an encoded archive in stored order.
///
/// Entries are opened raw, so nothing is decompressed.
pub fn list_entries(archive: &[u8]) -> Result<Vec<EntrySummary>, RezipError> {
    let mut archive =
        ZipArchive::new(Cursor::new(archive)).map_err(RezipError::MalformedArchive)?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive
            .by_index_raw(index)
            .map_err(|source| RezipError::reading(format!("#{index}"), source))?;
        entries.push(EntrySummary {
            file_name: file.name().to_string(),
            compression_method: file.compression(),
            compressed_size: file.compressed_size(),
            uncompressed_size: file.size(),
            last_modified: file.last_modified(),
            is_directory: file.is_dir(),
        });
    }

    Ok(entries)
}
