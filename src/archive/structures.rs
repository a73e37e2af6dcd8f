use zip::result::ZipResult;
use zip::write::FullFileOptions;
use zip::{CompressionMethod, DateTime};

use super::records::{ExtraField, NON_COPYABLE_EXTRA_IDS, split_extra_fields};

/// Compression applied uniformly to every entry of the output archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompressionMode {
    #[default]
    Deflate,
    Store,
}

impl CompressionMode {
    pub fn method(&self) -> CompressionMethod {
        match self {
            CompressionMode::Deflate => CompressionMethod::Deflated,
            CompressionMode::Store => CompressionMethod::Stored,
        }
    }
}

/// Settings for one re-encoding run, fixed at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RezipOptions {
    pub compression: CompressionMode,
    pub deterministic: bool,
}

/// Permission bits written for regular files in deterministic mode.
pub const CANONICAL_FILE_PERMISSIONS: u32 = 0o644;

/// Permission bits written for directories in deterministic mode.
pub const CANONICAL_DIR_PERMISSIONS: u32 = 0o755;

/// Per-entry metadata carried from the source archive into the writer.
///
/// The OS-origin ("version made by") tag is not part of this record: the
/// writer stamps the same value on every entry it produces. Neither is the
/// per-entry comment, which the writer has no way to set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    pub last_modified: DateTime,
    pub unix_permissions: Option<u32>,
    pub extra_fields: Vec<ExtraField>,
}

impl EntryMetadata {
    /// Metadata as recorded in the source entry.
    ///
    /// A missing or unrepresentable timestamp falls back to the DOS epoch
    /// rather than the wall clock, so the output never depends on when the
    /// run happened. Extra-field blocks listed in
    /// [`NON_COPYABLE_EXTRA_IDS`] are left out.
    pub fn from_source(
        last_modified: Option<DateTime>,
        unix_mode: Option<u32>,
        extra_data: Option<&[u8]>,
    ) -> Self {
        let extra_fields = split_extra_fields(extra_data.unwrap_or_default())
            .into_iter()
            .filter(|field| !NON_COPYABLE_EXTRA_IDS.contains(&field.header_id))
            .collect();

        Self {
            last_modified: last_modified.unwrap_or_default(),
            unix_permissions: unix_mode,
            extra_fields,
        }
    }

    /// Fixed metadata used in deterministic mode: 1980-01-01 00:00:00,
    /// `0o644` (files) or `0o755` (directories), no extra fields.
    pub fn canonical(is_dir: bool) -> Self {
        let permissions = if is_dir {
            CANONICAL_DIR_PERMISSIONS
        } else {
            CANONICAL_FILE_PERMISSIONS
        };
        Self {
            last_modified: DateTime::default(),
            unix_permissions: Some(permissions),
            extra_fields: Vec::new(),
        }
    }

    /// Writer options for an entry of `size` uncompressed bytes.
    ///
    /// Fails if the extra fields are rejected by the writer, for example
    /// because together they exceed 65535 bytes.
    pub fn file_options(
        &self,
        compression: CompressionMode,
        size: u64,
    ) -> ZipResult<FullFileOptions<'static>> {
        let options = FullFileOptions::default()
            .compression_method(compression.method())
            .last_modified_time(self.last_modified)
            .large_file(size >= u64::from(u32::MAX));

        let mut options = match self.unix_permissions {
            Some(mode) => options.unix_permissions(mode),
            None => options,
        };
        for field in &self.extra_fields {
            options.add_extra_data(field.header_id, field.data.as_slice().into(), false)?;
        }

        Ok(options)
    }
}

/// Summary of one entry of an encoded archive
#[derive(Debug, Clone)]
pub struct EntrySummary {
    pub file_name: String,
    pub compression_method: CompressionMethod,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
    pub last_modified: Option<DateTime>,
    pub is_directory: bool,
}

impl EntrySummary {
    /// Space saved by compression, in percent
    pub fn ratio(&self) -> u64 {
        if self.uncompressed_size == 0 {
            return 0;
        }
        100u64.saturating_sub(self.compressed_size * 100 / self.uncompressed_size)
    }

    /// Modification date as (year, month, day)
    pub fn mod_date(&self) -> (u16, u8, u8) {
        let time = self.last_modified.unwrap_or_default();
        (time.year(), time.month(), time.day())
    }

    /// Modification time as (hour, minute, second)
    pub fn mod_time(&self) -> (u8, u8, u8) {
        let time = self.last_modified.unwrap_or_default();
        (time.hour(), time.minute(), time.second())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_deflate_without_determinism() {
        let options = RezipOptions::default();
        assert_eq!(options.compression, CompressionMode::Deflate);
        assert!(!options.deterministic);
    }

    #[test]
    fn compression_mode_maps_to_zip_method() {
        assert_eq!(CompressionMode::Deflate.method(), CompressionMethod::Deflated);
        assert_eq!(CompressionMode::Store.method(), CompressionMethod::Stored);
    }

    #[test]
    fn canonical_metadata_uses_dos_epoch() {
        let file = EntryMetadata::canonical(false);
        assert_eq!(file.last_modified.year(), 1980);
        assert_eq!(file.last_modified.month(), 1);
        assert_eq!(file.last_modified.day(), 1);
        assert_eq!(file.last_modified.hour(), 0);
        assert_eq!(file.unix_permissions, Some(0o644));

        let dir = EntryMetadata::canonical(true);
        assert_eq!(dir.last_modified, file.last_modified);
        assert_eq!(dir.unix_permissions, Some(0o755));
    }

    #[test]
    fn source_metadata_without_timestamp_falls_back_to_epoch() {
        let metadata = EntryMetadata::from_source(None, None, None);
        assert_eq!(metadata.last_modified, DateTime::default());
        assert_eq!(metadata.unix_permissions, None);
        assert!(metadata.extra_fields.is_empty());
    }

    #[test]
    fn source_metadata_keeps_extra_fields_except_non_copyable() {
        let raw = [
            0x01, 0x00, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0, // ZIP64 sizes
            0xfe, 0xca, 2, 0, 7, 8, //
            0x75, 0x70, 5, 0, 1, 0, 0, 0, 0, // Unicode path
        ];
        let metadata = EntryMetadata::from_source(None, Some(0o100600), Some(&raw));
        assert_eq!(
            metadata.extra_fields,
            vec![ExtraField {
                header_id: 0xcafe,
                data: vec![7, 8],
            }]
        );
        assert_eq!(metadata.unix_permissions, Some(0o100600));
    }

    #[test]
    fn canonical_metadata_has_no_extra_fields() {
        assert!(EntryMetadata::canonical(false).extra_fields.is_empty());
    }

    #[test]
    fn summary_ratio_and_timestamp() {
        let summary = EntrySummary {
            file_name: "a.txt".to_string(),
            compression_method: CompressionMethod::Deflated,
            compressed_size: 25,
            uncompressed_size: 100,
            last_modified: DateTime::from_date_and_time(2020, 6, 15, 12, 30, 10).ok(),
            is_directory: false,
        };
        assert_eq!(summary.ratio(), 75);
        assert_eq!(summary.mod_date(), (2020, 6, 15));
        assert_eq!(summary.mod_time(), (12, 30, 10));

        let empty = EntrySummary {
            uncompressed_size: 0,
            compressed_size: 2,
            ..summary
        };
        assert_eq!(empty.ratio(), 0);
    }
}
