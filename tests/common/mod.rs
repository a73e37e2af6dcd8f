//! Helpers for building and inspecting archives in tests.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::FullFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

/// An entry to place in a test archive.
pub struct TestEntry<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
    pub method: CompressionMethod,
    pub modified: DateTime,
    pub permissions: u32,
    pub directory: bool,
    pub extra: Option<(u16, &'a [u8])>,
}

impl<'a> TestEntry<'a> {
    pub fn new(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            method: CompressionMethod::Deflated,
            modified: date(2015, 3, 14),
            permissions: 0o644,
            directory: false,
            extra: None,
        }
    }

    /// A directory record, written the way the writer adds directories.
    pub fn directory(name: &'a str) -> Self {
        Self {
            directory: true,
            permissions: 0o755,
            ..Self::new(name, b"")
        }
    }

    pub fn extra(mut self, header_id: u16, data: &'a [u8]) -> Self {
        self.extra = Some((header_id, data));
        self
    }

    pub fn method(mut self, method: CompressionMethod) -> Self {
        self.method = method;
        self
    }

    pub fn modified(mut self, modified: DateTime) -> Self {
        self.modified = modified;
        self
    }

    pub fn permissions(mut self, permissions: u32) -> Self {
        self.permissions = permissions;
        self
    }
}

pub fn date(year: u16, month: u8, day: u8) -> DateTime {
    DateTime::from_date_and_time(year, month, day, 10, 20, 30).expect("valid date")
}

/// Builds an archive in memory.
pub fn build_archive(entries: &[TestEntry<'_>], comment: &[u8]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        let mut options = FullFileOptions::default()
            .compression_method(entry.method)
            .last_modified_time(entry.modified)
            .unix_permissions(entry.permissions);
        if let Some((header_id, data)) = entry.extra {
            options
                .add_extra_data(header_id, data.into(), false)
                .expect("add extra field");
        }
        if entry.directory {
            writer.add_directory(entry.name, options).expect("add directory");
        } else {
            writer.start_file(entry.name, options).expect("start entry");
            writer.write_all(entry.data).expect("write entry");
        }
    }
    writer.set_raw_comment(comment.into());
    writer.finish().expect("finish archive").into_inner()
}

/// Renames every `from` to `to` in the raw bytes, headers included.
///
/// Both names must have the same length so no offsets move.
pub fn rename_raw(archive: &mut [u8], from: &[u8], to: &[u8]) {
    assert_eq!(from.len(), to.len());
    let mut pos = 0;
    while let Some(found) = archive[pos..]
        .windows(from.len())
        .position(|window| window == from)
    {
        let start = pos + found;
        archive[start..start + to.len()].copy_from_slice(to);
        pos = start + to.len();
    }
}

/// Raw extra field of entry `index`, as the reader reports it.
pub fn extra_data(bytes: &[u8], index: usize) -> Vec<u8> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open archive");
    let file = archive.by_index_raw(index).expect("open entry");
    file.extra_data().unwrap_or_default().to_vec()
}

/// Decoded view of an archive: names, payloads and methods in stored order.
#[derive(Debug, PartialEq, Eq)]
pub struct ArchiveContent {
    pub entries: Vec<(String, Vec<u8>)>,
    pub methods: Vec<CompressionMethod>,
    pub comment: Vec<u8>,
}

impl ArchiveContent {
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Opens an archive and decompresses every entry.
pub fn read_archive(bytes: &[u8]) -> ArchiveContent {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open archive");
    let mut entries = Vec::new();
    let mut methods = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).expect("open entry");
        let mut data = Vec::new();
        file.read_to_end(&mut data).expect("read entry");
        methods.push(file.compression());
        entries.push((file.name().to_string(), data));
    }
    ArchiveContent {
        entries,
        methods,
        comment: archive.comment().to_vec(),
    }
}
