//! Raw ZIP records the `zip` crate reads but does not expose.
//!
//! Only two things are looked at here: the entry count recorded in the End of
//! Central Directory (the reader keys entries by name, so duplicates collapse
//! and its `len()` can be smaller), and the blocks of an entry's extra field.

use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read};

/// Maximum ZIP comment size allowed by the format (65535 bytes).
const MAX_COMMENT_SIZE: usize = 65535;

/// Extra-field blocks that are not copied between archives: ZIP64 sizes
/// (the writer adds its own), and the Info-ZIP Unicode comment and path
/// blocks (checksums of the raw comment and name, which the writer stores
/// as plain UTF-8).
pub const NON_COPYABLE_EXTRA_IDS: [u16; 3] = [0x0001, 0x6375, 0x7075];

/// End of Central Directory (EOCD) - 22 bytes minimum
pub struct EndOfCentralDirectory {
    pub total_entries: u16,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    pub const SIGNATURE: &'static [u8] = b"PK\x05\x06";
    pub const SIZE: usize = 22;

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return None;
        }

        let mut cursor = Cursor::new(&data[4..]);
        let _disk_number = cursor.read_u16::<LittleEndian>().ok()?;
        let _disk_with_cd = cursor.read_u16::<LittleEndian>().ok()?;
        let _disk_entries = cursor.read_u16::<LittleEndian>().ok()?;
        let total_entries = cursor.read_u16::<LittleEndian>().ok()?;
        let _cd_size = cursor.read_u32::<LittleEndian>().ok()?;
        let _cd_offset = cursor.read_u32::<LittleEndian>().ok()?;
        let comment_len = cursor.read_u16::<LittleEndian>().ok()?;

        Some(Self {
            total_entries,
            comment_len,
        })
    }
}

/// ZIP64 End of Central Directory Locator - 20 bytes
pub struct Zip64EOCDLocator {
    pub eocd64_offset: u64,
}

impl Zip64EOCDLocator {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x07";
    pub const SIZE: usize = 20;

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE || &data[0..4] != Self::SIGNATURE {
            return None;
        }

        let mut cursor = Cursor::new(&data[8..]);
        Some(Self {
            eocd64_offset: cursor.read_u64::<LittleEndian>().ok()?,
        })
    }
}

/// ZIP64 End of Central Directory - 56 bytes minimum
pub struct Zip64EOCD {
    pub total_entries: u64,
}

impl Zip64EOCD {
    pub const SIGNATURE: &'static [u8] = b"PK\x06\x06";
    pub const MIN_SIZE: usize = 56;

    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        if data.len() < Self::MIN_SIZE || &data[0..4] != Self::SIGNATURE {
            return None;
        }

        let mut cursor = Cursor::new(&data[32..]);
        Some(Self {
            total_entries: cursor.read_u64::<LittleEndian>().ok()?,
        })
    }
}

/// Number of entries the central directory of `archive` claims to hold.
///
/// `comment_len` is the length of the archive comment as already parsed, so
/// a signature lookalike inside the comment is not mistaken for the record.
/// Returns `None` when no consistent record is found.
pub fn recorded_entry_count(archive: &[u8], comment_len: usize) -> Option<u64> {
    let last = archive.len().checked_sub(EndOfCentralDirectory::SIZE)?;
    let first = last.saturating_sub(MAX_COMMENT_SIZE);

    for offset in (first..=last).rev() {
        let Some(eocd) = EndOfCentralDirectory::from_bytes(&archive[offset..]) else {
            continue;
        };
        let end = offset + EndOfCentralDirectory::SIZE + eocd.comment_len as usize;
        if eocd.comment_len as usize != comment_len || end > archive.len() {
            continue;
        }

        if eocd.total_entries != u16::MAX {
            return Some(eocd.total_entries.into());
        }

        // The ZIP64 locator sits immediately before the regular EOCD
        let locator = offset
            .checked_sub(Zip64EOCDLocator::SIZE)
            .and_then(|start| Zip64EOCDLocator::from_bytes(&archive[start..]));
        return match locator {
            Some(locator) => usize::try_from(locator.eocd64_offset)
                .ok()
                .and_then(|start| archive.get(start..))
                .and_then(Zip64EOCD::from_bytes)
                .map(|eocd64| eocd64.total_entries),
            None => Some(eocd.total_entries.into()),
        };
    }

    None
}

/// One block of an entry's extra field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    pub header_id: u16,
    pub data: Vec<u8>,
}

/// Split a raw extra field into its blocks.
///
/// A truncated trailing block is dropped.
pub fn split_extra_fields(raw: &[u8]) -> Vec<ExtraField> {
    let mut cursor = Cursor::new(raw);
    let mut fields = Vec::new();

    while let (Ok(header_id), Ok(len)) = (
        cursor.read_u16::<LittleEndian>(),
        cursor.read_u16::<LittleEndian>(),
    ) {
        let mut data = vec![0u8; len as usize];
        if cursor.read_exact(&mut data).is_err() {
            break;
        }
        fields.push(ExtraField { header_id, data });
    }

    fields
}
