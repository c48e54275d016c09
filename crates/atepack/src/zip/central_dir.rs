//! Central directory header.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Central directory file header (without signature).
///
/// One record per entry, written in entry order after all local records.
/// Mirrors the local header fields and adds attribute and offset fields.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct CentralDirectoryHeader {
    /// Version made by
    pub version_made_by: u16,
    /// Version needed to extract
    pub version_needed: u16,
    /// General purpose bit flag
    pub flags: u16,
    /// Compression method (99 sentinel for AES entries)
    pub compression_method: u16,
    /// File last modification time and date (DOS format)
    pub last_modified: u32,
    /// CRC-32 of the uncompressed plaintext
    pub crc32: u32,
    /// Compressed size (0xFFFFFFFF when carried in a ZIP64 record)
    pub compressed_size: u32,
    /// Uncompressed size (0xFFFFFFFF when carried in a ZIP64 record)
    pub uncompressed_size: u32,
    /// File name length
    pub file_name_length: u16,
    /// Extra field length
    pub extra_field_length: u16,
    /// File comment length
    pub file_comment_length: u16,
    /// Disk number where file starts
    pub disk_number_start: u16,
    /// Internal file attributes
    pub internal_attrs: u16,
    /// External file attributes (POSIX mode in the high 16 bits)
    pub external_attrs: u32,
    /// Relative offset of the local file header
    pub local_header_offset: u32,
}

impl CentralDirectoryHeader {
    /// Central directory signature bytes.
    pub const MAGIC: [u8; 4] = [0x50, 0x4b, 0x01, 0x02];

    /// Central directory signature as u32.
    pub const SIGNATURE: u32 = 0x02014b50;

    /// Serialized size of the fixed fields, signature included.
    pub const SIZE: usize = 4 + std::mem::size_of::<Self>();

    /// Version made by: Unix host byte, ZIP version 5.1. The Unix host is
    /// what makes consumers honor the POSIX mode in `external_attrs`.
    pub const VERSION_MADE_BY_UNIX: u16 = (3 << 8) | 51;

    /// External attributes for a regular `rw-r--r--` file.
    pub const EXTERNAL_ATTRS_UNIX: u32 = 0o100644 << 16;

    /// Total variable-length data size following this header.
    pub fn variable_data_size(&self) -> usize {
        self.file_name_length as usize
            + self.extra_field_length as usize
            + self.file_comment_length as usize
    }

    /// Write the signature followed by the fixed fields.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(Self::SIGNATURE)?;
        w.write_all(self.as_bytes())
    }
}
