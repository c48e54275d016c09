//! Local file header.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Local file header (without signature).
///
/// Precedes every entry payload in the archive body. The variable-length
/// file name and extra field follow immediately after these fixed fields.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct LocalFileHeader {
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
}

impl LocalFileHeader {
    /// Local file header signature bytes.
    pub const MAGIC: [u8; 4] = [0x50, 0x4b, 0x03, 0x04];

    /// Local file header signature as u32.
    pub const SIGNATURE: u32 = 0x04034b50;

    /// Serialized size of the fixed fields, signature included.
    pub const SIZE: usize = 4 + std::mem::size_of::<Self>();

    /// Total variable-length data size following this header.
    pub fn variable_data_size(&self) -> usize {
        self.file_name_length as usize + self.extra_field_length as usize
    }

    /// Write the signature followed by the fixed fields.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(Self::SIGNATURE)?;
        w.write_all(self.as_bytes())
    }
}
