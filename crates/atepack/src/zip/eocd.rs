//! End of central directory (EOCD) record.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// End of central directory record (without signature).
///
/// The fixed 22-byte trailer that closes every archive. The `.ate` format
/// is always single-disk with no comment, so both disk fields and the
/// comment length are zero.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct EocdRecord {
    /// Number of this disk
    pub disk_number: u16,
    /// Disk where central directory starts
    pub central_dir_disk: u16,
    /// Number of central directory records on this disk
    pub central_dir_count_disk: u16,
    /// Total number of central directory records
    pub central_dir_count_total: u16,
    /// Size of central directory (bytes)
    pub central_dir_size: u32,
    /// Offset of start of central directory
    pub central_dir_offset: u32,
    /// Comment length
    pub comment_length: u16,
}

impl EocdRecord {
    /// EOCD signature bytes.
    pub const MAGIC: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];

    /// EOCD signature as u32.
    pub const SIGNATURE: u32 = 0x06054b50;

    /// Serialized size, signature included.
    pub const SIZE: usize = 4 + std::mem::size_of::<Self>();

    /// Build the trailer for a single-disk archive.
    pub fn new(entry_count: u16, central_dir_size: u32, central_dir_offset: u32) -> Self {
        Self {
            disk_number: 0,
            central_dir_disk: 0,
            central_dir_count_disk: entry_count,
            central_dir_count_total: entry_count,
            central_dir_size,
            central_dir_offset,
            comment_length: 0,
        }
    }

    /// Write the signature followed by the fixed fields.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        w.write_u32::<LittleEndian>(Self::SIGNATURE)?;
        w.write_all(self.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_size() {
        assert_eq!(EocdRecord::SIZE, 22);
    }

    #[test]
    fn test_trailer_layout() {
        let mut out = Vec::new();
        EocdRecord::new(2, 0x70, 0x1234).write_to(&mut out).unwrap();

        assert_eq!(out.len(), 22);
        assert_eq!(&out[..4], &EocdRecord::MAGIC);
        assert_eq!(&out[8..10], &2u16.to_le_bytes());
        assert_eq!(&out[10..12], &2u16.to_le_bytes());
        assert_eq!(&out[12..16], &0x70u32.to_le_bytes());
        assert_eq!(&out[16..20], &0x1234u32.to_le_bytes());
        assert_eq!(&out[20..22], &[0, 0]);
    }
}
