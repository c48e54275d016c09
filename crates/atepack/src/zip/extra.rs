//! Extra-field records.
//!
//! Two extra fields appear in `.ate` archives: the WinZip AES field
//! (tag `0x9901`) describing the encryption profile, and the ZIP64 field
//! (tag `0x0001`), emitted only when a 32-bit size or offset field carries
//! the `0xFFFFFFFF` sentinel. A sentinel without its ZIP64 record is a
//! conformance bug.

use std::io::{self, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::profile::AesStrength;
use crate::zip::CompressionMethod;

/// WinZip AES extra-field tag.
pub const AES_EXTRA_ID: u16 = 0x9901;

/// ZIP64 extended-information extra-field tag.
pub const ZIP64_EXTRA_ID: u16 = 0x0001;

/// AES format version: AE-2 (the CRC-bearing convention).
pub const AE2_VERSION: u16 = 2;

/// Vendor identifier, always `"AE"`.
pub const AES_VENDOR_ID: [u8; 2] = *b"AE";

/// Serialized size of the AES extra field.
pub const AES_EXTRA_LEN: usize = 11;

/// Build the 11-byte AES extra field for one entry.
///
/// The identical block goes into both the entry's local record and its
/// central directory record. The strength code must match the key size
/// actually derived; `real_method` is the pre-encryption transform.
pub fn aes_extra_field(strength: AesStrength, real_method: CompressionMethod) -> [u8; AES_EXTRA_LEN] {
    let mut out = [0u8; AES_EXTRA_LEN];
    out[0..2].copy_from_slice(&AES_EXTRA_ID.to_le_bytes());
    out[2..4].copy_from_slice(&7u16.to_le_bytes()); // data size
    out[4..6].copy_from_slice(&AE2_VERSION.to_le_bytes());
    out[6..8].copy_from_slice(&AES_VENDOR_ID);
    out[8] = strength.code();
    out[9..11].copy_from_slice(&real_method.code().to_le_bytes());
    out
}

/// ZIP64 extended-information record.
///
/// Only fields whose 32-bit counterpart carries the sentinel are present,
/// in the fixed order: uncompressed size, compressed size, local offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zip64Extra {
    /// Uncompressed size, when >= the 32-bit sentinel.
    pub uncompressed_size: Option<u64>,
    /// Compressed size, when >= the 32-bit sentinel.
    pub compressed_size: Option<u64>,
    /// Local header offset, when >= the 32-bit sentinel.
    pub local_header_offset: Option<u64>,
}

impl Zip64Extra {
    /// Whether any field needs a ZIP64 record at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.uncompressed_size.is_none()
            && self.compressed_size.is_none()
            && self.local_header_offset.is_none()
    }

    /// Serialized size, header included. Zero when no field is present.
    pub fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let fields = usize::from(self.uncompressed_size.is_some())
            + usize::from(self.compressed_size.is_some())
            + usize::from(self.local_header_offset.is_some());
        4 + 8 * fields
    }

    /// Write the record, or nothing when no field is present.
    pub fn write_to<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        w.write_u16::<LittleEndian>(ZIP64_EXTRA_ID)?;
        w.write_u16::<LittleEndian>((self.len() - 4) as u16)?;
        if let Some(size) = self.uncompressed_size {
            w.write_u64::<LittleEndian>(size)?;
        }
        if let Some(size) = self.compressed_size {
            w.write_u64::<LittleEndian>(size)?;
        }
        if let Some(offset) = self.local_header_offset {
            w.write_u64::<LittleEndian>(offset)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aes_extra_field_bytes() {
        let field = aes_extra_field(AesStrength::Aes256, CompressionMethod::Store);
        assert_eq!(
            field,
            [0x01, 0x99, 0x07, 0x00, 0x02, 0x00, 0x41, 0x45, 0x03, 0x00, 0x00]
        );
    }

    #[test]
    fn test_aes_extra_field_reflects_profile() {
        let field = aes_extra_field(AesStrength::Aes128, CompressionMethod::Deflate);
        assert_eq!(field[8], 1);
        assert_eq!(&field[9..11], &8u16.to_le_bytes());
    }

    #[test]
    fn test_zip64_absent_when_unneeded() {
        let extra = Zip64Extra::default();
        assert_eq!(extra.len(), 0);

        let mut out = Vec::new();
        extra.write_to(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_zip64_record_layout() {
        let extra = Zip64Extra {
            uncompressed_size: Some(0x1_0000_0000),
            compressed_size: Some(0x1_0000_001A),
            local_header_offset: None,
        };
        assert_eq!(extra.len(), 20);

        let mut out = Vec::new();
        extra.write_to(&mut out).unwrap();
        assert_eq!(out.len(), 20);
        assert_eq!(&out[0..2], &0x0001u16.to_le_bytes());
        assert_eq!(&out[2..4], &16u16.to_le_bytes());
        assert_eq!(&out[4..12], &0x1_0000_0000u64.to_le_bytes());
        assert_eq!(&out[12..20], &0x1_0000_001Au64.to_le_bytes());
    }
}
