//! ZIP wire structures for the `.ate` container.
//!
//! Each record struct mirrors the exact on-disk field layout; the 4-byte
//! signature is written separately before the packed struct. The consuming
//! runtime accepts no deviation in field order, lengths, or offsets.

pub mod central_dir;
pub mod eocd;
pub mod extra;
pub mod local;

pub use central_dir::CentralDirectoryHeader;
pub use eocd::EocdRecord;
pub use local::LocalFileHeader;

/// Pre-encryption compression methods supported by the `.ate` format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CompressionMethod {
    /// No compression (stored).
    Store = 0,
    /// Raw DEFLATE compression.
    Deflate = 8,
}

impl CompressionMethod {
    /// Wire value for the "real method" slot of the AES extra field.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for CompressionMethod {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Store),
            8 => Ok(Self::Deflate),
            other => Err(other),
        }
    }
}

/// Compression-method sentinel for AES-encrypted entries ("see extra field").
pub const AES_METHOD: u16 = 99;

/// Version needed to extract an AES-encrypted entry (5.1).
pub const VERSION_AES: u16 = 51;

/// Version needed to extract a plain stored/deflated entry (2.0).
pub const VERSION_PLAIN: u16 = 20;

/// General-purpose flag bit 0: the entry payload is encrypted.
pub const FLAG_ENCRYPTED: u16 = 0x0001;

/// General-purpose flag bit 11: the file name is UTF-8.
pub const FLAG_UTF8: u16 = 0x0800;

/// Sentinel value for 32-bit size/offset fields whose real value lives in
/// a ZIP64 extra-field record.
pub const ZIP64_SENTINEL_U32: u32 = 0xFFFF_FFFF;

/// DOS datetime for 1980-01-01 00:00:00, the default record timestamp.
pub const DOS_EPOCH: u32 = dos_datetime(1980, 1, 1, 0, 0, 0);

/// Pack a date and time into the DOS format ZIP records use
/// (date in the high 16 bits, 2-second time resolution).
pub const fn dos_datetime(year: u16, month: u16, day: u16, hour: u16, min: u16, sec: u16) -> u32 {
    let date = ((year - 1980) << 9) | (month << 5) | day;
    let time = (hour << 11) | (min << 5) | (sec / 2);
    ((date as u32) << 16) | time as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_codes() {
        assert_eq!(CompressionMethod::Store.code(), 0);
        assert_eq!(CompressionMethod::Deflate.code(), 8);
        assert_eq!(CompressionMethod::try_from(8), Ok(CompressionMethod::Deflate));
        assert_eq!(CompressionMethod::try_from(99), Err(99));
    }

    #[test]
    fn test_dos_datetime_packing() {
        assert_eq!(DOS_EPOCH, 0x0021_0000);
        // 2024-06-15 12:30:40 -> date 0x58CF, time 0x63D4
        assert_eq!(dos_datetime(2024, 6, 15, 12, 30, 40), 0x58CF_63D4);
    }
}
