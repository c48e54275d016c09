//! Archive assembly.
//!
//! The builder sequences the whole `.ate` layout: one local record per
//! entry in input order, then one central directory record per entry in
//! the same order, then the EOCD trailer. Declared length fields are
//! checked against the bytes actually written before the buffer is
//! returned; any per-entry failure aborts the build and the partial
//! buffer is discarded.

use std::collections::HashSet;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::compress;
use crate::crc;
use crate::crypto;
use crate::entry::FileEntry;
use crate::profile::{BuildOptions, EncryptionProfile};
use crate::zip::extra::{aes_extra_field, Zip64Extra, AES_EXTRA_LEN};
use crate::zip::{self, CentralDirectoryHeader, CompressionMethod, EocdRecord, LocalFileHeader};
use crate::{Error, Result};

/// Builds one in-memory `.ate` archive from an ordered entry list.
///
/// The builder holds no state between [`build`](Self::build) calls and the
/// produced buffer is never mutated after return, so independent builds may
/// run fully in parallel.
pub struct ArchiveBuilder {
    options: BuildOptions,
    entries: Vec<FileEntry>,
}

/// Per-entry bookkeeping carried from the local-record pass into the
/// central-directory pass.
struct PendingRecord {
    name: Vec<u8>,
    version_needed: u16,
    flags: u16,
    method: u16,
    crc32: u32,
    compressed_size: u64,
    uncompressed_size: u64,
    aes_extra: Option<[u8; AES_EXTRA_LEN]>,
    local_offset: u64,
}

impl ArchiveBuilder {
    /// Create a builder with the given options and no entries.
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
        }
    }

    /// Append an entry. Entries are archived in insertion order.
    pub fn entry(&mut self, entry: FileEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Append several entries at once.
    pub fn entries<I: IntoIterator<Item = FileEntry>>(&mut self, entries: I) -> &mut Self {
        self.entries.extend(entries);
        self
    }

    /// Number of entries added so far.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Build the archive using the operating-system random source.
    pub fn build(&self) -> Result<Vec<u8>> {
        self.build_with_rng(&mut OsRng)
    }

    /// Build the archive with a caller-supplied random source.
    ///
    /// Two builds of the same entry list produce equal-length archives with
    /// identical field values; only the salt, ciphertext and auth-code bytes
    /// drawn from `rng` differ.
    pub fn build_with_rng<R: RngCore + CryptoRng>(&self, rng: &mut R) -> Result<Vec<u8>> {
        self.validate()?;

        let mut out = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            pending.push(self.write_local_record(&mut out, entry, rng)?);
        }

        let central_dir_offset = out.len() as u64;
        for record in &pending {
            write_central_record(&mut out, record, self.options.dos_datetime)?;
        }
        let central_dir_size = out.len() as u64 - central_dir_offset;

        write_eocd(&mut out, pending.len(), central_dir_size, central_dir_offset)?;

        Ok(out)
    }

    /// Reject inputs the format cannot represent before any bytes are built.
    fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::EmptyArchive);
        }

        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            let name = entry.name();
            if name.is_empty() {
                return Err(Error::EmptyName);
            }
            if name.len() > u16::MAX as usize {
                return Err(Error::NameTooLong(name.len()));
            }
            if !seen.insert(name) {
                return Err(Error::DuplicateName(name.to_string()));
            }
        }
        Ok(())
    }

    /// Transform, encrypt and append one local record; returns the
    /// bookkeeping the central directory pass needs.
    fn write_local_record<R: RngCore + CryptoRng>(
        &self,
        out: &mut Vec<u8>,
        entry: &FileEntry,
        rng: &mut R,
    ) -> Result<PendingRecord> {
        let plaintext = entry.content();
        let crc32 = crc::checksum(plaintext);

        let transformed = match self.options.compression {
            CompressionMethod::Store => plaintext.to_vec(),
            CompressionMethod::Deflate => compress::compress_deflate(plaintext)?,
        };

        let (payload, version_needed, flags, method, aes_extra) = match self.options.encryption {
            EncryptionProfile::None => (
                transformed,
                zip::VERSION_PLAIN,
                zip::FLAG_UTF8,
                self.options.compression.code(),
                None,
            ),
            EncryptionProfile::Aes(strength) => {
                let encrypted =
                    crypto::encrypt_entry(&transformed, &self.options.password, strength, rng)?;
                let mut payload = Vec::with_capacity(encrypted.payload_len());
                encrypted.write_payload(&mut payload);
                (
                    payload,
                    zip::VERSION_AES,
                    zip::FLAG_ENCRYPTED | zip::FLAG_UTF8,
                    zip::AES_METHOD,
                    Some(aes_extra_field(strength, self.options.compression)),
                )
            }
        };

        let name = entry.name().as_bytes().to_vec();
        let uncompressed_size = plaintext.len() as u64;
        let compressed_size = payload.len() as u64;
        let local_offset = out.len() as u64;

        // The local header carries both sizes in its ZIP64 record whenever
        // either overflows, and both 32-bit fields go to the sentinel.
        let (uncompressed_field, uncompressed_z64) = split_u32(uncompressed_size);
        let (compressed_field, compressed_z64) = split_u32(compressed_size);
        let (uncompressed_field, compressed_field, zip64) =
            if uncompressed_z64.is_some() || compressed_z64.is_some() {
                (
                    zip::ZIP64_SENTINEL_U32,
                    zip::ZIP64_SENTINEL_U32,
                    Zip64Extra {
                        uncompressed_size: Some(uncompressed_size),
                        compressed_size: Some(compressed_size),
                        local_header_offset: None,
                    },
                )
            } else {
                (uncompressed_field, compressed_field, Zip64Extra::default())
            };

        let extra_len = aes_extra.map_or(0, |f| f.len()) + zip64.len();

        let header = LocalFileHeader {
            version_needed,
            flags,
            compression_method: method,
            last_modified: self.options.dos_datetime,
            crc32,
            compressed_size: compressed_field,
            uncompressed_size: uncompressed_field,
            file_name_length: name.len() as u16,
            extra_field_length: extra_len as u16,
        };

        header.write_to(out)?;
        out.extend_from_slice(&name);
        if let Some(field) = aes_extra {
            out.extend_from_slice(&field);
        }
        zip64.write_to(out)?;
        out.extend_from_slice(&payload);

        let declared = LocalFileHeader::SIZE as u64
            + header.variable_data_size() as u64
            + compressed_size;
        let actual = out.len() as u64 - local_offset;
        if declared != actual {
            return Err(Error::LengthMismatch {
                field: "local record",
                declared,
                actual,
            });
        }

        Ok(PendingRecord {
            name,
            version_needed,
            flags,
            method,
            crc32,
            compressed_size,
            uncompressed_size,
            aes_extra,
            local_offset,
        })
    }
}

/// Append the central directory record mirroring one local record.
fn write_central_record(out: &mut Vec<u8>, record: &PendingRecord, dos_datetime: u32) -> Result<()> {
    let start = out.len() as u64;

    let (uncompressed_field, uncompressed_z64) = split_u32(record.uncompressed_size);
    let (compressed_field, compressed_z64) = split_u32(record.compressed_size);
    let (offset_field, offset_z64) = split_u32(record.local_offset);
    let zip64 = Zip64Extra {
        uncompressed_size: uncompressed_z64,
        compressed_size: compressed_z64,
        local_header_offset: offset_z64,
    };

    let extra_len = record.aes_extra.map_or(0, |f| f.len()) + zip64.len();

    let header = CentralDirectoryHeader {
        version_made_by: CentralDirectoryHeader::VERSION_MADE_BY_UNIX,
        version_needed: record.version_needed,
        flags: record.flags,
        compression_method: record.method,
        last_modified: dos_datetime,
        crc32: record.crc32,
        compressed_size: compressed_field,
        uncompressed_size: uncompressed_field,
        file_name_length: record.name.len() as u16,
        extra_field_length: extra_len as u16,
        file_comment_length: 0,
        disk_number_start: 0,
        internal_attrs: 0,
        external_attrs: CentralDirectoryHeader::EXTERNAL_ATTRS_UNIX,
        local_header_offset: offset_field,
    };

    header.write_to(out)?;
    out.extend_from_slice(&record.name);
    if let Some(field) = record.aes_extra {
        out.extend_from_slice(&field);
    }
    zip64.write_to(out)?;

    let declared = CentralDirectoryHeader::SIZE as u64 + header.variable_data_size() as u64;
    let actual = out.len() as u64 - start;
    if declared != actual {
        return Err(Error::LengthMismatch {
            field: "central directory record",
            declared,
            actual,
        });
    }

    Ok(())
}

/// Append the fixed trailer. The `.ate` trailer is always the 22-byte
/// single-disk EOCD; archives its counts or offsets cannot describe are
/// rejected rather than silently truncated.
fn write_eocd(
    out: &mut Vec<u8>,
    entry_count: usize,
    central_dir_size: u64,
    central_dir_offset: u64,
) -> Result<()> {
    let sentinel = u64::from(zip::ZIP64_SENTINEL_U32);
    if entry_count > u16::MAX as usize
        || central_dir_size >= sentinel
        || central_dir_offset >= sentinel
    {
        return Err(Error::ArchiveTooLarge);
    }

    let start = out.len();
    EocdRecord::new(
        entry_count as u16,
        central_dir_size as u32,
        central_dir_offset as u32,
    )
    .write_to(out)?;

    let written = out.len() - start;
    if written != EocdRecord::SIZE {
        return Err(Error::LengthMismatch {
            field: "end of central directory",
            declared: EocdRecord::SIZE as u64,
            actual: written as u64,
        });
    }

    Ok(())
}

/// Split a 64-bit value into its 32-bit field and, when it does not fit,
/// the value destined for a ZIP64 extra record.
fn split_u32(value: u64) -> (u32, Option<u64>) {
    if value >= u64::from(zip::ZIP64_SENTINEL_U32) {
        (zip::ZIP64_SENTINEL_U32, Some(value))
    } else {
        (value as u32, None)
    }
}

/// Build an archive from an entry slice in one call.
pub fn assemble(entries: &[FileEntry], options: &BuildOptions) -> Result<Vec<u8>> {
    let mut builder = ArchiveBuilder::new(options.clone());
    builder.entries(entries.iter().cloned());
    builder.build()
}
