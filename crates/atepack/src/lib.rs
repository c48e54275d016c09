//! Encoder for `.ate` archives consumed by the AutoTouch automation runtime.
//!
//! The `.ate` format is a customized ZIP container. Every entry is stored
//! with the WinZip AES conventions the runtime expects:
//!
//! - AES-CTR payload encryption (128/192/256-bit) with per-entry salts
//! - PBKDF2-HMAC-SHA1 key derivation, 1000 iterations
//! - AE-2 style extra field (tag `0x9901`) describing the encryption profile
//! - HMAC-SHA1 authentication trailer truncated to 10 bytes
//! - Optional raw-DEFLATE pre-compression (methods store and deflate only)
//!
//! The consuming runtime accepts no deviation in field order, lengths, or
//! offsets, so every record is serialized with an exact, checked byte layout.
//! This crate only ever *builds* archives; it never parses its own output.
//!
//! # Example
//!
//! ```
//! use atepack::{ArchiveBuilder, BuildOptions, FileEntry};
//!
//! let mut builder = ArchiveBuilder::new(BuildOptions::default());
//! builder.entry(FileEntry::text("index.lua", "print('hello')"));
//! let archive = builder.build()?;
//! assert_eq!(&archive[..4], b"PK\x03\x04");
//! # Ok::<(), atepack::Error>(())
//! ```

mod builder;
mod compress;
pub mod crc;
pub mod crypto;
mod entry;
mod error;
mod profile;
pub mod zip;

pub use builder::{assemble, ArchiveBuilder};
pub use entry::FileEntry;
pub use error::{Error, Result};
pub use profile::{AesStrength, BuildOptions, EncryptionProfile};
pub use zip::CompressionMethod;
