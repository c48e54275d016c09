//! Error types for the atepack crate.

use thiserror::Error;

/// Errors that can occur while building an `.ate` archive.
///
/// Every error aborts the whole build; a partially written buffer is never
/// returned to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The entry list was empty.
    #[error("archive must contain at least one entry")]
    EmptyArchive,

    /// Two entries share the same archive-relative name.
    #[error("duplicate entry name: {0}")]
    DuplicateName(String),

    /// An entry has an empty name.
    #[error("entry name must not be empty")]
    EmptyName,

    /// An entry name does not fit the 16-bit length field.
    #[error("entry name too long: {0} bytes (maximum 65535)")]
    NameTooLong(usize),

    /// The random source failed while generating a salt.
    #[error("random source failure: {0}")]
    Rng(#[from] rand::Error),

    /// A cryptographic primitive rejected its inputs.
    #[error("cipher initialization failed")]
    Cipher,

    /// DEFLATE pre-compression failed.
    #[error("compression error: {0}")]
    Compression(String),

    /// A declared length field does not match the bytes actually written.
    #[error("{field} length mismatch: declared {declared}, wrote {actual}")]
    LengthMismatch {
        field: &'static str,
        declared: u64,
        actual: u64,
    },

    /// The archive exceeds what the fixed 22-byte trailer can describe.
    #[error("archive exceeds single-disk ZIP limits")]
    ArchiveTooLarge,
}

/// Result type for atepack operations.
pub type Result<T> = std::result::Result<T, Error>;
