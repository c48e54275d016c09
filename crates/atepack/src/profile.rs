//! Encryption profiles and build options.

use crate::zip::{self, CompressionMethod};

/// AES key strength for the WinZip AES scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AesStrength {
    /// AES-128.
    Aes128,
    /// AES-192.
    Aes192,
    /// AES-256 (the strength the `.ate` runtime uses).
    Aes256,
}

impl AesStrength {
    /// Encryption key length in bytes.
    #[inline]
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }

    /// Per-entry salt length in bytes (half the key length, per WinZip AES).
    #[inline]
    pub fn salt_len(self) -> usize {
        self.key_len() / 2
    }

    /// Strength code stored in the AES extra field.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Self::Aes128 => 1,
            Self::Aes192 => 2,
            Self::Aes256 => 3,
        }
    }
}

/// How entry payloads are protected.
///
/// The original service grew three divergent encoder variants (plain,
/// AES, and "exact"); this single profile parameterizes them all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncryptionProfile {
    /// Plain ZIP entries, no encryption.
    None,
    /// WinZip AES entries at the given strength.
    Aes(AesStrength),
}

impl EncryptionProfile {
    /// Whether entries are encrypted under this profile.
    #[inline]
    pub fn is_encrypted(self) -> bool {
        matches!(self, Self::Aes(_))
    }
}

/// Options controlling an archive build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Payload protection. Defaults to AES-256, the `.ate` profile.
    pub encryption: EncryptionProfile,
    /// Archive password. Empty is valid: passwordless mode still derives
    /// a usable key from the per-entry salt.
    pub password: String,
    /// Pre-encryption transform, reflected in the extra field's
    /// "real method" value.
    pub compression: CompressionMethod,
    /// DOS date/time stamped on every record (date in the high 16 bits).
    /// The consumer does not check it; a fixed default keeps builds
    /// structurally deterministic.
    pub dos_datetime: u32,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            encryption: EncryptionProfile::Aes(AesStrength::Aes256),
            password: String::new(),
            compression: CompressionMethod::Store,
            dos_datetime: zip::DOS_EPOCH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strength_parameters() {
        assert_eq!(AesStrength::Aes128.key_len(), 16);
        assert_eq!(AesStrength::Aes192.key_len(), 24);
        assert_eq!(AesStrength::Aes256.key_len(), 32);
        assert_eq!(AesStrength::Aes256.salt_len(), 16);
        assert_eq!(AesStrength::Aes256.code(), 3);
    }

    #[test]
    fn test_default_options() {
        let options = BuildOptions::default();
        assert_eq!(
            options.encryption,
            EncryptionProfile::Aes(AesStrength::Aes256)
        );
        assert!(options.password.is_empty());
        assert_eq!(options.compression, CompressionMethod::Store);
    }
}
