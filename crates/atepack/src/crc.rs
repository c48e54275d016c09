//! CRC32 checksum engine.
//!
//! ZIP records carry the IEEE 802.3 CRC32 (reflected polynomial 0xEDB88320)
//! of the *plaintext*, computed before any compression or encryption. The
//! lookup tables live inside `crc32fast` as immutable constants, so the
//! checksum is pure and freely shareable across concurrent builds.

/// Compute the CRC32 of a byte slice.
#[inline]
pub fn checksum(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Streaming CRC32 over multiple chunks.
///
/// Equivalent to [`checksum`] over the concatenation of all fed chunks.
#[derive(Debug, Clone, Default)]
pub struct Checksum {
    inner: crc32fast::Hasher,
}

impl Checksum {
    /// Create a new streaming checksum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finish and return the checksum value.
    #[inline]
    pub fn finalize(self) -> u32 {
        self.inner.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(checksum(&[]), 0);
    }

    #[test]
    fn test_known_vectors() {
        // Standard CRC32/IEEE check value.
        assert_eq!(checksum(b"123456789"), 0xCBF4_3926);
        assert_eq!(checksum(b"hello"), 0x3610_A686);
    }

    #[test]
    fn test_deterministic() {
        let data = b"print('a')";
        assert_eq!(checksum(data), checksum(data));
    }

    #[test]
    fn test_streaming_matches_oneshot() {
        let mut streaming = Checksum::new();
        streaming.update(b"print(");
        streaming.update(b"'a')");
        assert_eq!(streaming.finalize(), checksum(b"print('a')"));
    }
}
