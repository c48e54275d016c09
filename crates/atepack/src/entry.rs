//! Archive input entries.

/// A single file to be placed in an `.ate` archive.
///
/// Entries are immutable once constructed. The caller is expected to have
/// resolved any template tokens before handoff; this crate treats content
/// as opaque bytes.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Archive-relative path, forward-slash separated.
    name: String,
    /// Plaintext content.
    content: Vec<u8>,
    /// Encoding hint: the content is UTF-8 text. No structural effect
    /// on the archive.
    is_text: bool,
}

impl FileEntry {
    /// Create an entry from UTF-8 text content.
    pub fn text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into().into_bytes(),
            is_text: true,
        }
    }

    /// Create an entry from raw bytes.
    pub fn binary(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            is_text: false,
        }
    }

    /// Get the archive-relative name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the plaintext content.
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Whether the content was supplied as text.
    #[inline]
    pub fn is_text(&self) -> bool {
        self.is_text
    }
}
