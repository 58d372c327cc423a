//! Secure Memory Handling for Key Material
//!
//! Key bytes live in an owned container that is securely zeroed when it is
//! dropped, minimizing the exposure of plaintext key material in memory.
//! Callers only ever see a read-only view of the contents; every construction
//! takes a defensive copy so no external buffer is aliased.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// An owned byte buffer for secret key material.
///
/// The contents are automatically zeroed when the buffer is dropped. Cloning
/// produces an independent copy that zeroes itself separately.
///
/// # Example
///
/// ```
/// use gpkey::secure_memory::SecretBytes;
///
/// let key = SecretBytes::new(&[0x47; 16]);
/// assert_eq!(key.len(), 16);
/// // When 'key' goes out of scope, its memory is zeroed
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
    bytes: Vec<u8>,
}

impl SecretBytes {
    /// Create a new buffer holding a copy of the given data
    pub fn new(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
        }
    }

    /// Get a read-only view of the underlying bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Get the length of the buffer in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

// Never print key material, even in debug output
impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretBytes")
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
