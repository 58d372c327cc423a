/*!
 * GlobalPlatform Symmetric Key Handling
 *
 * This crate models the plaintext symmetric keys used by GlobalPlatform
 * secure-channel key management: key material with key-set version, key id
 * and declared length, algorithm classification (RAW / DES / 3DES / AES),
 * and the derivation rules that shape a key for a specific block cipher.
 *
 * The crate deliberately implements no cryptography of its own. Cipher keys
 * and key check values (KCVs) are produced through two injected
 * capabilities:
 *
 * - [`CipherKeyFactory`] turns algorithm-ready key material into a backend
 *   cipher key handle
 * - [`KeyCheckValueService`] computes the triple-DES and SCP03 key check
 *   values
 *
 * Key bytes are held in zero-on-drop memory and are never aliased with
 * caller buffers.
 */

/// GlobalPlatform symmetric key values and derivation rules
pub mod symmetric_key;

/// Capability traits for cipher backends and KCV computation
pub mod provider;

/// Common error types for key handling
pub mod error;

/// Secure memory handling for key material
pub mod secure_memory;

// Re-export main types for convenience
pub use error::{KeyError, KeyResult};
pub use provider::{CipherKeyFactory, CipherKeyMaterial, CipherKind, KeyCheckValueService};
pub use symmetric_key::{KeyType, SymmetricKey};

/// The most commonly used types, importable in one line.
pub mod prelude {
    pub use crate::error::{KeyError, KeyResult};
    pub use crate::provider::CipherKeyFactory;
    pub use crate::provider::CipherKeyMaterial;
    pub use crate::provider::CipherKind;
    pub use crate::provider::KeyCheckValueService;
    pub use crate::secure_memory::SecretBytes;
    pub use crate::symmetric_key::KeyType;
    pub use crate::symmetric_key::SymmetricKey;
    pub use crate::symmetric_key::GP_KEY_TYPE_3DES;
    pub use crate::symmetric_key::GP_KEY_TYPE_3DES_RESERVED;
    pub use crate::symmetric_key::GP_KEY_TYPE_AES;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_covers_key_lifecycle() {
        let mut key = SymmetricKey::from_raw_bytes(&[0x01; 16]).unwrap();
        key.commit_type(KeyType::Aes).unwrap();
        let material = key.derive_cipher_key(KeyType::Aes).unwrap();
        assert_eq!(material.kind(), CipherKind::Aes);
    }
}
