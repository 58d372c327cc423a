use zeroize::Zeroizing;

use crate::error::KeyResult;

/// The cipher algorithm a derived key is shaped for.
///
/// This is the tag handed to a cipher backend together with the key bytes,
/// equivalent to the algorithm name of a JCA `SecretKeySpec` or a PKCS#11
/// key type attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    /// Single DES, 8-byte key
    Des,
    /// Triple DES (EDE), 24-byte key
    Des3,
    /// AES, 16/24/32-byte key
    Aes,
}

impl std::fmt::Display for CipherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherKind::Des => write!(f, "DES"),
            CipherKind::Des3 => write!(f, "3DES"),
            CipherKind::Aes => write!(f, "AES"),
        }
    }
}

/// Algorithm-ready key material, produced by key derivation and consumed by
/// a [`CipherKeyFactory`].
///
/// This is a transient representation: the bytes are already shaped for the
/// target cipher (truncated or expanded as the algorithm requires) and are
/// zeroed when the value is dropped.
pub struct CipherKeyMaterial {
    kind: CipherKind,
    bytes: Zeroizing<Vec<u8>>,
}

impl CipherKeyMaterial {
    pub(crate) fn new(kind: CipherKind, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            bytes: Zeroizing::new(bytes),
        }
    }

    /// The cipher algorithm these bytes are shaped for
    pub fn kind(&self) -> CipherKind {
        self.kind
    }

    /// The algorithm-ready key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The length of the key material in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for CipherKeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherKeyMaterial")
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Capability for turning algorithm-ready key material into a usable cipher
/// key handle.
///
/// Implemented by whatever cryptographic backend the application uses; the
/// associated type is the backend's own key representation.
pub trait CipherKeyFactory {
    type CipherKey;

    fn make_key(&self, material: &CipherKeyMaterial) -> KeyResult<Self::CipherKey>;
}

/// Capability for computing GlobalPlatform key check values.
///
/// A key check value (KCV) is a short checksum proving knowledge of a key
/// without revealing it, computed by encrypting a fixed plaintext under the
/// key. The two algorithms GlobalPlatform uses differ by key family: a
/// triple-DES KCV for 3DES keys and the SCP03-defined KCV for AES keys.
pub trait KeyCheckValueService {
    /// Compute the triple-DES KCV over the given 3DES key bytes
    fn kcv_3des(&self, key: &[u8]) -> KeyResult<Vec<u8>>;

    /// Compute the SCP03 KCV over the given AES key bytes
    fn scp03_kcv(&self, key: &[u8]) -> KeyResult<Vec<u8>>;
}
