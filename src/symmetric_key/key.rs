use subtle::ConstantTimeEq;

use crate::error::{KeyError, KeyResult};
use crate::provider::{CipherKeyFactory, CipherKeyMaterial, CipherKind, KeyCheckValueService};
use crate::secure_memory::SecretBytes;

/// GlobalPlatform key-info type code for a triple-DES key
pub const GP_KEY_TYPE_3DES: u8 = 0x80;
/// Alternate 3DES type code seen on fielded cards (reserved by GlobalPlatform)
pub const GP_KEY_TYPE_3DES_RESERVED: u8 = 0x81;
/// GlobalPlatform key-info type code for an AES key
pub const GP_KEY_TYPE_AES: u8 = 0x88;

/// Declared length value for a key whose length is not known
pub const LENGTH_UNKNOWN: i32 = -1;

/// Algorithm classification of a symmetric key.
///
/// `Raw` means the bytes are known but their algorithmic interpretation has
/// not been decided yet. A `Raw` key can be committed to a concrete type
/// exactly once with [`SymmetricKey::commit_type`]; concrete types are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Raw,
    Des,
    Des3,
    Aes,
}

impl std::fmt::Display for KeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyType::Raw => write!(f, "RAW"),
            KeyType::Des => write!(f, "DES"),
            KeyType::Des3 => write!(f, "DES3"),
            KeyType::Aes => write!(f, "AES"),
        }
    }
}

/// A plaintext symmetric key used with GlobalPlatform.
///
/// Carries key material together with the metadata GlobalPlatform attaches
/// to a key slot: key-set version, key id and declared length. An instance
/// either owns actual key bytes (held in zero-on-drop memory) or is a
/// metadata-only record parsed from a card's key-info template.
///
/// Apart from the single one-shot type commitment of a `Raw` key, instances
/// are immutable after construction. All read paths are side-effect-free, so
/// a classified key can be shared freely across threads.
///
/// # Examples
///
/// ```
/// use gpkey::{KeyType, SymmetricKey};
///
/// let key = SymmetricKey::from_bytes(&[0x40; 16], KeyType::Aes).unwrap();
/// assert_eq!(key.key_type(), KeyType::Aes);
/// assert_eq!(key.declared_length(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct SymmetricKey {
    key_type: KeyType,
    version: u32,
    id: u32,
    declared_length: i32,
    material: Option<SecretBytes>,
}

impl SymmetricKey {
    /// Create a key of the given type from raw bytes.
    ///
    /// The bytes are defensively copied into zero-on-drop memory; the
    /// caller's buffer is never aliased. Version and id start at 0 and the
    /// declared length is the actual byte length.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyMaterial`] unless the material is
    /// exactly 16, 24 or 32 bytes long.
    pub fn from_bytes(bytes: &[u8], key_type: KeyType) -> KeyResult<Self> {
        if bytes.len() != 16 && bytes.len() != 24 && bytes.len() != 32 {
            return Err(KeyError::InvalidKeyMaterial {
                length: bytes.len(),
            });
        }
        Ok(Self {
            key_type,
            version: 0,
            id: 0,
            declared_length: bytes.len() as i32,
            material: Some(SecretBytes::new(bytes)),
        })
    }

    /// Create a raw key that can later be committed to any concrete type.
    ///
    /// Equivalent to [`SymmetricKey::from_bytes`] with [`KeyType::Raw`].
    pub fn from_raw_bytes(bytes: &[u8]) -> KeyResult<Self> {
        Self::from_bytes(bytes, KeyType::Raw)
    }

    /// Create a new key with a new version and id, based on the type and
    /// bytes of an existing key.
    ///
    /// The new instance owns an independent copy of the source's material;
    /// the two keys never share a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::MissingKeyMaterial`] when `source` is a
    /// metadata-only key: re-versioning a key that carries no bytes would
    /// silently manufacture a keyless "keyed" instance.
    pub fn rekeyed(version: u32, id: u32, source: &SymmetricKey) -> KeyResult<Self> {
        let material = source
            .material
            .as_ref()
            .ok_or(KeyError::MissingKeyMaterial {
                operation: "rekeyed",
            })?;
        Ok(Self {
            key_type: source.key_type,
            version,
            id,
            declared_length: material.len() as i32,
            material: Some(material.clone()),
        })
    }

    /// Create a metadata-only key from the fields of a GlobalPlatform
    /// key-info template, with no key bytes present.
    ///
    /// The GlobalPlatform type code is mapped to a concrete key type:
    /// 0x80 and 0x81 to triple-DES, 0x88 to AES. The declared length is
    /// whatever the card reported.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedKeyType`] for any other type code.
    pub fn from_key_info(
        version: u32,
        id: u32,
        declared_length: i32,
        gp_type_code: u8,
    ) -> KeyResult<Self> {
        let key_type = match gp_type_code {
            GP_KEY_TYPE_3DES | GP_KEY_TYPE_3DES_RESERVED => KeyType::Des3,
            GP_KEY_TYPE_AES => KeyType::Aes,
            code => return Err(KeyError::UnsupportedKeyType { code }),
        };
        log::trace!(
            "key-info template: version={} id={} len={} code=0x{:02X} -> {}",
            version,
            id,
            declared_length,
            gp_type_code,
            key_type
        );
        Ok(Self {
            key_type,
            version,
            id,
            declared_length,
            material: None,
        })
    }

    /// The key-set version this key belongs to (0 when unset)
    pub fn version(&self) -> u32 {
        self.version
    }

    /// The key id within the key-set version (0 when unset)
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The algorithm classification of this key
    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// The declared byte length: the actual material length when bytes are
    /// present, otherwise the length reported by the card
    pub fn declared_length(&self) -> i32 {
        self.declared_length
    }

    /// A read-only view of the key bytes, or `None` for a metadata-only key
    pub fn key_bytes(&self) -> Option<&[u8]> {
        self.material.as_ref().map(|m| m.as_bytes())
    }

    /// Whether this key carries actual key bytes
    pub fn has_material(&self) -> bool {
        self.material.is_some()
    }

    /// Derive an algorithm-ready representation of this key for the given
    /// target cipher.
    ///
    /// The only trick here is the size fiddling for DES:
    ///
    /// * [`KeyType::Des`] takes the first 8 bytes of the stored material.
    /// * [`KeyType::Des3`] takes the first 24 bytes when at least 24 are
    ///   stored; a 16-byte key is expanded to the 2-key EDE form, with the
    ///   first 8 bytes repeated as the third DES key segment.
    /// * [`KeyType::Aes`] uses the stored bytes verbatim.
    ///
    /// The classification of this key is never changed by derivation; the
    /// result is a transient value for handing to a cipher backend.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::UnsupportedCipherKind`] when the target is not a
    /// cipher algorithm, and [`KeyError::MissingKeyMaterial`] on a
    /// metadata-only key.
    pub fn derive_cipher_key(&self, target: KeyType) -> KeyResult<CipherKeyMaterial> {
        let kind = match target {
            KeyType::Des => CipherKind::Des,
            KeyType::Des3 => CipherKind::Des3,
            KeyType::Aes => CipherKind::Aes,
            KeyType::Raw => {
                return Err(KeyError::UnsupportedCipherKind { requested: target });
            }
        };
        let bytes = self
            .material
            .as_ref()
            .ok_or(KeyError::MissingKeyMaterial {
                operation: "derive_cipher_key",
            })?
            .as_bytes();
        let shaped = match kind {
            CipherKind::Des => bytes[..8].to_vec(),
            CipherKind::Des3 => resize_des(bytes),
            CipherKind::Aes => bytes.to_vec(),
        };
        Ok(CipherKeyMaterial::new(kind, shaped))
    }

    /// Derive a cipher key for the given target and hand it to a backend
    /// factory in one step.
    pub fn cipher_key<F: CipherKeyFactory>(
        &self,
        target: KeyType,
        factory: &F,
    ) -> KeyResult<F::CipherKey> {
        let material = self.derive_cipher_key(target)?;
        factory.make_key(&material)
    }

    /// Compute this key's check value through the given service.
    ///
    /// The KCV algorithm follows the key's classification: the triple-DES
    /// KCV for a 3DES key (computed over its 24-byte EDE form) and the
    /// SCP03 KCV for an AES key. For a `Raw` or DES key the check value is
    /// undefined and an empty vector is returned, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::MissingKeyMaterial`] when a 3DES or AES typed
    /// key carries no bytes, and propagates any failure from the service.
    pub fn key_check_value(&self, service: &dyn KeyCheckValueService) -> KeyResult<Vec<u8>> {
        match self.key_type {
            KeyType::Des3 => {
                let ede = self.derive_cipher_key(KeyType::Des3)?;
                service.kcv_3des(ede.as_bytes())
            }
            KeyType::Aes => {
                let key = self.derive_cipher_key(KeyType::Aes)?;
                service.scp03_kcv(key.as_bytes())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Check this key against a card-reported check value.
    ///
    /// The comparison is constant-time. A key whose check value is
    /// undefined (empty) never matches, nor does an empty expected value.
    pub fn matches_check_value(
        &self,
        service: &dyn KeyCheckValueService,
        expected: &[u8],
    ) -> KeyResult<bool> {
        let kcv = self.key_check_value(service)?;
        if kcv.is_empty() || kcv.len() != expected.len() {
            return Ok(false);
        }
        Ok(bool::from(kcv.ct_eq(expected)))
    }

    /// Commit a `Raw` key to a concrete type.
    ///
    /// This is the single allowed mutation of a key: a `Raw` key becomes
    /// DES, 3DES or AES exactly once, and stays that type for the rest of
    /// its lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::IllegalTypeTransition`] when the key is already
    /// concrete, or when the requested type is `Raw` itself; the key is
    /// left unchanged in both cases.
    pub fn commit_type(&mut self, new_type: KeyType) -> KeyResult<()> {
        if self.key_type != KeyType::Raw || new_type == KeyType::Raw {
            return Err(KeyError::IllegalTypeTransition {
                from: self.key_type,
                to: new_type,
            });
        }
        log::debug!(
            "key version={} id={} classified as {}",
            self.version,
            self.id,
            new_type
        );
        self.key_type = new_type;
        Ok(())
    }

    /// Render a human-readable summary of this key: version, id, type, the
    /// hex-encoded bytes (or the declared length for a metadata-only key)
    /// and the check value when one is defined.
    ///
    /// This is an observability aid; note that it does print key material.
    pub fn describe(&self, service: &dyn KeyCheckValueService) -> String {
        let mut s = format!(
            "version={} id={} type={}",
            self.version, self.id, self.key_type
        );
        match self.key_bytes() {
            Some(bytes) => s.push_str(&format!(" bytes={}", hex::encode_upper(bytes))),
            None => s.push_str(&format!(" len={}", self.declared_length)),
        }
        let kcv = self.key_check_value(service).unwrap_or_default();
        if !kcv.is_empty() {
            s.push_str(&format!(" kcv={}", hex::encode_upper(kcv)));
        }
        s
    }
}

// 2-key EDE expansion: a 16-byte key repeats its first 8 bytes as the third
// DES key segment; anything longer already carries all three segments.
fn resize_des(bytes: &[u8]) -> Vec<u8> {
    if bytes.len() >= 24 {
        bytes[..24].to_vec()
    } else {
        let mut key24 = Vec::with_capacity(24);
        key24.extend_from_slice(&bytes[..16]);
        key24.extend_from_slice(&bytes[..8]);
        key24
    }
}
