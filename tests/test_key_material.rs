//! End-to-end tests for GlobalPlatform key handling, driven through fake
//! cipher backend capabilities.

use proptest::prelude::*;

use gpkey::prelude::*;

/// KCV service fake that encodes which algorithm path was taken.
struct TaggingKcvService;

impl KeyCheckValueService for TaggingKcvService {
    fn kcv_3des(&self, key: &[u8]) -> KeyResult<Vec<u8>> {
        assert_eq!(key.len(), 24, "3DES KCV must see the EDE form");
        Ok(vec![0x3D, key[0], key[1]])
    }

    fn scp03_kcv(&self, key: &[u8]) -> KeyResult<Vec<u8>> {
        Ok(vec![0x03, key[0], key[1]])
    }
}

/// Factory fake standing in for a real cipher backend.
struct VecFactory;

impl CipherKeyFactory for VecFactory {
    type CipherKey = (CipherKind, Vec<u8>);

    fn make_key(&self, material: &CipherKeyMaterial) -> KeyResult<Self::CipherKey> {
        Ok((material.kind(), material.as_bytes().to_vec()))
    }
}

#[test]
fn test_scp02_style_provisioning_flow() {
    // A raw master key arrives, gets classified, then shaped for 3DES use
    let master = b"@ABCDEFGHIJKLMNO"; // 16 bytes
    let mut key = SymmetricKey::from_raw_bytes(master).unwrap();
    assert_eq!(key.key_type(), KeyType::Raw);
    assert!(key
        .key_check_value(&TaggingKcvService)
        .unwrap()
        .is_empty());

    key.commit_type(KeyType::Des3).unwrap();

    let (kind, bytes) = key.cipher_key(KeyType::Des3, &VecFactory).unwrap();
    assert_eq!(kind, CipherKind::Des3);
    assert_eq!(bytes.len(), 24);
    assert_eq!(&bytes[..16], &master[..]);
    assert_eq!(&bytes[16..], &master[..8]);

    let kcv = key.key_check_value(&TaggingKcvService).unwrap();
    assert_eq!(kcv, vec![0x3D, b'@', b'A']);
    assert!(key.matches_check_value(&TaggingKcvService, &kcv).unwrap());
}

#[test]
fn test_scp03_style_provisioning_flow() {
    let key = SymmetricKey::from_bytes(&[0x00; 16], KeyType::Aes).unwrap();

    let (kind, bytes) = key.cipher_key(KeyType::Aes, &VecFactory).unwrap();
    assert_eq!(kind, CipherKind::Aes);
    assert_eq!(bytes, vec![0x00; 16]);

    // AES keys take the SCP03 KCV path
    let kcv = key.key_check_value(&TaggingKcvService).unwrap();
    assert_eq!(kcv[0], 0x03);
}

#[test]
fn test_key_set_rollover() {
    // Populating key ids 1..=3 of a new key-set version from one master key
    let master = SymmetricKey::from_bytes(&[0x4F; 16], KeyType::Des3).unwrap();
    for id in 1..=3u32 {
        let key = SymmetricKey::rekeyed(2, id, &master).unwrap();
        assert_eq!(key.version(), 2);
        assert_eq!(key.id(), id);
        assert_eq!(key.key_type(), KeyType::Des3);
        assert_eq!(key.key_bytes(), master.key_bytes());
    }
}

#[test]
fn test_card_reported_key_info() {
    // A card listing its key slots yields metadata-only keys
    let slot = SymmetricKey::from_key_info(1, 1, 16, GP_KEY_TYPE_AES).unwrap();
    assert!(!slot.has_material());

    // Metadata-only keys cannot be re-versioned or shaped for a cipher
    assert!(SymmetricKey::rekeyed(2, 1, &slot).is_err());
    assert!(slot.cipher_key(KeyType::Aes, &VecFactory).is_err());
    assert_eq!(
        slot.describe(&TaggingKcvService),
        "version=1 id=1 type=AES len=16"
    );
}

#[test]
fn test_unknown_key_info_code_is_rejected() {
    let err = SymmetricKey::from_key_info(1, 1, 16, 0xA1).unwrap_err();
    assert_eq!(err, KeyError::UnsupportedKeyType { code: 0xA1 });
}

proptest! {
    #[test]
    fn prop_construction_validates_length(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let result = SymmetricKey::from_raw_bytes(&bytes);
        match bytes.len() {
            16 | 24 | 32 => {
                let key = result.unwrap();
                prop_assert_eq!(key.declared_length() as usize, bytes.len());
                prop_assert_eq!(key.key_bytes().unwrap(), &bytes[..]);
            }
            length => {
                prop_assert_eq!(result.unwrap_err(), KeyError::InvalidKeyMaterial { length });
            }
        }
    }

    #[test]
    fn prop_des_derivation_truncates(bytes in proptest::collection::vec(any::<u8>(), 16..=16)) {
        let key = SymmetricKey::from_raw_bytes(&bytes).unwrap();
        let des = key.derive_cipher_key(KeyType::Des).unwrap();
        prop_assert_eq!(des.as_bytes(), &bytes[..8]);

        let des3 = key.derive_cipher_key(KeyType::Des3).unwrap();
        prop_assert_eq!(&des3.as_bytes()[..16], &bytes[..]);
        prop_assert_eq!(&des3.as_bytes()[16..24], &bytes[..8]);
    }
}
