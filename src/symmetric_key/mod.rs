/*!
 * GlobalPlatform symmetric keys
 *
 * This module implements the plaintext symmetric key value used throughout
 * GlobalPlatform key management: key material with key-set version, key id
 * and algorithm classification, plus the derivation rules that shape the
 * material for DES, triple-DES and AES ciphers.
 */

mod key;

pub use key::*;
