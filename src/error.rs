/*!
 * Error Handling for GlobalPlatform Key Operations
 *
 * Provides error types with numeric error codes for every failure mode of
 * key construction, classification and derivation.
 */

use thiserror::Error;

use crate::symmetric_key::KeyType;

/// Error type for all key handling operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid key material: {length} bytes (a valid key must be 16/24/32 bytes long)")]
    InvalidKeyMaterial { length: usize },

    #[error("unsupported GlobalPlatform key type code: 0x{code:02X} (only 3DES and AES are supported)")]
    UnsupportedKeyType { code: u8 },

    #[error("illegal key type transition {from} -> {to}: only RAW keys can become a concrete type")]
    IllegalTypeTransition { from: KeyType, to: KeyType },

    #[error("unsupported cipher kind: cannot derive a {requested} cipher key")]
    UnsupportedCipherKind { requested: KeyType },

    #[error("missing key material: {operation} requires a key with actual key bytes")]
    MissingKeyMaterial { operation: &'static str },

    #[error("key check value computation failed: {cause}")]
    CheckValueFailed { cause: String },
}

/// Error code constants for different error categories
pub mod error_codes {
    // Construction errors: 1000-1999
    pub const INVALID_KEY_MATERIAL: u32 = 1001;
    pub const UNSUPPORTED_KEY_TYPE: u32 = 1002;

    // Classification errors: 2000-2999
    pub const ILLEGAL_TYPE_TRANSITION: u32 = 2001;

    // Derivation errors: 3000-3999
    pub const UNSUPPORTED_CIPHER_KIND: u32 = 3001;
    pub const MISSING_KEY_MATERIAL: u32 = 3002;

    // Delegated computation errors: 4000-4999
    pub const CHECK_VALUE_FAILED: u32 = 4001;
}

impl KeyError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            KeyError::InvalidKeyMaterial { .. } => error_codes::INVALID_KEY_MATERIAL,
            KeyError::UnsupportedKeyType { .. } => error_codes::UNSUPPORTED_KEY_TYPE,
            KeyError::IllegalTypeTransition { .. } => error_codes::ILLEGAL_TYPE_TRANSITION,
            KeyError::UnsupportedCipherKind { .. } => error_codes::UNSUPPORTED_CIPHER_KIND,
            KeyError::MissingKeyMaterial { .. } => error_codes::MISSING_KEY_MATERIAL,
            KeyError::CheckValueFailed { .. } => error_codes::CHECK_VALUE_FAILED,
        }
    }

    /// Get the error category as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            KeyError::InvalidKeyMaterial { .. } => "InvalidKeyMaterial",
            KeyError::UnsupportedKeyType { .. } => "UnsupportedKeyType",
            KeyError::IllegalTypeTransition { .. } => "IllegalTypeTransition",
            KeyError::UnsupportedCipherKind { .. } => "UnsupportedCipherKind",
            KeyError::MissingKeyMaterial { .. } => "MissingKeyMaterial",
            KeyError::CheckValueFailed { .. } => "CheckValueFailed",
        }
    }

    pub fn check_value_failed(cause: &str) -> Self {
        KeyError::CheckValueFailed {
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for key handling operations
pub type KeyResult<T> = Result<T, KeyError>;
