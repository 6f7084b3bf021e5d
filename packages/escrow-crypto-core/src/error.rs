//! # Error Handling
//!
//! Error types for the encryption core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Crypto Errors                                                     │
//! │  │   ├── InvalidSignatureFormat - Signature not hex / too short        │
//! │  │   ├── InvalidKeyEncoding     - Counterparty key malformed           │
//! │  │   ├── DecryptionFailed       - Box open failed (uniform)            │
//! │  │   └── EncryptionFailed       - AEAD rejected the buffer             │
//! │  │                                                                      │
//! │  ├── Session Errors                                                    │
//! │  │   └── NotAuthenticated       - No key pair held                     │
//! │  │                                                                      │
//! │  └── Internal Errors                                                   │
//! │      └── Serialization          - Wire payload (de)serialization       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Disclosure Rules
//!
//! Error messages never carry plaintext, secret key bytes, or signature
//! bytes. `DecryptionFailed` carries nothing at all: a wrong key, a flipped
//! ciphertext bit, a truncated nonce and malformed base64 all look the same
//! to the caller.

use thiserror::Error;

/// Result type alias for encryption core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the encryption core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ========================================================================
    // Crypto Errors (100-199)
    // ========================================================================
    /// The wallet signature is not valid hex or is shorter than a seed
    #[error("Invalid signature format: {0}")]
    InvalidSignatureFormat(String),

    /// A public key received from transport is not 32 bytes of base64
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Authentication or integrity check failed
    #[error("Decryption failed")]
    DecryptionFailed,

    /// The AEAD layer refused to seal the buffer
    #[error("Encryption failed")]
    EncryptionFailed,

    // ========================================================================
    // Session Errors (200-299)
    // ========================================================================
    /// No key pair has been derived for this session
    #[error("Not authenticated. Sign in to derive encryption keys first.")]
    NotAuthenticated,

    // ========================================================================
    // Internal Errors (900-999)
    // ========================================================================
    /// Wire payload could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Numeric error code for hosts that marshal errors across a boundary
    ///
    /// - 100-199: Crypto
    /// - 200-299: Session
    /// - 900-999: Internal
    pub fn code(&self) -> i32 {
        match self {
            Error::InvalidSignatureFormat(_) => 100,
            Error::InvalidKeyEncoding(_) => 101,
            Error::DecryptionFailed => 102,
            Error::EncryptionFailed => 103,

            Error::NotAuthenticated => 200,

            Error::Serialization(_) => 900,
        }
    }

    /// Check if this error is recoverable without new input from the wallet
    ///
    /// A bad signature cannot be fixed by retrying with the same signature,
    /// so it is the only variant that needs the user to sign again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::InvalidSignatureFormat(_))
    }
}

// ============================================================================
// ERROR CONVERSIONS
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::InvalidSignatureFormat("x".into()).code(), 100);
        assert_eq!(Error::InvalidKeyEncoding("x".into()).code(), 101);
        assert_eq!(Error::DecryptionFailed.code(), 102);
        assert_eq!(Error::EncryptionFailed.code(), 103);
        assert_eq!(Error::NotAuthenticated.code(), 200);
        assert_eq!(Error::Serialization("x".into()).code(), 900);
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(Error::DecryptionFailed.is_recoverable());
        assert!(Error::InvalidKeyEncoding("bad".into()).is_recoverable());
        assert!(Error::NotAuthenticated.is_recoverable());
        assert!(!Error::InvalidSignatureFormat("bad".into()).is_recoverable());
    }

    #[test]
    fn test_decryption_failed_has_no_detail() {
        assert_eq!(Error::DecryptionFailed.to_string(), "Decryption failed");
    }

    #[test]
    fn test_from_serde_json() {
        let err: Error = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert_eq!(err.code(), 900);
    }
}
