//! # Escrow Crypto Core
//!
//! End-to-end encryption for the escrow marketplace client. Keys come from
//! a wallet signature, so nothing secret is ever held by the backend; chat
//! messages and product-delivery secrets cross the backend as box
//! ciphertext only.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ESCROW CRYPTO CORE MODULES                         │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌──────────────────────┐        ┌──────────────────────────────────┐  │
//! │  │   Session            │        │   Messaging                      │  │
//! │  │                      │        │                                  │  │
//! │  │ - sign_in / sign_out │───────►│ - Conversation (seal / open)     │  │
//! │  │ - PublishedKey       │        │ - History pages, push events     │  │
//! │  │ - SessionConfig      │        │ - Product-delivery keys          │  │
//! │  └──────────┬───────────┘        └────────────────┬─────────────────┘  │
//! │             │                                     │                    │
//! │             └──────────────────┬──────────────────┘                    │
//! │                                ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │   Crypto                                                         │  │
//! │  │                                                                  │  │
//! │  │ - derivation: wallet signature → X25519 KeyPair                  │  │
//! │  │ - channel:    XSalsa20-Poly1305 box, EncryptedEnvelope           │  │
//! │  │ - keys:       PublicKey / SecretKey, base64 codec                │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error types for the entire library
//! - [`crypto`] - Key derivation, box encryption, key encoding
//! - [`session`] - Key pair held between sign-in and sign-out
//! - [`messaging`] - Order chat and product-delivery payloads
//!
//! ## Example
//!
//! ```
//! use escrow_crypto_core::EncryptionSession;
//!
//! let alice = EncryptionSession::default();
//! let bob = EncryptionSession::default();
//!
//! let alice_key = alice.sign_in(&"aa".repeat(65)).unwrap().public_key;
//! let bob_key = bob.sign_in(&"bb".repeat(65)).unwrap().public_key;
//!
//! let envelope = alice.encrypt("Hello, Bob!", &bob_key).unwrap();
//! let text = bob
//!     .decrypt(&envelope.ciphertext, &envelope.nonce, &alice_key)
//!     .unwrap();
//! assert_eq!(text, "Hello, Bob!");
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod crypto;
pub mod error;
pub mod messaging;
pub mod session;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use crypto::{
    decode_public_key, decrypt, derive_keypair, encode_public_key, encrypt, EncryptedEnvelope,
    KeyPair, PublicKey, SecretKey, SecureChannel,
};
pub use error::{Error, Result};
pub use session::{EncryptionSession, PublishedKey, SessionConfig};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of the crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_types_are_send_sync() {
        assert_send_sync::<KeyPair>();
        assert_send_sync::<SecureChannel>();
        assert_send_sync::<EncryptionSession>();
        assert_send_sync::<messaging::Conversation>();
    }
}
