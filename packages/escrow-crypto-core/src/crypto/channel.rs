//! # Secure Channel
//!
//! Authenticated public-key encryption between two parties, using the NaCl
//! box construction (X25519 + XSalsa20-Poly1305).
//!
//! ## Encryption Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      MESSAGE ENCRYPTION FLOW                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SENDER (Alice)                                                        │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  shared key = HSalsa20(X25519(alice_secret, bob_public))   │       │
//! │  │  nonce      = 24 random bytes (OsRng)                       │       │
//! │  │  sealed     = Poly1305 tag || XSalsa20(plaintext)           │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                          │                                              │
//! │                          ▼                                              │
//! │         { ciphertext: base64(sealed), nonce: base64(nonce) }           │
//! │                          │  (relay sees only this)                     │
//! │                          ▼                                              │
//! │  RECIPIENT (Bob)                                                       │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  shared key = HSalsa20(X25519(bob_secret, alice_public))   │       │
//! │  │  verify tag, then decrypt  →  UTF-8 plaintext              │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | Only the two key holders can read the payload |
//! | Integrity | Any modified bit fails the Poly1305 check |
//! | Uniform failure | Every open failure is `DecryptionFailed`, nothing else |
//! | Nonce freshness | A new random nonce per call, never derived from content |
//!
//! The DH step is symmetric, so a channel between Alice and Bob opens the
//! messages Alice sent as well as the ones she received.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use crypto_box::{
    aead::{generic_array::GenericArray, Aead, AeadCore},
    PublicKey as BoxPublicKey, SalsaBox, SecretKey as BoxSecretKey,
};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::{PublicKey, SecretKey, NONCE_SIZE};
use crate::error::{Error, Result};

/// Ciphertext and nonce, both base64, as stored and relayed by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedEnvelope {
    /// Sealed bytes (tag followed by ciphertext)
    pub ciphertext: String,
    /// The 24-byte nonce used for this envelope
    pub nonce: String,
}

/// A box bound to one local secret key and one remote public key
///
/// The X25519 exchange runs once in [`SecureChannel::new`]; every
/// [`seal`](SecureChannel::seal) and [`open`](SecureChannel::open) reuses
/// the precomputed shared key. Worth holding on to when decrypting a whole
/// page of chat history.
pub struct SecureChannel {
    cipher: SalsaBox,
    remote: PublicKey,
}

impl SecureChannel {
    /// Precompute the shared key for `local_secret` and `remote_public`
    pub fn new(local_secret: &SecretKey, remote_public: &PublicKey) -> Self {
        let secret = BoxSecretKey::from(*local_secret.expose_bytes());
        let public = BoxPublicKey::from(*remote_public.as_bytes());

        Self {
            cipher: SalsaBox::new(&public, &secret),
            remote: *remote_public,
        }
    }

    /// The counterparty this channel talks to
    pub fn remote_public_key(&self) -> &PublicKey {
        &self.remote
    }

    /// Encrypt `plaintext` under a fresh random nonce
    pub fn seal(&self, plaintext: &str) -> Result<EncryptedEnvelope> {
        let nonce = SalsaBox::generate_nonce(&mut OsRng);

        let sealed = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| Error::EncryptionFailed)?;

        Ok(EncryptedEnvelope {
            ciphertext: BASE64.encode(sealed),
            nonce: BASE64.encode(nonce),
        })
    }

    /// Decrypt an envelope produced by either side of this channel
    pub fn open(&self, envelope: &EncryptedEnvelope) -> Result<String> {
        self.open_parts(&envelope.ciphertext, &envelope.nonce)
    }

    /// Decrypt from the two base64 fields of a stored message
    ///
    /// ## Errors
    ///
    /// `DecryptionFailed` for malformed base64, a nonce that is not 24
    /// bytes, a wrong key, any tampering, or recovered bytes that are not
    /// UTF-8. No partial plaintext is ever returned.
    pub fn open_parts(&self, ciphertext_b64: &str, nonce_b64: &str) -> Result<String> {
        let ciphertext = BASE64
            .decode(ciphertext_b64)
            .map_err(|_| Error::DecryptionFailed)?;
        let nonce = BASE64
            .decode(nonce_b64)
            .map_err(|_| Error::DecryptionFailed)?;

        if nonce.len() != NONCE_SIZE {
            return Err(Error::DecryptionFailed);
        }

        let plaintext = self
            .cipher
            .decrypt(GenericArray::from_slice(&nonce), ciphertext.as_slice())
            .map_err(|_| Error::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|e| {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            Error::DecryptionFailed
        })
    }
}

/// Encrypt `plaintext` from the sender to the recipient
///
/// Never fails for well-formed input, including the empty string; two
/// calls with the same arguments return different ciphertexts.
pub fn encrypt(
    plaintext: &str,
    recipient_public: &PublicKey,
    sender_secret: &SecretKey,
) -> Result<EncryptedEnvelope> {
    SecureChannel::new(sender_secret, recipient_public).seal(plaintext)
}

/// Decrypt a payload the sender sealed for the recipient
pub fn decrypt(
    ciphertext_b64: &str,
    nonce_b64: &str,
    sender_public: &PublicKey,
    recipient_secret: &SecretKey,
) -> Result<String> {
    SecureChannel::new(recipient_secret, sender_public).open_parts(ciphertext_b64, nonce_b64)
}

// ============================================================================
// TESTS
// ============================================================================
