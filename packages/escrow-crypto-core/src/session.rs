//! # Encryption Session
//!
//! Holds the derived key pair between sign-in and sign-out.
//!
//! ## Lifecycle
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     ENCRYPTION SESSION LIFECYCLE                        │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  1. Sign in                                                            │
//! │     wallet signs challenge ──► sign_in(signature)                      │
//! │                                  ├─► derive KeyPair                    │
//! │                                  └─► PublishedKey { public_key }       │
//! │                                      (sent to the auth backend)        │
//! │            │                                                           │
//! │            ▼                                                           │
//! │  2. Active                                                             │
//! │     encrypt / decrypt / channel(counterparty_key)                      │
//! │            │                                                           │
//! │            ▼                                                           │
//! │  3. Sign out                                                           │
//! │     sign_out() ──► KeyPair dropped, secret bytes zeroized              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session is an ordinary value owned by the host. There is no global
//! instance: whoever needs to encrypt is handed the session (or a
//! [`SecureChannel`] built from it) explicitly.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::crypto::{
    derive_keypair_with, EncryptedEnvelope, KeyPair, PublicKey, SecretKey, SecureChannel,
    SeedMode,
};
use crate::error::{Error, Result};

/// Configuration for an encryption session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How the key seed is taken from the wallet signature
    pub seed_mode: SeedMode,
}

/// Public key payload sent to the auth backend at sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedKey {
    /// Base64 X25519 public key
    pub public_key: String,
}

/// Volatile holder of the session key pair
pub struct EncryptionSession {
    config: SessionConfig,
    keys: RwLock<Option<KeyPair>>,
}

impl EncryptionSession {
    /// Create a signed-out session
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            keys: RwLock::new(None),
        }
    }

    /// The session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Derive keys from the wallet signature and keep them for this session
    ///
    /// Returns the payload to publish. Signing in again replaces the held
    /// key pair; the previous one is zeroized.
    pub fn sign_in(&self, signature_hex: &str) -> Result<PublishedKey> {
        let keypair = derive_keypair_with(signature_hex, self.config.seed_mode)?;
        let published = PublishedKey {
            public_key: keypair.public_key().to_base64(),
        };

        *self.keys.write() = Some(keypair);

        tracing::info!("Encryption keys ready for session");
        Ok(published)
    }

    /// Drop the key pair
    pub fn sign_out(&self) {
        if self.keys.write().take().is_some() {
            tracing::info!("Encryption keys discarded");
        }
    }

    /// Whether a key pair is currently held
    pub fn has_keys(&self) -> bool {
        self.keys.read().is_some()
    }

    /// Our public key, if signed in
    pub fn public_key(&self) -> Option<PublicKey> {
        self.keys.read().as_ref().map(|kp| *kp.public_key())
    }

    /// Our public key as base64, if signed in
    pub fn public_key_base64(&self) -> Option<String> {
        self.public_key().map(|pk| pk.to_base64())
    }

    /// Encrypt for a counterparty identified by their published key
    pub fn encrypt(&self, plaintext: &str, recipient_public_b64: &str) -> Result<EncryptedEnvelope> {
        self.channel(recipient_public_b64)?.seal(plaintext)
    }

    /// Decrypt a payload from a counterparty identified by their published key
    pub fn decrypt(
        &self,
        ciphertext_b64: &str,
        nonce_b64: &str,
        sender_public_b64: &str,
    ) -> Result<String> {
        self.channel(sender_public_b64)?
            .open_parts(ciphertext_b64, nonce_b64)
    }

    /// Build a channel to a counterparty
    ///
    /// ## Errors
    ///
    /// - `NotAuthenticated` if no key pair is held
    /// - `InvalidKeyEncoding` if the counterparty key is malformed
    pub fn channel(&self, counterparty_public_b64: &str) -> Result<SecureChannel> {
        let secret = self.secret_key()?;
        let counterparty = PublicKey::from_base64(counterparty_public_b64)?;

        Ok(SecureChannel::new(&secret, &counterparty))
    }

    /// Clone the secret key out for one call frame
    fn secret_key(&self) -> Result<SecretKey> {
        self.keys
            .read()
            .as_ref()
            .map(|kp| kp.secret_key().clone())
            .ok_or(Error::NotAuthenticated)
    }
}

impl Default for EncryptionSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
