//! # Key Management
//!
//! Curve25519 key types used by the box construction.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          KEY TYPES                                      │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  KeyPair (X25519)                                               │   │
//! │  │  ────────────────                                                │   │
//! │  │                                                                  │   │
//! │  │  • SecretKey: 32 bytes, held in session memory only,            │   │
//! │  │    zeroized on drop, Debug output redacted                      │   │
//! │  │  • PublicKey: 32 bytes, published as base64 at sign-in          │   │
//! │  │                                                                  │   │
//! │  │  The secret key bytes are stored exactly as given (the seed),   │   │
//! │  │  clamping happens inside the scalar multiplication. This        │   │
//! │  │  matches NaCl's box.keyPair.fromSecretKey.                      │   │
//! │  │                                                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{PUBLIC_KEY_SIZE, SECRET_KEY_SIZE};
use crate::error::{Error, Result};

/// Box key pair derived for one authenticated session
///
/// ## Security
///
/// - The secret half is zeroized when the pair is dropped
/// - Only the public half ever leaves the client
#[derive(Clone, Debug)]
pub struct KeyPair {
    public: PublicKey,
    secret: SecretKey,
}

impl KeyPair {
    /// Generate a new random keypair
    ///
    /// Keys generated this way cannot be re-derived later. Session keys
    /// come from [`derive_keypair`](super::derive_keypair) instead.
    pub fn generate() -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        Self::from_secret_bytes(secret.to_bytes())
    }

    /// Build the pair whose secret key is exactly `bytes`
    ///
    /// Deterministic: the same bytes always produce the same public key.
    pub fn from_secret_bytes(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        Self::from_secret_key(SecretKey(bytes))
    }

    /// Build the pair for an existing secret key, taking ownership of it
    pub fn from_secret_key(secret: SecretKey) -> Self {
        let scalar = StaticSecret::from(secret.0);
        let public = X25519PublicKey::from(&scalar);

        Self {
            public: PublicKey(public.to_bytes()),
            secret,
        }
    }

    /// The shareable half
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// The secret half
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }
}

/// X25519 secret key (32 bytes)
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; SECRET_KEY_SIZE]);

impl SecretKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; SECRET_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly 32 bytes long. A key of the wrong
    /// length is a caller bug, not a recoverable condition.
    pub fn from_slice(bytes: &[u8]) -> Self {
        assert_eq!(
            bytes.len(),
            SECRET_KEY_SIZE,
            "secret key must be {} bytes",
            SECRET_KEY_SIZE
        );
        let mut key = [0u8; SECRET_KEY_SIZE];
        key.copy_from_slice(bytes);
        Self(key)
    }

    /// Get the secret key bytes
    ///
    /// ## Security Warning
    ///
    /// Only for handing the key to a storage layer the host controls.
    /// Never log or transmit these bytes.
    pub fn expose_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }

    /// Fill the key in place, so seed material is never held outside it
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; SECRET_KEY_SIZE] {
        &mut self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// X25519 public key (32 bytes)
///
/// Serializes as a standard base64 string, the form the auth and chat
/// backends store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(#[serde(with = "base64_key")] [u8; PUBLIC_KEY_SIZE]);

impl PublicKey {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Create from a slice
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is not exactly 32 bytes long. Untrusted input
    /// should go through [`PublicKey::from_base64`] instead.
    pub fn from_slice(bytes: &[u8]) -> Self {
        assert_eq!(
            bytes.len(),
            PUBLIC_KEY_SIZE,
            "public key must be {} bytes",
            PUBLIC_KEY_SIZE
        );
        let mut key = [0u8; PUBLIC_KEY_SIZE];
        key.copy_from_slice(bytes);
        Self(key)
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Encode as standard base64
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.0)
    }

    /// Decode from standard base64
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| Error::InvalidKeyEncoding(format!("invalid base64: {}", e)))?;

        let key: [u8; PUBLIC_KEY_SIZE] = bytes.as_slice().try_into().map_err(|_| {
            Error::InvalidKeyEncoding(format!(
                "expected {} bytes, got {}",
                PUBLIC_KEY_SIZE,
                bytes.len()
            ))
        })?;

        Ok(Self(key))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_base64())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

/// Encode a public key for transport
pub fn encode_public_key(public_key: &PublicKey) -> String {
    public_key.to_base64()
}

/// Decode a public key received from transport
///
/// Fails with `InvalidKeyEncoding` unless the input is base64 for exactly
/// 32 bytes.
pub fn decode_public_key(encoded: &str) -> Result<PublicKey> {
    PublicKey::from_base64(encoded)
}

/// Serde helper for serializing key bytes as base64
///
/// Decoding goes through [`PublicKey::from_base64`], so JSON and transport
/// strings accept the same input.
mod base64_key {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PublicKey;

    pub fn serialize<S>(bytes: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<[u8; 32], D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PublicKey::from_base64(&s)
            .map(|key| key.0)
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// TESTS
// ============================================================================
