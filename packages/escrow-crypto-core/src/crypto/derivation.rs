//! # Key Derivation
//!
//! Turns a wallet signature into a reproducible box key pair, so the same
//! wallet recovers the same keys on every device without any server-side
//! key custody.
//!
//! ## Derivation Flow
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    SIGNATURE → KEY PAIR                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  "0x" + hex signature (65 bytes for an Ethereum personal_sign)         │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  hex decode ──► raw bytes (≥ 32, else InvalidSignatureFormat)          │
//! │                          │                                              │
//! │            ┌─────────────┴─────────────┐                               │
//! │            ▼                           ▼                               │
//! │  SignaturePrefix (default)    Sha256Digest (opt-in)                    │
//! │  seed = bytes[0..32]          seed = SHA-256(bytes)                    │
//! │            │                           │                               │
//! │            └─────────────┬─────────────┘                               │
//! │                          ▼                                              │
//! │  secret key = seed                                                     │
//! │  public key = X25519(seed, basepoint)                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Prefix Property
//!
//! With the default mode only the first 32 bytes of the signature are
//! entropy. Two signatures that agree on those bytes and differ afterwards
//! derive the *same* key pair. Keys published by existing accounts were
//! derived this way, so the default stays as is; `Sha256Digest` covers the
//! whole signature but derives different keys for the same wallet.

use serde::{Deserialize, Serialize};
use sha2::{digest::generic_array::GenericArray, Digest, Sha256};
use zeroize::Zeroizing;

use super::{KeyPair, SecretKey, SEED_SIZE};
use crate::error::{Error, Result};

/// How the 32-byte seed is taken from the decoded signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// The first 32 signature bytes are the seed
    #[default]
    SignaturePrefix,
    /// SHA-256 over the full signature is the seed
    Sha256Digest,
}

/// Derive the session key pair from a hex wallet signature
///
/// Uses [`SeedMode::SignaturePrefix`].
///
/// ## Errors
///
/// `InvalidSignatureFormat` if the input is not hex (an optional `0x`
/// prefix is allowed) or decodes to fewer than 32 bytes.
pub fn derive_keypair(signature_hex: &str) -> Result<KeyPair> {
    derive_keypair_with(signature_hex, SeedMode::SignaturePrefix)
}

/// Derive the session key pair using an explicit [`SeedMode`]
pub fn derive_keypair_with(signature_hex: &str, mode: SeedMode) -> Result<KeyPair> {
    let signature = decode_signature(signature_hex)?;

    // Seed bytes are written straight into the key that owns them
    let mut secret = SecretKey::from_bytes([0u8; SEED_SIZE]);
    match mode {
        SeedMode::SignaturePrefix => {
            secret.bytes_mut().copy_from_slice(&signature[..SEED_SIZE]);
        }
        SeedMode::Sha256Digest => {
            Sha256::new_with_prefix(signature.as_slice())
                .finalize_into(GenericArray::from_mut_slice(secret.bytes_mut()));
        }
    }

    let keypair = KeyPair::from_secret_key(secret);

    tracing::debug!(?mode, "Derived session key pair from wallet signature");
    Ok(keypair)
}

/// Hex-decode a signature into a buffer that is wiped when dropped
fn decode_signature(signature_hex: &str) -> Result<Zeroizing<Vec<u8>>> {
    let trimmed = signature_hex.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    // Error text names positions only, never signature characters
    let bytes = hex::decode(digits).map_err(|e| {
        Error::InvalidSignatureFormat(match e {
            hex::FromHexError::OddLength => "odd number of hex digits".to_string(),
            hex::FromHexError::InvalidHexCharacter { index, .. } => {
                format!("invalid hex digit at position {}", index)
            }
            hex::FromHexError::InvalidStringLength => "invalid hex length".to_string(),
        })
    })?;
    let bytes = Zeroizing::new(bytes);

    if bytes.len() < SEED_SIZE {
        return Err(Error::InvalidSignatureFormat(format!(
            "expected at least {} bytes, got {}",
            SEED_SIZE,
            bytes.len()
        )));
    }

    Ok(bytes)
}

// ============================================================================
// TESTS
// ============================================================================
