//! # Cryptography Module
//!
//! Key derivation from wallet signatures and box encryption between two
//! published public keys.
//!
//! ## Security Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    CRYPTOGRAPHIC ARCHITECTURE                           │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Wallet signature over the sign-in challenge (hex)                     │
//! │                          │                                              │
//! │                          ▼                                              │
//! │  ┌─────────────────────────────────────────────────────────┐           │
//! │  │  derivation: seed (32 bytes) → X25519 KeyPair           │           │
//! │  └─────────────────────────────────────────────────────────┘           │
//! │            │                                 │                          │
//! │            ▼                                 ▼                          │
//! │   PublicKey (base64)                 SecretKey (session memory)        │
//! │   published at sign-in               zeroized on drop                  │
//! │            │                                 │                          │
//! │            └───────────────┬─────────────────┘                          │
//! │                            ▼                                            │
//! │  ┌─────────────────────────────────────────────────────────┐           │
//! │  │  channel: XSalsa20-Poly1305 box, random 24-byte nonce   │           │
//! │  └─────────────────────────────────────────────────────────┘           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Algorithm Choices
//!
//! | Algorithm | Purpose | Crate |
//! |-----------|---------|-------|
//! | X25519 | Key pair from seed | `x25519-dalek` |
//! | XSalsa20-Poly1305 box | Message encryption | `crypto_box` |
//! | SHA-256 | Optional digest seed | `sha2` |
//!
//! Randomness comes from `rand::rngs::OsRng` only. Every operation is
//! synchronous and touches no shared mutable state, so calls from
//! multiple threads need no coordination.

mod channel;
mod derivation;
mod keys;

pub use channel::{decrypt, encrypt, EncryptedEnvelope, SecureChannel};
pub use derivation::{derive_keypair, derive_keypair_with, SeedMode};
pub use keys::{decode_public_key, encode_public_key, KeyPair, PublicKey, SecretKey};

/// Size of X25519 public keys in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of X25519 secret keys in bytes
pub const SECRET_KEY_SIZE: usize = 32;

/// Number of signature bytes consumed as the key seed
pub const SEED_SIZE: usize = 32;

/// Size of the XSalsa20 nonce in bytes (192 bits)
pub const NONCE_SIZE: usize = 24;
