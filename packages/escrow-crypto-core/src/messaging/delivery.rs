//! Product-delivery keys.
//!
//! After the buyer funds escrow, the seller hands over a one-time secret
//! (download key, license code) sealed to the buyer's published key. It
//! travels through the same untrusted backend as chat messages.

use crate::crypto::{decrypt, encrypt, EncryptedEnvelope, PublicKey, SecretKey};
use crate::error::Result;

/// Seal a product key from the seller to the buyer
pub fn encrypt_product_key(
    product_key: &str,
    buyer_public: &PublicKey,
    seller_secret: &SecretKey,
) -> Result<EncryptedEnvelope> {
    encrypt(product_key, buyer_public, seller_secret)
}

/// Open a product key the seller sealed for the buyer
pub fn decrypt_product_key(
    ciphertext_b64: &str,
    nonce_b64: &str,
    seller_public: &PublicKey,
    buyer_secret: &SecretKey,
) -> Result<String> {
    decrypt(ciphertext_b64, nonce_b64, seller_public, buyer_secret)
}
