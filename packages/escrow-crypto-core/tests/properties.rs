//! Property-based tests for the encryption core
//!
//! 1. **Determinism**: derive(s) == derive(s)
//! 2. **Distinctness**: different seed bytes give different key pairs
//! 3. **Round-trip**: decrypt(encrypt(m)) == m for all UTF-8 strings
//! 4. **Tamper rejection**: any flipped byte fails with DecryptionFailed
//! 5. **Key codec**: decode(encode(k)) == k

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use escrow_crypto_core::{
    decode_public_key, decrypt, derive_keypair, encode_public_key, encrypt, Error, KeyPair,
    PublicKey,
};
use proptest::prelude::*;

fn keypair_from(seed: [u8; 32]) -> KeyPair {
    KeyPair::from_secret_bytes(seed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_derivation_is_deterministic(sig in prop::collection::vec(any::<u8>(), 32..96)) {
        let hex_sig = hex::encode(&sig);
        let kp1 = derive_keypair(&hex_sig).unwrap();
        let kp2 = derive_keypair(&format!("0x{}", hex_sig)).unwrap();

        prop_assert_eq!(kp1.public_key(), kp2.public_key());
        prop_assert_eq!(kp1.secret_key().expose_bytes(), kp2.secret_key().expose_bytes());
    }

    #[test]
    fn prop_distinct_prefixes_distinct_keys(
        a in any::<[u8; 32]>(),
        b in any::<[u8; 32]>(),
        tail in prop::collection::vec(any::<u8>(), 0..33),
    ) {
        prop_assume!(a != b);

        let sig_a = format!("{}{}", hex::encode(a), hex::encode(&tail));
        let sig_b = format!("{}{}", hex::encode(b), hex::encode(&tail));

        let kp_a = derive_keypair(&sig_a).unwrap();
        let kp_b = derive_keypair(&sig_b).unwrap();

        prop_assert_ne!(kp_a.public_key(), kp_b.public_key());
    }

    #[test]
    fn prop_short_signatures_rejected(sig in prop::collection::vec(any::<u8>(), 0..32)) {
        let result = derive_keypair(&hex::encode(&sig));
        prop_assert!(matches!(result, Err(Error::InvalidSignatureFormat(_))));
    }

    #[test]
    fn prop_encrypt_decrypt_roundtrip(
        plaintext in any::<String>(),
        alice_seed in any::<[u8; 32]>(),
        bob_seed in any::<[u8; 32]>(),
    ) {
        let alice = keypair_from(alice_seed);
        let bob = keypair_from(bob_seed);

        let env = encrypt(&plaintext, bob.public_key(), alice.secret_key()).unwrap();
        let opened = decrypt(&env.ciphertext, &env.nonce, alice.public_key(), bob.secret_key()).unwrap();

        prop_assert_eq!(opened, plaintext);
    }

    #[test]
    fn prop_tampered_ciphertext_rejected(
        plaintext in ".{0,64}",
        index in any::<prop::sample::Index>(),
        mask in 1u8..=255,
    ) {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let env = encrypt(&plaintext, bob.public_key(), alice.secret_key()).unwrap();

        let mut sealed = BASE64.decode(&env.ciphertext).unwrap();
        let i = index.index(sealed.len());
        sealed[i] ^= mask;

        let result = decrypt(&BASE64.encode(&sealed), &env.nonce, alice.public_key(), bob.secret_key());
        prop_assert_eq!(result, Err(Error::DecryptionFailed));
    }

    #[test]
    fn prop_tampered_nonce_rejected(
        index in 0usize..24,
        mask in 1u8..=255,
    ) {
        let alice = KeyPair::generate();
        let bob = KeyPair::generate();
        let env = encrypt("order shipped", bob.public_key(), alice.secret_key()).unwrap();

        let mut nonce = BASE64.decode(&env.nonce).unwrap();
        nonce[index] ^= mask;

        let result = decrypt(&env.ciphertext, &BASE64.encode(&nonce), alice.public_key(), bob.secret_key());
        prop_assert_eq!(result, Err(Error::DecryptionFailed));
    }

    #[test]
    fn prop_wrong_recipient_rejected(
        alice_seed in any::<[u8; 32]>(),
        bob_seed in any::<[u8; 32]>(),
        eve_seed in any::<[u8; 32]>(),
    ) {
        let alice = keypair_from(alice_seed);
        let bob = keypair_from(bob_seed);
        let eve = keypair_from(eve_seed);
        prop_assume!(eve.public_key() != bob.public_key());

        let env = encrypt("secret", bob.public_key(), alice.secret_key()).unwrap();
        let result = decrypt(&env.ciphertext, &env.nonce, alice.public_key(), eve.secret_key());

        prop_assert_eq!(result, Err(Error::DecryptionFailed));
    }

    #[test]
    fn prop_key_codec_roundtrip(bytes in any::<[u8; 32]>()) {
        let key = PublicKey::from_bytes(bytes);
        prop_assert_eq!(decode_public_key(&encode_public_key(&key)).unwrap(), key);
    }
}

#[test]
fn nonce_freshness_over_many_calls() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let mut seen = std::collections::HashSet::new();
    for _ in 0..256 {
        let env = encrypt("same", bob.public_key(), alice.secret_key()).unwrap();
        assert!(seen.insert(env.nonce));
    }
}

#[test]
fn concurrent_encryption_from_many_threads() {
    let alice = KeyPair::generate();
    let bob = KeyPair::generate();

    let envelopes: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let secret = alice.secret_key().clone();
                let recipient = *bob.public_key();
                scope.spawn(move || {
                    (0..32)
                        .map(|j| {
                            let text = format!("message {}-{}", i, j);
                            let env = encrypt(&text, &recipient, &secret).unwrap();
                            (text, env)
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(envelopes.len(), 8 * 32);
    for (text, env) in envelopes {
        let opened = decrypt(&env.ciphertext, &env.nonce, alice.public_key(), bob.secret_key())
            .unwrap();
        assert_eq!(opened, text);
    }
}

#[test]
fn signature_scenario_from_wallets() {
    let sender = derive_keypair(&"aa".repeat(65)).unwrap();
    let recipient = derive_keypair(&"bb".repeat(65)).unwrap();
    let third_party = derive_keypair(&"cc".repeat(65)).unwrap();

    let env = encrypt("Hello, Bob!", recipient.public_key(), sender.secret_key()).unwrap();

    assert_eq!(
        decrypt(&env.ciphertext, &env.nonce, sender.public_key(), recipient.secret_key()).unwrap(),
        "Hello, Bob!"
    );
    assert_eq!(
        decrypt(&env.ciphertext, &env.nonce, sender.public_key(), third_party.secret_key()),
        Err(Error::DecryptionFailed)
    );
}
