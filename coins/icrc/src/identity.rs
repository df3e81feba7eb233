//! Throwaway Ed25519 identities derived from short seeds.
//!
//! A seed of up to 32 bytes is zero-padded into the secret key, so the same
//! seed always signs as the same principal.

use candid::Principal;
use ed25519_dalek::SigningKey;
use ic_agent::identity::BasicIdentity;
use icrc_error::{IcrcError, Result};
use rand::Rng;
use std::fmt;
use zeroize::Zeroizing;

/// Characters used for generated seeds.
pub const SEED_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Longest accepted seed, in bytes. Shorter seeds are zero-padded.
pub const MAX_SEED_LEN: usize = 32;

/// SubjectPublicKeyInfo header for a raw Ed25519 public key (RFC 8410).
const ED25519_DER_PREFIX: [u8; 12] = [
    0x30, 0x2a, 0x30, 0x05, 0x06, 0x03, 0x2b, 0x65, 0x70, 0x03, 0x21, 0x00,
];

/// Returns `len` characters drawn uniformly from [`SEED_ALPHABET`].
pub fn random_seed(len: usize) -> String {
    let alphabet = SEED_ALPHABET.as_bytes();
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}

/// An Ed25519 identity whose secret key is a zero-padded seed.
///
/// The same seed always yields the same key and principal.
pub struct SeedIdentity {
    signing_key: SigningKey,
}

impl SeedIdentity {
    /// Derives the identity from a 1 to 32 byte seed
    pub fn from_seed(seed: &str) -> Result<Self> {
        Self::from_seed_bytes(seed.as_bytes())
    }

    /// Byte-level variant of [`SeedIdentity::from_seed`]
    pub fn from_seed_bytes(seed: &[u8]) -> Result<Self> {
        if seed.is_empty() || seed.len() > MAX_SEED_LEN {
            return Err(IcrcError::InvalidSeed(format!(
                "expected 1 to {MAX_SEED_LEN} bytes, got {}",
                seed.len()
            )));
        }

        let mut key_material = Zeroizing::new([0u8; MAX_SEED_LEN]);
        key_material[..seed.len()].copy_from_slice(seed);

        Ok(Self {
            signing_key: SigningKey::from_bytes(&key_material),
        })
    }

    /// A throwaway identity from a fresh random seed
    pub fn random() -> Result<Self> {
        let seed = Zeroizing::new(random_seed(MAX_SEED_LEN));
        Self::from_seed(&seed)
    }

    /// Raw 32-byte public key
    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// DER-encoded public key, as the network expects it
    pub fn public_key_der(&self) -> Vec<u8> {
        let mut der = ED25519_DER_PREFIX.to_vec();
        der.extend_from_slice(&self.public_key());
        der
    }

    /// Self-authenticating principal of this key
    pub fn principal(&self) -> Principal {
        Principal::self_authenticating(self.public_key_der())
    }

    /// An agent identity that signs with the same key
    pub fn to_agent_identity(&self) -> BasicIdentity {
        let secret = Zeroizing::new(self.signing_key.to_bytes());
        BasicIdentity::from_raw_key(&secret)
    }
}

impl fmt::Debug for SeedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedIdentity")
            .field("principal", &self.principal().to_text())
            .finish_non_exhaustive()
    }
}
