//! SLIP-0010 ed25519 key derivation
//!
//! Master key: `I = HMAC-SHA512("ed25519 seed", seed)`.
//! Child key:  `I = HMAC-SHA512(chain_code, 0x00 || key || ser32(index | 2^31))`.
//! In both cases the left 32 bytes are the key and the right 32 the chain code.
//! ed25519 only has hardened children, so every index is hardened here.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroizing;

use super::path::HARDENED_BIT;

const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// A derived private key and its chain code
pub struct DerivedKey {
    pub key: Zeroizing<[u8; 32]>,
    pub chain_code: [u8; 32],
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Zeroizing<[u8; 64]> {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts any key length");
    for part in parts {
        mac.update(part);
    }
    Zeroizing::new(mac.finalize().into_bytes().into())
}

fn split(result: &[u8; 64]) -> DerivedKey {
    let mut key = Zeroizing::new([0u8; 32]);
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&result[..32]);
    chain_code.copy_from_slice(&result[32..]);
    DerivedKey { key, chain_code }
}

/// Master key and chain code from a seed
pub fn master_key(seed: &[u8]) -> DerivedKey {
    split(&hmac_sha512(ED25519_SEED_KEY, &[seed]))
}

/// Hardened child of `(key, chain_code)` at `index` (the hardened bit is
/// applied here whether or not the caller set it)
pub fn derive_hardened(key: &[u8; 32], chain_code: &[u8; 32], index: u32) -> DerivedKey {
    let index = index | HARDENED_BIT;
    split(&hmac_sha512(
        chain_code,
        &[&[0x00u8][..], &key[..], &index.to_be_bytes()[..]],
    ))
}
