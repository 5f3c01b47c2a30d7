//! Digest helpers shared by the codecs and key nodes

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Length of a key fingerprint
pub const FINGERPRINT_LEN: usize = 4;

/// Length of an account address
pub const ADDRESS_LEN: usize = 20;

/// SHA256(data)
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA256(SHA256(data))
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD160(SHA256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// First four bytes of HASH160 of a public key
pub fn fingerprint(public_key: &[u8; 32]) -> [u8; FINGERPRINT_LEN] {
    let digest = hash160(public_key);
    [digest[0], digest[1], digest[2], digest[3]]
}

/// Account address: the first 20 bytes of SHA256 of the public key
pub fn address(public_key: &[u8; 32]) -> [u8; ADDRESS_LEN] {
    let digest = sha256(public_key);
    let mut address = [0u8; ADDRESS_LEN];
    address.copy_from_slice(&digest[..ADDRESS_LEN]);
    address
}
