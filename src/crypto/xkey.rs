//! Extended key serialization
//!
//! Layout of the 78-byte payload, followed by a 4-byte double-SHA256
//! checksum and Base58 encoding:
//!
//! ```text
//! version(4) | depth(1) | parent fingerprint(4) | child number BE(4) |
//! chain code(32) | 0x00 | key(32)
//! ```
//!
//! Both private and public keys are written behind a single `0x00` byte;
//! an ed25519 public key is already 32 bytes.

use crate::crypto::hash::double_sha256;
use crate::crypto::hd::{KeyNode, NodeMeta};
use crate::error::{HdError, HdResult};
use ed25519_dalek::VerifyingKey;
use tracing::trace;
use zeroize::Zeroizing;

/// Version bytes of an extended public key (`xpub`)
pub const VERSION_PUBLIC: [u8; 4] = [0x04, 0x88, 0xB2, 0x1E];

/// Version bytes of an extended private key (`xprv`)
pub const VERSION_PRIVATE: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];

const PAYLOAD_LEN: usize = 78;
const CHECKSUM_LEN: usize = 4;

/// Serialize a node. Neutered nodes give `xpub…`, full nodes `xprv…`.
pub fn encode(node: &KeyNode) -> String {
    let mut data = Zeroizing::new(Vec::with_capacity(PAYLOAD_LEN + CHECKSUM_LEN));

    match node.signing_key() {
        Some(key) => {
            data.extend_from_slice(&VERSION_PRIVATE);
            write_meta(&mut data, node);
            data.push(0x00);
            data.extend_from_slice(key.as_bytes());
        }
        None => {
            data.extend_from_slice(&VERSION_PUBLIC);
            write_meta(&mut data, node);
            data.push(0x00);
            data.extend_from_slice(node.public_key());
        }
    }

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[..CHECKSUM_LEN]);
    bs58::encode(&data[..]).into_string()
}

fn write_meta(data: &mut Vec<u8>, node: &KeyNode) {
    data.push(node.depth());
    data.extend_from_slice(&node.parent_fingerprint());
    data.extend_from_slice(&node.child_number().to_be_bytes());
    data.extend_from_slice(node.chain_code());
}

/// Parse a serialized extended key.
///
/// Provenance is not part of the payload, so the result has no mnemonic
/// and no path.
pub fn decode(extended_key: &str) -> HdResult<KeyNode> {
    let data = Zeroizing::new(
        bs58::decode(extended_key.trim())
            .into_vec()
            .map_err(|_| HdError::InvalidExtendedKey("not valid base58"))?,
    );

    if data.len() != PAYLOAD_LEN + CHECKSUM_LEN {
        return Err(HdError::InvalidExtendedKey("wrong length"));
    }

    let (payload, checksum) = data.split_at(PAYLOAD_LEN);
    if double_sha256(payload)[..CHECKSUM_LEN] != checksum[..] {
        return Err(HdError::InvalidExtendedKey("checksum mismatch"));
    }

    let mut version = [0u8; 4];
    version.copy_from_slice(&payload[0..4]);
    let private = match version {
        VERSION_PRIVATE => true,
        VERSION_PUBLIC => false,
        other => return Err(HdError::UnknownVersionPrefix(other)),
    };

    let depth = payload[4];
    let mut parent_fingerprint = [0u8; 4];
    parent_fingerprint.copy_from_slice(&payload[5..9]);
    let mut child_number = [0u8; 4];
    child_number.copy_from_slice(&payload[9..13]);
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&payload[13..45]);

    if payload[45] != 0x00 {
        return Err(HdError::InvalidExtendedKey("key field must start with 0x00"));
    }
    let mut key = Zeroizing::new([0u8; 32]);
    key.copy_from_slice(&payload[46..78]);

    let meta = NodeMeta {
        parent_fingerprint,
        child_number: u32::from_be_bytes(child_number),
        depth,
        mnemonic: None,
        path: None,
    };

    let node = if private {
        KeyNode::with_private_key(&key, chain_code, meta)
    } else {
        VerifyingKey::from_bytes(&key)
            .map_err(|_| HdError::InvalidExtendedKey("public key is not a valid ed25519 point"))?;
        KeyNode::with_public_key(*key, chain_code, meta)
    };

    trace!(depth, neutered = node.is_neutered(), "decoded extended key");
    Ok(node)
}
