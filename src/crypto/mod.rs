//! Cryptographic Primitives
//!
//! The building blocks for BIP-39 phrases and SLIP-0010 ed25519 key trees:
//!
//! - **bits**: 11-bit word index packing
//! - **wordlist**: BIP-39 word tables and the locale registry
//! - **mnemonic**: entropy <-> phrase codec with checksum
//! - **seed**: PBKDF2 phrase stretching
//! - **hash**: digests for checksums, fingerprints and addresses
//! - **slip10**: ed25519 master and hardened child keys
//! - **path**: derivation path parsing
//! - **hd**: key tree nodes
//! - **xkey**: Base58Check extended key serialization

pub mod bits;
pub mod hash;
pub mod hd;
pub mod mnemonic;
pub mod path;
pub mod seed;
pub mod slip10;
pub mod wordlist;
pub mod xkey;
