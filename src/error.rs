//! Error types for mnemonic and HD key operations

use thiserror::Error;

/// Result type for mnemonic and HD key operations
pub type HdResult<T> = Result<T, HdError>;

/// Errors that can occur while encoding mnemonics or deriving keys
///
/// Messages never include phrase words or key bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HdError {
    /// Seed length outside 16..=64 bytes
    #[error("invalid seed: {0} bytes (expected 16 to 64)")]
    InvalidSeed(usize),

    /// Entropy length outside 16..=32 bytes or not a multiple of 4
    #[error("invalid entropy: {0} bytes (expected 16 to 32, multiple of 4)")]
    InvalidEntropy(usize),

    /// Wrong word count, or a word missing from the wordlist
    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    /// Embedded checksum bits do not match the decoded entropy
    #[error("invalid mnemonic checksum")]
    InvalidChecksum,

    /// Child derivation requested on a public-only node
    #[error("cannot derive child of neutered node")]
    NeuteredDerivation,

    /// Derivation would push the depth to 256
    #[error("derivation depth overflow (max depth is 255)")]
    DepthOverflow,

    /// Malformed extended key (length, checksum or key field)
    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(&'static str),

    /// Version bytes match neither the public nor the private constant
    #[error("unknown extended key version prefix 0x{}", hex::encode(.0))]
    UnknownVersionPrefix([u8; 4]),

    /// Malformed derivation path or out-of-range child index
    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    /// No wordlist registered for the locale code
    #[error("unknown wordlist locale: {0}")]
    UnknownLocale(String),
}
