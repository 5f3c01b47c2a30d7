pub mod commands;
pub mod crypto;
pub mod error;
pub mod wasm;

pub use crypto::hd::KeyNode;
pub use crypto::mnemonic::{
    entropy_to_mnemonic, generate_mnemonic, is_valid_mnemonic, mnemonic_to_entropy, Mnemonic,
};
pub use crypto::path::{account_path, ChildSpec, DerivationPath, COIN_TYPE, DEFAULT_PATH, HARDENED_BIT};
pub use crypto::seed::mnemonic_to_seed;
pub use crypto::wordlist::{Wordlist, WordlistRegistry};
pub use crypto::xkey::{VERSION_PRIVATE, VERSION_PUBLIC};
pub use error::{HdError, HdResult};

// Re-export WASM functions
pub use wasm::*;

/// Result from a command, separating readable output from the JSON result
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Human-readable output
    pub output: String,
    /// Single-line JSON result
    pub result: String,
}

