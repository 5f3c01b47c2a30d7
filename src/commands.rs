//! Command Implementations
//!
//! Each `*_core` function does the work of one CLI subcommand and returns a
//! [`CommandResult`]: readable output for the terminal plus a single JSON
//! line for scripts. The binary and the WASM bindings both call these.
//!
//! ## Usage
//!
//! ```ignore
//! let registry = WordlistRegistry::default();
//! let result = derive_core(&registry, phrase, None, "en", Target::Account(0), false)?;
//! println!("{}", result.result);
//! ```

use crate::crypto::hd::KeyNode;
use crate::crypto::mnemonic::{
    entropy_to_mnemonic, generate_mnemonic, mnemonic_to_entropy, Mnemonic,
};
use crate::crypto::path::account_path;
use crate::crypto::seed::mnemonic_to_seed;
use crate::crypto::wordlist::WordlistRegistry;
use crate::CommandResult;
use anyhow::{Context, Result};
use serde::Serialize;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

// ============================================================================
// JSON Types
// ============================================================================

/// Public view of a key node, plus the private key when asked for
#[derive(Debug, Clone, Serialize)]
pub struct NodeSummary {
    pub depth: u8,
    pub index: u32,
    pub hardened: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub fingerprint: String,
    pub parent_fingerprint: String,
    pub public_key: String,
    pub chain_code: String,
    pub address: String,
    pub xpub: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xprv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl NodeSummary {
    pub fn new(node: &KeyNode, show_private: bool) -> Self {
        let (xprv, private_key) = match node.keypair_bytes() {
            Some(bytes) if show_private => {
                (Some(node.extended_key()), Some(hex::encode(&bytes[..])))
            }
            _ => (None, None),
        };

        Self {
            depth: node.depth(),
            index: node.index(),
            hardened: node.is_hardened(),
            path: node.path().map(ToString::to_string),
            fingerprint: hex::encode(node.fingerprint()),
            parent_fingerprint: hex::encode(node.parent_fingerprint()),
            public_key: hex::encode(node.public_key()),
            chain_code: hex::encode(node.chain_code()),
            address: hex::encode(node.address()),
            xpub: node.extended_public_key(),
            xprv,
            private_key,
        }
    }

    fn describe(&self, out: &mut String) {
        out.push_str(&format!(
            "Path:        {}\n",
            self.path.as_deref().unwrap_or("(unknown)")
        ));
        out.push_str(&format!(
            "Depth:       {} (index {}{})\n",
            self.depth,
            self.index,
            if self.hardened { "'" } else { "" }
        ));
        out.push_str(&format!("Fingerprint: {}\n", self.fingerprint));
        out.push_str(&format!("Parent:      {}\n", self.parent_fingerprint));
        out.push_str(&format!("Public key:  {}\n", self.public_key));
        out.push_str(&format!("Address:     {}\n", self.address));
        if self.xprv.is_some() {
            out.push_str("Private key material included in the JSON result.\n");
        }
    }
}

#[derive(Serialize)]
struct PhraseOutput<'a> {
    mnemonic: &'a str,
    words: usize,
    locale: &'a str,
}

#[derive(Serialize)]
struct ValidateOutput<'a> {
    valid: bool,
    locale: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Where `derive` should end up
#[derive(Debug, Clone)]
pub enum Target {
    /// An explicit path or bare index
    Path(String),
    /// The account path for an account index
    Account(u32),
}

fn finish<T: Serialize>(out: String, value: &T) -> Result<CommandResult> {
    let result = serde_json::to_string(value).context("Failed to serialize result")?;
    Ok(CommandResult { output: out, result })
}

// ============================================================================
// Mnemonic Commands
// ============================================================================

/// Generate a fresh random phrase
pub fn generate_core(
    registry: &WordlistRegistry,
    word_count: usize,
    locale: &str,
) -> Result<CommandResult> {
    let wordlist = registry.get(locale)?;
    let mnemonic = generate_mnemonic(word_count, wordlist)
        .context("Failed to generate mnemonic")?;

    let mut out = String::new();
    out.push_str("Mnemonic Generation (BIP-39)\n\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Generated {} words ({} bits of entropy) from the '{}' wordlist.\n",
        mnemonic.word_count(),
        mnemonic.word_count() / 3 * 32,
        wordlist.locale()
    ));
    out.push_str("Write the phrase down and keep it offline.\n");

    finish(
        out,
        &PhraseOutput {
            mnemonic: mnemonic.phrase(),
            words: mnemonic.word_count(),
            locale: wordlist.locale(),
        },
    )
}

/// Check a phrase's words and checksum
pub fn validate_core(
    registry: &WordlistRegistry,
    phrase: &str,
    locale: &str,
) -> Result<CommandResult> {
    let wordlist = registry.get(locale)?;
    let error = mnemonic_to_entropy(phrase, wordlist)
        .err()
        .map(|e| e.to_string());

    let mut out = String::new();
    match &error {
        None => out.push_str("Mnemonic is valid.\n"),
        Some(reason) => out.push_str(&format!("Mnemonic is NOT valid: {}\n", reason)),
    }

    finish(
        out,
        &ValidateOutput {
            valid: error.is_none(),
            locale: wordlist.locale(),
            error,
        },
    )
}

/// Decode a phrase to its entropy
pub fn to_entropy_core(
    registry: &WordlistRegistry,
    phrase: &str,
    locale: &str,
) -> Result<CommandResult> {
    let wordlist = registry.get(locale)?;
    let entropy = mnemonic_to_entropy(phrase, wordlist).context("Failed to decode mnemonic")?;

    let out = format!("Decoded {} bytes of entropy.\n", entropy.len());
    finish(out, &serde_json::json!({ "entropy": hex::encode(&entropy[..]) }))
}

/// Encode hex entropy as a phrase
pub fn from_entropy_core(
    registry: &WordlistRegistry,
    entropy_hex: &str,
    locale: &str,
) -> Result<CommandResult> {
    let wordlist = registry.get(locale)?;
    let entropy = zeroize::Zeroizing::new(
        hex::decode(entropy_hex.trim()).context("Invalid hex string for entropy")?,
    );
    let phrase = zeroize::Zeroizing::new(entropy_to_mnemonic(&entropy, wordlist)?);
    let words = phrase.split_whitespace().count();

    let out = format!("Encoded {} bytes of entropy as {} words.\n", entropy.len(), words);
    finish(
        out,
        &PhraseOutput {
            mnemonic: &phrase,
            words,
            locale: wordlist.locale(),
        },
    )
}

/// Stretch a phrase into its 64-byte seed
pub fn seed_core(
    registry: &WordlistRegistry,
    phrase: &str,
    passphrase: Option<&str>,
    locale: &str,
) -> Result<CommandResult> {
    let wordlist = registry.get(locale)?;
    let mnemonic = Mnemonic::parse(phrase, wordlist).context("Failed to parse mnemonic")?;
    let seed = mnemonic_to_seed(mnemonic.phrase(), passphrase);

    let mut out = String::new();
    out.push_str("Seed Derivation (PBKDF2-HMAC-SHA512, 2048 rounds)\n\n");
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&format!(
        "Passphrase: {}\n",
        if passphrase.map_or(true, str::is_empty) {
            "none"
        } else {
            "provided"
        }
    ));

    finish(out, &serde_json::json!({ "seed": hex::encode(&seed[..]) }))
}

// ============================================================================
// Key Tree Commands
// ============================================================================

/// Derive a node from a phrase
pub fn derive_core(
    registry: &WordlistRegistry,
    phrase: &str,
    passphrase: Option<&str>,
    locale: &str,
    target: Target,
    show_private: bool,
) -> Result<CommandResult> {
    let wordlist = registry.get(locale)?;
    let root = KeyNode::from_mnemonic(phrase, passphrase, wordlist)
        .context("Failed to build root key from mnemonic")?;

    let path = match target {
        Target::Path(path) => path,
        Target::Account(index) => account_path(index)?,
    };
    let node = root
        .derive_child(&path)
        .with_context(|| format!("Failed to derive '{}'", path))?;

    let summary = NodeSummary::new(&node, show_private);
    let mut out = String::new();
    out.push_str("Key Derivation (SLIP-0010 ed25519)\n\n");
    out.push_str(RULE);
    out.push('\n');
    summary.describe(&mut out);

    finish(out, &summary)
}

/// Decode an extended key and show what it holds
pub fn inspect_core(extended_key: &str, show_private: bool) -> Result<CommandResult> {
    let node = KeyNode::from_extended_key(extended_key).context("Failed to decode extended key")?;

    let summary = NodeSummary::new(&node, show_private);
    let mut out = String::new();
    out.push_str(&format!(
        "Extended {} key\n\n",
        if node.is_neutered() { "public" } else { "private" }
    ));
    summary.describe(&mut out);

    finish(out, &summary)
}

/// Turn an extended private key into its extended public key
pub fn neuter_core(extended_key: &str) -> Result<CommandResult> {
    let node = KeyNode::from_extended_key(extended_key).context("Failed to decode extended key")?;
    let xpub = node.extended_public_key();

    let out = format!(
        "Neutered key at depth {} (fingerprint {}).\n",
        node.depth(),
        hex::encode(node.fingerprint())
    );
    finish(out, &serde_json::json!({ "xpub": xpub }))
}

/// Account path for an account index
pub fn account_path_core(index: u32) -> Result<CommandResult> {
    let path = account_path(index)?;
    let out = format!("Account {} derives at {}\n", index, path);
    finish(out, &serde_json::json!({ "path": path }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::wordlist::Wordlist;
    use crate::crypto::path::DEFAULT_PATH;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    fn english_only() -> WordlistRegistry {
        WordlistRegistry::with_languages(&[bip39::Language::English])
    }

    fn json(result: &CommandResult) -> serde_json::Value {
        serde_json::from_str(&result.result).unwrap()
    }

    #[test]
    fn test_generate_and_validate() {
        let registry = english_only();
        let generated = json(&generate_core(&registry, 24, "en").unwrap());
        assert_eq!(generated["words"], 24);
        let phrase = generated["mnemonic"].as_str().unwrap();

        let validated = json(&validate_core(&registry, phrase, "en").unwrap());
        assert_eq!(validated["valid"], true);
        assert!(validated.get("error").is_none());
    }

    #[test]
    fn test_validate_reports_checksum() {
        let registry = english_only();
        let phrase = ABANDON_ABOUT.replace("about", "able");
        let validated = json(&validate_core(&registry, &phrase, "en").unwrap());
        assert_eq!(validated["valid"], false);
        assert_eq!(validated["error"], "invalid mnemonic checksum");
    }

    #[test]
    fn test_unknown_locale_fails() {
        let registry = english_only();
        assert!(generate_core(&registry, 12, "fr").is_err());
    }

    #[test]
    fn test_entropy_commands() {
        let registry = english_only();
        let entropy = json(&to_entropy_core(&registry, ABANDON_ABOUT, "en").unwrap());
        assert_eq!(entropy["entropy"], "00000000000000000000000000000000");

        let phrase = json(&from_entropy_core(&registry, "7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f", "en").unwrap());
        assert_eq!(
            phrase["mnemonic"],
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );
        assert!(from_entropy_core(&registry, "zz", "en").is_err());
    }

    #[test]
    fn test_derive_account_hides_private_by_default() {
        let registry = english_only();
        let result = derive_core(&registry, ABANDON_ABOUT, None, "en", Target::Account(0), false).unwrap();
        let summary = json(&result);
        assert_eq!(summary["depth"], 1);
        assert_eq!(summary["parent_fingerprint"], "8ec3bbf1");
        assert_eq!(summary["path"], "m/44'/635'/0'/0'/0'");
        assert_eq!(summary["address"], "aa9b781ddffebfa6767f08d199b8ad53735e8b9e");
        assert!(summary.get("xprv").is_none());
        assert!(summary.get("private_key").is_none());
        assert!(!result.output.contains("d3f0cc25"));
    }

    #[test]
    fn test_derive_show_private() {
        let registry = english_only();
        let summary = json(
            &derive_core(
                &registry,
                ABANDON_ABOUT,
                None,
                "en",
                Target::Path(DEFAULT_PATH.to_string()),
                true,
            )
            .unwrap(),
        );
        assert_eq!(summary["depth"], 1);
        assert_eq!(summary["index"], 0);
        assert!(summary["xprv"].as_str().unwrap().starts_with("xprv"));
        assert_eq!(summary["private_key"].as_str().unwrap().len(), 128);
    }

    #[test]
    fn test_inspect_and_neuter() {
        let root = KeyNode::from_mnemonic(ABANDON_ABOUT, None, &Wordlist::english()).unwrap();
        let xprv = root.extended_key();

        let inspected = json(&inspect_core(&xprv, false).unwrap());
        assert_eq!(inspected["fingerprint"], "8ec3bbf1");
        assert!(inspected.get("path").is_none());

        let neutered = json(&neuter_core(&xprv).unwrap());
        assert_eq!(neutered["xpub"], root.extended_public_key());
    }

    #[test]
    fn test_account_path_command() {
        let path = json(&account_path_core(3).unwrap());
        assert_eq!(path["path"], "m/44'/635'/3'/0/0");
        assert!(account_path_core(u32::MAX).is_err());
    }
}
