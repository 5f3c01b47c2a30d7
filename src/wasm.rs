use wasm_bindgen::prelude::*;

use crate::commands::NodeSummary;
use crate::crypto::hd::KeyNode;
use crate::crypto::mnemonic::{entropy_to_mnemonic, is_valid_mnemonic, mnemonic_to_entropy};
use crate::crypto::path::account_path;
use crate::crypto::seed::mnemonic_to_seed;
use crate::crypto::wordlist::{Wordlist, WordlistRegistry};
use crate::error::HdError;

/// Initialize panic hook for better error messages in browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("Error: {}", e))
}

fn with_wordlist<T>(
    locale: Option<String>,
    f: impl FnOnce(&Wordlist) -> Result<T, HdError>,
) -> Result<T, JsValue> {
    match locale.as_deref() {
        None | Some("en") => f(&Wordlist::english()).map_err(js_error),
        Some(code) => {
            let registry = WordlistRegistry::default();
            let wordlist = registry.get(code).map_err(js_error)?;
            f(wordlist).map_err(js_error)
        }
    }
}

fn summary_json(node: &KeyNode, show_private: bool) -> Result<String, JsValue> {
    serde_json::to_string(&NodeSummary::new(node, show_private)).map_err(js_error)
}

// WASM-exposed key tree functions

/// Derive `path` (or the root when empty) from a phrase; returns the node as JSON
#[wasm_bindgen]
pub fn wasm_from_mnemonic(
    phrase: String,
    passphrase: Option<String>,
    path: Option<String>,
    locale: Option<String>,
    show_private: bool,
) -> Result<String, JsValue> {
    let node = with_wordlist(locale, |wordlist| {
        let root = KeyNode::from_mnemonic(&phrase, passphrase.as_deref(), wordlist)?;
        match path.as_deref().map(str::trim) {
            None | Some("") | Some("m") | Some("M") => Ok(root),
            Some(path) => root.derive_child(path),
        }
    })?;
    summary_json(&node, show_private)
}

/// Decode an extended key, optionally deriving below it; returns JSON
#[wasm_bindgen]
pub fn wasm_from_extended_key(
    extended_key: String,
    path: Option<String>,
    show_private: bool,
) -> Result<String, JsValue> {
    let node = KeyNode::from_extended_key(&extended_key).map_err(js_error)?;
    let node = match path.as_deref().map(str::trim) {
        None | Some("") => node,
        Some(path) => node.derive_child(path).map_err(js_error)?,
    };
    summary_json(&node, show_private)
}

/// Account path for an account index
#[wasm_bindgen]
pub fn wasm_account_path(index: u32) -> Result<String, JsValue> {
    account_path(index).map_err(js_error)
}

// WASM-exposed mnemonic functions

#[wasm_bindgen]
pub fn wasm_is_valid_mnemonic(phrase: String, locale: Option<String>) -> bool {
    with_wordlist(locale, |wordlist| Ok(is_valid_mnemonic(&phrase, wordlist))).unwrap_or(false)
}

/// Hex entropy to phrase
#[wasm_bindgen]
pub fn wasm_entropy_to_mnemonic(entropy_hex: String, locale: Option<String>) -> Result<String, JsValue> {
    let entropy = zeroize::Zeroizing::new(hex::decode(entropy_hex.trim()).map_err(js_error)?);
    with_wordlist(locale, |wordlist| entropy_to_mnemonic(&entropy, wordlist))
}

/// Phrase to hex entropy
#[wasm_bindgen]
pub fn wasm_mnemonic_to_entropy(phrase: String, locale: Option<String>) -> Result<String, JsValue> {
    with_wordlist(locale, |wordlist| {
        mnemonic_to_entropy(&phrase, wordlist).map(|entropy| hex::encode(&entropy[..]))
    })
}

/// Phrase and optional passphrase to the hex seed (the phrase is not validated)
#[wasm_bindgen]
pub fn wasm_mnemonic_to_seed(phrase: String, passphrase: Option<String>) -> String {
    hex::encode(&mnemonic_to_seed(&phrase, passphrase.as_deref())[..])
}
