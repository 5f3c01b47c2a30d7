//! BIP-39 Wordlists
//!
//! The word tables come from the `bip39` crate. This module adds the lookup
//! and phrase splitting rules the mnemonic codec needs, and an explicit
//! registry so callers pick a locale without any process-wide state.
//!
//! ## Usage
//!
//! ```ignore
//! let registry = WordlistRegistry::default();
//! let wordlist = registry.get("en")?;
//! let words = wordlist.split("Abandon  abandon ...");
//! ```

use crate::error::{HdError, HdResult};
use bip39::Language;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Number of words in every BIP-39 wordlist
pub const WORDLIST_SIZE: usize = 2048;

/// Locale code of the default (English) wordlist
pub const DEFAULT_LOCALE: &str = "en";

/// Normalize a string to Unicode NFKD
pub fn nfkd(s: &str) -> String {
    s.nfkd().collect()
}

// ============================================================================
// Wordlist
// ============================================================================

/// One locale's 2048-word table plus its phrase conventions
#[derive(Clone)]
pub struct Wordlist {
    language: Language,
    locale: &'static str,
    lookup: HashMap<String, u16>,
}

impl Wordlist {
    /// Build the lookup table for a language
    pub fn new(language: Language) -> Self {
        let lookup = language
            .word_list()
            .iter()
            .enumerate()
            .map(|(index, word)| (nfkd(word), index as u16))
            .collect();

        Self {
            language,
            locale: locale_code(language),
            lookup,
        }
    }

    /// The English wordlist
    pub fn english() -> Self {
        Self::new(Language::English)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Locale code, e.g. `"en"` or `"zh_cn"`
    pub fn locale(&self) -> &'static str {
        self.locale
    }

    /// Word at `index`, `None` when `index >= 2048`
    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.language.word_list().get(index as usize).copied()
    }

    /// Index of `word` after NFKD normalization
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.lookup.get(&nfkd(word)).copied()
    }

    /// Split a phrase into normalized words.
    ///
    /// Lowercases, applies NFKD and splits on any run of Unicode whitespace
    /// (which covers the ideographic space used by Japanese phrases).
    pub fn split(&self, phrase: &str) -> Vec<String> {
        nfkd(&phrase.to_lowercase())
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Join words with this locale's separator
    pub fn join<S: AsRef<str>>(&self, words: &[S]) -> String {
        let separator = match self.language {
            Language::Japanese => "\u{3000}",
            _ => " ",
        };
        words
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl std::fmt::Debug for Wordlist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wordlist")
            .field("locale", &self.locale)
            .finish()
    }
}

/// Locale code for a language (the codes wallets commonly use)
pub fn locale_code(language: Language) -> &'static str {
    match language {
        Language::English => "en",
        Language::SimplifiedChinese => "zh_cn",
        Language::TraditionalChinese => "zh_tw",
        Language::Czech => "cz",
        Language::French => "fr",
        Language::Italian => "it",
        Language::Japanese => "ja",
        Language::Korean => "ko",
        Language::Portuguese => "pt",
        Language::Spanish => "es",
    }
}

// ============================================================================
// Registry
// ============================================================================

/// Read-only set of wordlists, looked up by locale code
#[derive(Debug, Clone)]
pub struct WordlistRegistry {
    wordlists: Vec<Wordlist>,
}

impl WordlistRegistry {
    /// Registry holding the given languages
    pub fn with_languages(languages: &[Language]) -> Self {
        Self {
            wordlists: languages.iter().copied().map(Wordlist::new).collect(),
        }
    }

    /// Wordlist for a locale code (case-insensitive, `-` accepted for `_`)
    pub fn get(&self, locale: &str) -> HdResult<&Wordlist> {
        let wanted = locale.trim().to_ascii_lowercase().replace('-', "_");
        self.wordlists
            .iter()
            .find(|w| w.locale == wanted)
            .ok_or_else(|| HdError::UnknownLocale(locale.to_string()))
    }

    /// The English wordlist, if registered
    pub fn english(&self) -> HdResult<&Wordlist> {
        self.get(DEFAULT_LOCALE)
    }

    /// Registered locale codes
    pub fn locales(&self) -> Vec<&'static str> {
        self.wordlists.iter().map(|w| w.locale).collect()
    }
}

impl Default for WordlistRegistry {
    /// Every language the `bip39` crate ships
    fn default() -> Self {
        Self::with_languages(Language::all())
    }
}
