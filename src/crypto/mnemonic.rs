//! BIP-39 Mnemonic Codec
//!
//! Converts entropy to a word phrase and back. The phrase encodes
//! `entropy ‖ checksum` in 11-bit groups, where the checksum is the top
//! `entropy_len / 4` bits of SHA-256(entropy).
//!
//! | entropy bytes | checksum bits | words |
//! |---------------|---------------|-------|
//! | 16            | 4             | 12    |
//! | 20            | 5             | 15    |
//! | 24            | 6             | 18    |
//! | 28            | 7             | 21    |
//! | 32            | 8             | 24    |
//!
//! ## Usage
//!
//! ```ignore
//! let wordlist = Wordlist::english();
//! let phrase = entropy_to_mnemonic(&[0u8; 16], &wordlist)?;
//! let entropy = mnemonic_to_entropy(&phrase, &wordlist)?;
//! ```

use crate::crypto::bits::{pack_indices, unpack_indices, upper_mask};
use crate::crypto::hash::sha256;
use crate::crypto::path::DerivationPath;
use crate::crypto::wordlist::Wordlist;
use crate::error::{HdError, HdResult};
use rand::RngCore;
use tracing::trace;
use zeroize::{Zeroize, Zeroizing};

/// Smallest allowed entropy length in bytes
pub const MIN_ENTROPY_LEN: usize = 16;

/// Largest allowed entropy length in bytes
pub const MAX_ENTROPY_LEN: usize = 32;

// ============================================================================
// Mnemonic value
// ============================================================================

/// A phrase together with where it came from.
///
/// `path` is the derivation path of the node the phrase is attached to,
/// `None` for a bare phrase. The phrase is zeroized on drop.
#[derive(Clone)]
pub struct Mnemonic {
    phrase: Zeroizing<String>,
    path: Option<DerivationPath>,
    locale: &'static str,
}

impl Mnemonic {
    /// Parse and canonicalize a phrase.
    ///
    /// The phrase is decoded (verifying the checksum) and re-encoded, so
    /// case and spacing variants of the same phrase give the same value.
    pub fn parse(phrase: &str, wordlist: &Wordlist) -> HdResult<Self> {
        let entropy = mnemonic_to_entropy(phrase, wordlist)?;
        let phrase = entropy_to_mnemonic(&entropy, wordlist)?;
        Ok(Self {
            phrase: Zeroizing::new(phrase),
            path: None,
            locale: wordlist.locale(),
        })
    }

    /// The same phrase attached to a derivation path
    pub fn with_path(&self, path: DerivationPath) -> Self {
        Self {
            phrase: self.phrase.clone(),
            path: Some(path),
            locale: self.locale,
        }
    }

    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn path(&self) -> Option<&DerivationPath> {
        self.path.as_ref()
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn word_count(&self) -> usize {
        self.phrase.split_whitespace().count()
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mnemonic")
            .field("phrase", &"[REDACTED]")
            .field("path", &self.path.as_ref().map(ToString::to_string))
            .field("locale", &self.locale)
            .finish()
    }
}

// ============================================================================
// Codec
// ============================================================================

fn checksum_bits(entropy_len: usize) -> u32 {
    (entropy_len / 4) as u32
}

/// Top `entropy_len / 4` bits of SHA-256(entropy), left-aligned in a byte
fn checksum(entropy: &[u8]) -> u8 {
    sha256(entropy)[0] & upper_mask(checksum_bits(entropy.len()))
}

fn check_entropy_len(len: usize) -> HdResult<()> {
    if len % 4 != 0 || !(MIN_ENTROPY_LEN..=MAX_ENTROPY_LEN).contains(&len) {
        return Err(HdError::InvalidEntropy(len));
    }
    Ok(())
}

/// Encode entropy as a phrase in `wordlist`
pub fn entropy_to_mnemonic(entropy: &[u8], wordlist: &Wordlist) -> HdResult<String> {
    check_entropy_len(entropy.len())?;

    let bits = checksum_bits(entropy.len());
    let mut indices = pack_indices(entropy, checksum(entropy), bits);

    let words = indices
        .iter()
        .map(|&index| {
            wordlist
                .word(index)
                .ok_or_else(|| HdError::InvalidMnemonic(format!("word index {} out of range", index)))
        })
        .collect::<HdResult<Vec<_>>>();
    indices.zeroize();

    let words = words?;
    trace!(words = words.len(), locale = wordlist.locale(), "encoded mnemonic");
    Ok(wordlist.join(&words))
}

/// Decode a phrase back to its entropy, verifying the checksum.
///
/// Fails with [`HdError::InvalidMnemonic`] for a bad word count or an
/// unknown word, and [`HdError::InvalidChecksum`] when the words are valid
/// but the embedded checksum does not match.
pub fn mnemonic_to_entropy(phrase: &str, wordlist: &Wordlist) -> HdResult<Zeroizing<Vec<u8>>> {
    let words = Zeroizing::new(wordlist.split(phrase));
    if words.is_empty() || words.len() % 3 != 0 {
        return Err(HdError::InvalidMnemonic(format!(
            "word count {} is not a multiple of 3",
            words.len()
        )));
    }

    let entropy_len = 4 * words.len() / 3;
    if check_entropy_len(entropy_len).is_err() {
        return Err(HdError::InvalidMnemonic(format!(
            "word count {} (expected 12, 15, 18, 21 or 24)",
            words.len()
        )));
    }

    let mut indices = Vec::with_capacity(words.len());
    for (position, word) in words.iter().enumerate() {
        match wordlist.index_of(word) {
            Some(index) => indices.push(index),
            None => {
                indices.zeroize();
                return Err(HdError::InvalidMnemonic(format!(
                    "word #{} is not in the {} wordlist",
                    position + 1,
                    wordlist.locale()
                )));
            }
        }
    }

    let stream = Zeroizing::new(unpack_indices(&indices));
    indices.zeroize();

    let entropy = Zeroizing::new(stream[..entropy_len].to_vec());
    let mask = upper_mask(checksum_bits(entropy_len));
    let embedded = stream[entropy_len] & mask;

    if checksum(&entropy) != embedded {
        return Err(HdError::InvalidChecksum);
    }

    Ok(entropy)
}

/// Whether `phrase` decodes in `wordlist` with a valid checksum
pub fn is_valid_mnemonic(phrase: &str, wordlist: &Wordlist) -> bool {
    mnemonic_to_entropy(phrase, wordlist).is_ok()
}

/// Entropy length in bytes for a word count
pub fn word_count_to_entropy_len(word_count: usize) -> HdResult<usize> {
    match word_count {
        12 | 15 | 18 | 21 | 24 => Ok(word_count / 3 * 4),
        _ => Err(HdError::InvalidMnemonic(format!(
            "word count {} (expected 12, 15, 18, 21 or 24)",
            word_count
        ))),
    }
}

/// Generate a fresh random phrase with `word_count` words.
///
/// Entropy is zeroized after encoding.
pub fn generate_mnemonic(word_count: usize, wordlist: &Wordlist) -> HdResult<Mnemonic> {
    let len = word_count_to_entropy_len(word_count)?;
    let mut entropy = Zeroizing::new(vec![0u8; len]);
    rand::thread_rng().fill_bytes(&mut entropy);

    let phrase = entropy_to_mnemonic(&entropy, wordlist)?;
    Ok(Mnemonic {
        phrase: Zeroizing::new(phrase),
        path: None,
        locale: wordlist.locale(),
    })
}

// ============================================================================
// Tests
// ============================================================================
