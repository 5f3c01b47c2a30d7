//! BIP-39 seed derivation
//!
//! `seed = PBKDF2-HMAC-SHA512(NFKD(phrase), "mnemonic" + NFKD(passphrase), 2048, 64)`

use crate::crypto::wordlist::nfkd;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use zeroize::Zeroizing;

/// PBKDF2 rounds fixed by BIP-39
pub const PBKDF2_ROUNDS: u32 = 2048;

/// Seed length in bytes
pub const SEED_LEN: usize = 64;

const SALT_PREFIX: &str = "mnemonic";

/// Stretch a phrase and optional passphrase into a 64-byte seed.
///
/// The phrase is used as given (after NFKD); it is not checked against a
/// wordlist. A missing passphrase is the empty string.
pub fn mnemonic_to_seed(phrase: &str, passphrase: Option<&str>) -> Zeroizing<[u8; SEED_LEN]> {
    let password = Zeroizing::new(nfkd(phrase));
    let salt = Zeroizing::new(nfkd(&format!(
        "{}{}",
        SALT_PREFIX,
        passphrase.unwrap_or("")
    )));

    let mut seed = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(
        password.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ROUNDS,
        &mut seed[..],
    );
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_seed_vector_empty_passphrase() {
        let seed = mnemonic_to_seed(ABANDON_ABOUT, None);
        assert_eq!(
            hex::encode(&seed[..]),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
        assert_eq!(*seed, *mnemonic_to_seed(ABANDON_ABOUT, Some("")));
    }

    #[test]
    fn test_seed_vector_trezor_passphrase() {
        let seed = mnemonic_to_seed(ABANDON_ABOUT, Some("TREZOR"));
        assert_eq!(
            hex::encode(&seed[..]),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_passphrase_is_normalized() {
        // "é" precomposed vs. "e" + combining acute
        let composed = mnemonic_to_seed(ABANDON_ABOUT, Some("caf\u{e9}"));
        let decomposed = mnemonic_to_seed(ABANDON_ABOUT, Some("cafe\u{301}"));
        assert_eq!(*composed, *decomposed);
    }
}
