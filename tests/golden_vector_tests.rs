//! Integration tests against fixed key tree vectors
//!
//! The phrase `abandon x11 about` with an empty passphrase, derived along the
//! account path, plus SLIP-0010 ed25519 test vector 1.

use pokt_hd::{account_path, HdError, KeyNode, Wordlist, HARDENED_BIT};

const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

const ROOT_XPRV: &str = "xprv9s21ZrQH143K4GYBne6aGFZLHUSCPzQ3amKxfzz6kHpqDLBHk58dvPW7twcRFJeo1oQAvNeiYpZEeUkWCW3YgdvXHUcQQU6xjh8jBo4Y8xG";
const ROOT_XPUB: &str = "xpub661MyMwAqRbcGkcetfdadPW4qWGgoT7twzFZUPPiJdMp68WSHcStUBpbk9sbPB88G2CM2xzqiybdX5u1CqkVtSjkmAtphCxBrMCEe7sdq4Q";
const LEAF_XPRV: &str = "xprvA3u8mGAABZX92auUTebtZF4dcyS1TiqUwVcr9V1XoUsBEgq467YRtmebGsVhTM12zYfVUokquSLFKKdohxHFKVwsiDL5Zj1edNLKM2GAXby";
const LEAF_XPUB: &str = "xpub6GtVAmh41w5SF4ywZg8tvP1NB1GVsBZLJiYSwsR9MpQA7VACdergSZy583BgtK6K11WTbnu3Sp4bQwFQDtVMcjjpUEQCaePreV57HLwX2gu";

/// (public key, fingerprint) at depths 1 through 4 of m/44'/635'/0'/0'/0'
const INTERMEDIATE: [(&str, &str); 4] = [
    ("2c1b27e544282334c7d021b46585f42b32fd5dfb391ee443538fdc048d5a120d", "58977429"),
    ("769a264cec2c93833d5210014f1ac1af2350c38f5621155d7665ad46868eaa5e", "02e7d041"),
    ("393aec81cbbd6b91b0be07f7ffeed8401533b9f0ba30a18af2def373a3870044", "f7a68259"),
    ("7512afe3fd8cad6d0f7e3c7a4e3e3c9e0c8b4458de1da4c1a2c53ee416b3dba4", "c86ed065"),
];

fn root() -> KeyNode {
    KeyNode::from_mnemonic(ABANDON_ABOUT, None, &Wordlist::english()).unwrap()
}

#[test]
fn test_root_from_mnemonic() {
    let root = root();
    assert_eq!(
        hex::encode(*root.private_key().unwrap()),
        "560f9f3c94558b6551928bb781cf6092c6b8800b4fc544af2c9444ed126d51aa"
    );
    assert_eq!(
        hex::encode(root.public_key()),
        "e96b1c6b8769fdb0b34fbecfdf85c33b053cecad9517e1ab88cba614335775c1"
    );
    assert_eq!(hex::encode(root.fingerprint()), "8ec3bbf1");
    assert_eq!(
        hex::encode(root.address()),
        "ada8e3423e041d247dca60598e6d3d8834161fe5"
    );
    assert_eq!(root.extended_key(), ROOT_XPRV);
    assert_eq!(root.extended_public_key(), ROOT_XPUB);
}

#[test]
fn test_root_from_seed_matches_mnemonic() {
    let seed = hex::decode(
        "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
         9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4",
    )
    .unwrap();
    let from_seed = KeyNode::from_seed(&seed).unwrap();
    assert_eq!(from_seed.extended_key(), ROOT_XPRV);
    assert!(from_seed.mnemonic().is_none());
}

#[test]
fn test_account_path_leaf() {
    let leaf = root().derive_child(&account_path(0).unwrap()).unwrap();

    // A single call is a single tree step below the root
    assert_eq!(leaf.depth(), 1);
    assert_eq!(leaf.child_number(), HARDENED_BIT);
    assert_eq!(hex::encode(leaf.parent_fingerprint()), "8ec3bbf1");
    assert_eq!(
        hex::encode(*leaf.private_key().unwrap()),
        "d3f0cc25ce9aadc4056ab7d84b02c71ece715f7091d53ffc7f3a70a1225c0733"
    );
    assert_eq!(
        hex::encode(leaf.public_key()),
        "148e6139f8780d8fd4ceaab13803f0856efdde33ca8d0da8619f1312178bd1b6"
    );
    assert_eq!(hex::encode(leaf.fingerprint()), "b74fefec");
    assert_eq!(
        hex::encode(leaf.address()),
        "aa9b781ddffebfa6767f08d199b8ad53735e8b9e"
    );
    assert_ne!(leaf.extended_key(), LEAF_XPRV);
}

#[test]
fn test_stepwise_account_leaf() {
    let root = root();
    let leaf = [44u32, 635, 0, 0, 0]
        .iter()
        .try_fold(root, |node, &index| node.derive_index(index))
        .unwrap();

    assert_eq!(leaf.depth(), 5);
    assert_eq!(hex::encode(leaf.parent_fingerprint()), "c86ed065");
    assert_eq!(hex::encode(leaf.fingerprint()), "b74fefec");
    assert_eq!(leaf.path().unwrap().to_string(), "m/44'/635'/0'/0'/0'");
    assert_eq!(leaf.extended_key(), LEAF_XPRV);
    assert_eq!(leaf.extended_public_key(), LEAF_XPUB);
}

#[test]
fn test_intermediate_nodes() {
    let mut node = root();
    let mut parent_fingerprint = node.fingerprint();
    for (step, (index, (public_key, fingerprint))) in
        [44u32, 635, 0, 0].iter().zip(INTERMEDIATE.iter()).enumerate()
    {
        node = node.derive_index(*index).unwrap();
        assert_eq!(node.depth() as usize, step + 1);
        assert_eq!(node.index(), *index);
        assert_eq!(node.parent_fingerprint(), parent_fingerprint);
        assert_eq!(hex::encode(node.public_key()), *public_key);
        assert_eq!(hex::encode(node.fingerprint()), *fingerprint);
        parent_fingerprint = node.fingerprint();
    }
}

#[test]
fn test_first_hardened_child_xpub() {
    let child = root().derive_child("0").unwrap();
    assert_eq!(
        hex::encode(child.public_key()),
        "b26871edccf7db469c5812977df531ad2f6174dd435f381e6ed2a0556f896fa7"
    );
    assert_eq!(
        child.extended_public_key(),
        "xpub68wMq4M13KE8XqVfjNi8x4uGZ6S7dofrygtLyKMwNtGBEM7B5s6ryJ2b5bmnAaGXpUfaRpAqHbunZLXPDUw11WxRkwijvZSwW5ht6a9WtK1"
    );
}

#[test]
fn test_slip10_vector_1() {
    let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
    let master = KeyNode::from_seed(&seed).unwrap();
    assert_eq!(
        hex::encode(master.chain_code()),
        "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
    );
    assert_eq!(
        hex::encode(master.public_key()),
        "a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
    );

    let child = master.derive_child("m/0'").unwrap();
    assert_eq!(
        hex::encode(*child.private_key().unwrap()),
        "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
    );
    assert_eq!(
        hex::encode(child.public_key()),
        "8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c"
    );
}

#[test]
fn test_decoded_leaf_matches_derived() {
    let decoded = KeyNode::from_extended_key(LEAF_XPRV).unwrap();
    assert_eq!(decoded.depth(), 5);
    assert_eq!(decoded.index(), 0);
    assert!(decoded.is_hardened());
    assert!(decoded.path().is_none());
    assert!(decoded.mnemonic().is_none());
    assert_eq!(
        hex::encode(decoded.public_key()),
        "148e6139f8780d8fd4ceaab13803f0856efdde33ca8d0da8619f1312178bd1b6"
    );

    // Relative paths still work below a node with unknown path
    let below = decoded.derive_child("1'").unwrap();
    assert_eq!(below.depth(), 6);
    assert!(below.path().is_none());
    assert!(matches!(
        decoded.derive_child("m/44'"),
        Err(HdError::InvalidPath(_))
    ));

    let public = KeyNode::from_extended_key(LEAF_XPUB).unwrap();
    assert!(public.is_neutered());
    assert_eq!(public.public_key(), decoded.public_key());
    assert_eq!(public.derive_child("0").unwrap_err(), HdError::NeuteredDerivation);
}

#[test]
fn test_decoded_root_has_no_path() {
    let decoded = KeyNode::from_extended_key(ROOT_XPRV).unwrap();
    assert_eq!(decoded.depth(), 0);
    assert!(decoded.path().is_none());

    // Absolute paths still resolve from a decoded root
    let leaf = decoded.derive_child(&account_path(0).unwrap()).unwrap();
    assert_eq!(leaf.depth(), 1);
    assert!(leaf.path().is_none());
    assert_eq!(
        hex::encode(leaf.public_key()),
        "148e6139f8780d8fd4ceaab13803f0856efdde33ca8d0da8619f1312178bd1b6"
    );
}

#[test]
fn test_from_mnemonic_is_deterministic() {
    let a = root();
    let b = root();
    assert_eq!(*a.private_key().unwrap(), *b.private_key().unwrap());
    assert_eq!(a.chain_code(), b.chain_code());
    assert_eq!(a.fingerprint(), b.fingerprint());
}
