//! HD Key Tree Nodes for ed25519
//!
//! A [`KeyNode`] is one node of a SLIP-0010 ed25519 key tree: key material,
//! chain code and the metadata needed to place it in the tree. Nodes are
//! immutable; deriving, neutering or parsing always builds a new node.
//!
//! ## Key Insight
//!
//! ed25519 has no public-key child derivation, so every child is hardened
//! and only nodes holding a private key can have children. A neutered node
//! is a leaf as far as this crate is concerned.
//!
//! ## Usage
//!
//! ```ignore
//! let wordlist = Wordlist::english();
//! let root = KeyNode::from_mnemonic(phrase, None, &wordlist)?;
//! let account = root.derive_child(&account_path(0)?)?;
//! println!("{}", hex::encode(account.address()));
//! ```

use crate::crypto::hash::{address, fingerprint, ADDRESS_LEN, FINGERPRINT_LEN};
use crate::crypto::mnemonic::Mnemonic;
use crate::crypto::path::{ChildSpec, DerivationPath, HARDENED_BIT};
use crate::crypto::seed::mnemonic_to_seed;
use crate::crypto::slip10;
use crate::crypto::wordlist::Wordlist;
use crate::crypto::xkey;
use crate::error::{HdError, HdResult};
use ed25519_dalek::SigningKey;
use tracing::debug;
use zeroize::Zeroizing;

/// Smallest accepted seed length in bytes
pub const MIN_SEED_LEN: usize = 16;

/// Largest accepted seed length in bytes
pub const MAX_SEED_LEN: usize = 64;

// ============================================================================
// Data Structures
// ============================================================================

/// One node of the key tree
#[derive(Clone)]
pub struct KeyNode {
    /// Private key; `None` for a neutered node
    signing_key: Option<SigningKey>,
    public_key: [u8; 32],
    chain_code: [u8; 32],
    fingerprint: [u8; FINGERPRINT_LEN],
    parent_fingerprint: [u8; FINGERPRINT_LEN],
    /// Child number as serialized, hardened bit included
    child_number: u32,
    depth: u8,
    mnemonic: Option<Mnemonic>,
    path: Option<DerivationPath>,
}

/// Position of a node in the tree, shared by both constructors
pub(crate) struct NodeMeta {
    pub parent_fingerprint: [u8; FINGERPRINT_LEN],
    pub child_number: u32,
    pub depth: u8,
    pub mnemonic: Option<Mnemonic>,
    pub path: Option<DerivationPath>,
}

impl NodeMeta {
    fn root(mnemonic: Option<Mnemonic>) -> Self {
        Self {
            parent_fingerprint: [0u8; FINGERPRINT_LEN],
            child_number: 0,
            depth: 0,
            mnemonic,
            path: Some(DerivationPath::root()),
        }
    }
}

impl KeyNode {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Full node from a 32-byte private key; the public key is derived here
    pub(crate) fn with_private_key(key: &[u8; 32], chain_code: [u8; 32], meta: NodeMeta) -> Self {
        let signing_key = SigningKey::from_bytes(key);
        let public_key = signing_key.verifying_key().to_bytes();
        Self {
            signing_key: Some(signing_key),
            fingerprint: fingerprint(&public_key),
            public_key,
            chain_code,
            parent_fingerprint: meta.parent_fingerprint,
            child_number: meta.child_number,
            depth: meta.depth,
            mnemonic: meta.mnemonic,
            path: meta.path,
        }
    }

    /// Neutered node from a public key
    pub(crate) fn with_public_key(public_key: [u8; 32], chain_code: [u8; 32], meta: NodeMeta) -> Self {
        Self {
            signing_key: None,
            fingerprint: fingerprint(&public_key),
            public_key,
            chain_code,
            parent_fingerprint: meta.parent_fingerprint,
            child_number: meta.child_number,
            depth: meta.depth,
            mnemonic: meta.mnemonic,
            path: meta.path,
        }
    }

    /// Root node from a 16 to 64 byte seed
    pub fn from_seed(seed: &[u8]) -> HdResult<Self> {
        Self::root_from_seed(seed, None)
    }

    fn root_from_seed(seed: &[u8], mnemonic: Option<Mnemonic>) -> HdResult<Self> {
        if !(MIN_SEED_LEN..=MAX_SEED_LEN).contains(&seed.len()) {
            return Err(HdError::InvalidSeed(seed.len()));
        }

        let master = slip10::master_key(seed);
        let node = Self::with_private_key(&master.key, master.chain_code, NodeMeta::root(mnemonic));
        debug!(fingerprint = %hex::encode(node.fingerprint), "created root node");
        Ok(node)
    }

    /// Root node from a phrase and optional passphrase.
    ///
    /// The phrase is validated and canonicalized first; the root carries it
    /// as provenance with path `m`.
    pub fn from_mnemonic(
        phrase: &str,
        passphrase: Option<&str>,
        wordlist: &Wordlist,
    ) -> HdResult<Self> {
        let mnemonic = Mnemonic::parse(phrase, wordlist)?;
        let seed = mnemonic_to_seed(mnemonic.phrase(), passphrase);
        let mnemonic = mnemonic.with_path(DerivationPath::root());
        Self::root_from_seed(&seed[..], Some(mnemonic))
    }

    /// Node from a serialized extended key (path and mnemonic unknown)
    pub fn from_extended_key(extended_key: &str) -> HdResult<Self> {
        xkey::decode(extended_key)
    }

    // ========================================================================
    // Derivation
    // ========================================================================

    /// Derive from a bare index (`"5"`) or a path (`"m/44'/635'/0'"`, `"0'/1"`)
    pub fn derive_child(&self, path_or_index: &str) -> HdResult<Self> {
        match path_or_index.parse::<ChildSpec>()? {
            ChildSpec::Index(index) => self.derive_index(index),
            ChildSpec::Path(path) => self.derive_path(&path),
        }
    }

    /// Hardened child at `index` directly under this node.
    ///
    /// `index` is the child position without the hardened bit, so it must be
    /// below 2^31.
    pub fn derive_index(&self, index: u32) -> HdResult<Self> {
        self.derive_segments(&[index])
    }

    /// One derivation step along `path`.
    ///
    /// The key and chain code come from hardened derivation through every
    /// remaining segment, but the result is always a direct child of this
    /// node: `depth + 1`, this node's fingerprint as parent, and the last
    /// segment as its index.
    ///
    /// A relative path extends this node. An absolute path must run through
    /// this node: its leading segments have to equal this node's own path,
    /// and only the rest is derived. A depth-0 node with unknown path counts
    /// as `m`.
    pub fn derive_path(&self, path: &DerivationPath) -> HdResult<Self> {
        let segments = self.segments_below(path)?;
        if segments.is_empty() {
            return Err(HdError::InvalidPath(format!(
                "'{}' leaves nothing to derive below this node",
                path
            )));
        }
        self.derive_segments(segments)
    }

    fn derive_segments(&self, segments: &[u32]) -> HdResult<Self> {
        let signing_key = self
            .signing_key
            .as_ref()
            .ok_or(HdError::NeuteredDerivation)?;

        let Some((&index, _)) = segments.split_last() else {
            return Err(HdError::InvalidPath("empty path".to_string()));
        };
        if let Some(&bad) = segments.iter().find(|&&i| i >= HARDENED_BIT) {
            return Err(HdError::InvalidPath(format!(
                "child index {} out of range",
                bad
            )));
        }
        let depth = self.depth.checked_add(1).ok_or(HdError::DepthOverflow)?;

        let mut key = Zeroizing::new(signing_key.to_bytes());
        let mut chain_code = self.chain_code;
        for &segment in segments {
            let derived = slip10::derive_hardened(&key, &chain_code, segment);
            key = derived.key;
            chain_code = derived.chain_code;
        }

        let path = self.path.as_ref().map(|p| p.extend(segments));
        let mnemonic = match (&self.mnemonic, &path) {
            (Some(m), Some(p)) => Some(m.with_path(p.clone())),
            _ => None,
        };

        let child = Self::with_private_key(
            &key,
            chain_code,
            NodeMeta {
                parent_fingerprint: self.fingerprint,
                child_number: index | HARDENED_BIT,
                depth,
                mnemonic,
                path,
            },
        );

        debug!(
            depth,
            index,
            steps = segments.len(),
            path = ?child.path.as_ref().map(ToString::to_string),
            fingerprint = %hex::encode(child.fingerprint),
            "derived child node"
        );
        Ok(child)
    }

    fn segments_below<'a>(&self, path: &'a DerivationPath) -> HdResult<&'a [u32]> {
        if !path.is_absolute() {
            return Ok(path.segments());
        }

        let own = match &self.path {
            Some(own) => own.clone(),
            None if self.depth == 0 => DerivationPath::root(),
            None => {
                return Err(HdError::InvalidPath(format!(
                    "cannot resolve absolute path '{}' from a node with unknown path",
                    path
                )))
            }
        };

        path.strip_prefix(&own).ok_or_else(|| {
            HdError::InvalidPath(format!("'{}' does not descend from '{}'", path, own))
        })
    }

    /// The same node without its private key (and without the phrase,
    /// which would reveal it)
    pub fn neuter(&self) -> Self {
        Self {
            signing_key: None,
            public_key: self.public_key,
            chain_code: self.chain_code,
            fingerprint: self.fingerprint,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            depth: self.depth,
            mnemonic: None,
            path: self.path.clone(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Base58Check extended key (`xprv…` for full nodes, `xpub…` otherwise)
    pub fn extended_key(&self) -> String {
        xkey::encode(self)
    }

    /// Base58Check extended public key
    pub fn extended_public_key(&self) -> String {
        xkey::encode(&self.neuter())
    }

    pub fn is_neutered(&self) -> bool {
        self.signing_key.is_none()
    }

    /// 32-byte private key, `None` when neutered
    pub fn private_key(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.signing_key
            .as_ref()
            .map(|key| Zeroizing::new(key.to_bytes()))
    }

    /// 64-byte `private ‖ public` secret key as used by ed25519 tooling,
    /// `None` when neutered
    pub fn keypair_bytes(&self) -> Option<Zeroizing<[u8; 64]>> {
        self.signing_key
            .as_ref()
            .map(|key| Zeroizing::new(key.to_keypair_bytes()))
    }

    pub(crate) fn signing_key(&self) -> Option<&SigningKey> {
        self.signing_key.as_ref()
    }

    pub fn public_key(&self) -> &[u8; 32] {
        &self.public_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// First four bytes of HASH160(public key)
    pub fn fingerprint(&self) -> [u8; FINGERPRINT_LEN] {
        self.fingerprint
    }

    pub fn parent_fingerprint(&self) -> [u8; FINGERPRINT_LEN] {
        self.parent_fingerprint
    }

    /// Child position within the parent, hardened bit stripped
    pub fn index(&self) -> u32 {
        self.child_number & !HARDENED_BIT
    }

    /// Child number as serialized (hardened bit set for derived nodes)
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn is_hardened(&self) -> bool {
        self.child_number & HARDENED_BIT != 0
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn mnemonic(&self) -> Option<&Mnemonic> {
        self.mnemonic.as_ref()
    }

    pub fn path(&self) -> Option<&DerivationPath> {
        self.path.as_ref()
    }

    /// Account address: first 20 bytes of SHA256(public key)
    pub fn address(&self) -> [u8; ADDRESS_LEN] {
        address(&self.public_key)
    }
}

impl std::fmt::Debug for KeyNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyNode")
            .field("private_key", &self.signing_key.as_ref().map(|_| "[REDACTED]"))
            .field("public_key", &hex::encode(self.public_key))
            .field("fingerprint", &hex::encode(self.fingerprint))
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_number", &self.child_number)
            .field("depth", &self.depth)
            .field("path", &self.path.as_ref().map(ToString::to_string))
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
