//! Hardened-only derivation paths
//!
//! Paths look like BIP-32 paths (`m/44'/635'/0'`), but ed25519 keys only
//! support hardened children, so every segment is hardened whether or not
//! it carries a `'`, `h` or `H` marker. Displayed paths always use `'`.

use crate::error::{HdError, HdResult};
use std::fmt;
use std::str::FromStr;

/// Top bit of a child number, set for hardened children
pub const HARDENED_BIT: u32 = 0x8000_0000;

/// SLIP-0044 coin type of the chain
pub const COIN_TYPE: u32 = 635;

/// Default account path
pub const DEFAULT_PATH: &str = "m/44'/635'/0'/0";

/// Account path for `index`: `m/44'/635'/{index}'/0/0`
pub fn account_path(index: u32) -> HdResult<String> {
    if index >= HARDENED_BIT {
        return Err(HdError::InvalidPath(format!(
            "account index {} out of range",
            index
        )));
    }
    Ok(format!("m/44'/{}'/{}'/0/0", COIN_TYPE, index))
}

// ============================================================================
// DerivationPath
// ============================================================================

/// Sequence of child indices, absolute (from `m`) or relative to a node.
///
/// Segments are stored without the hardened bit and are always `< 2^31`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    absolute: bool,
    segments: Vec<u32>,
}

impl DerivationPath {
    /// The root path `m`
    pub fn root() -> Self {
        Self {
            absolute: true,
            segments: Vec::new(),
        }
    }

    /// Relative path from raw indices
    pub fn relative(segments: Vec<u32>) -> HdResult<Self> {
        for &index in &segments {
            check_index(index)?;
        }
        Ok(Self {
            absolute: false,
            segments,
        })
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn is_root(&self) -> bool {
        self.absolute && self.segments.is_empty()
    }

    /// Child indices without the hardened bit
    pub fn segments(&self) -> &[u32] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// This path extended by one child
    pub fn child(&self, index: u32) -> Self {
        let mut segments = self.segments.clone();
        segments.push(index & !HARDENED_BIT);
        Self {
            absolute: self.absolute,
            segments,
        }
    }

    /// This path extended by `indices` (hardened bits stripped)
    pub fn extend(&self, indices: &[u32]) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(indices.iter().map(|index| index & !HARDENED_BIT));
        Self {
            absolute: self.absolute,
            segments,
        }
    }

    /// Segments of `self` below `ancestor`, or `None` if `ancestor` is not a
    /// prefix of `self`
    pub fn strip_prefix(&self, ancestor: &DerivationPath) -> Option<&[u32]> {
        if self.absolute != ancestor.absolute {
            return None;
        }
        self.segments.strip_prefix(ancestor.segments.as_slice())
    }
}

fn check_index(index: u32) -> HdResult<u32> {
    if index >= HARDENED_BIT {
        return Err(HdError::InvalidPath(format!(
            "child index {} out of range",
            index
        )));
    }
    Ok(index)
}

fn parse_segment(segment: &str) -> HdResult<u32> {
    let digits = segment
        .strip_suffix(['\'', 'h', 'H'])
        .unwrap_or(segment);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(HdError::InvalidPath(format!(
            "invalid path segment '{}'",
            segment
        )));
    }

    let index: u32 = digits
        .parse()
        .map_err(|_| HdError::InvalidPath(format!("path segment '{}' out of range", segment)))?;
    check_index(index)
}

impl FromStr for DerivationPath {
    type Err = HdError;

    fn from_str(s: &str) -> HdResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HdError::InvalidPath("empty path".to_string()));
        }

        let mut parts = s.split('/').peekable();
        let absolute = matches!(parts.peek(), Some(&"m") | Some(&"M"));
        if absolute {
            parts.next();
        }

        let segments = parts.map(parse_segment).collect::<HdResult<Vec<_>>>()?;

        if !absolute && segments.is_empty() {
            return Err(HdError::InvalidPath("empty path".to_string()));
        }

        Ok(Self { absolute, segments })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        if self.absolute {
            write!(f, "m")?;
            first = false;
        }
        for index in &self.segments {
            if !first {
                write!(f, "/")?;
            }
            write!(f, "{}'", index)?;
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// ChildSpec
// ============================================================================

/// Argument of a child derivation: a bare index or a path
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildSpec {
    /// Next child directly under the node
    Index(u32),
    /// Absolute or relative path
    Path(DerivationPath),
}

impl FromStr for ChildSpec {
    type Err = HdError;

    fn from_str(s: &str) -> HdResult<Self> {
        let s = s.trim();
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            let index: u32 = s
                .parse()
                .map_err(|_| HdError::InvalidPath(format!("child index {} out of range", s)))?;
            return Ok(ChildSpec::Index(check_index(index)?));
        }
        s.parse().map(ChildSpec::Path)
    }
}

impl From<u32> for ChildSpec {
    fn from(index: u32) -> Self {
        ChildSpec::Index(index)
    }
}

impl From<DerivationPath> for ChildSpec {
    fn from(path: DerivationPath) -> Self {
        ChildSpec::Path(path)
    }
}
