//! BIP-32/44 Derivation Paths
//!
//! Parses and renders paths of the form `m/44'/60'/0'/0/0`. Hardened
//! segments accept `'`, `h`, or `H` suffixes.

use crate::error::{CoreError, CoreResult};

/// Hardened offset for BIP-32 derivation (2^31)
pub const HARDENED: u32 = 0x8000_0000;

/// Single segment of a derivation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNumber {
    pub index: u32,
    pub hardened: bool,
}

impl ChildNumber {
    /// Index must be below 2^31; the hardened bit is carried separately.
    pub fn new(index: u32, hardened: bool) -> CoreResult<Self> {
        if index >= HARDENED {
            return Err(CoreError::invalid_input(format!(
                "Path index {} exceeds 2^31 - 1",
                index
            )));
        }
        Ok(Self { index, hardened })
    }

    pub fn hardened(index: u32) -> CoreResult<Self> {
        Self::new(index, true)
    }

    pub fn normal(index: u32) -> CoreResult<Self> {
        Self::new(index, false)
    }

    /// Full 32-bit index including the hardened bit
    pub fn raw_index(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED
        } else {
            self.index
        }
    }
}

impl std::fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// Ordered sequence of path segments below the master node
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivationPath {
    segments: Vec<ChildNumber>,
}

impl DerivationPath {
    pub fn new(segments: Vec<ChildNumber>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[ChildNumber] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when every segment is hardened (required for SLIP-0010 ed25519)
    pub fn all_hardened(&self) -> bool {
        self.segments.iter().all(|c| c.hardened)
    }
}

impl std::fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for DerivationPath {
    type Err = CoreError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();

        // Bare "m" is the master node itself: an empty path
        if trimmed == "m" || trimmed == "M" {
            return Ok(DerivationPath::default());
        }

        let rest = trimmed
            .strip_prefix("m/")
            .or_else(|| trimmed.strip_prefix("M/"))
            .ok_or_else(|| CoreError::invalid_input("Derivation path must start with 'm'"))?;

        if rest.is_empty() {
            return Err(CoreError::invalid_input("Empty path component"));
        }

        let mut segments = Vec::new();
        for part in rest.split('/') {
            segments.push(parse_segment(part)?);
        }

        Ok(DerivationPath::new(segments))
    }
}

fn parse_segment(s: &str) -> CoreResult<ChildNumber> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CoreError::invalid_input("Empty path component"));
    }

    let (number, hardened) =
        if let Some(stripped) = trimmed.strip_suffix(&['\'', 'h', 'H'][..]) {
            (stripped, true)
        } else {
            (trimmed, false)
        };

    let index: u32 = number
        .parse()
        .map_err(|_| CoreError::invalid_input(format!("Invalid path component '{}'", s)))?;

    ChildNumber::new(index, hardened)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_standard_path() {
        let path = DerivationPath::from_str("m/44'/60'/0'/0/0").unwrap();
        assert_eq!(path.segments().len(), 5);
        assert_eq!(path.segments()[0], ChildNumber::hardened(44).unwrap());
        assert_eq!(path.segments()[1], ChildNumber::hardened(60).unwrap());
        assert_eq!(path.segments()[4], ChildNumber::normal(0).unwrap());
    }

    #[test]
    fn test_parse_h_suffix() {
        let a = DerivationPath::from_str("m/44'/0'/0'").unwrap();
        let b = DerivationPath::from_str("m/44h/0H/0'").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_roundtrip() {
        let rendered = DerivationPath::from_str("m/44'/501'/7'/0'")
            .unwrap()
            .to_string();
        assert_eq!(rendered, "m/44'/501'/7'/0'");
    }

    #[test]
    fn test_bare_master_is_empty_path() {
        let path = DerivationPath::from_str("m").unwrap();
        assert!(path.is_empty());
        assert_eq!(path.to_string(), "m");
        // Round-trips through its own rendering
        assert_eq!(DerivationPath::from_str(&path.to_string()).unwrap(), path);
        assert!(DerivationPath::from_str("M").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_malformed_paths() {
        assert!(DerivationPath::from_str("44'/0'/0'").is_err());
        assert!(DerivationPath::from_str("m/").is_err());
        assert!(DerivationPath::from_str("m/44'/abc/0").is_err());
        // Index with the hardened bit already set is out of range
        assert!(DerivationPath::from_str("m/2147483648").is_err());
    }

    #[test]
    fn test_all_hardened() {
        assert!(DerivationPath::from_str("m/44'/501'/0'/0'")
            .unwrap()
            .all_hardened());
        assert!(!DerivationPath::from_str("m/44'/60'/0'/0/0")
            .unwrap()
            .all_hardened());
    }

    #[test]
    fn test_raw_index_sets_top_bit() {
        assert_eq!(ChildNumber::hardened(0).unwrap().raw_index(), 0x8000_0000);
        assert_eq!(
            ChildNumber::hardened(44).unwrap().raw_index(),
            0x8000_002c
        );
        assert_eq!(ChildNumber::normal(7).unwrap().raw_index(), 7);
    }
}
