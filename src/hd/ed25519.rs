//! SLIP-0010 key tree over Ed25519
//!
//! Only hardened derivation is defined for this curve, so every path segment
//! must carry the hardened bit. The 32-byte node key feeds directly into
//! `ed25519_dalek::SigningKey`.

use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{CoreError, CoreResult};
use crate::path::{ChildNumber, DerivationPath};

type HmacSha512 = Hmac<Sha512>;

/// One node of the SLIP-0010 Ed25519 tree
pub struct Slip10Node {
    key: Zeroizing<[u8; 32]>,
    pub chain_code: [u8; 32],
}

// Manual impl: the private key must never reach logs or panic messages
impl std::fmt::Debug for Slip10Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slip10Node")
            .field("key", &"<redacted>")
            .field("chain_code", &hex::encode(self.chain_code))
            .finish()
    }
}

impl Slip10Node {
    /// Master node: HMAC-SHA512 with key "ed25519 seed" over the seed
    pub fn from_seed(seed: &[u8]) -> CoreResult<Self> {
        let mut mac = HmacSha512::new_from_slice(b"ed25519 seed")
            .map_err(|e| CoreError::internal(format!("HMAC init failed: {}", e)))?;
        mac.update(seed);
        let digest = mac.finalize().into_bytes();
        let (il, ir) = digest.split_at(32);

        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(il);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self { key, chain_code })
    }

    /// Derive one child; non-hardened segments are invalid on this curve
    pub fn derive_child(&self, child: ChildNumber) -> CoreResult<Self> {
        if !child.hardened {
            return Err(CoreError::invalid_derivation(
                "Ed25519 supports hardened derivation only",
            ));
        }

        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|e| CoreError::internal(format!("HMAC init failed: {}", e)))?;
        // SLIP-0010: 0x00 || k_par || ser32(i | 2^31)
        mac.update(&[0u8]);
        mac.update(self.key.as_ref());
        mac.update(&child.raw_index().to_be_bytes());

        let digest = mac.finalize().into_bytes();
        let (il, ir) = digest.split_at(32);

        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(il);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self { key, chain_code })
    }

    pub fn derive_path(&self, path: &DerivationPath) -> CoreResult<Self> {
        if !path.all_hardened() {
            return Err(CoreError::invalid_derivation(format!(
                "Ed25519 path must be fully hardened: {}",
                path
            )));
        }
        let mut node = Self {
            key: self.key.clone(),
            chain_code: self.chain_code,
        };
        for segment in path.segments() {
            node = node.derive_child(*segment)?;
        }
        Ok(node)
    }

    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from_bytes(&self.key)
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.signing_key().verifying_key().to_bytes()
    }

    pub fn private_key_bytes(&self) -> [u8; 32] {
        *self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // SLIP-0010 test vector 1 for Ed25519
    const VECTOR_SEED: &str = "000102030405060708090a0b0c0d0e0f";

    fn vector_root() -> Slip10Node {
        Slip10Node::from_seed(&hex::decode(VECTOR_SEED).unwrap()).unwrap()
    }

    #[test]
    fn test_master_node_vector() {
        let root = vector_root();
        assert_eq!(
            hex::encode(root.private_key_bytes()),
            "2b4be7f19ee27bbf30c667b642d5f4aa69fd169872f8fc3059c08ebae2eb19e7"
        );
        assert_eq!(
            hex::encode(root.chain_code),
            "90046a93de5380a72b5e45010748567d5ea02bbf6522f979e05c0d8d8ca9fffb"
        );
        assert_eq!(
            hex::encode(root.public_key()),
            "a4b2856bfec510abab89753fac1ac0e1112364e7d250545963f135f2a33188ed"
        );
    }

    #[test]
    fn test_vector_m0h() {
        let node = vector_root()
            .derive_child(ChildNumber::hardened(0).unwrap())
            .unwrap();
        assert_eq!(
            hex::encode(node.private_key_bytes()),
            "68e0fe46dfb67e368c75379acec591dad19df3cde26e63b93a8e704f1dade7a3"
        );
        assert_eq!(
            hex::encode(node.chain_code),
            "8b59aa11380b624e81507a27fedda59fea6d0b779a778918a2fd3590e16e9c69"
        );
        assert_eq!(
            hex::encode(node.public_key()),
            "8c8a13df77a28f3445213a0f432fde644acaa215fc72dcdf300d5efaa85d350c"
        );
    }

    #[test]
    fn test_vector_deep_path() {
        // m/0'/1'/2'/2'/1000000000' from the published vector
        let path = DerivationPath::from_str("m/0'/1'/2'/2'/1000000000'").unwrap();
        let node = vector_root().derive_path(&path).unwrap();
        assert_eq!(
            hex::encode(node.private_key_bytes()),
            "8f94d394a8e8fd6b1bc2f3f49f5c47e385281d5c17e65324b0f62483e37e8793"
        );
        assert_eq!(
            hex::encode(node.public_key()),
            "3c24da049451555d51a7014a37337aa4e12d41e485abccfa46b47dfb2af54b7a"
        );
    }

    #[test]
    fn test_rejects_non_hardened() {
        let err = vector_root()
            .derive_child(ChildNumber::normal(0).unwrap())
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::InvalidDerivation);

        let mixed = DerivationPath::from_str("m/44'/501'/0'/0").unwrap();
        assert!(vector_root().derive_path(&mixed).is_err());
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let root = vector_root();
        let rendered = format!("{:?}", root);
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(&hex::encode(root.private_key_bytes())));
    }
}
