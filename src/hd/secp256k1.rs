//! BIP-32 key tree over secp256k1
//!
//! Child derivation follows the standard exactly: hardened children commit
//! to the parent private key, normal children to the serialized parent
//! public key, and the child key is `(IL + k_par) mod n`.

use hmac::{Hmac, Mac};
use lazy_static::lazy_static;
use secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;

use crate::crypto::hash160;
use crate::error::{CoreError, CoreResult};
use crate::path::{ChildNumber, DerivationPath};

type HmacSha512 = Hmac<Sha512>;

lazy_static! {
    /// Shared signing/verification context; creating one per call is wasteful
    pub(crate) static ref SECP: Secp256k1<All> = Secp256k1::new();
}

/// One node of the BIP-32 tree: key material plus position metadata
#[derive(Debug, Clone)]
pub struct HdNode {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_index: u32,
    pub chain_code: [u8; 32],
    private_key: SecretKey,
}

impl HdNode {
    /// Master node: HMAC-SHA512 with key "Bitcoin seed" over the seed
    pub fn from_seed(seed: &[u8]) -> CoreResult<Self> {
        if seed.len() < 16 || seed.len() > 64 {
            return Err(CoreError::invalid_input(format!(
                "Seed must be 16..=64 bytes, got {}",
                seed.len()
            )));
        }

        let mut mac = HmacSha512::new_from_slice(b"Bitcoin seed")
            .map_err(|e| CoreError::internal(format!("HMAC init failed: {}", e)))?;
        mac.update(seed);
        let digest = mac.finalize().into_bytes();
        let (il, ir) = digest.split_at(32);

        let private_key = SecretKey::from_slice(il)
            .map_err(|_| CoreError::invalid_derivation("Master key outside curve order"))?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
            chain_code,
            private_key,
        })
    }

    /// Derive one child.
    ///
    /// Fails with `InvalidDerivation` when IL falls outside the curve order
    /// or the resulting key is zero. Per BIP-32 this is a ~1 in 2^127 event;
    /// it is surfaced, never retried, since the path is fixed.
    pub fn derive_child(&self, child: ChildNumber) -> CoreResult<Self> {
        let raw_index = child.raw_index();

        let mut mac = HmacSha512::new_from_slice(&self.chain_code)
            .map_err(|e| CoreError::internal(format!("HMAC init failed: {}", e)))?;

        if child.hardened {
            // 0x00 || ser256(k_par) || ser32(i)
            mac.update(&[0u8]);
            mac.update(&self.private_key.secret_bytes());
        } else {
            // serP(point(k_par)) || ser32(i)
            mac.update(&self.public_key().serialize());
        }
        mac.update(&raw_index.to_be_bytes());

        let digest = mac.finalize().into_bytes();
        let (il, ir) = digest.split_at(32);

        let mut il_bytes = [0u8; 32];
        il_bytes.copy_from_slice(il);
        let tweak = Scalar::from_be_bytes(il_bytes).map_err(|_| {
            CoreError::invalid_derivation(format!("IL >= curve order at index {}", child))
        })?;

        let private_key = self.private_key.add_tweak(&tweak).map_err(|_| {
            CoreError::invalid_derivation(format!("Zero child key at index {}", child))
        })?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        Ok(Self {
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: self.fingerprint(),
            child_index: raw_index,
            chain_code,
            private_key,
        })
    }

    /// Fold `derive_child` over every segment of the path
    pub fn derive_path(&self, path: &DerivationPath) -> CoreResult<Self> {
        let mut node = self.clone();
        for segment in path.segments() {
            node = node.derive_child(*segment)?;
        }
        Ok(node)
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&SECP, &self.private_key)
    }

    pub fn private_key_bytes(&self) -> [u8; 32] {
        self.private_key.secret_bytes()
    }

    /// First four bytes of hash160 of the compressed public key
    pub fn fingerprint(&self) -> [u8; 4] {
        let hash = hash160(&self.public_key().serialize());
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&hash[..4]);
        fp
    }
}
