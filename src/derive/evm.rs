//! EVM address deriver
//!
//! Address is the last 20 bytes of Keccak-256 over the uncompressed public
//! key without its 0x04 prefix, rendered with the EIP-55 mixed-case
//! checksum. Shared by every chain the registry classifies as `Evm`.

use zeroize::Zeroizing;

use crate::crypto::keccak256;
use crate::error::CoreResult;
use crate::hd::HdNode;
use crate::path::DerivationPath;
use crate::types::{Chain, DerivedAddress};

pub fn derive(chain: Chain, node: &HdNode, path: &DerivationPath) -> CoreResult<DerivedAddress> {
    let uncompressed = node.public_key().serialize_uncompressed();
    // Drop the 0x04 prefix byte before hashing
    let hash = keccak256(&uncompressed[1..]);
    let address = to_checksum_address(&hash[12..]);

    Ok(DerivedAddress {
        chain,
        address,
        public_key: uncompressed.to_vec(),
        private_key: Zeroizing::new(node.private_key_bytes().to_vec()),
        path: path.to_string(),
    })
}

/// EIP-55 checksum encoding: uppercase a hex digit when the corresponding
/// nibble of Keccak-256 of the lowercase address is >= 8
pub fn to_checksum_address(address: &[u8]) -> String {
    let lower = hex::encode(address);
    let hash = keccak256(lower.as_bytes());

    let mut result = String::from("0x");
    for (i, ch) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };

        if ch.is_ascii_digit() {
            result.push(ch);
        } else if nibble >= 8 {
            result.push(ch.to_ascii_uppercase());
        } else {
            result.push(ch);
        }
    }

    result
}
