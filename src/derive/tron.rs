//! Tron address deriver
//!
//! Same secp256k1/Keccak scheme as EVM chains, but the address is
//! Base58Check over a 0x41-prefixed 20-byte hash. The leading `T` in the
//! textual form falls out of the Base58Check encoding of that prefix, it is
//! never concatenated literally.

use zeroize::Zeroizing;

use crate::crypto::{base58check_encode, keccak256};
use crate::error::CoreResult;
use crate::hd::HdNode;
use crate::path::DerivationPath;
use crate::types::{Chain, DerivedAddress};

/// Mainnet address prefix byte
const TRON_VERSION: u8 = 0x41;

pub fn derive(chain: Chain, node: &HdNode, path: &DerivationPath) -> CoreResult<DerivedAddress> {
    let uncompressed = node.public_key().serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);

    let mut payload = Vec::with_capacity(21);
    payload.push(TRON_VERSION);
    payload.extend_from_slice(&hash[12..]);
    let address = base58check_encode(&payload);

    Ok(DerivedAddress {
        chain,
        address,
        public_key: uncompressed.to_vec(),
        private_key: Zeroizing::new(node.private_key_bytes().to_vec()),
        path: path.to_string(),
    })
}
