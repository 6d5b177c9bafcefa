//! Ed25519/Base58 family deriver (Solana and similar)
//!
//! The address is simply the Base58-encoded 32-byte public key; Base58
//! carries no checksum here, the chain accepts any 32-byte point encoding.
//! Keys come from the SLIP-0010 tree, never from the secp256k1 tree.

use zeroize::Zeroizing;

use crate::error::CoreResult;
use crate::hd::Slip10Node;
use crate::path::DerivationPath;
use crate::types::{Chain, DerivedAddress};

pub fn derive(
    chain: Chain,
    node: &Slip10Node,
    path: &DerivationPath,
) -> CoreResult<DerivedAddress> {
    let public_key = node.public_key();
    let address = bs58::encode(public_key).into_string();

    Ok(DerivedAddress {
        chain,
        address,
        public_key: public_key.to_vec(),
        private_key: Zeroizing::new(node.private_key_bytes().to_vec()),
        path: path.to_string(),
    })
}
