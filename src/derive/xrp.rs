//! XRP Ledger address deriver
//!
//! Classic addresses are Base58Check over `0x00 || hash160(pubkey)` using
//! the Ripple alphabet, which maps the version byte to a leading `r`. The
//! account id hashes the compressed secp256k1 public key.

use zeroize::Zeroizing;

use crate::crypto::{base58check_encode_ripple, hash160, sha256};
use crate::error::CoreResult;
use crate::hd::HdNode;
use crate::path::DerivationPath;
use crate::types::{Chain, DerivedAddress};

/// Account id type prefix for classic addresses
const ACCOUNT_ID_PREFIX: u8 = 0x00;

pub fn derive(chain: Chain, node: &HdNode, path: &DerivationPath) -> CoreResult<DerivedAddress> {
    let compressed = node.public_key().serialize();
    let account_id = hash160(&compressed);

    let mut payload = Vec::with_capacity(21);
    payload.push(ACCOUNT_ID_PREFIX);
    payload.extend_from_slice(&account_id);
    let address = base58check_encode_ripple(&payload);

    Ok(DerivedAddress {
        chain,
        address,
        public_key: compressed.to_vec(),
        private_key: Zeroizing::new(node.private_key_bytes().to_vec()),
        path: path.to_string(),
    })
}

/// Decode a classic address back to its 20-byte account id, verifying the
/// double-SHA-256 checksum and version byte
pub fn decode_classic_address(address: &str) -> Option<[u8; 20]> {
    let decoded = bs58::decode(address)
        .with_alphabet(bs58::Alphabet::RIPPLE)
        .into_vec()
        .ok()?;
    if decoded.len() != 25 || decoded[0] != ACCOUNT_ID_PREFIX {
        return None;
    }
    let checksum = sha256(&sha256(&decoded[..21]));
    if checksum[..4] != decoded[21..] {
        return None;
    }
    let mut account_id = [0u8; 20];
    account_id.copy_from_slice(&decoded[1..21]);
    Some(account_id)
}
