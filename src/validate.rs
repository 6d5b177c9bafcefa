//! Address format validation
//!
//! Two layers: the registry's regex gives a fast shape prefilter, then a
//! per-family structural check verifies what the regex cannot (Base58Check
//! and bech32 checksums, EIP-55 casing, decoded payload lengths). An address
//! passes only if both layers accept it.

use bech32::Variant;

use crate::crypto::base58check_decode;
use crate::derive::evm::to_checksum_address;
use crate::derive::ton::TonAddress;
use crate::derive::utxo::{self, UtxoNetwork};
use crate::derive::xrp::decode_classic_address;
use crate::error::CoreResult;
use crate::registry::Registry;
use crate::types::{Chain, ChainFamily};

/// Check whether `address` is well formed for `chain`.
///
/// Returns `Ok(false)` for a malformed address; `Err` only when the chain
/// itself is absent from the registry.
pub fn validate_address(registry: &Registry, chain: Chain, address: &str) -> CoreResult<bool> {
    let descriptor = registry.descriptor(chain)?;
    if !descriptor.validator.is_match(address) {
        return Ok(false);
    }

    let structural = match descriptor.family {
        ChainFamily::Evm => is_valid_evm(address),
        ChainFamily::UtxoSecp256k1 => is_valid_utxo(chain, address),
        ChainFamily::TronBase58 => is_valid_tron(address),
        ChainFamily::Ed25519Base58 => is_valid_base58_pubkey(address),
        ChainFamily::Ton => is_valid_ton(address),
        ChainFamily::XrpCodec => decode_classic_address(address).is_some(),
    };
    Ok(structural)
}

/// All-lowercase and all-uppercase forms carry no checksum and are accepted;
/// mixed case must match EIP-55 exactly
fn is_valid_evm(address: &str) -> bool {
    let hex_part = &address[2..];
    let lower = hex_part.to_lowercase();
    if hex_part == lower || hex_part == hex_part.to_uppercase() {
        return true;
    }
    match hex::decode(&lower) {
        Ok(bytes) => to_checksum_address(&bytes) == address,
        Err(_) => false,
    }
}

fn is_valid_utxo(chain: Chain, address: &str) -> bool {
    let network = match utxo::network_for(chain) {
        Ok(n) => n,
        Err(_) => return false,
    };
    if address.starts_with(network.bech32_hrp) {
        is_valid_segwit_v0(&network, address)
    } else {
        match base58check_decode(address) {
            Some(payload) => {
                payload.len() == 21
                    && (payload[0] == network.p2pkh_version || payload[0] == network.p2sh_version)
            }
            None => false,
        }
    }
}

/// Witness v0 program: bech32 (not bech32m), 20- or 32-byte program
fn is_valid_segwit_v0(network: &UtxoNetwork, address: &str) -> bool {
    let (hrp, data, variant) = match bech32::decode(address) {
        Ok(parts) => parts,
        Err(_) => return false,
    };
    if hrp != network.bech32_hrp || variant != Variant::Bech32 || data.is_empty() {
        return false;
    }
    if data[0].to_u8() != 0 {
        return false;
    }
    match bech32::convert_bits(&data[1..], 5, 8, false) {
        Ok(program) => program.len() == 20 || program.len() == 32,
        Err(_) => false,
    }
}

fn is_valid_tron(address: &str) -> bool {
    match base58check_decode(address) {
        Some(payload) => payload.len() == 21 && payload[0] == 0x41,
        None => false,
    }
}

fn is_valid_base58_pubkey(address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

fn is_valid_ton(address: &str) -> bool {
    match TonAddress::from_user_friendly(address) {
        Ok(parsed) => parsed.is_valid(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(chain: Chain, address: &str) -> bool {
        validate_address(&Registry::new(), chain, address).unwrap()
    }

    #[test]
    fn test_evm_addresses() {
        // Proper EIP-55 casing
        assert!(check(
            Chain::Ethereum,
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        ));
        // All-lowercase is accepted as checksum-free
        assert!(check(
            Chain::Ethereum,
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        ));
        // Wrong mixed casing is rejected
        assert!(!check(
            Chain::Ethereum,
            "0x5Aaeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        ));
        assert!(!check(Chain::Ethereum, "0x12345"));
        assert!(!check(Chain::Ethereum, "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
    }

    #[test]
    fn test_bitcoin_addresses() {
        assert!(check(Chain::Bitcoin, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA"));
        assert!(check(
            Chain::Bitcoin,
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4"
        ));
        // Valid shape, broken checksum
        assert!(!check(Chain::Bitcoin, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabB"));
        assert!(!check(
            Chain::Bitcoin,
            "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t5"
        ));
        // Testnet address is not a mainnet address
        assert!(!check(Chain::Bitcoin, "tb1qw508d6qejxtdg4y5r3zarvary0c5xw7kxpjzsx"));
    }

    #[test]
    fn test_cross_chain_rejection() {
        let registry = Registry::new();
        let eth = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
        assert!(!validate_address(&registry, Chain::Bitcoin, eth).unwrap());
        assert!(!validate_address(&registry, Chain::Solana, eth).unwrap());
        assert!(!validate_address(&registry, Chain::Tron, eth).unwrap());
    }

    #[test]
    fn test_solana_length_bounds() {
        // 32 bytes of 0xFF encodes within the accepted window
        let encoded = bs58::encode([0xFFu8; 32]).into_string();
        assert!(check(Chain::Solana, &encoded));
        // 31 bytes is structurally wrong even if the regex shape matches
        let short = bs58::encode([0xFFu8; 31]).into_string();
        assert!(!check(Chain::Solana, &short));
    }

    #[test]
    fn test_ton_checksum_enforced() {
        let addr = TonAddress::new(0, [9u8; 32]).to_user_friendly();
        assert!(check(Chain::Ton, &addr));
        let mut corrupted = addr.into_bytes();
        corrupted[5] = if corrupted[5] == b'A' { b'B' } else { b'A' };
        assert!(!check(Chain::Ton, &String::from_utf8(corrupted).unwrap()));
    }

    #[test]
    fn test_unsupported_chain_is_an_error_not_false() {
        let registry = Registry::with_chains(&[Chain::Ethereum]);
        assert!(validate_address(&registry, Chain::Bitcoin, "1abc").is_err());
    }
}
