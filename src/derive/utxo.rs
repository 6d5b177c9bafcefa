//! Bitcoin-family address deriver
//!
//! Parameterized by network prefix bytes so Bitcoin, Bitcoin testnet, and
//! Litecoin share one code path. Supports legacy P2PKH, P2SH-wrapped SegWit,
//! and native SegWit (bech32, witness version 0) from the same compressed
//! public key.

use bech32::{self, Variant};
use zeroize::Zeroizing;

use crate::crypto::{base58check_encode, hash160};
use crate::error::{CoreError, CoreResult};
use crate::hd::HdNode;
use crate::path::DerivationPath;
use crate::types::{Chain, DerivedAddress, UtxoAddressKind};

/// Network prefix bytes and bech32 HRP for one Bitcoin-family chain
#[derive(Debug, Clone, Copy)]
pub struct UtxoNetwork {
    pub p2pkh_version: u8,
    pub p2sh_version: u8,
    pub wif_version: u8,
    pub bech32_hrp: &'static str,
}

pub const BITCOIN: UtxoNetwork = UtxoNetwork {
    p2pkh_version: 0x00,
    p2sh_version: 0x05,
    wif_version: 0x80,
    bech32_hrp: "bc",
};

pub const BITCOIN_TESTNET: UtxoNetwork = UtxoNetwork {
    p2pkh_version: 0x6F,
    p2sh_version: 0xC4,
    wif_version: 0xEF,
    bech32_hrp: "tb",
};

pub const LITECOIN: UtxoNetwork = UtxoNetwork {
    p2pkh_version: 0x30,
    p2sh_version: 0x32,
    wif_version: 0xB0,
    bech32_hrp: "ltc",
};

pub fn network_for(chain: Chain) -> CoreResult<UtxoNetwork> {
    match chain {
        Chain::Bitcoin => Ok(BITCOIN),
        Chain::BitcoinTestnet => Ok(BITCOIN_TESTNET),
        Chain::Litecoin => Ok(LITECOIN),
        other => Err(CoreError::internal(format!(
            "{} is not a Bitcoin-family chain",
            other
        ))),
    }
}

pub fn derive(
    chain: Chain,
    node: &HdNode,
    path: &DerivationPath,
    kind: UtxoAddressKind,
) -> CoreResult<DerivedAddress> {
    let network = network_for(chain)?;
    let compressed = node.public_key().serialize();
    let pubkey_hash = hash160(&compressed);

    let address = match kind {
        UtxoAddressKind::Legacy => encode_p2pkh(&network, &pubkey_hash),
        UtxoAddressKind::NestedSegwit => encode_p2sh_p2wpkh(&network, &pubkey_hash),
        UtxoAddressKind::NativeSegwit => encode_p2wpkh(&network, &pubkey_hash)?,
    };

    Ok(DerivedAddress {
        chain,
        address,
        public_key: compressed.to_vec(),
        private_key: Zeroizing::new(node.private_key_bytes().to_vec()),
        path: path.to_string(),
    })
}

/// Legacy: Base58Check(version || hash160(pubkey))
fn encode_p2pkh(network: &UtxoNetwork, pubkey_hash: &[u8; 20]) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(network.p2pkh_version);
    payload.extend_from_slice(pubkey_hash);
    base58check_encode(&payload)
}

/// P2SH-P2WPKH: the redeem script is `OP_0 <20-byte pubkey hash>`, and the
/// address commits to hash160 of that script
fn encode_p2sh_p2wpkh(network: &UtxoNetwork, pubkey_hash: &[u8; 20]) -> String {
    let mut redeem_script = Vec::with_capacity(22);
    redeem_script.push(0x00);
    redeem_script.push(0x14);
    redeem_script.extend_from_slice(pubkey_hash);

    let script_hash = hash160(&redeem_script);
    let mut payload = Vec::with_capacity(21);
    payload.push(network.p2sh_version);
    payload.extend_from_slice(&script_hash);
    base58check_encode(&payload)
}

/// Native SegWit v0: bech32 over witness version 0 and the pubkey hash
fn encode_p2wpkh(network: &UtxoNetwork, pubkey_hash: &[u8; 20]) -> CoreResult<String> {
    let version = bech32::u5::try_from_u8(0)
        .map_err(|e| CoreError::internal(format!("Bech32 error: {}", e)))?;
    let converted = bech32::convert_bits(pubkey_hash, 8, 5, true)
        .map_err(|e| CoreError::internal(format!("Bech32 error: {}", e)))?;

    let mut data = Vec::with_capacity(1 + converted.len());
    data.push(version);
    for value in converted {
        let u5 = bech32::u5::try_from_u8(value)
            .map_err(|e| CoreError::internal(format!("Bech32 error: {}", e)))?;
        data.push(u5);
    }

    bech32::encode(network.bech32_hrp, data, Variant::Bech32)
        .map_err(|e| CoreError::internal(format!("Bech32 error: {}", e)))
}

/// WIF private key export for the network (compressed-key flag set)
pub fn encode_wif(network: &UtxoNetwork, private_key: &[u8; 32]) -> String {
    let mut payload = Vec::with_capacity(34);
    payload.push(network.wif_version);
    payload.extend_from_slice(private_key);
    payload.push(0x01);
    base58check_encode(&payload)
}
