//! Shared types for the derivation core
//!
//! All data structures that cross module boundaries are defined here
//! for consistent serialization.

use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroizing;

// =============================================================================
// Chain Types
// =============================================================================

/// Supported blockchain networks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
    Bitcoin,
    BitcoinTestnet,
    Litecoin,
    Ethereum,
    Polygon,
    Bnb,
    Arbitrum,
    Optimism,
    Base,
    Avalanche,
    Fantom,
    // kebab-case would split this into "zk-sync"
    #[serde(rename = "zksync")]
    ZkSync,
    Linea,
    Scroll,
    Solana,
    Tron,
    Ton,
    Xrp,
}

impl Chain {
    /// Every chain the core can derive addresses for, in stable order
    pub const ALL: [Chain; 18] = [
        Chain::Bitcoin,
        Chain::BitcoinTestnet,
        Chain::Litecoin,
        Chain::Ethereum,
        Chain::Polygon,
        Chain::Bnb,
        Chain::Arbitrum,
        Chain::Optimism,
        Chain::Base,
        Chain::Avalanche,
        Chain::Fantom,
        Chain::ZkSync,
        Chain::Linea,
        Chain::Scroll,
        Chain::Solana,
        Chain::Tron,
        Chain::Ton,
        Chain::Xrp,
    ];

    pub fn is_evm(&self) -> bool {
        matches!(
            self,
            Chain::Ethereum
                | Chain::Polygon
                | Chain::Bnb
                | Chain::Arbitrum
                | Chain::Optimism
                | Chain::Base
                | Chain::Avalanche
                | Chain::Fantom
                | Chain::ZkSync
                | Chain::Linea
                | Chain::Scroll
        )
    }

    pub fn is_utxo(&self) -> bool {
        matches!(
            self,
            Chain::Bitcoin | Chain::BitcoinTestnet | Chain::Litecoin
        )
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, Chain::BitcoinTestnet)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Chain::Bitcoin | Chain::BitcoinTestnet => "BTC",
            Chain::Litecoin => "LTC",
            Chain::Ethereum | Chain::Arbitrum | Chain::Optimism | Chain::Base => "ETH",
            Chain::ZkSync | Chain::Linea | Chain::Scroll => "ETH",
            Chain::Polygon => "MATIC",
            Chain::Bnb => "BNB",
            Chain::Avalanche => "AVAX",
            Chain::Fantom => "FTM",
            Chain::Solana => "SOL",
            Chain::Tron => "TRX",
            Chain::Ton => "TON",
            Chain::Xrp => "XRP",
        }
    }

    /// Canonical textual identifier, matching the serde form
    pub fn id(&self) -> &'static str {
        match self {
            Chain::Bitcoin => "bitcoin",
            Chain::BitcoinTestnet => "bitcoin-testnet",
            Chain::Litecoin => "litecoin",
            Chain::Ethereum => "ethereum",
            Chain::Polygon => "polygon",
            Chain::Bnb => "bnb",
            Chain::Arbitrum => "arbitrum",
            Chain::Optimism => "optimism",
            Chain::Base => "base",
            Chain::Avalanche => "avalanche",
            Chain::Fantom => "fantom",
            Chain::ZkSync => "zksync",
            Chain::Linea => "linea",
            Chain::Scroll => "scroll",
            Chain::Solana => "solana",
            Chain::Tron => "tron",
            Chain::Ton => "ton",
            Chain::Xrp => "xrp",
        }
    }
}

impl std::str::FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "bitcoin" | "btc" => Ok(Chain::Bitcoin),
            "bitcoin_testnet" | "btc_testnet" => Ok(Chain::BitcoinTestnet),
            "litecoin" | "ltc" => Ok(Chain::Litecoin),
            "ethereum" | "eth" => Ok(Chain::Ethereum),
            "polygon" | "matic" => Ok(Chain::Polygon),
            "bnb" | "bsc" | "binance" => Ok(Chain::Bnb),
            "arbitrum" | "arb" => Ok(Chain::Arbitrum),
            "optimism" | "op" => Ok(Chain::Optimism),
            "base" => Ok(Chain::Base),
            "avalanche" | "avax" => Ok(Chain::Avalanche),
            "fantom" | "ftm" => Ok(Chain::Fantom),
            "zksync" | "zksync_era" => Ok(Chain::ZkSync),
            "linea" => Ok(Chain::Linea),
            "scroll" => Ok(Chain::Scroll),
            "solana" | "sol" => Ok(Chain::Solana),
            "tron" | "trx" => Ok(Chain::Tron),
            "ton" => Ok(Chain::Ton),
            "xrp" | "ripple" => Ok(Chain::Xrp),
            other => Err(format!("Unknown chain: {}", other)),
        }
    }
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Chain family, selected once at registry lookup time.
///
/// Each variant maps to exactly one deriver implementation; adding a chain
/// means adding a registry entry and, if needed, one new variant + deriver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChainFamily {
    /// secp256k1 + Keccak-256, hex address with EIP-55 checksum
    Evm,
    /// secp256k1, Base58Check or bech32 over hash160 of the compressed key
    UtxoSecp256k1,
    /// SLIP-0010 Ed25519, address is the Base58-encoded public key
    Ed25519Base58,
    /// secp256k1 + Keccak-256 like EVM, Base58Check over a 0x41-prefixed hash
    TronBase58,
    /// SLIP-0010 Ed25519, wallet state-init hash + CRC16, base64url
    Ton,
    /// secp256k1, Base58Check with the Ripple alphabet
    XrpCodec,
}

// =============================================================================
// Mnemonic Types
// =============================================================================

/// BIP-39 mnemonic strength (entropy size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MnemonicStrength {
    Words12,
    Words15,
    Words18,
    Words21,
    Words24,
}

impl MnemonicStrength {
    pub fn bits(&self) -> usize {
        match self {
            MnemonicStrength::Words12 => 128,
            MnemonicStrength::Words15 => 160,
            MnemonicStrength::Words18 => 192,
            MnemonicStrength::Words21 => 224,
            MnemonicStrength::Words24 => 256,
        }
    }

    pub fn entropy_bytes(&self) -> usize {
        self.bits() / 8
    }

    pub fn word_count(&self) -> usize {
        // 11 bits per word, checksum adds bits/32
        (self.bits() + self.bits() / 32) / 11
    }

    pub fn from_word_count(words: usize) -> Option<Self> {
        match words {
            12 => Some(MnemonicStrength::Words12),
            15 => Some(MnemonicStrength::Words15),
            18 => Some(MnemonicStrength::Words18),
            21 => Some(MnemonicStrength::Words21),
            24 => Some(MnemonicStrength::Words24),
            _ => None,
        }
    }
}

// =============================================================================
// Derivation Output
// =============================================================================

/// Output contract of every chain deriver.
///
/// SECURITY: the private key is wrapped in `Zeroizing` so the buffer is
/// cleared when the result is dropped, and it is never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedAddress {
    pub chain: Chain,
    pub address: String,
    #[serde(serialize_with = "hex_bytes")]
    pub public_key: Vec<u8>,
    #[serde(skip_serializing)]
    pub private_key: Zeroizing<Vec<u8>>,
    pub path: String,
}

fn hex_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

/// Address encodings supported by the Bitcoin-family deriver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtxoAddressKind {
    /// Legacy P2PKH, Base58Check
    Legacy,
    /// P2SH-wrapped SegWit (P2SH-P2WPKH), Base58Check
    NestedSegwit,
    /// Native SegWit v0 (P2WPKH), bech32
    NativeSegwit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_chain_roundtrip_ids() {
        for chain in Chain::ALL {
            let parsed = Chain::from_str(chain.id()).unwrap();
            assert_eq!(parsed, chain);
        }
    }

    #[test]
    fn test_serde_form_matches_id() {
        for chain in Chain::ALL {
            let json = serde_json::to_string(&chain).unwrap();
            assert_eq!(json, format!("\"{}\"", chain.id()));
        }
    }

    #[test]
    fn test_evm_classification() {
        assert!(Chain::Ethereum.is_evm());
        assert!(Chain::Fantom.is_evm());
        assert!(Chain::ZkSync.is_evm());
        assert!(!Chain::Bitcoin.is_evm());
        assert!(!Chain::Solana.is_evm());
        assert!(!Chain::Ton.is_evm());
    }

    #[test]
    fn test_strength_word_counts() {
        assert_eq!(MnemonicStrength::Words12.word_count(), 12);
        assert_eq!(MnemonicStrength::Words15.word_count(), 15);
        assert_eq!(MnemonicStrength::Words18.word_count(), 18);
        assert_eq!(MnemonicStrength::Words21.word_count(), 21);
        assert_eq!(MnemonicStrength::Words24.word_count(), 24);
        assert_eq!(MnemonicStrength::from_word_count(13), None);
    }

    #[test]
    fn test_derived_address_serialization_redacts_private_key() {
        let result = DerivedAddress {
            chain: Chain::Ethereum,
            address: "0x0000000000000000000000000000000000000000".into(),
            public_key: vec![4u8; 65],
            private_key: Zeroizing::new(vec![1u8; 32]),
            path: "m/44'/60'/0'/0/0".into(),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("private_key"));
        assert!(json.contains("\"chain\":\"ethereum\""));
    }
}
