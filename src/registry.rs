//! Derivation Path Registry
//!
//! The authoritative table mapping each chain to its SLIP-0044 coin type,
//! deriver family, and address format validator. Built once and passed by
//! reference so derivation stays a pure library with no hidden global state.

use regex::Regex;
use std::collections::BTreeMap;

use crate::error::{CoreError, CoreResult};
use crate::path::{ChildNumber, DerivationPath};
use crate::types::{Chain, ChainFamily};

/// SLIP-0044 coin types
pub mod coin_types {
    pub const BITCOIN: u32 = 0;
    pub const BITCOIN_TESTNET: u32 = 1;
    pub const LITECOIN: u32 = 2;
    pub const ETHEREUM: u32 = 60;
    pub const XRP: u32 = 144;
    pub const TRON: u32 = 195;
    pub const SOLANA: u32 = 501;
    pub const TON: u32 = 607;
}

/// Static per-chain metadata, immutable after registry construction
#[derive(Debug, Clone)]
pub struct ChainDescriptor {
    pub chain: Chain,
    pub coin_type: u32,
    pub family: ChainFamily,
    pub validator: Regex,
}

/// Immutable chain table
#[derive(Debug)]
pub struct Registry {
    descriptors: BTreeMap<Chain, ChainDescriptor>,
}

impl Registry {
    /// Registry over every supported chain
    pub fn new() -> Self {
        Self::with_chains(&Chain::ALL)
    }

    /// Registry restricted to a subset of chains; anything else resolves to
    /// `UnsupportedChain`
    pub fn with_chains(chains: &[Chain]) -> Self {
        let descriptors = chains
            .iter()
            .map(|&chain| (chain, descriptor_for(chain)))
            .collect();
        Self { descriptors }
    }

    pub fn chains(&self) -> impl Iterator<Item = Chain> + '_ {
        self.descriptors.keys().copied()
    }

    pub fn descriptor(&self, chain: Chain) -> CoreResult<&ChainDescriptor> {
        self.descriptors.get(&chain).ok_or_else(|| {
            CoreError::unsupported_chain(format!("Chain not in registry: {}", chain))
        })
    }

    pub fn classify(&self, chain: Chain) -> CoreResult<ChainFamily> {
        Ok(self.descriptor(chain)?.family)
    }

    /// Standard path for a chain and account index.
    ///
    /// Account and change are fixed at 0; only the final index varies.
    /// Ed25519 families get fully hardened paths (SLIP-0010 requirement).
    pub fn path_for(&self, chain: Chain, account_index: u32) -> CoreResult<DerivationPath> {
        let descriptor = self.descriptor(chain)?;
        let coin = descriptor.coin_type;

        let segments = match descriptor.family {
            ChainFamily::Evm
            | ChainFamily::UtxoSecp256k1
            | ChainFamily::TronBase58
            | ChainFamily::XrpCodec => vec![
                ChildNumber::hardened(44)?,
                ChildNumber::hardened(coin)?,
                ChildNumber::hardened(0)?,
                ChildNumber::normal(0)?,
                ChildNumber::normal(account_index)?,
            ],
            ChainFamily::Ed25519Base58 => vec![
                ChildNumber::hardened(44)?,
                ChildNumber::hardened(coin)?,
                ChildNumber::hardened(account_index)?,
                ChildNumber::hardened(0)?,
            ],
            ChainFamily::Ton => vec![
                ChildNumber::hardened(44)?,
                ChildNumber::hardened(coin)?,
                ChildNumber::hardened(account_index)?,
            ],
        };

        Ok(DerivationPath::new(segments))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn descriptor_for(chain: Chain) -> ChainDescriptor {
    let (coin_type, family, pattern) = match chain {
        Chain::Bitcoin => (
            coin_types::BITCOIN,
            ChainFamily::UtxoSecp256k1,
            r"^(bc1[02-9ac-hj-np-z]{8,87}|[13][1-9A-HJ-NP-Za-km-z]{25,34})$",
        ),
        Chain::BitcoinTestnet => (
            coin_types::BITCOIN_TESTNET,
            ChainFamily::UtxoSecp256k1,
            r"^(tb1[02-9ac-hj-np-z]{8,87}|[mn2][1-9A-HJ-NP-Za-km-z]{25,34})$",
        ),
        Chain::Litecoin => (
            coin_types::LITECOIN,
            ChainFamily::UtxoSecp256k1,
            r"^(ltc1[02-9ac-hj-np-z]{8,87}|[LM3][1-9A-HJ-NP-Za-km-z]{25,34})$",
        ),
        Chain::Solana => (
            coin_types::SOLANA,
            ChainFamily::Ed25519Base58,
            r"^[1-9A-HJ-NP-Za-km-z]{32,44}$",
        ),
        Chain::Tron => (
            coin_types::TRON,
            ChainFamily::TronBase58,
            r"^T[1-9A-HJ-NP-Za-km-z]{33}$",
        ),
        Chain::Ton => (
            coin_types::TON,
            ChainFamily::Ton,
            r"^[A-Za-z0-9_-]{48}$",
        ),
        Chain::Xrp => (
            coin_types::XRP,
            ChainFamily::XrpCodec,
            r"^r[1-9A-HJ-NP-Za-km-z]{24,34}$",
        ),
        // Every EVM-compatible chain shares coin type 60 and therefore
        // derives the identical address
        _ => (
            coin_types::ETHEREUM,
            ChainFamily::Evm,
            r"^0x[0-9a-fA-F]{40}$",
        ),
    };

    ChainDescriptor {
        chain,
        coin_type,
        family,
        validator: Regex::new(pattern).expect("static chain regex must compile"),
    }
}
