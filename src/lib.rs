//! walletcore
//!
//! Deterministic multi-chain key derivation and address generation.
//!
//! # Architecture
//!
//! - **mnemonic**: BIP-39 generation, validation, and seed stretching
//! - **hd**: BIP-32 (secp256k1) and SLIP-0010 (Ed25519) key trees
//! - **registry**: per-chain coin types, deriver families, format validators
//! - **derive**: chain address derivers (EVM, Bitcoin-family, Solana, Tron,
//!   TON, XRP)
//! - **validate**: structural address validation
//! - **wallet**: aggregate facade (single-chain and all-chains derivation)
//!
//! Every operation is a pure, synchronous function: the same mnemonic,
//! passphrase, chain, and account index always produce the same output.
//! There is no I/O, no global mutable state, and no network access.
//!
//! # Security
//!
//! Entropy, seeds, and private keys live in `zeroize::Zeroizing` buffers and
//! are cleared on drop. `DerivedAddress` never serializes its private key,
//! and nothing key-shaped is ever logged.
//!
//! # Example
//!
//! ```rust,ignore
//! use walletcore::{derive_address, Chain, Registry};
//!
//! let registry = Registry::new();
//! let derived = derive_address(&registry, mnemonic, "", Chain::Ethereum, 0)?;
//! println!("{} -> {}", derived.path, derived.address);
//! ```

pub mod crypto;
pub mod derive;
pub mod error;
pub mod hd;
pub mod mnemonic;
pub mod path;
pub mod registry;
pub mod types;
pub mod validate;
pub mod wallet;

pub use derive::derive_for_chain;
pub use error::{CoreError, CoreResult, ErrorCode};
pub use mnemonic::{generate_mnemonic, mnemonic_to_seed, validate_mnemonic, Seed};
pub use path::{ChildNumber, DerivationPath};
pub use registry::{ChainDescriptor, Registry};
pub use types::{Chain, ChainFamily, DerivedAddress, MnemonicStrength, UtxoAddressKind};
pub use validate::validate_address;
pub use wallet::{
    create_wallet, derive_address, derive_all_addresses, restore_wallet,
    restore_wallet_with_passphrase, DerivationReport, NewWallet,
};
