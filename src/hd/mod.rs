//! Hierarchical Deterministic Key Trees
//!
//! Two trees live here: BIP-32 over secp256k1 for the EVM, Bitcoin-family,
//! Tron, and XRP derivers, and SLIP-0010 over Ed25519 for Solana and TON.
//! The curves do not mix: reusing secp256k1-derived bytes as Ed25519 keys
//! produces addresses that are not spendable on the target network.

mod ed25519;
mod secp256k1;

pub use ed25519::Slip10Node;
pub use secp256k1::HdNode;
