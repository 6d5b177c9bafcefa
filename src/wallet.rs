//! Aggregate Derivation Facade
//!
//! The high-level entry points callers actually use: derive one chain, or
//! every registered chain at once. Batch derivation isolates per-chain
//! failures and shares the single Ethereum-path derivation across all
//! EVM-classified chains, since coin type 60 makes their addresses
//! identical anyway.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use crate::derive::derive_for_chain;
use crate::error::{CoreError, CoreResult};
use crate::mnemonic::{generate_mnemonic, mnemonic_to_seed};
use crate::registry::Registry;
use crate::types::{Chain, DerivedAddress, MnemonicStrength};

/// Per-chain batch outcome; one failing chain never hides the others
pub type DerivationReport = BTreeMap<Chain, Result<DerivedAddress, CoreError>>;

/// Derive the address for a single chain at the registry's standard path.
pub fn derive_address(
    registry: &Registry,
    mnemonic: &str,
    passphrase: &str,
    chain: Chain,
    account_index: u32,
) -> CoreResult<DerivedAddress> {
    let seed = mnemonic_to_seed(mnemonic, passphrase)?;
    derive_for_chain(registry, seed.as_ref(), chain, account_index)
}

/// Derive addresses for every chain in the registry.
///
/// An invalid mnemonic fails the whole call up front, before any chain is
/// attempted. After that, each chain derives independently and reports its
/// own `Result`.
pub fn derive_all_addresses(
    registry: &Registry,
    mnemonic: &str,
    passphrase: &str,
    account_index: u32,
) -> CoreResult<DerivationReport> {
    let seed = mnemonic_to_seed(mnemonic, passphrase)?;
    Ok(derive_all_with(
        registry,
        seed.as_ref(),
        account_index,
        derive_for_chain,
    ))
}

/// Batch driver, parameterized over the per-chain deriver so tests can
/// inject failures for specific chains.
fn derive_all_with<F>(
    registry: &Registry,
    seed: &[u8],
    account_index: u32,
    derive_one: F,
) -> DerivationReport
where
    F: Fn(&Registry, &[u8], Chain, u32) -> CoreResult<DerivedAddress>,
{
    let mut report = DerivationReport::new();
    let mut evm_template: Option<Result<DerivedAddress, CoreError>> = None;

    for chain in registry.chains() {
        let result = if chain.is_evm() {
            // Coin type 60 is shared, so derive once and retag per chain
            let template = evm_template
                .get_or_insert_with(|| derive_one(registry, seed, chain, account_index));
            template.clone().map(|mut derived| {
                derived.chain = chain;
                derived
            })
        } else {
            derive_one(registry, seed, chain, account_index)
        };

        if let Err(ref err) = result {
            log::debug!("derivation failed for {}: {}", chain, err);
        }
        report.insert(chain, result);
    }

    let failures = report.values().filter(|r| r.is_err()).count();
    log::debug!(
        "derived {} chains, {} failures",
        report.len() - failures,
        failures
    );
    report
}

/// Freshly generated wallet: the phrase plus its derived addresses
pub struct NewWallet {
    pub mnemonic: Zeroizing<String>,
    pub report: DerivationReport,
}

/// Generate a mnemonic and derive account 0 for every registered chain.
pub fn create_wallet(registry: &Registry, strength: MnemonicStrength) -> CoreResult<NewWallet> {
    let mnemonic = Zeroizing::new(generate_mnemonic(strength)?);
    let report = derive_all_addresses(registry, &mnemonic, "", 0)?;
    Ok(NewWallet { mnemonic, report })
}

/// Re-derive account 0 for every registered chain from an existing phrase.
pub fn restore_wallet(registry: &Registry, mnemonic: &str) -> CoreResult<DerivationReport> {
    derive_all_addresses(registry, mnemonic, "", 0)
}

/// Restore with a BIP-39 passphrase (a different passphrase is a different
/// wallet, by construction).
pub fn restore_wallet_with_passphrase(
    registry: &Registry,
    mnemonic: &str,
    passphrase: &str,
) -> CoreResult<DerivationReport> {
    derive_all_addresses(registry, mnemonic, passphrase, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::mnemonic::mnemonic_to_seed;

    const VECTOR_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_single_chain_known_answer() {
        let registry = Registry::new();
        let derived =
            derive_address(&registry, VECTOR_PHRASE, "", Chain::Ethereum, 0).unwrap();
        assert_eq!(
            derived.address,
            "0x9858EfFD232B4033E47d90003D41EC34EcaEda94"
        );
    }

    #[test]
    fn test_batch_covers_every_registered_chain() {
        let registry = Registry::new();
        let report = derive_all_addresses(&registry, VECTOR_PHRASE, "", 0).unwrap();
        assert_eq!(report.len(), Chain::ALL.len());
        for (chain, result) in &report {
            assert!(result.is_ok(), "{} failed: {:?}", chain, result);
        }
    }

    #[test]
    fn test_evm_chains_share_one_address() {
        let registry = Registry::new();
        let report = derive_all_addresses(&registry, VECTOR_PHRASE, "", 0).unwrap();
        let eth = report[&Chain::Ethereum].as_ref().unwrap();
        for chain in Chain::ALL.iter().filter(|c| c.is_evm()) {
            let derived = report[chain].as_ref().unwrap();
            assert_eq!(derived.address, eth.address);
            assert_eq!(derived.chain, *chain);
        }
    }

    #[test]
    fn test_invalid_mnemonic_fails_whole_batch() {
        let registry = Registry::new();
        let err = derive_all_addresses(&registry, "complete nonsense", "", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMnemonic);
    }

    #[test]
    fn test_partial_failure_isolation() {
        let registry = Registry::new();
        let seed = mnemonic_to_seed(VECTOR_PHRASE, "").unwrap();

        let report = derive_all_with(&registry, seed.as_ref(), 0, |reg, seed, chain, idx| {
            if chain == Chain::Ton {
                Err(CoreError::internal("injected failure"))
            } else {
                crate::derive::derive_for_chain(reg, seed, chain, idx)
            }
        });

        assert!(report[&Chain::Ton].is_err());
        let ok = report.iter().filter(|(_, r)| r.is_ok()).count();
        assert_eq!(ok, Chain::ALL.len() - 1);
    }

    #[test]
    fn test_create_and_restore_agree() {
        let registry = Registry::new();
        let wallet = create_wallet(&registry, MnemonicStrength::Words12).unwrap();
        let restored = restore_wallet(&registry, &wallet.mnemonic).unwrap();

        for (chain, result) in &wallet.report {
            assert_eq!(
                result.as_ref().unwrap().address,
                restored[chain].as_ref().unwrap().address
            );
        }
    }

    #[test]
    fn test_passphrase_changes_every_address() {
        let registry = Registry::new();
        let plain = restore_wallet(&registry, VECTOR_PHRASE).unwrap();
        let secured =
            restore_wallet_with_passphrase(&registry, VECTOR_PHRASE, "hunter2").unwrap();

        for (chain, result) in &plain {
            assert_ne!(
                result.as_ref().unwrap().address,
                secured[chain].as_ref().unwrap().address
            );
        }
    }
}
