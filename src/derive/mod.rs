//! Chain Address Derivers
//!
//! One deriver per chain family, selected through the registry's
//! `ChainFamily` tag. Every deriver is a pure function from key material to
//! a `DerivedAddress`; output is checked against the chain's own validator
//! before it leaves this module, and a mismatch is an `EncodingFailure`.

pub mod ed25519_chains;
pub mod evm;
pub mod ton;
pub mod tron;
pub mod utxo;
pub mod xrp;

use crate::error::{CoreError, CoreResult};
use crate::hd::{HdNode, Slip10Node};
use crate::registry::Registry;
use crate::types::{Chain, ChainFamily, DerivedAddress, UtxoAddressKind};

/// Derive the address for one chain at the registry's standard path.
///
/// Bitcoin-family chains default to native SegWit here; callers wanting
/// legacy or nested encodings use `utxo::derive` directly.
pub fn derive_for_chain(
    registry: &Registry,
    seed: &[u8],
    chain: Chain,
    account_index: u32,
) -> CoreResult<DerivedAddress> {
    let descriptor = registry.descriptor(chain)?;
    let path = registry.path_for(chain, account_index)?;

    let result = match descriptor.family {
        ChainFamily::Evm => {
            let node = HdNode::from_seed(seed)?.derive_path(&path)?;
            evm::derive(chain, &node, &path)
        }
        ChainFamily::UtxoSecp256k1 => {
            let node = HdNode::from_seed(seed)?.derive_path(&path)?;
            utxo::derive(chain, &node, &path, UtxoAddressKind::NativeSegwit)
        }
        ChainFamily::TronBase58 => {
            let node = HdNode::from_seed(seed)?.derive_path(&path)?;
            tron::derive(chain, &node, &path)
        }
        ChainFamily::XrpCodec => {
            let node = HdNode::from_seed(seed)?.derive_path(&path)?;
            xrp::derive(chain, &node, &path)
        }
        ChainFamily::Ed25519Base58 => {
            let node = Slip10Node::from_seed(seed)?.derive_path(&path)?;
            ed25519_chains::derive(chain, &node, &path)
        }
        ChainFamily::Ton => {
            let node = Slip10Node::from_seed(seed)?.derive_path(&path)?;
            ton::derive(chain, &node, &path)
        }
    }?;

    // Defensive format check on every deriver's output. Failing here means
    // the deriver itself is broken, so shout and refuse to return the value.
    if !descriptor.validator.is_match(&result.address) {
        log::error!(
            "deriver for {} produced address failing its own validator",
            chain
        );
        return Err(CoreError::encoding_failure(format!(
            "Derived {} address failed format validation",
            chain
        ))
        .with_details(result.address.clone()));
    }

    Ok(result)
}
