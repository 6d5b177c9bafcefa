//! Mnemonic Service
//!
//! BIP-39 mnemonic generation, validation, and seed stretching.
//!
//! SECURITY: entropy and seeds are wrapped in `Zeroizing` so the buffers are
//! cleared on drop. The mnemonic phrase itself exists only transiently here;
//! encrypted persistence is a caller concern.

use bip39::Mnemonic;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{CoreError, CoreResult};
use crate::types::MnemonicStrength;

/// 512-bit BIP-39 seed
pub type Seed = Zeroizing<[u8; 64]>;

/// Generate a new mnemonic from OS randomness.
///
/// Fails only if the secure RNG is unavailable, which is fatal and
/// non-retryable.
pub fn generate_mnemonic(strength: MnemonicStrength) -> CoreResult<String> {
    let mut entropy = Zeroizing::new(vec![0u8; strength.entropy_bytes()]);
    OsRng
        .try_fill_bytes(entropy.as_mut())
        .map_err(|e| CoreError::internal(format!("Secure RNG unavailable: {}", e)))?;

    let mnemonic = Mnemonic::from_entropy(entropy.as_ref())
        .map_err(|e| CoreError::internal(format!("Failed to encode mnemonic: {}", e)))?;

    Ok(mnemonic.to_string())
}

/// Check wordlist membership and the embedded checksum.
///
/// Returns false rather than erroring on malformed input; callers must check
/// before deriving.
pub fn validate_mnemonic(phrase: &str) -> bool {
    Mnemonic::parse(phrase).is_ok()
}

/// Stretch a mnemonic (+ optional passphrase) into a 512-bit seed.
///
/// PBKDF2-HMAC-SHA512, 2048 iterations, salt `"mnemonic" + passphrase`,
/// per BIP-39. Deterministic, no I/O.
pub fn mnemonic_to_seed(phrase: &str, passphrase: &str) -> CoreResult<Seed> {
    let mnemonic = Mnemonic::parse(phrase)
        .map_err(|e| CoreError::invalid_mnemonic(format!("Invalid mnemonic: {}", e)))?;
    Ok(Zeroizing::new(mnemonic.to_seed(passphrase)))
}

/// Word count of a phrase, if it parses as a valid mnemonic
pub fn mnemonic_strength(phrase: &str) -> Option<MnemonicStrength> {
    let mnemonic = Mnemonic::parse(phrase).ok()?;
    MnemonicStrength::from_word_count(mnemonic.word_count())
}
