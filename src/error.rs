//! Unified error types for the derivation core.
//!
//! All errors flow through this module so callers can branch on the
//! machine-readable code instead of matching message strings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all derivation operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl CoreError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors

    pub fn invalid_mnemonic(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidMnemonic, msg)
    }

    pub fn invalid_derivation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDerivation, msg)
    }

    pub fn unsupported_chain(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedChain, msg)
    }

    pub fn encoding_failure(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingFailure, msg)
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for CoreError {}

/// Error codes for categorization
///
/// `InvalidMnemonic` and `UnsupportedChain` are user-facing ("check your
/// recovery phrase" vs "chain not supported yet"); `InvalidDerivation` covers
/// the astronomically rare BIP-32 edge cases; `EncodingFailure` means a
/// deriver produced output its own validator rejects and indicates a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMnemonic,
    InvalidDerivation,
    UnsupportedChain,
    EncodingFailure,
    InvalidInput,
    Internal,
}

/// Result type alias used throughout the crate
pub type CoreResult<T> = Result<T, CoreError>;
