//! Error types for the colorwheel service
//!
//! Wager rejections are ordinary values returned to the caller; everything else
//! funnels into `ColorwheelError` at the process boundary.

use thiserror::Error;

/// Root error type for process-level operations (config, startup, serving)
#[derive(Debug, Error)]
pub enum ColorwheelError {
    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Socket / stdin / filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Listen address could not be parsed
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),
}

/// Configuration and validation errors
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Missing required field: {0}")]
    MissingRequired(String),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),
}

/// Why a wager was refused. Checked in declaration order; the first match wins.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum WagerRejection {
    /// Stake is zero, negative or could not be parsed
    #[error("Stake must be greater than 0")]
    InvalidAmount,

    /// Balance does not cover the stake and no overdraft applies
    #[error("Insufficient funds: stake {amount}, balance {balance}")]
    InsufficientFunds { balance: i64, amount: i64 },
}

impl WagerRejection {
    /// Stable machine-readable code used by the HTTP adapter
    pub fn code(&self) -> &'static str {
        match self {
            WagerRejection::InvalidAmount => "INVALID_AMOUNT",
            WagerRejection::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
        }
    }
}

// Convenience type alias for Results
pub type ColorwheelResult<T> = Result<T, ColorwheelError>;
