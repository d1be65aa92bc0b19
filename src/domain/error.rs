// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@oxidity.com>

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Initialization(String),

    #[error("Connection failed to endpoint: {0}")]
    Connection(String),

    #[error("Strike execution error: {0}")]
    Strike(String),

    #[error("Insufficient funds. Required: {required}, Available: {available}")]
    InsufficientFunds { required: String, available: String },

    #[error("External API error: {provider} responded with {status}")]
    ApiCall { provider: String, status: u16 },

    #[error(transparent)]
    Unknown(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Broadcast failures translated from provider errors exactly once, at the
/// transport boundary. Everything downstream matches on this enum instead of
/// re-inspecting provider message strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadcastFailure {
    /// The node refused the transaction because the sender balance no longer
    /// covers value + gas. Narrow race: the balance moved between the funding
    /// check and the send.
    InsufficientFunds,
    /// Any other rejection or revert. Capital is preserved; at most gas was
    /// spent.
    Rejected,
}

impl BroadcastFailure {
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("insufficient funds") || lower.contains("insufficient balance") {
            BroadcastFailure::InsufficientFunds
        } else {
            BroadcastFailure::Rejected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_is_distinguished() {
        assert_eq!(
            BroadcastFailure::classify("err: insufficient funds for gas * price + value"),
            BroadcastFailure::InsufficientFunds
        );
        assert_eq!(
            BroadcastFailure::classify("Insufficient Balance to cover transfer"),
            BroadcastFailure::InsufficientFunds
        );
    }

    #[test]
    fn any_other_message_is_a_plain_rejection() {
        assert_eq!(
            BroadcastFailure::classify("execution reverted: TRANSFER_FROM_FAILED"),
            BroadcastFailure::Rejected
        );
        assert_eq!(
            BroadcastFailure::classify("nonce too low"),
            BroadcastFailure::Rejected
        );
        assert_eq!(BroadcastFailure::classify(""), BroadcastFailure::Rejected);
    }
}
