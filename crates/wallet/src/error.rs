//! Error types for wallet operations.

use thiserror::Error;

/// Errors surfaced by the wallet wrapper.
///
/// Each variant maps one failure class of the underlying SDK call so
/// callers can report what operation failed without parsing strings.
#[derive(Debug, Error)]
pub enum WalletError {
    /// SDK connection could not be established.
    #[error("Failed to connect wallet: {0}")]
    InitializationFailed(String),

    #[error("Failed to query wallet info: {0}")]
    InfoQueryFailed(String),

    #[error("Failed to create payment request: {0}")]
    ReceiveFailed(String),

    #[error("Failed to parse payment input: {0}")]
    ParseFailed(String),

    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("Wallet sync failed: {0}")]
    SyncFailed(String),

    #[error("Failed to look up payment: {0}")]
    PaymentLookupFailed(String),

    /// BIP39 validation rejected the phrase.
    #[error("Invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("Seed phrase required. Set SEED_PHRASE or pass --mnemonic")]
    MissingMnemonic,

    #[error("Invalid network '{0}'. Expected mainnet, testnet, signet, or regtest")]
    InvalidNetwork(String),

    #[error("Mainnet requires a Breez API key. Set BREEZ_API_KEY or pass --api-key")]
    MissingApiKey,

    /// Catch-all for SDK failures outside the classes above.
    #[error("{0}")]
    Wallet(String),
}

impl WalletError {
    /// A short message suitable for direct display in the console.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InitializationFailed(detail) => {
                format!("Could not connect to the Spark network: {detail}")
            }
            Self::PaymentFailed(detail) => format!("The payment did not go through: {detail}"),
            other => other.to_string(),
        }
    }

    /// Returns true if this error cannot have moved funds.
    ///
    /// A failed send is the only case where money may already be in
    /// flight; everything else fails before touching the balance.
    pub fn balance_unaffected(&self) -> bool {
        !matches!(self, Self::PaymentFailed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_failure_may_affect_balance() {
        assert!(!WalletError::PaymentFailed("no route".to_string()).balance_unaffected());
    }

    #[test]
    fn test_pre_network_failures_leave_balance_alone() {
        assert!(WalletError::MissingMnemonic.balance_unaffected());
        assert!(WalletError::InvalidNetwork("x".to_string()).balance_unaffected());
        assert!(WalletError::InitializationFailed("refused".to_string()).balance_unaffected());
        assert!(WalletError::ParseFailed("garbage".to_string()).balance_unaffected());
    }

    #[test]
    fn test_messages_name_the_fix() {
        assert!(WalletError::MissingApiKey.to_string().contains("BREEZ_API_KEY"));
        assert!(WalletError::MissingMnemonic.to_string().contains("SEED_PHRASE"));
    }
}
