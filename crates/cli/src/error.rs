//! CLI error types with recovery hints.

use thiserror::Error;

/// Errors raised by terminal input handling before any network call.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid Lightning invoice: {0}")]
    InvalidLightningInvoice(String),

    #[error("Invalid Spark address: {0}")]
    InvalidSparkAddress(String),

    #[error("Invalid Bitcoin address: {0}")]
    InvalidBitcoinAddress(String),

    #[error("Invalid LNURL: {0}")]
    InvalidLnurl(String),

    #[error("Invalid payment destination: {0}")]
    UnknownDestination(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl CliError {
    /// A suggestion the user can act on to resolve the error.
    pub fn recovery_hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidLightningInvoice(_) => Some(
                "Lightning invoices start with 'lnbc' (mainnet), 'lntb' (testnet), or 'lnbcrt' (regtest).",
            ),
            Self::InvalidSparkAddress(_) => Some(
                "Spark addresses start with 'sp1', 'spt1', or 'sprt1'. Check that you copied the full address.",
            ),
            Self::InvalidBitcoinAddress(_) => Some(
                "Bitcoin addresses start with 'bc1' (mainnet), 'tb1' (testnet), or 'bcrt1' (regtest).",
            ),
            Self::InvalidLnurl(_) => Some(
                "LNURL should be a bech32-encoded URL starting with 'lnurl' or a Lightning address (user@domain.com).",
            ),
            Self::UnknownDestination(_) => Some(
                "Supported formats: Lightning invoice (lnbc...), Spark address (sp1...), Bitcoin address (bc1...), or LNURL.",
            ),
            Self::InvalidAmount(_) => {
                Some("Amount must be a positive whole number of satoshis (e.g. 1000).")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_variant_has_a_hint() {
        let variants = [
            CliError::InvalidLightningInvoice("x".to_string()),
            CliError::InvalidSparkAddress("x".to_string()),
            CliError::InvalidBitcoinAddress("x".to_string()),
            CliError::InvalidLnurl("x".to_string()),
            CliError::UnknownDestination("x".to_string()),
            CliError::InvalidAmount("x".to_string()),
        ];
        for error in variants {
            assert!(error.recovery_hint().is_some(), "missing hint for {error}");
        }
    }

    #[test]
    fn test_invoice_hint_names_prefixes() {
        let hint = CliError::InvalidLightningInvoice("bad".to_string())
            .recovery_hint()
            .unwrap();
        assert!(hint.contains("lnbc"));
        assert!(hint.contains("lnbcrt"));
    }
}
