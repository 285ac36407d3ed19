//! Pre-flight classification of payment destinations.
//!
//! The SDK's input parser is authoritative; these checks only catch
//! obvious typos before a network round-trip, so a pasted destination
//! fails fast with a hint instead of a remote error.

use crate::error::CliError;

/// What a destination string looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationKind {
    LightningInvoice,
    SparkAddress,
    BitcoinAddress,
    Lnurl,
    LightningAddress,
}

impl DestinationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LightningInvoice => "Lightning invoice",
            Self::SparkAddress => "Spark address",
            Self::BitcoinAddress => "Bitcoin address",
            Self::Lnurl => "LNURL",
            Self::LightningAddress => "Lightning address",
        }
    }
}

/// A destination that passed shape validation.
#[derive(Debug, Clone)]
pub struct Destination {
    pub kind: DestinationKind,
    /// Trimmed (and, where case-insensitive, lowercased) input to hand
    /// to the SDK.
    pub normalized: String,
}

impl Destination {
    /// Classify and shape-check a destination string.
    pub fn classify(input: &str) -> Result<Self, CliError> {
        let trimmed = input.trim();
        let lower = trimmed.to_lowercase();

        if trimmed.is_empty() {
            return Err(CliError::UnknownDestination(
                "destination cannot be empty".to_string(),
            ));
        }

        const INVOICE_PREFIXES: [&str; 4] = ["lnbcrt", "lntbs", "lnbc", "lntb"];
        const SPARK_PREFIXES: [&str; 3] = ["sprt1", "spt1", "sp1"];
        const SEGWIT_PREFIXES: [&str; 3] = ["bcrt1", "bc1", "tb1"];

        if INVOICE_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            return Self::lightning_invoice(&lower);
        }
        if SPARK_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            return Self::spark_address(trimmed, &lower);
        }
        if SEGWIT_PREFIXES.iter().any(|p| lower.starts_with(p)) {
            return Self::bitcoin_address(trimmed);
        }
        if lower.starts_with("lnurl") {
            return Self::lnurl(&lower);
        }
        // '@' before the single-char legacy prefixes: a lightning address
        // may start with 'm', 'n', '1', '2', or '3'.
        if trimmed.contains('@') && !trimmed.starts_with('@') {
            return Self::lightning_address(trimmed);
        }
        if trimmed.starts_with(['1', '3', 'm', 'n', '2']) {
            return Self::bitcoin_address(trimmed);
        }

        Err(CliError::UnknownDestination(format!(
            "could not determine the type of '{}'",
            truncate(trimmed, 30)
        )))
    }

    fn lightning_invoice(lower: &str) -> Result<Self, CliError> {
        if lower.len() < 50 {
            return Err(CliError::InvalidLightningInvoice(
                "invoice is too short to be valid".to_string(),
            ));
        }
        if !lower.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CliError::InvalidLightningInvoice(
                "invoice contains invalid characters".to_string(),
            ));
        }
        Ok(Self {
            kind: DestinationKind::LightningInvoice,
            normalized: lower.to_string(),
        })
    }

    fn spark_address(trimmed: &str, lower: &str) -> Result<Self, CliError> {
        if lower.len() < 20 {
            return Err(CliError::InvalidSparkAddress(
                "address is too short to be valid".to_string(),
            ));
        }
        Ok(Self {
            kind: DestinationKind::SparkAddress,
            normalized: trimmed.to_string(),
        })
    }

    fn bitcoin_address(trimmed: &str) -> Result<Self, CliError> {
        let is_segwit = trimmed.starts_with("bc1")
            || trimmed.starts_with("tb1")
            || trimmed.starts_with("bcrt1");

        if is_segwit && trimmed.len() < 42 {
            return Err(CliError::InvalidBitcoinAddress(
                "SegWit address is too short".to_string(),
            ));
        }
        if !is_segwit && (trimmed.len() < 26 || trimmed.len() > 35) {
            return Err(CliError::InvalidBitcoinAddress(
                "legacy address has invalid length".to_string(),
            ));
        }
        Ok(Self {
            kind: DestinationKind::BitcoinAddress,
            normalized: trimmed.to_string(),
        })
    }

    fn lnurl(lower: &str) -> Result<Self, CliError> {
        if lower.len() < 20 {
            return Err(CliError::InvalidLnurl(
                "LNURL is too short to be valid".to_string(),
            ));
        }
        Ok(Self {
            kind: DestinationKind::Lnurl,
            normalized: lower.to_string(),
        })
    }

    fn lightning_address(trimmed: &str) -> Result<Self, CliError> {
        let (user, domain) = trimmed.split_once('@').ok_or_else(|| {
            CliError::InvalidLnurl("expected user@domain format".to_string())
        })?;
        if user.is_empty() || domain.contains('@') {
            return Err(CliError::InvalidLnurl(
                "expected exactly one '@' with a username".to_string(),
            ));
        }
        if domain.is_empty() || !domain.contains('.') {
            return Err(CliError::InvalidLnurl(format!(
                "'{domain}' is not a valid domain"
            )));
        }
        Ok(Self {
            kind: DestinationKind::LightningAddress,
            normalized: trimmed.to_lowercase(),
        })
    }
}

/// Reject zero and absurd amounts before they reach the network.
pub fn validate_amount(amount_sats: u64) -> Result<(), CliError> {
    const MAX_SATS: u64 = 21_000_000 * 100_000_000;

    if amount_sats == 0 {
        return Err(CliError::InvalidAmount(
            "amount must be greater than 0 sats".to_string(),
        ));
    }
    if amount_sats > MAX_SATS {
        return Err(CliError::InvalidAmount(format!(
            "{amount_sats} sats exceeds the total Bitcoin supply"
        )));
    }
    Ok(())
}

fn truncate(value: &str, max: usize) -> String {
    if value.len() > max {
        format!("{}...", &value[..max])
    } else {
        value.to_string()
    }
}
