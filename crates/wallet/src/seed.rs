//! Seed phrase handling: normalization, validation, generation.
//!
//! Key derivation happens inside the Breez SDK; this module only prepares
//! and checks the BIP39 phrase the SDK consumes.

use bip39::Mnemonic;
use breez_sdk_spark::Seed;
use rand::RngCore;

use crate::error::WalletError;

/// Collapse whitespace so phrases copied from files or prompts compare equal.
pub fn normalize_mnemonic(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Validate a BIP39 phrase and build the SDK seed from it.
///
/// An empty passphrase means no passphrase.
pub fn seed_from_mnemonic(mnemonic: &str, passphrase: &str) -> Result<Seed, WalletError> {
    let normalized = normalize_mnemonic(mnemonic);
    if normalized.is_empty() {
        return Err(WalletError::MissingMnemonic);
    }
    Mnemonic::parse(&normalized).map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;

    Ok(Seed::Mnemonic {
        mnemonic: normalized,
        passphrase: if passphrase.is_empty() {
            None
        } else {
            Some(passphrase.to_string())
        },
    })
}

/// Generate a fresh 12 or 24 word phrase from OS entropy.
pub fn generate_mnemonic(words: u16) -> Result<String, WalletError> {
    let mut entropy = match words {
        12 => [0u8; 16].to_vec(),
        24 => [0u8; 32].to_vec(),
        _ => {
            return Err(WalletError::InvalidMnemonic(
                "word count must be 12 or 24".to_string(),
            ))
        }
    };

    let mut rng = rand::rng();
    rng.fill_bytes(&mut entropy);
    let mnemonic =
        Mnemonic::from_entropy(&entropy).map_err(|e| WalletError::InvalidMnemonic(e.to_string()))?;
    Ok(mnemonic.to_string())
}

/// Resolve the seed phrase from the environment.
///
/// Checks `SEED_PHRASE` first, then `SPARK_MNEMONIC`.
pub fn mnemonic_from_env() -> Option<String> {
    for var in ["SEED_PHRASE", "SPARK_MNEMONIC"] {
        if let Ok(value) = std::env::var(var) {
            let normalized = normalize_mnemonic(&value);
            if !normalized.is_empty() {
                return Some(normalized);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MNEMONIC: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(
            normalize_mnemonic("  abandon\tabandon\n about  "),
            "abandon abandon about"
        );
        assert_eq!(normalize_mnemonic("   "), "");
    }

    #[test]
    fn test_seed_from_valid_mnemonic() {
        let seed = seed_from_mnemonic(TEST_MNEMONIC, "").expect("valid mnemonic");
        match seed {
            Seed::Mnemonic {
                mnemonic,
                passphrase,
            } => {
                assert_eq!(mnemonic, TEST_MNEMONIC);
                assert!(passphrase.is_none());
            }
            _ => panic!("expected mnemonic seed"),
        }
    }

    #[test]
    fn test_seed_carries_passphrase() {
        let seed = seed_from_mnemonic(TEST_MNEMONIC, "hunter2").expect("valid mnemonic");
        match seed {
            Seed::Mnemonic { passphrase, .. } => {
                assert_eq!(passphrase.as_deref(), Some("hunter2"));
            }
            _ => panic!("expected mnemonic seed"),
        }
    }

    #[test]
    fn test_seed_rejects_invalid_phrase() {
        let result = seed_from_mnemonic("not a real seed phrase at all", "");
        assert!(matches!(result, Err(WalletError::InvalidMnemonic(_))));
    }

    #[test]
    fn test_seed_rejects_empty_phrase() {
        assert!(matches!(
            seed_from_mnemonic("   ", ""),
            Err(WalletError::MissingMnemonic)
        ));
    }

    #[test]
    fn test_generate_mnemonic_word_counts() {
        let twelve = generate_mnemonic(12).expect("12 words");
        assert_eq!(twelve.split_whitespace().count(), 12);

        let twenty_four = generate_mnemonic(24).expect("24 words");
        assert_eq!(twenty_four.split_whitespace().count(), 24);

        assert!(matches!(
            generate_mnemonic(13),
            Err(WalletError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn test_generated_mnemonic_round_trips() {
        let phrase = generate_mnemonic(12).expect("12 words");
        assert!(seed_from_mnemonic(&phrase, "").is_ok());
    }
}
