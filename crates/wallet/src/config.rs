//! Wallet configuration and environment resolution.
//!
//! Configuration comes from three places, in priority order: explicit CLI
//! overrides, environment variables (`NETWORK`, `BREEZ_API_KEY`/`SPARK_API_KEY`,
//! `STORAGE_DIR`), and defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use breez_sdk_spark::Network as SdkNetwork;
use serde::{Deserialize, Serialize};

use crate::error::WalletError;

/// Default directory for the SDK's local state.
pub const DEFAULT_STORAGE_DIR: &str = "./.data";

/// Bitcoin network the wallet operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Network {
    /// Bitcoin mainnet (API key required)
    Mainnet,
    /// Bitcoin testnet
    Testnet,
    /// Bitcoin signet
    Signet,
    /// Bitcoin regtest (local development)
    #[default]
    Regtest,
}

impl Network {
    /// Convert to the SDK network type.
    ///
    /// The Breez SDK only supports Mainnet and Regtest; all test networks
    /// (Testnet, Signet, Regtest) map to `SdkNetwork::Regtest`.
    pub fn to_sdk_network(self) -> SdkNetwork {
        match self {
            Network::Mainnet => SdkNetwork::Mainnet,
            Network::Testnet | Network::Signet | Network::Regtest => SdkNetwork::Regtest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Signet => "signet",
            Network::Regtest => "regtest",
        }
    }
}

impl FromStr for Network {
    type Err = WalletError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "bitcoin" | "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "signet" => Ok(Network::Signet),
            "regtest" => Ok(Network::Regtest),
            other => Err(WalletError::InvalidNetwork(other.to_string())),
        }
    }
}

/// Configuration for connecting a Spark wallet.
///
/// # API Key Requirements
///
/// - **Mainnet**: API key is **required** (get one from Breez)
/// - **Regtest/Testnet/Signet**: API key is optional
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Network to operate on
    pub network: Network,
    /// Breez API key (required for Mainnet)
    pub api_key: Option<String>,
    /// Storage directory for the SDK's local state
    pub storage_dir: PathBuf,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            network: Network::default(),
            api_key: None,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
        }
    }
}

impl WalletConfig {
    /// Resolve configuration from the environment.
    ///
    /// Reads `NETWORK` for the network selection, `BREEZ_API_KEY` (falling
    /// back to `SPARK_API_KEY`) for the API key, and `STORAGE_DIR` for the
    /// data directory. Missing variables fall back to defaults.
    pub fn from_env() -> Result<Self, WalletError> {
        let network = match env::var("NETWORK") {
            Ok(value) if !value.trim().is_empty() => value.parse()?,
            _ => Network::default(),
        };

        Ok(Self {
            network,
            api_key: resolve_api_key(None),
            storage_dir: resolve_storage_dir(None),
        })
    }

    /// Reject configurations that would fail once on the network.
    pub fn validate(&self) -> Result<(), WalletError> {
        if matches!(self.network, Network::Mainnet) && self.api_key.is_none() {
            return Err(WalletError::MissingApiKey);
        }
        Ok(())
    }
}

/// Resolve the Breez API key from an explicit value or the environment.
pub fn resolve_api_key(explicit: Option<String>) -> Option<String> {
    if let Some(key) = explicit {
        if !key.trim().is_empty() {
            return Some(key);
        }
    }
    for var in ["BREEZ_API_KEY", "SPARK_API_KEY"] {
        if let Ok(key) = env::var(var) {
            if !key.trim().is_empty() {
                return Some(key);
            }
        }
    }
    None
}

/// Resolve the storage directory from an explicit value or `STORAGE_DIR`.
pub fn resolve_storage_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    env::var("STORAGE_DIR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WalletConfig::default();
        assert_eq!(config.network, Network::Regtest);
        assert!(config.api_key.is_none());
        assert_eq!(config.storage_dir, PathBuf::from(DEFAULT_STORAGE_DIR));
    }

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("bitcoin".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("signet".parse::<Network>().unwrap(), Network::Signet);
        assert_eq!(" regtest ".parse::<Network>().unwrap(), Network::Regtest);
        assert!(matches!(
            "lightning".parse::<Network>(),
            Err(WalletError::InvalidNetwork(_))
        ));
    }

    #[test]
    fn test_sdk_network_mapping() {
        assert_eq!(Network::Mainnet.to_sdk_network(), SdkNetwork::Mainnet);
        assert_eq!(Network::Testnet.to_sdk_network(), SdkNetwork::Regtest);
        assert_eq!(Network::Signet.to_sdk_network(), SdkNetwork::Regtest);
        assert_eq!(Network::Regtest.to_sdk_network(), SdkNetwork::Regtest);
    }

    #[test]
    fn test_mainnet_requires_api_key() {
        let config = WalletConfig {
            network: Network::Mainnet,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(WalletError::MissingApiKey)
        ));

        let config = WalletConfig {
            network: Network::Mainnet,
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_regtest_does_not_require_api_key() {
        assert!(WalletConfig::default().validate().is_ok());
    }

    #[test]
    fn test_explicit_api_key_wins() {
        env::remove_var("BREEZ_API_KEY");
        env::remove_var("SPARK_API_KEY");
        assert_eq!(
            resolve_api_key(Some("explicit".to_string())),
            Some("explicit".to_string())
        );
        // Blank explicit values fall through to the environment.
        assert_eq!(resolve_api_key(Some("  ".to_string())), None);
    }

    #[test]
    fn test_explicit_storage_dir_wins() {
        assert_eq!(
            resolve_storage_dir(Some(PathBuf::from("/custom/path"))),
            PathBuf::from("/custom/path")
        );
    }
}
