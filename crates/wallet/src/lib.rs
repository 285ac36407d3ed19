//! Spark wallet wrapper for the Breez SDK
//!
//! This crate wraps `breez-sdk-spark` behind a small typed surface for the
//! sparkterm console wallet: one method per SDK operation the wallet uses,
//! plus configuration resolution and seed-phrase handling. Everything that
//! matters — key derivation, Lightning routing, on-chain transaction
//! construction, persistence — happens inside the SDK.
//!
//! # Architecture
//!
//! ```text
//! SparkWallet
//!   ├─ WalletConfig (network, API key, storage dir — env + overrides)
//!   ├─ Seed (BIP39 phrase, validated locally, derived by the SDK)
//!   └─ Breez SDK client (all network and wallet ops)
//! ```
//!
//! # Example
//!
//! ```no_run
//! use sparkterm_wallet::{seed_from_mnemonic, SparkWallet, WalletConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let seed = seed_from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     "",
//! )?;
//! let wallet = SparkWallet::connect(seed, WalletConfig::default()).await?;
//!
//! let info = wallet.get_info(true).await?;
//! println!("Balance: {} sats", info.balance_sats);
//!
//! let invoice = wallet
//!     .create_bolt11_invoice(Some(1000), "Coffee".to_string(), None)
//!     .await?;
//! println!("Pay this invoice: {}", invoice.payment_request);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod seed;
pub mod wallet;

pub use config::{Network, WalletConfig, DEFAULT_STORAGE_DIR};
pub use error::WalletError;
pub use seed::{generate_mnemonic, mnemonic_from_env, normalize_mnemonic, seed_from_mnemonic};
pub use wallet::{parse_input, SparkWallet};

// Re-export the SDK types consumers format for display.
pub use breez_sdk_spark::{
    GetInfoResponse, InputType, Payment, PaymentDetails, PaymentMethod, PaymentStatus,
    PaymentType, PrepareSendPaymentResponse, ReceivePaymentResponse, Seed, SendPaymentResponse,
};
