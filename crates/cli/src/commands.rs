//! One-shot wallet commands.
//!
//! Each handler builds a request from its arguments, awaits a single
//! wallet call, prints selected response fields, and propagates the
//! failure after logging it.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use sparkterm_wallet::config::{resolve_api_key, resolve_storage_dir};
use sparkterm_wallet::{
    generate_mnemonic, mnemonic_from_env, normalize_mnemonic, seed_from_mnemonic, Network,
    SparkWallet, WalletConfig,
};
use tracing::error;

use crate::format::{self, print_output};
use crate::validation::{validate_amount, Destination};

#[derive(Subcommand)]
pub enum Command {
    /// Interactive numbered menu (the default when no command is given)
    Menu,
    /// Show the wallet balance
    Balance(BalanceArgs),
    /// Create an invoice or show a receive address
    Receive(ReceiveArgs),
    /// Parse a payment input (invoice, address, lnurl)
    Parse(ParseArgs),
    /// Send a payment (Lightning invoice, Spark or Bitcoin address)
    Send(SendArgs),
    /// Payment history and lookups
    Payments(PaymentsArgs),
    /// Force a wallet sync
    Sync,
    /// Generate a new BIP39 seed phrase
    Seed(SeedArgs),
}

/// Wallet connection options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct WalletOptions {
    /// Mnemonic phrase (12 or 24 words)
    #[arg(long, global = true, conflicts_with_all = ["stdin", "mnemonic_file"])]
    pub mnemonic: Option<String>,
    /// Read the mnemonic from stdin
    #[arg(long, global = true, conflicts_with_all = ["mnemonic", "mnemonic_file"])]
    pub stdin: bool,
    /// Read the mnemonic from a file
    #[arg(long, global = true, conflicts_with_all = ["mnemonic", "stdin"])]
    pub mnemonic_file: Option<PathBuf>,
    /// Optional BIP39 passphrase
    #[arg(long, global = true, default_value = "")]
    pub passphrase: String,
    /// Network (defaults to the NETWORK env var, then regtest)
    #[arg(long, global = true, value_enum)]
    pub network: Option<NetworkArg>,
    /// Breez API key (required for mainnet)
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    /// Storage directory for the SDK's local state
    #[arg(long, global = true)]
    pub storage_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[value(rename_all = "kebab-case")]
pub enum NetworkArg {
    Mainnet,
    Testnet,
    Signet,
    Regtest,
}

impl From<NetworkArg> for Network {
    fn from(value: NetworkArg) -> Self {
        match value {
            NetworkArg::Mainnet => Network::Mainnet,
            NetworkArg::Testnet => Network::Testnet,
            NetworkArg::Signet => Network::Signet,
            NetworkArg::Regtest => Network::Regtest,
        }
    }
}

#[derive(Args)]
pub struct BalanceArgs {
    /// Force a sync before returning the balance
    #[arg(long)]
    pub ensure_synced: bool,
}

#[derive(Args)]
pub struct ReceiveArgs {
    /// Receive method
    #[arg(long, value_enum, default_value = "bolt11")]
    pub method: ReceiveMethodArg,
    /// Invoice amount in sats (omit for a zero-amount invoice)
    #[arg(long)]
    pub amount: Option<u64>,
    /// Invoice description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Invoice expiry in seconds from now
    #[arg(long)]
    pub expiry_secs: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy)]
#[value(rename_all = "kebab-case")]
pub enum ReceiveMethodArg {
    Bolt11,
    SparkAddress,
    Bitcoin,
}

#[derive(Args)]
pub struct ParseArgs {
    /// Input to parse
    pub input: String,
}

#[derive(Args)]
pub struct SendArgs {
    /// Payment request (invoice or address)
    pub payment_request: String,
    /// Amount in sats (required for zero-amount invoices and bare addresses)
    #[arg(long)]
    pub amount: Option<u64>,
    /// Optional idempotency key (UUID)
    #[arg(long)]
    pub idempotency_key: Option<String>,
}

#[derive(Args)]
pub struct PaymentsArgs {
    #[command(subcommand)]
    pub command: PaymentsCommand,
}

#[derive(Subcommand)]
pub enum PaymentsCommand {
    /// List payments, newest first
    List(PaymentsListArgs),
    /// Get a payment by id
    Get(PaymentsGetArgs),
}

#[derive(Args)]
pub struct PaymentsListArgs {
    /// Number of payments to show
    #[arg(long, default_value = "10")]
    pub limit: u32,
    /// Number of payments to skip
    #[arg(long, default_value = "0")]
    pub offset: u32,
}

#[derive(Args)]
pub struct PaymentsGetArgs {
    /// Payment id
    pub payment_id: String,
}

#[derive(Args)]
pub struct SeedArgs {
    /// Number of words in the phrase (12 or 24)
    #[arg(long, default_value = "12")]
    pub words: u16,
}

#[derive(Serialize)]
struct StatusOutput {
    ok: bool,
}

#[derive(Serialize)]
struct AddressOutput {
    address: String,
}

#[derive(Serialize)]
struct MnemonicOutput {
    mnemonic: String,
}

/// Resolve configuration: CLI flags beat environment, environment beats
/// defaults.
pub fn build_config(options: &WalletOptions) -> Result<WalletConfig> {
    let mut config = WalletConfig::from_env()?;
    if let Some(network) = options.network {
        config.network = network.into();
    }
    config.api_key = resolve_api_key(options.api_key.clone());
    config.storage_dir = resolve_storage_dir(options.storage_dir.clone());
    Ok(config)
}

/// Resolve the seed phrase and open a wallet connection.
pub async fn build_wallet(options: &WalletOptions) -> Result<SparkWallet> {
    let config = build_config(options)?;
    let mnemonic = resolve_mnemonic(options)?;
    let seed = seed_from_mnemonic(&mnemonic, &options.passphrase)?;
    let wallet = SparkWallet::connect(seed, config).await?;
    Ok(wallet)
}

fn resolve_mnemonic(options: &WalletOptions) -> Result<String> {
    if options.stdin {
        return read_stdin_trimmed();
    }
    if let Some(mnemonic) = &options.mnemonic {
        return Ok(normalize_mnemonic(mnemonic));
    }
    if let Some(path) = &options.mnemonic_file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read mnemonic file: {path:?}"))?;
        let normalized = normalize_mnemonic(&contents);
        if normalized.is_empty() {
            anyhow::bail!("Mnemonic file is empty");
        }
        return Ok(normalized);
    }
    mnemonic_from_env().ok_or_else(|| {
        anyhow::anyhow!("Mnemonic required. Use --mnemonic, --mnemonic-file, --stdin, or set SEED_PHRASE")
    })
}

fn read_stdin_trimmed() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read from stdin")?;
    let normalized = normalize_mnemonic(&input);
    if normalized.is_empty() {
        anyhow::bail!("No input provided on stdin");
    }
    Ok(normalized)
}

pub async fn balance(options: &WalletOptions, json: bool, args: BalanceArgs) -> Result<()> {
    let wallet = build_wallet(options).await?;
    let result = wallet.get_info(args.ensure_synced).await;
    wallet.disconnect().await.ok();

    let info = result?;
    if json {
        print_output(&info, true)?;
    } else {
        println!("Balance: {} sats", info.balance_sats);
    }
    Ok(())
}

pub async fn receive(options: &WalletOptions, json: bool, args: ReceiveArgs) -> Result<()> {
    let wallet = build_wallet(options).await?;
    match args.method {
        ReceiveMethodArg::Bolt11 => {
            let result = wallet
                .create_bolt11_invoice(args.amount, args.description, args.expiry_secs)
                .await;
            wallet.disconnect().await.ok();

            let response = result?;
            if json {
                print_output(&response, true)?;
            } else {
                println!("Lightning invoice:");
                println!("{}", response.payment_request);
            }
        }
        ReceiveMethodArg::SparkAddress => {
            let result = wallet.spark_address().await;
            wallet.disconnect().await.ok();
            print_address(result?, json)?;
        }
        ReceiveMethodArg::Bitcoin => {
            let result = wallet.bitcoin_address().await;
            wallet.disconnect().await.ok();
            print_address(result?, json)?;
        }
    }
    Ok(())
}

fn print_address(address: String, json: bool) -> Result<()> {
    if json {
        print_output(&AddressOutput { address }, true)
    } else {
        println!("{address}");
        Ok(())
    }
}

pub async fn parse(json: bool, args: ParseArgs) -> Result<()> {
    let parsed = sparkterm_wallet::parse_input(&args.input).await?;
    print_output(&parsed, json)
}

pub async fn send(options: &WalletOptions, json: bool, args: SendArgs) -> Result<()> {
    let destination = Destination::classify(&args.payment_request)?;
    if let Some(amount) = args.amount {
        validate_amount(amount)?;
    }

    let wallet = build_wallet(options).await?;
    let result = async {
        let prepare_response = wallet
            .prepare_send_payment(&destination.normalized, args.amount)
            .await?;
        wallet
            .send_payment(prepare_response, args.idempotency_key)
            .await
    }
    .await;
    wallet.disconnect().await.ok();

    match result {
        Ok(response) => {
            if json {
                print_output(&response, true)?;
            } else {
                println!("Payment sent");
                format::print_payment(&response.payment);
            }
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "payment failed");
            eprintln!("Payment failed: {}", err.user_friendly_message());
            if err.balance_unaffected() {
                eprintln!("Your balance was not affected.");
            }
            Err(err.into())
        }
    }
}

pub async fn payments(options: &WalletOptions, json: bool, args: PaymentsArgs) -> Result<()> {
    match args.command {
        PaymentsCommand::List(args) => {
            let wallet = build_wallet(options).await?;
            let result = wallet
                .list_payments(Some(args.limit), Some(args.offset))
                .await;
            wallet.disconnect().await.ok();

            let payments = result?;
            if json {
                print_output(&payments, true)?;
            } else {
                format::print_payment_table(&payments);
            }
        }
        PaymentsCommand::Get(args) => {
            let wallet = build_wallet(options).await?;
            let result = wallet.get_payment(&args.payment_id).await;
            wallet.disconnect().await.ok();

            let payment = result?;
            if json {
                print_output(&payment, true)?;
            } else {
                format::print_payment(&payment);
            }
        }
    }
    Ok(())
}

pub async fn sync(options: &WalletOptions, json: bool) -> Result<()> {
    let wallet = build_wallet(options).await?;
    let result = wallet.sync().await;
    wallet.disconnect().await.ok();

    result?;
    if json {
        print_output(&StatusOutput { ok: true }, true)?;
    } else {
        println!("Wallet synced");
    }
    Ok(())
}

pub fn seed_new(json: bool, args: SeedArgs) -> Result<()> {
    let mnemonic = generate_mnemonic(args.words)?;
    if json {
        print_output(&MnemonicOutput { mnemonic }, true)?;
    } else {
        println!("{mnemonic}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_flag_beats_environment() {
        std::env::remove_var("NETWORK");
        let options = WalletOptions {
            mnemonic: None,
            stdin: false,
            mnemonic_file: None,
            passphrase: String::new(),
            network: Some(NetworkArg::Signet),
            api_key: None,
            storage_dir: None,
        };
        let config = build_config(&options).expect("config");
        assert_eq!(config.network, Network::Signet);
    }

    #[test]
    fn test_storage_dir_flag_is_used() {
        let options = WalletOptions {
            mnemonic: None,
            stdin: false,
            mnemonic_file: None,
            passphrase: String::new(),
            network: Some(NetworkArg::Regtest),
            api_key: None,
            storage_dir: Some(PathBuf::from("/tmp/sparkterm-flag")),
        };
        let config = build_config(&options).expect("config");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/sparkterm-flag"));
    }

    #[test]
    fn test_mnemonic_flag_is_normalized() {
        let options = WalletOptions {
            mnemonic: Some("  abandon   abandon\tabout ".to_string()),
            stdin: false,
            mnemonic_file: None,
            passphrase: String::new(),
            network: None,
            api_key: None,
            storage_dir: None,
        };
        let mnemonic = resolve_mnemonic(&options).expect("mnemonic");
        assert_eq!(mnemonic, "abandon abandon about");
    }

    #[test]
    fn test_mnemonic_file_wins_over_env() {
        let path = std::env::temp_dir().join("sparkterm-mnemonic-test.txt");
        std::fs::write(&path, "legal winner thank year\n").expect("write file");

        let options = WalletOptions {
            mnemonic: None,
            stdin: false,
            mnemonic_file: Some(path.clone()),
            passphrase: String::new(),
            network: None,
            api_key: None,
            storage_dir: None,
        };
        let mnemonic = resolve_mnemonic(&options).expect("mnemonic");
        assert_eq!(mnemonic, "legal winner thank year");

        std::fs::remove_file(&path).ok();
    }
}
