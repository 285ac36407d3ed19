//! Interactive console menu.
//!
//! Opens one wallet connection, then loops: print the menu, read a
//! numeric choice, run the matching operation, report failures without
//! leaving the loop. Option 9 disconnects and exits.

use std::io::{self, Write};

use anyhow::Result;
use sparkterm_wallet::SparkWallet;
use tracing::error;

use crate::error::CliError;
use crate::format;
use crate::validation::{validate_amount, Destination, DestinationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Balance,
    CreateInvoice,
    DepositAddress,
    ParseInput,
    SendLightning,
    SendOnchain,
    ListPayments,
    PaymentDetails,
    Quit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Balance),
            "2" => Some(Self::CreateInvoice),
            "3" => Some(Self::DepositAddress),
            "4" => Some(Self::ParseInput),
            "5" => Some(Self::SendLightning),
            "6" => Some(Self::SendOnchain),
            "7" => Some(Self::ListPayments),
            "8" => Some(Self::PaymentDetails),
            "9" | "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub async fn run(wallet: &SparkWallet) -> Result<()> {
    println!(
        "sparkterm — Spark console wallet [{}]",
        wallet.config().network.as_str()
    );
    println!("Type a number and press Enter.");

    loop {
        print_menu();
        let Ok(input) = prompt("> ") else {
            break; // stdin closed
        };
        if input.is_empty() {
            continue;
        }

        let Some(choice) = MenuChoice::parse(&input) else {
            println!("Unknown option '{input}'. Enter a number from 1 to 9.");
            continue;
        };
        if choice == MenuChoice::Quit {
            break;
        }

        if let Err(err) = dispatch(wallet, choice).await {
            report_error(&err);
        }
    }

    println!("Disconnecting...");
    wallet.disconnect().await?;
    println!("Goodbye!");
    Ok(())
}

fn print_menu() {
    println!();
    println!(" 1) Show balance              6) Send on-chain payment");
    println!(" 2) Create Lightning invoice  7) List payments");
    println!(" 3) On-chain deposit address  8) Show payment details");
    println!(" 4) Parse payment input       9) Quit");
    println!(" 5) Send Lightning payment");
}

async fn dispatch(wallet: &SparkWallet, choice: MenuChoice) -> Result<()> {
    match choice {
        MenuChoice::Balance => show_balance(wallet).await,
        MenuChoice::CreateInvoice => create_invoice(wallet).await,
        MenuChoice::DepositAddress => deposit_address(wallet).await,
        MenuChoice::ParseInput => parse_input(wallet).await,
        MenuChoice::SendLightning => send_lightning(wallet).await,
        MenuChoice::SendOnchain => send_onchain(wallet).await,
        MenuChoice::ListPayments => list_payments(wallet).await,
        MenuChoice::PaymentDetails => payment_details(wallet).await,
        MenuChoice::Quit => Ok(()),
    }
}

async fn show_balance(wallet: &SparkWallet) -> Result<()> {
    let info = wallet.get_info(true).await?;
    println!("Balance: {} sats", info.balance_sats);
    Ok(())
}

async fn create_invoice(wallet: &SparkWallet) -> Result<()> {
    let amount = prompt_optional_amount("Amount in sats (empty for any amount): ")?;
    let description = prompt("Description (optional): ")?;

    let response = wallet.create_bolt11_invoice(amount, description, None).await?;
    println!();
    println!("Lightning invoice:");
    println!("{}", response.payment_request);
    Ok(())
}

async fn deposit_address(wallet: &SparkWallet) -> Result<()> {
    let address = wallet.bitcoin_address().await?;
    println!("On-chain deposit address:");
    println!("{address}");
    Ok(())
}

async fn parse_input(wallet: &SparkWallet) -> Result<()> {
    let input = prompt("Payment input (invoice, address, lnurl): ")?;
    if input.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    let parsed = wallet.parse(&input).await?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

async fn send_lightning(wallet: &SparkWallet) -> Result<()> {
    let input = prompt("Lightning invoice: ")?;
    if input.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    let destination = Destination::classify(&input)?;
    if destination.kind != DestinationKind::LightningInvoice {
        return Err(CliError::InvalidLightningInvoice(format!(
            "got a {}",
            destination.kind.as_str()
        ))
        .into());
    }

    let amount = prompt_optional_amount("Amount in sats (empty if encoded in the invoice): ")?;
    send(wallet, &destination.normalized, amount).await
}

async fn send_onchain(wallet: &SparkWallet) -> Result<()> {
    let input = prompt("Bitcoin address: ")?;
    if input.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    let destination = Destination::classify(&input)?;
    if destination.kind != DestinationKind::BitcoinAddress {
        return Err(CliError::InvalidBitcoinAddress(format!(
            "got a {}",
            destination.kind.as_str()
        ))
        .into());
    }

    let amount = prompt_required_amount("Amount in sats: ")?;
    send(wallet, &destination.normalized, Some(amount)).await
}

async fn send(wallet: &SparkWallet, payment_request: &str, amount: Option<u64>) -> Result<()> {
    println!("Sending...");
    match wallet.send_payment_simple(payment_request, amount).await {
        Ok(response) => {
            println!("Payment sent");
            format::print_payment(&response.payment);
            Ok(())
        }
        Err(err) => {
            error!(error = %err, "payment failed");
            eprintln!("Payment failed: {}", err.user_friendly_message());
            if err.balance_unaffected() {
                eprintln!("Your balance was not affected.");
            }
            Ok(())
        }
    }
}

async fn list_payments(wallet: &SparkWallet) -> Result<()> {
    let limit = prompt_count("How many payments (default 10): ", 10)?;
    let payments = wallet.list_payments(Some(limit), None).await?;
    format::print_payment_table(&payments);
    Ok(())
}

async fn payment_details(wallet: &SparkWallet) -> Result<()> {
    let payment_id = prompt("Payment id: ")?;
    if payment_id.is_empty() {
        println!("Cancelled.");
        return Ok(());
    }

    let payment = wallet.get_payment(&payment_id).await?;
    format::print_payment(&payment);
    Ok(())
}

fn report_error(err: &anyhow::Error) {
    error!(error = %err, "menu action failed");
    eprintln!("Error: {err}");
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        if let Some(hint) = cli_err.recovery_hint() {
            eprintln!("Hint: {hint}");
        }
    }
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        anyhow::bail!("input stream closed");
    }
    Ok(line.trim().to_string())
}

fn parse_optional_u64(input: &str) -> Result<Option<u64>, CliError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<u64>()
        .map(Some)
        .map_err(|_| CliError::InvalidAmount(format!("'{trimmed}' is not a whole number")))
}

fn prompt_optional_amount(label: &str) -> Result<Option<u64>> {
    let input = prompt(label)?;
    let amount = parse_optional_u64(&input)?;
    if let Some(amount) = amount {
        validate_amount(amount)?;
    }
    Ok(amount)
}

fn prompt_required_amount(label: &str) -> Result<u64> {
    prompt_optional_amount(label)?.ok_or_else(|| {
        anyhow::Error::from(CliError::InvalidAmount("amount is required".to_string()))
    })
}

fn prompt_count(label: &str, default: u32) -> Result<u32> {
    let input = prompt(label)?;
    match parse_optional_u64(&input)? {
        Some(count) => u32::try_from(count)
            .map_err(|_| anyhow::Error::from(CliError::InvalidAmount(format!("{count} is too large")))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_numbers() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Balance));
        assert_eq!(MenuChoice::parse("2"), Some(MenuChoice::CreateInvoice));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::DepositAddress));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::ParseInput));
        assert_eq!(MenuChoice::parse("5"), Some(MenuChoice::SendLightning));
        assert_eq!(MenuChoice::parse("6"), Some(MenuChoice::SendOnchain));
        assert_eq!(MenuChoice::parse("7"), Some(MenuChoice::ListPayments));
        assert_eq!(MenuChoice::parse("8"), Some(MenuChoice::PaymentDetails));
        assert_eq!(MenuChoice::parse("9"), Some(MenuChoice::Quit));
    }

    #[test]
    fn test_menu_choice_quit_aliases() {
        for alias in ["q", "quit", "exit"] {
            assert_eq!(MenuChoice::parse(alias), Some(MenuChoice::Quit));
        }
    }

    #[test]
    fn test_menu_choice_rejects_garbage() {
        assert_eq!(MenuChoice::parse("0"), None);
        assert_eq!(MenuChoice::parse("10"), None);
        assert_eq!(MenuChoice::parse("balance"), None);
    }

    #[test]
    fn test_parse_optional_u64() {
        assert_eq!(parse_optional_u64("").unwrap(), None);
        assert_eq!(parse_optional_u64("  ").unwrap(), None);
        assert_eq!(parse_optional_u64("1000").unwrap(), Some(1000));
        assert_eq!(parse_optional_u64(" 42 ").unwrap(), Some(42));
        assert!(matches!(
            parse_optional_u64("12.5"),
            Err(CliError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_optional_u64("-5"),
            Err(CliError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_optional_u64("sats"),
            Err(CliError::InvalidAmount(_))
        ));
    }
}
