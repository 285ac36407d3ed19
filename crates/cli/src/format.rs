//! Console rendering for payments and generic responses.

use anyhow::Result;
use serde::Serialize;
use sparkterm_wallet::{Payment, PaymentStatus, PaymentType};

/// Render a payment history table, newest first.
pub fn print_payment_table(payments: &[Payment]) {
    if payments.is_empty() {
        println!("  No payments yet.");
        return;
    }

    println!(
        "  {:<8} {:<10} {:>14} {:>12} {:<16}",
        "Type", "Status", "Amount", "Fee", "Date"
    );
    println!("  {}", "-".repeat(64));

    for payment in payments {
        println!(
            "  {:<8} {:<10} {:>14} {:>12} {:<16}",
            type_label(&payment.payment_type),
            status_label(&payment.status),
            format!("{} sats", payment.amount),
            fee_label(payment.fees),
            format_timestamp(payment.timestamp as i64),
        );
    }

    println!();
    println!("  Showing {} payment(s)", payments.len());
}

/// Render a single payment in detail.
pub fn print_payment(payment: &Payment) {
    println!("  Payment ID: {}", payment.id);
    println!("  Type:       {}", type_label(&payment.payment_type));
    println!("  Status:     {}", status_label(&payment.status));
    println!("  Amount:     {} sats", payment.amount);
    println!("  Fees:       {} sats", payment.fees);
    println!("  Date:       {}", format_timestamp(payment.timestamp as i64));
}

fn type_label(payment_type: &PaymentType) -> &'static str {
    match payment_type {
        PaymentType::Send => "SENT",
        PaymentType::Receive => "RECV",
    }
}

fn status_label(status: &PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Completed => "done",
        PaymentStatus::Pending => "pending",
        PaymentStatus::Failed => "FAILED",
    }
}

fn fee_label(fees: u128) -> String {
    if fees > 0 {
        format!("{fees} sats")
    } else {
        "-".to_string()
    }
}

fn format_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Print a response as pretty JSON or as flat key/value lines.
pub fn print_output<T: Serialize>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
        return Ok(());
    }

    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => {
            for (key, value) in map {
                let rendered = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => continue,
                    other => other.to_string(),
                };
                println!("{key}: {rendered}");
            }
        }
        other => println!("{other}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(&PaymentStatus::Completed), "done");
        assert_eq!(status_label(&PaymentStatus::Pending), "pending");
        assert_eq!(status_label(&PaymentStatus::Failed), "FAILED");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(type_label(&PaymentType::Send), "SENT");
        assert_eq!(type_label(&PaymentType::Receive), "RECV");
    }

    #[test]
    fn test_fee_label_hides_zero() {
        assert_eq!(fee_label(0), "-");
        assert_eq!(fee_label(12), "12 sats");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00");
        // Out-of-range timestamps degrade instead of panicking.
        assert_eq!(format_timestamp(i64::MAX), "unknown");
    }
}
