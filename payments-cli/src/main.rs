//! Payments CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;

use payments_client::PaymentsClient;
use payments_types::{
    CreatePaymentMethodRequest, CreatePaymentRequest, CurrencyCode, CustomerId,
    ListCustomersParams, ListPaymentMethodsParams, ListPaymentsParams, ListRefundsParams,
    PaymentId, PaymentMethodId, PaymentMethodType, RefundId,
};

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Payment method operations
    PaymentMethod {
        #[command(subcommand)]
        action: PaymentMethodCommands,
    },
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Refund operations
    Refund {
        #[command(subcommand)]
        action: RefundCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Create a new customer
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
    },
    /// Get customer details
    Get {
        /// Customer ID (cus_...)
        id: String,
    },
    /// List customers
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum PaymentMethodCommands {
    /// Attach a card or bank account to a customer
    Create {
        #[arg(long)]
        customer: String,
        /// card or bank_account
        #[arg(long = "type", default_value = "card")]
        method_type: PaymentMethodType,
        /// Full card or account number; only the last four digits are stored
        #[arg(long)]
        number: String,
        #[arg(long)]
        exp_month: Option<u32>,
        #[arg(long)]
        exp_year: Option<i32>,
        #[arg(long)]
        cvc: Option<String>,
    },
    /// Get payment method details
    Get {
        /// Payment method ID (pm_...)
        id: String,
    },
    /// List payment methods
    List {
        /// Only this customer's payment methods
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Record a payment
    Create {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        payment_method: String,
        /// Amount in minor units (e.g. cents)
        #[arg(long)]
        amount: i64,
        #[arg(long, default_value = "usd")]
        currency: CurrencyCode,
        #[arg(long)]
        description: Option<String>,
    },
    /// Get payment details
    Get {
        /// Payment ID (pay_...)
        id: String,
    },
    /// List payments
    List {
        /// Only this customer's payments
        #[arg(long)]
        customer: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Subcommand)]
enum RefundCommands {
    /// Refund (part of) a payment
    Create {
        #[arg(long)]
        payment: String,
        /// Amount in minor units (e.g. cents)
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        reason: Option<String>,
    },
    /// Get refund details
    Get {
        /// Refund ID (ref_...)
        id: String,
    },
    /// List refunds
    List {
        /// Only refunds of this payment
        #[arg(long)]
        payment: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Customer { action } => match action {
            CustomerCommands::Create { email, name } => {
                print_json(&client.create_customer(&email, &name).await?)?;
            }
            CustomerCommands::Get { id } => {
                print_json(&client.get_customer(&CustomerId::new(id)).await?)?;
            }
            CustomerCommands::List { limit } => {
                let params = ListCustomersParams { limit };
                print_json(&client.list_customers(&params).await?)?;
            }
        },

        Commands::PaymentMethod { action } => match action {
            PaymentMethodCommands::Create {
                customer,
                method_type,
                number,
                exp_month,
                exp_year,
                cvc,
            } => {
                let req = CreatePaymentMethodRequest {
                    customer_id: CustomerId::new(customer),
                    method_type,
                    card_number: number,
                    exp_month,
                    exp_year,
                    cvc,
                };
                print_json(&client.create_payment_method(&req).await?)?;
            }
            PaymentMethodCommands::Get { id } => {
                print_json(&client.get_payment_method(&PaymentMethodId::new(id)).await?)?;
            }
            PaymentMethodCommands::List { customer, limit } => {
                let params = ListPaymentMethodsParams {
                    customer_id: customer.map(CustomerId::new),
                    limit,
                };
                print_json(&client.list_payment_methods(&params).await?)?;
            }
        },

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                customer,
                payment_method,
                amount,
                currency,
                description,
            } => {
                let req = CreatePaymentRequest {
                    amount,
                    currency,
                    customer_id: CustomerId::new(customer),
                    payment_method_id: PaymentMethodId::new(payment_method),
                    description,
                };
                print_json(&client.create_payment(&req).await?)?;
            }
            PaymentCommands::Get { id } => {
                print_json(&client.get_payment(&PaymentId::new(id)).await?)?;
            }
            PaymentCommands::List { customer, limit } => {
                let params = ListPaymentsParams {
                    customer_id: customer.map(CustomerId::new),
                    limit,
                };
                print_json(&client.list_payments(&params).await?)?;
            }
        },

        Commands::Refund { action } => match action {
            RefundCommands::Create {
                payment,
                amount,
                reason,
            } => {
                let refund = client
                    .create_refund(&PaymentId::new(payment), amount, reason)
                    .await?;
                print_json(&refund)?;
            }
            RefundCommands::Get { id } => {
                print_json(&client.get_refund(&RefundId::new(id)).await?)?;
            }
            RefundCommands::List { payment, limit } => {
                let params = ListRefundsParams {
                    payment_id: payment.map(PaymentId::new),
                    limit,
                };
                print_json(&client.list_refunds(&params).await?)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_payment_method_create() {
        let cli = Cli::try_parse_from([
            "payments",
            "--api-url",
            "http://localhost:9999",
            "payment-method",
            "create",
            "--customer",
            "cus_1",
            "--type",
            "bank_account",
            "--number",
            "000123456789",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://localhost:9999");
        match cli.command {
            Commands::PaymentMethod {
                action:
                    PaymentMethodCommands::Create {
                        method_type,
                        number,
                        exp_month,
                        ..
                    },
            } => {
                assert_eq!(method_type, PaymentMethodType::BankAccount);
                assert_eq!(number, "000123456789");
                assert_eq!(exp_month, None);
            }
            _ => panic!("expected payment-method create"),
        }
    }

    #[test]
    fn test_rejects_bad_currency() {
        let result = Cli::try_parse_from([
            "payments",
            "payment",
            "create",
            "--customer",
            "cus_1",
            "--payment-method",
            "pm_1",
            "--amount",
            "2000",
            "--currency",
            "dollars",
        ]);

        assert!(result.is_err());
    }
}
