//! CLI tool for checkout payment-field validation.
//!
//! # Usage
//!
//! ```bash
//! # Validate a card number
//! checkout-validator card "4532 0151 1283 0366"
//!
//! # Validate an expiry month and year (2 or 4 digit year)
//! checkout-validator expiry 12 28
//!
//! # Validate a CVV
//! checkout-validator cvv 123
//!
//! # Validate a full checkout form
//! checkout-validator checkout --name "Ada" --card 4532015112830366 --month 12 --year 28 --cvv 123
//!
//! # Format or mask a card number
//! checkout-validator format 4532015112830366
//! checkout-validator mask 4532015112830366
//! ```

use checkout_validator::checkout::{CheckoutForm, CheckoutValidation};
use checkout_validator::expiry::{self, YearMonth};
use checkout_validator::{cvv, format, mask, validate_card_number};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "checkout-validator")]
#[command(author, version, about = "Checkout payment-field validation tool")]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a card number (Luhn check)
    Card {
        /// Card number to validate (non-digits are ignored)
        card_number: String,
    },

    /// Validate an expiry month and year
    Expiry {
        /// Expiry month (1-12)
        month: String,

        /// Expiry year (YY or YYYY)
        year: String,

        /// Reference month as YYYY-MM instead of today
        #[arg(long, value_parser = parse_year_month)]
        now: Option<YearMonth>,
    },

    /// Validate a CVV
    Cvv {
        /// CVV to validate (exactly 3 digits)
        cvv: String,
    },

    /// Validate a full checkout form
    Checkout {
        /// Name on the card
        #[arg(long, default_value = "")]
        name: String,

        /// Card number
        #[arg(long, default_value = "")]
        card: String,

        /// Expiry month
        #[arg(long, default_value = "")]
        month: String,

        /// Expiry year
        #[arg(long, default_value = "")]
        year: String,

        /// CVV
        #[arg(long, default_value = "")]
        cvv: String,
    },

    /// Format a card number in groups of four
    Format {
        /// Card number to format
        card_number: String,

        /// Separator to use
        #[arg(short, long, default_value = " ")]
        separator: String,
    },

    /// Mask a card number, keeping the last four digits
    Mask {
        /// Card number to mask
        card_number: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_year_month(s: &str) -> Result<YearMonth, String> {
    let (year, month) = s
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got {}", s))?;
    let year: i32 = year.parse().map_err(|_| format!("invalid year: {}", year))?;
    let month: u8 = month.parse().map_err(|_| format!("invalid month: {}", month))?;
    YearMonth::new(year, month).ok_or_else(|| format!("invalid month: {}", month))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let valid = match cli.command {
        Commands::Card { card_number } => cmd_card(&card_number, cli.output),
        Commands::Expiry { month, year, now } => {
            cmd_expiry(&month, &year, now.unwrap_or_else(YearMonth::now), cli.output)
        }
        Commands::Cvv { cvv: cvv_input } => cmd_cvv(&cvv_input, cli.output),
        Commands::Checkout {
            name,
            card,
            month,
            year,
            cvv: cvv_input,
        } => {
            let form = CheckoutForm::new(name, card, month, year, cvv_input);
            cmd_checkout(&form, cli.output)
        }
        Commands::Format {
            card_number,
            separator,
        } => {
            println!("{}", format::format_with_separator(&card_number, &separator));
            true
        }
        Commands::Mask { card_number } => {
            println!("{}", mask::mask_string(&card_number));
            true
        }
    };

    if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn cmd_card(card_number: &str, output: OutputFormat) -> bool {
    let result = validate_card_number(card_number);

    match output {
        OutputFormat::Text => match &result {
            Ok(card) => {
                println!("Valid: yes");
                println!("Digits: {}", card.length());
                println!("Masked: {}", card.masked());
            }
            Err(e) => {
                println!("Valid: no");
                println!("Error: {}", e);
            }
        },
        OutputFormat::Json => {
            let value = match &result {
                Ok(card) => json!({
                    "valid": true,
                    "digits": card.length(),
                    "masked": card.masked(),
                }),
                Err(e) => json!({ "valid": false, "error": e.to_string() }),
            };
            println!("{}", value);
        }
    }

    result.is_ok()
}

fn cmd_expiry(month: &str, year: &str, now: YearMonth, output: OutputFormat) -> bool {
    let result = expiry::validate_expiry_at(month, year, now);

    match output {
        OutputFormat::Text => match &result {
            Ok(exp) => {
                println!("Valid: yes");
                println!("Month: {:02}", exp.month());
                println!("Year: {}", exp.year());
                println!("Formatted: {}", exp.format_short());
                println!("Months Until Expiry: {}", exp.months_until_expiry_at(now));
            }
            Err(e) => {
                println!("Valid: no");
                println!("Error: {}", e);
            }
        },
        OutputFormat::Json => {
            let value = match &result {
                Ok(exp) => json!({
                    "valid": true,
                    "month": exp.month(),
                    "year": exp.year(),
                    "formatted": exp.format_short(),
                    "months_until_expiry": exp.months_until_expiry_at(now),
                }),
                Err(e) => json!({ "valid": false, "error": e.to_string() }),
            };
            println!("{}", value);
        }
    }

    result.is_ok()
}

fn cmd_cvv(cvv_input: &str, output: OutputFormat) -> bool {
    let result = cvv::validate_cvv(cvv_input);

    match output {
        OutputFormat::Text => match &result {
            Ok(_) => println!("Valid: yes"),
            Err(e) => {
                println!("Valid: no");
                println!("Error: {}", e);
            }
        },
        OutputFormat::Json => {
            let value = match &result {
                Ok(_) => json!({ "valid": true }),
                Err(e) => json!({ "valid": false, "error": e.to_string() }),
            };
            println!("{}", value);
        }
    }

    result.is_ok()
}

fn cmd_checkout(form: &CheckoutForm, output: OutputFormat) -> bool {
    let validation = form.validate();

    match output {
        OutputFormat::Text => {
            println!(
                "Can Submit: {}",
                if validation.can_submit() { "yes" } else { "no" }
            );
            for (field, error) in validation.errors() {
                println!("{}: {} ({})", field, error.message(), error);
            }
        }
        OutputFormat::Json => println!("{}", checkout_json(&validation)),
    }

    validation.can_submit()
}

/// JSON shape shared with the REST `/checkout/validate` response.
fn checkout_json(validation: &CheckoutValidation) -> serde_json::Value {
    let errors: serde_json::Map<String, serde_json::Value> = validation
        .errors()
        .map(|(field, error)| (field.key().to_string(), json!(error.message())))
        .collect();
    json!({ "canSubmit": validation.can_submit(), "errors": errors })
}
