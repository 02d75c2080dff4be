//! # Scanner Register Loop
//!
//! A HID barcode scanner types the QR payload and presses Enter, so every
//! stdin line that is not a register command is treated as a scan.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Line                      Action                                       │
//! │  ────                      ──────                                       │
//! │  CLIÑ123                   scan (anything that is not a command)        │
//! │  amount 1500.50            ticket amount                                │
//! │  ref F-1029                reference (folio)                            │
//! │  desc Compra mostrador     description ("desc" alone clears it)         │
//! │  points 30                 override redemption points                   │
//! │  suggested                 redemption follows the suggestion again      │
//! │  acc | accumulate          POST acumular-qr                             │
//! │  redeem                    POST canjear-qr                              │
//! │  balance | history         re-fetch / list movements                    │
//! │  clear | help | quit       reset / usage / exit                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use anyhow::{anyhow, bail};
use puntos_client::{LoyaltyClient, Register};
use puntos_core::{AccrualRate, Money};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

const USAGE: &str = "\
Commands:
  <scan>            scan a customer QR (CLI:<id>)
  amount <n.nn>     ticket amount
  ref <text>        reference / folio
  desc [text]       description (empty clears)
  points <n>        points to redeem (override)
  suggested         use the suggested redemption
  acc               accumulate points
  redeem            redeem points
  balance           refresh the balance
  history           list the customer's movements
  clear             start over
  quit              exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Scan(String),
    Amount(Money),
    Reference(String),
    Description(Option<String>),
    RedeemPoints(i64),
    UseSuggested,
    Accumulate,
    Redeem,
    Balance,
    History,
    Clear,
    Help,
    Quit,
}

/// Parses one stdin line.
///
/// Keywords are case-insensitive; a line whose first word is not a keyword
/// is passed through untouched as scanner text.
pub fn parse_input(line: &str) -> anyhow::Result<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Empty);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (trimmed, ""),
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "amount" => Input::Amount(rest.parse()?),
        "ref" => {
            if rest.is_empty() {
                bail!("usage: ref <text>");
            }
            Input::Reference(rest.to_string())
        }
        "desc" => Input::Description(Some(rest.to_string()).filter(|d| !d.is_empty())),
        "points" => Input::RedeemPoints(
            rest.parse()
                .map_err(|_| anyhow!("usage: points <whole number>"))?,
        ),
        "suggested" => Input::UseSuggested,
        "acc" | "accumulate" => Input::Accumulate,
        "redeem" => Input::Redeem,
        "balance" => Input::Balance,
        "history" => Input::History,
        "clear" => Input::Clear,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Scan(line.to_string()),
    };
    Ok(input)
}

fn render(register: &Register<LoyaltyClient>) {
    let scan = register
        .current_scan()
        .map(|s| s.normalized.as_str())
        .unwrap_or("—");
    let (customer, available) = match register.balance() {
        Some(b) => (b.customer_name.as_str(), format!("{} pts", b.available)),
        None => ("—", "—".to_string()),
    };
    let ticket = register.ticket();

    println!("──────────────────────────────────────────────");
    println!("QR: {}   Customer: {}   Available: {}", scan, customer, available);
    println!(
        "Amount: {}   Ref: {}   Desc: {}",
        ticket.amount,
        if ticket.reference.is_empty() {
            "—"
        } else {
            ticket.reference.as_str()
        },
        ticket.description.as_deref().unwrap_or("—"),
    );
    println!(
        "Accumulate: {} pts   Redeem: {} pts{}   (suggested {})",
        register.suggested_accumulation(),
        register.redemption_points(),
        if register.is_redemption_edited() {
            " (edited)"
        } else {
            ""
        },
        register.suggested_redemption(),
    );
    if let Some(movement) = register.last_movement() {
        println!("Last: {}", movement);
    }
    if let Some(notice) = register.notice() {
        println!("{}", notice);
    }
}

/// Runs the register until `quit` or end of input.
pub async fn run(client: LoyaltyClient, rate: AccrualRate) -> anyhow::Result<()> {
    if !client.session().is_authenticated().await {
        bail!("not logged in; run `puntos-caja login <user>` first");
    }

    let mut register = Register::new(client, rate);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Scan a customer QR. Type `help` for commands.");

    while let Some(line) = lines.next_line().await? {
        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        debug!(?input, "Register input");

        // Failures are already on the notice line; the loop keeps going.
        let outcome = match input {
            Input::Empty => continue,
            Input::Quit => break,
            Input::Help => {
                println!("{}", USAGE);
                continue;
            }
            Input::Scan(raw) => register.scan(&raw).await,
            Input::Amount(amount) => {
                register.set_ticket_amount(amount);
                Ok(())
            }
            Input::Reference(reference) => {
                register.set_reference(reference);
                Ok(())
            }
            Input::Description(description) => {
                register.set_description(description);
                Ok(())
            }
            Input::RedeemPoints(points) => {
                register.set_redemption_points(points);
                Ok(())
            }
            Input::UseSuggested => {
                register.use_suggested();
                Ok(())
            }
            Input::Accumulate => register.accumulate().await.map(|_| ()),
            Input::Redeem => register.redeem().await.map(|_| ()),
            Input::Balance => register.refresh_balance().await,
            Input::History => match register.load_history().await {
                Ok(movements) if movements.is_empty() => {
                    println!("No movements yet.");
                    Ok(())
                }
                Ok(movements) => {
                    for movement in movements {
                        println!("  {}", movement);
                    }
                    Ok(())
                }
                Err(e) => {
                    println!("Could not load history: {}", e);
                    Err(e)
                }
            },
            Input::Clear => {
                register.clear();
                Ok(())
            }
        };

        if let Err(e) = outcome {
            if e.is_auth_error() {
                println!("{}", e);
                bail!("session ended; log in again");
            }
        }

        render(&register);
    }

    Ok(())
}
