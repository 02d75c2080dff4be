//! # CLI Commands
//!
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports, shared prompts)
//! ├── session.rs  ◄─── Cashier login / logout
//! ├── scanner.rs  ◄─── Interactive register loop
//! ├── lookup.rs   ◄─── Balance, history, QR payload
//! ├── customer.rs ◄─── Member account flows (/app/*)
//! └── config.rs   ◄─── Show / write caja.toml
//! ```

pub mod config;
pub mod customer;
pub mod lookup;
pub mod scanner;
pub mod session;

use std::io::{self, BufRead, Write};

use anyhow::Context;

/// Prompts on stderr and reads one line from stdin.
///
/// Used for passwords not given on the command line; the input is echoed.
pub(crate) fn prompt_line(label: &str) -> anyhow::Result<String> {
    eprint!("{}: ", label);
    io::stderr().flush().context("flushing prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
