//! # puntos-client: Loyalty Backend Client
//!
//! Talks to the loyalty backend and keeps the cashier's register state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Puntos Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 puntos-caja (terminal app)                      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ puntos-client (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ register │─►│   api    │─►│   auth   │  │    config    │   │   │
//! │  │   │ (state)  │  │ (reqwest)│  │ (token)  │  │ (toml + env) │   │   │
//! │  │   └──────────┘  └────┬─────┘  └──────────┘  └──────────────┘   │   │
//! │  │                      │ customer (/app/*)                        │   │
//! │  └──────────────────────┼──────────────────────────────────────────┘   │
//! │                         │ HTTP/JSON                                     │
//! │                         ▼                                               │
//! │                  loyalty backend (external)                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use puntos_client::{ClientConfig, LoyaltyClient, Register};
//!
//! # async fn run() -> puntos_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let client = LoyaltyClient::new(&config)?;
//! client.login("cajero1", "secreto").await?;
//!
//! let mut register = Register::new(client, config.accrual_rate());
//! register.scan("CLIÑ42\n").await?;
//! register.set_ticket_amount("1500.50".parse()?);
//! register.accumulate().await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod customer;
pub mod error;
pub mod register;

pub use api::{LoyaltyBackend, LoyaltyClient};
pub use auth::{Session, TokenInfo};
pub use config::ClientConfig;
pub use customer::Registration;
pub use error::{ClientError, ClientResult};
pub use register::{Notice, NoticeLevel, Register};
