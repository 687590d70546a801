//! Client SDK for the Darkfibre trading API.
//!
//! Trades are built by the backend, checked and signed locally, then submitted:
//!
//! ```rust,no_run
//! use darkfibre_client_sdk::types::{BuyRequest, Priority};
//! use darkfibre_client_sdk::{Client, ClientConfig};
//! use rust_decimal_macros::dec;
//! use secrecy::SecretString;
//!
//! # async fn run() -> darkfibre_client_sdk::Result<()> {
//! let config = ClientConfig::builder()
//!     .api_key(SecretString::from("df_..."))
//!     .build();
//! let client = Client::new(config, SecretString::from("<base58 secret key>"))?;
//!
//! let result = client
//!     .buy(
//!         BuyRequest::builder()
//!             .mint("<token mint>")
//!             .sol_amount(dec!(0.002))
//!             .slippage(dec!(0.05))
//!             .priority(Priority::Fast)
//!             .max_price_impact(dec!(0.02))
//!             .build(),
//!     )
//!     .await?;
//! println!("{} landed in slot {}", result.signature, result.slot);
//! # Ok(())
//! # }
//! ```
//!
//! No background tasks are spawned and nothing is persisted. Enable the `tracing`
//! feature for request and pipeline logging.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod limits;
mod serde_helpers;
pub mod signer;
mod trade;
pub mod transport;
pub mod types;

pub use client::Client;
pub use config::{ClientConfig, RawClientConfig};
pub use error::Error;
pub use limits::TradeLimits;
pub use signer::{LocalSigner, TransactionSigner};

pub type Result<T> = std::result::Result<T, Error>;

/// Production API base URL.
pub const DEFAULT_HOST: &str = "https://api.darkfibre.dev/";
