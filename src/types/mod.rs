pub mod request;
pub mod response;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub use request::{BuyRequest, SellRequest, SwapRequest, TradeRequest};
pub use response::{
    BuildResult, FeeTier, ProfileResult, RegisterResult, SubmitResult, TradeAmounts,
    TradeEstimates, TransactionResult, Volume,
};
pub use rust_decimal::Decimal;

use crate::Result;
use crate::error::Error;

/// Fee-speed tier the backend maps to a compute-unit price.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Economy,
    Fast,
    Faster,
    Fastest,
}

impl Priority {
    pub fn parse(value: &str) -> Result<Priority> {
        match value.trim().to_ascii_lowercase().as_str() {
            "economy" | "eco" => Ok(Priority::Economy),
            "fast" => Ok(Priority::Fast),
            "faster" => Ok(Priority::Faster),
            "fastest" => Ok(Priority::Fastest),
            other => Err(Error::validation_field(
                "priority",
                format!("unknown priority `{other}`; expected one of: economy|fast|faster|fastest"),
            )),
        }
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Priority::parse(s)
    }
}

/// Whether a swap amount fixes the input side or the output side.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum SwapMode {
    /// `amount` is spent exactly; the output floats within slippage.
    #[default]
    ExactIn,
    /// `amount` is received exactly; the input floats within slippage.
    ExactOut,
}

impl SwapMode {
    pub fn parse(value: &str) -> Result<SwapMode> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exactin" | "exact_in" | "in" => Ok(SwapMode::ExactIn),
            "exactout" | "exact_out" | "out" => Ok(SwapMode::ExactOut),
            other => Err(Error::validation_field(
                "swapMode",
                format!("unknown swap mode `{other}`; expected ExactIn or ExactOut"),
            )),
        }
    }
}

impl FromStr for SwapMode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        SwapMode::parse(s)
    }
}
