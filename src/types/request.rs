use bon::Builder;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::Result;
use crate::error::Error;
use crate::limits::TradeLimits;
use crate::types::{Priority, SwapMode};

/// Buy `mint` with `sol_amount` SOL.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct BuyRequest {
    #[builder(into)]
    pub mint: String,
    pub sol_amount: Decimal,
    /// Tolerated fractional price deviation, `0 <= slippage < 1`.
    pub slippage: Decimal,
    pub priority: Priority,
    /// Highest acceptable price impact as a fraction; checked before signing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_impact: Option<Decimal>,
    /// Highest acceptable priority fee in SOL; checked before signing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_cost: Option<Decimal>,
}

/// Sell `token_amount` of `mint` for SOL.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    #[builder(into)]
    pub mint: String,
    pub token_amount: Decimal,
    pub slippage: Decimal,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_impact: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_cost: Option<Decimal>,
}

/// Swap between two arbitrary mints.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    #[builder(into)]
    pub input_mint: String,
    #[builder(into)]
    pub output_mint: String,
    pub amount: Decimal,
    #[builder(default)]
    pub swap_mode: SwapMode,
    pub slippage: Decimal,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price_impact: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_priority_cost: Option<Decimal>,
}

/// Any of the three trade shapes. They share one build/sign/submit pipeline and
/// differ only in payload and build endpoint.
#[non_exhaustive]
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum TradeRequest {
    Buy(BuyRequest),
    Sell(SellRequest),
    Swap(SwapRequest),
}

impl TradeRequest {
    /// Build endpoint, relative to the API host.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            TradeRequest::Buy(_) => "tx/buy",
            TradeRequest::Sell(_) => "tx/sell",
            TradeRequest::Swap(_) => "tx/swap",
        }
    }

    #[must_use]
    pub fn limits(&self) -> TradeLimits {
        let (max_price_impact, max_priority_cost) = match self {
            TradeRequest::Buy(r) => (r.max_price_impact, r.max_priority_cost),
            TradeRequest::Sell(r) => (r.max_price_impact, r.max_priority_cost),
            TradeRequest::Swap(r) => (r.max_price_impact, r.max_priority_cost),
        };

        TradeLimits {
            max_price_impact,
            max_priority_cost,
        }
    }

    /// Local checks that need no network round-trip.
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            TradeRequest::Buy(r) => {
                require_mint("mint", &r.mint)?;
                require_positive("solAmount", r.sol_amount)?;
                require_slippage(r.slippage)?;
            }
            TradeRequest::Sell(r) => {
                require_mint("mint", &r.mint)?;
                require_positive("tokenAmount", r.token_amount)?;
                require_slippage(r.slippage)?;
            }
            TradeRequest::Swap(r) => {
                require_mint("inputMint", &r.input_mint)?;
                require_mint("outputMint", &r.output_mint)?;
                if r.input_mint == r.output_mint {
                    return Err(Error::validation_field(
                        "outputMint",
                        "input and output mint must differ",
                    ));
                }
                require_positive("amount", r.amount)?;
                require_slippage(r.slippage)?;
            }
        }

        self.limits().validate()
    }
}

impl From<BuyRequest> for TradeRequest {
    fn from(request: BuyRequest) -> Self {
        TradeRequest::Buy(request)
    }
}

impl From<SellRequest> for TradeRequest {
    fn from(request: SellRequest) -> Self {
        TradeRequest::Sell(request)
    }
}

impl From<SwapRequest> for TradeRequest {
    fn from(request: SwapRequest) -> Self {
        TradeRequest::Swap(request)
    }
}

fn require_mint(field: &str, mint: &str) -> Result<()> {
    if mint.trim().is_empty() {
        return Err(Error::validation_field(field, "mint cannot be empty"));
    }
    Ok(())
}

fn require_positive(field: &str, amount: Decimal) -> Result<()> {
    if amount <= Decimal::ZERO {
        return Err(Error::validation_field(
            field,
            format!("amount must be greater than zero, got {amount}"),
        ));
    }
    Ok(())
}

fn require_slippage(slippage: Decimal) -> Result<()> {
    if slippage.is_sign_negative() || slippage >= Decimal::ONE {
        return Err(Error::validation_field(
            "slippage",
            format!("slippage must satisfy 0 <= slippage < 1, got {slippage}"),
        ));
    }
    Ok(())
}
