use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::Result;
use crate::error::Error;
use crate::types::BuildResult;

pub(crate) const MAX_PRICE_IMPACT_FIELD: &str = "maxPriceImpact";
pub(crate) const MAX_PRIORITY_COST_FIELD: &str = "maxPriorityCost";

/// Caller ceilings checked against a build quote before anything is signed.
///
/// Unset ceilings are not checked.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradeLimits {
    /// Fraction, e.g. `0.02` allows up to two percent price impact.
    pub max_price_impact: Option<Decimal>,
    /// In SOL.
    pub max_priority_cost: Option<Decimal>,
}

impl TradeLimits {
    #[must_use]
    pub const fn with_max_price_impact(mut self, max_price_impact: Decimal) -> Self {
        self.max_price_impact = Some(max_price_impact);
        self
    }

    #[must_use]
    pub const fn with_max_priority_cost(mut self, max_priority_cost: Decimal) -> Self {
        self.max_priority_cost = Some(max_priority_cost);
        self
    }

    pub(crate) fn validate(self) -> Result<()> {
        if let Some(limit) = self.max_price_impact
            && limit.is_sign_negative()
        {
            return Err(Error::validation_field(
                MAX_PRICE_IMPACT_FIELD,
                format!("limit cannot be negative: {limit}"),
            ));
        }
        if let Some(limit) = self.max_priority_cost
            && limit.is_sign_negative()
        {
            return Err(Error::validation_field(
                MAX_PRIORITY_COST_FIELD,
                format!("limit cannot be negative: {limit}"),
            ));
        }
        Ok(())
    }

    /// Rejects a quote whose price impact or priority cost exceeds these ceilings.
    pub(crate) fn check(self, build: &BuildResult) -> Result<()> {
        if let Some(limit) = self.max_price_impact {
            let actual = build.estimates.price_impact;
            if actual > limit {
                return Err(Error::validation_field(
                    MAX_PRICE_IMPACT_FIELD,
                    format!(
                        "Price impact {:.2}% exceeds maximum allowed {:.2}%",
                        (actual * dec!(100)).round_dp(2),
                        (limit * dec!(100)).round_dp(2)
                    ),
                ));
            }
        }

        if let Some(limit) = self.max_priority_cost {
            let actual = build.priority_cost;
            if actual > limit {
                return Err(Error::validation_field(
                    MAX_PRIORITY_COST_FIELD,
                    format!(
                        "Priority cost {} SOL exceeds maximum allowed {} SOL",
                        actual.normalize(),
                        limit.normalize()
                    ),
                ));
            }
        }

        Ok(())
    }
}
