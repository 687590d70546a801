use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_with::{PickFirst, TimestampMilliSeconds, serde_as};

/// Unsigned transaction quoted by a build endpoint. Valid until `expires_at`
/// and submittable once.
#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildResult {
    pub submission_token: String,
    /// Base64 wire-format transaction awaiting the wallet signature.
    pub unsigned_transaction: String,
    #[serde_as(as = "PickFirst<(_, TimestampMilliSeconds<i64>)>")]
    pub expires_at: DateTime<Utc>,
    pub platform: String,
    pub input_mint: String,
    pub output_mint: String,
    pub estimates: TradeEstimates,
    /// Quoted priority fee in SOL.
    pub priority_cost: Decimal,
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEstimates {
    pub input_amount: Decimal,
    pub output_amount: Decimal,
    /// Fraction, e.g. `0.01` for one percent.
    pub price_impact: Decimal,
}

impl TradeEstimates {
    #[must_use]
    pub const fn amounts(&self) -> TradeAmounts {
        TradeAmounts {
            input_amount: self.input_amount,
            output_amount: self.output_amount,
        }
    }
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAmounts {
    pub input_amount: Decimal,
    pub output_amount: Decimal,
}

/// Outcome reported by the submit endpoint.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResult {
    pub signature: String,
    pub status: String,
    pub slot: u64,
    pub platform: String,
    pub input_mint: String,
    pub output_mint: String,
    /// `None` when the backend could not parse the settled amounts.
    #[serde(default)]
    pub trade_result: Option<TradeAmounts>,
    pub priority_cost: Decimal,
}

/// Result of a completed buy, sell or swap.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResult {
    pub signature: String,
    pub status: String,
    pub slot: u64,
    pub platform: String,
    pub input_mint: String,
    pub output_mint: String,
    /// Settled amounts, or the build estimates when settlement could not be parsed.
    pub trade_result: TradeAmounts,
    /// The priority fee quoted at build time and checked against `maxPriorityCost`,
    /// not necessarily the fee charged on-chain.
    pub priority_cost: Decimal,
}

impl TransactionResult {
    pub(crate) fn merge(build: &BuildResult, submit: SubmitResult) -> Self {
        Self {
            signature: submit.signature,
            status: submit.status,
            slot: submit.slot,
            platform: submit.platform,
            input_mint: submit.input_mint,
            output_mint: submit.output_mint,
            trade_result: submit
                .trade_result
                .unwrap_or_else(|| build.estimates.amounts()),
            priority_cost: build.priority_cost,
        }
    }
}

#[non_exhaustive]
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResult {
    pub wallet_address: String,
    #[serde_as(as = "PickFirst<(_, TimestampMilliSeconds<i64>)>")]
    pub created_at: DateTime<Utc>,
    pub volume: Volume,
    pub fee: FeeTier,
}

/// Rolling 30-day activity.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Volume {
    #[serde(rename = "sol30d")]
    pub sol_30d: Decimal,
    #[serde(rename = "trades30d")]
    pub trades_30d: u64,
}

/// Current fee tier. Both `next_*` fields are `None` at the top tier.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTier {
    pub bps: u32,
    pub decimal: Decimal,
    pub next_bps: Option<u32>,
    pub next_threshold_sol: Option<Decimal>,
}

/// Credentials issued by registration.
///
/// The API key is shown once and cannot be retrieved again; storing it is the
/// caller's responsibility. This crate never writes it anywhere.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct RegisterResult {
    pub api_key: SecretString,
    pub wallet_address: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisterResponse {
    pub(crate) api_key: String,
    pub(crate) wallet_address: String,
}

impl From<RegisterResponse> for RegisterResult {
    fn from(response: RegisterResponse) -> Self {
        Self {
            api_key: SecretString::from(response.api_key),
            wallet_address: response.wallet_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;
    use rust_decimal_macros::dec;
    use serde_json::json;

    use super::*;

    fn build_json() -> serde_json::Value {
        json!({
            "submissionToken": "tok-1",
            "unsignedTransaction": "AQ==",
            "expiresAt": "2026-01-01T00:00:30Z",
            "platform": "pumpfun",
            "inputMint": "So11111111111111111111111111111111111111112",
            "outputMint": "Mint111",
            "estimates": { "inputAmount": 0.002, "outputAmount": 1234.5, "priceImpact": 0.01 },
            "priorityCost": 0.00005
        })
    }

    #[test]
    fn build_result_accepts_rfc3339_and_millis() {
        let from_string: BuildResult = serde_json::from_value(build_json()).unwrap();

        let mut millis = build_json();
        millis["expiresAt"] = json!(1_767_225_630_000_i64);
        let from_millis: BuildResult = serde_json::from_value(millis).unwrap();

        let expected = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 30).unwrap();
        assert_eq!(from_string.expires_at, expected);
        assert_eq!(from_millis.expires_at, expected);
        assert_eq!(from_string.estimates.price_impact, dec!(0.01));
        assert_eq!(from_string.priority_cost, dec!(0.00005));
    }

    #[test]
    fn merge_falls_back_to_estimates() {
        let build: BuildResult = serde_json::from_value(build_json()).unwrap();
        let submit: SubmitResult = serde_json::from_value(json!({
            "signature": "sig",
            "status": "confirmed",
            "slot": 312_000_001_u64,
            "platform": "pumpfun",
            "inputMint": "So11111111111111111111111111111111111111112",
            "outputMint": "Mint111",
            "tradeResult": null,
            "priorityCost": 0.00004
        }))
        .unwrap();

        let merged = TransactionResult::merge(&build, submit);

        assert_eq!(merged.trade_result, build.estimates.amounts());
        assert_eq!(merged.priority_cost, dec!(0.00005));
        assert_eq!(merged.slot, 312_000_001);
    }

    #[test]
    fn merge_prefers_settled_amounts() {
        let build: BuildResult = serde_json::from_value(build_json()).unwrap();
        let submit: SubmitResult = serde_json::from_value(json!({
            "signature": "sig",
            "status": "confirmed",
            "slot": 7,
            "platform": "pumpfun",
            "inputMint": "a",
            "outputMint": "b",
            "tradeResult": { "inputAmount": 0.002, "outputAmount": 1200 },
            "priorityCost": 0.00004
        }))
        .unwrap();

        let merged = TransactionResult::merge(&build, submit);

        assert_eq!(merged.trade_result.output_amount, dec!(1200));
    }

    #[test]
    fn profile_top_tier_has_no_next() {
        let profile: ProfileResult = serde_json::from_value(json!({
            "walletAddress": "Wallet111",
            "createdAt": "2025-06-01T12:00:00.000Z",
            "volume": { "sol30d": 1520.25, "trades30d": 88 },
            "fee": { "bps": 10, "decimal": 0.001, "nextBps": null, "nextThresholdSol": null }
        }))
        .unwrap();

        assert_eq!(profile.volume.trades_30d, 88);
        assert_eq!(profile.volume.sol_30d, dec!(1520.25));
        assert_eq!(profile.fee.next_bps, None);
        assert_eq!(profile.fee.next_threshold_sol, None);
    }
}
