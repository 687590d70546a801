//! The buy / sell / swap pipeline.
//!
//! Every trade runs the same strictly ordered steps: request an unsigned
//! transaction from the build endpoint, check the quote against the caller's
//! ceilings, sign locally, submit, then merge the two responses. A quote that
//! breaks a ceiling is never signed, and nothing is submitted unsigned. The
//! first failure aborts the trade; no step is retried.

use std::time::Duration;

use serde::Serialize;

use crate::Result;
use crate::signer::TransactionSigner;
use crate::transport::Transport;
use crate::types::{BuildResult, SubmitResult, TradeRequest, TransactionResult};

pub(crate) const SUBMIT_PATH: &str = "tx/submit";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitRequest<'a> {
    submission_token: &'a str,
    signed_transaction: &'a str,
}

pub(crate) async fn execute<S>(
    transport: &Transport,
    signer: &S,
    submit_timeout: Option<Duration>,
    request: &TradeRequest,
) -> Result<TransactionResult>
where
    S: TransactionSigner + ?Sized,
{
    request.validate()?;

    let build: BuildResult = transport.post(request.path(), request, None).await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        path = request.path(),
        platform = %build.platform,
        input_mint = %build.input_mint,
        output_mint = %build.output_mint,
        price_impact = %build.estimates.price_impact,
        priority_cost = %build.priority_cost,
        expires_at = %build.expires_at,
        "received unsigned transaction"
    );

    request.limits().check(&build)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(path = request.path(), "quote within limits, signing transaction");

    let signed_transaction = signer.sign_transaction(&build.unsigned_transaction).await?;

    let submit: SubmitResult = transport
        .post(
            SUBMIT_PATH,
            &SubmitRequest {
                submission_token: &build.submission_token,
                signed_transaction: &signed_transaction,
            },
            submit_timeout,
        )
        .await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        signature = %submit.signature,
        status = %submit.status,
        slot = submit.slot,
        settled = submit.trade_result.is_some(),
        "transaction submitted"
    );

    Ok(TransactionResult::merge(&build, submit))
}
