//! Wallet registration and account profile.

use chrono::Utc;
use serde::Serialize;

use crate::Result;
use crate::signer::TransactionSigner;
use crate::transport::Transport;
use crate::types::response::RegisterResponse;
use crate::types::{ProfileResult, RegisterResult};

pub(crate) const REGISTER_PATH: &str = "auth/register";
pub(crate) const PROFILE_PATH: &str = "auth/profile";

/// Prefix of the ownership-proof message; the Unix time in milliseconds follows it.
pub const REGISTER_MESSAGE_PREFIX: &str = "darkfibre:";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    wallet_address: &'a str,
    message: &'a str,
    signature: &'a str,
}

/// Proves ownership of the signer's wallet and obtains an API key for it.
///
/// The key derivation and message signature happen before any network call, so
/// a malformed secret never reaches the backend.
pub(crate) async fn register<S>(transport: &Transport, signer: &S) -> Result<RegisterResult>
where
    S: TransactionSigner + ?Sized,
{
    let wallet_address = signer.address().await?;
    let message = format!("{REGISTER_MESSAGE_PREFIX}{}", Utc::now().timestamp_millis());
    let signature = signer.sign_message(&message).await?;

    #[cfg(feature = "tracing")]
    tracing::debug!(wallet_address = %wallet_address, "registering wallet");

    let response: RegisterResponse = transport
        .post(
            REGISTER_PATH,
            &RegisterRequest {
                wallet_address: &wallet_address,
                message: &message,
                signature: &signature,
            },
            None,
        )
        .await?;

    Ok(response.into())
}

pub(crate) async fn profile(transport: &Transport) -> Result<ProfileResult> {
    transport.get(PROFILE_PATH).await
}
