mod common;

use std::str::FromStr as _;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use darkfibre_client_sdk::error::{Api, Kind, Signing};
use darkfibre_client_sdk::{Client, ClientConfig};
use httpmock::prelude::*;
use rust_decimal_macros::dec;
use secrecy::{ExposeSecret as _, SecretString};
use serde_json::{Value, json};
use solana_sdk::signature::Signature;
use url::Url;

use crate::common::{API_KEY, client, secret, wallet};

fn unauthenticated(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .host(Url::parse(&server.base_url()).unwrap())
        .build()
}

#[tokio::test]
async fn register_proves_wallet_ownership() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let address = wallet().to_string();
    let captured = Arc::new(Mutex::new(None::<Vec<u8>>));
    let sink = Arc::clone(&captured);
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/register")
                .header_missing("authorization")
                .is_true(move |req: &HttpMockRequest| {
                    *sink.lock().unwrap() = Some(req.body_ref().to_vec());
                    true
                });
            then.status(200).json_body(json!({
                "apiKey": "df_live_fresh",
                "walletAddress": &address
            }));
        })
        .await;

    let before = Utc::now().timestamp_millis();
    let result = Client::register(&unauthenticated(&server), SecretString::from(secret())).await?;
    let after = Utc::now().timestamp_millis();

    register.assert_async().await;
    assert_eq!(result.api_key.expose_secret(), "df_live_fresh");
    assert_eq!(result.wallet_address, address);

    let body = captured.lock().unwrap().take().expect("register body");
    let body: Value = serde_json::from_slice(&body)?;
    assert_eq!(body["walletAddress"], address.as_str());

    let message = body["message"].as_str().expect("message");
    let millis: i64 = message
        .strip_prefix("darkfibre:")
        .expect("message prefix")
        .parse()?;
    assert!(
        (before..=after).contains(&millis),
        "{millis} not within [{before}, {after}]"
    );

    let signature = Signature::from_str(body["signature"].as_str().expect("signature"))?;
    assert!(
        signature.verify(wallet().as_ref(), message.as_bytes()),
        "signature must verify against the wallet over the exact message"
    );

    Ok(())
}

#[tokio::test]
async fn register_rejects_short_secret_before_any_call() {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST).path("/auth/register");
            then.status(200).json_body(json!({ "apiKey": "x", "walletAddress": "y" }));
        })
        .await;

    let short = bs58::encode([1_u8; 16]).into_string();
    let err = Client::register(&unauthenticated(&server), SecretString::from(short))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Signing);
    let reason = &err.downcast_ref::<Signing>().unwrap().reason;
    assert!(reason.contains("Invalid private key length"), "{reason}");
    register.assert_calls_async(0).await;
}

#[tokio::test]
async fn register_wallet_omits_api_key() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let register = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/auth/register")
                .header_missing("authorization");
            then.status(200).json_body(json!({
                "apiKey": "df_live_rotated",
                "walletAddress": wallet().to_string()
            }));
        })
        .await;

    let result = client(&server).register_wallet().await?;

    register.assert_async().await;
    assert_eq!(result.api_key.expose_secret(), "df_live_rotated");

    Ok(())
}

#[tokio::test]
async fn profile_uses_bearer_key() -> anyhow::Result<()> {
    let server = MockServer::start_async().await;
    let profile = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/auth/profile")
                .header("authorization", format!("Bearer {API_KEY}"));
            then.status(200).json_body(json!({
                "walletAddress": wallet().to_string(),
                "createdAt": "2026-03-02T09:15:00.000Z",
                "volume": { "sol30d": 42.5, "trades30d": 17 },
                "fee": { "bps": 25, "decimal": 0.0025, "nextBps": 20, "nextThresholdSol": 100 }
            }));
        })
        .await;

    let result = client(&server).profile().await?;

    profile.assert_async().await;
    assert_eq!(result.volume.trades_30d, 17);
    assert_eq!(result.fee.bps, 25);
    assert_eq!(result.fee.next_bps, Some(20));
    assert_eq!(result.fee.next_threshold_sol, Some(dec!(100)));

    Ok(())
}

#[tokio::test]
async fn profile_with_bad_key_is_api_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/auth/profile");
            then.status(401).json_body(json!({
                "error": { "code": "UNAUTHORIZED", "message": "Missing bearer token" }
            }));
        })
        .await;

    let err = client(&server).profile().await.unwrap_err();

    let api = err.downcast_ref::<Api>().unwrap();
    assert_eq!(api.status, 401);
    assert_eq!(api.code, "UNAUTHORIZED");
}
