#![allow(dead_code, reason = "not every test binary uses every helper")]

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use darkfibre_client_sdk::{Client, ClientConfig, LocalSigner};
use httpmock::MockServer;
use secrecy::SecretString;
use serde_json::{Value, json};
use solana_sdk::hash::Hash;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::message::{VersionedMessage, v0};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::signer::Signer as _;
use solana_sdk::transaction::VersionedTransaction;
use url::Url;

pub const API_KEY: &str = "df_test_0123456789";
pub const TOKEN_MINT: &str = "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin";
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";
pub const SUBMISSION_TOKEN: &str = "sub_7f3a9c";

pub fn secret() -> String {
    bs58::encode([42_u8; 32]).into_string()
}

pub fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .host(Url::parse(&server.base_url()).unwrap())
        .api_key(SecretString::from(API_KEY))
        .build()
}

pub fn client(server: &MockServer) -> Client {
    Client::new(config(server), SecretString::from(secret())).unwrap()
}

pub fn wallet() -> Pubkey {
    LocalSigner::from_base58(&secret())
        .keypair()
        .unwrap()
        .pubkey()
}

/// Base64 wire transaction with a single empty signature slot for [`wallet`].
pub fn unsigned_transaction() -> String {
    let payer = wallet();
    let instruction = Instruction::new_with_bytes(
        Pubkey::new_from_array([3; 32]),
        b"swap",
        vec![AccountMeta::new(payer, true)],
    );
    let message = v0::Message::try_compile(&payer, &[instruction], &[], Hash::default()).unwrap();
    let transaction = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::V0(message),
    };

    BASE64.encode(bincode::serialize(&transaction).unwrap())
}

pub fn build_response(price_impact: f64, priority_cost: f64) -> Value {
    json!({
        "submissionToken": SUBMISSION_TOKEN,
        "unsignedTransaction": unsigned_transaction(),
        "expiresAt": "2026-10-19T12:00:30Z",
        "platform": "pumpfun",
        "inputMint": SOL_MINT,
        "outputMint": TOKEN_MINT,
        "estimates": {
            "inputAmount": 0.002,
            "outputAmount": 69_420.5,
            "priceImpact": price_impact
        },
        "priorityCost": priority_cost
    })
}

pub fn submit_response(trade_result: Value) -> Value {
    json!({
        "signature": "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW",
        "status": "confirmed",
        "slot": 312_554_102_u64,
        "platform": "pumpfun",
        "inputMint": SOL_MINT,
        "outputMint": TOKEN_MINT,
        "tradeResult": trade_result,
        "priorityCost": 0.00004
    })
}
