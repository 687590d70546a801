//! Local signing of backend-built transactions and ownership proofs.
//!
//! The backend hands out unsigned transactions as base64-encoded bincode
//! [`VersionedTransaction`]s; secrets, addresses and message signatures use base58.

use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret as _, SecretString};
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer as _;
use solana_sdk::signer::keypair::keypair_from_seed;
use solana_sdk::transaction::VersionedTransaction;

use crate::Result;
use crate::error::Error;

const SEED_LEN: usize = 32;
const KEYPAIR_LEN: usize = 64;

/// Signs on behalf of a single wallet.
///
/// Every method may suspend, so implementations backed by a remote signer or a
/// hardware wallet fit behind the same interface as [`LocalSigner`].
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Signs a base64 wire-format transaction and returns it re-encoded.
    async fn sign_transaction(&self, unsigned_transaction: &str) -> Result<String>;

    /// Signs the UTF-8 bytes of `message` and returns the base58 signature.
    async fn sign_message(&self, message: &str) -> Result<String>;

    /// Returns the base58 wallet address.
    async fn address(&self) -> Result<String>;
}

/// Signer holding a base58 secret key in memory.
///
/// The keypair is derived from the secret on first use and cached for the
/// lifetime of the signer. Accepted secrets decode to either a 32-byte seed or a
/// 64-byte `seed || public key` keypair.
pub struct LocalSigner {
    secret: SecretString,
    keypair: OnceLock<Keypair>,
}

impl LocalSigner {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            keypair: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn from_base58(secret: &str) -> Self {
        Self::new(SecretString::from(secret))
    }

    /// Returns the cached keypair, deriving it first if needed.
    ///
    /// Two callers racing on first use may both derive; the first one stored wins
    /// and both results are identical.
    pub fn keypair(&self) -> Result<&Keypair> {
        if let Some(keypair) = self.keypair.get() {
            return Ok(keypair);
        }

        let keypair = derive_keypair(self.secret.expose_secret())?;
        Ok(self.keypair.get_or_init(|| keypair))
    }

    fn sign_transaction_sync(&self, unsigned_transaction: &str) -> Result<String> {
        let keypair = self.keypair()?;

        let bytes = BASE64
            .decode(unsigned_transaction.trim())
            .map_err(|e| Error::signing_with_source("transaction is not valid base64", e))?;
        let mut transaction: VersionedTransaction = bincode::deserialize(&bytes)
            .map_err(|e| Error::signing_with_source("failed to decode transaction", e))?;

        let pubkey = keypair.pubkey();
        let required = usize::from(transaction.message.header().num_required_signatures);
        let index = transaction
            .message
            .static_account_keys()
            .iter()
            .take(required)
            .position(|key| *key == pubkey)
            .ok_or_else(|| {
                Error::signing(format!(
                    "{pubkey} is not a required signer of this transaction"
                ))
            })?;

        let signature = keypair
            .try_sign_message(&transaction.message.serialize())
            .map_err(|e| Error::signing_with_source("failed to sign transaction", e))?;

        transaction
            .signatures
            .resize(required, Signature::default());
        if let Some(slot) = transaction.signatures.get_mut(index) {
            *slot = signature;
        }

        let encoded = bincode::serialize(&transaction)
            .map_err(|e| Error::signing_with_source("failed to encode signed transaction", e))?;
        Ok(BASE64.encode(encoded))
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("secret", &"[REDACTED]")
            .field(
                "address",
                &self.keypair.get().map(|keypair| keypair.pubkey().to_string()),
            )
            .finish()
    }
}

#[async_trait]
impl TransactionSigner for LocalSigner {
    async fn sign_transaction(&self, unsigned_transaction: &str) -> Result<String> {
        self.sign_transaction_sync(unsigned_transaction)
    }

    async fn sign_message(&self, message: &str) -> Result<String> {
        let keypair = self.keypair()?;
        let signature = keypair
            .try_sign_message(message.as_bytes())
            .map_err(|e| Error::signing_with_source("failed to sign message", e))?;

        Ok(signature.to_string())
    }

    async fn address(&self) -> Result<String> {
        Ok(self.keypair()?.pubkey().to_string())
    }
}

fn derive_keypair(encoded: &str) -> Result<Keypair> {
    let bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|e| Error::signing_with_source("secret key is not valid base58", e))?;

    if bytes.len() != SEED_LEN && bytes.len() != KEYPAIR_LEN {
        return Err(Error::signing(format!(
            "Invalid private key length: expected {SEED_LEN} or {KEYPAIR_LEN} bytes, got {}",
            bytes.len()
        )));
    }

    let (seed, public) = bytes.split_at(SEED_LEN);
    let keypair = keypair_from_seed(seed)
        .map_err(|e| Error::signing(format!("failed to derive keypair: {e}")))?;

    if !public.is_empty() && public != keypair.pubkey().as_ref() {
        return Err(Error::signing(
            "secret key does not match its embedded public key",
        ));
    }

    Ok(keypair)
}
