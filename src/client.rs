use std::sync::Arc;
use std::time::Duration;

use reqwest::Client as ReqwestClient;
use secrecy::SecretString;

use crate::Result;
use crate::auth;
use crate::config::{ClientConfig, RawClientConfig};
use crate::signer::{LocalSigner, TransactionSigner};
use crate::trade;
use crate::transport::Transport;
use crate::types::{
    BuyRequest, ProfileResult, RegisterResult, SellRequest, SwapRequest, TradeRequest,
    TransactionResult,
};

/// Trading client: one API endpoint plus one wallet signer.
///
/// Calls are independent of each other. Concurrent trades on the same client
/// share only the signer's cached key, so sequencing dependent trades (e.g. not
/// selling before a buy settles) is up to the caller.
#[derive(Debug)]
pub struct Client<S = LocalSigner> {
    transport: Transport,
    signer: Arc<S>,
    submit_timeout: Option<Duration>,
}

impl<S> Clone for Client<S> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            signer: Arc::clone(&self.signer),
            submit_timeout: self.submit_timeout,
        }
    }
}

impl Client<LocalSigner> {
    /// Creates a client signing with a base58 secret key held in memory.
    pub fn new(config: ClientConfig, private_key: SecretString) -> Result<Self> {
        Self::with_signer(config, LocalSigner::new(private_key))
    }

    pub fn from_raw(raw: RawClientConfig) -> Result<Self> {
        let config = ClientConfig::from_raw(&raw)?;
        Self::new(config, raw.private_key)
    }

    /// Registers the wallet behind `private_key` and returns a fresh API key.
    ///
    /// Needs no API key. The returned key is shown only once by the backend; the
    /// caller must store it.
    pub async fn register(
        config: &ClientConfig,
        private_key: SecretString,
    ) -> Result<RegisterResult> {
        config.validate()?;
        let transport = Transport::new(config.resolved_host()?, None, config.resolved_timeout())?;

        auth::register(&transport, &LocalSigner::new(private_key)).await
    }

    /// Same as [`Client::register`] with a custom HTTP client.
    pub async fn register_with_client(
        config: &ClientConfig,
        private_key: SecretString,
        client: ReqwestClient,
    ) -> Result<RegisterResult> {
        config.validate()?;
        let transport = Transport::with_client(config.resolved_host()?, None, client);

        auth::register(&transport, &LocalSigner::new(private_key)).await
    }
}

impl<S: TransactionSigner> Client<S> {
    pub fn with_signer(config: ClientConfig, signer: S) -> Result<Self> {
        config.validate()?;
        let transport = Transport::new(
            config.resolved_host()?,
            config.api_key.clone(),
            config.resolved_timeout(),
        )?;

        Ok(Self::from_parts(transport, signer, config.submit_timeout))
    }

    /// Creates a client on top of a custom HTTP client. The config timeout is not
    /// applied; the reqwest client's own settings are used instead.
    pub fn with_signer_and_client(
        config: ClientConfig,
        signer: S,
        client: ReqwestClient,
    ) -> Result<Self> {
        config.validate()?;
        let transport =
            Transport::with_client(config.resolved_host()?, config.api_key.clone(), client);

        Ok(Self::from_parts(transport, signer, config.submit_timeout))
    }

    fn from_parts(transport: Transport, signer: S, submit_timeout: Option<Duration>) -> Self {
        Self {
            transport,
            signer: Arc::new(signer),
            submit_timeout,
        }
    }

    #[must_use]
    pub fn signer(&self) -> &S {
        &self.signer
    }

    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Wallet address of the signer.
    pub async fn address(&self) -> Result<String> {
        self.signer.address().await
    }

    pub async fn buy(&self, request: BuyRequest) -> Result<TransactionResult> {
        self.trade(request.into()).await
    }

    pub async fn sell(&self, request: SellRequest) -> Result<TransactionResult> {
        self.trade(request.into()).await
    }

    pub async fn swap(&self, request: SwapRequest) -> Result<TransactionResult> {
        self.trade(request.into()).await
    }

    /// Builds, checks, signs and submits any trade shape.
    pub async fn trade(&self, request: TradeRequest) -> Result<TransactionResult> {
        trade::execute(
            &self.transport,
            self.signer.as_ref(),
            self.submit_timeout,
            &request,
        )
        .await
    }

    /// Registers this client's own wallet. The client's API key, if any, is not sent.
    pub async fn register_wallet(&self) -> Result<RegisterResult> {
        let transport = Transport::with_client(
            self.transport.host().clone(),
            None,
            self.transport.http_client().clone(),
        );

        auth::register(&transport, self.signer.as_ref()).await
    }

    /// Account registration, rolling 30-day volume and fee tier.
    pub async fn profile(&self) -> Result<ProfileResult> {
        auth::profile(&self.transport).await
    }
}
