//! HTTP plumbing shared by every endpoint.
//!
//! One attempt per call: nothing here retries or backs off. Failures are mapped,
//! in order, to:
//! 1. `TIMEOUT` / 408 when the call timed out,
//! 2. the backend's own `{error:{code,message}}` with the HTTP status,
//! 3. `NETWORK_ERROR` / 0 when no response was received,
//! 4. otherwise the original failure, unchanged ([`Kind::Status`] or [`Kind::Internal`]).
//!
//! [`Kind::Status`]: crate::error::Kind::Status
//! [`Kind::Internal`]: crate::error::Kind::Internal

use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::Result;
use crate::error::{
    Error, NETWORK_ERROR_CODE, NETWORK_ERROR_STATUS, TIMEOUT_CODE, TIMEOUT_STATUS,
};

/// Default per-call timeout.
///
/// Bounds the whole call, from connect to the last body byte, so it is never
/// looser than a socket-inactivity timeout of the same length.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// A single configured API endpoint with pooled connections.
#[derive(Clone, Debug)]
pub struct Transport {
    host: Url,
    api_key: Option<SecretString>,
    client: ReqwestClient,
}

impl Transport {
    /// Creates a transport with its own connection pool and the given default timeout.
    ///
    /// `timeout` covers the whole request, not just idle time on the socket.
    pub fn new(host: Url, api_key: Option<SecretString>, timeout: Duration) -> Result<Self> {
        let client = ReqwestClient::builder().timeout(timeout).build()?;
        Ok(Self::with_client(host, api_key, client))
    }

    /// Creates a transport on top of an existing reqwest client.
    ///
    /// A host without a trailing slash gets one, so a base path such as `/v1`
    /// survives joining endpoint paths.
    #[must_use]
    pub fn with_client(host: Url, api_key: Option<SecretString>, client: ReqwestClient) -> Self {
        Self {
            host: with_trailing_slash(host),
            api_key,
            client,
        }
    }

    #[must_use]
    pub fn host(&self) -> &Url {
        &self.host
    }

    #[must_use]
    pub fn http_client(&self) -> &ReqwestClient {
        &self.client
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let request = self.client.request(Method::GET, self.endpoint(path)?);
        self.execute(request).await
    }

    /// POSTs `body` as JSON. `timeout` overrides the default timeout for this call only.
    pub async fn post<B, R>(&self, path: &str, body: &B, timeout: Option<Duration>) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let mut request = self
            .client
            .request(Method::POST, self.endpoint(path)?)
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        self.execute(request).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.host.join(path.trim_start_matches('/'))?)
    }

    async fn execute<R: DeserializeOwned>(&self, mut request: RequestBuilder) -> Result<R> {
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key.expose_secret());
        }
        let request = request.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_owned();

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| map_transport_error(e, &method, &path))?;

        let status_code = response.status();
        if !status_code.is_success() {
            let body = response
                .text()
                .await
                .map_err(|e| map_transport_error(e, &method, &path))?;

            #[cfg(feature = "tracing")]
            tracing::warn!(
                status = %status_code,
                method = %method,
                path = %path,
                body = %body,
                "API request failed"
            );

            if let Ok(ErrorEnvelope { error }) = serde_json::from_str::<ErrorEnvelope>(&body) {
                return Err(Error::api(error.code, error.message, status_code.as_u16()));
            }
            return Err(Error::status(status_code, method, path, body));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| map_transport_error(e, &method, &path))?;
        crate::serde_helpers::deserialize_with_warnings(value)
    }
}

pub(crate) fn with_trailing_slash(mut host: Url) -> Url {
    if !host.path().ends_with('/') {
        let path = format!("{}/", host.path());
        host.set_path(&path);
    }
    host
}

fn map_transport_error(err: reqwest::Error, method: &Method, path: &str) -> Error {
    if err.is_timeout() {
        #[cfg(feature = "tracing")]
        tracing::warn!(method = %method, path = %path, "API request timed out");

        return Error::api(
            TIMEOUT_CODE,
            format!("{method} {path} timed out"),
            TIMEOUT_STATUS,
        );
    }

    if err.is_connect() || (err.is_request() && err.status().is_none()) {
        #[cfg(feature = "tracing")]
        tracing::warn!(method = %method, path = %path, error = %err, "no response from API");

        return Error::api(
            NETWORK_ERROR_CODE,
            format!("{method} {path} failed without a response: {err}"),
            NETWORK_ERROR_STATUS,
        );
    }

    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_accepts_leading_slash() {
        let transport = Transport::with_client(
            Url::parse("https://api.example.com/v1/").unwrap(),
            None,
            ReqwestClient::new(),
        );

        assert_eq!(
            transport.endpoint("/tx/buy").unwrap().as_str(),
            "https://api.example.com/v1/tx/buy"
        );
        assert_eq!(
            transport.endpoint("auth/profile").unwrap().as_str(),
            "https://api.example.com/v1/auth/profile"
        );
    }

    #[test]
    fn base_path_survives_without_trailing_slash() {
        let transport = Transport::new(
            Url::parse("https://api.example.com/v1").unwrap(),
            None,
            DEFAULT_TIMEOUT,
        )
        .unwrap();

        assert_eq!(transport.host().as_str(), "https://api.example.com/v1/");
        assert_eq!(
            transport.endpoint("tx/swap").unwrap().as_str(),
            "https://api.example.com/v1/tx/swap"
        );
    }

    #[test]
    fn debug_does_not_leak_api_key() {
        let transport = Transport::with_client(
            Url::parse("https://api.example.com/").unwrap(),
            Some(SecretString::from("df_live_secret")),
            ReqwestClient::new(),
        );

        assert!(!format!("{transport:?}").contains("df_live_secret"));
    }
}
