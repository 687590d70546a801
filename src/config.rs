use std::time::Duration;

use bon::Builder;
use secrecy::SecretString;
use url::Url;

use crate::DEFAULT_HOST;
use crate::Result;
use crate::error::Error;
use crate::transport::{DEFAULT_TIMEOUT, with_trailing_slash};

/// String-typed values as they typically arrive from app-level config or a CLI.
#[derive(Clone, Debug)]
pub struct RawClientConfig {
    pub host: Option<String>,
    pub api_key: Option<SecretString>,
    pub private_key: SecretString,
    pub timeout_secs: Option<u64>,
    pub submit_timeout_secs: Option<u64>,
}

/// Endpoint configuration for a [`Client`](crate::Client).
///
/// The library never reads environment variables or files; everything comes
/// through here.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Builder)]
pub struct ClientConfig {
    /// API base URL. [`DEFAULT_HOST`] when unset.
    pub host: Option<Url>,
    /// Bearer credential sent on every call except registration.
    pub api_key: Option<SecretString>,
    /// Default per-call timeout. [`DEFAULT_TIMEOUT`] when unset.
    pub timeout: Option<Duration>,
    /// Timeout for the submit call, which waits on-chain and may take longer than
    /// the default.
    pub submit_timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn from_raw(raw: &RawClientConfig) -> Result<Self> {
        let host = raw
            .host
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(|e| Error::validation(format!("invalid host: {e}")))?;

        let config = Self {
            host,
            api_key: raw.api_key.clone(),
            timeout: raw.timeout_secs.map(Duration::from_secs),
            submit_timeout: raw.submit_timeout_secs.map(Duration::from_secs),
        };
        config.validate()?;

        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if let Some(host) = &self.host
            && !matches!(host.scheme(), "http" | "https")
        {
            return Err(Error::validation(format!(
                "host must be an http(s) URL, got scheme `{}`",
                host.scheme()
            )));
        }
        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::validation("timeout must be greater than zero"));
        }
        if self.submit_timeout.is_some_and(|t| t.is_zero()) {
            return Err(Error::validation("submit timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Host with a trailing slash, so relative endpoint paths join beneath it.
    pub(crate) fn resolved_host(&self) -> Result<Url> {
        let host = match &self.host {
            Some(host) => host.clone(),
            None => Url::parse(DEFAULT_HOST)?,
        };
        Ok(with_trailing_slash(host))
    }

    pub(crate) fn resolved_timeout(&self) -> Duration {
        self.timeout.unwrap_or(DEFAULT_TIMEOUT)
    }
}
