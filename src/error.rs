use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use reqwest::{Method, StatusCode};

/// Backend error code reported when a request exceeded its timeout.
pub const TIMEOUT_CODE: &str = "TIMEOUT";
/// Backend error code reported when no response was received at all.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Status attached to [`TIMEOUT_CODE`] errors.
pub const TIMEOUT_STATUS: u16 = 408;
/// Status attached to [`NETWORK_ERROR_CODE`] errors.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Broad category of an [`Error`].
///
/// `Validation`, `Signing` and `Api` are the three kinds callers are expected to
/// handle. `Status` and `Internal` carry failures the transport does not
/// normalize, with the original cause attached unchanged.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Kind {
    /// A caller-supplied limit or input was rejected locally.
    Validation,
    /// Key decoding, transaction decoding or signing failed locally.
    Signing,
    /// The backend reported an error, or the transport timed out or could not connect.
    Api,
    /// Non-success HTTP response without a structured error body.
    Status,
    /// Anything else (URL building, response decoding, ...).
    Internal,
}

#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    /// Returns the typed payload of this error, e.g. [`Api`] or [`Validation`].
    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        let source = self.source.as_deref()?;
        source.downcast_ref::<E>()
    }

    /// Validation failure not tied to a single request field.
    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Validation {
            field: None,
            reason: reason.into(),
        }
        .into()
    }

    /// Validation failure for the named request field (wire name, e.g. `maxPriceImpact`).
    pub fn validation_field<F: Into<String>, S: Into<String>>(field: F, reason: S) -> Self {
        Validation {
            field: Some(field.into()),
            reason: reason.into(),
        }
        .into()
    }

    pub fn signing<S: Into<String>>(reason: S) -> Self {
        Signing {
            reason: reason.into(),
            cause: None,
        }
        .into()
    }

    /// Signing failure that keeps the underlying decode/sign error as its cause.
    pub fn signing_with_source<S, E>(reason: S, cause: E) -> Self
    where
        S: Into<String>,
        E: StdError + Send + Sync + 'static,
    {
        Signing {
            reason: reason.into(),
            cause: Some(Box::new(cause)),
        }
        .into()
    }

    pub fn api<C: Into<String>, M: Into<String>>(code: C, message: M, status: u16) -> Self {
        Api {
            code: code.into(),
            message: message.into(),
            status,
        }
        .into()
    }

    pub fn status<S: Into<String>>(
        status_code: StatusCode,
        method: Method,
        path: String,
        message: S,
    ) -> Self {
        Status {
            status_code,
            method,
            path,
            message: message.into(),
        }
        .into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{:?}: {}", self.kind, src),
            None => write!(f, "{:?}", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// A caller-supplied limit or request value was rejected before it could take effect.
#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    /// Wire name of the offending field, when the failure is tied to one.
    pub field: Option<String>,
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "invalid {field}: {}", self.reason),
            None => write!(f, "invalid: {}", self.reason),
        }
    }
}

impl StdError for Validation {}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Signing {
    pub reason: String,
    cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl fmt::Display for Signing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "signing failed: {}: {cause}", self.reason),
            None => write!(f, "signing failed: {}", self.reason),
        }
    }
}

impl StdError for Signing {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<Signing> for Error {
    fn from(err: Signing) -> Self {
        Error::with_source(Kind::Signing, err)
    }
}

/// Failure reported by the backend, or produced by the transport for timeouts
/// (`TIMEOUT`, 408) and connection failures (`NETWORK_ERROR`, 0).
#[non_exhaustive]
#[derive(Debug)]
pub struct Api {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl fmt::Display for Api {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (status {})", self.code, self.message, self.status)
    }
}

impl StdError for Api {}

impl From<Api> for Error {
    fn from(err: Api) -> Self {
        Error::with_source(Kind::Api, err)
    }
}

/// Non-success HTTP response whose body did not carry a structured error.
#[non_exhaustive]
#[derive(Debug)]
pub struct Status {
    pub status_code: StatusCode,
    pub method: Method,
    pub path: String,
    pub message: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error({}) making {} call to {} with {}",
            self.status_code, self.method, self.path, self.message
        )
    }
}

impl StdError for Status {}

impl From<Status> for Error {
    fn from(err: Status) -> Self {
        Error::with_source(Kind::Status, err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::with_source(Kind::Internal, e)
    }
}
