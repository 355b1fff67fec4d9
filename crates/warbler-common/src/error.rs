//! Error types for like toggle calls
//!
//! Only failures the handler does not absorb end up here. A `"Bad like"`
//! reply or a 401 is a [`Rejection`](crate::toggle::Rejection), not an error.

use bytes::Bytes;

/// Client error type wrapping all possible error conditions
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ClientError {
    /// HTTP transport error
    #[error("HTTP transport error: {0}")]
    Transport(
        #[from]
        #[diagnostic_source]
        TransportError,
    ),

    /// Response deserialization failed
    #[error("{0}")]
    Decode(
        #[from]
        #[diagnostic_source]
        DecodeError,
    ),

    /// HTTP error response
    #[error("HTTP {0}")]
    Http(
        #[from]
        #[diagnostic_source]
        HttpError,
    ),
}

/// Transport-level errors that occur during HTTP communication
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// Failed to establish connection to server
    #[error("Connection error: {0}")]
    Connect(String),

    /// Request timed out
    #[error("Request timeout")]
    Timeout,

    /// Request construction failed (malformed URI, headers, etc.)
    #[error("Invalid request: {0}")]
    #[diagnostic(help("message ids are interpolated verbatim into the request path"))]
    InvalidRequest(String),

    /// Other transport error
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl From<http::Error> for TransportError {
    fn from(e: http::Error) -> Self {
        Self::InvalidRequest(e.to_string())
    }
}

impl TransportError {
    /// Classify an error raised by an [`HttpClient`](crate::http_client::HttpClient).
    ///
    /// Errors of known clients (reqwest, or anything surfacing a
    /// `std::io::Error`) are mapped onto the matching variant. The rest
    /// become [`TransportError::Other`].
    pub fn from_client<E>(e: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(e);
        #[cfg(feature = "reqwest-client")]
        let boxed = match boxed.downcast::<reqwest::Error>() {
            Ok(e) => return Self::from(*e),
            Err(other) => other,
        };
        match boxed.downcast::<std::io::Error>() {
            Ok(e) => Self::from(*e),
            Err(other) => Self::Other(other),
        }
    }
}

impl From<std::io::Error> for TransportError {
    fn from(e: std::io::Error) -> Self {
        use std::io::ErrorKind;
        match e.kind() {
            ErrorKind::TimedOut => Self::Timeout,
            ErrorKind::ConnectionRefused
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionAborted
            | ErrorKind::NotConnected
            | ErrorKind::AddrNotAvailable => Self::Connect(e.to_string()),
            _ => Self::Other(Box::new(e)),
        }
    }
}

/// Response deserialization errors
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DecodeError {
    /// JSON deserialization failed
    #[error("Failed to deserialize JSON: {0}")]
    Json(
        #[from]
        #[source]
        serde_json::Error,
    ),
}

/// HTTP error response (non-2xx status codes the handler does not absorb)
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub struct HttpError {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response body if available
    pub body: Option<Bytes>,
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(body) = &self.body {
            if let Ok(s) = std::str::from_utf8(body) {
                if !s.is_empty() {
                    write!(f, ":\n{}", s)?;
                }
            }
        }
        Ok(())
    }
}

/// Result type for client operations
pub type ClientResult<T> = std::result::Result<T, ClientError>;

#[cfg(feature = "reqwest-client")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if is_connect(&e) {
            Self::Connect(e.to_string())
        } else if e.is_builder() || e.is_request() {
            Self::InvalidRequest(e.to_string())
        } else {
            Self::Other(Box::new(e))
        }
    }
}

// reqwest only reports connect failures off wasm; fetch hides them.
#[cfg(all(feature = "reqwest-client", not(target_arch = "wasm32")))]
fn is_connect(e: &reqwest::Error) -> bool {
    e.is_connect()
}

#[cfg(all(feature = "reqwest-client", target_arch = "wasm32"))]
fn is_connect(_: &reqwest::Error) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_map_onto_transport_variants() {
        let refused = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(TransportError::from_client(refused), TransportError::Connect(_)));

        let timed_out = io::Error::new(io::ErrorKind::TimedOut, "slow");
        assert!(matches!(TransportError::from_client(timed_out), TransportError::Timeout));

        let other = io::Error::new(io::ErrorKind::InvalidData, "garbage");
        assert!(matches!(TransportError::from_client(other), TransportError::Other(_)));
    }

    #[test]
    fn unknown_client_errors_stay_opaque() {
        let err = TransportError::from_client(std::fmt::Error);
        match err {
            TransportError::Other(inner) => assert!(inner.downcast_ref::<std::fmt::Error>().is_some()),
            other => panic!("expected opaque error, got {other:?}"),
        }
    }

    #[test]
    fn http_error_display_includes_text_body() {
        let err = HttpError {
            status: http::StatusCode::INTERNAL_SERVER_ERROR,
            body: Some(Bytes::from_static(b"boom")),
        };
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error:\nboom");
    }

    #[test]
    fn http_error_display_skips_empty_body() {
        let err = HttpError {
            status: http::StatusCode::NOT_FOUND,
            body: Some(Bytes::new()),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
    }
}
