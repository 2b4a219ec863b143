//! HTTP response handling.
//!
//! [`Response`] provides access to status, headers, and body, plus the two
//! decoding rules of the API:
//! - [`Response::decode`] for success responses, with the bare status code as
//!   fallback payload;
//! - [`Response::into_remote_error`] for anything else.

use std::collections::HashMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Error;

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response<B = Bytes> {
    status: u16,
    headers: HashMap<String, String>,
    body: B,
}

impl<B> Response<B> {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: B) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> B {
        self.body
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

impl Response<Bytes> {
    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode a success payload.
    ///
    /// When the body does not decode as `T`, the status code alone is tried
    /// as a JSON number, so commands answering `201` with an empty body decode
    /// into [`Status`].
    ///
    /// # Errors
    ///
    /// Returns the error of the body decoding when both attempts fail.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> crate::Result<T> {
        match self.json() {
            Ok(value) => Ok(value),
            Err(err) => serde_json::from_value(serde_json::Value::from(self.status)).map_err(|_| err),
        }
    }

    /// Convert a non-success response into [`Error::RemoteApi`].
    ///
    /// The `{"error": {"status", "message"}}` envelope is used when present,
    /// otherwise the HTTP status and raw body text.
    #[must_use]
    pub fn into_remote_error(self) -> Error {
        match self.json::<ErrorEnvelope>() {
            Ok(envelope) => Error::remote_api_with_body(
                envelope.error.status.unwrap_or(self.status),
                envelope.error.message,
                self.body,
            ),
            Err(_) => Error::remote_api_with_body(self.status, self.text(), self.body),
        }
    }
}

/// Success payload of commands whose result is the HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Status(pub u16);

impl Status {
    /// The status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        self.0
    }
}

/// Error envelope of the Web API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details.
    pub error: ErrorDetails,
}

/// Details of an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Status reported by the API.
    #[serde(default)]
    pub status: Option<u16>,
    /// Human readable message.
    pub message: String,
}
