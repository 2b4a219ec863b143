//! Error types for riff.
//!
//! Errors fall into four groups:
//! - configuration errors, raised while resolving or binding a request type
//!   ([`Error::is_configuration`]); they never depend on the network;
//! - input errors, raised when a request value cannot be bound;
//! - remote errors ([`Error::RemoteApi`]) for non-2xx responses;
//! - transport and serialization errors.
//!
//! Nothing is retried internally: every error is surfaced to the caller.

use derive_more::{Display, Error, From};

/// Main error type for riff operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The request type declares no route metadata at all.
    #[display("request type {type_name} declares no route metadata")]
    #[from(skip)]
    MissingRouteMetadata {
        /// Rust type name of the request.
        type_name: &'static str,
    },

    /// The route metadata has an empty URI template.
    #[display("route metadata of {type_name} has no URI template")]
    #[from(skip)]
    MissingUriTemplate {
        /// Rust type name of the request.
        type_name: &'static str,
    },

    /// The route metadata has an empty HTTP verb.
    #[display("route metadata of {type_name} has no HTTP verb")]
    #[from(skip)]
    MissingVerb {
        /// Rust type name of the request.
        type_name: &'static str,
    },

    /// The route metadata names a verb outside GET/POST/PUT/DELETE.
    #[display("request type {type_name} declares unsupported HTTP verb '{verb}'")]
    #[from(skip)]
    UnsupportedVerb {
        /// Rust type name of the request.
        type_name: &'static str,
        /// The verb token as declared.
        #[error(not(source))]
        verb: String,
    },

    /// More than one field of a request type writes its raw value as the body.
    #[display("request type {type_name} has more than one raw body field, '{field}' is the second")]
    #[from(skip)]
    DuplicateRawBodyBinding {
        /// Rust type name of the request.
        type_name: &'static str,
        /// Host-case name of the offending field.
        field: &'static str,
    },

    /// A field substituted into the URI template has no value.
    #[display("{field} is a required field for endpoint {route}")]
    #[from(skip)]
    RequiredPathParameterMissing {
        /// Host-case name of the field.
        field: &'static str,
        /// URI template of the route.
        route: &'static str,
    },

    /// A value cannot be rendered as a URI parameter.
    #[display("{field}: {kind} values are not supported in URI parameters")]
    #[from(skip)]
    UnsupportedValueKind {
        /// Name of the field being rendered.
        #[error(not(source))]
        field: String,
        /// JSON kind of the value (e.g. `object`).
        kind: &'static str,
    },

    /// A wire string does not name any [`crate::ItemType`].
    #[display("unknown item type '{_0}'")]
    #[from(skip)]
    UnknownItemType(#[error(not(source))] String),

    /// The remote API answered with a non-success status.
    #[display("remote API error {status}: {message}")]
    #[from(skip)]
    RemoteApi {
        /// Status reported by the error envelope, or the HTTP status.
        status: u16,
        /// Message from the error envelope, or the raw body.
        #[error(not(source))]
        message: String,
        /// Raw response body, if available.
        #[error(not(source))]
        body: Option<bytes::Bytes>,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "items[0].album.name").
        #[error(not(source))]
        path: String,
        /// Error message.
        #[error(not(source))]
        message: String,
    },

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    FormSerialization(serde_html_form::ser::Error),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a remote API error without a body.
    #[must_use]
    pub fn remote_api(status: u16, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            status,
            message: message.into(),
            body: None,
        }
    }

    /// Create a remote API error with the raw response body.
    #[must_use]
    pub fn remote_api_with_body(status: u16, message: impl Into<String>, body: bytes::Bytes) -> Self {
        Self::RemoteApi {
            status,
            message: message.into(),
            body: Some(body),
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by how a request type is declared.
    ///
    /// These are fatal and deterministic: the same type fails the same way on
    /// every call.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingRouteMetadata { .. }
                | Self::MissingUriTemplate { .. }
                | Self::MissingVerb { .. }
                | Self::UnsupportedVerb { .. }
                | Self::DuplicateRawBodyBinding { .. }
        )
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the status code if this is a remote API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns the response body if this is a remote API error with a body.
    #[must_use]
    pub fn body(&self) -> Option<&bytes::Bytes> {
        match self {
            Self::RemoteApi { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    /// Try to decode the remote error body as JSON.
    ///
    /// Returns `None` if there is no body or this is not a remote API error.
    pub fn decode_body<T: serde::de::DeserializeOwned>(&self) -> Option<Result<T>> {
        self.body().map(|body| crate::from_json(body))
    }
}
