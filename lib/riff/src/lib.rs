//! Declarative request builder and pagination engine for the Spotify Web API.
//!
//! Describe an endpoint as a plain struct, derive [`Endpoint`], and let
//! [`ApiClient`] build, send and decode it.
//!
//! # Example
//!
//! ```ignore
//! use riff::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct Track {
//!     id: String,
//!     name: String,
//! }
//!
//! #[derive(Debug, Serialize, Endpoint)]
//! #[route(uri = "/playlists/{playlist_id}/tracks", verb = "GET")]
//! #[endpoint(response = Pagable<Track>, paged)]
//! pub struct GetPlaylistTracks {
//!     playlist_id: String,
//!     limit: Option<u32>,
//!     offset: Option<u32>,
//! }
//!
//! let api = ApiClient::spotify(HyperClient::new())?;
//! let request = GetPlaylistTracks {
//!     playlist_id: "abc123".to_string(),
//!     limit: Some(50),
//!     offset: None,
//! };
//! let tracks: Vec<Track> = api.walk(request, Some(&token.access_token)).await?;
//! ```

mod api_client;
mod client;
mod config;
mod connector;
pub mod middleware;
pub mod prelude;
mod token;

// Re-export client types
pub use api_client::ApiClient;
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_API_URL, DEFAULT_TOKEN_URL};
pub use token::{Token, TokenClient, TokenClientBuilder};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use riff_core::{
    ContentType, Cursors, Endpoint, Error, ErrorDetails, ErrorEnvelope, FieldBinding, FieldClass,
    FieldDescriptor, HttpClient, ItemType, Method, Pagable, Paginated, Request, RequestBuilder,
    Response, Result, RouteDescriptor, RouteMetadata, Status, bind, classify, convert_name,
    from_json, is_present, render, render_field, resolve, to_form, to_host_case, to_json,
    to_wire_case,
};

// Re-export http types for status codes and headers
pub use riff_core::{StatusCode, header};

// Re-export crates for macro-generated code
pub use serde_json;
pub use url;

// Re-export macros
pub use riff_macro::Endpoint;
