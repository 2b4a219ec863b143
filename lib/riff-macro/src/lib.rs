//! Procedural macros for riff.
//!
//! This crate provides `#[derive(Endpoint)]`, which turns an annotated struct
//! into a static binding table. Use it through the `riff` crate.
//!
//! # Example
//!
//! ```ignore
//! use riff::{Endpoint, Pagable};
//!
//! #[derive(Endpoint)]
//! #[endpoint(response = Pagable<PlaylistTrack>, paged)]
//! #[route(uri = "/playlists/{PlaylistId}/tracks", verb = "GET")]
//! pub struct GetPlaylistTracks {
//!     pub playlist_id: String,
//!     pub limit: Option<u32>,
//!     pub offset: Option<u32>,
//! }
//! ```

mod attrs;
mod endpoint_derive;

use proc_macro::TokenStream;

/// Derive `riff::Endpoint` for a struct with named fields.
///
/// # Struct attributes
///
/// - `#[endpoint(response = Type)]`: response type, `riff::Status` by default
/// - `#[endpoint(paged)]`: also derive `riff::Paginated` from an
///   `offset: Option<u32>` field
/// - `#[route(uri = "...", verb = "...")]`: route metadata; a struct without
///   it fails when the route is resolved
///
/// # Field attributes
///
/// - `#[body]`: carried in the JSON body object under the field's wire name
/// - `#[body(alias = "name")]`: carried in the body object under `name`
/// - `#[body(raw)]`: the value is the entire JSON body
///
/// Other fields are path parameters when the URI template names them
/// (`{PlaylistId}` or `{playlist_id}`), query parameters otherwise.
///
/// # Example
///
/// ```ignore
/// #[derive(Endpoint)]
/// #[route(uri = "/users/{UserId}/playlists", verb = "POST")]
/// struct CreatePlaylist {
///     user_id: String,
///     #[body]
///     name: String,
///     #[body(alias = "public")]
///     is_public: Option<bool>,
/// }
/// ```
#[proc_macro_derive(Endpoint, attributes(endpoint, route, body))]
pub fn derive_endpoint(input: TokenStream) -> TokenStream {
    endpoint_derive::expand_endpoint_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
