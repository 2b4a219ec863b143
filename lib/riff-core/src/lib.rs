//! Core types and binding engine for riff.
//!
//! This crate is transport-agnostic and pure:
//! - [`to_wire_case`], [`to_host_case`] and [`convert_name`] - the naming policy
//! - [`render`] - rendering of values into URI parameters
//! - [`resolve`] - route resolution of an [`Endpoint`] type
//! - [`bind`] - construction of a [`Request`] from an endpoint value
//! - [`Pagable`], [`ItemType`] and [`Status`] - shared wire types
//! - [`HttpClient`] - transport trait
//! - [`Error`] and [`Result`] - error handling

mod binder;
mod binding;
mod body;
mod case;
mod client;
mod endpoint;
mod error;
mod item_type;
mod method;
mod paging;
pub mod prelude;
mod request;
mod response;
mod route;
mod value;

pub use binder::bind;
pub use binding::{FieldBinding, FieldClass, FieldDescriptor, classify};
pub use body::{ContentType, from_json, to_form, to_json};
pub use case::{convert_name, to_host_case, to_wire_case};
pub use client::HttpClient;
pub use endpoint::{Endpoint, Paginated};
pub use error::{Error, Result};
pub use item_type::ItemType;
pub use method::Method;
pub use paging::{Cursors, Pagable};
pub use request::{Request, RequestBuilder};
pub use response::{ErrorDetails, ErrorEnvelope, Response, Status};
pub use route::{RouteDescriptor, RouteMetadata, resolve};
pub use value::{is_present, render, render_field};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
