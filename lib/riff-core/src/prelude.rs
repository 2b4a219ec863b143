//! Prelude module for convenient imports.
//!
//! ```ignore
//! use riff_core::prelude::*;
//! ```

pub use crate::{
    Endpoint, Error, HttpClient, ItemType, Method, Pagable, Paginated, Request, Response, Result,
    RouteDescriptor, RouteMetadata, Status, bind, resolve,
};
