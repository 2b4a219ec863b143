//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types, functions, and macros
//! for easy glob importing:
//!
//! ```ignore
//! use riff::prelude::*;
//! ```

pub use crate::{
    ApiClient, ClientConfig, Endpoint, Error, HttpClient, HyperClient, ItemType, Method, Pagable,
    Paginated, Request, Response, Result, Status, StatusCode, Token, TokenClient, header,
};
pub use serde::{Deserialize, Serialize};
