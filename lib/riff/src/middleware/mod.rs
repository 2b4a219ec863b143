//! Tower middleware layers for the riff transport.
//!
//! Layers wrap the [`HyperClient`](crate::HyperClient) service through
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer). Any tower
//! layer whose service speaks [`Request`](crate::Request) /
//! [`Response`](crate::Response) fits.
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
