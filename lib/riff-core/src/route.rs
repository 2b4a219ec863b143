//! Route metadata and its resolution.

use std::fmt;

use crate::{Endpoint, Error, Method, Result};

/// Route metadata as declared on a request type.
///
/// Both parts are raw tokens; nothing is validated until [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteMetadata {
    /// URI template, relative to the API base (`/playlists/{PlaylistId}`) or absolute.
    pub uri: &'static str,
    /// HTTP verb token (`GET`, `post`, ...).
    pub verb: &'static str,
}

impl RouteMetadata {
    /// Creates route metadata.
    #[must_use]
    pub const fn new(uri: &'static str, verb: &'static str) -> Self {
        Self { uri, verb }
    }
}

/// A validated route: URI template plus method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouteDescriptor {
    template: &'static str,
    method: Method,
}

impl RouteDescriptor {
    /// Creates a route descriptor.
    #[must_use]
    pub const fn new(template: &'static str, method: Method) -> Self {
        Self { template, method }
    }

    /// URI template before parameter substitution.
    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }
}

impl fmt::Display for RouteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

/// Resolve the route of a request type.
///
/// # Errors
///
/// - [`Error::MissingRouteMetadata`] if the type declares no route;
/// - [`Error::MissingUriTemplate`] if the URI template is empty;
/// - [`Error::MissingVerb`] if the verb is empty;
/// - [`Error::UnsupportedVerb`] if the verb is not GET, POST, PUT or DELETE.
pub fn resolve<E: Endpoint>() -> Result<RouteDescriptor> {
    let type_name = std::any::type_name::<E>();
    let metadata = E::route().ok_or(Error::MissingRouteMetadata { type_name })?;
    resolve_metadata(type_name, metadata)
}

pub(crate) fn resolve_metadata(
    type_name: &'static str,
    metadata: RouteMetadata,
) -> Result<RouteDescriptor> {
    let template = metadata.uri.trim();
    if template.is_empty() {
        return Err(Error::MissingUriTemplate { type_name });
    }

    let verb = metadata.verb.trim();
    if verb.is_empty() {
        return Err(Error::MissingVerb { type_name });
    }

    let method = verb
        .parse::<Method>()
        .map_err(|_| Error::UnsupportedVerb {
            type_name,
            verb: verb.to_string(),
        })?;

    Ok(RouteDescriptor::new(template, method))
}
