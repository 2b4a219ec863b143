//! Request type trait.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{FieldDescriptor, Result, RouteMetadata};

/// A declarative request type.
///
/// Usually implemented by `#[derive(Endpoint)]`. The field table is static
/// and generated once per type; values are captured per instance.
///
/// ```ignore
/// #[derive(Endpoint)]
/// #[endpoint(response = Pagable<PlaylistTrack>, paged)]
/// #[route(uri = "/playlists/{PlaylistId}/tracks", verb = "GET")]
/// struct GetPlaylistTracks {
///     playlist_id: String,
///     limit: Option<u32>,
///     offset: Option<u32>,
/// }
/// ```
pub trait Endpoint {
    /// Type the response body decodes into.
    type Response: DeserializeOwned;

    /// Declared route, `None` if the type has no route metadata.
    fn route() -> Option<RouteMetadata>;

    /// Field descriptors, in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Field values, in the order of [`Endpoint::fields`].
    ///
    /// Absent optional values are [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns an error if a field value cannot be serialized.
    fn field_values(&self) -> Result<Vec<Value>>;
}

/// A request type whose response is a page of a larger collection.
pub trait Paginated: Endpoint {
    /// Current offset, `None` if unset.
    fn offset(&self) -> Option<u32>;

    /// Replace the offset.
    fn set_offset(&mut self, offset: u32);
}
