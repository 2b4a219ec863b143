//! Name conversion between host case (`PascalCase`) and wire case (`snake_case`).
//!
//! [`convert_name`] is the single naming policy: query keys, body keys and
//! [`crate::ItemType`] tokens are all derived from host names through it, so
//! the three always agree. Body aliases go through [`to_wire_case`], which
//! leaves a name already in wire case unchanged.

/// Convert a host-case name to wire case.
///
/// An underscore is inserted before every ASCII uppercase letter, the letter
/// is lowercased and leading underscores are trimmed.
///
/// ```
/// assert_eq!(riff_core::to_wire_case("PlaylistId"), "playlist_id");
/// ```
#[must_use]
pub fn to_wire_case(name: &str) -> String {
    let mut wire = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            wire.push('_');
            wire.push(c.to_ascii_lowercase());
        } else {
            wire.push(c);
        }
    }
    wire.trim_start_matches('_').to_string()
}

/// Convert a wire-case name to host case.
///
/// The lowercase letter at the start of the name or right after an
/// underscore is uppercased, then every underscore is removed.
///
/// ```
/// assert_eq!(riff_core::to_host_case("playlist_id"), "PlaylistId");
/// ```
#[must_use]
pub fn to_host_case(name: &str) -> String {
    let mut host = String::with_capacity(name.len());
    let mut boundary = true;
    for c in name.chars() {
        if c == '_' {
            boundary = true;
            continue;
        }
        if boundary && c.is_ascii_lowercase() {
            host.push(c.to_ascii_uppercase());
        } else {
            host.push(c);
        }
        boundary = false;
    }
    host
}

/// Convert a name across the host/wire boundary.
///
/// Names starting with an uppercase letter go to wire case, names starting
/// with a lowercase letter go to host case, anything else is returned as is.
#[must_use]
pub fn convert_name(name: &str) -> String {
    match name.chars().next() {
        Some(c) if c.is_ascii_uppercase() => to_wire_case(name),
        Some(c) if c.is_ascii_lowercase() => to_host_case(name),
        _ => name.to_string(),
    }
}
