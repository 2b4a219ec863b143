//! Static field binding tables.
//!
//! Each request type exposes one [`FieldDescriptor`] per field, in
//! declaration order. The descriptor only records what the author declared;
//! whether a plain field lands in the path or the query string is decided
//! against the route template by [`classify`].

use std::fmt;

use crate::{convert_name, to_wire_case};

/// Declared binding of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldBinding {
    /// No annotation: path parameter if the template names it, query otherwise.
    Plain,
    /// Body annotation.
    Body {
        /// Body key used instead of the field name.
        alias: Option<&'static str>,
        /// Write the value as the entire body instead of under a key.
        raw: bool,
    },
}

/// Metadata about a single request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Host-case field name (e.g. `PlaylistId`).
    pub name: &'static str,
    /// Declared binding.
    pub binding: FieldBinding,
}

impl FieldDescriptor {
    /// A field without body annotation.
    #[must_use]
    pub const fn plain(name: &'static str) -> Self {
        Self {
            name,
            binding: FieldBinding::Plain,
        }
    }

    /// A named body field.
    #[must_use]
    pub const fn body(name: &'static str, alias: Option<&'static str>) -> Self {
        Self {
            name,
            binding: FieldBinding::Body { alias, raw: false },
        }
    }

    /// A field written as the entire body.
    #[must_use]
    pub const fn raw_body(name: &'static str) -> Self {
        Self {
            name,
            binding: FieldBinding::Body {
                alias: None,
                raw: true,
            },
        }
    }

    /// Wire-case key for query strings.
    #[must_use]
    pub fn wire_name(&self) -> String {
        convert_name(self.name)
    }

    /// Wire-case key for the body object: alias if any, field name otherwise.
    ///
    /// Aliases may be written in either case, `Public` and `public` give the
    /// same key.
    #[must_use]
    pub fn body_key(&self) -> String {
        match self.binding {
            FieldBinding::Body {
                alias: Some(alias), ..
            } => to_wire_case(alias),
            _ => self.wire_name(),
        }
    }

    /// Whether `template` contains a placeholder for this field.
    ///
    /// Both `{PlaylistId}` and `{playlist_id}` match a field named `PlaylistId`.
    #[must_use]
    pub fn is_path_parameter(&self, template: &str) -> bool {
        template.contains(&placeholder(self.name))
            || template.contains(&placeholder(&self.wire_name()))
    }
}

/// Where a field ends up in the built request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldClass {
    /// Substituted into the URI template.
    Path,
    /// Entry of the JSON body object.
    Body,
    /// The entire JSON body.
    RawBody,
    /// `name=value` query parameter.
    Query,
}

impl fmt::Display for FieldClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Body => write!(f, "body"),
            Self::RawBody => write!(f, "raw body"),
            Self::Query => write!(f, "query"),
        }
    }
}

/// Classify every field against a route template.
///
/// Precedence is strict: path, then body annotation, then query.
#[must_use]
pub fn classify(template: &str, fields: &[FieldDescriptor]) -> Vec<FieldClass> {
    fields
        .iter()
        .map(|field| {
            if field.is_path_parameter(template) {
                return FieldClass::Path;
            }
            match field.binding {
                FieldBinding::Body { raw: true, .. } => FieldClass::RawBody,
                FieldBinding::Body { raw: false, .. } => FieldClass::Body,
                FieldBinding::Plain => FieldClass::Query,
            }
        })
        .collect()
}

pub(crate) fn placeholder(name: &str) -> String {
    format!("{{{name}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::plain("PlaylistId"),
        FieldDescriptor::plain("Market"),
        FieldDescriptor::body("Name", None),
        FieldDescriptor::body("IsPublic", Some("Public")),
        FieldDescriptor::raw_body("Uris"),
    ];

    #[test]
    fn field_class_display() {
        assert_eq!(FieldClass::Path.to_string(), "path");
        assert_eq!(FieldClass::Body.to_string(), "body");
        assert_eq!(FieldClass::RawBody.to_string(), "raw body");
        assert_eq!(FieldClass::Query.to_string(), "query");
    }

    #[test]
    fn keys_are_wire_case() {
        let [id, _, name, public, _] = FIELDS else {
            panic!("five fields");
        };
        assert_eq!(id.wire_name(), "playlist_id");
        assert_eq!(name.body_key(), "name");
        assert_eq!(public.body_key(), "public");
    }

    #[test]
    fn keys_follow_naming_policy() {
        for field in FIELDS {
            assert_eq!(field.wire_name(), convert_name(field.name));
        }
        assert_eq!(FieldDescriptor::body("IsPublic", Some("public")).body_key(), "public");
        assert_eq!(
            FieldDescriptor::body("Summary", Some("Description")).body_key(),
            "description"
        );
    }

    #[test]
    fn classify_by_precedence() {
        let classes = classify("/playlists/{PlaylistId}", FIELDS);
        assert_eq!(
            classes,
            vec![
                FieldClass::Path,
                FieldClass::Query,
                FieldClass::Body,
                FieldClass::Body,
                FieldClass::RawBody,
            ]
        );
    }

    #[test]
    fn path_wins_over_body_annotation() {
        let classes = classify("/playlists/{Name}/{Uris}", FIELDS);
        assert_eq!(classes.get(2), Some(&FieldClass::Path));
        assert_eq!(classes.get(4), Some(&FieldClass::Path));
    }

    #[test]
    fn wire_case_placeholder() {
        let field = FieldDescriptor::plain("PlaylistId");
        assert!(field.is_path_parameter("/playlists/{playlist_id}/tracks"));
        assert!(field.is_path_parameter("/playlists/{PlaylistId}/tracks"));
        assert!(!field.is_path_parameter("/playlists/PlaylistId/tracks"));
    }
}
