//! Request binding: turns a request value into an HTTP request.

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::{Map, Value};
use url::Url;

use crate::binding::placeholder;
use crate::{
    Endpoint, Error, FieldClass, Request, Result, RouteDescriptor, classify, is_present,
    render_field, to_json,
};

// Unreserved characters and sub-delims stay as is
const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%');

// `,` separates list items and must stay literal
const QUERY_VALUE_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

/// Build the HTTP request for `endpoint` on `route`.
///
/// Fields are walked in declaration order. Each one is bound to exactly one
/// of path, body or query, with that precedence:
/// - a field named by a `{Field}` placeholder is substituted into the
///   template and must have a value;
/// - a raw body field becomes the whole JSON body;
/// - named body fields are collected, in order, into one JSON object, used
///   as the body only when no raw body was set;
/// - remaining fields with a present value are appended as `wire_name=value`.
///
/// Relative templates are appended to `base_url`, absolute ones are used as
/// is. `Accept` is always set, `Content-Type` only with a body, and
/// `Authorization: Bearer` only with a token.
///
/// # Errors
///
/// - [`Error::DuplicateRawBodyBinding`] if the type has more than one raw
///   body field, whatever the values;
/// - [`Error::RequiredPathParameterMissing`] if a path field is `null`;
/// - [`Error::UnsupportedValueKind`] if a path or query value cannot be rendered;
/// - serialization and URL errors.
pub fn bind<E: Endpoint>(
    endpoint: &E,
    route: &RouteDescriptor,
    base_url: &Url,
    bearer: Option<&str>,
) -> Result<Request<Bytes>> {
    let type_name = std::any::type_name::<E>();
    let fields = E::fields();
    let classes = classify(route.template(), fields);

    let mut raw_fields = fields
        .iter()
        .zip(&classes)
        .filter(|(_, class)| **class == FieldClass::RawBody);
    if let (Some(_), Some((second, _))) = (raw_fields.next(), raw_fields.next()) {
        return Err(Error::DuplicateRawBodyBinding {
            type_name,
            field: second.name,
        });
    }

    let values = endpoint.field_values()?;
    if values.len() != fields.len() {
        return Err(Error::invalid_request(format!(
            "{type_name} has {} fields but produced {} values",
            fields.len(),
            values.len()
        )));
    }

    let mut path = route.template().to_string();
    let mut query = Vec::new();
    let mut raw_body = None;
    let mut pending_body = Map::new();

    for ((field, class), value) in fields.iter().zip(classes).zip(values) {
        match class {
            FieldClass::Path => {
                if value.is_null() {
                    return Err(Error::RequiredPathParameterMissing {
                        field: field.name,
                        route: route.template(),
                    });
                }
                let rendered = render_field(field.name, &value)?;
                let encoded =
                    utf8_percent_encode(&rendered, PATH_SEGMENT_ENCODE_SET).to_string();
                path = path
                    .replace(&placeholder(field.name), &encoded)
                    .replace(&placeholder(&field.wire_name()), &encoded);
            }
            FieldClass::RawBody => {
                if !value.is_null() {
                    raw_body = Some(value);
                }
            }
            FieldClass::Body => {
                if !value.is_null() {
                    pending_body.insert(field.body_key(), value);
                }
            }
            FieldClass::Query => {
                if is_present(&value) {
                    let rendered = render_field(field.name, &value)?;
                    query.push(format!(
                        "{}={}",
                        field.wire_name(),
                        utf8_percent_encode(&rendered, QUERY_VALUE_ENCODE_SET)
                    ));
                }
            }
        }
    }

    let url = build_url(base_url, &path, &query)?;
    let mut builder = Request::builder(route.method(), url).header("Accept", "application/json");

    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }

    let body =
        raw_body.or_else(|| (!pending_body.is_empty()).then_some(Value::Object(pending_body)));
    if let Some(body) = body {
        builder = builder
            .header("Content-Type", "application/json")
            .body(to_json(&body)?);
    }

    Ok(builder.build())
}

fn build_url(base_url: &Url, path: &str, query: &[String]) -> Result<Url> {
    let mut target = if is_absolute(path) {
        path.to_string()
    } else {
        let base = base_url.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    };

    if !query.is_empty() {
        if !target.ends_with(['?', '&']) {
            target.push(if target.contains('?') { '&' } else { '?' });
        }
        target.push_str(&query.join("&"));
    }

    let target = target.trim_end_matches(['&', '?']);
    Ok(Url::parse(target)?)
}

fn is_absolute(template: &str) -> bool {
    template.starts_with("https://") || template.starts_with("http://")
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::{FieldDescriptor, ItemType, Method, RouteMetadata, Status, resolve};

    fn base() -> Url {
        Url::parse("https://api.spotify.com/v1").expect("base URL")
    }

    fn body_text(request: &Request<Bytes>) -> Option<&str> {
        request
            .body()
            .map(|body| std::str::from_utf8(body).expect("utf8 body"))
    }

    struct GetPlaylistTracks {
        playlist_id: Option<String>,
        market: Option<String>,
        limit: Option<u32>,
    }

    impl Endpoint for GetPlaylistTracks {
        type Response = Value;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new("/playlists/{PlaylistId}/tracks", "GET"))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::plain("PlaylistId"),
                FieldDescriptor::plain("Market"),
                FieldDescriptor::plain("Limit"),
            ];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![
                serde_json::to_value(&self.playlist_id)?,
                serde_json::to_value(&self.market)?,
                serde_json::to_value(self.limit)?,
            ])
        }
    }

    fn bind_endpoint<E: Endpoint>(endpoint: &E, bearer: Option<&str>) -> Result<Request<Bytes>> {
        let route = resolve::<E>()?;
        bind(endpoint, &route, &base(), bearer)
    }

    #[test]
    fn path_and_query() {
        let request = GetPlaylistTracks {
            playlist_id: Some("abc123".to_string()),
            market: None,
            limit: Some(10),
        };
        let request = bind_endpoint(&request, None).expect("bind");

        check!(request.method() == Method::Get);
        check!(
            request.url().as_str() == "https://api.spotify.com/v1/playlists/abc123/tracks?limit=10"
        );
        check!(request.body().is_none());
        check!(request.header("Accept") == Some("application/json"));
        check!(request.header("Content-Type").is_none());
        check!(request.header("Authorization").is_none());
    }

    #[test]
    fn query_in_declaration_order() {
        let request = GetPlaylistTracks {
            playlist_id: Some("abc".to_string()),
            market: Some("FR".to_string()),
            limit: Some(5),
        };
        let request = bind_endpoint(&request, Some("token")).expect("bind");

        check!(request.url().query() == Some("market=FR&limit=5"));
        check!(request.header("Authorization") == Some("Bearer token"));
    }

    #[test]
    fn path_values_are_encoded() {
        let request = GetPlaylistTracks {
            playlist_id: Some("a b/c".to_string()),
            market: None,
            limit: None,
        };
        let request = bind_endpoint(&request, None).expect("bind");

        check!(request.url().path() == "/v1/playlists/a%20b%2Fc/tracks");
        check!(request.url().query().is_none());
    }

    #[test]
    fn missing_path_value() {
        let request = GetPlaylistTracks {
            playlist_id: None,
            market: None,
            limit: Some(10),
        };
        let_assert!(
            Err(Error::RequiredPathParameterMissing { field, route }) =
                bind_endpoint(&request, None)
        );
        check!(field == "PlaylistId");
        check!(route == "/playlists/{PlaylistId}/tracks");
    }

    struct Search {
        q: String,
        item_type_list: Vec<ItemType>,
        ids: Vec<String>,
        include_external: Option<String>,
    }

    impl Endpoint for Search {
        type Response = Value;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new("/search?", "get"))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::plain("Q"),
                FieldDescriptor::plain("ItemTypeList"),
                FieldDescriptor::plain("Ids"),
                FieldDescriptor::plain("IncludeExternal"),
            ];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![
                serde_json::to_value(&self.q)?,
                serde_json::to_value(&self.item_type_list)?,
                serde_json::to_value(&self.ids)?,
                serde_json::to_value(&self.include_external)?,
            ])
        }
    }

    #[test]
    fn list_values_are_comma_joined() {
        let search = Search {
            q: "daft punk".to_string(),
            item_type_list: vec![ItemType::Artist, ItemType::Album, ItemType::Playlist],
            ids: Vec::new(),
            include_external: None,
        };
        let request = bind_endpoint(&search, None).expect("bind");

        check!(
            request.url().as_str()
                == "https://api.spotify.com/v1/search?q=daft%20punk&item_type_list=artist,album,playlist"
        );
    }

    #[test]
    fn absent_query_values_are_skipped() {
        let search = Search {
            q: String::new(),
            item_type_list: Vec::new(),
            ids: Vec::new(),
            include_external: None,
        };
        let request = bind_endpoint(&search, None).expect("bind");

        check!(request.url().as_str() == "https://api.spotify.com/v1/search?q=");
    }

    struct AddTracks {
        playlist_id: String,
        uris: Option<Vec<String>>,
    }

    impl Endpoint for AddTracks {
        type Response = Status;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new("/playlists/{playlist_id}/tracks", "POST"))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::plain("PlaylistId"),
                FieldDescriptor::raw_body("Uris"),
            ];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![
                serde_json::to_value(&self.playlist_id)?,
                serde_json::to_value(&self.uris)?,
            ])
        }
    }

    #[test]
    fn raw_body() {
        let request = AddTracks {
            playlist_id: "p1".to_string(),
            uris: Some(vec!["id1".into(), "id2".into(), "id3".into()]),
        };
        let request = bind_endpoint(&request, None).expect("bind");

        check!(request.method() == Method::Post);
        check!(request.url().as_str() == "https://api.spotify.com/v1/playlists/p1/tracks");
        check!(body_text(&request) == Some(r#"["id1","id2","id3"]"#));
        check!(request.header("Content-Type") == Some("application/json"));
    }

    #[test]
    fn null_raw_body_sets_no_body() {
        let request = AddTracks {
            playlist_id: "p1".to_string(),
            uris: None,
        };
        let request = bind_endpoint(&request, None).expect("bind");

        check!(request.body().is_none());
        check!(request.header("Content-Type").is_none());
    }

    struct CreatePlaylist {
        user_id: String,
        name: String,
        is_public: bool,
        description: Option<String>,
        collaborative: Option<bool>,
    }

    impl Endpoint for CreatePlaylist {
        type Response = Value;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new("/users/{UserId}/playlists", "POST"))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::plain("UserId"),
                FieldDescriptor::body("Name", None),
                FieldDescriptor::body("IsPublic", Some("Public")),
                FieldDescriptor::body("Description", None),
                FieldDescriptor::body("Collaborative", None),
            ];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![
                serde_json::to_value(&self.user_id)?,
                serde_json::to_value(&self.name)?,
                serde_json::to_value(self.is_public)?,
                serde_json::to_value(&self.description)?,
                serde_json::to_value(self.collaborative)?,
            ])
        }
    }

    #[test]
    fn named_body_keeps_declaration_order() {
        let request = CreatePlaylist {
            user_id: "me".to_string(),
            name: "Road trip".to_string(),
            is_public: false,
            description: Some("Summer".to_string()),
            collaborative: None,
        };
        let request = bind_endpoint(&request, None).expect("bind");

        check!(request.url().as_str() == "https://api.spotify.com/v1/users/me/playlists");
        check!(
            body_text(&request) == Some(r#"{"name":"Road trip","public":false,"description":"Summer"}"#)
        );
    }

    struct TwoRawBodies {
        ids: Option<Vec<String>>,
        uris: Option<Vec<String>>,
    }

    impl Endpoint for TwoRawBodies {
        type Response = Status;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new("/me/tracks", "PUT"))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::raw_body("Ids"),
                FieldDescriptor::raw_body("Uris"),
            ];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![
                serde_json::to_value(&self.ids)?,
                serde_json::to_value(&self.uris)?,
            ])
        }
    }

    #[test]
    fn duplicate_raw_body() {
        let request = TwoRawBodies {
            ids: Some(vec!["a".into()]),
            uris: None,
        };
        let_assert!(Err(err) = bind_endpoint(&request, None));
        let_assert!(Error::DuplicateRawBodyBinding { field: "Uris", .. } = &err);
        check!(err.is_configuration());
    }

    struct NextPage {
        href: String,
    }

    impl Endpoint for NextPage {
        type Response = Value;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new(
                "https://api.spotify.com/v1/browse/new-releases?country={Href}",
                "GET",
            ))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::plain("Href")];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![serde_json::to_value(&self.href)?])
        }
    }

    #[test]
    fn absolute_template_ignores_base() {
        let request = NextPage {
            href: "SE".to_string(),
        };
        let route = resolve::<NextPage>().expect("route");
        let other_base = Url::parse("http://localhost:1234").expect("base");
        let request = bind(&request, &route, &other_base, None).expect("bind");

        check!(
            request.url().as_str() == "https://api.spotify.com/v1/browse/new-releases?country=SE"
        );
    }

    struct Unrenderable {
        filter: Value,
    }

    impl Endpoint for Unrenderable {
        type Response = Value;

        fn route() -> Option<RouteMetadata> {
            Some(RouteMetadata::new("/search", "GET"))
        }

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[FieldDescriptor::plain("Filter")];
            FIELDS
        }

        fn field_values(&self) -> Result<Vec<Value>> {
            Ok(vec![self.filter.clone()])
        }
    }

    #[test]
    fn object_query_value_fails() {
        let request = Unrenderable {
            filter: json!({"genre": "jazz"}),
        };
        let_assert!(
            Err(Error::UnsupportedValueKind { field, kind: "object" }) =
                bind_endpoint(&request, None)
        );
        check!(field == "Filter");
    }
}
