//! Attribute parsing for the `Endpoint` derive.

use syn::ext::IdentExt;
use syn::{Attribute, Ident, LitStr, Type};

/// Struct-level options from `#[endpoint(...)]`.
#[derive(Default)]
pub(crate) struct EndpointAttrs {
    /// Response type; `::riff::Status` when absent.
    pub(crate) response: Option<Type>,
    /// Generate `Paginated` from the `offset` field.
    pub(crate) paged: bool,
}

/// Route from `#[route(uri = "...", verb = "...")]`.
///
/// Missing parts are kept empty so they fail when the route is resolved.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct RouteAttrs {
    pub(crate) uri: String,
    pub(crate) verb: String,
}

/// Field-level body binding from `#[body]`, `#[body(alias = "...")]` or `#[body(raw)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct BodyAttrs {
    pub(crate) alias: Option<String>,
    pub(crate) raw: bool,
}

/// Parse `#[endpoint(...)]` attributes.
pub(crate) fn parse_endpoint_attrs(attrs: &[Attribute]) -> syn::Result<EndpointAttrs> {
    let mut options = EndpointAttrs::default();

    for attr in attrs {
        if !attr.path().is_ident("endpoint") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("response") {
                options.response = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("paged") {
                options.paged = true;
            } else {
                return Err(meta.error("expected `response = Type` or `paged`"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

/// Parse the `#[route(...)]` attribute, `None` if the struct has none.
pub(crate) fn parse_route_attrs(attrs: &[Attribute]) -> syn::Result<Option<RouteAttrs>> {
    let mut route = None;

    for attr in attrs {
        if !attr.path().is_ident("route") {
            continue;
        }
        if route.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate #[route] attribute"));
        }

        let mut parsed = RouteAttrs::default();
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("uri") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.uri = value.value();
            } else if meta.path.is_ident("verb") {
                let value: LitStr = meta.value()?.parse()?;
                parsed.verb = value.value();
            } else {
                return Err(meta.error("expected `uri = \"...\"` or `verb = \"...\"`"));
            }
            Ok(())
        })?;
        route = Some(parsed);
    }

    Ok(route)
}

/// Parse `#[body]` on a field, `None` if the field has none.
pub(crate) fn parse_body_attrs(attrs: &[Attribute]) -> syn::Result<Option<BodyAttrs>> {
    let mut body = None;

    for attr in attrs {
        if !attr.path().is_ident("body") {
            continue;
        }

        let mut parsed = BodyAttrs::default();
        // `#[body]` alone takes no arguments
        if !matches!(attr.meta, syn::Meta::Path(_)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("alias") {
                    let value: LitStr = meta.value()?.parse()?;
                    parsed.alias = Some(value.value());
                } else if meta.path.is_ident("raw") {
                    parsed.raw = true;
                } else {
                    return Err(meta.error("expected `alias = \"...\"` or `raw`"));
                }
                Ok(())
            })?;
        }
        if parsed.raw && parsed.alias.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "a raw body field cannot have an alias",
            ));
        }
        body = Some(parsed);
    }

    Ok(body)
}

/// Host-case name of a field (`playlist_id` becomes `PlaylistId`).
pub(crate) fn host_name(ident: &Ident) -> String {
    to_pascal_case(&ident.unraw().to_string())
}

/// Convert a `snake_case` identifier to `PascalCase`.
fn to_pascal_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Check if a type is `Option<T>`.
pub(crate) fn is_option_type(ty: &Type) -> bool {
    matches!(ty, Type::Path(type_path)
        if type_path.path.segments.last()
            .is_some_and(|seg| seg.ident == "Option"))
}
