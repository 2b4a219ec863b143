//! Endpoint derive macro implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, parse2};

use crate::attrs::{
    BodyAttrs, host_name, is_option_type, parse_body_attrs, parse_endpoint_attrs,
    parse_route_attrs,
};

/// Expand the `#[derive(Endpoint)]` macro.
pub fn expand_endpoint_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let endpoint = parse_endpoint_attrs(&input.attrs)?;
    let route = parse_route_attrs(&input.attrs)?;

    // Only support structs with named fields
    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Endpoint derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Endpoint derive only supports structs",
            ));
        }
    };

    let mut descriptors = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for field in &fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let host = host_name(field_name);

        let descriptor = match parse_body_attrs(&field.attrs)? {
            None => quote! { ::riff::FieldDescriptor::plain(#host) },
            Some(BodyAttrs { raw: true, .. }) => {
                quote! { ::riff::FieldDescriptor::raw_body(#host) }
            }
            Some(BodyAttrs {
                alias: Some(alias), ..
            }) => quote! { ::riff::FieldDescriptor::body(#host, ::std::option::Option::Some(#alias)) },
            Some(BodyAttrs { alias: None, .. }) => {
                quote! { ::riff::FieldDescriptor::body(#host, ::std::option::Option::None) }
            }
        };
        descriptors.push(descriptor);
        values.push(quote! { ::riff::serde_json::to_value(&self.#field_name)? });
    }

    let response = endpoint
        .response
        .map_or_else(|| quote! { ::riff::Status }, |ty| quote! { #ty });

    let route = match route {
        Some(route) => {
            let uri = route.uri;
            let verb = route.verb;
            quote! { ::std::option::Option::Some(::riff::RouteMetadata::new(#uri, #verb)) }
        }
        None => quote! { ::std::option::Option::None },
    };

    let paginated = if endpoint.paged {
        let offset = fields
            .iter()
            .find(|field| field.ident.as_ref().is_some_and(|ident| ident == "offset"))
            .ok_or_else(|| {
                syn::Error::new_spanned(
                    &input.ident,
                    "#[endpoint(paged)] requires an `offset: Option<u32>` field",
                )
            })?;
        if !is_option_type(&offset.ty) {
            return Err(syn::Error::new_spanned(
                &offset.ty,
                "the `offset` field of a paged endpoint must be `Option<u32>`",
            ));
        }

        quote! {
            impl #impl_generics ::riff::Paginated for #name #ty_generics #where_clause {
                fn offset(&self) -> ::std::option::Option<u32> {
                    self.offset
                }

                fn set_offset(&mut self, offset: u32) {
                    self.offset = ::std::option::Option::Some(offset);
                }
            }
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl #impl_generics ::riff::Endpoint for #name #ty_generics #where_clause {
            type Response = #response;

            fn route() -> ::std::option::Option<::riff::RouteMetadata> {
                #route
            }

            fn fields() -> &'static [::riff::FieldDescriptor] {
                const FIELDS: &[::riff::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn field_values(&self) -> ::riff::Result<::std::vec::Vec<::riff::serde_json::Value>> {
                ::std::result::Result::Ok(::std::vec![#(#values),*])
            }
        }

        #paginated
    })
}
