//! Derives [Display](std::fmt::Display) and [Error](std::error::Error) for error enums.
//!
//! Every variant needs a `#[msg = "..."]` attribute.
//!
//! * Unit variants display the message verbatim.
//! * Tuple variants must wrap exactly one value. That value becomes the
//!   error [source](std::error::Error::source) and gets a `From` impl.
//! * Struct variants use the message as a format string, fields can be
//!   referenced by name (`#[msg = "expected {expected}"]`).

use proc_macro::TokenStream;
use quote::quote;

#[proc_macro_derive(Error, attributes(msg))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    let item: syn::ItemEnum = syn::parse(input).expect("Could not parse input as enum");

    let name = item.ident;
    let (impl_generics, type_generics, where_clause) = item.generics.split_for_impl();
    let mut variant_displays = vec![];
    let mut from_impls = vec![];
    let mut variant_sources = vec![];

    for variant in &item.variants {
        let ident = &variant.ident;

        let Some(message) = message_attribute(&variant.attrs) else {
            panic!("variant {ident} needs a #[msg = \"...\"] attribute");
        };

        match &variant.fields {
            syn::Fields::Unit => {
                variant_displays
                    .push(quote!(Self::#ident => ::std::fmt::Display::fmt(&(#message), f)));
            },
            syn::Fields::Unnamed(unnamed_fields) => {
                if unnamed_fields.unnamed.len() != 1 {
                    panic!("tuple variant {ident} must wrap exactly one value");
                }

                let ty = &unnamed_fields.unnamed[0].ty;

                from_impls.push(quote!(
                    #[automatically_derived]
                    impl #impl_generics From<#ty> for #name #type_generics #where_clause {
                        fn from(value: #ty) -> Self {
                            Self::#ident(value)
                        }
                    }
                ));
                variant_displays
                    .push(quote!(Self::#ident(_) => ::std::fmt::Display::fmt(&(#message), f)));
                variant_sources.push(quote!(Self::#ident(ref value) => Some(value)));
            },
            syn::Fields::Named(named_fields) => {
                let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(format_string),
                    ..
                }) = message
                else {
                    panic!("struct variant {ident} needs a string literal as its message");
                };

                let field_names = named_fields
                    .named
                    .iter()
                    .filter_map(|field| field.ident.as_ref());

                variant_displays.push(quote!(
                    Self::#ident { #(#field_names),* } => write!(f, #format_string)
                ));
            },
        }
    }

    quote!(
        #[automatically_derived]
        impl #impl_generics ::std::fmt::Display for #name #type_generics #where_clause {
            #[allow(unused_variables)]
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(
                        #variant_displays,
                    )*
                }
            }
        }

        #(
            #from_impls
        )*

        #[automatically_derived]
        impl #impl_generics ::std::error::Error for #name #type_generics #where_clause {
            fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
                match self {
                    #(
                        #variant_sources,
                    )*
                    #[allow(unreachable_patterns)]
                    _ => None,
                }
            }
        }
    )
    .into()
}

fn message_attribute(attrs: &[syn::Attribute]) -> Option<&syn::Expr> {
    attrs
        .iter()
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(name_value) => Some(name_value),
            _ => None,
        })
        .find(|name_value| name_value.path.is_ident("msg"))
        .map(|name_value| &name_value.value)
}
