//! Procedural macros for provider plugin registration.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Fields, ItemStruct, LitStr, parse_macro_input};

const DEFAULT_MANIFEST: &str = "manifest.json";

/// Registers a unit struct implementing `ProviderPlugin` as the provider
/// distribution of the current binary.
///
/// The distribution's manifest is embedded at compile time from
/// `$CARGO_MANIFEST_DIR/manifest.json`, or from the path given with
/// `#[provider_plugin(manifest = "path/to/manifest.json")]`.
///
/// ```ignore
/// #[provider_plugin]
/// pub struct OktaPlugin;
///
/// impl ProviderPlugin for OktaPlugin { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn provider_plugin(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut manifest = LitStr::new(DEFAULT_MANIFEST, Span::call_site());
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("manifest") {
            manifest = meta.value()?.parse()?;
            Ok(())
        } else {
            Err(meta.error("unsupported provider_plugin property, expected `manifest`"))
        }
    });
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(item as ItemStruct);
    if !matches!(item.fields, Fields::Unit) {
        return syn::Error::new_spanned(
            &item.ident,
            "#[provider_plugin] must be applied to a unit struct",
        )
        .to_compile_error()
        .into();
    }
    if !item.generics.params.is_empty() {
        return syn::Error::new_spanned(
            &item.generics,
            "#[provider_plugin] does not support generic plugins",
        )
        .to_compile_error()
        .into();
    }

    let ident = &item.ident;
    let expanded = quote! {
        #item

        ::provider_plugin::inventory::submit! {
            ::provider_plugin::PluginRegistration::new(
                ::core::stringify!(#ident),
                &#ident,
                ::core::include_str!(::core::concat!(
                    ::core::env!("CARGO_MANIFEST_DIR"),
                    "/",
                    #manifest
                )),
            )
        }
    };
    expanded.into()
}
