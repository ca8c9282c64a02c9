extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;

fn get_enum_variants(
    input: &syn::DeriveInput,
) -> &syn::punctuated::Punctuated<syn::Variant, syn::token::Comma> {
    let variants = match &input.data {
        syn::Data::Enum(enum_item) => &enum_item.variants,
        _ => panic!("Input must be an enum."),
    };

    assert!(
        variants.iter().all(|v| v.fields.is_empty()),
        "All variants must have no fields."
    );

    variants
}

/// Derives [`util::EnumFromStr`] with case-insensitive variant matching,
/// plus a matching `std::str::FromStr` impl.
#[proc_macro_derive(EnumFromStr)]
pub fn enum_from_str_derive(input: TokenStream) -> TokenStream {
    let syn_item: syn::DeriveInput = syn::parse(input).unwrap();
    let name = &syn_item.ident;
    let name_str = name.to_string();
    let variants = get_enum_variants(&syn_item);
    let literals: Vec<String> = variants.iter().map(|v| v.ident.to_string()).collect();
    let identifiers: Vec<&syn::Ident> = variants.iter().map(|v| &v.ident).collect();

    let expanded = quote! {
        impl EnumFromStr for #name {
            fn from_str(s: &str) -> ::core::result::Result<#name, ::util::ParseEnumError> {
                match s {
                    #( s if s.eq_ignore_ascii_case(#literals) => Ok(#name::#identifiers), )*
                    _ => Err(::util::ParseEnumError {
                        value: s.to_string(),
                        enum_name: #name_str,
                    }),
                }
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = ::util::ParseEnumError;

            fn from_str(s: &str) -> ::core::result::Result<#name, ::util::ParseEnumError> {
                EnumFromStr::from_str(s)
            }
        }
    };

    expanded.into()
}
