//! Derive macros for the Taskflow architecture
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Generates the wire tag accessor for action enums
//!
//! # Example
//!
//! ```ignore
//! use taskflow_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! enum TodoAction {
//!     AddTodo(String),
//!     ClearComplete,
//!     #[action_type = "MARK_ALL"]
//!     CheckAll,
//! }
//!
//! assert_eq!(TodoAction::AddTodo("milk".into()).action_type(), "ADD_TODO");
//! assert_eq!(TodoAction::CheckAll.action_type(), "MARK_ALL");
//! assert_eq!(TodoAction::ACTION_TYPES, &["ADD_TODO", "CLEAR_COMPLETE", "MARK_ALL"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Lit, Meta, parse_macro_input};

/// Derive macro for Action enums
///
/// Generates:
/// - `action_type()` - the `SCREAMING_SNAKE_CASE` tag of the variant, used as
///   the wire `type` and as the structured-logging label for a transition
/// - `ACTION_TYPES` - every tag, in declaration order
///
/// # Attributes
///
/// - `#[action_type = "NAME"]` - Override the tag of a variant
///
/// # Errors
///
/// Produces a compile error if:
/// - Applied to a non-enum type
/// - `#[action_type]` is not a string literal
/// - Two variants end up with the same tag
#[proc_macro_derive(Action, attributes(action_type))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let mut tags: Vec<String> = Vec::new();
    let mut arms = Vec::new();

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        let tag = match explicit_tag(&variant.attrs) {
            Ok(Some(tag)) => tag,
            Ok(None) => screaming_snake_case(&variant_name.to_string()),
            Err(error) => return error.to_compile_error().into(),
        };

        if tags.contains(&tag) {
            return syn::Error::new_spanned(variant, format!("Duplicate action type `{tag}`"))
                .to_compile_error()
                .into();
        }

        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };
        arms.push(quote! { #pattern => #tag, });
        tags.push(tag);
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Every action type tag, in declaration order
            pub const ACTION_TYPES: &'static [&'static str] = &[#(#tags),*];

            /// Returns the action type tag of this action
            #[must_use]
            pub const fn action_type(&self) -> &'static str {
                match self {
                    #(#arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Reads `#[action_type = "..."]` if present
fn explicit_tag(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    for attr in attrs {
        if !attr.path().is_ident("action_type") {
            continue;
        }

        if let Meta::NameValue(name_value) = &attr.meta {
            if let Expr::Lit(ExprLit {
                lit: Lit::Str(value),
                ..
            }) = &name_value.value
            {
                return Ok(Some(value.value()));
            }
        }

        return Err(syn::Error::new_spanned(
            attr,
            "expected #[action_type = \"NAME\"]",
        ));
    }

    Ok(None)
}

/// `AddTodo` -> `ADD_TODO`, `HTTPRequest` -> `HTTP_REQUEST`
fn screaming_snake_case(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len() + 4);

    for (index, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && index > 0 {
            let prev = chars[index - 1];
            let next_is_lower = chars.get(index + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}
