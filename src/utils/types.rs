// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `syn::Type` inspection helpers.

use proc_macro2::Span;
use quote::ToTokens;
use syn::{GenericArgument, Ident, PathArguments, Type};

/// Last path segment identifier: `chrono::NaiveDateTime` gives `NaiveDateTime`.
pub fn last_ident(ty: &Type) -> Option<&Ident> {
    if let Type::Path(type_path) = ty
        && type_path.qself.is_none()
    {
        return type_path.path.segments.last().map(|s| &s.ident);
    }
    None
}

/// Inner type of `Option<T>`.
pub fn extract_option_inner(ty: &Type) -> Option<&Type> {
    extract_generic_inner(ty, "Option")
}

/// Inner type of `Vec<T>`.
pub fn extract_vec_inner(ty: &Type) -> Option<&Type> {
    extract_generic_inner(ty, "Vec")
}

fn extract_generic_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == wrapper
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

/// Human readable rendering of a type for error messages.
///
/// `quote` separates every token with a space; this collapses the spacing
/// around path and generic punctuation so `Vec < u8 >` reads `Vec<u8>`.
pub fn display_type(ty: &Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(" < ", "<")
        .replace("< ", "<")
        .replace(" <", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
}

/// Parse `name` as a plain Rust identifier carrying `span`.
///
/// Keywords and raw identifiers (`r#type`) are rejected.
pub fn parse_identifier(name: &str, span: Span) -> Option<Ident> {
    if name.starts_with("r#") {
        return None;
    }
    let mut ident = syn::parse_str::<Ident>(name).ok()?;
    ident.set_span(span);
    Some(ident)
}
