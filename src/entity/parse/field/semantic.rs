// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Semantic type classification.
//!
//! | Rust type | Semantic type |
//! |-----------|---------------|
//! | `i32` | [`SemanticType::Int32`] |
//! | `i64` | [`SemanticType::Int64`] |
//! | `Uuid`, `uuid::Uuid` | [`SemanticType::Uuid`] |
//! | `String` | [`SemanticType::String`] |
//! | `bool` | [`SemanticType::Boolean`] |
//! | `Vec<String>` | [`SemanticType::ListOfString`] |
//! | `NaiveDateTime` | [`SemanticType::DateTime`] |
//! | `DateTime<Tz>` | [`SemanticType::ZonedDateTime`] |
//! | `f32` | [`SemanticType::Float32`] |
//!
//! Classification looks at the last path segment only, so
//! `chrono::NaiveDateTime` and a re-exported `NaiveDateTime` are the same.

use syn::Type;

use super::TypeMapping;
use crate::utils::types::{extract_vec_inner, last_ident};

/// What a field's value means for storage purposes.
#[derive(Debug, Clone, PartialEq)]
pub enum SemanticType {
    Int32,
    Int64,
    Uuid,
    String,
    Boolean,
    ListOfString,
    DateTime,
    ZonedDateTime,
    Float32,
    /// Any type stored as JSON text (`#[serializable]`).
    UserSerializable,
    /// Any type stored through `#[type_mapping(...)]`.
    UserMapped(TypeMapping),
    /// Recognized by nothing; rejected when the column is planned.
    Opaque
}

impl SemanticType {
    /// Classify a value type (already stripped of `Option`).
    ///
    /// A mapping wins over everything, a recognized primitive wins over
    /// `serializable`.
    pub fn classify(ty: &Type, serializable: bool, mapping: Option<&TypeMapping>) -> Self {
        if let Some(mapping) = mapping {
            return Self::UserMapped(mapping.clone());
        }
        if let Some(primitive) = Self::primitive(ty) {
            return primitive;
        }
        if serializable {
            Self::UserSerializable
        } else {
            Self::Opaque
        }
    }

    /// Primitive classification of a value type.
    pub fn primitive(ty: &Type) -> Option<Self> {
        if let Some(inner) = extract_vec_inner(ty) {
            return last_ident(inner)
                .filter(|ident| *ident == "String")
                .map(|_| Self::ListOfString);
        }
        let ident = last_ident(ty)?.to_string();
        let semantic = match ident.as_str() {
            "i32" => Self::Int32,
            "i64" => Self::Int64,
            "Uuid" => Self::Uuid,
            "String" => Self::String,
            "bool" => Self::Boolean,
            "NaiveDateTime" => Self::DateTime,
            "DateTime" => Self::ZonedDateTime,
            "f32" => Self::Float32,
            _ => return None
        };
        Some(semantic)
    }

    /// Whether this is one of the built-in primitive types.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            Self::UserSerializable | Self::UserMapped(_) | Self::Opaque
        )
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;

    fn primitive(ty: Type) -> Option<SemanticType> {
        SemanticType::primitive(&ty)
    }

    #[test]
    fn integers() {
        assert_eq!(primitive(parse_quote!(i32)), Some(SemanticType::Int32));
        assert_eq!(primitive(parse_quote!(i64)), Some(SemanticType::Int64));
        assert_eq!(primitive(parse_quote!(i16)), None);
    }

    #[test]
    fn uuid_any_path() {
        assert_eq!(primitive(parse_quote!(Uuid)), Some(SemanticType::Uuid));
        assert_eq!(primitive(parse_quote!(uuid::Uuid)), Some(SemanticType::Uuid));
    }

    #[test]
    fn text_and_flags() {
        assert_eq!(primitive(parse_quote!(String)), Some(SemanticType::String));
        assert_eq!(primitive(parse_quote!(bool)), Some(SemanticType::Boolean));
        assert_eq!(primitive(parse_quote!(f32)), Some(SemanticType::Float32));
        assert_eq!(primitive(parse_quote!(f64)), None);
    }

    #[test]
    fn dates() {
        assert_eq!(
            primitive(parse_quote!(chrono::NaiveDateTime)),
            Some(SemanticType::DateTime)
        );
        assert_eq!(
            primitive(parse_quote!(DateTime<Utc>)),
            Some(SemanticType::ZonedDateTime)
        );
    }

    #[test]
    fn only_string_lists() {
        assert_eq!(
            primitive(parse_quote!(Vec<String>)),
            Some(SemanticType::ListOfString)
        );
        assert_eq!(primitive(parse_quote!(Vec<u8>)), None);
    }

    #[test]
    fn mapping_wins() {
        let mapping = TypeMapping::new(parse_quote!(i64));
        let ty: Type = parse_quote!(String);
        assert_eq!(
            SemanticType::classify(&ty, true, Some(&mapping)),
            SemanticType::UserMapped(mapping)
        );
    }

    #[test]
    fn primitive_wins_over_serializable() {
        let ty: Type = parse_quote!(String);
        assert_eq!(SemanticType::classify(&ty, true, None), SemanticType::String);
    }

    #[test]
    fn serializable_and_opaque() {
        let ty: Type = parse_quote!(Address);
        assert_eq!(
            SemanticType::classify(&ty, true, None),
            SemanticType::UserSerializable
        );
        assert_eq!(SemanticType::classify(&ty, false, None), SemanticType::Opaque);
        assert!(!SemanticType::Opaque.is_primitive());
        assert!(SemanticType::Float32.is_primitive());
    }
}
