// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity-level description and attribute parsing.
//!
//! Entity-level attributes are parsed with darling from
//! `#[table_schema(...)]`; every option is optional:
//!
//! | Option | Default | Effect |
//! |--------|---------|--------|
//! | `class_name = "..."` | `<Entity>Table` | Name of the generated table object |
//! | `table = "..."` | snake_case entity name | Table name |
//! | `namespace = "..."` | `super` | Module the generated code imports the entity from |
//! | `hide_columns` | off | Column constants are private |

use darling::FromDeriveInput;
use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields};

use super::field::FieldDescription;
use crate::error::SchemaError;

/// Entity-level attributes parsed from `#[table_schema(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(table_schema))]
struct EntityAttrs {
    #[darling(default)]
    class_name: Option<String>,

    #[darling(default)]
    table: Option<String>,

    #[darling(default)]
    namespace: Option<String>,

    #[darling(default)]
    hide_columns: bool
}

/// Raw description of one entity, input of
/// [`EntitySchema::build`](crate::EntitySchema::build).
///
/// # Construction
///
/// From a struct:
///
/// ```rust,ignore
/// let input: DeriveInput = parse_quote! {
///     #[table_schema(table = "articles")]
///     pub struct Article {
///         #[primary_key]
///         pub uuid: Uuid,
///         #[lookup_key]
///         pub title: String,
///         pub count: i64
///     }
/// };
/// let description = EntityDescription::from_derive_input(&input)?;
/// ```
///
/// Or programmatically:
///
/// ```rust,ignore
/// let description = EntityDescription::new("Article")
///     .table("articles")
///     .field(FieldDescription::new("uuid", parse_quote!(Uuid)).primary_key())
///     .field(FieldDescription::new("title", parse_quote!(String)).lookup_key())
///     .field(FieldDescription::new("count", parse_quote!(i64)));
/// ```
#[derive(Debug, Clone)]
pub struct EntityDescription {
    /// Entity type name.
    pub name: String,

    /// Module path the generated code imports the entity from.
    pub namespace: Option<String>,

    /// Generated table object name override.
    pub class_name: Option<String>,

    /// Table name override.
    pub table: Option<String>,

    /// Render column constants private.
    pub hide_columns: bool,

    /// Fields in declaration order.
    pub fields: Vec<FieldDescription>,

    /// Location used for diagnostics.
    pub span: Span
}

impl EntityDescription {
    /// Entity without fields or overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:         name.into(),
            namespace:    None,
            class_name:   None,
            table:        None,
            hide_columns: false,
            fields:       Vec::new(),
            span:         Span::call_site()
        }
    }

    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn hide_columns(mut self, hide: bool) -> Self {
        self.hide_columns = hide;
        self
    }

    /// Append a field.
    #[must_use]
    pub fn field(mut self, field: FieldDescription) -> Self {
        self.fields.push(field);
        self
    }

    /// Parse a struct and its attributes.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::InvalidAttribute`] for malformed `#[table_schema]`
    ///   or field marker syntax
    /// - [`SchemaError::MalformedEntity`] for enums, unions, tuple or unit
    ///   structs and generic structs
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self, SchemaError> {
        let entity = input.ident.to_string();
        let span = input.ident.span();
        let malformed = |reason: &str| SchemaError::MalformedEntity {
            entity: entity.clone(),
            reason: reason.to_owned(),
            span
        };

        let attrs = EntityAttrs::from_derive_input(input).map_err(|source| {
            SchemaError::InvalidAttribute {
                entity: entity.clone(),
                source
            }
        })?;

        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => return Err(malformed("expected a struct with named fields"))
            },
            _ => return Err(malformed("expected a struct, found an enum or union"))
        };

        if !input.generics.params.is_empty() {
            return Err(malformed("generic entities are not supported"));
        }

        let fields = named
            .named
            .iter()
            .map(FieldDescription::from_field)
            .collect::<darling::Result<Vec<_>>>()
            .map_err(|source| SchemaError::InvalidAttribute {
                entity: entity.clone(),
                source
            })?;

        Ok(Self {
            name: entity,
            namespace: attrs.namespace,
            class_name: attrs.class_name,
            table: attrs.table,
            hide_columns: attrs.hide_columns,
            fields,
            span
        })
    }
}
