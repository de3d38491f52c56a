// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level description and attribute parsing.
//!
//! This module handles the field markers `#[primary_key]`,
//! `#[primary_key(auto_increment)]`, `#[lookup_key]`, `#[non_savable]`,
//! `#[serializable]` and `#[type_mapping(...)]`.
//!
//! # Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`roles`] | Key and storage roles |
//! | [`mapping`] | Custom type mappings |
//! | [`semantic`] | Type classification |
//! | [`descriptor`] | Validated field |

mod descriptor;
mod mapping;
mod roles;
mod semantic;

use darling::FromMeta;
pub use descriptor::FieldDescriptor;
pub use mapping::TypeMapping;
use proc_macro2::Span;
pub use roles::FieldRoles;
pub use semantic::SemanticType;
use syn::{Attribute, Field, Meta, Type};

/// Raw description of one entity field.
///
/// Either read from a struct field with [`FieldDescription::from_field`] or
/// built directly:
///
/// ```rust,ignore
/// let title = FieldDescription::new("title", parse_quote!(String)).lookup_key();
/// ```
///
/// Nothing is validated here; [`EntitySchema::build`](crate::EntitySchema::build)
/// checks names and roles.
#[derive(Debug, Clone)]
pub struct FieldDescription {
    /// Field name, also the column name.
    pub name: String,

    /// Declared type, `Option<T>` for nullable fields.
    pub ty: Type,

    /// Declared roles.
    pub roles: FieldRoles,

    /// Stored as JSON text when no other mapping applies.
    pub serializable: bool,

    /// Custom mapping, checked before anything else.
    pub mapping: Option<TypeMapping>,

    /// Location used for diagnostics.
    pub span: Span
}

impl FieldDescription {
    /// Field without roles or mapping.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            roles: FieldRoles::default(),
            serializable: false,
            mapping: None,
            span: Span::call_site()
        }
    }

    /// Mark as primary key.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.roles.primary_key = true;
        self
    }

    /// Mark as database-assigned primary key.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.roles.primary_key = true;
        self.roles.auto_increment = true;
        self
    }

    /// Mark as lookup key.
    #[must_use]
    pub fn lookup_key(mut self) -> Self {
        self.roles.lookup_key = true;
        self
    }

    /// Exclude from storage.
    #[must_use]
    pub fn non_savable(mut self) -> Self {
        self.roles.non_savable = true;
        self
    }

    /// Store as serialized text.
    #[must_use]
    pub fn serializable(mut self) -> Self {
        self.serializable = true;
        self
    }

    /// Store through a custom mapping.
    #[must_use]
    pub fn mapping(mut self, mapping: TypeMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Attach a diagnostic location.
    #[must_use]
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Parse a named struct field and its marker attributes.
    ///
    /// Attributes other than the markers listed in the module docs are
    /// ignored, so `#[serde(...)]` and friends can sit on the same field.
    ///
    /// # Errors
    ///
    /// - tuple struct field (no identifier)
    /// - marker with unexpected arguments, e.g. `#[lookup_key(x)]`
    /// - unknown `#[primary_key(...)]` option
    /// - malformed `#[type_mapping(...)]`
    pub fn from_field(field: &Field) -> darling::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(darling::Error::custom("expected a named field").with_span(field));
        };

        let mut description =
            Self::new(ident.to_string(), field.ty.clone()).span(ident.span());

        for attr in &field.attrs {
            if attr.path().is_ident("primary_key") {
                parse_primary_key(attr, &mut description.roles)?;
            } else if attr.path().is_ident("lookup_key") {
                require_marker(attr)?;
                description.roles.lookup_key = true;
            } else if attr.path().is_ident("non_savable") {
                require_marker(attr)?;
                description.roles.non_savable = true;
            } else if attr.path().is_ident("serializable") {
                require_marker(attr)?;
                description.serializable = true;
            } else if attr.path().is_ident("type_mapping") {
                let mapping = TypeMapping::from_meta(&attr.meta)?;
                description.mapping = Some(mapping);
            }
        }

        Ok(description)
    }
}

/// Parse `#[primary_key]` or `#[primary_key(auto_increment)]`.
fn parse_primary_key(attr: &Attribute, roles: &mut FieldRoles) -> darling::Result<()> {
    roles.primary_key = true;
    if let Meta::List(list) = &attr.meta {
        list.parse_nested_meta(|meta| {
            if meta.path.is_ident("auto_increment") {
                roles.auto_increment = true;
                Ok(())
            } else {
                Err(meta.error("unknown primary_key option, expected `auto_increment`"))
            }
        })?;
    } else if let Meta::NameValue(_) = &attr.meta {
        return Err(darling::Error::custom(
            "expected #[primary_key] or #[primary_key(auto_increment)]"
        )
        .with_span(&attr.meta));
    }
    Ok(())
}

/// Reject arguments on a bare marker attribute.
fn require_marker(attr: &Attribute) -> darling::Result<()> {
    attr.meta.require_path_only()?;
    Ok(())
}
