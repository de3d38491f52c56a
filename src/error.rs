// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Build-time errors.
//!
//! Every stage of the pipeline has its own error type:
//!
//! | Stage | Error |
//! |-------|-------|
//! | [`EntitySchema::build`](crate::EntitySchema::build) | [`SchemaError`] |
//! | [`resolve`](crate::resolve) / [`synthesize`](crate::synthesize) | [`MappingError`] |
//! | [`generate`](crate::generate) | [`GenerateError`] |
//!
//! Errors that concern a single field carry that field's span, so a host
//! macro can point the compiler diagnostic at the offending declaration
//! through [`GenerateError::to_compile_error`].

use proc_macro2::{Span, TokenStream};
use thiserror::Error;

use crate::entity::column::StorageType;

/// Rejection of a raw entity description.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input is not a struct with named fields, or has no fields.
    #[error("entity `{entity}` is malformed: {reason}")]
    MalformedEntity {
        entity: String,
        reason: String,
        span:   Span
    },

    /// A field uses the reserved name `id`.
    #[error("`id` is a reserved field name in `{entity}`, please use something more descriptive")]
    ReservedFieldName { entity: String, span: Span },

    /// No field is marked as the primary key.
    #[error("entity `{entity}` has no primary key, mark exactly one field with #[primary_key]")]
    MissingPrimaryKey { entity: String, span: Span },

    /// More than one field is marked as the primary key.
    #[error("entity `{entity}` has more than one primary key: {}", .fields.join(", "))]
    MultiplePrimaryKeys {
        entity: String,
        fields: Vec<String>,
        span:   Span
    },

    /// Two fields share a name.
    #[error("field `{field}` is declared twice in `{entity}`")]
    DuplicateField {
        entity: String,
        field:  String,
        span:   Span
    },

    /// Two stored fields map to the same generated column constant.
    #[error("fields `{other}` and `{field}` in `{entity}` both generate `{constant}`")]
    ColumnConstantCollision {
        entity:   String,
        field:    String,
        other:    String,
        constant: String,
        span:     Span
    },

    /// A field or type name is not a valid Rust identifier.
    #[error("`{name}` in `{entity}` is not a valid identifier")]
    InvalidIdentifier {
        entity: String,
        name:   String,
        span:   Span
    },

    /// The namespace is not a valid module path.
    #[error("namespace `{namespace}` of `{entity}` is not a valid module path")]
    InvalidNamespace {
        entity:    String,
        namespace: String,
        span:      Span
    },

    /// `#[non_savable]` is combined with a storage role.
    #[error("field `{field}` in `{entity}` is #[non_savable] and cannot also be a key")]
    ConflictingRoles {
        entity: String,
        field:  String,
        span:   Span
    },

    /// The primary key is declared as `Option<T>`.
    #[error("primary key `{field}` in `{entity}` cannot be nullable")]
    NullablePrimaryKey {
        entity: String,
        field:  String,
        span:   Span
    },

    /// Attribute syntax could not be parsed.
    #[error("invalid attribute on `{entity}`: {source}")]
    InvalidAttribute {
        entity: String,
        source: darling::Error
    }
}

impl SchemaError {
    /// Span the diagnostic should point at.
    pub fn span(&self) -> Span {
        match self {
            Self::MalformedEntity { span, .. }
            | Self::ReservedFieldName { span, .. }
            | Self::MissingPrimaryKey { span, .. }
            | Self::MultiplePrimaryKeys { span, .. }
            | Self::DuplicateField { span, .. }
            | Self::ColumnConstantCollision { span, .. }
            | Self::InvalidIdentifier { span, .. }
            | Self::InvalidNamespace { span, .. }
            | Self::ConflictingRoles { span, .. }
            | Self::NullablePrimaryKey { span, .. } => *span,
            Self::InvalidAttribute { source, .. } => source.span()
        }
    }
}

/// Failure to map a field onto a column, or to assemble the table object.
#[derive(Debug, Error)]
pub enum MappingError {
    /// No mapping branch applies to the field's type.
    #[error(
        "unsupported type `{ty}` for field `{field}`: add #[serializable] or an explicit #[type_mapping(store_as = \"...\")]"
    )]
    UnsupportedType {
        field: String,
        ty:    String,
        span:  Span
    },

    /// A user template is not a single-hole Rust expression.
    #[error("invalid {slot} template `{template}` for field `{field}`: {reason}")]
    InvalidTemplate {
        field:    String,
        slot:     &'static str,
        template: String,
        reason:   String,
        span:     Span
    },

    /// `store_as` names a type with no storage mapping and no `column_type`.
    #[error("field `{field}` is stored as `{store_as}`, which has no column type; set column_type explicitly")]
    UnsupportedStoreAs {
        field:    String,
        store_as: String,
        span:     Span
    },

    /// `column_type` is not one of the supported storage types.
    #[error("unknown column type `{column_type}` for field `{field}`")]
    UnknownColumnType {
        field:       String,
        column_type: String,
        span:        Span
    },

    /// An import declared by a type mapping is not a valid `use` path.
    #[error("invalid import `{path}` for field `{field}`")]
    InvalidImport {
        field: String,
        path:  String,
        span:  Span
    },

    /// An auto-increment key is not stored as `INTEGER` or `BIGINT`.
    #[error(
        "auto-increment key `{field}` is stored as {storage}, identity columns must be INTEGER or BIGINT"
    )]
    AutoIncrementStorage {
        field:   String,
        storage: StorageType,
        span:    Span
    },

    /// A storable field reached synthesis without a column plan.
    #[error("no column plan for field `{field}`")]
    MissingPlan { field: String }
}

impl MappingError {
    /// Span the diagnostic should point at.
    pub fn span(&self) -> Span {
        match self {
            Self::UnsupportedType { span, .. }
            | Self::InvalidTemplate { span, .. }
            | Self::UnsupportedStoreAs { span, .. }
            | Self::UnknownColumnType { span, .. }
            | Self::InvalidImport { span, .. }
            | Self::AutoIncrementStorage { span, .. } => *span,
            Self::MissingPlan { .. } => Span::call_site()
        }
    }
}

/// Any failure of the [`generate`](crate::generate) pipeline.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Entity description rejected.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Field mapping or synthesis failed.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Generated tokens did not form a valid Rust file.
    #[error("generated code failed to parse: {0}")]
    Render(String)
}

impl GenerateError {
    /// Span the diagnostic should point at.
    pub fn span(&self) -> Span {
        match self {
            Self::Schema(err) => err.span(),
            Self::Mapping(err) => err.span(),
            Self::Render(_) => Span::call_site()
        }
    }

    /// Convert into a `compile_error!` invocation for a host macro.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// match table_dao::generate(&description) {
    ///     Ok(unit) => unit.to_token_stream(),
    ///     Err(err) => err.to_compile_error()
    /// }
    /// ```
    pub fn to_compile_error(&self) -> TokenStream {
        match self {
            Self::Schema(SchemaError::InvalidAttribute { source, .. }) => {
                source.clone().write_errors()
            }
            _ => syn::Error::new(self.span(), self.to_string()).to_compile_error()
        }
    }
}
