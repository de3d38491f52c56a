// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[type_mapping(...)]` attribute.
//!
//! Stores a field through another column type with user supplied
//! conversions:
//!
//! ```rust,ignore
//! #[type_mapping(
//!     store_as = "i64",
//!     encode = "{}.as_millis()",
//!     decode = "Millis::from_raw({})",
//!     import = "crate::time::Millis"
//! )]
//! pub timeout: Millis,
//! ```
//!
//! Each template has exactly one `{}` hole. The encode hole receives a
//! reference to the field value and yields a `store_as` value; the decode
//! hole receives a `store_as` value. When `store_as` is itself stored
//! through a codec (`NaiveDateTime`, `DateTime<Tz>`, `f32`, `Vec<String>`)
//! the codec runs after encode and before decode, so the column stays
//! `TEXT`. With `column_type` the decode hole instead receives the column
//! read as that type's canonical Rust type (`i32`, `i64`,
//! `sqlx::types::Uuid`, `String`, `bool`). Templates are validated when
//! the column is planned.

use darling::FromMeta;
use syn::Type;

/// Parsed custom type mapping.
#[derive(Debug, Clone, PartialEq, FromMeta)]
pub struct TypeMapping {
    /// Type the templates convert to and from.
    pub store_as: Type,

    /// Explicit storage type: `integer`, `bigint`, `uuid`, `text` or
    /// `boolean`. Derived from `store_as` when absent.
    #[darling(default)]
    pub column_type: Option<String>,

    /// Encode template, identity when absent.
    #[darling(default)]
    pub encode: Option<String>,

    /// Decode template, identity when absent.
    #[darling(default)]
    pub decode: Option<String>,

    /// Extra `use` paths the templates need.
    #[darling(default, multiple, rename = "import")]
    pub imports: Vec<String>
}

impl TypeMapping {
    /// Mapping through `store_as` with identity conversions.
    pub fn new(store_as: Type) -> Self {
        Self {
            store_as,
            column_type: None,
            encode: None,
            decode: None,
            imports: Vec::new()
        }
    }

    /// Set the explicit storage type.
    #[must_use]
    pub fn column_type(mut self, column_type: impl Into<String>) -> Self {
        self.column_type = Some(column_type.into());
        self
    }

    /// Set the encode template.
    #[must_use]
    pub fn encode(mut self, template: impl Into<String>) -> Self {
        self.encode = Some(template.into());
        self
    }

    /// Set the decode template.
    #[must_use]
    pub fn decode(mut self, template: impl Into<String>) -> Self {
        self.decode = Some(template.into());
        self
    }

    /// Add an import needed by the templates.
    #[must_use]
    pub fn import(mut self, path: impl Into<String>) -> Self {
        self.imports.push(path.into());
        self
    }
}
