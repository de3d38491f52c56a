// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage column types and modifiers.

use std::fmt;

use syn::{Type, parse_quote};

/// Column type of a stored field.
///
/// | Variant | PostgreSQL | Accepted `column_type` names |
/// |---------|------------|------------------------------|
/// | `Integer` | `INTEGER` | `integer`, `int`, `int4` |
/// | `BigInt` | `BIGINT` | `bigint`, `long`, `int8` |
/// | `Uuid` | `UUID` | `uuid` |
/// | `Text` | `TEXT` | `text`, `string` |
/// | `Boolean` | `BOOLEAN` | `boolean`, `bool` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    Integer,
    BigInt,
    Uuid,
    Text,
    Boolean
}

impl StorageType {
    /// PostgreSQL type name.
    pub fn sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Uuid => "UUID",
            Self::Text => "TEXT",
            Self::Boolean => "BOOLEAN"
        }
    }

    /// Rust type a column of this storage type is read as.
    pub fn rust_type(self) -> Type {
        match self {
            Self::Integer => parse_quote!(i32),
            Self::BigInt => parse_quote!(i64),
            Self::Uuid => parse_quote!(sqlx::types::Uuid),
            Self::Text => parse_quote!(String),
            Self::Boolean => parse_quote!(bool)
        }
    }

    /// Whether PostgreSQL can generate values for this type as an identity
    /// column.
    pub fn is_integer(self) -> bool {
        matches!(self, Self::Integer | Self::BigInt)
    }

    /// Parse a `column_type` value, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let storage = match name.trim().to_ascii_lowercase().as_str() {
            "integer" | "int" | "int4" => Self::Integer,
            "bigint" | "long" | "int8" => Self::BigInt,
            "uuid" => Self::Uuid,
            "text" | "string" => Self::Text,
            "boolean" | "bool" => Self::Boolean,
            _ => return None
        };
        Some(storage)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql())
    }
}

/// Column modifier.
///
/// A column's modifiers are always listed in declaration order of this
/// enum: `AutoIncrement`, then `Indexed`, then `Nullable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    /// Value assigned by the database (`GENERATED BY DEFAULT AS IDENTITY`).
    AutoIncrement,
    /// Column has an index (lookup keys).
    Indexed,
    /// Column accepts NULL.
    Nullable
}

impl Modifier {
    /// Lowercase name used in generated docs.
    pub fn name(self) -> &'static str {
        match self {
            Self::AutoIncrement => "auto increment",
            Self::Indexed => "indexed",
            Self::Nullable => "nullable"
        }
    }
}
