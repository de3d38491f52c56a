// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generation context for the table object.
//!
//! Contains the [`Context`] struct that precomputes all identifiers and SQL
//! fragments needed for method generation.

use syn::{Expr, Ident, Type};

use crate::{
    entity::{
        column::{ColumnPlan, ColumnPlans, Modifier},
        parse::{EntitySchema, FieldDescriptor}
    },
    error::MappingError,
    utils::sql::{join_columns, quote_ident}
};

/// Storable field paired with its plan.
#[derive(Clone, Copy)]
pub struct Column<'a> {
    pub field: &'a FieldDescriptor,
    pub plan:  &'a ColumnPlan
}

impl Column<'_> {
    pub fn name(&self) -> &Ident {
        self.field.name()
    }

    /// Reference to the field on the `entity` parameter.
    pub fn entity_source(&self) -> String {
        format!("&entity.{}", self.field.name())
    }

    /// Nullable-aware encode of `source` as a token expression.
    pub fn encode(&self, source: &str) -> Result<Expr, MappingError> {
        self.parse("encode", self.plan.encode_expr(source))
    }

    /// Encode of a present value as a token expression.
    pub fn encode_value(&self, source: &str) -> Result<Expr, MappingError> {
        self.parse("encode", self.plan.encode_value_expr(source))
    }

    /// Read and decode this column from `row`.
    pub fn decode_row(&self, row: &str) -> Result<Expr, MappingError> {
        self.parse("decode", self.plan.decode_expr(&self.plan.read_expr(row)))
    }

    fn parse(&self, slot: &'static str, text: String) -> Result<Expr, MappingError> {
        syn::parse_str::<Expr>(&text).map_err(|err| MappingError::InvalidTemplate {
            field: self.field.name_str(),
            slot,
            template: text,
            reason: err.to_string(),
            span: self.field.span()
        })
    }
}

/// Context for table object generation.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `schema` | Validated entity schema |
/// | `entity_name` | Entity struct name (e.g., `Article`) |
/// | `columns` | Storable fields with plans, in declaration order |
/// | `key` | Primary key column |
/// | `key_ty` | Primary key type |
/// | `table` | Quoted table name (e.g., `"article"`) |
/// | `columns_str` | Quoted, comma-separated storable columns |
pub struct Context<'a> {
    pub schema:      &'a EntitySchema,
    pub entity_name: &'a Ident,
    pub columns:     Vec<Column<'a>>,
    pub key:         Column<'a>,
    pub key_ty:      &'a Type,
    pub table:       String,
    pub columns_str: String
}

impl<'a> Context<'a> {
    /// Pair every storable field with its plan.
    ///
    /// # Errors
    ///
    /// [`MappingError::MissingPlan`] when a storable field has no plan.
    pub fn new(schema: &'a EntitySchema, plans: &'a ColumnPlans) -> Result<Self, MappingError> {
        let columns = schema
            .storable_fields()
            .iter()
            .map(|field| {
                plans
                    .get(&field.name_str())
                    .map(|plan| Column { field, plan })
                    .ok_or_else(|| MappingError::MissingPlan {
                        field: field.name_str()
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let key_field = schema.primary_key();
        let key = columns
            .iter()
            .copied()
            .find(|column| column.field.name() == key_field.name())
            .ok_or_else(|| MappingError::MissingPlan {
                field: key_field.name_str()
            })?;

        let names: Vec<String> = columns.iter().map(|c| c.plan.column().to_owned()).collect();

        Ok(Self {
            schema,
            entity_name: schema.origin_type_name(),
            key,
            key_ty: key_field.ty(),
            table: quote_ident(schema.table_name()),
            columns_str: join_columns(&names),
            columns
        })
    }

    /// Columns written by INSERT: everything but a database-assigned key.
    pub fn insert_columns(&self) -> Vec<Column<'a>> {
        self.columns
            .iter()
            .copied()
            .filter(|column| !column.plan.has_modifier(Modifier::AutoIncrement))
            .collect()
    }

    /// Storable fields marked as lookup keys.
    pub fn lookup_columns(&self) -> Vec<Column<'a>> {
        self.columns
            .iter()
            .copied()
            .filter(|column| column.field.is_lookup_key())
            .collect()
    }

    /// Quoted key column.
    pub fn key_column(&self) -> String {
        quote_ident(self.key.plan.column())
    }

    /// `SELECT <columns> FROM <table>`.
    pub fn select_sql(&self) -> String {
        format!("SELECT {} FROM {}", self.columns_str, self.table)
    }
}
