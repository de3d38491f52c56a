// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Row to entity conversion.

use quote::quote;

use super::{
    context::Context,
    crud::{field_names, operation}
};
use crate::{
    entity::unit::{Operation, OperationKind},
    error::MappingError
};

impl Context<'_> {
    /// Generate `transform`.
    ///
    /// Builds the entity from a row, decoding storable fields in declaration
    /// order. Non-savable fields get `Default::default()`.
    ///
    /// ```rust,ignore
    /// fn transform(row: &PgRow) -> Result<Article, sqlx::Error> {
    ///     Ok(Article {
    ///         uuid: row.try_get::<Uuid, _>("uuid")?,
    ///         tags: decode_list(&row.try_get::<String, _>("tags")?),
    ///         cache: ::core::default::Default::default()
    ///     })
    /// }
    /// ```
    pub fn transform_method(&self) -> Result<Operation, MappingError> {
        let entity_name = self.entity_name;
        let fields: Vec<_> = self.columns.iter().map(|column| column.name()).collect();
        let decoded = self
            .columns
            .iter()
            .map(|column| column.decode_row("row"))
            .collect::<Result<Vec<_>, _>>()?;
        let transient = self.schema.transient_fields();

        let tokens = quote! {
            fn transform(row: &PgRow) -> Result<#entity_name, sqlx::Error> {
                Ok(#entity_name {
                    #(#fields: #decoded,)*
                    #(#transient: ::core::default::Default::default(),)*
                })
            }
        };

        Ok(operation(
            OperationKind::Transform,
            field_names(&self.columns),
            None,
            tokens
        ))
    }
}
