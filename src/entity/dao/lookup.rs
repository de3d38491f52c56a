// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lookup method generators.
//!
//! One `get_by_<field>` per `#[lookup_key]` field:
//!
//! ```sql
//! SELECT "col1", "col2", ... FROM "table" WHERE "field" = $1
//! ```
//!
//! The parameter has the field's declared type. For a nullable field a
//! `None` argument returns an empty list without querying, since `= NULL`
//! never matches.

use quote::quote;

use super::{
    context::{Column, Context},
    crud::operation
};
use crate::{
    entity::unit::{Operation, OperationKind},
    error::MappingError,
    utils::sql::equals
};

impl Context<'_> {
    /// Generate `get_by_<field>` for one lookup column.
    pub fn lookup_method(&self, column: Column<'_>) -> Result<Operation, MappingError> {
        let entity_name = self.entity_name;
        let field = column.name();
        let kind = OperationKind::GetBy {
            field: field.clone()
        };
        let method = kind.method_name();
        let param_ty = column.field.ty();
        let sql = format!(
            "{} WHERE {}",
            self.select_sql(),
            equals(column.plan.column(), 1)
        );
        let binding = column.encode_value("key")?;
        let doc = format!("Fetch every entity whose `{field}` equals `key`.");

        let unwrap_key = if column.field.is_nullable() {
            quote! {
                let Some(key) = key else {
                    return Ok(Vec::new());
                };
            }
        } else {
            quote! {}
        };

        let tokens = quote! {
            #[doc = #doc]
            pub async fn #method(&self, key: &#param_ty) -> Result<Vec<#entity_name>, sqlx::Error> {
                #unwrap_key
                let mut tx = self.pool.begin().await?;
                let rows = sqlx::query(#sql)
                    .bind(#binding)
                    .fetch_all(&mut *tx)
                    .await?;
                tx.commit().await?;
                rows.iter().map(Self::transform).collect()
            }
        };

        Ok(operation(kind, vec![field.clone()], Some(sql), tokens))
    }
}
