// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Key-based method generators.
//!
//! | Method | SQL Operation |
//! |--------|---------------|
//! | [`save`](Context::save_method) | `get`, then `create` or `update` |
//! | [`create`](Context::create_method) | `INSERT INTO ... VALUES ... RETURNING ...` |
//! | [`update`](Context::update_method) | `UPDATE ... SET ... WHERE key = $n` |
//! | [`delete`](Context::delete_method) | `DELETE FROM ... WHERE key = $1` |
//! | [`get`](Context::get_method) | `SELECT ... WHERE key = $1` |
//! | [`get_all`](Context::get_all_method) | `SELECT ...` |
//!
//! Every method that touches storage opens one transaction and commits it
//! on success; `?` drops the transaction, which rolls it back.

use quote::quote;

use super::context::{Column, Context};
use crate::{
    entity::unit::{Operation, OperationKind},
    error::MappingError,
    utils::sql::{equals, join_columns, placeholders, set_clause}
};

impl Context<'_> {
    /// Generate `save`: insert when the key is unknown, update otherwise.
    ///
    /// Returns the key of the stored row; `None` when the insert returned
    /// no row.
    pub fn save_method(&self) -> Operation {
        let entity_name = self.entity_name;
        let key_ty = self.key_ty;
        let key = self.key.name();

        let tokens = quote! {
            /// Insert `entity` if its key is unknown, update it otherwise.
            pub async fn save(&self, entity: &#entity_name) -> Result<Option<#key_ty>, sqlx::Error> {
                if self.get(&entity.#key).await?.is_none() {
                    self.create(entity).await
                } else {
                    self.update(entity).await.map(Some)
                }
            }
        };

        operation(OperationKind::Save, vec![key.clone()], None, tokens)
    }

    /// Generate `create`.
    ///
    /// # SQL Pattern
    ///
    /// ```sql
    /// INSERT INTO "table" ("col1", "col2", ...)
    /// VALUES ($1, $2, ...)
    /// RETURNING "key", "col1", "col2", ...
    /// ```
    ///
    /// A database-assigned key is left out of the column list; when nothing
    /// else is stored the statement is `INSERT INTO "table" DEFAULT VALUES`.
    /// The returned row goes through `transform` and its key is the result.
    pub fn create_method(&self) -> Result<Operation, MappingError> {
        let entity_name = self.entity_name;
        let key_ty = self.key_ty;
        let key = self.key.name();

        let columns = self.insert_columns();
        let names: Vec<&str> = columns.iter().map(|c| c.plan.column()).collect();
        let sql = if columns.is_empty() {
            format!(
                "INSERT INTO {} DEFAULT VALUES RETURNING {}",
                self.table, self.columns_str
            )
        } else {
            format!(
                "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
                self.table,
                join_columns(&names),
                placeholders(columns.len()),
                self.columns_str
            )
        };
        let bindings = entity_bindings(&columns)?;

        let tokens = quote! {
            async fn create(&self, entity: &#entity_name) -> Result<Option<#key_ty>, sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                let row = sqlx::query(#sql)
                    #(.bind(#bindings))*
                    .fetch_optional(&mut *tx)
                    .await?;
                tx.commit().await?;
                let created = row.as_ref().map(Self::transform).transpose()?;
                Ok(created.map(|created| created.#key))
            }
        };

        Ok(operation(
            OperationKind::Create,
            field_names(&columns),
            Some(sql),
            tokens
        ))
    }

    /// Generate `update`.
    ///
    /// # SQL Pattern
    ///
    /// ```sql
    /// UPDATE "table" SET "col1" = $1, "col2" = $2, ... WHERE "key" = $n
    /// ```
    ///
    /// Every storable field is written. The entity's own key is returned
    /// whether or not a row matched.
    pub fn update_method(&self) -> Result<Operation, MappingError> {
        let entity_name = self.entity_name;
        let key_ty = self.key_ty;
        let key = self.key.name();

        let names: Vec<&str> = self.columns.iter().map(|c| c.plan.column()).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE {}",
            self.table,
            set_clause(&names),
            equals(self.key.plan.column(), self.columns.len() + 1)
        );
        let bindings = entity_bindings(&self.columns)?;
        let key_binding = self.key.encode(&self.key.entity_source())?;

        let tokens = quote! {
            async fn update(&self, entity: &#entity_name) -> Result<#key_ty, sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                sqlx::query(#sql)
                    #(.bind(#bindings))*
                    .bind(#key_binding)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(entity.#key.clone())
            }
        };

        Ok(operation(
            OperationKind::Update,
            field_names(&self.columns),
            Some(sql),
            tokens
        ))
    }

    /// Generate `delete`.
    ///
    /// # SQL Pattern
    ///
    /// ```sql
    /// DELETE FROM "table" WHERE "key" = $1
    /// ```
    pub fn delete_method(&self) -> Result<Operation, MappingError> {
        let key_ty = self.key_ty;
        let sql = format!(
            "DELETE FROM {} WHERE {}",
            self.table,
            equals(self.key.plan.column(), 1)
        );
        let key_binding = self.key.encode_value("key")?;

        let tokens = quote! {
            /// Delete the row stored under `key`.
            pub async fn delete(&self, key: &#key_ty) -> Result<(), sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                sqlx::query(#sql)
                    .bind(#key_binding)
                    .execute(&mut *tx)
                    .await?;
                tx.commit().await?;
                Ok(())
            }
        };

        Ok(operation(
            OperationKind::Delete,
            vec![self.key.name().clone()],
            Some(sql),
            tokens
        ))
    }

    /// Generate `get`.
    ///
    /// # SQL Pattern
    ///
    /// ```sql
    /// SELECT "col1", "col2", ... FROM "table" WHERE "key" = $1
    /// ```
    pub fn get_method(&self) -> Result<Operation, MappingError> {
        let entity_name = self.entity_name;
        let key_ty = self.key_ty;
        let sql = format!(
            "{} WHERE {}",
            self.select_sql(),
            equals(self.key.plan.column(), 1)
        );
        let key_binding = self.key.encode_value("key")?;

        let tokens = quote! {
            /// Fetch the entity stored under `key`.
            pub async fn get(&self, key: &#key_ty) -> Result<Option<#entity_name>, sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                let row = sqlx::query(#sql)
                    .bind(#key_binding)
                    .fetch_optional(&mut *tx)
                    .await?;
                tx.commit().await?;
                row.as_ref().map(Self::transform).transpose()
            }
        };

        Ok(operation(
            OperationKind::Get,
            vec![self.key.name().clone()],
            Some(sql),
            tokens
        ))
    }

    /// Generate `get_all`.
    ///
    /// # SQL Pattern
    ///
    /// ```sql
    /// SELECT "col1", "col2", ... FROM "table"
    /// ```
    ///
    /// No ordering is applied.
    pub fn get_all_method(&self) -> Operation {
        let entity_name = self.entity_name;
        let sql = self.select_sql();

        let tokens = quote! {
            /// Fetch every stored entity, in storage order.
            pub async fn get_all(&self) -> Result<Vec<#entity_name>, sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                let rows = sqlx::query(#sql).fetch_all(&mut *tx).await?;
                tx.commit().await?;
                rows.iter().map(Self::transform).collect()
            }
        };

        operation(OperationKind::GetAll, Vec::new(), Some(sql), tokens)
    }
}

/// Encode expressions for `columns` read from the `entity` parameter.
fn entity_bindings(columns: &[Column<'_>]) -> Result<Vec<syn::Expr>, MappingError> {
    columns
        .iter()
        .map(|column| column.encode(&column.entity_source()))
        .collect()
}

pub(super) fn field_names(columns: &[Column<'_>]) -> Vec<syn::Ident> {
    columns.iter().map(|column| column.name().clone()).collect()
}

pub(super) fn operation(
    kind: OperationKind,
    fields: Vec<syn::Ident>,
    sql: Option<String>,
    tokens: proc_macro2::TokenStream
) -> Operation {
    Operation {
        name: kind.method_name(),
        public: kind.is_public(),
        kind,
        fields,
        sql,
        tokens
    }
}
