// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! DDL (Data Definition Language) generation for PostgreSQL.
//!
//! Generates the statements of `create_schema`:
//!
//! 1. `CREATE TABLE IF NOT EXISTS` with every column and the primary key
//! 2. `ALTER TABLE ... ADD COLUMN IF NOT EXISTS` per column, so columns
//!    added to the entity later reach existing tables
//! 3. `CREATE INDEX IF NOT EXISTS` per indexed column
//!
//! All of them are idempotent.

use super::context::Context;
use crate::{
    entity::{
        column::{ColumnPlan, Modifier},
        unit::SchemaBlock
    },
    utils::sql::quote_ident
};

/// Column definition: `"title" TEXT NOT NULL`.
pub fn column_definition(plan: &ColumnPlan) -> String {
    let mut parts = vec![quote_ident(plan.column()), plan.storage().sql().to_owned()];

    if plan.has_modifier(Modifier::AutoIncrement) {
        parts.push("GENERATED BY DEFAULT AS IDENTITY".to_owned());
    }
    if !plan.is_nullable() {
        parts.push("NOT NULL".to_owned());
    }

    parts.join(" ")
}

/// Index name for a column: `idx_article_title`.
pub fn index_name(table: &str, column: &str) -> String {
    format!("idx_{table}_{column}")
}

fn create_table(ctx: &Context<'_>) -> String {
    let mut definitions: Vec<String> = ctx
        .columns
        .iter()
        .map(|column| column_definition(column.plan))
        .collect();
    definitions.push(format!("PRIMARY KEY ({})", ctx.key_column()));

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        ctx.table,
        definitions.join(", ")
    )
}

fn add_column(ctx: &Context<'_>, plan: &ColumnPlan) -> String {
    format!(
        "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {}",
        ctx.table,
        column_definition(plan)
    )
}

fn create_index(ctx: &Context<'_>, plan: &ColumnPlan) -> String {
    let name = index_name(ctx.schema.table_name(), plan.column());
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
        quote_ident(&name),
        ctx.table,
        quote_ident(plan.column())
    )
}

/// All `create_schema` statements, in execution order.
pub fn schema_block(ctx: &Context<'_>) -> SchemaBlock {
    let mut statements = vec![create_table(ctx)];

    for column in &ctx.columns {
        statements.push(add_column(ctx, column.plan));
    }

    for column in &ctx.columns {
        if column.plan.has_modifier(Modifier::Indexed) {
            statements.push(create_index(ctx, column.plan));
        }
    }

    SchemaBlock { statements }
}
