// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Table object synthesis.
//!
//! Turns a schema and its column plans into a [`GeneratedUnit`].
//!
//! # Generated Structure
//!
//! ```rust,ignore
//! use super::*;
//! use sqlx::Row;
//! use sqlx::postgres::{PgPool, PgRow};
//!
//! pub struct ArticleTable { pool: PgPool }
//!
//! impl ArticleTable {
//!     pub const TABLE_NAME: &'static str = "article";
//!     pub const COLUMN_UUID: &'static str = "\"uuid\" UUID NOT NULL";
//!     pub const PRIMARY_KEY: &'static str = "uuid";
//!
//!     pub async fn new(pool: PgPool) -> Result<Self, sqlx::Error>;
//!     pub async fn create_schema(&self) -> Result<(), sqlx::Error>;
//!     pub async fn save(&self, entity: &Article) -> Result<Option<Uuid>, sqlx::Error>;
//!     async fn create(&self, entity: &Article) -> Result<Option<Uuid>, sqlx::Error>;
//!     async fn update(&self, entity: &Article) -> Result<Uuid, sqlx::Error>;
//!     pub async fn delete(&self, key: &Uuid) -> Result<(), sqlx::Error>;
//!     pub async fn get(&self, key: &Uuid) -> Result<Option<Article>, sqlx::Error>;
//!     pub async fn get_all(&self) -> Result<Vec<Article>, sqlx::Error>;
//!     pub async fn get_by_title(&self, key: &String) -> Result<Vec<Article>, sqlx::Error>;
//!     fn transform(row: &PgRow) -> Result<Article, sqlx::Error>;
//! }
//! ```

mod context;
mod crud;
mod ddl;
mod lookup;
mod transform;

use std::collections::BTreeMap;

use tracing::debug;

use self::{context::Context, ddl::column_definition};
use crate::{
    entity::{
        column::ColumnPlans,
        parse::EntitySchema,
        unit::{ColumnProperty, GeneratedUnit, Import, PrimaryKeyDecl, TableObject}
    },
    error::MappingError
};

/// `use` paths every unit needs besides the entity namespace.
pub const BASE_IMPORTS: [&str; 2] = ["sqlx::Row", "sqlx::postgres::{PgPool, PgRow}"];

/// Build the table object for `schema`.
///
/// `plans` must hold a plan for every storable field, as produced by
/// [`ColumnPlans::resolve`].
///
/// # Errors
///
/// - [`MappingError::MissingPlan`] when a storable field has no plan
/// - [`MappingError::InvalidTemplate`] when a filled expression does not parse
/// - [`MappingError::InvalidImport`] when a plan import is not a use path
///
/// # Examples
///
/// ```rust,ignore
/// let schema = EntitySchema::build(&description)?;
/// let plans = ColumnPlans::resolve(&schema)?;
/// let unit = synthesize(&schema, &plans)?;
/// std::fs::write(unit.file_name(), unit.render()?)?;
/// ```
pub fn synthesize(
    schema: &EntitySchema,
    plans: &ColumnPlans
) -> Result<GeneratedUnit, MappingError> {
    let ctx = Context::new(schema, plans)?;

    let mut operations = vec![
        ctx.save_method(),
        ctx.create_method()?,
        ctx.update_method()?,
        ctx.delete_method()?,
        ctx.get_method()?,
        ctx.get_all_method(),
    ];
    for column in ctx.lookup_columns() {
        operations.push(ctx.lookup_method(column)?);
    }
    operations.push(ctx.transform_method()?);

    let columns = ctx
        .columns
        .iter()
        .map(|column| ColumnProperty {
            field:      column.name().clone(),
            const_name: ColumnProperty::const_name_for(column.name()),
            storage:    column.plan.storage(),
            modifiers:  column.plan.modifiers().to_vec(),
            definition: column_definition(column.plan),
            public:     !schema.hide_columns()
        })
        .collect();

    let primary_key = PrimaryKeyDecl {
        field:  ctx.key.name().clone(),
        ty:     ctx.key_ty.clone(),
        column: ctx.key.plan.column().to_owned()
    };

    let table = TableObject {
        name: schema.generated_type_name().clone(),
        entity: schema.origin_type_name().clone(),
        table_name: schema.table_name().to_owned(),
        columns,
        primary_key,
        schema_block: ddl::schema_block(&ctx),
        operations
    };

    let imports = imports(&ctx)?;

    debug!(
        entity = %table.entity,
        table_object = %table.name,
        columns = table.columns.len(),
        operations = table.operations.len(),
        imports = imports.len(),
        "table object synthesized"
    );

    Ok(GeneratedUnit { imports, table })
}

/// Entity namespace glob and sqlx primitives, then plan imports sorted and
/// deduplicated.
fn imports(ctx: &Context<'_>) -> Result<Vec<Import>, MappingError> {
    let namespace = namespace_glob(ctx.schema);
    let entity = ctx.entity_name;

    let mut imports = std::iter::once(namespace.as_str())
        .chain(BASE_IMPORTS)
        .map(|path| {
            Import::parse(path).ok_or_else(|| MappingError::InvalidImport {
                field: entity.to_string(),
                path:  path.to_owned(),
                span:  entity.span()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut extra = BTreeMap::new();
    for column in &ctx.columns {
        for path in column.plan.imports() {
            if !BASE_IMPORTS.contains(&path.as_str()) {
                extra.entry(path.as_str()).or_insert(column.field);
            }
        }
    }

    for (path, field) in extra {
        let import = Import::parse(path).ok_or_else(|| MappingError::InvalidImport {
            field: field.name_str(),
            path:  path.to_owned(),
            span:  field.span()
        })?;
        imports.push(import);
    }

    Ok(imports)
}

/// `super::*` or `<namespace>::*`.
fn namespace_glob(schema: &EntitySchema) -> String {
    let path = schema.namespace();
    let segments: Vec<String> = path.segments.iter().map(|s| s.ident.to_string()).collect();
    let prefix = if path.leading_colon.is_some() { "::" } else { "" };
    format!("{prefix}{}::*", segments.join("::"))
}
