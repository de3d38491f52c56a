// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # table-dao
//!
//! Table-backed data access objects generated from one entity description.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use table_dao::EntityDescription;
//!
//! let input: syn::DeriveInput = syn::parse_quote! {
//!     #[table_schema(table = "articles")]
//!     pub struct Article {
//!         #[primary_key]
//!         pub uuid: Uuid,
//!
//!         #[lookup_key]
//!         pub title: String,
//!
//!         pub tags: Vec<String>,
//!
//!         #[non_savable]
//!         pub cache: Option<String>,
//!     }
//! };
//!
//! let description = EntityDescription::from_derive_input(&input)?;
//! let unit = table_dao::generate(&description)?;
//! std::fs::write(unit.file_name(), unit.render()?)?;
//! ```
//!
//! Generates `ArticleTable` with `create_schema`, `save`, `delete`, `get`,
//! `get_all` and `get_by_title`, backed by `sqlx` and PostgreSQL.
//!
//! ## Stages
//!
//! | Stage | Input | Output |
//! |-------|-------|--------|
//! | [`EntitySchema::build`] | [`EntityDescription`] | [`EntitySchema`] |
//! | [`ColumnPlans::resolve`] | [`EntitySchema`] | [`ColumnPlans`] |
//! | [`synthesize`] | schema + plans | [`GeneratedUnit`] |
//!
//! Generated code calls into [`codec`] at runtime, so the crate is both a
//! build-time generator and a runtime dependency of its output.

pub mod codec;
mod entity;
pub mod error;
mod utils;

pub use self::{
    entity::{
        column::{
            ColumnPlan, ColumnPlans, HOLE, MappingBranch, Modifier, StorageType, Template,
            TemplateError, resolve
        },
        dao::{BASE_IMPORTS, synthesize},
        generate,
        parse::{
            EntityDescription, EntitySchema, FieldDescription, FieldDescriptor, FieldRoles,
            SemanticType, TypeMapping
        },
        unit::{
            ColumnProperty, GENERATED_MARKER, GeneratedUnit, Import, Operation, OperationKind,
            PrimaryKeyDecl, SchemaBlock, TableObject
        }
    },
    error::{GenerateError, MappingError, SchemaError}
};
