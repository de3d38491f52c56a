// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity description and schema validation.
//!
//! It uses [`darling`] for `#[table_schema(...)]` and `#[type_mapping(...)]`
//! and manual parsing for the marker attributes (`#[primary_key]`,
//! `#[lookup_key]`, `#[non_savable]`, `#[serializable]`).
//!
//! # Data Structures
//!
//! ```text
//! EntityDescription                 (raw, unvalidated)
//! ├── name, namespace, class_name, table, hide_columns
//! └── fields: Vec<FieldDescription>
//!         ├── name, ty
//!         ├── roles: FieldRoles
//!         ├── serializable
//!         └── mapping: Option<TypeMapping>
//!
//!     EntitySchema::build
//!             │
//!             ▼
//! EntitySchema                      (validated)
//! ├── origin / generated type names, namespace, table_name
//! ├── storable: Vec<FieldDescriptor>
//! │       └── value type, SemanticType, nullable, roles
//! ├── primary_key
//! └── transient: Vec<Ident>
//! ```

mod entity;
mod field;
mod schema;

pub use entity::EntityDescription;
pub use field::{FieldDescription, FieldDescriptor, FieldRoles, SemanticType, TypeMapping};
pub use schema::EntitySchema;
