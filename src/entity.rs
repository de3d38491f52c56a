// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity to table object pipeline.
//!
//! ```text
//! EntityDescription ──build──► EntitySchema ──resolve──► ColumnPlans
//!                                    │                        │
//!                                    └──────synthesize────────┘
//!                                               │
//!                                               ▼
//!                                        GeneratedUnit
//! ```

pub mod column;
pub mod dao;
pub mod parse;
pub mod unit;

use tracing::debug;

use self::{
    column::ColumnPlans,
    parse::{EntityDescription, EntitySchema},
    unit::GeneratedUnit
};
use crate::error::GenerateError;

/// Run the whole pipeline for one entity.
///
/// # Errors
///
/// The first [`SchemaError`](crate::SchemaError) or
/// [`MappingError`](crate::MappingError) hit along the way, wrapped in
/// [`GenerateError`]. No partial unit is produced.
///
/// # Examples
///
/// ```rust,ignore
/// let description = EntityDescription::from_derive_input(&input)?;
/// let unit = table_dao::generate(&description)?;
/// assert_eq!(unit.file_name(), "article_table.rs");
/// ```
pub fn generate(description: &EntityDescription) -> Result<GeneratedUnit, GenerateError> {
    let schema = EntitySchema::build(description)?;
    let plans = ColumnPlans::resolve(&schema)?;
    let unit = dao::synthesize(&schema, &plans)?;

    debug!(
        entity = %schema.origin_type_name(),
        file = %unit.file_name(),
        "unit generated"
    );

    Ok(unit)
}
