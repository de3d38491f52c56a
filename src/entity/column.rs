// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field to column mapping.
//!
//! [`resolve`] decides, for one storable field, the column type, the
//! modifiers and the expressions that convert between the field value and
//! the column value. The first matching branch wins:
//!
//! 1. **Mapped**: `#[type_mapping(...)]`, user templates composed with the
//!    primitive row for `store_as`
//! 2. **Primitive**: the table below
//! 3. **Serializable**: `#[serializable]`, JSON text
//!
//! | Semantic type | Storage | Encode | Decode |
//! |---------------|---------|--------|--------|
//! | `i32` | `INTEGER` | identity | identity |
//! | `i64` | `BIGINT` | identity | identity |
//! | `Uuid` | `UUID` | identity | identity |
//! | `String` | `TEXT` | identity | identity |
//! | `bool` | `BOOLEAN` | identity | identity |
//! | `NaiveDateTime` | `TEXT` | `encode_date_time` | `decode_date_time` |
//! | `DateTime<Tz>` | `TEXT` | `encode_zoned_date_time` | `decode_zoned_date_time` |
//! | `Vec<String>` | `TEXT` | `encode_list` | `decode_list` |
//! | `f32` | `TEXT` | `encode_float` | `decode_float` |
//!
//! Anything else is a [`MappingError::UnsupportedType`]. An auto-increment
//! key must land on `INTEGER` or `BIGINT`.

mod storage;
mod template;

use quote::ToTokens;
use syn::{Type, parse_quote};
use tracing::{trace, warn};

pub use self::{
    storage::{Modifier, StorageType},
    template::{HOLE, Template, TemplateError}
};
use crate::{
    entity::{
        parse::{EntitySchema, FieldDescriptor, SemanticType, TypeMapping},
        unit::Import
    },
    error::MappingError,
    utils::types::display_type
};

/// Module the generated code imports codec functions from.
pub const CODEC_MODULE: &str = "table_dao::codec";

const DECODE_ERR: &str = ".map_err(|err| sqlx::Error::Decode(Box::new(err)))?";
const ENCODE_ERR: &str = ".map_err(|err| sqlx::Error::Encode(Box::new(err)))?";

/// Branch of [`resolve`] that produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingBranch {
    Mapped,
    Primitive,
    Serializable
}

/// Mapping decision for one storable field.
///
/// Encode expressions take a reference to the field value (`&entity.title`
/// or a `key: &T` parameter). Decode expressions take the column value read
/// as [`storage_ty`](Self::storage_ty).
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    column:     String,
    storage:    StorageType,
    storage_ty: Type,
    modifiers:  Vec<Modifier>,
    branch:     MappingBranch,
    encode:     Template,
    decode:     Template,
    imports:    Vec<String>
}

impl ColumnPlan {
    /// Column name, equal to the field name.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn storage(&self) -> StorageType {
        self.storage
    }

    /// Rust type the column value is read as.
    pub fn storage_ty(&self) -> &Type {
        &self.storage_ty
    }

    /// Modifiers in `AutoIncrement`, `Indexed`, `Nullable` order.
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn has_modifier(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    pub fn is_nullable(&self) -> bool {
        self.has_modifier(Modifier::Nullable)
    }

    pub fn branch(&self) -> MappingBranch {
        self.branch
    }

    pub fn encode_template(&self) -> &Template {
        &self.encode
    }

    pub fn decode_template(&self) -> &Template {
        &self.decode
    }

    /// `use` paths the expressions need.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Encode a present value.
    pub fn encode_value_expr(&self, source: &str) -> String {
        self.encode.fill(source)
    }

    /// Decode a present column value.
    pub fn decode_value_expr(&self, source: &str) -> String {
        self.decode.fill(source)
    }

    /// Encode a field value, honouring nullability.
    ///
    /// For a nullable column `None` is stored as NULL and the inner
    /// expression is only evaluated for `Some`.
    pub fn encode_expr(&self, source: &str) -> String {
        wrap_nullable(self.is_nullable(), &self.encode, source)
    }

    /// Decode a column value, honouring nullability.
    pub fn decode_expr(&self, source: &str) -> String {
        wrap_nullable(self.is_nullable(), &self.decode, source)
    }

    /// Expression reading this column from `row`.
    ///
    /// `row.try_get::<String, _>("title")?`, with `Option<_>` around the
    /// storage type for nullable columns.
    pub fn read_expr(&self, row: &str) -> String {
        let storage_ty = self.storage_ty.to_token_stream();
        let ty = if self.is_nullable() {
            format!("Option<{storage_ty}>")
        } else {
            storage_ty.to_string()
        };
        format!("{row}.try_get::<{ty}, _>({:?})?", self.column)
    }
}

fn wrap_nullable(nullable: bool, template: &Template, source: &str) -> String {
    if !nullable || template.is_identity() {
        return template.fill(source);
    }
    format!(
        "match {source} {{ Some(value) => Some({}), None => None }}",
        template.fill("value")
    )
}

/// Ordered map field name to [`ColumnPlan`].
#[derive(Debug, Clone, Default)]
pub struct ColumnPlans {
    plans: Vec<ColumnPlan>
}

impl ColumnPlans {
    /// Resolve every storable field of `schema`, in order.
    ///
    /// # Errors
    ///
    /// The first field that cannot be mapped aborts resolution.
    pub fn resolve(schema: &EntitySchema) -> Result<Self, MappingError> {
        let mut plans = Self::default();
        for field in schema.storable_fields() {
            plans.insert(resolve(field)?);
        }
        Ok(plans)
    }

    /// Add a plan, replacing any plan for the same column.
    pub fn insert(&mut self, plan: ColumnPlan) {
        match self.plans.iter_mut().find(|p| p.column == plan.column) {
            Some(existing) => *existing = plan,
            None => self.plans.push(plan)
        }
    }

    /// Remove the plan for `column`.
    pub fn remove(&mut self, column: &str) -> Option<ColumnPlan> {
        let index = self.plans.iter().position(|p| p.column == column)?;
        Some(self.plans.remove(index))
    }

    pub fn get(&self, column: &str) -> Option<&ColumnPlan> {
        self.plans.iter().find(|p| p.column == column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnPlan> {
        self.plans.iter()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

/// Plan the column for one storable field.
///
/// # Errors
///
/// - [`MappingError::UnsupportedType`] when no branch applies
/// - [`MappingError::InvalidTemplate`], [`MappingError::UnknownColumnType`]
///   or [`MappingError::UnsupportedStoreAs`] for a bad `#[type_mapping]`
/// - [`MappingError::AutoIncrementStorage`] for an auto-increment key that
///   is not stored as an integer
///
/// # Examples
///
/// ```rust,ignore
/// let plan = resolve(field)?;
/// assert_eq!(plan.storage(), StorageType::Text);
/// assert_eq!(plan.encode_expr("&entity.tags"), "encode_list(&entity.tags)");
/// ```
pub fn resolve(field: &FieldDescriptor) -> Result<ColumnPlan, MappingError> {
    let (branch, mapping) = match field.semantic() {
        SemanticType::UserMapped(mapping) => (MappingBranch::Mapped, mapped(field, mapping)?),
        SemanticType::UserSerializable => (MappingBranch::Serializable, serializable()),
        SemanticType::Opaque => {
            return Err(MappingError::UnsupportedType {
                field: field.name_str(),
                ty:    display_type(field.value_ty()),
                span:  field.span()
            });
        }
        semantic => match primitive(semantic, field.value_ty()) {
            Some(mapping) => (MappingBranch::Primitive, mapping),
            None => {
                return Err(MappingError::UnsupportedType {
                    field: field.name_str(),
                    ty:    display_type(field.value_ty()),
                    span:  field.span()
                });
            }
        }
    };

    if field.is_auto_increment() && !mapping.storage.is_integer() {
        return Err(MappingError::AutoIncrementStorage {
            field:   field.name_str(),
            storage: mapping.storage,
            span:    field.span()
        });
    }

    let plan = ColumnPlan {
        column: field.name_str(),
        storage: mapping.storage,
        storage_ty: mapping.storage_ty,
        modifiers: modifiers(field),
        branch,
        encode: mapping.encode,
        decode: mapping.decode,
        imports: mapping.imports
    };

    if matches!(field.semantic(), SemanticType::ListOfString) {
        warn!(
            field = %plan.column,
            "list column uses bare comma separators, elements containing commas will not round-trip"
        );
    }

    trace!(
        field = %plan.column,
        storage = %plan.storage,
        branch = ?plan.branch,
        modifiers = ?plan.modifiers,
        encode = plan.encode.as_str(),
        decode = plan.decode.as_str(),
        "column planned"
    );

    Ok(plan)
}

/// Branch-specific part of a plan.
struct Mapping {
    storage:    StorageType,
    storage_ty: Type,
    encode:     Template,
    decode:     Template,
    imports:    Vec<String>
}

impl Mapping {
    fn identity(storage: StorageType, storage_ty: &Type) -> Self {
        Self {
            storage,
            storage_ty: storage_ty.clone(),
            encode: Template::identity(),
            decode: Template::identity(),
            imports: Vec::new()
        }
    }

    /// Text column through a pair of codec functions.
    fn codec(encode_fn: &str, encode: &str, decode_fn: &str, decode: &str) -> Self {
        Self {
            storage:    StorageType::Text,
            storage_ty: parse_quote!(String),
            encode:     Template::builtin(encode),
            decode:     Template::builtin(decode),
            imports:    vec![
                format!("{CODEC_MODULE}::{decode_fn}"),
                format!("{CODEC_MODULE}::{encode_fn}"),
            ]
        }
    }
}

fn modifiers(field: &FieldDescriptor) -> Vec<Modifier> {
    let mut modifiers = Vec::new();
    if field.is_auto_increment() {
        modifiers.push(Modifier::AutoIncrement);
    }
    if field.is_lookup_key() {
        modifiers.push(Modifier::Indexed);
    }
    if field.is_nullable() {
        modifiers.push(Modifier::Nullable);
    }
    modifiers
}

fn primitive(semantic: &SemanticType, value_ty: &Type) -> Option<Mapping> {
    let mapping = match semantic {
        SemanticType::Int32 => Mapping::identity(StorageType::Integer, value_ty),
        SemanticType::Int64 => Mapping::identity(StorageType::BigInt, value_ty),
        SemanticType::Uuid => Mapping::identity(StorageType::Uuid, value_ty),
        SemanticType::String => Mapping::identity(StorageType::Text, value_ty),
        SemanticType::Boolean => Mapping::identity(StorageType::Boolean, value_ty),
        SemanticType::DateTime => Mapping::codec(
            "encode_date_time",
            "encode_date_time({})",
            "decode_date_time",
            &format!("decode_date_time(&{{}}){DECODE_ERR}")
        ),
        SemanticType::ZonedDateTime => Mapping::codec(
            "encode_zoned_date_time",
            "encode_zoned_date_time({})",
            "decode_zoned_date_time",
            &format!("decode_zoned_date_time(&{{}}){DECODE_ERR}")
        ),
        SemanticType::ListOfString => Mapping::codec(
            "encode_list",
            "encode_list({})",
            "decode_list",
            "decode_list(&{})"
        ),
        SemanticType::Float32 => Mapping::codec(
            "encode_float",
            "encode_float(*{})",
            "decode_float",
            &format!("decode_float(&{{}}){DECODE_ERR}")
        ),
        SemanticType::UserSerializable | SemanticType::UserMapped(_) | SemanticType::Opaque => {
            return None;
        }
    };
    Some(mapping)
}

fn serializable() -> Mapping {
    Mapping::codec(
        "encode_serialized",
        &format!("encode_serialized({{}}){ENCODE_ERR}"),
        "decode_serialized",
        &format!("decode_serialized(&{{}}){DECODE_ERR}")
    )
}

/// User mapping through `store_as`.
///
/// Without `column_type` the column follows the primitive row for
/// `store_as`, and the user templates are composed with that row's codec:
/// encode runs the user template then the codec, decode runs the codec then
/// the user template. With `column_type` the column is read as that type's
/// canonical Rust type and only the user templates apply.
fn mapped(field: &FieldDescriptor, mapping: &TypeMapping) -> Result<Mapping, MappingError> {
    let template = |slot: &'static str, text: Option<&String>| match text {
        Some(text) => Template::new(text.as_str()).map_err(|err| MappingError::InvalidTemplate {
            field: field.name_str(),
            slot,
            template: text.clone(),
            reason: err.to_string(),
            span: field.span()
        }),
        None => Ok(Template::identity())
    };
    let encode = template("encode", mapping.encode.as_ref())?;
    let decode = template("decode", mapping.decode.as_ref())?;

    if let Some(path) = mapping.imports.iter().find(|path| Import::parse(path).is_none()) {
        return Err(MappingError::InvalidImport {
            field: field.name_str(),
            path:  path.clone(),
            span:  field.span()
        });
    }

    if let Some(name) = &mapping.column_type {
        let storage = StorageType::from_name(name).ok_or_else(|| MappingError::UnknownColumnType {
            field:       field.name_str(),
            column_type: name.clone(),
            span:        field.span()
        })?;
        return Ok(Mapping {
            storage,
            storage_ty: storage.rust_type(),
            encode,
            decode,
            imports: mapping.imports.clone()
        });
    }

    let base = SemanticType::primitive(&mapping.store_as)
        .as_ref()
        .and_then(|semantic| primitive(semantic, &mapping.store_as))
        .ok_or_else(|| MappingError::UnsupportedStoreAs {
            field:    field.name_str(),
            store_as: display_type(&mapping.store_as),
            span:     field.span()
        })?;

    // Codec encoders borrow, user encoders yield an owned `store_as`.
    let encode = if base.encode.is_identity() || encode.is_identity() {
        base.encode.around(&encode)
    } else {
        base.encode.around(&Template::builtin(&format!("&({})", encode.as_str())))
    };

    let mut imports = base.imports;
    imports.extend(mapping.imports.iter().cloned());

    Ok(Mapping {
        storage: base.storage,
        storage_ty: base.storage_ty,
        encode,
        decode: decode.around(&base.decode),
        imports
    })
}
