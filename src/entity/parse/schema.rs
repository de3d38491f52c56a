// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validated entity schema.
//!
//! [`EntitySchema::build`] is the only way to obtain a schema, so every
//! schema that reaches the type mapper has exactly one non-nullable primary
//! key, unique valid field names, and no field named `id`.

use std::collections::{HashMap, HashSet};

use convert_case::{Case, Casing};
use syn::{Ident, Path};
use tracing::debug;

use super::{
    entity::EntityDescription,
    field::{FieldDescription, FieldDescriptor}
};
use crate::{entity::unit::ColumnProperty, error::SchemaError, utils::types::parse_identifier};

/// Field name reserved by the generated code.
pub const RESERVED_FIELD_NAME: &str = "id";

/// Module path used when the description sets none.
pub const DEFAULT_NAMESPACE: &str = "super";

/// Suffix of the default generated type name.
pub const GENERATED_SUFFIX: &str = "Table";

/// Normalized entity, input of the type mapper and the DAO synthesizer.
///
/// # Field Access
///
/// ```rust,ignore
/// let schema = EntitySchema::build(&description)?;
///
/// // Columns, insert/update binds, select list and transform order
/// for field in schema.storable_fields() { /* ... */ }
///
/// // Key of get/delete/update
/// let key = schema.primary_key();
///
/// // One get_by_<field> query each
/// let lookups: Vec<_> = schema.lookup_fields().collect();
/// ```
#[derive(Debug, Clone)]
pub struct EntitySchema {
    origin:       Ident,
    generated:    Ident,
    namespace:    Path,
    table_name:   String,
    hide_columns: bool,
    storable:     Vec<FieldDescriptor>,
    primary_key:  usize,
    transient:    Vec<Ident>
}

impl EntitySchema {
    /// Validate a raw description.
    ///
    /// # Errors
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | no fields | [`SchemaError::MalformedEntity`] |
    /// | invalid entity, class or field name | [`SchemaError::InvalidIdentifier`] |
    /// | invalid namespace | [`SchemaError::InvalidNamespace`] |
    /// | field named `id` | [`SchemaError::ReservedFieldName`] |
    /// | same name twice | [`SchemaError::DuplicateField`] |
    /// | two stored fields with one column constant | [`SchemaError::ColumnConstantCollision`] |
    /// | `#[non_savable]` key | [`SchemaError::ConflictingRoles`] |
    /// | no key | [`SchemaError::MissingPrimaryKey`] |
    /// | several keys | [`SchemaError::MultiplePrimaryKeys`] |
    /// | `Option` key | [`SchemaError::NullablePrimaryKey`] |
    pub fn build(description: &EntityDescription) -> Result<Self, SchemaError> {
        let entity = description.name.clone();
        let span = description.span;

        let origin = parse_identifier(&entity, span).ok_or_else(|| {
            SchemaError::InvalidIdentifier {
                entity: entity.clone(),
                name: entity.clone(),
                span
            }
        })?;

        if description.fields.is_empty() {
            return Err(SchemaError::MalformedEntity {
                entity,
                reason: "an entity needs at least one field".to_owned(),
                span
            });
        }

        let generated_name = description
            .class_name
            .clone()
            .unwrap_or_else(|| format!("{entity}{GENERATED_SUFFIX}"));
        let generated = parse_identifier(&generated_name, span).ok_or_else(|| {
            SchemaError::InvalidIdentifier {
                entity: entity.clone(),
                name: generated_name.clone(),
                span
            }
        })?;

        let namespace_text = description.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE);
        let namespace = syn::parse_str::<Path>(namespace_text).map_err(|_| {
            SchemaError::InvalidNamespace {
                entity: entity.clone(),
                namespace: namespace_text.to_owned(),
                span
            }
        })?;

        let table_name = match &description.table {
            Some(table) if table.trim().is_empty() => {
                return Err(SchemaError::MalformedEntity {
                    entity,
                    reason: "table name is empty".to_owned(),
                    span
                });
            }
            Some(table) => table.clone(),
            None => entity.to_case(Case::Snake)
        };

        let mut seen = HashSet::new();
        let mut constants: HashMap<String, String> = HashMap::new();
        let mut storable = Vec::new();
        let mut transient = Vec::new();
        let mut keys: Vec<&FieldDescription> = Vec::new();

        for field in &description.fields {
            let ident = validate_field(&entity, field, &mut seen)?;
            if field.roles.non_savable {
                transient.push(ident);
                continue;
            }
            let constant = ColumnProperty::const_name_for(&ident).to_string();
            if let Some(other) = constants.insert(constant.clone(), field.name.clone()) {
                return Err(SchemaError::ColumnConstantCollision {
                    entity,
                    field: field.name.clone(),
                    other,
                    constant,
                    span: field.span
                });
            }
            if field.roles.primary_key {
                keys.push(field);
            }
            storable.push(FieldDescriptor::new(ident, field));
        }

        let key = match keys.as_slice() {
            [] => return Err(SchemaError::MissingPrimaryKey { entity, span }),
            [key] => *key,
            [_, second, ..] => {
                return Err(SchemaError::MultiplePrimaryKeys {
                    fields: keys.iter().map(|k| k.name.clone()).collect(),
                    span: second.span,
                    entity
                });
            }
        };

        let primary_key = storable
            .iter()
            .position(FieldDescriptor::is_primary_key)
            .ok_or_else(|| SchemaError::MissingPrimaryKey {
                entity: entity.clone(),
                span
            })?;

        if storable[primary_key].is_nullable() {
            return Err(SchemaError::NullablePrimaryKey {
                entity,
                field: key.name.clone(),
                span: key.span
            });
        }

        let schema = Self {
            origin,
            generated,
            namespace,
            table_name,
            hide_columns: description.hide_columns,
            storable,
            primary_key,
            transient
        };

        debug!(
            entity = %schema.origin,
            table = %schema.table_name,
            storable = schema.storable.len(),
            transient = schema.transient.len(),
            lookups = schema.lookup_fields().count(),
            "entity schema built"
        );

        Ok(schema)
    }

    /// Entity type.
    pub fn origin_type_name(&self) -> &Ident {
        &self.origin
    }

    /// Generated table object type.
    pub fn generated_type_name(&self) -> &Ident {
        &self.generated
    }

    /// Module the entity is imported from.
    pub fn namespace(&self) -> &Path {
        &self.namespace
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn hide_columns(&self) -> bool {
        self.hide_columns
    }

    /// Stored fields in declaration order.
    pub fn storable_fields(&self) -> &[FieldDescriptor] {
        &self.storable
    }

    /// The single primary key.
    pub fn primary_key(&self) -> &FieldDescriptor {
        &self.storable[self.primary_key]
    }

    /// Stored fields with `#[lookup_key]`, in declaration order.
    pub fn lookup_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.storable.iter().filter(|field| field.is_lookup_key())
    }

    /// Names of `#[non_savable]` fields.
    pub fn transient_fields(&self) -> &[Ident] {
        &self.transient
    }
}

/// Check one field's name and roles, returning its identifier.
fn validate_field(
    entity: &str,
    field: &FieldDescription,
    seen: &mut HashSet<String>
) -> Result<Ident, SchemaError> {
    if field.name == RESERVED_FIELD_NAME {
        return Err(SchemaError::ReservedFieldName {
            entity: entity.to_owned(),
            span:   field.span
        });
    }

    let ident = parse_identifier(&field.name, field.span).ok_or_else(|| {
        SchemaError::InvalidIdentifier {
            entity: entity.to_owned(),
            name:   field.name.clone(),
            span:   field.span
        }
    })?;

    if !seen.insert(field.name.clone()) {
        return Err(SchemaError::DuplicateField {
            entity: entity.to_owned(),
            field:  field.name.clone(),
            span:   field.span
        });
    }

    if field.roles.is_conflicting() {
        return Err(SchemaError::ConflictingRoles {
            entity: entity.to_owned(),
            field:  field.name.clone(),
            span:   field.span
        });
    }

    Ok(ident)
}

#[cfg(test)]
mod tests {
    use quote::ToTokens;
    use syn::parse_quote;

    use super::*;

    fn article() -> EntityDescription {
        EntityDescription::new("Article")
            .field(FieldDescription::new("uuid", parse_quote!(Uuid)).primary_key())
            .field(FieldDescription::new("title", parse_quote!(String)).lookup_key())
            .field(FieldDescription::new("count", parse_quote!(i64)))
    }

    #[test]
    fn defaults() {
        let schema = EntitySchema::build(&article()).expect("build");
        assert_eq!(schema.origin_type_name().to_string(), "Article");
        assert_eq!(schema.generated_type_name().to_string(), "ArticleTable");
        assert_eq!(schema.namespace().to_token_stream().to_string(), "super");
        assert_eq!(schema.table_name(), "article");
        assert!(!schema.hide_columns());
        assert_eq!(schema.primary_key().name_str(), "uuid");
        assert!(schema.transient_fields().is_empty());
    }

    #[test]
    fn overrides() {
        let description = article()
            .class_name("ArticleStore")
            .table("articles")
            .namespace("crate::model")
            .hide_columns(true);
        let schema = EntitySchema::build(&description).expect("build");
        assert_eq!(schema.generated_type_name().to_string(), "ArticleStore");
        assert_eq!(schema.table_name(), "articles");
        assert_eq!(
            schema.namespace().to_token_stream().to_string(),
            "crate :: model"
        );
        assert!(schema.hide_columns());
    }

    #[test]
    fn table_name_is_snake_case() {
        let description = EntityDescription::new("SampleObject")
            .field(FieldDescription::new("uuid", parse_quote!(Uuid)).primary_key());
        let schema = EntitySchema::build(&description).expect("build");
        assert_eq!(schema.table_name(), "sample_object");
        assert_eq!(schema.generated_type_name().to_string(), "SampleObjectTable");
    }

    #[test]
    fn storable_order_is_declaration_order() {
        let schema = EntitySchema::build(&article()).expect("build");
        let names: Vec<_> = schema
            .storable_fields()
            .iter()
            .map(FieldDescriptor::name_str)
            .collect();
        assert_eq!(names, ["uuid", "title", "count"]);
    }

    #[test]
    fn lookup_fields_may_include_key() {
        let description = EntityDescription::new("Tag")
            .field(FieldDescription::new("slug", parse_quote!(String)).primary_key().lookup_key())
            .field(FieldDescription::new("label", parse_quote!(String)).lookup_key());
        let schema = EntitySchema::build(&description).expect("build");
        let lookups: Vec<_> = schema.lookup_fields().map(FieldDescriptor::name_str).collect();
        assert_eq!(lookups, ["slug", "label"]);
    }

    #[test]
    fn non_savable_is_transient() {
        let description = article()
            .field(FieldDescription::new("preview", parse_quote!(Vec<u8>)).non_savable());
        let schema = EntitySchema::build(&description).expect("build");
        assert_eq!(schema.storable_fields().len(), 3);
        assert_eq!(schema.transient_fields().len(), 1);
        assert_eq!(schema.transient_fields()[0].to_string(), "preview");
    }

    #[test]
    fn zero_keys_rejected() {
        let description = EntityDescription::new("Article")
            .field(FieldDescription::new("title", parse_quote!(String)));
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::MissingPrimaryKey { .. })
        ));
    }

    #[test]
    fn two_keys_rejected() {
        let description = article()
            .field(FieldDescription::new("slug", parse_quote!(String)).primary_key());
        match EntitySchema::build(&description) {
            Err(SchemaError::MultiplePrimaryKeys { fields, .. }) => {
                assert_eq!(fields, ["uuid", "slug"]);
            }
            other => panic!("expected MultiplePrimaryKeys, got {other:?}")
        }
    }

    #[test]
    fn reserved_name_rejected() {
        let description = article().field(FieldDescription::new("id", parse_quote!(i64)));
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::ReservedFieldName { .. })
        ));
    }

    #[test]
    fn reserved_name_rejected_even_when_transient() {
        let description =
            article().field(FieldDescription::new("id", parse_quote!(i64)).non_savable());
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::ReservedFieldName { .. })
        ));
    }

    #[test]
    fn duplicate_rejected() {
        let description = article().field(FieldDescription::new("title", parse_quote!(String)));
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::DuplicateField { field, .. }) if field == "title"
        ));
    }

    #[test]
    fn column_constant_collision_rejected() {
        let description = article()
            .field(FieldDescription::new("tag_line", parse_quote!(String)))
            .field(FieldDescription::new("tagLine", parse_quote!(String)));
        match EntitySchema::build(&description) {
            Err(SchemaError::ColumnConstantCollision {
                field,
                other,
                constant,
                ..
            }) => {
                assert_eq!(field, "tagLine");
                assert_eq!(other, "tag_line");
                assert_eq!(constant, "COLUMN_TAG_LINE");
            }
            other => panic!("expected ColumnConstantCollision, got {other:?}")
        }
    }

    #[test]
    fn transient_field_does_not_collide() {
        let description = article()
            .field(FieldDescription::new("tag_line", parse_quote!(String)))
            .field(FieldDescription::new("tagLine", parse_quote!(String)).non_savable());
        let schema = EntitySchema::build(&description).expect("build");
        assert_eq!(schema.storable_fields().len(), 4);
    }

    #[test]
    fn invalid_identifiers_rejected() {
        let bad_field = article().field(FieldDescription::new("two words", parse_quote!(i64)));
        assert!(matches!(
            EntitySchema::build(&bad_field),
            Err(SchemaError::InvalidIdentifier { .. })
        ));

        let bad_class = article().class_name("fn");
        assert!(matches!(
            EntitySchema::build(&bad_class),
            Err(SchemaError::InvalidIdentifier { name, .. }) if name == "fn"
        ));
    }

    #[test]
    fn invalid_namespace_rejected() {
        let description = article().namespace("crate::");
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::InvalidNamespace { .. })
        ));
    }

    #[test]
    fn conflicting_roles_rejected() {
        let description = EntityDescription::new("Article")
            .field(FieldDescription::new("uuid", parse_quote!(Uuid)).primary_key().non_savable());
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::ConflictingRoles { .. })
        ));
    }

    #[test]
    fn nullable_key_rejected() {
        let description = EntityDescription::new("Article")
            .field(FieldDescription::new("uuid", parse_quote!(Option<Uuid>)).primary_key());
        assert!(matches!(
            EntitySchema::build(&description),
            Err(SchemaError::NullablePrimaryKey { .. })
        ));
    }

    #[test]
    fn empty_entity_is_malformed() {
        assert!(matches!(
            EntitySchema::build(&EntityDescription::new("Article")),
            Err(SchemaError::MalformedEntity { .. })
        ));
    }

    #[test]
    fn empty_table_is_malformed() {
        assert!(matches!(
            EntitySchema::build(&article().table("  ")),
            Err(SchemaError::MalformedEntity { .. })
        ));
    }
}
