// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Validated storable field.

use proc_macro2::Span;
use syn::{Ident, Type};

use super::{FieldDescription, FieldRoles, SemanticType};
use crate::utils::types::extract_option_inner;

/// One storable field of an [`EntitySchema`](crate::EntitySchema).
///
/// Nullability is split off the declared type: `Option<String>` becomes
/// value type `String` with `is_nullable() == true`.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    ident:    Ident,
    ty:       Type,
    value_ty: Type,
    semantic: SemanticType,
    nullable: bool,
    roles:    FieldRoles,
    span:     Span
}

impl FieldDescriptor {
    /// Normalize a description under an already validated identifier.
    pub fn new(ident: Ident, description: &FieldDescription) -> Self {
        let (value_ty, nullable) = match extract_option_inner(&description.ty) {
            Some(inner) => (inner.clone(), true),
            None => (description.ty.clone(), false)
        };
        let semantic = SemanticType::classify(
            &value_ty,
            description.serializable,
            description.mapping.as_ref()
        );

        Self {
            ident,
            ty: description.ty.clone(),
            value_ty,
            semantic,
            nullable,
            roles: description.roles,
            span: description.span
        }
    }

    /// Field identifier.
    pub fn name(&self) -> &Ident {
        &self.ident
    }

    /// Field name, also the column name.
    pub fn name_str(&self) -> String {
        self.ident.to_string()
    }

    /// Declared type, including `Option`.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Type of a present value.
    pub fn value_ty(&self) -> &Type {
        &self.value_ty
    }

    pub fn semantic(&self) -> &SemanticType {
        &self.semantic
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn roles(&self) -> FieldRoles {
        self.roles
    }

    pub fn is_primary_key(&self) -> bool {
        self.roles.primary_key
    }

    pub fn is_auto_increment(&self) -> bool {
        self.roles.is_auto_increment()
    }

    pub fn is_lookup_key(&self) -> bool {
        self.roles.lookup_key
    }

    /// Location used for diagnostics.
    pub fn span(&self) -> Span {
        self.span
    }
}
