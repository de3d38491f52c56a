// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage roles of an entity field.
//!
//! Roles decide which operations a field takes part in: the primary key
//! drives `save`/`get`/`delete`, lookup keys get a `get_by_<field>` query
//! and an index, and non-savable fields never reach the table.

/// Set of roles declared on a field.
///
/// # Attributes
///
/// | Flag | Attribute | Effect |
/// |------|-----------|--------|
/// | `primary_key` | `#[primary_key]` | Key of `get`, `delete`, `update` |
/// | `auto_increment` | `#[primary_key(auto_increment)]` | Key assigned by the database |
/// | `lookup_key` | `#[lookup_key]` | Indexed column with a `get_by_<field>` query |
/// | `non_savable` | `#[non_savable]` | Not stored, `Default::default()` on read |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldRoles {
    /// Field is the primary key.
    pub primary_key:    bool,
    /// Primary key values come from the database.
    pub auto_increment: bool,
    /// Field gets an equality lookup and an index.
    pub lookup_key:     bool,
    /// Field is excluded from storage.
    pub non_savable:    bool
}

impl FieldRoles {
    /// Roles of a plain primary key.
    #[must_use]
    pub fn primary_key() -> Self {
        Self {
            primary_key: true,
            ..Self::default()
        }
    }

    /// Roles of a database-assigned primary key.
    #[must_use]
    pub fn auto_increment() -> Self {
        Self {
            primary_key:    true,
            auto_increment: true,
            ..Self::default()
        }
    }

    /// Roles of a lookup key.
    #[must_use]
    pub fn lookup_key() -> Self {
        Self {
            lookup_key: true,
            ..Self::default()
        }
    }

    /// Roles of a transient field.
    #[must_use]
    pub fn non_savable() -> Self {
        Self {
            non_savable: true,
            ..Self::default()
        }
    }

    /// Key whose value the database assigns on insert.
    #[must_use]
    pub fn is_auto_increment(&self) -> bool {
        self.primary_key && self.auto_increment
    }

    /// Non-savable combined with any key role.
    #[must_use]
    pub fn is_conflicting(&self) -> bool {
        self.non_savable && (self.primary_key || self.lookup_key)
    }
}
