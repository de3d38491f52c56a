// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared helpers for the generator.
//!
//! - [`sql`]: SQL fragment builders
//! - [`types`]: `syn::Type` inspection

pub mod sql;
pub mod types;
