// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! SQL fragment builders for PostgreSQL.

/// Quote an identifier: `title` becomes `"title"`.
///
/// Embedded double quotes are doubled so the result is always a single
/// identifier.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Join quoted column names with a comma separator.
pub fn join_columns<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .map(|column| quote_ident(column.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build PostgreSQL placeholders: `$1, $2, $3, ...`
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build SET clause: `"col1" = $1, "col2" = $2, ...`
pub fn set_clause<S: AsRef<str>>(columns: &[S]) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", quote_ident(column.as_ref()), i + 1))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build an equality predicate for a single column bound at `$index`.
pub fn equals(column: &str, index: usize) -> String {
    format!("{} = ${index}", quote_ident(column))
}
