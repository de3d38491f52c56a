// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Single-hole expression templates.
//!
//! A template is Rust expression text with exactly one `{}` hole:
//! `encode_list({})`, `Millis::from_raw({})`, `{}.as_millis()`.

use syn::Expr;
use thiserror::Error;

/// Placeholder replaced by the source expression.
pub const HOLE: &str = "{}";

/// Identifier used to check that a template forms an expression.
const SAMPLE_SOURCE: &str = "__value";

/// Reason a template was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("expected exactly one `{{}}` hole, found {0}")]
    HoleCount(usize),

    #[error("not a Rust expression: {0}")]
    NotAnExpression(String)
}

/// Validated expression template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    text: String
}

impl Template {
    /// Template returning its input unchanged.
    pub fn identity() -> Self {
        Self {
            text: HOLE.to_owned()
        }
    }

    /// Validate user template text.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::HoleCount`] unless the text has exactly one `{}`
    /// - [`TemplateError::NotAnExpression`] when filling the hole does not
    ///   give a Rust expression
    pub fn new(text: impl Into<String>) -> Result<Self, TemplateError> {
        let template = Self {
            text: text.into()
        };
        let holes = template.text.matches(HOLE).count();
        if holes != 1 {
            return Err(TemplateError::HoleCount(holes));
        }
        syn::parse_str::<Expr>(&template.fill(SAMPLE_SOURCE))
            .map_err(|err| TemplateError::NotAnExpression(err.to_string()))?;
        Ok(template)
    }

    /// Built-in template, known to be valid.
    pub(crate) fn builtin(text: &str) -> Self {
        Self {
            text: text.to_owned()
        }
    }

    /// Template applying `inner` first, then `self`.
    ///
    /// The result keeps a single hole: `encode_list({})` around
    /// `{}.names()` is `encode_list({}.names())`.
    pub fn around(&self, inner: &Self) -> Self {
        if inner.is_identity() {
            return self.clone();
        }
        if self.is_identity() {
            return inner.clone();
        }
        Self {
            text: self.fill(&inner.text)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether filling returns the source unchanged.
    pub fn is_identity(&self) -> bool {
        self.text == HOLE
    }

    /// Replace the hole with `source`.
    ///
    /// A compound source followed by a postfix operator (`.`, `?`, `[`) is
    /// parenthesized, so `{}.as_millis()` filled with `&entity.timeout`
    /// gives `(&entity.timeout).as_millis()`.
    pub fn fill(&self, source: &str) -> String {
        let Some(at) = self.text.find(HOLE) else {
            return self.text.clone();
        };
        let before = &self.text[..at];
        let after = &self.text[at + HOLE.len()..];
        let postfix = after.trim_start().starts_with(['.', '?', '[']);
        if postfix && !is_plain(source) {
            format!("{before}({source}){after}")
        } else {
            format!("{before}{source}{after}")
        }
    }
}

fn is_plain(source: &str) -> bool {
    !source.is_empty() && source.chars().all(|c| c.is_alphanumeric() || c == '_')
}
