// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generated unit IR and rendering.
//!
//! The synthesizer never concatenates source text. It fills the structures
//! below, which are turned into tokens in one final pass by
//! [`GeneratedUnit::to_token_stream`] and into formatted source by
//! [`GeneratedUnit::render`].
//!
//! ```text
//! GeneratedUnit
//! ├── imports: Vec<Import>
//! └── table: TableObject
//!     ├── name, entity, table_name
//!     ├── columns: Vec<ColumnProperty>
//!     ├── primary_key: PrimaryKeyDecl
//!     ├── schema_block: SchemaBlock
//!     └── operations: Vec<Operation>
//! ```

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Ident, Type, UseTree};

use crate::{
    entity::column::{Modifier, StorageType},
    error::GenerateError
};

/// First line of every rendered unit.
pub const GENERATED_MARKER: &str = "// @generated by table-dao. Do not edit by hand.";

/// One `use` declaration.
#[derive(Debug, Clone)]
pub struct Import {
    path: String,
    tree: UseTree
}

impl Import {
    /// Parse a `use` path such as `sqlx::postgres::{PgPool, PgRow}`.
    ///
    /// Returns `None` when the text is not a valid use tree.
    pub fn parse(path: &str) -> Option<Self> {
        let tree = syn::parse_str::<UseTree>(path).ok()?;
        Some(Self {
            path: path.to_owned(),
            tree
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PartialEq for Import {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Import {}

impl ToTokens for Import {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let tree = &self.tree;
        tokens.extend(quote! { use #tree; });
    }
}

/// Column constant holding the column's DDL fragment.
#[derive(Debug, Clone)]
pub struct ColumnProperty {
    /// Field the column stores.
    pub field:      Ident,
    /// `COLUMN_<FIELD>`.
    pub const_name: Ident,
    pub storage:    StorageType,
    /// In `AutoIncrement`, `Indexed`, `Nullable` order.
    pub modifiers:  Vec<Modifier>,
    /// `"title" TEXT NOT NULL`.
    pub definition: String,
    /// `false` when the entity hides its columns.
    pub public:     bool
}

impl ColumnProperty {
    /// Constant name for a field: `tag_line` gives `COLUMN_TAG_LINE`.
    pub fn const_name_for(field: &Ident) -> Ident {
        format_ident!("COLUMN_{}", field.to_string().to_case(Case::UpperSnake))
    }
}

impl ToTokens for ColumnProperty {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.const_name;
        let definition = &self.definition;
        let mut doc = format!("Column `{}`: {}", self.field, self.storage);
        for modifier in &self.modifiers {
            doc.push_str(", ");
            doc.push_str(modifier.name());
        }
        doc.push('.');

        let item = if self.public {
            quote! {
                #[doc = #doc]
                pub const #name: &'static str = #definition;
            }
        } else {
            quote! {
                #[doc = #doc]
                #[allow(dead_code)]
                const #name: &'static str = #definition;
            }
        };
        tokens.extend(item);
    }
}

/// Primary key declaration.
#[derive(Debug, Clone)]
pub struct PrimaryKeyDecl {
    pub field:  Ident,
    /// Key type used in `save`, `get`, `delete`.
    pub ty:     Type,
    pub column: String
}

impl ToTokens for PrimaryKeyDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let column = &self.column;
        tokens.extend(quote! {
            #[doc = "Primary key column."]
            pub const PRIMARY_KEY: &'static str = #column;
        });
    }
}

/// Statements run by `create_schema`, in order.
#[derive(Debug, Clone, Default)]
pub struct SchemaBlock {
    pub statements: Vec<String>
}

impl ToTokens for SchemaBlock {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let statements = &self.statements;
        tokens.extend(quote! {
            /// Create the table, then add missing columns and indexes.
            ///
            /// Every statement is idempotent, so this runs on each start.
            pub async fn create_schema(&self) -> Result<(), sqlx::Error> {
                let mut tx = self.pool.begin().await?;
                #(
                    sqlx::query(#statements).execute(&mut *tx).await?;
                )*
                tx.commit().await?;
                Ok(())
            }
        });
    }
}

/// What an operation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationKind {
    Save,
    Create,
    Update,
    Delete,
    Get,
    GetAll,
    /// Equality lookup on one field.
    GetBy {
        field: Ident
    },
    Transform
}

impl OperationKind {
    /// Generated method name.
    pub fn method_name(&self) -> Ident {
        match self {
            Self::Save => format_ident!("save"),
            Self::Create => format_ident!("create"),
            Self::Update => format_ident!("update"),
            Self::Delete => format_ident!("delete"),
            Self::Get => format_ident!("get"),
            Self::GetAll => format_ident!("get_all"),
            Self::GetBy { field } => format_ident!("get_by_{}", field),
            Self::Transform => format_ident!("transform")
        }
    }

    /// Whether the method is part of the public surface.
    pub fn is_public(&self) -> bool {
        !matches!(self, Self::Create | Self::Update | Self::Transform)
    }
}

/// One generated method.
#[derive(Debug, Clone)]
pub struct Operation {
    pub kind:   OperationKind,
    pub name:   Ident,
    pub public: bool,
    /// Fields bound (insert, update, lookups) or decoded (transform), in order.
    pub fields: Vec<Ident>,
    /// SQL statement, if the operation runs one.
    pub sql:    Option<String>,
    /// Complete method item.
    pub tokens: TokenStream
}

impl Operation {
    /// Capitalized lookup suffix: `ByTitle` for `get_by_title`.
    pub fn suffix(&self) -> Option<String> {
        match &self.kind {
            OperationKind::GetBy { field } => {
                Some(format!("By{}", field.to_string().to_case(Case::Pascal)))
            }
            _ => None
        }
    }
}

impl ToTokens for Operation {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.tokens.to_tokens(tokens);
    }
}

/// Generated table object.
#[derive(Debug, Clone)]
pub struct TableObject {
    pub name:         Ident,
    pub entity:       Ident,
    pub table_name:   String,
    pub columns:      Vec<ColumnProperty>,
    pub primary_key:  PrimaryKeyDecl,
    pub schema_block: SchemaBlock,
    pub operations:   Vec<Operation>
}

impl TableObject {
    /// Operation by method name.
    pub fn operation(&self, name: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.name == name)
    }

    /// Column property by field name.
    pub fn column(&self, field: &str) -> Option<&ColumnProperty> {
        self.columns.iter().find(|column| column.field == field)
    }
}

impl ToTokens for TableObject {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let name = &self.name;
        let table_name = &self.table_name;
        let columns = &self.columns;
        let primary_key = &self.primary_key;
        let schema_block = &self.schema_block;
        let operations = &self.operations;
        let struct_doc = format!(
            "Table-backed data access object for [`{}`], stored in `{}`.",
            self.entity, self.table_name
        );

        tokens.extend(quote! {
            #[doc = #struct_doc]
            #[derive(Debug, Clone)]
            pub struct #name {
                pool: PgPool
            }

            impl #name {
                #[doc = "Table name."]
                pub const TABLE_NAME: &'static str = #table_name;

                #(#columns)*

                #primary_key

                /// Bind to `pool` and make sure the table exists.
                pub async fn new(pool: PgPool) -> Result<Self, sqlx::Error> {
                    let table = Self { pool };
                    table.create_schema().await?;
                    Ok(table)
                }

                #schema_block

                #(#operations)*
            }
        });
    }
}

/// Output of one generation run: imports plus one table object.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub imports: Vec<Import>,
    pub table:   TableObject
}

impl GeneratedUnit {
    /// File name a host would write the unit to: `article_table.rs`.
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.table.name.to_string().to_case(Case::Snake))
    }

    /// Render as formatted Rust source, starting with [`GENERATED_MARKER`].
    ///
    /// # Errors
    ///
    /// [`GenerateError::Render`] when the tokens do not form a Rust file.
    pub fn render(&self) -> Result<String, GenerateError> {
        let file = syn::parse2::<syn::File>(self.to_token_stream())
            .map_err(|err| GenerateError::Render(err.to_string()))?;
        Ok(format!(
            "{GENERATED_MARKER}\n\n{}",
            prettyplease::unparse(&file)
        ))
    }
}

impl ToTokens for GeneratedUnit {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let imports = &self.imports;
        let table = &self.table;
        tokens.extend(quote! {
            #(#imports)*

            #table
        });
    }
}
