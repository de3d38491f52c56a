// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

mod model {
    use sqlx::types::{
        Uuid,
        chrono::{DateTime, NaiveDateTime, Utc}
    };

    pub struct Stamp(pub NaiveDateTime);

    pub struct Article {
        pub uuid:      Uuid,
        pub title:     String,
        pub tags:      Vec<String>,
        pub published: Option<NaiveDateTime>,
        pub updated:   DateTime<Utc>,
        pub score:     f32,
        pub ratings:   Vec<u32>,
        pub stamp:     Stamp,
        pub slug:      Option<String>,
        pub cache:     Option<String>
    }

    pub mod article_table {
        include!("../../golden/article_table.rs");
    }
}

use model::{Article, article_table::ArticleTable};
use sqlx::{PgPool, types::Uuid};

async fn exercise(pool: PgPool, article: &Article) -> Result<(), sqlx::Error> {
    let table = ArticleTable::new(pool).await?;
    let key: Option<Uuid> = table.save(article).await?;
    let found: Option<Article> = table.get(&article.uuid).await?;
    let all: Vec<Article> = table.get_all().await?;
    let titled = table.get_by_title(&article.title).await?;
    let slugged = table.get_by_slug(&None).await?;
    table.delete(&article.uuid).await?;
    let _ = (key, found, all, titled, slugged);
    Ok(())
}

fn main() {
    assert_eq!(ArticleTable::TABLE_NAME, "article");
    assert_eq!(ArticleTable::PRIMARY_KEY, "uuid");
    assert_eq!(ArticleTable::COLUMN_STAMP, "\"stamp\" TEXT NOT NULL");
    assert_eq!(ArticleTable::COLUMN_SLUG, "\"slug\" TEXT");
    let _ = exercise;
}
