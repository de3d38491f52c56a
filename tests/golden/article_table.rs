// @generated by table-dao. Do not edit by hand.

use super::*;
use sqlx::Row;
use sqlx::postgres::{PgPool, PgRow};
use table_dao::codec::decode_date_time;
use table_dao::codec::decode_float;
use table_dao::codec::decode_list;
use table_dao::codec::decode_serialized;
use table_dao::codec::decode_zoned_date_time;
use table_dao::codec::encode_date_time;
use table_dao::codec::encode_float;
use table_dao::codec::encode_list;
use table_dao::codec::encode_serialized;
use table_dao::codec::encode_zoned_date_time;
///Table-backed data access object for [`Article`], stored in `article`.
#[derive(Debug, Clone)]
pub struct ArticleTable {
    pool: PgPool,
}
impl ArticleTable {
    ///Table name.
    pub const TABLE_NAME: &'static str = "article";
    ///Column `uuid`: UUID.
    pub const COLUMN_UUID: &'static str = "\"uuid\" UUID NOT NULL";
    ///Column `title`: TEXT, indexed.
    pub const COLUMN_TITLE: &'static str = "\"title\" TEXT NOT NULL";
    ///Column `tags`: TEXT.
    pub const COLUMN_TAGS: &'static str = "\"tags\" TEXT NOT NULL";
    ///Column `published`: TEXT, nullable.
    pub const COLUMN_PUBLISHED: &'static str = "\"published\" TEXT";
    ///Column `updated`: TEXT.
    pub const COLUMN_UPDATED: &'static str = "\"updated\" TEXT NOT NULL";
    ///Column `score`: TEXT.
    pub const COLUMN_SCORE: &'static str = "\"score\" TEXT NOT NULL";
    ///Column `ratings`: TEXT.
    pub const COLUMN_RATINGS: &'static str = "\"ratings\" TEXT NOT NULL";
    ///Column `stamp`: TEXT.
    pub const COLUMN_STAMP: &'static str = "\"stamp\" TEXT NOT NULL";
    ///Column `slug`: TEXT, indexed, nullable.
    pub const COLUMN_SLUG: &'static str = "\"slug\" TEXT";
    ///Primary key column.
    pub const PRIMARY_KEY: &'static str = "uuid";
    /// Bind to `pool` and make sure the table exists.
    pub async fn new(pool: PgPool) -> Result<Self, sqlx::Error> {
        let table = Self { pool };
        table.create_schema().await?;
        Ok(table)
    }
    /// Create the table, then add missing columns and indexes.
    ///
    /// Every statement is idempotent, so this runs on each start.
    pub async fn create_schema(&self) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
                "CREATE TABLE IF NOT EXISTS \"article\" (\"uuid\" UUID NOT NULL, \"title\" TEXT NOT NULL, \"tags\" TEXT NOT NULL, \"published\" TEXT, \"updated\" TEXT NOT NULL, \"score\" TEXT NOT NULL, \"ratings\" TEXT NOT NULL, \"stamp\" TEXT NOT NULL, \"slug\" TEXT, PRIMARY KEY (\"uuid\"))",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"uuid\" UUID NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"title\" TEXT NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"tags\" TEXT NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query("ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"published\" TEXT")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"updated\" TEXT NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"score\" TEXT NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"ratings\" TEXT NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"stamp\" TEXT NOT NULL",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query("ALTER TABLE \"article\" ADD COLUMN IF NOT EXISTS \"slug\" TEXT")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "CREATE INDEX IF NOT EXISTS \"idx_article_title\" ON \"article\" (\"title\")",
            )
            .execute(&mut *tx)
            .await?;
        sqlx::query(
                "CREATE INDEX IF NOT EXISTS \"idx_article_slug\" ON \"article\" (\"slug\")",
            )
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
    /// Insert `entity` if its key is unknown, update it otherwise.
    pub async fn save(&self, entity: &Article) -> Result<Option<Uuid>, sqlx::Error> {
        if self.get(&entity.uuid).await?.is_none() {
            self.create(entity).await
        } else {
            self.update(entity).await.map(Some)
        }
    }
    async fn create(&self, entity: &Article) -> Result<Option<Uuid>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
                "INSERT INTO \"article\" (\"uuid\", \"title\", \"tags\", \"published\", \"updated\", \"score\", \"ratings\", \"stamp\", \"slug\") VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING \"uuid\", \"title\", \"tags\", \"published\", \"updated\", \"score\", \"ratings\", \"stamp\", \"slug\"",
            )
            .bind(&entity.uuid)
            .bind(&entity.title)
            .bind(encode_list(&entity.tags))
            .bind(
                match &entity.published {
                    Some(value) => Some(encode_date_time(value)),
                    None => None,
                },
            )
            .bind(encode_zoned_date_time(&entity.updated))
            .bind(encode_float(*&entity.score))
            .bind(
                encode_serialized(&entity.ratings)
                    .map_err(|err| sqlx::Error::Encode(Box::new(err)))?,
            )
            .bind(encode_date_time(&((&entity.stamp).0)))
            .bind(&entity.slug)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        let created = row.as_ref().map(Self::transform).transpose()?;
        Ok(created.map(|created| created.uuid))
    }
    async fn update(&self, entity: &Article) -> Result<Uuid, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(
                "UPDATE \"article\" SET \"uuid\" = $1, \"title\" = $2, \"tags\" = $3, \"published\" = $4, \"updated\" = $5, \"score\" = $6, \"ratings\" = $7, \"stamp\" = $8, \"slug\" = $9 WHERE \"uuid\" = $10",
            )
            .bind(&entity.uuid)
            .bind(&entity.title)
            .bind(encode_list(&entity.tags))
            .bind(
                match &entity.published {
                    Some(value) => Some(encode_date_time(value)),
                    None => None,
                },
            )
            .bind(encode_zoned_date_time(&entity.updated))
            .bind(encode_float(*&entity.score))
            .bind(
                encode_serialized(&entity.ratings)
                    .map_err(|err| sqlx::Error::Encode(Box::new(err)))?,
            )
            .bind(encode_date_time(&((&entity.stamp).0)))
            .bind(&entity.slug)
            .bind(&entity.uuid)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(entity.uuid.clone())
    }
    /// Delete the row stored under `key`.
    pub async fn delete(&self, key: &Uuid) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM \"article\" WHERE \"uuid\" = $1")
            .bind(key)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
    /// Fetch the entity stored under `key`.
    pub async fn get(&self, key: &Uuid) -> Result<Option<Article>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
                "SELECT \"uuid\", \"title\", \"tags\", \"published\", \"updated\", \"score\", \"ratings\", \"stamp\", \"slug\" FROM \"article\" WHERE \"uuid\" = $1",
            )
            .bind(key)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;
        row.as_ref().map(Self::transform).transpose()
    }
    /// Fetch every stored entity, in storage order.
    pub async fn get_all(&self) -> Result<Vec<Article>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
                "SELECT \"uuid\", \"title\", \"tags\", \"published\", \"updated\", \"score\", \"ratings\", \"stamp\", \"slug\" FROM \"article\"",
            )
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        rows.iter().map(Self::transform).collect()
    }
    ///Fetch every entity whose `title` equals `key`.
    pub async fn get_by_title(&self, key: &String) -> Result<Vec<Article>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
                "SELECT \"uuid\", \"title\", \"tags\", \"published\", \"updated\", \"score\", \"ratings\", \"stamp\", \"slug\" FROM \"article\" WHERE \"title\" = $1",
            )
            .bind(key)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        rows.iter().map(Self::transform).collect()
    }
    ///Fetch every entity whose `slug` equals `key`.
    pub async fn get_by_slug(
        &self,
        key: &Option<String>,
    ) -> Result<Vec<Article>, sqlx::Error> {
        let Some(key) = key else {
            return Ok(Vec::new());
        };
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
                "SELECT \"uuid\", \"title\", \"tags\", \"published\", \"updated\", \"score\", \"ratings\", \"stamp\", \"slug\" FROM \"article\" WHERE \"slug\" = $1",
            )
            .bind(key)
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;
        rows.iter().map(Self::transform).collect()
    }
    fn transform(row: &PgRow) -> Result<Article, sqlx::Error> {
        Ok(Article {
            uuid: row.try_get::<Uuid, _>("uuid")?,
            title: row.try_get::<String, _>("title")?,
            tags: decode_list(&row.try_get::<String, _>("tags")?),
            published: match row.try_get::<Option<String>, _>("published")? {
                Some(value) => Some(
                    decode_date_time(&value)
                        .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
                ),
                None => None,
            },
            updated: decode_zoned_date_time(&row.try_get::<String, _>("updated")?)
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            score: decode_float(&row.try_get::<String, _>("score")?)
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            ratings: decode_serialized(&row.try_get::<String, _>("ratings")?)
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            stamp: Stamp(
                decode_date_time(&row.try_get::<String, _>("stamp")?)
                    .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            ),
            slug: row.try_get::<Option<String>, _>("slug")?,
            cache: ::core::default::Default::default(),
        })
    }
}
