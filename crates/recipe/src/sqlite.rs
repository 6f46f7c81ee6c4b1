use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{CatalogStore, Recipe};

/// Storage key the catalog is kept under.
pub const CATALOG_KEY: &str = "recetas";

/// Catalog mirrored as one JSON document in the `storage` key-value table.
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn load(&self) -> anyhow::Result<Vec<Recipe>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM storage WHERE key = ?1")
            .bind(CATALOG_KEY)
            .fetch_optional(&self.pool)
            .await?;

        let Some((value,)) = row else {
            return Ok(Vec::new());
        };

        Ok(serde_json::from_str(&value)?)
    }

    async fn save(&self, recipes: &[Recipe]) -> anyhow::Result<()> {
        let value = serde_json::to_string(recipes)?;

        sqlx::query(
            r#"
            INSERT INTO storage (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = strftime('%s', 'now')
            "#,
        )
        .bind(CATALOG_KEY)
        .bind(&value)
        .execute(&self.pool)
        .await?;

        tracing::debug!(recipes = recipes.len(), "Catalog saved");

        Ok(())
    }
}
