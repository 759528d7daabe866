use crate::error::Result;
use crate::models::{District, Marker, NewMarker};
use async_trait::async_trait;

/// Storage for user-visible markers and district boundaries.
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// All markers, ordered by id
    async fn list_markers(&self) -> Result<Vec<Marker>>;

    async fn insert_marker(&self, marker: &NewMarker) -> Result<i32>;

    /// `false` when no marker had this id
    async fn delete_marker(&self, id: i32) -> Result<bool>;

    /// Replace every marker with the contents of the backup table.
    async fn reset_markers(&self) -> Result<()>;

    async fn list_districts(&self) -> Result<Vec<District>>;

    async fn count_markers(&self) -> Result<i64>;

    /// Round trip to the store, used by the health check
    async fn ping(&self) -> Result<()>;
}

pub struct PgFeatureRepository {
    pool: sqlx::PgPool,
}

impl PgFeatureRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

#[async_trait]
impl FeatureRepository for PgFeatureRepository {
    async fn list_markers(&self) -> Result<Vec<Marker>> {
        Ok(super::feature_queries::list_markers(&self.pool).await?)
    }

    async fn insert_marker(&self, marker: &NewMarker) -> Result<i32> {
        Ok(super::feature_queries::insert_marker(&self.pool, marker).await?)
    }

    async fn delete_marker(&self, id: i32) -> Result<bool> {
        Ok(super::feature_queries::delete_marker(&self.pool, id).await?)
    }

    async fn reset_markers(&self) -> Result<()> {
        let restored = super::feature_queries::reset_markers(&self.pool).await?;
        tracing::info!(restored, "Markers reset from backup: {} rows", restored);
        Ok(())
    }

    async fn list_districts(&self) -> Result<Vec<District>> {
        Ok(super::feature_queries::list_districts(&self.pool).await?)
    }

    async fn count_markers(&self) -> Result<i64> {
        Ok(super::feature_queries::count_markers(&self.pool).await?)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
