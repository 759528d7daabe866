use crate::models::{District, Marker, NewMarker};
use sqlx::PgPool;

pub async fn list_markers(pool: &PgPool) -> Result<Vec<Marker>, sqlx::Error> {
    sqlx::query_as::<_, Marker>(
        "SELECT id, name, type,
                ST_Y(geom::geometry) AS lat, ST_X(geom::geometry) AS lng
         FROM features
         ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn insert_marker(pool: &PgPool, marker: &NewMarker) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "INSERT INTO features (name, type, geom)
         VALUES ($1, $2, ST_GeogFromText($3))
         RETURNING id",
    )
    .bind(&marker.name)
    .bind(&marker.marker_type)
    .bind(marker.point_wkt())
    .fetch_one(pool)
    .await
}

pub async fn delete_marker(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM features WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Restore `features` from `features_backup`, ids included.
pub async fn reset_markers(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("TRUNCATE features RESTART IDENTITY")
        .execute(&mut *tx)
        .await?;

    let restored = sqlx::query(
        "INSERT INTO features (id, name, type, geom)
         SELECT id, name, type, geom
         FROM features_backup",
    )
    .execute(&mut *tx)
    .await?
    .rows_affected();

    tx.commit().await?;
    Ok(restored)
}

pub async fn count_markers(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM features")
        .fetch_one(pool)
        .await
}

#[derive(sqlx::FromRow)]
struct DistrictRow {
    name: String,
    geojson: String,
}

impl DistrictRow {
    fn into_district(self) -> District {
        let geometry = serde_json::from_str(&self.geojson).unwrap_or_else(|e| {
            tracing::warn!(
                district = %self.name,
                error = %e,
                "Invalid GeoJSON geometry for district '{}', returning null",
                self.name
            );
            serde_json::Value::Null
        });
        District {
            name: self.name,
            geometry,
        }
    }
}

pub async fn list_districts(pool: &PgPool) -> Result<Vec<District>, sqlx::Error> {
    let rows = sqlx::query_as::<_, DistrictRow>(
        "SELECT name, ST_AsGeoJSON(geom) AS geojson
         FROM berlin_districts",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(DistrictRow::into_district).collect())
}
