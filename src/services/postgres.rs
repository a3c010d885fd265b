use crate::models::{RawNumber, School};
use crate::services::catalog::CatalogError;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;

const SCHOOL_COLUMNS: &str = r#"
    id, name, location, region, country, duration, ranking,
    tuition_fee, currency, average_gmat, min_work_experience, specializations
"#;

/// PostgreSQL-backed school catalog
///
/// Read-only: the admin back-office owns writes to the `schools` table.
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Create a new catalog from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
    ) -> Result<Self, CatalogError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// All schools ordered by id
    pub async fn list_all(&self) -> Result<Vec<School>, CatalogError> {
        let query = format!("SELECT {} FROM schools ORDER BY id", SCHOOL_COLUMNS);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;
        let schools = rows.iter().map(row_to_school).collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Loaded {} schools from PostgreSQL", schools.len());

        Ok(schools)
    }

    /// One page of schools ordered by id
    pub async fn list_page(&self, offset: usize, limit: usize) -> Result<Vec<School>, CatalogError> {
        let query = format!(
            "SELECT {} FROM schools ORDER BY id LIMIT $1 OFFSET $2",
            SCHOOL_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(row_to_school)
            .collect::<Result<Vec<_>, _>>()
            .map_err(Into::into)
    }

    pub async fn count(&self) -> Result<usize, CatalogError> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM schools")
            .fetch_one(&self.pool)
            .await?;
        let total: i64 = row.try_get("total")?;

        Ok(usize::try_from(total).unwrap_or_default())
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, CatalogError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn row_to_school(row: &PgRow) -> Result<School, sqlx::Error> {
    let id: i32 = row.try_get("id")?;
    let ranking: Option<i32> = row.try_get("ranking")?;

    Ok(School {
        id: u32::try_from(id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        name: row.try_get("name")?,
        location: row.try_get::<Option<String>, _>("location")?.unwrap_or_default(),
        region: row.try_get::<Option<String>, _>("region")?.unwrap_or_default(),
        country: row.try_get::<Option<String>, _>("country")?.unwrap_or_default(),
        duration: row.try_get("duration")?,
        // Negative rankings are treated as unranked
        ranking: ranking.and_then(|r| u32::try_from(r).ok()),
        tuition_fee: row.try_get::<Option<f64>, _>("tuition_fee")?.map(RawNumber::Number),
        currency: row
            .try_get::<Option<String>, _>("currency")?
            .unwrap_or_else(|| "USD".to_string()),
        average_gmat: row.try_get::<Option<f64>, _>("average_gmat")?.map(RawNumber::Number),
        min_work_experience: row
            .try_get::<Option<f64>, _>("min_work_experience")?
            .map(RawNumber::Number),
        specializations: row
            .try_get::<Option<Vec<String>>, _>("specializations")?
            .unwrap_or_default(),
    })
}
