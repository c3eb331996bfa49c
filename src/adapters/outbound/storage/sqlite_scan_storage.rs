use crate::notice_generation::domain::{PackageIdentifier, Provenance, ScanResult};
use crate::notice_generation::policies::ScannerCriteria;
use crate::ports::outbound::ScanResultsStorage;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use std::str::FromStr;

/// SqliteScanStorage adapter keeping scan results in a relational table
///
/// The primary key over (identifier, provenance hash, scanner name, scanner
/// version) makes `replace into` an idempotent overwrite.
pub struct SqliteScanStorage {
    pool: SqlitePool,
    name: String,
}

impl SqliteScanStorage {
    /// Opens (and creates if missing) the database file at `path`
    pub async fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
        }

        let options = SqliteConnectOptions::default()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to open scan results database '{}'", path.display()))?;

        let storage = Self {
            pool,
            name: format!("SqliteStorage({})", path.display()),
        };
        storage.initialize().await?;
        Ok(storage)
    }

    /// A private database that lives as long as the storage
    pub async fn in_memory() -> Result<Self> {
        // Every connection to ":memory:" opens its own database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(SqliteConnectOptions::from_str(":memory:")?)
            .await?;

        let storage = Self {
            pool,
            name: "SqliteStorage(:memory:)".to_string(),
        };
        storage.initialize().await?;
        Ok(storage)
    }

    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"create table if not exists scan_results (
                    identifier text not null,
                    provenance_hash text not null,
                    scanner_name text not null,
                    scanner_version text not null,
                    result text not null,
                    primary key (identifier, provenance_hash, scanner_name, scanner_version)
                )"#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ScanResultsStorage for SqliteScanStorage {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read(
        &self,
        id: &PackageIdentifier,
        provenance: &Provenance,
        criteria: &ScannerCriteria,
    ) -> Result<Vec<ScanResult>> {
        let rows = sqlx::query(
            r#"
            select
                result
            from
                scan_results
            where
                identifier = $1 and provenance_hash = $2
            order by
                scanner_name, scanner_version
            "#,
        )
        .bind(id.to_coordinates())
        .bind(provenance.storage_hash())
        .fetch_all(&self.pool)
        .await?;

        let mut results = Vec::new();
        for row in rows {
            let json = row.get::<String, _>("result");
            let result: ScanResult = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse stored scan result of {}", id))?;
            if result.provenance() == provenance && criteria.matches(result.scanner()) {
                results.push(result);
            }
        }
        Ok(results)
    }

    async fn add(&self, result: &ScanResult) -> Result<()> {
        let json = serde_json::to_string(result)?;
        sqlx::query(
            r#"replace into scan_results (identifier, provenance_hash, scanner_name, scanner_version, result) VALUES ($1, $2, $3, $4, $5)"#,
        )
        .bind(result.package_id().to_coordinates())
        .bind(result.provenance().storage_hash())
        .bind(result.scanner().name.clone())
        .bind(result.scanner().version.clone())
        .bind(json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
