use crate::models::School;
use crate::services::postgres::PostgresCatalog;
use crate::services::retry::{retry_with_backoff, RetryPolicy, Retryable};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Dataset compiled into the binary
const BUNDLED_SCHOOLS: &str = include_str!("../../data/business_schools.json");

/// Errors that can occur while loading the school catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    /// A failure from a load shared by several waiting requests
    #[error(transparent)]
    Shared(Arc<CatalogError>),
}

/// Coarse failure category used for status codes and user-facing messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Api,
    Data,
    Unknown,
}

impl CatalogError {
    /// Unwrap an error handed out by a coalesced load
    pub fn from_shared(error: Arc<CatalogError>) -> Self {
        Arc::try_unwrap(error).unwrap_or_else(CatalogError::Shared)
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::Shared(inner) => inner.kind(),
            CatalogError::RequestError(e) if e.is_decode() => FailureKind::Data,
            CatalogError::RequestError(e) if e.is_status() => FailureKind::Api,
            CatalogError::RequestError(e) if e.is_builder() => FailureKind::Unknown,
            CatalogError::RequestError(_) => FailureKind::Network,
            CatalogError::ApiError { .. } => FailureKind::Api,
            CatalogError::InvalidData(_) | CatalogError::JsonError(_) => FailureKind::Data,
            CatalogError::SqlxError(e) => match e {
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                    FailureKind::Network
                }
                sqlx::Error::Database(_) => FailureKind::Api,
                sqlx::Error::RowNotFound
                | sqlx::Error::ColumnDecode { .. }
                | sqlx::Error::ColumnNotFound(_)
                | sqlx::Error::Decode(_) => FailureKind::Data,
                _ => FailureKind::Unknown,
            },
            CatalogError::IoError(_) | CatalogError::MigrateError(_) => FailureKind::Unknown,
        }
    }
}

impl Retryable for CatalogError {
    fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Shared(inner) => inner.is_retryable(),
            CatalogError::ApiError { status, .. } => *status >= 500 || *status == 429,
            CatalogError::RequestError(e) => match e.status() {
                Some(status) => status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS,
                None => self.kind() == FailureKind::Network,
            },
            _ => self.kind() == FailureKind::Network,
        }
    }
}

/// Parse a catalog payload: a bare array of schools or an envelope with a
/// `documents` array. Documents may wrap the record in a `data` field.
/// Records that fail to deserialize are skipped.
pub fn parse_catalog(payload: Value) -> Result<Vec<School>, CatalogError> {
    let documents = match payload {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("documents") {
            Some(Value::Array(items)) => items,
            _ => return Err(CatalogError::InvalidData("Missing documents array".into())),
        },
        other => {
            return Err(CatalogError::InvalidData(format!(
                "Expected array or object, got {}",
                json_type_name(&other)
            )))
        }
    };

    let total = documents.len();
    let schools: Vec<School> = documents
        .into_iter()
        .filter_map(|doc| {
            let data = match doc {
                Value::Object(mut map) => match map.remove("data") {
                    Some(inner @ Value::Object(_)) => inner,
                    Some(other) => {
                        map.insert("data".to_string(), other);
                        Value::Object(map)
                    }
                    None => Value::Object(map),
                },
                other => other,
            };

            serde_json::from_value::<School>(data)
                .map_err(|e| tracing::warn!("Skipping malformed school record: {}", e))
                .ok()
        })
        .collect();

    if schools.len() < total {
        tracing::debug!("Parsed {} of {} catalog records", schools.len(), total);
    }

    Ok(schools)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// School catalog served over HTTP
pub struct RemoteCatalog {
    url: String,
    api_key: Option<String>,
    client: Client,
    retry: RetryPolicy,
}

impl RemoteCatalog {
    pub fn new(
        url: String,
        api_key: Option<String>,
        timeout_secs: u64,
        retry: RetryPolicy,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            url,
            api_key,
            client,
            retry,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full catalog, retrying transient failures
    pub async fn list_all(&self) -> Result<Vec<School>, CatalogError> {
        retry_with_backoff(&self.retry, "catalog fetch", || self.fetch()).await
    }

    async fn fetch(&self) -> Result<Vec<School>, CatalogError> {
        tracing::debug!("Fetching school catalog from: {}", self.url);

        let mut request = self.client.get(&self.url);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let json: Value = response.json().await?;
        let schools = parse_catalog(json)?;

        tracing::debug!("Fetched {} schools from {}", schools.len(), self.url);

        Ok(schools)
    }
}

/// Read-only school repository
pub enum SchoolCatalog {
    /// In-memory records (bundled dataset or a file loaded at startup)
    Static {
        source: &'static str,
        schools: Arc<Vec<School>>,
    },
    Remote(RemoteCatalog),
    Postgres(PostgresCatalog),
}

impl SchoolCatalog {
    pub fn bundled() -> Result<Self, CatalogError> {
        let schools = parse_catalog(serde_json::from_str(BUNDLED_SCHOOLS)?)?;
        Ok(Self::from_records("bundled", schools))
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let schools = parse_catalog(serde_json::from_str(&contents)?)?;

        tracing::info!("Loaded {} schools from {}", schools.len(), path.as_ref().display());

        Ok(Self::from_records("file", schools))
    }

    pub fn from_records(source: &'static str, schools: Vec<School>) -> Self {
        SchoolCatalog::Static {
            source,
            schools: Arc::new(schools),
        }
    }

    pub fn source_name(&self) -> &'static str {
        match self {
            SchoolCatalog::Static { source, .. } => *source,
            SchoolCatalog::Remote(_) => "remote",
            SchoolCatalog::Postgres(_) => "postgres",
        }
    }

    pub async fn list_all(&self) -> Result<Vec<School>, CatalogError> {
        match self {
            SchoolCatalog::Static { schools, .. } => Ok(schools.as_ref().clone()),
            SchoolCatalog::Remote(remote) => remote.list_all().await,
            SchoolCatalog::Postgres(pg) => pg.list_all().await,
        }
    }
}
