//! Database module - AppState and the submission store contract.
//!
//! The pipeline depends on the [`SubmissionStore`] trait, not on a concrete
//! database: production wires in [`contact::PgSubmissionStore`] backed by the
//! Supabase Postgres pool, tests wire in an in-memory mock.

mod contact;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::AppConfig;
use crate::contact::service::ContactService;
use crate::email::{DisabledNotifier, SmtpNotifier};
use crate::storage::SupabaseStorage;

pub use contact::PgSubmissionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("connection error: {0}")]
    Connection(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.constraint().is_some() => {
                StoreError::Constraint(db.to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) => {
                StoreError::Connection(err.to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

/// Validated submission ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_type: String,
    pub budget: String,
    pub message: String,
    pub quote_id: String,
    pub created_at: DateTime<Utc>,
}

/// Row stored in `contact_submissions`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredSubmission {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_type: String,
    pub budget: String,
    pub message: String,
    pub quote_id: String,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Durable record persistence consumed by the submission pipeline.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn insert(&self, submission: &NewSubmission) -> Result<StoredSubmission, StoreError>;

    /// Attach the document URL to an already stored submission. Callers treat
    /// failures here as non-fatal.
    async fn update_document_url(&self, quote_id: &str, url: &str) -> Result<(), StoreError>;
}

/// Process-wide application state carried by every handler.
#[derive(Clone)]
pub struct AppState {
    pub contact: Arc<ContactService>,
    pub pricelist_password: Option<String>,
}

impl AppState {
    /// Wire up all external collaborators from configuration.
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(900))
            .connect(&config.supabase.database_url)
            .await?;

        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(900))
            .user_agent("strelka-server/0.1")
            .build()?;

        let storage = Arc::new(SupabaseStorage::new(
            config.supabase.clone(),
            http_client.clone(),
        ));
        let store = Arc::new(PgSubmissionStore::new(pool));

        let contact = match &config.smtp {
            Some(smtp) => {
                let notifier = Arc::new(SmtpNotifier::new(smtp.clone())?);
                ContactService::new(store, storage, notifier)
            }
            None => {
                log::warn!("SMTP_HOST not configured, email notifications are disabled");
                ContactService::new(store, storage, Arc::new(DisabledNotifier))
            }
        };

        Ok(Self {
            contact: Arc::new(contact),
            pricelist_password: config.pricelist_password.clone(),
        })
    }

    /// Assemble state from explicit collaborators; used by tests.
    pub fn with_collaborators(
        contact: ContactService,
        pricelist_password: Option<String>,
    ) -> Self {
        Self {
            contact: Arc::new(contact),
            pricelist_password,
        }
    }
}
