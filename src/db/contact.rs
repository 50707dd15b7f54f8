//! Postgres implementation of the submission store.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE contact_submissions (
//!     id           UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     name         TEXT NOT NULL,
//!     email        TEXT NOT NULL,
//!     phone        TEXT,
//!     project_type TEXT NOT NULL,
//!     budget       TEXT NOT NULL,
//!     message      TEXT NOT NULL,
//!     quote_id     TEXT NOT NULL UNIQUE,
//!     pdf_url      TEXT,
//!     created_at   TIMESTAMPTZ NOT NULL
//! );
//! ```

use async_trait::async_trait;
use sqlx::PgPool;

use super::{NewSubmission, StoreError, StoredSubmission, SubmissionStore};

pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<StoredSubmission, StoreError> {
        let row = sqlx::query_as::<_, StoredSubmission>(
            r#"
            INSERT INTO contact_submissions
                (name, email, phone, project_type, budget, message, quote_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, project_type, budget, message,
                      quote_id, pdf_url, created_at
            "#,
        )
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.phone)
        .bind(&submission.project_type)
        .bind(&submission.budget)
        .bind(&submission.message)
        .bind(&submission.quote_id)
        .bind(submission.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_document_url(&self, quote_id: &str, url: &str) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE contact_submissions SET pdf_url = $1 WHERE quote_id = $2 AND pdf_url IS NULL",
        )
        .bind(url)
        .bind(quote_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Database(format!(
                "no submission found for quote {quote_id} or document URL already set"
            )));
        }
        Ok(())
    }
}
