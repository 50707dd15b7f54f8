//! Submission orchestrator.
//!
//! Sequences one contact submission through validation, persistence, document
//! generation and notification. Stage progression:
//!
//! `Validating -> Persisting -> (DocumentGenerating -> DocumentUploading ->
//! DocumentLinking)? -> Notifying -> Done`
//!
//! Validation and insert failures are fatal and return a failure outcome.
//! Every document stage and the notification are best-effort: their failures
//! are logged and the submission still succeeds, because the persisted record
//! is the source of truth.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::db::{NewSubmission, SubmissionStore};
use crate::email::Notifier;
use crate::quote::branding::BrandingAssets;
use crate::quote::catalog::config_for;
use crate::quote::content::QuoteContent;
use crate::quote::pdf::render_quote_pdf;
use crate::storage::ObjectStorage;

use super::models::{ContactFormData, SubmissionOutcome, ValidatedSubmission};
use super::quote_id::QuoteId;
use super::validation::validate;

const CONFIRMATION_MESSAGE: &str =
    "Grazie! La tua richiesta è stata inviata con successo. Ti contatteremo al più presto.";
const STORE_FAILURE_MESSAGE: &str = "Si è verificato un errore durante l'invio del modulo.";

const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(15);

/// Orchestrates the contact submission pipeline over explicit collaborator
/// handles, so tests can substitute fakes without touching shared state.
pub struct ContactService {
    store: Arc<dyn SubmissionStore>,
    storage: Arc<dyn ObjectStorage>,
    notifier: Arc<dyn Notifier>,
    notify_timeout: Duration,
    render_seed: Option<u64>,
}

impl ContactService {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        storage: Arc<dyn ObjectStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            storage,
            notifier,
            notify_timeout: DEFAULT_NOTIFY_TIMEOUT,
            render_seed: None,
        }
    }

    /// Pin the decorative elements of generated documents. Test hook.
    pub fn with_render_seed(mut self, seed: u64) -> Self {
        self.render_seed = Some(seed);
        self
    }

    pub fn with_notify_timeout(mut self, timeout: Duration) -> Self {
        self.notify_timeout = timeout;
        self
    }

    /// Run one submission through the whole pipeline.
    pub async fn submit(&self, raw: ContactFormData) -> SubmissionOutcome {
        // Validating -> Rejected: no identifier, no side effects.
        let submission = match validate(&raw) {
            Ok(s) => s,
            Err(errors) => {
                log::info!("Contact submission rejected: {}", errors);
                let errors = errors.into_vec();
                let message = errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "Dati non validi.".to_string());
                return SubmissionOutcome::rejected(message, errors);
            }
        };

        // Identifier is fixed before persistence and reused everywhere after.
        let quote_id = QuoteId::generate();

        // Persisting -> Failed: fatal, nothing else runs.
        let record = NewSubmission {
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            project_type: submission.project_type.clone(),
            budget: submission.budget.clone(),
            message: submission.message.clone(),
            quote_id: quote_id.as_str().to_string(),
            created_at: Utc::now(),
        };
        if let Err(e) = self.store.insert(&record).await {
            log::error!("Failed to persist contact submission {}: {}", quote_id, e);
            return SubmissionOutcome::failed(STORE_FAILURE_MESSAGE);
        }
        log::info!("Stored contact submission {}", quote_id);

        // Document stages, each best-effort; the first failure skips the rest.
        let document_url = self.produce_document(&submission, &quote_id).await;

        // Notifying: with document first when one exists, then without.
        let mut email_sent = false;
        if let Some(url) = document_url.as_deref() {
            email_sent = self.try_notify(&submission, &quote_id, Some(url)).await;
        }
        if !email_sent {
            email_sent = self.try_notify(&submission, &quote_id, None).await;
        }
        if !email_sent {
            log::warn!(
                "Submission {} stored but email notification failed",
                quote_id
            );
        }

        SubmissionOutcome::accepted(CONFIRMATION_MESSAGE, quote_id.as_str().to_string())
    }

    /// Generate, upload and link the quote document. Returns the public URL
    /// when everything up to the upload succeeded; linking failures keep the
    /// URL (the record simply misses it, the email still carries the link).
    async fn produce_document(
        &self,
        submission: &ValidatedSubmission,
        quote_id: &QuoteId,
    ) -> Option<String> {
        let config = config_for(&submission.project_type);
        let branding = BrandingAssets::load(self.storage.as_ref()).await;
        let content = QuoteContent::build(
            submission,
            quote_id,
            config,
            Utc::now().date_naive(),
        );

        let pdf = match render_quote_pdf(&content, &config.theme, &branding, self.render_seed) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Quote document generation failed for {}: {}", quote_id, e);
                return None;
            }
        };

        let key = quote_id.document_key();
        if let Err(e) = self
            .storage
            .upload_file(&key, &pdf, "application/pdf")
            .await
        {
            log::warn!("Quote document upload failed for {}: {}", quote_id, e);
            return None;
        }

        let url = self.storage.public_url(&key);
        if let Err(e) = self
            .store
            .update_document_url(quote_id.as_str(), &url)
            .await
        {
            log::warn!(
                "Could not attach document URL to submission {}: {}",
                quote_id,
                e
            );
        }

        Some(url)
    }

    /// One bounded notification attempt; timeout counts as transport failure.
    async fn try_notify(
        &self,
        submission: &ValidatedSubmission,
        quote_id: &QuoteId,
        document_url: Option<&str>,
    ) -> bool {
        let send = self
            .notifier
            .send_contact_notification(submission, quote_id, document_url);
        match tokio::time::timeout(self.notify_timeout, send).await {
            Ok(Ok(())) => true,
            Ok(Err(e)) => {
                log::warn!("Notification attempt for {} failed: {}", quote_id, e);
                false
            }
            Err(_) => {
                log::warn!(
                    "Notification attempt for {} timed out after {:?}",
                    quote_id,
                    self.notify_timeout
                );
                false
            }
        }
    }
}
