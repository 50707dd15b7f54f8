//! Shared mock collaborators for pipeline tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use strelka_server::db::{NewSubmission, StoreError, StoredSubmission, SubmissionStore};
use strelka_server::email::{Notifier, NotifyError};
use strelka_server::contact::models::ValidatedSubmission;
use strelka_server::contact::quote_id::QuoteId;
use strelka_server::storage::{ObjectStorage, StorageError};

/// In-memory submission store with failure injection.
pub struct MockSubmissionStore {
    pub inserted: Mutex<Vec<NewSubmission>>,
    pub linked_urls: Mutex<Vec<(String, String)>>,
    fail_insert: AtomicBool,
    fail_update: AtomicBool,
}

impl MockSubmissionStore {
    pub fn new() -> Self {
        Self {
            inserted: Mutex::new(Vec::new()),
            linked_urls: Mutex::new(Vec::new()),
            fail_insert: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
        }
    }

    pub fn fail_insert(self) -> Self {
        self.fail_insert.store(true, Ordering::SeqCst);
        self
    }

    pub fn fail_update(self) -> Self {
        self.fail_update.store(true, Ordering::SeqCst);
        self
    }

    pub async fn insert_count(&self) -> usize {
        self.inserted.lock().await.len()
    }
}

#[async_trait]
impl SubmissionStore for MockSubmissionStore {
    async fn insert(&self, submission: &NewSubmission) -> Result<StoredSubmission, StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("mock insert failure".to_string()));
        }
        self.inserted.lock().await.push(submission.clone());
        Ok(StoredSubmission {
            id: uuid::Uuid::new_v4(),
            name: submission.name.clone(),
            email: submission.email.clone(),
            phone: submission.phone.clone(),
            project_type: submission.project_type.clone(),
            budget: submission.budget.clone(),
            message: submission.message.clone(),
            quote_id: submission.quote_id.clone(),
            pdf_url: None,
            created_at: submission.created_at,
        })
    }

    async fn update_document_url(&self, quote_id: &str, url: &str) -> Result<(), StoreError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(StoreError::Database("mock update failure".to_string()));
        }
        self.linked_urls
            .lock()
            .await
            .push((quote_id.to_string(), url.to_string()));
        Ok(())
    }
}

/// In-memory object storage with failure injection and a configurable
/// branding download result.
pub struct MockObjectStorage {
    pub files: Mutex<HashMap<String, Vec<u8>>>,
    branding: Option<Vec<u8>>,
    fail_upload: AtomicBool,
}

impl MockObjectStorage {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            branding: None,
            fail_upload: AtomicBool::new(false),
        }
    }

    pub fn with_branding(mut self, bytes: Vec<u8>) -> Self {
        self.branding = Some(bytes);
        self
    }

    pub fn fail_upload(self) -> Self {
        self.fail_upload.store(true, Ordering::SeqCst);
        self
    }

    pub async fn has_file(&self, key: &str) -> bool {
        self.files.lock().await.contains_key(key)
    }
}

#[async_trait]
impl ObjectStorage for MockObjectStorage {
    async fn upload_file(
        &self,
        key: &str,
        data: &[u8],
        _content_type: &str,
    ) -> Result<(), StorageError> {
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(StorageError::Request("mock upload failure".to_string()));
        }
        self.files.lock().await.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn download_file(&self, key: &str) -> Result<Vec<u8>, StorageError> {
        match &self.branding {
            Some(bytes) => Ok(bytes.clone()),
            None => Err(StorageError::NotFound(key.to_string())),
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("https://storage.test/public/quotes/{key}")
    }
}

/// Failure modes for [`MockNotifier`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotifierMode {
    Succeed,
    FailAll,
    /// Fail the attempt that carries a document link, succeed otherwise.
    FailWithDocument,
    /// Sleep past any reasonable timeout before answering.
    Hang,
}

/// Records every send attempt with its optional document URL.
pub struct MockNotifier {
    pub attempts: Mutex<Vec<Option<String>>>,
    pub sent: AtomicUsize,
    mode: NotifierMode,
}

impl MockNotifier {
    pub fn new(mode: NotifierMode) -> Self {
        Self {
            attempts: Mutex::new(Vec::new()),
            sent: AtomicUsize::new(0),
            mode,
        }
    }

    pub async fn attempt_count(&self) -> usize {
        self.attempts.lock().await.len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send_contact_notification(
        &self,
        _submission: &ValidatedSubmission,
        _quote_id: &QuoteId,
        document_url: Option<&str>,
    ) -> Result<(), NotifyError> {
        self.attempts
            .lock()
            .await
            .push(document_url.map(str::to_string));

        match self.mode {
            NotifierMode::Succeed => {
                self.sent.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            NotifierMode::FailAll => Err(NotifyError::Transport("mock send failure".to_string())),
            NotifierMode::FailWithDocument => {
                if document_url.is_some() {
                    Err(NotifyError::Transport("mock send failure".to_string()))
                } else {
                    self.sent.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                }
            }
            NotifierMode::Hang => {
                tokio::time::sleep(std::time::Duration::from_secs(60)).await;
                self.sent.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        }
    }
}

/// Valid form data matching the documented happy-path scenario.
pub fn sample_form() -> strelka_server::contact::models::ContactFormData {
    strelka_server::contact::models::ContactFormData {
        name: "Al".to_string(),
        email: "al@x.com".to_string(),
        phone: None,
        project_type: "website".to_string(),
        budget: "1000-3000".to_string(),
        message: "I need a new site for my bakery".to_string(),
    }
}
