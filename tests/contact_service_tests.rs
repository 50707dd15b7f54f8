//! Pipeline semantics: which stage failures are fatal, which are absorbed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{sample_form, MockNotifier, MockObjectStorage, MockSubmissionStore, NotifierMode};
use strelka_server::contact::quote_id::QuoteId;
use strelka_server::contact::ContactService;

struct Harness {
    store: Arc<MockSubmissionStore>,
    storage: Arc<MockObjectStorage>,
    notifier: Arc<MockNotifier>,
    service: ContactService,
}

fn harness(
    store: MockSubmissionStore,
    storage: MockObjectStorage,
    notifier: MockNotifier,
) -> Harness {
    let store = Arc::new(store);
    let storage = Arc::new(storage);
    let notifier = Arc::new(notifier);
    let service = ContactService::new(store.clone(), storage.clone(), notifier.clone())
        .with_render_seed(42)
        .with_notify_timeout(Duration::from_millis(500));
    Harness {
        store,
        storage,
        notifier,
        service,
    }
}

#[tokio::test]
async fn happy_path_stores_uploads_links_and_notifies() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let outcome = h.service.submit(sample_form()).await;

    assert!(outcome.success);
    let quote_id = outcome.quote_id.expect("accepted outcome carries an id");
    assert!(QuoteId::parse(&quote_id).is_some(), "bad id shape: {quote_id}");
    assert!(outcome.message.contains("Grazie"));

    // Stored exactly once, with the same identifier.
    let inserted = h.store.inserted.lock().await;
    assert_eq!(inserted.len(), 1);
    assert_eq!(inserted[0].quote_id, quote_id);
    assert_eq!(inserted[0].project_type, "website");

    // Document uploaded under the identifier-derived key and linked back.
    let key = format!("{quote_id}.pdf");
    assert!(h.storage.has_file(&key).await);
    let linked = h.store.linked_urls.lock().await;
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].0, quote_id);
    assert!(linked[0].1.ends_with(&key));

    // Single notification attempt, carrying the document link.
    let attempts = h.notifier.attempts.lock().await;
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].as_deref().unwrap().ends_with(&key));
}

#[tokio::test]
async fn rejected_submission_performs_no_side_effects() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let mut form = sample_form();
    form.name = "A".to_string();
    let outcome = h.service.submit(form).await;

    assert!(!outcome.success);
    assert!(outcome.quote_id.is_none());
    let errors = outcome.errors.expect("rejection carries field errors");
    assert_eq!(errors[0].field, "name");
    assert_eq!(outcome.message, "Il nome deve contenere almeno 2 caratteri.");

    assert_eq!(h.store.insert_count().await, 0);
    assert!(h.storage.files.lock().await.is_empty());
    assert_eq!(h.notifier.attempt_count().await, 0);
}

#[tokio::test]
async fn insert_failure_is_fatal_and_generic() {
    let h = harness(
        MockSubmissionStore::new().fail_insert(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let outcome = h.service.submit(sample_form()).await;

    assert!(!outcome.success);
    assert!(outcome.quote_id.is_none());
    assert!(outcome.errors.is_none());
    // Generic user-facing message, no internal detail leaked.
    assert_eq!(
        outcome.message,
        "Si è verificato un errore durante l'invio del modulo."
    );
    assert!(h.storage.files.lock().await.is_empty());
    assert_eq!(h.notifier.attempt_count().await, 0);
}

#[tokio::test]
async fn upload_failure_degrades_to_no_document() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new().fail_upload(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let outcome = h.service.submit(sample_form()).await;

    assert!(outcome.success, "upload failure must not fail the submission");
    assert!(outcome.quote_id.is_some());
    assert!(h.store.linked_urls.lock().await.is_empty());

    // One attempt, without a document link.
    let attempts = h.notifier.attempts.lock().await;
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].is_none());
}

#[tokio::test]
async fn link_failure_keeps_the_document_link_in_the_email() {
    let h = harness(
        MockSubmissionStore::new().fail_update(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let outcome = h.service.submit(sample_form()).await;

    assert!(outcome.success);
    // The record misses the URL but the notification still carries it.
    let attempts = h.notifier.attempts.lock().await;
    assert_eq!(attempts.len(), 1);
    assert!(attempts[0].is_some());
}

#[tokio::test]
async fn with_document_failure_falls_back_to_plain_notification() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::FailWithDocument),
    );

    let outcome = h.service.submit(sample_form()).await;

    assert!(outcome.success);
    let attempts = h.notifier.attempts.lock().await;
    assert_eq!(attempts.len(), 2, "expected with-document then fallback");
    assert!(attempts[0].is_some());
    assert!(attempts[1].is_none());
}

#[tokio::test]
async fn double_notification_failure_still_reports_success() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::FailAll),
    );

    let outcome = h.service.submit(sample_form()).await;

    assert!(outcome.success, "email is best-effort");
    assert!(outcome.quote_id.is_some());
    assert_eq!(h.notifier.attempt_count().await, 2);
    assert_eq!(h.store.insert_count().await, 1);
}

#[tokio::test]
async fn hanging_transport_is_bounded_by_the_timeout() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Hang),
    );

    let started = std::time::Instant::now();
    let outcome = h.service.submit(sample_form()).await;

    assert!(outcome.success);
    // Two attempts, both cut off by the 500ms bound; well under the 60s sleep.
    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(h.notifier.attempt_count().await, 2);
}

#[tokio::test]
async fn identifier_is_reused_across_store_key_and_notification() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let outcome = h.service.submit(sample_form()).await;
    let quote_id = outcome.quote_id.unwrap();

    let inserted = h.store.inserted.lock().await;
    let linked = h.store.linked_urls.lock().await;
    let files = h.storage.files.lock().await;
    assert_eq!(inserted[0].quote_id, quote_id);
    assert_eq!(linked[0].0, quote_id);
    assert!(files.contains_key(&format!("{quote_id}.pdf")));
}

#[tokio::test]
async fn uploaded_document_is_a_pdf() {
    let h = harness(
        MockSubmissionStore::new(),
        MockObjectStorage::new(),
        MockNotifier::new(NotifierMode::Succeed),
    );

    let outcome = h.service.submit(sample_form()).await;
    let key = format!("{}.pdf", outcome.quote_id.unwrap());
    let files = h.storage.files.lock().await;
    let bytes = files.get(&key).expect("document should be uploaded");
    assert!(bytes.starts_with(b"%PDF"));
}
