//! Contact submission pipeline: validation, identifier generation,
//! orchestration and the HTTP entry point.

pub mod handlers;
pub mod models;
pub mod quote_id;
pub mod service;
pub mod validation;

pub use models::{ContactFormData, FieldError, SubmissionOutcome, ValidatedSubmission};
pub use quote_id::QuoteId;
pub use service::ContactService;
pub use validation::{validate, ValidationErrors};
