//! Canonical contact-form validation.
//!
//! Every entry point that accepts untrusted input goes through [`validate`];
//! the JSON API route and any programmatic caller share the exact same rules,
//! so the contract cannot drift between surfaces.

use std::fmt;

use super::models::{ContactFormData, FieldError, ValidatedSubmission};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_MESSAGE_CHARS: usize = 10;

/// Collection of field-level validation failures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("[{}] {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{joined}")
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate and normalize raw form input.
///
/// Returns every failing field at once rather than stopping at the first one.
pub fn validate(raw: &ContactFormData) -> Result<ValidatedSubmission, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = raw.name.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        errors.add("name", "Il nome deve contenere almeno 2 caratteri.");
    }

    let email = raw.email.trim();
    if !is_valid_email(email) {
        errors.add("email", "Inserisci un indirizzo email valido.");
    }

    let project_type = raw.project_type.trim();
    if project_type.is_empty() {
        errors.add("projectType", "Seleziona il tipo di progetto.");
    }

    let budget = raw.budget.trim();
    if budget.is_empty() {
        errors.add("budget", "Seleziona il budget.");
    }

    let message = raw.message.trim();
    if message.chars().count() < MIN_MESSAGE_CHARS {
        errors.add("message", "Il messaggio deve contenere almeno 10 caratteri.");
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let phone = raw
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string);

    Ok(ValidatedSubmission {
        name: name.to_string(),
        email: email.to_string(),
        phone,
        project_type: project_type.to_string(),
        budget: budget.to_string(),
        message: message.to_string(),
    })
}

/// Standard email grammar check: one `@`, non-empty local part, domain with a
/// dot and no leading/trailing dot, no whitespace anywhere.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = match parts.next() {
        Some(d) => d,
        None => return false,
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }

    domain.split('.').all(|label| !label.is_empty())
}
