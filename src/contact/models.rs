use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Raw contact-form fields as submitted by the site.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactFormData {
    #[schema(example = "Mario Rossi")]
    pub name: String,
    #[schema(example = "mario@example.com")]
    pub email: String,
    #[schema(example = "+39 333 1234567")]
    pub phone: Option<String>,
    #[schema(example = "website")]
    pub project_type: String,
    #[schema(example = "1000-3000")]
    pub budget: String,
    #[schema(example = "Ho bisogno di un nuovo sito per la mia attività.")]
    pub message: String,
}

/// A submission that passed validation; field values are normalized
/// (trimmed, empty phone collapsed to `None`).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub project_type: String,
    pub budget: String,
    pub message: String,
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "name")]
    pub field: String,
    #[schema(example = "Il nome deve contenere almeno 2 caratteri.")]
    pub message: String,
}

/// Result of one pipeline invocation, mirrored onto the HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(rename = "quoteId", skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl SubmissionOutcome {
    pub fn accepted(message: impl Into<String>, quote_id: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            quote_id: Some(quote_id),
            errors: None,
        }
    }

    pub fn rejected(message: impl Into<String>, errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: message.into(),
            quote_id: None,
            errors: Some(errors),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            quote_id: None,
            errors: None,
        }
    }
}
