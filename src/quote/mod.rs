//! Quote document generation.
//!
//! Split into the static catalog (`catalog`), the deterministic text content
//! (`content`), branding asset loading (`branding`) and the PDF renderer
//! (`pdf`). Every failure in here is non-fatal to the submission pipeline:
//! the orchestrator logs it and continues without a document.

pub mod branding;
pub mod catalog;
pub mod content;
pub mod pdf;

use thiserror::Error;

pub use branding::BrandingAssets;
pub use catalog::{budget_label, config_for, project_type_label, ProjectType, ProjectTypeConfig};
pub use content::QuoteContent;
pub use pdf::render_quote_pdf;

/// Errors raised while producing a quote document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to prepare PDF fonts: {0}")]
    Font(String),
    #[error("failed to serialize PDF document: {0}")]
    Render(String),
}
