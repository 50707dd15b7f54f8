//! Textual content of a quote document.
//!
//! Assembling the text is kept separate from drawing it: the content is a pure
//! function of the submission, the identifier, the catalog entry and the issue
//! date, so it can be pinned in tests while the renderer stays free to vary
//! its decorative output.

use chrono::{Datelike, NaiveDate};

use crate::contact::models::ValidatedSubmission;
use crate::contact::quote_id::QuoteId;
use crate::quote::catalog::{budget_label, ProjectTypeConfig};

/// Column width (in characters) for the wrapped project description.
pub const DESCRIPTION_COLUMNS: usize = 90;

/// Technologies shown in the side panel.
pub const MAX_PANEL_TECHNOLOGIES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub budget: String,
}

/// Everything printable in a quote document, already formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteContent {
    /// Header line, e.g. `[WEB] Sito Web`.
    pub project_heading: String,
    /// Reference line, e.g. `Preventivo #: QUOTE-7F3A9C2D`.
    pub reference: String,
    /// Issue date in `dd/mm/yyyy` form.
    pub issued_on: String,
    pub client: ClientInfo,
    /// Project description wrapped to [`DESCRIPTION_COLUMNS`].
    pub description_lines: Vec<String>,
    /// Included features split into two columns, left first.
    pub feature_columns: (Vec<String>, Vec<String>),
    pub timeline: String,
    pub technologies: Vec<String>,
    pub deliverables: Vec<String>,
    pub legal_notes: Vec<String>,
    pub footer_lines: Vec<String>,
}

impl QuoteContent {
    pub fn build(
        submission: &ValidatedSubmission,
        quote_id: &QuoteId,
        config: &ProjectTypeConfig,
        issued_on: NaiveDate,
    ) -> Self {
        let features: Vec<String> = config.features.iter().map(|f| f.to_string()).collect();
        let split_at = features.len().div_ceil(2);
        let (left, right) = features.split_at(split_at.min(features.len()));

        Self {
            project_heading: format!("[{}] {}", config.symbol, config.label),
            reference: format!("Preventivo #: {}", quote_id),
            issued_on: format!(
                "{:02}/{:02}/{}",
                issued_on.day(),
                issued_on.month(),
                issued_on.year()
            ),
            client: ClientInfo {
                name: submission.name.clone(),
                email: submission.email.clone(),
                phone: submission
                    .phone
                    .clone()
                    .unwrap_or_else(|| "Non fornito".to_string()),
                budget: budget_label(&submission.budget),
            },
            description_lines: wrap_text(&submission.message, DESCRIPTION_COLUMNS),
            feature_columns: (left.to_vec(), right.to_vec()),
            timeline: config.timeline.to_string(),
            technologies: config
                .technologies
                .iter()
                .take(MAX_PANEL_TECHNOLOGIES)
                .map(|t| t.to_string())
                .collect(),
            deliverables: config.deliverables.iter().map(|d| d.to_string()).collect(),
            legal_notes: vec![
                "Nota: Questo preventivo e valido per 30 giorni dalla data di emissione.".to_string(),
                "I prezzi finali potrebbero variare in base ai dettagli specifici del progetto."
                    .to_string(),
            ],
            footer_lines: vec![
                "Strelka - P.IVA: 14088410965".to_string(),
                "Email: contact@strelka.it | Web: www.strelka.it".to_string(),
            ],
        }
    }
}

/// Greedy word wrap to a fixed column width.
///
/// Words longer than the width are hard-split so no line ever exceeds it.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    assert!(width > 0);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        // Hard-split oversized words.
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            let head_bytes = head.len();
            lines.push(head);
            word = &word[head_bytes..];
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
