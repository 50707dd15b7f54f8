//! Email notification dispatcher.
//!
//! Renders the contact-notification HTML and sends it over SMTP. The pipeline
//! only sees the [`Notifier`] trait; when no SMTP block is configured the
//! [`DisabledNotifier`] stands in and reports failure instead of crashing.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::contact::models::ValidatedSubmission;
use crate::contact::quote_id::QuoteId;
use crate::quote::catalog::{budget_label, project_type_label};

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email notifications are disabled (no SMTP configuration)")]
    Disabled,
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message: {0}")]
    Message(String),
    #[error("SMTP transport error: {0}")]
    Transport(String),
}

/// Notification transport consumed by the submission pipeline.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send the contact notification, optionally referencing the generated
    /// document. The orchestrator decides retries; this sends exactly once.
    async fn send_contact_notification(
        &self,
        submission: &ValidatedSubmission,
        quote_id: &QuoteId,
        document_url: Option<&str>,
    ) -> Result<(), NotifyError>;
}

/// Render the notification HTML body.
///
/// User-controlled values are escaped; project type and budget go through the
/// display-label maps with raw-value fallback.
pub fn render_notification_html(
    submission: &ValidatedSubmission,
    quote_id: &QuoteId,
    document_url: Option<&str>,
) -> String {
    let name = html_escape::encode_text(&submission.name);
    let email = html_escape::encode_text(&submission.email);
    let phone = submission
        .phone
        .clone()
        .unwrap_or_else(|| "Non fornito".to_string());
    let phone = html_escape::encode_text(&phone);
    let project = project_type_label(&submission.project_type);
    let project = html_escape::encode_text(&project);
    let budget = budget_label(&submission.budget);
    let budget = html_escape::encode_text(&budget);
    let message = html_escape::encode_text(&submission.message);

    let quote_line = format!(
        "<p><strong>Numero Preventivo:</strong> {}</p>",
        quote_id.as_str()
    );
    let document_block = match document_url {
        Some(url) => format!(
            r#"<div style="margin: 20px 0;">
          <p><strong>PDF Preventivo:</strong> <a href="{}" target="_blank">Scarica PDF</a></p>
        </div>"#,
            html_escape::encode_double_quoted_attribute(url)
        ),
        None => String::new(),
    };

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; color: #333;">
        <h2 style="color: #6d28d9;">Nuova richiesta di contatto</h2>
        <p>Hai ricevuto una nuova richiesta di contatto dal sito web.</p>

        {quote_line}

        <div style="background-color: #f9fafb; padding: 15px; border-radius: 5px; margin: 20px 0;">
          <h3 style="margin-top: 0;">Dettagli della richiesta:</h3>
          <p><strong>Nome:</strong> {name}</p>
          <p><strong>Email:</strong> {email}</p>
          <p><strong>Telefono:</strong> {phone}</p>
          <p><strong>Tipo di progetto:</strong> {project}</p>
          <p><strong>Budget:</strong> {budget}</p>
          <p><strong>Messaggio:</strong></p>
          <p style="background-color: white; padding: 10px; border-radius: 3px;">{message}</p>
        </div>

        {document_block}

        <p style="font-size: 12px; color: #666; margin-top: 30px;">
          Questa è un'email automatica inviata dal modulo di contatto del sito Strelka.
        </p>
      </div>"#
    )
}

/// Subject line for the notification; carries the quote identifier so replies
/// stay traceable to the stored record.
pub fn notification_subject(submission: &ValidatedSubmission, quote_id: &QuoteId) -> String {
    format!(
        "Nuova richiesta da {} - Preventivo #{}",
        submission.name, quote_id
    )
}

/// SMTP implementation of [`Notifier`].
pub struct SmtpNotifier {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Result<Self, NotifyError> {
        let tls = TlsParameters::new(config.host.clone())
            .map_err(|e| NotifyError::Transport(format!("TLS configuration error: {e}")))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
            .port(config.port)
            .timeout(Some(std::time::Duration::from_secs(config.timeout_secs)))
            .tls(Tls::Required(tls));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    fn build_message(
        &self,
        submission: &ValidatedSubmission,
        quote_id: &QuoteId,
        document_url: Option<&str>,
    ) -> Result<Message, NotifyError> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| NotifyError::Address(format!("invalid from address: {e}")))?;
        let to: Mailbox = self
            .config
            .notify_to
            .parse()
            .map_err(|e| NotifyError::Address(format!("invalid to address: {e}")))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(notification_subject(submission, quote_id))
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(render_notification_html(submission, quote_id, document_url)),
            )
            .map_err(|e| NotifyError::Message(e.to_string()))
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_contact_notification(
        &self,
        submission: &ValidatedSubmission,
        quote_id: &QuoteId,
        document_url: Option<&str>,
    ) -> Result<(), NotifyError> {
        let message = self.build_message(submission, quote_id, document_url)?;

        self.transport.send(message).await.map_err(|e| {
            log::error!("Failed to send contact notification: {}", e);
            NotifyError::Transport(e.to_string())
        })?;

        log::info!(
            "Contact notification sent for {} (document link: {})",
            quote_id,
            document_url.is_some()
        );
        Ok(())
    }
}

/// Stand-in used when no SMTP configuration exists. Always reports failure so
/// the orchestrator logs the "stored but not notified" warning.
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn send_contact_notification(
        &self,
        _submission: &ValidatedSubmission,
        quote_id: &QuoteId,
        _document_url: Option<&str>,
    ) -> Result<(), NotifyError> {
        log::error!(
            "Notification for {} dropped: email transport is not configured",
            quote_id
        );
        Err(NotifyError::Disabled)
    }
}
