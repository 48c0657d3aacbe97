//! Email dispatch of a generated report.
//!
//! One message, one PDF attachment, plain-text body, authenticated relay on
//! the submission port with STARTTLS. Fails closed: a transport error is
//! reported and nothing else happens — no retry, stored records and the
//! generated document are untouched.

use crate::error::{ArborError, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::path::Path;

pub struct MailAccount {
    pub smtp_host: String,
    pub user: String,
    pub password: String,
}

fn parse_mailbox(addr: &str) -> Result<Mailbox> {
    addr.parse()
        .map_err(|e| ArborError::DeliveryFailure(format!("invalid address {}: {}", addr, e)))
}

/// Build the outbound message with the report attached.
pub fn build_message(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
    pdf_path: &Path,
) -> Result<Message> {
    let pdf_bytes = std::fs::read(pdf_path)
        .map_err(|e| ArborError::DeliveryFailure(format!("{}: {}", pdf_path.display(), e)))?;
    let file_name = pdf_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "informe.pdf".to_string());

    let content_type = ContentType::parse("application/pdf")
        .map_err(|e| ArborError::DeliveryFailure(e.to_string()))?;

    Message::builder()
        .from(parse_mailbox(from)?)
        .to(parse_mailbox(to)?)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(body.to_string()))
                .singlepart(Attachment::new(file_name).body(pdf_bytes, content_type)),
        )
        .map_err(|e| ArborError::DeliveryFailure(e.to_string()))
}

/// Send the report over the authenticated relay.
pub fn send_report(
    account: &MailAccount,
    to: &str,
    subject: &str,
    body: &str,
    pdf_path: &Path,
) -> Result<()> {
    let message = build_message(&account.user, to, subject, body, pdf_path)?;

    // port 587, TLS negotiated after connecting
    let mailer = SmtpTransport::starttls_relay(&account.smtp_host)
        .map_err(|e| ArborError::DeliveryFailure(e.to_string()))?
        .credentials(Credentials::new(
            account.user.clone(),
            account.password.clone(),
        ))
        .build();

    mailer
        .send(&message)
        .map_err(|e| ArborError::DeliveryFailure(e.to_string()))?;

    Ok(())
}
