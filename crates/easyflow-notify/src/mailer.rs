use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};

use crate::config::MailConfig;
use crate::error::NotifyError;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// One message to submit.
#[derive(Debug, Clone, Default)]
pub struct Outgoing {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    /// Files attached in order, each named by its base file name.
    pub attachments: Vec<PathBuf>,
}

/// Summary of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: String,
    pub attachments: usize,
}

#[derive(Debug, Clone)]
pub struct Mailer {
    config: MailConfig,
    timeout: Duration,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            config,
            timeout: SMTP_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &MailConfig {
        &self.config
    }

    /// Build the MIME message: a plain-text body followed by one
    /// `application/octet-stream` part per attachment. Every attachment is
    /// read here, so a missing file fails before any connection is made.
    pub fn compose(&self, outgoing: &Outgoing) -> Result<Message, NotifyError> {
        let from = parse_mailbox(&self.config.default_sender)?;
        let to = parse_mailbox(&outgoing.recipient)?;
        let octet_stream = ContentType::parse("application/octet-stream")
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(outgoing.body.clone()));
        for path in &outgoing.attachments {
            let bytes = std::fs::read(path).map_err(|source| NotifyError::Attachment {
                path: path.display().to_string(),
                source,
            })?;
            let attachment =
                Attachment::new(attachment_name(path)).body(bytes, octet_stream.clone());
            parts = parts.singlepart(attachment);
        }

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(outgoing.subject.clone())
            .multipart(parts)?;
        Ok(message)
    }

    /// Submit through an authenticated STARTTLS session on the configured
    /// server. One attempt, no retry.
    pub fn send(&self, outgoing: &Outgoing) -> Result<Delivery, NotifyError> {
        let message = self.compose(outgoing)?;
        let transport = SmtpTransport::starttls_relay(&self.config.server)?
            .port(self.config.port)
            .credentials(Credentials::new(
                self.config.username.clone(),
                self.config.password.clone(),
            ))
            .timeout(Some(self.timeout))
            .build();

        self.submit(&transport, message, outgoing)
    }

    /// Submit through any transport.
    pub fn send_via<T>(&self, transport: &T, outgoing: &Outgoing) -> Result<Delivery, NotifyError>
    where
        T: Transport,
        T::Error: Display,
    {
        let message = self.compose(outgoing)?;
        self.submit(transport, message, outgoing)
    }

    fn submit<T>(
        &self,
        transport: &T,
        message: Message,
        outgoing: &Outgoing,
    ) -> Result<Delivery, NotifyError>
    where
        T: Transport,
        T::Error: Display,
    {
        match transport.send(&message) {
            Ok(_) => {
                tracing::info!(
                    recipient = %outgoing.recipient,
                    attachments = outgoing.attachments.len(),
                    "mail sent"
                );
                Ok(Delivery {
                    recipient: outgoing.recipient.clone(),
                    attachments: outgoing.attachments.len(),
                })
            }
            Err(e) => {
                tracing::error!(
                    recipient = %outgoing.recipient,
                    error = %e,
                    "mail submission failed"
                );
                Err(NotifyError::Transport(e.to_string()))
            }
        }
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address.trim().parse::<Mailbox>().map_err(|e| NotifyError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

fn attachment_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string())
}
