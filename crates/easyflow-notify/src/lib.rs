//! easyflow-notify
//!
//! Mails generated artifacts over SMTP with STARTTLS.

pub mod config;
pub mod error;
pub mod mailer;

pub use config::MailConfig;
pub use mailer::{Delivery, Mailer, Outgoing};
