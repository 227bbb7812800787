use std::fmt;

use crate::error::NotifyError;

pub const DEFAULT_PORT: u16 = 587;

/// SMTP submission settings, read once at startup.
#[derive(Clone)]
pub struct MailConfig {
    pub username: String,
    pub password: String,
    pub server: String,
    pub port: u16,
    /// `From` address. Falls back to `username`.
    pub default_sender: String,
}

impl MailConfig {
    /// Read `MAIL_USERNAME`, `MAIL_PASSWORD`, `MAIL_SERVER`, `MAIL_PORT` and
    /// `MAIL_DEFAULT_SENDER` from the process environment.
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`MailConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NotifyError> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| NotifyError::Config(format!("{key} is not set")))
        };

        let username = require("MAIL_USERNAME")?;
        let password = require("MAIL_PASSWORD")?;
        let server = require("MAIL_SERVER")?;
        let port = match get("MAIL_PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|_| {
                NotifyError::Config(format!("MAIL_PORT is not a port number: {raw}"))
            })?,
            None => DEFAULT_PORT,
        };
        let default_sender = get("MAIL_DEFAULT_SENDER").unwrap_or_else(|| username.clone());

        Ok(Self {
            username,
            password,
            server,
            port,
            default_sender,
        })
    }
}

// Keep the password out of logs.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("default_sender", &self.default_sender)
            .finish()
    }
}
