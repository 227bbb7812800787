use std::sync::Arc;

use tokio::sync::Mutex;

use easyflow_notify::Mailer;

use crate::config::AppConfig;
use crate::pages::Pages;
use crate::session::Session;

/// Whether mail can be sent, and why not.
#[derive(Clone)]
pub enum MailStatus {
    Ready(Arc<Mailer>),
    Disabled(String),
}

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub mail: MailStatus,
    pub pages: Arc<Pages>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(config: AppConfig, mail: MailStatus) -> eyre::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            mail,
            pages: Arc::new(Pages::new()?),
            session: Arc::new(Mutex::new(Session::default())),
        })
    }
}
