use eyre::Result;
use tracing_subscriber::EnvFilter;

use easyflow_notify::{MailConfig, Mailer};
use easyflow_web::config::AppConfig;
use easyflow_web::state::{AppState, MailStatus};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let mail = match MailConfig::from_env() {
        Ok(mail_config) => {
            tracing::info!(
                server = %mail_config.server,
                port = mail_config.port,
                "mail sending enabled"
            );
            MailStatus::Ready(Mailer::new(mail_config).into())
        }
        Err(e) => {
            tracing::warn!("mail sending disabled: {e}");
            MailStatus::Disabled(e.to_string())
        }
    };

    let bind = config.bind;
    let state = AppState::new(config, mail)?;

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(addr = %bind, "EasyFlow listening");

    axum::serve(listener, easyflow_web::app(state)).await?;
    Ok(())
}
