use std::net::SocketAddr;
use std::path::PathBuf;

use easyflow_core::models::sender::SenderIdentity;
use easyflow_export::generate::CollisionPolicy;

pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Server settings, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: SocketAddr,
    /// Where documents and the report are written.
    pub output_dir: PathBuf,
    pub sender: Option<SenderIdentity>,
    pub collisions: CollisionPolicy,
}

impl AppConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let bind_raw = get("EASYFLOW_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("EASYFLOW_BIND {bind_raw:?} is not a socket address: {e}"))?;

        let output_dir = get("EASYFLOW_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let collisions = match get("EASYFLOW_COLLISIONS") {
            Some(raw) => raw.parse::<CollisionPolicy>().map_err(|e| eyre::eyre!(e))?,
            None => CollisionPolicy::default(),
        };

        let name = get("EASYFLOW_SENDER_NAME");
        let phone = get("EASYFLOW_SENDER_PHONE");
        let email = get("EASYFLOW_SENDER_EMAIL");
        let sender = (name.is_some() || phone.is_some() || email.is_some()).then(|| SenderIdentity {
            name: name.unwrap_or_default(),
            phone: phone.unwrap_or_default(),
            email: email.unwrap_or_default(),
        });

        Ok(Self {
            bind,
            output_dir,
            sender,
            collisions,
        })
    }
}
