//! HTML rendering of the single application page.

use serde::Serialize;
use tera::{Context, Tera};

use easyflow_core::models::artifact::ArtifactKind;
use easyflow_core::schema::REQUIRED_COLUMNS;

use crate::error::PageError;
use crate::session::Session;
use crate::state::MailStatus;

pub const DEFAULT_TITLE: &str = "Reporte de Notas";
pub const DEFAULT_AUTHOR: &str = "EasyFlow";

const INDEX: &str = "index.html";

pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX, include_str!("../templates/index.html"))?;
        Ok(Self { tera })
    }

    pub fn index(&self, view: &IndexView) -> Result<String, PageError> {
        let ctx = Context::from_serialize(view)
            .map_err(|e| PageError::Internal(format!("page context: {e}")))?;
        self.tera
            .render(INDEX, &ctx)
            .map_err(|e| PageError::Internal(format!("page render: {e}")))
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A message shown above the page sections.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub items: Vec<String>,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
            items: Vec::new(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
            items: Vec::new(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items(mut self, items: Vec<String>) -> Self {
        self.items = items;
        self
    }
}

#[derive(Debug, Serialize)]
struct ArtifactView {
    file_name: String,
    kind: ArtifactKind,
}

#[derive(Debug, Serialize)]
pub struct IndexView {
    notices: Vec<Notice>,
    loaded: bool,
    spreadsheet_name: Option<String>,
    template_name: Option<String>,
    row_count: usize,
    columns: Vec<&'static str>,
    preview: Vec<Vec<String>>,
    artifacts: Vec<ArtifactView>,
    document_preview: Option<String>,
    has_report: bool,
    mail_enabled: bool,
    mail_disabled_reason: Option<String>,
    default_title: &'static str,
    default_author: &'static str,
}

impl IndexView {
    pub fn new(session: &Session, mail: &MailStatus, notices: Vec<Notice>) -> Self {
        let preview = session
            .preview()
            .iter()
            .map(|row| {
                vec![
                    row.student_name.clone(),
                    row.math_score.to_string(),
                    row.physics_score.to_string(),
                    row.chemistry_score.to_string(),
                ]
            })
            .collect();

        let artifacts = session
            .artifacts()
            .iter()
            .map(|f| ArtifactView {
                file_name: f.file_name(),
                kind: f.kind,
            })
            .collect();

        let (mail_enabled, mail_disabled_reason) = match mail {
            MailStatus::Ready(_) => (true, None),
            MailStatus::Disabled(reason) => (false, Some(reason.clone())),
        };

        Self {
            notices,
            loaded: session.is_loaded(),
            spreadsheet_name: session.spreadsheet_name.clone(),
            template_name: session.template_name.clone(),
            row_count: session.rows.len(),
            columns: REQUIRED_COLUMNS.to_vec(),
            preview,
            artifacts,
            document_preview: session.document_preview.clone(),
            has_report: session.report().is_some(),
            mail_enabled,
            mail_disabled_reason,
            default_title: DEFAULT_TITLE,
            default_author: DEFAULT_AUTHOR,
        }
    }
}
