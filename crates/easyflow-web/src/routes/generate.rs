use std::path::Path;

use axum::Form;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;

use easyflow_core::file_names;
use easyflow_core::models::artifact::{ArtifactKind, GeneratedFile};
use easyflow_export::docx::document_text;
use easyflow_export::error::ExportError;
use easyflow_export::generate::{RenderOptions, chapters_for, render_documents};
use easyflow_export::pdf::ReportBuilder;

use crate::error::PageError;
use crate::pages::{DEFAULT_AUTHOR, DEFAULT_TITLE, Notice};
use crate::session::Session;
use crate::state::AppState;

/// Generation form. Checkboxes are only sent when ticked.
#[derive(Debug, Deserialize)]
pub struct GenerateForm {
    pub title: Option<String>,
    pub author: Option<String>,
    pub generate_word: Option<String>,
    pub generate_pdf: Option<String>,
}

impl GenerateForm {
    fn word(&self) -> bool {
        is_checked(self.generate_word.as_deref())
    }

    fn pdf(&self) -> bool {
        is_checked(self.generate_pdf.as_deref())
    }
}

fn is_checked(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !matches!(v, "" | "false" | "off" | "0"))
}

pub async fn generate(State(state): State<AppState>, Form(form): Form<GenerateForm>) -> Response {
    let mut session = state.session.lock().await;
    let outcome = run(&state, &mut session, form).await;
    super::respond(&state, &session, outcome)
}

async fn run(
    state: &AppState,
    session: &mut Session,
    form: GenerateForm,
) -> Result<Vec<Notice>, PageError> {
    if !session.is_loaded() {
        return Err(PageError::BadRequest(
            "Sube primero la hoja de cálculo y la plantilla.".to_string(),
        ));
    }
    let (word, pdf) = (form.word(), form.pdf());
    if !word && !pdf {
        return Ok(vec![Notice::info("No se seleccionó nada para generar.")]);
    }

    let template = session
        .template
        .clone()
        .ok_or_else(|| PageError::BadRequest("Sube tu plantilla de Word.".to_string()))?;
    let rows = session.rows.clone();
    let out_dir = state.config.output_dir.clone();
    let options = RenderOptions {
        sender: state.config.sender.clone(),
        collisions: state.config.collisions,
        ..RenderOptions::default()
    };
    let title = form.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let author = form.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let run = tokio::task::spawn_blocking(move || {
        let mut run = GenerationRun::default();
        if word {
            let documents = render_documents(&template, &rows, &out_dir, &options);
            match documents {
                Ok(documents) => {
                    run.preview = documents.first().and_then(|f| preview_text(f.path()));
                    run.files.extend(documents);
                }
                Err(e) => {
                    run.failure = Some(e);
                    return run;
                }
            }
        }
        if pdf {
            let report = ReportBuilder::new(title)
                .author(author)
                .chapters(chapters_for(&rows))
                .build();
            let written = std::fs::create_dir_all(&out_dir)
                .map_err(ExportError::from)
                .and_then(|()| report.write_to(&out_dir.join(file_names::SUMMARY_REPORT)));
            match written {
                Ok(file) => run.files.push(file),
                Err(e) => run.failure = Some(e),
            }
        }
        run
    })
    .await?;

    let documents: Vec<String> = run
        .files
        .iter()
        .filter(|f| f.kind == ArtifactKind::Document)
        .map(GeneratedFile::file_name)
        .collect();
    let report = run
        .files
        .iter()
        .find(|f| f.kind == ArtifactKind::Report)
        .map(GeneratedFile::file_name);

    if !documents.is_empty() {
        session.document_preview = run.preview;
    }
    session.record(run.files);

    if let Some(e) = run.failure {
        let error = PageError::from(e);
        return Err(if documents.is_empty() {
            error
        } else {
            error.prefixed(&format!(
                "Se generaron {} documentos Word, pero el PDF falló:",
                documents.len()
            ))
        });
    }

    let mut notices = Vec::new();
    if word {
        notices.push(Notice::success("Documentos Word generados:").with_items(documents));
    }
    if let Some(report) = report {
        notices.push(Notice::success(format!("PDF generado: {report}")));
    }
    Ok(notices)
}

/// What one generation pass produced. Files written before a failure are
/// kept so they can still be listed and mailed.
#[derive(Default)]
struct GenerationRun {
    files: Vec<GeneratedFile>,
    preview: Option<String>,
    failure: Option<ExportError>,
}

fn preview_text(path: &Path) -> Option<String> {
    let bytes = std::fs::read(path)
        .inspect_err(|e| tracing::warn!(path = %path.display(), "preview read failed: {e}"))
        .ok()?;
    document_text(&bytes)
        .inspect_err(|e| tracing::warn!(path = %path.display(), "preview failed: {e}"))
        .ok()
}
