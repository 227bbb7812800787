use std::path::Path;
use std::sync::Arc;

use easyflow_core::models::artifact::{ArtifactKind, GeneratedFile};
use easyflow_core::models::row::StudentRow;
use easyflow_export::docx::DocxTemplate;

/// Rows shown in the upload preview.
pub const PREVIEW_ROWS: usize = 5;

/// The one in-memory working session: what was uploaded and what has been
/// generated from it.
#[derive(Default)]
pub struct Session {
    pub spreadsheet_name: Option<String>,
    pub template_name: Option<String>,
    pub rows: Vec<StudentRow>,
    pub template: Option<Arc<DocxTemplate>>,
    /// Visible text of the first document of the last Word run.
    pub document_preview: Option<String>,
    artifacts: Vec<GeneratedFile>,
}

impl Session {
    /// Replace the inputs. Artifacts from earlier inputs are forgotten.
    pub fn load(
        &mut self,
        spreadsheet_name: String,
        rows: Vec<StudentRow>,
        template_name: String,
        template: DocxTemplate,
    ) {
        self.spreadsheet_name = Some(spreadsheet_name);
        self.rows = rows;
        self.template_name = Some(template_name);
        self.template = Some(Arc::new(template));
        self.document_preview = None;
        self.artifacts.clear();
    }

    pub fn is_loaded(&self) -> bool {
        self.spreadsheet_name.is_some() && self.template.is_some()
    }

    pub fn preview(&self) -> &[StudentRow] {
        &self.rows[..self.rows.len().min(PREVIEW_ROWS)]
    }

    /// Remember generated files. A path produced again replaces its
    /// earlier entry, so each file is attached at most once.
    pub fn record(&mut self, files: impl IntoIterator<Item = GeneratedFile>) {
        for file in files {
            self.artifacts.retain(|known| known.path != file.path);
            self.artifacts.push(file);
        }
    }

    pub fn artifacts(&self) -> &[GeneratedFile] {
        &self.artifacts
    }

    pub fn report(&self) -> Option<&Path> {
        self.artifacts
            .iter()
            .rev()
            .find(|f| f.kind == ArtifactKind::Report)
            .map(GeneratedFile::path)
    }
}
