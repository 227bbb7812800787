use std::path::{Path, PathBuf};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A per-student rendered `.docx`.
    Document,
    /// The summary PDF.
    Report,
}

/// A file produced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

impl GeneratedFile {
    pub fn document(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ArtifactKind::Document,
        }
    }

    pub fn report(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            kind: ArtifactKind::Report,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base file name, used as the attachment name when mailing.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
