use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use easyflow_core::date;
use easyflow_core::file_names;
use easyflow_core::models::artifact::GeneratedFile;
use easyflow_core::models::chapter::Chapter;
use easyflow_core::models::context::RenderContext;
use easyflow_core::models::row::StudentRow;
use easyflow_core::models::sender::SenderIdentity;

use crate::docx::DocxTemplate;
use crate::error::ExportError;

/// What to do when two rows produce the same document file name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Later rows replace the earlier document.
    #[default]
    Overwrite,
    /// Later rows get `_2`, `_3`, ... before the extension.
    Suffix,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(CollisionPolicy::Overwrite),
            "suffix" => Ok(CollisionPolicy::Suffix),
            other => Err(format!("unknown collision policy: {other}")),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Overwrite => f.write_str("overwrite"),
            CollisionPolicy::Suffix => f.write_str("suffix"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Value bound to `fecha`.
    pub date: String,
    pub sender: Option<SenderIdentity>,
    pub collisions: CollisionPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            date: date::today(),
            sender: None,
            collisions: CollisionPolicy::default(),
        }
    }
}

/// Render one document per row into `out_dir`, in row order.
///
/// Every row is rendered before anything is written, so a template that
/// does not fit the data leaves the output directory untouched.
pub fn render_documents(
    template: &DocxTemplate,
    rows: &[StudentRow],
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<Vec<GeneratedFile>, ExportError> {
    let rendered = rows
        .iter()
        .map(|row| {
            let ctx = RenderContext::for_row(row, &options.date, options.sender.as_ref());
            template.render(&ctx)
        })
        .collect::<Result<Vec<_>, _>>()?;

    std::fs::create_dir_all(out_dir)?;

    let mut names = FileNames::new(options.collisions);
    let mut generated = Vec::with_capacity(rows.len());
    for (row, bytes) in rows.iter().zip(rendered) {
        let path = out_dir.join(names.assign(&row.student_name));
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "document written");
        generated.push(GeneratedFile::document(path));
    }

    Ok(generated)
}

/// The default summary chapter for each row, in row order.
pub fn chapters_for(rows: &[StudentRow]) -> Vec<Chapter> {
    rows.iter().map(Chapter::for_row).collect()
}

struct FileNames {
    policy: CollisionPolicy,
    seen: HashMap<String, usize>,
}

impl FileNames {
    fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            seen: HashMap::new(),
        }
    }

    fn assign(&mut self, student_name: &str) -> String {
        let base = file_names::student_document(student_name);
        let count = self.seen.entry(base.clone()).or_insert(0);
        *count += 1;
        let n = *count;

        if n == 1 {
            return base;
        }

        match self.policy {
            CollisionPolicy::Overwrite => {
                tracing::warn!(
                    file = %base,
                    "duplicate student name, overwriting earlier document"
                );
                base
            }
            CollisionPolicy::Suffix => {
                let mut suffix = n;
                let mut candidate = file_names::with_suffix(&base, suffix);
                while self.seen.contains_key(&candidate) {
                    suffix += 1;
                    candidate = file_names::with_suffix(&base, suffix);
                }
                self.seen.insert(candidate.clone(), 1);
                candidate
            }
        }
    }
}
