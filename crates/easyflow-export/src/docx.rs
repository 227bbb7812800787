use std::io::{Cursor, Read, Write};
use std::path::Path;

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use easyflow_core::models::context::RenderContext;

use crate::error::ExportError;
use crate::render::TemplateSet;

const MAIN_DOCUMENT: &str = "word/document.xml";

/// A Word template parsed once and rendered once per row.
///
/// Placeholders use Jinja2 syntax (`{{ nombre_alumno }}`) and may appear in
/// the document body, headers and footers. Every other package part is
/// copied unchanged into each rendered document.
pub struct DocxTemplate {
    entries: Vec<PackageEntry>,
    templates: TemplateSet,
}

struct PackageEntry {
    name: String,
    compression: CompressionMethod,
    is_dir: bool,
    /// Raw bytes for copied parts; empty for templated parts.
    data: Vec<u8>,
    templated: bool,
}

impl DocxTemplate {
    pub fn open(path: &Path) -> Result<Self, ExportError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ExportError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut entries = Vec::with_capacity(archive.len());
        let mut sources = Vec::new();

        for index in 0..archive.len() {
            let mut file = archive.by_index(index)?;
            let name = file.name().to_string();
            let compression = file.compression();
            let is_dir = file.is_dir();

            let mut data = Vec::new();
            file.read_to_end(&mut data)?;

            let templated = !is_dir && is_templated_part(&name);
            if templated {
                let xml = String::from_utf8(data)
                    .map_err(|_| ExportError::Package(format!("{name} is not valid UTF-8")))?;
                sources.push((name.clone(), merge_split_placeholders(&xml)));
                data = Vec::new();
            }

            entries.push(PackageEntry {
                name,
                compression,
                is_dir,
                data,
                templated,
            });
        }

        if !entries.iter().any(|e| e.name == MAIN_DOCUMENT) {
            return Err(ExportError::Package(format!("{MAIN_DOCUMENT} not found")));
        }

        let templates = TemplateSet::compile(&sources)?;
        tracing::debug!(
            parts = entries.len(),
            templated = sources.len(),
            "docx template parsed"
        );

        Ok(Self { entries, templates })
    }

    /// Bind `ctx` into every templated part and return the new package.
    pub fn render(&self, ctx: &RenderContext) -> Result<Vec<u8>, ExportError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            if entry.is_dir {
                writer.add_directory(entry.name.as_str(), options)?;
                continue;
            }

            writer.start_file(entry.name.as_str(), options)?;
            if entry.templated {
                let xml = self.templates.render(&entry.name, ctx)?;
                writer.write_all(xml.as_bytes())?;
            } else {
                writer.write_all(&entry.data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

fn is_templated_part(name: &str) -> bool {
    if name == MAIN_DOCUMENT {
        return true;
    }
    name.strip_prefix("word/").is_some_and(|part| {
        (part.starts_with("header") || part.starts_with("footer"))
            && part.ends_with(".xml")
            && !part.contains('/')
    })
}

/// Word splits text into runs wherever formatting or editing history
/// changes, so `{{ nombre_alumno }}` may arrive as `{{ nombre` and
/// `_alumno }}` in separate `<w:t>` elements. Remove the markup between the
/// opening and closing delimiters of every tag so the template engine sees
/// each tag whole. The surviving text lands in the run that held the
/// opening delimiter.
pub fn merge_split_placeholders(xml: &str) -> String {
    let mut out = String::with_capacity(xml.len());
    // Markup seen right after a visible `{`, kept until we know whether a
    // tag is opening.
    let mut held = String::new();
    // Visible text of an open tag, after its opening `{`.
    let mut tag: Option<String> = None;
    let mut prev: Option<char> = None;
    let mut rest = xml;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = rest.find('>').map_or(rest.len(), |i| i + 1);
            let markup = &rest[..end];
            rest = &rest[end..];

            if tag.is_some() {
                continue;
            }
            if prev == Some('{') {
                held.push_str(markup);
            } else {
                out.push_str(markup);
            }
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        let text = &rest[..end];
        rest = &rest[end..];

        for c in text.chars() {
            if let Some(buf) = tag.as_mut() {
                buf.push(c);
                if c == '}' && matches!(prev, Some('}' | '%' | '#')) {
                    out.push_str(&normalize_tag_text(buf));
                    tag = None;
                }
            } else if prev == Some('{') && matches!(c, '{' | '%' | '#') {
                held.clear();
                tag = Some(c.to_string());
            } else {
                out.push_str(&held);
                held.clear();
                out.push(c);
            }
            prev = Some(c);
        }
    }

    out.push_str(&held);
    if let Some(buf) = tag {
        out.push_str(&buf);
    }
    out
}

/// Inside a tag the text is template code, not XML: decode entities and
/// straighten the typographic quotes Word substitutes while typing.
fn normalize_tag_text(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Visible body text of a `.docx`: one line per paragraph, and one line
/// per table row with cells separated by tabs. Headers and footers are not
/// included.
pub fn document_text(bytes: &[u8]) -> Result<String, ExportError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExportError::Docx(e.to_string()))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        match child {
            DocumentChild::Paragraph(p) => lines.push(paragraph_text(p)),
            DocumentChild::Table(t) => table_lines(t, &mut lines),
            _ => {}
        }
    }

    Ok(lines.join("\n"))
}

#[allow(irrefutable_let_patterns)]
fn table_lines(table: &Table, lines: &mut Vec<String>) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else {
            continue;
        };
        let mut cells = Vec::new();
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else {
                continue;
            };
            let mut parts = Vec::new();
            for content in &cell.children {
                match content {
                    TableCellContent::Paragraph(p) => parts.push(paragraph_text(p)),
                    TableCellContent::Table(nested) => table_lines(nested, lines),
                    _ => {}
                }
            }
            cells.push(parts.join(" "));
        }
        lines.push(cells.join("\t"));
    }
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    _ => {}
                }
            }
        }
    }
    text
}
