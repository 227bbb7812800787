use std::collections::HashMap;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use easyflow_core::models::artifact::GeneratedFile;
use easyflow_core::models::chapter::Chapter;

use crate::error::ExportError;
use crate::layout::{paginate, FontFamily, FontStyle, ReportLayout, TextLine};
use crate::styles::DocumentStyles;

/// Collects the title, author and chapters of a summary report. The title
/// is repeated in every page header.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    author: Option<String>,
    styles: DocumentStyles,
    chapters: Vec<Chapter>,
}

impl ReportBuilder {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: None,
            styles: DocumentStyles::default(),
            chapters: Vec::new(),
        }
    }

    /// Set the author metadata. A blank author leaves it unset.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.author = (!author.trim().is_empty()).then_some(author);
        self
    }

    pub fn styles(mut self, styles: DocumentStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn chapter(mut self, chapter: Chapter) -> Self {
        self.chapters.push(chapter);
        self
    }

    pub fn chapters(mut self, chapters: impl IntoIterator<Item = Chapter>) -> Self {
        self.chapters.extend(chapters);
        self
    }

    pub fn build(self) -> Report {
        Report {
            title: self.title,
            author: self.author,
            styles: self.styles,
            chapters: self.chapters,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    title: String,
    author: Option<String>,
    styles: DocumentStyles,
    chapters: Vec<Chapter>,
}

impl Report {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn layout(&self) -> ReportLayout {
        paginate(&self.title, &self.chapters, &self.styles)
    }

    /// Render the report to PDF bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ExportError> {
        let layout = self.layout();
        let width = Mm(self.styles.page_width_mm);
        let height = Mm(self.styles.page_height_mm);

        let (doc, first_page, first_layer) =
            PdfDocument::new(&self.title, width, height, "Layer 1");
        let doc = match &self.author {
            Some(author) => doc.with_author(author.clone()),
            None => doc,
        };

        let mut fonts = FontCache::default();
        for (index, page) in layout.pages.iter().enumerate() {
            let (page_index, layer_index) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, "Layer 1")
            };
            let layer = doc.get_page(page_index).get_layer(layer_index);

            let lines = page.header.iter().chain(&page.body).chain(Some(&page.footer));
            for line in lines {
                let font = fonts.get(&doc, line)?;
                layer.use_text(
                    line.text.as_str(),
                    line.size_pt,
                    Mm(line.x_mm),
                    Mm(self.styles.page_height_mm - line.y_mm),
                    &font,
                );
            }
        }

        let mut buf = BufWriter::new(Vec::new());
        doc.save(&mut buf)
            .map_err(|e| ExportError::Pdf(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ExportError::Pdf(format!("PDF buffer error: {e}")))
    }

    /// Write the PDF to `path`. Fails only on serialization or I/O errors.
    pub fn write_to(&self, path: &Path) -> Result<GeneratedFile, ExportError> {
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes)?;
        tracing::info!(
            path = %path.display(),
            chapters = self.chapters.len(),
            "report written"
        );
        Ok(GeneratedFile::report(path))
    }
}

/// Standard PDF fonts registered on first use.
#[derive(Default)]
struct FontCache {
    fonts: HashMap<(FontFamily, FontStyle), IndirectFontRef>,
}

impl FontCache {
    fn get(
        &mut self,
        doc: &PdfDocumentReference,
        line: &TextLine,
    ) -> Result<IndirectFontRef, ExportError> {
        let key = (line.family, line.style);
        if let Some(font) = self.fonts.get(&key) {
            return Ok(font.clone());
        }
        let font = doc
            .add_builtin_font(builtin(line.family, line.style))
            .map_err(|e| ExportError::Pdf(format!("PDF font error: {e}")))?;
        self.fonts.insert(key, font.clone());
        Ok(font)
    }
}

fn builtin(family: FontFamily, style: FontStyle) -> BuiltinFont {
    match (family, style) {
        (FontFamily::Helvetica, FontStyle::Regular) => BuiltinFont::Helvetica,
        (FontFamily::Helvetica, FontStyle::Bold) => BuiltinFont::HelveticaBold,
        (FontFamily::Helvetica, FontStyle::Italic) => BuiltinFont::HelveticaOblique,
        (FontFamily::Times, FontStyle::Regular) => BuiltinFont::TimesRoman,
        (FontFamily::Times, FontStyle::Bold) => BuiltinFont::TimesBold,
        (FontFamily::Times, FontStyle::Italic) => BuiltinFont::TimesItalic,
        (FontFamily::Courier, FontStyle::Regular) => BuiltinFont::Courier,
        (FontFamily::Courier, FontStyle::Bold) => BuiltinFont::CourierBold,
        (FontFamily::Courier, FontStyle::Italic) => BuiltinFont::CourierOblique,
    }
}
