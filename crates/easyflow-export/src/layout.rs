//! Pagination of the summary report.
//!
//! Pure geometry: decides which line goes on which page and where, without
//! touching a PDF. Coordinates are millimetres from the top-left corner;
//! `y_mm` is the text baseline.

use easyflow_core::models::chapter::Chapter;

use crate::styles::DocumentStyles;

const PT_TO_MM: f32 = 0.352_778;

// Baseline sits this far down a line box.
const BASELINE_RATIO: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Helvetica,
    Times,
    Courier,
}

impl FontFamily {
    /// Map a requested font name onto one of the standard PDF faces.
    /// Anything unrecognised (Arial included) is Helvetica.
    pub fn from_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("courier") {
            FontFamily::Courier
        } else if name.contains("times") {
            FontFamily::Times
        } else {
            FontFamily::Helvetica
        }
    }

    /// Average glyph advance as a fraction of the font size.
    fn average_advance(self) -> f32 {
        match self {
            FontFamily::Courier => 0.6,
            FontFamily::Helvetica => 0.5,
            FontFamily::Times => 0.45,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub family: FontFamily,
    pub style: FontStyle,
    pub size_pt: f32,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    /// 1-based page number.
    pub number: usize,
    pub header: Option<TextLine>,
    pub footer: TextLine,
    pub body: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<PageLayout>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn footers(&self) -> Vec<&str> {
        self.pages.iter().map(|p| p.footer.text.as_str()).collect()
    }
}

pub fn footer_text(page: usize) -> String {
    format!("Página {page}")
}

/// Approximate rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, family: FontFamily, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * family.average_advance() * PT_TO_MM
}

/// Lay out the report. Each chapter starts on a new page with a title
/// block followed by its body; text that overflows a page continues on the
/// next one. A report without chapters still has one page.
pub fn paginate(title: &str, chapters: &[Chapter], styles: &DocumentStyles) -> ReportLayout {
    let mut pager = Pager::new(title, styles);

    for (index, chapter) in chapters.iter().enumerate() {
        if index > 0 {
            pager.new_page();
        }

        let family = FontFamily::from_name(&chapter.font);
        for line in wrap_text(&chapter.title, pager.max_chars(family, chapter.size)) {
            pager.place(line, family, FontStyle::Bold, chapter.size);
        }
        pager.y += styles.title_gap_mm;

        for paragraph in chapter.body.lines() {
            for line in wrap_text(paragraph, pager.max_chars(family, chapter.size)) {
                pager.place(line, family, FontStyle::Regular, chapter.size);
            }
        }
        pager.y += styles.line_height_mm;
    }

    pager.finish()
}

struct Pager<'a> {
    title: &'a str,
    styles: &'a DocumentStyles,
    pages: Vec<PageLayout>,
    y: f32,
}

impl<'a> Pager<'a> {
    fn new(title: &'a str, styles: &'a DocumentStyles) -> Self {
        let mut pager = Self {
            title,
            styles,
            pages: Vec::new(),
            y: 0.0,
        };
        pager.new_page();
        pager
    }

    fn new_page(&mut self) {
        let s = self.styles;
        let number = self.pages.len() + 1;
        let header_family = FontFamily::from_name(&s.header_font);

        let header = (!self.title.is_empty()).then(|| {
            self.centered(
                self.title.to_string(),
                header_family,
                FontStyle::Bold,
                s.header_size,
                s.margin_mm + s.line_height_mm * BASELINE_RATIO,
            )
        });

        let footer = self.centered(
            footer_text(number),
            header_family,
            FontStyle::Italic,
            s.footer_size,
            s.page_height_mm - s.footer_offset_mm + s.line_height_mm / 2.0,
        );

        self.pages.push(PageLayout {
            number,
            header,
            footer,
            body: Vec::new(),
        });
        self.y = s.margin_mm + s.line_height_mm;
    }

    fn centered(
        &self,
        text: String,
        family: FontFamily,
        style: FontStyle,
        size_pt: f32,
        y_mm: f32,
    ) -> TextLine {
        let width = text_width_mm(&text, family, size_pt);
        let x_mm = ((self.styles.page_width_mm - width) / 2.0).max(self.styles.margin_mm);
        TextLine {
            text,
            family,
            style,
            size_pt,
            x_mm,
            y_mm,
        }
    }

    fn max_chars(&self, family: FontFamily, size_pt: f32) -> usize {
        let per_char = size_pt * family.average_advance() * PT_TO_MM;
        if per_char <= 0.0 {
            return usize::MAX;
        }
        ((self.styles.content_width_mm() / per_char) as usize).max(1)
    }

    fn place(&mut self, text: String, family: FontFamily, style: FontStyle, size_pt: f32) {
        let line_height = self.styles.line_height_mm;
        if self.y + line_height > self.styles.content_bottom_mm() {
            self.new_page();
        }

        let line = TextLine {
            text,
            family,
            style,
            size_pt,
            x_mm: self.styles.margin_mm,
            y_mm: self.y + line_height * BASELINE_RATIO,
        };
        if let Some(page) = self.pages.last_mut() {
            page.body.push(line);
        }
        self.y += line_height;
    }

    fn finish(self) -> ReportLayout {
        ReportLayout { pages: self.pages }
    }
}

/// Greedy word wrap to at most `max_chars` characters per line. Words
/// longer than a line are split. An empty paragraph yields one empty line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let tail = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = tail;
        }

        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
