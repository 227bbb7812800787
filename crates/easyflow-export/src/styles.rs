use serde::{Deserialize, Serialize};

/// Page geometry and running header/footer styling for the summary report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStyles {
    /// Page width in millimetres.
    pub page_width_mm: f32,

    /// Page height in millimetres.
    pub page_height_mm: f32,

    /// Left, right and top margin in millimetres.
    pub margin_mm: f32,

    /// Content stops this far above the bottom edge; further lines move
    /// to the next page.
    pub bottom_margin_mm: f32,

    /// Height of one text line (title, body, header, footer) in millimetres.
    pub line_height_mm: f32,

    /// Vertical gap between a chapter title and its body.
    pub title_gap_mm: f32,

    /// Font for the running header and footer.
    pub header_font: String,

    /// Header (document title) size in points.
    pub header_size: f32,

    /// Footer (page number) size in points.
    pub footer_size: f32,

    /// Distance of the footer line from the bottom edge.
    pub footer_offset_mm: f32,
}

impl Default for DocumentStyles {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_mm: 10.0,
            bottom_margin_mm: 20.0,
            line_height_mm: 10.0,
            title_gap_mm: 10.0,
            header_font: "Arial".to_string(),
            header_size: 12.0,
            footer_size: 8.0,
            footer_offset_mm: 15.0,
        }
    }
}

impl DocumentStyles {
    pub fn content_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    /// Lowest y (from the top edge) a body line may end at.
    pub fn content_bottom_mm(&self) -> f32 {
        self.page_height_mm - self.bottom_margin_mm
    }
}
