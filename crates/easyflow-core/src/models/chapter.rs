use serde::{Deserialize, Serialize};

use super::row::StudentRow;

pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_SIZE: f32 = 12.0;

/// One section of the summary report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub body: String,
    pub font: String,
    /// Font size in points.
    pub size: f32,
}

impl Chapter {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            font: DEFAULT_FONT.to_string(),
            size: DEFAULT_SIZE,
        }
    }

    pub fn with_font(mut self, font: impl Into<String>, size: f32) -> Self {
        self.font = font.into();
        self.size = size;
        self
    }

    /// The summary chapter for a student: titled with their name, one line
    /// per subject.
    pub fn for_row(row: &StudentRow) -> Self {
        Self::new(
            row.student_name.clone(),
            format!(
                "Mat: {}\nFis: {}\nQui: {}",
                row.math_score, row.physics_score, row.chemistry_score
            ),
        )
    }
}
