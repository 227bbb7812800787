use serde::Serialize;

use crate::error::CoreError;
use crate::schema::column;

use super::scalar::Scalar;

/// One spreadsheet record: a student and their three scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRow {
    pub student_name: String,
    pub math_score: Scalar,
    pub physics_score: Scalar,
    pub chemistry_score: Scalar,
}

impl StudentRow {
    pub fn new(
        student_name: impl Into<String>,
        math_score: impl Into<Scalar>,
        physics_score: impl Into<Scalar>,
        chemistry_score: impl Into<Scalar>,
    ) -> Self {
        Self {
            student_name: student_name.into(),
            math_score: math_score.into(),
            physics_score: physics_score.into(),
            chemistry_score: chemistry_score.into(),
        }
    }

    /// Build a row by looking each required column up by header name.
    ///
    /// `lookup` returns `None` when the column does not exist at all and
    /// `Some(Scalar::Empty)` for a blank cell.
    pub fn from_columns<F>(mut lookup: F) -> Result<Self, CoreError>
    where
        F: FnMut(&str) -> Option<Scalar>,
    {
        let mut take = |name: &str| {
            lookup(name).ok_or_else(|| CoreError::MissingField(name.to_string()))
        };

        let student_name = match take(column::STUDENT_NAME)? {
            Scalar::Text(s) => s.trim().to_string(),
            other => other.to_string(),
        };

        Ok(Self {
            student_name,
            math_score: take(column::MATH)?,
            physics_score: take(column::PHYSICS)?,
            chemistry_score: take(column::CHEMISTRY)?,
        })
    }
}
