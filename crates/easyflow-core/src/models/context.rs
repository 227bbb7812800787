use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::schema::placeholder;

use super::row::StudentRow;
use super::scalar::Scalar;
use super::sender::SenderIdentity;

/// Template variable bindings for a single rendered document.
///
/// Built fresh per row; nothing is shared between rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: BTreeMap<String, Scalar>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_row(row: &StudentRow, date: &str, sender: Option<&SenderIdentity>) -> Self {
        let mut ctx = Self::new();
        ctx.insert(placeholder::STUDENT_NAME, row.student_name.as_str());
        ctx.insert(placeholder::MATH, row.math_score.clone());
        ctx.insert(placeholder::PHYSICS, row.physics_score.clone());
        ctx.insert(placeholder::CHEMISTRY, row.chemistry_score.clone());
        ctx.insert(placeholder::DATE, date);

        // Sender fields are always bound so templates may use them freely;
        // without a configured sender they render blank.
        match sender {
            Some(sender) => {
                ctx.insert(placeholder::SENDER_NAME, sender.name.as_str());
                ctx.insert(placeholder::SENDER_PHONE, sender.phone.as_str());
                ctx.insert(placeholder::SENDER_EMAIL, sender.email.as_str());
            }
            None => {
                for key in [
                    placeholder::SENDER_NAME,
                    placeholder::SENDER_PHONE,
                    placeholder::SENDER_EMAIL,
                ] {
                    ctx.insert(key, Scalar::Empty);
                }
            }
        }

        ctx
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bindings as a JSON object, ready for a template engine.
    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        Ok(serde_json::to_value(self)?)
    }
}
