use tera::{Context, Tera};

use easyflow_core::models::context::RenderContext;

use crate::error::{tera_message, ExportError};

/// A set of named Tera templates compiled once and rendered per row.
///
/// Template names ending in `.xml` are auto-escaped, so bound values can
/// never break the surrounding markup.
pub struct TemplateSet {
    tera: Tera,
}

impl TemplateSet {
    pub fn compile<N, C>(sources: &[(N, C)]) -> Result<Self, ExportError>
    where
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let mut tera = Tera::default();
        tera.add_raw_templates(
            sources
                .iter()
                .map(|(name, content)| (name.as_ref(), content.as_ref())),
        )
        .map_err(|e| ExportError::TemplateParse(tera_message(&e)))?;
        Ok(Self { tera })
    }

    /// Render one template. A placeholder with no binding in `ctx` is an
    /// error rather than an empty string.
    pub fn render(&self, name: &str, ctx: &RenderContext) -> Result<String, ExportError> {
        let context = Context::from_value(ctx.to_json()?)
            .map_err(|e| ExportError::Render(e.to_string()))?;
        Ok(self.tera.render(name, &context)?)
    }
}
