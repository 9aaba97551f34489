//! Template-driven rendering.

use std::fs;
use std::path::Path;

use handlebars::{
    no_escape, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
    RenderErrorReason,
};
use tracing::{debug, info};

use specdoc_spec::Document;

use crate::context::document_context;
use crate::error::{TemplateError, TemplateResult};
use crate::renderer::Renderer;

/// Renders a document through a user-supplied Handlebars template.
///
/// The template sees the documentation context (`module`, `description`,
/// `options`, `return_values`, ...). Strict mode is on: referencing a value
/// that does not exist is an error rather than empty output.
pub struct TemplatedRender {
    handlebars: Handlebars<'static>,
    name: String,
}

impl TemplatedRender {
    /// Compile a template from source text.
    pub fn from_source(name: impl Into<String>, source: &str) -> TemplateResult<Self> {
        let name = name.into();
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);
        Self::register_helpers(&mut handlebars);

        handlebars
            .register_template_string(&name, source)
            .map_err(|e| {
                let (line, column) = e.pos().map_or((None, None), |(l, c)| (Some(l), Some(c)));
                TemplateError::Syntax {
                    template: name.clone(),
                    line,
                    column,
                    message: e.reason().to_string(),
                }
            })?;

        debug!("Compiled template {}", name);
        Ok(Self { handlebars, name })
    }

    /// Load and compile a template file.
    pub fn from_file(path: impl AsRef<Path>) -> TemplateResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TemplateError::NotFound(path.to_path_buf()));
        }

        let source = fs::read_to_string(path)?;
        info!("Loaded template {:?}", path);
        Self::from_source(path.display().to_string(), &source)
    }

    fn register_helpers(hb: &mut Handlebars) {
        hb.register_helper("format_json", Box::new(format_json_helper));
        hb.register_helper("to_yaml", Box::new(to_yaml_helper));
        hb.register_helper("join", Box::new(join_helper));
    }
}

impl Renderer for TemplatedRender {
    fn render(&self, document: &Document) -> TemplateResult<String> {
        let context = document_context(document)?;

        self.handlebars
            .render(&self.name, &context)
            .map_err(|e| TemplateError::RenderingFailed {
                template: self.name.clone(),
                line: e.line_no,
                column: e.column_no,
                message: e.reason().to_string(),
            })
    }
}

// ===== Helper Functions =====

fn format_json_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("format_json", 0))?;

    let json = serde_json::to_string_pretty(value.value())
        .map_err(|e| RenderErrorReason::Other(e.to_string()))?;
    out.write(&json)?;
    Ok(())
}

fn to_yaml_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let value = h
        .param(0)
        .ok_or(RenderErrorReason::ParamNotFoundForIndex("to_yaml", 0))?;

    let yaml = serde_yaml::to_string(value.value())
        .map_err(|e| RenderErrorReason::Other(e.to_string()))?;
    out.write(yaml.trim_end())?;
    Ok(())
}

fn join_helper(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let array = h.param(0).and_then(|v| v.value().as_array());

    let separator = h
        .param(1)
        .and_then(|v| v.value().as_str())
        .unwrap_or(", ");

    if let Some(arr) = array {
        let strings: Vec<String> = arr
            .iter()
            .map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            })
            .collect();
        out.write(&strings.join(separator))?;
    }

    Ok(())
}
