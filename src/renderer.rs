//! Template renderers used for both file paths and file contents.
use crate::error::{Error, Result};
use minijinja::{Environment, UndefinedBehavior};
use serde::Deserialize;

/// Template syntax a template tree is written in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    /// `{{.name}}`, `{{range}}`, `{{define}}` actions
    #[default]
    Go,
    /// MiniJinja syntax: `{{ name }}`, `{% for %}`
    Jinja,
}

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;

    /// Reports whether `content` is a syntactically valid template.
    fn is_template(&self, content: &str) -> bool;
}

/// Converts a JSON context into a `gtmpl` value.
///
/// Objects become `gtmpl` objects, so looking up an absent key is an
/// execution error rather than `<no value>`.
fn to_gtmpl_value(value: &serde_json::Value) -> gtmpl::Value {
    use serde_json::Value as Json;
    match value {
        Json::Null => gtmpl::Value::Nil,
        Json::Bool(b) => gtmpl::Value::from(*b),
        Json::Number(n) => match (n.as_i64(), n.as_u64()) {
            (Some(i), _) => gtmpl::Value::from(i),
            (None, Some(u)) => gtmpl::Value::from(u),
            (None, None) => gtmpl::Value::from(n.as_f64().unwrap_or_default()),
        },
        Json::String(s) => gtmpl::Value::from(s.clone()),
        Json::Array(items) => gtmpl::Value::Array(items.iter().map(to_gtmpl_value).collect()),
        Json::Object(map) => gtmpl::Value::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), to_gtmpl_value(value)))
                .collect(),
        ),
    }
}

/// Renderer for Go `text/template` syntax, backed by `gtmpl`.
#[derive(Debug, Default)]
pub struct GoTemplateRenderer;

impl GoTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for GoTemplateRenderer {
    /// Renders a template string using `gtmpl`.
    ///
    /// # Errors
    /// * `Error::TemplateError` if the template fails to parse or execute
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        if !template.contains("{{") {
            return Ok(template.to_string());
        }
        gtmpl::template(template, to_gtmpl_value(context))
            .map_err(|e| Error::TemplateError(e.to_string()))
    }

    fn is_template(&self, content: &str) -> bool {
        let mut template = gtmpl::Template::default();
        template.parse(content).is_ok()
    }
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer whose undefined variables are errors.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template fails to parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }

    fn is_template(&self, content: &str) -> bool {
        let mut env = Environment::new();
        env.add_template("check", content).is_ok()
    }
}

/// Returns the renderer for the given engine.
pub fn get_renderer(engine: Engine) -> Box<dyn TemplateRenderer> {
    match engine {
        Engine::Go => Box::new(GoTemplateRenderer::new()),
        Engine::Jinja => Box::new(MiniJinjaRenderer::new()),
    }
}
