//! Parameterized text templates embedded in the binary.
//!
//! Templates live in `cli/templates/` and are compiled in with
//! [`include_str!`].  They are keyed `templates/<file name>`; a lookup first
//! tries `templates/<name>` and then `<name>` as given, so specifications may
//! reference either `zshrc.tmpl` or `templates/zshrc.tmpl`.
//!
//! Bodies use Handlebars syntax (`{{Key}}`, `{{~Key~}}`, `{{#if Key}}`...)
//! and render in strict mode: referencing a key the context does not define
//! is an execution error.  Output is never HTML-escaped.
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use handlebars::Handlebars;

use crate::error::TemplateError;

/// Render context: template keys mapped to their values.
pub type RenderContext = BTreeMap<String, String>;

const EMBEDDED: &[(&str, &str)] = &[
    (
        "templates/gitconfig.tmpl",
        include_str!("../templates/gitconfig.tmpl"),
    ),
    (
        "templates/profile.env.tmpl",
        include_str!("../templates/profile.env.tmpl"),
    ),
    (
        "templates/zshrc.tmpl",
        include_str!("../templates/zshrc.tmpl"),
    ),
];

static EMBEDDED_RENDERER: LazyLock<Renderer> = LazyLock::new(Renderer::embedded);

/// Shared renderer over the embedded namespace.
#[must_use]
pub fn embedded_renderer() -> &'static Renderer {
    &EMBEDDED_RENDERER
}

/// Render `name` from the embedded namespace against `context`.
///
/// # Errors
///
/// See [`Renderer::render`].
pub fn render(name: &str, context: &RenderContext) -> Result<String, TemplateError> {
    EMBEDDED_RENDERER.render(name, context)
}

/// A template namespace and the renderer over it.
///
/// Bodies that fail to compile stay in the namespace so that rendering them
/// reports [`TemplateError::Syntax`] rather than [`TemplateError::NotFound`].
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: Handlebars<'static>,
    /// Compile errors keyed by template name.
    invalid: HashMap<String, String>,
}

impl Renderer {
    /// Renderer over the templates compiled into the binary.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_entries(EMBEDDED.iter().copied())
    }

    /// Renderer over an arbitrary in-memory namespace.
    #[must_use]
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);

        let mut invalid = HashMap::new();
        for (name, body) in entries {
            if let Err(e) = registry.register_template_string(name, body) {
                invalid.insert(name.to_string(), e.to_string());
            }
        }
        Self { registry, invalid }
    }

    /// Names of every template in the namespace, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .registry
            .get_templates()
            .keys()
            .chain(self.invalid.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    fn contains(&self, name: &str) -> bool {
        self.registry.has_template(name) || self.invalid.contains_key(name)
    }

    /// Resolve `name` and render it against `context`.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::NotFound`] if neither `templates/<name>` nor `<name>` exists
    /// - [`TemplateError::Syntax`] if the template body is malformed
    /// - [`TemplateError::Execution`] if rendering fails, e.g. on an undefined key
    pub fn render(&self, name: &str, context: &RenderContext) -> Result<String, TemplateError> {
        let qualified = format!("templates/{name}");
        let key = [qualified.as_str(), name]
            .into_iter()
            .find(|candidate| self.contains(candidate))
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
            })?;

        if let Some(message) = self.invalid.get(key) {
            return Err(TemplateError::Syntax {
                name: name.to_string(),
                message: message.clone(),
            });
        }

        self.registry
            .render(key, context)
            .map_err(|e| TemplateError::Execution {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}
