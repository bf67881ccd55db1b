//! Page template engine.
//!
//! Loads every `.jinja` file under `templates/` once and renders pages
//! through a process-wide environment.

use minijinja::{Environment, Value};
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the project root
const TEMPLATE_DIR: &str = "templates";

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    let template_path = Path::new(TEMPLATE_DIR);
    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "jinja") {
                // Create template name from relative path
                if let Ok(relative) = path.strip_prefix(base_path) {
                    let template_name = relative.to_string_lossy().replace('\\', "/");
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        // Convert to 'static str by leaking (safe for long-lived templates)
                        let static_name: &'static str =
                            Box::leak(template_name.clone().into_boxed_str());
                        let static_content: &'static str = Box::leak(content.into_boxed_str());
                        if let Err(e) = env.add_template(static_name, static_content) {
                            tracing::warn!("Failed to load template {}: {}", template_name, e);
                        } else {
                            tracing::debug!("Loaded template: {}", template_name);
                        }
                    }
                }
            }
        }
    }
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Load the environment eagerly at startup; returns the number of templates.
pub fn init() -> usize {
    get_environment().templates().count()
}

/// Render a page template with the given context.
///
/// `template_name` is the path relative to `templates/`
/// (e.g. "products/list.jinja").
pub fn render(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let env = get_environment();

    let template = env
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[allow(dead_code)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_missing_template() {
        let result = render("definitely_not_a_real_template.jinja", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_page_templates_loaded() {
        // Tests run from the crate root, where templates/ lives
        assert!(template_exists("base.jinja"));
        assert!(template_exists("products/list.jinja"));
        assert!(template_exists("error.jinja"));
    }

    #[test]
    fn test_render_error_page() {
        let body = render(
            "error.jinja",
            context! { status => 404u16, message => "Product 7 not found" },
        )
        .unwrap();
        assert!(body.contains("404"));
        assert!(body.contains("Product 7 not found"));
    }
}
