//! Prompt templates for Skisse.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory. The default templates ask for the Simon Sinek rhetorical style
//! the tool was built around.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Prompts {
    pub outline: OutlinePrompts,
    pub elaboration: ElaborationPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}

/// Prompts for chunked outline extraction.
///
/// The user template must keep the `{{start}}` placeholder: it carries the
/// running point count that keeps numbering contiguous across chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlinePrompts {
    pub system: String,
    pub user: String,
}

impl Default for OutlinePrompts {
    fn default() -> Self {
        Self {
            system: "You are a helpful assistant that analyzes content in Simon Sinek's style."
                .to_string(),
            user: "Starting from point {{start}}, analyze this text and extract main points \
                   and sub-points. Number main points like \"1.\" and sub-points like \"1.1\":\n\n{{chunk}}"
                .to_string(),
        }
    }
}

/// Prompts for per-point elaboration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ElaborationPrompts {
    pub system: String,
    pub user: String,
}

impl Default for ElaborationPrompts {
    fn default() -> Self {
        Self {
            system: "You are Simon Sinek, explaining concepts in your characteristic style."
                .to_string(),
            user: "Elaborate on this point and its sub-points in your style:\n\n\
                   Main point: {{main_point}}\nSub-points: {{sub_points}}"
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts with an optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let outline_path = custom_path.join("outline.toml");
            if outline_path.exists() {
                let content = std::fs::read_to_string(&outline_path)?;
                prompts.outline = toml::from_str(&content)?;
            }

            let elaboration_path = custom_path.join("elaboration.toml");
            if elaboration_path.exists() {
                let content = std::fs::read_to_string(&elaboration_path)?;
                prompts.elaboration = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a template with both provided and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(prompts.outline.user.contains("{{start}}"));
        assert!(prompts.outline.user.contains("{{chunk}}"));
        assert!(prompts.elaboration.user.contains("{{main_point}}"));
    }

    #[test]
    fn test_render_template() {
        let mut vars = std::collections::HashMap::new();
        vars.insert("start".to_string(), "4".to_string());
        vars.insert("chunk".to_string(), "some text".to_string());

        let rendered = Prompts::render(&OutlinePrompts::default().user, &vars);
        assert!(rendered.contains("Starting from point 4"));
        assert!(rendered.ends_with("some text"));
    }

    #[test]
    fn test_custom_variables_do_not_override_provided() {
        let mut prompts = Prompts::default();
        prompts
            .variables
            .insert("name".to_string(), "config".to_string());

        let mut vars = std::collections::HashMap::new();
        vars.insert("name".to_string(), "call-site".to_string());

        assert_eq!(
            prompts.render_with_custom("hello {{name}}", &vars),
            "hello call-site"
        );
    }
}
