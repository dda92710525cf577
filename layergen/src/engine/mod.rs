//! Template rendering engine
//!
//! Templates are Handlebars documents rendered against a serializable
//! context. The registry is configured once by [`FunctionTable::new`]:
//!
//! - no HTML escaping (the output is source code, not markup)
//! - strict mode, so a reference to a missing context field fails at the
//!   execute stage instead of rendering as an empty string
//! - the helper library listed in [`FunctionTable::names`]
//!
//! # Example
//!
//! ```
//! use layergen::engine::{render, FunctionTable};
//! use serde_json::json;
//!
//! let functions = FunctionTable::new();
//! let out = render(
//!     "pub struct {{to_pascal name}};",
//!     &json!({ "name": "user_profile" }),
//!     &functions,
//! )
//! .unwrap();
//! assert_eq!(out, "pub struct UserProfile;");
//! ```

mod helpers;

use std::fmt;

use handlebars::{Handlebars, Template};
use serde::Serialize;

use crate::error::TemplateError;

/// Name reported for templates rendered through [`render`]
pub const INLINE_TEMPLATE: &str = "inline";

/// Helper library bound to a configured Handlebars registry
///
/// Immutable once built; share it by reference.
pub struct FunctionTable {
    registry: Handlebars<'static>,
}

impl FunctionTable {
    /// Build the registry and register every helper
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);
        helpers::register(&mut registry);
        Self { registry }
    }

    /// Names of the registered helpers
    #[must_use]
    pub fn names(&self) -> &'static [&'static str] {
        helpers::NAMES
    }

    /// Whether a helper is registered under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        helpers::NAMES.contains(&name)
    }

    /// Pre-parse a named template set against this table
    ///
    /// # Errors
    ///
    /// Returns a parse-stage [`TemplateError`] naming the first template that
    /// does not parse.
    pub fn compile<'a, I>(self, templates: I) -> Result<CompiledTemplates, TemplateError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut registry = self.registry;
        let mut names = Vec::new();
        for (name, body) in templates {
            registry
                .register_template_string(name, body)
                .map_err(|e| TemplateError::parse(name, e))?;
            names.push(name.to_string());
        }
        Ok(CompiledTemplates { registry, names })
    }
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FunctionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionTable")
            .field("helpers", &helpers::NAMES.len())
            .finish()
    }
}

/// Parse `body` and render it against `context`
///
/// Each call parses independently and renders into its own buffer.
///
/// # Errors
///
/// Returns a [`TemplateError`] at the parse stage when `body` is malformed
/// and at the execute stage when rendering fails (missing field, helper
/// misuse).
pub fn render<C>(body: &str, context: &C, functions: &FunctionTable) -> Result<String, TemplateError>
where
    C: Serialize,
{
    Template::compile(body).map_err(|e| TemplateError::parse(INLINE_TEMPLATE, e))?;
    functions
        .registry
        .render_template(body, context)
        .map_err(|e| TemplateError::execute(INLINE_TEMPLATE, e))
}

/// A named template set parsed once for repeated rendering
pub struct CompiledTemplates {
    registry: Handlebars<'static>,
    names: Vec<String>,
}

impl CompiledTemplates {
    /// Render the template registered under `name`
    ///
    /// # Errors
    ///
    /// Returns an execute-stage [`TemplateError`] when the template is
    /// unknown or rendering fails.
    pub fn render<C>(&self, name: &str, context: &C) -> Result<String, TemplateError>
    where
        C: Serialize,
    {
        if !self.registry.has_template(name) {
            return Err(TemplateError::execute(name, "template is not registered"));
        }
        self.registry
            .render(name, context)
            .map_err(|e| TemplateError::execute(name, e))
    }

    /// Registered template names, in registration order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl fmt::Debug for CompiledTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplates")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TemplateStage;
    use serde_json::json;

    fn render_str(body: &str, context: &serde_json::Value) -> Result<String, TemplateError> {
        render(body, context, &FunctionTable::new())
    }

    #[test]
    fn test_case_helpers() {
        let ctx = json!({ "name": "user_profile" });
        assert_eq!(render_str("{{to_camel name}}", &ctx).unwrap(), "userProfile");
        assert_eq!(render_str("{{to_pascal name}}", &ctx).unwrap(), "UserProfile");
        assert_eq!(render_str("{{to_kebab name}}", &ctx).unwrap(), "user-profile");
        assert_eq!(render_str("{{to_upper name}}", &ctx).unwrap(), "USER_PROFILE");
        assert_eq!(render_str("{{to_title name}}", &ctx).unwrap(), "User Profile");
        assert_eq!(render_str("{{pluralize \"category\"}}", &ctx).unwrap(), "categories");
    }

    #[test]
    fn test_string_helpers() {
        let ctx = json!({ "items": ["a", "b", "c"], "text": "  padded  " });
        assert_eq!(render_str("{{join items \", \"}}", &ctx).unwrap(), "a, b, c");
        assert_eq!(render_str("[{{trim text}}]", &ctx).unwrap(), "[padded]");
        assert_eq!(render_str("{{repeat \"ab\" 3}}", &ctx).unwrap(), "ababab");
        assert_eq!(render_str("{{replace \"a-b\" \"-\" \"_\"}}", &ctx).unwrap(), "a_b");
        assert_eq!(render_str("{{quote \"hi\"}}", &ctx).unwrap(), "\"hi\"");
        assert_eq!(render_str("{{backquote \"x\"}}", &ctx).unwrap(), "`x`");
        assert_eq!(render_str("{{indent 2 \"x\"}}", &ctx).unwrap(), "  x");
        assert_eq!(render_str("{{inc 4}}", &ctx).unwrap(), "5");
    }

    #[test]
    fn test_path_expression_reaches_field_shadowed_by_helper() {
        let ctx = json!({ "fields": [{ "rust_type": "Option<i64>", "sql_type": "BIGINT" }] });
        let out = render_str(
            "{{#each fields}}{{this.rust_type}} {{this.sql_type}}{{/each}}",
            &ctx,
        )
        .unwrap();
        assert_eq!(out, "Option<i64> BIGINT");

        // A bare name resolves to the helper, which then lacks its arguments
        let err = render_str("{{#each fields}}{{rust_type}}{{/each}}", &ctx).unwrap_err();
        assert_eq!(err.stage, TemplateStage::Execute);
    }

    #[test]
    fn test_predicate_helpers_drive_conditionals() {
        let ctx = json!({ "name": "created_at" });
        let body = "{{#if (has_suffix name \"_at\")}}time{{else}}other{{/if}}";
        assert_eq!(render_str(body, &ctx).unwrap(), "time");
        let body = "{{#if (contains name \"zzz\")}}yes{{else}}no{{/if}}";
        assert_eq!(render_str(body, &ctx).unwrap(), "no");
    }

    #[test]
    fn test_type_helpers() {
        let ctx = json!({});
        assert_eq!(render_str("{{rust_type \"int\" false}}", &ctx).unwrap(), "Option<i32>");
        assert_eq!(render_str("{{sql_type \"string\" 80}}", &ctx).unwrap(), "VARCHAR(80)");
        assert_eq!(
            render_str("{{sqlx_attr \"firstName\"}}", &ctx).unwrap(),
            "#[sqlx(rename = \"first_name\")]"
        );
    }

    #[test]
    fn test_no_html_escaping() {
        let ctx = json!({ "ty": "Option<DateTime<Utc>>" });
        assert_eq!(render_str("{{ty}}", &ctx).unwrap(), "Option<DateTime<Utc>>");
    }

    #[test]
    fn test_parse_failure_is_parse_stage() {
        let err = render_str("{{#if x}}unterminated", &json!({ "x": true })).unwrap_err();
        assert_eq!(err.stage, TemplateStage::Parse);
        assert_eq!(err.template, INLINE_TEMPLATE);
    }

    #[test]
    fn test_missing_field_is_execute_stage() {
        let err = render_str("{{missing}}", &json!({})).unwrap_err();
        assert_eq!(err.stage, TemplateStage::Execute);
    }

    #[test]
    fn test_function_table_lists_helpers() {
        let functions = FunctionTable::new();
        assert!(functions.contains("to_snake"));
        assert!(functions.contains("serde_attr"));
        assert!(!functions.contains("go_type"));
        assert_eq!(functions.names().len(), helpers::NAMES.len());
    }

    #[test]
    fn test_compiled_templates() {
        let compiled = FunctionTable::new()
            .compile([("greeting", "Hello {{to_pascal name}}")])
            .unwrap();
        assert_eq!(compiled.names(), ["greeting".to_string()]);
        let out = compiled.render("greeting", &json!({ "name": "team_lead" })).unwrap();
        assert_eq!(out, "Hello TeamLead");

        let err = compiled.render("farewell", &json!({})).unwrap_err();
        assert_eq!(err.stage, TemplateStage::Execute);
        assert_eq!(err.template, "farewell");
    }

    #[test]
    fn test_compile_reports_failing_template() {
        let err = FunctionTable::new()
            .compile([("good", "{{a}}"), ("bad", "{{#each a}}")])
            .unwrap_err();
        assert_eq!(err.template, "bad");
        assert_eq!(err.stage, TemplateStage::Parse);
    }

    #[test]
    fn test_function_table_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FunctionTable>();
        assert_send_sync::<CompiledTemplates>();
    }
}
