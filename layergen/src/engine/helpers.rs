//! Handlebars helpers exposed to artifact templates

use handlebars::{handlebars_helper, Handlebars};
use serde_json::Value;

use crate::case;
use crate::field_type::{self, FieldType};

/// Names under which the helpers are registered
pub const NAMES: &[&str] = &[
    "to_lower",
    "to_upper",
    "to_title",
    "to_camel",
    "to_pascal",
    "to_snake",
    "to_kebab",
    "pluralize",
    "singularize",
    "join",
    "replace",
    "contains",
    "has_prefix",
    "has_suffix",
    "trim",
    "split",
    "repeat",
    "indent",
    "quote",
    "backquote",
    "inc",
    "rust_type",
    "sql_type",
    "serde_attr",
    "sqlx_attr",
];

handlebars_helper!(to_lower: |s: str| s.to_lowercase());
handlebars_helper!(to_upper: |s: str| s.to_uppercase());
handlebars_helper!(to_title: |s: str| case::to_title_case(s));
handlebars_helper!(to_camel: |s: str| case::to_camel_case(s));
handlebars_helper!(to_pascal: |s: str| case::to_pascal_case(s));
handlebars_helper!(to_snake: |s: str| case::to_snake_case(s));
handlebars_helper!(to_kebab: |s: str| case::to_kebab_case(s));
handlebars_helper!(pluralize: |s: str| case::pluralize(s));
handlebars_helper!(singularize: |s: str| case::singularize(s));

handlebars_helper!(join: |items: array, sep: str| {
    items.iter().map(plain_text).collect::<Vec<_>>().join(sep)
});
handlebars_helper!(replace: |s: str, from: str, to: str| s.replace(from, to));
handlebars_helper!(contains: |s: str, needle: str| s.contains(needle));
handlebars_helper!(has_prefix: |s: str, prefix: str| s.starts_with(prefix));
handlebars_helper!(has_suffix: |s: str, suffix: str| s.ends_with(suffix));
handlebars_helper!(trim: |s: str| s.trim().to_string());
handlebars_helper!(split: |s: str, sep: str| {
    s.split(sep).map(str::to_string).collect::<Vec<_>>()
});
handlebars_helper!(repeat: |s: str, count: u64| {
    s.repeat(usize::try_from(count).unwrap_or(0))
});
handlebars_helper!(indent: |spaces: u64, s: str| indent_lines(spaces, s));
handlebars_helper!(quote: |s: str| format!("{s:?}"));
handlebars_helper!(backquote: |s: str| format!("`{s}`"));
handlebars_helper!(inc: |n: u64| n.saturating_add(1));

handlebars_helper!(rust_type: |tag: str, required: bool| {
    field_type::rust_type(&FieldType::parse(tag), required)
});
handlebars_helper!(sql_type: |tag: str, length: u64| {
    FieldType::parse(tag).sql_type(u32::try_from(length).ok())
});
handlebars_helper!(serde_attr: |name: str, required: bool| {
    field_type::serde_attr(name, required)
});
handlebars_helper!(sqlx_attr: |name: str| field_type::sqlx_attr(name));

/// Register every helper in [`NAMES`] on `registry`
pub fn register(registry: &mut Handlebars<'static>) {
    registry.register_helper("to_lower", Box::new(to_lower));
    registry.register_helper("to_upper", Box::new(to_upper));
    registry.register_helper("to_title", Box::new(to_title));
    registry.register_helper("to_camel", Box::new(to_camel));
    registry.register_helper("to_pascal", Box::new(to_pascal));
    registry.register_helper("to_snake", Box::new(to_snake));
    registry.register_helper("to_kebab", Box::new(to_kebab));
    registry.register_helper("pluralize", Box::new(pluralize));
    registry.register_helper("singularize", Box::new(singularize));
    registry.register_helper("join", Box::new(join));
    registry.register_helper("replace", Box::new(replace));
    registry.register_helper("contains", Box::new(contains));
    registry.register_helper("has_prefix", Box::new(has_prefix));
    registry.register_helper("has_suffix", Box::new(has_suffix));
    registry.register_helper("trim", Box::new(trim));
    registry.register_helper("split", Box::new(split));
    registry.register_helper("repeat", Box::new(repeat));
    registry.register_helper("indent", Box::new(indent));
    registry.register_helper("quote", Box::new(quote));
    registry.register_helper("backquote", Box::new(backquote));
    registry.register_helper("inc", Box::new(inc));
    registry.register_helper("rust_type", Box::new(rust_type));
    registry.register_helper("sql_type", Box::new(sql_type));
    registry.register_helper("serde_attr", Box::new(serde_attr));
    registry.register_helper("sqlx_attr", Box::new(sqlx_attr));
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Prefix every non-empty line with `spaces` spaces
fn indent_lines(spaces: u64, s: &str) -> String {
    let pad = " ".repeat(usize::try_from(spaces).unwrap_or(0));
    s.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent_lines(4, "a\n\nb"), "    a\n\n    b");
        assert_eq!(indent_lines(0, "a"), "a");
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text(&Value::from("x")), "x");
        assert_eq!(plain_text(&Value::from(3)), "3");
        assert_eq!(plain_text(&Value::Null), "");
    }
}
