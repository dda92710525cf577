//! Print the field type mapping table

use console::style;
use layergen::field_type::FieldType;

/// `layergen types`
pub struct TypesCommand;

impl TypesCommand {
    /// One `(tag, rust, sql)` row per recognised type
    #[must_use]
    pub fn rows() -> Vec<(String, String, String)> {
        FieldType::KNOWN
            .iter()
            .map(|ty| {
                (
                    ty.tag().to_string(),
                    ty.rust_type().to_string(),
                    ty.sql_type(None),
                )
            })
            .collect()
    }

    /// Run the command
    pub fn execute() {
        println!(
            "{:<12} {:<16} {}",
            style("TYPE").bold(),
            style("RUST").bold(),
            style("SQL").bold()
        );
        for (tag, rust, sql) in Self::rows() {
            println!("{tag:<12} {rust:<16} {sql}");
        }
        println!(
            "\n{} Unrecognised types map like {}; optional fields become {}.",
            style("note:").yellow(),
            style("string").cyan(),
            style("Option<T>").cyan()
        );
    }
}
