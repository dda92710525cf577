//! Built-in artifact templates
//!
//! Handlebars bodies rendered against a
//! [`GenerationContext`](crate::context::GenerationContext). Generated code
//! targets axum, sqlx (PostgreSQL), serde and validator; migrations are
//! PostgreSQL DDL.

mod layers;
mod migrations;

pub use layers::{DTO, HANDLER, MODEL, REPOSITORY, SERVICE};
pub use migrations::{MIGRATION_DOWN, MIGRATION_UP};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FunctionTable;

    #[test]
    fn test_builtin_templates_parse() {
        let compiled = FunctionTable::new()
            .compile([
                ("model", MODEL),
                ("repository", REPOSITORY),
                ("service", SERVICE),
                ("handler", HANDLER),
                ("dto", DTO),
                ("migration-up", MIGRATION_UP),
                ("migration-down", MIGRATION_DOWN),
            ])
            .unwrap();
        assert_eq!(compiled.names().len(), 7);
    }
}
