//! List the paths an entity name would generate

use layergen::generator::{list_artifact_paths, list_generated_paths};

/// `layergen paths`
pub struct PathsCommand {
    entity_name: String,
    include_migrations: bool,
}

impl PathsCommand {
    /// Paths for `entity_name`; migrations only when `include_migrations`
    pub const fn new(entity_name: String, include_migrations: bool) -> Self {
        Self {
            entity_name,
            include_migrations,
        }
    }

    /// The paths this command prints
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        if self.include_migrations {
            list_artifact_paths(&self.entity_name)
        } else {
            list_generated_paths(&self.entity_name)
        }
    }

    /// Run the command
    pub fn execute(&self) {
        for path in self.paths() {
            println!("{path}");
        }
    }
}
