//! Generate every entity of a project

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use layergen::context::GenerationOptions;

use super::{load_service, report_written};

/// `layergen project`
pub struct ProjectCommand {
    manifest: PathBuf,
    project_id: i64,
    output: PathBuf,
    options: GenerationOptions,
}

impl ProjectCommand {
    /// Generate all entities of `project_id` into `output`
    pub const fn new(
        manifest: PathBuf,
        project_id: i64,
        output: PathBuf,
        options: GenerationOptions,
    ) -> Self {
        Self {
            manifest,
            project_id,
            output,
            options,
        }
    }

    /// Run the command
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be loaded, the project is empty, any
    /// entity fails to generate, or any file cannot be written.
    pub fn execute(&self) -> Result<()> {
        let service = load_service(&self.manifest, self.options.clone())?;

        println!(
            "\n{} {} {}",
            style("Generating project").cyan().bold(),
            style(self.project_id).green().bold(),
            style("...").cyan().bold()
        );

        let response = service
            .generate_project(self.project_id, Some(&self.output))
            .with_context(|| format!("Failed to generate project {}", self.project_id))?;

        report_written(&response, &self.output)
    }
}
