//! Generate the artifacts of one entity
//!
//! # Example
//!
//! ```bash
//! layergen generate --manifest schema.json --entity 3 --output ./src
//! layergen generate --manifest schema.json --entity 3 --layer model --layer migration-up
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use layergen::context::GenerationOptions;
use layergen::generator::ArtifactKind;

use super::{load_service, report_written};

/// `layergen generate`
pub struct GenerateCommand {
    manifest: PathBuf,
    entity_id: i64,
    output: PathBuf,
    layers: Vec<ArtifactKind>,
    dry_run: bool,
    options: GenerationOptions,
}

impl GenerateCommand {
    /// Generate every layer of `entity_id` into `output`
    pub const fn new(
        manifest: PathBuf,
        entity_id: i64,
        output: PathBuf,
        options: GenerationOptions,
    ) -> Self {
        Self {
            manifest,
            entity_id,
            output,
            layers: Vec::new(),
            dry_run: false,
            options,
        }
    }

    /// Restrict generation to these layers; empty means all
    #[must_use]
    pub fn with_layers(mut self, layers: Vec<ArtifactKind>) -> Self {
        self.layers = layers;
        self
    }

    /// Render and list paths without writing
    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Run the command
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be loaded, generation fails, or any
    /// file cannot be written.
    pub fn execute(&self) -> Result<()> {
        let service = load_service(&self.manifest, self.options.clone())?;
        let layers: &[ArtifactKind] = if self.layers.is_empty() {
            &ArtifactKind::ALL
        } else {
            &self.layers
        };

        println!(
            "\n{} {} {}",
            style("Generating entity").cyan().bold(),
            style(self.entity_id).green().bold(),
            style("...").cyan().bold()
        );

        let output = (!self.dry_run).then_some(self.output.as_path());
        let response = service
            .generate_entity_layers(self.entity_id, layers, output)
            .with_context(|| format!("Failed to generate entity {}", self.entity_id))?;

        if self.dry_run {
            println!("\n{} (nothing written):", style("Dry run").yellow().bold());
            for artifact in &response.artifacts {
                println!(
                    "  {} {} ({} bytes)",
                    style("•").dim(),
                    self.output.join(&artifact.relative_path).display(),
                    artifact.content.len()
                );
            }
            return Ok(());
        }

        report_written(&response, &self.output)
    }
}
