//! Print rendered artifacts without writing them

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use layergen::context::GenerationOptions;
use layergen::generator::ArtifactKind;

use super::load_service;

/// `layergen preview`
pub struct PreviewCommand {
    manifest: PathBuf,
    entity_id: i64,
    layer: Option<ArtifactKind>,
    options: GenerationOptions,
}

impl PreviewCommand {
    /// Preview `entity_id`, optionally a single layer
    pub const fn new(
        manifest: PathBuf,
        entity_id: i64,
        layer: Option<ArtifactKind>,
        options: GenerationOptions,
    ) -> Self {
        Self {
            manifest,
            entity_id,
            layer,
            options,
        }
    }

    /// Render and return the artifact contents, in generation order
    ///
    /// # Errors
    ///
    /// Fails when the manifest cannot be loaded or generation fails.
    pub fn render(&self) -> Result<Vec<(String, String)>> {
        let service = load_service(&self.manifest, self.options.clone())?;
        let response = match self.layer {
            Some(kind) => service.generate_entity_layers(self.entity_id, &[kind], None),
            None => service.preview_entity(self.entity_id),
        }
        .with_context(|| format!("Failed to preview entity {}", self.entity_id))?;

        Ok(response
            .artifacts
            .into_iter()
            .map(|artifact| (artifact.relative_path, artifact.content))
            .collect())
    }

    /// Run the command
    ///
    /// # Errors
    ///
    /// See [`PreviewCommand::render`].
    pub fn execute(&self) -> Result<()> {
        for (path, content) in self.render()? {
            println!("{}", style(format!("// ==> {path}")).cyan().bold());
            println!("{content}");
        }
        Ok(())
    }
}
