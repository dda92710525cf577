//! CLI command implementations

pub mod generate;
pub mod paths;
pub mod preview;
pub mod project;
pub mod types;

pub use generate::GenerateCommand;
pub use paths::PathsCommand;
pub use preview::PreviewCommand;
pub use project::ProjectCommand;
pub use types::TypesCommand;

use std::path::Path;

use anyhow::{Context, Result};
use console::style;
use layergen::context::GenerationOptions;
use layergen::generator::Generator;
use layergen::service::{GenerationResponse, GeneratorService};
use layergen::store::MemoryStore;

/// Build a generation service over the records of a manifest file
fn load_service(manifest: &Path, options: GenerationOptions) -> Result<GeneratorService<MemoryStore>> {
    let store = MemoryStore::load_manifest(manifest)
        .with_context(|| format!("Failed to load manifest: {}", manifest.display()))?;
    let generator = Generator::new().context("Failed to compile built-in templates")?;
    Ok(GeneratorService::new(store, generator, options))
}

/// Print the artifact list of a response and fail if any write failed
fn report_written(response: &GenerationResponse, root: &Path) -> Result<()> {
    println!(
        "\n{} {} files in {}:",
        style("Generated").green().bold(),
        response.artifacts.len(),
        style(root.display()).cyan()
    );

    for artifact in &response.artifacts {
        let failed = response
            .write_failures
            .iter()
            .find(|failure| failure.path == artifact.relative_path);
        match failed {
            None => println!(
                "  {} {} ({})",
                style("✓").green(),
                style(&artifact.relative_path).dim(),
                style(artifact.kind.label()).dim()
            ),
            Some(failure) => println!(
                "  {} {} ({})",
                style("✗").red(),
                style(&artifact.relative_path).red(),
                style(&failure.source).red()
            ),
        }
    }

    if response.success {
        println!("\n{} {}", style("✨").green().bold(), response.message);
        Ok(())
    } else {
        anyhow::bail!(response.message.clone())
    }
}
