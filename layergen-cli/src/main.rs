//! layergen CLI tool

#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use layergen::config::{GeneratorConfig, LogFormat};
use layergen::generator::ArtifactKind;
use layergen::observability;
use layergen_cli::{GenerateCommand, PathsCommand, PreviewCommand, ProjectCommand, TypesCommand};

#[derive(Parser)]
#[command(name = "layergen")]
#[command(version)]
#[command(about = "Generate layered CRUD code and SQL migrations from entity metadata", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./layergen.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the artifacts of one entity
    Generate {
        /// Manifest file with projects and entities
        #[arg(short, long)]
        manifest: PathBuf,
        /// Entity id
        #[arg(short, long)]
        entity: i64,
        /// Output root (defaults to the configured root)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Only generate these layers (repeatable)
        #[arg(short, long = "layer")]
        layers: Vec<ArtifactKind>,
        /// Render without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Generate every entity of a project
    Project {
        /// Manifest file with projects and entities
        #[arg(short, long)]
        manifest: PathBuf,
        /// Project id
        #[arg(short, long)]
        project: i64,
        /// Output root (defaults to the configured root)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print rendered artifacts to stdout
    Preview {
        /// Manifest file with projects and entities
        #[arg(short, long)]
        manifest: PathBuf,
        /// Entity id
        #[arg(short, long)]
        entity: i64,
        /// Only preview this layer
        #[arg(short, long)]
        layer: Option<ArtifactKind>,
    },
    /// List the paths an entity name would generate
    Paths {
        /// Entity name (any case)
        entity_name: String,
        /// Include migration files
        #[arg(long)]
        all: bool,
    },
    /// Show the field type mapping table
    Types,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = GeneratorConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")?;
    if cli.json_logs {
        config.logging.format = LogFormat::Json;
    }
    observability::init(&config.logging).context("Failed to initialize logging")?;
    tracing::debug!(?config, "Loaded configuration");

    let options = config.generation_options();
    match cli.command {
        Commands::Generate {
            manifest,
            entity,
            output,
            layers,
            dry_run,
        } => {
            let output = output.unwrap_or_else(|| config.output.root.clone());
            GenerateCommand::new(manifest, entity, output, options)
                .with_layers(layers)
                .dry_run(dry_run)
                .execute()?;
        }
        Commands::Project {
            manifest,
            project,
            output,
        } => {
            let output = output.unwrap_or_else(|| config.output.root.clone());
            ProjectCommand::new(manifest, project, output, options).execute()?;
        }
        Commands::Preview {
            manifest,
            entity,
            layer,
        } => {
            PreviewCommand::new(manifest, entity, layer, options).execute()?;
        }
        Commands::Paths { entity_name, all } => {
            PathsCommand::new(entity_name, all).execute();
        }
        Commands::Types => TypesCommand::execute(),
    }

    Ok(())
}
