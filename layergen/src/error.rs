//! Error types and error handling

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::generator::ArtifactKind;

/// Crate-level error type
///
/// Every operation of [`GeneratorService`](crate::service::GeneratorService)
/// returns this; the variants keep the underlying error as their source.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity or project lookup failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Raw field list could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Generation context violates an invariant
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Template failed outside of artifact generation (registry construction)
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// An artifact failed to render
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Project-wide generation requested for a project with no entities
    #[error("Project `{project}` has no entities to generate")]
    EmptyProject {
        /// Project name
        project: String,
    },

    /// Two entities of a project would write the same artifact paths
    #[error("Entities `{first}` and `{second}` both generate `{snake}` artifacts")]
    ConflictingEntities {
        /// Entity seen first
        first: String,
        /// Entity that collides with it
        second: String,
        /// Shared snake-case name
        snake: String,
    },

    /// One entity of a project-wide generation failed
    #[error("Failed to generate entity `{entity}`: {source}")]
    Entity {
        /// Entity name
        entity: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

/// The raw field list of an entity is not a valid JSON field array
#[derive(Debug, Error)]
#[error("Failed to decode fields of entity `{entity}`: {source}")]
pub struct DecodeError {
    /// Entity name
    pub entity: String,
    /// JSON error
    #[source]
    pub source: serde_json::Error,
}

/// A generation context invariant was violated
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Entity name is empty or has no letters or digits
    #[error("entity name must contain a letter or digit")]
    EmptyEntityName,

    /// Table name is empty or has no letters or digits
    #[error("table name must contain a letter or digit")]
    EmptyTableName,

    /// Entity declares no fields
    #[error("entity `{entity}` must declare at least one field")]
    NoFields {
        /// Entity name
        entity: String,
    },

    /// A field has an empty name
    #[error("field #{position} has an empty name")]
    EmptyFieldName {
        /// 1-based position in the field list
        position: usize,
    },

    /// Two fields canonicalize to the same column
    #[error("field `{name}` collides with another field on column `{column}`")]
    DuplicateField {
        /// Field name as declared
        name: String,
        /// Shared snake_case column name
        column: String,
    },
}

impl ValidationError {
    /// Name of the context field whose invariant was violated
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyEntityName => "entity_name",
            Self::EmptyTableName => "table_name",
            Self::NoFields { .. } | Self::EmptyFieldName { .. } | Self::DuplicateField { .. } => {
                "fields"
            }
        }
    }
}

/// Stage of template processing that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateStage {
    /// Template text could not be parsed
    Parse,
    /// Rendering against a context failed
    Execute,
}

impl fmt::Display for TemplateStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "parse"),
            Self::Execute => write!(f, "execute"),
        }
    }
}

/// A template failed to parse or render
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template `{template}` failed to {stage}: {cause}")]
pub struct TemplateError {
    /// Template name
    pub template: String,
    /// Failing stage
    pub stage: TemplateStage,
    /// Engine message
    pub cause: String,
}

impl TemplateError {
    pub(crate) fn parse(template: &str, cause: impl fmt::Display) -> Self {
        Self {
            template: template.to_string(),
            stage: TemplateStage::Parse,
            cause: cause.to_string(),
        }
    }

    pub(crate) fn execute(template: &str, cause: impl fmt::Display) -> Self {
        Self {
            template: template.to_string(),
            stage: TemplateStage::Execute,
            cause: cause.to_string(),
        }
    }
}

/// Rendering one artifact failed, aborting the whole generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to generate {kind} artifact: {source}")]
pub struct GenerationError {
    /// Artifact being rendered
    pub kind: ArtifactKind,
    /// Template failure
    #[source]
    pub source: TemplateError,
}

/// Writing one artifact to its destination failed
#[derive(Debug, Error)]
#[error("Failed to write {path}: {source}")]
pub struct WriteError {
    /// Relative artifact path
    pub path: String,
    /// I/O failure
    #[source]
    pub source: io::Error,
}

/// Kind of record looked up in an [`EntityStore`](crate::store::EntityStore)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A project
    Project,
    /// An entity
    Entity,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Entity => write!(f, "entity"),
        }
    }
}

/// Store lookup or manifest loading failed
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given id
    #[error("{kind} {id} not found")]
    NotFound {
        /// Record kind
        kind: RecordKind,
        /// Requested id
        id: i64,
    },

    /// Manifest file could not be read
    #[error("Failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        /// Manifest path
        path: PathBuf,
        /// I/O failure
        #[source]
        source: io::Error,
    },

    /// Manifest is not valid JSON or has the wrong shape
    #[error("Invalid manifest {}: {source}", path.display())]
    Manifest {
        /// Manifest path
        path: PathBuf,
        /// JSON error
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration could not be loaded
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Explicitly requested config file does not exist
    #[error("Config file not found: {}", path.display())]
    Missing {
        /// Requested path
        path: PathBuf,
    },

    /// Merged configuration is invalid
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

/// Result alias using the crate [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;
