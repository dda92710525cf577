//! Artifact orchestration
//!
//! A [`Generator`] renders the seven artifact templates against one
//! [`GenerationContext`] in a fixed order: model, repository, service,
//! handler, dto, forward migration, rollback migration. Generation is
//! all-or-nothing: the first template that fails aborts the call and names
//! its artifact kind.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::case::to_snake_case;
use crate::context::GenerationContext;
use crate::engine::{CompiledTemplates, FunctionTable};
use crate::error::{GenerationError, TemplateError};
use crate::templates;

/// One kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// Data model struct
    Model,
    /// sqlx repository
    Repository,
    /// Business-logic service
    Service,
    /// axum handlers
    Handler,
    /// Request/response shapes
    Dto,
    /// Forward migration
    MigrationUp,
    /// Rollback migration
    MigrationDown,
}

impl ArtifactKind {
    /// Every kind, in generation order
    pub const ALL: [Self; 7] = [
        Self::Model,
        Self::Repository,
        Self::Service,
        Self::Handler,
        Self::Dto,
        Self::MigrationUp,
        Self::MigrationDown,
    ];

    /// The code-layer kinds (everything except migrations)
    pub const CODE_LAYERS: [Self; 5] = [
        Self::Model,
        Self::Repository,
        Self::Service,
        Self::Handler,
        Self::Dto,
    ];

    /// Stable name, also used as the template name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::Handler => "handler",
            Self::Dto => "dto",
            Self::MigrationUp => "migration-up",
            Self::MigrationDown => "migration-down",
        }
    }

    /// Short description for user feedback
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Model => "data model",
            Self::Repository => "persistence layer",
            Self::Service => "business logic",
            Self::Handler => "HTTP handlers",
            Self::Dto => "request/response DTOs",
            Self::MigrationUp => "forward migration",
            Self::MigrationDown => "rollback migration",
        }
    }

    /// Whether this kind is a schema migration
    #[must_use]
    pub const fn is_migration(self) -> bool {
        matches!(self, Self::MigrationUp | Self::MigrationDown)
    }

    /// Built-in template body
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Model => templates::MODEL,
            Self::Repository => templates::REPOSITORY,
            Self::Service => templates::SERVICE,
            Self::Handler => templates::HANDLER,
            Self::Dto => templates::DTO,
            Self::MigrationUp => templates::MIGRATION_UP,
            Self::MigrationDown => templates::MIGRATION_DOWN,
        }
    }

    /// Path of this artifact, relative to the output root
    ///
    /// ```
    /// # use layergen::generator::ArtifactKind;
    /// assert_eq!(ArtifactKind::Handler.relative_path("UserProfile"), "api/handlers/user_profile_handler.rs");
    /// assert_eq!(ArtifactKind::MigrationUp.relative_path("User"), "migrations/user.up.sql");
    /// ```
    #[must_use]
    pub fn relative_path(self, entity_name: &str) -> String {
        let snake = to_snake_case(entity_name);
        match self {
            Self::Model => format!("models/{snake}.rs"),
            Self::Repository => format!("repository/{snake}_repository.rs"),
            Self::Service => format!("service/{snake}_service.rs"),
            Self::Handler => format!("api/handlers/{snake}_handler.rs"),
            Self::Dto => format!("api/dto/{snake}_dto.rs"),
            Self::MigrationUp => format!("migrations/{snake}.up.sql"),
            Self::MigrationDown => format!("migrations/{snake}.down.sql"),
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An artifact kind name did not match any known kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown artifact kind `{0}` (expected one of: model, repository, service, handler, dto, migration-up, migration-down)")]
pub struct ParseArtifactKindError(pub String);

impl FromStr for ArtifactKind {
    type Err = ParseArtifactKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| ParseArtifactKindError(s.to_string()))
    }
}

/// A rendered artifact, not yet written anywhere
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Path relative to the output root
    pub relative_path: String,
    /// Rendered content
    pub content: String,
}

/// Renders artifact families from generation contexts
///
/// Cloning is cheap; clones share one read-only template registry and may
/// render concurrently from several threads.
#[derive(Debug, Clone)]
pub struct Generator {
    templates: Arc<CompiledTemplates>,
}

impl Generator {
    /// Generator using the built-in templates
    ///
    /// # Errors
    ///
    /// Returns a parse-stage [`TemplateError`] if a built-in template is
    /// malformed.
    pub fn new() -> Result<Self, TemplateError> {
        Self::with_overrides(std::iter::empty::<(ArtifactKind, String)>())
    }

    /// Generator with some templates replaced
    ///
    /// Kinds without an override keep their built-in template.
    ///
    /// # Errors
    ///
    /// Returns a parse-stage [`TemplateError`] naming the first template that
    /// does not parse.
    pub fn with_overrides<I, S>(overrides: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (ArtifactKind, S)>,
        S: Into<String>,
    {
        let overrides: HashMap<ArtifactKind, String> = overrides
            .into_iter()
            .map(|(kind, body)| (kind, body.into()))
            .collect();

        let compiled = FunctionTable::new().compile(ArtifactKind::ALL.iter().map(|kind| {
            let body = overrides
                .get(kind)
                .map_or_else(|| kind.template(), String::as_str);
            (kind.name(), body)
        }))?;

        Ok(Self {
            templates: Arc::new(compiled),
        })
    }

    /// Render every artifact kind, in generation order
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] for the first artifact that fails; no
    /// partial result is returned.
    pub fn generate(
        &self,
        context: &GenerationContext,
    ) -> Result<Vec<GeneratedArtifact>, GenerationError> {
        self.generate_layers(context, &ArtifactKind::ALL)
    }

    /// Render a subset of artifact kinds
    ///
    /// Output follows generation order regardless of the order of `kinds`;
    /// duplicates are rendered once.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] for the first artifact that fails.
    pub fn generate_layers(
        &self,
        context: &GenerationContext,
        kinds: &[ArtifactKind],
    ) -> Result<Vec<GeneratedArtifact>, GenerationError> {
        ArtifactKind::ALL
            .into_iter()
            .filter(|kind| kinds.contains(kind))
            .map(|kind| self.render_artifact(kind, context))
            .collect()
    }

    /// Render a single artifact
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] naming `kind` when its template fails.
    pub fn render_artifact(
        &self,
        kind: ArtifactKind,
        context: &GenerationContext,
    ) -> Result<GeneratedArtifact, GenerationError> {
        let content = self
            .templates
            .render(kind.name(), context)
            .map_err(|source| GenerationError { kind, source })?;

        let relative_path = kind.relative_path(&context.entity_name);
        debug!(
            kind = %kind,
            path = %relative_path,
            bytes = content.len(),
            "Rendered artifact"
        );

        Ok(GeneratedArtifact {
            kind,
            relative_path,
            content,
        })
    }
}

/// Paths of the five code-layer artifacts for an entity
///
/// ```
/// # use layergen::generator::list_generated_paths;
/// assert_eq!(
///     list_generated_paths("User"),
///     vec![
///         "models/user.rs",
///         "repository/user_repository.rs",
///         "service/user_service.rs",
///         "api/handlers/user_handler.rs",
///         "api/dto/user_dto.rs",
///     ]
/// );
/// ```
#[must_use]
pub fn list_generated_paths(entity_name: &str) -> Vec<String> {
    ArtifactKind::CODE_LAYERS
        .into_iter()
        .map(|kind| kind.relative_path(entity_name))
        .collect()
}

/// Paths of all seven artifacts for an entity, migrations included
#[must_use]
pub fn list_artifact_paths(entity_name: &str) -> Vec<String> {
    ArtifactKind::ALL
        .into_iter()
        .map(|kind| kind.relative_path(entity_name))
        .collect()
}
