//! Id-driven generation service
//!
//! Loads records through an [`EntityStore`], prepares the context, renders
//! through the [`Generator`] and optionally writes the result.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::context::{prepare, GenerationContext, GenerationOptions};
use crate::error::{Error, WriteError};
use crate::generator::{list_generated_paths, ArtifactKind, GeneratedArtifact, Generator};
use crate::store::EntityStore;
use crate::writer::{materialize, ArtifactWriter, FsWriter};

/// Outcome of a generation request
#[derive(Debug)]
pub struct GenerationResponse {
    /// Source entity; `None` for project-wide generation
    pub entity_id: Option<i64>,
    /// Rendered artifacts, in generation order
    pub artifacts: Vec<GeneratedArtifact>,
    /// Artifacts that could not be written
    pub write_failures: Vec<WriteError>,
    /// `false` when any write failed
    pub success: bool,
    /// Human-readable summary
    pub message: String,
    /// When rendering finished
    pub generated_at: DateTime<Utc>,
}

impl GenerationResponse {
    fn new(
        entity_id: Option<i64>,
        subject: &str,
        artifacts: Vec<GeneratedArtifact>,
        write_failures: Vec<WriteError>,
    ) -> Self {
        let success = write_failures.is_empty();
        let message = if success {
            format!("Generated {} files for {subject}", artifacts.len())
        } else {
            format!(
                "Generated {} files for {subject}, {} could not be written",
                artifacts.len(),
                write_failures.len()
            )
        };
        Self {
            entity_id,
            artifacts,
            write_failures,
            success,
            message,
            generated_at: Utc::now(),
        }
    }
}

/// Generation operations keyed by store ids
#[derive(Debug, Clone)]
pub struct GeneratorService<S> {
    store: S,
    generator: Generator,
    options: GenerationOptions,
}

impl<S: EntityStore> GeneratorService<S> {
    /// Service over `store` rendering with `generator`
    pub const fn new(store: S, generator: Generator, options: GenerationOptions) -> Self {
        Self {
            store,
            generator,
            options,
        }
    }

    /// The underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Generate every artifact of an entity, writing below `output_root` if given
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the entity or its project cannot be loaded,
    /// the context is invalid, or a template fails. Write failures are not
    /// errors; they are reported in the response.
    #[instrument(skip(self, output_root))]
    pub fn generate_entity(
        &self,
        entity_id: i64,
        output_root: Option<&Path>,
    ) -> Result<GenerationResponse, Error> {
        self.generate_entity_layers(entity_id, &ArtifactKind::ALL, output_root)
    }

    /// Generate a subset of artifact kinds for an entity
    ///
    /// # Errors
    ///
    /// See [`GeneratorService::generate_entity`].
    #[instrument(skip(self, output_root))]
    pub fn generate_entity_layers(
        &self,
        entity_id: i64,
        kinds: &[ArtifactKind],
        output_root: Option<&Path>,
    ) -> Result<GenerationResponse, Error> {
        let writer = output_root.map(FsWriter::new);
        self.generate_entity_into(
            entity_id,
            kinds,
            writer.as_ref().map(|w| w as &dyn ArtifactWriter),
        )
    }

    /// Generate for an entity and write through a caller-supplied writer
    ///
    /// # Errors
    ///
    /// See [`GeneratorService::generate_entity`].
    pub fn generate_entity_into(
        &self,
        entity_id: i64,
        kinds: &[ArtifactKind],
        writer: Option<&dyn ArtifactWriter>,
    ) -> Result<GenerationResponse, Error> {
        let context = self.prepare_entity(entity_id)?;
        let artifacts = self.generator.generate_layers(&context, kinds)?;
        let write_failures = writer.map_or_else(Vec::new, |w| materialize(w, &artifacts));

        let response = GenerationResponse::new(
            Some(entity_id),
            &format!("entity {}", context.entity_name),
            artifacts,
            write_failures,
        );
        info!(
            entity = %context.entity_name,
            artifacts = response.artifacts.len(),
            write_failures = response.write_failures.len(),
            "Generated entity"
        );
        Ok(response)
    }

    /// Render every artifact of an entity without writing anything
    ///
    /// # Errors
    ///
    /// See [`GeneratorService::generate_entity`].
    #[instrument(skip(self))]
    pub fn preview_entity(&self, entity_id: i64) -> Result<GenerationResponse, Error> {
        self.generate_entity_into(entity_id, &ArtifactKind::ALL, None)
    }

    /// Generate every entity of a project
    ///
    /// Stops at the first entity that fails; nothing further is rendered or
    /// written after it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyProject`] when the project has no entities,
    /// [`Error::ConflictingEntities`] when two entity names share a snake-case
    /// form (their files would overwrite each other), and [`Error::Entity`]
    /// wrapping the first per-entity failure.
    #[instrument(skip(self, output_root))]
    pub fn generate_project(
        &self,
        project_id: i64,
        output_root: Option<&Path>,
    ) -> Result<GenerationResponse, Error> {
        let project = self.store.load_project(project_id)?;
        let entities = self.store.entities_for_project(project_id)?;
        if entities.is_empty() {
            return Err(Error::EmptyProject {
                project: project.name,
            });
        }

        let mut artifacts = Vec::new();
        let mut seen: HashMap<String, &str> = HashMap::new();
        for entity in &entities {
            let wrap = |source: Error| Error::Entity {
                entity: entity.name.clone(),
                source: Box::new(source),
            };
            let context = prepare(&project, entity, &self.options).map_err(wrap)?;
            if let Some(first) = seen.insert(context.entity_snake.clone(), &entity.name) {
                return Err(Error::ConflictingEntities {
                    first: first.to_string(),
                    second: entity.name.clone(),
                    snake: context.entity_snake,
                });
            }
            let rendered = self
                .generator
                .generate(&context)
                .map_err(|e| wrap(e.into()))?;
            artifacts.extend(rendered);
        }

        let write_failures = output_root.map_or_else(Vec::new, |root| {
            materialize(&FsWriter::new(root), &artifacts)
        });

        let response = GenerationResponse::new(
            None,
            &format!("project {}", project.name),
            artifacts,
            write_failures,
        );
        info!(
            project = %project.name,
            entities = entities.len(),
            artifacts = response.artifacts.len(),
            "Generated project"
        );
        Ok(response)
    }

    /// Code-layer paths an entity would produce
    ///
    /// # Errors
    ///
    /// Returns [`Error::Store`] when the entity does not exist.
    pub fn generated_paths(&self, entity_id: i64) -> Result<Vec<String>, Error> {
        let entity = self.store.load_entity(entity_id)?;
        Ok(list_generated_paths(&entity.name))
    }

    fn prepare_entity(&self, entity_id: i64) -> Result<GenerationContext, Error> {
        let entity = self.store.load_entity(entity_id)?;
        let project = self.store.load_project(entity.project_id)?;
        prepare(&project, &entity, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::FieldType;
    use crate::model::{Entity, EntityField, Project};
    use crate::store::MemoryStore;
    use serde_json::json;
    use tempfile::tempdir;

    fn service() -> GeneratorService<MemoryStore> {
        let mut store = MemoryStore::new();
        store.insert_project(Project::new(1, "inventory"));
        store.insert_project(Project::new(2, "empty"));
        store.insert_entity(Entity::new(
            1,
            1,
            "Warehouse",
            "warehouses",
            &[EntityField::new("code", FieldType::String).required()],
        ));
        store.insert_entity(Entity::new(
            2,
            1,
            "StockItem",
            "stock_items",
            &[EntityField::new("quantity", FieldType::Integer).required()],
        ));
        GeneratorService::new(store, Generator::new().unwrap(), GenerationOptions::default())
    }

    #[test]
    fn test_preview_never_writes() {
        let response = service().preview_entity(1).unwrap();
        assert!(response.success);
        assert!(response.write_failures.is_empty());
        assert_eq!(response.entity_id, Some(1));
        assert_eq!(response.artifacts.len(), 7);
        assert_eq!(response.message, "Generated 7 files for entity Warehouse");
    }

    #[test]
    fn test_generate_entity_writes_files() {
        let temp_dir = tempdir().unwrap();
        let response = service().generate_entity(2, Some(temp_dir.path())).unwrap();

        assert!(response.success);
        for artifact in &response.artifacts {
            assert!(temp_dir.path().join(&artifact.relative_path).exists());
        }
        assert!(temp_dir.path().join("models/stock_item.rs").exists());
    }

    #[test]
    fn test_generate_entity_layers() {
        let response = service()
            .generate_entity_layers(1, &[ArtifactKind::MigrationUp], None)
            .unwrap();
        assert_eq!(response.artifacts.len(), 1);
        assert_eq!(response.artifacts[0].relative_path, "migrations/warehouse.up.sql");
    }

    #[test]
    fn test_unknown_entity() {
        assert!(matches!(service().preview_entity(404), Err(Error::Store(_))));
        assert!(matches!(service().generated_paths(404), Err(Error::Store(_))));
    }

    #[test]
    fn test_generate_project() {
        let response = service().generate_project(1, None).unwrap();
        assert_eq!(response.entity_id, None);
        assert_eq!(response.artifacts.len(), 14);
        assert_eq!(response.artifacts[0].relative_path, "models/warehouse.rs");
        assert_eq!(response.artifacts[7].relative_path, "models/stock_item.rs");
    }

    #[test]
    fn test_empty_project_is_an_error() {
        assert!(matches!(
            service().generate_project(2, None),
            Err(Error::EmptyProject { ref project }) if project == "empty"
        ));
    }

    #[test]
    fn test_project_generation_fails_fast_naming_entity() {
        let mut service = service();
        let mut broken = service.store.load_entity(2).unwrap();
        broken.fields = json!("oops");
        service.store.insert_entity(broken);

        let err = service.generate_project(1, None).unwrap_err();
        match err {
            Error::Entity { entity, source } => {
                assert_eq!(entity, "StockItem");
                assert!(matches!(*source, Error::Decode(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_project_rejects_entities_sharing_paths() {
        let mut service = service();
        service.store.insert_entity(Entity::new(
            3,
            1,
            "stock_item",
            "stock_items_v2",
            &[EntityField::new("sku", FieldType::String)],
        ));
        let temp_dir = tempdir().unwrap();

        let err = service
            .generate_project(1, Some(temp_dir.path()))
            .unwrap_err();
        match err {
            Error::ConflictingEntities {
                first,
                second,
                snake,
            } => {
                assert_eq!(first, "StockItem");
                assert_eq!(second, "stock_item");
                assert_eq!(snake, "stock_item");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_generated_paths() {
        let paths = service().generated_paths(2).unwrap();
        assert_eq!(paths[0], "models/stock_item.rs");
        assert_eq!(paths.len(), 5);
    }
}
