//! Entity and project lookup
//!
//! [`EntityStore`] is the boundary through which the service loads its input
//! records. [`MemoryStore`] is the bundled implementation; it can be seeded
//! from a JSON [`Manifest`] file.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RecordKind, StoreError};
use crate::model::{Entity, Project};

/// Read access to entities and projects
pub trait EntityStore {
    /// Load one entity by id
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no entity has this id.
    fn load_entity(&self, id: i64) -> Result<Entity, StoreError>;

    /// Load one project by id
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no project has this id.
    fn load_project(&self, id: i64) -> Result<Project, StoreError>;

    /// All entities owned by a project, ordered by id
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when the project does not exist.
    fn entities_for_project(&self, project_id: i64) -> Result<Vec<Entity>, StoreError>;
}

/// JSON document seeding a [`MemoryStore`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Projects
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Entities
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// In-memory store keyed by id
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    projects: BTreeMap<i64, Project>,
    entities: BTreeMap<i64, Entity>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a project
    pub fn insert_project(&mut self, project: Project) {
        self.projects.insert(project.id, project);
    }

    /// Insert or replace an entity
    pub fn insert_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id, entity);
    }

    /// Store holding every record of the manifest
    #[must_use]
    pub fn from_manifest(manifest: Manifest) -> Self {
        let mut store = Self::new();
        for project in manifest.projects {
            store.insert_project(project);
        }
        for entity in manifest.entities {
            store.insert_entity(entity);
        }
        store
    }

    /// Read and parse a manifest file
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ManifestRead`] when the file cannot be read and
    /// [`StoreError::Manifest`] when it is not a valid manifest.
    pub fn load_manifest(path: &Path) -> Result<Self, StoreError> {
        let raw = fs::read_to_string(path).map_err(|source| StoreError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest: Manifest =
            serde_json::from_str(&raw).map_err(|source| StoreError::Manifest {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_manifest(manifest))
    }

    /// Number of entities held
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }
}

impl EntityStore for MemoryStore {
    fn load_entity(&self, id: i64) -> Result<Entity, StoreError> {
        self.entities
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Entity,
                id,
            })
    }

    fn load_project(&self, id: i64) -> Result<Project, StoreError> {
        self.projects
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Project,
                id,
            })
    }

    fn entities_for_project(&self, project_id: i64) -> Result<Vec<Entity>, StoreError> {
        self.load_project(project_id)?;
        Ok(self
            .entities
            .values()
            .filter(|entity| entity.project_id == project_id)
            .cloned()
            .collect())
    }
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    fn load_entity(&self, id: i64) -> Result<Entity, StoreError> {
        (**self).load_entity(id)
    }

    fn load_project(&self, id: i64) -> Result<Project, StoreError> {
        (**self).load_project(id)
    }

    fn entities_for_project(&self, project_id: i64) -> Result<Vec<Entity>, StoreError> {
        (**self).entities_for_project(project_id)
    }
}
