//! # layergen
//!
//! Schema-driven generator for the layers of a CRUD resource. From one entity
//! description (name, table, typed fields) it renders:
//!
//! - a data model (serde + sqlx + validator)
//! - a sqlx repository
//! - a business-logic service
//! - axum HTTP handlers
//! - request/response DTOs
//! - forward and rollback PostgreSQL migrations
//!
//! The pipeline is: identifier canonicalization ([`case`]) → type mapping
//! and attribute synthesis ([`field_type`]) → context preparation
//! ([`context`]) → template rendering ([`engine`], [`generator`]).
//!
//! ## Quick Start
//!
//! ```
//! use layergen::context::{prepare, GenerationOptions};
//! use layergen::field_type::FieldType;
//! use layergen::generator::Generator;
//! use layergen::model::{Entity, EntityField, Project};
//!
//! let project = Project::new(1, "shop");
//! let entity = Entity::new(
//!     1,
//!     1,
//!     "Product",
//!     "products",
//!     &[EntityField::new("title", FieldType::String).required().with_length(120)],
//! );
//!
//! let context = prepare(&project, &entity, &GenerationOptions::default()).unwrap();
//! let artifacts = Generator::new().unwrap().generate(&context).unwrap();
//!
//! assert_eq!(artifacts.len(), 7);
//! assert_eq!(artifacts[0].relative_path, "models/product.rs");
//! assert!(artifacts[0].content.contains("pub struct Product {"));
//! ```

pub mod case;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod field_type;
pub mod generator;
pub mod model;
pub mod observability;
pub mod service;
pub mod store;
pub mod templates;
pub mod writer;

pub use context::{prepare, FieldContext, GenerationContext, GenerationOptions};
pub use error::{Error, Result};
pub use generator::{
    list_artifact_paths, list_generated_paths, ArtifactKind, GeneratedArtifact, Generator,
};
pub use model::{Entity, EntityField, Project};
pub use service::{GenerationResponse, GeneratorService};
pub use store::{EntityStore, MemoryStore};
pub use writer::{ArtifactWriter, FsWriter};
