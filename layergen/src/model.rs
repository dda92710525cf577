//! Input records: projects, entities and their declared fields

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::field_type::FieldType;

/// Lifecycle status of a project
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    /// Ready for generation
    #[default]
    Active,
    /// Generation in progress
    Generating,
    /// Last generation failed
    Failed,
    /// No longer maintained
    Archived,
}

/// A project groups entities under one namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project id
    pub id: i64,
    /// Project name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Namespace label for generated code; the name is used when empty
    #[serde(default)]
    pub namespace: String,
    /// Lifecycle status
    #[serde(default)]
    pub status: ProjectStatus,
}

impl Project {
    /// Create an active project with no namespace override
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            namespace: String::new(),
            status: ProjectStatus::Active,
        }
    }

    /// Set the namespace label
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }
}

/// A data entity owned by a project
///
/// `fields` is kept as raw JSON and only decoded into [`EntityField`]s when a
/// generation context is prepared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity id
    pub id: i64,
    /// Owning project id
    pub project_id: i64,
    /// Logical entity name (e.g., `User`)
    pub name: String,
    /// Storage table name (e.g., `users`)
    pub table_name: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Raw JSON array of field declarations
    #[serde(default)]
    pub fields: Value,
}

impl Entity {
    /// Create an entity with the given fields
    pub fn new(
        id: i64,
        project_id: i64,
        name: impl Into<String>,
        table_name: impl Into<String>,
        fields: &[EntityField],
    ) -> Self {
        Self {
            id,
            project_id,
            name: name.into(),
            table_name: table_name.into(),
            description: None,
            fields: Value::Array(fields.iter().map(EntityField::to_value).collect()),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One declared field of an entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityField {
    /// Field name as declared
    pub name: String,
    /// Field type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether a value is mandatory
    #[serde(default)]
    pub required: bool,
    /// Whether values must be unique
    #[serde(default)]
    pub unique: bool,
    /// SQL default expression, emitted verbatim after `DEFAULT`
    ///
    /// Must be valid SQL: string literals need their quotes (`'active'`,
    /// not `active`); `0`, `true` and `now()` work as written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Maximum length for string-like types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl EntityField {
    /// Create an optional field of the given type
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
            unique: false,
            default_value: None,
            length: None,
            description: None,
        }
    }

    /// Mark the field required
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Mark the field unique
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the maximum length
    #[must_use]
    pub const fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Set the SQL default expression; quote string literals yourself
    ///
    /// ```
    /// # use layergen::field_type::FieldType;
    /// # use layergen::model::EntityField;
    /// let status = EntityField::new("status", FieldType::String).with_default("'active'");
    /// assert_eq!(status.default_value.as_deref(), Some("'active'"));
    /// ```
    #[must_use]
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// JSON wire form of this field
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut value = json!({
            "name": self.name,
            "type": self.field_type.tag(),
            "required": self.required,
            "unique": self.unique,
        });
        if let Value::Object(map) = &mut value {
            if let Some(default_value) = &self.default_value {
                map.insert("default_value".into(), json!(default_value));
            }
            if let Some(length) = self.length {
                map.insert("length".into(), json!(length));
            }
            if let Some(description) = &self.description {
                map.insert("description".into(), json!(description));
            }
        }
        value
    }
}
