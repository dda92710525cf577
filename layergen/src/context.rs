//! Generation context preparation
//!
//! [`prepare`] turns an [`Entity`] and its owning [`Project`] into the
//! [`GenerationContext`] every artifact template renders against. All name
//! variants, type mappings and attributes are computed here once, so the
//! templates only interpolate.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::case::{
    pluralize, to_camel_case, to_kebab_case, to_pascal_case, to_snake_case, to_title_case,
};
use crate::error::{DecodeError, Error, ValidationError};
use crate::field_type::{self, TIMESTAMP_IMPORT, UUID_IMPORT};
use crate::model::{Entity, EntityField, Project};

/// Switches that shape every artifact of a generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Emit an external `uuid` identifier next to the surrogate key
    pub external_id: bool,
    /// Emit `created_at`, `updated_at` and soft-delete `deleted_at`
    pub timestamps: bool,
    /// Namespace label override; the project's namespace is used otherwise
    pub namespace: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            external_id: true,
            timestamps: true,
            namespace: None,
        }
    }
}

/// Per-field values precomputed for templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldContext {
    /// Name as declared
    pub name: String,
    /// 1-based position in declaration order
    pub position: usize,
    /// `camelCase` name
    pub camel_name: String,
    /// `PascalCase` name
    pub pascal_name: String,
    /// `snake_case` name
    pub snake_name: String,
    /// Column name (same as `snake_name`)
    pub column_name: String,
    /// Canonical type tag
    pub field_type: String,
    /// Rust type of a present value
    pub base_type: String,
    /// Rust type, `Option`-wrapped when not required
    pub rust_type: String,
    /// SQL column type
    pub sql_type: String,
    /// Inverse of `required`
    pub nullable: bool,
    /// `#[serde(..)]` attribute
    pub serde_attr: String,
    /// `#[sqlx(..)]` attribute
    pub sqlx_attr: String,
    /// Comma-joined validation rules
    pub validation: Option<String>,
    /// `#[validate(..)]` attribute, only for rules the Rust type supports
    pub validate_attr: Option<String>,
    /// Whether a value is mandatory
    pub required: bool,
    /// Whether values must be unique
    pub unique: bool,
    /// SQL default expression
    pub default_value: Option<String>,
    /// Field description
    pub description: Option<String>,
}

impl FieldContext {
    /// Derive the template values for one field
    #[must_use]
    pub fn from_field(field: &EntityField, position: usize) -> Self {
        let snake_name = to_snake_case(&field.name);
        let validation = field_type::validation_rules(field.required, field.length);
        let validate_attr =
            field_type::validate_attr(&field.field_type, field.required, field.length);

        Self {
            name: field.name.clone(),
            position,
            camel_name: to_camel_case(&field.name),
            pascal_name: to_pascal_case(&field.name),
            column_name: snake_name.clone(),
            snake_name,
            field_type: field.field_type.tag().to_string(),
            base_type: field.field_type.rust_type().to_string(),
            rust_type: field_type::rust_type(&field.field_type, field.required),
            sql_type: field.field_type.sql_type(field.length),
            nullable: !field.required,
            serde_attr: field_type::serde_attr(&field.name, field.required),
            sqlx_attr: field_type::sqlx_attr(&field.name),
            validation,
            validate_attr,
            required: field.required,
            unique: field.unique,
            default_value: field
                .default_value
                .clone()
                .filter(|value| !value.trim().is_empty()),
            description: field
                .description
                .clone()
                .filter(|value| !value.trim().is_empty()),
        }
    }
}

/// Project values visible to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    /// Project id
    pub id: i64,
    /// Project name
    pub name: String,
    /// Project namespace as stored
    pub namespace: String,
}

/// Entity values visible to templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    /// Entity id
    pub id: i64,
    /// Entity name as stored
    pub name: String,
    /// Table name as stored
    pub table_name: String,
    /// Entity description
    pub description: Option<String>,
}

/// Everything a template can reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationContext {
    /// Owning project
    pub project: ProjectSummary,
    /// Source entity
    pub entity: EntitySummary,
    /// Namespace label for generated code
    pub namespace: String,
    /// Sorted `use` paths the generated model needs
    pub imports: Vec<String>,
    /// Entity name as stored
    pub entity_name: String,
    /// `camelCase` entity name
    pub entity_camel: String,
    /// `PascalCase` entity name
    pub entity_pascal: String,
    /// `snake_case` entity name
    pub entity_snake: String,
    /// kebab-case entity name
    pub entity_kebab: String,
    /// Human-readable entity name
    pub entity_title: String,
    /// Pluralized `snake_case` entity name
    pub entity_plural_snake: String,
    /// Pluralized `PascalCase` entity name
    pub entity_plural_pascal: String,
    /// Table name
    pub table_name: String,
    /// Whether an external `uuid` id is generated
    pub has_external_id: bool,
    /// Whether audit timestamps are generated
    pub has_timestamps: bool,
    /// Number of fields
    pub field_count: usize,
    /// Fields in declaration order
    pub fields: Vec<FieldContext>,
}

impl GenerationContext {
    /// Check the context invariants
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant: an entity or table name with no
    /// word characters, no fields, an empty field name, or two fields sharing
    /// a column.
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Checked on the derived forms: `___` is not blank but has no words
        if self.entity_snake.is_empty() || self.entity_pascal.is_empty() {
            return Err(ValidationError::EmptyEntityName);
        }
        if to_snake_case(&self.table_name).is_empty() {
            return Err(ValidationError::EmptyTableName);
        }
        if self.fields.is_empty() {
            return Err(ValidationError::NoFields {
                entity: self.entity_name.clone(),
            });
        }

        let mut columns = HashSet::new();
        for field in &self.fields {
            if field.snake_name.is_empty() {
                return Err(ValidationError::EmptyFieldName {
                    position: field.position,
                });
            }
            if !columns.insert(field.column_name.as_str()) {
                return Err(ValidationError::DuplicateField {
                    name: field.name.clone(),
                    column: field.column_name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Decode the raw field list of an entity
///
/// A JSON `null` (or a missing list) decodes to no fields.
///
/// # Errors
///
/// Returns [`DecodeError`] when the value is not an array of field records.
pub fn decode_fields(entity: &Entity) -> Result<Vec<EntityField>, DecodeError> {
    if entity.fields.is_null() {
        return Ok(Vec::new());
    }
    Vec::<EntityField>::deserialize(&entity.fields).map_err(|source| DecodeError {
        entity: entity.name.clone(),
        source,
    })
}

/// `use` paths needed by a set of fields
///
/// Always contains the timestamp import; the uuid import is added when the
/// entity carries an external id.
#[must_use]
pub fn determine_imports(fields: &[EntityField], has_external_id: bool) -> BTreeSet<&'static str> {
    let mut imports = BTreeSet::from([TIMESTAMP_IMPORT]);
    if has_external_id {
        imports.insert(UUID_IMPORT);
    }
    imports.extend(fields.iter().filter_map(|field| field.field_type.import()));
    imports
}

/// Build and validate the generation context for an entity
///
/// # Errors
///
/// Returns [`Error::Decode`] when the raw field list is malformed and
/// [`Error::Validation`] when the context violates an invariant.
pub fn prepare(
    project: &Project,
    entity: &Entity,
    options: &GenerationOptions,
) -> Result<GenerationContext, Error> {
    let fields = decode_fields(entity)?;

    let namespace_source = options
        .namespace
        .as_deref()
        .filter(|ns| !ns.trim().is_empty())
        .or_else(|| Some(project.namespace.as_str()).filter(|ns| !ns.trim().is_empty()))
        .unwrap_or(&project.name);

    let imports = determine_imports(&fields, options.external_id)
        .into_iter()
        .map(str::to_string)
        .collect();

    let field_contexts: Vec<FieldContext> = fields
        .iter()
        .enumerate()
        .map(|(idx, field)| FieldContext::from_field(field, idx + 1))
        .collect();

    let entity_snake = to_snake_case(&entity.name);
    let entity_plural_snake = pluralize(&entity_snake);

    let context = GenerationContext {
        project: ProjectSummary {
            id: project.id,
            name: project.name.clone(),
            namespace: project.namespace.clone(),
        },
        entity: EntitySummary {
            id: entity.id,
            name: entity.name.clone(),
            table_name: entity.table_name.clone(),
            description: entity
                .description
                .clone()
                .filter(|value| !value.trim().is_empty()),
        },
        namespace: to_snake_case(namespace_source),
        imports,
        entity_name: entity.name.clone(),
        entity_camel: to_camel_case(&entity.name),
        entity_pascal: to_pascal_case(&entity.name),
        entity_kebab: to_kebab_case(&entity.name),
        entity_title: to_title_case(&entity.name),
        entity_plural_pascal: to_pascal_case(&entity_plural_snake),
        entity_plural_snake,
        entity_snake,
        table_name: entity.table_name.trim().to_string(),
        has_external_id: options.external_id,
        has_timestamps: options.timestamps,
        field_count: field_contexts.len(),
        fields: field_contexts,
    };

    context.validate()?;
    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_type::FieldType;
    use serde_json::{json, Value};

    fn project() -> Project {
        Project::new(1, "Acme Shop")
    }

    fn user_entity() -> Entity {
        Entity::new(
            10,
            1,
            "User",
            "users",
            &[
                EntityField::new("name", FieldType::String)
                    .required()
                    .with_length(100),
                EntityField::new("email", FieldType::String)
                    .required()
                    .unique()
                    .with_length(255),
            ],
        )
    }

    #[test]
    fn test_field_context_for_required_string() {
        let field = EntityField::new("name", FieldType::String)
            .required()
            .with_length(100);
        let ctx = FieldContext::from_field(&field, 1);

        assert_eq!(ctx.pascal_name, "Name");
        assert_eq!(ctx.camel_name, "name");
        assert_eq!(ctx.snake_name, "name");
        assert_eq!(ctx.column_name, "name");
        assert_eq!(ctx.rust_type, "String");
        assert_eq!(ctx.sql_type, "VARCHAR(100)");
        assert!(!ctx.nullable);
        assert_eq!(ctx.validation.as_deref(), Some("required, length(max = 100)"));
        assert_eq!(
            ctx.validate_attr.as_deref(),
            Some("#[validate(length(min = 1, max = 100))]")
        );
        assert_eq!(ctx.serde_attr, "#[serde(rename = \"name\")]");
        assert_eq!(ctx.sqlx_attr, "#[sqlx(rename = \"name\")]");
    }

    #[test]
    fn test_field_context_for_optional_field() {
        let field = EntityField::new("birthDate", FieldType::Date);
        let ctx = FieldContext::from_field(&field, 3);

        assert_eq!(ctx.position, 3);
        assert_eq!(ctx.snake_name, "birth_date");
        assert_eq!(ctx.base_type, "NaiveDate");
        assert_eq!(ctx.rust_type, "Option<NaiveDate>");
        assert!(ctx.nullable);
        assert_eq!(ctx.validation, None);
        assert_eq!(ctx.validate_attr, None);
    }

    #[test]
    fn test_length_on_non_text_field_keeps_rule_but_no_attribute() {
        let field = EntityField::new("age", FieldType::Integer)
            .required()
            .with_length(3);
        let ctx = FieldContext::from_field(&field, 1);

        assert_eq!(ctx.validation.as_deref(), Some("required, length(max = 3)"));
        assert_eq!(ctx.validate_attr, None);
    }

    #[test]
    fn test_blank_default_is_dropped() {
        let field = EntityField::new("status", FieldType::String).with_default("  ");
        assert_eq!(FieldContext::from_field(&field, 1).default_value, None);
    }

    #[test]
    fn test_prepare_user() {
        let ctx = prepare(&project(), &user_entity(), &GenerationOptions::default()).unwrap();

        assert_eq!(ctx.entity_pascal, "User");
        assert_eq!(ctx.entity_snake, "user");
        assert_eq!(ctx.entity_plural_snake, "users");
        assert_eq!(ctx.entity_plural_pascal, "Users");
        assert_eq!(ctx.table_name, "users");
        assert_eq!(ctx.namespace, "acme_shop");
        assert_eq!(ctx.field_count, 2);
        assert_eq!(ctx.fields[0].name, "name");
        assert_eq!(ctx.fields[1].name, "email");
        assert_eq!(ctx.imports, vec!["chrono::{DateTime, Utc}", "uuid::Uuid"]);
    }

    #[test]
    fn test_namespace_precedence() {
        let entity = user_entity();
        let namespaced = project().with_namespace("StoreFront");
        let ctx = prepare(&namespaced, &entity, &GenerationOptions::default()).unwrap();
        assert_eq!(ctx.namespace, "store_front");

        let options = GenerationOptions {
            namespace: Some("billing".into()),
            ..GenerationOptions::default()
        };
        let ctx = prepare(&namespaced, &entity, &options).unwrap();
        assert_eq!(ctx.namespace, "billing");
    }

    #[test]
    fn test_imports_follow_field_types() {
        let fields = [
            EntityField::new("price", FieldType::Decimal),
            EntityField::new("metadata", FieldType::Json),
            EntityField::new("born_on", FieldType::Date),
            EntityField::new("seen_at", FieldType::DateTime),
            EntityField::new("token", FieldType::Uuid),
        ];
        let imports: Vec<_> = determine_imports(&fields, false).into_iter().collect();
        assert_eq!(
            imports,
            vec![
                "chrono::NaiveDate",
                "chrono::NaiveDateTime",
                "chrono::{DateTime, Utc}",
                "rust_decimal::Decimal",
                "serde_json::Value as JsonValue",
                "uuid::Uuid",
            ]
        );
    }

    #[test]
    fn test_imports_are_duplicate_free() {
        let fields = [
            EntityField::new("a", FieldType::Uuid),
            EntityField::new("b", FieldType::Uuid),
            EntityField::new("c", FieldType::Timestamp),
        ];
        let imports = determine_imports(&fields, true);
        assert_eq!(imports.len(), 2);
    }

    #[test]
    fn test_validation_failures_name_field() {
        let mut entity = user_entity();
        entity.name = String::new();
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref v) if v.field() == "entity_name"));

        let mut entity = user_entity();
        entity.table_name = "  ".into();
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ref v) if v.field() == "table_name"));

        let mut entity = user_entity();
        entity.fields = json!([]);
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::NoFields { .. })));
    }

    #[test]
    fn test_names_without_word_characters_are_rejected() {
        for name in ["___", "-", " - _ "] {
            let mut entity = user_entity();
            entity.name = name.to_string();
            let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
            assert!(
                matches!(err, Error::Validation(ValidationError::EmptyEntityName)),
                "{name:?} was accepted"
            );
        }

        let mut entity = user_entity();
        entity.table_name = "__".into();
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyTableName)));
    }

    #[test]
    fn test_null_fields_are_treated_as_empty() {
        let mut entity = user_entity();
        entity.fields = Value::Null;
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::NoFields { .. })));
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let entity = Entity::new(
            1,
            1,
            "Account",
            "accounts",
            &[
                EntityField::new("firstName", FieldType::String),
                EntityField::new("first_name", FieldType::String),
            ],
        );
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::DuplicateField { ref column, .. }) if column == "first_name"
        ));
    }

    #[test]
    fn test_malformed_fields_are_decode_errors() {
        let mut entity = user_entity();
        entity.fields = json!({ "name": "not-a-list" });
        let err = prepare(&project(), &entity, &GenerationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Decode(ref d) if d.entity == "User"));

        entity.fields = json!([{ "type": "string" }]);
        assert!(matches!(
            prepare(&project(), &entity, &GenerationOptions::default()),
            Err(Error::Decode(_))
        ));
    }
}
