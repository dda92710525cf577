//! Code-layer template bodies

/// Data model: one struct mapped to the entity table
pub const MODEL: &str = r##"//! {{entity_title}} model backed by the `{{table_name}}` table.
//!
//! Generated by layergen for `{{namespace}}`. Do not edit by hand.

{{#each imports}}
use {{this}};
{{/each}}
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

{{#if entity.description}}
/// {{entity.description}}
{{else}}
/// A {{to_lower entity_title}} record.
{{/if}}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct {{entity_pascal}} {
{{#if has_external_id}}
    #[serde(skip)]
    pub id: i64,
    #[serde(rename = "id")]
    pub uuid: Uuid,
{{else}}
    pub id: i64,
{{/if}}
{{#each fields}}
{{#if description}}
    /// {{description}}
{{/if}}
    {{this.serde_attr}}
    {{this.sqlx_attr}}
{{#if validate_attr}}
    {{validate_attr}}
{{/if}}
    pub {{snake_name}}: {{this.rust_type}},
{{/each}}
{{#if has_timestamps}}
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
{{/if}}
}

impl {{entity_pascal}} {
    /// Backing table name.
    pub const TABLE_NAME: &'static str = "{{table_name}}";
{{#if has_timestamps}}

    /// Whether the record has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
{{/if}}
}
"##;

/// Persistence layer: sqlx queries against the entity table
pub const REPOSITORY: &str = r##"//! Persistence access for [`{{entity_pascal}}`] rows in `{{table_name}}`.
//!
//! Generated by layergen for `{{namespace}}`. Do not edit by hand.

use sqlx::PgPool;
{{#if has_external_id}}
use uuid::Uuid;
{{/if}}

use crate::models::{{entity_snake}}::{{entity_pascal}};

/// Repository for {{to_lower entity_title}} rows.
#[derive(Debug, Clone)]
pub struct {{entity_pascal}}Repository {
    pool: PgPool,
}

impl {{entity_pascal}}Repository {
    /// Create a repository over the given pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a row and return it as stored.
    pub async fn create(&self, {{entity_snake}}: &{{entity_pascal}}) -> Result<{{entity_pascal}}, sqlx::Error> {
        sqlx::query_as::<_, {{entity_pascal}}>(
            r"INSERT INTO {{table_name}} ({{#each fields}}{{column_name}}{{#unless @last}}, {{/unless}}{{/each}})
              VALUES ({{#each fields}}${{position}}{{#unless @last}}, {{/unless}}{{/each}})
              RETURNING *",
        )
{{#each fields}}
        .bind(&{{@root.entity_snake}}.{{snake_name}})
{{/each}}
        .fetch_one(&self.pool)
        .await
    }

    /// Fetch a live row by surrogate id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<{{entity_pascal}}>, sqlx::Error> {
        sqlx::query_as::<_, {{entity_pascal}}>(
            "SELECT * FROM {{table_name}} WHERE id = $1{{#if has_timestamps}} AND deleted_at IS NULL{{/if}}",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }
{{#if has_external_id}}

    /// Fetch a live row by external id.
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<Option<{{entity_pascal}}>, sqlx::Error> {
        sqlx::query_as::<_, {{entity_pascal}}>(
            "SELECT * FROM {{table_name}} WHERE uuid = $1{{#if has_timestamps}} AND deleted_at IS NULL{{/if}}",
        )
        .bind(uuid)
        .fetch_optional(&self.pool)
        .await
    }
{{/if}}

    /// List live rows, newest first.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<{{entity_pascal}}>, sqlx::Error> {
        sqlx::query_as::<_, {{entity_pascal}}>(
            "SELECT * FROM {{table_name}}{{#if has_timestamps}} WHERE deleted_at IS NULL ORDER BY created_at DESC{{else}} ORDER BY id DESC{{/if}} LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    /// Overwrite every field of a live row.
    pub async fn update(&self, id: i64, {{entity_snake}}: &{{entity_pascal}}) -> Result<Option<{{entity_pascal}}>, sqlx::Error> {
        sqlx::query_as::<_, {{entity_pascal}}>(
            r"UPDATE {{table_name}}
              SET {{#each fields}}{{column_name}} = ${{position}}{{#unless @last}}, {{/unless}}{{/each}}{{#if has_timestamps}}, updated_at = NOW(){{/if}}
              WHERE id = ${{inc field_count}}{{#if has_timestamps}} AND deleted_at IS NULL{{/if}}
              RETURNING *",
        )
{{#each fields}}
        .bind(&{{@root.entity_snake}}.{{snake_name}})
{{/each}}
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

{{#if has_timestamps}}
    /// Soft-delete a live row; returns whether a row was affected.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE {{table_name}} SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
{{else}}
    /// Delete a row; returns whether a row was affected.
    pub async fn delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM {{table_name}} WHERE id = $1")
{{/if}}
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count live rows.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM {{table_name}}{{#if has_timestamps}} WHERE deleted_at IS NULL{{/if}}",
        )
        .fetch_one(&self.pool)
        .await
    }
}
"##;

/// Business-logic layer: validation and not-found handling over the repository
pub const SERVICE: &str = r##"//! Business logic for [`{{entity_pascal}}`].
//!
//! Generated by layergen for `{{namespace}}`. Do not edit by hand.

use thiserror::Error;
{{#if has_external_id}}
use uuid::Uuid;
{{/if}}
use validator::Validate;

use crate::models::{{entity_snake}}::{{entity_pascal}};
use crate::repository::{{entity_snake}}_repository::{{entity_pascal}}Repository;

/// Errors raised by [`{{entity_pascal}}Service`].
#[derive(Debug, Error)]
pub enum {{entity_pascal}}ServiceError {
    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
    /// No live {{to_lower entity_title}} matched.
    #[error("{{to_lower entity_title}} not found")]
    NotFound,
    /// Storage failure.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// One page of {{to_lower entity_title}} records plus the live total.
#[derive(Debug, Clone)]
pub struct {{entity_pascal}}Page {
    pub items: Vec<{{entity_pascal}}>,
    pub total: i64,
}

/// Service over [`{{entity_pascal}}Repository`].
#[derive(Debug, Clone)]
pub struct {{entity_pascal}}Service {
    repo: {{entity_pascal}}Repository,
}

impl {{entity_pascal}}Service {
    /// Create a service backed by the given repository.
    #[must_use]
    pub const fn new(repo: {{entity_pascal}}Repository) -> Self {
        Self { repo }
    }

    /// Validate and insert.
    pub async fn create(&self, {{entity_snake}}: {{entity_pascal}}) -> Result<{{entity_pascal}}, {{entity_pascal}}ServiceError> {
        {{entity_snake}}.validate()?;
        Ok(self.repo.create(&{{entity_snake}}).await?)
    }

    /// Fetch by surrogate id.
    pub async fn get_by_id(&self, id: i64) -> Result<{{entity_pascal}}, {{entity_pascal}}ServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or({{entity_pascal}}ServiceError::NotFound)
    }
{{#if has_external_id}}

    /// Fetch by external id.
    pub async fn get_by_uuid(&self, uuid: Uuid) -> Result<{{entity_pascal}}, {{entity_pascal}}ServiceError> {
        self.repo
            .get_by_uuid(uuid)
            .await?
            .ok_or({{entity_pascal}}ServiceError::NotFound)
    }
{{/if}}

    /// List one page.
    pub async fn list(&self, limit: i64, offset: i64) -> Result<{{entity_pascal}}Page, {{entity_pascal}}ServiceError> {
        let items = self.repo.list(limit, offset).await?;
        let total = self.repo.count().await?;
        Ok({{entity_pascal}}Page { items, total })
    }

    /// Validate and overwrite.
    pub async fn update(&self, id: i64, {{entity_snake}}: {{entity_pascal}}) -> Result<{{entity_pascal}}, {{entity_pascal}}ServiceError> {
        {{entity_snake}}.validate()?;
        self.repo
            .update(id, &{{entity_snake}})
            .await?
            .ok_or({{entity_pascal}}ServiceError::NotFound)
    }

    /// Delete by surrogate id.
    pub async fn delete(&self, id: i64) -> Result<(), {{entity_pascal}}ServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err({{entity_pascal}}ServiceError::NotFound)
        }
    }
}
"##;

/// Transport layer: axum handlers and router
pub const HANDLER: &str = r##"//! HTTP handlers for [`{{entity_pascal}}`].
//!
//! Generated by layergen for `{{namespace}}`. Do not edit by hand.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
{{#if has_external_id}}
use uuid::Uuid;
{{/if}}

use crate::api::dto::{{entity_snake}}_dto::Create{{entity_pascal}}Request;
use crate::api::dto::{{entity_snake}}_dto::Update{{entity_pascal}}Request;
use crate::api::dto::{{entity_snake}}_dto::{{entity_pascal}}ListResponse;
use crate::api::dto::{{entity_snake}}_dto::{{entity_pascal}}Response;
use crate::service::{{entity_snake}}_service::{{entity_pascal}}Service;
use crate::service::{{entity_snake}}_service::{{entity_pascal}}ServiceError;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

const fn default_limit() -> i64 {
    10
}

impl IntoResponse for {{entity_pascal}}ServiceError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

/// `POST /{{to_kebab entity_plural_snake}}`
pub async fn create_{{entity_snake}}(
    State(service): State<{{entity_pascal}}Service>,
    Json(request): Json<Create{{entity_pascal}}Request>,
) -> Result<(StatusCode, Json<{{entity_pascal}}Response>), {{entity_pascal}}ServiceError> {
    let created = service.create(request.into_model()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// `GET /{{to_kebab entity_plural_snake}}/{id}`
pub async fn get_{{entity_snake}}(
    State(service): State<{{entity_pascal}}Service>,
    Path(id): Path<i64>,
) -> Result<Json<{{entity_pascal}}Response>, {{entity_pascal}}ServiceError> {
    Ok(Json(service.get_by_id(id).await?.into()))
}
{{#if has_external_id}}

/// `GET /{{to_kebab entity_plural_snake}}/by-uuid/{uuid}`
pub async fn get_{{entity_snake}}_by_uuid(
    State(service): State<{{entity_pascal}}Service>,
    Path(uuid): Path<Uuid>,
) -> Result<Json<{{entity_pascal}}Response>, {{entity_pascal}}ServiceError> {
    Ok(Json(service.get_by_uuid(uuid).await?.into()))
}
{{/if}}

/// `GET /{{to_kebab entity_plural_snake}}`
pub async fn list_{{entity_plural_snake}}(
    State(service): State<{{entity_pascal}}Service>,
    Query(params): Query<ListParams>,
) -> Result<Json<{{entity_pascal}}ListResponse>, {{entity_pascal}}ServiceError> {
    let page = service.list(params.limit, params.offset).await?;
    Ok(Json({{entity_pascal}}ListResponse {
        data: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        limit: params.limit,
        offset: params.offset,
    }))
}

/// `PUT /{{to_kebab entity_plural_snake}}/{id}`
pub async fn update_{{entity_snake}}(
    State(service): State<{{entity_pascal}}Service>,
    Path(id): Path<i64>,
    Json(request): Json<Update{{entity_pascal}}Request>,
) -> Result<Json<{{entity_pascal}}Response>, {{entity_pascal}}ServiceError> {
    let updated = service.update(id, request.into_model()).await?;
    Ok(Json(updated.into()))
}

/// `DELETE /{{to_kebab entity_plural_snake}}/{id}`
pub async fn delete_{{entity_snake}}(
    State(service): State<{{entity_pascal}}Service>,
    Path(id): Path<i64>,
) -> Result<StatusCode, {{entity_pascal}}ServiceError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Routes for the {{to_lower entity_title}} resource.
pub fn router(service: {{entity_pascal}}Service) -> Router {
    Router::new()
        .route(
            "/{{to_kebab entity_plural_snake}}",
            get(list_{{entity_plural_snake}}).post(create_{{entity_snake}}),
        )
        .route(
            "/{{to_kebab entity_plural_snake}}/{id}",
            get(get_{{entity_snake}})
                .put(update_{{entity_snake}})
                .delete(delete_{{entity_snake}}),
        )
{{#if has_external_id}}
        .route(
            "/{{to_kebab entity_plural_snake}}/by-uuid/{uuid}",
            get(get_{{entity_snake}}_by_uuid),
        )
{{/if}}
        .with_state(service)
}
"##;

/// Data-transfer objects: request payloads and response shapes
pub const DTO: &str = r##"//! Request and response shapes for [`{{entity_pascal}}`].
//!
//! Generated by layergen for `{{namespace}}`. Do not edit by hand.

{{#each imports}}
use {{this}};
{{/each}}
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{{entity_snake}}::{{entity_pascal}};

/// Payload for creating a {{to_lower entity_title}}.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Create{{entity_pascal}}Request {
{{#each fields}}
    {{this.serde_attr}}
{{#if validate_attr}}
    {{validate_attr}}
{{/if}}
    pub {{snake_name}}: {{this.rust_type}},
{{/each}}
}

impl Create{{entity_pascal}}Request {
    /// Convert into an unsaved model.
    #[must_use]
    pub fn into_model(self) -> {{entity_pascal}} {
        {{entity_pascal}} {
            id: 0,
{{#if has_external_id}}
            uuid: Uuid::nil(),
{{/if}}
{{#each fields}}
            {{snake_name}}: self.{{snake_name}},
{{/each}}
{{#if has_timestamps}}
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
{{/if}}
        }
    }
}

/// Payload for replacing a {{to_lower entity_title}}.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Update{{entity_pascal}}Request {
{{#each fields}}
    {{this.serde_attr}}
{{#if validate_attr}}
    {{validate_attr}}
{{/if}}
    pub {{snake_name}}: {{this.rust_type}},
{{/each}}
}

impl Update{{entity_pascal}}Request {
    /// Convert into a model carrying the new field values.
    #[must_use]
    pub fn into_model(self) -> {{entity_pascal}} {
        {{entity_pascal}} {
            id: 0,
{{#if has_external_id}}
            uuid: Uuid::nil(),
{{/if}}
{{#each fields}}
            {{snake_name}}: self.{{snake_name}},
{{/each}}
{{#if has_timestamps}}
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
{{/if}}
        }
    }
}

/// Public representation of a {{to_lower entity_title}}.
#[derive(Debug, Clone, Serialize)]
pub struct {{entity_pascal}}Response {
{{#if has_external_id}}
    pub id: Uuid,
{{else}}
    pub id: i64,
{{/if}}
{{#each fields}}
    {{this.serde_attr}}
    pub {{snake_name}}: {{this.rust_type}},
{{/each}}
{{#if has_timestamps}}
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
{{/if}}
}

impl From<{{entity_pascal}}> for {{entity_pascal}}Response {
    fn from({{entity_snake}}: {{entity_pascal}}) -> Self {
        Self {
{{#if has_external_id}}
            id: {{entity_snake}}.uuid,
{{else}}
            id: {{entity_snake}}.id,
{{/if}}
{{#each fields}}
            {{snake_name}}: {{@root.entity_snake}}.{{snake_name}},
{{/each}}
{{#if has_timestamps}}
            created_at: {{entity_snake}}.created_at,
            updated_at: {{entity_snake}}.updated_at,
{{/if}}
        }
    }
}

/// One page of {{to_lower entity_title}} responses.
#[derive(Debug, Clone, Serialize)]
pub struct {{entity_pascal}}ListResponse {
    pub data: Vec<{{entity_pascal}}Response>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}
"##;
