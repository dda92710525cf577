//! PostgreSQL migration template bodies

/// Forward migration: table, audit columns and indexes
pub const MIGRATION_UP: &str = r##"-- Create {{table_name}} table for {{entity_pascal}}
CREATE TABLE IF NOT EXISTS {{table_name}} (
    id BIGSERIAL PRIMARY KEY,
{{#if has_external_id}}
    uuid UUID NOT NULL UNIQUE DEFAULT gen_random_uuid(),
{{/if}}
{{#each fields}}
    {{column_name}} {{this.sql_type}}{{#if required}} NOT NULL{{/if}}{{#if default_value}} DEFAULT {{default_value}}{{/if}}{{#unless @last}},{{else}}{{#if @root.has_timestamps}},{{/if}}{{/unless}}
{{/each}}
{{#if has_timestamps}}
    created_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    deleted_at TIMESTAMPTZ
{{/if}}
);
{{#if has_external_id}}

CREATE INDEX IF NOT EXISTS idx_{{to_snake table_name}}_uuid ON {{table_name}}(uuid);
{{/if}}
{{#if has_timestamps}}

CREATE INDEX IF NOT EXISTS idx_{{to_snake table_name}}_deleted_at ON {{table_name}}(deleted_at);
CREATE INDEX IF NOT EXISTS idx_{{to_snake table_name}}_created_at ON {{table_name}}(created_at);
{{/if}}
"##;

/// Rollback migration: drops the table
pub const MIGRATION_DOWN: &str = r##"-- Drop {{table_name}} table for {{entity_pascal}}
DROP TABLE IF EXISTS {{table_name}};
"##;
