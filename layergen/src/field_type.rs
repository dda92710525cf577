//! Field type vocabulary and the tag synthesis rules built on it
//!
//! # Supported Field Types
//!
//! | tag | Rust | SQL |
//! |---|---|---|
//! | `string` | `String` | `VARCHAR(n)`, 255 when no length is given |
//! | `text` | `String` | `TEXT` |
//! | `int`, `integer` | `i32` | `INTEGER` |
//! | `bigint` | `i64` | `BIGINT` |
//! | `float` | `f64` | `DOUBLE PRECISION` |
//! | `decimal` | `Decimal` | `NUMERIC(19,4)` |
//! | `bool`, `boolean` | `bool` | `BOOLEAN` |
//! | `date` | `NaiveDate` | `DATE` |
//! | `datetime` | `NaiveDateTime` | `TIMESTAMP` |
//! | `timestamp` | `DateTime<Utc>` | `TIMESTAMPTZ` |
//! | `json` | `JsonValue` | `JSONB` |
//! | `uuid` | `Uuid` | `UUID` |
//!
//! Any other tag is kept verbatim as [`FieldType::Other`] and maps like
//! `string`. Optional fields wrap their Rust type in `Option<..>`.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::case::to_snake_case;

const DEFAULT_VARCHAR_LENGTH: u32 = 255;

/// Field type enumeration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// String with max length (VARCHAR)
    String,
    /// Text (unlimited length)
    Text,
    /// 32-bit integer
    Integer,
    /// 64-bit integer
    BigInt,
    /// 64-bit float
    Float,
    /// Fixed-point decimal
    Decimal,
    /// Boolean
    Boolean,
    /// Date (no time)
    Date,
    /// `DateTime` (no timezone)
    DateTime,
    /// Timestamp (with timezone)
    Timestamp,
    /// JSON value
    Json,
    /// UUID
    Uuid,
    /// Unrecognised tag, represented like [`FieldType::String`]
    Other(String),
}

impl FieldType {
    /// Every recognised type, in documentation order
    pub const KNOWN: &'static [Self] = &[
        Self::String,
        Self::Text,
        Self::Integer,
        Self::BigInt,
        Self::Float,
        Self::Decimal,
        Self::Boolean,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
        Self::Json,
        Self::Uuid,
    ];

    /// Parse a type tag; matching is case-insensitive and never fails
    ///
    /// ```
    /// # use layergen::field_type::FieldType;
    /// assert_eq!(FieldType::parse("INT"), FieldType::Integer);
    /// assert_eq!(FieldType::parse("boolean"), FieldType::Boolean);
    /// assert_eq!(FieldType::parse("money"), FieldType::Other("money".into()));
    /// ```
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "string" => Self::String,
            "text" => Self::Text,
            "int" | "integer" => Self::Integer,
            "bigint" => Self::BigInt,
            "float" => Self::Float,
            "decimal" => Self::Decimal,
            "bool" | "boolean" => Self::Boolean,
            "date" => Self::Date,
            "datetime" => Self::DateTime,
            "timestamp" => Self::Timestamp,
            "json" => Self::Json,
            "uuid" => Self::Uuid,
            _ => Self::Other(tag.to_string()),
        }
    }

    /// Canonical tag
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Json => "json",
            Self::Uuid => "uuid",
            Self::Other(tag) => tag,
        }
    }

    /// Rust type for a required value of this type
    #[must_use]
    pub const fn rust_type(&self) -> &'static str {
        match self {
            Self::String | Self::Text | Self::Other(_) => "String",
            Self::Integer => "i32",
            Self::BigInt => "i64",
            Self::Float => "f64",
            Self::Decimal => "Decimal",
            Self::Boolean => "bool",
            Self::Date => "NaiveDate",
            Self::DateTime => "NaiveDateTime",
            Self::Timestamp => "DateTime<Utc>",
            Self::Json => "JsonValue",
            Self::Uuid => "Uuid",
        }
    }

    /// PostgreSQL column type; `length` only affects string-like types
    ///
    /// ```
    /// # use layergen::field_type::FieldType;
    /// assert_eq!(FieldType::String.sql_type(Some(100)), "VARCHAR(100)");
    /// assert_eq!(FieldType::String.sql_type(None), "VARCHAR(255)");
    /// assert_eq!(FieldType::Decimal.sql_type(None), "NUMERIC(19,4)");
    /// ```
    #[must_use]
    pub fn sql_type(&self, length: Option<u32>) -> String {
        match self {
            Self::String | Self::Other(_) => {
                let length = length
                    .filter(|len| *len > 0)
                    .unwrap_or(DEFAULT_VARCHAR_LENGTH);
                format!("VARCHAR({length})")
            }
            Self::Text => "TEXT".to_string(),
            Self::Integer => "INTEGER".to_string(),
            Self::BigInt => "BIGINT".to_string(),
            Self::Float => "DOUBLE PRECISION".to_string(),
            Self::Decimal => "NUMERIC(19,4)".to_string(),
            Self::Boolean => "BOOLEAN".to_string(),
            Self::Date => "DATE".to_string(),
            Self::DateTime => "TIMESTAMP".to_string(),
            Self::Timestamp => "TIMESTAMPTZ".to_string(),
            Self::Json => "JSONB".to_string(),
            Self::Uuid => "UUID".to_string(),
        }
    }

    /// Whether values map to a Rust `String`
    #[must_use]
    pub const fn is_textual(&self) -> bool {
        matches!(self, Self::String | Self::Text | Self::Other(_))
    }

    /// `use` path the generated code needs for this type, if any
    #[must_use]
    pub const fn import(&self) -> Option<&'static str> {
        match self {
            Self::Decimal => Some("rust_decimal::Decimal"),
            Self::Date => Some("chrono::NaiveDate"),
            Self::DateTime => Some("chrono::NaiveDateTime"),
            Self::Timestamp => Some(TIMESTAMP_IMPORT),
            Self::Json => Some("serde_json::Value as JsonValue"),
            Self::Uuid => Some(UUID_IMPORT),
            _ => None,
        }
    }
}

/// Import every generated model needs for its audit timestamps
pub const TIMESTAMP_IMPORT: &str = "chrono::{DateTime, Utc}";

/// Import needed for external ids and `uuid` fields
pub const UUID_IMPORT: &str = "uuid::Uuid";

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FieldType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<String> for FieldType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.tag().to_string()
    }
}

/// Rust type of a field, wrapped in `Option` when the field is not required
///
/// ```
/// # use layergen::field_type::{rust_type, FieldType};
/// assert_eq!(rust_type(&FieldType::Integer, true), "i32");
/// assert_eq!(rust_type(&FieldType::Integer, false), "Option<i32>");
/// ```
#[must_use]
pub fn rust_type(field_type: &FieldType, required: bool) -> String {
    let base = field_type.rust_type();
    if required {
        base.to_string()
    } else {
        format!("Option<{base}>")
    }
}

/// Validation rules for a field, comma-joined; `None` when there are none
///
/// ```
/// # use layergen::field_type::validation_rules;
/// assert_eq!(validation_rules(true, Some(100)).as_deref(), Some("required, length(max = 100)"));
/// assert_eq!(validation_rules(false, None), None);
/// ```
#[must_use]
pub fn validation_rules(required: bool, length: Option<u32>) -> Option<String> {
    let mut rules = Vec::new();
    if required {
        rules.push("required".to_string());
    }
    if let Some(max) = length.filter(|len| *len > 0) {
        rules.push(format!("length(max = {max})"));
    }
    if rules.is_empty() {
        None
    } else {
        Some(rules.join(", "))
    }
}

/// `#[validate(..)]` attribute for a field, in terms the `validator` crate accepts
///
/// Only text types get rules: `length(min = 1)` for a required value and
/// `length(max = N)` for a positive length. `Option` wrapping already
/// expresses optionality, so no `required` rule is emitted.
///
/// ```
/// # use layergen::field_type::{validate_attr, FieldType};
/// assert_eq!(
///     validate_attr(&FieldType::String, true, Some(100)).as_deref(),
///     Some("#[validate(length(min = 1, max = 100))]")
/// );
/// assert_eq!(validate_attr(&FieldType::Integer, true, Some(10)), None);
/// ```
#[must_use]
pub fn validate_attr(field_type: &FieldType, required: bool, length: Option<u32>) -> Option<String> {
    if !field_type.is_textual() {
        return None;
    }
    let mut bounds = Vec::new();
    if required {
        bounds.push("min = 1".to_string());
    }
    if let Some(max) = length.filter(|len| *len > 0) {
        bounds.push(format!("max = {max}"));
    }
    if bounds.is_empty() {
        None
    } else {
        Some(format!("#[validate(length({}))]", bounds.join(", ")))
    }
}

/// Serde attribute for a field
///
/// ```
/// # use layergen::field_type::serde_attr;
/// assert_eq!(serde_attr("createdDate", true), r#"#[serde(rename = "created_date")]"#);
/// assert_eq!(
///     serde_attr("bio", false),
///     r#"#[serde(rename = "bio", default, skip_serializing_if = "Option::is_none")]"#
/// );
/// ```
#[must_use]
pub fn serde_attr(field_name: &str, required: bool) -> String {
    let column = to_snake_case(field_name);
    if required {
        format!("#[serde(rename = \"{column}\")]")
    } else {
        format!(
            "#[serde(rename = \"{column}\", default, skip_serializing_if = \"Option::is_none\")]"
        )
    }
}

/// sqlx column-mapping attribute for a field
#[must_use]
pub fn sqlx_attr(field_name: &str) -> String {
    format!("#[sqlx(rename = \"{}\")]", to_snake_case(field_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocabulary() {
        assert_eq!(FieldType::parse("string"), FieldType::String);
        assert_eq!(FieldType::parse("text"), FieldType::Text);
        assert_eq!(FieldType::parse("int"), FieldType::Integer);
        assert_eq!(FieldType::parse("integer"), FieldType::Integer);
        assert_eq!(FieldType::parse("bigint"), FieldType::BigInt);
        assert_eq!(FieldType::parse("float"), FieldType::Float);
        assert_eq!(FieldType::parse("decimal"), FieldType::Decimal);
        assert_eq!(FieldType::parse("bool"), FieldType::Boolean);
        assert_eq!(FieldType::parse("boolean"), FieldType::Boolean);
        assert_eq!(FieldType::parse("date"), FieldType::Date);
        assert_eq!(FieldType::parse("datetime"), FieldType::DateTime);
        assert_eq!(FieldType::parse("timestamp"), FieldType::Timestamp);
        assert_eq!(FieldType::parse("json"), FieldType::Json);
        assert_eq!(FieldType::parse("uuid"), FieldType::Uuid);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(FieldType::parse("BigInt"), FieldType::BigInt);
        assert_eq!(FieldType::parse(" UUID "), FieldType::Uuid);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_string() {
        let ty = FieldType::parse("geometry");
        assert_eq!(ty, FieldType::Other("geometry".into()));
        assert_eq!(ty.rust_type(), "String");
        assert_eq!(ty.sql_type(None), "VARCHAR(255)");
        assert_eq!(ty.tag(), "geometry");
    }

    #[test]
    fn test_rust_mapping() {
        let expected = [
            "String",
            "String",
            "i32",
            "i64",
            "f64",
            "Decimal",
            "bool",
            "NaiveDate",
            "NaiveDateTime",
            "DateTime<Utc>",
            "JsonValue",
            "Uuid",
        ];
        for (ty, rust) in FieldType::KNOWN.iter().zip(expected) {
            assert_eq!(ty.rust_type(), rust, "{ty}");
        }
    }

    #[test]
    fn test_sql_mapping() {
        assert_eq!(FieldType::String.sql_type(Some(0)), "VARCHAR(255)");
        assert_eq!(FieldType::Text.sql_type(Some(10)), "TEXT");
        assert_eq!(FieldType::Integer.sql_type(None), "INTEGER");
        assert_eq!(FieldType::Float.sql_type(None), "DOUBLE PRECISION");
        assert_eq!(FieldType::Timestamp.sql_type(None), "TIMESTAMPTZ");
        assert_eq!(FieldType::Json.sql_type(None), "JSONB");
    }

    #[test]
    fn test_optional_wraps_rust_type() {
        assert_eq!(rust_type(&FieldType::String, false), "Option<String>");
        assert_eq!(
            rust_type(&FieldType::Timestamp, false),
            "Option<DateTime<Utc>>"
        );
        assert_eq!(rust_type(&FieldType::Uuid, true), "Uuid");
    }

    #[test]
    fn test_validation_rules() {
        assert_eq!(validation_rules(true, None).as_deref(), Some("required"));
        assert_eq!(
            validation_rules(false, Some(50)).as_deref(),
            Some("length(max = 50)")
        );
        assert_eq!(validation_rules(false, Some(0)), None);
    }

    #[test]
    fn test_validate_attr_fits_the_rust_type() {
        assert_eq!(
            validate_attr(&FieldType::String, true, None).as_deref(),
            Some("#[validate(length(min = 1))]")
        );
        assert_eq!(
            validate_attr(&FieldType::Text, false, Some(500)).as_deref(),
            Some("#[validate(length(max = 500))]")
        );
        assert_eq!(
            validate_attr(&FieldType::Other("citext".into()), true, Some(40)).as_deref(),
            Some("#[validate(length(min = 1, max = 40))]")
        );
        assert_eq!(validate_attr(&FieldType::Integer, true, Some(10)), None);
        assert_eq!(validate_attr(&FieldType::Boolean, false, Some(1)), None);
        assert_eq!(validate_attr(&FieldType::Date, true, None), None);
        assert_eq!(validate_attr(&FieldType::String, false, None), None);
    }

    #[test]
    fn test_sqlx_attr_uses_snake_case() {
        assert_eq!(sqlx_attr("firstName"), "#[sqlx(rename = \"first_name\")]");
    }

    #[test]
    fn test_serde_round_trip_keeps_canonical_tag() {
        let ty: FieldType = serde_json::from_str("\"INT\"").unwrap();
        assert_eq!(ty, FieldType::Integer);
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"integer\"");
    }

    #[test]
    fn test_imports() {
        assert_eq!(FieldType::String.import(), None);
        assert_eq!(FieldType::Uuid.import(), Some(UUID_IMPORT));
        assert_eq!(FieldType::Timestamp.import(), Some(TIMESTAMP_IMPORT));
        assert_eq!(
            FieldType::Json.import(),
            Some("serde_json::Value as JsonValue")
        );
    }
}
