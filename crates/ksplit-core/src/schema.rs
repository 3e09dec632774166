//! The Swagger 2.0 document model this crate reads and rewrites.
//!
//! Only the subset of OpenAPI 2.0 needed for partitioning and reference
//! rewriting is modeled. Unknown top-level keys and unknown extensions are
//! tolerated: anything not named explicitly below round-trips through the
//! `extra`/`extensions` catch-alls.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level Swagger 2.0 envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerDocument {
    pub swagger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paths: Option<Value>,
    #[serde(default)]
    pub definitions: IndexMap<String, Schema>,
    /// Anything else the input carried (`securityDefinitions`, `tags`, ...).
    /// Preserved so unknown top-level keys survive a parse, even though
    /// per-package renders never copy this forward — a rendered package
    /// envelope only ever carries `swagger`/`info`/`paths`/`definitions`.
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A single OpenAPI 2.0 schema node.
///
/// `items` and `additionalProperties` are modeled so that the common
/// "inline schema" form both use in a Kubernetes document deserializes
/// straight into a `Schema`; `additionalProperties: true|false` (no inline
/// schema) is also tolerated via [`AdditionalProperties::Schema`]'s sibling
/// boolean variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_type_field"
    )]
    pub type_: Option<Vec<String>>,

    #[serde(default, rename = "$ref", skip_serializing_if = "str::is_empty")]
    pub ref_: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<AdditionalProperties>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    /// Vendor extensions (`x-...` keys) plus any other field this model
    /// doesn't name explicitly. Extension writers in this crate only ever
    /// insert keys starting with `x-`.
    #[serde(flatten)]
    pub extensions: IndexMap<String, Value>,
}

/// `additionalProperties` is either a boolean flag or an inline schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

impl AdditionalProperties {
    /// The inner schema, or `None` when this was a bare boolean.
    pub fn schema(&self) -> Option<&Schema> {
        match self {
            AdditionalProperties::Schema(s) => Some(s),
            AdditionalProperties::Bool(_) => None,
        }
    }

    pub fn schema_mut(&mut self) -> Option<&mut Schema> {
        match self {
            AdditionalProperties::Schema(s) => Some(s),
            AdditionalProperties::Bool(_) => None,
        }
    }
}

fn deserialize_type_field<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    let value: Option<OneOrMany> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    }))
}

impl Schema {
    /// True iff this schema's declared type list is empty or exactly
    /// `["object"]`, it declares no properties, and has no
    /// `additionalProperties` — the polymorphic shape the planner
    /// registers as an interface.
    pub fn is_polymorphic_shaped(&self) -> bool {
        let type_is_bare_object_or_absent = match &self.type_ {
            None => true,
            Some(types) => types.as_slice() == ["object"],
        };

        let has_no_properties = self
            .properties
            .as_ref()
            .map(|p| p.is_empty())
            .unwrap_or(true);

        type_is_bare_object_or_absent && has_no_properties && self.additional_properties.is_none()
    }

    pub fn set_extension(&mut self, key: &str, value: Value) {
        self.extensions.insert(key.to_string(), value);
    }

    pub fn is_required(required: &[String], name: &str) -> bool {
        required.iter().any(|r| r == name)
    }
}
