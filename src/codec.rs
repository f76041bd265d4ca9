//! JSON/YAML codec for argument objects.
//!
//! Decoding sniffs the inline `apiVersion`/`kind`, resolves the schema, and
//! in strict mode rejects keys the schema does not declare, including keys
//! inside resource list entries. Encoding writes a snapshot back out with
//! its discriminator and every field set.
//!
//! YAML is decoded straight into the wire types. Going through a JSON value
//! would turn `.nan` and `.inf` into `null`, which reads as unset.

use serde_json::Value;
use tracing::debug;

use crate::error::{ArgsError, DecodeError, EncodeError, Result};
use crate::meta::GroupVersionKind;
use crate::models::PluginArgs;
use crate::registry::{Schema, SchemaRegistry};
use crate::v1beta1::RawArgs;
use crate::validation::FieldPath;

/// Decoder/encoder bound to a registry.
#[derive(Debug, Clone, Copy)]
pub struct Codec<'a> {
    registry: &'a SchemaRegistry,
    strict: bool,
}

impl<'a> Codec<'a> {
    /// A strict codec: undeclared keys are errors.
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            strict: true,
        }
    }

    /// Ignores undeclared keys instead of rejecting them.
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Whether undeclared keys are rejected.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Decodes a JSON document.
    pub fn decode_json(&self, input: &str) -> Result<(GroupVersionKind, RawArgs)> {
        let value: Value = serde_json::from_str(input).map_err(DecodeError::from)?;
        self.decode_value(value)
    }

    /// Decodes a YAML document.
    pub fn decode_yaml(&self, input: &str) -> Result<(GroupVersionKind, RawArgs)> {
        let value: serde_yaml::Value = serde_yaml::from_str(input).map_err(DecodeError::from)?;
        let map = value.as_mapping().ok_or(DecodeError::NotAMapping)?;
        let header = |key: &str| map.get(key).and_then(serde_yaml::Value::as_str);
        let (gvk, schema) = self.schema_for(header("apiVersion"), header("kind"))?;

        if self.strict {
            if let Some(field) = undeclared_yaml_key(schema, map) {
                return Err(unknown_field(schema, field));
            }
        }

        let raw = RawArgs::from_yaml_value(schema.kind(), value).map_err(DecodeError::from)?;
        debug!(discriminator = %gvk, "decoded plugin args");
        Ok((gvk, raw))
    }

    /// Decodes an already-parsed JSON document.
    pub fn decode_value(&self, value: Value) -> Result<(GroupVersionKind, RawArgs)> {
        let map = value.as_object().ok_or(DecodeError::NotAMapping)?;
        let header = |key: &str| map.get(key).and_then(Value::as_str);
        let (gvk, schema) = self.schema_for(header("apiVersion"), header("kind"))?;

        if self.strict {
            if let Some(field) = undeclared_json_key(schema, map) {
                return Err(unknown_field(schema, field));
            }
        }

        let raw = RawArgs::from_value(schema.kind(), value).map_err(DecodeError::from)?;
        debug!(discriminator = %gvk, "decoded plugin args");
        Ok((gvk, raw))
    }

    /// Encodes a snapshot as pretty-printed JSON.
    pub fn encode_json(&self, args: &PluginArgs) -> Result<String> {
        let wire = RawArgs::try_from(args)?;
        Ok(serde_json::to_string_pretty(&wire).map_err(EncodeError::Json)?)
    }

    /// Encodes a snapshot as YAML.
    pub fn encode_yaml(&self, args: &PluginArgs) -> Result<String> {
        let wire = RawArgs::try_from(args)?;
        Ok(serde_yaml::to_string(&wire).map_err(EncodeError::Yaml)?)
    }

    fn schema_for(
        &self,
        api_version: Option<&str>,
        kind: Option<&str>,
    ) -> Result<(GroupVersionKind, &'a Schema)> {
        let api_version = api_version.ok_or(DecodeError::MissingDiscriminator("apiVersion"))?;
        let kind = kind.ok_or(DecodeError::MissingDiscriminator("kind"))?;
        let gvk = GroupVersionKind::from_api_version(api_version, kind);
        let schema = self
            .registry
            .lookup(&gvk)
            .ok_or_else(|| ArgsError::UnknownSchema(gvk.clone()))?;
        Ok((gvk, schema))
    }
}

fn unknown_field(schema: &Schema, field: String) -> ArgsError {
    DecodeError::UnknownField {
        kind: schema.kind(),
        field,
    }
    .into()
}

fn entry_keys(schema: &Schema, key: &str) -> Option<&'static [&'static str]> {
    schema.field(key).and_then(|f| f.field_type.entry_keys())
}

fn is_allowed(allowed: &[&str], key: &str) -> bool {
    allowed.iter().any(|a| *a == key)
}

// First undeclared key as a field path, e.g. `resources[0].wieght`.
fn undeclared_json_key(schema: &Schema, map: &serde_json::Map<String, Value>) -> Option<String> {
    for (key, value) in map {
        if !schema.accepts_key(key) {
            return Some(key.clone());
        }
        let (Some(allowed), Some(entries)) = (entry_keys(schema, key), value.as_array()) else {
            continue;
        };
        for (i, entry) in entries.iter().enumerate() {
            let undeclared = entry
                .as_object()
                .and_then(|e| e.keys().find(|k| !is_allowed(allowed, k)));
            if let Some(field) = undeclared {
                return Some(FieldPath::new(key.as_str()).index(i).child(field).to_string());
            }
        }
    }
    None
}

fn yaml_key(key: &serde_yaml::Value) -> String {
    key.as_str().map_or_else(|| format!("{key:?}"), str::to_string)
}

fn undeclared_yaml_key(schema: &Schema, map: &serde_yaml::Mapping) -> Option<String> {
    for (key, value) in map {
        let Some(name) = key.as_str().filter(|k| schema.accepts_key(k)) else {
            return Some(yaml_key(key));
        };
        let (Some(allowed), Some(entries)) = (entry_keys(schema, name), value.as_sequence()) else {
            continue;
        };
        for (i, entry) in entries.iter().enumerate() {
            let undeclared = entry.as_mapping().and_then(|e| {
                e.keys().find(|k| !k.as_str().is_some_and(|k| is_allowed(allowed, k)))
            });
            if let Some(field) = undeclared {
                return Some(FieldPath::new(name).index(i).child(&yaml_key(field)).to_string());
            }
        }
    }
    None
}
