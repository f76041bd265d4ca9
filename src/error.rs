//! Error types.

use std::time::Duration;

use thiserror::Error;

use crate::meta::{ArgsKind, GroupVersionKind};
use crate::validation::ValidationError;

/// Errors returned while building plugin arguments.
///
/// All of them are fatal to the plugin's initialization; none is transient.
#[derive(Debug, Error)]
pub enum ArgsError {
    /// No schema is registered for the discriminator.
    #[error("no schema registered for {0}")]
    UnknownSchema(GroupVersionKind),

    /// The object does not belong to the schema its discriminator selects.
    #[error("{discriminator} does not match the {found} argument object")]
    KindMismatch {
        discriminator: GroupVersionKind,
        found: String,
    },

    /// One or more invariants are violated.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The wire bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A snapshot could not be written out.
    #[error("failed to encode plugin args: {0}")]
    Encode(#[from] EncodeError),
}

impl ArgsError {
    /// Whether the discriminator was unknown or pointed at the wrong schema.
    pub fn is_unknown_schema(&self) -> bool {
        matches!(
            self,
            ArgsError::UnknownSchema(_) | ArgsError::KindMismatch { .. }
        )
    }

    /// The validation error, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ArgsError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Errors decoding wire input.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("plugin arguments must be a mapping")]
    NotAMapping,

    #[error("plugin arguments are missing `{0}`")]
    MissingDiscriminator(&'static str),

    #[error("unknown field `{field}` in {kind}")]
    UnknownField { kind: ArgsKind, field: String },
}

/// Errors writing a snapshot back to the wire.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write JSON: {0}")]
    Json(#[source] serde_json::Error),

    #[error("failed to write YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// Wire durations are whole seconds that fit in an `i64`.
    #[error("{field} is {duration:?}, which is not a whole number of wire seconds")]
    InexactDuration {
        field: &'static str,
        duration: Duration,
    },

    #[error("{field} is {value}, which is not a finite number")]
    NonFinite { field: &'static str, value: f64 },
}

/// Errors building a schema registry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("a schema is already registered for {0}")]
    DuplicateSchema(GroupVersionKind),
}

pub type Result<T> = std::result::Result<T, ArgsError>;
