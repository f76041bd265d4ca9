//! Type discriminators.
//!
//! Every argument object carries an `(apiVersion, kind)` pair on the wire.
//! The pair selects the schema used for decoding, defaulting, and validation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// API group shared by every plugin argument kind.
pub const GROUP: &str = "kubescheduler.config.k8s.io";

/// The only served version.
pub const V1BETA1: &str = "v1beta1";

/// Inline type metadata as it appears in a wire object.
///
/// Both fields are optional on the wire; an object embedded in a larger
/// scheduler profile usually omits them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMeta {
    /// `group/version` string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    /// Kind name (e.g. `CoschedulingArgs`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TypeMeta {
    /// Type metadata for the given discriminator.
    pub fn of(gvk: &GroupVersionKind) -> Self {
        Self {
            api_version: Some(gvk.api_version()),
            kind: Some(gvk.kind.clone()),
        }
    }

    /// Whether neither field is set.
    pub fn is_empty(&self) -> bool {
        self.api_version.is_none() && self.kind.is_none()
    }

    /// Parses the embedded pair into a discriminator.
    ///
    /// Returns `None` unless both `apiVersion` and `kind` are present.
    pub fn group_version_kind(&self) -> Option<GroupVersionKind> {
        let api_version = self.api_version.as_deref()?;
        let kind = self.kind.as_deref()?;
        Some(GroupVersionKind::from_api_version(api_version, kind))
    }
}

/// Fully-qualified type discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupVersionKind {
    /// API group (empty for the core group).
    pub group: String,
    /// API version.
    pub version: String,
    /// Kind name.
    pub kind: String,
}

impl GroupVersionKind {
    /// Creates a discriminator from its parts.
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Discriminator in the served `v1beta1` version.
    pub fn v1beta1(kind: ArgsKind) -> Self {
        Self::new(GROUP, V1BETA1, kind.kind_name())
    }

    /// Splits an `apiVersion` string (`group/version` or bare `version`).
    pub fn from_api_version(api_version: &str, kind: impl Into<String>) -> Self {
        match api_version.split_once('/') {
            Some((group, version)) => Self::new(group, version, kind),
            None => Self::new("", api_version, kind),
        }
    }

    /// The `apiVersion` wire form.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// The closed set of argument kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgsKind {
    /// Gang scheduling.
    Coscheduling,
    /// Allocatable-resource scoring.
    NodeResourcesAllocatable,
    /// Elastic-quota admission.
    CapacityScheduling,
    /// CPU-utilization bin packing.
    BestFitBinPack,
}

impl ArgsKind {
    /// All kinds, in registration order.
    pub const ALL: [ArgsKind; 4] = [
        ArgsKind::Coscheduling,
        ArgsKind::NodeResourcesAllocatable,
        ArgsKind::CapacityScheduling,
        ArgsKind::BestFitBinPack,
    ];

    /// Wire `kind` value.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ArgsKind::Coscheduling => "CoschedulingArgs",
            ArgsKind::NodeResourcesAllocatable => "NodeResourcesAllocatableArgs",
            ArgsKind::CapacityScheduling => "CapacitySchedulingArgs",
            ArgsKind::BestFitBinPack => "BestFitBinPackArgs",
        }
    }

    /// Name of the scheduler plugin these arguments configure.
    pub fn plugin_name(&self) -> &'static str {
        match self {
            ArgsKind::Coscheduling => "Coscheduling",
            ArgsKind::NodeResourcesAllocatable => "NodeResourcesAllocatable",
            ArgsKind::CapacityScheduling => "CapacityScheduling",
            ArgsKind::BestFitBinPack => "BestFitBinPack",
        }
    }
}

impl fmt::Display for ArgsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind_name())
    }
}
