//! Allocatable-resource scoring arguments.
//!
//! Nodes are scored by a weighted sum of their allocatable resources.
//! The order of `resources` is the order in which per-resource scores
//! are combined.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Weight of one CPU millicore; with memory at 1, one MiB weighs as much as 1m.
pub const DEFAULT_CPU_WEIGHT: i64 = 1 << 20;

/// Weight of one byte of memory.
pub const DEFAULT_MEMORY_WEIGHT: i64 = 1;

/// A resource considered when scoring, with its weight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceSpec {
    /// Resource name (e.g. `cpu`, `memory`, `nvidia.com/gpu`).
    pub name: String,
    /// Relative weight, at least 1.
    pub weight: i64,
}

impl ResourceSpec {
    /// Creates a resource spec.
    pub fn new(name: impl Into<String>, weight: i64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Whether to prefer nodes with least or most allocatable resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ModeType {
    /// Prefer nodes with the least allocatable (pack).
    #[default]
    Least,
    /// Prefer nodes with the most allocatable (spread).
    Most,
}

impl ModeType {
    /// Every supported value, as written on the wire.
    pub const SUPPORTED: [&'static str; 2] = ["Least", "Most"];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModeType::Least => "Least",
            ModeType::Most => "Most",
        }
    }
}

impl fmt::Display for ModeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a mode outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedMode(pub String);

impl FromStr for ModeType {
    type Err = UnsupportedMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Least" => Ok(ModeType::Least),
            "Most" => Ok(ModeType::Most),
            other => Err(UnsupportedMode(other.to_string())),
        }
    }
}

/// Validated arguments for the NodeResourcesAllocatable plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeResourcesAllocatableArgs {
    /// Resources to score, in combination order.
    pub resources: Vec<ResourceSpec>,
    /// Scoring direction.
    pub mode: ModeType,
}

impl Default for NodeResourcesAllocatableArgs {
    fn default() -> Self {
        Self {
            resources: default_resources(),
            mode: ModeType::Least,
        }
    }
}

impl NodeResourcesAllocatableArgs {
    /// Creates arguments scoring the given resources.
    pub fn new(resources: Vec<ResourceSpec>, mode: ModeType) -> Self {
        Self { resources, mode }
    }

    /// Weight of a resource (`None` if not scored).
    pub fn weight_of(&self, name: &str) -> Option<i64> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.weight)
    }

    /// Sum of all weights, or `None` if it does not fit in an `i64`.
    pub fn total_weight(&self) -> Option<i64> {
        self.resources
            .iter()
            .try_fold(0i64, |total, r| total.checked_add(r.weight))
    }
}

/// The resource set used when none is configured.
pub fn default_resources() -> Vec<ResourceSpec> {
    vec![
        ResourceSpec::new("cpu", DEFAULT_CPU_WEIGHT),
        ResourceSpec::new("memory", DEFAULT_MEMORY_WEIGHT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!("Least".parse::<ModeType>(), Ok(ModeType::Least));
        assert_eq!("Most".parse::<ModeType>(), Ok(ModeType::Most));
        assert_eq!(
            "least".parse::<ModeType>(),
            Err(UnsupportedMode("least".into()))
        );
        assert!("Bogus".parse::<ModeType>().is_err());
    }

    #[test]
    fn test_mode_display_matches_supported() {
        assert_eq!(ModeType::Least.to_string(), ModeType::SUPPORTED[0]);
        assert_eq!(ModeType::Most.to_string(), ModeType::SUPPORTED[1]);
    }

    #[test]
    fn test_default_resources() {
        let args = NodeResourcesAllocatableArgs::default();
        assert_eq!(args.mode, ModeType::Least);
        assert_eq!(args.weight_of("cpu"), Some(1 << 20));
        assert_eq!(args.weight_of("memory"), Some(1));
        assert_eq!(args.weight_of("gpu"), None);
        assert_eq!(args.total_weight(), Some((1 << 20) + 1));
    }

    #[test]
    fn test_total_weight_overflow() {
        let args = NodeResourcesAllocatableArgs::new(
            vec![
                ResourceSpec::new("cpu", i64::MAX),
                ResourceSpec::new("memory", i64::MAX),
            ],
            ModeType::Least,
        );
        assert_eq!(args.total_weight(), None);
        assert_eq!(args.weight_of("memory"), Some(i64::MAX));
    }

    #[test]
    fn test_order_preserved() {
        let args = NodeResourcesAllocatableArgs::new(
            vec![ResourceSpec::new("memory", 1), ResourceSpec::new("cpu", 3)],
            ModeType::Most,
        );
        let names: Vec<_> = args.resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["memory", "cpu"]);
    }
}
