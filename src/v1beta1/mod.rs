//! The `kubescheduler.config.k8s.io/v1beta1` wire schema.
//!
//! Wire objects are what an operator writes: partially populated, with an
//! optional inline discriminator. They go through [`SetDefaults`] and then
//! [`crate::validation`] before anything reads them.

mod conversion;
mod defaults;
mod types;

pub use defaults::{
    SetDefaults, DEFAULT_CPU_REQUESTS, DEFAULT_KUBE_CONFIG_PATH, DEFAULT_MODE,
    DEFAULT_PERMIT_WAITING_TIME_SECONDS, DEFAULT_POD_GROUP_EXPIRATION_TIME_SECONDS,
    DEFAULT_POD_GROUP_GC_INTERVAL_SECONDS, DEFAULT_TARGET_CPU_UTILIZATION,
};
pub use types::{
    BestFitBinPackArgs, CapacitySchedulingArgs, CoschedulingArgs, NodeResourcesAllocatableArgs,
    ResourceSpec,
};

use serde::Serialize;

use crate::meta::{ArgsKind, TypeMeta};

/// A decoded, not yet defaulted, argument object of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawArgs {
    /// Gang scheduling.
    Coscheduling(CoschedulingArgs),
    /// Allocatable-resource scoring.
    NodeResourcesAllocatable(NodeResourcesAllocatableArgs),
    /// Elastic-quota admission.
    CapacityScheduling(CapacitySchedulingArgs),
    /// CPU-utilization bin packing.
    BestFitBinPack(BestFitBinPackArgs),
}

impl RawArgs {
    /// An object of the given kind with every field unset.
    pub fn empty(kind: ArgsKind) -> Self {
        match kind {
            ArgsKind::Coscheduling => RawArgs::Coscheduling(Default::default()),
            ArgsKind::NodeResourcesAllocatable => {
                RawArgs::NodeResourcesAllocatable(Default::default())
            }
            ArgsKind::CapacityScheduling => RawArgs::CapacityScheduling(Default::default()),
            ArgsKind::BestFitBinPack => RawArgs::BestFitBinPack(Default::default()),
        }
    }

    /// Deserializes a JSON value as the given kind.
    pub fn from_value(kind: ArgsKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            ArgsKind::Coscheduling => RawArgs::Coscheduling(serde_json::from_value(value)?),
            ArgsKind::NodeResourcesAllocatable => {
                RawArgs::NodeResourcesAllocatable(serde_json::from_value(value)?)
            }
            ArgsKind::CapacityScheduling => {
                RawArgs::CapacityScheduling(serde_json::from_value(value)?)
            }
            ArgsKind::BestFitBinPack => RawArgs::BestFitBinPack(serde_json::from_value(value)?),
        })
    }

    /// Deserializes a YAML value as the given kind.
    ///
    /// YAML carries `.nan` and `.inf`, which a JSON value cannot hold, so
    /// YAML input is never routed through [`Self::from_value`].
    pub fn from_yaml_value(kind: ArgsKind, value: serde_yaml::Value) -> serde_yaml::Result<Self> {
        Ok(match kind {
            ArgsKind::Coscheduling => RawArgs::Coscheduling(serde_yaml::from_value(value)?),
            ArgsKind::NodeResourcesAllocatable => {
                RawArgs::NodeResourcesAllocatable(serde_yaml::from_value(value)?)
            }
            ArgsKind::CapacityScheduling => {
                RawArgs::CapacityScheduling(serde_yaml::from_value(value)?)
            }
            ArgsKind::BestFitBinPack => RawArgs::BestFitBinPack(serde_yaml::from_value(value)?),
        })
    }

    /// Kind of the wrapped object.
    pub fn kind(&self) -> ArgsKind {
        match self {
            RawArgs::Coscheduling(_) => ArgsKind::Coscheduling,
            RawArgs::NodeResourcesAllocatable(_) => ArgsKind::NodeResourcesAllocatable,
            RawArgs::CapacityScheduling(_) => ArgsKind::CapacityScheduling,
            RawArgs::BestFitBinPack(_) => ArgsKind::BestFitBinPack,
        }
    }

    /// Inline type metadata.
    pub fn type_meta(&self) -> &TypeMeta {
        match self {
            RawArgs::Coscheduling(args) => &args.type_meta,
            RawArgs::NodeResourcesAllocatable(args) => &args.type_meta,
            RawArgs::CapacityScheduling(args) => &args.type_meta,
            RawArgs::BestFitBinPack(args) => &args.type_meta,
        }
    }

    /// Mutable inline type metadata.
    pub fn type_meta_mut(&mut self) -> &mut TypeMeta {
        match self {
            RawArgs::Coscheduling(args) => &mut args.type_meta,
            RawArgs::NodeResourcesAllocatable(args) => &mut args.type_meta,
            RawArgs::CapacityScheduling(args) => &mut args.type_meta,
            RawArgs::BestFitBinPack(args) => &mut args.type_meta,
        }
    }
}

impl Serialize for RawArgs {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RawArgs::Coscheduling(args) => args.serialize(serializer),
            RawArgs::NodeResourcesAllocatable(args) => args.serialize(serializer),
            RawArgs::CapacityScheduling(args) => args.serialize(serializer),
            RawArgs::BestFitBinPack(args) => args.serialize(serializer),
        }
    }
}

impl From<CoschedulingArgs> for RawArgs {
    fn from(args: CoschedulingArgs) -> Self {
        RawArgs::Coscheduling(args)
    }
}

impl From<NodeResourcesAllocatableArgs> for RawArgs {
    fn from(args: NodeResourcesAllocatableArgs) -> Self {
        RawArgs::NodeResourcesAllocatable(args)
    }
}

impl From<CapacitySchedulingArgs> for RawArgs {
    fn from(args: CapacitySchedulingArgs) -> Self {
        RawArgs::CapacityScheduling(args)
    }
}

impl From<BestFitBinPackArgs> for RawArgs {
    fn from(args: BestFitBinPackArgs) -> Self {
        RawArgs::BestFitBinPack(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_matches_kind() {
        for kind in ArgsKind::ALL {
            let raw = RawArgs::empty(kind);
            assert_eq!(raw.kind(), kind);
            assert!(raw.type_meta().is_empty());
        }
    }

    #[test]
    fn test_from_value() {
        let raw = RawArgs::from_value(
            ArgsKind::BestFitBinPack,
            json!({"targetCPUUtilization": 50.5}),
        )
        .unwrap();
        match raw {
            RawArgs::BestFitBinPack(args) => {
                assert_eq!(args.target_cpu_utilization, Some(50.5));
                assert!(args.default_cpu_requests.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_from_value_type_error() {
        let err = RawArgs::from_value(
            ArgsKind::Coscheduling,
            json!({"permitWaitingTimeSeconds": "soon"}),
        );
        assert!(err.is_err());
    }

    #[test]
    fn test_from_yaml_value_keeps_non_finite() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("targetCPUUtilization: .inf").unwrap();
        match RawArgs::from_yaml_value(ArgsKind::BestFitBinPack, value).unwrap() {
            RawArgs::BestFitBinPack(args) => {
                assert_eq!(args.target_cpu_utilization, Some(f64::INFINITY));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_serialize_untagged() {
        let raw = RawArgs::from(CapacitySchedulingArgs {
            type_meta: TypeMeta::default(),
            kube_config_path: Some("/a".into()),
        });
        assert_eq!(
            serde_json::to_value(&raw).unwrap(),
            json!({"kubeConfigPath": "/a"})
        );
    }
}
