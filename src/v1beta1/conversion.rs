//! Snapshot to wire conversion.
//!
//! The reverse direction lives in [`crate::validation`], which only yields a
//! snapshot once every invariant holds. Converting a snapshot back produces
//! a fully-populated wire object carrying its discriminator. Snapshot fields
//! are public, so a value the wire cannot carry exactly is an error here
//! rather than a silently rounded number.

use std::time::Duration;

use super::{
    BestFitBinPackArgs, CapacitySchedulingArgs, CoschedulingArgs, NodeResourcesAllocatableArgs,
    RawArgs, ResourceSpec,
};
use crate::error::EncodeError;
use crate::meta::{ArgsKind, GroupVersionKind, TypeMeta};
use crate::models;

fn type_meta(kind: ArgsKind) -> TypeMeta {
    TypeMeta::of(&GroupVersionKind::v1beta1(kind))
}

fn seconds(field: &'static str, duration: Duration) -> Result<i64, EncodeError> {
    match i64::try_from(duration.as_secs()) {
        Ok(secs) if duration.subsec_nanos() == 0 => Ok(secs),
        _ => Err(EncodeError::InexactDuration { field, duration }),
    }
}

impl TryFrom<&models::CoschedulingArgs> for CoschedulingArgs {
    type Error = EncodeError;

    fn try_from(args: &models::CoschedulingArgs) -> Result<Self, Self::Error> {
        Ok(Self {
            type_meta: type_meta(ArgsKind::Coscheduling),
            permit_waiting_time_seconds: Some(seconds(
                "permitWaitingTimeSeconds",
                args.permit_waiting_time,
            )?),
            pod_group_gc_interval_seconds: Some(seconds(
                "podGroupGCIntervalSeconds",
                args.pod_group_gc_interval,
            )?),
            pod_group_expiration_time_seconds: Some(seconds(
                "podGroupExpirationTimeSeconds",
                args.pod_group_expiration_time,
            )?),
        })
    }
}

impl From<&models::ResourceSpec> for ResourceSpec {
    fn from(spec: &models::ResourceSpec) -> Self {
        ResourceSpec::new(spec.name.clone(), spec.weight)
    }
}

impl From<&models::NodeResourcesAllocatableArgs> for NodeResourcesAllocatableArgs {
    fn from(args: &models::NodeResourcesAllocatableArgs) -> Self {
        Self {
            type_meta: type_meta(ArgsKind::NodeResourcesAllocatable),
            resources: Some(args.resources.iter().map(ResourceSpec::from).collect()),
            mode: Some(args.mode.as_str().to_string()),
        }
    }
}

impl From<&models::CapacitySchedulingArgs> for CapacitySchedulingArgs {
    fn from(args: &models::CapacitySchedulingArgs) -> Self {
        Self {
            type_meta: type_meta(ArgsKind::CapacityScheduling),
            kube_config_path: Some(
                args.kube_config_path
                    .as_ref()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            ),
        }
    }
}

impl TryFrom<&models::BestFitBinPackArgs> for BestFitBinPackArgs {
    type Error = EncodeError;

    fn try_from(args: &models::BestFitBinPackArgs) -> Result<Self, Self::Error> {
        // JSON has no NaN or infinity; serde_json would write `null`.
        if !args.target_cpu_utilization.is_finite() {
            return Err(EncodeError::NonFinite {
                field: "targetCPUUtilization",
                value: args.target_cpu_utilization,
            });
        }
        Ok(Self {
            type_meta: type_meta(ArgsKind::BestFitBinPack),
            target_cpu_utilization: Some(args.target_cpu_utilization),
            default_cpu_requests: Some(args.default_cpu_requests),
        })
    }
}

impl TryFrom<&models::PluginArgs> for RawArgs {
    type Error = EncodeError;

    fn try_from(args: &models::PluginArgs) -> Result<Self, Self::Error> {
        Ok(match args {
            models::PluginArgs::Coscheduling(a) => RawArgs::Coscheduling(a.try_into()?),
            models::PluginArgs::NodeResourcesAllocatable(a) => {
                RawArgs::NodeResourcesAllocatable(a.into())
            }
            models::PluginArgs::CapacityScheduling(a) => RawArgs::CapacityScheduling(a.into()),
            models::PluginArgs::BestFitBinPack(a) => RawArgs::BestFitBinPack(a.try_into()?),
        })
    }
}
