//! Defaulting for v1beta1 arguments.
//!
//! Defaulting only fills unset fields. It never fails and never touches a
//! field the operator set, so applying it twice equals applying it once.

use super::{
    BestFitBinPackArgs, CapacitySchedulingArgs, CoschedulingArgs, NodeResourcesAllocatableArgs,
    RawArgs, ResourceSpec,
};
use crate::models::{ModeType, DEFAULT_CPU_WEIGHT, DEFAULT_MEMORY_WEIGHT};

/// Default Permit waiting time (seconds).
pub const DEFAULT_PERMIT_WAITING_TIME_SECONDS: i64 = 60;
/// Default PodGroup GC interval (seconds).
pub const DEFAULT_POD_GROUP_GC_INTERVAL_SECONDS: i64 = 30;
/// Default PodGroup expiration time (seconds).
pub const DEFAULT_POD_GROUP_EXPIRATION_TIME_SECONDS: i64 = 600;
/// Default allocatable scoring mode.
pub const DEFAULT_MODE: ModeType = ModeType::Least;
/// Default bin-packing target (percent).
pub const DEFAULT_TARGET_CPU_UTILIZATION: f64 = 100.0;
/// Default CPU request for best-effort pods (millicores).
pub const DEFAULT_CPU_REQUESTS: i64 = 0;
/// Empty path: in-process client configuration.
pub const DEFAULT_KUBE_CONFIG_PATH: &str = "";

/// Fills unset fields with their declared defaults.
pub trait SetDefaults {
    /// Defaults in place.
    fn set_defaults(&mut self);

    /// Defaults by value.
    fn with_defaults(mut self) -> Self
    where
        Self: Sized,
    {
        self.set_defaults();
        self
    }
}

impl SetDefaults for CoschedulingArgs {
    fn set_defaults(&mut self) {
        self.permit_waiting_time_seconds
            .get_or_insert(DEFAULT_PERMIT_WAITING_TIME_SECONDS);
        self.pod_group_gc_interval_seconds
            .get_or_insert(DEFAULT_POD_GROUP_GC_INTERVAL_SECONDS);
        self.pod_group_expiration_time_seconds
            .get_or_insert(DEFAULT_POD_GROUP_EXPIRATION_TIME_SECONDS);
    }
}

impl SetDefaults for NodeResourcesAllocatableArgs {
    fn set_defaults(&mut self) {
        // An empty list means "not configured", same as an absent one.
        if self.resources.as_ref().map_or(true, Vec::is_empty) {
            self.resources = Some(vec![
                ResourceSpec::new("cpu", DEFAULT_CPU_WEIGHT),
                ResourceSpec::new("memory", DEFAULT_MEMORY_WEIGHT),
            ]);
        }
        self.mode
            .get_or_insert_with(|| DEFAULT_MODE.as_str().to_string());
    }
}

impl SetDefaults for CapacitySchedulingArgs {
    fn set_defaults(&mut self) {
        self.kube_config_path
            .get_or_insert_with(|| DEFAULT_KUBE_CONFIG_PATH.to_string());
    }
}

impl SetDefaults for BestFitBinPackArgs {
    fn set_defaults(&mut self) {
        self.target_cpu_utilization
            .get_or_insert(DEFAULT_TARGET_CPU_UTILIZATION);
        self.default_cpu_requests.get_or_insert(DEFAULT_CPU_REQUESTS);
    }
}

impl SetDefaults for RawArgs {
    fn set_defaults(&mut self) {
        match self {
            RawArgs::Coscheduling(args) => args.set_defaults(),
            RawArgs::NodeResourcesAllocatable(args) => args.set_defaults(),
            RawArgs::CapacityScheduling(args) => args.set_defaults(),
            RawArgs::BestFitBinPack(args) => args.set_defaults(),
        }
    }
}
