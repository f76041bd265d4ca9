//! Gang-scheduling arguments.
//!
//! A PodGroup is admitted only when all of its members can be placed.
//! These timers bound how long members wait at Permit and how long
//! deleted groups linger in the plugin's bookkeeping.

use std::time::Duration;

use crate::v1beta1::{
    DEFAULT_PERMIT_WAITING_TIME_SECONDS, DEFAULT_POD_GROUP_EXPIRATION_TIME_SECONDS,
    DEFAULT_POD_GROUP_GC_INTERVAL_SECONDS,
};

/// Validated arguments for the Coscheduling plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoschedulingArgs {
    /// Maximum time a pod waits at Permit for the rest of its group.
    pub permit_waiting_time: Duration,
    /// Period of the PodGroup garbage collector.
    pub pod_group_gc_interval: Duration,
    /// How long a deleted PodGroup is kept before it is forgotten.
    pub pod_group_expiration_time: Duration,
}

impl Default for CoschedulingArgs {
    fn default() -> Self {
        Self {
            permit_waiting_time: secs(DEFAULT_PERMIT_WAITING_TIME_SECONDS),
            pod_group_gc_interval: secs(DEFAULT_POD_GROUP_GC_INTERVAL_SECONDS),
            pod_group_expiration_time: secs(DEFAULT_POD_GROUP_EXPIRATION_TIME_SECONDS),
        }
    }
}

// Defaults are positive constants.
fn secs(s: i64) -> Duration {
    Duration::from_secs(s.unsigned_abs())
}

impl CoschedulingArgs {
    /// Sets the Permit waiting time.
    pub fn with_permit_waiting_time(mut self, d: Duration) -> Self {
        self.permit_waiting_time = d;
        self
    }

    /// Sets the garbage-collection interval.
    pub fn with_pod_group_gc_interval(mut self, d: Duration) -> Self {
        self.pod_group_gc_interval = d;
        self
    }

    /// Sets the PodGroup expiration time.
    pub fn with_pod_group_expiration_time(mut self, d: Duration) -> Self {
        self.pod_group_expiration_time = d;
        self
    }
}
