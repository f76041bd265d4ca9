//! CPU-utilization bin-packing arguments.
//!
//! Nodes whose projected CPU utilization lands closest to the target
//! score highest, so already-busy nodes fill up before idle ones.

use crate::v1beta1::{DEFAULT_CPU_REQUESTS, DEFAULT_TARGET_CPU_UTILIZATION};

/// Validated arguments for the BestFitBinPack plugin.
#[derive(Debug, Clone, PartialEq)]
pub struct BestFitBinPackArgs {
    /// Target node CPU utilization, in percent of capacity (0, 100].
    pub target_cpu_utilization: f64,
    /// CPU request (millicores) assumed for best-effort pods.
    pub default_cpu_requests: i64,
}

impl Default for BestFitBinPackArgs {
    fn default() -> Self {
        Self {
            target_cpu_utilization: DEFAULT_TARGET_CPU_UTILIZATION,
            default_cpu_requests: DEFAULT_CPU_REQUESTS,
        }
    }
}

impl BestFitBinPackArgs {
    /// Creates bin-packing arguments.
    pub fn new(target_cpu_utilization: f64, default_cpu_requests: i64) -> Self {
        Self {
            target_cpu_utilization,
            default_cpu_requests,
        }
    }

    /// Target utilization as a fraction in (0, 1].
    #[inline]
    pub fn target_fraction(&self) -> f64 {
        self.target_cpu_utilization / 100.0
    }

    /// Millicores a node of the given capacity should be packed to.
    pub fn target_millicores(&self, capacity_millicores: i64) -> i64 {
        (capacity_millicores as f64 * self.target_fraction()).floor() as i64
    }

    /// CPU request to account for a pod, substituting the default when
    /// the pod declares none.
    pub fn effective_request(&self, declared_millicores: Option<i64>) -> i64 {
        declared_millicores.unwrap_or(self.default_cpu_requests)
    }
}
