//! Wire shapes of the v1beta1 argument kinds.
//!
//! Every field is optional so that an operator can leave anything unset
//! and have it defaulted. Each field owns a distinct wire key.

use serde::{Deserialize, Serialize};

use crate::meta::TypeMeta;

/// Wire arguments for the Coscheduling plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoschedulingArgs {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Permit wait timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permit_waiting_time_seconds: Option<i64>,
    /// Period of PodGroup garbage collection in seconds.
    #[serde(
        rename = "podGroupGCIntervalSeconds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub pod_group_gc_interval_seconds: Option<i64>,
    /// A deleted PodGroup older than this is dropped from bookkeeping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_group_expiration_time_seconds: Option<i64>,
}

/// One entry of the scored resource list.
///
/// Missing keys decode to empty/zero so the validator, not the decoder,
/// reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceSpec {
    /// Resource name.
    pub name: String,
    /// Weight; allowed weights start from 1.
    pub weight: i64,
}

impl ResourceSpec {
    /// Creates a resource entry.
    pub fn new(name: impl Into<String>, weight: i64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// Wire arguments for the NodeResourcesAllocatable plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResourcesAllocatableArgs {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Resources to be considered when scoring, in combination order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceSpec>>,
    /// `Least` or `Most`. Kept as the raw string until validation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Wire arguments for the CapacityScheduling plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacitySchedulingArgs {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Path of the kubeconfig; empty selects in-process configuration.
    #[serde(
        default,
        alias = "kubeconfigpath",
        skip_serializing_if = "Option::is_none"
    )]
    pub kube_config_path: Option<String>,
}

/// Wire arguments for the BestFitBinPack plugin.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BestFitBinPackArgs {
    #[serde(flatten)]
    pub type_meta: TypeMeta,

    /// Node target CPU utilization for bin packing, in percent.
    #[serde(
        rename = "targetCPUUtilization",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_cpu_utilization: Option<f64>,
    /// CPU requests (millicores) assumed for best-effort pods.
    #[serde(
        rename = "defaultCPURequests",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_cpu_requests: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coscheduling_wire_keys() {
        let args = CoschedulingArgs {
            type_meta: TypeMeta::default(),
            permit_waiting_time_seconds: Some(1),
            pod_group_gc_interval_seconds: Some(2),
            pod_group_expiration_time_seconds: Some(3),
        };
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json["permitWaitingTimeSeconds"], 1);
        assert_eq!(json["podGroupGCIntervalSeconds"], 2);
        assert_eq!(json["podGroupExpirationTimeSeconds"], 3);
        assert!(json.get("apiVersion").is_none());
    }

    #[test]
    fn test_bin_pack_keys_are_distinct() {
        let json = r#"{"targetCPUUtilization": 80, "defaultCPURequests": 250}"#;
        let args: BestFitBinPackArgs = serde_json::from_str(json).unwrap();
        assert_eq!(args.target_cpu_utilization, Some(80.0));
        assert_eq!(args.default_cpu_requests, Some(250));

        let out = serde_json::to_value(&args).unwrap();
        assert_eq!(out.as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_capacity_legacy_key() {
        let args: CapacitySchedulingArgs =
            serde_json::from_str(r#"{"kubeconfigpath": "/etc/kube.conf"}"#).unwrap();
        assert_eq!(args.kube_config_path.as_deref(), Some("/etc/kube.conf"));

        let out = serde_json::to_value(&args).unwrap();
        assert_eq!(out["kubeConfigPath"], "/etc/kube.conf");
    }

    #[test]
    fn test_resource_spec_missing_keys() {
        let args: NodeResourcesAllocatableArgs =
            serde_json::from_str(r#"{"resources": [{"name": "cpu"}, {}], "mode": "Most"}"#)
                .unwrap();
        let resources = args.resources.unwrap();
        assert_eq!(resources[0], ResourceSpec::new("cpu", 0));
        assert_eq!(resources[1], ResourceSpec::default());
        assert_eq!(args.mode.as_deref(), Some("Most"));
    }

    #[test]
    fn test_type_meta_inline() {
        let json = r#"{"apiVersion": "kubescheduler.config.k8s.io/v1beta1", "kind": "CoschedulingArgs"}"#;
        let args: CoschedulingArgs = serde_json::from_str(json).unwrap();
        assert_eq!(args.type_meta.kind.as_deref(), Some("CoschedulingArgs"));
        assert!(args.permit_waiting_time_seconds.is_none());
    }
}
