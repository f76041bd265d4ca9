//! Elastic-quota admission arguments.

use std::path::{Path, PathBuf};

/// Validated arguments for the CapacityScheduling plugin.
///
/// The path is not checked for existence here; the plugin does that
/// when it builds its client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacitySchedulingArgs {
    /// Kubeconfig path. `None` means in-process client configuration.
    pub kube_config_path: Option<PathBuf>,
}

impl CapacitySchedulingArgs {
    /// Arguments pointing at an explicit kubeconfig.
    pub fn with_kube_config(path: impl Into<PathBuf>) -> Self {
        Self {
            kube_config_path: Some(path.into()),
        }
    }

    /// Whether the in-process client configuration is used.
    pub fn uses_in_cluster_config(&self) -> bool {
        self.kube_config_path.is_none()
    }

    /// Kubeconfig path, if any.
    pub fn kube_config_path(&self) -> Option<&Path> {
        self.kube_config_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_in_cluster() {
        let args = CapacitySchedulingArgs::default();
        assert!(args.uses_in_cluster_config());
        assert!(args.kube_config_path().is_none());
    }

    #[test]
    fn test_explicit_path() {
        let args = CapacitySchedulingArgs::with_kube_config("/etc/kubernetes/scheduler.conf");
        assert!(!args.uses_in_cluster_config());
        assert_eq!(
            args.kube_config_path(),
            Some(Path::new("/etc/kubernetes/scheduler.conf"))
        );
    }
}
