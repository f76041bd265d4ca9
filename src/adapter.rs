//! Versioned adapter: discriminator in, validated snapshot out.
//!
//! # Pipeline
//!
//! 1. Resolve the discriminator against the registry
//! 2. Reject objects that belong to a different schema
//! 3. Default a private copy of the object
//! 4. Validate, collecting every violation
//! 5. Hand back an independent deep copy
//!
//! Nothing is published unless every step succeeds.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::codec::Codec;
use crate::error::{ArgsError, DecodeError, Result};
use crate::meta::{GroupVersionKind, TypeMeta};
use crate::models::PluginArgs;
use crate::registry::{Schema, SchemaRegistry};
use crate::v1beta1::{RawArgs, SetDefaults};
use crate::validation;

/// Builds plugin argument snapshots against an explicit registry.
#[derive(Debug, Clone)]
pub struct VersionedAdapter {
    registry: SchemaRegistry,
}

impl Default for VersionedAdapter {
    fn default() -> Self {
        Self::new(SchemaRegistry::v1beta1())
    }
}

impl VersionedAdapter {
    /// Creates an adapter over the given registry.
    pub fn new(registry: SchemaRegistry) -> Self {
        Self { registry }
    }

    /// The registry this adapter resolves against.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// A strict codec over this adapter's registry.
    pub fn codec(&self) -> Codec<'_> {
        Codec::new(&self.registry)
    }

    /// Resolves a discriminator to its schema.
    pub fn resolve(&self, gvk: &GroupVersionKind) -> Result<&Schema> {
        let schema = self
            .registry
            .lookup(gvk)
            .ok_or_else(|| ArgsError::UnknownSchema(gvk.clone()))?;
        debug!(discriminator = %gvk, kind = %schema.kind(), "resolved args schema");
        Ok(schema)
    }

    /// Defaults, validates, and snapshots `raw` under `gvk`.
    ///
    /// `raw` is never modified; later changes to it do not reach the
    /// returned snapshot.
    pub fn build_args(&self, gvk: &GroupVersionKind, raw: &RawArgs) -> Result<PluginArgs> {
        let schema = self.resolve(gvk)?;
        check_discriminator(gvk, schema, raw)?;

        let defaulted = raw.clone().with_defaults();
        debug!(discriminator = %gvk, "applied defaults");

        let validated = validation::validate(&defaulted).map_err(|err| {
            warn!(
                discriminator = %gvk,
                violations = err.violations.len(),
                "rejected plugin args: {err}"
            );
            err
        })?;

        let snapshot = validated.snapshot();
        debug!(plugin = schema.kind().plugin_name(), "built plugin args");
        Ok(snapshot)
    }

    /// Like [`build_args`](Self::build_args), reading the discriminator
    /// embedded in `raw`.
    pub fn build(&self, raw: &RawArgs) -> Result<PluginArgs> {
        let gvk = embedded_discriminator(raw.type_meta())?;
        self.build_args(&gvk, raw)
    }

    /// Builds a snapshot shared by reference count, for concurrent readers.
    pub fn build_shared(
        &self,
        gvk: &GroupVersionKind,
        raw: &RawArgs,
    ) -> Result<Arc<PluginArgs>> {
        self.build_args(gvk, raw).map(Arc::new)
    }

    /// Decodes a JSON argument object and builds it.
    pub fn build_from_json(&self, input: &str) -> Result<PluginArgs> {
        let (gvk, raw) = self.codec().decode_json(input)?;
        self.build_args(&gvk, &raw)
    }

    /// Decodes a YAML argument object and builds it.
    pub fn build_from_yaml(&self, input: &str) -> Result<PluginArgs> {
        let (gvk, raw) = self.codec().decode_yaml(input)?;
        self.build_args(&gvk, &raw)
    }
}

fn embedded_discriminator(meta: &TypeMeta) -> Result<GroupVersionKind> {
    if meta.api_version.is_none() {
        return Err(DecodeError::MissingDiscriminator("apiVersion").into());
    }
    meta.group_version_kind()
        .ok_or_else(|| DecodeError::MissingDiscriminator("kind").into())
}

// The object's variant, and whatever part of its inline discriminator is
// set, must agree with the requested schema.
fn check_discriminator(gvk: &GroupVersionKind, schema: &Schema, raw: &RawArgs) -> Result<()> {
    let mismatch = |found: String| ArgsError::KindMismatch {
        discriminator: gvk.clone(),
        found,
    };

    if raw.kind() != schema.kind() {
        return Err(mismatch(raw.kind().to_string()));
    }

    let meta = raw.type_meta();
    if let Some(kind) = meta.kind.as_deref() {
        if kind != gvk.kind {
            return Err(mismatch(kind.to_string()));
        }
    }
    if let Some(api_version) = meta.api_version.as_deref() {
        if api_version != gvk.api_version() {
            return Err(mismatch(format!("{api_version} {}", raw.kind())));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ArgsKind;
    use crate::models::{ModeType, ResourceSpec};
    use crate::v1beta1;
    use std::time::Duration;

    fn gvk(kind: ArgsKind) -> GroupVersionKind {
        GroupVersionKind::v1beta1(kind)
    }

    #[test]
    fn test_empty_objects_build() {
        let adapter = VersionedAdapter::default();
        for kind in ArgsKind::ALL {
            let args = adapter.build_args(&gvk(kind), &RawArgs::empty(kind)).unwrap();
            assert_eq!(args.kind(), kind);
        }
    }

    #[test]
    fn test_coscheduling_defaulted() {
        let adapter = VersionedAdapter::default();
        let raw = RawArgs::from(v1beta1::CoschedulingArgs {
            pod_group_expiration_time_seconds: Some(120),
            ..Default::default()
        });
        let args = adapter
            .build_args(&gvk(ArgsKind::Coscheduling), &raw)
            .unwrap();
        let args = args.as_coscheduling().unwrap();
        assert_eq!(args.permit_waiting_time, Duration::from_secs(60));
        assert_eq!(args.pod_group_gc_interval, Duration::from_secs(30));
        assert_eq!(args.pod_group_expiration_time, Duration::from_secs(120));
    }

    #[test]
    fn test_unknown_schema() {
        let adapter = VersionedAdapter::default();
        let unknown = GroupVersionKind::new("kubescheduler.config.k8s.io", "v1beta1", "FooArgs");
        let err = adapter.resolve(&unknown).unwrap_err();
        assert!(matches!(err, ArgsError::UnknownSchema(ref g) if *g == unknown));

        let empty = VersionedAdapter::new(SchemaRegistry::new());
        let raw = RawArgs::empty(ArgsKind::Coscheduling);
        let err = empty
            .build_args(&gvk(ArgsKind::Coscheduling), &raw)
            .unwrap_err();
        assert!(err.is_unknown_schema());
    }

    #[test]
    fn test_wrong_kind_rejected_before_defaulting() {
        let adapter = VersionedAdapter::default();
        let raw = RawArgs::from(v1beta1::BestFitBinPackArgs {
            target_cpu_utilization: Some(150.0),
            ..Default::default()
        });
        let err = adapter
            .build_args(&gvk(ArgsKind::Coscheduling), &raw)
            .unwrap_err();
        assert!(matches!(err, ArgsError::KindMismatch { .. }));
        assert!(err.is_unknown_schema());
    }

    #[test]
    fn test_embedded_discriminator_must_agree() {
        let adapter = VersionedAdapter::default();
        let mut raw = RawArgs::empty(ArgsKind::Coscheduling);
        raw.type_meta_mut().kind = Some("CapacitySchedulingArgs".into());
        let err = adapter
            .build_args(&gvk(ArgsKind::Coscheduling), &raw)
            .unwrap_err();
        assert!(err.is_unknown_schema());

        let mut raw = RawArgs::empty(ArgsKind::Coscheduling);
        raw.type_meta_mut().api_version = Some("kubescheduler.config.k8s.io/v1".into());
        assert!(adapter
            .build_args(&gvk(ArgsKind::Coscheduling), &raw)
            .unwrap_err()
            .is_unknown_schema());
    }

    #[test]
    fn test_build_reads_embedded_discriminator() {
        let adapter = VersionedAdapter::default();
        let mut raw = RawArgs::empty(ArgsKind::CapacityScheduling);
        assert!(matches!(
            adapter.build(&raw),
            Err(ArgsError::Decode(DecodeError::MissingDiscriminator("apiVersion")))
        ));

        *raw.type_meta_mut() = TypeMeta::of(&gvk(ArgsKind::CapacityScheduling));
        let args = adapter.build(&raw).unwrap();
        assert!(args.as_capacity_scheduling().unwrap().uses_in_cluster_config());
    }

    #[test]
    fn test_validation_error_propagates() {
        let adapter = VersionedAdapter::default();
        let raw = RawArgs::from(v1beta1::NodeResourcesAllocatableArgs {
            resources: Some(vec![v1beta1::ResourceSpec::new("cpu", 0)]),
            mode: Some("Bogus".into()),
            ..Default::default()
        });
        let err = adapter
            .build_args(&gvk(ArgsKind::NodeResourcesAllocatable), &raw)
            .unwrap_err();
        let validation = err.as_validation().unwrap();
        assert!(validation.has_field("resources[0].weight"));
        assert!(validation.has_field("mode"));
        assert!(!err.is_unknown_schema());
    }

    #[test]
    fn test_raw_input_untouched() {
        let adapter = VersionedAdapter::default();
        let mut raw = RawArgs::from(v1beta1::NodeResourcesAllocatableArgs {
            resources: Some(vec![v1beta1::ResourceSpec::new("cpu", 2)]),
            ..Default::default()
        });
        let before = raw.clone();
        let args = adapter
            .build_args(&gvk(ArgsKind::NodeResourcesAllocatable), &raw)
            .unwrap();
        assert_eq!(raw, before);

        if let RawArgs::NodeResourcesAllocatable(wire) = &mut raw {
            wire.resources = Some(vec![v1beta1::ResourceSpec::new("memory", 9)]);
            wire.mode = Some("Most".into());
        }
        let args = args.as_node_resources_allocatable().unwrap();
        assert_eq!(args.resources, vec![ResourceSpec::new("cpu", 2)]);
        assert_eq!(args.mode, ModeType::Least);
    }

    #[test]
    fn test_build_shared() {
        let adapter = VersionedAdapter::default();
        let raw = RawArgs::empty(ArgsKind::BestFitBinPack);
        let shared = adapter
            .build_shared(&gvk(ArgsKind::BestFitBinPack), &raw)
            .unwrap();
        let reader = Arc::clone(&shared);
        let handle = std::thread::spawn(move || {
            reader
                .as_best_fit_bin_pack()
                .map(|a| a.target_cpu_utilization)
        });
        assert_eq!(handle.join().unwrap(), Some(100.0));
    }
}
