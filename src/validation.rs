//! Validation of defaulted plugin arguments.
//!
//! Checks every invariant of an argument object in one pass and reports
//! all violations together, so an operator can fix a configuration in one
//! round. Detects:
//! - Unset fields (validation ran before defaulting)
//! - Non-positive timers
//! - Resource weights below 1, empty or duplicate resource names
//! - Scoring modes outside `Least`/`Most`
//! - Bin-packing targets outside (0, 100], negative CPU requests
//! - Blank or NUL-bearing kubeconfig paths
//!
//! Success yields a [`Validated`] snapshot: the typed value is only built
//! once nothing is wrong with it.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::meta::ArgsKind;
use crate::models::{self, ModeType, PluginArgs};
use crate::snapshot::Validated;
use crate::v1beta1::{self, RawArgs};

/// Validation result for one argument kind.
pub type ValidationResult<T> = Result<Validated<T>, ValidationError>;

/// Dotted/indexed path of a wire field, e.g. `resources[0].weight`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath(String);

impl FieldPath {
    /// A top-level field.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// A named child of this field.
    pub fn child(&self, name: &str) -> Self {
        Self(format!("{}.{}", self.0, name))
    }

    /// An element of this list field.
    pub fn index(&self, i: usize) -> Self {
        Self(format!("{}[{}]", self.0, i))
    }

    /// Path as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Categories of field violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    /// Field is unset.
    Required,
    /// Value is out of range or malformed.
    Invalid,
    /// Value repeats an earlier entry.
    Duplicate,
    /// Value is outside a closed set.
    NotSupported,
}

impl ViolationKind {
    fn label(&self) -> &'static str {
        match self {
            ViolationKind::Required => "Required value",
            ViolationKind::Invalid => "Invalid value",
            ViolationKind::Duplicate => "Duplicate value",
            ViolationKind::NotSupported => "Unsupported value",
        }
    }
}

/// One violated invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Offending field path.
    pub field: String,
    /// Observed value, rendered as text (empty when unset).
    pub value: String,
    /// Human-readable reason.
    pub reason: String,
}

impl FieldViolation {
    fn new(
        kind: ViolationKind,
        field: &FieldPath,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// The field is unset.
    pub fn required(field: &FieldPath) -> Self {
        Self::new(ViolationKind::Required, field, "", "must be set")
    }

    /// The value is out of range or malformed.
    pub fn invalid(field: &FieldPath, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::new(ViolationKind::Invalid, field, value, reason)
    }

    /// The value repeats an earlier entry.
    pub fn duplicate(field: &FieldPath, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::new(ViolationKind::Duplicate, field, value, reason)
    }

    /// The value is not one of `supported`.
    pub fn not_supported(field: &FieldPath, value: impl ToString, supported: &[&str]) -> Self {
        let quoted: Vec<String> = supported.iter().map(|s| format!("{s:?}")).collect();
        Self::new(
            ViolationKind::NotSupported,
            field,
            value,
            format!("supported values: {}", quoted.join(", ")),
        )
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ViolationKind::Required => {
                write!(f, "{}: {}: {}", self.field, self.kind.label(), self.reason)
            }
            _ => write!(
                f,
                "{}: {}: {:?}: {}",
                self.field,
                self.kind.label(),
                self.value,
                self.reason
            ),
        }
    }
}

/// Every violation found in one argument object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {}", join_violations(.violations))]
pub struct ValidationError {
    /// Kind of the rejected arguments.
    pub kind: ArgsKind,
    /// Violations in field order.
    pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Creates an error for the given kind.
    pub fn new(kind: ArgsKind, violations: Vec<FieldViolation>) -> Self {
        Self { kind, violations }
    }

    /// First violation on the given field path.
    pub fn field(&self, path: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == path)
    }

    /// Whether any violation names the given field path.
    pub fn has_field(&self, path: &str) -> bool {
        self.field(path).is_some()
    }
}

fn finish<T>(
    kind: ArgsKind,
    errors: Vec<FieldViolation>,
    value: Option<T>,
) -> ValidationResult<T> {
    match value {
        Some(value) if errors.is_empty() => Ok(Validated::new(value)),
        _ => Err(ValidationError::new(kind, errors)),
    }
}

/// Validates a defaulted object of any kind.
pub fn validate(raw: &RawArgs) -> ValidationResult<PluginArgs> {
    Ok(match raw {
        RawArgs::Coscheduling(args) => validate_coscheduling_args(args)?.map(PluginArgs::from),
        RawArgs::NodeResourcesAllocatable(args) => {
            validate_node_resources_allocatable_args(args)?.map(PluginArgs::from)
        }
        RawArgs::CapacityScheduling(args) => {
            validate_capacity_scheduling_args(args)?.map(PluginArgs::from)
        }
        RawArgs::BestFitBinPack(args) => {
            validate_best_fit_bin_pack_args(args)?.map(PluginArgs::from)
        }
    })
}

fn positive_seconds(
    name: &str,
    value: Option<i64>,
    errors: &mut Vec<FieldViolation>,
) -> Option<Duration> {
    let path = FieldPath::new(name);
    match value {
        None => {
            errors.push(FieldViolation::required(&path));
            None
        }
        Some(s) if s <= 0 => {
            errors.push(FieldViolation::invalid(&path, s, "must be greater than zero"));
            None
        }
        Some(s) => Some(Duration::from_secs(s.unsigned_abs())),
    }
}

/// Validates Coscheduling arguments.
///
/// All three timers must be strictly positive.
pub fn validate_coscheduling_args(
    args: &v1beta1::CoschedulingArgs,
) -> ValidationResult<models::CoschedulingArgs> {
    let mut errors = Vec::new();

    let permit = positive_seconds(
        "permitWaitingTimeSeconds",
        args.permit_waiting_time_seconds,
        &mut errors,
    );
    let gc = positive_seconds(
        "podGroupGCIntervalSeconds",
        args.pod_group_gc_interval_seconds,
        &mut errors,
    );
    let expiration = positive_seconds(
        "podGroupExpirationTimeSeconds",
        args.pod_group_expiration_time_seconds,
        &mut errors,
    );

    let value = match (permit, gc, expiration) {
        (Some(permit), Some(gc), Some(expiration)) => Some(models::CoschedulingArgs {
            permit_waiting_time: permit,
            pod_group_gc_interval: gc,
            pod_group_expiration_time: expiration,
        }),
        _ => None,
    };
    finish(ArgsKind::Coscheduling, errors, value)
}

/// Validates NodeResourcesAllocatable arguments.
///
/// Checks:
/// 1. `resources` is set and non-empty
/// 2. Every resource name is non-empty and unique
/// 3. Every weight is at least 1
/// 4. `mode` is `Least` or `Most`
pub fn validate_node_resources_allocatable_args(
    args: &v1beta1::NodeResourcesAllocatableArgs,
) -> ValidationResult<models::NodeResourcesAllocatableArgs> {
    let mut errors = Vec::new();
    let resources_path = FieldPath::new("resources");

    let mut resources = Vec::new();
    match args.resources.as_deref() {
        None | Some([]) => errors.push(FieldViolation::required(&resources_path)),
        Some(list) => {
            let mut names = HashSet::new();
            for (i, spec) in list.iter().enumerate() {
                let path = resources_path.index(i);
                let mut ok = true;

                if spec.name.is_empty() {
                    errors.push(FieldViolation::required(&path.child("name")));
                    ok = false;
                } else if !names.insert(spec.name.as_str()) {
                    errors.push(FieldViolation::duplicate(
                        &path.child("name"),
                        &spec.name,
                        "duplicate resource name",
                    ));
                    ok = false;
                }

                if spec.weight < 1 {
                    errors.push(FieldViolation::invalid(
                        &path.child("weight"),
                        spec.weight,
                        "must be greater than or equal to 1",
                    ));
                    ok = false;
                }

                if ok {
                    resources.push(models::ResourceSpec::new(spec.name.clone(), spec.weight));
                }
            }
        }
    }

    let mode_path = FieldPath::new("mode");
    let mode = match args.mode.as_deref() {
        None => {
            errors.push(FieldViolation::required(&mode_path));
            None
        }
        Some(raw) => match raw.parse::<ModeType>() {
            Ok(mode) => Some(mode),
            Err(_) => {
                errors.push(FieldViolation::not_supported(
                    &mode_path,
                    raw,
                    &ModeType::SUPPORTED,
                ));
                None
            }
        },
    };

    let value = mode.map(|mode| models::NodeResourcesAllocatableArgs::new(resources, mode));
    finish(ArgsKind::NodeResourcesAllocatable, errors, value)
}

/// Validates CapacityScheduling arguments.
///
/// The path is not checked against the filesystem.
pub fn validate_capacity_scheduling_args(
    args: &v1beta1::CapacitySchedulingArgs,
) -> ValidationResult<models::CapacitySchedulingArgs> {
    let mut errors = Vec::new();
    let path = FieldPath::new("kubeConfigPath");

    let kube_config_path = match args.kube_config_path.as_deref() {
        None => {
            errors.push(FieldViolation::required(&path));
            None
        }
        Some("") => Some(None),
        Some(p) if p.trim().is_empty() => {
            errors.push(FieldViolation::invalid(&path, p, "must not be blank"));
            None
        }
        Some(p) if p.contains('\0') => {
            errors.push(FieldViolation::invalid(
                &path,
                p.escape_default(),
                "must not contain a NUL byte",
            ));
            None
        }
        Some(p) => Some(Some(PathBuf::from(p))),
    };

    let value = kube_config_path
        .map(|kube_config_path| models::CapacitySchedulingArgs { kube_config_path });
    finish(ArgsKind::CapacityScheduling, errors, value)
}

/// Validates BestFitBinPack arguments.
///
/// `targetCPUUtilization` must lie in (0, 100] (NaN is rejected) and
/// `defaultCPURequests` must not be negative.
pub fn validate_best_fit_bin_pack_args(
    args: &v1beta1::BestFitBinPackArgs,
) -> ValidationResult<models::BestFitBinPackArgs> {
    let mut errors = Vec::new();

    let target_path = FieldPath::new("targetCPUUtilization");
    let target = match args.target_cpu_utilization {
        None => {
            errors.push(FieldViolation::required(&target_path));
            None
        }
        Some(t) if t > 0.0 && t <= 100.0 => Some(t),
        Some(t) => {
            errors.push(FieldViolation::invalid(
                &target_path,
                t,
                "must be in the range (0, 100]",
            ));
            None
        }
    };

    let requests_path = FieldPath::new("defaultCPURequests");
    let requests = match args.default_cpu_requests {
        None => {
            errors.push(FieldViolation::required(&requests_path));
            None
        }
        Some(r) if r < 0 => {
            errors.push(FieldViolation::invalid(
                &requests_path,
                r,
                "must be greater than or equal to 0",
            ));
            None
        }
        Some(r) => Some(r),
    };

    let value = match (target, requests) {
        (Some(target), Some(requests)) => Some(models::BestFitBinPackArgs::new(target, requests)),
        _ => None,
    };
    finish(ArgsKind::BestFitBinPack, errors, value)
}
