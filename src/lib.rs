//! Argument schemas for pluggable scheduler extensions.
//!
//! Turns a loosely-specified, version-tagged argument object into a
//! fully-defaulted, validated snapshot that plugin code can read from any
//! number of scheduling cycles without re-checking anything.
//!
//! # Modules
//!
//! - **`meta`**: Discriminators (`TypeMeta`, `GroupVersionKind`, `ArgsKind`)
//! - **`v1beta1`**: Wire shapes and defaulting (`SetDefaults`)
//! - **`models`**: Validated snapshots (`CoschedulingArgs`,
//!   `NodeResourcesAllocatableArgs`, `CapacitySchedulingArgs`,
//!   `BestFitBinPackArgs`)
//! - **`registry`**: Discriminator → schema mapping
//! - **`validation`**: Invariant checks that report every violation at once
//! - **`snapshot`**: Deep copies of validated values
//! - **`adapter`**: The `build_args` pipeline
//! - **`codec`**: JSON/YAML decode and encode
//!
//! # Example
//!
//! ```
//! use u_plugin_args::VersionedAdapter;
//!
//! let adapter = VersionedAdapter::default();
//! let args = adapter
//!     .build_from_yaml(
//!         "apiVersion: kubescheduler.config.k8s.io/v1beta1\n\
//!          kind: BestFitBinPackArgs\n\
//!          targetCPUUtilization: 80\n",
//!     )
//!     .unwrap();
//!
//! let bin_pack = args.as_best_fit_bin_pack().unwrap();
//! assert_eq!(bin_pack.target_cpu_utilization, 80.0);
//! assert_eq!(bin_pack.default_cpu_requests, 0);
//! ```

pub mod adapter;
pub mod codec;
pub mod error;
pub mod meta;
pub mod models;
pub mod registry;
pub mod snapshot;
pub mod v1beta1;
pub mod validation;

pub use adapter::VersionedAdapter;
pub use error::{ArgsError, DecodeError, EncodeError, RegistryError};
pub use meta::{ArgsKind, GroupVersionKind, TypeMeta};
pub use models::PluginArgs;
pub use registry::{Schema, SchemaRegistry};
pub use snapshot::Validated;
pub use v1beta1::{RawArgs, SetDefaults};
pub use validation::{FieldViolation, ValidationError, ViolationKind};
