//! Validated argument snapshots.
//!
//! These are the fully-typed values handed to plugins: every field is set,
//! enumerations are closed, and durations are `std::time::Duration`.
//! They are plain values with no shared storage, so a snapshot can be read
//! from any number of scheduling cycles at once.
//!
//! | Kind | Plugin | Concern |
//! |------|--------|---------|
//! | `CoschedulingArgs` | Coscheduling | PodGroup admission timers |
//! | `NodeResourcesAllocatableArgs` | NodeResourcesAllocatable | Weighted allocatable scoring |
//! | `CapacitySchedulingArgs` | CapacityScheduling | Elastic-quota client setup |
//! | `BestFitBinPackArgs` | BestFitBinPack | CPU bin packing |

mod allocatable;
mod binpack;
mod capacity;
mod coscheduling;
mod plugin;

pub use allocatable::{
    default_resources, ModeType, NodeResourcesAllocatableArgs, ResourceSpec, UnsupportedMode,
    DEFAULT_CPU_WEIGHT, DEFAULT_MEMORY_WEIGHT,
};
pub use binpack::BestFitBinPackArgs;
pub use capacity::CapacitySchedulingArgs;
pub use coscheduling::CoschedulingArgs;
pub use plugin::PluginArgs;
