//! Tagged union over every argument kind.

use super::{
    BestFitBinPackArgs, CapacitySchedulingArgs, CoschedulingArgs, NodeResourcesAllocatableArgs,
};
use crate::meta::ArgsKind;

/// A validated argument snapshot for one plugin.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginArgs {
    /// Gang scheduling.
    Coscheduling(CoschedulingArgs),
    /// Allocatable-resource scoring.
    NodeResourcesAllocatable(NodeResourcesAllocatableArgs),
    /// Elastic-quota admission.
    CapacityScheduling(CapacitySchedulingArgs),
    /// CPU-utilization bin packing.
    BestFitBinPack(BestFitBinPackArgs),
}

impl PluginArgs {
    /// Kind of the wrapped arguments.
    pub fn kind(&self) -> ArgsKind {
        match self {
            PluginArgs::Coscheduling(_) => ArgsKind::Coscheduling,
            PluginArgs::NodeResourcesAllocatable(_) => ArgsKind::NodeResourcesAllocatable,
            PluginArgs::CapacityScheduling(_) => ArgsKind::CapacityScheduling,
            PluginArgs::BestFitBinPack(_) => ArgsKind::BestFitBinPack,
        }
    }

    /// Coscheduling arguments, if this is that kind.
    pub fn as_coscheduling(&self) -> Option<&CoschedulingArgs> {
        match self {
            PluginArgs::Coscheduling(args) => Some(args),
            _ => None,
        }
    }

    /// NodeResourcesAllocatable arguments, if this is that kind.
    pub fn as_node_resources_allocatable(&self) -> Option<&NodeResourcesAllocatableArgs> {
        match self {
            PluginArgs::NodeResourcesAllocatable(args) => Some(args),
            _ => None,
        }
    }

    /// CapacityScheduling arguments, if this is that kind.
    pub fn as_capacity_scheduling(&self) -> Option<&CapacitySchedulingArgs> {
        match self {
            PluginArgs::CapacityScheduling(args) => Some(args),
            _ => None,
        }
    }

    /// BestFitBinPack arguments, if this is that kind.
    pub fn as_best_fit_bin_pack(&self) -> Option<&BestFitBinPackArgs> {
        match self {
            PluginArgs::BestFitBinPack(args) => Some(args),
            _ => None,
        }
    }
}

impl From<CoschedulingArgs> for PluginArgs {
    fn from(args: CoschedulingArgs) -> Self {
        PluginArgs::Coscheduling(args)
    }
}

impl From<NodeResourcesAllocatableArgs> for PluginArgs {
    fn from(args: NodeResourcesAllocatableArgs) -> Self {
        PluginArgs::NodeResourcesAllocatable(args)
    }
}

impl From<CapacitySchedulingArgs> for PluginArgs {
    fn from(args: CapacitySchedulingArgs) -> Self {
        PluginArgs::CapacityScheduling(args)
    }
}

impl From<BestFitBinPackArgs> for PluginArgs {
    fn from(args: BestFitBinPackArgs) -> Self {
        PluginArgs::BestFitBinPack(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_accessors() {
        let args = PluginArgs::from(BestFitBinPackArgs::default());
        assert_eq!(args.kind(), ArgsKind::BestFitBinPack);
        assert!(args.as_best_fit_bin_pack().is_some());
        assert!(args.as_coscheduling().is_none());

        let args = PluginArgs::from(CapacitySchedulingArgs::default());
        assert_eq!(args.kind(), ArgsKind::CapacityScheduling);
        assert!(args.as_capacity_scheduling().is_some());
        assert!(args.as_node_resources_allocatable().is_none());
    }
}
