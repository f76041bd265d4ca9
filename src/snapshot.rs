//! Validated snapshots.
//!
//! A [`Validated`] value can only be produced by [`crate::validation`], so a
//! copy can never be taken of an object that has not passed every check.
//! Copies are deep: the argument types own all of their storage, and
//! `Clone` duplicates every element of every list.

use std::sync::Arc;

/// Proof that the wrapped value passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    inner: T,
}

impl<T> Validated<T> {
    pub(crate) fn new(inner: T) -> Self {
        Self { inner }
    }

    /// Borrows the validated value.
    pub fn as_inner(&self) -> &T {
        &self.inner
    }

    /// Consumes the proof, returning the value.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Converts the value without re-validating it.
    ///
    /// `f` must preserve validity; it is used to lift a kind-specific value
    /// into [`crate::models::PluginArgs`].
    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Validated<U> {
        Validated::new(f(self.inner))
    }

    /// Publishes the value for lock-free concurrent readers.
    pub fn into_shared(self) -> Arc<T> {
        Arc::new(self.inner)
    }
}

impl<T: Clone> Validated<T> {
    /// An independently-owned deep copy of the validated value.
    pub fn snapshot(&self) -> T {
        self.inner.clone()
    }
}

impl<T> AsRef<T> for Validated<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::ArgsKind;
    use crate::models::{ModeType, PluginArgs, ResourceSpec};
    use crate::v1beta1::{RawArgs, SetDefaults};
    use crate::validation::validate;

    fn validated(kind: ArgsKind) -> Validated<PluginArgs> {
        validate(&RawArgs::empty(kind).with_defaults()).unwrap()
    }

    #[test]
    fn test_snapshot_equals_original() {
        for kind in ArgsKind::ALL {
            let v = validated(kind);
            assert_eq!(&v.snapshot(), v.as_inner());
        }
    }

    #[test]
    fn test_snapshot_resources_are_independent() {
        let v = validated(ArgsKind::NodeResourcesAllocatable);
        let mut copy = v.snapshot();

        if let PluginArgs::NodeResourcesAllocatable(args) = &mut copy {
            args.resources[0].weight = 7;
            args.resources[0].name.push_str("-changed");
            args.resources.push(ResourceSpec::new("gpu", 1));
            args.mode = ModeType::Most;
        }

        let original = v.as_inner().as_node_resources_allocatable().unwrap();
        assert_eq!(original.resources.len(), 2);
        assert_eq!(original.resources[0], ResourceSpec::new("cpu", 1 << 20));
        assert_eq!(original.mode, ModeType::Least);
        assert_ne!(&copy, v.as_inner());
    }

    #[test]
    fn test_snapshots_do_not_share_storage() {
        let v = validated(ArgsKind::NodeResourcesAllocatable);
        let a = v.snapshot();
        let b = v.snapshot();
        let (a, b) = (
            a.as_node_resources_allocatable().unwrap(),
            b.as_node_resources_allocatable().unwrap(),
        );
        assert_ne!(a.resources.as_ptr(), b.resources.as_ptr());
        assert_ne!(a.resources[0].name.as_ptr(), b.resources[0].name.as_ptr());
    }

    #[test]
    fn test_shared_snapshot_across_threads() {
        let shared = validated(ArgsKind::Coscheduling).into_shared();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let args = Arc::clone(&shared);
                std::thread::spawn(move || args.as_coscheduling().map(|a| a.permit_waiting_time))
            })
            .collect();
        for handle in handles {
            assert_eq!(
                handle.join().unwrap(),
                Some(std::time::Duration::from_secs(60))
            );
        }
    }
}
