//! Schema registry.
//!
//! Declares, per discriminator, which argument kind it selects and the
//! shape of that kind on the wire. A registry is an ordinary value owned by
//! whoever builds an adapter; nothing here is global.

use std::collections::HashMap;

use crate::error::RegistryError;
use crate::meta::{ArgsKind, GroupVersionKind};
use crate::models::ModeType;
use crate::v1beta1::{RawArgs, SetDefaults};

/// Wire type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Integer seconds.
    Seconds,
    /// Ordered list of `{name, weight}`.
    ResourceList,
    /// String from a closed set.
    Enum(&'static [&'static str]),
    /// Free-form string.
    String,
    /// Float percentage.
    Percent,
    /// Integer CPU millicores.
    Millicores,
}

/// Keys of one `ResourceList` entry.
pub const RESOURCE_ENTRY_KEYS: &[&str] = &["name", "weight"];

impl FieldType {
    /// Keys allowed inside each list entry, for list-of-object fields.
    pub fn entry_keys(&self) -> Option<&'static [&'static str]> {
        match self {
            FieldType::ResourceList => Some(RESOURCE_ENTRY_KEYS),
            _ => None,
        }
    }
}

/// Declaration of one wire field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire key.
    pub name: &'static str,
    /// Accepted legacy keys.
    pub aliases: &'static [&'static str],
    /// Wire type.
    pub field_type: FieldType,
    /// Whether the operator may omit it.
    pub optional: bool,
    /// Invariant, as shown to operators.
    pub constraint: &'static str,
}

impl FieldSpec {
    const fn optional(
        name: &'static str,
        field_type: FieldType,
        constraint: &'static str,
    ) -> Self {
        Self {
            name,
            aliases: &[],
            field_type,
            optional: true,
            constraint,
        }
    }

    const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Whether `key` names this field.
    pub fn matches(&self, key: &str) -> bool {
        self.name == key || self.aliases.iter().any(|a| *a == key)
    }
}

/// Inline discriminator keys, accepted by every schema.
const TYPE_META_KEYS: [&str; 2] = ["apiVersion", "kind"];

const COSCHEDULING_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("permitWaitingTimeSeconds", FieldType::Seconds, "> 0"),
    FieldSpec::optional("podGroupGCIntervalSeconds", FieldType::Seconds, "> 0"),
    FieldSpec::optional("podGroupExpirationTimeSeconds", FieldType::Seconds, "> 0"),
];

const NODE_RESOURCES_ALLOCATABLE_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional(
        "resources",
        FieldType::ResourceList,
        "names non-empty and unique, weight >= 1",
    ),
    FieldSpec::optional("mode", FieldType::Enum(&ModeType::SUPPORTED), "Least or Most"),
];

const CAPACITY_SCHEDULING_FIELDS: &[FieldSpec] = &[FieldSpec::optional(
    "kubeConfigPath",
    FieldType::String,
    "empty for in-process configuration, otherwise a path",
)
.with_aliases(&["kubeconfigpath"])];

const BEST_FIT_BIN_PACK_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("targetCPUUtilization", FieldType::Percent, "in (0, 100]"),
    FieldSpec::optional("defaultCPURequests", FieldType::Millicores, ">= 0"),
];

/// Shape of one argument kind under one discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    gvk: GroupVersionKind,
    kind: ArgsKind,
    fields: &'static [FieldSpec],
}

impl Schema {
    /// The served v1beta1 schema of a kind.
    pub fn v1beta1(kind: ArgsKind) -> Self {
        let fields = match kind {
            ArgsKind::Coscheduling => COSCHEDULING_FIELDS,
            ArgsKind::NodeResourcesAllocatable => NODE_RESOURCES_ALLOCATABLE_FIELDS,
            ArgsKind::CapacityScheduling => CAPACITY_SCHEDULING_FIELDS,
            ArgsKind::BestFitBinPack => BEST_FIT_BIN_PACK_FIELDS,
        };
        Self {
            gvk: GroupVersionKind::v1beta1(kind),
            kind,
            fields,
        }
    }

    /// Discriminator selecting this schema.
    pub fn gvk(&self) -> &GroupVersionKind {
        &self.gvk
    }

    /// Argument kind.
    pub fn kind(&self) -> ArgsKind {
        self.kind
    }

    /// Declared fields, in wire order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Looks up a field by wire key or alias.
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.matches(key))
    }

    /// Whether `key` may appear in a wire object of this schema.
    pub fn accepts_key(&self, key: &str) -> bool {
        TYPE_META_KEYS.iter().any(|k| *k == key) || self.field(key).is_some()
    }

    /// An object of this kind with every default applied.
    pub fn defaults(&self) -> RawArgs {
        RawArgs::empty(self.kind).with_defaults()
    }
}

/// Mapping from discriminator to schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<GroupVersionKind, Schema>,
}

impl SchemaRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every v1beta1 argument kind.
    pub fn v1beta1() -> Self {
        let mut registry = Self::new();
        for kind in ArgsKind::ALL {
            let schema = Schema::v1beta1(kind);
            registry.schemas.insert(schema.gvk.clone(), schema);
        }
        registry
    }

    /// Registers a schema under its discriminator.
    pub fn register(&mut self, schema: Schema) -> Result<(), RegistryError> {
        if self.schemas.contains_key(&schema.gvk) {
            return Err(RegistryError::DuplicateSchema(schema.gvk));
        }
        self.schemas.insert(schema.gvk.clone(), schema);
        Ok(())
    }

    /// Registers a schema, builder-style.
    pub fn with_schema(mut self, schema: Schema) -> Result<Self, RegistryError> {
        self.register(schema)?;
        Ok(self)
    }

    /// Schema for a discriminator.
    pub fn lookup(&self, gvk: &GroupVersionKind) -> Option<&Schema> {
        self.schemas.get(gvk)
    }

    /// Registered discriminators, sorted.
    pub fn discriminators(&self) -> Vec<&GroupVersionKind> {
        let mut keys: Vec<_> = self.schemas.keys().collect();
        keys.sort();
        keys
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_v1beta1_registry() {
        let registry = SchemaRegistry::v1beta1();
        assert_eq!(registry.len(), 4);
        for kind in ArgsKind::ALL {
            let schema = registry.lookup(&GroupVersionKind::v1beta1(kind)).unwrap();
            assert_eq!(schema.kind(), kind);
        }
    }

    #[test]
    fn test_unknown_lookup() {
        let registry = SchemaRegistry::v1beta1();
        let v1 = GroupVersionKind::new("kubescheduler.config.k8s.io", "v1", "CoschedulingArgs");
        assert!(registry.lookup(&v1).is_none());
        assert!(SchemaRegistry::new().is_empty());
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = SchemaRegistry::new()
            .with_schema(Schema::v1beta1(ArgsKind::Coscheduling))
            .unwrap();
        let err = registry
            .with_schema(Schema::v1beta1(ArgsKind::Coscheduling))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateSchema(GroupVersionKind::v1beta1(ArgsKind::Coscheduling))
        );
    }

    #[test]
    fn test_registries_are_independent() {
        let mut a = SchemaRegistry::new();
        let b = SchemaRegistry::new();
        a.register(Schema::v1beta1(ArgsKind::BestFitBinPack)).unwrap();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn test_wire_keys_distinct() {
        for kind in ArgsKind::ALL {
            let schema = Schema::v1beta1(kind);
            let mut seen = HashSet::new();
            for field in schema.fields() {
                assert!(seen.insert(field.name), "{kind}: {} repeated", field.name);
                for alias in field.aliases {
                    assert!(seen.insert(*alias), "{kind}: {alias} repeated");
                }
            }
        }
    }

    #[test]
    fn test_fields_match_defaulted_wire_object() {
        for kind in ArgsKind::ALL {
            let schema = Schema::v1beta1(kind);
            let json = serde_json::to_value(schema.defaults()).unwrap();
            let keys: HashSet<&str> = json
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            let declared: HashSet<&str> = schema.fields().iter().map(|f| f.name).collect();
            assert_eq!(keys, declared, "{kind}");
        }
    }

    #[test]
    fn test_accepts_key() {
        let schema = Schema::v1beta1(ArgsKind::CapacityScheduling);
        assert!(schema.accepts_key("apiVersion"));
        assert!(schema.accepts_key("kind"));
        assert!(schema.accepts_key("kubeConfigPath"));
        assert!(schema.accepts_key("kubeconfigpath"));
        assert!(!schema.accepts_key("mode"));
        assert_eq!(
            schema.field("kubeconfigpath").map(|f| f.name),
            Some("kubeConfigPath")
        );
    }

    #[test]
    fn test_mode_field_is_closed() {
        let schema = Schema::v1beta1(ArgsKind::NodeResourcesAllocatable);
        assert_eq!(
            schema.field("mode").map(|f| f.field_type),
            Some(FieldType::Enum(&["Least", "Most"]))
        );
    }

    #[test]
    fn test_resource_entry_keys_match_wire() {
        let entry = serde_json::to_value(crate::v1beta1::ResourceSpec::new("cpu", 1)).unwrap();
        let keys: HashSet<&str> = entry.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, RESOURCE_ENTRY_KEYS.iter().copied().collect::<HashSet<_>>());
        assert_eq!(FieldType::ResourceList.entry_keys(), Some(RESOURCE_ENTRY_KEYS));
        assert_eq!(FieldType::Seconds.entry_keys(), None);
    }
}
