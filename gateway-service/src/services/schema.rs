use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{RecordDescriptor, REGISTRY};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SchemaEntry {
    pub collection: String,
    pub fields: BTreeMap<String, String>,
    pub required: Vec<String>,
}

impl From<&RecordDescriptor> for SchemaEntry {
    fn from(descriptor: &RecordDescriptor) -> Self {
        Self {
            collection: descriptor.collection(),
            fields: descriptor
                .fields
                .iter()
                .map(|f| (f.name.to_string(), f.descriptor.to_string()))
                .collect(),
            required: descriptor.required_fields().map(str::to_string).collect(),
        }
    }
}

/// Schema of every registered record type, keyed by type name.
pub fn describe() -> BTreeMap<String, SchemaEntry> {
    describe_registry(REGISTRY)
}

pub fn describe_registry(registry: &[&RecordDescriptor]) -> BTreeMap<String, SchemaEntry> {
    registry
        .iter()
        .map(|descriptor| (descriptor.name.to_string(), SchemaEntry::from(*descriptor)))
        .collect()
}
