//! Static registry of the record types the gateway stores.
//!
//! Each record type carries a hand-written descriptor next to its struct; the
//! schema endpoint reads `REGISTRY` instead of discovering types at runtime.

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use super::{product::PRODUCT, user::USER};

/// One declared field of a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Human-readable type, e.g. `string` or `optional<integer>`.
    pub descriptor: &'static str,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, descriptor: &'static str) -> Self {
        Self {
            name,
            descriptor,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, descriptor: &'static str) -> Self {
        Self {
            name,
            descriptor,
            required: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordDescriptor {
    /// Type name as exposed by the schema endpoint (`User`).
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordDescriptor {
    /// Collection backing this type: the lowercased type name.
    pub fn collection(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().filter(|f| f.required).map(|f| f.name)
    }
}

/// A validated input payload that can be stored as a document.
pub trait Record: Serialize + DeserializeOwned + Validate + Send + Sync + 'static {
    const DESCRIPTOR: &'static RecordDescriptor;
}

/// Every record type served by the gateway, in registration order.
pub static REGISTRY: &[&RecordDescriptor] = &[&USER, &PRODUCT];
