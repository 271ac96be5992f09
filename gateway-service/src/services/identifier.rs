//! Conversion between MongoDB ObjectIds and the hex strings used in URLs and
//! response bodies.

use mongodb::bson::{oid::ObjectId, Bson};

use super::store::StoreError;

/// External form of an internal identifier: 24 lowercase hex characters.
pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// Parse an external identifier, rejecting anything that is not 24 hex chars.
pub fn decode(external_id: &str) -> Result<ObjectId, StoreError> {
    ObjectId::parse_str(external_id)
        .map_err(|_| StoreError::InvalidIdentifier(external_id.to_string()))
}

/// Encode whatever sits in a document's `_id` slot.
///
/// Documents written by this service always carry an ObjectId; anything else
/// (string keys, numbers) falls back to its plain string form.
pub fn encode_bson(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => encode(oid),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}
