//! Document shaping on the way into and out of the store.

use mongodb::bson::{self, Document};
use serde_json::{Map, Value};

use super::identifier;
use super::store::StoreError;
use crate::models::Record;

/// Field holding the store-assigned identifier.
pub const INTERNAL_ID_FIELD: &str = "_id";
/// Field carrying the encoded identifier in responses.
pub const EXTERNAL_ID_FIELD: &str = "id";

pub type SerializedDocument = Map<String, Value>;

/// Turn a stored document into a JSON-safe map.
///
/// `_id` is replaced by `id` holding its encoded form. Every other field is
/// carried over as relaxed extended JSON, unchanged. Documents without `_id`
/// pass through untouched.
///
/// A stored field already named `id` is replaced by the encoded identifier
/// and a warning is logged.
pub fn to_output(mut document: Document) -> SerializedDocument {
    let internal_id = document.remove(INTERNAL_ID_FIELD);

    let mut output: SerializedDocument = document
        .into_iter()
        .map(|(key, value)| (key, value.into_relaxed_extjson()))
        .collect();

    if let Some(id) = internal_id {
        let encoded = identifier::encode_bson(&id);
        if let Some(shadowed) = output.insert(
            EXTERNAL_ID_FIELD.to_string(),
            Value::String(encoded.clone()),
        ) {
            tracing::warn!(
                id = %encoded,
                shadowed = %shadowed,
                "Stored field `id` replaced by the encoded identifier"
            );
        }
    }

    output
}

/// Map a validated record one-to-one onto a storable document.
pub fn to_storable<T: Record>(record: &T) -> Result<Document, StoreError> {
    Ok(bson::to_document(record)?)
}
