use serde::{Deserialize, Serialize};
use validator::Validate;

use super::registry::{FieldSpec, Record, RecordDescriptor};

pub const USER: RecordDescriptor = RecordDescriptor {
    name: "User",
    fields: &[
        FieldSpec::required("name", "string"),
        FieldSpec::required("email", "email"),
        FieldSpec::optional("address", "optional<string>"),
        FieldSpec::optional("age", "optional<integer>"),
        FieldSpec::optional("is_active", "boolean"),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct User {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[validate(range(max = 120, message = "Age must be between 0 and 120"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Record for User {
    const DESCRIPTOR: &'static RecordDescriptor = &USER;
}
