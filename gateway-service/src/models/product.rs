use serde::{Deserialize, Serialize};
use validator::Validate;

use super::registry::{FieldSpec, Record, RecordDescriptor};

pub const PRODUCT: RecordDescriptor = RecordDescriptor {
    name: "Product",
    fields: &[
        FieldSpec::required("title", "string"),
        FieldSpec::optional("description", "optional<string>"),
        FieldSpec::required("price", "number"),
        FieldSpec::required("category", "string"),
        FieldSpec::optional("in_stock", "boolean"),
    ],
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Product {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    pub category: String,

    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Record for Product {
    const DESCRIPTOR: &'static RecordDescriptor = &PRODUCT;
}
