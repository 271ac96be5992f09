pub mod health;
pub mod records;
pub mod root;
pub mod schema;

pub use health::{health_check, metrics_endpoint};
pub use records::{create_record, get_record, list_records, CreatedResponse, ListParams};
pub use root::{hello, read_root};
pub use schema::get_schema;
