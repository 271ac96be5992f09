pub mod product;
pub mod registry;
pub mod user;

pub use product::Product;
pub use registry::{FieldSpec, Record, RecordDescriptor, REGISTRY};
pub use user::User;
