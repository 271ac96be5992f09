pub mod health;
pub mod identifier;
pub mod memory;
pub mod metrics;
pub mod mongo;
pub mod schema;
pub mod serializer;
pub mod store;

pub use health::{EnvPresence, HealthReport, HealthReporter};
pub use memory::MemoryStore;
pub use self::metrics::{get_metrics, init_metrics};
pub use mongo::MongoStore;
pub use schema::{describe, SchemaEntry};
pub use serializer::{to_output, to_storable, SerializedDocument};
pub use store::{clamp_limit, ConnectionState, DocumentStore, StoreError};
