pub mod error;
pub mod schema;
pub mod subscribers;

pub use error::{RecordDecodeError, SchemaInitError, StoreError};
pub use subscribers::SubscriberStore;
