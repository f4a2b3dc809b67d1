// Adapters layer: concrete implementations of the domain ports (JSON file
// storage, the customer repository on top of it, local image files).

pub mod consistency;
pub mod repository;
pub mod storage;
pub mod upload;

pub use consistency::ConsistencyValidator;
pub use repository::{JsonCustomerRepository, DEFAULT_DOCUMENT_KEY};
pub use storage::JsonStorage;
