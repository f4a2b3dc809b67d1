pub mod service;

pub use crate::domain::model::{
    CreateCustomerRequest, Customer, CustomerDataset, CustomerImage, ImageUpload,
};
pub use crate::domain::ports::{ConfigProvider, CustomerRepository, DocumentStore};
pub use crate::utils::error::Result;
pub use service::CrmService;
