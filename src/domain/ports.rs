use crate::domain::model::{Customer, CustomerImage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

/// Named JSON documents on some backing store.
pub trait DocumentStore: Send + Sync {
    /// `Ok(None)` when the document does not exist or is empty.
    fn read<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<T>>> + Send;
    fn write<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, key: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
    fn delete(&self, key: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn data_dir(&self) -> &str;
    fn document_key(&self) -> &str;
}

/// Persistence gateway for the customer aggregate and the images it owns.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Customer>>;
    async fn get_all(&self) -> Result<Vec<Customer>>;
    async fn create(&self, customer: Customer) -> Result<Customer>;
    async fn update(&self, customer: Customer) -> Result<Customer>;
    async fn delete(&self, id: Uuid) -> Result<bool>;

    async fn get_customer_images(&self, customer_id: Uuid) -> Result<Vec<CustomerImage>>;
    async fn get_customer_image(
        &self,
        customer_id: Uuid,
        image_id: Uuid,
    ) -> Result<Option<CustomerImage>>;
    async fn add_image(&self, customer_id: Uuid, image: CustomerImage) -> Result<CustomerImage>;
    async fn remove_image(&self, customer_id: Uuid, image_id: Uuid) -> Result<bool>;
}
