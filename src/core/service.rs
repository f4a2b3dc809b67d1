use crate::adapters::{JsonCustomerRepository, JsonStorage};
use crate::app::use_cases::{
    CreateCustomerUseCase, DeleteImageUseCase, GetCustomerImagesUseCase, GetCustomerUseCase,
    ListCustomersUseCase, UploadImagesUseCase,
};
use crate::core::{ConfigProvider, CustomerRepository};
use crate::domain::model::{CreateCustomerRequest, Customer, CustomerImage, ImageUpload};
use crate::domain::services::ImageValidationService;
use crate::utils::error::Result;
use std::sync::Arc;
use uuid::Uuid;

/// Entry point for callers: one method per application operation.
pub struct CrmService<R: CustomerRepository> {
    create_customer: CreateCustomerUseCase<R>,
    get_customer: GetCustomerUseCase<R>,
    list_customers: ListCustomersUseCase<R>,
    upload_images: UploadImagesUseCase<R>,
    get_customer_images: GetCustomerImagesUseCase<R>,
    delete_image: DeleteImageUseCase<R>,
}

impl CrmService<JsonCustomerRepository<JsonStorage>> {
    /// Wire the JSON file store described by `config`.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let storage = JsonStorage::from_config(config);
        tracing::debug!(
            "Using document '{}' under {}",
            config.document_key(),
            storage.root().display()
        );
        let repository = JsonCustomerRepository::with_key(storage, config.document_key());
        Self::new(Arc::new(repository))
    }
}

impl<R: CustomerRepository> CrmService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        let validation = ImageValidationService::new();
        Self {
            create_customer: CreateCustomerUseCase::new(Arc::clone(&repository)),
            get_customer: GetCustomerUseCase::new(Arc::clone(&repository)),
            list_customers: ListCustomersUseCase::new(Arc::clone(&repository)),
            upload_images: UploadImagesUseCase::new(Arc::clone(&repository), validation),
            get_customer_images: GetCustomerImagesUseCase::new(Arc::clone(&repository)),
            delete_image: DeleteImageUseCase::new(repository),
        }
    }

    pub async fn create_customer(&self, request: CreateCustomerRequest) -> Result<Customer> {
        self.create_customer.execute(request).await
    }

    pub async fn get_customer(&self, customer_id: Uuid) -> Result<Option<Customer>> {
        self.get_customer.execute(customer_id).await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        self.list_customers.execute().await
    }

    pub async fn upload_images(
        &self,
        customer_id: Uuid,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<CustomerImage>> {
        self.upload_images.execute(customer_id, uploads).await
    }

    pub async fn get_customer_images(&self, customer_id: Uuid) -> Result<Vec<CustomerImage>> {
        self.get_customer_images.execute(customer_id).await
    }

    pub async fn delete_image(&self, customer_id: Uuid, image_id: Uuid) -> Result<()> {
        self.delete_image.execute(customer_id, image_id).await
    }
}
