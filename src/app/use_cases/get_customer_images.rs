use crate::domain::model::CustomerImage;
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{CrmError, Result};
use std::sync::Arc;
use uuid::Uuid;

pub struct GetCustomerImagesUseCase<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> GetCustomerImagesUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Images of a customer, oldest upload first.
    pub async fn execute(&self, customer_id: Uuid) -> Result<Vec<CustomerImage>> {
        let context = || format!("Failed to retrieve images for customer {}", customer_id);

        self.repository
            .get_by_id(customer_id)
            .await
            .map_err(|e| e.context(context()))?
            .ok_or_else(|| CrmError::customer_not_found(customer_id))?;

        let mut images = self
            .repository
            .get_customer_images(customer_id)
            .await
            .map_err(|e| e.context(context()))?;
        images.sort_by_key(|image| image.uploaded_at);
        Ok(images)
    }
}
