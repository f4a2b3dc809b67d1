use crate::domain::ports::CustomerRepository;
use crate::utils::error::{CrmError, Result};
use std::sync::Arc;
use uuid::Uuid;

pub struct DeleteImageUseCase<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> DeleteImageUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// A missing customer is `NotFound`; a missing image is a rejected
    /// request (`Validation`), since the customer itself exists.
    pub async fn execute(&self, customer_id: Uuid, image_id: Uuid) -> Result<()> {
        let context = "Failed to delete image";

        self.repository
            .get_by_id(customer_id)
            .await
            .map_err(|e| e.context(context))?
            .ok_or_else(|| CrmError::customer_not_found(customer_id))?;

        let image = self
            .repository
            .get_customer_image(customer_id, image_id)
            .await
            .map_err(|e| e.context(context))?;
        if image.is_none() {
            return Err(CrmError::validation(format!(
                "Image with ID '{}' was not found for customer '{}'",
                image_id, customer_id
            )));
        }

        let removed = self
            .repository
            .remove_image(customer_id, image_id)
            .await
            .map_err(|e| e.context(context))?;
        if !removed {
            return Err(CrmError::validation(format!(
                "Failed to remove image with ID '{}' for customer '{}'",
                image_id, customer_id
            )));
        }

        tracing::info!("Deleted image {} of customer {}", image_id, customer_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Customer, CustomerImage};
    use crate::test_support::{memory_repository, png_upload};

    #[tokio::test]
    async fn test_delete_existing_image() {
        let (repo, _) = memory_repository();
        let customer = repo.create(Customer::new("Jane Doe", "jane@x.com")).await.unwrap();
        let image = repo
            .add_image(customer.id, CustomerImage::from_upload(customer.id, png_upload("a.png")))
            .await
            .unwrap();

        DeleteImageUseCase::new(repo.clone())
            .execute(customer.id, image.id)
            .await
            .unwrap();

        assert!(repo.get_customer_images(customer.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_image_is_rejected_not_missing_customer() {
        let (repo, storage) = memory_repository();
        let customer = repo.create(Customer::new("Jane Doe", "jane@x.com")).await.unwrap();
        let image_id = Uuid::new_v4();

        let err = DeleteImageUseCase::new(repo)
            .execute(customer.id, image_id)
            .await
            .unwrap_err();

        assert_eq!(
            err.validation_errors(),
            [format!(
                "Image with ID '{}' was not found for customer '{}'",
                image_id, customer.id
            )]
        );
        assert_eq!(storage.write_count().await, 1);
    }

    #[tokio::test]
    async fn test_missing_customer_is_not_found() {
        let (repo, _) = memory_repository();
        let err = DeleteImageUseCase::new(repo)
            .execute(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, CrmError::NotFound { .. }));
    }
}
