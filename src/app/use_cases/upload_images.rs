use crate::domain::model::{CustomerImage, ImageUpload};
use crate::domain::ports::CustomerRepository;
use crate::domain::services::ImageValidationService;
use crate::utils::error::{CrmError, Result};
use std::sync::Arc;
use uuid::Uuid;

pub struct UploadImagesUseCase<R: CustomerRepository> {
    repository: Arc<R>,
    validation: ImageValidationService,
}

impl<R: CustomerRepository> UploadImagesUseCase<R> {
    pub fn new(repository: Arc<R>, validation: ImageValidationService) -> Self {
        Self {
            repository,
            validation,
        }
    }

    /// Adds every image or none of them: the whole batch is validated before
    /// the first write. Returns the stored images in input order.
    pub async fn execute(
        &self,
        customer_id: Uuid,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<CustomerImage>> {
        if uploads.is_empty() {
            return Err(CrmError::validation("At least one image must be provided"));
        }

        let customer = self
            .repository
            .get_by_id(customer_id)
            .await
            .map_err(|e| e.context("Failed to upload images"))?
            .ok_or_else(|| CrmError::customer_not_found(customer_id))?;

        self.validation
            .can_add_images(&customer, uploads.len())
            .into_result()?;

        let mut errors = Vec::new();
        for (index, upload) in uploads.iter().enumerate() {
            let report = self.validation.validate_image(
                &upload.base64_data,
                &upload.file_name,
                &upload.content_type,
                upload.size_in_bytes,
            );
            for error in report.into_errors() {
                errors.push(format!("Image {} ({}): {}", index + 1, upload.file_name, error));
            }
        }
        if !errors.is_empty() {
            tracing::warn!(
                "Rejected upload of {} image(s) for customer {}",
                uploads.len(),
                customer_id
            );
            return Err(CrmError::Validation { errors });
        }

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let image = CustomerImage::from_upload(customer_id, upload);
            let image = self
                .repository
                .add_image(customer_id, image)
                .await
                .map_err(|e| e.context("Failed to upload images"))?;
            stored.push(image);
        }

        tracing::info!("Uploaded {} image(s) for customer {}", stored.len(), customer_id);
        Ok(stored)
    }
}
