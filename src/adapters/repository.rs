use crate::adapters::consistency::ConsistencyValidator;
use crate::domain::model::{Customer, CustomerDataset, CustomerImage};
use crate::domain::ports::{CustomerRepository, DocumentStore};
use crate::utils::error::{CrmError, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub const DEFAULT_DOCUMENT_KEY: &str = "customers";

/// Result of a mutation closure: whether the dataset has to be written back.
enum Change<T> {
    Persist(T),
    Skip(T),
}

/// Customer repository over a single JSON document holding every customer.
///
/// Each mutation reloads the full dataset, validates it, applies exactly one
/// change in memory, validates again and writes the whole document back. A
/// failed validation leaves the stored document untouched.
pub struct JsonCustomerRepository<S: DocumentStore> {
    storage: S,
    validator: ConsistencyValidator,
    key: String,
}

impl<S: DocumentStore> JsonCustomerRepository<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_DOCUMENT_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            validator: ConsistencyValidator::new(),
            key: key.into(),
        }
    }

    async fn load(&self) -> Result<CustomerDataset> {
        let dataset = self
            .storage
            .read::<CustomerDataset>(&self.key)
            .await?
            .unwrap_or_default();
        self.validator.validate(&dataset)?;
        Ok(dataset)
    }

    async fn save(&self, dataset: &CustomerDataset) -> Result<()> {
        self.validator.validate(dataset)?;
        self.storage.write(&self.key, dataset).await
    }

    async fn modify<T, F>(&self, mutation: F) -> Result<T>
    where
        F: FnOnce(&mut CustomerDataset) -> Result<Change<T>> + Send,
        T: Send,
    {
        let mut dataset = self.load().await?;
        match mutation(&mut dataset)? {
            Change::Persist(value) => {
                self.save(&dataset).await?;
                Ok(value)
            }
            Change::Skip(value) => Ok(value),
        }
    }
}

#[async_trait]
impl<S: DocumentStore> CustomerRepository for JsonCustomerRepository<S> {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Customer>> {
        let dataset = self.load().await?;
        Ok(dataset.find(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Customer>> {
        Ok(self.load().await?.customers)
    }

    async fn create(&self, mut customer: Customer) -> Result<Customer> {
        if customer.id.is_nil() {
            customer.id = Uuid::new_v4();
        }
        let now = Utc::now();
        customer.created_at = now;
        customer.updated_at = now;

        let created = self
            .modify(move |dataset| {
                if dataset.find(customer.id).is_some() {
                    return Err(CrmError::Conflict {
                        message: format!("Customer with ID {} already exists", customer.id),
                    });
                }
                dataset.customers.push(customer.clone());
                Ok(Change::Persist(customer))
            })
            .await?;

        tracing::info!("Created customer {}", created.id);
        Ok(created)
    }

    async fn update(&self, mut customer: Customer) -> Result<Customer> {
        customer.updated_at = Utc::now();

        self.modify(move |dataset| {
            let index = dataset
                .position(customer.id)
                .ok_or_else(|| CrmError::customer_not_found(customer.id))?;
            dataset.customers[index] = customer.clone();
            Ok(Change::Persist(customer))
        })
        .await
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let removed = self
            .modify(move |dataset| match dataset.position(id) {
                Some(index) => {
                    dataset.customers.remove(index);
                    Ok(Change::Persist(true))
                }
                None => Ok(Change::Skip(false)),
            })
            .await?;

        if removed {
            tracing::info!("Deleted customer {}", id);
        }
        Ok(removed)
    }

    async fn get_customer_images(&self, customer_id: Uuid) -> Result<Vec<CustomerImage>> {
        self.get_by_id(customer_id)
            .await?
            .map(|customer| customer.images)
            .ok_or_else(|| CrmError::customer_not_found(customer_id))
    }

    async fn get_customer_image(
        &self,
        customer_id: Uuid,
        image_id: Uuid,
    ) -> Result<Option<CustomerImage>> {
        let customer = self
            .get_by_id(customer_id)
            .await?
            .ok_or_else(|| CrmError::customer_not_found(customer_id))?;
        Ok(customer.image(image_id).cloned())
    }

    async fn add_image(&self, customer_id: Uuid, mut image: CustomerImage) -> Result<CustomerImage> {
        image.customer_id = customer_id;
        if image.id.is_nil() {
            image.id = Uuid::new_v4();
        }
        image.uploaded_at = Utc::now();

        let stored = self
            .modify(move |dataset| {
                let customer = dataset
                    .find_mut(customer_id)
                    .ok_or_else(|| CrmError::customer_not_found(customer_id))?;
                customer.images.push(image.clone());
                customer.updated_at = Utc::now();
                Ok(Change::Persist(image))
            })
            .await?;

        tracing::debug!("Added image {} to customer {}", stored.id, customer_id);
        Ok(stored)
    }

    async fn remove_image(&self, customer_id: Uuid, image_id: Uuid) -> Result<bool> {
        let removed = self
            .modify(move |dataset| {
                let customer = dataset
                    .find_mut(customer_id)
                    .ok_or_else(|| CrmError::customer_not_found(customer_id))?;
                match customer.images.iter().position(|image| image.id == image_id) {
                    Some(index) => {
                        customer.images.remove(index);
                        customer.updated_at = Utc::now();
                        Ok(Change::Persist(true))
                    }
                    None => Ok(Change::Skip(false)),
                }
            })
            .await?;

        if removed {
            tracing::debug!("Removed image {} from customer {}", image_id, customer_id);
        }
        Ok(removed)
    }
}
