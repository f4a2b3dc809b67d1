use crate::domain::model::Customer;
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{CrmError, Result};
use std::sync::Arc;
use uuid::Uuid;

pub struct GetCustomerUseCase<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> GetCustomerUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// `Ok(None)` when no such customer exists.
    pub async fn execute(&self, customer_id: Uuid) -> Result<Option<Customer>> {
        self.repository.get_by_id(customer_id).await.map_err(|e| {
            CrmError::operation_failed(format!("Failed to retrieve customer {}", customer_id), e)
        })
    }
}

pub struct ListCustomersUseCase<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> ListCustomersUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<Vec<Customer>> {
        self.repository
            .get_all()
            .await
            .map_err(|e| CrmError::operation_failed("Failed to list customers", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{broken_repository, memory_repository};

    #[tokio::test]
    async fn test_get_existing_and_missing_customer() {
        let (repo, _) = memory_repository();
        let created = repo.create(Customer::new("Jane Doe", "jane@x.com")).await.unwrap();
        let use_case = GetCustomerUseCase::new(repo);

        assert_eq!(use_case.execute(created.id).await.unwrap(), Some(created));
        assert_eq!(use_case.execute(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_storage_failure_is_wrapped() {
        let use_case = GetCustomerUseCase::new(broken_repository());
        let id = Uuid::new_v4();

        let err = use_case.execute(id).await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with(&format!("Failed to retrieve customer {}", id)));
    }

    #[tokio::test]
    async fn test_list_customers_in_insertion_order() {
        let (repo, _) = memory_repository();
        for name in ["Ada", "Grace", "Linus"] {
            repo.create(Customer::new(name, format!("{}@x.com", name)))
                .await
                .unwrap();
        }

        let names: Vec<String> = ListCustomersUseCase::new(repo)
            .execute()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Ada", "Grace", "Linus"]);
    }
}
