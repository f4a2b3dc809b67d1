use crate::domain::model::{CreateCustomerRequest, Customer};
use crate::domain::ports::CustomerRepository;
use crate::utils::error::{CrmError, Result};
use crate::utils::validation::validate_non_empty_string;
use std::sync::Arc;

pub struct CreateCustomerUseCase<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CreateCustomerUseCase<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, request: CreateCustomerRequest) -> Result<Customer> {
        validate_non_empty_string("name", &request.name)?;
        validate_non_empty_string("email", &request.email)?;

        let mut customer = Customer::new(request.name, request.email);
        customer.phone_number = request.phone_number;
        customer.address = request.address;

        self.repository
            .create(customer)
            .await
            .map_err(|e| CrmError::operation_failed("Failed to create customer", e))
    }
}
