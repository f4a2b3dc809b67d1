//! Structural checks over the whole persisted dataset.
//!
//! Run after every load, to catch corruption already on disk, and before
//! every save, so an inconsistent dataset is never written.

use crate::domain::model::{Customer, CustomerDataset, CustomerImage};
use crate::domain::services::MAX_IMAGES_PER_CUSTOMER;
use crate::utils::error::{CrmError, Result};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default)]
pub struct ConsistencyValidator;

impl ConsistencyValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, dataset: &CustomerDataset) -> Result<()> {
        let mut errors = Vec::new();

        let duplicate_ids = duplicates(dataset.customers.iter().map(|c| c.id));
        if !duplicate_ids.is_empty() {
            errors.push(format!(
                "Duplicate customer IDs found: {}",
                join(&duplicate_ids)
            ));
        }

        for customer in &dataset.customers {
            check_customer(customer, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::warn!("Dataset failed consistency check with {} violation(s)", errors.len());
            Err(CrmError::Validation { errors })
        }
    }
}

fn check_customer(customer: &Customer, errors: &mut Vec<String>) {
    let id = customer.id;

    if id.is_nil() {
        errors.push("Customer ID cannot be empty".to_string());
    }
    if customer.name.trim().is_empty() {
        errors.push(format!("Customer {}: Name cannot be empty", id));
    }
    if customer.email.trim().is_empty() {
        errors.push(format!("Customer {}: Email cannot be empty", id));
    }
    if customer.images.len() > MAX_IMAGES_PER_CUSTOMER {
        errors.push(format!(
            "Customer {}: Cannot have more than {} images (current: {})",
            id,
            MAX_IMAGES_PER_CUSTOMER,
            customer.images.len()
        ));
    }

    let duplicate_images = duplicates(customer.images.iter().map(|image| image.id));
    if !duplicate_images.is_empty() {
        errors.push(format!(
            "Customer {}: Duplicate image IDs found: {}",
            id,
            join(&duplicate_images)
        ));
    }

    for image in &customer.images {
        check_image(image, id, errors);
    }
}

fn check_image(image: &CustomerImage, customer_id: Uuid, errors: &mut Vec<String>) {
    if image.id.is_nil() {
        errors.push(format!("Customer {}: Image ID cannot be empty", customer_id));
    }
    if image.customer_id != customer_id {
        errors.push(format!(
            "Customer {}: Image {} has mismatched customer ID ({})",
            customer_id, image.id, image.customer_id
        ));
    }
    if image.base64_data.trim().is_empty() {
        errors.push(format!(
            "Customer {}: Image {} has empty Base64 data",
            customer_id, image.id
        ));
    }
    if image.file_name.trim().is_empty() {
        errors.push(format!(
            "Customer {}: Image {} has empty file name",
            customer_id, image.id
        ));
    }
    if image.content_type.trim().is_empty() {
        errors.push(format!(
            "Customer {}: Image {} has empty content type",
            customer_id, image.id
        ));
    }
    if image.size_in_bytes <= 0 {
        errors.push(format!(
            "Customer {}: Image {} has invalid size ({})",
            customer_id, image.id, image.size_in_bytes
        ));
    }
}

/// Values that occur more than once, in order of first occurrence.
fn duplicates<T: Eq + Hash + Copy>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut result = Vec::new();
    for value in values {
        if !seen.insert(value) && reported.insert(value) {
            result.push(value);
        }
    }
    result
}

fn join<T: Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
