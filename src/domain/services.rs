//! Business rules for image uploads.
//!
//! Checks here never fail fast: every rule is evaluated and the caller gets
//! one [`ValidationReport`] listing everything that is wrong.

use crate::domain::model::Customer;
use crate::utils::error::{CrmError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub const MAX_IMAGES_PER_CUSTOMER: usize = 10;
pub const MAX_IMAGE_SIZE_BYTES: i64 = 5 * 1024 * 1024;
pub const ALLOWED_CONTENT_TYPES: [&str; 6] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/bmp",
    "image/webp",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn success() -> Self {
        Self::default()
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
        }
    }

    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CrmError::Validation {
                errors: self.errors,
            })
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImageValidationService;

impl ImageValidationService {
    pub fn new() -> Self {
        Self
    }

    pub fn can_add_images(&self, customer: &Customer, count_to_add: usize) -> ValidationReport {
        let current = customer.images.len();
        if current + count_to_add > MAX_IMAGES_PER_CUSTOMER {
            return ValidationReport::failure(format!(
                "Cannot exceed {} images per customer. Current: {}, Attempting to add: {}",
                MAX_IMAGES_PER_CUSTOMER, current, count_to_add
            ));
        }
        ValidationReport::success()
    }

    pub fn validate_image(
        &self,
        base64_data: &str,
        file_name: &str,
        content_type: &str,
        size_in_bytes: i64,
    ) -> ValidationReport {
        let mut report = ValidationReport::success();

        if size_in_bytes > MAX_IMAGE_SIZE_BYTES {
            report.push(format!(
                "Image size exceeds maximum allowed size of {}MB",
                MAX_IMAGE_SIZE_BYTES / (1024 * 1024)
            ));
        } else if size_in_bytes <= 0 {
            report.push(format!("Image size must be positive (got {})", size_in_bytes));
        }

        if !is_allowed_content_type(content_type) {
            report.push(format!(
                "Content type '{}' is not allowed. Allowed types: {}",
                content_type,
                ALLOWED_CONTENT_TYPES.join(", ")
            ));
        }

        if file_name.trim().is_empty() {
            report.push("File name cannot be empty");
        }

        if !is_valid_base64(base64_data) {
            report.push("Invalid Base64 format");
        }

        report
    }
}

pub fn is_allowed_content_type(content_type: &str) -> bool {
    let lowered = content_type.to_ascii_lowercase();
    ALLOWED_CONTENT_TYPES.contains(&lowered.as_str())
}

/// Accepts plain base64 or a `data:<mime>;base64,<payload>` URI.
pub fn is_valid_base64(value: &str) -> bool {
    if value.trim().is_empty() {
        return false;
    }

    let payload = match value.strip_prefix("data:") {
        Some(rest) => match rest.split_once(',') {
            Some((_, payload)) => payload,
            None => return false,
        },
        None => value,
    };

    // MIME-style line wrapping is tolerated
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact.as_bytes()).is_ok()
}
