use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Upload order; the first entry is the oldest image.
    #[serde(default)]
    pub images: Vec<CustomerImage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// A customer without an identifier; the repository assigns one on create.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            name: name.into(),
            email: email.into(),
            phone_number: None,
            address: None,
            images: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn image(&self, image_id: Uuid) -> Option<&CustomerImage> {
        self.images.iter().find(|image| image.id == image_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerImage {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub base64_data: String,
    pub file_name: String,
    pub content_type: String,
    pub size_in_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl CustomerImage {
    pub fn from_upload(customer_id: Uuid, upload: ImageUpload) -> Self {
        Self {
            id: Uuid::nil(),
            customer_id,
            base64_data: upload.base64_data,
            file_name: upload.file_name,
            content_type: upload.content_type,
            size_in_bytes: upload.size_in_bytes,
            uploaded_at: Utc::now(),
        }
    }
}

/// The whole persisted document: every customer, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDataset {
    #[serde(default)]
    pub customers: Vec<Customer>,
}

impl CustomerDataset {
    pub fn find(&self, id: Uuid) -> Option<&Customer> {
        self.customers.iter().find(|customer| customer.id == id)
    }

    pub fn find_mut(&mut self, id: Uuid) -> Option<&mut Customer> {
        self.customers.iter_mut().find(|customer| customer.id == id)
    }

    pub fn position(&self, id: Uuid) -> Option<usize> {
        self.customers.iter().position(|customer| customer.id == id)
    }
}

/// One image as submitted by a caller, before the server assigns identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUpload {
    pub base64_data: String,
    pub file_name: String,
    pub content_type: String,
    pub size_in_bytes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}
