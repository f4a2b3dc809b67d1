pub mod create_customer;
pub mod delete_image;
pub mod get_customer;
pub mod get_customer_images;
pub mod upload_images;

pub use create_customer::CreateCustomerUseCase;
pub use delete_image::DeleteImageUseCase;
pub use get_customer::{GetCustomerUseCase, ListCustomersUseCase};
pub use get_customer_images::GetCustomerImagesUseCase;
pub use upload_images::UploadImagesUseCase;
