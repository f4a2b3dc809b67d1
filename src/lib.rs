pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
mod test_support;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{JsonCustomerRepository, JsonStorage};
pub use config::CrmConfig;
pub use core::CrmService;
pub use utils::error::{CrmError, Result};
