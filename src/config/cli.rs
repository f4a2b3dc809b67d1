use crate::config::toml_config::CrmConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Debug, Clone, Parser)]
#[command(name = "mini-crm")]
#[command(about = "Manage customer profiles and their image attachments")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory holding the JSON documents")]
    pub data_dir: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a customer profile
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Show one customer
    Get { customer_id: Uuid },
    /// List every customer
    List,
    /// Attach image files to a customer
    Upload {
        customer_id: Uuid,
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, help = "Override the content type guessed from the extension")]
        content_type: Option<String>,
    },
    /// List a customer's images, oldest first
    Images { customer_id: Uuid },
    /// Remove one image from a customer
    DeleteImage { customer_id: Uuid, image_id: Uuid },
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<CrmConfig> {
        let mut config = match &self.config {
            Some(path) => CrmConfig::from_file(path)?,
            None => CrmConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if self.verbose {
            config.logging.level = "debug".to_string();
        }
        if self.json_logs {
            config.logging.json = true;
        }

        config.validate()?;
        Ok(config)
    }
}
