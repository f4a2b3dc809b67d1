use clap::Parser;
use mini_crm::adapters::upload::read_image_file;
use mini_crm::core::CreateCustomerRequest;
use mini_crm::utils::error::{CrmError, ErrorSeverity};
use mini_crm::utils::logger;
use mini_crm::{CliConfig, Command, CrmService, JsonCustomerRepository, JsonStorage};
use serde::Serialize;

type Service = CrmService<JsonCustomerRepository<JsonStorage>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置 (日誌尚未初始化，直接寫 stderr)
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(&config.logging.level);
    }

    tracing::info!("Starting mini-crm");
    tracing::debug!("Resolved config: {:?}", config);

    let service = CrmService::from_config(&config);

    if let Err(e) = run(&service, cli.command).await {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(service: &Service, command: Command) -> Result<(), CrmError> {
    match command {
        Command::Create {
            name,
            email,
            phone,
            address,
        } => {
            let customer = service
                .create_customer(CreateCustomerRequest {
                    name,
                    email,
                    phone_number: phone,
                    address,
                })
                .await?;
            tracing::info!("✅ Created customer {}", customer.id);
            print_json(&customer)
        }
        Command::Get { customer_id } => match service.get_customer(customer_id).await? {
            Some(customer) => print_json(&customer),
            None => Err(CrmError::customer_not_found(customer_id)),
        },
        Command::List => print_json(&service.list_customers().await?),
        Command::Upload {
            customer_id,
            files,
            content_type,
        } => {
            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                uploads.push(read_image_file(path, content_type.as_deref()).await?);
            }
            let stored = service.upload_images(customer_id, uploads).await?;
            tracing::info!("✅ Uploaded {} image(s) to {}", stored.len(), customer_id);
            print_json(&stored)
        }
        Command::Images { customer_id } => {
            print_json(&service.get_customer_images(customer_id).await?)
        }
        Command::DeleteImage {
            customer_id,
            image_id,
        } => {
            service.delete_image(customer_id, image_id).await?;
            tracing::info!("🗑️ Removed image {} from {}", image_id, customer_id);
            print_json(&serde_json::json!({ "deleted": image_id }))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CrmError> {
    let output = serde_json::to_string_pretty(value).map_err(CrmError::Render)?;
    println!("{}", output);
    Ok(())
}
