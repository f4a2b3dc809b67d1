use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` wins over the configured level when set.
fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directive(level)))
}

fn filter_directive(level: &str) -> String {
    format!("mini_crm={}", level)
}

pub fn init_cli_logger(level: &str) {
    // CLI 輸出走 stdout，日誌一律寫到 stderr
    tracing_subscriber::registry()
        .with(crate_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: &str) {
    tracing_subscriber::registry()
        .with(crate_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(true)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_uses_configured_level() {
        assert_eq!(filter_directive("warn"), "mini_crm=warn");
        assert_eq!(filter_directive("debug"), "mini_crm=debug");
    }
}
