use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};

use seolma_client::config::{load_config, print_schema};
use seolma_client::gateway::RequestOptions;
use seolma_client::list::Pagination;
use seolma_client::notify::TracingNotifier;
use seolma_client::startup::build_platform;
use seolma_client::utils::logger::init_logging;

const CONFIG_PATH_VAR: &str = "SEOLMA_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::args().any(|arg| arg == "--schema") {
        return match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Could not render schema: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = match load_config(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.logging) {
        eprintln!("{}", e);
        return ExitCode::FAILURE;
    }
    info!("Loaded configuration from {}", path);

    let platform = match build_platform(Arc::new(config), Arc::new(TracingNotifier)) {
        Ok(platform) => platform,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let params = Pagination::default().params();
    match platform.products.list(&params, RequestOptions::default()).await {
        Ok(page) => match serde_json::to_string_pretty(&page) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("Could not render product page: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("Could not load products: {}", e);
            ExitCode::FAILURE
        }
    }
}
