use std::process::ExitCode;
use std::sync::Arc;

use tracing::{debug, error};

use uptime_robot_exporter::config::{load_config, print_schema, Config};
use uptime_robot_exporter::startup;
use uptime_robot_exporter::utils::logger::init_logging;

const USAGE: &str = "Usage: uptime-robot-exporter [schema|healthcheck]";

#[tokio::main]
async fn main() -> ExitCode {
    match std::env::args().nth(1).as_deref() {
        None => serve().await,
        Some("schema") => match print_schema() {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error printing schema: {}", e);
                ExitCode::FAILURE
            }
        },
        Some("healthcheck") => healthcheck().await,
        Some("-h") | Some("--help") => {
            println!("{}", USAGE);
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("Unknown command '{}'. {}", other, USAGE);
            ExitCode::from(2)
        }
    }
}

async fn serve() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = init_logging(&config.logging()) {
        eprintln!("Error initializing logging: {}", e);
        return ExitCode::FAILURE;
    }
    debug!("Loaded configuration: {:?}", config);

    match startup::run(Arc::new(config)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exporter failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Only the port matters here, so the API key is not required.
async fn healthcheck() -> ExitCode {
    let config: Config = match Config::figment().extract() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if startup::healthcheck(&config).await {
        ExitCode::SUCCESS
    } else {
        eprintln!("Nothing is listening on port {}", config.port);
        ExitCode::FAILURE
    }
}
