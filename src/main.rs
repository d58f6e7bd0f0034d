// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use cli::{Args, is_config_operation};
use commands::{
    handle_clear_cache_command, handle_config_update_command, handle_list_config_command,
    handle_lookup_command, validate_args,
};
use vsports::{AppError, Config};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    validate_args(&args)?;

    // Load config up front so its log file path is known; configuration
    // commands below still run when this fails
    let loaded = Config::load().await;
    let config_log_path = loaded
        .as_ref()
        .ok()
        .and_then(|config| config.log_file_path.clone());

    let (log_file_path, _guard) = logging::setup_logging(&args, config_log_path).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return handle_config_update_command(&args).await;
    }

    let config = loaded?;

    if args.clear_cache {
        handle_clear_cache_command(&config).await?;
    }

    match &args.command {
        Some(command) => handle_lookup_command(&config, command, &args).await,
        None if args.clear_cache => Ok(()),
        None => {
            Args::command().print_help()?;
            println!();
            Ok(())
        }
    }
}
