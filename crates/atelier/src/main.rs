// SPDX-FileCopyrightText: 2026 Atelier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Atelier - portfolio site backend with a Telegram lead bot and web inbox.
//!
//! Binary entry point: loads and validates configuration, initializes
//! tracing, and dispatches subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing::error;

mod serve;

/// Atelier - portfolio site backend with a Telegram lead bot.
#[derive(Parser, Debug)]
#[command(name = "atelier", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the webhook + inbox server.
    Serve,
    /// Print the resolved configuration (secrets redacted).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match atelier_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            atelier_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.studio.log_level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                error!(error = %e, "server exited with error");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => print_config(&config),
        None => {
            println!("atelier: use --help for available commands");
        }
    }
}

/// Env filter wins over the configured log level when set.
fn init_tracing(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn print_config(config: &atelier_config::AtelierConfig) {
    println!("studio.name         = {}", config.studio.name);
    println!("studio.log_level    = {}", config.studio.log_level);
    println!(
        "telegram.bot_token  = {}",
        if config.telegram.bot_token.is_some() {
            "[set]"
        } else {
            "[unset]"
        }
    );
    println!(
        "telegram.webhook_secret = {}",
        if config.telegram.webhook_secret.is_some() {
            "[set]"
        } else {
            "[unset]"
        }
    );
    println!("storage.database_path = {}", config.storage.database_path);
    println!("storage.wal_mode    = {}", config.storage.wal_mode);
    println!("gateway.host        = {}", config.gateway.host);
    println!("gateway.port        = {}", config.gateway.port);
    println!(
        "media               = {}",
        if config.media.is_configured() {
            "configured"
        } else {
            "not configured"
        }
    );
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = atelier_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.studio.name, "atelier");
    }
}
