// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pickup - order pickup preferences with AI-generated summaries.
//!
//! This is the binary entry point for the Pickup API server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;

use clap::{Parser, Subcommand};

/// Pickup - order pickup preferences with AI-generated summaries.
#[derive(Parser, Debug)]
#[command(name = "pickup", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API server (default).
    Serve,
    /// Apply pending database migrations and exit.
    Migrate,
    /// Print an Argon2id hash for a password read from stdin.
    HashPassword,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(Commands::HashPassword) = cli.command {
        if let Err(e) = serve::run_hash_password() {
            eprintln!("pickup: {e}");
            std::process::exit(1);
        }
        return;
    }

    let config = match pickup_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            pickup_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Migrate) => serve::run_migrate(config).await,
        _ => serve::run_serve(config).await,
    };

    if let Err(e) = result {
        eprintln!("pickup: {e}");
        std::process::exit(1);
    }
}
