// SPDX-FileCopyrightText: 2026 Pickup Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations: `serve`, `migrate` and `hash-password`.

use std::io::BufRead;
use std::sync::Arc;
use std::time::{Duration, Instant};

use pickup_config::PickupConfig;
use pickup_core::{
    CredentialSource, PickupError, PluginAdapter, ProviderAdapter, StorageAdapter, UserStore,
};
use pickup_gateway::{hash_password, start_server, AppState, JwtAuth};
use pickup_gemini::GeminiProvider;
use pickup_openai::OpenAiProvider;
use pickup_storage::{Database, SqliteStorage};
use pickup_summary::{ConfigCredentials, SummaryService};
use tracing::{info, warn};

const DEV_JWT_SECRET: &str = "dev-secret";

/// Runs the API server until SIGINT or SIGTERM.
pub async fn run_serve(config: PickupConfig) -> Result<(), PickupError> {
    init_tracing(&config.server.log_level);
    info!(version = env!("CARGO_PKG_VERSION"), "starting pickup");

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    if config.auth.seed_user {
        let hash = hash_password(&config.auth.seed_password)?;
        let user = storage.upsert_user(&config.auth.seed_email, &hash).await?;
        info!(user_id = user.id, email = %user.email, "seed user ready");
    }

    let summaries = build_summary_service(&config)?;
    let tokens = JwtAuth::from_config(&config.auth)?;

    if config.auth.jwt_secret == DEV_JWT_SECRET {
        warn!("auth.jwt_secret is the development default; set PICKUP_AUTH_JWT_SECRET in production");
    }

    let state = AppState {
        users: storage.clone(),
        orders: storage.clone(),
        tokens: Arc::new(tokens),
        summaries: Arc::new(summaries),
        storage: storage.clone(),
        start_time: Instant::now(),
    };

    let served = start_server(&config.server, state, shutdown_signal()).await;

    if let Err(e) = storage.shutdown().await {
        warn!(error = %e, "storage shutdown failed");
    }
    served
}

/// Applies pending migrations and reports how many ran.
pub async fn run_migrate(config: PickupConfig) -> Result<(), PickupError> {
    init_tracing(&config.server.log_level);
    let db = Database::open(&config.storage.database_path, config.storage.wal_mode).await?;
    let applied = db.migrate().await?;
    println!(
        "pickup: {applied} migration(s) applied to {}",
        config.storage.database_path
    );
    Ok(())
}

/// Reads one password line from stdin and prints its Argon2id hash.
pub fn run_hash_password() -> Result<(), PickupError> {
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| PickupError::Internal(format!("failed to read password: {e}")))?;
    let password = line.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err(PickupError::Validation("password must not be empty".into()));
    }
    println!("{}", hash_password(password)?);
    Ok(())
}

/// Providers in precedence order: OpenAI first, Gemini second.
fn build_summary_service(config: &PickupConfig) -> Result<SummaryService, PickupError> {
    let providers: Vec<Arc<dyn ProviderAdapter>> = vec![
        Arc::new(OpenAiProvider::new(config)?),
        Arc::new(GeminiProvider::new(config)?),
    ];
    let credentials = ConfigCredentials::new(config);

    let configured: Vec<&str> = providers
        .iter()
        .map(|p| p.name())
        .filter(|name| credentials.credential(name).is_some())
        .collect();
    if configured.is_empty() {
        info!("no AI provider key configured; summaries will use the fallback text");
    } else {
        info!(providers = ?configured, "AI provider keys found at startup");
    }

    Ok(SummaryService::new(
        providers,
        Arc::new(credentials),
        Duration::from_secs(config.summary.timeout_secs),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
                    _ = sigterm.recv() => info!("received SIGTERM, initiating shutdown"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                ctrl_c.await;
                info!("received SIGINT (Ctrl+C), initiating shutdown");
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await;
        info!("received Ctrl+C, initiating shutdown");
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("pickup={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_service_lists_openai_before_gemini() {
        let config = PickupConfig::default();
        let service = build_summary_service(&config).unwrap();
        assert_eq!(service.provider_names(), vec!["openai", "gemini"]);
    }
}
