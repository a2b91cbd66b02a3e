//! Doctrans server
//!
//! Serves the translation API and the translated documents.

use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use doctrans::pipeline::TranslatorOptions;
use doctrans::server::{self, AppState, Config};
use doctrans::translate::{GoogleTranslator, LanguageCatalog, TranslationPort};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "doctrans=info,tower_http=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Starting doctrans v{}", env!("CARGO_PKG_VERSION"));

    std::fs::create_dir_all(&config.server.output_dir)?;

    let catalog = match &config.backend.languages_path {
        Some(path) => LanguageCatalog::from_path(path)?,
        None => LanguageCatalog::embedded(),
    };
    info!("{} languages available", catalog.len());
    let catalog = Arc::new(catalog);

    // The blocking HTTP client owns a runtime of its own; it is created and
    // finally dropped outside the server runtime.
    let backend: Arc<dyn TranslationPort> = Arc::new(GoogleTranslator::new(
        &config.backend.base_url,
        config.backend.timeout,
        Arc::clone(&catalog),
    )?);
    info!("Translation backend: {} ({})", backend.name(), config.backend.base_url);

    let state = AppState::new(
        Arc::clone(&backend),
        catalog,
        TranslatorOptions {
            image_scope: config.image_scope,
            read_limits: config.read_limits,
        },
        config.server.output_dir.clone(),
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(&config, state))?;
    drop(runtime);

    info!("Server shutdown complete");
    Ok(())
}

async fn serve(config: &Config, state: AppState) -> std::io::Result<()> {
    let app = server::router(state, config.server.max_upload_bytes());

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("doctrans listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(e) => {
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
