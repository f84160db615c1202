//! contactd-api - mock CRM and chat-notification server

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

use contactd_api::middleware::journal_layer;
use contactd_api::{build_router, AppState, Config};
use contactd_core::{MockBackend, TracingObserver};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter
    //   REQUEST_LOG - path of the request/response journal (optional)
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let config = Config::from_env();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "contactd_api=debug,contactd_core=debug,tower_http=debug,exchange=info".into()
    });

    // The journal has its own filter so it keeps recording whatever RUST_LOG
    // says; RUST_LOG only governs the console or file output.
    let mut guards = Vec::new();
    let journal = match &config.request_log {
        Some(path) => {
            let dir = path.parent().unwrap_or(std::path::Path::new("."));
            let name = path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("requests.txt");
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            guards.push(guard);
            Some(journal_layer::<Registry, _>(writer))
        }
        None => None,
    };

    let output_layer = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("contactd-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        if log_format == "json" {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)) // no ANSI in files by default
                .boxed()
        }
    } else if log_format == "json" {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        let mut layer = tracing_subscriber::fmt::layer();
        if let Some(ansi) = log_ansi {
            layer = layer.with_ansi(ansi);
        }
        layer.boxed()
    };

    tracing_subscriber::registry()
        .with(journal)
        .with(output_layer.with_filter(env_filter))
        .init();

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        request_log = %config
            .request_log
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(disabled)".to_string()),
        "Logging initialized"
    );

    let addr = config.bind_addr()?;
    info!(
        api_key_header = %config.api_key_header,
        max_body_bytes = config.max_body_bytes,
        "Starting server on {}",
        addr
    );
    let backend = MockBackend::with_observer(Arc::new(TracingObserver));
    let app = build_router(AppState::new(backend, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
