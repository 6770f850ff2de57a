//! Server entrypoint for the code-explainer gateway
//!
//! This is the composition root: it parses CLI arguments, initializes
//! logging, loads configuration, and wires the layers together using
//! dependency injection before serving.

use anyhow::{Context, Result, bail};
use clap::Parser;
use explainer_application::{
    ExchangeLogger, ExplainCodeUseCase, NoExchangeLogger, VisualizeCodeUseCase,
};
use explainer_infrastructure::{
    ConfigLoader, JsonlExchangeLogger, OpenRouterCredentials, OpenRouterTransport,
};
use explainer_presentation::{AppState, Cli, build_router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("loading configuration")?
    };

    // CLI flags override configuration files
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }

    if let Err(error) = config.validate() {
        bail!("{error}");
    }

    info!("Starting code-explainer gateway");

    // === Dependency Injection ===
    // Infrastructure adapter (OpenRouter transport)
    let credentials = OpenRouterCredentials {
        api_key: config.openrouter.api_key.clone().unwrap_or_default(),
        referer: config.openrouter.referer.clone(),
        title: config.openrouter.title.clone(),
    };
    let transport = Arc::new(OpenRouterTransport::with_base_url(
        &config.openrouter.base_url,
        credentials,
    ));

    let exchange_logger: Arc<dyn ExchangeLogger> = match &config.log.exchange_file {
        Some(path) => match JsonlExchangeLogger::new(path) {
            Some(logger) => {
                info!("Exchange log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoExchangeLogger),
        },
        None => Arc::new(NoExchangeLogger),
    };

    let state = AppState {
        explain: Arc::new(
            ExplainCodeUseCase::new(transport.clone(), config.call.explain_policy())
                .with_exchange_logger(exchange_logger.clone()),
        ),
        visualize: Arc::new(
            VisualizeCodeUseCase::new(transport, config.call.visualize_policy())
                .with_exchange_logger(exchange_logger),
        ),
        detach_on_disconnect: config.server.detach_on_disconnect,
    };

    let router = build_router(state, &config.server.frontend_origins);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid host/port")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!("Listening on http://{addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C signal handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
