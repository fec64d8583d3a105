use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use parley_server::{RelayConfig, RoomHandle, SignalingService, StaticAuthenticator, router};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley")]
#[command(version, about = "WebRTC signaling relay")]
struct Cli {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay (default).
    Serve {
        #[arg(long)]
        bind: Option<SocketAddr>,

        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML and exit.
    PrintConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &cli.config {
        Some(path) => RelayConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RelayConfig::default(),
    };

    match cli.command.unwrap_or(Commands::Serve {
        bind: None,
        static_dir: None,
    }) {
        Commands::Serve { bind, static_dir } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if static_dir.is_some() {
                config.static_dir = static_dir;
            }
            serve(config).await
        }
        Commands::PrintConfig => {
            let rendered = config
                .to_toml_string()
                .context("Failed to render configuration")?;
            println!("{rendered}");
            Ok(())
        }
    }
}

async fn serve(config: RelayConfig) -> Result<()> {
    info!("Initializing signaling relay...");

    let room = RoomHandle::spawn(config.room.clone());
    let authenticator = StaticAuthenticator::from_users(config.users.clone());
    if authenticator.is_empty() {
        warn!("No users configured; every connection will be rejected");
    } else {
        info!(users = authenticator.len(), "Loaded user credentials");
    }
    let signaling = SignalingService::new(
        room,
        Arc::new(authenticator),
        config.ice_servers.clone(),
        config.session.clone(),
    );

    // Browser clients are often served from another origin during development.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut app = router(signaling);
    if let Some(dir) = &config.static_dir {
        info!(dir = %dir.display(), "Serving static files");
        app = app.fallback_service(ServeDir::new(dir));
    }
    let app = app.layer(cors).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind))?;
    info!(bind = %config.bind, "Signaling relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Signaling relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
