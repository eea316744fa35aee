//! Upcheck: a connectivity status page.
//!
//! This is the application entry point. It loads configuration, initializes
//! tracing, builds the probe set (database probe first - its failure is
//! critical and skips the rest), sets up the Axum router, and starts the
//! HTTP server.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use upcheck::config::{
    AppConfig, DATABASE_OFFLINE_DETAIL, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER,
    DNS_OFFLINE_DETAIL,
};
use upcheck::http::start_server;
use upcheck::probe::database::DatabaseProbe;
use upcheck::probe::dns::DnsProbe;
use upcheck::probe::ProbeSpec;
use upcheck::routes::create_router;
use upcheck::secrets::AwsSecretStore;
use upcheck::state::AppState;
use upcheck::templates::init_templates;

/// Upcheck: a web status page for private RDS and internet connectivity
#[derive(Parser, Debug)]
#[command(name = "upcheck", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "upcheck=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (file, then REGION/SECRET_NAME env overrides)
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        region = %config.aws.region,
        secret_name = %config.aws.secret_name,
        lookup_hostname = %config.dns.hostname,
        "Loaded configuration"
    );

    // Initialize Tera templates
    let tera = init_templates()?;
    tracing::info!("Initialized templates");

    // Build the probe set once; it is shared read-only across requests.
    // Order matters: a database failure must skip the DNS probe.
    let secrets = Arc::new(AwsSecretStore::connect(&config.aws.region).await);
    let probes = vec![
        ProbeSpec::critical(
            "database",
            "Database Time",
            DATABASE_OFFLINE_DETAIL,
            DatabaseProbe::new(secrets, config.aws.secret_name.clone()),
        ),
        ProbeSpec::non_critical(
            "dns",
            "Google IP",
            DNS_OFFLINE_DETAIL,
            DnsProbe::new(config.dns.hostname.clone()),
        ),
    ];

    // Create application state and router
    let state = AppState::new(config.clone(), tera, probes);
    let app = create_router(state);

    // Start server
    start_server(app, &config).await?;

    Ok(())
}
