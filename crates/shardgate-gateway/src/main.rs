//! Shardgate - sharding gateway for a fleet of object-storage backends

use clap::Parser;
use shardgate_gateway::{run_server, GatewayConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "shardgate")]
#[command(about = "Bucket/object HTTP gateway sharding requests across storage backends")]
#[command(version)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SHARDGATE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "SHARDGATE_PORT")]
    port: u16,

    /// Storage node list: comma-separated ENDPOINT|ACCESS_KEY|SECRET_KEY entries
    #[arg(long, default_value = "", env = "SHARDGATE_NODES")]
    nodes: String,

    /// Use in-memory backends (for testing, data will not persist)
    #[arg(long, env = "SHARDGATE_MEMORY_STORE")]
    memory_store: bool,

    /// Admission gate refill rate, requests per second
    #[arg(long, default_value = "100", env = "SHARDGATE_RATE_LIMIT")]
    rate_limit: u32,

    /// Admission gate burst size
    #[arg(long, default_value = "50", env = "SHARDGATE_RATE_BURST")]
    rate_burst: u32,

    /// Enable debug logging
    #[arg(short, long, env = "SHARDGATE_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "shardgate_gateway={},shardgate_store={},tower_http=info",
                    log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut nodes = args.nodes;
    if args.memory_store {
        tracing::warn!("using in-memory backends - data will NOT persist");
        if nodes.is_empty() {
            // A single synthetic node keeps the shard math trivial in
            // memory mode when no fleet is configured.
            nodes = "memory-node-0:9000|shardgate|shardgate".to_string();
        }
    }

    tracing::info!("starting shardgate on {}:{}", args.host, args.port);

    let config = GatewayConfig {
        host: args.host,
        port: args.port,
        nodes,
        use_memory_store: args.memory_store,
        rate_limit_rps: args.rate_limit,
        rate_limit_burst: args.rate_burst,
    };

    run_server(config).await
}
