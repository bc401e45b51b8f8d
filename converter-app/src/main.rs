//! # Converter Application
//!
//! Binary that wires together all the components:
//! - Load the YAML configuration profile
//! - Initialize tracing (and OTLP export when enabled)
//! - Connect the Redis rate store
//! - Create the converter service
//! - Start the HTTP server, then close the store on shutdown

mod config;

use std::path::PathBuf;

use clap::Parser;
use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use converter_hex::{ConverterService, inbound::HttpServer};
use converter_repo::build_store;

/// Currency converter HTTP server.
#[derive(Parser)]
#[command(name = "converter-server", version, about)]
struct Args {
    /// Configuration profile to load (`<config dir>/<profile>.yaml`)
    #[arg(default_value = "default")]
    profile: String,

    /// Directory holding the configuration profiles
    #[arg(long, env = "CONVERTER_CONFIG_DIR", default_value = "config")]
    config_dir: PathBuf,
}

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("converter-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = config::Config::load(&args.config_dir, &args.profile)?;

    // Initialize OpenTelemetry tracing when enabled
    let (otel_tracer, otel_provider) = if config.otlp {
        let (tracer, provider) = init_tracer()?;
        (Some(tracer), Some(provider))
    } else {
        (None, None)
    };
    let telemetry = otel_tracer.map(|tracer| tracing_opentelemetry::layer().with_tracer(tracer));

    // Initialize tracing subscriber; RUST_LOG wins over the profile's level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!(
        "Starting converter server with profile '{}' on {}",
        args.profile,
        config.bind_addr()
    );
    tracing::info!("Using Redis: {}", config.redis.url());

    // Connect the store (fails fast when Redis is unreachable)
    let store = build_store(config.redis.store_config()).await?;

    // Create the converter service and run the HTTP server
    let server = HttpServer::new(ConverterService::new(store));
    let result = server.run(&config.bind_addr()).await;

    server.service().store().close();

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }

    result
}
