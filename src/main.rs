use anyhow::Result;
use basket_widget::{
    cli::{Args, CliApp},
    utils::{log_directive, Config},
};
use clap::Parser;

fn main() -> Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let directive = log_directive(args.verbose, log_level.as_deref());
    let filter = if args.verbose {
        tracing_subscriber::EnvFilter::new(directive)
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Basket starting...");

    let config = Config::from_env().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        "Configuration loaded for {} environment",
        config.environment
    );

    let config = match args.catalog {
        Some(path) => config.with_catalog_path(path),
        None => config,
    };

    let mut app = CliApp::new(config)?;
    app.run(args.command)?;

    tracing::info!("🛒 Basket stopped");
    Ok(())
}
