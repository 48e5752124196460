use clap::Parser;
use tickflow::cli::{Cli, Commands};
use tickflow::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    tickflow::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting backtest run");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Data: {} {:?}", config.data.tick_data_dir.display(), config.data.symbols);
            println!("  Years: {:?}", config.data.years);
            println!("  Channel capacity: {}", config.pipeline.channel_capacity);
            println!(
                "  Execution: slippage={} sizing={:?}",
                config.execution.slippage, config.execution.sizing_factors
            );
            println!(
                "  Strategy: {} (seed {})",
                config.strategy.name, config.strategy.seed
            );
        }
    }

    Ok(())
}
