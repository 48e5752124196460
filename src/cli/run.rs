//! Run command implementation

use crate::config::Config;
use crate::report::LogSink;
use crate::runner::BacktestRunner;
use clap::Args;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Override the configured RNG seed
    #[arg(long)]
    pub seed: Option<u64>,
}

impl RunArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut config = config.clone();
        if let Some(seed) = self.seed {
            config.strategy.seed = seed;
        }

        let sink = LogSink;
        BacktestRunner::new(&config, &sink).run().await?;
        Ok(())
    }
}
