//! Backtest run loop
//!
//! Replays every configured year through the pipeline and reports the run's
//! terminal status through the [`ReportSink`] exactly once, success or
//! failure. Fetching and decompressing remote tick archives happens outside
//! this crate; a source that is still missing here is fatal.

use crate::config::Config;
use crate::consumer::StrategyRunner;
use crate::error::EngineError;
use crate::ingest::{enumerate_sources, TickIngestor};
use crate::pipeline::Pipeline;
use crate::report::ReportSink;
use crate::strategy::{RandomStrategy, Strategy};

/// Drives complete backtest runs against one configuration.
pub struct BacktestRunner<'a> {
    config: &'a Config,
    sink: &'a dyn ReportSink,
}

impl<'a> BacktestRunner<'a> {
    /// Create a runner over an already-loaded configuration
    pub fn new(config: &'a Config, sink: &'a dyn ReportSink) -> Self {
        Self { config, sink }
    }

    /// Run every configured year and report the terminal outcome once.
    pub async fn run(&self) -> Result<(), EngineError> {
        let outcome = self.execute().await;
        match &outcome {
            Ok(summary) => self.sink.end_of_run(summary).await,
            Err(error) => {
                self.sink
                    .report_failure(error, &self.config.snapshot())
                    .await
            }
        }
        outcome.map(|_| ())
    }

    async fn execute(&self) -> Result<String, EngineError> {
        self.config.validate()?;

        let mut replayed = 0u64;
        let mut closed = 0usize;
        let mut active = 0usize;

        for &year in &self.config.data.years {
            let sources = enumerate_sources(self.config, year)?;
            tracing::info!(year, sources = sources.len(), "Starting replay");

            let ingestor = TickIngestor::new(sources);
            let consumer = StrategyRunner::new(
                self.build_strategy()?,
                self.config.execution.slippage,
                self.config.execution.sizing_factors.clone(),
            );

            let pipeline = Pipeline::new(self.config.pipeline.channel_capacity);
            let consumer = pipeline.run(ingestor, consumer).await?;

            tracing::info!(year, summary = %consumer.summary(), "Year replayed");
            replayed += consumer.received();
            closed += consumer.book().closed_count();
            active += consumer.book().active_count();
        }

        Ok(format!(
            "replayed {} quotes over {} year(s), closed {} trades, {} still active",
            replayed,
            self.config.data.years.len(),
            closed,
            active
        ))
    }

    fn build_strategy(&self) -> Result<Box<dyn Strategy>, EngineError> {
        match self.config.strategy.name.as_str() {
            "random" => Ok(Box::new(RandomStrategy::new(self.config.strategy.seed))),
            other => Err(EngineError::Config(format!("unknown strategy: {other}"))),
        }
    }
}
