//! Stream consumption
//!
//! The consumer side of the pipeline: drains the channel until end-of-stream
//! or cancellation and feeds every quote to strategy/position logic
//! synchronously, so a slow strategy throttles ingestion through channel
//! backpressure.

use crate::error::EngineError;
use crate::ingest::Quote;
use crate::pipeline::StreamEvent;
use crate::strategy::{Strategy, TradeDecision};
use crate::trade::{RequestBook, TradeRequest};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Consumer side of the pipeline channel.
///
/// `consume` must drain until a `Shutdown` sentinel, channel close or
/// cancellation, observing the token with at most one quote of latency, and
/// must return a descriptive error on internal failure rather than
/// swallowing it.
#[async_trait]
pub trait QuoteConsumer: Send {
    async fn consume(
        &mut self,
        rx: mpsc::Receiver<StreamEvent>,
        cancel: CancellationToken,
    ) -> Result<(), EngineError>;
}

/// Feeds quotes to a [`Strategy`] and maintains the active [`RequestBook`].
pub struct StrategyRunner {
    strategy: Box<dyn Strategy>,
    book: RequestBook,
    /// One-shot slippage applied to every newly opened request
    slippage: Decimal,
    /// Per-symbol sizing factors; symbols without an entry trade at size 1x
    sizing_factors: HashMap<String, Decimal>,
    received: u64,
}

impl StrategyRunner {
    /// Create a runner around the given strategy
    pub fn new(
        strategy: Box<dyn Strategy>,
        slippage: Decimal,
        sizing_factors: HashMap<String, Decimal>,
    ) -> Self {
        Self {
            strategy,
            book: RequestBook::new(),
            slippage,
            sizing_factors,
            received: 0,
        }
    }

    /// Number of quotes delivered so far
    pub fn received(&self) -> u64 {
        self.received
    }

    /// Active request book
    pub fn book(&self) -> &RequestBook {
        &self.book
    }

    /// One-line end-of-run summary
    pub fn summary(&self) -> String {
        format!(
            "replayed {} quotes, closed {} trades, {} still active",
            self.received,
            self.book.closed_count(),
            self.book.active_count()
        )
    }

    /// Evaluate one quote and apply the resulting decision, if any
    fn process(&mut self, quote: Quote) -> Result<(), EngineError> {
        self.received += 1;

        let Some(decision) = self.strategy.evaluate(&quote, &self.book) else {
            return Ok(());
        };

        match decision {
            TradeDecision::Open {
                direction,
                size,
                stop_distance_pips,
                limit_distance_pips,
            } => {
                let factor = self
                    .sizing_factors
                    .get(&quote.symbol)
                    .copied()
                    .unwrap_or(Decimal::ONE);
                let mut request = TradeRequest::new(
                    quote,
                    size * factor,
                    stop_distance_pips,
                    limit_distance_pips,
                );
                request.open(direction)?;
                if !self.slippage.is_zero() {
                    request.apply_slippage(self.slippage)?;
                }
                tracing::info!(
                    key = %request.key(),
                    ?direction,
                    level = %request.level()?,
                    "Opening trade request"
                );
                self.book.open(request)?;
            }
            TradeDecision::Close { close_key } => {
                if self.book.close(&close_key).is_none() {
                    tracing::warn!(close_key = %close_key, "Close requested for inactive key");
                }
            }
        }

        Ok(())
    }
}

#[async_trait]
impl QuoteConsumer for StrategyRunner {
    async fn consume(
        &mut self,
        mut rx: mpsc::Receiver<StreamEvent>,
        cancel: CancellationToken,
    ) -> Result<(), EngineError> {
        loop {
            // Biased so a pending cancellation always wins over the next
            // quote: at most one item of cancellation latency.
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!("Consumer observed cancellation");
                    return Ok(());
                }
                event = rx.recv() => match event {
                    Some(StreamEvent::Tick(quote)) => self.process(quote)?,
                    Some(StreamEvent::Shutdown) => {
                        tracing::debug!("Consumer received shutdown sentinel");
                        return Ok(());
                    }
                    None => return Ok(()),
                },
            }
        }
    }
}
