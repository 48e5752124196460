//! Tick stream ingestion
//!
//! Reads chronologically ordered per-symbol tick sources, parses each line
//! into a [`Quote`] and emits quotes onto the pipeline channel in file order
//! (oldest first). Malformed lines are dropped locally; an unreadable source
//! is fatal to the run.

mod parse;
mod sources;
mod types;

pub use parse::parse_line;
pub use sources::{enumerate_sources, TickSource};
pub use types::Quote;

use crate::error::EngineError;
use crate::pipeline::StreamEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Streams tick sources onto the pipeline channel.
pub struct TickIngestor {
    sources: Vec<TickSource>,
}

impl TickIngestor {
    /// Create an ingestor over an already-ordered set of sources
    pub fn new(sources: Vec<TickSource>) -> Self {
        Self { sources }
    }

    /// Replay every source in order, sending one [`StreamEvent::Tick`] per
    /// valid line.
    ///
    /// Suspends on a full channel (backpressure). The cancellation token is
    /// observed before opening the next source and before sending the next
    /// parsed quote, so cancellation latency is at most one quote. Dropping
    /// the sender on return is the normal end-of-stream signal.
    pub async fn run(
        self,
        tx: mpsc::Sender<StreamEvent>,
        cancel: CancellationToken,
    ) -> Result<(), EngineError> {
        for source in self.sources {
            if cancel.is_cancelled() {
                tracing::debug!("Ingestion cancelled before {:?}", source.path);
                return Ok(());
            }

            tracing::info!(symbol = %source.symbol, path = ?source.path, "Replaying tick source");
            let file = tokio::fs::File::open(&source.path)
                .await
                .map_err(|e| EngineError::Source {
                    path: source.path.clone(),
                    source: e,
                })?;

            let mut lines = BufReader::new(file).lines();
            loop {
                let line = lines.next_line().await.map_err(|e| EngineError::Source {
                    path: source.path.clone(),
                    source: e,
                })?;
                let Some(line) = line else { break };

                let Some(quote) = parse_line(&source.symbol, &line) else {
                    continue;
                };
                if cancel.is_cancelled() {
                    tracing::debug!("Ingestion cancelled mid-source {:?}", source.path);
                    return Ok(());
                }
                if tx.send(StreamEvent::Tick(quote)).await.is_err() {
                    tracing::debug!("Quote receiver dropped, stopping ingestion");
                    return Ok(());
                }
            }
        }

        Ok(())
    }
}
