//! Pipeline orchestration
//!
//! Runs the tick ingestor and the stream consumer as two concurrently
//! scheduled tasks joined by one bounded FIFO channel and one shared
//! cancellation token. A fault in either half cancels the other
//! cooperatively; the run always surfaces exactly one terminal outcome.

use crate::consumer::QuoteConsumer;
use crate::error::EngineError;
use crate::ingest::{Quote, TickIngestor};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Message carried by the inter-stage channel.
///
/// `Shutdown` is the poison pill pushed when ingestion faults: it releases a
/// consumer blocked on an empty channel and is end-of-stream, never tradable
/// data. Normal completion is signalled by the sender side dropping.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Tick(Quote),
    Shutdown,
}

/// Supervises one ingest-and-consume run over a shared bounded channel.
pub struct Pipeline {
    capacity: usize,
}

impl Pipeline {
    /// Create a pipeline with the given channel capacity (must be > 0;
    /// enforced at config validation)
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Run both halves to completion and collapse their outcomes.
    ///
    /// Fault protocol: a faulting half cancels the shared token before its
    /// error propagates; an ingest fault additionally pushes one `Shutdown`
    /// sentinel so a blocked consumer is released rather than deadlocking.
    /// The sentinel push uses `try_send`, which neither blocks nor panics on
    /// a full or already-closed channel. If both halves fault, the ingest
    /// error is surfaced and the consumer error logged; nothing is silently
    /// lost. On success the consumer is handed back for summary reporting.
    pub async fn run<C>(&self, ingestor: TickIngestor, mut consumer: C) -> Result<C, EngineError>
    where
        C: QuoteConsumer + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(self.capacity);
        let cancel = CancellationToken::new();

        let sentinel_tx = tx.clone();
        let ingest_cancel = cancel.clone();
        let ingest = tokio::spawn(async move {
            let result = ingestor.run(tx, ingest_cancel.clone()).await;
            if result.is_err() {
                ingest_cancel.cancel();
                let _ = sentinel_tx.try_send(StreamEvent::Shutdown);
            }
            result
        });

        let consume_cancel = cancel.clone();
        let consume = tokio::spawn(async move {
            let result = consumer.consume(rx, consume_cancel.clone()).await;
            if result.is_err() {
                consume_cancel.cancel();
            }
            (consumer, result)
        });

        let (ingest_join, consume_join) = tokio::join!(ingest, consume);

        let ingest_result =
            ingest_join.unwrap_or_else(|e| Err(EngineError::Task(format!("ingest: {e}"))));
        let (consumer, consume_result) = match consume_join {
            Ok(pair) => pair,
            Err(e) => {
                if let Err(ingest_err) = ingest_result {
                    tracing::error!(error = %ingest_err, "Ingestion also faulted");
                }
                return Err(EngineError::Task(format!("consume: {e}")));
            }
        };

        match (ingest_result, consume_result) {
            (Ok(()), Ok(())) => Ok(consumer),
            (Err(ingest_err), Ok(())) => Err(ingest_err),
            (Ok(()), Err(consume_err)) => Err(consume_err),
            (Err(ingest_err), Err(consume_err)) => {
                tracing::error!(error = %consume_err, "Consumer also faulted");
                Err(ingest_err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::TickSource;
    use async_trait::async_trait;
    use std::io::Write;
    use std::path::PathBuf;

    /// Consumer that records every received quote
    #[derive(Debug)]
    struct CollectingConsumer {
        quotes: Vec<Quote>,
    }

    #[async_trait]
    impl QuoteConsumer for CollectingConsumer {
        async fn consume(
            &mut self,
            mut rx: mpsc::Receiver<StreamEvent>,
            cancel: CancellationToken,
        ) -> Result<(), EngineError> {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return Ok(()),
                    event = rx.recv() => match event {
                        Some(StreamEvent::Tick(quote)) => self.quotes.push(quote),
                        Some(StreamEvent::Shutdown) | None => return Ok(()),
                    },
                }
            }
        }
    }

    /// Consumer that faults after a fixed number of quotes
    #[derive(Debug)]
    struct FailingConsumer {
        after: usize,
        seen: usize,
    }

    #[async_trait]
    impl QuoteConsumer for FailingConsumer {
        async fn consume(
            &mut self,
            mut rx: mpsc::Receiver<StreamEvent>,
            _cancel: CancellationToken,
        ) -> Result<(), EngineError> {
            while let Some(event) = rx.recv().await {
                match event {
                    StreamEvent::Tick(_) => {
                        self.seen += 1;
                        if self.seen >= self.after {
                            return Err(EngineError::Consumer("strategy blew up".to_string()));
                        }
                    }
                    StreamEvent::Shutdown => break,
                }
            }
            Ok(())
        }
    }

    fn write_source(dir: &std::path::Path, lines: usize) -> TickSource {
        let path = dir.join("2018.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..lines {
            writeln!(
                file,
                "2018-01-01T01:00:{:02}.000+00:00,1.351{i:03},1.350{i:03},1.5,0.75",
                i % 60
            )
            .unwrap();
        }
        TickSource {
            symbol: "EURUSD".to_string(),
            path,
        }
    }

    #[tokio::test]
    async fn test_fifo_order_no_loss() {
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 100);

        let pipeline = Pipeline::new(8);
        let consumer = pipeline
            .run(
                TickIngestor::new(vec![source]),
                CollectingConsumer { quotes: vec![] },
            )
            .await
            .unwrap();

        assert_eq!(consumer.quotes.len(), 100);
        for (i, quote) in consumer.quotes.iter().enumerate() {
            assert_eq!(quote.ask.to_string(), format!("1.351{i:03}"));
        }
    }

    #[tokio::test]
    async fn test_small_capacity_still_delivers_all() {
        // Channel far smaller than the stream: the ingestor must block on the
        // full channel instead of dropping or overwriting.
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 50);

        let pipeline = Pipeline::new(1);
        let consumer = pipeline
            .run(
                TickIngestor::new(vec![source]),
                CollectingConsumer { quotes: vec![] },
            )
            .await
            .unwrap();
        assert_eq!(consumer.quotes.len(), 50);
    }

    #[tokio::test]
    async fn test_ingest_fault_reports_single_error() {
        let source = TickSource {
            symbol: "EURUSD".to_string(),
            path: PathBuf::from("/nonexistent/2018.csv"),
        };

        let pipeline = Pipeline::new(4);
        let err = pipeline
            .run(
                TickIngestor::new(vec![source]),
                CollectingConsumer { quotes: vec![] },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Source { .. }));
    }

    #[tokio::test]
    async fn test_consumer_fault_cancels_ingest() {
        // Tiny channel and a long stream: when the consumer faults, the
        // ingestor is blocked on send and must be released, not deadlocked.
        let dir = tempfile::tempdir().unwrap();
        let source = write_source(dir.path(), 500);

        let pipeline = Pipeline::new(1);
        let err = pipeline
            .run(
                TickIngestor::new(vec![source]),
                FailingConsumer { after: 3, seen: 0 },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::Consumer(_)));
    }

    #[tokio::test]
    async fn test_backpressure_blocks_full_channel() {
        let (tx, mut rx) = mpsc::channel(1);
        tx.send(StreamEvent::Shutdown).await.unwrap();

        // Full channel: a further send does not complete until a slot drains.
        assert!(tx.try_send(StreamEvent::Shutdown).is_err());
        rx.recv().await.unwrap();
        assert!(tx.try_send(StreamEvent::Shutdown).is_ok());
    }

    #[tokio::test]
    async fn test_sentinel_push_on_closed_channel() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        // Must neither block nor panic once the consumer side is gone.
        assert!(tx.try_send(StreamEvent::Shutdown).is_err());
    }
}
