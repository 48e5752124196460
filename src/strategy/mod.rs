//! Strategy boundary
//!
//! The pipeline only needs to know that a decision-making consumer exists:
//! a [`Strategy`] is evaluated synchronously for every quote and may decide
//! to open or close a trade request. Decision quality is out of scope; the
//! stock [`RandomStrategy`] exercises the full request lifecycle.

mod random;

pub use random::RandomStrategy;

use crate::ingest::Quote;
use crate::trade::{RequestBook, TradeDirection};
use rust_decimal::Decimal;

/// A decision produced by a strategy for one quote
#[derive(Debug, Clone, PartialEq)]
pub enum TradeDecision {
    /// Open a position against the current quote
    Open {
        direction: TradeDirection,
        size: Decimal,
        stop_distance_pips: Decimal,
        limit_distance_pips: Decimal,
    },
    /// Close the active request with this closing key
    Close { close_key: String },
}

/// Synchronous per-quote decision logic.
///
/// Evaluation happens inline on the consumer side of the pipeline, so a slow
/// strategy throttles ingestion through channel backpressure.
pub trait Strategy: Send {
    fn evaluate(&mut self, quote: &Quote, book: &RequestBook) -> Option<TradeDecision>;
}
