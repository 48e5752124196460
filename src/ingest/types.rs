//! Tick stream types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An immutable market snapshot for one symbol at one instant.
///
/// Constructed only by the line parser from a fully populated tick record;
/// ownership transfers through the pipeline channel and the value is never
/// mutated afterwards. `bid <= ask` is assumed by consumers, not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Trading symbol (e.g., "EURUSD")
    pub symbol: String,
    /// Tick timestamp from the source record
    pub timestamp: DateTime<Utc>,
    /// Bid price
    pub bid: Decimal,
    /// Ask price
    pub ask: Decimal,
    /// Volume available at the bid
    pub bid_volume: Decimal,
    /// Volume available at the ask
    pub ask_volume: Decimal,
}
