//! Per-line tick record parser
//!
//! Tick sources are CSV with fields `timestamp, ask, bid, askVolume,
//! bidVolume` and an optional header row. A line either yields exactly one
//! [`Quote`] or is dropped; malformed input never raises to the caller.

use super::Quote;
use chrono::DateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse one tick source line into a Quote.
///
/// Returns `None` for header rows (non-numeric first field), empty lines and
/// lines with any empty price/volume field; partial data is not usable for
/// execution pricing.
pub fn parse_line(symbol: &str, line: &str) -> Option<Quote> {
    let mut fields = line.split(',');
    let timestamp = DateTime::parse_from_rfc3339(fields.next()?.trim()).ok()?;

    let ask = Decimal::from_str(fields.next()?.trim()).ok()?;
    let bid = Decimal::from_str(fields.next()?.trim()).ok()?;
    let ask_volume = Decimal::from_str(fields.next()?.trim()).ok()?;
    let bid_volume = Decimal::from_str(fields.next()?.trim()).ok()?;

    Some(Quote {
        symbol: symbol.to_string(),
        timestamp: timestamp.with_timezone(&chrono::Utc),
        bid,
        ask,
        bid_volume,
        ask_volume,
    })
}
