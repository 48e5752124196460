//! Coin-flip strategy

use super::{Strategy, TradeDecision};
use crate::ingest::Quote;
use crate::trade::{RequestBook, TradeDirection};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Opens and closes positions at random.
///
/// Seeded so a given run is reproducible. One position per symbol at a time:
/// while a request for the quote's symbol is active, the strategy flips a
/// coin to close it; otherwise it flips a coin to open a new one.
pub struct RandomStrategy {
    rng: StdRng,
    open_probability: f64,
    close_probability: f64,
    size: Decimal,
}

impl RandomStrategy {
    /// Create a strategy with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            open_probability: 0.05,
            close_probability: 0.05,
            size: dec!(1),
        }
    }
}

impl Strategy for RandomStrategy {
    fn evaluate(&mut self, quote: &Quote, book: &RequestBook) -> Option<TradeDecision> {
        let active = book
            .iter()
            .find(|req| req.symbol() == quote.symbol && req.is_open());

        if let Some(request) = active {
            if self.rng.gen_bool(self.close_probability) {
                return Some(TradeDecision::Close {
                    close_key: request.close_key().ok()?,
                });
            }
            return None;
        }

        if self.rng.gen_bool(self.open_probability) {
            let direction = if self.rng.gen_bool(0.5) {
                TradeDirection::Buy
            } else {
                TradeDirection::Sell
            };
            return Some(TradeDecision::Open {
                direction,
                size: self.size,
                stop_distance_pips: dec!(20),
                limit_distance_pips: dec!(40),
            });
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quote() -> Quote {
        Quote {
            symbol: "EURUSD".to_string(),
            timestamp: chrono::Utc.with_ymd_and_hms(2018, 1, 1, 1, 0, 0).unwrap(),
            bid: dec!(1.35065),
            ask: dec!(1.35104),
            bid_volume: dec!(0.75),
            ask_volume: dec!(1.5),
        }
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let mut a = RandomStrategy::new(42);
        let mut b = RandomStrategy::new(42);
        let book = RequestBook::new();

        for _ in 0..200 {
            assert_eq!(a.evaluate(&quote(), &book), b.evaluate(&quote(), &book));
        }
    }

    #[test]
    fn test_eventually_opens() {
        let mut strategy = RandomStrategy::new(7);
        let book = RequestBook::new();

        let opened = (0..1000).any(|_| {
            matches!(
                strategy.evaluate(&quote(), &book),
                Some(TradeDecision::Open { .. })
            )
        });
        assert!(opened);
    }

    #[test]
    fn test_never_opens_while_symbol_active() {
        use crate::trade::TradeRequest;

        let mut strategy = RandomStrategy::new(7);
        let mut book = RequestBook::new();
        let mut req = TradeRequest::new(quote(), dec!(1), dec!(20), dec!(40));
        req.open(TradeDirection::Buy).unwrap();
        book.open(req).unwrap();

        for _ in 0..500 {
            match strategy.evaluate(&quote(), &book) {
                None | Some(TradeDecision::Close { .. }) => {}
                Some(TradeDecision::Open { .. }) => panic!("opened on top of active request"),
            }
        }
    }
}
