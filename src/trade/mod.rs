//! Trade request lifecycle
//!
//! A [`TradeRequest`] is a pending or open position anchored to the quote
//! that created it. The `Pending -> Open -> Closed` lifecycle is enforced
//! structurally: the execution level only exists once a direction has been
//! chosen, and is only ever derived from the opening quote's ask/bid plus an
//! optional one-shot slippage adjustment.

mod book;

pub use book::RequestBook;

use crate::error::EngineError;
use crate::ingest::Quote;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a trade request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Buy,
    Sell,
}

/// Lifecycle state of a trade request
#[derive(Debug, Clone, PartialEq)]
enum RequestState {
    /// Constructed but no direction chosen; no execution level exists yet
    Pending,
    /// Direction chosen, level derived from the opening quote
    Open {
        direction: TradeDirection,
        level: Decimal,
        slipped: bool,
        stop_level: Option<Decimal>,
        limit_level: Option<Decimal>,
    },
}

/// A pending or open position anchored to its opening quote
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRequest {
    symbol: String,
    open_date: DateTime<Utc>,
    /// Opening quote, retained for audit
    quote: Quote,
    size: Decimal,
    stop_distance_pips: Decimal,
    limit_distance_pips: Decimal,
    state: RequestState,
}

impl TradeRequest {
    /// Create a pending request from its opening quote
    pub fn new(
        quote: Quote,
        size: Decimal,
        stop_distance_pips: Decimal,
        limit_distance_pips: Decimal,
    ) -> Self {
        Self {
            symbol: quote.symbol.clone(),
            open_date: quote.timestamp,
            quote,
            size,
            stop_distance_pips,
            limit_distance_pips,
            state: RequestState::Pending,
        }
    }

    /// Identity key: unique per symbol at a given open timestamp
    pub fn key(&self) -> String {
        format!("{}-{}", self.symbol, self.open_date.to_rfc3339())
    }

    /// Closing key, only derivable once the request is open
    pub fn close_key(&self) -> Result<String, EngineError> {
        let level = self.level()?;
        Ok(format!(
            "{}-{}-{}",
            self.symbol,
            self.open_date.to_rfc3339(),
            level
        ))
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn open_date(&self) -> DateTime<Utc> {
        self.open_date
    }

    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn size(&self) -> Decimal {
        self.size
    }

    pub fn stop_distance_pips(&self) -> Decimal {
        self.stop_distance_pips
    }

    pub fn limit_distance_pips(&self) -> Decimal {
        self.limit_distance_pips
    }

    /// Transition `Pending -> Open`, deriving the execution level from the
    /// opening quote: ask for a buy, bid for a sell. Opening twice is an
    /// error.
    pub fn open(&mut self, direction: TradeDirection) -> Result<(), EngineError> {
        match self.state {
            RequestState::Pending => {
                let level = match direction {
                    TradeDirection::Buy => self.quote.ask,
                    TradeDirection::Sell => self.quote.bid,
                };
                self.state = RequestState::Open {
                    direction,
                    level,
                    slipped: false,
                    stop_level: None,
                    limit_level: None,
                };
                Ok(())
            }
            RequestState::Open { .. } => Err(EngineError::RequestState {
                key: self.key(),
                reason: "already open".to_string(),
            }),
        }
    }

    /// Chosen direction, if the request is open
    pub fn direction(&self) -> Option<TradeDirection> {
        match self.state {
            RequestState::Pending => None,
            RequestState::Open { direction, .. } => Some(direction),
        }
    }

    /// Execution level; unavailable until a direction is set
    pub fn level(&self) -> Result<Decimal, EngineError> {
        match self.state {
            RequestState::Pending => Err(EngineError::RequestState {
                key: self.key(),
                reason: "level read before direction set".to_string(),
            }),
            RequestState::Open { level, .. } => Ok(level),
        }
    }

    /// Perturb the level once by slippage: `level + s` for a buy,
    /// `level - s` for a sell. A second application is an error.
    pub fn apply_slippage(&mut self, slippage: Decimal) -> Result<(), EngineError> {
        match &mut self.state {
            RequestState::Pending => Err(EngineError::RequestState {
                key: self.key(),
                reason: "slippage applied before direction set".to_string(),
            }),
            RequestState::Open { slipped: true, .. } => Err(EngineError::RequestState {
                key: self.key(),
                reason: "slippage already applied".to_string(),
            }),
            RequestState::Open {
                direction,
                level,
                slipped,
                ..
            } => {
                *level = match direction {
                    TradeDirection::Buy => *level + slippage,
                    TradeDirection::Sell => *level - slippage,
                };
                *slipped = true;
                Ok(())
            }
        }
    }

    /// Revise the stop level; allowed any number of times while open
    pub fn set_stop_level(&mut self, stop: Decimal) -> Result<(), EngineError> {
        match &mut self.state {
            RequestState::Open { stop_level, .. } => {
                *stop_level = Some(stop);
                Ok(())
            }
            RequestState::Pending => Err(EngineError::RequestState {
                key: self.key(),
                reason: "stop level set before direction set".to_string(),
            }),
        }
    }

    /// Revise the limit level; allowed any number of times while open
    pub fn set_limit_level(&mut self, limit: Decimal) -> Result<(), EngineError> {
        match &mut self.state {
            RequestState::Open { limit_level, .. } => {
                *limit_level = Some(limit);
                Ok(())
            }
            RequestState::Pending => Err(EngineError::RequestState {
                key: self.key(),
                reason: "limit level set before direction set".to_string(),
            }),
        }
    }

    pub fn stop_level(&self) -> Option<Decimal> {
        match self.state {
            RequestState::Open { stop_level, .. } => stop_level,
            RequestState::Pending => None,
        }
    }

    pub fn limit_level(&self) -> Option<Decimal> {
        match self.state {
            RequestState::Open { limit_level, .. } => limit_level,
            RequestState::Pending => None,
        }
    }

    /// Whether a direction has been chosen
    pub fn is_open(&self) -> bool {
        matches!(self.state, RequestState::Open { .. })
    }
}
