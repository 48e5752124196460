//! Active trade request book

use super::TradeRequest;
use crate::error::EngineError;
use std::collections::HashMap;

/// The set of currently active trade requests, keyed by `symbol-openDate`.
///
/// Opening a second request with the same key is rejected: a tied tick that
/// would collide indicates a strategy bug, and overwriting an active position
/// would silently lose it. Closed requests are removed and never reused.
#[derive(Debug, Default)]
pub struct RequestBook {
    active: HashMap<String, TradeRequest>,
    closed_count: usize,
}

impl RequestBook {
    /// Create an empty book
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a request into the active set.
    ///
    /// Rejects a duplicate `symbol-openDate` key with a domain error and
    /// leaves the book unchanged.
    pub fn open(&mut self, request: TradeRequest) -> Result<(), EngineError> {
        let key = request.key();
        if self.active.contains_key(&key) {
            return Err(EngineError::DuplicateRequest(key));
        }
        tracing::debug!(key = %key, "Opened trade request");
        self.active.insert(key, request);
        Ok(())
    }

    /// Remove the request matching the given closing key
    /// (`symbol-openDate-level`). Returns the closed request, or `None` if no
    /// active request matches.
    pub fn close(&mut self, close_key: &str) -> Option<TradeRequest> {
        let key = self
            .active
            .iter()
            .find(|(_, req)| req.close_key().is_ok_and(|ck| ck == close_key))
            .map(|(key, _)| key.clone())?;

        let request = self.active.remove(&key);
        if request.is_some() {
            self.closed_count += 1;
            tracing::debug!(key = %key, "Closed trade request");
        }
        request
    }

    /// Look up an active request by its identity key
    pub fn get(&self, key: &str) -> Option<&TradeRequest> {
        self.active.get(key)
    }

    /// Mutable access for stop/limit revisions
    pub fn get_mut(&mut self, key: &str) -> Option<&mut TradeRequest> {
        self.active.get_mut(key)
    }

    /// Iterate over the active set
    pub fn iter(&self) -> impl Iterator<Item = &TradeRequest> {
        self.active.values()
    }

    /// Number of currently active requests
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Number of requests closed over the book's lifetime
    pub fn closed_count(&self) -> usize {
        self.closed_count
    }
}
