//! Per-query lifecycle: `idle -> loading -> success | error`.
//!
//! A page holds one `Query` per data region it renders. Changing filters starts a new
//! generation; results from older generations are discarded when they arrive, so the
//! most recently issued request always wins. Superseded requests are left to finish on
//! their own.

use crate::error::{AppError, Result};
use std::fmt;
use tracing::debug;

/// Identifies a request by endpoint and its parameters, in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: &'static str,
    params: Vec<(&'static str, String)>,
}

impl QueryKey {
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            endpoint,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.params.push((name, value.to_string()));
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.endpoint)?;
        for (i, (name, value)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum QueryState<T> {
    Idle,
    Loading,
    Success(T),
    Error(AppError),
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        QueryState::Idle
    }
}

impl<T> QueryState<T> {
    #[cfg(test)]
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&AppError> {
        match self {
            QueryState::Error(err) => Some(err),
            _ => None,
        }
    }
}

/// Proof that a request was started for a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Debug)]
pub struct Query<T> {
    key: Option<QueryKey>,
    generation: u64,
    state: QueryState<T>,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Query<T> {
    pub fn new() -> Self {
        Self {
            key: None,
            generation: 0,
            state: QueryState::Idle,
        }
    }

    /// Enters `Loading` for `key`. Always starts a new generation, even when the key
    /// is unchanged.
    pub fn begin(&mut self, key: QueryKey) -> Ticket {
        self.generation += 1;
        debug!("Query {} started (generation {})", key, self.generation);
        self.key = Some(key);
        self.state = QueryState::Loading;
        Ticket {
            generation: self.generation,
        }
    }

    /// Applies `result` if `ticket` belongs to the latest generation. Returns whether
    /// the result was applied.
    pub fn settle(&mut self, ticket: Ticket, result: Result<T>) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Discarding superseded result (generation {}, current {})",
                ticket.generation, self.generation
            );
            return false;
        }
        self.state = match result {
            Ok(data) => QueryState::Success(data),
            Err(err) => QueryState::Error(err),
        };
        true
    }

    #[cfg(test)]
    pub fn key(&self) -> Option<&QueryKey> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &QueryState<T> {
        &self.state
    }

    /// Moves the settled state out, leaving the query idle.
    #[cfg(test)]
    pub fn take(&mut self) -> QueryState<T> {
        std::mem::take(&mut self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(location: &str) -> QueryKey {
        QueryKey::new("/api/timeseries")
            .param("location_id", location)
            .param("variable", "temperature")
    }

    #[test]
    fn test_lifecycle() {
        let mut query: Query<u32> = Query::new();
        assert!(matches!(query.state(), QueryState::Idle));

        let ticket = query.begin(key("punjab"));
        assert!(query.state().is_loading());
        assert!(query.settle(ticket, Ok(7)));
        assert_eq!(query.state().data(), Some(&7));
    }

    #[test]
    fn test_error_state() {
        let mut query: Query<u32> = Query::new();
        let ticket = query.begin(key("sindh"));
        query.settle(ticket, Err(AppError::Cli("boom".to_string())));
        assert!(matches!(query.state().error(), Some(AppError::Cli(_))));
    }

    #[test]
    fn test_last_write_wins() {
        let mut query: Query<&str> = Query::new();
        let first = query.begin(key("punjab"));
        let second = query.begin(key("sindh"));

        // Newer request resolves first; the older one arrives late and is dropped.
        assert!(query.settle(second, Ok("sindh")));
        assert!(!query.settle(first, Ok("punjab")));
        assert_eq!(query.state().data(), Some(&"sindh"));
        assert_eq!(query.key(), Some(&key("sindh")));
    }

    #[test]
    fn test_same_key_reenters_loading() {
        let mut query: Query<u32> = Query::new();
        let first = query.begin(key("kpk"));
        query.settle(first, Ok(1));
        let second = query.begin(key("kpk"));
        assert!(query.state().is_loading());
        assert!(!query.settle(first, Ok(2)));
        assert!(query.settle(second, Ok(3)));
        assert!(matches!(query.take(), QueryState::Success(3)));
        assert!(matches!(query.state(), QueryState::Idle));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(
            key("punjab").to_string(),
            "/api/timeseries?location_id=punjab&variable=temperature"
        );
    }
}
