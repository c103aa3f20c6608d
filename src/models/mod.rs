//! Defines the data structures exchanged with the climate portal backend.
//!
//! `climate` holds the core query contract (time series, map, statistics, forecast,
//! download). `indices` holds the derived-index and comparison endpoints.

mod climate;
mod indices;

pub use climate::*;
pub use indices::*;
