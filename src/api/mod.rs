//! Provides clients and data sources for the climate portal API.
//!
//! Includes:
//! - `climate`: Client for the live portal backend.
//! - `mock`: Offline demo data provider.
//! - `source`: `DataSource`, dispatching between the two.

mod climate;
mod mock;
mod source;

pub use climate::*;
pub use mock::*;
pub use source::*;
