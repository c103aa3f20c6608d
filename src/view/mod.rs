//! Terminal rendering for portal pages.
//!
//! Every renderer takes a `RenderContext` and returns a `String`; printing is left to
//! the caller.

mod indices;
mod map;
mod series;
mod stats;
mod theme;

pub use indices::*;
pub use map::*;
pub use series::*;
pub use stats::*;
pub use theme::*;
