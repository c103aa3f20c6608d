//! Client-side climate index computations.
//!
//! Includes:
//! - `heat`: heat index calculator and risk bands, plus humidex and WBGT.
//! - `drought`: severity classes for standardized drought indices.

mod drought;
mod heat;

pub use drought::*;
pub use heat::*;
