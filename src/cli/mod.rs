//! Handles Command Line Interface (CLI) related functionalities.
//!
//! Includes the clap command definitions, the interactive prompts for the menu loop,
//! and `App`, which runs each page against the configured data source.

mod app;
mod commands;
mod prompts;

pub use app::*;
pub use commands::*;
pub use prompts::*;
