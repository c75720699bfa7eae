//! # CLI Module
//!
//! User-facing commands of the `spotistat` binary.
//!
//! - [`serve`] - run the HTTP API that visualisation clients call.
//! - [`stats`] - compute statistics for one playlist and print them, either
//!   as tables or as the same JSON payload the API serves.
//!
//! Commands report through the coloured output macros and exit non-zero on
//! unrecoverable errors. Diagnostics go through `tracing`.

mod serve;
mod stats;

pub use serve::serve;
pub use stats::stats;
