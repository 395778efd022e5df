//! # CLI Module
//!
//! Command-line access to a route table built from a handler directory.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! List the registered routes in priority order:
//!
//! ```bash
//! routeswitch routes --handlers ./handlers
//! ```
//!
//! ### `match`
//!
//! Resolve paths and print one JSON line per path (`null` when nothing matches).
//! Paths come from the arguments, or from stdin one per line when none are given:
//!
//! ```bash
//! routeswitch match --handlers ./handlers /Main_Page /Main_Page/html
//! tail -f access.paths | routeswitch match --watch
//! ```
//!
//! Options:
//! - `--handlers <DIR>` - Handler directory (default: `ROUTESWITCH_HANDLERS_DIR` or `handlers`)
//! - `--watch` - Reload the table when the directory changes while reading paths
//!   from stdin (also `ROUTESWITCH_HOT_RELOAD=true`); rejected together with path arguments
//!
//! The exit status is non-zero if any path failed to match.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands};
