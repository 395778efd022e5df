//! # Router Module
//!
//! The router module provides path matching and route resolution for routeswitch.
//! It uses regex-based path matching to resolve an incoming path to one of a set
//! of registered URI templates and to extract the template's variables.
//!
//! ## Overview
//!
//! The router is responsible for:
//! - Compiling URI templates (e.g., `/pets/{id}`) into anchored regexes
//! - Combining every registered pattern into a single [`RouteSwitch`]
//! - Matching incoming paths, first-registered pattern wins
//! - Extracting positional and named path parameters
//! - Keeping the switch in sync as routes are added and removed
//!
//! ## Architecture
//!
//! The router uses a two-phase approach:
//!
//! 1. **Compilation**: when a route is registered, its template is escaped and
//!    each `{name}` placeholder becomes a `([^/]+)` capture. The result is
//!    anchored so it matches the whole path.
//!
//! 2. **Matching**: for each incoming path, the [`RouteSwitch`] tests all
//!    patterns at once through a `RegexSet`, picks the lowest-index hit and runs
//!    that pattern's regex to recover the captures.
//!
//! ## Example
//!
//! ```rust
//! use routeswitch::router::{Route, RouteTable};
//!
//! let table = RouteTable::new(vec![
//!     Route::new("/pets", "list_pets"),
//!     Route::new("/pets/{id}", "get_pet"),
//! ])
//! .unwrap();
//!
//! let m = table.match_path("/pets/42").unwrap();
//! assert_eq!(m.route.value, "get_pet");
//! assert_eq!(m.param("id"), Some("42"));
//! assert_eq!(m.param("0"), Some("42"));
//! assert!(table.match_path("/pets/42/toys").is_none());
//! ```
//!
//! ## Performance
//!
//! - One `RegexSet` scan per lookup regardless of route count, plus one capture pass
//! - Lock-free reads: matching loads an `Arc` snapshot of the current switch
//! - Mutations cost a full rebuild, O(number of routes)

mod core;
mod error;
mod route;
mod switch;
mod template;
#[cfg(test)]
mod performance_tests;

pub use self::core::{CaptureVec, RouteMatch, RouteTable, MAX_INLINE_PARAMS};
pub use error::RouteError;
pub use route::{Route, RouteEntry, RoutePattern};
pub use switch::RouteSwitch;
pub use template::{compile, compile_with_limit, CompiledPattern, DEFAULT_SIZE_LIMIT};
