//! # Handler Loading
//!
//! Builds route tables from a directory of handler manifests. Each manifest is
//! a YAML, JSON or TOML file declaring the routes its handler serves:
//!
//! ```yaml
//! routes:
//!   - path: /{title}
//!     methods: { get: {} }
//!   - path: /{title}/{part}
//!     methods: { get: {}, put: {} }
//! ```
//!
//! A manifest that cannot be read or parsed is logged and skipped; only a
//! directory that cannot be listed fails the load.

mod load;
mod types;

pub(crate) use load::load_routes;
pub use load::{load_handler_file, load_handlers, routes_from_handlers, LogDetails, LogFn};
pub use types::{HandlerDef, HandlerRoute, LoadedRoute};
