//! # routeswitch
//!
//! **routeswitch** is a URI-template request router. Paths such as
//! `/{title}/{part}` are compiled into anchored regexes, combined into a single
//! switch, and matched against incoming paths to find the first registered
//! route and its parameters.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`router`]** - Template compilation, the combined [`RouteSwitch`](router::RouteSwitch)
//!   and the mutable [`RouteTable`](router::RouteTable)
//! - **[`handlers`]** - Loading handler manifests from a directory into routes
//! - **[`hot_reload`]** - Rebuilding the table when the handler directory changes
//! - **[`runtime_config`]** - Environment-based configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `routeswitch` command-line tool
//!
//! ### Match Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Table as RouteTable
//!     participant Switch as RouteSwitch
//!     participant Set as RegexSet
//!
//!     Caller->>Table: match_path("/foo/bar")
//!     Table->>Switch: load snapshot
//!     Switch->>Set: matches("/foo/bar")
//!     Set-->>Switch: hit indices (ascending)
//!     Switch->>Switch: captures of lowest hit
//!     Switch-->>Table: (entry, captures)
//!     Table->>Table: params "0".."k-1" + named keys
//!     Table-->>Caller: RouteMatch { route, captures, params }
//! ```
//!
//! ### Mutation Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Table as RouteTable
//!     participant Compiler as template::compile
//!
//!     Caller->>Table: add_route(route)
//!     Table->>Compiler: compile(template)
//!     Compiler-->>Table: ^...$ regex + keys
//!     Table->>Table: lock entries, append
//!     Table->>Table: build new RouteSwitch
//!     Table->>Table: store switch (atomic swap)
//!     Table-->>Caller: Arc<Route>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use routeswitch::router::{Route, RouteTable};
//!
//! let table = RouteTable::new(vec![Route::new("/{title}/{part}", "page")]).unwrap();
//!
//! let m = table.match_path("/foo/bar").unwrap();
//! assert_eq!(m.route.value, "page");
//! assert_eq!(m.param("title"), Some("foo"));
//! assert_eq!(m.param("part"), Some("bar"));
//! assert_eq!(m.param("0"), Some("foo"));
//! assert_eq!(m.param("1"), Some("bar"));
//! ```
//!
//! ## Matching Rules
//!
//! - A template matches the **whole** path; `/{a}` does not match `/x/y`
//! - A `{name}` variable matches one or more characters other than `/`
//! - Only `[a-zA-Z0-9]+` names are variables; anything else is literal text
//! - When several routes match, the first registered wins
//! - Parameter values are returned raw (no percent-decoding)
//!
//! ## Handler Directories
//!
//! ```rust,no_run
//! use routeswitch::handlers::LogDetails;
//! use routeswitch::router::RouteTable;
//! use std::path::Path;
//!
//! let log = |level: &str, msg: &str, _details: &LogDetails<'_>| eprintln!("[{level}] {msg}");
//! let table = RouteTable::from_handlers(Path::new("handlers"), Some(&log))?;
//! table.dump_routes();
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod handlers;
pub mod hot_reload;
pub mod logging;
pub mod router;
pub mod runtime_config;

pub use handlers::{HandlerDef, HandlerRoute, LoadedRoute};
pub use router::{Route, RouteError, RouteMatch, RoutePattern, RouteTable};
