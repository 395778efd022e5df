//! # Hot Reload Module
//!
//! Live reloading of a handler directory without restarting the process.
//!
//! ## Overview
//!
//! Hot reload watches the handler directory for changes and:
//! - Detects created, modified and removed manifests using filesystem watchers
//! - Reloads every manifest in the directory
//! - Swaps the complete route set into the shared [`RouteTable`]
//! - Calls a custom hook with the new routes
//!
//! ## Usage
//!
//! ```rust,no_run
//! use routeswitch::hot_reload::watch_handlers;
//! use routeswitch::router::RouteTable;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let table = Arc::new(RouteTable::from_handlers(Path::new("handlers"), None)?);
//! let _watcher = watch_handlers("handlers", Arc::clone(&table), |routes| {
//!     println!("Reloaded {} routes", routes.len());
//! })?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! If the directory cannot be listed or the new route set cannot be compiled:
//! - The error is logged
//! - The previous route set remains active
//! - Lookups keep being served
//!
//! Individual manifests that fail to parse are skipped, exactly as on the
//! initial load, so the reloaded set simply lacks their routes.

use crate::handlers::{self, LoadedRoute};
use crate::router::{Route, RouteTable};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Watch a handler directory and swap the table's routes when it changes.
///
/// The returned watcher must be kept alive; dropping it stops the watch.
pub fn watch_handlers<P, F>(
    handlers_dir: P,
    table: Arc<RouteTable<LoadedRoute>>,
    mut on_reload: F,
) -> notify::Result<RecommendedWatcher>
where
    P: AsRef<Path>,
    F: FnMut(&[Arc<Route<LoadedRoute>>]) + Send + 'static,
{
    let path: PathBuf = handlers_dir.as_ref().to_path_buf();
    let watch_path = path.clone();

    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                if matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) {
                    if let Some(routes) = reload(&watch_path, &table) {
                        on_reload(&routes);
                    }
                }
            }
            Err(e) => error!(error = %e, "hot-reload: watch error"),
        },
        Config::default(),
    )?;

    watcher.watch(&path, RecursiveMode::NonRecursive)?;
    info!(handlers_dir = %path.display(), "hot-reload: watching handler directory");
    Ok(watcher)
}

/// Reload `dir` into `table`. Returns the new routes, or `None` if the old set was kept.
fn reload(
    dir: &Path,
    table: &RouteTable<LoadedRoute>,
) -> Option<Vec<Arc<Route<LoadedRoute>>>> {
    let routes = match handlers::load_routes(dir, None) {
        Ok(routes) => routes,
        Err(e) => {
            error!(handlers_dir = %dir.display(), error = %format!("{e:#}"), "hot-reload: load failed");
            return None;
        }
    };

    if let Err(e) = table.replace_routes(routes.clone()) {
        error!(handlers_dir = %dir.display(), error = %e, "hot-reload: keeping previous routes");
        return None;
    }

    info!(
        routes_count = routes.len(),
        "hot-reload: applied route updates"
    );
    Some(routes)
}
