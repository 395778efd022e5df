use anyhow::{bail, Context};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use super::types::{HandlerDef, LoadedRoute};
use crate::router::{Route, RoutePattern, RouteTable, DEFAULT_SIZE_LIMIT};

/// Structured context passed along with each loader log message
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDetails<'a> {
    /// Handler the message is about (manifest file stem)
    pub handler: Option<&'a str>,
    /// Manifest file or handler directory
    pub path: Option<&'a Path>,
    /// Failure that caused the message
    pub error: Option<&'a anyhow::Error>,
    /// Route patterns produced by a completed load, in priority order
    pub routes: &'a [&'a str],
}

/// Optional sink for loader diagnostics: `(level, message, details)`.
///
/// Levels used: `"error/handler"` for a skipped manifest (with `handler`,
/// `path` and `error` set), `"notice"` for the summary of a completed load
/// (with `path` and `routes` set). Every message is also emitted through
/// `tracing`. The sink may borrow from the caller.
pub type LogFn<'a> = dyn Fn(&str, &str, &LogDetails<'_>) + Send + Sync + 'a;

const MANIFEST_EXTENSIONS: [&str; 4] = ["yaml", "yml", "json", "toml"];

/// Parse one handler manifest; the format is chosen by file extension.
pub fn load_handler_file(path: &Path) -> anyhow::Result<HandlerDef> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read handler manifest {}", path.display()))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let parsed: anyhow::Result<HandlerDef> = match ext.as_str() {
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(Into::into),
        "json" => serde_json::from_str(&content).map_err(Into::into),
        "toml" => toml::from_str(&content).map_err(Into::into),
        other => bail!("unsupported handler manifest extension '{other}'"),
    };
    let mut def = parsed
        .with_context(|| format!("failed to parse handler manifest {}", path.display()))?;

    def.name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    Ok(def)
}

/// Load every handler manifest in `dir`, in file-name order.
///
/// Listing the directory is the only fatal step. A manifest that fails to load
/// is reported through `tracing` and `log`, then skipped. Subdirectories, hidden
/// files and files with other extensions are ignored.
pub fn load_handlers(dir: &Path, log: Option<&LogFn<'_>>) -> anyhow::Result<Vec<HandlerDef>> {
    let listing = std::fs::read_dir(dir)
        .with_context(|| format!("failed to list handler directory {}", dir.display()))?;

    let mut paths: Vec<_> = listing
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| is_manifest(path))
        .collect();
    paths.sort();

    let mut handlers = Vec::with_capacity(paths.len());
    for path in paths {
        match load_handler_file(&path) {
            Ok(def) => handlers.push(def),
            Err(e) => {
                let handler = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                error!(
                    handler,
                    path = %path.display(),
                    error = %format!("{e:#}"),
                    "Skipping handler that failed to load"
                );
                if let Some(log) = log {
                    log(
                        "error/handler",
                        &format!("{}: {e:#}", path.display()),
                        &LogDetails {
                            handler: Some(handler),
                            path: Some(&path),
                            error: Some(&e),
                            ..LogDetails::default()
                        },
                    );
                }
            }
        }
    }

    Ok(handlers)
}

/// Flatten handler definitions into routes, in handler then declaration order.
#[must_use]
pub fn routes_from_handlers(handlers: &[HandlerDef]) -> Vec<Route<LoadedRoute>> {
    handlers
        .iter()
        .flat_map(|handler| {
            handler.routes.iter().map(|route| Route {
                pattern: RoutePattern::Template(route.path.clone()),
                value: LoadedRoute {
                    handler: handler.name.clone(),
                    path: route.path.clone(),
                    methods: route.methods.clone(),
                },
            })
        })
        .collect()
}

/// Load a handler directory and flatten it into shared routes, logging the summary.
pub(crate) fn load_routes(
    dir: &Path,
    log: Option<&LogFn<'_>>,
) -> anyhow::Result<Vec<Arc<Route<LoadedRoute>>>> {
    let handlers = load_handlers(dir, log)?;
    let routes = routes_from_handlers(&handlers);

    let patterns: Vec<&str> = routes.iter().map(|r| r.pattern.as_str()).collect();
    info!(
        handlers_dir = %dir.display(),
        handlers_count = handlers.len(),
        routes_count = routes.len(),
        route_patterns = ?patterns,
        "Handlers loaded"
    );
    if let Some(log) = log {
        log(
            "notice",
            &format!("{}: {} routes", dir.display(), routes.len()),
            &LogDetails {
                path: Some(dir),
                routes: &patterns,
                ..LogDetails::default()
            },
        );
    }

    Ok(routes.into_iter().map(Arc::new).collect())
}

impl RouteTable<LoadedRoute> {
    /// Build a route table from the handler manifests in `dir`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use routeswitch::router::RouteTable;
    /// use std::path::Path;
    ///
    /// let table = RouteTable::from_handlers(Path::new("handlers"), None)?;
    /// if let Some(m) = table.match_path("/Main_Page/html") {
    ///     println!("{} -> {:?}", m.route.value.handler, m.params);
    /// }
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn from_handlers(dir: &Path, log: Option<&LogFn<'_>>) -> anyhow::Result<Self> {
        Self::from_handlers_with_limit(dir, log, DEFAULT_SIZE_LIMIT)
    }

    /// Like [`from_handlers`](Self::from_handlers) with a custom regex size limit.
    pub fn from_handlers_with_limit(
        dir: &Path,
        log: Option<&LogFn<'_>>,
        size_limit: usize,
    ) -> anyhow::Result<Self> {
        let routes = load_routes(dir, log)?;
        let table = RouteTable::with_size_limit(routes, size_limit)
            .with_context(|| format!("failed to build routes from {}", dir.display()))?;
        Ok(table)
    }
}

fn is_manifest(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'));
    let known_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| MANIFEST_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()));

    path.is_file() && !hidden && known_ext
}
