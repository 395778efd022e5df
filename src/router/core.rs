//! Route table core module - owns the registered routes and the live switch.
//!
//! Readers call [`RouteTable::match_path`] against a lock-free snapshot of the
//! current [`RouteSwitch`]. Writers (`add_route`, `remove_route`,
//! `replace_routes`) are serialized by a mutex, rebuild a complete switch from
//! the updated entry list and publish it with a single store, so a reader sees
//! either the old switch or the new one, never a partial build.

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::error::RouteError;
use super::route::{Route, RouteEntry};
use super::switch::RouteSwitch;
use super::template::DEFAULT_SIZE_LIMIT;

/// Maximum number of captures before heap allocation.
/// Most paths have ≤4 variables (e.g., /users/{id}/posts/{postId}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Capture values in group order; `None` for a group that did not participate.
pub type CaptureVec = SmallVec<[Option<String>; MAX_INLINE_PARAMS]>;

/// Result of successfully matching a path to a route
#[derive(Debug)]
pub struct RouteMatch<T> {
    /// The matched route, the same `Arc` that was registered
    pub route: Arc<Route<T>>,
    /// Every capture group of the matched pattern, in order (group 0 excluded)
    pub captures: CaptureVec,
    /// Path parameters: `"0".."k-1"` for each capture plus the template's
    /// variable names (`/{title}` → `{"0": "foo", "title": "foo"}`)
    pub params: HashMap<String, String>,
}

impl<T> Clone for RouteMatch<T> {
    fn clone(&self) -> Self {
        Self {
            route: Arc::clone(&self.route),
            captures: self.captures.clone(),
            params: self.params.clone(),
        }
    }
}

impl<T> RouteMatch<T> {
    /// Get a path parameter by name or numeric index
    #[inline]
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Get a capture by position, `0` being the first capture group
    #[inline]
    #[must_use]
    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).and_then(|c| c.as_deref())
    }

    /// The payload of the matched route
    #[inline]
    #[must_use]
    pub fn value(&self) -> &T {
        &self.route.value
    }
}

/// Ordered, mutable set of routes with a combined matcher kept in sync
///
/// Order is registration order and decides priority: when several patterns
/// match a path, the first registered wins.
///
/// # Example
///
/// ```rust
/// use routeswitch::router::{Route, RouteTable};
///
/// let table = RouteTable::new(vec![Route::new("/{title}/{part}", "page")]).unwrap();
/// let m = table.match_path("/foo/bar").unwrap();
/// assert_eq!(m.route.value, "page");
/// assert_eq!(m.param("title"), Some("foo"));
/// assert_eq!(m.param("1"), Some("bar"));
/// ```
pub struct RouteTable<T> {
    /// Registration-ordered entries; the lock also serializes rebuilds
    entries: Mutex<Vec<RouteEntry<T>>>,
    /// Switch derived from `entries`, replaced wholesale on every mutation
    switch: ArcSwap<RouteSwitch<T>>,
    size_limit: usize,
}

impl<T> RouteTable<T> {
    /// Build a table from `routes`, in order.
    ///
    /// Any route failing to compile aborts construction; no partial table is built.
    pub fn new(routes: Vec<Route<T>>) -> Result<Self, RouteError> {
        Self::from_arcs(routes.into_iter().map(Arc::new).collect())
    }

    /// Build a table from routes the caller already shares.
    pub fn from_arcs(routes: Vec<Arc<Route<T>>>) -> Result<Self, RouteError> {
        Self::with_size_limit(routes, DEFAULT_SIZE_LIMIT)
    }

    /// Build a table with a custom compiled-size limit for every regex it builds.
    pub fn with_size_limit(
        routes: Vec<Arc<Route<T>>>,
        size_limit: usize,
    ) -> Result<Self, RouteError> {
        let entries = compile_all(routes, size_limit)?;
        let switch = build_switch(&entries, size_limit)?;

        info!(
            routes_count = entries.len(),
            route_patterns = ?summary(&entries),
            "Route table built"
        );

        Ok(Self {
            entries: Mutex::new(entries),
            switch: ArcSwap::from_pointee(switch),
            size_limit,
        })
    }

    /// An empty table
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            switch: ArcSwap::from_pointee(RouteSwitch::empty()),
            size_limit: DEFAULT_SIZE_LIMIT,
        }
    }

    /// Match `path` against the current route set.
    ///
    /// Returns `None` when nothing matches. Never mutates the table.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<T>> {
        let switch = self.switch.load();
        debug!(path = %path, routes_count = switch.len(), "Route match attempt");

        let Some((entry, caps)) = switch.find(path) else {
            debug!(path = %path, "No route matched");
            return None;
        };

        let captures: CaptureVec = caps
            .iter()
            .skip(1)
            .map(|c| c.map(|m| m.as_str().to_string()))
            .collect();

        let mut params = HashMap::with_capacity(captures.len() + entry.keys.len());
        for (i, value) in captures.iter().enumerate() {
            if let Some(value) = value {
                params.insert(i.to_string(), value.clone());
            }
        }
        // keys[i] names regex group i + 1, i.e. captures[i]
        for (name, value) in entry.keys.iter().zip(captures.iter()) {
            if let Some(value) = value {
                params.insert(name.clone(), value.clone());
            }
        }

        debug!(
            path = %path,
            route_pattern = %entry.route.pattern,
            path_params = ?params,
            "Route matched"
        );

        Some(RouteMatch {
            route: Arc::clone(&entry.route),
            captures,
            params,
        })
    }

    /// Append `route` with the lowest priority and rebuild the switch.
    ///
    /// If the route does not compile, or the combined switch cannot be built,
    /// the error is returned and the table is left unchanged.
    pub fn add_route(&self, route: Route<T>) -> Result<Arc<Route<T>>, RouteError> {
        let route = Arc::new(route);
        self.add_shared_route(Arc::clone(&route))?;
        Ok(route)
    }

    /// Like [`add_route`](Self::add_route) for a route the caller already holds in an `Arc`.
    pub fn add_shared_route(&self, route: Arc<Route<T>>) -> Result<(), RouteError> {
        let entry = RouteEntry::compile(route, self.size_limit)?;

        let mut entries = self.entries.lock();
        let mut next = entries.clone();
        next.push(entry);
        let switch = build_switch(&next, self.size_limit)?;

        *entries = next;
        self.switch.store(Arc::new(switch));

        info!(routes_count = entries.len(), "Route added");
        Ok(())
    }

    /// Remove every entry registered with this exact route (pointer identity).
    ///
    /// Returns how many entries were removed; removing an unknown route is a no-op.
    pub fn remove_route(&self, route: &Arc<Route<T>>) -> Result<usize, RouteError> {
        let mut entries = self.entries.lock();
        let next: Vec<RouteEntry<T>> = entries
            .iter()
            .filter(|e| !Arc::ptr_eq(&e.route, route))
            .cloned()
            .collect();
        let removed = entries.len() - next.len();
        if removed == 0 {
            debug!(route_pattern = %route.pattern, "Route not registered, nothing removed");
            return Ok(0);
        }
        let switch = build_switch(&next, self.size_limit)?;

        *entries = next;
        self.switch.store(Arc::new(switch));

        info!(
            removed,
            routes_count = entries.len(),
            route_pattern = %route.pattern,
            "Route removed"
        );
        Ok(removed)
    }

    /// Replace the whole route set at once.
    ///
    /// On error the previous set stays active.
    pub fn replace_routes(&self, routes: Vec<Arc<Route<T>>>) -> Result<(), RouteError> {
        let next = compile_all(routes, self.size_limit)?;
        let mut entries = self.entries.lock();
        let switch = build_switch(&next, self.size_limit)?;

        *entries = next;
        self.switch.store(Arc::new(switch));

        info!(
            routes_count = entries.len(),
            route_patterns = ?summary(&entries),
            "Route table replaced"
        );
        Ok(())
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.switch.load().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered routes in priority order
    #[must_use]
    pub fn routes(&self) -> Vec<Arc<Route<T>>> {
        self.switch
            .load()
            .entries()
            .iter()
            .map(|e| Arc::clone(&e.route))
            .collect()
    }

    /// Registered pattern sources in priority order (templates as written)
    #[must_use]
    pub fn patterns(&self) -> Vec<String> {
        self.switch
            .load()
            .entries()
            .iter()
            .map(|e| e.route.pattern.to_string())
            .collect()
    }

    /// Print all registered routes to stdout
    ///
    /// Useful for debugging and verifying that routes are loaded correctly.
    pub fn dump_routes(&self) {
        let switch = self.switch.load();
        println!("[routes] count={}", switch.len());
        for entry in switch.entries() {
            println!(
                "[route] {} -> {} keys={:?}",
                entry.route.pattern,
                entry.regex.as_str(),
                entry.keys
            );
        }
    }
}

impl<T> Default for RouteTable<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> std::fmt::Debug for RouteTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("patterns", &self.patterns())
            .field("size_limit", &self.size_limit)
            .finish()
    }
}

fn compile_all<T>(
    routes: Vec<Arc<Route<T>>>,
    size_limit: usize,
) -> Result<Vec<RouteEntry<T>>, RouteError> {
    routes
        .into_iter()
        .map(|route| RouteEntry::compile(route, size_limit))
        .collect()
}

/// An empty entry list always yields the empty switch, whatever the size limit.
fn build_switch<T>(
    entries: &[RouteEntry<T>],
    size_limit: usize,
) -> Result<RouteSwitch<T>, RouteError> {
    if entries.is_empty() {
        return Ok(RouteSwitch::empty());
    }
    RouteSwitch::build(entries.to_vec(), size_limit)
}

/// First few patterns, for log lines
fn summary<T>(entries: &[RouteEntry<T>]) -> Vec<String> {
    entries
        .iter()
        .take(10)
        .map(|e| e.route.pattern.to_string())
        .collect()
}
