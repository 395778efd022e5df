use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One route declared by a handler manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerRoute {
    /// URI template, e.g. `/{title}/{part}`
    pub path: String,
    /// Method metadata, passed through untouched
    #[serde(default)]
    pub methods: Value,
}

/// A handler manifest as found in the handler directory
///
/// ```yaml
/// routes:
///   - path: /pages/{title}
///     methods: { get: { summary: Fetch a page } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerDef {
    /// Handler name, taken from the manifest file stem
    #[serde(skip)]
    pub name: String,
    #[serde(default)]
    pub routes: Vec<HandlerRoute>,
}

/// Route payload for tables built from a handler directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedRoute {
    /// Name of the handler that declared the route
    pub handler: String,
    /// The template as declared
    pub path: String,
    /// Method metadata from the manifest
    pub methods: Value,
}
