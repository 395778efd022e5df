use std::fmt;

/// Route compilation error
///
/// Returned when a route's pattern cannot be turned into a matcher. A failed
/// construction produces no table; a failed mutation leaves the table as it was.
#[derive(Debug, Clone)]
pub enum RouteError {
    /// The regex generated from a URI template was rejected by the regex engine
    ///
    /// With the default limits this only happens for very large templates,
    /// since every literal character is escaped before compilation.
    InvalidTemplate {
        /// The template as registered
        template: String,
        /// The underlying regex error
        source: regex::Error,
    },
    /// The combined matcher rejected the registered patterns
    ///
    /// Exceeding the size limit is not reported here; the switch then scans
    /// the routes one by one instead.
    Build {
        /// Number of patterns that were being combined
        patterns: usize,
        /// The underlying regex error
        source: regex::Error,
    },
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteError::InvalidTemplate { template, source } => {
                write!(f, "invalid route template '{template}': {source}")
            }
            RouteError::Build { patterns, source } => {
                write!(
                    f,
                    "failed to build route switch from {patterns} patterns: {source}"
                )
            }
        }
    }
}

impl std::error::Error for RouteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouteError::InvalidTemplate { source, .. } | RouteError::Build { source, .. } => {
                Some(source)
            }
        }
    }
}
