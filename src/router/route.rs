use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::error::RouteError;
use super::template;

/// The pattern half of a [`Route`]
#[derive(Debug, Clone)]
pub enum RoutePattern {
    /// A URI template such as `/{title}/{part}`, compiled by the router
    Template(String),
    /// A caller-compiled regex, used as-is
    ///
    /// The router does not anchor it and does not know its variable names, so a
    /// match only yields numeric parameters. Inline flags (`(?i)`) are honoured;
    /// flags set through `RegexBuilder` are not carried into the combined matcher.
    Compiled(Regex),
}

impl RoutePattern {
    /// Source text of the pattern, as registered
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            RoutePattern::Template(t) => t,
            RoutePattern::Compiled(re) => re.as_str(),
        }
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for RoutePattern {
    fn from(template: &str) -> Self {
        RoutePattern::Template(template.to_string())
    }
}

impl From<String> for RoutePattern {
    fn from(template: String) -> Self {
        RoutePattern::Template(template)
    }
}

impl From<Regex> for RoutePattern {
    fn from(regex: Regex) -> Self {
        RoutePattern::Compiled(regex)
    }
}

/// A registered route: a pattern plus an opaque payload returned on match
///
/// Routes are shared as `Arc<Route<T>>`; removal from a table is by pointer
/// identity, so two routes with the same pattern are distinct entries.
#[derive(Debug, Clone)]
pub struct Route<T> {
    /// Template or pre-compiled regex
    pub pattern: RoutePattern,
    /// Payload handed back verbatim in a [`RouteMatch`](super::RouteMatch)
    pub value: T,
}

impl<T> Route<T> {
    pub fn new(pattern: impl Into<RoutePattern>, value: T) -> Self {
        Self {
            pattern: pattern.into(),
            value,
        }
    }
}

/// A route paired with the regex the switch runs for it
#[derive(Debug)]
pub struct RouteEntry<T> {
    pub(crate) regex: Regex,
    pub(crate) keys: Arc<[String]>,
    pub(crate) route: Arc<Route<T>>,
}

impl<T> Clone for RouteEntry<T> {
    fn clone(&self) -> Self {
        Self {
            regex: self.regex.clone(),
            keys: Arc::clone(&self.keys),
            route: Arc::clone(&self.route),
        }
    }
}

impl<T> RouteEntry<T> {
    /// Compile `route` into an entry. Pre-compiled regexes are taken as-is with no keys.
    pub fn compile(route: Arc<Route<T>>, size_limit: usize) -> Result<Self, RouteError> {
        let (regex, keys) = match &route.pattern {
            RoutePattern::Template(t) => {
                let compiled = template::compile_with_limit(t, size_limit)?;
                (compiled.regex, compiled.keys)
            }
            RoutePattern::Compiled(re) => (re.clone(), Vec::new()),
        };

        Ok(Self {
            regex,
            keys: keys.into(),
            route,
        })
    }

    /// The regex this entry matches with
    #[must_use]
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Variable names, one per capture group of template-compiled patterns
    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// The originating route
    #[must_use]
    pub fn route(&self) -> &Arc<Route<T>> {
        &self.route
    }
}
