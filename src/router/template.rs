//! URI template compilation.
//!
//! Converts the supported subset of RFC 6570 path templates into anchored
//! regexes. Only simple single-segment variables are recognized:
//!
//! ```text
//! /{title}/{part}   →   ^/([^/]+)/([^/]+)$   keys = ["title", "part"]
//! ```
//!
//! Everything else in the template, including the operator characters of the
//! full grammar (`+ # . ; ? *`), is matched literally. Literal braces are
//! expected to be percent-encoded in the registered template.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use super::error::RouteError;

/// Default compiled-size limit for a single route regex (the regex crate default).
pub const DEFAULT_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Capture substituted for every `{name}` placeholder: one or more non-separator characters.
const SEGMENT_CAPTURE: &str = "([^/]+)";

/// Matches a placeholder *after* the template has been escaped, i.e. `\{name\}`.
static ESCAPED_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\\{([a-zA-Z0-9]+)\\\}").expect("placeholder regex should be valid")
});

/// A template compiled into an anchored regex plus its variable names
///
/// `keys[i]` names capture group `i + 1` of `regex`.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// Anchored regex matching the whole path
    pub regex: Regex,
    /// Variable names in left-to-right order
    pub keys: Vec<String>,
}

/// Compile a URI template with the default size limit.
///
/// # Example
///
/// ```rust
/// use routeswitch::router::compile;
///
/// let compiled = compile("/users/{id}").unwrap();
/// assert_eq!(compiled.regex.as_str(), "^/users/([^/]+)$");
/// assert_eq!(compiled.keys, vec!["id"]);
/// ```
pub fn compile(template: &str) -> Result<CompiledPattern, RouteError> {
    compile_with_limit(template, DEFAULT_SIZE_LIMIT)
}

/// Compile a URI template, rejecting regexes whose compiled form exceeds `size_limit` bytes.
pub fn compile_with_limit(template: &str, size_limit: usize) -> Result<CompiledPattern, RouteError> {
    let (source, keys) = template_to_regex_source(template);
    let regex = RegexBuilder::new(&source)
        .size_limit(size_limit)
        .build()
        .map_err(|source| RouteError::InvalidTemplate {
            template: template.to_string(),
            source,
        })?;

    debug_assert_eq!(regex.captures_len(), keys.len() + 1);

    Ok(CompiledPattern { regex, keys })
}

/// Build the anchored regex source for a template and collect its variable names.
pub(crate) fn template_to_regex_source(template: &str) -> (String, Vec<String>) {
    let escaped = regex::escape(template);
    let mut keys = Vec::with_capacity(template.matches('{').count());

    let body = ESCAPED_PLACEHOLDER.replace_all(&escaped, |caps: &regex::Captures<'_>| {
        keys.push(caps[1].to_string());
        SEGMENT_CAPTURE
    });

    let mut source = String::with_capacity(body.len() + 2);
    source.push('^');
    source.push_str(&body);
    source.push('$');

    (source, keys)
}
