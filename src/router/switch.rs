//! Combined matcher over every registered route.
//!
//! A [`RouteSwitch`] is built once from an ordered list of entries and never
//! mutated afterwards. The route table throws it away and builds a new one on
//! every add/remove.
//!
//! Matching runs the path through a single [`RegexSet`] to find which patterns
//! hit, then re-runs only the winning entry's regex to extract captures. When
//! several patterns match, the lowest index (the first registered) wins; later
//! candidates are only consulted if an earlier one fails to yield captures.
//!
//! A route set too large for one `RegexSet` under the size limit is matched by
//! scanning the entries' own regexes in registration order instead. Results
//! are identical; only lookup cost changes.

use regex::{Captures, RegexSet, RegexSetBuilder};
use tracing::warn;

use super::error::RouteError;
use super::route::RouteEntry;

#[derive(Debug)]
enum Matcher {
    /// All patterns compiled into one set
    Set(RegexSet),
    /// Per-entry regexes tried in order
    Linear,
}

/// Immutable dispatcher built from an ordered sequence of route entries
#[derive(Debug)]
pub struct RouteSwitch<T> {
    matcher: Matcher,
    entries: Vec<RouteEntry<T>>,
}

impl<T> RouteSwitch<T> {
    /// Build a switch from `entries`, in priority order.
    ///
    /// Exceeding `size_limit` with the combined set is not an error: the
    /// switch falls back to a linear scan. Any other set build failure is.
    pub fn build(entries: Vec<RouteEntry<T>>, size_limit: usize) -> Result<Self, RouteError> {
        let matcher = match RegexSetBuilder::new(entries.iter().map(|e| e.regex.as_str()))
            .size_limit(size_limit)
            .build()
        {
            Ok(set) => Matcher::Set(set),
            Err(regex::Error::CompiledTooBig(limit)) => {
                warn!(
                    patterns = entries.len(),
                    size_limit = limit,
                    "Combined route matcher exceeds size limit, falling back to linear scan"
                );
                Matcher::Linear
            }
            Err(source) => {
                return Err(RouteError::Build {
                    patterns: entries.len(),
                    source,
                })
            }
        };

        Ok(Self { matcher, entries })
    }

    /// A switch that matches nothing
    #[must_use]
    pub fn empty() -> Self {
        Self {
            matcher: Matcher::Set(RegexSet::empty()),
            entries: Vec::new(),
        }
    }

    /// Find the first-registered entry matching `path`, with its captures.
    #[must_use]
    pub fn find<'p>(&self, path: &'p str) -> Option<(&RouteEntry<T>, Captures<'p>)> {
        let set = match &self.matcher {
            Matcher::Set(set) => set,
            Matcher::Linear => {
                return self
                    .entries
                    .iter()
                    .find_map(|entry| entry.regex.captures(path).map(|caps| (entry, caps)));
            }
        };

        let hits = set.matches(path);
        if !hits.matched_any() {
            return None;
        }

        // SetMatches iterates in ascending pattern index, i.e. registration order.
        hits.iter().find_map(|idx| {
            let entry = self.entries.get(idx)?;
            entry.regex.captures(path).map(|caps| (entry, caps))
        })
    }

    /// Whether lookups scan entries one by one instead of using the combined set
    #[must_use]
    pub fn is_linear(&self) -> bool {
        matches!(self.matcher, Matcher::Linear)
    }

    /// Entries in priority order
    #[must_use]
    pub fn entries(&self) -> &[RouteEntry<T>] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::route::Route;
    use crate::router::template::DEFAULT_SIZE_LIMIT;
    use std::sync::Arc;

    fn entries(patterns: &[&str]) -> Vec<RouteEntry<usize>> {
        patterns
            .iter()
            .enumerate()
            .map(|(i, p)| {
                RouteEntry::compile(Arc::new(Route::new(*p, i)), DEFAULT_SIZE_LIMIT).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_empty_switch_matches_nothing() {
        let switch: RouteSwitch<usize> = RouteSwitch::empty();
        assert!(switch.find("/").is_none());
        assert!(switch.find("").is_none());

        let built: RouteSwitch<usize> = RouteSwitch::build(Vec::new(), DEFAULT_SIZE_LIMIT).unwrap();
        assert!(built.is_empty());
        assert!(built.find("/anything").is_none());
    }

    #[test]
    fn test_first_registered_wins() {
        let switch = RouteSwitch::build(entries(&["/{x}", "/fixed"]), DEFAULT_SIZE_LIMIT).unwrap();
        let (entry, caps) = switch.find("/fixed").unwrap();
        assert_eq!(entry.route.value, 0);
        assert_eq!(&caps[1], "fixed");

        let switch = RouteSwitch::build(entries(&["/fixed", "/{x}"]), DEFAULT_SIZE_LIMIT).unwrap();
        let (entry, _) = switch.find("/fixed").unwrap();
        assert_eq!(entry.route.value, 0);
        let (entry, _) = switch.find("/other").unwrap();
        assert_eq!(entry.route.value, 1);
    }

    #[test]
    fn test_captures_belong_to_winning_pattern() {
        let switch = RouteSwitch::build(
            entries(&["/a/{one}", "/b/{one}/{two}"]),
            DEFAULT_SIZE_LIMIT,
        )
        .unwrap();
        let (entry, caps) = switch.find("/b/x/y").unwrap();
        assert_eq!(entry.route.value, 1);
        assert_eq!(caps.len(), 3);
        assert_eq!(&caps[1], "x");
        assert_eq!(&caps[2], "y");
    }

    #[test]
    fn test_oversized_set_falls_back_to_linear_scan() {
        let switch = RouteSwitch::build(entries(&["/{a}/{b}", "/{c}", "/x/y"]), 16).unwrap();
        assert!(switch.is_linear());
        assert_eq!(switch.len(), 3);

        // "/x/y" also matches "/{a}/{b}", which was registered first.
        let (entry, caps) = switch.find("/x/y").unwrap();
        assert_eq!(entry.route.value, 0);
        assert_eq!(&caps[1], "x");
        assert_eq!(&caps[2], "y");

        let (entry, caps) = switch.find("/z").unwrap();
        assert_eq!(entry.route.value, 1);
        assert_eq!(&caps[1], "z");
        assert!(switch.find("/a/b/c").is_none());
    }

    #[test]
    fn test_default_limit_uses_combined_set() {
        let switch = RouteSwitch::build(entries(&["/{a}", "/b"]), DEFAULT_SIZE_LIMIT).unwrap();
        assert!(!switch.is_linear());
    }
}
