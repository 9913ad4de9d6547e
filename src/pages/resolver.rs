//! Multi-selector fallback resolution.
//!
//! A logical element (say, "temperature display") is described by an ordered
//! list of selector candidates, most specific first. Resolution walks the
//! list, probes each candidate for a visible match within a bounded wait,
//! and short-circuits on the first hit. A candidate that matches nothing,
//! times out, or is outright malformed is skipped: one bad selector must
//! not abort discovery of a working one. Only when every candidate has been
//! tried does resolution report [`Resolution::Absent`], as a value rather
//! than an error.
//!
//! The probe is a closure so the iteration contract can be exercised without
//! a live browser; the page-level probe lives in [`super::base`].

use std::future::Future;

use tracing::debug;

use crate::error::BrowserError;

/// A named logical UI element with its ordered selector candidates.
#[derive(Clone, Copy, Debug)]
pub struct SelectorSet {
    /// Human-readable element name, used only for diagnostics.
    pub name: &'static str,
    /// Candidate selectors, most specific first.
    pub candidates: &'static [&'static str],
}

/// Outcome of resolving a logical element.
#[derive(Debug)]
pub enum Resolution<T> {
    /// A candidate matched a visible element. `candidate` records which one,
    /// for triage when the fallback chain hides markup drift.
    Found { handle: T, candidate: usize },
    /// No candidate matched a visible element. Not an error.
    Absent,
}

impl<T> Resolution<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found { .. })
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Resolution::Found { handle, .. } => Some(handle),
            Resolution::Absent => None,
        }
    }

    pub fn into_found(self) -> Option<T> {
        match self {
            Resolution::Found { handle, .. } => Some(handle),
            Resolution::Absent => None,
        }
    }
}

/// Walk the candidate list and return the first visible match.
///
/// The probe reports `Ok(Some(handle))` for a visible match, `Ok(None)` for
/// anything that should be treated as "this candidate found nothing"
/// (timeout, zero matches, malformed selector), and `Err` only for transport
/// failures; a dead browser connection is not an absent element and
/// propagates immediately, skipping the remaining candidates.
pub async fn first_visible<T, F, Fut>(
    set: &SelectorSet,
    mut probe: F,
) -> Result<Resolution<T>, BrowserError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<Option<T>, BrowserError>>,
{
    if set.candidates.is_empty() {
        return Ok(Resolution::Absent);
    }

    for (index, candidate) in set.candidates.iter().enumerate() {
        match probe(candidate.to_string()).await? {
            Some(handle) => {
                debug!("resolved '{}' via candidate {} ({})", set.name, index, candidate);
                return Ok(Resolution::Found { handle, candidate: index });
            }
            None => {
                debug!("candidate {} ({}) for '{}' did not match", index, candidate, set.name);
            }
        }
    }

    debug!("'{}' absent after {} candidates", set.name, set.candidates.len());
    Ok(Resolution::Absent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromiumoxide::error::CdpError;
    use tokio_test::block_on;

    const SET: SelectorSet = SelectorSet {
        name: "test element",
        candidates: &["#first", ".second", "[data-third]"],
    };

    #[test]
    fn short_circuits_on_first_match() {
        let mut probed = Vec::new();
        let result = block_on(first_visible(&SET, |selector| {
            probed.push(selector.clone());
            let hit = selector == "#first";
            async move { Ok(hit.then_some("handle")) }
        }))
        .unwrap();

        match result {
            Resolution::Found { handle, candidate } => {
                assert_eq!(handle, "handle");
                assert_eq!(candidate, 0);
            }
            Resolution::Absent => panic!("expected a match"),
        }
        // No candidate after the match is ever evaluated.
        assert_eq!(probed, vec!["#first"]);
    }

    #[test]
    fn later_candidate_wins_when_earlier_ones_miss() {
        let result = block_on(first_visible(&SET, |selector| {
            let hit = selector == "[data-third]";
            async move { Ok(hit.then_some(())) }
        }))
        .unwrap();

        match result {
            Resolution::Found { candidate, .. } => assert_eq!(candidate, 2),
            Resolution::Absent => panic!("expected a match"),
        }
    }

    #[test]
    fn exhausted_candidates_yield_absent_not_error() {
        let mut probed = 0usize;
        let result: Resolution<()> = block_on(first_visible(&SET, |_| {
            probed += 1;
            async { Ok(None) }
        }))
        .unwrap();

        assert!(!result.is_found());
        assert_eq!(probed, SET.candidates.len());
    }

    #[test]
    fn empty_candidate_list_is_immediately_absent() {
        const EMPTY: SelectorSet = SelectorSet { name: "empty", candidates: &[] };
        let mut probed = 0usize;
        let result: Resolution<()> = block_on(first_visible(&EMPTY, |_| {
            probed += 1;
            async { Ok(None) }
        }))
        .unwrap();
        assert!(!result.is_found());
        assert_eq!(probed, 0, "probe must not run for an empty candidate list");
    }

    #[test]
    fn transport_failure_propagates_and_stops_iteration() {
        let mut probed = Vec::new();
        let result: Result<Resolution<()>, _> = block_on(first_visible(&SET, |selector| {
            probed.push(selector.clone());
            async move {
                if selector == ".second" {
                    Err(BrowserError::ConnectionLost {
                        selector,
                        source: CdpError::NoResponse,
                    })
                } else {
                    Ok(None)
                }
            }
        }));

        assert!(matches!(result, Err(BrowserError::ConnectionLost { .. })));
        assert_eq!(probed, vec!["#first", ".second"]);
    }

    #[test]
    fn accessors_expose_the_handle() {
        let found = Resolution::Found { handle: 7, candidate: 1 };
        assert!(found.is_found());
        assert_eq!(found.found(), Some(&7));
        assert_eq!(found.into_found(), Some(7));

        let absent: Resolution<i32> = Resolution::Absent;
        assert_eq!(absent.found(), None);
        assert_eq!(absent.into_found(), None);
    }
}
