use crate::engine;
use std::collections::BTreeSet;
use std::time::Duration;
use thiserror::Error;

pub use crate::engine::index::PatternIndex;

/// Errors surfaced by the matcher.
///
/// Lifecycle violations are the only failures the core can produce: the
/// pipeline itself is deterministic and in-memory, so misaligned matches are
/// dropped silently (expected behavior, not an error) and empty inputs
/// yield empty outputs.
#[derive(Debug, Error)]
pub enum MatchError {
    /// `insert` or a second `finalize` on an already-finalized index.
    #[error("pattern index is already finalized")]
    AlreadyFinalized,
    /// A matching call before `finalize`.
    #[error("pattern index must be finalized before matching")]
    NotFinalized,
    /// The automaton build itself failed (for example a pattern exceeding
    /// the automaton's internal limits).
    #[error("failed to compile the pattern automaton: {0}")]
    Compile(String),
    /// I/O failure while reading a gazetteer directory.
    #[error("failed to read gazetteer: {0}")]
    Gazetteer(#[from] std::io::Error),
}

/// A dictionary key matched against a run of whole tokens.
///
/// `start`/`end` are token indices into the sequence the span was extracted
/// from; `text` always equals those tokens joined with single spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// The matched key, verbatim.
    pub text: String,
    /// First covered token (inclusive).
    pub start: usize,
    /// One past the last covered token (exclusive).
    pub end: usize,
    /// Every label the key was inserted under, in lexicographic order.
    pub labels: BTreeSet<String>,
}

/// Result from [`lookup`].
#[derive(Debug, Clone)]
pub struct LookupResult {
    /// The tokens joined with single spaces (the text that was scanned).
    pub text: String,
    /// Resolved, conflict-free spans.
    pub spans: Vec<Span>,
    /// Total elapsed time spent matching + resolving.
    pub elapsed: Duration,
}

/// Additional details returned by [`lookup_verbose`].
///
/// This is intentionally compact: it's meant for debugging and performance
/// inspection without dumping the entire internal state.
#[derive(Debug, Clone)]
pub struct LookupDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Time spent in the automaton pass.
    pub scan: Duration,
    /// Time spent on token-boundary validation.
    pub extract: Duration,
    /// Time spent reducing overlaps and deduplicating.
    pub resolve: Duration,
    /// Raw automaton hits before boundary validation.
    pub raw_hits: usize,
    /// Hits discarded for crossing a token boundary.
    pub dropped: usize,
    /// Token-aligned candidates before overlap resolution.
    pub candidates: Vec<Span>,
}

/// Result from [`lookup_verbose`].
#[derive(Debug, Clone)]
pub struct LookupResultVerbose {
    pub text: String,
    pub spans: Vec<Span>,
    pub elapsed: Duration,
    pub details: LookupDetails,
}

/// Build a finalized [`PatternIndex`] from `(key, label)` pairs.
///
/// Keys repeated across pairs accumulate labels into one entry. The returned
/// index is immutable and reusable across any number of token sequences.
///
/// # Example
/// ```
/// use gazex::{build, lookup};
///
/// let index = build([("Atlantic City", "LOC"), ("Georgia", "LOC")]).unwrap();
/// let out = lookup(&index, &["Atlantic", "City", "of", "Georgia"]).unwrap();
/// assert_eq!(out.spans.len(), 2);
/// ```
pub fn build<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<PatternIndex, MatchError>
where
    K: Into<String>,
    V: Into<String>,
{
    let mut index = PatternIndex::new();
    for (key, label) in pairs {
        index.insert(key, label)?;
    }
    index.finalize()?;
    Ok(index)
}

/// Match `tokens` against a finalized index and return every token-aligned
/// span, *before* overlap resolution.
///
/// Spans come back in left-to-right order by end offset and may overlap or
/// nest; feed them to [`resolve`] for a conflict-free list.
pub fn match_tokens(index: &PatternIndex, tokens: &[&str]) -> Result<Vec<Span>, MatchError> {
    let table = engine::TokenOffsetTable::new(tokens);
    let raw = index.scan(table.text())?;
    Ok(table.extract(index, &raw))
}

/// Reduce a left-to-right-ordered span list to a conflict-free,
/// deduplicated one.
///
/// The reduction is the matcher's local-window heuristic (see
/// `engine/resolve.rs`); running it on an already-resolved list returns the
/// list unchanged.
pub fn resolve(spans: Vec<Span>) -> Vec<Span> {
    engine::resolve_overlaps(spans)
}

/// Match and resolve in one call.
pub fn lookup(index: &PatternIndex, tokens: &[&str]) -> Result<LookupResult, MatchError> {
    let run = engine::run_with_metrics(index, tokens)?;
    Ok(LookupResult { text: tokens.join(" "), spans: run.spans, elapsed: run.metrics.total })
}

/// Match and resolve, returning extra (compact) debug details.
///
/// This is useful for profiling and dictionary debugging. The plain
/// [`lookup`] path does not allocate the candidate trace.
pub fn lookup_verbose(index: &PatternIndex, tokens: &[&str]) -> Result<LookupResultVerbose, MatchError> {
    let run = engine::run_with_metrics(index, tokens)?;

    let details = LookupDetails {
        total: run.metrics.total,
        scan: run.metrics.scan,
        extract: run.metrics.extract,
        resolve: run.metrics.resolve,
        raw_hits: run.raw_hits,
        dropped: run.dropped,
        candidates: run.candidates,
    };

    Ok(LookupResultVerbose {
        text: tokens.join(" "),
        spans: run.spans,
        elapsed: run.metrics.total,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;

    // Built once per process; a finalized index is immutable and shareable.
    static CITY_INDEX: Lazy<PatternIndex> = Lazy::new(|| {
        build([
            ("Atlantic City", "LOC"),
            ("Georgia", "LOC"),
            ("New York", "LOC"),
            ("New York City", "LOC"),
            ("York City", "LOC"),
        ])
        .unwrap()
    });

    fn labels(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn end_to_end_scenario() {
        let out = lookup(&CITY_INDEX, &["Atlantic", "City", "of", "Georgia"]).unwrap();

        assert_eq!(out.text, "Atlantic City of Georgia");
        assert_eq!(
            out.spans,
            vec![
                Span { text: "Atlantic City".into(), start: 0, end: 2, labels: labels(&["LOC"]) },
                Span { text: "Georgia".into(), start: 3, end: 4, labels: labels(&["LOC"]) },
            ]
        );
    }

    #[test]
    fn label_accumulation_yields_one_span_with_both_labels() {
        let index = build([("Georgia", "LOC"), ("Georgia", "ORG")]).unwrap();
        let spans = match_tokens(&index, &["Georgia"]).unwrap();

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].labels, labels(&["LOC", "ORG"]));
    }

    #[test]
    fn match_tokens_returns_overlapping_candidates() {
        let candidates = match_tokens(&CITY_INDEX, &["New", "York", "City"]).unwrap();

        let texts: Vec<&str> = candidates.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["New York", "New York City", "York City"]);

        // The reducer settles the first pair ("New York City" wins on word
        // count) and then keeps the re-examined trailing span on its own.
        // Residual overlap in chained neighborhoods is contractual.
        let resolved = resolve(candidates);
        let texts: Vec<&str> = resolved.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["New York City", "York City"]);
    }

    #[test]
    fn empty_tokens_yield_empty_result() {
        let out = lookup(&CITY_INDEX, &[]).unwrap();
        assert!(out.spans.is_empty());
    }

    #[test]
    fn empty_dictionary_yields_empty_result() {
        let index = build(Vec::<(String, String)>::new()).unwrap();
        let out = lookup(&index, &["Atlantic", "City"]).unwrap();
        assert!(out.spans.is_empty());
    }

    #[test]
    fn mid_token_key_never_surfaces() {
        let index = build([("York Cit", "LOC")]).unwrap();
        let spans = match_tokens(&index, &["New", "York", "City"]).unwrap();
        assert!(spans.is_empty());
    }

    #[test]
    fn verbose_details_are_consistent() {
        let out = lookup_verbose(&CITY_INDEX, &["New", "York", "City"]).unwrap();

        assert_eq!(out.elapsed, out.details.total);
        assert!(out.details.scan <= out.details.total);
        assert_eq!(out.details.raw_hits, out.details.candidates.len() + out.details.dropped);
        assert!(out.details.candidates.len() >= out.spans.len());
    }
}
