mod api;
mod encoding;
mod engine;
mod gazetteer;

pub use api::{
    LookupDetails, LookupResult, LookupResultVerbose, MatchError, PatternIndex, Span, build, lookup,
    lookup_verbose, match_tokens, resolve,
};
pub use encoding::to_bilou;
pub use gazetteer::read_gazetteers;

use std::collections::BTreeSet;

// --- Internal types ---------------------------------------------------------

/// One dictionary entry: a key's literal text plus every label it has been
/// inserted under. At most one `PatternEntry` exists per distinct key text;
/// labels accumulate across insertions and are never overwritten.
///
/// `labels` is an ordered set so that label iteration, set equality and the
/// BILOU tie-break stay deterministic regardless of insertion order.
#[derive(Debug, Clone)]
pub(crate) struct PatternEntry {
    pub key: String,
    pub labels: BTreeSet<String>,
}

/// A raw automaton hit, before token-boundary validation.
///
/// `pattern` indexes the side-table of [`PatternEntry`]s owned by the
/// `PatternIndex` that produced the match; the matched key text and its label
/// set are looked up there rather than carried inline.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RawMatch {
    /// End byte offset (exclusive) of the hit in the scanned text.
    pub end: usize,
    /// Pattern id: index into the owning index's entry table.
    pub pattern: usize,
}
