//! Matching and resolution engine.
//!
//! This module is the *internal entry point* for the gazetteer matcher. The
//! public API in `src/api.rs` re-exports the pieces callers interact with,
//! while the pipeline itself is split into focused submodules under
//! `src/engine/`.
//!
//! ## How the parts work together
//!
//! At a high level, matching a token sequence is a pipeline:
//!
//! ```text
//! (key, label) pairs ──┐
//!                      │  PatternIndex::insert + finalize   (index.rs)
//!                      └──────────────┬─────────────────────
//!                                     │
//! tokens ── TokenOffsetTable::new ────┼─ joined text + offset tables
//!          (offsets.rs)               │
//!                                     v
//!                         PatternIndex::scan (index.rs)
//!                           - one linear automaton pass
//!                           - every hit, overlapping + nested
//!                                     │
//!                                     v
//!                         TokenOffsetTable::extract (offsets.rs)
//!                           - drop hits that cross token boundaries
//!                           - map byte offsets -> token indices
//!                                     │
//!                                     v
//!                         resolve_overlaps (resolve.rs)
//!                           - local-window overlap reduction
//!                           - order-preserving dedup
//!                                     │
//!                                     v
//!                               Vec<Span>
//! ```
//!
//! The index is built once per dictionary and reused across many token
//! sequences; everything after the first arrow is per-call state owned by
//! that call alone.
//!
//! ## Responsibilities by module
//!
//! - `index.rs`: the insert/finalize/scan lifecycle over the Aho-Corasick
//!   automaton, plus the label side-table keyed by pattern id.
//! - `offsets.rs`: token/byte offset reconciliation and boundary-aligned
//!   span extraction.
//! - `resolve.rs`: the overlapping-span reducer and final deduplication.
//! - `metrics.rs`: optional timing data for runs.
//!
//! ## Concurrency
//!
//! A finalized `PatternIndex` is immutable; sharing it read-only across
//! threads is safe. `TokenOffsetTable` and the match lists are transient and
//! owned by a single call, so no locking exists anywhere in the engine.
//!
//! ## Debugging
//!
//! Set `GAZEX_DEBUG=1` to print scan, extraction and resolution traces.

#[path = "engine/index.rs"]
pub(crate) mod index;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/offsets.rs"]
pub(crate) mod offsets;
#[path = "engine/resolve.rs"]
pub(crate) mod resolve;

#[allow(unused_imports)]
pub(crate) use index::PatternIndex;
#[allow(unused_imports)]
pub(crate) use metrics::{RunMetrics, RunResult};
#[allow(unused_imports)]
pub(crate) use offsets::TokenOffsetTable;
#[allow(unused_imports)]
pub(crate) use resolve::resolve_overlaps;

use crate::api::MatchError;
use std::time::Instant;

/// Run the full pipeline for one token sequence and time each stage.
///
/// This is the one place the stages are glued together; the public API
/// wrappers in `api.rs` all funnel through here or reuse its pieces.
pub(crate) fn run_with_metrics(index: &PatternIndex, tokens: &[&str]) -> Result<RunResult, MatchError> {
    let total_start = Instant::now();
    let table = TokenOffsetTable::new(tokens);

    let scan_start = Instant::now();
    let raw = index.scan(table.text())?;
    let scan = scan_start.elapsed();

    let extract_start = Instant::now();
    let candidates = table.extract(index, &raw);
    let extract = extract_start.elapsed();

    let resolve_start = Instant::now();
    let spans = resolve_overlaps(candidates.clone());
    let resolve = resolve_start.elapsed();

    Ok(RunResult {
        raw_hits: raw.len(),
        dropped: raw.len() - candidates.len(),
        candidates,
        spans,
        metrics: RunMetrics { total: total_start.elapsed(), scan, extract, resolve },
    })
}
