//! Engine run metrics.
//!
//! A small set of structs used to observe where a lookup call spends its
//! time. Metrics are intentionally simple and *opt-in*:
//!
//! - `lookup` runs the pipeline and reports only the total.
//! - `lookup_verbose` surfaces the per-stage breakdown collected here, plus
//!   the pre-resolution candidate list.
//!
//! The pipeline is deterministic and in-memory, so these numbers exist for
//! profiling and regression hunting, not for correctness.

use crate::api::Span;
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

/// Per-stage timings for one lookup call.
#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for the call.
    pub total: Duration,
    /// Time spent in the automaton pass over the joined text.
    pub scan: Duration,
    /// Time spent validating hits against token boundaries.
    pub extract: Duration,
    /// Time spent reducing overlaps and deduplicating.
    pub resolve: Duration,
}

/// Pipeline output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Resolved, conflict-free spans (the call's result).
    pub spans: Vec<Span>,
    /// Token-aligned spans before overlap resolution.
    pub candidates: Vec<Span>,
    /// Raw automaton hits, including the misaligned ones.
    pub raw_hits: usize,
    /// Hits discarded for crossing a token boundary.
    pub dropped: usize,
    /// Timing measurements for the run.
    pub metrics: RunMetrics,
}
