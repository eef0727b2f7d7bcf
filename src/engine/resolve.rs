//! Overlapping-span resolution.
//!
//! Extraction produces spans in left-to-right order (by end offset), and
//! those spans may overlap: "New York" and "York City" both survive when the
//! dictionary holds both. This module reduces that list to a conflict-free
//! one and deduplicates it.
//!
//! ## The reduction
//!
//! A cursor walks the list inspecting a local window of up to three spans:
//! the current span, the next one, and the one after:
//!
//! ```text
//! ... [current] [next] [after] ...
//!       │
//!       ├─ current/next disjoint            -> keep current, advance 1
//!       ├─ next/after disjoint              -> keep current + after,
//!       │                                      drop next, advance 2
//!       │                                      (after is revisited)
//!       └─ both pairs overlap               -> keep the wider (by word
//!                                              count; tie -> first seen)
//!                                              of current/next, advance 2
//! ```
//!
//! With no third span the current/next pair is settled the same way; a lone
//! trailing span is kept. A loser that was already accumulated in an earlier
//! window is removed again. After the walk, the kept list is deduplicated by
//! full `(text, start, end, labels)` equality, preserving first occurrence.
//!
//! This is a *heuristic, local* reducer, deliberately so. It only ever
//! resolves 2- and 3-span neighborhoods, never re-examines a settled region,
//! and does not guarantee zero residual overlap when four or more spans
//! chain with staggered overlaps. That behavior is part of the contract and
//! is pinned by the tests below; a globally optimal interval scheduler would
//! be a redesign, not a fix.
//!
//! Ties are broken by explicit sequence position (the earlier span wins),
//! never by container iteration order.

use crate::api::Span;

/// Two ordered spans conflict when the earlier one runs past the start of
/// the later one and they are not identical. Exact duplicates are not a
/// conflict; the final dedup collapses them instead.
fn overlaps(earlier: &Span, later: &Span) -> bool {
    earlier.end > later.start && earlier != later
}

/// Word count of the span's matched text; the tie-break metric.
fn width(span: &Span) -> usize {
    span.text.split_whitespace().count()
}

/// Settle an overlapping pair: keep the wider span (tie -> `first`, the one
/// encountered earlier), and evict the loser if an earlier window already
/// accumulated it.
fn keep_wider(kept: &mut Vec<Span>, first: &Span, second: &Span) {
    let (winner, loser) = if width(second) > width(first) { (second, first) } else { (first, second) };

    kept.push(winner.clone());
    if let Some(pos) = kept.iter().position(|s| s == loser) {
        kept.remove(pos);
    }
}

/// Reduce a left-to-right-ordered span list to a conflict-free,
/// deduplicated one. Already-resolved input comes back unchanged.
pub(crate) fn resolve_overlaps(spans: Vec<Span>) -> Vec<Span> {
    let debug = std::env::var_os("GAZEX_DEBUG").is_some();
    let mut kept: Vec<Span> = Vec::new();
    let mut cursor = 0;

    while cursor < spans.len() {
        let current = &spans[cursor];
        let next = spans.get(cursor + 1);
        let after = spans.get(cursor + 2);

        match (next, after) {
            (Some(next), Some(after)) => {
                if !overlaps(current, next) {
                    kept.push(current.clone());
                    cursor += 1;
                } else if !overlaps(next, after) {
                    // next is wedged between two keepers: drop it. The
                    // cursor lands on after, which gets re-examined with its
                    // own neighborhood; the dedup pass absorbs the repeat.
                    if debug {
                        eprintln!("[resolve] dropping wedged \"{}\" {}..{}", next.text, next.start, next.end);
                    }
                    kept.push(current.clone());
                    kept.push(after.clone());
                    cursor += 2;
                } else {
                    keep_wider(&mut kept, current, next);
                    cursor += 2;
                }
            }
            (Some(next), None) => {
                if overlaps(current, next) {
                    keep_wider(&mut kept, current, next);
                } else {
                    kept.push(current.clone());
                    kept.push(next.clone());
                }
                cursor += 2;
            }
            _ => {
                kept.push(current.clone());
                cursor += 1;
            }
        }
    }

    dedup(kept)
}

/// Order-preserving dedup by full span equality. Linear scan on purpose:
/// first-occurrence order must survive, and resolved lists are small.
fn dedup(spans: Vec<Span>) -> Vec<Span> {
    let mut out: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if !out.contains(&span) {
            out.push(span);
        }
    }
    out
}
