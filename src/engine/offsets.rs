//! Token/byte offset reconciliation and span extraction.
//!
//! The automaton scans a single joined string, but callers think in token
//! indices. This module builds the bridge for one token sequence:
//!
//! - the **joined text**: tokens concatenated with exactly one ASCII space
//!   between consecutive tokens (no leading/trailing space);
//! - two inverse lookup tables: byte offset where a token starts -> token
//!   index, and byte offset just past a token's last byte -> token index.
//!
//! A raw hit survives extraction only if its start offset lands exactly on a
//! token start *and* its end offset lands exactly on a token end. Anything
//! else started or ended mid-token (or inside a separator) and is dropped
//! silently: partial-token matches are expected, common, and never surfaced
//! (they are not an error condition).
//!
//! ## Design notes
//!
//! - Offsets are byte offsets into the joined text. Both the table and the
//!   automaton measure in bytes, so multi-byte tokens line up for free.
//! - The table is per-call state: built fresh for each token sequence, owned
//!   by that call, discarded after extraction. Nothing here is shared.

use crate::api::Span;
use crate::{RawMatch, engine::index::PatternIndex};
use std::collections::HashMap;

/// Bidirectional token/byte offset map for one token sequence.
#[derive(Debug)]
pub(crate) struct TokenOffsetTable {
    /// Tokens joined with single spaces; the string the automaton scans.
    text: String,
    /// Byte offset where a token begins -> token index.
    token_at_start: HashMap<usize, usize>,
    /// Byte offset just past a token's last byte -> token index.
    token_at_end: HashMap<usize, usize>,
}

impl TokenOffsetTable {
    /// Build the joined text and both offset tables.
    ///
    /// ```text
    /// tokens: ["New", "York", "City"]
    /// text:    New York City
    ///          ^0  ^4   ^9        token_at_start: {0:0, 4:1, 9:2}
    ///            ^3   ^8    ^13   token_at_end:   {3:0, 8:1, 13:2}
    /// ```
    pub fn new(tokens: &[&str]) -> Self {
        let mut text = String::new();
        let mut token_at_start = HashMap::with_capacity(tokens.len());
        let mut token_at_end = HashMap::with_capacity(tokens.len());

        let mut offset = 0;
        for (i, token) in tokens.iter().enumerate() {
            if i > 0 {
                text.push(' ');
                offset += 1;
            }
            token_at_start.insert(offset, i);
            offset += token.len();
            token_at_end.insert(offset, i);
            text.push_str(token);
        }

        TokenOffsetTable { text, token_at_start, token_at_end }
    }

    /// The joined text this table was built from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Translate raw hits into token-aligned [`Span`]s, preserving raw-match
    /// order (left-to-right by end offset) among survivors.
    ///
    /// Each hit's start offset is recovered as `end - key.len()`; both ends
    /// must map onto token boundaries or the hit is discarded.
    pub fn extract(&self, index: &PatternIndex, raw: &[RawMatch]) -> Vec<Span> {
        let debug = std::env::var_os("GAZEX_DEBUG").is_some();
        let mut spans = Vec::new();

        for m in raw {
            let entry = index.entry(m.pattern);
            let start = m.end - entry.key.len();

            match (self.token_at_start.get(&start), self.token_at_end.get(&m.end)) {
                (Some(&first), Some(&last)) => {
                    spans.push(Span {
                        text: entry.key.clone(),
                        start: first,
                        end: last + 1,
                        labels: entry.labels.clone(),
                    });
                }
                _ => {
                    if debug {
                        eprintln!("[offsets:extract] misaligned \"{}\" at {}..{}, dropped", entry.key, start, m.end);
                    }
                }
            }
        }

        spans
    }
}
