//! Pattern index construction and scanning.
//!
//! This module holds the *static* side of the engine: the structure built
//! once from the full dictionary that makes every subsequent match call a
//! single linear pass.
//!
//! The index has an explicit two-phase lifecycle:
//!
//! 1. **Accumulate** (`insert`): collect `(key, label)` pairs. Keys with
//!    identical text share one entry and accumulate a label set.
//! 2. **Finalize** (`finalize`): compile the accumulated keys into an
//!    Aho-Corasick automaton. After this the index is immutable and can be
//!    shared read-only across threads.
//!
//! Scanning before `finalize`, or inserting after it, is a lifecycle error
//! (`MatchError::NotFinalized` / `MatchError::AlreadyFinalized`). A second
//! `finalize` also errors: the build is the expensive step, and a silent
//! no-op would hide a caller bug.
//!
//! ## Why an automaton
//!
//! The dictionary may hold thousands of keys of arbitrary length, and a scan
//! must surface *every* occurrence, overlapping and nested included. A
//! failure-link automaton does that in one pass over the text; building one
//! matcher per key and rescanning is ruled out by the performance contract.
//! `find_overlapping_iter` reports hits ordered by end offset, which is
//! exactly the order downstream extraction expects.
//!
//! ## Invariants
//!
//! - Pattern id `i` (as reported by the automaton) indexes `entries[i]`.
//!   The entry vector and the automaton's pattern order must stay aligned;
//!   `finalize` builds the automaton directly from `entries` to guarantee it.
//! - `by_key` maps each distinct key text to its entry id. Labels live in
//!   the entry's ordered set, never inside the automaton.

use crate::api::MatchError;
use crate::{PatternEntry, RawMatch};
use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use std::collections::{BTreeSet, HashMap};

/// Multi-pattern dictionary index with an insert/finalize/scan lifecycle.
///
/// Usage:
///
/// ```text
/// new() ──▶ insert()* ──▶ finalize() ──▶ scan()*
///            │                            │
///            └─ accumulating              └─ immutable, shareable
/// ```
#[derive(Debug, Default)]
pub struct PatternIndex {
    /// One entry per distinct key text; position doubles as the pattern id.
    entries: Vec<PatternEntry>,
    /// Key text -> entry id.
    by_key: HashMap<String, usize>,
    /// Compiled automaton; `Some` once finalized.
    automaton: Option<AhoCorasick>,
}

impl PatternIndex {
    /// Create an empty, unfinalized index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return true if the index holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return true once [`finalize`](Self::finalize) has run.
    pub fn is_finalized(&self) -> bool {
        self.automaton.is_some()
    }

    /// Add `label` to the entry for `key`, creating the entry if absent.
    ///
    /// Keys are stored literally (callers supplying file data are expected
    /// to trim; see the gazetteer loader). Re-inserting an existing key
    /// accumulates into its label set and never overwrites.
    pub fn insert(&mut self, key: impl Into<String>, label: impl Into<String>) -> Result<(), MatchError> {
        if self.is_finalized() {
            return Err(MatchError::AlreadyFinalized);
        }

        let key = key.into();
        match self.by_key.get(&key).copied() {
            Some(id) => {
                self.entries[id].labels.insert(label.into());
            }
            None => {
                let id = self.entries.len();
                let mut labels = BTreeSet::new();
                labels.insert(label.into());
                self.entries.push(PatternEntry { key: key.clone(), labels });
                self.by_key.insert(key, id);
            }
        }
        Ok(())
    }

    /// Compile the accumulated keys into the matching automaton.
    ///
    /// `MatchKind::Standard` keeps every hit reportable: overlapping and
    /// nested occurrences must all surface, so the leftmost-longest kinds
    /// (which suppress them) are not an option here.
    pub fn finalize(&mut self) -> Result<(), MatchError> {
        if self.is_finalized() {
            return Err(MatchError::AlreadyFinalized);
        }

        let automaton = AhoCorasickBuilder::new()
            .match_kind(MatchKind::Standard)
            .build(self.entries.iter().map(|e| e.key.as_str()))
            .map_err(|e| MatchError::Compile(e.to_string()))?;

        if std::env::var_os("GAZEX_DEBUG").is_some() {
            eprintln!("[index:finalize] keys={}", self.entries.len());
        }

        self.automaton = Some(automaton);
        Ok(())
    }

    /// Scan `text` and return every occurrence of every key, in order of end
    /// offset, overlapping and nested hits included.
    ///
    /// Scanning an empty text (or an empty dictionary) yields an empty list,
    /// never an error; only an unfinalized index is rejected.
    pub(crate) fn scan(&self, text: &str) -> Result<Vec<RawMatch>, MatchError> {
        let automaton = self.automaton.as_ref().ok_or(MatchError::NotFinalized)?;

        let raw: Vec<RawMatch> = automaton
            .find_overlapping_iter(text)
            .map(|m| RawMatch { end: m.end(), pattern: m.pattern().as_usize() })
            .collect();

        if std::env::var_os("GAZEX_DEBUG").is_some() {
            for m in &raw {
                let key = &self.entries[m.pattern].key;
                eprintln!("[index:scan] hit \"{}\" at {}..{}", key, m.end - key.len(), m.end);
            }
        }

        Ok(raw)
    }

    /// Look up the entry behind a pattern id.
    ///
    /// Pattern ids come from [`scan`](Self::scan) and are always in range
    /// for the index that produced them.
    pub(crate) fn entry(&self, pattern: usize) -> &PatternEntry {
        &self.entries[pattern]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finalized(pairs: &[(&str, &str)]) -> PatternIndex {
        let mut index = PatternIndex::new();
        for (key, label) in pairs {
            index.insert(*key, *label).unwrap();
        }
        index.finalize().unwrap();
        index
    }

    #[test]
    fn scan_before_finalize_errors() {
        let mut index = PatternIndex::new();
        index.insert("Georgia", "LOC").unwrap();
        assert!(matches!(index.scan("Georgia"), Err(MatchError::NotFinalized)));
    }

    #[test]
    fn insert_after_finalize_errors() {
        let mut index = finalized(&[("Georgia", "LOC")]);
        assert!(matches!(index.insert("Atlanta", "LOC"), Err(MatchError::AlreadyFinalized)));
    }

    #[test]
    fn finalize_twice_errors() {
        // Policy: a second finalize fails rather than being a no-op.
        let mut index = finalized(&[("Georgia", "LOC")]);
        assert!(matches!(index.finalize(), Err(MatchError::AlreadyFinalized)));
    }

    #[test]
    fn labels_accumulate_per_key() {
        let mut index = PatternIndex::new();
        index.insert("Georgia", "LOC").unwrap();
        index.insert("Georgia", "ORG").unwrap();
        index.insert("Atlanta", "LOC").unwrap();

        assert_eq!(index.len(), 2);
        index.finalize().unwrap();

        let raw = index.scan("Georgia").unwrap();
        assert_eq!(raw.len(), 1);
        let entry = index.entry(raw[0].pattern);
        let labels: Vec<&str> = entry.labels.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["LOC", "ORG"]);
    }

    #[test]
    fn scan_reports_every_hit_at_its_literal_offset() {
        // Soundness: the key must actually occur at the reported offset.
        let index = finalized(&[("New York", "LOC"), ("York", "LOC"), ("York City", "LOC")]);
        let text = "New York City";
        let raw = index.scan(text).unwrap();

        assert_eq!(raw.len(), 3);
        for m in &raw {
            let key = &index.entry(m.pattern).key;
            assert_eq!(&text[m.end - key.len()..m.end], key.as_str());
        }
    }

    #[test]
    fn scan_emits_overlapping_and_nested_hits_by_end_offset() {
        let index = finalized(&[("New York", "LOC"), ("York", "LOC"), ("York City", "LOC")]);
        let raw = index.scan("New York City").unwrap();

        let hits: Vec<(&str, usize)> =
            raw.iter().map(|m| (index.entry(m.pattern).key.as_str(), m.end)).collect();
        // "York" is nested inside "New York"; "York City" overlaps both.
        assert_eq!(hits, vec![("New York", 8), ("York", 8), ("York City", 13)]);
    }

    #[test]
    fn empty_dictionary_scans_to_nothing() {
        let mut index = PatternIndex::new();
        index.finalize().unwrap();
        assert!(index.scan("anything at all").unwrap().is_empty());
        assert!(index.scan("").unwrap().is_empty());
    }
}
