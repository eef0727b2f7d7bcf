//! BILOU tagging-scheme encoding.
//!
//! Downstream sequence-tagging consumers want one tag per token rather than
//! a span list. This module renders a *resolved* span list in the BILOU
//! notation:
//!
//! ```text
//! tokens: Atlantic  City      of   Georgia
//! spans:  [Atlantic City]LOC       [Georgia]LOC
//! tags:   B-LOC     L-LOC     O    U-LOC
//! ```
//!
//! - `U-<label>` marks a single-token span, `B-`/`I-`/`L-` the beginning,
//!   inside and last token of a multi-token span, `O` everything uncovered.
//! - A span's label set may hold several labels but a tag carries one; the
//!   lexicographically first label is used (label sets are ordered, so this
//!   is deterministic).
//! - The input is expected to be conflict-free (the output of
//!   [`resolve`](crate::resolve)); if overlapping spans are passed anyway,
//!   later spans overwrite the tags of earlier ones.

use crate::api::Span;

/// Render `spans` over a sequence of `token_count` tokens as BILOU tags.
///
/// Spans that do not fit inside the token sequence are ignored: they cannot
/// have come from the sequence being tagged.
pub fn to_bilou(token_count: usize, spans: &[Span]) -> Vec<String> {
    let mut tags = vec!["O".to_string(); token_count];

    for span in spans {
        if span.start >= span.end || span.end > token_count {
            continue;
        }
        let Some(label) = span.labels.iter().next() else {
            continue;
        };

        if span.end - span.start == 1 {
            tags[span.start] = format!("U-{label}");
        } else {
            tags[span.start] = format!("B-{label}");
            for tag in &mut tags[span.start + 1..span.end - 1] {
                *tag = format!("I-{label}");
            }
            tags[span.end - 1] = format!("L-{label}");
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn span(text: &str, start: usize, end: usize, labels: &[&str]) -> Span {
        Span {
            text: text.to_string(),
            start,
            end,
            labels: labels.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn uncovered_tokens_are_outside() {
        assert_eq!(to_bilou(3, &[]), vec!["O", "O", "O"]);
    }

    #[test]
    fn single_token_span_is_a_unit() {
        let tags = to_bilou(4, &[span("Georgia", 3, 4, &["LOC"])]);
        assert_eq!(tags, vec!["O", "O", "O", "U-LOC"]);
    }

    #[test]
    fn multi_token_span_gets_begin_inside_last() {
        let tags = to_bilou(4, &[span("New York City", 0, 3, &["LOC"])]);
        assert_eq!(tags, vec!["B-LOC", "I-LOC", "L-LOC", "O"]);
    }

    #[test]
    fn multi_label_span_uses_first_label_in_order() {
        let tags = to_bilou(1, &[span("Georgia", 0, 1, &["ORG", "LOC"])]);
        assert_eq!(tags, vec!["U-LOC"]);
    }

    #[test]
    fn out_of_range_span_is_ignored() {
        let tags = to_bilou(2, &[span("New York City", 0, 3, &["LOC"])]);
        assert_eq!(tags, vec!["O", "O"]);
    }

    #[test]
    fn encodes_a_resolved_lookup() {
        let index = crate::build([("Atlantic City", "LOC"), ("Georgia", "LOC")]).unwrap();
        let tokens = ["Atlantic", "City", "of", "Georgia"];
        let out = crate::lookup(&index, &tokens).unwrap();

        let tags = to_bilou(tokens.len(), &out.spans);
        assert_eq!(tags, vec!["B-LOC", "L-LOC", "O", "U-LOC"]);
    }
}
