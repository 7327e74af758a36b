//! Text assembly and highlight resolution for annotated message display
//!
//! The analyzer service reports risk evidence as character spans over a
//! flattened message text. This crate owns both halves of that contract on
//! the client side:
//!
//! - [`assemble_message_text`] rebuilds the exact text the analyzer scanned,
//!   so its offsets line up character for character.
//! - [`resolve_highlights`] and [`segment_text`] turn the analyzer's raw,
//!   possibly overlapping span list into an ordered, gapless run of plain
//!   and marked segments a renderer can display directly.
//!
//! Every function here is pure and total: no I/O, no shared state, no
//! failure path. Malformed spans are filtered out, never surfaced as errors.

pub mod assemble;
pub mod resolve;
pub mod segment;

pub use assemble::assemble_message_text;
pub use resolve::resolve_highlights;
pub use segment::segment_text;

use shared_types::{Segment, TextHighlight};

/// Resolve raw analyzer highlights against `text` and slice it into
/// render-ready segments.
pub fn annotate(text: &str, highlights: &[TextHighlight]) -> Vec<Segment> {
    let char_len = text.chars().count();
    let resolved = resolve_highlights(char_len, highlights);
    segment_text(text, &resolved)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::Segment;

    fn arb_text() -> impl Strategy<Value = String> {
        // Mixed ASCII, multibyte, and newlines, like assembled messages.
        "[a-zA-Z0-9 @.:\\n€é✓-]{0,80}"
    }

    fn arb_highlights() -> impl Strategy<Value = Vec<TextHighlight>> {
        prop::collection::vec(
            (-20.0f64..120.0, -20.0f64..120.0, "[a-z_]{1,12}").prop_map(|(start, end, rule_id)| {
                TextHighlight::new(start, end, &rule_id, "generated")
            }),
            0..12,
        )
    }

    proptest! {
        /// Property: segment texts always concatenate back to the input text.
        #[test]
        fn segments_cover_text_exactly(text in arb_text(), highlights in arb_highlights()) {
            let segments = annotate(&text, &highlights);
            let rebuilt: String = segments.iter().map(Segment::text).collect();
            prop_assert_eq!(rebuilt, text);
        }

        /// Property: resolved spans are sorted and pairwise disjoint.
        #[test]
        fn resolved_spans_disjoint_and_sorted(text in arb_text(), highlights in arb_highlights()) {
            let char_len = text.chars().count();
            let resolved = resolve_highlights(char_len, &highlights);
            for pair in resolved.windows(2) {
                prop_assert!(pair[0].start <= pair[1].start);
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }

        /// Property: every resolved span is in range and non-empty.
        #[test]
        fn resolved_spans_in_range(text in arb_text(), highlights in arb_highlights()) {
            let char_len = text.chars().count();
            for span in resolve_highlights(char_len, &highlights) {
                prop_assert!(span.start < span.end);
                prop_assert!(span.end <= char_len);
            }
        }

        /// Property: no segment is ever empty.
        #[test]
        fn segments_are_never_empty(text in arb_text(), highlights in arb_highlights()) {
            for segment in annotate(&text, &highlights) {
                prop_assert!(!segment.text().is_empty());
            }
        }

        /// Property: resolution is a fixed point; feeding resolved spans
        /// back through changes nothing.
        #[test]
        fn resolution_is_idempotent(text in arb_text(), highlights in arb_highlights()) {
            let char_len = text.chars().count();
            let resolved = resolve_highlights(char_len, &highlights);
            let reraw: Vec<TextHighlight> = resolved
                .iter()
                .map(|r| TextHighlight::new(r.start as f64, r.end as f64, &r.rule_id, &r.label))
                .collect();
            prop_assert_eq!(resolve_highlights(char_len, &reraw), resolved);
        }

        /// Property: marked segments appear in resolved-span order and match
        /// the resolved metadata.
        #[test]
        fn marks_follow_resolved_order(text in arb_text(), highlights in arb_highlights()) {
            let char_len = text.chars().count();
            let resolved = resolve_highlights(char_len, &highlights);
            let segments = segment_text(&text, &resolved);
            let mark_rules: Vec<&str> = segments
                .iter()
                .filter_map(|s| match s {
                    Segment::Mark { rule_id, .. } => Some(rule_id.as_str()),
                    Segment::Plain { .. } => None,
                })
                .collect();
            let resolved_rules: Vec<&str> =
                resolved.iter().map(|r| r.rule_id.as_str()).collect();
            prop_assert_eq!(mark_rules, resolved_rules);
        }
    }
}
