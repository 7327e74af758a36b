//! Segment emission
//!
//! Walks the resolved highlight set with a cursor and slices the analyzed
//! text into an ordered, gapless run of plain and marked segments. Offsets
//! are character positions (the analyzer derives them from character
//! indexing), so slicing goes through a char-boundary table rather than
//! byte offsets, which would split multi-byte characters.

use shared_types::{ResolvedHighlight, Segment};

/// Byte offset of every char boundary, including the end of the text.
fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(byte, _)| byte)
        .chain([text.len()])
        .collect()
}

/// Slice the text into segments covering it exactly, in order.
///
/// Each resolved highlight becomes one marked segment; the text between and
/// around highlights becomes plain segments. With no highlights the whole
/// text is a single plain segment; empty text yields no segments. Spans
/// that fall outside the text or behind the cursor are skipped, so the
/// covering property holds for any input.
pub fn segment_text(text: &str, resolved: &[ResolvedHighlight]) -> Vec<Segment> {
    let boundaries = char_boundaries(text);
    let char_len = boundaries.len() - 1;
    let slice = |from: usize, to: usize| text[boundaries[from]..boundaries[to]].to_string();

    let mut segments = Vec::new();
    let mut cursor = 0usize;
    for highlight in resolved {
        if highlight.start < cursor || highlight.end > char_len || highlight.is_empty() {
            continue;
        }
        if cursor < highlight.start {
            segments.push(Segment::Plain {
                text: slice(cursor, highlight.start),
            });
        }
        segments.push(Segment::Mark {
            text: slice(highlight.start, highlight.end),
            rule_id: highlight.rule_id.clone(),
            label: highlight.label.clone(),
        });
        cursor = highlight.end;
    }
    if cursor < char_len {
        segments.push(Segment::Plain {
            text: slice(cursor, char_len),
        });
    }
    segments
}
