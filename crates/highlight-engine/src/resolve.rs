//! Highlight span resolution
//!
//! The analyzer's highlight list is best-effort output: spans may overlap,
//! repeat, arrive out of order, or point outside the text. Resolution cleans
//! the list down to a disjoint, sorted set. Bad spans are dropped rather
//! than reported; the display must render something even from a partially
//! broken payload.

use shared_types::{ResolvedHighlight, TextHighlight};

/// Clamp a raw offset into `[0, limit]`, truncating any fractional part.
fn clamp_offset(value: f64, limit: usize) -> usize {
    if value <= 0.0 {
        0
    } else if value >= limit as f64 {
        limit
    } else {
        value as usize
    }
}

/// Reduce raw analyzer highlights to a disjoint set over a text of
/// `char_len` characters.
///
/// Overlapping spans are grouped into clusters (strict overlap with the
/// cluster's running extent; spans that merely touch stay separate), and
/// each cluster keeps a single representative: its longest member, with the
/// smaller start winning ties. The result is sorted by start, then end.
pub fn resolve_highlights(char_len: usize, raw: &[TextHighlight]) -> Vec<ResolvedHighlight> {
    let mut candidates: Vec<ResolvedHighlight> = raw
        .iter()
        .filter(|h| h.start.is_finite() && h.end.is_finite())
        .filter_map(|h| {
            let start = clamp_offset(h.start, char_len);
            let end = clamp_offset(h.end, char_len);
            (start < end && start < char_len).then(|| ResolvedHighlight {
                start,
                end,
                rule_id: h.rule_id.clone(),
                label: h.label.clone(),
            })
        })
        .collect();

    // Start ascending, longer span first on ties. The cluster scan below
    // relies on this order, and it makes the output independent of input
    // order. Vec::sort_by is stable.
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut candidates = candidates.into_iter();
    let Some(first) = candidates.next() else {
        return Vec::new();
    };

    let mut resolved: Vec<ResolvedHighlight> = Vec::new();
    let mut cluster_end = first.end;
    let mut best = first;
    for candidate in candidates {
        if candidate.start < cluster_end {
            // Overlaps the cluster's running extent; extend and keep the
            // longest member. The sort order guarantees the first member of
            // equal length has the smaller start.
            cluster_end = cluster_end.max(candidate.end);
            if candidate.len() > best.len() {
                best = candidate;
            }
        } else {
            resolved.push(best);
            cluster_end = candidate.end;
            best = candidate;
        }
    }
    resolved.push(best);

    resolved.sort_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)));
    resolved
}
