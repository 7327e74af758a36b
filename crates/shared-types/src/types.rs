//! Verdict and annotation types shared across the workspace
//!
//! These mirror the analyzer service's response contract on one side and
//! feed the annotated-display pipeline on the other. `TextHighlight` is the
//! untrusted wire form; `ResolvedHighlight` and `Segment` are the cleaned
//! artifacts the rendering layer consumes.

use serde::{Deserialize, Serialize};

/// Severity tier assigned by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// Recommended handling for an analyzed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskAction {
    Allow,
    VerifyOutOfBand,
    Report,
    Block,
}

/// Concrete proof of why a rule fired. Offsets index the analyzed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub kind: String,
    pub pattern: String,
    #[serde(rename = "match")]
    pub matched: String,
    pub start: usize,
    pub end: usize,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A detection rule that matched, with its evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleHit {
    pub rule_id: String,
    pub title: String,
    pub weight: u32,
    pub severity: Severity,
    pub action: RiskAction,
    pub explain: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

/// Raw highlight span as supplied by the analyzer.
///
/// Untrusted input: spans may arrive unordered, overlapping, duplicated,
/// fractional, negative, or past the end of the text. Offsets are numeric
/// rather than integral so values fed through a JS boundary survive long
/// enough to be filtered instead of failing to parse. The interval is
/// half-open, `[start, end)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextHighlight {
    pub start: f64,
    pub end: f64,
    pub rule_id: String,
    pub label: String,
}

impl TextHighlight {
    pub fn new(start: f64, end: f64, rule_id: &str, label: &str) -> Self {
        Self {
            start,
            end,
            rule_id: rule_id.to_string(),
            label: label.to_string(),
        }
    }
}

/// A highlight that survived resolution.
///
/// Offsets are character positions into the analyzed text, in range and
/// non-empty; within a resolved set, spans are disjoint and sorted by start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedHighlight {
    pub start: usize,
    pub end: usize,
    pub rule_id: String,
    pub label: String,
}

impl ResolvedHighlight {
    /// Span length in characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// One contiguous slice of the analyzed text, ready for rendering.
///
/// Concatenating the `text` of every segment in order reproduces the
/// analyzed text exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    /// Inert text between highlights.
    Plain { text: String },
    /// Text bound to exactly one resolved highlight.
    Mark {
        text: String,
        rule_id: String,
        label: String,
    },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } => text,
            Segment::Mark { text, .. } => text,
        }
    }

    pub fn is_mark(&self) -> bool {
        matches!(self, Segment::Mark { .. })
    }
}

/// Verdict returned by the analyzer service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Normalized risk score, 0-100.
    pub score: u8,
    pub severity: Severity,
    pub action: RiskAction,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub hits: Vec<RuleHit>,
    #[serde(default)]
    pub highlights: Vec<TextHighlight>,
}

/// Catalog entry describing one analyzer rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSummary {
    pub id: String,
    pub title: String,
    pub weight: u32,
    pub severity: Severity,
    #[serde(default)]
    pub tags: Vec<String>,
}
