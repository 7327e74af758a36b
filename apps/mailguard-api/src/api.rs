//! API handlers for the MailGuard proxy server
//!
//! Provides REST endpoints for:
//! - Liveness checks
//! - Analyzer rule catalog forwarding
//! - Message text preview
//! - Analysis with annotated-view enrichment

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{debug, info};

use highlight_engine::{annotate, assemble_message_text};
use shared_types::{AnalyzeRequest, RiskAction, RuleHit, RuleSummary, Segment, Severity};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "mailguard-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Rule catalog response
#[derive(Serialize)]
pub struct RulesResponse {
    pub success: bool,
    pub rules: Vec<RuleSummary>,
    pub count: usize,
}

/// Handler: GET /api/rules
pub async fn handle_list_rules(
    State(state): State<AppState>,
) -> Result<Json<RulesResponse>, ServerError> {
    let rules = state.analyzer.list_rules().await?;
    let count = rules.len();

    Ok(Json(RulesResponse {
        success: true,
        rules,
        count,
    }))
}

/// Preview response: the text the analyzer will scan
#[derive(Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub text: String,
    pub char_count: usize,
}

/// Handler: POST /api/preview
///
/// Rebuilds the analyzed text from the submitted fields without contacting
/// the analyzer, so the frontend can show exactly what will be scanned.
pub async fn handle_preview(Json(request): Json<AnalyzeRequest>) -> Json<PreviewResponse> {
    let text = assemble_message_text(&request);
    let char_count = text.chars().count();

    Json(PreviewResponse {
        success: true,
        text,
        char_count,
    })
}

/// Analysis response: the analyzer's verdict plus the annotated view
#[derive(Serialize)]
pub struct AnalyzeApiResponse {
    pub success: bool,
    /// Normalized risk score, 0-100
    pub score: u8,
    pub severity: Severity,
    pub action: RiskAction,
    pub recommendations: Vec<String>,
    pub hits: Vec<RuleHit>,
    /// The text the offsets refer to
    pub text: String,
    /// Ordered, gapless segments covering `text`
    pub segments: Vec<Segment>,
    /// Number of marked segments after resolution
    pub marked_count: usize,
    /// Unix timestamp of this check
    pub checked_at: u64,
}

/// Handler: POST /api/analyze
///
/// Validates the request, forwards it to the analyzer, and enriches the
/// verdict with the reassembled text and the resolved segment list so the
/// frontend renders highlights without re-deriving offsets.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeApiResponse>, ServerError> {
    info!(
        "Analyze request: attachments={}, has_body={}",
        request.attachments.len(),
        request.body.is_some()
    );

    request.validate()?;

    let verdict = state.analyzer.analyze(&request).await?;
    debug!(
        "Analyzer verdict: score={}, hits={}, highlights={}",
        verdict.score,
        verdict.hits.len(),
        verdict.highlights.len()
    );

    let text = assemble_message_text(&request);
    let segments = annotate(&text, &verdict.highlights);
    let marked_count = segments.iter().filter(|s| s.is_mark()).count();

    Ok(Json(AnalyzeApiResponse {
        success: true,
        score: verdict.score,
        severity: verdict.severity,
        action: verdict.action,
        recommendations: verdict.recommendations,
        hits: verdict.hits,
        text,
        segments,
        marked_count,
        checked_at: chrono::Utc::now().timestamp() as u64,
    }))
}
