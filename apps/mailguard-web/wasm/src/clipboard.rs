//! Clipboard export
//!
//! Builds the plain-text report summary users paste into tickets or chat,
//! and writes it to the system clipboard via the async Clipboard API.

use shared_types::AnalyzeResponse;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::report_panel::{action_name, severity_name};

/// Build the plain-text summary for a verdict.
pub fn report_summary_text(verdict: &AnalyzeResponse) -> String {
    let mut lines = vec![
        format!("Risk score: {}/100", verdict.score),
        format!("Severity: {}", severity_name(verdict.severity)),
        format!("Recommended action: {}", action_name(verdict.action)),
    ];

    if !verdict.recommendations.is_empty() {
        lines.push(format!("Next steps: {}", verdict.recommendations.join(", ")));
    }

    if !verdict.hits.is_empty() {
        lines.push("Findings:".to_string());
        for hit in &verdict.hits {
            lines.push(format!("- {} [{}]", hit.title, hit.rule_id));
        }
    }

    lines.join("\n")
}

/// JSON-in variant of [`report_summary_text`] for the page.
#[wasm_bindgen(js_name = reportSummaryText)]
pub fn report_summary_text_wasm(verdict_json: &str) -> Result<String, JsValue> {
    let verdict: AnalyzeResponse = serde_json::from_str(verdict_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse verdict: {}", e)))?;
    Ok(report_summary_text(&verdict))
}

/// Write text to the system clipboard.
#[wasm_bindgen(js_name = copyTextToClipboard)]
pub async fn copy_text_to_clipboard(text: String) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let clipboard = window.navigator().clipboard();
    JsFuture::from(clipboard.write_text(&text)).await?;
    Ok(())
}
