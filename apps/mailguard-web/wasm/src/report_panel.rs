//! Verdict panel state
//!
//! Holds the analyzer's last verdict for the results sidebar: score and
//! action summary, severity counts, and selection of individual findings
//! so the page can show a finding's evidence next to the annotated text.

use serde::{Deserialize, Serialize};
use shared_types::{AnalyzeResponse, RiskAction, RuleHit, Severity};
use wasm_bindgen::prelude::*;

/// Display name for a severity tier.
pub fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Low => "low",
        Severity::Medium => "medium",
        Severity::High => "high",
    }
}

/// Display name for a recommended action.
pub fn action_name(action: RiskAction) -> &'static str {
    match action {
        RiskAction::Allow => "allow",
        RiskAction::VerifyOutOfBand => "verify_out_of_band",
        RiskAction::Report => "report",
        RiskAction::Block => "block",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitItem {
    pub id: String,
    pub hit: RuleHit,
    pub is_selected: bool,
}

#[wasm_bindgen]
#[derive(Default)]
pub struct ReportPanel {
    verdict: Option<AnalyzeResponse>,
    hits: Vec<HitItem>,
    selected_id: Option<String>,
}

impl ReportPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_verdict(&mut self, verdict: AnalyzeResponse) {
        self.hits = verdict
            .hits
            .iter()
            .enumerate()
            .map(|(idx, hit)| HitItem {
                id: format!("hit-{}", idx),
                hit: hit.clone(),
                is_selected: false,
            })
            .collect();
        self.selected_id = None;
        self.verdict = Some(verdict);
    }

    pub fn verdict(&self) -> Option<&AnalyzeResponse> {
        self.verdict.as_ref()
    }

    pub fn hits(&self) -> Vec<&RuleHit> {
        self.hits.iter().map(|item| &item.hit).collect()
    }

    pub fn count_by_severity(&self, severity: Severity) -> usize {
        self.hits
            .iter()
            .filter(|item| item.hit.severity == severity)
            .count()
    }

    pub fn select_hit(&mut self, id: &str) {
        // Clear previous selection
        for item in &mut self.hits {
            item.is_selected = false;
        }

        // Set new selection
        if let Some(item) = self.hits.iter_mut().find(|item| item.id == id) {
            item.is_selected = true;
            self.selected_id = Some(id.to_string());
        } else {
            self.selected_id = None;
        }
    }

    pub fn get_selected(&self) -> Option<&HitItem> {
        self.selected_id
            .as_ref()
            .and_then(|id| self.hits.iter().find(|item| &item.id == id))
    }
}

// WASM bindings
#[wasm_bindgen]
impl ReportPanel {
    #[wasm_bindgen(constructor)]
    pub fn new_wasm() -> Self {
        Self::new()
    }

    /// Load a verdict from its JSON form.
    #[wasm_bindgen(js_name = loadVerdict)]
    pub fn load_verdict(&mut self, verdict_json: &str) -> Result<(), JsValue> {
        let verdict: AnalyzeResponse = serde_json::from_str(verdict_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse verdict: {}", e)))?;
        self.set_verdict(verdict);
        Ok(())
    }

    #[wasm_bindgen(js_name = hasVerdict)]
    pub fn has_verdict(&self) -> bool {
        self.verdict.is_some()
    }

    /// Risk score 0-100; 0 when no verdict is loaded.
    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u8 {
        self.verdict.as_ref().map_or(0, |v| v.score)
    }

    #[wasm_bindgen(js_name = getSeverity)]
    pub fn get_severity(&self) -> String {
        self.verdict
            .as_ref()
            .map_or(String::new(), |v| severity_name(v.severity).to_string())
    }

    #[wasm_bindgen(js_name = getAction)]
    pub fn get_action(&self) -> String {
        self.verdict
            .as_ref()
            .map_or(String::new(), |v| action_name(v.action).to_string())
    }

    #[wasm_bindgen(js_name = getRecommendationsJson)]
    pub fn get_recommendations_json(&self) -> String {
        let recommendations = self
            .verdict
            .as_ref()
            .map(|v| v.recommendations.clone())
            .unwrap_or_default();
        serde_json::to_string(&recommendations).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getHitsJson)]
    pub fn get_hits_json(&self) -> String {
        serde_json::to_string(&self.hits).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = hitCount)]
    pub fn hit_count(&self) -> usize {
        self.hits.len()
    }

    #[wasm_bindgen(js_name = getHighCount)]
    pub fn get_high_count(&self) -> u32 {
        self.count_by_severity(Severity::High) as u32
    }

    #[wasm_bindgen(js_name = getMediumCount)]
    pub fn get_medium_count(&self) -> u32 {
        self.count_by_severity(Severity::Medium) as u32
    }

    #[wasm_bindgen(js_name = getLowCount)]
    pub fn get_low_count(&self) -> u32 {
        self.count_by_severity(Severity::Low) as u32
    }

    #[wasm_bindgen(js_name = selectHit)]
    pub fn select_hit_wasm(&mut self, id: &str) {
        self.select_hit(id);
    }

    #[wasm_bindgen(js_name = getSelectedJson)]
    pub fn get_selected_json(&self) -> Option<String> {
        self.get_selected()
            .and_then(|item| serde_json::to_string(item).ok())
    }

    pub fn clear(&mut self) {
        self.verdict = None;
        self.hits.clear();
        self.selected_id = None;
    }
}
