use wasm_bindgen::prelude::*;

// Export modules
pub mod analyzer_client;
pub mod annotated_view;
pub mod clipboard;
pub mod compose;
pub mod report_panel;

// Re-export commonly used items
pub use analyzer_client::AnalyzerClient;
pub use annotated_view::AnnotatedView;
pub use clipboard::{copy_text_to_clipboard, report_summary_text};
pub use compose::MessageForm;
pub use report_panel::{HitItem, ReportPanel};

/// Surface Rust panics in the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// WASM entry point: resolve raw analyzer highlights against `text` and
/// return the segment list as JSON.
#[wasm_bindgen]
pub fn annotate_text_wasm(text: &str, highlights_json: &str) -> Result<String, JsValue> {
    let highlights: Vec<shared_types::TextHighlight> = serde_json::from_str(highlights_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse highlights: {}", e)))?;

    let segments = highlight_engine::annotate(text, &highlights);

    serde_json::to_string(&segments)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize segments: {}", e)))
}

/// WASM entry point: rebuild the analyzed text from a request payload.
#[wasm_bindgen]
pub fn assemble_text_wasm(request_json: &str) -> Result<String, JsValue> {
    let request: shared_types::AnalyzeRequest = serde_json::from_str(request_json)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse request: {}", e)))?;

    Ok(highlight_engine::assemble_message_text(&request))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotate_entry_point() {
        let highlights = r#"[{"start":0,"end":4,"rule_id":"r1","label":"L"}]"#;
        let json = annotate_text_wasm("ABCDEFGH", highlights).unwrap();
        let segments: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(segments[0]["kind"], "mark");
        assert_eq!(segments[0]["text"], "ABCD");
        assert_eq!(segments[1]["kind"], "plain");
        assert_eq!(segments[1]["text"], "EFGH");
    }

    #[test]
    fn test_annotate_entry_point_rejects_bad_json() {
        assert!(annotate_text_wasm("text", "[{broken").is_err());
    }

    #[test]
    fn test_assemble_entry_point() {
        let request = r#"{"subject":"Hi","body":"There"}"#;
        assert_eq!(
            assemble_text_wasm(request).unwrap(),
            "Subject: Hi\nBody:\nThere"
        );
    }
}
