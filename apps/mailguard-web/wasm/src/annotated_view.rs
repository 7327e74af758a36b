//! Annotated message rendering
//!
//! Turns the analyzed text plus the analyzer's raw highlight list into the
//! marked-up view: segments from the resolution engine, rendered either as
//! an HTML string or directly into a container element. Marked segments
//! become `<mark>` elements carrying the rule id and a tooltip label; the
//! renderer never re-derives offsets.

use highlight_engine::annotate;
use shared_types::{Segment, TextHighlight};
use wasm_bindgen::prelude::*;
use web_sys::Document;

/// Escape text for inclusion in HTML content or attribute values.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[wasm_bindgen]
pub struct AnnotatedView {
    text: String,
    segments: Vec<Segment>,
}

impl AnnotatedView {
    /// Build the view by resolving `highlights` against `text`.
    pub fn from_parts(text: &str, highlights: &[TextHighlight]) -> Self {
        Self {
            text: text.to_string(),
            segments: annotate(text, highlights),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

// WASM bindings
#[wasm_bindgen]
impl AnnotatedView {
    #[wasm_bindgen(constructor)]
    pub fn new(text: &str, highlights_json: &str) -> Result<AnnotatedView, JsValue> {
        let highlights: Vec<TextHighlight> = serde_json::from_str(highlights_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse highlights: {}", e)))?;
        Ok(Self::from_parts(text, &highlights))
    }

    #[wasm_bindgen(js_name = segmentCount)]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    #[wasm_bindgen(js_name = markedCount)]
    pub fn marked_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_mark()).count()
    }

    #[wasm_bindgen(js_name = getSegmentsJson)]
    pub fn get_segments_json(&self) -> String {
        serde_json::to_string(&self.segments).unwrap_or_default()
    }

    /// Render the segments as an HTML string. All message text is escaped,
    /// so analyzer payloads cannot inject markup into the page.
    #[wasm_bindgen(js_name = toHtml)]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => html.push_str(&escape_html(text)),
                Segment::Mark {
                    text,
                    rule_id,
                    label,
                } => {
                    html.push_str(&format!(
                        r#"<mark class="risk-mark" data-rule-id="{}" title="{}">{}</mark>"#,
                        escape_html(rule_id),
                        escape_html(label),
                        escape_html(text),
                    ));
                }
            }
        }
        html
    }

    /// Render the segments into the element with the given id, replacing
    /// its current children.
    ///
    /// # Errors
    /// Returns JsValue error if the document or target element is missing.
    #[wasm_bindgen(js_name = renderInto)]
    pub fn render_into(&self, element_id: &str) -> Result<(), JsValue> {
        let document = document()?;
        let container = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from_str(&format!("No element with id '{}'", element_id)))?;

        container.set_inner_html("");
        for segment in &self.segments {
            match segment {
                Segment::Plain { text } => {
                    let node = document.create_text_node(text);
                    container.append_child(node.as_ref())?;
                }
                Segment::Mark {
                    text,
                    rule_id,
                    label,
                } => {
                    let mark = document.create_element("mark")?;
                    mark.set_class_name("risk-mark");
                    mark.set_attribute("data-rule-id", rule_id)?;
                    mark.set_attribute("title", label)?;
                    mark.set_text_content(Some(text));
                    container.append_child(mark.as_ref())?;
                }
            }
        }
        Ok(())
    }
}

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("No window object available"))?
        .document()
        .ok_or_else(|| JsValue::from_str("No document object available"))
}
