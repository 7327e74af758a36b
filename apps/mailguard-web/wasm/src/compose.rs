//! Message form state
//!
//! Holds the fields of the message being composed for analysis and builds
//! the request payload. Empty strings clear a field, so wiring an input's
//! change event straight to a setter does the right thing.

use highlight_engine::assemble_message_text;
use shared_types::{AnalyzeRequest, AttachmentMeta};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
#[derive(Debug, Clone, Default)]
pub struct MessageForm {
    request: AnalyzeRequest,
}

impl MessageForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) -> &AnalyzeRequest {
        &self.request
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// WASM bindings
#[wasm_bindgen]
impl MessageForm {
    #[wasm_bindgen(constructor)]
    pub fn new_wasm() -> Self {
        Self::new()
    }

    #[wasm_bindgen(js_name = setSubject)]
    pub fn set_subject(&mut self, value: &str) {
        self.request.subject = non_empty(value);
    }

    #[wasm_bindgen(js_name = setBody)]
    pub fn set_body(&mut self, value: &str) {
        self.request.body = non_empty(value);
    }

    #[wasm_bindgen(js_name = setFromEmail)]
    pub fn set_from_email(&mut self, value: &str) {
        self.request.from_email = non_empty(value.trim());
    }

    #[wasm_bindgen(js_name = setReplyTo)]
    pub fn set_reply_to(&mut self, value: &str) {
        self.request.reply_to = non_empty(value.trim());
    }

    #[wasm_bindgen(js_name = setHeadersRaw)]
    pub fn set_headers_raw(&mut self, value: &str) {
        self.request.headers_raw = non_empty(value);
    }

    /// Add an attachment by name; size is optional and comes in as a JS
    /// number, so junk values are quietly ignored.
    #[wasm_bindgen(js_name = addAttachment)]
    pub fn add_attachment(&mut self, filename: &str, size_bytes: Option<f64>) {
        let size_bytes = size_bytes
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(|s| s as u64);
        self.request.attachments.push(AttachmentMeta {
            filename: filename.to_string(),
            size_bytes,
        });
    }

    #[wasm_bindgen(js_name = clearAttachments)]
    pub fn clear_attachments(&mut self) {
        self.request.attachments.clear();
    }

    #[wasm_bindgen(js_name = attachmentCount)]
    pub fn attachment_count(&self) -> usize {
        self.request.attachments.len()
    }

    pub fn clear(&mut self) {
        self.request = AnalyzeRequest::default();
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.request.is_empty()
    }

    /// Validation failure text for the current fields, if any.
    #[wasm_bindgen(js_name = validationError)]
    pub fn validation_error(&self) -> Option<String> {
        self.request.validate().err().map(|e| e.to_string())
    }

    /// The exact text the analyzer will scan for these fields.
    #[wasm_bindgen(js_name = previewText)]
    pub fn preview_text(&self) -> String {
        assemble_message_text(&self.request)
    }

    /// The request payload as JSON.
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.request).unwrap_or_default()
    }
}
