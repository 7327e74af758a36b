//! Canonical message text assembly
//!
//! The analyzer reports highlight offsets into one flattened text built from
//! the request fields. Both sides build that text with the same fixed block
//! order, so offset N means the same character here and on the service. Any
//! drift in ordering or separators would silently shift every highlight.

use shared_types::AnalyzeRequest;

/// Flatten the request fields into the analyzed text.
///
/// One block per present, non-empty field, in fixed order, joined by line
/// breaks, with the whole result trimmed. Absent fields contribute zero
/// lines. No escaping or transformation is applied to field content.
pub fn assemble_message_text(request: &AnalyzeRequest) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(subject) = present(&request.subject) {
        parts.push(format!("Subject: {subject}"));
    }
    if let Some(from_email) = present(&request.from_email) {
        parts.push(format!("From: {from_email}"));
    }
    if let Some(reply_to) = present(&request.reply_to) {
        parts.push(format!("Reply-To: {reply_to}"));
    }
    if let Some(headers_raw) = present(&request.headers_raw) {
        parts.push("Headers:".to_string());
        parts.push(headers_raw.to_string());
    }
    if let Some(body) = present(&request.body) {
        parts.push("Body:".to_string());
        parts.push(body.to_string());
    }
    if !request.attachments.is_empty() {
        parts.push("Attachments:".to_string());
        for attachment in &request.attachments {
            if !attachment.filename.is_empty() {
                parts.push(format!("- {}", attachment.filename));
            }
        }
    }

    parts.join("\n").trim().to_string()
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}
