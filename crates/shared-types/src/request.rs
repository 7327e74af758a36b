//! Analysis request types
//!
//! The flat record of email fields a client submits for analysis. Fields are
//! all optional so partially filled forms serialize cleanly; `validate`
//! mirrors the analyzer's own input contract so bad requests are rejected
//! before they cross the wire.

use serde::{Deserialize, Serialize};

/// Maximum subject length accepted by the analyzer
pub const MAX_SUBJECT_LEN: usize = 5_000;
/// Maximum body / raw header block length
pub const MAX_TEXT_BLOCK_LEN: usize = 200_000;
/// Maximum length of an email address field
pub const MAX_ADDRESS_LEN: usize = 320;
/// Maximum attachment filename length
pub const MAX_FILENAME_LEN: usize = 260;
/// Maximum number of attachments per request
pub const MAX_ATTACHMENTS: usize = 50;

/// Attachment metadata submitted with a request. Only the filename and an
/// optional size travel; content bytes never reach the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentMeta {
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
}

impl AttachmentMeta {
    pub fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            size_bytes: None,
        }
    }

    pub fn with_size(filename: &str, size_bytes: u64) -> Self {
        Self {
            filename: filename.to_string(),
            size_bytes: Some(size_bytes),
        }
    }
}

/// Email fields submitted for analysis.
///
/// Immutable per request: the analyzer and the client both derive the
/// analyzed text from these fields, so the record must round-trip through
/// JSON without reordering or transformation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers_raw: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentMeta>,
}

impl AnalyzeRequest {
    /// True when no field carries any content at all.
    pub fn is_empty(&self) -> bool {
        !self.has_text() && self.attachments.is_empty()
    }

    fn has_text(&self) -> bool {
        let filled = |f: &Option<String>| f.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.subject) || filled(&self.body) || filled(&self.headers_raw)
    }

    /// Validate against the analyzer's input contract.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.is_empty() {
            return Err(RequestError::Empty);
        }

        check_len("subject", &self.subject, MAX_SUBJECT_LEN)?;
        check_len("body", &self.body, MAX_TEXT_BLOCK_LEN)?;
        check_len("from_email", &self.from_email, MAX_ADDRESS_LEN)?;
        check_len("reply_to", &self.reply_to, MAX_ADDRESS_LEN)?;
        check_len("headers_raw", &self.headers_raw, MAX_TEXT_BLOCK_LEN)?;

        if self.attachments.len() > MAX_ATTACHMENTS {
            return Err(RequestError::TooManyAttachments {
                count: self.attachments.len(),
                max: MAX_ATTACHMENTS,
            });
        }
        for att in &self.attachments {
            if att.filename.is_empty() {
                return Err(RequestError::EmptyFilename);
            }
            if att.filename.chars().count() > MAX_FILENAME_LEN {
                return Err(RequestError::FieldTooLong {
                    field: "attachment filename",
                    max: MAX_FILENAME_LEN,
                });
            }
        }

        Ok(())
    }
}

fn check_len(
    field: &'static str,
    value: &Option<String>,
    max: usize,
) -> Result<(), RequestError> {
    match value {
        Some(s) if s.chars().count() > max => Err(RequestError::FieldTooLong { field, max }),
        _ => Ok(()),
    }
}

/// Request validation error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("request must include subject, body, headers, or at least one attachment")]
    Empty,

    #[error("{field} exceeds {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("too many attachments: {count} (max {max})")]
    TooManyAttachments { count: usize, max: usize },

    #[error("attachment filename must not be empty")]
    EmptyFilename,
}
