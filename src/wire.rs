//! Persisted layout document and its JSON codec.
//!
//! This module owns the wire representation exchanged with the template
//! persistence service and consumed by the certificate renderer. The
//! document is flat: group structure is resolved away by the flattener
//! before serialization, and `parentId` never appears on the wire.
//!
//! Placeholder elements embed `{{token}}` bindings (`recipient_name`,
//! `course_title`, `issue_date`, `issuer_name`, `signature`,
//! `verification_id`, `qr_code`, …). The recognized token set is the
//! renderer's contract; the editor passes them through unvalidated.

#[cfg(test)]
#[path = "wire_test.rs"]
mod wire_test;

use serde::{Deserialize, Serialize};

use crate::doc::{Background, CanvasConfig, Element};

/// Error returned by the decode functions.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The JSON could not be decoded as a layout document.
    #[error("failed to decode layout document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The persisted unit: canvas, background, and the flat element list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Canvas dimensions and paper settings.
    pub canvas: CanvasConfig,
    /// Document background.
    pub background: Background,
    /// Flat, post-flatten elements. No groups, no parent references.
    pub elements: Vec<Element>,
}

impl Default for LayoutDocument {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            background: Background::default(),
            elements: Vec::new(),
        }
    }
}

/// A stored template as returned by the persistence collaborator:
/// `load(id) -> {title, layout_data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    /// Template title.
    pub title: String,
    /// The layout document payload.
    pub layout_data: LayoutDocument,
}

/// Encode a layout document to its JSON wire form.
#[must_use]
pub fn encode_document(document: &LayoutDocument) -> String {
    // Serializing these types cannot fail: every map key is a string and
    // no value is a non-finite float by construction.
    serde_json::to_string(document).unwrap_or_default()
}

/// Decode a layout document from JSON.
///
/// # Errors
///
/// Returns [`DocumentError::Decode`] for malformed or mistyped JSON.
pub fn decode_document(json: &str) -> Result<LayoutDocument, DocumentError> {
    Ok(serde_json::from_str(json)?)
}

/// Encode a template record (title + layout document) to JSON.
#[must_use]
pub fn encode_record(record: &TemplateRecord) -> String {
    serde_json::to_string(record).unwrap_or_default()
}

/// Decode a template record from JSON.
///
/// # Errors
///
/// Returns [`DocumentError::Decode`] for malformed or mistyped JSON.
pub fn decode_record(json: &str) -> Result<TemplateRecord, DocumentError> {
    Ok(serde_json::from_str(json)?)
}
