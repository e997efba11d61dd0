//! Minimal Atlassian Document Format (ADF) encoding for Jira comment bodies.

use serde::Serialize;

/// Root ADF document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdfDocument {
    #[serde(rename = "type")]
    node_type: &'static str,
    version: u8,
    content: Vec<AdfBlock>,
}

/// Block-level ADF node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdfBlock {
    #[serde(rename = "type")]
    node_type: &'static str,
    content: Vec<AdfInline>,
}

/// Inline ADF text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdfInline {
    #[serde(rename = "type")]
    node_type: &'static str,
    text: String,
}

impl AdfDocument {
    /// Wraps plain text in a single-paragraph document.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            node_type: "doc",
            version: 1,
            content: vec![AdfBlock {
                node_type: "paragraph",
                content: vec![AdfInline {
                    node_type: "text",
                    text: text.into(),
                }],
            }],
        }
    }
}
