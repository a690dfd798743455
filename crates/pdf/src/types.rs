use serde::{Deserialize, Serialize};

/// Document-level metadata from the trailer's Info dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub page_count: usize,
}

/// Plain text of one page. `text` is `None` for pages that show no text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    /// 1-based page number.
    pub page: usize,
    pub text: Option<String>,
}
