use serde::{Deserialize, Serialize};

/// A top-level document section handed to the retrieval core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Source document identifier (typically the file name)
    #[serde(default)]
    pub document: String,
    #[serde(alias = "title")]
    pub heading: String,
    /// 0-based page the heading was found on
    #[serde(default)]
    pub page: u32,
    pub text: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

/// One nesting level below a [`Section`]. Deeper nesting is not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(default)]
    pub document: String,
    #[serde(alias = "title")]
    pub heading: String,
    #[serde(default)]
    pub page: u32,
    pub text: String,
}

impl Section {
    /// Text indexed for retrieval: heading and body on separate lines.
    pub fn index_text(&self) -> String {
        format!("{}\n{}", self.heading, self.text)
    }
}

/// A corpus position with its fused ranking score. Only meaningful for
/// ordering within a single retrieval call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredResult {
    pub section_index: usize,
    pub fused_score: f64,
}

/// A retrieved section with its condensed text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOutput {
    pub section_index: usize,
    /// 1-based, dense within one retrieval call
    pub importance_rank: usize,
    pub refined_text: String,
    pub subsections: Vec<RefinedSubsection>,
}

/// A subsection of a retrieved section, ranked by its position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RefinedSubsection {
    pub subsection_index: usize,
    pub importance_rank: usize,
    pub refined_text: String,
}
