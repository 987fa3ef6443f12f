use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Structural role of a span of constitutional text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Preamble,
    Part,
    Article,
    Schedule,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Preamble => "preamble",
            SectionKind::Part => "part",
            SectionKind::Article => "article",
            SectionKind::Schedule => "schedule",
        }
    }
}

/// One contiguous span of document text tagged with its structural role.
///
/// Several candidates for the same logical section can be produced from
/// adjacent page scans; `deduplicate_sections` collapses them by
/// `identity_key`, keeping the longest content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuralSection {
    pub content: String,
    pub kind: SectionKind,
    pub number: Option<String>,
    pub title: Option<String>,
    pub part_number: Option<String>,
    pub page_number: Option<u32>,
    pub part_description: Option<String>,
    pub is_fundamental_right: bool,
    pub is_directive_principle: bool,
    pub attributes: BTreeMap<String, serde_json::Value>,
}

impl StructuralSection {
    /// Identity used for deduplication. Titles are compared verbatim, so the
    /// same article captured with line-wrap variance in its title stays
    /// duplicated; see `deduplicate_sections`.
    pub fn identity_key(&self) -> (SectionKind, Option<&str>, Option<&str>) {
        (self.kind, self.number.as_deref(), self.title.as_deref())
    }
}

/// Aggregate counts over a canonical section set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionStatistics {
    pub total_sections: usize,
    pub preambles: usize,
    pub parts: usize,
    pub articles: usize,
    pub schedules: usize,
    pub fundamental_rights: usize,
    pub directive_principles: usize,
    pub pages_processed: usize,
    pub content_completeness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstitutionalArea {
    FundamentalRights,
    DirectivePrinciples,
    UnionGovernment,
    StateGovernment,
    Judiciary,
    Amendment,
    Emergency,
    General,
}

impl ConstitutionalArea {
    pub fn display_label(self) -> &'static str {
        match self {
            ConstitutionalArea::FundamentalRights => "Fundamental Rights",
            ConstitutionalArea::DirectivePrinciples => "Directive Principles",
            ConstitutionalArea::UnionGovernment => "Union Government",
            ConstitutionalArea::StateGovernment => "State Government",
            ConstitutionalArea::Judiciary => "Judiciary",
            ConstitutionalArea::Amendment => "Amendment",
            ConstitutionalArea::Emergency => "Emergency",
            ConstitutionalArea::General => "General",
        }
    }
}

/// One analytical step recovered from a thinking segment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningStep {
    pub step_number: usize,
    pub title: String,
    pub content: String,
    pub area: ConstitutionalArea,
}

/// Independent boolean checks behind the reasoning quality score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub has_constitutional_references: bool,
    pub has_step_by_step_analysis: bool,
    pub has_legal_terminology: bool,
    pub has_citation_verification: bool,
    pub has_cross_references: bool,
    pub reasoning_length_adequate: bool,
    pub uses_multiple_areas: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasoningCompleteness {
    Complete,
    Partial,
    Basic,
    Failed,
}

impl ReasoningCompleteness {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasoningCompleteness::Complete => "complete",
            ReasoningCompleteness::Partial => "partial",
            ReasoningCompleteness::Basic => "basic",
            ReasoningCompleteness::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAnalysis {
    pub score: f64,
    pub completeness: ReasoningCompleteness,
    pub metrics: QualityMetrics,
}

impl QualityAnalysis {
    pub fn failed() -> Self {
        Self {
            score: 0.0,
            completeness: ReasoningCompleteness::Failed,
            metrics: QualityMetrics::default(),
        }
    }
}

/// Full outcome of one reasoning-chain extraction. Response-scoped and
/// immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasoningResult {
    pub raw_reasoning: String,
    pub steps: Vec<ReasoningStep>,
    pub formatted_display: String,
    pub quality: QualityAnalysis,
    pub extraction_succeeded: bool,
    pub reasoning_length: usize,
    pub step_count: usize,
}

impl ReasoningResult {
    pub fn extraction_failed() -> Self {
        Self {
            raw_reasoning: String::new(),
            steps: Vec::new(),
            formatted_display: "Reasoning chain extraction failed. This may indicate the model \
                                did not provide structured thinking."
                .to_string(),
            quality: QualityAnalysis::failed(),
            extraction_succeeded: false,
            reasoning_length: 0,
            step_count: 0,
        }
    }
}

/// Normalized citations found in one text: `Article {n}` and `Part {ROMAN}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CitationSet {
    pub articles: BTreeSet<String>,
    pub parts: BTreeSet<String>,
}

impl CitationSet {
    pub fn total(&self) -> usize {
        self.articles.len() + self.parts.len()
    }
}

/// Result of checking an answer's citations against retrieved context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CitationReport {
    pub accuracy: f64,
    pub total_citations: usize,
    pub valid_citations: usize,
    pub valid_articles: BTreeSet<String>,
    pub valid_parts: BTreeSet<String>,
    pub invalid_articles: BTreeSet<String>,
    pub invalid_parts: BTreeSet<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsePaths {
    pub cache_root: String,
    pub manifest_dir: String,
    pub source_path: String,
    pub sections_path: String,
    pub db_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseCounts {
    pub pages_total: usize,
    pub empty_pages_skipped: usize,
    pub raw_sections: usize,
    pub duplicates_merged: usize,
    pub sections_upserted: usize,
    pub sections_total: i64,
    pub statistics: SectionStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub db_schema_version: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub source_sha256: String,
    pub paths: ParsePaths,
    pub counts: ParseCounts,
    pub warnings: Vec<String>,
    pub notes: Vec<String>,
}

/// Canonical section dump written next to the run manifest, consumed by the
/// downstream chunking/embedding pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionSetManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub generated_at: String,
    pub section_count: usize,
    pub sections: Vec<StructuralSection>,
}
