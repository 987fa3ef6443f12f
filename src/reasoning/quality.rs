use super::*;

const CONSTITUTIONAL_REFERENCE_TERMS: &[&str] = &["article", "part", "schedule", "constitutional"];
const LEGAL_TERMINOLOGY_TERMS: &[&str] = &["provisions", "clause", "sub-article", "amendment"];
const VERIFICATION_TERMS: &[&str] = &["verify", "validate", "accurate", "citation"];
const CROSS_REFERENCE_TERMS: &[&str] = &["related", "cross-reference", "connected"];

const MIN_ADEQUATE_REASONING_CHARS: usize = 100;
const QUALITY_CHECK_COUNT: usize = 7;

const COMPLETE_THRESHOLD: f64 = 0.7;
const PARTIAL_THRESHOLD: f64 = 0.4;

/// Score reasoning quality as the fraction of independent checks passing.
pub(super) fn analyze_reasoning_quality(
    reasoning_text: &str,
    patterns: &ReasoningPatterns,
) -> QualityAnalysis {
    let lowered = reasoning_text.to_lowercase();

    let metrics = QualityMetrics {
        has_constitutional_references: contains_any(&lowered, CONSTITUTIONAL_REFERENCE_TERMS),
        has_step_by_step_analysis: patterns.numbered_marker.is_match(reasoning_text),
        has_legal_terminology: contains_any(&lowered, LEGAL_TERMINOLOGY_TERMS),
        has_citation_verification: contains_any(&lowered, VERIFICATION_TERMS),
        has_cross_references: contains_any(&lowered, CROSS_REFERENCE_TERMS),
        reasoning_length_adequate: reasoning_text.trim().len() >= MIN_ADEQUATE_REASONING_CHARS,
        uses_multiple_areas: distinct_sentence_areas(reasoning_text) > 1,
    };

    let passing = [
        metrics.has_constitutional_references,
        metrics.has_step_by_step_analysis,
        metrics.has_legal_terminology,
        metrics.has_citation_verification,
        metrics.has_cross_references,
        metrics.reasoning_length_adequate,
        metrics.uses_multiple_areas,
    ]
    .into_iter()
    .filter(|check| *check)
    .count();

    let score = passing as f64 / QUALITY_CHECK_COUNT as f64;

    QualityAnalysis {
        score,
        completeness: completeness_for(score),
        metrics,
    }
}

fn completeness_for(score: f64) -> ReasoningCompleteness {
    if score >= COMPLETE_THRESHOLD {
        ReasoningCompleteness::Complete
    } else if score >= PARTIAL_THRESHOLD {
        ReasoningCompleteness::Partial
    } else {
        ReasoningCompleteness::Basic
    }
}

fn contains_any(lowered: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| lowered.contains(term))
}

/// Distinct constitutional areas across period-split sentences; empty
/// trailing fragments tag as general, matching the per-step tagger.
fn distinct_sentence_areas(text: &str) -> usize {
    text.split('.')
        .map(identify_constitutional_area)
        .collect::<HashSet<ConstitutionalArea>>()
        .len()
}
