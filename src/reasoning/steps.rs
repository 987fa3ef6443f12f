use super::*;

/// Sentence-fallback structuring stops after this many sentences.
const MAX_SENTENCE_STEPS: usize = 6;

/// Sentences at or under this length are skipped by the fallback.
const MIN_SENTENCE_CHARS: usize = 20;

/// Indicator vocabulary per constitutional area; the first area with any
/// hit wins, so order is significant.
const AREA_INDICATORS: &[(ConstitutionalArea, &[&str])] = &[
    (
        ConstitutionalArea::FundamentalRights,
        &[
            "fundamental rights",
            "article 12",
            "article 13",
            "article 14",
            "article 15",
            "article 16",
            "article 17",
            "article 18",
            "article 19",
            "article 20",
            "article 21",
            "article 22",
        ],
    ),
    (
        ConstitutionalArea::DirectivePrinciples,
        &[
            "directive principles",
            "part iv",
            "article 36",
            "article 37",
            "article 38",
            "article 39",
            "article 40",
        ],
    ),
    (
        ConstitutionalArea::UnionGovernment,
        &[
            "union",
            "parliament",
            "president",
            "prime minister",
            "article 52",
            "article 53",
        ],
    ),
    (
        ConstitutionalArea::StateGovernment,
        &["state", "governor", "chief minister", "state legislature"],
    ),
    (
        ConstitutionalArea::Judiciary,
        &[
            "supreme court",
            "high court",
            "judicial",
            "article 124",
            "article 214",
        ],
    ),
    (
        ConstitutionalArea::Amendment,
        &["amendment", "article 368", "constitutional amendment"],
    ),
    (
        ConstitutionalArea::Emergency,
        &["emergency", "article 352", "article 356", "article 360"],
    ),
    (
        ConstitutionalArea::General,
        &["constitution", "constitutional", "legal"],
    ),
];

pub(super) fn identify_constitutional_area(text: &str) -> ConstitutionalArea {
    let lowered = text.to_lowercase();
    for (area, indicators) in AREA_INDICATORS {
        if indicators.iter().any(|indicator| lowered.contains(indicator)) {
            return *area;
        }
    }

    ConstitutionalArea::General
}

/// Structure raw reasoning into discrete steps. Three line-shape families
/// are tried in order and the first that yields anything wins; unstructured
/// text falls back to sentence splitting.
pub(super) fn structure_steps(
    reasoning_text: &str,
    patterns: &ReasoningPatterns,
) -> Vec<ReasoningStep> {
    let mut steps = numbered_label_steps(reasoning_text, patterns);
    if steps.is_empty() {
        steps = step_prefix_steps(reasoning_text, patterns);
    }
    if steps.is_empty() {
        steps = dashed_label_steps(reasoning_text, patterns);
    }
    if steps.is_empty() {
        steps = sentence_steps(reasoning_text);
    }

    steps
}

/// Family: `N. LABEL: content`, upper-case label.
fn numbered_label_steps(text: &str, patterns: &ReasoningPatterns) -> Vec<ReasoningStep> {
    let mut steps = Vec::new();

    for line in text.lines() {
        let Some(captures) = patterns.numbered_label_line.captures(line.trim()) else {
            continue;
        };

        let step_number = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(steps.len() + 1);
        let title = captures
            .get(2)
            .map(|m| m.as_str().trim())
            .unwrap_or("Analysis");
        let content = captures.get(3).map(|m| m.as_str().trim()).unwrap_or("");

        steps.push(ReasoningStep {
            step_number,
            title: title.to_string(),
            content: content.to_string(),
            area: identify_constitutional_area(content),
        });
    }

    steps
}

/// Family: `step N: content`. There is no label to capture, so steps carry
/// a generic title.
fn step_prefix_steps(text: &str, patterns: &ReasoningPatterns) -> Vec<ReasoningStep> {
    let mut steps = Vec::new();

    for line in text.lines() {
        let Some(captures) = patterns.step_prefix_line.captures(line.trim()) else {
            continue;
        };

        let step_number = captures
            .get(1)
            .and_then(|m| m.as_str().parse::<usize>().ok())
            .unwrap_or(steps.len() + 1);
        let content = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        steps.push(ReasoningStep {
            step_number,
            title: "Analysis".to_string(),
            content: content.to_string(),
            area: identify_constitutional_area(content),
        });
    }

    steps
}

/// Family: `- LABEL: content`, numbered by position.
fn dashed_label_steps(text: &str, patterns: &ReasoningPatterns) -> Vec<ReasoningStep> {
    let mut steps = Vec::new();

    for line in text.lines() {
        let Some(captures) = patterns.dashed_label_line.captures(line.trim()) else {
            continue;
        };

        let title = captures
            .get(1)
            .map(|m| m.as_str().trim())
            .unwrap_or("Analysis");
        let content = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

        steps.push(ReasoningStep {
            step_number: steps.len() + 1,
            title: title.to_string(),
            content: content.to_string(),
            area: identify_constitutional_area(content),
        });
    }

    steps
}

/// Last resort: period-split sentences, numbered by position so skipped
/// short sentences leave visible gaps.
fn sentence_steps(text: &str) -> Vec<ReasoningStep> {
    let mut steps = Vec::new();

    let sentences = text
        .split('.')
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
        .take(MAX_SENTENCE_STEPS);

    for (index, sentence) in sentences.enumerate() {
        let position = index + 1;
        if sentence.len() > MIN_SENTENCE_CHARS {
            steps.push(ReasoningStep {
                step_number: position,
                title: format!("Analysis Step {position}"),
                content: sentence.to_string(),
                area: identify_constitutional_area(sentence),
            });
        }
    }

    steps
}
