/// Trigger vocabulary for untagged reasoning, grouped by analysis activity.
/// Any term entering a line flips the scan into accumulation mode.
const REASONING_TRIGGER_TERMS: &[(&str, &[&str])] = &[
    (
        "identification",
        &[
            "identify",
            "constitutional area",
            "fundamental rights",
            "directive principles",
        ],
    ),
    (
        "location",
        &[
            "locate",
            "relevant articles",
            "provisions",
            "constitutional text",
        ],
    ),
    (
        "verification",
        &["verify", "article citations", "accurate", "complete"],
    ),
    (
        "cross_reference",
        &[
            "cross-references",
            "related provisions",
            "constitutional links",
        ],
    ),
    (
        "interpretation",
        &[
            "legal interpretation",
            "sound reasoning",
            "constitutional meaning",
        ],
    ),
    (
        "validation",
        &["validate", "constitutional text", "grounded", "verified"],
    ),
];

/// Minimum size for the last-resort paragraph fallback.
const MIN_SUBSTANTIAL_PARAGRAPH_CHARS: usize = 100;

/// Untagged extraction: accumulate keyword-triggered lines until a line that
/// reads like the start of the final answer, then fall back to the first
/// substantial constitutional paragraph.
pub(super) fn fallback_reasoning(text: &str) -> Option<String> {
    let mut reasoning_lines = Vec::<&str>::new();
    let mut in_reasoning = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line_has_trigger_term(line) {
            in_reasoning = true;
            reasoning_lines.push(line);
        } else if in_reasoning {
            if line.starts_with("Based on")
                || line.starts_with("According to")
                || line.starts_with("**")
            {
                break;
            }
            reasoning_lines.push(line);
        }
    }

    if !reasoning_lines.is_empty() {
        return Some(reasoning_lines.join("\n"));
    }

    substantial_paragraph(text)
}

fn line_has_trigger_term(line: &str) -> bool {
    let lowered = line.to_lowercase();
    REASONING_TRIGGER_TERMS
        .iter()
        .any(|(_, terms)| terms.iter().any(|term| lowered.contains(term)))
}

fn substantial_paragraph(text: &str) -> Option<String> {
    for paragraph in text.split("\n\n") {
        let trimmed = paragraph.trim();
        let lowered = trimmed.to_lowercase();
        if trimmed.len() > MIN_SUBSTANTIAL_PARAGRAPH_CHARS
            && (lowered.contains("constitutional") || lowered.contains("article"))
        {
            return Some(trimmed.to_string());
        }
    }

    None
}
