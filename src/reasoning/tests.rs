use super::*;

fn patterns() -> ReasoningPatterns {
    ReasoningPatterns::new().expect("reasoning patterns compile")
}

#[test]
fn tagged_thinking_round_trip() {
    let response = "<thinking>Analyze the constitutional question about equality step by step.</thinking>Final answer";

    let extractor = patterns();
    let result = extractor.extract_reasoning_chain(response);

    assert!(result.extraction_succeeded);
    assert_eq!(
        result.raw_reasoning,
        "Analyze the constitutional question about equality step by step."
    );
    assert_eq!(result.reasoning_length, result.raw_reasoning.len());

    let cleaned = extractor.clean_response_text(response);
    assert_eq!(cleaned, "Final answer");
}

#[test]
fn matcher_priority_prefers_strict_tags() {
    let response = "<thinking>Strict capture with enough characters to pass.</thinking>\n[thinking]Bracketed capture that should never be reached.[/thinking]\nAnswer";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert!(result.raw_reasoning.starts_with("Strict capture"));
    assert!(!result.raw_reasoning.contains("Bracketed"));
}

#[test]
fn bracketed_variant_matches() {
    let response = "[thinking]Constitutional analysis of the directive principles in Part IV.[/thinking]\n\nThe directive principles guide state policy.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert!(result.raw_reasoning.contains("directive principles"));
}

#[test]
fn hash_delimited_variant_matches() {
    let response = "##thinking## Examining the amendment procedure prescribed by the Constitution. ##/thinking##\nThe amendment power rests with Parliament.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert!(result.raw_reasoning.contains("amendment procedure"));
}

#[test]
fn attribute_bearing_tags_match() {
    let response = "<thinking type=\"analysis\">Weighing the scope of judicial review here.</thinking>The courts may review.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert_eq!(
        result.raw_reasoning,
        "Weighing the scope of judicial review here."
    );
}

#[test]
fn labelled_prefix_matches_up_to_blank_line() {
    let response = "Reasoning: The constitutional meaning of liberty requires careful interpretation\n\nLiberty is protected.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert_eq!(
        result.raw_reasoning,
        "The constitutional meaning of liberty requires careful interpretation"
    );
}

#[test]
fn short_tagged_capture_falls_through_to_failure() {
    let response = "<thinking>too short</thinking>More text with no trigger words at all.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(!result.extraction_succeeded);
    assert!(result.raw_reasoning.is_empty());
}

#[test]
fn extraction_failure_yields_explicit_result() {
    let result = patterns().extract_reasoning_chain("");

    assert!(!result.extraction_succeeded);
    assert!(result.raw_reasoning.is_empty());
    assert!(result.steps.is_empty());
    assert_eq!(result.step_count, 0);
    assert_eq!(result.quality.score, 0.0);
    assert_eq!(result.quality.completeness, ReasoningCompleteness::Failed);
    assert!(result.formatted_display.contains("extraction failed"));
}

#[test]
fn keyword_fallback_accumulates_until_answer_start() {
    let response = "Let me identify the constitutional area involved.\nThis concerns equality jurisprudence.\nBased on Article 14, the answer is equality.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert!(result.raw_reasoning.contains("identify the constitutional area"));
    assert!(result.raw_reasoning.contains("equality jurisprudence"));
    assert!(!result.raw_reasoning.contains("Based on"));
}

#[test]
fn keyword_fallback_stops_at_bold_marker() {
    let response = "First locate the provisions that govern this question.\nThe scope is narrow.\n**Answer**: the provision applies.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert!(!result.raw_reasoning.contains("**Answer**"));
}

#[test]
fn paragraph_fallback_selects_substantial_constitutional_paragraph() {
    let response = "Short intro.\n\nThis paragraph discusses the constitutional framework for free expression in depth, well beyond the length floor used by the scanner.\n\nDone.";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.extraction_succeeded);
    assert!(result.raw_reasoning.starts_with("This paragraph discusses"));
    assert!(!result.raw_reasoning.contains("Short intro"));
}

#[test]
fn numbered_label_steps_win_over_other_families() {
    let response = "<thinking>\n1. IDENTIFICATION: The question concerns fundamental rights under Article 19.\n2. VERIFICATION: The cited number matches the guarantee invoked.\nstep 3: this line belongs to a losing family\n</thinking>\nAnswer";

    let result = patterns().extract_reasoning_chain(response);
    assert_eq!(result.steps.len(), 2);

    assert_eq!(result.steps[0].step_number, 1);
    assert_eq!(result.steps[0].title, "IDENTIFICATION");
    assert_eq!(result.steps[0].area, ConstitutionalArea::FundamentalRights);

    assert_eq!(result.steps[1].step_number, 2);
    assert_eq!(result.steps[1].title, "VERIFICATION");
}

#[test]
fn step_prefix_family_used_when_no_labels_present() {
    let response = "<thinking>\nstep 1: examine the relevant constitutional provisions carefully\nstep 2: confirm the cited numbers are right\n</thinking>\nAnswer";

    let result = patterns().extract_reasoning_chain(response);
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].title, "Analysis");
    assert_eq!(result.steps[0].step_number, 1);
    assert_eq!(result.steps[1].step_number, 2);
}

#[test]
fn dashed_label_family_numbers_by_position() {
    let response = "<thinking>\n- IDENTIFICATION: the area is emergency powers under article 352\n- VALIDATION: grounded in the constitutional text\n</thinking>\nAnswer";

    let result = patterns().extract_reasoning_chain(response);
    assert_eq!(result.steps.len(), 2);
    assert_eq!(result.steps[0].title, "IDENTIFICATION");
    assert_eq!(result.steps[0].step_number, 1);
    assert_eq!(result.steps[0].area, ConstitutionalArea::Emergency);
    assert_eq!(result.steps[1].title, "VALIDATION");
    assert_eq!(result.steps[1].step_number, 2);
}

#[test]
fn sentence_fallback_caps_and_numbers_by_position() {
    let reasoning = "Now. The question engages the freedom of speech guarantee. It becomes necessary to weigh the competing interests carefully. Ok. The restriction must satisfy the reasonableness standard in every case. Another consideration is the proportionality of the measure imposed. This seventh sentence falls past the cap and must be dropped entirely.";
    let response = format!("<thinking>{reasoning}</thinking>Answer");

    let result = patterns().extract_reasoning_chain(&response);
    assert_eq!(result.steps.len(), 4);
    assert_eq!(result.steps[0].step_number, 2);
    assert_eq!(result.steps[0].title, "Analysis Step 2");
    assert_eq!(result.steps[3].step_number, 6);
    assert!(
        result
            .steps
            .iter()
            .all(|step| !step.content.contains("seventh sentence"))
    );
}

#[test]
fn area_tagging_first_match_wins() {
    assert_eq!(
        identify_constitutional_area("Article 21 jurisprudence on personal liberty"),
        ConstitutionalArea::FundamentalRights
    );
    assert_eq!(
        identify_constitutional_area("the parliament acts for the union"),
        ConstitutionalArea::UnionGovernment
    );
    assert_eq!(
        identify_constitutional_area("the state legislature and the governor"),
        ConstitutionalArea::StateGovernment
    );
    assert_eq!(
        identify_constitutional_area("proclamation under article 356"),
        ConstitutionalArea::Emergency
    );
    assert_eq!(
        identify_constitutional_area("nothing relevant here"),
        ConstitutionalArea::General
    );
}

#[test]
fn quality_score_low_for_sparse_reasoning() {
    let analysis = analyze_reasoning_quality("Short thought here", &patterns());

    assert_eq!(analysis.score, 0.0);
    assert_eq!(analysis.completeness, ReasoningCompleteness::Basic);
    assert!(!analysis.metrics.reasoning_length_adequate);
    assert!(!analysis.metrics.has_constitutional_references);
}

#[test]
fn quality_score_high_for_thorough_reasoning() {
    let reasoning = "1. The question concerns Article 19 and the fundamental rights part of the Constitution.\n2. Verify the citation against the constitutional provisions and related clauses.\nThe conclusion is connected to the amendment history of Part III.";
    let response = format!("<thinking>{reasoning}</thinking>Answer");

    let result = patterns().extract_reasoning_chain(&response);
    assert!(result.quality.score >= 0.7);
    assert_eq!(result.quality.completeness, ReasoningCompleteness::Complete);
    assert!(result.quality.metrics.has_constitutional_references);
    assert!(result.quality.metrics.has_step_by_step_analysis);
    assert!(result.quality.metrics.has_legal_terminology);
    assert!(result.quality.metrics.has_citation_verification);
    assert!(result.quality.metrics.has_cross_references);
    assert!(result.quality.metrics.uses_multiple_areas);
}

#[test]
fn clean_collapses_newline_runs() {
    let cleaned = patterns().clean_response_text("Intro\n\n\n\nTail");
    assert_eq!(cleaned, "Intro\n\nTail");
}

#[test]
fn clean_strips_thinking_span_and_collapses_gap() {
    let response = "Before<thinking>A span long enough to be recognized as reasoning.</thinking>\n\n\nAfter";

    let cleaned = patterns().clean_response_text(response);
    assert_eq!(cleaned, "Before\n\nAfter");
}

#[test]
fn formatted_display_lists_steps_with_area_labels() {
    let response = "<thinking>\n- IDENTIFICATION: emergency powers under article 352 are engaged\n</thinking>\nAnswer";

    let result = patterns().extract_reasoning_chain(response);
    assert!(
        result
            .formatted_display
            .starts_with("CONSTITUTIONAL REASONING PROCESS")
    );
    assert!(result.formatted_display.contains("1. IDENTIFICATION"));
    assert!(result.formatted_display.contains("Area: Emergency"));
}

#[test]
fn formatted_display_falls_back_to_raw_reasoning() {
    let response = "<thinking>Area check done here. Quick scan is fine.</thinking>Answer";

    let result = patterns().extract_reasoning_chain(response);
    assert!(result.steps.is_empty());
    assert!(result.formatted_display.contains("Reasoning Analysis:"));
    assert!(result.formatted_display.contains("Area check done here."));
}
