use super::*;

use crate::reasoning::ReasoningPatterns;

fn patterns() -> CitationPatterns {
    CitationPatterns::new().expect("citation patterns compile")
}

fn context(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| text.to_string()).collect()
}

#[test]
fn extracts_article_and_part_references() {
    let citations =
        patterns().extract_citations("Article 19 protects free speech. Part III covers rights.");

    assert_eq!(
        citations.articles,
        BTreeSet::from(["Article 19".to_string()])
    );
    assert_eq!(citations.parts, BTreeSet::from(["Part III".to_string()]));
}

#[test]
fn article_token_variants_normalize_to_one_form() {
    let citations = patterns()
        .extract_citations("Art. 21 and art 21 and article 21 all refer to the same guarantee");

    assert_eq!(
        citations.articles,
        BTreeSet::from(["Article 21".to_string()])
    );
}

#[test]
fn part_numerals_normalize_to_uppercase() {
    let citations = patterns().extract_citations("Directive principles appear in part iv");

    assert_eq!(citations.parts, BTreeSet::from(["Part IV".to_string()]));
}

#[test]
fn part_with_arabic_number_is_not_an_article() {
    let citations = patterns().extract_citations("Part 5 of the report is unrelated");

    assert!(citations.articles.is_empty());
    assert!(citations.parts.is_empty());
}

#[test]
fn bare_numbered_clause_counts_as_article() {
    let citations = patterns().extract_citations("21. Protection of life and personal liberty");

    assert_eq!(
        citations.articles,
        BTreeSet::from(["Article 21".to_string()])
    );
}

#[test]
fn bare_number_without_capital_is_ignored() {
    let citations = patterns().extract_citations("the figure 21. was revised downward");

    assert!(citations.articles.is_empty());
}

#[test]
fn uncited_answer_is_vacuously_accurate() {
    let report = patterns().validate_citations(
        "The Constitution establishes a federal structure with a strong centre.",
        &context(&["Article 1 describes the Union of States."]),
    );

    assert_eq!(report.accuracy, 1.0);
    assert_eq!(report.total_citations, 0);
    assert_eq!(report.valid_citations, 0);
    assert!(report.invalid_articles.is_empty());
}

#[test]
fn cited_answer_with_empty_context_scores_zero() {
    let report = patterns().validate_citations("Article 19 guarantees freedom of speech.", &[]);

    assert_eq!(report.accuracy, 0.0);
    assert_eq!(report.total_citations, 1);
    assert_eq!(report.valid_citations, 0);
    assert_eq!(
        report.invalid_articles,
        BTreeSet::from(["Article 19".to_string()])
    );
}

#[test]
fn accuracy_counts_articles_and_parts_together() {
    let answer = "Article 19 and Article 14 both sit in Part III.";
    let docs = context(&[
        "Article 19 protects six freedoms.",
        "Part III collects the fundamental rights.",
    ]);

    let report = patterns().validate_citations(answer, &docs);

    assert_eq!(report.total_citations, 3);
    assert_eq!(report.valid_citations, 2);
    assert!((report.accuracy - 2.0 / 3.0).abs() < 1e-9);
    assert_eq!(
        report.valid_articles,
        BTreeSet::from(["Article 19".to_string()])
    );
    assert_eq!(report.valid_parts, BTreeSet::from(["Part III".to_string()]));
    assert_eq!(
        report.invalid_articles,
        BTreeSet::from(["Article 14".to_string()])
    );
    assert!(report.invalid_parts.is_empty());
}

#[test]
fn citations_inside_thinking_spans_vanish_after_cleaning() {
    let response = "<thinking>Consider whether Article 32 or Part XVIII is the right hook here.</thinking>\nArticle 21 is the operative guarantee.";

    let cleaner = ReasoningPatterns::new().expect("reasoning patterns compile");
    let cleaned = cleaner.clean_response_text(response);

    let citations = patterns().extract_citations(&cleaned);
    assert_eq!(
        citations.articles,
        BTreeSet::from(["Article 21".to_string()])
    );
    assert!(citations.parts.is_empty());
}
