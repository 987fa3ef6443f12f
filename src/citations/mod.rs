use std::collections::BTreeSet;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{CitationReport, CitationSet};

#[cfg(test)]
mod tests;

/// Compiled patterns for locating article and part references in free text.
#[derive(Debug)]
pub struct CitationPatterns {
    article_token: Regex,
    bare_clause: Regex,
    part_reference: Regex,
}

impl CitationPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            article_token: Regex::new(r"(?i)\b(?:article|art\.?)\s+(\d+)")
                .context("failed to compile article token regex")?,
            // Un-prefixed numbered clauses: a leading integer, a period,
            // then a capitalized word, as in "21. Protection of life".
            bare_clause: Regex::new(r"(?m)(?:^|\s)(\d+)\.\s[A-Z]")
                .context("failed to compile bare clause regex")?,
            part_reference: Regex::new(r"(?i)\bpart\s+([ivx]+)")
                .context("failed to compile part reference regex")?,
        })
    }

    /// Pull every article and part reference out of `text`, normalized to
    /// `Article {n}` and `Part {ROMAN}`.
    pub fn extract_citations(&self, text: &str) -> CitationSet {
        let mut articles = BTreeSet::<String>::new();
        for captures in self.article_token.captures_iter(text) {
            if let Some(number) = captures.get(1) {
                articles.insert(format!("Article {}", number.as_str()));
            }
        }
        for captures in self.bare_clause.captures_iter(text) {
            if let Some(number) = captures.get(1) {
                articles.insert(format!("Article {}", number.as_str()));
            }
        }

        let mut parts = BTreeSet::<String>::new();
        for captures in self.part_reference.captures_iter(text) {
            if let Some(numeral) = captures.get(1) {
                parts.insert(format!("Part {}", numeral.as_str().to_ascii_uppercase()));
            }
        }

        CitationSet { articles, parts }
    }

    /// Score how well the answer's citations are substantiated by the
    /// retrieved context. An answer with no citations made no unsupported
    /// claims and scores a vacuous 1.0; otherwise accuracy is the share of
    /// response citations also present in the context, articles and parts
    /// counted together.
    pub fn validate_citations(&self, answer_text: &str, context_docs: &[String]) -> CitationReport {
        let response = self.extract_citations(answer_text);

        let context_text = context_docs.join("\n");
        let grounded = self.extract_citations(&context_text);

        let total_citations = response.total();
        if total_citations == 0 {
            return CitationReport {
                accuracy: 1.0,
                total_citations: 0,
                valid_citations: 0,
                valid_articles: BTreeSet::new(),
                valid_parts: BTreeSet::new(),
                invalid_articles: BTreeSet::new(),
                invalid_parts: BTreeSet::new(),
            };
        }

        let valid_articles = response
            .articles
            .intersection(&grounded.articles)
            .cloned()
            .collect::<BTreeSet<String>>();
        let valid_parts = response
            .parts
            .intersection(&grounded.parts)
            .cloned()
            .collect::<BTreeSet<String>>();
        let invalid_articles = response
            .articles
            .difference(&grounded.articles)
            .cloned()
            .collect::<BTreeSet<String>>();
        let invalid_parts = response
            .parts
            .difference(&grounded.parts)
            .cloned()
            .collect::<BTreeSet<String>>();

        let valid_citations = valid_articles.len() + valid_parts.len();
        let accuracy = valid_citations as f64 / total_citations as f64;

        CitationReport {
            accuracy,
            total_citations,
            valid_citations,
            valid_articles,
            valid_parts,
            invalid_articles,
            invalid_parts,
        }
    }
}
