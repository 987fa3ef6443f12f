use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::debug;

use crate::model::{
    ConstitutionalArea, QualityAnalysis, QualityMetrics, ReasoningCompleteness, ReasoningResult,
    ReasoningStep,
};

mod fallback;
mod quality;
mod steps;
#[cfg(test)]
mod tests;

use fallback::fallback_reasoning;
use quality::analyze_reasoning_quality;
use steps::{identify_constitutional_area, structure_steps};

/// Tagged captures shorter than this are treated as markup noise and the
/// next matcher gets a turn.
const MIN_TAGGED_REASONING_CHARS: usize = 20;

/// One named delimiter strategy for locating a thinking segment.
#[derive(Debug)]
struct ThinkingMatcher {
    name: &'static str,
    pattern: Regex,
}

/// Compiled matcher set for reasoning extraction and response cleaning.
///
/// Matchers are tried in declaration order and the first capture that
/// survives the length floor wins; later strategies are never consulted.
#[derive(Debug)]
pub struct ReasoningPatterns {
    matchers: Vec<ThinkingMatcher>,
    numbered_label_line: Regex,
    step_prefix_line: Regex,
    dashed_label_line: Regex,
    numbered_marker: Regex,
    blank_run: Regex,
}

impl ReasoningPatterns {
    pub fn new() -> Result<Self> {
        let matcher_specs: [(&'static str, &'static str); 6] = [
            ("tagged_strict", r"(?is)<thinking>(.*?)</thinking>"),
            (
                "tagged_spaced",
                r"(?is)<\s*thinking\s*>(.*?)<\s*/\s*thinking\s*>",
            ),
            ("tagged_attributes", r"(?is)<thinking[^>]*>(.*?)</thinking>"),
            ("bracketed", r"(?is)\[thinking\](.*?)\[/thinking\]"),
            (
                "hash_delimited",
                r"(?is)##\s*thinking\s*##(.*?)##\s*/thinking\s*##",
            ),
            (
                "labelled_prefix",
                r"(?is)(?:reasoning|analysis|thought process):\s*(.*?)(?:\n\n|$)",
            ),
        ];

        let mut matchers = Vec::with_capacity(matcher_specs.len());
        for (name, pattern) in matcher_specs {
            matchers.push(ThinkingMatcher {
                name,
                pattern: Regex::new(pattern)
                    .with_context(|| format!("failed to compile thinking matcher '{name}'"))?,
            });
        }

        Ok(Self {
            matchers,
            numbered_label_line: Regex::new(r"^(\d+)\.?\s+([A-Z\s]+):\s*(.*)$")
                .context("failed to compile numbered label step regex")?,
            step_prefix_line: Regex::new(r"(?i)^step\s+(\d+):\s*(.*)$")
                .context("failed to compile step prefix regex")?,
            dashed_label_line: Regex::new(r"^-\s*([A-Z\s]+):\s*(.*)$")
                .context("failed to compile dashed label step regex")?,
            numbered_marker: Regex::new(r"\d+\.")
                .context("failed to compile numbered marker regex")?,
            blank_run: Regex::new(r"\n\s*\n\s*\n")
                .context("failed to compile blank run regex")?,
        })
    }

    /// Extract, structure and score the thinking segment of one model
    /// response. Malformed input degrades to an explicit failure result;
    /// this never errors.
    pub fn extract_reasoning_chain(&self, response_text: &str) -> ReasoningResult {
        if response_text.trim().is_empty() {
            return ReasoningResult::extraction_failed();
        }

        let raw_reasoning = self
            .tagged_reasoning(response_text)
            .or_else(|| fallback_reasoning(response_text));

        let Some(raw_reasoning) = raw_reasoning else {
            return ReasoningResult::extraction_failed();
        };

        let raw_reasoning = raw_reasoning.trim().to_string();
        let steps = structure_steps(&raw_reasoning, self);
        let quality = analyze_reasoning_quality(&raw_reasoning, self);
        let formatted_display = format_reasoning_display(&raw_reasoning, &steps);

        ReasoningResult {
            reasoning_length: raw_reasoning.len(),
            step_count: steps.len(),
            raw_reasoning,
            steps,
            formatted_display,
            quality,
            extraction_succeeded: true,
        }
    }

    /// Strip every recognized thinking span, then collapse runs of three or
    /// more newlines down to a paragraph break.
    pub fn clean_response_text(&self, response_text: &str) -> String {
        if response_text.trim().is_empty() {
            return String::new();
        }

        let mut cleaned = response_text.to_string();
        for matcher in &self.matchers {
            cleaned = matcher.pattern.replace_all(&cleaned, "").into_owned();
        }

        let collapsed = self.blank_run.replace_all(&cleaned, "\n\n");
        collapsed.trim().to_string()
    }

    fn tagged_reasoning(&self, text: &str) -> Option<String> {
        for matcher in &self.matchers {
            let Some(captures) = matcher.pattern.captures(text) else {
                continue;
            };
            let content = captures.get(1).map(|m| m.as_str().trim()).unwrap_or("");
            if content.len() > MIN_TAGGED_REASONING_CHARS {
                debug!(matcher = matcher.name, "matched thinking segment");
                return Some(content.to_string());
            }
        }

        None
    }
}

fn format_reasoning_display(raw_reasoning: &str, steps: &[ReasoningStep]) -> String {
    let mut lines = Vec::<String>::new();
    lines.push("CONSTITUTIONAL REASONING PROCESS".to_string());
    lines.push("=".repeat(50));

    if steps.is_empty() {
        lines.push(String::new());
        lines.push("Reasoning Analysis:".to_string());
        lines.push(raw_reasoning.to_string());
        return lines.join("\n");
    }

    for step in steps {
        lines.push(String::new());
        lines.push(format!("{}. {}", step.step_number, step.title.to_uppercase()));
        lines.push(format!("   {}", step.content));
        if step.area != ConstitutionalArea::General {
            lines.push(format!("   Area: {}", step.area.display_label()));
        }
    }

    lines.join("\n")
}
