use std::collections::{BTreeMap, HashMap, HashSet};

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use crate::model::{SectionKind, SectionStatistics, StructuralSection};

mod dedupe;

pub use dedupe::deduplicate_sections;

/// Articles in the consolidated text of the Constitution, used to report
/// parse completeness.
pub const EXPECTED_ARTICLE_COUNT: usize = 395;

const FUNDAMENTAL_RIGHT_RANGE: std::ops::RangeInclusive<u32> = 12..=35;
const DIRECTIVE_PRINCIPLE_RANGE: std::ops::RangeInclusive<u32> = 36..=51;

/// Canonical descriptions for the 22 parts, keyed by roman numeral.
/// Composite numerals (IVA, IXA, IXB, XIVA) are parts inserted by amendment.
const PART_DESCRIPTIONS: &[(&str, &str)] = &[
    ("I", "THE UNION AND ITS TERRITORY"),
    ("II", "CITIZENSHIP"),
    ("III", "FUNDAMENTAL RIGHTS"),
    ("IV", "DIRECTIVE PRINCIPLES OF STATE POLICY"),
    ("IVA", "FUNDAMENTAL DUTIES"),
    ("V", "THE UNION"),
    ("VI", "THE STATES"),
    ("VII", "STATES IN THE B PART OF THE FIRST SCHEDULE"),
    ("VIII", "THE UNION TERRITORIES"),
    ("IX", "THE PANCHAYATS"),
    ("IXA", "THE MUNICIPALITIES"),
    ("IXB", "THE CO-OPERATIVE SOCIETIES"),
    ("X", "THE SCHEDULED AND TRIBAL AREAS"),
    ("XI", "RELATIONS BETWEEN THE UNION AND THE STATES"),
    ("XII", "FINANCE, PROPERTY, CONTRACTS AND SUITS"),
    (
        "XIII",
        "TRADE, COMMERCE AND INTERCOURSE WITHIN THE TERRITORY OF INDIA",
    ),
    ("XIV", "SERVICES UNDER THE UNION AND THE STATES"),
    ("XIVA", "TRIBUNALS"),
    ("XV", "ELECTIONS"),
    ("XVI", "SPECIAL PROVISIONS RELATING TO CERTAIN CLASSES"),
    ("XVII", "OFFICIAL LANGUAGES"),
    ("XVIII", "EMERGENCY PROVISIONS"),
    ("XIX", "MISCELLANEOUS"),
    ("XX", "AMENDMENT OF THE CONSTITUTION"),
    ("XXI", "TEMPORARY, TRANSITIONAL AND SPECIAL PROVISIONS"),
    (
        "XXII",
        "SHORT TITLE, COMMENCEMENT, AUTHORITATIVE TEXT IN HINDI AND REPEALS",
    ),
];

pub fn part_description(numeral: &str) -> Option<&'static str> {
    let normalized = numeral.to_ascii_uppercase();
    PART_DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, description)| *description)
}

/// Heading patterns for the structural detectors, compiled once per run.
#[derive(Debug)]
pub struct SectionPatterns {
    preamble_heading: Regex,
    part_heading: Regex,
    article_heading: Regex,
    schedule_heading: Regex,
}

impl SectionPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            preamble_heading: Regex::new(r"(?im)^\s*PREAMBLE\s*$")
                .context("failed to compile preamble heading regex")?,
            part_heading: Regex::new(r"(?im)^\s*PART\s+([IVX]+[AB]?)\s*[-\u{2013}\u{2014}]\s*(.+)$")
                .context("failed to compile part heading regex")?,
            article_heading: Regex::new(r"(?m)^\s*(\d+[A-Z]*)\.\s*(.+)$")
                .context("failed to compile article heading regex")?,
            schedule_heading: Regex::new(
                r"(?i)(?:FIRST|SECOND|THIRD|FOURTH|FIFTH|SIXTH|SEVENTH|EIGHTH|NINTH|TENTH|ELEVENTH|TWELFTH)\s+SCHEDULE",
            )
            .context("failed to compile schedule heading regex")?,
        })
    }

    /// Identify every structural section present on one page of document
    /// text. Detectors run independently; overlapping spans across kinds are
    /// allowed to coexist. Malformed or empty text yields an empty list.
    pub fn identify_sections(&self, page_text: &str, page_number: u32) -> Vec<StructuralSection> {
        let mut sections = Vec::new();
        if page_text.trim().is_empty() {
            return sections;
        }

        if self.preamble_heading.is_match(page_text) {
            if let Some(content) = extract_preamble(page_text) {
                let mut attributes = base_attributes("high");
                attributes.insert("foundational".to_string(), Value::Bool(true));
                sections.push(StructuralSection {
                    content,
                    kind: SectionKind::Preamble,
                    number: None,
                    title: Some("Preamble".to_string()),
                    part_number: None,
                    page_number: Some(page_number),
                    part_description: None,
                    is_fundamental_right: false,
                    is_directive_principle: false,
                    attributes,
                });
            }
        }

        for captures in self.part_heading.captures_iter(page_text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let numeral = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let title = captures
                .get(2)
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            let content = part_content(page_text, whole.start());
            if content.is_empty() {
                continue;
            }

            sections.push(StructuralSection {
                content,
                kind: SectionKind::Part,
                number: Some(numeral.to_string()),
                title: Some(title.to_string()),
                part_number: Some(numeral.to_string()),
                page_number: Some(page_number),
                part_description: part_description(numeral).map(str::to_string),
                is_fundamental_right: false,
                is_directive_principle: false,
                attributes: base_attributes("high"),
            });
        }

        for captures in self.article_heading.captures_iter(page_text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let number = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
            let title = captures
                .get(2)
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            let content = article_content(page_text, whole.start());
            if content.is_empty() {
                continue;
            }

            sections.push(StructuralSection {
                content,
                kind: SectionKind::Article,
                number: Some(number.to_string()),
                title: Some(title.to_string()),
                part_number: None,
                page_number: Some(page_number),
                part_description: None,
                is_fundamental_right: is_fundamental_right(number),
                is_directive_principle: is_directive_principle(number),
                attributes: base_attributes("medium"),
            });
        }

        for heading in self.schedule_heading.find_iter(page_text) {
            let content = schedule_content(page_text, heading.start());
            if content.is_empty() {
                continue;
            }

            sections.push(StructuralSection {
                content,
                kind: SectionKind::Schedule,
                number: None,
                title: Some(heading.as_str().to_string()),
                part_number: None,
                page_number: Some(page_number),
                part_description: None,
                is_fundamental_right: false,
                is_directive_principle: false,
                attributes: base_attributes("medium"),
            });
        }

        sections
    }
}

fn base_attributes(importance: &str) -> BTreeMap<String, Value> {
    BTreeMap::from([("importance".to_string(), Value::from(importance))])
}

/// Preamble span: from the PREAMBLE heading through the enacting phrase
/// ("THIS CONSTITUTION", up to and including the next period), falling back
/// to the next PART heading, then to end of page.
fn extract_preamble(text: &str) -> Option<String> {
    let start = text.find("PREAMBLE")?;
    let tail = &text[start..];

    let relative_end = match tail.find("THIS CONSTITUTION") {
        Some(marker) => tail[marker..].find('.').map(|period| marker + period + 1),
        None => tail.find("PART"),
    };

    let end = relative_end.map(|rel| start + rel).unwrap_or(text.len());
    let content = text[start..end].trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_string())
    }
}

/// Byte offset one character past `start`, clamped to the text length.
fn position_after(text: &str, start: usize) -> usize {
    text[start..]
        .chars()
        .next()
        .map(|character| start + character.len_utf8())
        .unwrap_or(text.len())
}

/// Part span: from the heading to the next PART occurrence, else end of page.
fn part_content(text: &str, start: usize) -> String {
    let from = position_after(text, start);
    let end = text[from..]
        .find("PART")
        .map(|pos| from + pos)
        .unwrap_or(text.len());
    text[start..end].trim().to_string()
}

const ARTICLE_TERMINATORS: [&str; 4] = ["\n\n", "Article", "PART", "CHAPTER"];

/// Article span heuristic: the nearest terminator is only accepted when
/// found before the position one character past the match start, which no
/// forward search can satisfy, so the span always runs to end of page.
/// Longstanding behavior; changing it would alter how multi-line articles
/// with blank lines after their heading are captured, so it stays until
/// that truncation question is settled. See the companion test.
fn article_content(text: &str, start: usize) -> String {
    let from = position_after(text, start);
    let mut content_end = from;

    for terminator in ARTICLE_TERMINATORS {
        if let Some(pos) = text[from..].find(terminator) {
            let absolute = from + pos;
            if absolute < content_end {
                content_end = absolute;
            }
        }
    }

    if content_end == from {
        content_end = text.len();
    }

    text[start..content_end].trim().to_string()
}

/// Schedule span: to the nearer of the next SCHEDULE or PART occurrence,
/// else end of page. The search starts one character past the match, so the
/// heading's own SCHEDULE token terminates the span at the ordinal word.
fn schedule_content(text: &str, start: usize) -> String {
    let from = position_after(text, start);
    let next_schedule = text[from..].find("SCHEDULE").map(|pos| from + pos);
    let next_part = text[from..].find("PART").map(|pos| from + pos);

    let end = [next_schedule, next_part]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len());

    text[start..end].trim().to_string()
}

fn leading_article_digits(number: &str) -> Option<u32> {
    let digits = number
        .chars()
        .take_while(|character| character.is_ascii_digit())
        .collect::<String>();
    digits.parse().ok()
}

/// Articles 12-35 are the fundamental-rights band. Letter suffixes
/// ("31A") classify by their leading digits; unparsable numbers are
/// unclassified.
pub fn is_fundamental_right(number: &str) -> bool {
    leading_article_digits(number)
        .map(|value| FUNDAMENTAL_RIGHT_RANGE.contains(&value))
        .unwrap_or(false)
}

/// Articles 36-51 are the directive-principles band.
pub fn is_directive_principle(number: &str) -> bool {
    leading_article_digits(number)
        .map(|value| DIRECTIVE_PRINCIPLE_RANGE.contains(&value))
        .unwrap_or(false)
}

pub fn section_statistics(sections: &[StructuralSection]) -> SectionStatistics {
    let mut counts_by_kind = HashMap::<SectionKind, usize>::new();
    let mut fundamental_rights = 0usize;
    let mut directive_principles = 0usize;
    let mut pages = HashSet::<u32>::new();

    for section in sections {
        *counts_by_kind.entry(section.kind).or_insert(0) += 1;
        if section.is_fundamental_right {
            fundamental_rights += 1;
        }
        if section.is_directive_principle {
            directive_principles += 1;
        }
        if let Some(page_number) = section.page_number {
            pages.insert(page_number);
        }
    }

    let articles = counts_by_kind
        .get(&SectionKind::Article)
        .copied()
        .unwrap_or(0);
    let completeness = (articles as f64 / EXPECTED_ARTICLE_COUNT as f64) * 100.0;

    SectionStatistics {
        total_sections: sections.len(),
        preambles: counts_by_kind
            .get(&SectionKind::Preamble)
            .copied()
            .unwrap_or(0),
        parts: counts_by_kind.get(&SectionKind::Part).copied().unwrap_or(0),
        articles,
        schedules: counts_by_kind
            .get(&SectionKind::Schedule)
            .copied()
            .unwrap_or(0),
        fundamental_rights,
        directive_principles,
        pages_processed: pages.len(),
        content_completeness: completeness.min(100.0),
    }
}
