use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::citations::CitationPatterns;
use crate::cli::CiteArgs;
use crate::model::CitationReport;
use crate::reasoning::ReasoningPatterns;
use crate::util::read_text_file;

pub fn run(args: CiteArgs) -> Result<()> {
    let mut answer_text = read_text_file(&args.answer_path)?;

    let mut context_docs = Vec::<String>::new();
    for path in &args.context_paths {
        context_docs.push(read_text_file(path)?);
    }
    if context_docs.is_empty() {
        warn!("no context passages supplied; every cited reference will score as unsupported");
    }

    if args.clean_first {
        let cleaner = ReasoningPatterns::new()?;
        answer_text = cleaner.clean_response_text(&answer_text);
    }

    let patterns = CitationPatterns::new()?;
    let report = patterns.validate_citations(&answer_text, &context_docs);

    info!(
        total = report.total_citations,
        valid = report.valid_citations,
        accuracy = report.accuracy,
        "validated citations"
    );

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&report).context("failed to serialize citation report")?;
        println!("{rendered}");
    } else {
        println!("{}", render_citation_summary(&report));
    }

    Ok(())
}

fn render_citation_summary(report: &CitationReport) -> String {
    let mut lines = Vec::<String>::new();
    lines.push(format!(
        "Citation accuracy: {:.2} ({}/{})",
        report.accuracy, report.valid_citations, report.total_citations
    ));

    if !report.valid_articles.is_empty() || !report.valid_parts.is_empty() {
        let supported = report
            .valid_articles
            .iter()
            .chain(report.valid_parts.iter())
            .cloned()
            .collect::<Vec<String>>();
        lines.push(format!("Supported: {}", supported.join(", ")));
    }

    if !report.invalid_articles.is_empty() || !report.invalid_parts.is_empty() {
        let unsupported = report
            .invalid_articles
            .iter()
            .chain(report.invalid_parts.iter())
            .cloned()
            .collect::<Vec<String>>();
        lines.push(format!("Unsupported: {}", unsupported.join(", ")));
    }

    lines.join("\n")
}
