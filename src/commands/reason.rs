use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::ReasonArgs;
use crate::reasoning::ReasoningPatterns;
use crate::util::read_text_file;

pub fn run(args: ReasonArgs) -> Result<()> {
    let response_text = read_text_file(&args.response_path)?;

    info!(
        path = %args.response_path.display(),
        chars = response_text.len(),
        "extracting reasoning chain"
    );

    let patterns = ReasoningPatterns::new()?;
    let result = patterns.extract_reasoning_chain(&response_text);

    if result.extraction_succeeded {
        info!(
            steps = result.step_count,
            reasoning_chars = result.reasoning_length,
            quality_score = result.quality.score,
            completeness = result.quality.completeness.as_str(),
            "extracted reasoning chain"
        );
    } else {
        warn!("no recognizable thinking segment in response; reporting degraded result");
    }

    if args.json {
        let rendered = serde_json::to_string_pretty(&result)
            .context("failed to serialize reasoning result")?;
        println!("{rendered}");
    } else {
        println!("{}", result.formatted_display);
    }

    Ok(())
}
