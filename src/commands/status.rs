use std::fs;

use anyhow::{Context, Result};
use rusqlite::Connection;
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::commands::parse::{count_rows, latest_parse_manifest_path};
use crate::model::ParseRunManifest;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.cache_root.join("manifests");
    let db_path = args.cache_root.join("constitution_index.sqlite");

    info!(cache_root = %args.cache_root.display(), "status requested");

    match latest_parse_manifest_path(&manifest_dir)? {
        Some(manifest_path) => {
            let raw = fs::read(&manifest_path)
                .with_context(|| format!("failed to read {}", manifest_path.display()))?;
            let manifest: ParseRunManifest = serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse {}", manifest_path.display()))?;

            info!(
                run_id = %manifest.run_id,
                status = %manifest.status,
                started_at = %manifest.started_at,
                updated_at = %manifest.updated_at,
                source = %manifest.paths.source_path,
                pages = manifest.counts.pages_total,
                raw_sections = manifest.counts.raw_sections,
                duplicates_merged = manifest.counts.duplicates_merged,
                articles = manifest.counts.statistics.articles,
                parts = manifest.counts.statistics.parts,
                schedules = manifest.counts.statistics.schedules,
                completeness = manifest.counts.statistics.content_completeness,
                "loaded newest parse run manifest"
            );

            for warning in &manifest.warnings {
                warn!(warning = %warning, "parse run warning");
            }
        }
        None => {
            warn!(path = %manifest_dir.display(), "no parse run manifest found");
        }
    }

    if db_path.exists() {
        let connection = Connection::open(&db_path)
            .with_context(|| format!("failed to open {}", db_path.display()))?;

        let sections_total = count_rows(&connection, "SELECT COUNT(*) FROM sections").unwrap_or(0);
        info!(
            path = %db_path.display(),
            sections = sections_total,
            "section index status"
        );

        let mut statement =
            connection.prepare("SELECT kind, COUNT(*) FROM sections GROUP BY kind ORDER BY kind")?;
        let mut rows = statement.query([])?;
        while let Some(row) = rows.next()? {
            let kind: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            info!(kind = %kind, count, "sections by kind");
        }
    } else {
        warn!(path = %db_path.display(), "section index missing");
    }

    Ok(())
}
