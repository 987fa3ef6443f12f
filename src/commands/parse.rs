use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rusqlite::{Connection, params};
use tracing::{info, warn};

use crate::cli::ParseArgs;
use crate::model::{
    ParseCounts, ParsePaths, ParseRunManifest, SectionSetManifest, StructuralSection,
};
use crate::sections::{SectionPatterns, deduplicate_sections, section_statistics};
use crate::util::{
    ensure_directory, now_utc_string, sha256_hex, utc_compact_string, write_json_pretty,
};

const DB_SCHEMA_VERSION: &str = "0.1.0";

/// Page separator emitted by pdftotext between pages.
const PAGE_SEPARATOR: char = '\u{c}';

pub fn run(args: ParseArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let cache_root = args.cache_root.clone();
    let manifest_dir = cache_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!("parse_run_{}.json", utc_compact_string(started_ts)))
    });
    let sections_path = args
        .sections_path
        .clone()
        .unwrap_or_else(|| manifest_dir.join("sections.json"));
    let db_path = args
        .db_path
        .clone()
        .unwrap_or_else(|| cache_root.join("constitution_index.sqlite"));

    info!(source = %args.source_path.display(), run_id = %run_id, "starting parse");

    if !args.source_path.exists() {
        bail!(
            "source document text not found at {}",
            args.source_path.display()
        );
    }
    let source_text = fs::read_to_string(&args.source_path)
        .with_context(|| format!("failed to read {}", args.source_path.display()))?;
    let source_sha256 = sha256_hex(source_text.as_bytes());

    let mut pages = source_text.split(PAGE_SEPARATOR).collect::<Vec<&str>>();
    if let Some(max_pages) = args.max_pages {
        pages.truncate(max_pages);
    }
    let pages_total = pages.len();

    let patterns = SectionPatterns::new()?;
    let mut raw_sections = Vec::<StructuralSection>::new();
    let mut empty_pages_skipped = 0usize;

    for (page_index, page_text) in pages.iter().enumerate() {
        if page_text.trim().is_empty() {
            empty_pages_skipped += 1;
            continue;
        }

        let page_number = (page_index + 1) as u32;
        raw_sections.extend(patterns.identify_sections(page_text, page_number));
    }

    let raw_section_count = raw_sections.len();
    let sections = deduplicate_sections(raw_sections);
    let duplicates_merged = raw_section_count - sections.len();
    let statistics = section_statistics(&sections);

    info!(
        raw = raw_section_count,
        canonical = sections.len(),
        articles = statistics.articles,
        parts = statistics.parts,
        schedules = statistics.schedules,
        "identified canonical sections"
    );

    let mut warnings = Vec::<String>::new();
    if sections.is_empty() {
        let message = "no structural sections detected in source text".to_string();
        warn!("{message}");
        warnings.push(message);
    }

    let mut connection = Connection::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    configure_connection(&connection)?;
    ensure_schema(&connection)?;
    let sections_upserted = upsert_sections(&mut connection, &sections, &source_sha256)?;
    let sections_total = count_rows(&connection, "SELECT COUNT(*) FROM sections")?;

    let updated_at = now_utc_string();
    let section_manifest = SectionSetManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        generated_at: updated_at.clone(),
        section_count: sections.len(),
        sections,
    };
    write_json_pretty(&sections_path, &section_manifest)?;

    let manifest = ParseRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        db_schema_version: DB_SCHEMA_VERSION.to_string(),
        status: "completed".to_string(),
        started_at,
        updated_at,
        command: render_parse_command(&args),
        source_sha256,
        paths: ParsePaths {
            cache_root: cache_root.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
            source_path: args.source_path.display().to_string(),
            sections_path: sections_path.display().to_string(),
            db_path: db_path.display().to_string(),
        },
        counts: ParseCounts {
            pages_total,
            empty_pages_skipped,
            raw_sections: raw_section_count,
            duplicates_merged,
            sections_upserted,
            sections_total,
            statistics,
        },
        warnings,
        notes: vec![
            "Parse command completed using local manifests and sqlite store.".to_string(),
            "Section detection uses preamble/part/article/schedule heading heuristics over the pdftotext text layer.".to_string(),
        ],
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote parse run manifest");
    info!(sections = sections_total, "parse completed");

    Ok(())
}

fn render_parse_command(args: &ParseArgs) -> String {
    let mut command = format!(
        "constitution parse --source-path {} --cache-root {}",
        args.source_path.display(),
        args.cache_root.display()
    );
    if let Some(max_pages) = args.max_pages {
        command.push_str(&format!(" --max-pages {max_pages}"));
    }
    command
}

fn configure_connection(connection: &Connection) -> Result<()> {
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .context("failed to set journal_mode=WAL")?;
    connection
        .pragma_update(None, "synchronous", "NORMAL")
        .context("failed to set synchronous=NORMAL")?;
    Ok(())
}

fn ensure_schema(connection: &Connection) -> Result<()> {
    connection.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
          key TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sections (
          section_id TEXT PRIMARY KEY,
          kind TEXT NOT NULL,
          number TEXT,
          title TEXT,
          part_number TEXT,
          page_number INTEGER,
          part_description TEXT,
          is_fundamental_right INTEGER NOT NULL DEFAULT 0,
          is_directive_principle INTEGER NOT NULL DEFAULT 0,
          content TEXT NOT NULL,
          attributes_json TEXT,
          source_sha256 TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_sections_kind ON sections(kind);
        CREATE INDEX IF NOT EXISTS idx_sections_kind_number ON sections(kind, number);
        ",
    )?;

    let now = now_utc_string();
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [DB_SCHEMA_VERSION],
    )?;
    connection.execute(
        "INSERT INTO metadata(key, value) VALUES('db_updated_at', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [now],
    )?;

    Ok(())
}

fn upsert_sections(
    connection: &mut Connection,
    sections: &[StructuralSection],
    source_sha256: &str,
) -> Result<usize> {
    let tx = connection.transaction()?;

    {
        let mut statement = tx.prepare(
            "
            INSERT INTO sections(
              section_id, kind, number, title, part_number, page_number,
              part_description, is_fundamental_right, is_directive_principle,
              content, attributes_json, source_sha256
            )
            VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(section_id) DO UPDATE SET
              page_number=excluded.page_number,
              part_description=excluded.part_description,
              is_fundamental_right=excluded.is_fundamental_right,
              is_directive_principle=excluded.is_directive_principle,
              content=excluded.content,
              attributes_json=excluded.attributes_json,
              source_sha256=excluded.source_sha256
            ",
        )?;

        for section in sections {
            let attributes_json = serde_json::to_string(&section.attributes)
                .context("failed to serialize section attributes")?;

            statement.execute(params![
                section_id_for(section),
                section.kind.as_str(),
                section.number,
                section.title,
                section.part_number,
                section.page_number,
                section.part_description,
                section.is_fundamental_right,
                section.is_directive_principle,
                section.content,
                attributes_json,
                source_sha256,
            ])?;
        }
    }

    tx.commit()?;
    Ok(sections.len())
}

/// Stable id mirroring the deduplication identity key.
fn section_id_for(section: &StructuralSection) -> String {
    format!(
        "{}:{}:{}",
        section.kind.as_str(),
        section.number.as_deref().unwrap_or("-"),
        sanitize_for_id(section.title.as_deref().unwrap_or("-"))
    )
}

fn sanitize_for_id(value: &str) -> String {
    value
        .chars()
        .map(|character| {
            if character.is_ascii_alphanumeric() {
                character.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

pub(super) fn count_rows(connection: &Connection, sql: &str) -> Result<i64> {
    let count = connection.query_row(sql, [], |row| row.get(0))?;
    Ok(count)
}

pub(super) fn latest_parse_manifest_path(manifest_dir: &Path) -> Result<Option<std::path::PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let mut newest: Option<std::path::PathBuf> = None;
    for entry in fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to list {}", manifest_dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };

        if !file_name.starts_with("parse_run_") || !file_name.ends_with(".json") {
            continue;
        }

        // Run ids carry a sortable compact UTC timestamp, so the
        // lexicographically greatest file name is the newest run.
        let is_newer = newest
            .as_ref()
            .and_then(|current| current.file_name().and_then(|name| name.to_str()))
            .map(|current| file_name > current)
            .unwrap_or(true);
        if is_newer {
            newest = Some(path);
        }
    }

    Ok(newest)
}
