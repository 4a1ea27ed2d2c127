use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{info, warn};

use crate::chunking::{ChunkingConfig, aggregate};
use crate::cli::BuildArgs;
use crate::commands::prepare_document;
use crate::element::Category;
use crate::interchange::save_json_lines;
use crate::model::{BuildCounts, BuildPaths, BuildRunManifest};
use crate::structure::annotate;
use crate::util::{now_utc_string, utc_compact_string, write_json_pretty, write_text};

pub fn run(args: BuildArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("build-{}", utc_compact_string(started_ts));

    let manifest_path = args
        .manifest_path
        .clone()
        .unwrap_or_else(|| default_manifest_path(&args.input, &run_id));

    info!(input = %args.input.display(), run_id = %run_id, "starting build");

    let config = ChunkingConfig::new(args.min_chars, args.max_chars)
        .context("invalid chunking bounds")?
        .with_title_category(Category::parse(&args.structure.title_category));

    let prepared = prepare_document(&args.input, &args.structure)?;

    let annotated = annotate(&prepared.kept, &prepared.index);
    let elements_with_section = annotated.iter().filter(|item| item.has_section()).count();

    let aggregation = aggregate(&annotated, &config);
    let oversize_chunks = aggregation.oversize_count();

    let mut warnings = Vec::new();
    if !prepared.malformed_lines.is_empty() {
        warnings.push(format!(
            "skipped {} malformed record line(s)",
            prepared.malformed_lines.len()
        ));
    }
    if oversize_chunks > 0 {
        warn!(
            oversize_chunks,
            max_chars = config.max_chars,
            "single elements exceed the chunk size limit"
        );
        warnings.push(format!(
            "{oversize_chunks} element(s) exceed max_chars={} and were kept whole",
            config.max_chars
        ));
    }
    if prepared.index.is_empty() && !prepared.store.is_empty() {
        warn!(title_category = %prepared.title_category, "no section titles found");
        warnings.push(format!("no elements of category {}", prepared.title_category));
    }

    match &args.output {
        Some(path) => {
            write_text(path, &aggregation.document.text)?;
            info!(path = %path.display(), "wrote document text");
        }
        None => write_document_stdout(&aggregation.document.text)?,
    }

    if let Some(path) = &args.chunks_output {
        save_json_lines(path, &aggregation.chunks)?;
    }

    let counts = BuildCounts {
        elements_loaded: prepared.store.len(),
        malformed_lines: prepared.malformed_lines.len(),
        sections_indexed: prepared.index.len(),
        elements_excluded: prepared.excluded_count(),
        elements_annotated: annotated.len(),
        elements_with_section,
        chunks: aggregation.chunks.len(),
        oversize_chunks,
        document_chars: aggregation.document.char_len(),
    };

    let manifest = BuildRunManifest {
        manifest_version: 1,
        run_id,
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        input_sha256: prepared.input_sha256.clone(),
        chunking: config,
        boundaries: prepared.boundaries.clone(),
        paths: BuildPaths {
            input_path: args.input.display().to_string(),
            document_path: args.output.as_ref().map(|path| path.display().to_string()),
            chunks_path: args
                .chunks_output
                .as_ref()
                .map(|path| path.display().to_string()),
            manifest_path: manifest_path.display().to_string(),
        },
        counts,
        malformed_line_numbers: prepared.malformed_lines.clone(),
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote build run manifest");
    info!(
        elements = manifest.counts.elements_annotated,
        chunks = manifest.counts.chunks,
        document_chars = manifest.counts.document_chars,
        "build completed"
    );

    Ok(())
}

fn default_manifest_path(input: &Path, run_id: &str) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join("manifests")
        .join(format!("{run_id}.json"))
}

fn write_document_stdout(text: &str) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    output.write_all(text.as_bytes())?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}
