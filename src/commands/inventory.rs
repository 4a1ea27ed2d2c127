use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::InventoryArgs;
use crate::model::{SourceEntry, SourceInventoryManifest, SourceStatus};
use crate::util::{now_utc_string, sha256_file, write_json_pretty};

const ELEMENT_FILE_EXTENSIONS: [&str; 2] = ["json", "jsonl"];

pub fn run(args: InventoryArgs) -> Result<()> {
    let manifest = build_manifest(&args.dir)?;

    for source in &manifest.sources {
        match source.status {
            SourceStatus::Parsed => info!(
                pdf = %source.pdf_filename,
                elements_file = %source.elements_file,
                "parsed elements already cached"
            ),
            SourceStatus::Pending => info!(
                pdf = %source.pdf_filename,
                elements_file = %source.elements_file,
                "needs parsing"
            ),
        }
    }

    if args.dry_run {
        info!(
            pdf_count = manifest.pdf_count,
            pending = manifest.pending_count,
            source = %manifest.source_directory,
            "inventory dry-run complete"
        );
        return Ok(());
    }

    let manifest_path = args
        .manifest_path
        .unwrap_or_else(|| args.dir.join("manifests").join("source_inventory.json"));

    write_json_pretty(&manifest_path, &manifest)?;
    info!(path = %manifest_path.display(), "wrote inventory manifest");
    info!(
        pdf_count = manifest.pdf_count,
        pending = manifest.pending_count,
        "inventory completed"
    );

    Ok(())
}

pub fn build_manifest(dir: &Path) -> Result<SourceInventoryManifest> {
    let (mut pdf_paths, mut element_paths) = discover_sources(dir)?;
    pdf_paths.sort();
    element_paths.sort();

    if pdf_paths.is_empty() {
        bail!("no PDFs found in {}", dir.display());
    }

    let element_names: Vec<String> = element_paths
        .iter()
        .filter_map(|path| file_name(path).ok())
        .collect();

    let mut sources = Vec::with_capacity(pdf_paths.len());
    for path in pdf_paths {
        let pdf_filename = file_name(&path)?;
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(ToOwned::to_owned)
            .with_context(|| format!("invalid UTF-8 file stem: {}", path.display()))?;

        let (status, elements_file) = match match_elements_file(&stem, &element_names) {
            Some(name) => (SourceStatus::Parsed, name.to_string()),
            None => (SourceStatus::Pending, format!("{stem}.json")),
        };

        sources.push(SourceEntry {
            sha256: sha256_file(&path)?,
            pdf_filename,
            stem,
            status,
            elements_file,
        });
    }

    let pending_count = sources
        .iter()
        .filter(|source| source.status == SourceStatus::Pending)
        .count();

    Ok(SourceInventoryManifest {
        manifest_version: 1,
        generated_at: now_utc_string(),
        source_directory: dir.display().to_string(),
        pdf_count: sources.len(),
        pending_count,
        sources,
    })
}

fn match_elements_file<'a>(stem: &str, element_names: &'a [String]) -> Option<&'a str> {
    element_names
        .iter()
        .find(|name| name.contains(stem))
        .map(String::as_str)
}

fn discover_sources(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut pdfs = Vec::new();
    let mut element_files = Vec::new();

    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        if !entry
            .file_type()
            .with_context(|| format!("failed to inspect file type: {}", path.display()))?
            .is_file()
        {
            continue;
        }

        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            continue;
        };

        if extension.eq_ignore_ascii_case("pdf") {
            pdfs.push(path);
        } else if ELEMENT_FILE_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
        {
            element_files.push(path);
        }
    }

    Ok((pdfs, element_files))
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(ToOwned::to_owned)
        .with_context(|| format!("invalid UTF-8 filename: {}", path.display()))
}
