use serde::Serialize;

use crate::chunking::ChunkingConfig;
use crate::structure::Boundaries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Parsed,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceEntry {
    pub pdf_filename: String,
    pub stem: String,
    pub sha256: String,
    pub status: SourceStatus,
    pub elements_file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub pdf_count: usize,
    pub pending_count: usize,
    pub sources: Vec<SourceEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildPaths {
    pub input_path: String,
    pub document_path: Option<String>,
    pub chunks_path: Option<String>,
    pub manifest_path: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildCounts {
    pub elements_loaded: usize,
    pub malformed_lines: usize,
    pub sections_indexed: usize,
    pub elements_excluded: usize,
    pub elements_annotated: usize,
    pub elements_with_section: usize,
    pub chunks: usize,
    pub oversize_chunks: usize,
    pub document_chars: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BuildRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub input_sha256: String,
    pub chunking: ChunkingConfig,
    pub boundaries: Option<Boundaries>,
    pub paths: BuildPaths,
    pub counts: BuildCounts,
    pub malformed_line_numbers: Vec<usize>,
    pub warnings: Vec<String>,
}
