use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::StructureArgs;
use crate::element::{Category, Element, ElementStore};
use crate::interchange::{LoadReport, load_json_lines};
use crate::structure::{
    Boundaries, SectionIndex, build_section_index, exclude_boundaries, resolve_boundaries,
};

pub mod annotate;
pub mod build;
pub mod inspect;
pub mod inventory;

#[derive(Debug)]
pub(crate) struct PreparedDocument {
    pub store: ElementStore,
    pub malformed_lines: Vec<usize>,
    pub input_sha256: String,
    pub title_category: Category,
    pub index: SectionIndex,
    pub boundaries: Option<Boundaries>,
    pub kept: Vec<Element>,
}

impl PreparedDocument {
    pub fn excluded_count(&self) -> usize {
        self.store.len() - self.kept.len()
    }
}

pub(crate) fn prepare_document(input: &Path, structure: &StructureArgs) -> Result<PreparedDocument> {
    let report: LoadReport<Element> = load_json_lines(input)?;
    let malformed_lines = report.malformed_lines();
    let input_sha256 = report.source_sha256.clone().unwrap_or_default();
    let store = ElementStore::new(report.records);

    let title_category = Category::parse(&structure.title_category);
    let index = build_section_index(&store, &title_category);
    info!(
        title_category = %title_category,
        sections = index.len(),
        "built section index"
    );

    let (boundaries, kept) = if structure.exclude_boundaries {
        let boundaries = resolve_structure_boundaries(&store, &index, structure)
            .with_context(|| format!("cannot exclude boundaries in {}", input.display()))?;
        let kept = exclude_boundaries(store.as_slice(), &boundaries);
        info!(
            header_id = %boundaries.header_id,
            reserved_section_id = %boundaries.reserved_section_id,
            excluded = store.len() - kept.len(),
            "excluded boundary elements"
        );
        (Some(boundaries), kept)
    } else {
        (None, store.as_slice().to_vec())
    };

    Ok(PreparedDocument {
        store,
        malformed_lines,
        input_sha256,
        title_category,
        index,
        boundaries,
        kept,
    })
}

pub(crate) fn resolve_structure_boundaries(
    store: &ElementStore,
    index: &SectionIndex,
    structure: &StructureArgs,
) -> Result<Boundaries> {
    let header_category = Category::parse(&structure.header_category);
    Ok(resolve_boundaries(
        store.as_slice(),
        index,
        &structure.reserved_title,
        &header_category,
    )?)
}
