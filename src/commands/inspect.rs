use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::InspectArgs;
use crate::commands::{prepare_document, resolve_structure_boundaries};
use crate::element::{Category, Element};
use crate::structure::{
    Boundaries, RelationRow, count_categories, count_children, relation_report,
};

const TEXT_PREVIEW_CHARS: usize = 120;
const INDENT: &str = "    ";

#[derive(Debug, Serialize)]
struct CategoryCount {
    category: String,
    count: usize,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    input: String,
    element_count: usize,
    malformed_lines: Vec<usize>,
    sections_indexed: usize,
    categories: Vec<CategoryCount>,
    categories_after_exclusion: Option<Vec<CategoryCount>>,
    boundaries: Option<Boundaries>,
    records: Option<Vec<Element>>,
    relations: Option<Vec<RelationRow>>,
}

pub fn run(args: InspectArgs) -> Result<()> {
    let prepared = prepare_document(&args.input, &args.structure)?;

    let boundaries = match (&prepared.boundaries, args.boundaries) {
        (Some(boundaries), _) => Some(boundaries.clone()),
        (None, true) => Some(
            resolve_structure_boundaries(&prepared.store, &prepared.index, &args.structure)
                .with_context(|| format!("failed to resolve boundaries in {}", args.input.display()))?,
        ),
        (None, false) => None,
    };

    let categories = histogram(prepared.store.iter());
    let categories_after_exclusion = prepared
        .boundaries
        .as_ref()
        .map(|_| histogram(prepared.kept.iter()));

    let records = args.category.as_deref().map(|raw| {
        let category = Category::parse(raw);
        prepared
            .store
            .filter_by_category(&category, args.max_items)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>()
    });

    let relations = if args.relations {
        let counts = count_children(&prepared.kept);
        let rows = relation_report(&counts, &prepared.store);
        let dangling = rows.iter().filter(|row| row.is_dangling()).count();
        if dangling > 0 {
            warn!(dangling, "relations reference missing parents");
        }
        info!(
            relations = rows.len(),
            children = counts.total(),
            "counted parent/child relations"
        );
        Some(rows)
    } else {
        None
    };

    let report = InspectReport {
        input: args.input.display().to_string(),
        element_count: prepared.store.len(),
        malformed_lines: prepared.malformed_lines.clone(),
        sections_indexed: prepared.index.len(),
        categories,
        categories_after_exclusion,
        boundaries,
        records,
        relations,
    };

    if args.json {
        write_json_report(&report)
    } else {
        write_text_report(&report)
    }
}

fn histogram<'a, I>(elements: I) -> Vec<CategoryCount>
where
    I: IntoIterator<Item = &'a Element>,
{
    count_categories(elements)
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

fn preview(text: &str) -> String {
    let condensed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if condensed.chars().count() <= TEXT_PREVIEW_CHARS {
        return condensed;
    }
    let mut cut: String = condensed.chars().take(TEXT_PREVIEW_CHARS).collect();
    cut.push_str("...");
    cut
}

fn write_json_report(report: &InspectReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, report)
        .context("failed to serialize inspect json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

fn write_text_report(report: &InspectReport) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Input: {}", report.input)?;
    writeln!(
        output,
        "Elements: {} sections={} malformed_lines={}",
        report.element_count,
        report.sections_indexed,
        report.malformed_lines.len()
    )?;

    writeln!(output, "Categories:")?;
    for entry in &report.categories {
        writeln!(output, "\t{}\t{}", entry.category, entry.count)?;
    }

    if let Some(after) = &report.categories_after_exclusion {
        writeln!(output, "Categories after exclusion:")?;
        for entry in after {
            writeln!(output, "\t{}\t{}", entry.category, entry.count)?;
        }
    }

    if let Some(boundaries) = &report.boundaries {
        writeln!(
            output,
            "Boundaries: header_id={} reserved_section_id={}",
            boundaries.header_id, boundaries.reserved_section_id
        )?;
    }

    if let Some(records) = &report.records {
        writeln!(output, "Records: {}", records.len())?;
        for record in records {
            writeln!(
                output,
                "\t{}\t{}\tparent={}",
                record.id,
                record.category,
                record.parent_id().unwrap_or("-")
            )?;
            writeln!(output, "\t  text: {}", preview(&record.text))?;
        }
    }

    if let Some(relations) = &report.relations {
        writeln!(output, "Relations: {}", relations.len())?;
        for row in relations {
            writeln!(
                output,
                "PARENT TYPE: {}, PARENT ID: {}",
                row.parent_category.as_deref().unwrap_or("(missing)"),
                row.parent_id
            )?;
            if let Some(parent_text) = &row.parent_text {
                writeln!(output, "PARENT TEXT: {}", preview(parent_text))?;
            }
            writeln!(
                output,
                "{INDENT}CHILD TYPE: {} --> NUMBER OF CHILDREN: {}",
                row.child_category, row.num_children
            )?;
            writeln!(output)?;
        }
    }

    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_condenses_whitespace_and_truncates() {
        assert_eq!(preview("a\n\n b\tc"), "a b c");

        let long = "x".repeat(TEXT_PREVIEW_CHARS + 10);
        let cut = preview(&long);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), TEXT_PREVIEW_CHARS + 3);
    }

    #[test]
    fn histogram_renders_category_names() {
        let elements = vec![
            Element::new("1", Category::Title, "A"),
            Element::new("2", Category::Title, "B"),
            Element::new("3", Category::Table, "C"),
        ];

        let counts = histogram(&elements);
        assert_eq!(counts[0].category, "Title");
        assert_eq!(counts[0].count, 2);
        assert_eq!(counts[1].category, "Table");
    }
}
