use anyhow::Result;
use tracing::info;

use crate::cli::AnnotateArgs;
use crate::commands::prepare_document;
use crate::interchange::save_json_lines;
use crate::structure::annotate;

pub fn run(args: AnnotateArgs) -> Result<()> {
    let prepared = prepare_document(&args.input, &args.structure)?;

    let annotated = annotate(&prepared.kept, &prepared.index);
    let with_section = annotated.iter().filter(|item| item.has_section()).count();

    save_json_lines(&args.output, &annotated)?;

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        records = annotated.len(),
        with_section,
        without_section = annotated.len() - with_section,
        excluded = prepared.excluded_count(),
        "annotation completed"
    );

    Ok(())
}
