use std::collections::HashMap;

use serde::Serialize;

use crate::element::{Category, Element, ElementStore, SECTION_KEY};
use crate::error::StructureError;

mod annotate;
mod boundary;
mod relations;
mod section_index;
#[cfg(test)]
mod tests;

pub use annotate::{AnnotatedElement, annotate};
pub use boundary::{Boundaries, exclude_boundaries, resolve_boundaries};
pub use relations::{RelationRow, count_categories, count_children, relation_report};
pub use section_index::{SectionIndex, build_section_index};
