use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boundaries {
    pub header_id: String,
    pub reserved_section_id: String,
}

impl Boundaries {
    pub fn excludes(&self, element: &Element) -> bool {
        let anchors = [self.header_id.as_str(), self.reserved_section_id.as_str()];
        anchors.contains(&element.id.as_str())
            || element
                .parent_id()
                .is_some_and(|parent_id| anchors.contains(&parent_id))
    }
}

pub fn resolve_boundaries(
    records: &[Element],
    index: &SectionIndex,
    reserved_title: &str,
    header_category: &Category,
) -> Result<Boundaries, StructureError> {
    let reserved_section_id = index.find_title(reserved_title).ok_or_else(|| {
        StructureError::SectionNotFound(format!("no section titled '{reserved_title}'"))
    })?;

    let header_id = records
        .iter()
        .find(|record| &record.category == header_category)
        .map(|record| record.id.clone())
        .ok_or_else(|| {
            StructureError::SectionNotFound(format!("no element of category {header_category}"))
        })?;

    Ok(Boundaries {
        header_id,
        reserved_section_id: reserved_section_id.to_string(),
    })
}

pub fn exclude_boundaries(elements: &[Element], boundaries: &Boundaries) -> Vec<Element> {
    elements
        .iter()
        .filter(|element| !boundaries.excludes(element))
        .cloned()
        .collect()
}
