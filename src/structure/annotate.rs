use serde::{Deserialize, Deserializer, Serializer};
use serde_json::Value;

use super::*;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedElement {
    pub element: Element,
    pub section: String,
}

impl AnnotatedElement {
    pub fn from_record(mut element: Element) -> Self {
        let section = match element.metadata.remove(SECTION_KEY) {
            Some(Value::String(section)) => section,
            _ => String::new(),
        };

        Self { element, section }
    }

    pub fn into_record(self) -> Element {
        let mut element = self.element;
        element
            .metadata
            .insert(SECTION_KEY.to_string(), Value::String(self.section));
        element
    }

    pub fn has_section(&self) -> bool {
        !self.section.is_empty()
    }
}

impl Serialize for AnnotatedElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.clone().into_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AnnotatedElement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Element::deserialize(deserializer).map(Self::from_record)
    }
}

pub fn annotate(elements: &[Element], index: &SectionIndex) -> Vec<AnnotatedElement> {
    elements
        .iter()
        .map(|element| {
            let section = element
                .parent_id()
                .and_then(|parent_id| index.get(parent_id))
                .unwrap_or_default()
                .to_string();

            let mut element = element.clone();
            element.metadata.remove(SECTION_KEY);
            AnnotatedElement { element, section }
        })
        .collect()
}
