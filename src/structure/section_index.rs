use super::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionIndex {
    entries: Vec<(String, String)>,
    positions: HashMap<String, usize>,
}

impl SectionIndex {
    fn insert_first(&mut self, id: &str, title: &str) -> bool {
        if self.positions.contains_key(id) {
            return false;
        }

        self.positions.insert(id.to_string(), self.entries.len());
        self.entries.push((id.to_string(), title.to_string()));
        true
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.positions
            .get(id)
            .map(|index| self.entries[*index].1.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, title)| (id.as_str(), title.as_str()))
    }

    pub fn find_title(&self, title: &str) -> Option<&str> {
        let wanted = title.to_lowercase();
        self.iter()
            .find(|(_, text)| text.to_lowercase() == wanted)
            .map(|(id, _)| id)
    }
}

pub fn build_section_index<'a, I>(elements: I, title_category: &Category) -> SectionIndex
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut index = SectionIndex::default();

    for element in elements {
        if &element.category != title_category {
            continue;
        }
        if !index.insert_first(&element.id, &element.text) {
            tracing::debug!(id = %element.id, "duplicate section id ignored");
        }
    }

    index
}
