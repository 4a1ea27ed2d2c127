use super::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationCount {
    pub parent_id: String,
    pub child_category: Category,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct RelationCounts {
    entries: Vec<RelationCount>,
    positions: HashMap<(String, Category), usize>,
}

impl RelationCounts {
    fn increment(&mut self, parent_id: &str, child_category: &Category) {
        let key = (parent_id.to_string(), child_category.clone());
        match self.positions.get(&key) {
            Some(index) => self.entries[*index].count += 1,
            None => {
                self.positions.insert(key, self.entries.len());
                self.entries.push(RelationCount {
                    parent_id: parent_id.to_string(),
                    child_category: child_category.clone(),
                    count: 1,
                });
            }
        }
    }

    pub fn get(&self, parent_id: &str, child_category: &Category) -> usize {
        self.positions
            .get(&(parent_id.to_string(), child_category.clone()))
            .map(|index| self.entries[*index].count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RelationCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

pub fn count_children<'a, I>(elements: I) -> RelationCounts
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut counts = RelationCounts::default();

    for element in elements {
        if let Some(parent_id) = element.parent_id() {
            counts.increment(parent_id, &element.category);
        }
    }

    counts
}

pub fn count_categories<'a, I>(elements: I) -> Vec<(Category, usize)>
where
    I: IntoIterator<Item = &'a Element>,
{
    let mut histogram = Vec::<(Category, usize)>::new();
    let mut positions = HashMap::<Category, usize>::new();

    for element in elements {
        match positions.get(&element.category) {
            Some(index) => histogram[*index].1 += 1,
            None => {
                positions.insert(element.category.clone(), histogram.len());
                histogram.push((element.category.clone(), 1));
            }
        }
    }

    histogram.sort_by(|a, b| b.1.cmp(&a.1));
    histogram
}

#[derive(Debug, Clone, Serialize)]
pub struct RelationRow {
    pub parent_id: String,
    pub parent_category: Option<String>,
    pub parent_text: Option<String>,
    pub child_category: String,
    pub num_children: usize,
}

impl RelationRow {
    pub fn is_dangling(&self) -> bool {
        self.parent_category.is_none()
    }
}

pub fn relation_report(counts: &RelationCounts, store: &ElementStore) -> Vec<RelationRow> {
    counts
        .iter()
        .map(|entry| {
            let parent = store.get(&entry.parent_id);
            if parent.is_none() {
                tracing::warn!(
                    parent_id = %entry.parent_id,
                    child_category = %entry.child_category,
                    children = entry.count,
                    "parent reference does not resolve to any element"
                );
            }

            RelationRow {
                parent_id: entry.parent_id.clone(),
                parent_category: parent.map(|element| element.category.to_string()),
                parent_text: parent.map(|element| element.text.clone()),
                child_category: entry.child_category.to_string(),
                num_children: entry.count,
            }
        })
        .collect()
}
