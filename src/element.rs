use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const PARENT_ID_KEY: &str = "parent_id";
pub const SECTION_KEY: &str = "section";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Title,
    NarrativeText,
    UncategorizedText,
    ListItem,
    Table,
    Header,
    Footer,
    Image,
    FigureCaption,
    Formula,
    PageBreak,
    PageNumber,
    Address,
    EmailAddress,
    CodeSnippet,
    CompositeElement,
    Other(String),
}

impl Category {
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "title" => Self::Title,
            "narrativetext" => Self::NarrativeText,
            "uncategorizedtext" => Self::UncategorizedText,
            "listitem" => Self::ListItem,
            "table" => Self::Table,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "image" => Self::Image,
            "figurecaption" => Self::FigureCaption,
            "formula" => Self::Formula,
            "pagebreak" => Self::PageBreak,
            "pagenumber" => Self::PageNumber,
            "address" => Self::Address,
            "emailaddress" => Self::EmailAddress,
            "codesnippet" => Self::CodeSnippet,
            "compositeelement" => Self::CompositeElement,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Title => "Title",
            Self::NarrativeText => "NarrativeText",
            Self::UncategorizedText => "UncategorizedText",
            Self::ListItem => "ListItem",
            Self::Table => "Table",
            Self::Header => "Header",
            Self::Footer => "Footer",
            Self::Image => "Image",
            Self::FigureCaption => "FigureCaption",
            Self::Formula => "Formula",
            Self::PageBreak => "PageBreak",
            Self::PageNumber => "PageNumber",
            Self::Address => "Address",
            Self::EmailAddress => "EmailAddress",
            Self::CodeSnippet => "CodeSnippet",
            Self::CompositeElement => "CompositeElement",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    #[serde(alias = "element_id")]
    pub id: String,
    #[serde(alias = "type")]
    pub category: Category,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Element {
    pub fn new(id: impl Into<String>, category: Category, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category,
            text: text.into(),
            metadata: Map::new(),
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.metadata
            .insert(PARENT_ID_KEY.to_string(), Value::String(parent_id.into()));
        self
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.metadata
            .get(PARENT_ID_KEY)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
    positions: HashMap<String, usize>,
}

impl ElementStore {
    pub fn new(elements: Vec<Element>) -> Self {
        let mut positions = HashMap::with_capacity(elements.len());
        for (index, element) in elements.iter().enumerate() {
            positions.entry(element.id.clone()).or_insert(index);
        }

        Self {
            elements,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.elements
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.positions
            .get(id)
            .and_then(|index| self.elements.get(*index))
    }

    pub fn filter_by_category(
        &self,
        category: &Category,
        max_items: Option<usize>,
    ) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|element| &element.category == category)
            .take(max_items.unwrap_or(usize::MAX))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ElementStore {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
