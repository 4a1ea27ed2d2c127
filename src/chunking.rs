use std::mem;

use serde::Serialize;

use crate::element::Category;
use crate::error::StructureError;
use crate::structure::AnnotatedElement;

pub const DEFAULT_MIN_CHARS: usize = 100;
pub const DEFAULT_MAX_CHARS: usize = 3000;

const ELEMENT_SEPARATOR: char = '\n';
const CHUNK_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkingConfig {
    pub min_chars: usize,
    pub max_chars: usize,
    pub title_category: Category,
}

impl ChunkingConfig {
    pub fn new(min_chars: usize, max_chars: usize) -> Result<Self, StructureError> {
        if min_chars == 0 {
            return Err(StructureError::Configuration(
                "min_chars must be positive".to_string(),
            ));
        }
        if min_chars >= max_chars {
            return Err(StructureError::Configuration(format!(
                "min_chars ({min_chars}) must be smaller than max_chars ({max_chars})"
            )));
        }

        Ok(Self {
            min_chars,
            max_chars,
            title_category: Category::Title,
        })
    }

    pub fn with_title_category(mut self, title_category: Category) -> Self {
        self.title_category = title_category;
        self
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_chars: DEFAULT_MAX_CHARS,
            title_category: Category::Title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub section: String,
    pub text: String,
    pub element_ids: Vec<String>,
    pub char_len: usize,
    pub oversize: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub text: String,
}

impl Document {
    pub fn from_chunks(chunks: &[Chunk]) -> Self {
        let text = chunks
            .iter()
            .map(|chunk| chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(CHUNK_SEPARATOR);
        Self { text }
    }

    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    pub chunks: Vec<Chunk>,
    pub document: Document,
}

impl Aggregation {
    pub fn oversize_count(&self) -> usize {
        self.chunks.iter().filter(|chunk| chunk.oversize).count()
    }
}

#[derive(Debug, Default)]
struct OpenChunk {
    section: String,
    text: String,
    element_ids: Vec<String>,
    char_len: usize,
}

impl OpenChunk {
    fn is_empty(&self) -> bool {
        self.element_ids.is_empty()
    }

    fn len_after(&self, extra: usize) -> usize {
        if self.is_empty() {
            extra
        } else {
            self.char_len + 1 + extra
        }
    }

    fn push(&mut self, id: &str, text: &str, len: usize) {
        if !self.is_empty() {
            self.text.push(ELEMENT_SEPARATOR);
            self.char_len += 1;
        }
        self.text.push_str(text);
        self.char_len += len;
        self.element_ids.push(id.to_string());
    }

    fn take(&mut self, max_chars: usize) -> Option<Chunk> {
        if self.is_empty() {
            return None;
        }

        let open = mem::take(self);
        let oversize = open.element_ids.len() == 1 && open.char_len > max_chars;
        Some(Chunk {
            section: open.section,
            text: open.text,
            element_ids: open.element_ids,
            char_len: open.char_len,
            oversize,
        })
    }
}

pub fn aggregate(elements: &[AnnotatedElement], config: &ChunkingConfig) -> Aggregation {
    let mut chunks = Vec::new();
    let mut open = OpenChunk::default();
    let mut carried_section: Option<String> = None;

    for annotated in elements {
        let element = &annotated.element;
        if element.text.is_empty() {
            continue;
        }

        let len = element.char_len();
        let is_title = element.category == config.title_category;

        if is_title && !open.is_empty() && open.char_len >= config.min_chars {
            chunks.extend(open.take(config.max_chars));
            carried_section = None;
        }

        if !open.is_empty() && open.len_after(len) > config.max_chars {
            carried_section = Some(open.section.clone());
            chunks.extend(open.take(config.max_chars));
        }

        if open.is_empty() {
            open.section = if is_title {
                element.text.clone()
            } else {
                carried_section
                    .take()
                    .unwrap_or_else(|| annotated.section.clone())
            };
            carried_section = None;
        }

        open.push(&element.id, &element.text, len);
    }

    chunks.extend(open.take(config.max_chars));

    let document = Document::from_chunks(&chunks);
    tracing::debug!(
        elements = elements.len(),
        chunks = chunks.len(),
        document_chars = document.char_len(),
        "aggregated elements into chunks"
    );

    Aggregation { chunks, document }
}
