use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("malformed record on line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("section not found: {0}")]
    SectionNotFound(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl StructureError {
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedRecord { line, .. } => Some(*line),
            _ => None,
        }
    }
}
