use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while scanning a page or writing its catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Empty input or a document without a `<body>` element
    #[error("Parse error: {0}")]
    Parse(String),

    /// An attribute the caller asked for is not present on the element.
    ///
    /// The scanner never lets this escape: the field is defaulted and traversal continues.
    #[error("Element <{tag}> has no '{attribute}' attribute")]
    AttributeMissing { tag: String, attribute: String },

    /// Writing the output document failed
    #[error("IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options that cannot produce a valid document
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// `output_document` was called before any document was created
    #[error("No document has been created yet")]
    NoDocument,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io { path: path.into(), source }
    }

    /// Whether the error only describes a gap in an element's attributes
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CatalogError::AttributeMissing { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
