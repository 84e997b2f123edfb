use std::path::PathBuf;

use thiserror::Error;

/// Sample generator error
///
/// Everything that can stop a generation pass. Irregularities inside a loaded
/// schema (unknown types, unsupported particles, unusable patterns) are not
/// errors; they are absorbed into placeholder output.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The requested schema file does not exist or cannot be canonicalized
    #[error("Schema not found: {path}")]
    SchemaNotFound { path: PathBuf },

    /// `xsd-parser` rejected a schema document or one of its includes
    #[error("Schema parsing error: {location} - {details}")]
    SchemaParse { location: String, details: String },

    /// The main schema could not be identified among the compiled documents
    #[error("Could not read the main schema from {location}")]
    MainSchemaMissing { location: String },

    /// A length facet that is not a non-negative integer
    #[error("Malformed {facet} facet on element '{element}': '{value}' is not a non-negative integer")]
    MalformedFacet {
        element: String,
        facet: &'static str,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writer error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Generated XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GeneratorError>;
