pub mod config;
pub mod element_generator;
pub mod error;
mod fetch_elements;
mod fetch_types;
pub mod generate;
pub mod generate_output;
pub mod regex_generator;
pub mod schema_graph;
pub mod schema_loader;

pub use crate::config::GeneratorConfig;
pub use crate::error::{GeneratorError, Result};
use crate::generate_output::generate_output;
use std::path::Path;
use tracing::debug;

/// Sample XML generator
///
/// Holds the configuration for a generation pass. Every call to
/// [`SampleGenerator::generate`] compiles the schema afresh and starts from the
/// configured seed, so repeated calls produce the same document.
#[derive(Debug, Clone, Default)]
pub struct SampleGenerator {
    config: GeneratorConfig,
}

impl SampleGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        SampleGenerator { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a sample document for the schema file at `path`.
    ///
    /// Every schema document in the directory of `path` (and below it) is
    /// compiled alongside it, so types declared in sibling files resolve.
    /// The document at `path` is the main schema and its global elements
    /// become the top-level elements of the output.
    pub fn generate(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        debug!("Generating sample for {}", path.display());

        let graph = schema_loader::load_schema_graph(path, &self.config)?;
        generate_output(&graph, &self.config)
    }

    /// Generate a sample document from schema text held in memory.
    ///
    /// Only the given document is compiled; there is no directory to scan.
    pub fn generate_from_str(&self, xsd: &str) -> Result<String> {
        let graph = schema_loader::load_schema_str(xsd)?;
        generate_output(&graph, &self.config)
    }
}

/// Generate an XML string containing sample data
///
/// Using the path of an XSD file, generate an XML document of the same
/// format filled with sample values, using the default configuration.
///
/// The schema is compiled with the `xsd_parser` crate. A missing file returns
/// `GeneratorError::SchemaNotFound` and a schema the parser rejects returns
/// `GeneratorError::SchemaParse`.
///
/// Element types that cannot be resolved, and content models other than a
/// plain sequence, do not fail the generation: they produce placeholder text
/// or an empty element. A `length` or `minLength` facet that is not a
/// non-negative integer returns `GeneratorError::MalformedFacet`.
pub fn generate_xml(path: impl AsRef<Path>) -> Result<String> {
    SampleGenerator::default().generate(path)
}

/// Generate an XML string from XSD text, using the default configuration
pub fn generate_xml_from_str(xsd: &str) -> Result<String> {
    SampleGenerator::default().generate_from_str(xsd)
}
