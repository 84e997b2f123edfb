use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::fetch_elements::fetch_elements;
use crate::fetch_types::fetch_types;
use crate::schema_graph::SchemaGraph;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;
use xsd_parser::pipeline::parser::resolver::FileResolver;
use xsd_parser::{Parser, Schemas};

fn parse_schema_file(path: &Path) -> Result<Schemas> {
    let schemas = Parser::new()
        .with_resolver(FileResolver::new())
        .with_default_namespaces()
        .add_schema_from_file(path.to_path_buf())
        .map_err(|err| GeneratorError::SchemaParse {
            location: path.display().to_string(),
            details: err.to_string(),
        })?;

    Ok(schemas.finish())
}

fn parse_schema_str(xsd: &str) -> Result<Schemas> {
    let schemas = Parser::new()
        .with_resolver(FileResolver::new())
        .with_default_namespaces()
        .add_schema_from_str(xsd)
        .map_err(|err| GeneratorError::SchemaParse {
            location: "<string>".to_string(),
            details: err.to_string(),
        })?;

    Ok(schemas.finish())
}

/// Add every document of a parsed schema set to the graph.
///
/// The first document is the one that was asked for; the rest were pulled in
/// through includes and imports. Returns the index of the first document.
fn add_documents(
    graph: &mut SchemaGraph,
    schemas: &Schemas,
    location: Option<PathBuf>,
) -> Option<usize> {
    let mut first = None;

    for (_schema_id, schema) in schemas.schemas() {
        let document_location = match first {
            None => location.clone(),
            Some(_) => None,
        };

        let document = graph.add_document(document_location, schema.schema.target_namespace.clone());
        fetch_types(graph, document, &schema.schema.content);
        fetch_elements(graph, document, &schema.schema.content);

        first.get_or_insert(document);
    }

    first
}

/// Schema documents under `directory`, sorted by path for a stable load order
pub fn discover_schema_files(directory: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files = vec![];

    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable directory entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let matches = entry
            .path()
            .extension()
            .and_then(|found| found.to_str())
            .is_some_and(|found| found.eq_ignore_ascii_case(extension));
        if !matches {
            continue;
        }

        match entry.path().canonicalize() {
            Ok(path) => files.push(path),
            Err(err) => warn!("Skipping {}: {}", entry.path().display(), err),
        }
    }

    files
}

/// Compile the schema at `path` together with every schema document in its
/// directory subtree, and mark `path` as the main schema.
pub fn load_schema_graph(path: &Path, config: &GeneratorConfig) -> Result<SchemaGraph> {
    let main_path = path
        .canonicalize()
        .ok()
        .filter(|canonical| canonical.is_file())
        .ok_or_else(|| GeneratorError::SchemaNotFound {
            path: path.to_path_buf(),
        })?;

    let mut graph = SchemaGraph::new();
    let mut main = None;

    if let Some(directory) = main_path.parent() {
        let files = discover_schema_files(directory, &config.schema_extension);
        debug!(
            "Compiling {} schema documents under {}",
            files.len(),
            directory.display()
        );

        for file in files {
            let schemas = parse_schema_file(&file)?;
            let document = add_documents(&mut graph, &schemas, Some(file.clone()));
            if file == main_path && main.is_none() {
                main = document;
            }
        }
    }

    let main = match main {
        Some(main) => main,
        None => {
            debug!(
                "{} was not among the discovered schemas, loading it directly",
                main_path.display()
            );
            let schemas = parse_schema_file(&main_path)?;
            add_documents(&mut graph, &schemas, Some(main_path.clone())).ok_or_else(|| {
                GeneratorError::MainSchemaMissing {
                    location: main_path.display().to_string(),
                }
            })?
        }
    };

    graph.set_main(main);
    graph.link();

    Ok(graph)
}

/// Compile a single in-memory schema document as the main schema
pub fn load_schema_str(xsd: &str) -> Result<SchemaGraph> {
    let schemas = parse_schema_str(xsd)?;

    let mut graph = SchemaGraph::new();
    let main = add_documents(&mut graph, &schemas, None).ok_or_else(|| {
        GeneratorError::MainSchemaMissing {
            location: "<string>".to_string(),
        }
    })?;

    graph.set_main(main);
    graph.link();

    Ok(graph)
}
