use crate::error::Result;
use crate::generate::ValueGenerator;
use crate::generate_output::OutputSink;
use crate::schema_graph::{
    ComplexTypeDescriptor, ContentModel, ElementDescriptor, SchemaGraph, TypeDescriptor, TypeId,
};
use std::io::Write;
use tracing::warn;

/// Walks element declarations and writes a sample element for each.
///
/// Every branch has a fallback, so the only errors are those of the sink and
/// of malformed length facets.
pub struct ElementGenerator<'a> {
    graph: &'a SchemaGraph,
    values: &'a mut ValueGenerator,
    /// Complex types being expanded on the current path
    active: Vec<TypeId>,
}

impl<'a> ElementGenerator<'a> {
    pub fn new(graph: &'a SchemaGraph, values: &'a mut ValueGenerator) -> Self {
        ElementGenerator {
            graph,
            values,
            active: vec![],
        }
    }

    /// Emit a top-level element qualified with `namespace`
    pub fn generate_root<W: Write>(
        &mut self,
        element: &ElementDescriptor,
        namespace: Option<&str>,
        sink: &mut OutputSink<W>,
    ) -> Result<()> {
        self.generate_element(element, namespace, sink)
    }

    fn generate_element<W: Write>(
        &mut self,
        element: &ElementDescriptor,
        namespace: Option<&str>,
        sink: &mut OutputSink<W>,
    ) -> Result<()> {
        let graph = self.graph;
        let element = graph.dereference(element);
        let Some(name) = element.name.as_deref() else {
            return Ok(());
        };

        match graph.element_type(element) {
            TypeDescriptor::Complex(id, complex) => {
                self.generate_complex(name, namespace, id, complex, sink)
            }
            TypeDescriptor::Simple(simple) => {
                let value = self.values.generate(name, simple)?;
                write_text_element(name, namespace, &value, sink)
            }
            TypeDescriptor::Unknown => {
                write_text_element(name, namespace, &format!("Sample_{}", name), sink)
            }
        }
    }

    fn generate_complex<W: Write>(
        &mut self,
        name: &str,
        namespace: Option<&str>,
        id: TypeId,
        complex: &ComplexTypeDescriptor,
        sink: &mut OutputSink<W>,
    ) -> Result<()> {
        let children = match &complex.content {
            ContentModel::Sequence(children) => children,
            ContentModel::Unsupported => return sink.empty(name, namespace),
        };

        if self.active.contains(&id) {
            warn!("Element '{}' recurses into its own type, leaving it empty", name);
            return sink.empty(name, namespace);
        }

        if children.is_empty() {
            return sink.empty(name, namespace);
        }

        sink.start(name, namespace)?;
        self.active.push(id);
        for child in children {
            self.generate_element(child, None, sink)?;
        }
        self.active.pop();
        sink.end(name)
    }
}

fn write_text_element<W: Write>(
    name: &str,
    namespace: Option<&str>,
    value: &str,
    sink: &mut OutputSink<W>,
) -> Result<()> {
    sink.start(name, namespace)?;
    sink.text(value)?;
    sink.end(name)
}
