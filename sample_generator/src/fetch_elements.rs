use crate::fetch_types::get_element_type;
use crate::schema_graph::SchemaGraph;
use xsd_parser::models::schema::xs::SchemaContent;

/// Record the global elements of one document in declaration order
pub(crate) fn fetch_elements(graph: &mut SchemaGraph, document: usize, contents: &[SchemaContent]) {
    for content in contents {
        if let SchemaContent::Element(x) = content {
            let element = get_element_type(graph, document, x);
            graph.push_element(document, element);
        }
    }
}
