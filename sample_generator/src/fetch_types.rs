use crate::schema_graph::{
    BaseRef, ComplexTypeDescriptor, ContentModel, ElementDescriptor, Facet, FacetKind,
    QualifiedName, SchemaGraph, SimpleTypeDescriptor, TypeDefinition, TypeId, TypeRef,
};
use xsd_parser::models::schema::QName;
use xsd_parser::models::schema::xs::{
    ComplexBaseType, ComplexBaseTypeContent, ElementType, ElementTypeContent, Facet as XsFacet,
    FacetType, GroupType, GroupTypeContent, Restriction, RestrictionContent, SchemaContent,
    SimpleBaseType, SimpleBaseTypeContent,
};

/// Name with its prefix already resolved by the parser against the
/// `xmlns` declarations in scope
pub(crate) fn get_qname(qname: &QName) -> QualifiedName {
    QualifiedName {
        namespace: qname.namespace().map(|namespace| namespace.to_string()),
        local_name: String::from_utf8_lossy(qname.local_name()).into_owned(),
    }
}

fn get_facet_type(kind: FacetKind, facet_type: &FacetType) -> Facet {
    Facet {
        kind,
        value: facet_type.value.clone(),
    }
}

fn get_facet(facet: &XsFacet) -> Option<Facet> {
    match facet {
        XsFacet::Enumeration(x) => Some(get_facet_type(FacetKind::Enumeration, x)),
        XsFacet::Pattern(x) => Some(get_facet_type(FacetKind::Pattern, x)),
        XsFacet::Length(x) => Some(get_facet_type(FacetKind::Length, x)),
        XsFacet::MinLength(x) => Some(get_facet_type(FacetKind::MinLength, x)),
        _ => None,
    }
}

fn get_restriction(
    graph: &mut SchemaGraph,
    document: usize,
    restriction: &Restriction,
) -> SimpleTypeDescriptor {
    let mut base = match &restriction.base {
        Some(base) => BaseRef::Named(get_qname(base)),
        None => BaseRef::None,
    };

    let mut facets = vec![];
    for content in &restriction.content {
        match content {
            RestrictionContent::Annotation(_) => (),
            RestrictionContent::SimpleType(x) => {
                base = BaseRef::Inline(get_simple_type(graph, document, x));
            }
            RestrictionContent::Facet(x) => facets.extend(get_facet(x)),
        }
    }

    SimpleTypeDescriptor::restriction(document, base, facets)
}

pub(crate) fn get_simple_type(
    graph: &mut SchemaGraph,
    document: usize,
    simple: &SimpleBaseType,
) -> TypeId {
    // Lists and unions keep the unclassified default.
    let mut descriptor = SimpleTypeDescriptor::restriction(document, BaseRef::None, vec![]);

    for content in &simple.content {
        if let SimpleBaseTypeContent::Restriction(x) = content {
            descriptor = get_restriction(graph, document, x);
        }
    }

    descriptor.name = simple.name.clone();
    graph.push_type(TypeDefinition::Simple(descriptor))
}

fn get_sequence(graph: &mut SchemaGraph, document: usize, group: &GroupType) -> Vec<ElementDescriptor> {
    let mut elements = vec![];
    for content in &group.content {
        if let GroupTypeContent::Element(x) = content {
            elements.push(get_element_type(graph, document, x));
        }
    }

    elements
}

pub(crate) fn get_complex_type(
    graph: &mut SchemaGraph,
    document: usize,
    complex: &ComplexBaseType,
) -> TypeId {
    let mut content = ContentModel::Unsupported;

    for item in &complex.content {
        match item {
            ComplexBaseTypeContent::Sequence(x) => {
                content = ContentModel::Sequence(get_sequence(graph, document, x));
                break;
            }
            ComplexBaseTypeContent::Group(_)
            | ComplexBaseTypeContent::All(_)
            | ComplexBaseTypeContent::Choice(_)
            | ComplexBaseTypeContent::SimpleContent(_)
            | ComplexBaseTypeContent::ComplexContent(_) => break,
            _ => (),
        }
    }

    graph.push_type(TypeDefinition::Complex(ComplexTypeDescriptor {
        name: complex.name.clone(),
        content,
    }))
}

pub(crate) fn get_element_type(
    graph: &mut SchemaGraph,
    document: usize,
    element: &ElementType,
) -> ElementDescriptor {
    let mut type_ref = match &element.type_ {
        Some(type_name) => TypeRef::Named(get_qname(type_name)),
        None => TypeRef::Absent,
    };

    for content in &element.content {
        match content {
            ElementTypeContent::SimpleType(x) => {
                type_ref = TypeRef::Inline(get_simple_type(graph, document, x));
            }
            ElementTypeContent::ComplexType(x) => {
                type_ref = TypeRef::Inline(get_complex_type(graph, document, x));
            }
            _ => (),
        }
    }

    ElementDescriptor {
        name: element.name.clone(),
        reference: element.ref_.as_ref().map(get_qname),
        type_ref,
        document,
    }
}

/// Register the named top-level simple and complex types of one document
pub(crate) fn fetch_types(graph: &mut SchemaGraph, document: usize, contents: &[SchemaContent]) {
    for content in contents {
        let (name, id) = match content {
            SchemaContent::SimpleType(x) => (x.name.clone(), get_simple_type(graph, document, x)),
            SchemaContent::ComplexType(x) => (x.name.clone(), get_complex_type(graph, document, x)),
            _ => continue,
        };

        if let Some(name) = name {
            graph.register_type(document, name, id);
        }
    }
}
