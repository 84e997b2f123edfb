use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;

/// Namespace of the XSD built-in types
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// A schema component name: namespace URI plus local name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub namespace: Option<String>,
    pub local_name: String,
}

impl QualifiedName {
    pub fn new(namespace: Option<&str>, local_name: &str) -> Self {
        QualifiedName {
            namespace: namespace.map(str::to_string),
            local_name: local_name.to_string(),
        }
    }

    /// Name of an XSD built-in type
    pub fn builtin(local_name: &str) -> Self {
        Self::new(Some(XSD_NAMESPACE), local_name)
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{{{}}}{}", namespace, self.local_name),
            None => write!(f, "{}", self.local_name),
        }
    }
}

/// Index of a type definition inside a [`SchemaGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// Value classification of a simple type, taken from its built-in ancestor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    String,
    Integer,
    Decimal,
    Boolean,
    Date,
    Time,
    DateTime,
    Other,
}

const BUILTIN_TYPES: &[(&str, TypeKind)] = &[
    ("string", TypeKind::String),
    ("normalizedString", TypeKind::String),
    ("token", TypeKind::String),
    ("language", TypeKind::String),
    ("Name", TypeKind::String),
    ("NCName", TypeKind::String),
    ("NMTOKEN", TypeKind::String),
    ("NMTOKENS", TypeKind::String),
    ("ID", TypeKind::String),
    ("IDREF", TypeKind::String),
    ("IDREFS", TypeKind::String),
    ("ENTITY", TypeKind::String),
    ("ENTITIES", TypeKind::String),
    ("anyURI", TypeKind::String),
    ("QName", TypeKind::String),
    ("integer", TypeKind::Integer),
    ("int", TypeKind::Integer),
    ("long", TypeKind::Integer),
    ("short", TypeKind::Integer),
    ("byte", TypeKind::Integer),
    ("nonNegativeInteger", TypeKind::Integer),
    ("positiveInteger", TypeKind::Integer),
    ("unsignedLong", TypeKind::Integer),
    ("unsignedInt", TypeKind::Integer),
    ("unsignedShort", TypeKind::Integer),
    ("unsignedByte", TypeKind::Integer),
    ("negativeInteger", TypeKind::Integer),
    ("nonPositiveInteger", TypeKind::Integer),
    ("decimal", TypeKind::Decimal),
    ("float", TypeKind::Decimal),
    ("double", TypeKind::Decimal),
    ("boolean", TypeKind::Boolean),
    ("date", TypeKind::Date),
    ("time", TypeKind::Time),
    ("dateTime", TypeKind::DateTime),
    ("dateTimeStamp", TypeKind::DateTime),
    ("duration", TypeKind::Other),
    ("dayTimeDuration", TypeKind::Other),
    ("yearMonthDuration", TypeKind::Other),
    ("gYear", TypeKind::Other),
    ("gYearMonth", TypeKind::Other),
    ("gMonth", TypeKind::Other),
    ("gMonthDay", TypeKind::Other),
    ("gDay", TypeKind::Other),
    ("hexBinary", TypeKind::Other),
    ("base64Binary", TypeKind::Other),
    ("anySimpleType", TypeKind::Other),
    ("anyAtomicType", TypeKind::Other),
];

impl TypeKind {
    /// Classification of a built-in XSD type by local name
    pub fn from_builtin(name: &str) -> Option<TypeKind> {
        BUILTIN_TYPES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, kind)| *kind)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetKind {
    Enumeration,
    Pattern,
    Length,
    MinLength,
}

impl FacetKind {
    pub fn name(&self) -> &'static str {
        match self {
            FacetKind::Enumeration => "enumeration",
            FacetKind::Pattern => "pattern",
            FacetKind::Length => "length",
            FacetKind::MinLength => "minLength",
        }
    }
}

/// A constraining facet exactly as written in the schema
#[derive(Debug, Clone, PartialEq)]
pub struct Facet {
    pub kind: FacetKind,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// `type="prefix:local"` with the prefix resolved, looked up lazily
    Named(QualifiedName),
    /// Anonymous type declared inside the element
    Inline(TypeId),
    Absent,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementDescriptor {
    pub name: Option<String>,
    /// Global element this one refers to
    pub reference: Option<QualifiedName>,
    pub type_ref: TypeRef,
    /// Document the element was declared in; scopes name lookups
    pub document: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentModel {
    Sequence(Vec<ElementDescriptor>),
    /// Choice, all, group references and derived content
    Unsupported,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexTypeDescriptor {
    pub name: Option<String>,
    pub content: ContentModel,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BaseRef {
    Named(QualifiedName),
    Inline(TypeId),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleTypeDescriptor {
    pub name: Option<String>,
    pub kind: TypeKind,
    pub facets: Vec<Facet>,
    pub(crate) base: BaseRef,
    pub(crate) document: Option<usize>,
}

impl SimpleTypeDescriptor {
    pub(crate) fn restriction(document: usize, base: BaseRef, facets: Vec<Facet>) -> Self {
        SimpleTypeDescriptor {
            name: None,
            kind: TypeKind::Other,
            facets,
            base,
            document: Some(document),
        }
    }

    /// First facet of the given kind, in declaration order
    pub fn facet(&self, kind: FacetKind) -> Option<&Facet> {
        self.facets.iter().find(|facet| facet.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Complex(ComplexTypeDescriptor),
    Simple(SimpleTypeDescriptor),
}

/// What an element's declared type turned out to be
#[derive(Debug, Clone, Copy)]
pub enum TypeDescriptor<'a> {
    Complex(TypeId, &'a ComplexTypeDescriptor),
    Simple(&'a SimpleTypeDescriptor),
    Unknown,
}

/// One compiled schema document
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    pub location: Option<PathBuf>,
    pub target_namespace: Option<String>,
    /// Global elements in declaration order
    pub elements: Vec<ElementDescriptor>,
}

/// Arena holding every document and type definition of a compiled schema set.
///
/// Types refer to each other by qualified name or [`TypeId`], never by
/// pointer, so recursive and cross-document type graphs need no shared
/// ownership.
#[derive(Debug, Clone)]
pub struct SchemaGraph {
    documents: Vec<SchemaDocument>,
    types: Vec<TypeDefinition>,
    /// Named types, built-ins under [`XSD_NAMESPACE`]
    type_names: HashMap<QualifiedName, TypeId>,
    /// Global elements as (document, position)
    element_names: HashMap<QualifiedName, (usize, usize)>,
    main: usize,
}

impl SchemaGraph {
    pub(crate) fn new() -> Self {
        let mut graph = SchemaGraph {
            documents: vec![],
            types: vec![],
            type_names: HashMap::new(),
            element_names: HashMap::new(),
            main: 0,
        };

        for (name, kind) in BUILTIN_TYPES {
            let id = graph.push_type(TypeDefinition::Simple(SimpleTypeDescriptor {
                name: Some(name.to_string()),
                kind: *kind,
                facets: vec![],
                base: BaseRef::None,
                document: None,
            }));
            graph.type_names.insert(QualifiedName::builtin(name), id);
        }

        graph
    }

    pub(crate) fn add_document(
        &mut self,
        location: Option<PathBuf>,
        target_namespace: Option<String>,
    ) -> usize {
        self.documents.push(SchemaDocument {
            location,
            target_namespace: target_namespace.filter(|namespace| !namespace.is_empty()),
            elements: vec![],
        });
        self.documents.len() - 1
    }

    pub(crate) fn push_type(&mut self, definition: TypeDefinition) -> TypeId {
        self.types.push(definition);
        TypeId(self.types.len() - 1)
    }

    /// Name a type in the target namespace of `document`. The first
    /// registration of a name wins, so a document compiled twice keeps its
    /// first copy.
    pub(crate) fn register_type(&mut self, document: usize, name: String, id: TypeId) {
        if let Some(current) = self.documents.get(document) {
            let name = QualifiedName {
                namespace: current.target_namespace.clone(),
                local_name: name,
            };
            self.type_names.entry(name).or_insert(id);
        }
    }

    pub(crate) fn push_element(&mut self, document: usize, element: ElementDescriptor) {
        let Some(current) = self.documents.get_mut(document) else {
            return;
        };

        if let Some(local_name) = &element.name {
            let name = QualifiedName {
                namespace: current.target_namespace.clone(),
                local_name: local_name.clone(),
            };
            self.element_names
                .entry(name)
                .or_insert((document, current.elements.len()));
        }
        current.elements.push(element);
    }

    pub(crate) fn set_main(&mut self, document: usize) {
        self.main = document;
    }

    /// Resolve every simple type's classification through its base chain.
    pub(crate) fn link(&mut self) {
        let kinds: Vec<TypeKind> = (0..self.types.len())
            .map(|index| self.classify(TypeId(index)))
            .collect();

        for (definition, kind) in self.types.iter_mut().zip(kinds) {
            if let TypeDefinition::Simple(simple) = definition {
                simple.kind = kind;
            }
        }
    }

    fn classify(&self, id: TypeId) -> TypeKind {
        let mut visited = HashSet::new();
        let mut current = id;

        loop {
            if !visited.insert(current) {
                return TypeKind::Other;
            }

            let Some(TypeDefinition::Simple(simple)) = self.types.get(current.0) else {
                return TypeKind::Other;
            };

            let next = match (&simple.base, simple.document) {
                (BaseRef::Named(name), Some(document)) => self.lookup_type(document, name),
                (BaseRef::Inline(base), _) => Some(*base),
                _ => return simple.kind,
            };

            match next {
                Some(next) => current = next,
                None => return TypeKind::Other,
            }
        }
    }

    pub fn documents(&self) -> &[SchemaDocument] {
        &self.documents
    }

    pub fn main_document(&self) -> Option<&SchemaDocument> {
        self.documents.get(self.main)
    }

    /// Global elements of the main document
    pub fn root_elements(&self) -> &[ElementDescriptor] {
        match self.main_document() {
            Some(document) => &document.elements,
            None => &[],
        }
    }

    pub fn target_namespace(&self) -> Option<&str> {
        self.main_document()
            .and_then(|document| document.target_namespace.as_deref())
    }

    /// A name without a namespace that is not declared as such is read in the
    /// target namespace of the document using it, as for a chameleon include.
    fn in_document_namespace(&self, document: usize, name: &QualifiedName) -> Option<QualifiedName> {
        if name.namespace.is_some() {
            return None;
        }

        let namespace = self.documents.get(document)?.target_namespace.as_deref()?;
        Some(QualifiedName::new(Some(namespace), &name.local_name))
    }

    /// Type named `name`, as referenced from `document`
    pub fn lookup_type(&self, document: usize, name: &QualifiedName) -> Option<TypeId> {
        self.type_names.get(name).copied().or_else(|| {
            self.in_document_namespace(document, name)
                .and_then(|name| self.type_names.get(&name).copied())
        })
    }

    /// Global element named `name`, as referenced from `document`
    pub fn lookup_element(&self, document: usize, name: &QualifiedName) -> Option<&ElementDescriptor> {
        let position = self.element_names.get(name).or_else(|| {
            self.in_document_namespace(document, name)
                .and_then(|name| self.element_names.get(&name))
        })?;

        let (document, index) = *position;
        self.documents.get(document)?.elements.get(index)
    }

    /// Follow `ref="..."` to the referenced global element. Anything else, or
    /// a reference that does not resolve, comes back unchanged.
    pub fn dereference<'a>(&'a self, element: &'a ElementDescriptor) -> &'a ElementDescriptor {
        match (&element.name, &element.reference) {
            (None, Some(reference)) => self
                .lookup_element(element.document, reference)
                .unwrap_or(element),
            _ => element,
        }
    }

    pub fn element_type(&self, element: &ElementDescriptor) -> TypeDescriptor<'_> {
        let id = match &element.type_ref {
            TypeRef::Inline(id) => Some(*id),
            TypeRef::Named(name) => self.lookup_type(element.document, name),
            TypeRef::Absent => None,
        };

        match id.and_then(|id| self.types.get(id.0).map(|definition| (id, definition))) {
            Some((id, TypeDefinition::Complex(complex))) => TypeDescriptor::Complex(id, complex),
            Some((_, TypeDefinition::Simple(simple))) => TypeDescriptor::Simple(simple),
            None => TypeDescriptor::Unknown,
        }
    }

    pub fn type_definition(&self, id: TypeId) -> Option<&TypeDefinition> {
        self.types.get(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(local_name: &str) -> TypeRef {
        TypeRef::Named(QualifiedName::builtin(local_name))
    }

    fn element(name: &str, type_ref: TypeRef, document: usize) -> ElementDescriptor {
        ElementDescriptor {
            name: Some(name.to_string()),
            reference: None,
            type_ref,
            document,
        }
    }

    fn named_simple(graph: &mut SchemaGraph, document: usize, name: &str, base: BaseRef) -> TypeId {
        let id = graph.push_type(TypeDefinition::Simple(SimpleTypeDescriptor::restriction(
            document,
            base,
            vec![],
        )));
        graph.register_type(document, name.to_string(), id);
        id
    }

    fn kind_of(graph: &SchemaGraph, id: TypeId) -> TypeKind {
        match graph.type_definition(id) {
            Some(TypeDefinition::Simple(simple)) => simple.kind,
            _ => panic!("not a simple type"),
        }
    }

    #[test]
    fn test_builtin_classification() {
        assert_eq!(TypeKind::from_builtin("int"), Some(TypeKind::Integer));
        assert_eq!(TypeKind::from_builtin("negativeInteger"), Some(TypeKind::Integer));
        assert_eq!(TypeKind::from_builtin("nonPositiveInteger"), Some(TypeKind::Integer));
        assert_eq!(TypeKind::from_builtin("double"), Some(TypeKind::Decimal));
        assert_eq!(TypeKind::from_builtin("dateTime"), Some(TypeKind::DateTime));
        assert_eq!(TypeKind::from_builtin("anyType"), None);
    }

    #[test]
    fn test_qualified_name_display() {
        assert_eq!(QualifiedName::new(Some("urn:a"), "x").to_string(), "{urn:a}x");
        assert_eq!(QualifiedName::new(None, "x").to_string(), "x");
    }

    #[test]
    fn test_kind_follows_base_chain() {
        let mut graph = SchemaGraph::new();
        let document = graph.add_document(None, None);
        named_simple(
            &mut graph,
            document,
            "Amount",
            BaseRef::Named(QualifiedName::builtin("decimal")),
        );
        let price = named_simple(
            &mut graph,
            document,
            "Price",
            BaseRef::Named(QualifiedName::new(None, "Amount")),
        );
        graph.link();

        assert_eq!(kind_of(&graph, price), TypeKind::Decimal);
    }

    #[test]
    fn test_cyclic_base_chain_is_other() {
        let mut graph = SchemaGraph::new();
        let document = graph.add_document(None, None);
        let first = named_simple(&mut graph, document, "A", BaseRef::Named(QualifiedName::new(None, "B")));
        named_simple(&mut graph, document, "B", BaseRef::Named(QualifiedName::new(None, "A")));
        graph.link();

        assert_eq!(kind_of(&graph, first), TypeKind::Other);
    }

    #[test]
    fn test_lookup_by_namespace() {
        let mut graph = SchemaGraph::new();
        let main = graph.add_document(None, Some("urn:main".to_string()));
        let other = graph.add_document(None, Some("urn:other".to_string()));

        let foreign = named_simple(&mut graph, other, "Code", BaseRef::None);
        let local = named_simple(&mut graph, main, "Code", BaseRef::None);

        assert_eq!(graph.lookup_type(main, &QualifiedName::new(Some("urn:main"), "Code")), Some(local));
        assert_eq!(graph.lookup_type(main, &QualifiedName::new(Some("urn:other"), "Code")), Some(foreign));
        assert_eq!(graph.lookup_type(other, &QualifiedName::new(Some("urn:main"), "Code")), Some(local));
        assert!(graph.lookup_type(main, &QualifiedName::new(Some("urn:third"), "Code")).is_none());
    }

    #[test]
    fn test_unqualified_name_uses_document_namespace() {
        let mut graph = SchemaGraph::new();
        let main = graph.add_document(None, Some("urn:main".to_string()));
        let plain = graph.add_document(None, None);
        let local = named_simple(&mut graph, main, "Local", BaseRef::None);
        let unqualified = named_simple(&mut graph, plain, "Plain", BaseRef::None);

        let local_name = QualifiedName::new(None, "Local");
        let plain_name = QualifiedName::new(None, "Plain");

        assert_eq!(graph.lookup_type(main, &local_name), Some(local));
        assert!(graph.lookup_type(plain, &local_name).is_none());
        assert_eq!(graph.lookup_type(main, &plain_name), Some(unqualified));
    }

    #[test]
    fn test_builtins_only_in_schema_namespace() {
        let mut graph = SchemaGraph::new();
        let document = graph.add_document(None, None);
        let user_date = named_simple(&mut graph, document, "date", BaseRef::None);

        let builtin = graph.lookup_type(document, &QualifiedName::builtin("date")).unwrap();
        assert_ne!(builtin, user_date);
        assert_eq!(kind_of(&graph, builtin), TypeKind::Date);
        assert_eq!(graph.lookup_type(document, &QualifiedName::new(None, "date")), Some(user_date));
        assert!(graph.lookup_type(document, &QualifiedName::new(None, "string")).is_none());
    }

    #[test]
    fn test_element_type_variants() {
        let mut graph = SchemaGraph::new();
        let document = graph.add_document(None, None);
        let complex = graph.push_type(TypeDefinition::Complex(ComplexTypeDescriptor {
            name: None,
            content: ContentModel::Unsupported,
        }));

        let inline = element("a", TypeRef::Inline(complex), document);
        let builtin = element("b", xs("boolean"), document);
        let missing = element("c", TypeRef::Named(QualifiedName::new(None, "Nowhere")), document);
        let absent = element("d", TypeRef::Absent, document);

        assert!(matches!(graph.element_type(&inline), TypeDescriptor::Complex(id, _) if id == complex));
        assert!(matches!(
            graph.element_type(&builtin),
            TypeDescriptor::Simple(simple) if simple.kind == TypeKind::Boolean
        ));
        assert!(matches!(graph.element_type(&missing), TypeDescriptor::Unknown));
        assert!(matches!(graph.element_type(&absent), TypeDescriptor::Unknown));
    }

    #[test]
    fn test_dereference_matches_namespace() {
        let mut graph = SchemaGraph::new();
        let main = graph.add_document(None, Some("urn:main".to_string()));
        let other = graph.add_document(None, Some("urn:other".to_string()));
        graph.push_element(main, element("note", xs("string"), main));
        graph.push_element(other, element("note", xs("int"), other));

        let reference = ElementDescriptor {
            name: None,
            reference: Some(QualifiedName::new(Some("urn:other"), "note")),
            type_ref: TypeRef::Absent,
            document: main,
        };
        let unqualified = ElementDescriptor {
            reference: Some(QualifiedName::new(None, "note")),
            ..reference.clone()
        };
        let dangling = ElementDescriptor {
            reference: Some(QualifiedName::new(Some("urn:third"), "note")),
            ..reference.clone()
        };

        let resolved = graph.dereference(&reference);
        assert_eq!(resolved.name.as_deref(), Some("note"));
        assert_eq!(resolved.document, other);
        assert_eq!(graph.dereference(&unqualified).document, main);
        assert!(graph.dereference(&dangling).name.is_none());
    }
}
