use crate::config::GeneratorConfig;
use crate::error::{GeneratorError, Result};
use crate::regex_generator::RegexGenerator;
use crate::schema_graph::{Facet, FacetKind, SimpleTypeDescriptor, TypeKind};
use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

/// Character repeated for length and minLength samples
pub const FILLER: char = 'A';

/// Order in which facets decide a value. The first facet present wins and
/// later ones are never consulted.
pub const FACET_PRECEDENCE: [FacetKind; 4] = [
    FacetKind::Enumeration,
    FacetKind::Pattern,
    FacetKind::Length,
    FacetKind::MinLength,
];

/// Picks the text of simple-typed elements.
pub struct ValueGenerator {
    patterns: RegexGenerator,
    timestamp: Option<DateTime<FixedOffset>>,
}

impl ValueGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        ValueGenerator {
            patterns: RegexGenerator::new(config.seed, config.max_repeat),
            timestamp: config.timestamp,
        }
    }

    pub fn generate(&mut self, element_name: &str, simple: &SimpleTypeDescriptor) -> Result<String> {
        for kind in FACET_PRECEDENCE {
            if let Some(facet) = simple.facet(kind) {
                return self.generate_from_facet(element_name, facet);
            }
        }

        Ok(self.generate_default(element_name, simple.kind))
    }

    fn generate_from_facet(&mut self, element_name: &str, facet: &Facet) -> Result<String> {
        match facet.kind {
            FacetKind::Enumeration => Ok(facet.value.clone()),
            FacetKind::Pattern => Ok(self.patterns.generate(&facet.value)),
            FacetKind::Length | FacetKind::MinLength => {
                let count = parse_length(element_name, facet)?;
                Ok(FILLER.to_string().repeat(count))
            }
        }
    }

    pub fn generate_default(&self, element_name: &str, kind: TypeKind) -> String {
        match kind {
            TypeKind::String | TypeKind::Other => format!("Sample_{}", element_name),
            TypeKind::Integer => "123".to_string(),
            TypeKind::Decimal => "123.45".to_string(),
            TypeKind::Boolean => "true".to_string(),
            TypeKind::Date => self.now().format("%Y-%m-%d").to_string(),
            TypeKind::Time => self.now().format("%H:%M:%S").to_string(),
            TypeKind::DateTime => self.now().to_rfc3339_opts(SecondsFormat::AutoSi, false),
        }
    }

    fn now(&self) -> DateTime<FixedOffset> {
        self.timestamp
            .unwrap_or_else(|| Local::now().fixed_offset())
    }
}

fn parse_length(element_name: &str, facet: &Facet) -> Result<usize> {
    facet
        .value
        .trim()
        .parse::<usize>()
        .map_err(|_| GeneratorError::MalformedFacet {
            element: element_name.to_string(),
            facet: facet.kind.name(),
            value: facet.value.clone(),
        })
}
