use chrono::{DateTime, FixedOffset};

/// Seed used when the caller does not pick one, so repeated runs agree.
pub const DEFAULT_SEED: u64 = 0x5eed_5a3b_1e00_0001;

/// Settings for one generation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Spaces per nesting level; `0` writes everything on one line
    pub indent: usize,
    /// Extension of the schema documents compiled alongside the main schema
    pub schema_extension: String,
    /// Seed for the pattern value generator
    pub seed: u64,
    /// Upper bound for `*`, `+` and open `{n,}` repetitions in patterns
    pub max_repeat: u32,
    /// Fixed "now" for date and time samples
    pub timestamp: Option<DateTime<FixedOffset>>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            schema_extension: "xsd".to_string(),
            seed: DEFAULT_SEED,
            max_repeat: 4,
            timestamp: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_schema_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.schema_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_repeat(mut self, max_repeat: u32) -> Self {
        self.max_repeat = max_repeat;
        self
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<FixedOffset>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
