use clap::Parser;
use std::path::PathBuf;
use tracing::Level;
use xsdsample::GeneratorConfig;
use xsdsample::config::DEFAULT_SEED;

/// Generate a sample XML document from an XSD schema
#[derive(Parser, Debug, Clone)]
#[command(name = "xsd2xml")]
#[command(version)]
pub struct Cli {
    /// Schema file to generate a sample for
    pub schema: Option<PathBuf>,

    /// Write the document to a file instead of stdout
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Spaces per nesting level, 0 for a single line
    #[arg(long = "indent", default_value_t = 2)]
    pub indent: usize,

    /// Seed for values generated from patterns
    #[arg(long = "seed", default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Upper bound for unbounded repetitions in patterns
    #[arg(long = "max-repeat", default_value_t = 4)]
    pub max_repeat: u32,

    /// Extension of the schema files compiled alongside the main schema
    #[arg(long = "extension", default_value = "xsd")]
    pub extension: String,

    /// Log what the generator is doing
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Settings for one run, derived from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub schema: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub generator: GeneratorConfig,
    pub log_level: Level,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        let generator = GeneratorConfig::new()
            .with_indent(cli.indent)
            .with_seed(cli.seed)
            .with_max_repeat(cli.max_repeat)
            .with_schema_extension(cli.extension.as_str());

        let log_level = if cli.quiet {
            Level::ERROR
        } else if cli.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        };

        Self {
            schema: cli.schema.clone(),
            output: cli.output.clone(),
            generator,
            log_level,
        }
    }
}
