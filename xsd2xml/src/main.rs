mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Config};
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use xsdsample::SampleGenerator;

fn run(config: &Config, schema: &Path) -> anyhow::Result<()> {
    let generator = SampleGenerator::new(config.generator.clone());
    let xml = generator.generate(schema)?;

    match &config.output {
        Some(output) => {
            fs::write(output, format!("{}\n", xml))
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!("Wrote sample document to {}", output.display());
        }
        None => println!("{}", xml),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config = Config::from_cli(&cli);

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let Some(schema) = &config.schema else {
        println!("Usage: xsd2xml <path_to_xsd_file>");
        return;
    };

    if !schema.is_file() {
        println!("Error: File not found at '{}'", schema.display());
        return;
    }

    debug!("Using {:?}", config.generator);

    // Failures are reported on stdout and the process still exits normally.
    if let Err(err) = run(&config, schema) {
        println!("An error occurred: {}", err);
        println!("{:?}", err);
    }
}
