//! banking-fixtures: print generated payloads
//!
//! ## Usage
//! ```text
//! banking-fixtures <kind> [valid|boundary|invalid] [min|max|<field>]
//! banking-fixtures preset <name>
//! ```
//!
//! ## Configuration
//! - FIXTURE_COUNT: print a JSON array of that many distinct valid records
//! - FIXTURE_SEED: seed the generator for reproducible output
//! - BANKING_LOG: tracing filter (default "info")

use std::process::ExitCode;

use banking_fixtures::{DataGenerator, EntityKind, Mode, Preset};
use tracing::error;

const USAGE: &str = "usage: banking-fixtures <kind> [valid|boundary|invalid] [min|max|<field>]\n       banking-fixtures preset <name>";
const FIXTURE_COUNT_ENV_VAR: &str = "FIXTURE_COUNT";
const FIXTURE_SEED_ENV_VAR: &str = "FIXTURE_SEED";

fn main() -> ExitCode {
    banking_fixtures::utils::bootstrap::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Fixture generation failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<String, Box<dyn std::error::Error>> {
    let Some(first) = args.first() else {
        return Err(USAGE.into());
    };
    if first == "-h" || first == "--help" {
        return Ok(USAGE.to_string());
    }

    let mut generator = match std::env::var(FIXTURE_SEED_ENV_VAR) {
        Ok(seed) => DataGenerator::seeded(seed.parse()?),
        Err(_) => DataGenerator::new(),
    };

    if first == "preset" {
        let name = args.get(1).ok_or(USAGE)?;
        let preset: Preset = name.parse()?;
        return Ok(generator.preset(preset)?.to_json_pretty()?);
    }

    let kind: EntityKind = first.parse()?;

    if let Ok(count) = std::env::var(FIXTURE_COUNT_ENV_VAR) {
        let batch = generator.generate_batch(kind, count.parse()?)?;
        return Ok(serde_json::to_string_pretty(&batch)?);
    }

    let mode = args.get(1).map(String::as_str).unwrap_or("valid");
    let mode = Mode::parse(mode, args.get(2).map(String::as_str))?;
    Ok(generator.generate(kind, &mode)?.to_json_pretty()?)
}
