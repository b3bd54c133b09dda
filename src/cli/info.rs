use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use sweeplog::loader::Loader;
use sweeplog::reader::TextSweepReader;
use sweeplog::summary::SweepSummary;

use super::Config;

/// Display the interpretation of a sweep log
pub fn run(file: PathBuf, json: bool, config: &Config) -> Result<()> {
    let loader = Loader::with_parts(config.parser(), TextSweepReader::new());
    let sweep = loader
        .open(&file)?
        .wait()
        .with_context(|| format!("Failed to load {}", file.display()))?;

    info!(
        "Loaded {}-D sweep with {} outputs",
        sweep.sweep_dim(),
        sweep.outputs().len()
    );

    let summary = SweepSummary::new(&sweep);
    if json {
        let text = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
        println!("{}", text);
        return Ok(());
    }

    #[cfg(feature = "colorized_output")]
    {
        println!("{}", summary.format_colored());
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        println!("{}", summary);
    }

    Ok(())
}
