//! Evaluation command

use anyhow::{Context, Result};
use sesseval_core::{EvalConfig, EvalRunner, InvalidSessionPolicy, generate_report};
use tracing::debug;

use crate::args::Cli;
use crate::console::CliConsole;

/// Build the effective config: file (or defaults), then CLI overrides
pub fn effective_config(cli: &Cli) -> Result<EvalConfig> {
    let mut config = match &cli.config {
        Some(path) => EvalConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EvalConfig::default(),
    };

    if let Some(dir) = &cli.base_dir {
        config = config.with_base_dir(dir);
    }
    if let Some(sessions) = &cli.sessions {
        config = config.with_sessions(sessions.clone());
    }
    if cli.discover {
        config = config.with_sessions(Vec::new());
    }
    if let Some(name) = &cli.label_file {
        config = config.with_label_file(name);
    }
    if let Some(name) = &cli.prediction_file {
        config = config.with_prediction_file(name);
    }
    if let Some(format) = cli.format {
        config = config.with_format(format.into());
    }
    if cli.skip_invalid {
        config = config.with_policy(InvalidSessionPolicy::Skip);
    }

    Ok(config)
}

/// Run the evaluation and print the report to stdout
pub fn run(cli: &Cli) -> Result<()> {
    let console = CliConsole::new(cli.verbose);
    let config = effective_config(cli)?;
    let format = config.format;
    debug!("Effective config: {:?}", config);

    console.info(&format!(
        "Evaluating {} under {}",
        describe_sessions(&config.sessions),
        config.base_dir.display()
    ));

    let runner = EvalRunner::new(config).context("Invalid evaluation config")?;
    let summary = runner.run().context("Evaluation failed")?;

    let report = generate_report(&summary, format)?;
    println!("{}", report.trim_end());

    if let Some(path) = &cli.output {
        std::fs::write(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        console.info(&format!("Report written to {}", path.display()));
    }

    if !summary.skipped.is_empty() {
        console.warn(&format!(
            "{} of {} sessions skipped",
            summary.skipped.len(),
            summary.skipped.len() + summary.sessions.len()
        ));
    }

    Ok(())
}

fn describe_sessions(sessions: &[u32]) -> String {
    if sessions.is_empty() {
        "discovered sessions".to_string()
    } else {
        let ids: Vec<String> = sessions.iter().map(|id| id.to_string()).collect();
        format!("sessions {}", ids.join(", "))
    }
}
