// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use super::generator::{self, GeneratorOptions};
use super::models::{Move, PourMode, Puzzle};
use super::solver::{self, SearchReport, SolverOptions};
use crate::app_config::{CompleteAppConfig, OutputFormat, PuzzleFormat};

/// Solve the puzzle in `path` and print the report.
pub fn solve_puzzle(path: &Path, options: &SolverOptions, format: OutputFormat) -> Result<()> {
    let puzzle = Puzzle::load(path)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]")?);
    spinner.set_message(format!("Searching with {}", options.strategy));
    spinner.enable_steady_tick(Duration::from_millis(100));
    let report = solver::solve(&puzzle, options);
    spinner.finish_and_clear();

    let report = report.with_context(|| format!("Failed to solve {:?}", path))?;
    info!(
        "Solved {:?} with {} after exploring {} states",
        path, report.strategy, report.explored
    );
    println!("{}", format_report(&report, format)?);
    Ok(())
}

pub fn format_report(report: &SearchReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(report)?);
    }

    let lines = match &report.solution {
        Some(moves) => {
            let mut lines = vec![format!(
                "Solved in {} moves ({} states explored)",
                moves.len(),
                report.explored
            )];
            lines.extend(moves.iter().map(Move::to_string));
            lines
        }
        None => vec![format!(
            "No solution exists ({} states explored)",
            report.explored
        )],
    };
    Ok(lines.join("\n"))
}

/// Generate a random puzzle, printing it or writing it to `output`.
pub fn generate_puzzle(
    options: &GeneratorOptions,
    output: Option<&Path>,
    format: PuzzleFormat,
) -> Result<()> {
    let puzzle = generator::generate(options)?;
    let contents = match format {
        PuzzleFormat::Toml => puzzle.to_toml_string()?,
        PuzzleFormat::Json => puzzle.to_json_string()?,
    };

    match output {
        Some(path) => {
            fs::write(path, contents)
                .with_context(|| format!("Failed to write puzzle to {:?}", path))?;
            info!("Wrote {} tube puzzle to {:?}", puzzle.tubes.len(), path);
        }
        None => print!("{}", contents),
    }
    Ok(())
}

/// Replay `moves` on the puzzle in `path` and check that it ends solved.
pub fn verify_moves(path: &Path, moves: &str, pour: PourMode) -> Result<()> {
    let puzzle = Puzzle::load(path)?;
    let moves = Move::parse_list(moves)?;
    let end = puzzle.replay(&moves, pour)?;
    if !end.is_solved() {
        bail!(
            "Puzzle is not solved after {} moves, final state:\n{}",
            moves.len(),
            end
        );
    }
    println!("Solved after {} moves", moves.len());
    Ok(())
}

/// Show the configuration file
pub fn print_config(config: config::Config) -> Result<()> {
    let app_config = CompleteAppConfig::from_config(config)?;
    println!("{}", toml::to_string(&app_config)?);

    Ok(())
}
