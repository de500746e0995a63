// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{crate_authors, crate_description, crate_version};
use clap::{value_parser, Arg, ArgMatches, Command};
use strum::VariantNames;

use crate::app_config::{CompleteAppConfig, OutputFormat, PuzzleFormat};
use crate::core::commands;
use crate::core::models::PourMode;
use crate::core::solver::Strategy;

/// Match commands
pub fn cli_match(config: config::Config, cli_matches: ArgMatches) -> Result<()> {
    // Handle config subcommand first, because it's helpful for debugging bad config!
    if let Some(("config", _config_matches)) = cli_matches.subcommand() {
        commands::print_config(config)?;
        return Ok(());
    }

    let app_config = CompleteAppConfig::from_config(config)?;

    match cli_matches.subcommand() {
        Some(("solve", solve_matches)) => {
            let mut options = app_config.solver;
            if let Some(strategy) = solve_matches.get_one::<String>("strategy") {
                options.strategy = Strategy::from_str(strategy)?;
            }
            if let Some(pour) = solve_matches.get_one::<String>("pour") {
                options.pour = PourMode::from_str(pour)?;
            }
            if let Some(&max_states) = solve_matches.get_one::<usize>("max_states") {
                options.max_states = max_states;
            }
            // Safe to unwrap because arguments are required or have defaults
            let path = solve_matches.get_one::<String>("puzzle").unwrap();
            let format = OutputFormat::from_str(solve_matches.get_one::<String>("format").unwrap())?;
            commands::solve_puzzle(Path::new(path), &options, format)?;
        }
        Some(("generate", generate_matches)) => {
            let mut options = app_config.generator;
            if let Some(&colors) = generate_matches.get_one::<usize>("colors") {
                options.colors = colors;
            }
            if let Some(&capacity) = generate_matches.get_one::<usize>("capacity") {
                options.capacity = capacity;
            }
            if let Some(&empty_tubes) = generate_matches.get_one::<usize>("empty") {
                options.empty_tubes = empty_tubes;
            }
            if let Some(&seed) = generate_matches.get_one::<u64>("seed") {
                options.seed = Some(seed);
            }
            let output = generate_matches.get_one::<String>("output").map(Path::new);
            let format =
                PuzzleFormat::from_str(generate_matches.get_one::<String>("format").unwrap())?;
            commands::generate_puzzle(&options, output, format)?;
        }
        Some(("verify", verify_matches)) => {
            let pour = match verify_matches.get_one::<String>("pour") {
                Some(pour) => PourMode::from_str(pour)?,
                None => app_config.solver.pour,
            };
            let path = verify_matches.get_one::<String>("puzzle").unwrap();
            let moves = verify_matches.get_one::<String>("moves").unwrap();
            commands::verify_moves(Path::new(path), moves, pour)?;
        }
        _ => {
            // Arguments are required by default (in Clap).
            // This section should never execute.
            unreachable!("No matching subcommand!");
        }
    }
    Ok(())
}

fn pour_arg() -> Arg {
    Arg::new("pour")
        .short('p')
        .long("pour")
        .value_name("MODE")
        .help("Units moved per pour: one (unit) or the whole top run (stream)")
        .value_parser(PossibleValuesParser::new(PourMode::VARIANTS.iter().copied()))
}

/// Configure Clap
/// This function will configure clap and match arguments
pub fn cli_config() -> Result<ArgMatches> {
    let cli_app = Command::new("watersort")
        .arg_required_else_help(true)
        .version(crate_version!())
        .about(crate_description!())
        .author(crate_authors!("\n"))
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Set a custom config file"),
        )
        .subcommand(
            Command::new("solve")
                .about("Solve a puzzle file")
                .arg(Arg::new("puzzle").required(true).value_name("PUZZLE"))
                .arg(
                    Arg::new("strategy")
                        .short('s')
                        .long("strategy")
                        .value_name("STRATEGY")
                        .help("Search strategy (defaults to the configured one)")
                        .value_parser(PossibleValuesParser::new(Strategy::VARIANTS.iter().copied())),
                )
                .arg(pour_arg())
                .arg(
                    Arg::new("max_states")
                        .long("max-states")
                        .value_name("N")
                        .help("Give up after discovering N states")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .default_value(<&'static str>::from(OutputFormat::default()))
                        .value_parser(PossibleValuesParser::new(OutputFormat::VARIANTS.iter().copied())),
                ),
        )
        .subcommand(
            Command::new("generate")
                .about("Generate a random puzzle")
                .arg(
                    Arg::new("colors")
                        .long("colors")
                        .value_name("N")
                        .help("Number of colors")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("capacity")
                        .long("capacity")
                        .value_name("N")
                        .help("Units per tube")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("empty")
                        .long("empty")
                        .value_name("N")
                        .help("Number of empty tubes")
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_name("SEED")
                        .help("Seed for a reproducible puzzle")
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write the puzzle to FILE instead of stdout"),
                )
                .arg(
                    Arg::new("format")
                        .short('f')
                        .long("format")
                        .value_name("FORMAT")
                        .default_value(<&'static str>::from(PuzzleFormat::default()))
                        .value_parser(PossibleValuesParser::new(PuzzleFormat::VARIANTS.iter().copied())),
                ),
        )
        .subcommand(
            Command::new("verify")
                .about("Check that a list of moves solves a puzzle")
                .arg(Arg::new("puzzle").required(true).value_name("PUZZLE"))
                .arg(
                    Arg::new("moves")
                        .required(true)
                        .value_name("MOVES")
                        .help("Moves like \"0>2,1>0\", separated by commas or spaces"),
                )
                .arg(pour_arg()),
        )
        .subcommand(Command::new("config").about("Show Configuration"));

    // Get matches
    let cli_matches = cli_app.get_matches();

    Ok(cli_matches)
}
