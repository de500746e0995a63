//! Watersort is a Command Line Interface (CLI) for solving, generating, and
//! checking Water Sort puzzles.
//!
//! A Water Sort puzzle is a row of tubes, each holding a stack of colored
//! liquid units. A move pours the top of one tube into another tube that is
//! either empty or has room and the same top color. The puzzle is solved when
//! every tube is either empty or full of a single color.
//!
//! # Installation
//!
//! If you have [Rust installed](https://rustup.rs/), you can install
//! watersort with:
//!
//! ```shell
//! cargo install --path .
//! ```
//!
//! # Usage
//!
//! View CLI help with `watersort help` or `watersort help <subcommand>`.
//!
//! ## Puzzle files
//!
//! Puzzles are TOML (or JSON, for files ending in `.json`). Colors are
//! integers from 0 to 255, tubes are listed bottom first, and tube indices
//! used by moves start at 0.
//!
//! ```toml
//! capacity = 4
//! tubes = [
//!     [1, 2, 3, 1],
//!     [2, 3, 1, 2],
//!     [3, 1, 2, 3],
//!     [],
//!     [],
//! ]
//! ```
//!
//! A puzzle is valid when no tube holds more than `capacity` units and every
//! color appears exactly `capacity` times.
//!
//! ## Configuration
//!
//! Watersort reads an optional configuration file from
//! `~/.config/watersort/watersort.toml`, or from the file given with the
//! `--config path/to/watersort.toml` flag (which must then exist). Any value
//! can be overridden with an environment variable, e.g.
//! `WATERSORT__SOLVER__MAX_STATES=5000` (note the double underscores).
//!
//! ```toml
//! [solver]
//! strategy = "astar"     # dfs, astar, or bfs
//! pour = "unit"          # unit or stream
//! max_states = 2000000
//!
//! [generator]
//! colors = 4
//! capacity = 4
//! empty_tubes = 2
//! ```
//!
//! Logging is controlled with `RUST_LOG`, e.g. `RUST_LOG=debug`.
//!
//! ## Commands
//!
//! ```watersort solve <puzzle> [OPTIONS]```
//!
//! Searches for a sequence of moves that solves the puzzle and prints one
//! move per line, written `FROM>TO`. Strategies:
//!
//! - `dfs` returns the first solution found by depth-first search.
//! - `astar` searches best-first using a heuristic that counts mixed and
//!   incomplete tubes. Solutions are usually short, not guaranteed shortest.
//! - `bfs` returns a solution with the fewest possible moves, at the cost of
//!   exploring more states.
//!
//! With `--pour unit` (the default) every move transfers one unit. With
//! `--pour stream` a move transfers the whole run of the top color, as far as
//! the destination has room, as in the mobile game.
//!
//! <br>
//!
//! ---
//!
//! ```watersort generate [OPTIONS]```
//!
//! Deals a random puzzle with `--colors` full tubes and `--empty` empty
//! tubes. Passing `--seed` makes the result reproducible.
//!
//! <br>
//!
//! ---
//!
//! ```watersort verify <puzzle> <moves>```
//!
//! Replays the moves on the puzzle and reports whether it ends solved.
//!
//! <br>
//!
//! ---
//!
//! ```watersort config```
//!
//! Echoes current config (with any overrides applied) and exits.
//!
//! ## Examples
//!
//! ```shell
//! # Solve with the fewest moves, pouring whole runs at once
//! watersort solve level.toml --strategy=bfs --pour=stream
//!
//! # Write a reproducible 8-color puzzle to a file
//! watersort generate --colors 8 --seed 1234 -o level.toml
//!
//! # Check a solution
//! watersort verify level.toml "0>3, 0>4, 1>0"
//! ```
//!
//! # Troubleshooting
//!
//! | Error                                | Resolution                                                                                          |
//! |-                                     |-                                                                                                    |
//! | Color N appears M times, expected K  | Every color must fill exactly one tube. Check the puzzle file for typos.                            |
//! | Search limit of N states exceeded    | Raise `--max-states` (or `solver.max_states`), or try `--strategy=astar`, which explores far fewer. |
//! | Move #N (A>B) cannot be played       | The move list diverges from the puzzle. Moves use 0-based tube indices.                             |

#[cfg(not(debug_assertions))]
use human_panic::setup_panic;

mod app_config;
mod cli;
pub mod core;

use anyhow::Result;

use crate::app_config::{DEFAULT_CONFIG_PATH, ENV_PREFIX};

#[doc(hidden)]
/// Main entrypoint
pub fn run() -> Result<()> {
    // Human Panic. Only enabled when *not* debugging.
    //
    // Example of what panic message looks like:
    // https://docs.rs/human-panic/1.0.3/human_panic/
    #[cfg(not(debug_assertions))]
    {
        setup_panic!();
    }

    // Better Panic. Only enabled *when* debugging.
    #[cfg(debug_assertions)]
    {
        better_panic::Settings::debug()
            .most_recent_first(false)
            .lineno_suffix(true)
            .verbosity(better_panic::Verbosity::Full)
            .install();
    }

    env_logger::init();

    // Get CLI arguments and flags (one may have provided the config file to use)
    let cli_matches = cli::cli_config()?;

    // Use cmdline arg config file if provided (and require it), otherwise the
    // optional file at the default ~/.config/... path
    let config_file = match cli_matches.get_one::<String>("config") {
        Some(path) => config::File::with_name(path),
        None => config::File::with_name(&shellexpand::tilde(DEFAULT_CONFIG_PATH)).required(false),
    };

    // Override with environment variables, if present
    // Example of overriding: WATERSORT__SOLVER__MAX_STATES=5000
    // (Note double underscore to reach into lower struct levels!)
    let settings = config::Config::builder()
        .add_source(config_file)
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    // Match against CLI subcommands, which delegate to functions
    cli::cli_match(settings, cli_matches)
}
