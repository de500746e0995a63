// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Random puzzle generation.

use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use super::error::PuzzleError;
use super::models::{Color, Puzzle, Tube};

/// Shuffles attempted before accepting an already-solved deal.
const MAX_SHUFFLES: usize = 64;

/// Upper bound on tubes (full plus empty) in a generated puzzle.
pub const MAX_TUBES: usize = 1024;

/// Upper bound on liquid units in a generated puzzle.
pub const MAX_UNITS: usize = 1 << 20;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Number of distinct colors, one full tube each.
    pub colors: usize,
    /// Units per tube.
    pub capacity: usize,
    /// Extra empty tubes to work with.
    pub empty_tubes: usize,
    /// Fixed seed for reproducible puzzles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            colors: 4,
            capacity: 4,
            empty_tubes: 2,
            seed: None,
        }
    }
}

/// Deals a shuffled puzzle with `colors` full tubes followed by
/// `empty_tubes` empty ones.
///
/// # Errors
///
/// Returns an error if `colors` is zero or greater than 255, `capacity` is
/// zero, or the puzzle would exceed [MAX_TUBES] tubes or [MAX_UNITS] units.
pub fn generate(options: &GeneratorOptions) -> Result<Puzzle, PuzzleError> {
    if options.colors == 0 || options.colors > usize::from(Color::MAX) {
        return Err(PuzzleError::InvalidParameters(format!(
            "colors must be between 1 and {}, got {}",
            Color::MAX,
            options.colors
        )));
    }
    if options.capacity == 0 {
        return Err(PuzzleError::InvalidParameters(
            "capacity must be at least 1".to_owned(),
        ));
    }
    match options.colors.checked_add(options.empty_tubes) {
        Some(tubes) if tubes <= MAX_TUBES => {}
        _ => {
            return Err(PuzzleError::InvalidParameters(format!(
                "at most {} tubes are supported, got {} colors and {} empty tubes",
                MAX_TUBES, options.colors, options.empty_tubes
            )))
        }
    }
    match options.colors.checked_mul(options.capacity) {
        Some(units) if units <= MAX_UNITS => {}
        _ => {
            return Err(PuzzleError::InvalidParameters(format!(
                "at most {} units are supported, got {} colors of capacity {}",
                MAX_UNITS, options.colors, options.capacity
            )))
        }
    }

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // colors <= Color::MAX was checked above
    let mut units: Vec<Color> = (1..=options.colors as Color)
        .flat_map(|color| std::iter::repeat(color).take(options.capacity))
        .collect();
    let trivial = options.colors == 1 || options.capacity == 1;

    let mut puzzle = deal(&units, options);
    for attempt in 0..MAX_SHUFFLES {
        units.shuffle(&mut rng);
        puzzle = deal(&units, options);
        if trivial || !puzzle.is_solved() {
            debug!("Dealt puzzle after {} shuffle(s)", attempt + 1);
            break;
        }
    }
    Ok(puzzle)
}

fn deal(units: &[Color], options: &GeneratorOptions) -> Puzzle {
    let tubes = units
        .chunks(options.capacity)
        .map(|chunk| Tube::new(chunk.to_vec()))
        .chain(std::iter::repeat_with(Tube::default).take(options.empty_tubes))
        .collect();
    Puzzle::new(options.capacity, tubes)
}
