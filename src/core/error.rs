// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Errors raised while validating, manipulating, or solving puzzles.

use thiserror::Error;

use super::models::{Color, Move};

#[derive(Error, Debug, PartialEq)]
pub enum PuzzleError {
    #[error("Puzzle has no tubes")]
    NoTubes,

    #[error("Tube capacity must be at least 1")]
    ZeroCapacity,

    #[error("Tube {tube} holds {len} units but capacity is {capacity}")]
    Overfilled {
        tube: usize,
        len: usize,
        capacity: usize,
    },

    /// Every color must fill exactly one tube.
    #[error("Color {color} appears {count} times, expected {capacity}")]
    ColorCount {
        color: Color,
        count: usize,
        capacity: usize,
    },

    #[error("Illegal move {mv}: {reason}")]
    IllegalMove { mv: Move, reason: &'static str },

    #[error("Cannot parse move {0:?}, expected FROM>TO (e.g. 0>2)")]
    InvalidMove(String),

    #[error("Search limit of {limit} states exceeded")]
    SearchLimit { limit: usize },

    #[error("Invalid generator parameters: {0}")]
    InvalidParameters(String),
}
