// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! Puzzle state, moves, and (de)serialization of puzzle files.

use std::{collections::BTreeMap, fmt, fs, path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, EnumVariantNames};

use super::error::PuzzleError;

/// Identifier of a liquid color.
pub type Color = u8;

/// A tube of liquid units, bottom first. The last unit is the top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tube(Vec<Color>);

impl Tube {
    pub fn new(units: Vec<Color>) -> Self {
        Tube(units)
    }

    pub fn units(&self) -> &[Color] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn top(&self) -> Option<Color> {
        self.0.last().copied()
    }

    /// Number of contiguous units at the top sharing the top color.
    pub fn top_run(&self) -> usize {
        match self.top() {
            Some(color) => self.0.iter().rev().take_while(|&&u| u == color).count(),
            None => 0,
        }
    }

    pub fn is_uniform(&self) -> bool {
        self.0.windows(2).all(|w| w[0] == w[1])
    }

    pub fn distinct_colors(&self) -> usize {
        let mut colors = self.0.clone();
        colors.sort_unstable();
        colors.dedup();
        colors.len()
    }

    /// Full, and holding a single color.
    pub fn is_complete(&self, capacity: usize) -> bool {
        self.len() == capacity && self.is_uniform()
    }
}

impl From<Vec<Color>> for Tube {
    fn from(units: Vec<Color>) -> Self {
        Tube(units)
    }
}

/// Pour the top of tube `from` into tube `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Move { from, to }
    }

    /// Parses a list of moves separated by commas and/or whitespace.
    pub fn parse_list(s: &str) -> Result<Vec<Move>, PuzzleError> {
        s.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(str::parse)
            .collect()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PuzzleError::InvalidMove(s.to_owned());
        let (from, to) = s
            .split_once("->")
            .or_else(|| s.split_once('>'))
            .ok_or_else(invalid)?;
        Ok(Move {
            from: from.trim().parse().map_err(|_| invalid())?,
            to: to.trim().parse().map_err(|_| invalid())?,
        })
    }
}

/// How much liquid a single move transfers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    AsRefStr,
    Display,
    EnumString,
    EnumVariantNames,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PourMode {
    /// Exactly one unit per move.
    Unit,
    /// The whole top run of one color, as far as the destination has room.
    Stream,
}

impl Default for PourMode {
    fn default() -> Self {
        PourMode::Unit
    }
}

/// A Water Sort puzzle state.
///
/// Every tube shares the same `capacity`, and a valid puzzle holds exactly
/// `capacity` units of each color, so a solved puzzle has every color
/// collected in its own full tube.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Puzzle {
    /// Maximum number of units per tube.
    pub capacity: usize,
    /// Tubes, in the order moves refer to them.
    pub tubes: Vec<Tube>,
}

impl Puzzle {
    /// Builds a puzzle without validating it. See [Puzzle::validate].
    pub fn new(capacity: usize, tubes: Vec<Tube>) -> Self {
        Puzzle { capacity, tubes }
    }

    /// Reads a puzzle file. Files ending in `.json` are parsed as JSON,
    /// anything else as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read puzzle file {:?}", path))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let puzzle = if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_toml_str(&contents)
        };
        puzzle.with_context(|| format!("Invalid puzzle file {:?}", path))
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let puzzle: Puzzle = toml::from_str(s)?;
        puzzle.validate()?;
        Ok(puzzle)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let puzzle: Puzzle = serde_json::from_str(s)?;
        puzzle.validate()?;
        Ok(puzzle)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks tube sizes and color counts.
    ///
    /// # Errors
    ///
    /// Returns the first problem found: no tubes, zero capacity, a tube
    /// holding more than `capacity` units, or a color (in ascending order)
    /// that does not occur exactly `capacity` times.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.tubes.is_empty() {
            return Err(PuzzleError::NoTubes);
        }
        if self.capacity == 0 {
            return Err(PuzzleError::ZeroCapacity);
        }

        let mut counts: BTreeMap<Color, usize> = BTreeMap::new();
        for (index, tube) in self.tubes.iter().enumerate() {
            if tube.len() > self.capacity {
                return Err(PuzzleError::Overfilled {
                    tube: index,
                    len: tube.len(),
                    capacity: self.capacity,
                });
            }
            for &color in tube.units() {
                *counts.entry(color).or_insert(0) += 1;
            }
        }

        match counts.into_iter().find(|&(_, count)| count != self.capacity) {
            Some((color, count)) => Err(PuzzleError::ColorCount {
                color,
                count,
                capacity: self.capacity,
            }),
            None => Ok(()),
        }
    }

    /// Every tube is either empty or full of a single color.
    pub fn is_solved(&self) -> bool {
        self.tubes
            .iter()
            .all(|tube| tube.is_empty() || tube.is_complete(self.capacity))
    }

    /// All legal moves, ordered by source tube then destination tube.
    ///
    /// A move is legal when the source is non-empty and the destination is
    /// either empty or has room and the same top color.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (from, src) in self.tubes.iter().enumerate() {
            let color = match src.top() {
                Some(color) => color,
                None => continue,
            };
            for (to, dst) in self.tubes.iter().enumerate() {
                if from != to && self.accepts(dst, color) {
                    moves.push(Move { from, to });
                }
            }
        }
        moves
    }

    fn accepts(&self, dst: &Tube, color: Color) -> bool {
        match dst.top() {
            None => true,
            Some(top) => dst.len() < self.capacity && top == color,
        }
    }

    /// Number of units a move transfers.
    pub fn pour_amount(&self, mv: Move, mode: PourMode) -> Result<usize, PuzzleError> {
        self.check_move(mv)?;
        Ok(self.transfer_size(mv, mode))
    }

    /// Caller guarantees `mv` is legal.
    fn transfer_size(&self, mv: Move, mode: PourMode) -> usize {
        match mode {
            PourMode::Unit => 1,
            PourMode::Stream => {
                let free = self.capacity - self.tubes[mv.to].len();
                self.tubes[mv.from].top_run().min(free)
            }
        }
    }

    /// Applies a move, returning the resulting state.
    pub fn apply(&self, mv: Move, mode: PourMode) -> Result<Puzzle, PuzzleError> {
        self.check_move(mv)?;
        Ok(self.pour(mv, mode))
    }

    fn check_move(&self, mv: Move) -> Result<(), PuzzleError> {
        let illegal = |reason| PuzzleError::IllegalMove { mv, reason };

        if mv.from >= self.tubes.len() || mv.to >= self.tubes.len() {
            return Err(illegal("tube index out of range"));
        }
        if mv.from == mv.to {
            return Err(illegal("source and destination are the same tube"));
        }
        let color = self.tubes[mv.from]
            .top()
            .ok_or_else(|| illegal("source tube is empty"))?;
        let dst = &self.tubes[mv.to];
        if dst.len() >= self.capacity {
            return Err(illegal("destination tube is full"));
        }
        match dst.top() {
            Some(top) if top != color => Err(illegal("top colors differ")),
            _ => Ok(()),
        }
    }

    /// Applies a move already known to be legal.
    pub(crate) fn pour(&self, mv: Move, mode: PourMode) -> Puzzle {
        let amount = self.transfer_size(mv, mode);
        let mut next = self.clone();
        let src = &mut next.tubes[mv.from].0;
        let split = src.len() - amount;
        let poured: Vec<Color> = src.drain(split..).collect();
        next.tubes[mv.to].0.extend(poured);
        next
    }

    /// Applies `moves` in order, stopping at the first illegal one.
    pub fn replay(&self, moves: &[Move], mode: PourMode) -> Result<Puzzle> {
        let mut state = self.clone();
        for (step, &mv) in moves.iter().enumerate() {
            state = state
                .apply(mv, mode)
                .with_context(|| format!("Move #{} ({}) cannot be played", step + 1, mv))?;
        }
        Ok(state)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, tube) in self.tubes.iter().enumerate() {
            let units: Vec<String> = tube.units().iter().map(|u| u.to_string()).collect();
            writeln!(f, "{:>3}: [{}]", index, units.join(" "))?;
        }
        Ok(())
    }
}
