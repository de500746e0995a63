// Copyright (c) 2021 Tangram Robotics Inc. - All Rights Reserved
// Unauthorized copying of this file, via any medium is strictly prohibited
// Proprietary and confidential
// ----------------------------

//! State-space search over puzzle configurations.
//!
//! Every strategy shares a [SearchGraph] that assigns each distinct state an
//! id, remembers how it was reached, and enforces the state budget.

mod astar;
mod bfs;
mod dfs;

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString, EnumVariantNames};

pub use self::astar::heuristic;
use super::error::PuzzleError;
use super::models::{Move, PourMode, Puzzle};

/// How often (in discovered states) search progress is logged.
const PROGRESS_INTERVAL: usize = 100_000;

/// Available search strategies
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
pub enum Strategy {
    /// Depth-first, returns the first solution found.
    #[strum(serialize = "dfs")]
    #[serde(rename = "dfs")]
    Dfs,
    /// Best-first on moves made plus the tube heuristic.
    #[strum(serialize = "astar")]
    #[serde(rename = "astar")]
    AStar,
    /// Breadth-first, returns a solution with the fewest moves.
    #[strum(serialize = "bfs")]
    #[serde(rename = "bfs")]
    Bfs,
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::AStar
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverOptions {
    pub strategy: Strategy,
    pub pour: PourMode,
    /// Maximum number of distinct states the search may discover.
    pub max_states: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            strategy: Strategy::default(),
            pour: PourMode::default(),
            max_states: 2_000_000,
        }
    }
}

/// Outcome of a completed search.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchReport {
    pub strategy: Strategy,
    pub pour: PourMode,
    /// `None` when no sequence of moves solves the puzzle.
    pub solution: Option<Vec<Move>>,
    /// Distinct states discovered, including the starting state.
    pub explored: usize,
}

/// Solves `puzzle` with the configured strategy.
///
/// # Errors
///
/// Returns an error if the puzzle is invalid or the search discovers more
/// than `max_states` states.
pub fn solve(puzzle: &Puzzle, options: &SolverOptions) -> Result<SearchReport, PuzzleError> {
    puzzle.validate()?;
    debug!(
        "Searching {} tubes with {} ({} pour, limit {} states)",
        puzzle.tubes.len(),
        options.strategy,
        options.pour,
        options.max_states
    );

    let mut graph = SearchGraph::new(puzzle.clone(), options.max_states)?;
    let goal = match options.strategy {
        Strategy::Dfs => dfs::search(&mut graph, options.pour)?,
        Strategy::AStar => astar::search(&mut graph, options.pour)?,
        Strategy::Bfs => bfs::search(&mut graph, options.pour)?,
    };
    let solution = goal.map(|id| graph.path_to(id));

    debug!(
        "Search finished after {} states ({} reopened, {} stale entries): {}",
        graph.len(),
        graph.reopened,
        graph.stale,
        match &solution {
            Some(moves) => format!("{} moves", moves.len()),
            None => "unsolvable".to_owned(),
        }
    );
    Ok(SearchReport {
        strategy: options.strategy,
        pour: options.pour,
        solution,
        explored: graph.len(),
    })
}

struct Node {
    state: Puzzle,
    /// Predecessor and the move that led here. `None` for the start state.
    parent: Option<(usize, Move)>,
    /// Moves from the start along the recorded parent chain.
    depth: usize,
}

/// Arena of discovered states. Node 0 is always the starting state.
pub(crate) struct SearchGraph {
    nodes: Vec<Node>,
    index: HashMap<Puzzle, usize>,
    limit: usize,
    /// Known states given a shorter route after discovery.
    reopened: usize,
    /// Queue entries dropped because their state was reopened since.
    stale: usize,
}

impl SearchGraph {
    fn new(start: Puzzle, limit: usize) -> Result<Self, PuzzleError> {
        if limit == 0 {
            return Err(PuzzleError::SearchLimit { limit });
        }
        let mut index = HashMap::new();
        index.insert(start.clone(), 0);
        Ok(SearchGraph {
            nodes: vec![Node {
                state: start,
                parent: None,
                depth: 0,
            }],
            index,
            limit,
            reopened: 0,
            stale: 0,
        })
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn state(&self, id: usize) -> &Puzzle {
        &self.nodes[id].state
    }

    fn depth(&self, id: usize) -> usize {
        self.nodes[id].depth
    }

    fn lookup(&self, state: &Puzzle) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Records `state`, reached from `parent` by `mv`.
    ///
    /// Returns the new node id, or `None` if the state was seen before.
    fn discover(
        &mut self,
        parent: usize,
        mv: Move,
        state: Puzzle,
    ) -> Result<Option<usize>, PuzzleError> {
        if self.index.contains_key(&state) {
            return Ok(None);
        }
        if self.nodes.len() >= self.limit {
            return Err(PuzzleError::SearchLimit { limit: self.limit });
        }

        let id = self.nodes.len();
        if id % PROGRESS_INTERVAL == 0 {
            debug!("{} states explored", id);
        }
        self.index.insert(state.clone(), id);
        self.nodes.push(Node {
            state,
            parent: Some((parent, mv)),
            depth: self.nodes[parent].depth + 1,
        });
        Ok(Some(id))
    }

    /// Points `id` at a shorter route through `parent`.
    fn reparent(&mut self, id: usize, parent: usize, mv: Move) {
        let depth = self.nodes[parent].depth + 1;
        let node = &mut self.nodes[id];
        node.parent = Some((parent, mv));
        node.depth = depth;
        self.reopened += 1;
    }

    /// Moves leading from the start state to `id`.
    fn path_to(&self, mut id: usize) -> Vec<Move> {
        let mut moves = Vec::with_capacity(self.depth(id));
        while let Some((parent, mv)) = self.nodes[id].parent {
            moves.push(mv);
            id = parent;
        }
        moves.reverse();
        moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Color, Tube};

    fn puzzle(capacity: usize, tubes: &[&[Color]]) -> Puzzle {
        Puzzle::new(capacity, tubes.iter().map(|t| Tube::new(t.to_vec())).collect())
    }

    fn simple() -> Puzzle {
        puzzle(2, &[&[1, 2], &[2, 1], &[]])
    }

    fn three_colors() -> Puzzle {
        puzzle(4, &[&[1, 2, 3, 1], &[2, 3, 1, 2], &[3, 1, 2, 3], &[], &[]])
    }

    fn options(strategy: Strategy, pour: PourMode) -> SolverOptions {
        SolverOptions {
            strategy,
            pour,
            ..SolverOptions::default()
        }
    }

    const STRATEGIES: [Strategy; 3] = [Strategy::Dfs, Strategy::AStar, Strategy::Bfs];

    #[test]
    fn test_every_strategy_returns_a_playable_solution() {
        for &pour in &[PourMode::Unit, PourMode::Stream] {
            for &strategy in &STRATEGIES {
                let start = three_colors();
                let report = solve(&start, &options(strategy, pour)).unwrap();
                let moves = report.solution.expect("Puzzle is solvable");
                let end = start.replay(&moves, pour).unwrap();
                assert!(end.is_solved(), "{} ({}) did not solve", strategy, pour);
                assert!(report.explored > moves.len());
            }
        }
    }

    #[test]
    fn test_bfs_finds_fewest_moves() {
        let report = solve(&simple(), &options(Strategy::Bfs, PourMode::Unit)).unwrap();
        assert_eq!(Some(3), report.solution.map(|m| m.len()));

        let unit = solve(&three_colors(), &options(Strategy::Bfs, PourMode::Unit)).unwrap();
        assert_eq!(Some(12), unit.solution.map(|m| m.len()));

        let stream = solve(&three_colors(), &options(Strategy::Bfs, PourMode::Stream)).unwrap();
        assert_eq!(Some(10), stream.solution.map(|m| m.len()));
    }

    #[test]
    fn test_dfs_follows_legal_move_order() {
        let report = solve(&simple(), &options(Strategy::Dfs, PourMode::Unit)).unwrap();
        assert_eq!(
            Some(Move::parse_list("0>2 1>0 1>2").unwrap()),
            report.solution
        );
    }

    #[test]
    fn test_unsolvable_puzzle_has_no_solution() {
        for &strategy in &STRATEGIES {
            let report = solve(
                &puzzle(2, &[&[1, 2], &[2, 1]]),
                &options(strategy, PourMode::Unit),
            )
            .unwrap();
            assert_eq!(None, report.solution);
            assert_eq!(1, report.explored);
        }
    }

    #[test]
    fn test_solved_puzzle_needs_no_moves() {
        for &strategy in &STRATEGIES {
            let report = solve(
                &puzzle(3, &[&[2, 2, 2], &[], &[1, 1, 1]]),
                &options(strategy, PourMode::Unit),
            )
            .unwrap();
            assert_eq!(Some(vec![]), report.solution);
            assert_eq!(1, report.explored);
        }
    }

    #[test]
    fn test_search_limit() {
        for &strategy in &STRATEGIES {
            let opts = SolverOptions {
                max_states: 2,
                ..options(strategy, PourMode::Unit)
            };
            assert_eq!(
                Err(PuzzleError::SearchLimit { limit: 2 }),
                solve(&simple(), &opts)
            );
        }
    }

    #[test]
    fn test_invalid_puzzle_is_rejected() {
        assert_eq!(
            Err(PuzzleError::ColorCount {
                color: 2,
                count: 1,
                capacity: 2
            }),
            solve(&puzzle(2, &[&[1, 1], &[2]]), &SolverOptions::default())
        );
    }

    #[test]
    fn test_path_to_follows_parents() {
        let mut graph = SearchGraph::new(simple(), 10).unwrap();
        let a = simple().pour(Move::new(0, 2), PourMode::Unit);
        let b = a.pour(Move::new(1, 0), PourMode::Unit);
        let a_id = graph.discover(0, Move::new(0, 2), a.clone()).unwrap().unwrap();
        let b_id = graph.discover(a_id, Move::new(1, 0), b).unwrap().unwrap();
        assert_eq!(None, graph.discover(0, Move::new(0, 2), a).unwrap());
        assert_eq!(2, graph.depth(b_id));
        assert_eq!(vec![Move::new(0, 2), Move::new(1, 0)], graph.path_to(b_id));
    }
}
