//! Breadth-first search. The first solved state discovered is one with the
//! fewest moves.

use std::collections::VecDeque;

use super::SearchGraph;
use crate::core::error::PuzzleError;
use crate::core::models::PourMode;

pub(super) fn search(graph: &mut SearchGraph, pour: PourMode) -> Result<Option<usize>, PuzzleError> {
    if graph.state(0).is_solved() {
        return Ok(Some(0));
    }

    let mut queue = VecDeque::new();
    queue.push_back(0);
    while let Some(id) = queue.pop_front() {
        let moves = graph.state(id).legal_moves();
        for mv in moves {
            let next = graph.state(id).pour(mv, pour);
            if let Some(child) = graph.discover(id, mv, next)? {
                if graph.state(child).is_solved() {
                    return Ok(Some(child));
                }
                queue.push_back(child);
            }
        }
    }
    Ok(None)
}
