//! Depth-first search.
//!
//! Explores moves in [Puzzle::legal_moves](crate::core::models::Puzzle::legal_moves)
//! order with an explicit frame stack, so deep searches cannot overflow the
//! call stack. States are marked visited when generated and never re-entered.

use std::vec;

use super::SearchGraph;
use crate::core::error::PuzzleError;
use crate::core::models::{Move, PourMode};

pub(super) fn search(graph: &mut SearchGraph, pour: PourMode) -> Result<Option<usize>, PuzzleError> {
    if graph.state(0).is_solved() {
        return Ok(Some(0));
    }

    let mut stack: Vec<(usize, vec::IntoIter<Move>)> =
        vec![(0, graph.state(0).legal_moves().into_iter())];
    while let Some((id, moves)) = stack.last_mut() {
        let id = *id;
        let mv = match moves.next() {
            Some(mv) => mv,
            None => {
                stack.pop();
                continue;
            }
        };

        let next = graph.state(id).pour(mv, pour);
        if let Some(child) = graph.discover(id, mv, next)? {
            if graph.state(child).is_solved() {
                return Ok(Some(child));
            }
            let moves = graph.state(child).legal_moves().into_iter();
            stack.push((child, moves));
        }
    }
    Ok(None)
}
