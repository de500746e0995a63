//! A* search guided by a tube-based heuristic.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::SearchGraph;
use crate::core::error::PuzzleError;
use crate::core::models::{PourMode, Puzzle};

/// Estimated distance to a solved state.
///
/// Each non-empty tube contributes one point for holding more than one color
/// and one point for not being complete (full with a single color), so a
/// solved puzzle scores zero. The estimate is not admissible: A* results are
/// short but not guaranteed shortest.
pub fn heuristic(puzzle: &Puzzle) -> usize {
    puzzle
        .tubes
        .iter()
        .filter(|tube| !tube.is_empty())
        .map(|tube| {
            let mixed = usize::from(tube.distinct_colors() > 1);
            let incomplete = usize::from(!tube.is_complete(puzzle.capacity));
            mixed + incomplete
        })
        .sum()
}

/// Heap entries order by `f`, then by insertion sequence (FIFO on ties).
type Entry = Reverse<(usize, u64, usize, usize)>;

pub(super) fn search(graph: &mut SearchGraph, pour: PourMode) -> Result<Option<usize>, PuzzleError> {
    let mut heap: BinaryHeap<Entry> = BinaryHeap::new();
    let mut sequence = 0u64;
    heap.push(Reverse((heuristic(graph.state(0)), sequence, 0, 0)));

    while let Some(Reverse((_, _, id, g))) = heap.pop() {
        // A shorter route to this state was queued after this entry.
        if g != graph.depth(id) {
            graph.stale += 1;
            continue;
        }
        if graph.state(id).is_solved() {
            return Ok(Some(id));
        }

        let moves = graph.state(id).legal_moves();
        for mv in moves {
            let next = graph.state(id).pour(mv, pour);
            let next_g = g + 1;
            let h = heuristic(&next);
            let child = match graph.lookup(&next) {
                Some(known) if next_g < graph.depth(known) => {
                    graph.reparent(known, id, mv);
                    known
                }
                Some(_) => continue,
                None => match graph.discover(id, mv, next)? {
                    Some(child) => child,
                    None => continue,
                },
            };
            sequence += 1;
            heap.push(Reverse((next_g + h, sequence, child, next_g)));
        }
    }
    Ok(None)
}
