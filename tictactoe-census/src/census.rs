//! Full game-tree enumeration.
//!
//! Walks every game from the empty board with an explicit stack, applying
//! moves through `Board::place` and ending games with `Board::outcome`.
//! Every step is checked against the board invariants on the way down.

use std::collections::HashSet;

use anyhow::{ensure, Result};
use serde::Serialize;
use tictactoe_core::{Board, Mark, Outcome, Pos};
use tracing::debug;

/// Counts for the whole game tree.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Census {
    /// Every node in the tree, root included
    pub nodes: u64,
    /// Leaves: games that ended in a win or a draw
    pub games: u64,
    pub x_wins: u64,
    pub o_wins: u64,
    pub draws: u64,
    /// `games_by_length[n]` = games that ended after n moves
    pub games_by_length: [u64; 10],
    /// Different boards seen, regardless of move order
    pub distinct_positions: u64,
    pub max_depth: u64,
}

/// The published totals for standard tic-tac-toe.
pub const KNOWN_TOTALS: Census = Census {
    nodes: 549_946,
    games: 255_168,
    x_wins: 131_184,
    o_wins: 77_904,
    draws: 46_080,
    games_by_length: [0, 0, 0, 0, 0, 1_440, 5_328, 47_952, 72_576, 127_872],
    distinct_positions: 5_478,
    max_depth: 9,
};

impl Census {
    fn record_finish(&mut self, length: usize, winner: Option<Mark>) {
        self.games += 1;
        self.games_by_length[length] += 1;
        match winner {
            Some(Mark::X) => self.x_wins += 1,
            Some(Mark::O) => self.o_wins += 1,
            None => self.draws += 1,
        }
    }

    /// Names and values of every field that differs from `other`.
    pub fn differences(&self, other: &Census) -> Vec<String> {
        let mut diffs = Vec::new();
        let mut check = |name: &str, ours: u64, theirs: u64| {
            if ours != theirs {
                diffs.push(format!("{}: {} (expected {})", name, ours, theirs));
            }
        };

        check("nodes", self.nodes, other.nodes);
        check("games", self.games, other.games);
        check("x_wins", self.x_wins, other.x_wins);
        check("o_wins", self.o_wins, other.o_wins);
        check("draws", self.draws, other.draws);
        for (length, (&ours, &theirs)) in self
            .games_by_length
            .iter()
            .zip(other.games_by_length.iter())
            .enumerate()
        {
            check(&format!("games_by_length[{}]", length), ours, theirs);
        }
        check(
            "distinct_positions",
            self.distinct_positions,
            other.distinct_positions,
        );
        check("max_depth", self.max_depth, other.max_depth);

        diffs
    }
}

/// Stack frame for iterative DFS.
struct Frame {
    /// Board at this node
    board: Board,
    /// Moves played to reach it
    ply: usize,
    /// Next cell index to try
    next: usize,
}

/// Enumerate the whole tree.
///
/// Fails if any step breaks a board invariant: mark counts, exactly one new
/// cell per move, the right mark moving, or a win credited to the wrong side.
pub fn run() -> Result<Census> {
    let mut census = Census::default();
    let mut seen: HashSet<Board> = HashSet::new();

    let root = Board::new();
    census.nodes = 1;
    seen.insert(root);

    let mut stack = vec![Frame {
        board: root,
        ply: 0,
        next: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        let Some(pos) = (frame.next..9)
            .filter_map(Pos::from_index)
            .find(|&p| frame.board.is_empty(p))
        else {
            stack.pop();
            continue;
        };
        frame.next = pos.index() + 1;

        let parent = frame.board;
        let ply = frame.ply;
        let mark = Mark::for_ply(ply);
        let child = parent.place(pos, mark);
        check_step(&parent, &child, pos, mark)?;

        census.nodes += 1;
        census.max_depth = census.max_depth.max(ply as u64 + 1);
        seen.insert(child);

        match child.outcome() {
            Outcome::Won(win) => {
                ensure!(
                    win.mark == mark,
                    "{} credited to {} but {} just moved",
                    child,
                    win.mark,
                    mark
                );
                census.record_finish(ply + 1, Some(win.mark));
            }
            Outcome::Drawn => {
                ensure!(ply + 1 == 9, "{} drawn after {} moves", child, ply + 1);
                census.record_finish(ply + 1, None);
            }
            Outcome::InProgress => {
                stack.push(Frame {
                    board: child,
                    ply: ply + 1,
                    next: 0,
                });
            }
        }
    }

    census.distinct_positions = seen.len() as u64;
    debug!(?census, "enumeration finished");
    Ok(census)
}

/// Check one parent -> child step.
fn check_step(parent: &Board, child: &Board, pos: Pos, mark: Mark) -> Result<()> {
    ensure!(child.is_consistent(), "inconsistent board {}", child);
    ensure!(
        child.added_since(parent) == Some(pos),
        "{} does not follow {} by one mark at cell {}",
        child,
        parent,
        pos.index()
    );
    ensure!(
        child.next_mark() == mark.opponent(),
        "{} to move after {} played on {}",
        child.next_mark(),
        mark,
        child
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_census_matches_known_totals() {
        let census = run().unwrap();
        assert_eq!(census.differences(&KNOWN_TOTALS), Vec::<String>::new());
        assert_eq!(census, KNOWN_TOTALS);
    }

    #[test]
    fn test_known_totals_add_up() {
        let k = KNOWN_TOTALS;
        assert_eq!(k.x_wins + k.o_wins + k.draws, k.games);
        assert_eq!(k.games_by_length.iter().sum::<u64>(), k.games);
    }

    #[test]
    fn test_differences_names_fields() {
        let mut census = KNOWN_TOTALS;
        census.draws += 1;
        census.games_by_length[9] -= 1;
        let diffs = census.differences(&KNOWN_TOTALS);
        assert_eq!(
            diffs,
            vec![
                "draws: 46081 (expected 46080)".to_string(),
                "games_by_length[9]: 127871 (expected 127872)".to_string(),
            ]
        );
    }

    fn cell(index: usize) -> Pos {
        Pos::from_index(index).unwrap()
    }

    #[test]
    fn test_check_step_rejects_bad_steps() {
        let empty = Board::new();
        let x = empty.place(cell(4), Mark::X);
        assert!(check_step(&empty, &x, cell(4), Mark::X).is_ok());
        assert!(check_step(&empty, &x, cell(0), Mark::X).is_err());

        let o_first = empty.place(cell(4), Mark::O);
        assert!(check_step(&empty, &o_first, cell(4), Mark::O).is_err());
    }
}
