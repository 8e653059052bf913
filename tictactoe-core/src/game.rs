//! Move history and time travel.
//!
//! A [`GameState`] keeps every snapshot of the game plus an index pointing at
//! the one on display. Playing a move from an earlier snapshot discards the
//! snapshots after it; jumping only moves the index.

use serde::Serialize;
use tracing::{debug, trace};

use crate::{Board, Location, Mark, Outcome, Pos, Win};

/// One history entry: a board snapshot and the cell placed to reach it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    /// The board after this move.
    pub squares: Board,
    /// Where the mark went. None for the initial empty board.
    pub location: Option<Location>,
}

impl Move {
    /// The entry every game starts from.
    pub fn start() -> Move {
        Move {
            squares: Board::new(),
            location: None,
        }
    }
}

/// Display order of the move list.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite order.
    #[inline]
    pub fn toggled(self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }

    #[inline]
    pub fn is_ascending(self) -> bool {
        self == SortOrder::Ascending
    }
}

/// Why a move or jump was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameError {
    /// The cell index is not on the board.
    #[display("Cell {_0} is outside the board")]
    CellOutOfRange(usize),

    /// The target square already holds a mark.
    #[display("Square {_0} is already occupied")]
    SquareOccupied(Location),

    /// The displayed board already has a winner.
    #[display("Game is already over")]
    GameOver,

    /// The history has no entry at this index.
    #[display("Move #{index} does not exist (history has {len} entries)")]
    MoveOutOfRange { index: usize, len: usize },
}

impl std::error::Error for GameError {}

/// Status line for the displayed board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Status {
    #[display("Winner: {_0}")]
    Winner(Mark),
    #[display("Draw")]
    Draw,
    #[display("Next player: {_0}")]
    NextPlayer(Mark),
}

/// One row of the move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveEntry {
    /// History index this row jumps to.
    pub index: usize,
    /// The cell placed by this move, None for the game start.
    pub location: Option<Location>,
    /// Button text, or the "you are here" text for the current row.
    pub description: String,
    /// Whether this row is the displayed snapshot.
    pub current: bool,
}

/// A game: the snapshot history, the displayed index and the list order.
///
/// Winner, status and the active player are computed from the current
/// snapshot on every call rather than stored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Every snapshot in play order. Never empty.
    history: Vec<Move>,
    /// Index of the displayed snapshot.
    current: usize,
    sort_order: SortOrder,
}

impl GameState {
    /// A new game: one empty snapshot, X to move.
    pub fn new() -> GameState {
        GameState {
            history: vec![Move::start()],
            current: 0,
            sort_order: SortOrder::default(),
        }
    }

    /// All snapshots, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Number of snapshots, including the initial one.
    #[inline]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Index of the displayed snapshot.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline]
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// The displayed history entry.
    #[inline]
    pub fn current_move(&self) -> &Move {
        &self.history[self.current]
    }

    /// The displayed board.
    #[inline]
    pub fn current_board(&self) -> Board {
        self.current_move().squares
    }

    /// The side to move on the displayed board.
    #[inline]
    pub fn active_player(&self) -> Mark {
        Mark::for_ply(self.current)
    }

    #[inline]
    pub fn x_is_next(&self) -> bool {
        self.active_player() == Mark::X
    }

    /// Outcome of the displayed board.
    pub fn outcome(&self) -> Outcome {
        self.current_board().outcome()
    }

    /// The completed line on the displayed board, if any.
    pub fn winner(&self) -> Option<Win> {
        self.current_board().winner()
    }

    pub fn is_draw(&self) -> bool {
        self.outcome() == Outcome::Drawn
    }

    /// Status line for the displayed board.
    pub fn status(&self) -> Status {
        match self.outcome() {
            Outcome::Won(win) => Status::Winner(win.mark),
            Outcome::Drawn => Status::Draw,
            Outcome::InProgress => Status::NextPlayer(self.active_player()),
        }
    }

    /// Place the active player's mark at `cell`.
    ///
    /// Any snapshots after the displayed one are discarded, the new snapshot
    /// is appended and becomes the displayed one. On error nothing changes.
    pub fn try_apply_move(&mut self, cell: usize) -> Result<&Move, GameError> {
        let pos = Pos::from_index(cell).ok_or(GameError::CellOutOfRange(cell))?;
        let board = self.current_board();

        if board.winner().is_some() {
            return Err(GameError::GameOver);
        }
        if !board.is_empty(pos) {
            return Err(GameError::SquareOccupied(pos.location()));
        }

        let mark = self.active_player();
        let next = board.place(pos, mark);

        self.history.truncate(self.current + 1);
        self.history.push(Move {
            squares: next,
            location: Some(pos.location()),
        });
        self.current = self.history.len() - 1;

        trace!(%mark, cell, board = %next, index = self.current, "move applied");
        Ok(&self.history[self.current])
    }

    /// Like [`try_apply_move`](Self::try_apply_move), but a refused move is
    /// silently ignored. Returns whether the move was applied.
    pub fn apply_move(&mut self, cell: usize) -> bool {
        match self.try_apply_move(cell) {
            Ok(_) => true,
            Err(err) => {
                debug!(cell, %err, "move ignored");
                false
            }
        }
    }

    /// Display the snapshot at `index`. History is left untouched.
    pub fn try_jump_to(&mut self, index: usize) -> Result<(), GameError> {
        if index >= self.history.len() {
            return Err(GameError::MoveOutOfRange {
                index,
                len: self.history.len(),
            });
        }
        self.current = index;
        trace!(index, "jumped");
        Ok(())
    }

    /// Like [`try_jump_to`](Self::try_jump_to), but an out-of-range index is
    /// silently ignored. Returns whether the jump happened.
    pub fn jump_to(&mut self, index: usize) -> bool {
        match self.try_jump_to(index) {
            Ok(()) => true,
            Err(err) => {
                debug!(index, %err, "jump ignored");
                false
            }
        }
    }

    /// Flip the move list between ascending and descending.
    pub fn toggle_sort_order(&mut self) {
        self.sort_order = self.sort_order.toggled();
    }

    /// Start over from an empty board. The sort order is kept.
    pub fn reset(&mut self) {
        self.history.clear();
        self.history.push(Move::start());
        self.current = 0;
    }

    /// The move list in display order.
    ///
    /// History itself always stays in play order; only this view is reversed
    /// for [`SortOrder::Descending`].
    pub fn move_list(&self) -> Vec<MoveEntry> {
        let mut entries: Vec<MoveEntry> = self
            .history
            .iter()
            .enumerate()
            .map(|(index, step)| MoveEntry {
                index,
                location: step.location,
                description: self.describe(index, step),
                current: index == self.current,
            })
            .collect();

        if !self.sort_order.is_ascending() {
            entries.reverse();
        }
        entries
    }

    fn describe(&self, index: usize, step: &Move) -> String {
        if index == self.current {
            return format!("You are at move #{}", index);
        }
        match step.location {
            Some(location) => format!("Go to move #{} {}", index, location),
            None => "Go to game start".to_string(),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
