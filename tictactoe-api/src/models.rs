//! JSON models exchanged with the browser view.

use serde::{Deserialize, Serialize};
use tictactoe_core::{GameState, Location, Mark, MoveEntry, Outcome, SortOrder};

/// Everything the view needs to draw one frame.
#[derive(Serialize)]
pub struct GameStateModel {
    /// 9 cells in row-major order: null, "X" or "O"
    pub squares: Vec<Option<Mark>>,
    /// Status line, e.g. "Next player: O"
    pub status: String,
    /// "in_progress", "won" or "drawn"
    pub result: &'static str,
    pub winner: Option<Mark>,
    /// Cell indices to highlight, if there's a winner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_line: Option<Vec<u8>>,
    pub next_player: Mark,
    pub current_index: usize,
    pub history_len: usize,
    pub sort_order: SortOrder,
    /// Move list in display order
    pub moves: Vec<MoveEntry>,
}

impl GameStateModel {
    pub fn from_game(game: &GameState) -> GameStateModel {
        let board = game.current_board();
        let outcome = board.outcome();

        let result = match outcome {
            Outcome::InProgress => "in_progress",
            Outcome::Won(_) => "won",
            Outcome::Drawn => "drawn",
        };
        let win = outcome.win();

        GameStateModel {
            squares: board.squares().to_vec(),
            status: game.status().to_string(),
            result,
            winner: win.map(|w| w.mark),
            winning_line: win.map(|w| w.line.iter().map(|pos| pos.index() as u8).collect()),
            next_player: game.active_player(),
            current_index: game.current_index(),
            history_len: game.history_len(),
            sort_order: game.sort_order(),
            moves: game.move_list(),
        }
    }
}

/// A move names its cell either by index or by 1-based row and column.
#[derive(Deserialize)]
pub struct MoveRequest {
    pub cell: Option<usize>,
    pub row: Option<u8>,
    pub col: Option<u8>,
}

impl MoveRequest {
    /// Resolve the request to a cell index.
    pub fn cell(&self) -> Result<usize, String> {
        match (self.cell, self.row, self.col) {
            (Some(cell), None, None) => Ok(cell),
            (None, Some(row), Some(col)) => Location::new(row, col)
                .map(|location| location.pos().index())
                .ok_or_else(|| format!("Location ({}, {}) is off the board", row, col)),
            _ => Err("Must specify either cell or row/col".to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct HistoryModel {
    pub moves: Vec<MoveEntry>,
    pub current_index: usize,
    pub total_moves: usize,
    pub sort_order: SortOrder,
}

#[derive(Serialize)]
pub struct ExportModel {
    pub notation: String,
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub notation: String,
}

#[derive(Serialize)]
pub struct HealthModel {
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorModel {
    pub detail: String,
}
