//! WASM bindings for tictactoe-core
//!
//! Provides a JavaScript-friendly API over one game session. The page keeps a
//! single `WasmGame`, forwards clicks to `applyMove` / `jumpTo` /
//! `toggleSortOrder`, and re-reads the derived state after each call.

use wasm_bindgen::prelude::*;

use crate::{notation, GameState, Mark, MoveEntry};

/// WASM-friendly wrapper around GameState
#[wasm_bindgen]
pub struct WasmGame {
    inner: GameState,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: GameState::new() }
    }

    /// Place the active player's mark. Returns false if the move was ignored.
    #[wasm_bindgen(js_name = applyMove)]
    pub fn apply_move(&mut self, cell: usize) -> bool {
        self.inner.apply_move(cell)
    }

    /// Show an earlier (or later) snapshot. Returns false if out of range.
    #[wasm_bindgen(js_name = jumpTo)]
    pub fn jump_to(&mut self, index: usize) -> bool {
        self.inner.jump_to(index)
    }

    /// Flip the move list order
    #[wasm_bindgen(js_name = toggleSortOrder)]
    pub fn toggle_sort_order(&mut self) {
        self.inner.toggle_sort_order();
    }

    /// Start a new game
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Displayed board as 9 bytes: 0 (empty), 1 (X), 2 (O)
    pub fn squares(&self) -> Vec<u8> {
        self.inner
            .current_board()
            .squares()
            .iter()
            .map(|square| square.map_or(0, |mark| mark as u8))
            .collect()
    }

    /// Index of the displayed snapshot
    #[wasm_bindgen(getter, js_name = currentMove)]
    pub fn current_move(&self) -> usize {
        self.inner.current_index()
    }

    /// Number of snapshots in history
    #[wasm_bindgen(getter, js_name = historyLength)]
    pub fn history_length(&self) -> usize {
        self.inner.history_len()
    }

    #[wasm_bindgen(getter, js_name = xIsNext)]
    pub fn x_is_next(&self) -> bool {
        self.inner.x_is_next()
    }

    #[wasm_bindgen(getter, js_name = isAscending)]
    pub fn is_ascending(&self) -> bool {
        self.inner.sort_order().is_ascending()
    }

    #[wasm_bindgen(getter, js_name = isDraw)]
    pub fn is_draw(&self) -> bool {
        self.inner.is_draw()
    }

    /// Status line: "Winner: X", "Draw" or "Next player: O"
    pub fn status(&self) -> String {
        self.inner.status().to_string()
    }

    /// Winner: 0 (none), 1 (X), or 2 (O)
    pub fn winner(&self) -> u8 {
        match self.inner.winner() {
            None => 0,
            Some(win) => win.mark as u8,
        }
    }

    /// Cell indices of the winning line, empty if there is no winner
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<u8> {
        self.inner
            .winner()
            .map(|win| win.line.iter().map(|pos| pos.0).collect())
            .unwrap_or_default()
    }

    /// Move list in display order, as an array of
    /// { index, location: { row, col } | null, description, current }
    #[wasm_bindgen(js_name = moveList)]
    pub fn move_list(&self) -> Result<JsValue, JsValue> {
        let entries: Vec<MoveEntry> = self.inner.move_list();
        serde_wasm_bindgen::to_value(&entries).map_err(JsValue::from)
    }

    /// Location `[row, col]` (1-based) of the move that produced the
    /// displayed snapshot, empty for the game start
    #[wasm_bindgen(js_name = lastLocation)]
    pub fn last_location(&self) -> Vec<u8> {
        self.inner
            .current_move()
            .location
            .map(|location| vec![location.row(), location.col()])
            .unwrap_or_default()
    }

    /// Whole game as notation text
    #[wasm_bindgen(js_name = exportNotation)]
    pub fn export_notation(&self) -> String {
        notation::export(&self.inner)
    }

    /// Replace the game from notation text. Throws on bad input and leaves
    /// the current game untouched.
    #[wasm_bindgen(js_name = importNotation)]
    pub fn import_notation(&mut self, text: &str) -> Result<(), JsValue> {
        let mut game = notation::import(text).map_err(|e| JsValue::from_str(&e.to_string()))?;
        if self.inner.sort_order() != game.sort_order() {
            game.toggle_sort_order();
        }
        self.inner = game;
        Ok(())
    }

    /// Mark of the side to move: 1 (X) or 2 (O)
    #[wasm_bindgen(js_name = activePlayer)]
    pub fn active_player(&self) -> u8 {
        match self.inner.active_player() {
            Mark::X => 1,
            Mark::O => 2,
        }
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
