//! Tic-tac-toe game logic with bit-packed boards, move history and time travel.
//!
//! # Board Encoding (32-bit)
//!
//! ```text
//! Bits 0-17:  Board state (9 cells × 2 bits per cell)
//! Bits 18-31: Unused (zero for a valid board)
//!
//! Each cell (2 bits):
//!   0 = empty, 1 = X, 2 = O (3 never occurs)
//!
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//! ```
//!
//! Locations shown to players are 1-based, so cell 0 is `(1, 1)` and cell 8
//! is `(3, 3)`.
//!
//! Whose turn it is is not stored in the board. [`GameState`] derives it from
//! the parity of the current history index.

pub mod game;
pub mod notation;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use game::{GameError, GameState, Move, MoveEntry, SortOrder, Status};
pub use notation::NotationError;

use serde::{Deserialize, Serialize};

/// Player mark. X always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize, derive_more::Display)]
#[repr(u8)]
pub enum Mark {
    X = 1,
    O = 2,
}

impl Mark {
    /// Get the other mark.
    #[inline]
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Convert from the 2-bit cell encoding (1 or 2) to a mark.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Mark> {
        match bits {
            1 => Some(Mark::X),
            2 => Some(Mark::O),
            _ => None,
        }
    }

    /// The mark that places a piece at history index `ply`.
    /// Even plies belong to X.
    #[inline]
    pub fn for_ply(ply: usize) -> Mark {
        if ply % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }
}

/// Position on the 3x3 board (0-8).
///
/// Only this crate can build one from a raw index, so every `Pos` is on the
/// board. Use [`Pos::from_index`] from outside.
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize)]
pub struct Pos(u8);

impl Pos {
    /// Create a position from a cell index, or None if it is off the board.
    #[inline]
    pub fn from_index(index: usize) -> Option<Pos> {
        if index < 9 {
            Some(Pos(index as u8))
        } else {
            None
        }
    }

    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Cell index as usize.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The 1-based location shown to players.
    #[inline]
    pub fn location(self) -> Location {
        Location {
            row: self.row() + 1,
            col: self.col() + 1,
        }
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..9).map(Pos)
    }
}

/// A 1-based `(row, col)` cell location, as displayed in the move list.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Location {
    row: u8,
    col: u8,
}

impl Location {
    /// Create a location, or None unless both coordinates are in 1..=3.
    pub fn new(row: u8, col: u8) -> Option<Location> {
        if (1..=3).contains(&row) && (1..=3).contains(&col) {
            Some(Location { row, col })
        } else {
            None
        }
    }

    /// Row, 1-3.
    #[inline]
    pub fn row(self) -> u8 {
        self.row
    }

    /// Column, 1-3.
    #[inline]
    pub fn col(self) -> u8 {
        self.col
    }

    /// The cell this location names.
    #[inline]
    pub fn pos(self) -> Pos {
        Pos::from_row_col(self.row - 1, self.col - 1)
    }
}

/// A completed line: the winning mark and the three cells forming it.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
pub struct Win {
    pub mark: Mark,
    pub line: [Pos; 3],
}

/// Where a board stands in the game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Outcome {
    /// No winner and at least one empty cell.
    InProgress,
    /// Some line is complete. Terminal.
    Won(Win),
    /// Every cell filled with no complete line. Terminal.
    Drawn,
}

impl Outcome {
    /// Won or Drawn.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// The winning line, if any.
    #[inline]
    pub fn win(&self) -> Option<Win> {
        match self {
            Outcome::Won(win) => Some(*win),
            _ => None,
        }
    }
}

/// Compact board snapshot - fits in a single u32.
///
/// See module documentation for encoding details. Boards are values: placing
/// a mark returns a new board and leaves the original untouched, which is
/// what lets history keep every snapshot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board(pub u32);

impl Board {
    /// Bits per cell.
    const CELL_BITS: u32 = 2;
    /// Mask for a single cell (0b11).
    const CELL_MASK: u32 = 0b11;
    /// All bits a valid board may use.
    const USED_MASK: u32 = (1 << 18) - 1;

    /// The 8 winning lines, in the order they are checked.
    pub const WIN_LINES: [[Pos; 3]; 8] = [
        [Pos(0), Pos(1), Pos(2)], // Row 0
        [Pos(3), Pos(4), Pos(5)], // Row 1
        [Pos(6), Pos(7), Pos(8)], // Row 2
        [Pos(0), Pos(3), Pos(6)], // Col 0
        [Pos(1), Pos(4), Pos(7)], // Col 1
        [Pos(2), Pos(5), Pos(8)], // Col 2
        [Pos(0), Pos(4), Pos(8)], // Main diagonal
        [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
    ];

    /// Bitmasks for `WIN_LINES`, same order. Bit i stands for cell i.
    const WIN_MASKS: [u16; 8] = [
        0b000_000_111, // Row 0: cells 0,1,2
        0b000_111_000, // Row 1: cells 3,4,5
        0b111_000_000, // Row 2: cells 6,7,8
        0b001_001_001, // Col 0: cells 0,3,6
        0b010_010_010, // Col 1: cells 1,4,7
        0b100_100_100, // Col 2: cells 2,5,8
        0b100_010_001, // Main diagonal: cells 0,4,8
        0b001_010_100, // Anti-diagonal: cells 2,4,6
    ];

    /// Create a new empty board.
    #[inline]
    pub fn new() -> Board {
        Board(0)
    }

    /// Get the 2 bits for the cell at the given position.
    #[inline]
    fn cell(&self, pos: Pos) -> u32 {
        (self.0 >> (pos.0 as u32 * Self::CELL_BITS)) & Self::CELL_MASK
    }

    /// Get the mark at a position, or None if the cell is empty.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Mark> {
        Mark::from_bits(self.cell(pos) as u8)
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cell(pos) == 0
    }

    /// Return a copy of this board with `mark` placed at `pos`.
    ///
    /// Does NOT validate - caller must ensure the cell is empty.
    #[inline]
    #[must_use]
    pub fn place(self, pos: Pos, mark: Mark) -> Board {
        debug_assert!(self.is_empty(pos), "cell {} already occupied", pos.0);
        let shift = pos.0 as u32 * Self::CELL_BITS;
        Board((self.0 & !(Self::CELL_MASK << shift)) | ((mark as u32) << shift))
    }

    /// All 9 cells in index order.
    pub fn squares(&self) -> [Option<Mark>; 9] {
        let mut squares = [None; 9];
        for pos in Pos::all() {
            squares[pos.index()] = self.get(pos);
        }
        squares
    }

    /// Compute occupancy masks for both marks.
    /// Returns (x_mask, o_mask) where bit i is set if that mark is at cell i.
    #[inline]
    pub fn masks(&self) -> (u16, u16) {
        let mut x_mask = 0u16;
        let mut o_mask = 0u16;

        for pos in 0..9 {
            match self.cell(Pos(pos)) {
                1 => x_mask |= 1 << pos,
                2 => o_mask |= 1 << pos,
                _ => {}
            }
        }

        (x_mask, o_mask)
    }

    /// Number of cells holding `mark`.
    #[inline]
    pub fn count(&self, mark: Mark) -> u8 {
        let (x_mask, o_mask) = self.masks();
        match mark {
            Mark::X => x_mask.count_ones() as u8,
            Mark::O => o_mask.count_ones() as u8,
        }
    }

    /// Number of non-empty cells.
    #[inline]
    pub fn filled(&self) -> u8 {
        let (x_mask, o_mask) = self.masks();
        (x_mask | o_mask).count_ones() as u8
    }

    /// Check if all 9 cells are filled.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled() == 9
    }

    /// The mark due to play next on this board, judged by mark counts.
    #[inline]
    pub fn next_mark(&self) -> Mark {
        if self.count(Mark::X) == self.count(Mark::O) {
            Mark::X
        } else {
            Mark::O
        }
    }

    /// Check the board invariants: no stray bits, no invalid cell codes,
    /// and X leads O by zero or one mark.
    pub fn is_consistent(&self) -> bool {
        if self.0 & !Self::USED_MASK != 0 {
            return false;
        }
        if Pos::all().any(|pos| self.cell(pos) == Self::CELL_MASK) {
            return false;
        }
        let x = self.count(Mark::X);
        let o = self.count(Mark::O);
        x == o || x == o + 1
    }

    /// The single cell filled in `self` that is empty in `earlier`.
    ///
    /// Returns None unless the boards differ by exactly one newly filled cell
    /// with every other cell unchanged.
    pub fn added_since(&self, earlier: &Board) -> Option<Pos> {
        let mut added = None;
        for pos in Pos::all() {
            let now = self.cell(pos);
            let before = earlier.cell(pos);
            if now == before {
                continue;
            }
            if before != 0 || added.is_some() {
                return None;
            }
            added = Some(pos);
        }
        added
    }

    /// Get the first complete line, if any. See [`evaluate`].
    #[inline]
    pub fn winner(&self) -> Option<Win> {
        evaluate(self)
    }

    /// Classify the board as in progress, won or drawn.
    pub fn outcome(&self) -> Outcome {
        match evaluate(self) {
            Some(win) => Outcome::Won(win),
            None if self.is_full() => Outcome::Drawn,
            None => Outcome::InProgress,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the board on one line, rows separated by `/`, `.` for empty.
/// The empty board is `.../.../...`.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pos in Pos::all() {
            if pos.0 > 0 && pos.col() == 0 {
                f.write_str("/")?;
            }
            let c = match self.get(pos) {
                Some(Mark::X) => 'X',
                Some(Mark::O) => 'O',
                None => '.',
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Find the winner of a board.
///
/// Lines are checked in the fixed order of [`Board::WIN_LINES`] (rows, then
/// columns, then diagonals) and the first complete one is returned, so the
/// result depends only on the board and never on how it was reached.
pub fn evaluate(board: &Board) -> Option<Win> {
    let (x_mask, o_mask) = board.masks();

    for (line, &win_mask) in Board::WIN_LINES.iter().zip(Board::WIN_MASKS.iter()) {
        if (x_mask & win_mask) == win_mask {
            return Some(Win { mark: Mark::X, line: *line });
        }
        if (o_mask & win_mask) == win_mask {
            return Some(Win { mark: Mark::O, line: *line });
        }
    }

    None
}
