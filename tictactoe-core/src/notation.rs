//! Plain-text game notation.
//!
//! A game is written as its moves in play order, each as a 1-based
//! `(row,col)` location, separated by whitespace:
//!
//! ```text
//! (2,2) (1,1) (3,3) (1,3)
//! ```
//!
//! The empty game is the empty string.

use crate::{GameError, GameState, Location};

/// Why a notation string could not be replayed.
///
/// `number` is the 1-based position of the offending move in the string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum NotationError {
    #[display("Move {number}: expected (row,col), got {token:?}")]
    Malformed { number: usize, token: String },

    #[display("Move {number}: ({row},{col}) is off the board")]
    OffBoard { number: usize, row: u8, col: u8 },

    #[display("Move {number} {token}: {reason}")]
    Illegal {
        number: usize,
        token: String,
        reason: GameError,
    },
}

impl std::error::Error for NotationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NotationError::Illegal { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

/// Write one location as a notation token.
pub fn format_location(location: Location) -> String {
    format!("({},{})", location.row(), location.col())
}

/// Export every move in the history, including any after the displayed one.
pub fn export(game: &GameState) -> String {
    game.history()
        .iter()
        .filter_map(|step| step.location)
        .map(format_location)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replay a notation string from an empty board.
///
/// The returned game displays its last move. Every move must be legal at the
/// point it is played, so nothing may follow a finished game.
pub fn import(text: &str) -> Result<GameState, NotationError> {
    let mut game = GameState::new();

    for (i, token) in text.split_whitespace().enumerate() {
        let number = i + 1;
        let location = parse_token(token, number)?;
        game.try_apply_move(location.pos().index())
            .map_err(|reason| NotationError::Illegal {
                number,
                token: token.to_string(),
                reason,
            })?;
    }

    Ok(game)
}

/// Parse `(row,col)` into a location.
fn parse_token(token: &str, number: usize) -> Result<Location, NotationError> {
    let malformed = || NotationError::Malformed {
        number,
        token: token.to_string(),
    };

    let inner = token
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (row, col) = inner.split_once(',').ok_or_else(malformed)?;
    let row = parse_coord(row).ok_or_else(malformed)?;
    let col = parse_coord(col).ok_or_else(malformed)?;

    Location::new(row, col).ok_or(NotationError::OffBoard { number, row, col })
}

/// A coordinate is exactly one ASCII digit.
fn parse_coord(text: &str) -> Option<u8> {
    match text.as_bytes() {
        [digit @ b'0'..=b'9'] => Some(digit - b'0'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Pos, Status};

    #[test]
    fn test_export_new_game_is_empty() {
        assert_eq!(export(&GameState::new()), "");
    }

    #[test]
    fn test_export_uses_one_based_locations() {
        let mut game = GameState::new();
        for cell in [4, 0, 8] {
            game.apply_move(cell);
        }
        assert_eq!(export(&game), "(2,2) (1,1) (3,3)");
    }

    #[test]
    fn test_export_includes_moves_after_current() {
        let mut game = GameState::new();
        for cell in [4, 0, 8] {
            game.apply_move(cell);
        }
        game.jump_to(1);
        assert_eq!(export(&game), "(2,2) (1,1) (3,3)");
    }

    #[test]
    fn test_import_replays_moves() {
        let game = import("(1,1) (1,2) (2,1) (2,2) (3,1)").unwrap();
        assert_eq!(game.history_len(), 6);
        assert_eq!(game.current_index(), 5);
        assert_eq!(game.status(), Status::Winner(Mark::X));
        assert_eq!(game.winner().unwrap().line, [Pos(0), Pos(3), Pos(6)]);
    }

    #[test]
    fn test_import_blank_is_new_game() {
        assert_eq!(import("").unwrap(), GameState::new());
        assert_eq!(import("  \n\t ").unwrap(), GameState::new());
    }

    #[test]
    fn test_import_splits_on_whitespace() {
        let err = import("  (2,2)\n(1, 3)  ").unwrap_err();
        // "(1," and "3)" are separate tokens
        assert!(matches!(err, NotationError::Malformed { number: 2, .. }));

        let game = import("  (2,2)\n(1,3)  ").unwrap();
        assert_eq!(game.history_len(), 3);
    }

    #[test]
    fn test_import_malformed() {
        let err = import("(1,1) 1,2").unwrap_err();
        assert_eq!(
            err,
            NotationError::Malformed {
                number: 2,
                token: "1,2".to_string()
            }
        );
        assert!(matches!(import("(a,1)"), Err(NotationError::Malformed { number: 1, .. })));
        assert!(matches!(import("(1;1)"), Err(NotationError::Malformed { .. })));
    }

    #[test]
    fn test_import_rejects_signed_and_padded_coords() {
        for token in ["(+1,+2)", "(01,2)", "(1,-2)", "(12,1)", "(,1)", "(1,)"] {
            assert_eq!(
                import(token),
                Err(NotationError::Malformed {
                    number: 1,
                    token: token.to_string()
                }),
                "{}",
                token
            );
        }
        assert!(import("(1,2)").is_ok());
    }

    #[test]
    fn test_import_off_board() {
        assert_eq!(
            import("(0,1)").unwrap_err(),
            NotationError::OffBoard { number: 1, row: 0, col: 1 }
        );
        assert_eq!(
            import("(2,2) (1,4)").unwrap_err().to_string(),
            "Move 2: (1,4) is off the board"
        );
    }

    #[test]
    fn test_import_occupied() {
        let err = import("(2,2) (2,2)").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Move 2 (2,2): Square (2, 2) is already occupied"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_import_after_game_over() {
        let err = import("(1,1) (1,2) (2,1) (2,2) (3,1) (3,3)").unwrap_err();
        assert_eq!(
            err,
            NotationError::Illegal {
                number: 6,
                token: "(3,3)".to_string(),
                reason: GameError::GameOver,
            }
        );
    }

    #[test]
    fn test_random_games_reimport() {
        use rand::prelude::*;

        let mut rng = rand::rng();

        for _ in 0..100 {
            let mut game = GameState::new();
            for _ in 0..20 {
                game.apply_move(rng.random_range(0..9));
            }
            let text = export(&game);
            let copy = import(&text).unwrap();
            assert_eq!(copy.history(), game.history());
        }
    }
}
