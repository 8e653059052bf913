//! Scripted game scenarios
//!
//! Loads games from `tests/fixtures/games.json`, plays each one cell at a time
//! through the silent `apply_move`, and checks:
//! - Winner and winning line
//! - Draw detection
//! - History length (ignored moves must not grow it)
//! - Notation export/import keeps the same history

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use tictactoe_core::{notation, GameState, Mark, Pos, Status};

#[derive(Debug, Deserialize)]
struct Fixture {
    version: String,
    games: Vec<Game>,
}

#[derive(Debug, Deserialize)]
struct Game {
    description: String,
    moves: Vec<usize>,
    winner: Option<Mark>,
    line: Option<[u8; 3]>,
    draw: bool,
    history_len: usize,
}

fn load_fixture(path: &Path) -> Fixture {
    let file = File::open(path).expect("Failed to open games fixture");
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).expect("Failed to parse JSON")
}

fn cell(index: usize) -> Pos {
    Pos::from_index(index).unwrap()
}

fn fixture_path() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/games.json")
}

#[test]
fn test_scripted_games() {
    let fixture = load_fixture(&fixture_path());
    assert_eq!(fixture.version, "1");
    assert!(!fixture.games.is_empty());

    let mut failures = Vec::new();

    for game in &fixture.games {
        let mut state = GameState::new();
        for &cell in &game.moves {
            state.apply_move(cell);
        }

        let win = state.winner();
        let got_winner = win.map(|w| w.mark);
        let got_line = win.map(|w| w.line.map(|pos| pos.index() as u8));

        if got_winner != game.winner {
            failures.push(format!(
                "{}: winner {:?}, expected {:?}",
                game.description, got_winner, game.winner
            ));
        }
        if got_line != game.line {
            failures.push(format!(
                "{}: line {:?}, expected {:?}",
                game.description, got_line, game.line
            ));
        }
        if state.is_draw() != game.draw {
            failures.push(format!(
                "{}: draw {}, expected {}",
                game.description,
                state.is_draw(),
                game.draw
            ));
        }
        if state.history_len() != game.history_len {
            failures.push(format!(
                "{}: history length {}, expected {}",
                game.description,
                state.history_len(),
                game.history_len
            ));
        }

        let expected_status = match (game.winner, game.draw) {
            (Some(mark), _) => Status::Winner(mark),
            (None, true) => Status::Draw,
            (None, false) => Status::NextPlayer(state.active_player()),
        };
        if state.status() != expected_status {
            failures.push(format!(
                "{}: status {:?}, expected {:?}",
                game.description,
                state.status(),
                expected_status
            ));
        }

        match notation::import(&notation::export(&state)) {
            Ok(copy) if copy.history() == state.history() => {}
            Ok(_) => failures.push(format!("{}: notation changed history", game.description)),
            Err(e) => failures.push(format!("{}: notation failed: {}", game.description, e)),
        }
    }

    if !failures.is_empty() {
        for f in &failures {
            println!("{}", f);
        }
        panic!("{} scenario check(s) failed", failures.len());
    }
}

#[test]
fn test_time_travel_scenario() {
    let mut game = GameState::new();
    for cell in [4, 0, 8] {
        assert!(game.apply_move(cell));
    }
    assert_eq!(game.history_len(), 4);

    assert!(game.jump_to(1));
    assert_eq!(game.active_player(), Mark::O);
    assert!(game.apply_move(2));

    assert_eq!(game.history_len(), 3);
    assert_eq!(game.current_index(), 2);
    assert_eq!(game.current_board().get(cell(2)), Some(Mark::O));
    assert_eq!(game.current_board().get(cell(0)), None);
    assert_eq!(notation::export(&game), "(2,2) (1,3)");
}

#[test]
fn test_review_finished_game() {
    let mut game = notation::import("(1,1) (1,2) (2,1) (2,2) (3,1)").unwrap();
    game.toggle_sort_order();

    let list = game.move_list();
    assert_eq!(list.len(), 6);
    assert_eq!(list[0].description, "You are at move #5");
    assert_eq!(list[5].description, "Go to game start");

    for index in (0..game.history_len()).rev() {
        assert!(game.jump_to(index));
        let expected_terminal = index == 5;
        assert_eq!(game.outcome().is_terminal(), expected_terminal);
    }

    // Back at the start: nothing has been lost.
    assert_eq!(game.history_len(), 6);
    assert_eq!(game.status(), Status::NextPlayer(Mark::X));
}
