//! Human-readable census summary.

use std::time::Duration;

use crate::census::Census;

/// Share of `part` in `whole`, in percent.
pub fn pct(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Print final summary
pub fn print_summary(census: &Census, elapsed: Duration) {
    println!("Nodes: {}", census.nodes);
    println!("Distinct positions: {}", census.distinct_positions);
    println!("Finished games: {}", census.games);
    println!(
        "  - X wins: {} ({:.1}%)",
        census.x_wins,
        pct(census.x_wins, census.games)
    );
    println!(
        "  - O wins: {} ({:.1}%)",
        census.o_wins,
        pct(census.o_wins, census.games)
    );
    println!(
        "  - Draws: {} ({:.1}%)",
        census.draws,
        pct(census.draws, census.games)
    );
    println!("Games by length:");
    for (length, &count) in census.games_by_length.iter().enumerate() {
        if count > 0 {
            println!("  {} moves: {}", length, count);
        }
    }
    println!("Max depth: {}", census.max_depth);
    println!("Time: {:.3}s", elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct() {
        assert_eq!(pct(0, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
        assert_eq!(pct(3, 3), 100.0);
    }
}
