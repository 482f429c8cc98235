//! Match command - computer against computer
//!
//! ## Architecture
//!
//! - run() - orchestration
//! - play_match(), report_results()
//! - play_single_game(), compute_match_statistics()
//! - formatting utilities

use anyhow::Result;
use clap::Args;

use senet_core::{play_game, Board, ComputerPlayer, Difficulty, Player, RngSticks, StickSource};

use crate::config::SessionConfig;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty of the first contestant
    #[arg(long, default_value = "normal")]
    pub first: Difficulty,

    /// Difficulty of the second contestant
    #[arg(long, default_value = "easy")]
    pub second: Difficulty,

    /// Number of games to play (will alternate seats)
    #[arg(long)]
    pub games: Option<usize>,

    /// Maximum throws per game
    #[arg(long)]
    pub max_turns: Option<usize>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    /// Contestant seated as Player1 (0 = first, 1 = second)
    first_seat: usize,
    /// Winning contestant, `None` if the turn cap was hit
    winner: Option<usize>,
    winning_seat: Option<Player>,
    turns: usize,
    passes: usize,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    first_wins: usize,
    second_wins: usize,
    player1_wins: usize,
    unfinished: usize,
    avg_turns: f32,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: MatchArgs, config: SessionConfig) -> Result<()> {
    let games = args.games.unwrap_or(config.games);
    let max_turns = args.max_turns.unwrap_or(config.max_turns);

    tracing::info!(
        "Starting match: {} vs {} ({} games, seed={:?})",
        args.first,
        args.second,
        games,
        config.seed
    );

    let mut sticks = RngSticks::new(config.create_rng());
    let contestants = [
        ComputerPlayer::new(args.first),
        ComputerPlayer::new(args.second),
    ];
    let results = play_match(contestants, games, max_turns, &mut sticks);

    if args.json {
        print_json_results(&results, &args);
    } else {
        print_text_results(&results, &args);
    }

    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

fn play_match<S: StickSource + ?Sized>(
    contestants: [ComputerPlayer; 2],
    games: usize,
    max_turns: usize,
    sticks: &mut S,
) -> MatchResults {
    let records = (0..games)
        .map(|i| {
            // Alternate seats for fairness
            let first_seat = i % 2;
            let record = play_single_game(contestants, first_seat, i + 1, max_turns, sticks);
            tracing::info!(
                "Game {}: winner={:?} ({} turns)",
                record.game_number,
                record.winning_seat,
                record.turns
            );
            record
        })
        .collect();

    compute_match_statistics(records)
}

// ============================================================================
// STEPS
// ============================================================================

fn play_single_game<S: StickSource + ?Sized>(
    contestants: [ComputerPlayer; 2],
    first_seat: usize,
    game_number: usize,
    max_turns: usize,
    sticks: &mut S,
) -> GameRecord {
    let seats = [contestants[first_seat], contestants[1 - first_seat]];
    let mut board = Board::new();
    let record = play_game(&mut board, seats, sticks, max_turns);

    let winner = record.winner.map(|seat| match seat {
        Player::Player1 => first_seat,
        Player::Player2 => 1 - first_seat,
    });

    GameRecord {
        game_number,
        first_seat,
        winner,
        winning_seat: record.winner,
        turns: record.turns,
        passes: record.history.iter().filter(|t| t.passed).count(),
    }
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let first_wins = games.iter().filter(|g| g.winner == Some(0)).count();
    let second_wins = games.iter().filter(|g| g.winner == Some(1)).count();
    let player1_wins = games
        .iter()
        .filter(|g| g.winning_seat == Some(Player::Player1))
        .count();
    let unfinished = games.iter().filter(|g| g.winner.is_none()).count();

    let total_turns: usize = games.iter().map(|g| g.turns).sum();
    let avg_turns = if games.is_empty() {
        0.0
    } else {
        total_turns as f32 / games.len() as f32
    };

    MatchResults {
        games,
        first_wins,
        second_wins,
        player1_wins,
        unfinished,
        avg_turns,
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

fn percent(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

fn print_json_results(results: &MatchResults, args: &MatchArgs) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        player1: Difficulty,
        winner: Option<Difficulty>,
        turns: usize,
        passes: usize,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        first: Difficulty,
        second: Difficulty,
        first_wins: usize,
        second_wins: usize,
        player1_wins: usize,
        unfinished: usize,
        avg_turns: f32,
        games: Vec<JsonGame>,
    }

    let names = [args.first, args.second];
    let output = JsonOutput {
        total_games: results.games.len(),
        first: args.first,
        second: args.second,
        first_wins: results.first_wins,
        second_wins: results.second_wins,
        player1_wins: results.player1_wins,
        unfinished: results.unfinished,
        avg_turns: results.avg_turns,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                player1: names[g.first_seat],
                winner: g.winner.map(|w| names[w]),
                turns: g.turns,
                passes: g.passes,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games:  {}", total);
    println!(
        "{:<6} wins:  {} ({:.1}%)",
        args.first,
        results.first_wins,
        percent(results.first_wins, total)
    );
    println!(
        "{:<6} wins:  {} ({:.1}%)",
        args.second,
        results.second_wins,
        percent(results.second_wins, total)
    );
    println!(
        "Player 1 wins: {} ({:.1}%)",
        results.player1_wins,
        percent(results.player1_wins, total)
    );
    println!("Unfinished:   {}", results.unfinished);
    println!("Avg turns:    {:.1}", results.avg_turns);
}

// ============================================================================
// TESTS
// ============================================================================
