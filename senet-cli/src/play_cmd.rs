//! Play command - interactive game on the terminal
//!
//! Each seat is a human reading from stdin or a computer player. The game
//! can be saved after every turn and resumed later.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use senet_core::{play_turn, select_move, Board, Snapshot, StickSource};

use crate::config::{Seat, SessionConfig};
use crate::render::{describe_moves, describe_turn, render_board};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Who plays first: human, easy or normal
    #[arg(long)]
    pub player1: Option<Seat>,

    /// Who plays second: human, easy or normal
    #[arg(long)]
    pub player2: Option<Seat>,

    /// Write the game to this file after every turn
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,

    /// Continue a previously saved game
    #[arg(long, value_name = "FILE")]
    pub resume: Option<PathBuf>,

    /// Pause before computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

/// How the session ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Finished,
    Quit,
    TurnLimit,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs, config: SessionConfig) -> Result<()> {
    let mut config = config.with_seats(args.player1, args.player2);
    if let Some(delay) = args.delay_ms {
        config.ai_delay_ms = delay;
    }

    let mut board = match &args.resume {
        Some(path) => {
            let snapshot = Snapshot::load(path)?;
            Board::from_snapshot(&snapshot)
                .with_context(|| format!("Invalid saved game: {}", path.display()))?
        }
        None => Board::new(),
    };

    tracing::info!(
        "Starting game: {:?} vs {:?} (seed={:?})",
        config.player1,
        config.player2,
        config.seed
    );

    let mut sticks = senet_core::RngSticks::new(config.create_rng());
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let end = run_session(
        &mut board,
        &config,
        &mut sticks,
        args.save,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )?;

    tracing::info!("Session ended: {:?}, winner={:?}", end, board.winner());
    Ok(())
}

/// Drive turns until the game ends, the player quits or the turn cap hits
pub fn run_session<S, R, W>(
    board: &mut Board,
    config: &SessionConfig,
    sticks: &mut S,
    save: Option<PathBuf>,
    input: &mut R,
    out: &mut W,
) -> Result<SessionEnd>
where
    S: StickSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut turns = 0;

    while !board.is_game_over() {
        if turns >= config.max_turns {
            writeln!(out, "Turn limit reached.")?;
            return Ok(SessionEnd::TurnLimit);
        }
        turns += 1;

        write!(out, "\n{}", render_board(board))?;

        let player = board.current_player();
        match config.seat(player).computer() {
            Some(ai) => {
                if config.ai_delay_ms > 0 {
                    std::thread::sleep(Duration::from_millis(config.ai_delay_ms));
                }
                let report =
                    play_turn(board, sticks, |b, moves| select_move(ai.difficulty, moves, b))?;
                tracing::debug!("{:?}", report);
                writeln!(out, "{}", describe_turn(&report))?;
            }
            None => {
                if !human_turn(board, sticks, input, out)? {
                    writeln!(out, "Goodbye.")?;
                    return Ok(SessionEnd::Quit);
                }
            }
        }

        if let Some(path) = &save {
            board.serialize().save(path)?;
        }
    }

    write!(out, "\n{}", render_board(board))?;
    if let Some(winner) = board.winner() {
        writeln!(out, "{} wins!", winner)?;
    }
    Ok(SessionEnd::Finished)
}

// ============================================================================
// HUMAN TURN
// ============================================================================

/// Read one trimmed line; `None` on end of input
fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Returns false when the player quits
fn human_turn<S, R, W>(board: &mut Board, sticks: &mut S, input: &mut R, out: &mut W) -> Result<bool>
where
    S: StickSource + ?Sized,
    R: BufRead,
    W: Write,
{
    let player = board.current_player();
    write!(out, "{}: press Enter to throw (q to quit) ", player)?;
    out.flush()?;
    match read_line(input)?.as_deref() {
        None | Some("q") => return Ok(false),
        _ => {}
    }

    let throw = board.throw_sticks(sticks);
    let steps = throw.steps as u32;
    let moves = board.legal_moves(steps);
    writeln!(out, "{} threw {}", player, throw.steps)?;

    if moves.is_empty() {
        board.pass_turn();
        writeln!(out, "No legal move, turn passes to {}.", board.current_player())?;
        return Ok(true);
    }

    loop {
        write!(out, "Move which piece? [{}] ", describe_moves(&moves))?;
        out.flush()?;

        let line = match read_line(input)? {
            None => return Ok(false),
            Some(line) if line == "q" => return Ok(false),
            Some(line) => line,
        };

        let start = match line.parse::<usize>() {
            Ok(start) => start,
            Err(_) => {
                tracing::warn!("Ignoring input {:?}", line);
                writeln!(out, "Enter the number of a house.")?;
                continue;
            }
        };

        match board.move_piece(start, steps) {
            Ok(info) => {
                tracing::debug!("{:?}", info);
                if info.captures {
                    writeln!(out, "Captured! The piece goes back to {}.", info.start)?;
                }
                if board.finish_turn(throw) {
                    writeln!(out, "{} throws again.", player)?;
                }
                return Ok(true);
            }
            Err(reason) => {
                tracing::debug!("Rejected {} by {}: {}", start, steps, reason.code());
                writeln!(out, "Not allowed: {}.", reason)?;
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
