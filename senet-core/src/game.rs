//! Turn flow: throw, enumerate, choose, apply, hand over

use serde::{Deserialize, Serialize};

use crate::ai::{select_move, ComputerPlayer};
use crate::board::{Board, Player};
use crate::rules::{LegalMove, MoveInfo, MoveRejectReason};
use crate::sticks::{StickSource, Throw};

/// What happened during one throw of the sticks
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: Player,
    pub throw: Throw,
    /// Legal moves offered for the throw
    pub moves: Vec<LegalMove>,
    pub played: Option<MoveInfo>,
    /// No legal move existed; control already went to the opponent
    pub passed: bool,
    /// The same player throws again
    pub again: bool,
}

/// Outcome of a computer-vs-computer game
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub winner: Option<Player>,
    pub turns: usize,
    pub history: Vec<TurnReport>,
}

impl Board {
    /// Close a turn in which a move was played.
    ///
    /// Returns true when the mover keeps control.
    pub fn finish_turn(&mut self, throw: Throw) -> bool {
        if self.game_over {
            return false;
        }
        if throw.extra_turn {
            return true;
        }
        self.switch_player();
        false
    }

    /// Give up the turn when no move is possible
    pub fn pass_turn(&mut self) {
        self.switch_player();
    }
}

/// Play one throw for the current player.
///
/// `choose` receives the board and the legal moves and returns the move to
/// play; returning `None` with moves available passes the turn. A chosen
/// move that fails the rules is reported as an error and the board is left
/// as it was apart from the recorded throw.
pub fn play_turn<S, F>(
    board: &mut Board,
    sticks: &mut S,
    choose: F,
) -> Result<TurnReport, MoveRejectReason>
where
    S: StickSource + ?Sized,
    F: FnOnce(&Board, &[LegalMove]) -> Option<LegalMove>,
{
    if board.is_game_over() {
        return Err(MoveRejectReason::GameOver);
    }

    let player = board.current_player();
    let throw = board.throw_sticks(sticks);
    let moves = board.legal_moves(throw.steps as u32);

    let chosen = if moves.is_empty() { None } else { choose(board, &moves) };

    let Some(mv) = chosen else {
        board.pass_turn();
        return Ok(TurnReport {
            player,
            throw,
            moves,
            played: None,
            passed: true,
            again: false,
        });
    };

    let info = board.move_piece(mv.from, throw.steps as u32)?;
    let again = board.finish_turn(throw);

    Ok(TurnReport {
        player,
        throw,
        moves,
        played: Some(info),
        passed: false,
        again,
    })
}

/// Let two computer players play until someone wins or `max_turns` throws
/// have been made
pub fn play_game<S: StickSource + ?Sized>(
    board: &mut Board,
    players: [ComputerPlayer; 2],
    sticks: &mut S,
    max_turns: usize,
) -> GameRecord {
    let mut record = GameRecord::default();

    while !board.is_game_over() && record.turns < max_turns {
        let ai = players[board.current_player() as usize];
        let report = play_turn(board, sticks, |b, moves| select_move(ai.difficulty, moves, b));
        record.turns += 1;
        match report {
            Ok(report) => record.history.push(report),
            // The selector only picks from the legal list
            Err(_) => break,
        }
    }

    record.winner = board.winner();
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Difficulty;
    use crate::board::Cell;
    use crate::sticks::{RngSticks, ScriptedSticks};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn first(_: &Board, moves: &[LegalMove]) -> Option<LegalMove> {
        moves.first().copied()
    }

    #[test]
    fn test_plain_roll_hands_over() {
        let mut board = Board::new();
        let mut sticks = ScriptedSticks::from_steps([2]);
        let report = play_turn(&mut board, &mut sticks, first).unwrap();
        assert_eq!(report.player, Player::Player1);
        assert_eq!(report.played.and_then(|i| i.dest), Some(11));
        assert!(!report.again);
        assert_eq!(board.current_player(), Player::Player2);
    }

    #[test]
    fn test_extra_turn_keeps_player() {
        let mut board = Board::new();
        let mut sticks = ScriptedSticks::from_steps([4]);
        let report = play_turn(&mut board, &mut sticks, first).unwrap();
        assert!(report.throw.extra_turn);
        assert!(report.again);
        assert_eq!(board.current_player(), Player::Player1);
    }

    #[test]
    fn test_pass_switches_before_report() {
        // Player1 on 28 can only leave with a 3
        let mut board = Board::from_layout(&[28], &[1], Player::Player1);
        let mut sticks = ScriptedSticks::from_steps([1]);
        let report = play_turn(&mut board, &mut sticks, first).unwrap();
        assert!(report.passed);
        assert!(report.moves.is_empty());
        assert!(!report.again);
        assert_eq!(board.current_player(), Player::Player2);
    }

    #[test]
    fn test_illegal_choice_rejected() {
        let mut board = Board::new();
        let before = *board.cells();
        let mut sticks = ScriptedSticks::from_steps([2]);
        let result = play_turn(&mut board, &mut sticks, |_, _| {
            Some(LegalMove { from: 1, to: Some(3), offboard: false })
        });
        assert_eq!(result, Err(MoveRejectReason::OwnPieceBlock));
        assert_eq!(board.cells(), &before);
        assert_eq!(board.current_player(), Player::Player1);
    }

    #[test]
    fn test_turn_on_finished_game() {
        let mut board = Board::from_layout(&[], &[1], Player::Player2);
        let mut sticks = ScriptedSticks::from_steps([1]);
        assert_eq!(
            play_turn(&mut board, &mut sticks, first),
            Err(MoveRejectReason::GameOver)
        );
        assert_eq!(sticks.remaining(), 4);
    }

    #[test]
    fn test_full_game_keeps_invariants() {
        let mut board = Board::new();
        let mut sticks = RngSticks::new(ChaCha8Rng::seed_from_u64(11));
        let players = [
            ComputerPlayer::new(Difficulty::Normal),
            ComputerPlayer::new(Difficulty::Easy),
        ];

        let mut turns = 0;
        while !board.is_game_over() && turns < 5000 {
            let ai = players[board.current_player() as usize];
            play_turn(&mut board, &mut sticks, |b, m| select_move(ai.difficulty, m, b)).unwrap();
            assert!(board.pieces_accounted_for());
            if board.cell(27) != Cell::Empty {
                assert_ne!(board.cell(15), Cell::Empty);
            }
            turns += 1;
        }

        assert!(board.is_game_over());
        let winner = board.winner().unwrap();
        assert_eq!(board.pieces_off(winner), 5);
    }

    #[test]
    fn test_play_game_respects_turn_cap() {
        let mut board = Board::new();
        let mut sticks = RngSticks::new(ChaCha8Rng::seed_from_u64(3));
        let players = [ComputerPlayer::new(Difficulty::Easy); 2];
        let record = play_game(&mut board, players, &mut sticks, 5);
        assert_eq!(record.turns, 5);
        assert_eq!(record.history.len(), 5);
    }
}
