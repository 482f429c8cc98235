//! Heuristic computer opponent

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, SPECIAL_HOUSES};
use crate::rules::LegalMove;
use crate::sticks::StickSource;
use crate::game::{self, GameRecord};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score for bearing a piece off
const OFFBOARD_SCORE: i32 = 100;

const CAPTURE_BONUS: i32 = 25;
const SPECIAL_HOUSE_BONUS: i32 = 15;
const EXIT_ROW_BONUS: i32 = 10;

/// First house of the exit row
const EXIT_ROW_START: usize = 28;

// ============================================================================
// DIFFICULTY
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Furthest destination wins
    Easy,
    /// Adds bonuses for captures, special houses and the exit row
    #[default]
    Normal,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Easy => f.pad("easy"),
            Difficulty::Normal => f.pad("normal"),
        }
    }
}

// ============================================================================
// SCORING
// ============================================================================

/// Score a move from the current player's point of view (higher = better)
pub fn score_move(difficulty: Difficulty, mv: &LegalMove, board: &Board) -> i32 {
    let dest = match mv.to {
        Some(dest) if !mv.offboard => dest,
        _ => return OFFBOARD_SCORE,
    };

    let mut score = dest as i32;
    if difficulty == Difficulty::Easy {
        return score;
    }

    if board.cell(dest) == Cell::Occupied(board.current_player().opponent()) {
        score += CAPTURE_BONUS;
    }
    if SPECIAL_HOUSES.contains(&dest) {
        score += SPECIAL_HOUSE_BONUS;
    }
    if dest >= EXIT_ROW_START {
        score += EXIT_ROW_BONUS;
    }

    score
}

/// Pick the best-scoring move; the earliest move in the list wins ties.
///
/// Returns `None` for an empty list, which callers treat as a pass.
pub fn select_move(difficulty: Difficulty, moves: &[LegalMove], board: &Board) -> Option<LegalMove> {
    moves
        .iter()
        .fold(None, |best: Option<(LegalMove, i32)>, mv| {
            let score = score_move(difficulty, mv, board);
            match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((*mv, score)),
            }
        })
        .map(|(mv, _)| mv)
}

// ============================================================================
// COMPUTER PLAYER
// ============================================================================

/// Computer player bound to a difficulty
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComputerPlayer {
    pub difficulty: Difficulty,
}

impl ComputerPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    /// Choose among the current player's legal moves for `steps`
    pub fn best_move(&self, board: &Board, steps: u32) -> Option<LegalMove> {
        let moves = board.legal_moves(steps);
        select_move(self.difficulty, &moves, board)
    }

    /// Play both seats until the game ends or `max_turns` is reached
    pub fn play_game<S: StickSource + ?Sized>(
        &self,
        board: &mut Board,
        sticks: &mut S,
        max_turns: usize,
    ) -> GameRecord {
        game::play_game(board, [*self, *self], sticks, max_turns)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::sticks::ScriptedSticks;

    fn mv(from: usize, to: usize) -> LegalMove {
        LegalMove { from, to: Some(to), offboard: false }
    }

    fn exit(from: usize) -> LegalMove {
        LegalMove { from, to: None, offboard: true }
    }

    #[test]
    fn test_empty_list_passes() {
        let board = Board::new();
        assert_eq!(select_move(Difficulty::Easy, &[], &board), None);
        assert_eq!(select_move(Difficulty::Normal, &[], &board), None);
    }

    #[test]
    fn test_easy_prefers_furthest() {
        let board = Board::from_layout(&[3, 7], &[1], Player::Player1);
        let moves = [mv(3, 5), mv(7, 9)];
        assert_eq!(select_move(Difficulty::Easy, &moves, &board), Some(mv(7, 9)));
    }

    #[test]
    fn test_offboard_beats_everything() {
        let board = Board::from_layout(&[26, 30], &[1], Player::Player1);
        let moves = [mv(26, 27), exit(30)];
        assert_eq!(select_move(Difficulty::Easy, &moves, &board), Some(exit(30)));
        assert_eq!(select_move(Difficulty::Normal, &moves, &board), Some(exit(30)));
    }

    #[test]
    fn test_ties_keep_first() {
        let board = Board::from_layout(&[1, 2], &[20], Player::Player1);
        let moves = [exit(28), exit(29)];
        assert_eq!(select_move(Difficulty::Normal, &moves, &board), Some(exit(28)));
    }

    #[test]
    fn test_normal_scores() {
        let board = Board::from_layout(&[10, 24], &[12, 20], Player::Player1);
        assert_eq!(score_move(Difficulty::Normal, &mv(10, 12), &board), 12 + 25);
        assert_eq!(score_move(Difficulty::Easy, &mv(10, 12), &board), 12);
        assert_eq!(score_move(Difficulty::Normal, &mv(24, 26), &board), 26 + 15);
        assert_eq!(score_move(Difficulty::Normal, &mv(26, 28), &board), 28 + 15 + 10);
        assert_eq!(score_move(Difficulty::Normal, &mv(10, 11), &board), 11);
    }

    #[test]
    fn test_normal_prefers_capture() {
        // 10 -> 12 captures (37) while 24 -> 25 only advances (25)
        let board = Board::from_layout(&[10, 24], &[12, 20], Player::Player1);
        let moves = [mv(10, 12), mv(24, 25)];
        assert_eq!(select_move(Difficulty::Normal, &moves, &board), Some(mv(10, 12)));
        assert_eq!(select_move(Difficulty::Easy, &moves, &board), Some(mv(24, 25)));
    }

    #[test]
    fn test_best_move_uses_board() {
        let board = Board::new();
        let ai = ComputerPlayer::new(Difficulty::Easy);
        assert_eq!(ai.best_move(&board, 2), Some(mv(9, 11)));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("Easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!("normal".parse::<Difficulty>(), Ok(Difficulty::Normal));
        assert!("hard".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_play_game_finishes() {
        let mut board = Board::from_layout(&[30], &[29], Player::Player1);
        let mut sticks = ScriptedSticks::from_steps([1]);
        let record = ComputerPlayer::new(Difficulty::Normal).play_game(&mut board, &mut sticks, 10);
        assert_eq!(record.winner, Some(Player::Player1));
        assert_eq!(record.turns, 1);
    }
}
