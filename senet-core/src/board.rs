//! Board state for the 30-house track

use serde::{Deserialize, Serialize};

use crate::sticks::Throw;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Number of houses on the track (1-based)
pub const HOUSE_COUNT: usize = 30;

/// Pieces owned by each player for the whole game
pub const PIECES_PER_PLAYER: u8 = 5;

pub const HOUSE_OF_REBIRTH: usize = 15;
pub const HOUSE_OF_HAPPINESS: usize = 26;
pub const HOUSE_OF_WATER: usize = 27;
pub const HOUSE_OF_THREE_TRUTHS: usize = 28;
pub const HOUSE_OF_RE_ATOUM: usize = 29;
pub const HOUSE_OF_HORUS: usize = 30;

/// Houses an opponent can never be captured on
pub const PROTECTED_HOUSES: [usize; 5] = [
    HOUSE_OF_REBIRTH,
    HOUSE_OF_HAPPINESS,
    HOUSE_OF_THREE_TRUTHS,
    HOUSE_OF_RE_ATOUM,
    HOUSE_OF_HORUS,
];

/// Every house with a fixed rule role
pub const SPECIAL_HOUSES: [usize; 6] = [
    HOUSE_OF_REBIRTH,
    HOUSE_OF_HAPPINESS,
    HOUSE_OF_WATER,
    HOUSE_OF_THREE_TRUTHS,
    HOUSE_OF_RE_ATOUM,
    HOUSE_OF_HORUS,
];

/// Shortest run of opponent pieces that cannot be jumped
pub const BARRIER_LENGTH: usize = 3;

// ============================================================================
// CORE TYPES
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1 = 0,
    Player2 = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Player1 => write!(f, "Player 1"),
            Player::Player2 => write!(f, "Player 2"),
        }
    }
}

/// Contents of a single house
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Returns true if `house` is a valid 1-based house index
pub fn is_valid_house(house: usize) -> bool {
    (1..=HOUSE_COUNT).contains(&house)
}

// ============================================================================
// BOARD
// ============================================================================

/// The game board; one per session, mutated only through its methods
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// Houses 1..=30 stored at indices 0..30
    pub(crate) cells: [Cell; HOUSE_COUNT],
    pub(crate) current_player: Player,
    pub(crate) pieces_off: [u8; 2],
    pub(crate) game_over: bool,
    pub(crate) winner: Option<Player>,
    /// Most recent throw, kept for display and replay only
    pub(crate) last_throw: Option<Throw>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Create a board in the opening layout
    pub fn new() -> Self {
        let mut board = Self {
            cells: [Cell::Empty; HOUSE_COUNT],
            current_player: Player::Player1,
            pieces_off: [0; 2],
            game_over: false,
            winner: None,
            last_throw: None,
        };
        board.reset();
        board
    }

    /// Create an empty board with the given occupied houses.
    ///
    /// Pieces missing from the track are counted as already off the board.
    /// Each side may list at most `PIECES_PER_PLAYER` houses.
    pub fn from_layout(player1: &[usize], player2: &[usize], to_move: Player) -> Self {
        let mut cells = [Cell::Empty; HOUSE_COUNT];
        for &house in player1.iter().filter(|h| is_valid_house(**h)) {
            cells[house - 1] = Cell::Occupied(Player::Player1);
        }
        for &house in player2.iter().filter(|h| is_valid_house(**h)) {
            cells[house - 1] = Cell::Occupied(Player::Player2);
        }

        let mut board = Self {
            cells,
            current_player: to_move,
            pieces_off: [0; 2],
            game_over: false,
            winner: None,
            last_throw: None,
        };
        for player in [Player::Player1, Player::Player2] {
            let on_track = board.pieces_on_track(player);
            debug_assert!(
                on_track <= PIECES_PER_PLAYER,
                "{} has {} pieces in layout",
                player,
                on_track
            );
            board.pieces_off[player.index()] = PIECES_PER_PLAYER.saturating_sub(on_track);
        }
        board.check_victory(Player::Player1);
        board.check_victory(Player::Player2);
        board
    }

    /// Restore the opening layout: Player1 on odd houses 1-9, Player2 on
    /// even houses 2-10
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; HOUSE_COUNT];
        for house in 1..=(2 * PIECES_PER_PLAYER as usize) {
            let owner = if house % 2 == 1 { Player::Player1 } else { Player::Player2 };
            self.cells[house - 1] = Cell::Occupied(owner);
        }
        self.current_player = Player::Player1;
        self.pieces_off = [0; 2];
        self.game_over = false;
        self.winner = None;
        self.last_throw = None;
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Contents of a house; out-of-range houses read as empty
    pub fn cell(&self, house: usize) -> Cell {
        if is_valid_house(house) {
            self.cells[house - 1]
        } else {
            Cell::Empty
        }
    }

    pub fn cells(&self) -> &[Cell; HOUSE_COUNT] {
        &self.cells
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn pieces_off(&self, player: Player) -> u8 {
        self.pieces_off[player.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn last_throw(&self) -> Option<Throw> {
        self.last_throw
    }

    /// Houses occupied by `player`, ascending
    pub fn houses_of(&self, player: Player) -> impl Iterator<Item = usize> + '_ {
        (1..=HOUSE_COUNT).filter(move |&h| self.is_owned_by(h, player))
    }

    pub fn pieces_on_track(&self, player: Player) -> u8 {
        self.houses_of(player).count() as u8
    }

    pub(crate) fn is_owned_by(&self, house: usize, player: Player) -> bool {
        self.cell(house) == Cell::Occupied(player)
    }

    pub(crate) fn is_occupied(&self, house: usize) -> bool {
        !self.cell(house).is_empty()
    }

    // ========================================================================
    // TURN CONTROL
    // ========================================================================

    /// Hand control to the other player; a finished game stays frozen
    pub fn switch_player(&mut self) {
        if !self.game_over {
            self.current_player = self.current_player.opponent();
        }
    }

    // ========================================================================
    // RULE HELPERS
    // ========================================================================

    /// Maximal runs of `BARRIER_LENGTH` or more contiguous pieces owned by
    /// `owner`, as inclusive `(first, last)` house pairs
    pub fn barriers(&self, owner: Player) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut run_start: Option<usize> = None;

        for house in 1..=HOUSE_COUNT + 1 {
            match (self.is_owned_by(house, owner), run_start) {
                (true, None) => run_start = Some(house),
                (false, Some(first)) => {
                    if house - first >= BARRIER_LENGTH {
                        runs.push((first, house - 1));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }

        runs
    }

    /// A piece is safe when an allied piece sits directly before or after it
    pub fn is_adjacency_protected(&self, house: usize) -> bool {
        let owner = match self.cell(house).owner() {
            Some(p) => p,
            None => return false,
        };
        (house > 1 && self.is_owned_by(house - 1, owner)) || self.is_owned_by(house + 1, owner)
    }

    /// Five pieces per side across the track and the exit pile
    pub fn pieces_accounted_for(&self) -> bool {
        [Player::Player1, Player::Player2]
            .iter()
            .all(|&p| self.pieces_on_track(p) + self.pieces_off(p) == PIECES_PER_PLAYER)
    }

    /// Declare `player` the winner once all their pieces are off
    pub(crate) fn check_victory(&mut self, player: Player) {
        if !self.game_over && self.pieces_off(player) >= PIECES_PER_PLAYER {
            self.game_over = true;
            self.winner = Some(player);
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_layout() {
        let board = Board::new();
        for house in 1..=10 {
            let expected = if house % 2 == 1 { Player::Player1 } else { Player::Player2 };
            assert_eq!(board.cell(house), Cell::Occupied(expected));
        }
        for house in 11..=30 {
            assert_eq!(board.cell(house), Cell::Empty);
        }
        assert_eq!(board.current_player(), Player::Player1);
        assert_eq!(board.pieces_off(Player::Player1), 0);
        assert_eq!(board.pieces_off(Player::Player2), 0);
        assert!(!board.is_game_over());
        assert!(board.winner().is_none());
        assert!(board.pieces_accounted_for());
    }

    #[test]
    fn test_reset_restores_opening() {
        let mut board = Board::from_layout(&[20], &[21, 22], Player::Player2);
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_out_of_range_cells_are_empty() {
        let board = Board::new();
        assert_eq!(board.cell(0), Cell::Empty);
        assert_eq!(board.cell(31), Cell::Empty);
    }

    #[test]
    fn test_from_layout_counts_missing_pieces_as_off() {
        let board = Board::from_layout(&[12, 14], &[20], Player::Player1);
        assert_eq!(board.pieces_off(Player::Player1), 3);
        assert_eq!(board.pieces_off(Player::Player2), 4);
        assert!(board.pieces_accounted_for());
        assert!(!board.is_game_over());
    }

    #[test]
    fn test_from_layout_with_empty_side_is_finished() {
        let board = Board::from_layout(&[], &[3], Player::Player2);
        assert!(board.is_game_over());
        assert_eq!(board.winner(), Some(Player::Player1));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "pieces in layout")]
    fn test_from_layout_rejects_sixth_piece() {
        Board::from_layout(&[1, 3, 5, 7, 9, 11], &[2], Player::Player1);
    }

    #[test]
    fn test_switch_player() {
        let mut board = Board::new();
        board.switch_player();
        assert_eq!(board.current_player(), Player::Player2);
        board.switch_player();
        assert_eq!(board.current_player(), Player::Player1);
    }

    #[test]
    fn test_barriers() {
        let board = Board::from_layout(&[1], &[4, 5, 6, 10, 11, 20, 21, 22, 23], Player::Player1);
        assert_eq!(board.barriers(Player::Player2), vec![(4, 6), (20, 23)]);
        assert!(board.barriers(Player::Player1).is_empty());
    }

    #[test]
    fn test_barrier_touching_last_house() {
        let board = Board::from_layout(&[28, 29, 30], &[1], Player::Player2);
        assert_eq!(board.barriers(Player::Player1), vec![(28, 30)]);
    }

    #[test]
    fn test_adjacency_protection() {
        let board = Board::from_layout(&[1, 2, 8], &[5], Player::Player2);
        assert!(board.is_adjacency_protected(1));
        assert!(board.is_adjacency_protected(2));
        assert!(!board.is_adjacency_protected(8));
        assert!(!board.is_adjacency_protected(5));
        assert!(!board.is_adjacency_protected(12));
    }
}
