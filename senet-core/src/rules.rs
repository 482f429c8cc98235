//! Move legality, application and generation
//!
//! `can_move` walks an ordered cascade of guards; the first guard that
//! fails names the rejection. Later guards rely on the earlier ones having
//! excluded their states, so the order must not change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{
    is_valid_house, Board, Cell, Player, HOUSE_COUNT, HOUSE_OF_HAPPINESS, HOUSE_OF_HORUS,
    HOUSE_OF_REBIRTH, HOUSE_OF_RE_ATOUM, HOUSE_OF_THREE_TRUTHS, HOUSE_OF_WATER,
    PROTECTED_HOUSES,
};

// ============================================================================
// TYPES
// ============================================================================

/// Why a move was refused
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveRejectReason {
    #[error("the game is already over")]
    GameOver,
    #[error("no steps to move")]
    NoSteps,
    #[error("start house is off the track")]
    InvalidStart,
    #[error("there is no piece of yours on that house")]
    NotYourPiece,
    #[error("the piece must wait in the water until the House of Rebirth is free")]
    WaterWait,
    #[error("a barrier of three opposing pieces blocks the way")]
    BlockedByBarrier,
    #[error("a piece on house 28 needs exactly 3 to leave")]
    #[serde(rename = "need_three_from_28")]
    NeedThreeFrom28,
    #[error("a piece on house 29 needs exactly 2 to leave")]
    #[serde(rename = "need_two_from_29")]
    NeedTwoFrom29,
    #[error("a piece on house 30 needs exactly 1 to leave")]
    #[serde(rename = "need_one_from_30")]
    NeedOneFrom30,
    #[error("pieces must stop on the House of Happiness before going further")]
    #[serde(rename = "cannot_jump_over_26")]
    CannotJumpOver26,
    #[error("a piece cannot leave the board directly from the House of Happiness")]
    #[serde(rename = "cannot_exit_from_26")]
    CannotExitFrom26,
    #[error("a piece cannot leave the board from here")]
    CannotExitFromHere,
    #[error("the House of Water is already taken")]
    WaterBlocked,
    #[error("destination house is off the track")]
    InvalidDest,
    #[error("the opposing piece stands on a protected house")]
    ProtectedHouse,
    #[error("your own piece already occupies that house")]
    OwnPieceBlock,
    #[error("the opposing piece is protected by its neighbour")]
    ProtectedPiece,
}

impl MoveRejectReason {
    pub const ALL: [MoveRejectReason; 17] = [
        Self::GameOver,
        Self::NoSteps,
        Self::InvalidStart,
        Self::NotYourPiece,
        Self::WaterWait,
        Self::BlockedByBarrier,
        Self::NeedThreeFrom28,
        Self::NeedTwoFrom29,
        Self::NeedOneFrom30,
        Self::CannotJumpOver26,
        Self::CannotExitFrom26,
        Self::CannotExitFromHere,
        Self::WaterBlocked,
        Self::InvalidDest,
        Self::ProtectedHouse,
        Self::OwnPieceBlock,
        Self::ProtectedPiece,
    ];

    /// Stable machine-readable code
    pub fn code(self) -> &'static str {
        match self {
            Self::GameOver => "game_over",
            Self::NoSteps => "no_steps",
            Self::InvalidStart => "invalid_start",
            Self::NotYourPiece => "not_your_piece",
            Self::WaterWait => "water_wait",
            Self::BlockedByBarrier => "blocked_by_barrier",
            Self::NeedThreeFrom28 => "need_three_from_28",
            Self::NeedTwoFrom29 => "need_two_from_29",
            Self::NeedOneFrom30 => "need_one_from_30",
            Self::CannotJumpOver26 => "cannot_jump_over_26",
            Self::CannotExitFrom26 => "cannot_exit_from_26",
            Self::CannotExitFromHere => "cannot_exit_from_here",
            Self::WaterBlocked => "water_blocked",
            Self::InvalidDest => "invalid_dest",
            Self::ProtectedHouse => "protected_house",
            Self::OwnPieceBlock => "own_piece_block",
            Self::ProtectedPiece => "protected_piece",
        }
    }
}

/// Effect of a legal move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInfo {
    pub start: usize,
    /// Final house, `None` when the piece leaves the board
    pub dest: Option<usize>,
    pub offboard: bool,
    pub captures: bool,
    pub captured: Option<usize>,
}

impl MoveInfo {
    fn exit(start: usize) -> Self {
        Self {
            start,
            dest: None,
            offboard: true,
            captures: false,
            captured: None,
        }
    }

    fn to_house(start: usize, dest: usize, captures: bool) -> Self {
        Self {
            start,
            dest: Some(dest),
            offboard: false,
            captures,
            captured: captures.then_some(dest),
        }
    }
}

/// Entry of the legal move list
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegalMove {
    pub from: usize,
    pub to: Option<usize>,
    pub offboard: bool,
}

impl From<MoveInfo> for LegalMove {
    fn from(info: MoveInfo) -> Self {
        Self {
            from: info.start,
            to: info.dest,
            offboard: info.offboard,
        }
    }
}

// ============================================================================
// LEGALITY
// ============================================================================

impl Board {
    /// Check whether `player` may move the piece on `start` by `steps`
    pub fn can_move(
        &self,
        start: usize,
        steps: u32,
        player: Player,
    ) -> Result<MoveInfo, MoveRejectReason> {
        if self.game_over {
            return Err(MoveRejectReason::GameOver);
        }
        if steps == 0 {
            return Err(MoveRejectReason::NoSteps);
        }
        if !is_valid_house(start) {
            return Err(MoveRejectReason::InvalidStart);
        }
        if !self.is_owned_by(start, player) {
            return Err(MoveRejectReason::NotYourPiece);
        }

        let rebirth_occupied = self.is_occupied(HOUSE_OF_REBIRTH);
        if start == HOUSE_OF_WATER && rebirth_occupied {
            return Err(MoveRejectReason::WaterWait);
        }

        let raw_dest = start + steps as usize;

        // Barriers block regardless of where the move would finally land
        let jumps_barrier = self
            .barriers(player.opponent())
            .into_iter()
            .any(|(first, last)| start < first && raw_dest > last);
        if jumps_barrier {
            return Err(MoveRejectReason::BlockedByBarrier);
        }

        match (start, steps) {
            (HOUSE_OF_THREE_TRUTHS, 3) | (HOUSE_OF_RE_ATOUM, 2) | (HOUSE_OF_HORUS, 1) => {
                return Ok(MoveInfo::exit(start));
            }
            (HOUSE_OF_THREE_TRUTHS, _) => return Err(MoveRejectReason::NeedThreeFrom28),
            (HOUSE_OF_RE_ATOUM, _) => return Err(MoveRejectReason::NeedTwoFrom29),
            (HOUSE_OF_HORUS, _) => return Err(MoveRejectReason::NeedOneFrom30),
            _ => {}
        }

        if start < HOUSE_OF_HAPPINESS && raw_dest > HOUSE_OF_HAPPINESS && raw_dest != HOUSE_OF_WATER {
            return Err(MoveRejectReason::CannotJumpOver26);
        }
        if start == HOUSE_OF_HAPPINESS && raw_dest > HOUSE_COUNT {
            return Err(MoveRejectReason::CannotExitFrom26);
        }
        if raw_dest > HOUSE_COUNT {
            return Err(MoveRejectReason::CannotExitFromHere);
        }

        let dest = if raw_dest == HOUSE_OF_WATER {
            if rebirth_occupied {
                if self.is_occupied(HOUSE_OF_WATER) {
                    return Err(MoveRejectReason::WaterBlocked);
                }
                HOUSE_OF_WATER
            } else {
                HOUSE_OF_REBIRTH
            }
        } else {
            raw_dest
        };

        if !is_valid_house(dest) {
            return Err(MoveRejectReason::InvalidDest);
        }

        let captures = match self.cell(dest) {
            Cell::Empty => false,
            Cell::Occupied(owner) if owner == player => {
                return Err(MoveRejectReason::OwnPieceBlock);
            }
            Cell::Occupied(_) => {
                if PROTECTED_HOUSES.contains(&dest) {
                    return Err(MoveRejectReason::ProtectedHouse);
                }
                if self.is_adjacency_protected(dest) {
                    return Err(MoveRejectReason::ProtectedPiece);
                }
                true
            }
        };

        Ok(MoveInfo::to_house(start, dest, captures))
    }

    // ========================================================================
    // APPLICATION
    // ========================================================================

    /// Move the current player's piece on `start` by `steps` if legal
    pub fn move_piece(&mut self, start: usize, steps: u32) -> Result<MoveInfo, MoveRejectReason> {
        let mover = self.current_player;
        let info = self.can_move(start, steps, mover)?;
        self.apply(mover, info);
        Ok(info)
    }

    fn apply(&mut self, mover: Player, info: MoveInfo) {
        self.set(info.start, Cell::Empty);

        match info.dest {
            None => {
                self.pieces_off[mover.index()] += 1;
            }
            Some(dest) => {
                // A captured piece swaps back to the capturer's start house
                if info.captures {
                    self.set(info.start, Cell::Occupied(mover.opponent()));
                }
                self.set(dest, Cell::Occupied(mover));
            }
        }

        self.resolve_water();
        self.check_victory(mover);

        debug_assert!(self.pieces_accounted_for(), "piece count drift after {:?}", info);
    }

    /// A piece in the water is reborn as soon as the House of Rebirth frees up
    fn resolve_water(&mut self) {
        if self.is_occupied(HOUSE_OF_WATER) && !self.is_occupied(HOUSE_OF_REBIRTH) {
            let piece = self.cell(HOUSE_OF_WATER);
            self.set(HOUSE_OF_WATER, Cell::Empty);
            self.set(HOUSE_OF_REBIRTH, piece);
        }
    }

    fn set(&mut self, house: usize, cell: Cell) {
        self.cells[house - 1] = cell;
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    /// Every legal move for the current player with `steps`, by ascending
    /// start house
    pub fn legal_moves(&self, steps: u32) -> Vec<LegalMove> {
        let player = self.current_player;
        self.houses_of(player)
            .filter_map(|house| self.can_move(house, steps, player).ok())
            .map(LegalMove::from)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
