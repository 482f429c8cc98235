//! Versioned board snapshots
//!
//! Version 1 payloads carried only the cells, the player to move and the
//! exit counts. Missing fields fall back to values derived from those, and
//! unknown fields from newer writers are ignored.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Cell, Player, HOUSE_COUNT, PIECES_PER_PLAYER};
use crate::sticks::Throw;

pub const SNAPSHOT_VERSION: u32 = 2;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("expected 30 cells, found {0}")]
    CellCount(usize),
    #[error("{player} has {on_track} pieces on the track and {off} off the board")]
    PieceCount { player: Player, on_track: u8, off: u8 },
    #[error("winner {0} does not have all pieces off the board")]
    Winner(Player),
    #[error("malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exit counts per player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PiecesOff {
    #[serde(default)]
    pub player1: u8,
    #[serde(default)]
    pub player2: u8,
}

/// Plain-data record of every board field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "legacy_version")]
    pub version: u32,
    /// Houses 1..=30 in order; `null` for an empty house
    pub cells: Vec<Option<Player>>,
    pub current_player: Player,
    #[serde(default)]
    pub pieces_off: PiecesOff,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Player>,
    #[serde(default)]
    pub last_roll: Option<u8>,
    #[serde(default)]
    pub last_extra_turn: bool,
}

fn legacy_version() -> u32 {
    1
}

impl Snapshot {
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
        Self::from_json(&content)
            .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
    }

    /// Write the snapshot as pretty JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json())
            .with_context(|| format!("Failed to write snapshot: {}", path.display()))
    }
}

impl Board {
    /// Capture every board field
    pub fn serialize(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            cells: self.cells.iter().map(|c| c.owner()).collect(),
            current_player: self.current_player,
            pieces_off: PiecesOff {
                player1: self.pieces_off(Player::Player1),
                player2: self.pieces_off(Player::Player2),
            },
            game_over: self.game_over,
            winner: self.winner,
            last_roll: self.last_throw.map(|t| t.steps),
            last_extra_turn: self.last_throw.map(|t| t.extra_turn).unwrap_or(false),
        }
    }

    /// Replace this board with the snapshot contents.
    ///
    /// The board is left untouched when the snapshot is rejected.
    pub fn load(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        *self = Board::from_snapshot(snapshot)?;
        Ok(())
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, SnapshotError> {
        if snapshot.cells.len() != HOUSE_COUNT {
            return Err(SnapshotError::CellCount(snapshot.cells.len()));
        }

        let mut cells = [Cell::Empty; HOUSE_COUNT];
        for (cell, owner) in cells.iter_mut().zip(&snapshot.cells) {
            if let Some(player) = owner {
                *cell = Cell::Occupied(*player);
            }
        }

        let mut board = Board {
            cells,
            current_player: snapshot.current_player,
            pieces_off: [snapshot.pieces_off.player1, snapshot.pieces_off.player2],
            game_over: false,
            winner: None,
            last_throw: snapshot
                .last_roll
                .filter(|steps| (1..=5).contains(steps))
                .map(|steps| Throw {
                    steps,
                    extra_turn: snapshot.last_extra_turn,
                }),
        };

        for player in [Player::Player1, Player::Player2] {
            let on_track = board.pieces_on_track(player);
            let off = board.pieces_off(player);
            if on_track.checked_add(off) != Some(PIECES_PER_PLAYER) {
                return Err(SnapshotError::PieceCount { player, on_track, off });
            }
        }

        if let Some(winner) = snapshot.winner {
            if board.pieces_off(winner) != PIECES_PER_PLAYER {
                return Err(SnapshotError::Winner(winner));
            }
        }

        // A stored winner takes precedence; otherwise derive from the counts
        match snapshot.winner {
            Some(winner) => {
                board.game_over = true;
                board.winner = Some(winner);
            }
            None => {
                board.check_victory(snapshot.current_player);
                board.check_victory(snapshot.current_player.opponent());
            }
        }

        Ok(board)
    }
}
