//! Senet Core - Game engine and AI
//!
//! This crate provides the core game logic for Senet:
//! - Board state on the 30-house track
//! - Stick throws with pluggable randomness
//! - Move legality, captures and house-specific rules
//! - Legal move generation and turn flow
//! - Heuristic computer opponent
//! - Versioned snapshots for persistence

pub mod board;
pub mod sticks;
pub mod rules;
pub mod ai;
pub mod game;
pub mod snapshot;

// Re-exports for convenient access
pub use board::{Board, Cell, Player, HOUSE_COUNT, PIECES_PER_PLAYER};
pub use sticks::{RngSticks, ScriptedSticks, StickSource, Throw};
pub use rules::{LegalMove, MoveInfo, MoveRejectReason};
pub use ai::{select_move, ComputerPlayer, Difficulty};
pub use game::{play_game, play_turn, GameRecord, TurnReport};
pub use snapshot::{Snapshot, SnapshotError, SNAPSHOT_VERSION};
