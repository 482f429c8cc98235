//! Session configuration
//!
//! Loaded from an optional JSON file; every field has a default and
//! command-line flags override what the file sets.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use senet_core::{ComputerPlayer, Difficulty, Player};

/// Who controls a seat
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    Human,
    Easy,
    Normal,
}

impl Seat {
    /// Computer player for this seat, `None` for a human
    pub fn computer(self) -> Option<ComputerPlayer> {
        match self {
            Seat::Human => None,
            Seat::Easy => Some(ComputerPlayer::new(Difficulty::Easy)),
            Seat::Normal => Some(ComputerPlayer::new(Difficulty::Normal)),
        }
    }
}

impl FromStr for Seat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Seat::Human),
            other => other.parse::<Difficulty>().map(|d| match d {
                Difficulty::Easy => Seat::Easy,
                Difficulty::Normal => Seat::Normal,
            }),
        }
    }
}

/// Settings shared by every subcommand
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub player1: Seat,
    pub player2: Seat,
    /// Random seed for reproducibility (None = entropy)
    pub seed: Option<u64>,
    /// Pause before a computer move, for readability
    pub ai_delay_ms: u64,
    /// Throws after which a game is abandoned
    pub max_turns: usize,
    /// Games per match
    pub games: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            player1: Seat::Human,
            player2: Seat::Normal,
            seed: None,
            ai_delay_ms: 600,
            max_turns: 2000,
            games: 20,
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    pub fn with_seats(mut self, player1: Option<Seat>, player2: Option<Seat>) -> Self {
        if let Some(seat) = player1 {
            self.player1 = seat;
        }
        if let Some(seat) = player2 {
            self.player2 = seat;
        }
        self
    }

    pub fn seat(&self, player: Player) -> Seat {
        match player {
            Player::Player1 => self.player1,
            Player::Player2 => self.player2,
        }
    }

    /// Create RNG from seed or entropy
    pub fn create_rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
