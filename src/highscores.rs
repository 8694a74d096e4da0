//! Best survival times of the current process
//!
//! Plain serde data; saving it between launches is up to the platform layer.

use serde::{Deserialize, Serialize};

/// Runs kept on the board
pub const MAX_HIGH_SCORES: usize = 10;

/// One finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Seconds survived
    pub survival_time: f32,
    /// Shape cap reached when the run ended
    pub max_shapes: u32,
    /// 1-based run number within the session
    pub run: u32,
}

/// Longest runs first; ties keep the earlier run ahead
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a finished run. Returns its 1-based place, or `None` when it
    /// fell off the bottom of the board.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if !(entry.survival_time > 0.0) {
            return None;
        }
        let at = self
            .entries
            .partition_point(|e| e.survival_time >= entry.survival_time);
        if at >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(at, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(at + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest survival time on the board
    pub fn top_score(&self) -> Option<f32> {
        self.entries.first().map(|e| e.survival_time)
    }
}
