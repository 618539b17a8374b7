//! Persisted day state
//!
//! One compact JSON blob per player. Only raw guess values are stored;
//! feedback is recomputed on load so tier changes never invalidate a save.
//!
//! ```json
//! {"v":"4f1c09a2b7d3e8aa","d":"2026-10-18","g":[30000,31.7],"r":"w","sk":3,"sl":7,"gp":12,"ld":"2026-10-18"}
//! ```

use super::session::{GameResult, MAX_GUESSES};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result code as written to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultCode {
    #[serde(rename = "p")]
    Playing,
    #[serde(rename = "w")]
    Win,
    #[serde(rename = "l")]
    Loss,
}

impl From<GameResult> for ResultCode {
    fn from(result: GameResult) -> Self {
        match result {
            GameResult::Playing => Self::Playing,
            GameResult::Win => Self::Win,
            GameResult::Loss => Self::Loss,
        }
    }
}

impl From<ResultCode> for GameResult {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Playing => Self::Playing,
            ResultCode::Win => Self::Win,
            ResultCode::Loss => Self::Loss,
        }
    }
}

/// Everything that survives a restart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDayState {
    #[serde(rename = "v")]
    pub visitor_id: String,
    #[serde(rename = "d")]
    pub date: NaiveDate,
    #[serde(rename = "g")]
    pub guesses: Vec<f64>,
    #[serde(rename = "r")]
    pub result: ResultCode,
    #[serde(rename = "sk")]
    pub streak: u32,
    #[serde(rename = "sl")]
    pub longest_streak: u32,
    #[serde(rename = "gp")]
    pub games_played: u32,
    /// Date of the last finished game, `""` when none
    #[serde(rename = "ld", with = "empty_date")]
    pub last_played: Option<NaiveDate>,
    /// Indices into `guesses` that were countdown timeouts
    #[serde(rename = "to", default, skip_serializing_if = "Vec::is_empty")]
    pub timed_out: Vec<usize>,
}

impl GameDayState {
    /// Serialize to the persisted blob
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization itself fails.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse a persisted blob, rejecting anything that breaks the invariants
    ///
    /// Returns `None` for undecodable or inconsistent data; callers start a
    /// fresh game in that case.
    #[must_use]
    pub fn decode(blob: &str) -> Option<Self> {
        let state: Self = serde_json::from_str(blob).ok()?;
        state.is_consistent().then_some(state)
    }

    fn is_consistent(&self) -> bool {
        let count = self.guesses.len();
        let values_ok = self.guesses.iter().all(|g| g.is_finite() && *g >= 0.0);
        let timeouts_ok = self.timed_out.iter().all(|&i| i < count);
        let result_ok = match self.result {
            ResultCode::Playing => count < MAX_GUESSES,
            ResultCode::Win => (1..=MAX_GUESSES).contains(&count),
            ResultCode::Loss => count == MAX_GUESSES,
        };

        count <= MAX_GUESSES
            && values_ok
            && timeouts_ok
            && result_ok
            && self.longest_streak >= self.streak
    }
}

/// `Option<NaiveDate>` stored as an ISO date or empty string
mod empty_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)] // signature dictated by serde's `with`
    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => s.collect_str(&d.format("%Y-%m-%d")),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        let raw = String::deserialize(d)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
