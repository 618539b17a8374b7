//! Runtime settings resolved from CLI flags and environment

use crate::game::calendar::today_utc;
use crate::game::{FileStore, GameStore};
use crate::questions::{QuestionBank, QuestionError};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Link printed at the end of the share text
pub const DEFAULT_SHARE_URL: &str = "https://guesstimate.example";

const APP_DIR: &str = "guesstimate";
const STATE_FILE: &str = "state.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory on this platform; pass --state-file")]
    NoDataDir,
}

/// Where the question bank comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionSource {
    Embedded,
    File(PathBuf),
}

impl QuestionSource {
    /// Load and validate the bank
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or holds invalid questions.
    pub fn load(&self) -> Result<QuestionBank, QuestionError> {
        match self {
            Self::Embedded => QuestionBank::embedded(),
            Self::File(path) => QuestionBank::from_file(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub state_file: PathBuf,
    pub questions: QuestionSource,
    /// Day being played, UTC
    pub date: NaiveDate,
    pub share_url: String,
}

impl Settings {
    /// Fill in defaults for anything not given
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoDataDir`] when no state file was given and the
    /// platform has no data directory.
    pub fn resolve(
        state_file: Option<PathBuf>,
        questions: Option<PathBuf>,
        date: Option<NaiveDate>,
        share_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let state_file = match state_file {
            Some(path) => path,
            None => default_state_path().ok_or(ConfigError::NoDataDir)?,
        };

        Ok(Self {
            state_file,
            questions: questions.map_or(QuestionSource::Embedded, QuestionSource::File),
            date: date.unwrap_or_else(today_utc),
            share_url: share_url.unwrap_or_else(|| DEFAULT_SHARE_URL.to_string()),
        })
    }

    #[must_use]
    pub fn state_path(&self) -> &Path {
        &self.state_file
    }

    #[must_use]
    pub fn open_store(&self) -> GameStore<FileStore> {
        GameStore::new(FileStore::new(&self.state_file))
    }
}

/// `<data dir>/guesstimate/state.json`
#[must_use]
pub fn default_state_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join(STATE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::calendar::parse_date;

    #[test]
    fn explicit_values_win() {
        let date = parse_date("2026-10-18").unwrap();
        let settings = Settings::resolve(
            Some(PathBuf::from("/tmp/g.json")),
            Some(PathBuf::from("q.json")),
            Some(date),
            Some("https://x.test".to_string()),
        )
        .unwrap();

        assert_eq!(settings.state_path(), Path::new("/tmp/g.json"));
        assert_eq!(settings.questions, QuestionSource::File(PathBuf::from("q.json")));
        assert_eq!(settings.date, date);
        assert_eq!(settings.share_url, "https://x.test");
    }

    #[test]
    fn defaults_use_embedded_bank_and_today() {
        let settings =
            Settings::resolve(Some(PathBuf::from("s.json")), None, None, None).unwrap();
        assert_eq!(settings.questions, QuestionSource::Embedded);
        assert_eq!(settings.share_url, DEFAULT_SHARE_URL);
        // Allow for a UTC midnight between the two calls
        let today = today_utc();
        assert!(settings.date == today || settings.date.succ_opt() == Some(today));
    }

    #[test]
    fn default_state_path_ends_with_app_file() {
        if let Some(path) = default_state_path() {
            assert!(path.ends_with("guesstimate/state.json"));
        }
    }

    #[test]
    fn embedded_source_loads() {
        assert!(QuestionSource::Embedded.load().is_ok());
    }
}
