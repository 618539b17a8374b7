//! Question loading utilities
//!
//! Reads a JSON array of questions from a file or from the embedded bank.

use crate::core::Question;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("failed to read questions from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid question data")]
    Parse(#[from] serde_json::Error),
    #[error("question {id} has answer {answer}; answers must be positive")]
    InvalidAnswer { id: String, answer: f64 },
    #[error("question bank is empty")]
    Empty,
}

/// Parse questions from a JSON array
///
/// # Errors
///
/// Returns [`QuestionError::Parse`] if the text is not a valid question list.
///
/// # Examples
/// ```
/// use guesstimate::questions::loader::questions_from_json;
/// use guesstimate::questions::EMBEDDED_QUESTIONS;
///
/// let questions = questions_from_json(EMBEDDED_QUESTIONS).unwrap();
/// assert!(!questions.is_empty());
/// ```
pub fn questions_from_json(json: &str) -> Result<Vec<Question>, QuestionError> {
    Ok(serde_json::from_str(json)?)
}

/// Load questions from a JSON file
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not parse.
///
/// # Examples
/// ```no_run
/// use guesstimate::questions::loader::load_from_file;
///
/// let questions = load_from_file("data/questions.json").unwrap();
/// println!("Loaded {} questions", questions.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, QuestionError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| QuestionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    questions_from_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_minimal_question() {
        let json = r#"[{
            "id": "x", "date": "2026-01-01", "question": "Q?", "answer": 5,
            "unit": "u", "explanation": "e", "category": "SCALE",
            "difficulty": "hard", "questionNumber": 3
        }]"#;
        let questions = questions_from_json(json).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].question_number, 3);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            questions_from_json("[{\"id\": 1}]"),
            Err(QuestionError::Parse(_))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(super::super::EMBEDDED_QUESTIONS.as_bytes())
            .unwrap();

        let questions = load_from_file(file.path()).unwrap();
        assert_eq!(
            questions.len(),
            questions_from_json(super::super::EMBEDDED_QUESTIONS)
                .unwrap()
                .len()
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_from_file("/definitely/not/here.json"),
            Err(QuestionError::Io { .. })
        ));
    }
}
