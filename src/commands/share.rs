//! Rebuild today's share text from the saved guesses

use crate::core::Target;
use crate::game::{GameResult, Loaded, rebuild_guesses};
use crate::questions::QuestionProvider;
use crate::share::generate_share_text;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("no game saved for {0}")]
    NotPlayed(NaiveDate),
    #[error("today's game is still in progress")]
    InProgress,
    #[error("no question available for {0}")]
    NoQuestion(NaiveDate),
}

pub struct ShareResult {
    pub text: String,
    pub solved: bool,
}

/// Share text for the game saved for `today`
///
/// Response times are not persisted, so the average line only appears when
/// sharing straight from a live game.
///
/// # Errors
///
/// Returns an error if no finished game is saved for `today` or the provider
/// has no question for it.
pub fn share_saved(
    loaded: Loaded,
    provider: &impl QuestionProvider,
    today: NaiveDate,
    url: &str,
) -> Result<ShareResult, ShareError> {
    let state = match loaded {
        Loaded::Found(state) if state.date == today => state,
        _ => return Err(ShareError::NotPlayed(today)),
    };
    let result = GameResult::from(state.result);
    if !result.is_over() {
        return Err(ShareError::InProgress);
    }

    let question = provider
        .question_for(today)
        .ok_or(ShareError::NoQuestion(today))?;
    let target = Target::from(&*question);
    let guesses = rebuild_guesses(&state.guesses, &state.timed_out, &target);
    let solved = result == GameResult::Win;

    Ok(ShareResult {
        text: generate_share_text(
            target.question_number,
            &guesses,
            solved,
            target.answer,
            &target.unit,
            url,
        ),
        solved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::calendar::parse_date;
    use crate::game::{GameDayState, ResultCode};
    use crate::questions::QuestionBank;
    use pretty_assertions::assert_eq;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn saved(result: ResultCode, guesses: Vec<f64>) -> GameDayState {
        GameDayState {
            visitor_id: "v".to_string(),
            date: d("2026-10-18"),
            guesses,
            result,
            streak: 1,
            longest_streak: 1,
            games_played: 1,
            last_played: Some(d("2026-10-18")),
            timed_out: Vec::new(),
        }
    }

    #[test]
    fn shares_finished_game() {
        let bank = QuestionBank::embedded().unwrap();
        let question = bank.question_for(d("2026-10-18")).unwrap().into_owned();
        let state = saved(ResultCode::Win, vec![question.answer]);

        let shared = share_saved(Loaded::Found(state), &bank, d("2026-10-18"), "u").unwrap();
        assert!(shared.solved);
        assert_eq!(
            shared.text,
            format!(
                "🎯 Guesstimate #{}\n\n✅\n\nOff by 0 {} at first 🤯\nu",
                question.question_number, question.unit
            )
        );
    }

    #[test]
    fn refuses_unfinished_or_missing() {
        let bank = QuestionBank::embedded().unwrap();
        let today = d("2026-10-18");

        let playing = saved(ResultCode::Playing, vec![1.0]);
        assert!(matches!(
            share_saved(Loaded::Found(playing), &bank, today, "u"),
            Err(ShareError::InProgress)
        ));
        assert!(matches!(
            share_saved(Loaded::Missing, &bank, today, "u"),
            Err(ShareError::NotPlayed(_))
        ));

        let old = saved(ResultCode::Win, vec![1.0]);
        assert!(matches!(
            share_saved(Loaded::Found(old), &bank, d("2026-10-19"), "u"),
            Err(ShareError::NotPlayed(_))
        ));
    }
}
