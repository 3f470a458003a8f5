use thiserror::Error;

use crate::models::PreferenceVector;

/// Number of quiz questions, in asked order:
/// playtime, weight, players, mechanic, year.
pub const TOTAL_QUESTIONS: usize = 5;

/// Where the reader currently is in the quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStage {
    Intro,
    Question(usize),
    Results,
}

/// A selected option: numeric buttons carry numbers, text buttons labels.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerValue {
    Number(f64),
    Choice(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("quiz is not currently showing a question")]
    NotAcceptingAnswers,

    #[error("question {question} expects a {expected} answer")]
    WrongAnswerKind {
        question: usize,
        expected: &'static str,
    },
}

/// Raw answers accumulated across the five questions.
///
/// `players` is asked but never scored; it does not survive the conversion
/// into a preference vector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizAnswers {
    pub playtime: Option<u32>,
    pub weight: Option<f64>,
    pub players: Option<u32>,
    pub mechanic: Option<String>,
    pub year: Option<i32>,
}

/// Quiz progression, independent of any UI toolkit.
///
/// Intro -> Question(0) .. Question(4) -> Results, advancing one question
/// per selected answer.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    stage: QuizStage,
    answers: QuizAnswers,
}

impl QuizFlow {
    pub fn new() -> Self {
        Self {
            stage: QuizStage::Intro,
            answers: QuizAnswers::default(),
        }
    }

    pub fn stage(&self) -> QuizStage {
        self.stage
    }

    pub fn answers(&self) -> &QuizAnswers {
        &self.answers
    }

    /// Leave the intro screen.
    pub fn start(&mut self) {
        if self.stage == QuizStage::Intro {
            self.stage = QuizStage::Question(0);
        }
    }

    /// Drop all answers and return to the intro.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Record the answer for the current question and advance, landing on
    /// `Results` after the final question.
    pub fn select_answer(&mut self, value: AnswerValue) -> Result<QuizStage, QuizError> {
        let QuizStage::Question(index) = self.stage else {
            return Err(QuizError::NotAcceptingAnswers);
        };

        self.record_answer(index, value)?;

        self.stage = if index + 1 < TOTAL_QUESTIONS {
            QuizStage::Question(index + 1)
        } else {
            QuizStage::Results
        };
        Ok(self.stage)
    }

    /// Fraction of the quiz completed, for a progress bar.
    pub fn progress(&self) -> f64 {
        match self.stage {
            QuizStage::Intro => 0.0,
            QuizStage::Question(index) => (index + 1) as f64 / TOTAL_QUESTIONS as f64,
            QuizStage::Results => 1.0,
        }
    }

    /// The accumulated answers as a scoring input; `players` is dropped.
    pub fn preferences(&self) -> PreferenceVector {
        PreferenceVector {
            playtime: self.answers.playtime,
            weight: self.answers.weight,
            mechanic: self.answers.mechanic.clone(),
            year: self.answers.year,
        }
    }

    fn record_answer(&mut self, index: usize, value: AnswerValue) -> Result<(), QuizError> {
        match (index, value) {
            (0, AnswerValue::Number(n)) => self.answers.playtime = Some(n.max(0.0) as u32),
            (1, AnswerValue::Number(n)) => self.answers.weight = Some(n),
            (2, AnswerValue::Number(n)) => self.answers.players = Some(n.max(0.0) as u32),
            (3, AnswerValue::Choice(m)) => self.answers.mechanic = Some(m),
            (4, AnswerValue::Number(n)) => self.answers.year = Some(n as i32),
            (question, _) => {
                let expected = if question == 3 { "text" } else { "numeric" };
                return Err(QuizError::WrongAnswerKind { question, expected });
            }
        }
        Ok(())
    }
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::new()
    }
}
