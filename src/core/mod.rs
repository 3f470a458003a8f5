// Core algorithm exports
pub mod engine;
pub mod percentile;
pub mod quiz;
pub mod ranking;
pub mod regression;
pub mod sampling;
pub mod scoring;

pub use engine::{
    BuilderOutcome, ComplexityTrend, Engine, EngineError, MechanicTrendPoint, QuizSummary,
};
pub use percentile::percentile_rank;
pub use quiz::{AnswerValue, QuizAnswers, QuizError, QuizFlow, QuizStage, TOTAL_QUESTIONS};
pub use ranking::{rank, top};
pub use regression::{fit_line, RegressionError};
pub use sampling::{sample_random, sample_stride};
pub use scoring::match_score;
