// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BuilderTolerances, FittedLine, GameRecord, PreferenceVector, SamplingLimits, ScoredRecord,
    ScoringWeights, UserPosition, DEFAULT_PLAYTIME_MIN, DEFAULT_WEIGHT, DEFAULT_YEAR,
};
pub use requests::{BuilderRequest, QuizResultRequest};
pub use responses::{
    BuilderResponse, ComplexityTrendResponse, ErrorResponse, HealthResponse, MechanicYearCounts,
    MechanicsTrendResponse, QuizResultResponse,
};
