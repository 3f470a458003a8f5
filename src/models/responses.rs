use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::engine::{BuilderOutcome, ComplexityTrend, MechanicTrendPoint, QuizSummary};
use crate::models::domain::{FittedLine, GameRecord, ScoredRecord, UserPosition};

/// Response for the builder prediction endpoint
///
/// `averageRating` is null and `insufficientData` true when too few games
/// fall inside the tolerances; the front end shows "not enough data".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderResponse {
    #[serde(rename = "averageRating")]
    pub average_rating: Option<f64>,
    #[serde(rename = "insufficientData")]
    pub insufficient_data: bool,
    pub matched: usize,
    #[serde(rename = "topMatches")]
    pub top_matches: Vec<GameRecord>,
}

impl From<BuilderOutcome> for BuilderResponse {
    fn from(outcome: BuilderOutcome) -> Self {
        match outcome {
            BuilderOutcome::InsufficientData { matched } => Self {
                average_rating: None,
                insufficient_data: true,
                matched,
                top_matches: vec![],
            },
            BuilderOutcome::Prediction {
                average_rating,
                matched,
                top_matches,
            } => Self {
                average_rating: Some(average_rating),
                insufficient_data: false,
                matched,
                top_matches,
            },
        }
    }
}

/// Response for the quiz result endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResultResponse {
    pub background: Vec<GameRecord>,
    #[serde(rename = "topSimilar")]
    pub top_similar: Vec<ScoredRecord>,
    #[serde(rename = "bestMatches")]
    pub best_matches: Vec<ScoredRecord>,
    #[serde(rename = "userPosition")]
    pub user_position: UserPosition,
    #[serde(rename = "weightPercentile")]
    pub weight_percentile: f64,
    #[serde(rename = "matchPercentile")]
    pub match_percentile: f64,
}

impl From<QuizSummary> for QuizResultResponse {
    fn from(summary: QuizSummary) -> Self {
        Self {
            background: summary.background,
            top_similar: summary.top_similar,
            best_matches: summary.best_matches,
            user_position: summary.user_position,
            weight_percentile: summary.weight_percentile,
            match_percentile: summary.match_percentile,
        }
    }
}

/// Response for the complexity trend endpoint; `line` is null when the fit
/// is degenerate, and the scatter is still served.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityTrendResponse {
    pub line: Option<FittedLine>,
    pub points: Vec<GameRecord>,
}

impl From<ComplexityTrend> for ComplexityTrendResponse {
    fn from(trend: ComplexityTrend) -> Self {
        Self {
            line: trend.line,
            points: trend.points,
        }
    }
}

/// One year of the mechanics evolution series
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanicYearCounts {
    pub year: i32,
    #[serde(rename = "totalGames")]
    pub total_games: usize,
    pub counts: BTreeMap<String, usize>,
}

impl From<MechanicTrendPoint> for MechanicYearCounts {
    fn from(point: MechanicTrendPoint) -> Self {
        Self {
            year: point.year,
            total_games: point.total_games,
            counts: point.counts,
        }
    }
}

/// Response for the mechanics evolution endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MechanicsTrendResponse {
    pub mechanics: Vec<String>,
    pub series: Vec<MechanicYearCounts>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub games: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
