use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::{
    percentile::percentile_rank,
    ranking::{rank, top},
    regression::fit_line,
    sampling::{sample_random, sample_stride},
    scoring::match_score,
};
use crate::models::{
    BuilderTolerances, FittedLine, GameRecord, PreferenceVector, SamplingLimits, ScoredRecord,
    ScoringWeights, UserPosition,
};

/// Errors from the query façade
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid preference vector: {0}")]
    InvalidPreference(String),

    #[error("record set has no entries with usable weight and rating")]
    EmptyRecordSet,
}

/// How many games the builder panel lists.
const BUILDER_TOP_MATCHES: usize = 3;
/// How many games the quiz results page lists per tier.
const TOP_SIMILAR: usize = 100;
const BEST_MATCHES: usize = 5;
/// Rating plotted for the reader when no best match carries a rating.
const FALLBACK_POSITION_RATING: f64 = 7.0;

/// Builder lookup outcome.
///
/// Too few in-tolerance games is a normal displayed state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderOutcome {
    InsufficientData {
        matched: usize,
    },
    Prediction {
        average_rating: f64,
        matched: usize,
        top_matches: Vec<GameRecord>,
    },
}

/// Everything the results page renders after the final quiz answer.
#[derive(Debug, Clone)]
pub struct QuizSummary {
    pub background: Vec<GameRecord>,
    pub top_similar: Vec<ScoredRecord>,
    pub best_matches: Vec<ScoredRecord>,
    pub user_position: UserPosition,
    pub weight_percentile: f64,
    pub match_percentile: f64,
}

/// Fitted complexity/rating line plus the scatter points behind it.
///
/// `line` is `None` when the fit is degenerate (constant weights) or the
/// eligible set is too small; the scatter is still served.
#[derive(Debug, Clone)]
pub struct ComplexityTrend {
    pub line: Option<FittedLine>,
    pub points: Vec<GameRecord>,
}

/// Counts of tracked mechanics among the games of one year.
#[derive(Debug, Clone, PartialEq)]
pub struct MechanicTrendPoint {
    pub year: i32,
    pub total_games: usize,
    pub counts: BTreeMap<String, usize>,
}

/// Query façade composing the samplers, scorer, ranker, estimator and
/// percentile calculator into the article's interactive lookups.
///
/// Holds no data: every method takes the record store and a preference
/// vector as explicit parameters, and each call allocates only transient
/// state, so logically-concurrent queries never interfere.
#[derive(Debug, Clone)]
pub struct Engine {
    weights: ScoringWeights,
    tolerances: BuilderTolerances,
    limits: SamplingLimits,
}

impl Engine {
    pub fn new(
        weights: ScoringWeights,
        tolerances: BuilderTolerances,
        limits: SamplingLimits,
    ) -> Self {
        Self {
            weights,
            tolerances,
            limits,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            ScoringWeights::default(),
            BuilderTolerances::default(),
            SamplingLimits::default(),
        )
    }

    /// Builder lookup: a binary tolerance filter followed by a plain rating
    /// sort. No weighted scoring here.
    ///
    /// Records missing weight or playtime never satisfy the filter. Fewer
    /// than `min_matches` survivors (or none with a rating) reports
    /// insufficient data instead of a misleading average.
    pub fn query_builder(
        &self,
        records: &[GameRecord],
        prefs: &PreferenceVector,
    ) -> Result<BuilderOutcome, EngineError> {
        validate_preferences(prefs)?;

        let target_weight = prefs.weight_or_default();
        let target_playtime = f64::from(prefs.playtime_or_default());
        let playtime_tolerance = f64::from(self.tolerances.playtime_min);
        let mechanic = prefs.mechanic_preference();

        let mut matches: Vec<&GameRecord> = records
            .iter()
            .filter(|record| {
                let weight_ok = record
                    .weight
                    .is_some_and(|w| (w - target_weight).abs() <= self.tolerances.weight);
                let time_ok = record
                    .playtime
                    .is_some_and(|t| (f64::from(t) - target_playtime).abs() <= playtime_tolerance);
                let mechanic_ok = mechanic.is_none_or(|m| record.has_mechanic(m));
                weight_ok && time_ok && mechanic_ok
            })
            .collect();

        let matched = matches.len();
        if matched < self.tolerances.min_matches {
            return Ok(BuilderOutcome::InsufficientData { matched });
        }

        let ratings: Vec<f64> = matches.iter().filter_map(|r| r.rating).collect();
        if ratings.is_empty() {
            return Ok(BuilderOutcome::InsufficientData { matched });
        }
        let average_rating = ratings.iter().sum::<f64>() / ratings.len() as f64;

        matches.sort_by(|a, b| {
            b.rating
                .unwrap_or(f64::NEG_INFINITY)
                .total_cmp(&a.rating.unwrap_or(f64::NEG_INFINITY))
        });
        let top_matches = matches
            .into_iter()
            .take(BUILDER_TOP_MATCHES)
            .cloned()
            .collect();

        Ok(BuilderOutcome::Prediction {
            average_rating,
            matched,
            top_matches,
        })
    }

    /// Quiz result: a random background sample for display, a scoring pass
    /// over EVERY stat-eligible record (never the sample), one stable
    /// ranking, and both percentiles.
    pub fn query_quiz(
        &self,
        records: &[GameRecord],
        prefs: &PreferenceVector,
    ) -> Result<QuizSummary, EngineError> {
        validate_preferences(prefs)?;

        let eligible: Vec<&GameRecord> =
            records.iter().filter(|r| r.stat_eligible()).collect();
        if eligible.is_empty() {
            return Err(EngineError::EmptyRecordSet);
        }

        let background: Vec<GameRecord> =
            sample_random(&eligible, self.limits.background_max_points)
                .into_iter()
                .cloned()
                .collect();

        let scored: Vec<ScoredRecord> = eligible
            .iter()
            .map(|record| ScoredRecord {
                record: (*record).clone(),
                match_score: match_score(record, prefs, &self.weights),
            })
            .collect();
        let ranked = rank(scored);

        let top_similar = top(&ranked, TOP_SIMILAR).to_vec();
        let best_matches = top(&ranked, BEST_MATCHES).to_vec();

        let best_ratings: Vec<f64> =
            best_matches.iter().filter_map(|s| s.record.rating).collect();
        let position_rating = if best_ratings.is_empty() {
            FALLBACK_POSITION_RATING
        } else {
            best_ratings.iter().sum::<f64>() / best_ratings.len() as f64
        };

        let weight_distribution: Vec<f64> =
            eligible.iter().filter_map(|r| r.weight).collect();
        let score_distribution: Vec<f64> =
            ranked.iter().map(|s| s.match_score).collect();
        let best_score = ranked.first().map_or(0.0, |s| s.match_score);

        Ok(QuizSummary {
            background,
            top_similar,
            best_matches,
            user_position: UserPosition {
                x: prefs.weight_or_default(),
                y: position_rating,
            },
            weight_percentile: percentile_rank(&weight_distribution, prefs.weight_or_default()),
            match_percentile: percentile_rank(&score_distribution, best_score),
        })
    }

    /// OLS of rating over weight across every stat-eligible record, plus a
    /// stride-sampled scatter for display. The fit always sees the full
    /// eligible set, never the sample.
    pub fn complexity_trend(&self, records: &[GameRecord]) -> ComplexityTrend {
        let eligible: Vec<&GameRecord> =
            records.iter().filter(|r| r.stat_eligible()).collect();

        let xs: Vec<f64> = eligible.iter().filter_map(|r| r.weight).collect();
        let ys: Vec<f64> = eligible.iter().filter_map(|r| r.rating).collect();

        let line = match fit_line(&xs, &ys) {
            Ok(line) => Some(line),
            Err(e) => {
                tracing::warn!("Complexity trend unavailable: {}", e);
                None
            }
        };

        let points = sample_stride(&eligible, self.limits.scatter_max_points)
            .into_iter()
            .cloned()
            .collect();

        ComplexityTrend { line, points }
    }

    /// Per-year counts of the tracked mechanics, ascending by year.
    /// Records without a year are skipped.
    pub fn mechanics_by_year(
        &self,
        records: &[GameRecord],
        tracked: &[String],
    ) -> Vec<MechanicTrendPoint> {
        let mut by_year: BTreeMap<i32, MechanicTrendPoint> = BTreeMap::new();

        for record in records {
            let Some(year) = record.year else { continue };
            let point = by_year.entry(year).or_insert_with(|| MechanicTrendPoint {
                year,
                total_games: 0,
                counts: tracked.iter().map(|m| (m.clone(), 0)).collect(),
            });
            point.total_games += 1;
            for mechanic in tracked {
                if record.has_mechanic(mechanic) {
                    if let Some(count) = point.counts.get_mut(mechanic) {
                        *count += 1;
                    }
                }
            }
        }

        by_year.into_values().collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Reject malformed vectors before they reach the scorer.
fn validate_preferences(prefs: &PreferenceVector) -> Result<(), EngineError> {
    if let Some(weight) = prefs.weight {
        if !weight.is_finite() {
            return Err(EngineError::InvalidPreference(
                "weight must be a finite number".to_string(),
            ));
        }
        if !(0.0..=5.0).contains(&weight) {
            return Err(EngineError::InvalidPreference(format!(
                "weight {weight} is outside the 0-5 complexity scale"
            )));
        }
    }
    if let Some(year) = prefs.year {
        if !(1800..=2100).contains(&year) {
            return Err(EngineError::InvalidPreference(format!(
                "year {year} is implausible"
            )));
        }
    }
    Ok(())
}
