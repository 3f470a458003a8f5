use crate::models::{
    GameRecord, PreferenceVector, ScoringWeights, DEFAULT_PLAYTIME_MIN, DEFAULT_WEIGHT,
    DEFAULT_YEAR,
};

/// Largest plausible complexity gap on the ~[1,5] weight scale.
const WEIGHT_SPREAD: f64 = 4.0;
/// Playtime gap (minutes) beyond which the playtime term bottoms out.
const PLAYTIME_SPREAD_MIN: f64 = 180.0;
/// Year gap beyond which the year term bottoms out.
const YEAR_SPREAD: f64 = 30.0;

/// Weighted similarity between one game and the user's preferences.
///
/// Sum of four terms, higher is better:
/// - weight closeness, `(1 − diff/4) × w`. Not clamped: the term goes
///   negative once the gap exceeds the spread, which keeps rank order intact
///   and is intentional.
/// - playtime closeness, `(1 − min(diff/180, 1)) × w`, clamped to [0, w]
/// - flat bonus when the preferred mechanic is present
/// - year closeness, `(1 − min(diff/30, 1)) × w`, clamped to [0, w]
///
/// Missing record fields fall back to 60 minutes / 2015 / weight 2.5 at
/// query time. Pure and deterministic.
pub fn match_score(
    record: &GameRecord,
    prefs: &PreferenceVector,
    weights: &ScoringWeights,
) -> f64 {
    let mut score = 0.0;

    let weight_diff = (record.weight.unwrap_or(DEFAULT_WEIGHT) - prefs.weight_or_default()).abs();
    score += (1.0 - weight_diff / WEIGHT_SPREAD) * weights.weight;

    let time_diff = (f64::from(record.playtime_or(DEFAULT_PLAYTIME_MIN))
        - f64::from(prefs.playtime_or_default()))
    .abs();
    score += (1.0 - (time_diff / PLAYTIME_SPREAD_MIN).min(1.0)) * weights.playtime;

    if let Some(mechanic) = prefs.mechanic_preference() {
        if record.has_mechanic(mechanic) {
            score += weights.mechanic;
        }
    }

    let year_diff = f64::from((record.year_or(DEFAULT_YEAR) - prefs.year_or_default()).abs());
    score += (1.0 - (year_diff / YEAR_SPREAD).min(1.0)) * weights.year;

    score
}
