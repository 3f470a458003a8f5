use serde::{Deserialize, Serialize};

/// Query-time fallback applied when a record or preference has no weight.
pub const DEFAULT_WEIGHT: f64 = 2.5;
/// Query-time fallback applied when a record or preference has no playtime.
pub const DEFAULT_PLAYTIME_MIN: u32 = 60;
/// Query-time fallback applied when a record or preference has no year.
pub const DEFAULT_YEAR: i32 = 2015;

/// One board game from the processed dataset
///
/// Absent numeric fields are `None`; the dataset loader converts the source
/// file's sentinels (zero year, zero weight) into explicit absences before a
/// record reaches the engine. Fallback defaults are applied at query time
/// only and never written back into the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub playtime: Option<u32>,
    #[serde(default)]
    pub mechanics: Vec<String>,
}

impl GameRecord {
    /// Whether the record can appear on the weight/rating plane.
    pub fn stat_eligible(&self) -> bool {
        self.weight.is_some_and(|w| w.is_finite() && w > 0.0)
            && self.rating.is_some_and(f64::is_finite)
    }

    pub fn playtime_or(&self, fallback: u32) -> u32 {
        self.playtime.unwrap_or(fallback)
    }

    pub fn year_or(&self, fallback: i32) -> i32 {
        self.year.unwrap_or(fallback)
    }

    pub fn has_mechanic(&self, mechanic: &str) -> bool {
        self.mechanics.iter().any(|m| m == mechanic)
    }
}

/// User-supplied target values for one query
///
/// Built fresh per interaction (builder sliders or quiz answers) and
/// discarded when the query completes. `None` means "no preference".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceVector {
    #[serde(default)]
    pub playtime: Option<u32>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub mechanic: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
}

impl PreferenceVector {
    pub fn weight_or_default(&self) -> f64 {
        self.weight.unwrap_or(DEFAULT_WEIGHT)
    }

    pub fn playtime_or_default(&self) -> u32 {
        self.playtime.unwrap_or(DEFAULT_PLAYTIME_MIN)
    }

    pub fn year_or_default(&self) -> i32 {
        self.year.unwrap_or(DEFAULT_YEAR)
    }

    /// The mechanic preference with the "no preference" spellings folded
    /// away. The builder select submits "all"; the quiz submits nothing.
    pub fn mechanic_preference(&self) -> Option<&str> {
        match self.mechanic.as_deref() {
            None | Some("all") | Some("any") | Some("") => None,
            Some(m) => Some(m),
        }
    }
}

/// A game paired with its computed match score
///
/// Created by the scorer, ordered by the ranker, then handed to the
/// rendering layer and discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: GameRecord,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
}

/// Slope and intercept of a least-squares fit
///
/// Recomputed on every call; the store is immutable for the session and the
/// fit is linear, so nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedLine {
    pub slope: f64,
    pub intercept: f64,
}

impl FittedLine {
    /// Evaluate the line at `x`; consumers call this at the domain
    /// boundaries (weight 1 and 5) to get the trend segment endpoints.
    pub fn y_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Where the reader lands on the weight/rating plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserPosition {
    pub x: f64,
    pub y: f64,
}

/// Scoring weights for the four similarity terms
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub weight: f64,
    pub playtime: f64,
    pub mechanic: f64,
    pub year: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight: 40.0,
            playtime: 20.0,
            mechanic: 25.0,
            year: 15.0,
        }
    }
}

/// Tolerances for the builder's binary filter
#[derive(Debug, Clone, Copy)]
pub struct BuilderTolerances {
    pub weight: f64,
    pub playtime_min: u32,
    pub min_matches: usize,
}

impl Default for BuilderTolerances {
    fn default() -> Self {
        Self {
            weight: 0.5,
            playtime_min: 30,
            min_matches: 5,
        }
    }
}

/// Display budgets for the two down-sampling call sites
#[derive(Debug, Clone, Copy)]
pub struct SamplingLimits {
    pub scatter_max_points: usize,
    pub background_max_points: usize,
}

impl Default for SamplingLimits {
    fn default() -> Self {
        Self {
            scatter_max_points: 15_000,
            background_max_points: 2_000,
        }
    }
}
