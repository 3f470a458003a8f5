use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::PreferenceVector;

/// Request body for the builder prediction endpoint
///
/// The three builder controls: a weight slider, a playtime slider and a
/// mechanic select whose "show everything" option submits "all".
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BuilderRequest {
    #[validate(range(min = 1.0, max = 5.0))]
    pub weight: f64,
    #[validate(range(min = 5, max = 600))]
    pub playtime: u32,
    #[serde(default = "default_mechanic")]
    pub mechanic: String,
}

fn default_mechanic() -> String {
    "all".to_string()
}

impl BuilderRequest {
    pub fn into_preferences(self) -> PreferenceVector {
        PreferenceVector {
            playtime: Some(self.playtime),
            weight: Some(self.weight),
            mechanic: Some(self.mechanic),
            year: None,
        }
    }
}

/// Request body for the quiz result endpoint: the five quiz answers.
///
/// Every answer is optional; skipped questions fall back to the engine's
/// query-time defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuizResultRequest {
    #[validate(range(min = 5, max = 600))]
    #[serde(default)]
    pub playtime: Option<u32>,
    #[validate(range(min = 1.0, max = 5.0))]
    #[serde(default)]
    pub weight: Option<f64>,
    #[validate(range(min = 1, max = 12))]
    #[serde(default)]
    pub players: Option<u32>,
    #[serde(default)]
    pub mechanic: Option<String>,
    #[validate(range(min = 1900, max = 2030))]
    #[serde(default)]
    pub year: Option<i32>,
}

impl QuizResultRequest {
    /// The scoring inputs; `players` is collected but not scored.
    pub fn into_preferences(self) -> PreferenceVector {
        PreferenceVector {
            playtime: self.playtime,
            weight: self.weight,
            mechanic: self.mechanic,
            year: self.year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_request_validation() {
        let ok = BuilderRequest {
            weight: 3.0,
            playtime: 60,
            mechanic: "all".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = BuilderRequest {
            weight: 7.5,
            playtime: 60,
            mechanic: "all".to_string(),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_quiz_request_drops_players_from_preferences() {
        let request = QuizResultRequest {
            playtime: Some(90),
            weight: Some(4.0),
            players: Some(4),
            mechanic: Some("Dice Rolling".to_string()),
            year: Some(2018),
        };
        assert!(request.validate().is_ok());

        let prefs = request.into_preferences();
        assert_eq!(prefs.playtime, Some(90));
        assert_eq!(prefs.weight, Some(4.0));
        assert_eq!(prefs.mechanic.as_deref(), Some("Dice Rolling"));
        assert_eq!(prefs.year, Some(2018));
    }

    #[test]
    fn test_quiz_request_allows_skipped_answers() {
        let request: QuizResultRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.into_preferences(), PreferenceVector::default());
    }
}
