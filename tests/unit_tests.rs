// Unit tests for Tabletop Algo

use tabletop_algo::core::{
    fit_line, match_score, percentile_rank, rank, sample_random, sample_stride, Engine,
    RegressionError,
};
use tabletop_algo::models::{GameRecord, PreferenceVector, ScoredRecord, ScoringWeights};

fn make_game(name: &str, weight: f64, rating: f64, playtime: u32, year: i32) -> GameRecord {
    GameRecord {
        name: name.to_string(),
        year: Some(year),
        weight: Some(weight),
        rating: Some(rating),
        playtime: Some(playtime),
        mechanics: vec!["Dice Rolling".to_string()],
    }
}

#[test]
fn test_fit_line_exact_fit() {
    let line = fit_line(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
    assert!((line.slope - 2.0).abs() < 1e-12);
    assert!(line.intercept.abs() < 1e-12);
}

#[test]
fn test_fit_line_endpoint_evaluation() {
    // The rendering layer evaluates the line at the weight domain bounds.
    let line = fit_line(&[1.0, 2.0, 3.0, 4.0, 5.0], &[5.5, 6.0, 6.5, 7.0, 7.5]).unwrap();
    assert!((line.y_at(1.0) - 5.5).abs() < 1e-9);
    assert!((line.y_at(5.0) - 7.5).abs() < 1e-9);
}

#[test]
fn test_fit_line_constant_x_fails_cleanly() {
    let result = fit_line(&[2.0, 2.0, 2.0, 2.0], &[1.0, 5.0, 3.0, 7.0]);
    assert_eq!(result, Err(RegressionError::DegenerateInput));
}

#[test]
fn test_stride_sampling_properties() {
    let games: Vec<GameRecord> = (0..500)
        .map(|i| make_game(&format!("g{i}"), 2.0, 7.0, 60, 2000 + (i % 20)))
        .collect();

    // Under the target: unchanged.
    assert_eq!(sample_stride(&games, 500).len(), 500);

    // Over the target: bounded and order preserving.
    let sampled = sample_stride(&games, 100);
    assert!(sampled.len() <= 100);
    let positions: Vec<usize> = sampled
        .iter()
        .map(|g| g.name[1..].parse::<usize>().unwrap())
        .collect();
    for pair in positions.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn test_random_sampling_properties() {
    let games: Vec<GameRecord> = (0..500)
        .map(|i| make_game(&format!("g{i}"), 2.0, 7.0, 60, 2000))
        .collect();

    assert_eq!(sample_random(&games, 600).len(), 500);
    assert_eq!(sample_random(&games, 50).len(), 50);
}

#[test]
fn test_match_score_is_pure() {
    let game = make_game("g", 3.2, 7.5, 45, 2012);
    let prefs = PreferenceVector {
        playtime: Some(90),
        weight: Some(4.0),
        mechanic: Some("Dice Rolling".to_string()),
        year: Some(2018),
    };
    let weights = ScoringWeights::default();

    let first = match_score(&game, &prefs, &weights);
    let second = match_score(&game, &prefs, &weights);
    assert_eq!(first, second);
}

#[test]
fn test_rank_stability_preserved_for_equal_scores() {
    let scored: Vec<ScoredRecord> = ["a", "b", "c", "d"]
        .iter()
        .map(|name| ScoredRecord {
            record: make_game(name, 2.0, 7.0, 60, 2015),
            match_score: 42.0,
        })
        .collect();

    let ranked = rank(scored);
    let names: Vec<&str> = ranked.iter().map(|s| s.record.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_percentile_rank_reference_values() {
    assert_eq!(percentile_rank(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0), 40.0);
    assert_eq!(percentile_rank(&[1.0, 2.0, 3.0], 10.0), 100.0);
    assert_eq!(percentile_rank(&[1.0, 2.0, 3.0], 0.0), 0.0);
}

#[test]
fn test_builder_scenario_six_in_tolerance() {
    // Six games within +-0.5 weight and +-30 minutes, two well outside.
    let mut records = vec![
        make_game("in1", 2.6, 6.0, 50, 2010),
        make_game("in2", 2.8, 6.5, 60, 2011),
        make_game("in3", 3.0, 7.0, 70, 2012),
        make_game("in4", 3.2, 7.5, 80, 2013),
        make_game("in5", 3.4, 8.0, 90, 2014),
        make_game("in6", 3.0, 7.0, 60, 2015),
    ];
    records.push(make_game("heavy", 4.5, 9.9, 60, 2016));
    records.push(make_game("marathon", 3.0, 9.9, 300, 2017));

    let prefs = PreferenceVector {
        playtime: Some(60),
        weight: Some(3.0),
        mechanic: Some("all".to_string()),
        year: None,
    };

    let engine = Engine::with_defaults();
    let outcome = engine.query_builder(&records, &prefs).unwrap();

    match outcome {
        tabletop_algo::core::BuilderOutcome::Prediction {
            average_rating,
            matched,
            ..
        } => {
            assert_eq!(matched, 6);
            let expected = (6.0 + 6.5 + 7.0 + 7.5 + 8.0 + 7.0) / 6.0;
            assert!((average_rating - expected).abs() < 1e-9);
        }
        other => panic!("expected a prediction, got {other:?}"),
    }
}

#[test]
fn test_builder_scenario_three_in_tolerance() {
    let records = vec![
        make_game("in1", 3.0, 7.0, 60, 2010),
        make_game("in2", 3.1, 7.2, 65, 2011),
        make_game("in3", 2.9, 6.8, 55, 2012),
        make_game("out", 4.8, 9.0, 400, 2013),
    ];

    let prefs = PreferenceVector {
        playtime: Some(60),
        weight: Some(3.0),
        mechanic: Some("all".to_string()),
        year: None,
    };

    let engine = Engine::with_defaults();
    let outcome = engine.query_builder(&records, &prefs).unwrap();

    assert_eq!(
        outcome,
        tabletop_algo::core::BuilderOutcome::InsufficientData { matched: 3 }
    );
}

#[test]
fn test_quiz_scenario_thousand_records() {
    // A spread of weights, ratings, playtimes, mechanics and years.
    let records: Vec<GameRecord> = (0..1000)
        .map(|i| {
            let mechanics = if i % 3 == 0 {
                vec!["Dice Rolling".to_string()]
            } else {
                vec!["Hand Management".to_string()]
            };
            GameRecord {
                name: format!("game{i}"),
                year: Some(1990 + (i % 35) as i32),
                weight: Some(1.0 + (i % 40) as f64 * 0.1),
                rating: Some(4.0 + (i % 60) as f64 * 0.1),
                playtime: Some(15 + (i % 20) as u32 * 15),
                mechanics,
            }
        })
        .collect();

    let prefs = PreferenceVector {
        playtime: Some(90),
        weight: Some(4.0),
        mechanic: Some("Dice Rolling".to_string()),
        year: Some(2018),
    };

    let engine = Engine::with_defaults();
    let summary = engine.query_quiz(&records, &prefs).unwrap();

    assert!(summary.top_similar.len() <= 100);
    assert!(summary.best_matches.len() <= 5);

    // Every best match outscores every record outside the similar set.
    let weights = ScoringWeights::default();
    let mut all_scores: Vec<f64> = records
        .iter()
        .map(|r| match_score(r, &prefs, &weights))
        .collect();
    all_scores.sort_by(f64::total_cmp);
    all_scores.reverse();
    let outside_max = all_scores[summary.top_similar.len()];

    for best in &summary.best_matches {
        assert!(best.match_score >= outside_max);
    }

    // The similar list itself is ranked descending.
    for pair in summary.top_similar.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
    }
}
