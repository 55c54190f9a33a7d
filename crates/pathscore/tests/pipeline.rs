//! End-to-end scoring of JSON forecasts.

use approx::assert_relative_eq;
use chrono::Duration;
use pathscore::combine::normalize;
use pathscore::eval::crps_ensemble;
use pathscore::Increment;
use pathscore::prelude::*;
use pathscore::traits::time::{format_timestamp, parse_timestamp};
use serde_json::{Value, json};

const START: &str = "2025-03-04T13:50:00+00:00";

fn path_json(start_minute: u32, prices: &[f64]) -> Value {
    let start = parse_timestamp(START).unwrap();
    let points: Vec<Value> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            let offset = Duration::minutes(i64::from(start_minute) + 5 * i as i64);
            json!({ "time": format_timestamp(&(start + offset)), "price": price })
        })
        .collect();
    Value::Array(points)
}

fn observed() -> Path {
    let prices = [100.0, 101.0, 100.5, 102.0, 101.5, 103.0, 102.0];
    Path::from_json_str(&path_json(0, &prices).to_string()).unwrap()
}

fn ensemble(rows: &[&[f64]]) -> Ensemble {
    let json = Value::Array(rows.iter().map(|r| path_json(0, r)).collect());
    Ensemble::from_json_str(&json.to_string()).unwrap()
}

fn short_intervals() -> EvaluatorConfig {
    EvaluatorConfig {
        time_increment: 300,
        intervals: ScoringIntervals::new(vec![
            ScoringInterval::new("5min", 300),
            ScoringInterval::new("30min", 1_800),
        ]),
    }
}

#[test]
fn test_report_json_shape() {
    let forecast = ensemble(&[
        &[100.0, 100.8, 100.7, 101.5, 101.9, 102.5, 102.3],
        &[100.0, 101.4, 100.1, 102.6, 101.0, 103.4, 101.6],
    ]);

    let evaluator = ForecastEvaluator::new(short_intervals());
    let report = evaluator.evaluate(&forecast, &observed()).unwrap();
    let value: Value = serde_json::from_str(&report.to_json_string().unwrap()).unwrap();

    let records = value["detailed_scores"].as_array().unwrap();
    // 6 five-minute steps + total, 1 thirty-minute step + total
    assert_eq!(records.len(), 6 + 1 + 1 + 1);
    assert_eq!(records[0]["Interval"], "5min");
    assert_eq!(records[0]["Increment"], 1);
    assert_eq!(records[6]["Increment"], "Total");
    assert_eq!(records[7]["Interval"], "30min");
    assert_eq!(records[8]["Increment"], "Total");

    let total = value["total_score"].as_f64().unwrap();
    let totals: f64 = records
        .iter()
        .filter(|r| r["Increment"] == "Total")
        .map(|r| r["CRPS"].as_f64().unwrap())
        .sum();
    assert_relative_eq!(total, totals, epsilon = 1e-12);

    let parsed: ScoreReport = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.scored_steps(), report.scored_steps());
    assert_eq!(parsed.detailed_scores[6].increment, Increment::Total);
}

#[test]
fn test_first_step_matches_direct_crps() {
    let forecast = ensemble(&[
        &[100.0, 100.8, 100.7, 101.5, 101.9, 102.5, 102.3],
        &[100.0, 101.4, 100.1, 102.6, 101.0, 103.4, 101.6],
        &[100.0, 99.5, 100.0, 100.5, 101.0, 101.5, 102.0],
    ]);

    let report = ForecastEvaluator::new(short_intervals())
        .evaluate(&forecast, &observed())
        .unwrap();

    let expected = crps_ensemble(&[0.8, 1.4, -0.5], 1.0);
    assert_relative_eq!(report.detailed_scores[0].crps, expected, epsilon = 1e-9);
}

#[test]
fn test_gap_in_observed_path_is_skipped() {
    let mut points = observed().points().to_vec();
    points.remove(3);
    let real = Path::new(points);

    let forecast = ensemble(&[&[100.0, 101.0, 100.5, 555.0, 101.5, 103.0, 102.0]]);
    let report = ForecastEvaluator::new(short_intervals())
        .evaluate(&forecast, &real)
        .unwrap();

    // The outlier sits on the missing timestamp and never gets scored
    assert_eq!(report.total_score, 0.0);
    assert_eq!(report.interval_total("5min"), Some(0.0));
    assert_eq!(report.scored_steps(), 5);
}

#[test]
fn test_batch_scoring_and_weights() {
    let real = observed();
    let tight = ensemble(&[
        &[100.0, 101.1, 100.4, 102.1, 101.4, 103.1, 101.9],
        &[100.0, 100.9, 100.6, 101.9, 101.6, 102.9, 102.1],
    ]);
    let wide = ensemble(&[
        &[100.0, 95.0, 104.0, 97.0, 108.0, 96.0, 110.0],
        &[100.0, 106.0, 97.0, 107.0, 94.0, 109.0, 93.0],
    ]);
    let disjoint = {
        let rows: Vec<Value> = (0..2)
            .map(|_| path_json(24 * 60, &[100.0, 101.0, 102.0]))
            .collect();
        Ensemble::from_json_str(&Value::Array(rows).to_string()).unwrap()
    };
    let ragged = ensemble(&[&[100.0, 101.0, 102.0], &[100.0, 101.0]]);

    let forecasts = vec![
        ("tight", tight),
        ("disjoint", disjoint),
        ("wide", wide),
        ("ragged", ragged),
    ];

    let evaluator = ForecastEvaluator::new(short_intervals());
    let mut sink: Vec<(String, ScoreReport)> = Vec::new();
    let scores = evaluator
        .score_all_into(&forecasts, &real, &mut sink)
        .unwrap();

    let names: Vec<_> = scores.entries().iter().map(|e| e.forecaster.as_str()).collect();
    assert_eq!(names, vec!["tight", "disjoint", "wide", "ragged"]);

    let crps = scores.scores();
    assert!(crps[0].unwrap() < crps[2].unwrap());
    assert_eq!(crps[1], None);
    assert_eq!(crps[3], None);
    assert_eq!(scores.to_sentinel_scores()[1], -1.0);

    // The disjoint forecast still produces an (empty) report; the ragged one fails
    let recorded: Vec<_> = sink.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(recorded, vec!["tight", "disjoint", "wide"]);
    assert_eq!(sink[1].1.scored_steps(), 0);

    let weights = SoftmaxWeighter::default().weight_forecasters(&scores).unwrap();
    assert_eq!(weights[1].weight, 0.0);
    assert_eq!(weights[3].weight, 0.0);
    assert!(weights[0].weight > weights[2].weight);
    let sum: f64 = weights.iter().map(|w| w.weight).sum();
    assert_relative_eq!(sum, 1.0, epsilon = 1e-12);

    let from_sentinels = normalize(&scores.to_sentinel_scores()).unwrap();
    for (w, s) in weights.iter().zip(from_sentinels) {
        assert_relative_eq!(w.weight, s, epsilon = 1e-12);
    }
}

#[test]
fn test_score_vector_json_round_trip() {
    let scores = ScoreVector::new(vec![
        ForecasterScore::scored("gbm", 12.5),
        ForecasterScore::unscored("garch"),
    ]);

    let value = serde_json::to_value(&scores).unwrap();
    assert_eq!(
        value,
        json!([
            { "forecaster": "gbm", "crps": 12.5 },
            { "forecaster": "garch", "crps": null },
        ])
    );
}

#[test]
fn test_producer_pipeline() {
    struct ReplayProducer {
        rows: Vec<Vec<f64>>,
    }

    impl EnsembleProducer for ReplayProducer {
        fn name(&self) -> &str {
            "replay"
        }

        fn produce(&self, request: &SimulationRequest) -> Result<Ensemble> {
            Ensemble::from_price_matrix(&self.rows, request.start_time, request.time_increment)
        }
    }

    let real = observed();
    let producer = ReplayProducer {
        rows: vec![real.prices(), real.prices()],
    };
    let request = SimulationRequest {
        current_price: 100.0,
        time_increment: 300,
        time_length: 1_800,
        num_simulations: 2,
        start_time: parse_timestamp(START).unwrap(),
    };

    let report = ForecastEvaluator::new(short_intervals())
        .evaluate_producer(&producer, &request, &real)
        .unwrap();
    assert_eq!(report.score(), Some(0.0));
}
