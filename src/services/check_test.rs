use super::*;

use crate::services::session;
use crate::state::test_helpers::test_app_state;

#[tokio::test]
async fn run_check_records_a_hit() {
    let state = test_app_state();
    let record = run_check(&state, "sess-aaaa", Coordinates::new(-1.0, 1.0, 2.0))
        .await
        .unwrap();

    assert!(record.is_in_area);
    assert!((record.x - -1.0).abs() < f64::EPSILON);
    assert!(record.elapsed_ms >= 0.0);

    let results = session::results_newest_first(&state, "sess-aaaa").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0], record);
}

#[tokio::test]
async fn run_check_records_a_miss() {
    let state = test_app_state();
    let record = run_check(&state, "sess-aaaa", Coordinates::new(1.0, 1.0, 1.0))
        .await
        .unwrap();
    assert!(!record.is_in_area);
}

#[tokio::test]
async fn verdict_agrees_with_the_shared_predicate() {
    let state = test_app_state();
    for (x, y, r) in [(0.0, 0.0, 1.0), (-3.0, 3.0, 3.0), (1.0, 1.0, 2.0), (0.0, 2.5, 5.0)] {
        let record = run_check(&state, "sess-aaaa", Coordinates::new(x, y, r))
            .await
            .unwrap();
        assert_eq!(record.is_in_area, is_in_area(x, y, r), "({x}, {y}, {r})");
    }
}

#[tokio::test]
async fn invalid_coordinates_record_nothing() {
    let state = test_app_state();
    let err = run_check(&state, "sess-aaaa", Coordinates::new(1.5, 0.0, 2.0))
        .await
        .unwrap_err();
    assert!(matches!(err, CheckError::Validation(_)));
    assert!(session::results_newest_first(&state, "sess-aaaa").await.is_empty());
}

#[tokio::test]
async fn history_is_newest_first() {
    let state = test_app_state();
    run_check(&state, "sess-aaaa", Coordinates::new(0.0, 0.0, 1.0)).await.unwrap();
    run_check(&state, "sess-aaaa", Coordinates::new(1.0, 1.0, 1.0)).await.unwrap();

    let results = session::results_newest_first(&state, "sess-aaaa").await;
    assert!((results[0].x - 1.0).abs() < f64::EPSILON);
    assert!((results[1].x).abs() < f64::EPSILON);
}

#[test]
fn timestamp_format_is_stable() {
    let ts = OffsetDateTime::from_unix_timestamp(1_754_480_096).unwrap();
    let formatted = format_timestamp(ts).unwrap();
    assert_eq!(formatted.len(), 19);
    assert_eq!(formatted, "2025-08-06 11:34:56");
}
