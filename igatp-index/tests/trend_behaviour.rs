//! Behavioural tests for the monthly sentiment trend.

use std::cell::RefCell;

use igatp_index::{MonthBucket, SentimentRecord, monthly_trend};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

fn record(date: &str, polarity: Option<f64>) -> SentimentRecord {
    SentimentRecord {
        date: date.to_owned(),
        polarity,
    }
}

#[fixture]
fn records() -> RefCell<Vec<SentimentRecord>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn trend() -> RefCell<Vec<MonthBucket>> {
    RefCell::new(Vec::new())
}

#[given("sentiment records from January and March 2024")]
fn given_records(#[from(records)] records: &RefCell<Vec<SentimentRecord>>) {
    *records.borrow_mut() = vec![
        record("2024-01-05", Some(0.2)),
        record("2024-01-20", Some(0.4)),
        record("2024-03-01", Some(0.6)),
    ];
}

#[given("sentiment records with unparseable dates and missing polarity")]
fn given_unusable_records(#[from(records)] records: &RefCell<Vec<SentimentRecord>>) {
    *records.borrow_mut() = vec![
        record("sometime in spring", Some(0.2)),
        record("2024-01-20", None),
        record("2024-02-30", Some(0.5)),
    ];
}

#[when("I compute the monthly trend")]
fn when_trend(
    #[from(records)] records: &RefCell<Vec<SentimentRecord>>,
    #[from(trend)] trend: &RefCell<Vec<MonthBucket>>,
) {
    *trend.borrow_mut() = monthly_trend(&records.borrow());
}

#[then("the trend has a January bucket with mean 0.3 and a March bucket with mean 0.6")]
#[expect(
    clippy::float_arithmetic,
    reason = "assertions compare floating-point means"
)]
fn then_two_buckets(#[from(trend)] trend: &RefCell<Vec<MonthBucket>>) {
    let trend = trend.borrow();
    let summary: Vec<(String, usize)> = trend
        .iter()
        .map(|bucket| (bucket.month.to_string(), bucket.count))
        .collect();
    assert_eq!(
        summary,
        [("2024-01".to_owned(), 2), ("2024-03".to_owned(), 1)]
    );
    let means: Vec<f64> = trend.iter().map(|bucket| bucket.mean_polarity).collect();
    assert!((means[0] - 0.3).abs() < 1e-9, "January mean was {}", means[0]);
    assert!((means[1] - 0.6).abs() < 1e-9, "March mean was {}", means[1]);
}

#[then("the trend is empty")]
fn then_empty(#[from(trend)] trend: &RefCell<Vec<MonthBucket>>) {
    assert!(trend.borrow().is_empty());
}

#[scenario(path = "tests/features/trend.feature", index = 0)]
fn scenario_monthly_buckets(
    records: RefCell<Vec<SentimentRecord>>,
    trend: RefCell<Vec<MonthBucket>>,
) {
    let _ = (records, trend);
}

#[scenario(path = "tests/features/trend.feature", index = 1)]
fn scenario_unusable_records(
    records: RefCell<Vec<SentimentRecord>>,
    trend: RefCell<Vec<MonthBucket>>,
) {
    let _ = (records, trend);
}
