//! Monthly sentiment trend.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

/// A dated comment polarity.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentRecord {
    /// Raw timestamp as delivered by the source.
    pub date: String,
    /// Comment polarity, typically in `[-1, 1]`.
    #[serde(default)]
    pub polarity: Option<f64>,
}

/// Parse a source timestamp.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// `YYYY-MM-DD` and `DD/MM/YYYY`. RFC 3339 values keep their local wall
/// clock time. Dates without a time resolve to midnight.
///
/// # Examples
/// ```
/// use igatp_index::parse_timestamp;
///
/// assert!(parse_timestamp("2024-01-05 10:30:00").is_some());
/// assert!(parse_timestamp("05/01/2024").is_some());
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(stamp.naive_local());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    /// Calendar year.
    pub year: i32,
    /// Month of the year, starting at 1.
    pub month: u32,
}

impl YearMonth {
    fn of(stamp: &NaiveDateTime) -> Self {
        Self {
            year: stamp.year(),
            month: stamp.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Mean polarity of one month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthBucket {
    /// The month covered by the bucket.
    pub month: YearMonth,
    /// Mean polarity of the month's records.
    pub mean_polarity: f64,
    /// Number of records in the month.
    pub count: usize,
}

/// Bucket sentiment records by calendar month.
///
/// Records with an unparseable timestamp or without a finite polarity are
/// dropped. Buckets are chronological and months without records are
/// omitted.
///
/// # Examples
/// ```
/// use igatp_index::{SentimentRecord, monthly_trend};
///
/// let record = |date: &str, polarity| SentimentRecord { date: date.into(), polarity: Some(polarity) };
/// let trend = monthly_trend(&[
///     record("2024-01-05", 0.2),
///     record("2024-01-20", 0.4),
///     record("2024-03-01", 0.6),
/// ]);
/// let months: Vec<_> = trend.iter().map(|b| b.month.to_string()).collect();
/// assert_eq!(months, ["2024-01", "2024-03"]);
/// assert!((trend[0].mean_polarity - 0.3).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "monthly means divide a float sum by a bounded record count"
)]
pub fn monthly_trend(records: &[SentimentRecord]) -> Vec<MonthBucket> {
    let mut months: BTreeMap<YearMonth, (f64, usize)> = BTreeMap::new();
    let mut dropped = 0_usize;
    for record in records {
        let polarity = record.polarity.filter(|value| value.is_finite());
        let (Some(stamp), Some(value)) = (parse_timestamp(&record.date), polarity) else {
            dropped += 1;
            continue;
        };
        let entry = months.entry(YearMonth::of(&stamp)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    if dropped > 0 {
        debug!("Dropped {dropped} sentiment records without a usable date or polarity");
    }

    months
        .into_iter()
        .map(|(month, (sum, count))| MonthBucket {
            month,
            mean_polarity: sum / count as f64,
            count,
        })
        .collect()
}
