use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use serde_json::Value;

use super::ALL_PLACES;
use crate::error::AppError;
use crate::store::Record;

/// Running mean
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Mean {
    pub(crate) sum: f64,
    pub(crate) count: usize,
}

impl Mean {
    pub(crate) fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// 0 for an empty set
    pub(crate) fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SummaryQuery {
    pub(crate) place: u32,
    /// Month filter for the weekday breakdown, index 0 = January
    pub(crate) months: [bool; 12],
    /// Evolution window in days, counted back from now
    pub(crate) days: u32,
}

impl SummaryQuery {
    /// `months` holds 1-based month numbers; empty means all months
    pub(crate) fn new(place: u32, months: &[u32], days: u32) -> Result<Self, AppError> {
        let mut selected = [months.is_empty(); 12];
        for &m in months {
            if !(1..=12).contains(&m) {
                return Err(AppError::InvalidMonth {
                    input: m.to_string(),
                });
            }
            selected[(m - 1) as usize] = true;
        }
        Ok(SummaryQuery {
            place,
            months: selected,
            days,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DayAverage {
    pub(crate) date: NaiveDate,
    pub(crate) mean: Mean,
}

#[derive(Debug, Clone)]
pub(crate) struct OccupancySummary {
    pub(crate) place: u32,
    pub(crate) total: Mean,
    /// Monday first
    pub(crate) weekday: [Mean; 7],
    /// January first
    pub(crate) month: [Mean; 12],
    /// Ascending by date
    pub(crate) evolution: Vec<DayAverage>,
    pub(crate) days: u32,
    pub(crate) skipped_records: usize,
}

struct Sample {
    at: DateTime<FixedOffset>,
    ratio: f64,
}

fn number(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str()?.trim().parse().ok())
}

fn row_ratio(row: &Value, place: u32) -> Option<f64> {
    let venue = number(row.get("IdRecinto")?)?;
    if place != ALL_PLACES && venue != f64::from(place) {
        return None;
    }
    let occupied = number(row.get("Ocupacion")?)?;
    let capacity = number(row.get("Aforo")?)?;
    if capacity <= 0.0 {
        return None;
    }
    Some(occupied / capacity)
}

/// Flatten the history into dated ratios; returns the samples and the
/// number of records that could not be used at all.
fn collect_samples(history: &[Record], place: u32) -> (Vec<Sample>, usize) {
    let mut samples = Vec::new();
    let mut skipped = 0;

    for record in history {
        let (Ok(at), Some(rows)) = (
            DateTime::parse_from_rfc3339(&record.timestamp),
            record.data.as_array(),
        ) else {
            skipped += 1;
            continue;
        };
        samples.extend(
            rows.iter()
                .filter_map(|row| row_ratio(row, place))
                .map(|ratio| Sample { at, ratio }),
        );
    }

    (samples, skipped)
}

pub(crate) fn summarize(
    history: &[Record],
    query: &SummaryQuery,
    now: DateTime<Utc>,
) -> OccupancySummary {
    let (samples, skipped_records) = collect_samples(history, query.place);
    // A window reaching past the representable range covers everything
    let cutoff = Duration::try_days(i64::from(query.days))
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);

    let mut total = Mean::default();
    let mut weekday = [Mean::default(); 7];
    let mut month = [Mean::default(); 12];
    let mut days: BTreeMap<NaiveDate, Mean> = BTreeMap::new();

    for sample in &samples {
        total.add(sample.ratio);

        let month_idx = sample.at.month0() as usize;
        month[month_idx].add(sample.ratio);
        if query.months[month_idx] {
            weekday[sample.at.weekday().num_days_from_monday() as usize].add(sample.ratio);
        }

        if sample.at >= cutoff {
            days.entry(sample.at.date_naive())
                .or_default()
                .add(sample.ratio);
        }
    }

    OccupancySummary {
        place: query.place,
        total,
        weekday,
        month,
        evolution: days
            .into_iter()
            .map(|(date, mean)| DayAverage { date, mean })
            .collect(),
        days: query.days,
        skipped_records,
    }
}
