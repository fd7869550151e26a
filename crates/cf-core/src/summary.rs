//! Summary aggregation over a date window.
//!
//! # Algorithm Summary
//!
//! 1. Ignore records whose date falls outside `[from, to]`
//! 2. Sum emissions overall and per category, rounding after summation
//! 3. Walk every calendar day from `from` to `to`, emitting the day's sum
//!    (zero when nothing was logged) so the series has no gaps

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::activity::Activity;
use crate::emission::round2;

/// Days before `to` covered by the default window (30 days inclusive).
const DEFAULT_WINDOW_DAYS: i64 = 29;

/// An inclusive date range `[from, to]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SummaryWindow {
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// The 30 days ending at (and including) `today`.
    pub fn trailing_30_days(today: NaiveDate) -> Self {
        Self::resolve(None, None, today)
    }

    /// Fills in missing bounds: `from` defaults to `today - 29 days`, `to` to `today`.
    pub fn resolve(from: Option<NaiveDate>, to: Option<NaiveDate>, today: NaiveDate) -> Self {
        Self {
            from: from.unwrap_or(today - Duration::days(DEFAULT_WINDOW_DAYS)),
            to: to.unwrap_or(today),
        }
    }

    /// Whether `date` lies inside the window. Always false when `from > to`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Every calendar day in the window, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.from.iter_days().take_while(move |day| *day <= self.to)
    }
}

/// Emissions for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub kg: f64,
}

/// Aggregate emissions over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub total_kg: f64,
    pub by_category: BTreeMap<String, f64>,
    pub by_day: Vec<DailyPoint>,
}

/// A record the aggregator can sum.
///
/// Lets aggregation work with stored [`Activity`] values or lightweight
/// test fixtures.
pub trait AggregatableActivity {
    fn category(&self) -> &str;

    /// Calendar day of the activity, already stripped of any time of day.
    fn date(&self) -> NaiveDate;

    fn emission_kg(&self) -> f64;
}

impl AggregatableActivity for Activity {
    fn category(&self) -> &str {
        &self.category
    }

    fn date(&self) -> NaiveDate {
        self.date
    }

    fn emission_kg(&self) -> f64 {
        self.emission_kg
    }
}

/// Summarizes `records` over `window`.
///
/// Record order does not matter. Totals and category buckets are rounded to
/// 2 decimals after summation; each daily point is rounded the same way.
pub fn summarize<A: AggregatableActivity>(records: &[A], window: SummaryWindow) -> Summary {
    let mut total = 0.0;
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_day: HashMap<NaiveDate, f64> = HashMap::new();

    for record in records.iter().filter(|r| window.contains(r.date())) {
        let kg = record.emission_kg();
        total += kg;
        *by_category.entry(record.category().to_string()).or_default() += kg;
        *by_day.entry(record.date()).or_default() += kg;
    }

    for value in by_category.values_mut() {
        *value = round2(*value);
    }

    let points: Vec<DailyPoint> = window
        .days()
        .map(|date| DailyPoint {
            date,
            kg: round2(by_day.get(&date).copied().unwrap_or_default()),
        })
        .collect();

    tracing::debug!(
        from = %window.from,
        to = %window.to,
        records = records.len(),
        days = points.len(),
        "summarized activities"
    );

    Summary {
        from: window.from,
        to: window.to,
        total_kg: round2(total),
        by_category,
        by_day: points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    struct Fixture {
        category: &'static str,
        date: NaiveDate,
        kg: f64,
    }

    impl AggregatableActivity for Fixture {
        fn category(&self) -> &str {
            self.category
        }

        fn date(&self) -> NaiveDate {
            self.date
        }

        fn emission_kg(&self) -> f64 {
            self.kg
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    fn fixture(category: &'static str, d: u32, kg: f64) -> Fixture {
        Fixture {
            category,
            date: day(d),
            kg,
        }
    }

    #[test]
    fn empty_records_yield_zero_filled_days() {
        let summary = summarize::<Fixture>(&[], SummaryWindow::new(day(1), day(3)));

        assert_eq!(summary.total_kg, 0.0);
        assert!(summary.by_category.is_empty());
        assert_eq!(
            summary.by_day,
            vec![
                DailyPoint { date: day(1), kg: 0.0 },
                DailyPoint { date: day(2), kg: 0.0 },
                DailyPoint { date: day(3), kg: 0.0 },
            ]
        );
    }

    #[test]
    fn inverted_window_is_empty() {
        let records = [fixture("food", 2, 3.0)];
        let summary = summarize(&records, SummaryWindow::new(day(3), day(1)));

        assert!(summary.by_day.is_empty());
        assert_eq!(summary.total_kg, 0.0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn single_day_window_includes_both_bounds() {
        let records = [fixture("food", 5, 2.0), fixture("food", 5, 7.0)];
        let summary = summarize(&records, SummaryWindow::new(day(5), day(5)));

        assert_eq!(summary.total_kg, 9.0);
        assert_eq!(summary.by_day, vec![DailyPoint { date: day(5), kg: 9.0 }]);
    }

    #[test]
    fn records_outside_window_are_ignored() {
        let records = [
            fixture("transport", 1, 10.0),
            fixture("transport", 2, 3.84),
            fixture("energy", 4, 70.0),
        ];
        let summary = summarize(&records, SummaryWindow::new(day(2), day(3)));

        assert_eq!(summary.total_kg, 3.84);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category["transport"], 3.84);
    }

    #[test]
    fn unordered_input_gives_same_result() {
        let ordered = [
            fixture("transport", 1, 3.84),
            fixture("food", 2, 3.0),
            fixture("transport", 3, 1.05),
        ];
        let shuffled = [
            fixture("transport", 3, 1.05),
            fixture("transport", 1, 3.84),
            fixture("food", 2, 3.0),
        ];
        let window = SummaryWindow::new(day(1), day(3));

        assert_eq!(summarize(&ordered, window), summarize(&shuffled, window));
    }

    #[test]
    fn totals_agree_within_rounding() {
        let records = [
            fixture("transport", 1, 3.84),
            fixture("transport", 1, 0.01),
            fixture("energy", 2, 0.7),
            fixture("food", 2, 7.0),
            fixture("shopping", 3, 0.75),
            fixture("other", 3, 1.23),
        ];
        let summary = summarize(&records, SummaryWindow::new(day(1), day(3)));

        let categories = summary.by_category.len() as f64;
        let category_sum: f64 = summary.by_category.values().sum();
        assert!((category_sum - summary.total_kg).abs() <= 0.01 * categories + 1e-9);

        let days = summary.by_day.len() as f64;
        let day_sum: f64 = summary.by_day.iter().map(|p| p.kg).sum();
        assert!((day_sum - summary.total_kg).abs() <= 0.01 * days + 1e-9);
        assert_eq!(summary.total_kg, 13.53);
    }

    #[test]
    fn default_window_is_trailing_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let window = SummaryWindow::trailing_30_days(today);

        assert_eq!(window.from, NaiveDate::from_ymd_opt(2025, 1, 31).unwrap());
        assert_eq!(window.to, today);
        assert_eq!(window.days().count(), 30);
    }

    #[test]
    fn resolve_keeps_explicit_bounds() {
        let today = day(20);
        let window = SummaryWindow::resolve(Some(day(3)), None, today);
        assert_eq!(window, SummaryWindow::new(day(3), today));

        let window = SummaryWindow::resolve(None, Some(day(10)), today);
        assert_eq!(window.from, NaiveDate::from_ymd_opt(2024, 12, 22).unwrap());
        assert_eq!(window.to, day(10));
    }

    #[test]
    fn summary_json_shape() {
        let records = [fixture("transport", 1, 3.84), fixture("food", 2, 3.0)];
        let summary = summarize(&records, SummaryWindow::new(day(1), day(2)));

        assert_snapshot!(serde_json::to_string_pretty(&summary).unwrap(), @r#"
        {
          "from": "2025-01-01",
          "to": "2025-01-02",
          "total_kg": 6.84,
          "by_category": {
            "food": 3.0,
            "transport": 3.84
          },
          "by_day": [
            {
              "date": "2025-01-01",
              "kg": 3.84
            },
            {
              "date": "2025-01-02",
              "kg": 3.0
            }
          ]
        }
        "#);
    }
}
