//! Period keys for coarsening weekly observations into aggregation buckets.

use chrono::{Datelike, Days, NaiveDate};
use std::fmt;

/// Target granularity for period aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Granularity {
    /// ISO week starting on Monday.
    Week,
    /// Calendar month.
    #[default]
    Month,
    /// Calendar quarter.
    Quarter,
    /// Calendar year.
    Year,
}

impl Granularity {
    /// Truncate a date to the first day of its period.
    ///
    /// `None` when the period would start before the earliest
    /// representable date.
    pub fn truncate(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Week => date.checked_sub_days(Days::new(
                u64::from(date.weekday().num_days_from_monday()),
            )),
            Granularity::Month => date.with_day(1),
            Granularity::Quarter => {
                let month = (date.month0() / 3) * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), month, 1)
            }
            Granularity::Year => date.with_ordinal(1),
        }
    }

    /// Build the period key that contains `date`.
    pub fn key(&self, date: NaiveDate) -> Option<PeriodKey> {
        self.truncate(date).map(|start| PeriodKey {
            start,
            granularity: *self,
        })
    }
}

/// A coarsened time identifier such as `2017-03`.
///
/// Keys order chronologically by their first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PeriodKey {
    start: NaiveDate,
    granularity: Granularity,
}

impl PeriodKey {
    /// First day covered by the period.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.granularity {
            Granularity::Week => {
                let iso = self.start.iso_week();
                write!(f, "{}-W{:02}", iso.year(), iso.week())
            }
            Granularity::Month => write!(f, "{}", self.start.format("%Y-%m")),
            Granularity::Quarter => {
                write!(f, "{}-Q{}", self.start.year(), self.start.month0() / 3 + 1)
            }
            Granularity::Year => write!(f, "{}", self.start.year()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn truncate_to_each_granularity() {
        // 2017-03-08 is a Wednesday
        let date = ymd(2017, 3, 8);
        assert_eq!(Granularity::Week.truncate(date), Some(ymd(2017, 3, 6)));
        assert_eq!(Granularity::Month.truncate(date), Some(ymd(2017, 3, 1)));
        assert_eq!(Granularity::Quarter.truncate(date), Some(ymd(2017, 1, 1)));
        assert_eq!(Granularity::Year.truncate(date), Some(ymd(2017, 1, 1)));
        assert_eq!(
            Granularity::Quarter.truncate(ymd(2017, 12, 31)),
            Some(ymd(2017, 10, 1))
        );
    }

    #[test]
    fn week_before_earliest_date_has_no_key() {
        // Earliest representable year; its first day is not a Monday
        let first = ymd(-262143, 1, 1);
        assert_eq!(Granularity::Week.truncate(first), None);
        assert_eq!(Granularity::Week.key(first), None);
        assert_eq!(Granularity::Month.truncate(first), Some(first));
    }

    fn month(date: NaiveDate) -> PeriodKey {
        Granularity::Month.key(date).unwrap()
    }

    #[test]
    fn keys_display_like_period_labels() {
        let date = ymd(2017, 3, 8);
        assert_eq!(month(date).to_string(), "2017-03");
        assert_eq!(Granularity::Week.key(date).unwrap().to_string(), "2017-W10");
        assert_eq!(Granularity::Quarter.key(date).unwrap().to_string(), "2017-Q1");
        assert_eq!(Granularity::Year.key(date).unwrap().to_string(), "2017");
    }

    #[test]
    fn keys_sort_chronologically() {
        let mut keys = vec![
            month(ymd(2018, 1, 15)),
            month(ymd(2017, 12, 3)),
            month(ymd(2017, 2, 28)),
        ];
        keys.sort();
        let labels: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(labels, vec!["2017-02", "2017-12", "2018-01"]);
    }

    #[test]
    fn dates_in_same_month_share_a_key() {
        let a = month(ymd(2017, 3, 1));
        let b = month(ymd(2017, 3, 31));
        assert_eq!(a, b);
        assert_eq!(a.start(), ymd(2017, 3, 1));
        assert_eq!(a.granularity(), Granularity::Month);
    }
}
