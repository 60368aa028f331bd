//! Report periods in the business time zone
//!
//! Every range is half-open: `[start, end)` in Unix millis.

use chrono::{Datelike, Days, NaiveDate};
use chrono_tz::Tz;
use serde::Deserialize;
use std::str::FromStr;

use crate::utils::time::{day_end_millis, day_start_millis, parse_date};
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    /// Seven days back through today
    Week,
    /// Calendar month containing today
    Month,
    /// Calendar year containing today
    Year,
}

impl FromStr for Period {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(AppError::with_message(
                ErrorCode::InvalidStatus,
                format!("Unknown report period: {other}"),
            )
            .with_detail("period", other)),
        }
    }
}

/// Inclusive calendar days plus their half-open millisecond bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub first_day: NaiveDate,
    pub last_day: NaiveDate,
    pub start: i64,
    pub end: i64,
}

impl DateRange {
    pub fn new(first_day: NaiveDate, last_day: NaiveDate, tz: Tz) -> Self {
        Self {
            first_day,
            last_day,
            start: day_start_millis(first_day, tz),
            end: day_end_millis(last_day, tz),
        }
    }

    /// Each calendar day of the range, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.first_day
            .iter_days()
            .take_while(move |d| *d <= self.last_day)
    }
}

impl Period {
    pub fn range(&self, today: NaiveDate, tz: Tz) -> DateRange {
        match self {
            Self::Today => DateRange::new(today, today, tz),
            Self::Week => {
                let first = today.checked_sub_days(Days::new(7)).unwrap_or(today);
                DateRange::new(first, today, tz)
            }
            Self::Month => {
                let first = today.with_day(1).unwrap_or(today);
                let last = first
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|next| next.pred_opt())
                    .unwrap_or(today);
                DateRange::new(first, last, tz)
            }
            Self::Year => {
                let first = NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap_or(today);
                let last = NaiveDate::from_ymd_opt(today.year(), 12, 31).unwrap_or(today);
                DateRange::new(first, last, tz)
            }
        }
    }
}

/// Longest explicit range, in calendar days (a leap year)
pub const MAX_RANGE_DAYS: i64 = 366;

/// `?period=week` or `?start_date=2025-03-01&end_date=2025-03-15`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A resolved report window. `period` is None for explicit date ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub period: Option<Period>,
    pub range: DateRange,
}

impl ReportQuery {
    /// Explicit dates win over `period`; with neither, today
    pub fn resolve(&self, today: NaiveDate, tz: Tz) -> AppResult<ReportWindow> {
        match (&self.start_date, &self.end_date) {
            (Some(start), Some(end)) => {
                let first = parse_date(start)?;
                let last = parse_date(end)?;
                if last < first {
                    return Err(AppError::validation(format!(
                        "end_date {last} is before start_date {first}"
                    )));
                }
                let days = (last - first).num_days() + 1;
                if days > MAX_RANGE_DAYS {
                    return Err(AppError::validation(format!(
                        "Date range spans {days} days, at most {MAX_RANGE_DAYS} allowed"
                    ))
                    .with_detail("days", days));
                }
                Ok(ReportWindow {
                    period: None,
                    range: DateRange::new(first, last, tz),
                })
            }
            (Some(_), None) | (None, Some(_)) => Err(AppError::validation(
                "start_date and end_date must be given together",
            )),
            (None, None) => {
                let period = match &self.period {
                    Some(p) => p.parse::<Period>()?,
                    None => Period::Today,
                };
                Ok(ReportWindow {
                    period: Some(period),
                    range: period.range(today, tz),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_bounds() {
        let today = date(2024, 2, 20);
        let tz = Tz::UTC;

        let r = Period::Today.range(today, tz);
        assert_eq!(r.end - r.start, 86_400_000);

        let r = Period::Week.range(today, tz);
        assert_eq!(r.first_day, date(2024, 2, 13));
        assert_eq!(r.days().count(), 8);

        let r = Period::Month.range(today, tz);
        assert_eq!(r.first_day, date(2024, 2, 1));
        assert_eq!(r.last_day, date(2024, 2, 29));
        assert_eq!(r.end, day_start_millis(date(2024, 3, 1), tz));

        let r = Period::Year.range(today, tz);
        assert_eq!(r.days().count(), 366);
    }

    #[test]
    fn test_query_resolution() {
        let today = date(2025, 6, 1);
        let q = ReportQuery::default();
        assert_eq!(q.resolve(today, Tz::UTC).unwrap().period, Some(Period::Today));

        let q = ReportQuery {
            period: Some("week".into()),
            start_date: Some("2025-05-01".into()),
            end_date: Some("2025-05-03".into()),
        };
        let w = q.resolve(today, Tz::UTC).unwrap();
        assert_eq!(w.period, None);
        assert_eq!(w.range.days().count(), 3);

        let q = ReportQuery {
            period: Some("decade".into()),
            ..Default::default()
        };
        assert_eq!(q.resolve(today, Tz::UTC).unwrap_err().code, ErrorCode::InvalidStatus);

        let q = ReportQuery {
            start_date: Some("2025-05-03".into()),
            end_date: Some("2025-05-01".into()),
            ..Default::default()
        };
        assert!(q.resolve(today, Tz::UTC).is_err());
    }

    #[test]
    fn test_explicit_range_is_capped() {
        let today = date(2025, 6, 1);
        let q = ReportQuery {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-12-31".into()),
            ..Default::default()
        };
        assert_eq!(q.resolve(today, Tz::UTC).unwrap().range.days().count(), 366);

        let q = ReportQuery {
            start_date: Some("2024-01-01".into()),
            end_date: Some("2025-01-01".into()),
            ..Default::default()
        };
        let err = q.resolve(today, Tz::UTC).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let q = ReportQuery {
            start_date: Some("1900-01-01".into()),
            end_date: Some("9999-12-31".into()),
            ..Default::default()
        };
        assert_eq!(
            q.resolve(today, Tz::UTC).unwrap_err().code,
            ErrorCode::ValidationFailed
        );
    }
}
