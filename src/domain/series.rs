// Interval series domain model and date-range filtering
use super::calendar::{self, CalendarError};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("series lengths differ: {timestamps} timestamps, {values} values, {durations} durations")]
    LengthMismatch {
        timestamps: usize,
        values: usize,
        durations: usize,
    },
    #[error("duration at index {index} must be strictly positive, got {duration}")]
    NonPositiveDuration { index: usize, duration: f64 },
    #[error("timestamp at index {index}: {source}")]
    Timestamp {
        index: usize,
        #[source]
        source: CalendarError,
    },
}

/// Series as it appears in the dataset file, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIntervalSeries {
    #[serde(default)]
    pub timestamps: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub durations: Vec<f64>,
}

/// Time-stamped power curve of one farm.
///
/// `values` are instantaneous power in MW, `durations` the hours each value
/// is held. All three sequences always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntervalSeries {
    timestamps: Vec<NaiveDateTime>,
    values: Vec<f64>,
    durations: Vec<f64>,
}

/// An `IntervalSeries` restricted to a `DateRange`
pub type FilteredSeries = IntervalSeries;

impl IntervalSeries {
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        values: Vec<f64>,
        durations: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if timestamps.len() != values.len() || values.len() != durations.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                values: values.len(),
                durations: durations.len(),
            });
        }

        if let Some((index, &duration)) = durations
            .iter()
            .enumerate()
            .find(|(_, d)| d.is_nan() || **d <= 0.0)
        {
            return Err(SeriesError::NonPositiveDuration { index, duration });
        }

        Ok(Self {
            timestamps,
            values,
            durations,
        })
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.timestamps.first().map(|ts| ts.date())
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.timestamps.last().map(|ts| ts.date())
    }

    /// Range covering every sample, if there are any
    pub fn span(&self) -> Option<DateRange> {
        Some(DateRange::new(self.first_date()?, self.last_date()?))
    }

    /// Samples whose calendar date lies inside `range`, in original order
    pub fn filter_range(&self, range: &DateRange) -> FilteredSeries {
        let mut out = Self::default();

        for (i, ts) in self.timestamps.iter().enumerate() {
            if range.contains(ts.date()) {
                out.timestamps.push(*ts);
                out.values.push(self.values[i]);
                out.durations.push(self.durations[i]);
            }
        }

        out
    }
}

impl TryFrom<RawIntervalSeries> for IntervalSeries {
    type Error = SeriesError;

    fn try_from(raw: RawIntervalSeries) -> Result<Self, Self::Error> {
        let timestamps = raw
            .timestamps
            .iter()
            .enumerate()
            .map(|(index, ts)| {
                calendar::parse_timestamp(ts).map_err(|source| SeriesError::Timestamp { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(timestamps, raw.values, raw.durations)
    }
}

/// Inclusive calendar-date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    pub fn parse(from: &str, to: &str) -> Result<Self, CalendarError> {
        Ok(Self::new(calendar::parse_date(from)?, calendar::parse_date(to)?))
    }

    /// The `days` calendar days ending at `to`, both ends included. Clamped
    /// to the earliest representable date.
    pub fn last_days(to: NaiveDate, days: u32) -> Self {
        let back = u64::from(days.max(1)) - 1;
        let from = to.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN);
        Self::new(from, to)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::series;

    fn three_days() -> IntervalSeries {
        series(&[
            ("2024-06-01T10:00", 1.0, 0.25),
            ("2024-06-01T23:45", 2.0, 0.25),
            ("2024-06-02T00:00", 3.0, 0.25),
            ("2024-06-03T12:00", 4.0, 0.25),
        ])
    }

    #[test]
    fn test_filter_range_inclusive_bounds() {
        let range = DateRange::parse("2024-06-01", "2024-06-02").unwrap();
        let filtered = three_days().filter_range(&range);

        assert_eq!(filtered.values(), &[1.0, 2.0, 3.0]);
        assert_eq!(filtered.durations(), &[0.25, 0.25, 0.25]);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_filter_range_outside_span_is_empty() {
        let data = three_days();
        for (from, to) in [("2024-05-01", "2024-05-31"), ("2024-06-04", "2025-01-01")] {
            let filtered = data.filter_range(&DateRange::parse(from, to).unwrap());
            assert!(filtered.is_empty());
            assert!(filtered.values().is_empty());
            assert!(filtered.durations().is_empty());
        }
    }

    #[test]
    fn test_filter_range_inverted_selects_nothing() {
        let range = DateRange::parse("2024-06-03", "2024-06-01").unwrap();
        assert!(three_days().filter_range(&range).is_empty());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        let raw = RawIntervalSeries {
            timestamps: vec!["2024-06-01T00:00".to_string()],
            values: vec![1.0, 2.0],
            durations: vec![0.25],
        };
        assert_eq!(
            IntervalSeries::try_from(raw),
            Err(SeriesError::LengthMismatch {
                timestamps: 1,
                values: 2,
                durations: 1
            })
        );
    }

    #[test]
    fn test_rejects_non_positive_duration() {
        let raw = RawIntervalSeries {
            timestamps: vec!["2024-06-01T00:00".to_string(), "2024-06-01T00:15".to_string()],
            values: vec![1.0, 2.0],
            durations: vec![0.25, 0.0],
        };
        assert_eq!(
            IntervalSeries::try_from(raw),
            Err(SeriesError::NonPositiveDuration {
                index: 1,
                duration: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_bad_timestamp() {
        let raw = RawIntervalSeries {
            timestamps: vec!["2024-06-01T00:00".to_string(), "not a time".to_string()],
            values: vec![1.0, 2.0],
            durations: vec![0.25, 0.25],
        };
        assert!(matches!(
            IntervalSeries::try_from(raw),
            Err(SeriesError::Timestamp { index: 1, .. })
        ));
    }

    #[test]
    fn test_last_days() {
        let to = calendar::parse_date("2024-06-30").unwrap();
        let range = DateRange::last_days(to, 7);
        assert_eq!(range.from, calendar::parse_date("2024-06-24").unwrap());
        assert_eq!(range.to, to);
        assert_eq!(DateRange::last_days(to, 0), DateRange::new(to, to));
        assert_eq!(DateRange::last_days(to, u32::MAX).from, NaiveDate::MIN);
    }

    #[test]
    fn test_span() {
        let span = three_days().span().unwrap();
        assert_eq!(span, DateRange::parse("2024-06-01", "2024-06-03").unwrap());
        assert!(IntervalSeries::default().span().is_none());
    }
}
