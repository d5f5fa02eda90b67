// Series builders shared by the unit tests
use super::series::{IntervalSeries, RawIntervalSeries};

/// Build a series from `(timestamp, MW, hours)` triples
pub fn series(points: &[(&str, f64, f64)]) -> IntervalSeries {
    let raw = RawIntervalSeries {
        timestamps: points.iter().map(|p| p.0.to_string()).collect(),
        values: points.iter().map(|p| p.1).collect(),
        durations: points.iter().map(|p| p.2).collect(),
    };
    IntervalSeries::try_from(raw).unwrap()
}

/// One full day of 15-minute samples produced by `value_at(index)`
pub fn quarter_hours(date: &str, value_at: impl Fn(usize) -> f64) -> IntervalSeries {
    let stamps: Vec<String> = (0..96)
        .map(|i| format!("{}T{:02}:{:02}", date, i / 4, (i % 4) * 15))
        .collect();
    let points: Vec<(&str, f64, f64)> = stamps
        .iter()
        .enumerate()
        .map(|(i, ts)| (ts.as_str(), value_at(i), 0.25))
        .collect();
    series(&points)
}
