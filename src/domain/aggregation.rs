// Resampling of a power series into hourly or daily buckets
use super::calendar;
use super::series::IntervalSeries;
use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    #[serde(alias = "15m")]
    Native,
    #[serde(alias = "1h")]
    Hourly,
    #[serde(alias = "1d")]
    Daily,
}

impl Granularity {
    pub fn subtitle(&self) -> &'static str {
        match self {
            Granularity::Native => "15-minute actual generation (MW)",
            Granularity::Hourly => "Hourly average generation (MW)",
            Granularity::Daily => "Daily average generation (MW)",
        }
    }

    /// Format a bucket start the way keys of this granularity are written
    pub fn label(&self, ts: NaiveDateTime) -> String {
        match self {
            Granularity::Native => calendar::format_timestamp(ts),
            Granularity::Hourly => calendar::format_hour(ts),
            Granularity::Daily => calendar::format_day(ts.date()),
        }
    }

    fn bucket(&self, ts: NaiveDateTime) -> NaiveDateTime {
        match self {
            Granularity::Native => ts,
            Granularity::Hourly => calendar::hour_key(ts),
            Granularity::Daily => calendar::day_key(ts).and_time(NaiveTime::MIN),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Granularity::Native => "native",
            Granularity::Hourly => "hourly",
            Granularity::Daily => "daily",
        };
        f.write_str(name)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "native" | "15m" => Ok(Granularity::Native),
            "hourly" | "1h" => Ok(Granularity::Hourly),
            "daily" | "1d" => Ok(Granularity::Daily),
            other => Err(format!("unknown granularity '{}'", other)),
        }
    }
}

/// Display-only resampled series; carries no durations
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSeries {
    pub granularity: Granularity,
    pub timestamps: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl AggregatedSeries {
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.timestamps
            .iter()
            .map(|ts| self.granularity.label(*ts))
            .collect()
    }
}

/// Resample `series` at `granularity`.
///
/// Native is the identity. Hourly and daily take the plain arithmetic mean of
/// the values in each bucket, however many samples it holds, and emit buckets
/// in ascending key order.
pub fn aggregate(series: &IntervalSeries, granularity: Granularity) -> AggregatedSeries {
    if granularity == Granularity::Native {
        return AggregatedSeries {
            granularity,
            timestamps: series.timestamps().to_vec(),
            values: series.values().to_vec(),
        };
    }

    let mut buckets: BTreeMap<NaiveDateTime, (f64, usize)> = BTreeMap::new();
    for (ts, value) in series.timestamps().iter().zip(series.values()) {
        let entry = buckets.entry(granularity.bucket(*ts)).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    let (timestamps, values) = buckets
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .unzip();

    AggregatedSeries {
        granularity,
        timestamps,
        values,
    }
}
