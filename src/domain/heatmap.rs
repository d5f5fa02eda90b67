// Hour-of-day x date mean power matrix
use super::calendar;
use super::series::FilteredSeries;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    /// Dates with at least one sample, ascending
    pub dates: Vec<NaiveDate>,
    /// Fixed 0..24 display axis
    pub hours: Vec<u32>,
    /// `cells[hour][date_index]`, mean MW; 0 where no sample falls
    pub cells: Vec<Vec<f64>>,
}

impl Heatmap {
    pub fn compute(series: &FilteredSeries) -> Self {
        let mut bins: HashMap<(NaiveDate, u32), (f64, usize)> = HashMap::new();
        let mut dates = BTreeSet::new();

        for (ts, value) in series.timestamps().iter().zip(series.values()) {
            let date = calendar::day_key(*ts);
            dates.insert(date);
            let bin = bins.entry((date, calendar::hour_of_day(*ts))).or_insert((0.0, 0));
            bin.0 += value;
            bin.1 += 1;
        }

        let dates: Vec<NaiveDate> = dates.into_iter().collect();
        let hours: Vec<u32> = (0..HOURS_PER_DAY).collect();
        let cells = hours
            .iter()
            .map(|hour| {
                dates
                    .iter()
                    .map(|date| match bins.get(&(*date, *hour)) {
                        Some((sum, count)) => sum / *count as f64,
                        None => 0.0,
                    })
                    .collect()
            })
            .collect();

        Self { dates, hours, cells }
    }

    pub fn hour_labels(&self) -> Vec<String> {
        self.hours.iter().map(|h| format!("{:02}:00", h)).collect()
    }
}
