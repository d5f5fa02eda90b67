// Energy integration: power x duration sums and calendar rollups
use super::calendar::{self, YearMonth};
use super::series::{DateRange, IntervalSeries};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const MWH_PER_GWH: f64 = 1000.0;

/// Energy in MWh of MW `values` each held for `durations` hours.
///
/// Every energy figure goes through here; averaged power is never multiplied
/// by an elapsed time since sample spacing may be irregular.
pub fn to_energy(values: &[f64], durations: &[f64]) -> f64 {
    values.iter().zip(durations).map(|(v, d)| v * d).sum()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyEnergy {
    pub date: NaiveDate,
    pub mwh: f64,
}

/// Energy per calendar date, ascending
pub fn daily_energy(series: &IntervalSeries) -> Vec<DailyEnergy> {
    daily_energy_within(series, None)
}

fn daily_energy_within(series: &IntervalSeries, range: Option<&DateRange>) -> Vec<DailyEnergy> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for i in 0..series.len() {
        let date = calendar::day_key(series.timestamps()[i]);
        if range.is_some_and(|r| !r.contains(date)) {
            continue;
        }
        *days.entry(date).or_insert(0.0) += series.values()[i] * series.durations()[i];
    }

    days.into_iter()
        .map(|(date, mwh)| DailyEnergy { date, mwh })
        .collect()
}

/// Energy per (year, month) in GWh, ascending
pub fn monthly_energy_gwh(series: &IntervalSeries) -> BTreeMap<YearMonth, f64> {
    let mut months: BTreeMap<YearMonth, f64> = BTreeMap::new();

    for i in 0..series.len() {
        let key = calendar::month_key(series.timestamps()[i]);
        *months.entry(key).or_insert(0.0) +=
            series.values()[i] * series.durations()[i] / MWH_PER_GWH;
    }

    months
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmDailyEnergy {
    pub farm: String,
    pub days: Vec<DailyEnergy>,
}

/// Daily totals inside `range` for each farm, keeping the given order.
///
/// Farms without any sample in range are left out, and dates with no samples
/// are absent rather than zero.
pub fn compare_daily<'a, I>(farms: I, range: &DateRange) -> Vec<FarmDailyEnergy>
where
    I: IntoIterator<Item = (&'a str, &'a IntervalSeries)>,
{
    farms
        .into_iter()
        .filter_map(|(farm, series)| {
            let days = daily_energy_within(series, Some(range));
            if days.is_empty() {
                None
            } else {
                Some(FarmDailyEnergy {
                    farm: farm.to_string(),
                    days,
                })
            }
        })
        .collect()
}
