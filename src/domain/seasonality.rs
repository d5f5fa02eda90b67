// Per-calendar-month energy profile and summer/winter ratio
use super::calendar::YearMonth;
use super::energy::monthly_energy_gwh;
use super::series::{FilteredSeries, IntervalSeries};

pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const SUMMER_MONTHS: [u32; 3] = [6, 7, 8];
const WINTER_MONTHS: [u32; 3] = [12, 1, 2];

/// One year's energy for one month, for the scatter overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyTotal {
    pub period: YearMonth,
    pub gwh: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyProfile {
    /// Index 0 is January. Averaged over the years present in the full series.
    pub historical_average_gwh: [f64; 12],
    /// Same average restricted to the selection
    pub selected_average_gwh: [f64; 12],
    pub historical_totals: Vec<MonthlyTotal>,
    /// Summer (Jun-Aug) over winter (Dec-Feb); None unless both sums are positive
    pub seasonality_ratio: Option<f64>,
}

impl MonthlyProfile {
    pub fn compute(full: &IntervalSeries, filtered: &FilteredSeries) -> Self {
        let historical = monthly_energy_gwh(full);
        let historical_totals: Vec<MonthlyTotal> = historical
            .iter()
            .map(|(period, gwh)| MonthlyTotal {
                period: *period,
                gwh: *gwh,
            })
            .collect();

        let historical_average_gwh = average_per_month(&historical_totals);

        let selected: Vec<MonthlyTotal> = monthly_energy_gwh(filtered)
            .into_iter()
            .map(|(period, gwh)| MonthlyTotal { period, gwh })
            .collect();
        let selected_average_gwh = average_per_month(&selected);

        Self {
            seasonality_ratio: seasonality_ratio(&historical_average_gwh),
            historical_average_gwh,
            selected_average_gwh,
            historical_totals,
        }
    }

    /// Nothing to draw: no historical months and a zero selection
    pub fn is_empty(&self) -> bool {
        self.historical_totals.is_empty() && self.selected_average_gwh.iter().all(|v| *v == 0.0)
    }
}

/// Mean per calendar month over the years that have that month.
///
/// Months no year covers stay 0 and add nothing to any denominator.
fn average_per_month(totals: &[MonthlyTotal]) -> [f64; 12] {
    let mut sums = [0.0; 12];
    let mut counts = [0usize; 12];

    for total in totals {
        let idx = (total.period.month as usize).saturating_sub(1).min(11);
        sums[idx] += total.gwh;
        counts[idx] += 1;
    }

    let mut averages = [0.0; 12];
    for m in 0..12 {
        if counts[m] > 0 {
            averages[m] = sums[m] / counts[m] as f64;
        }
    }
    averages
}

pub fn seasonality_ratio(averages: &[f64; 12]) -> Option<f64> {
    let sum = |months: &[u32]| -> f64 { months.iter().map(|m| averages[*m as usize - 1]).sum() };
    let summer = sum(&SUMMER_MONTHS);
    let winter = sum(&WINTER_MONTHS);

    if summer > 0.0 && winter > 0.0 {
        Some(summer / winter)
    } else {
        None
    }
}
