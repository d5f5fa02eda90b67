// Summary statistics over a filtered power series
use super::calendar;
use super::energy::to_energy;
use super::series::FilteredSeries;
use serde::Deserialize;

pub const DEFAULT_CO2_TONNES_PER_MWH: f64 = 0.2;
pub const DEFAULT_HOUSEHOLD_MWH_PER_YEAR: f64 = 3.3;
const DAYS_PER_YEAR: f64 = 365.0;

/// Conversion factors for the proxy KPIs
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct KpiFactors {
    #[serde(default = "default_co2")]
    pub co2_tonnes_per_mwh: f64,
    #[serde(default = "default_household")]
    pub household_mwh_per_year: f64,
}

fn default_co2() -> f64 {
    DEFAULT_CO2_TONNES_PER_MWH
}

fn default_household() -> f64 {
    DEFAULT_HOUSEHOLD_MWH_PER_YEAR
}

impl Default for KpiFactors {
    fn default() -> Self {
        Self {
            co2_tonnes_per_mwh: DEFAULT_CO2_TONNES_PER_MWH,
            household_mwh_per_year: DEFAULT_HOUSEHOLD_MWH_PER_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Kpis {
    pub total_energy_mwh: f64,
    pub peak_power_mw: f64,
    /// Mean over generating samples only (value > 0)
    pub average_power_mw: f64,
    /// Average generating power over observed peak, in percent. A proxy, not
    /// the nameplate capacity factor.
    pub capacity_factor_pct: f64,
    pub co2_avoided_tonnes: f64,
    /// Households supplied per day at the configured yearly consumption
    pub households_equivalent: f64,
}

impl Kpis {
    /// Always numeric: an empty series yields all zeros, never NaN.
    pub fn compute(series: &FilteredSeries, factors: &KpiFactors) -> Self {
        let values = series.values();
        let total_energy_mwh = to_energy(values, series.durations());
        let peak_power_mw = values.iter().copied().fold(0.0, f64::max);

        let (generating_sum, generating_count) = values
            .iter()
            .filter(|v| **v > 0.0)
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        let average_power_mw = if generating_count > 0 {
            generating_sum / generating_count as f64
        } else {
            0.0
        };

        let capacity_factor_pct = if peak_power_mw > 0.0 {
            average_power_mw / peak_power_mw * 100.0
        } else {
            0.0
        };

        let span_days = match (series.timestamps().first(), series.timestamps().last()) {
            (Some(first), Some(last)) => calendar::days_between(*first, *last),
            _ => 0.0,
        };
        let period_days = span_days.max(1.0);

        let households_equivalent = if factors.household_mwh_per_year > 0.0 {
            (total_energy_mwh / period_days) / (factors.household_mwh_per_year / DAYS_PER_YEAR)
        } else {
            0.0
        };

        Self {
            total_energy_mwh,
            peak_power_mw,
            average_power_mw,
            capacity_factor_pct,
            co2_avoided_tonnes: total_energy_mwh * factors.co2_tonnes_per_mwh,
            households_equivalent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::series::IntervalSeries;
    use crate::domain::test_support::{quarter_hours, series};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_series_is_all_zero() {
        let kpis = Kpis::compute(&IntervalSeries::default(), &KpiFactors::default());
        assert_eq!(kpis, Kpis::default());
    }

    #[test]
    fn test_all_night_series() {
        let data = series(&[
            ("2024-06-01T00:00", 0.0, 0.25),
            ("2024-06-01T00:15", 0.0, 0.25),
        ]);
        let kpis = Kpis::compute(&data, &KpiFactors::default());

        assert_eq!(kpis.peak_power_mw, 0.0);
        assert_eq!(kpis.average_power_mw, 0.0);
        assert_eq!(kpis.capacity_factor_pct, 0.0);
        assert!(!kpis.households_equivalent.is_nan());
    }

    #[test]
    fn test_average_excludes_night() {
        let data = series(&[
            ("2024-06-01T05:00", 0.0, 0.25),
            ("2024-06-01T12:00", 10.0, 0.25),
            ("2024-06-01T12:15", 30.0, 0.25),
            ("2024-06-01T23:00", 0.0, 0.25),
        ]);
        let kpis = Kpis::compute(&data, &KpiFactors::default());

        assert_eq!(kpis.total_energy_mwh, 10.0);
        assert_eq!(kpis.peak_power_mw, 30.0);
        assert_eq!(kpis.average_power_mw, 20.0);
        assert!(approx(kpis.capacity_factor_pct, 100.0 * 20.0 / 30.0));
        assert!(approx(kpis.co2_avoided_tonnes, 2.0));
    }

    #[test]
    fn test_capacity_factor_bounded() {
        let day = quarter_hours("2024-06-01", |i| ((i * 7) % 13) as f64);
        let kpis = Kpis::compute(&day, &KpiFactors::default());

        assert!(kpis.peak_power_mw > 0.0);
        assert!(kpis.capacity_factor_pct >= 0.0 && kpis.capacity_factor_pct <= 100.0);
    }

    #[test]
    fn test_households_single_sample_floors_period() {
        let data = series(&[("2024-06-01T12:00", 3.3, 1.0)]);
        let kpis = Kpis::compute(&data, &KpiFactors::default());

        // 3.3 MWh over one day at 3.3 MWh per household-year
        assert!(approx(kpis.households_equivalent, 365.0));
    }

    #[test]
    fn test_households_over_multi_day_span() {
        let data = series(&[
            ("2024-06-01T00:00", 6.6, 1.0),
            ("2024-06-03T00:00", 0.0, 1.0),
        ]);
        let kpis = Kpis::compute(&data, &KpiFactors::default());

        assert!(approx(kpis.households_equivalent, (6.6 / 2.0) / (3.3 / 365.0)));
    }

    #[test]
    fn test_custom_factors() {
        let data = series(&[("2024-06-01T12:00", 10.0, 1.0)]);
        let factors = KpiFactors {
            co2_tonnes_per_mwh: 0.5,
            household_mwh_per_year: 0.0,
        };
        let kpis = Kpis::compute(&data, &factors);

        assert_eq!(kpis.co2_avoided_tonnes, 5.0);
        assert_eq!(kpis.households_equivalent, 0.0);
    }
}
