// Dashboard domain model: every computed section for one view
use super::aggregation::{aggregate, AggregatedSeries};
use super::calendar;
use super::energy::{daily_energy, DailyEnergy, FarmDailyEnergy};
use super::farm::{daily_reference_line, power_reference_lines, FarmMetadata, ReferenceLine};
use super::heatmap::Heatmap;
use super::kpi::{KpiFactors, Kpis};
use super::seasonality::MonthlyProfile;
use super::series::{FilteredSeries, IntervalSeries};
use super::view_state::ViewState;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::sync::Arc;

pub const DEFAULT_DAYLIGHT_HOURS: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardSettings {
    pub kpi: KpiFactors,
    /// Hours of grid-capacity output used for the daily reference bar
    pub daylight_hours: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            kpi: KpiFactors::default(),
            daylight_hours: DEFAULT_DAYLIGHT_HOURS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Kpis,
    TimeSeries,
    Daily,
    Heatmap,
    Monthly,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        SectionKind::Kpis,
        SectionKind::TimeSeries,
        SectionKind::Daily,
        SectionKind::Heatmap,
        SectionKind::Monthly,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SectionKind::Kpis => "kpis",
            SectionKind::TimeSeries => "time_series",
            SectionKind::Daily => "daily",
            SectionKind::Heatmap => "heatmap",
            SectionKind::Monthly => "monthly",
        }
    }
}

/// Cross-farm section; needs every farm so it is built outside the context
pub const COMPARISON_SECTION: &str = "comparison";

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesSection {
    pub series: AggregatedSeries,
    pub weekend_days: Vec<NaiveDate>,
    pub reference_lines: Vec<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySection {
    pub days: Vec<DailyEnergy>,
    pub reference_line: Option<ReferenceLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardSection {
    Kpis(Kpis),
    TimeSeries(TimeSeriesSection),
    Daily(DailySection),
    Heatmap(Heatmap),
    /// None when there is nothing to draw
    Monthly(Option<MonthlyProfile>),
    Comparison(Vec<FarmDailyEnergy>),
}

/// Inputs shared by every section of one farm's dashboard
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub view: ViewState,
    pub full: Arc<IntervalSeries>,
    pub filtered: Arc<FilteredSeries>,
    pub metadata: Arc<FarmMetadata>,
    pub settings: DashboardSettings,
}

impl DashboardContext {
    pub fn new(
        view: ViewState,
        full: Arc<IntervalSeries>,
        metadata: Arc<FarmMetadata>,
        settings: DashboardSettings,
    ) -> Self {
        let filtered = Arc::new(full.filter_range(&view.range));
        Self {
            view,
            full,
            filtered,
            metadata,
            settings,
        }
    }

    pub fn title(&self) -> String {
        format!("{} — Generation Profile", self.view.farm)
    }

    pub fn subtitle(&self) -> &'static str {
        self.view.granularity.subtitle()
    }

    pub fn section(&self, kind: SectionKind) -> DashboardSection {
        match kind {
            SectionKind::Kpis => DashboardSection::Kpis(Kpis::compute(&self.filtered, &self.settings.kpi)),
            SectionKind::TimeSeries => {
                let series = aggregate(&self.filtered, self.view.granularity);
                DashboardSection::TimeSeries(TimeSeriesSection {
                    weekend_days: weekend_days(&series.timestamps),
                    reference_lines: power_reference_lines(&self.metadata),
                    series,
                })
            }
            SectionKind::Daily => DashboardSection::Daily(DailySection {
                days: daily_energy(&self.filtered),
                reference_line: daily_reference_line(&self.metadata, self.settings.daylight_hours),
            }),
            SectionKind::Heatmap => DashboardSection::Heatmap(Heatmap::compute(&self.filtered)),
            SectionKind::Monthly => {
                let profile = MonthlyProfile::compute(&self.full, &self.filtered);
                DashboardSection::Monthly((!profile.is_empty()).then_some(profile))
            }
        }
    }

    /// Highest reading over the whole dataset, not just the selection
    pub fn observed_peak(&self) -> Option<f64> {
        self.full.values().iter().copied().reduce(f64::max)
    }
}

/// Distinct Saturday and Sunday dates among `timestamps`, ascending
pub fn weekend_days(timestamps: &[NaiveDateTime]) -> Vec<NaiveDate> {
    timestamps
        .iter()
        .map(|ts| calendar::day_key(*ts))
        .filter(|date| calendar::is_weekend(*date))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// A farm's dashboard with every section computed
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub view: ViewState,
    pub title: String,
    pub subtitle: &'static str,
    pub sections: Vec<DashboardSection>,
}

impl Dashboard {
    pub fn new(context: &DashboardContext, comparison: Vec<FarmDailyEnergy>) -> Self {
        let mut sections: Vec<DashboardSection> = SectionKind::ALL
            .iter()
            .map(|kind| context.section(*kind))
            .collect();
        sections.push(DashboardSection::Comparison(comparison));

        Self {
            view: context.view.clone(),
            title: context.title(),
            subtitle: context.subtitle(),
            sections,
        }
    }
}
