// Wire types - domain results formatted for the JSON API
use crate::domain::aggregation::Granularity;
use crate::domain::calendar;
use crate::domain::dashboard::{DailySection, Dashboard, DashboardSection, TimeSeriesSection};
use crate::domain::energy::FarmDailyEnergy;
use crate::domain::farm::{ClippingLevel, FarmSummary, MetadataPanel, ReferenceKind, ReferenceLine, TechnologyClass};
use crate::domain::heatmap::Heatmap;
use crate::domain::kpi::Kpis;
use crate::domain::seasonality::{MonthlyProfile, MONTH_NAMES};
use crate::domain::series::DateRange;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RangeDto {
    pub from: String,
    pub to: String,
}

impl From<&DateRange> for RangeDto {
    fn from(range: &DateRange) -> Self {
        Self {
            from: calendar::format_day(range.from),
            to: calendar::format_day(range.to),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmSummaryDto {
    pub name: String,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    pub samples: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardDto {
    pub farm: String,
    pub title: String,
    pub subtitle: String,
    pub range: RangeDto,
    pub granularity: Granularity,
    pub sections: Vec<SectionDto>,
    pub metadata: MetadataPanelDto,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "section", rename_all = "snake_case")]
pub enum SectionDto {
    Kpis(KpisDto),
    TimeSeries(TimeSeriesDto),
    Daily(DailyDto),
    Heatmap(HeatmapDto),
    Monthly(MonthlyDto),
    Comparison(ComparisonDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct KpisDto {
    pub total_energy_mwh: f64,
    pub peak_power_mw: f64,
    pub average_power_mw: f64,
    pub capacity_factor_pct: f64,
    pub co2_avoided_tonnes: f64,
    pub households_equivalent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShadeDto {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReferenceLineDto {
    pub kind: ReferenceKind,
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesDto {
    pub timestamps: Vec<String>,
    pub values: Vec<f64>,
    pub weekend_shading: Vec<ShadeDto>,
    pub reference_lines: Vec<ReferenceLineDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyDto {
    pub dates: Vec<String>,
    pub mwh: Vec<f64>,
    /// Each bar relative to the largest one, 0..=1
    pub intensity: Vec<f64>,
    pub reference_line: Option<ReferenceLineDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapDto {
    pub dates: Vec<String>,
    pub hours: Vec<String>,
    /// Rows are hours, columns dates
    pub z: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyDto {
    pub profile: Option<MonthlyProfileDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyProfileDto {
    pub months: Vec<&'static str>,
    pub historical_average_gwh: Vec<f64>,
    pub selected_average_gwh: Vec<f64>,
    pub historical_totals: Vec<MonthlyTotalDto>,
    pub seasonality_ratio: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotalDto {
    pub month: &'static str,
    pub year: i32,
    pub period: String,
    pub gwh: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonDto {
    pub farms: Vec<FarmDailyDto>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FarmDailyDto {
    pub farm: String,
    pub dates: Vec<String>,
    pub mwh: Vec<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetadataPanelDto {
    pub name: String,
    pub province: Option<String>,
    pub technology: Option<String>,
    pub technology_class: TechnologyClass,
    pub installed_mwp: Option<f64>,
    pub grid_mw: Option<f64>,
    pub area_ha: Option<f64>,
    pub observed_peak_mw: Option<f64>,
    pub first_generation: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub notes: Option<String>,
    pub eic_code: Option<String>,
    pub esios_name: Option<String>,
    pub unit_name: Option<String>,
    pub dc_ac_ratio: Option<f64>,
    pub clipping_pct: Option<f64>,
    pub clipping_hours: Option<f64>,
    pub clipping_level: Option<ClippingLevel>,
}

/// Progressive dashboard message, one per stream chunk
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton(SkeletonDto),
    Section(SectionDto),
    Metadata(MetadataPanelDto),
    Complete(CompletionDto),
}

#[derive(Debug, Clone, Serialize)]
pub struct SkeletonDto {
    pub farm: String,
    pub title: String,
    pub subtitle: String,
    pub range: RangeDto,
    pub granularity: Granularity,
    pub sections: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionDto {
    pub sections: usize,
    pub duration_ms: i64,
}

pub fn farm_summary_to_dto(summary: FarmSummary) -> FarmSummaryDto {
    FarmSummaryDto {
        name: summary.name,
        first_date: summary.span.map(|s| calendar::format_day(s.from)),
        last_date: summary.span.map(|s| calendar::format_day(s.to)),
        samples: summary.samples,
    }
}

pub fn dashboard_to_dto(dashboard: Dashboard, metadata: MetadataPanel) -> DashboardDto {
    DashboardDto {
        farm: dashboard.view.farm.clone(),
        title: dashboard.title,
        subtitle: dashboard.subtitle.to_string(),
        range: RangeDto::from(&dashboard.view.range),
        granularity: dashboard.view.granularity,
        sections: dashboard.sections.into_iter().map(section_to_dto).collect(),
        metadata: metadata_to_dto(metadata),
    }
}

pub fn section_to_dto(section: DashboardSection) -> SectionDto {
    match section {
        DashboardSection::Kpis(kpis) => SectionDto::Kpis(kpis_to_dto(kpis)),
        DashboardSection::TimeSeries(ts) => SectionDto::TimeSeries(time_series_to_dto(ts)),
        DashboardSection::Daily(daily) => SectionDto::Daily(daily_to_dto(daily)),
        DashboardSection::Heatmap(heatmap) => SectionDto::Heatmap(heatmap_to_dto(heatmap)),
        DashboardSection::Monthly(profile) => SectionDto::Monthly(MonthlyDto {
            profile: profile.map(monthly_to_dto),
        }),
        DashboardSection::Comparison(farms) => SectionDto::Comparison(comparison_to_dto(farms)),
    }
}

pub fn section_name(section: &SectionDto) -> &'static str {
    match section {
        SectionDto::Kpis(_) => "kpis",
        SectionDto::TimeSeries(_) => "time_series",
        SectionDto::Daily(_) => "daily",
        SectionDto::Heatmap(_) => "heatmap",
        SectionDto::Monthly(_) => "monthly",
        SectionDto::Comparison(_) => "comparison",
    }
}

fn kpis_to_dto(kpis: Kpis) -> KpisDto {
    KpisDto {
        total_energy_mwh: kpis.total_energy_mwh,
        peak_power_mw: kpis.peak_power_mw,
        average_power_mw: kpis.average_power_mw,
        capacity_factor_pct: kpis.capacity_factor_pct,
        co2_avoided_tonnes: kpis.co2_avoided_tonnes,
        households_equivalent: kpis.households_equivalent,
    }
}

fn reference_line_to_dto(line: ReferenceLine) -> ReferenceLineDto {
    ReferenceLineDto {
        kind: line.kind,
        value: line.value,
        label: line.label,
    }
}

fn time_series_to_dto(section: TimeSeriesSection) -> TimeSeriesDto {
    let weekend_shading = section
        .weekend_days
        .iter()
        .map(|date| {
            let day = calendar::format_day(*date);
            ShadeDto {
                from: format!("{}T00:00", day),
                to: format!("{}T23:59", day),
            }
        })
        .collect();

    TimeSeriesDto {
        timestamps: section.series.labels(),
        values: section.series.values,
        weekend_shading,
        reference_lines: section
            .reference_lines
            .into_iter()
            .map(reference_line_to_dto)
            .collect(),
    }
}

fn daily_to_dto(section: DailySection) -> DailyDto {
    let mwh: Vec<f64> = section.days.iter().map(|d| d.mwh).collect();

    DailyDto {
        dates: section
            .days
            .iter()
            .map(|d| calendar::format_day(d.date))
            .collect(),
        intensity: intensities(&mwh),
        mwh,
        reference_line: section.reference_line.map(reference_line_to_dto),
    }
}

fn intensities(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(0.0, f64::max);
    values
        .iter()
        .map(|v| if max > 0.0 { v / max } else { 0.0 })
        .collect()
}

fn heatmap_to_dto(heatmap: Heatmap) -> HeatmapDto {
    HeatmapDto {
        hours: heatmap.hour_labels(),
        dates: heatmap.dates.iter().map(|d| calendar::format_day(*d)).collect(),
        z: heatmap.cells,
    }
}

fn monthly_to_dto(profile: MonthlyProfile) -> MonthlyProfileDto {
    let historical_totals = profile
        .historical_totals
        .iter()
        .map(|total| MonthlyTotalDto {
            month: MONTH_NAMES[(total.period.month as usize).saturating_sub(1).min(11)],
            year: total.period.year,
            period: total.period.to_string(),
            gwh: total.gwh,
        })
        .collect();

    MonthlyProfileDto {
        months: MONTH_NAMES.to_vec(),
        historical_average_gwh: profile.historical_average_gwh.to_vec(),
        selected_average_gwh: profile.selected_average_gwh.to_vec(),
        historical_totals,
        seasonality_ratio: profile.seasonality_ratio,
    }
}

pub fn comparison_to_dto(farms: Vec<FarmDailyEnergy>) -> ComparisonDto {
    ComparisonDto {
        farms: farms
            .into_iter()
            .map(|f| FarmDailyDto {
                dates: f.days.iter().map(|d| calendar::format_day(d.date)).collect(),
                mwh: f.days.iter().map(|d| d.mwh).collect(),
                farm: f.farm,
            })
            .collect(),
    }
}

pub fn metadata_to_dto(panel: MetadataPanel) -> MetadataPanelDto {
    let (lat, lon) = match panel.coordinates {
        Some((lat, lon)) => (Some(lat), Some(lon)),
        None => (None, None),
    };

    MetadataPanelDto {
        name: panel.name,
        province: panel.province,
        technology: panel.technology,
        technology_class: panel.technology_class,
        installed_mwp: panel.installed_mwp,
        grid_mw: panel.grid_mw,
        area_ha: panel.area_ha,
        observed_peak_mw: panel.observed_peak_mw,
        first_generation: panel.first_generation.map(calendar::format_day),
        lat,
        lon,
        notes: panel.notes,
        eic_code: panel.codes.eic,
        esios_name: panel.codes.esios,
        unit_name: panel.codes.unit,
        dc_ac_ratio: panel.dc_ac_ratio,
        clipping_pct: panel.clipping.as_ref().map(|c| c.pct),
        clipping_hours: panel.clipping.as_ref().and_then(|c| c.hours),
        clipping_level: panel.clipping.as_ref().map(|c| c.level),
    }
}
