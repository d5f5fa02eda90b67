// Farm metadata, metadata panel and chart reference lines
use super::series::{DateRange, IntervalSeries};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Farm name with the extent of its data, for pickers and date bounds
#[derive(Debug, Clone, PartialEq)]
pub struct FarmSummary {
    pub name: String,
    pub span: Option<DateRange>,
    pub samples: usize,
}

impl FarmSummary {
    pub fn new(name: String, series: &IntervalSeries) -> Self {
        Self {
            name,
            span: series.span(),
            samples: series.len(),
        }
    }
}

/// Static per-farm metadata as supplied with the dataset. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FarmMetadata {
    pub province: Option<String>,
    pub technology: Option<String>,
    /// Installed DC capacity (MWp)
    pub mwp: Option<f64>,
    /// Grid access capacity (MW)
    pub mw_grid: Option<f64>,
    pub area_ha: Option<f64>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub first_gen: Option<String>,
    pub notes: Option<String>,
    pub eic_code: Option<String>,
    pub display_name: Option<String>,
    pub unit_name_gu: Option<String>,
    pub dc_ac_ratio: Option<f64>,
    pub clipping_pct: Option<f64>,
    pub clipping_hrs: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TechnologyClass {
    Tracker,
    Fixed,
    Unknown,
}

impl TechnologyClass {
    pub fn classify(technology: Option<&str>) -> Self {
        match technology {
            Some(t) if t.contains("tracker") => TechnologyClass::Tracker,
            Some(t) if t.contains("Fixed") => TechnologyClass::Fixed,
            _ => TechnologyClass::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClippingLevel {
    High,
    Moderate,
    Low,
}

impl ClippingLevel {
    pub fn from_pct(pct: f64) -> Self {
        if pct > 20.0 {
            ClippingLevel::High
        } else if pct > 8.0 {
            ClippingLevel::Moderate
        } else {
            ClippingLevel::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clipping {
    pub pct: f64,
    pub hours: Option<f64>,
    pub level: ClippingLevel,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FarmCodes {
    pub eic: Option<String>,
    pub esios: Option<String>,
    /// Only present when it differs from the ESIOS short name
    pub unit: Option<String>,
}

/// Everything the metadata side panel shows for a farm
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataPanel {
    pub name: String,
    pub province: Option<String>,
    pub technology: Option<String>,
    pub technology_class: TechnologyClass,
    pub installed_mwp: Option<f64>,
    pub grid_mw: Option<f64>,
    pub area_ha: Option<f64>,
    pub observed_peak_mw: Option<f64>,
    pub first_generation: Option<NaiveDate>,
    pub coordinates: Option<(f64, f64)>,
    pub notes: Option<String>,
    pub codes: FarmCodes,
    pub dc_ac_ratio: Option<f64>,
    pub clipping: Option<Clipping>,
}

const MIN_NOTES_LEN: usize = 10;

impl MetadataPanel {
    pub fn new(name: &str, meta: &FarmMetadata, observed_peak_mw: Option<f64>) -> Self {
        let first_generation = meta
            .first_gen
            .as_deref()
            .and_then(|raw| super::calendar::parse_timestamp(raw).ok())
            .map(|ts| ts.date());

        let unit = meta
            .unit_name_gu
            .clone()
            .filter(|unit| meta.display_name.as_ref() != Some(unit));

        Self {
            name: name.to_string(),
            province: meta.province.clone(),
            technology: meta.technology.clone(),
            technology_class: TechnologyClass::classify(meta.technology.as_deref()),
            installed_mwp: meta.mwp,
            grid_mw: meta.mw_grid,
            area_ha: meta.area_ha,
            observed_peak_mw,
            first_generation,
            coordinates: meta.lat.zip(meta.lon),
            notes: meta
                .notes
                .clone()
                .filter(|n| n.chars().count() > MIN_NOTES_LEN),
            codes: FarmCodes {
                eic: meta.eic_code.clone(),
                esios: meta.display_name.clone(),
                unit,
            },
            dc_ac_ratio: meta.dc_ac_ratio,
            clipping: meta.clipping_pct.map(|pct| Clipping {
                pct,
                hours: meta.clipping_hrs,
                level: ClippingLevel::from_pct(pct),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    GridCapacity,
    InstalledCapacity,
    DailyGridEnergy,
}

/// Horizontal line drawn across a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub kind: ReferenceKind,
    pub value: f64,
    pub label: String,
}

/// Capacity lines for the power chart. The installed line is skipped when it
/// coincides with the grid line.
pub fn power_reference_lines(meta: &FarmMetadata) -> Vec<ReferenceLine> {
    let mut lines = Vec::new();
    let grid = meta.mw_grid.filter(|v| *v != 0.0);

    if let Some(grid) = grid {
        lines.push(ReferenceLine {
            kind: ReferenceKind::GridCapacity,
            value: grid,
            label: format!("Grid {} MW", grid),
        });
    }

    if let Some(mwp) = meta.mwp.filter(|v| *v != 0.0 && Some(*v) != meta.mw_grid) {
        lines.push(ReferenceLine {
            kind: ReferenceKind::InstalledCapacity,
            value: mwp,
            label: format!("Installed {} MWp", mwp),
        });
    }

    lines
}

/// Grid capacity held for `daylight_hours`, as a daily energy reference
pub fn daily_reference_line(meta: &FarmMetadata, daylight_hours: f64) -> Option<ReferenceLine> {
    let grid = meta.mw_grid.filter(|v| *v != 0.0)?;
    let mwh = grid * daylight_hours;
    Some(ReferenceLine {
        kind: ReferenceKind::DailyGridEnergy,
        value: mwh,
        label: format!("Grid cap. ×{}h = {} MWh", daylight_hours, mwh),
    })
}
