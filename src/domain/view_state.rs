// Explicit selection passed into every dashboard computation
use super::aggregation::Granularity;
use super::series::DateRange;
use chrono::NaiveDate;

/// How the caller asked for a date window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelection {
    Explicit(DateRange),
    /// The last N days ending at the farm's last sample date
    LastDays(u32),
    All,
}

impl RangeSelection {
    /// Resolve against the farm's data span. A farm without samples resolves
    /// presets to the unbounded range, which still selects nothing.
    pub fn resolve(&self, span: Option<DateRange>) -> DateRange {
        let unbounded = DateRange::new(NaiveDate::MIN, NaiveDate::MAX);
        match (self, span) {
            (RangeSelection::Explicit(range), _) => *range,
            (RangeSelection::LastDays(days), Some(span)) => DateRange::last_days(span.to, *days),
            (RangeSelection::All, Some(span)) => span,
            (_, None) => unbounded,
        }
    }
}

/// Immutable snapshot of what is being looked at
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub farm: String,
    pub range: DateRange,
    pub granularity: Granularity,
}

impl ViewState {
    pub fn new(farm: impl Into<String>, range: DateRange, granularity: Granularity) -> Self {
        Self {
            farm: farm.into(),
            range,
            granularity,
        }
    }
}
