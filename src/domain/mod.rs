// Domain layer - Pure aggregation and KPI engine
pub mod aggregation;
pub mod calendar;
pub mod dashboard;
pub mod energy;
pub mod farm;
pub mod heatmap;
pub mod kpi;
pub mod seasonality;
pub mod series;
pub mod view_state;

#[cfg(test)]
pub mod test_support;
