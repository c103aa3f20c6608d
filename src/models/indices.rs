//! Types for the derived climate index endpoints (`/api/indices/*`), region comparison
//! and the backend health probe.

use crate::indices::DroughtSeverity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Heat stress index computed server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum HeatIndexType {
    HeatIndex,
    Wbgt,
    Humidex,
}

impl HeatIndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeatIndexType::HeatIndex => "heat_index",
            HeatIndexType::Wbgt => "wbgt",
            HeatIndexType::Humidex => "humidex",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeatIndexType::HeatIndex => "Heat Index",
            HeatIndexType::Wbgt => "Wet Bulb Globe Temperature",
            HeatIndexType::Humidex => "Humidex",
        }
    }
}

impl fmt::Display for HeatIndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatClassification {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatStressInputs {
    pub temperature: f64,
    pub humidity: f64,
    #[serde(default)]
    pub wind_speed: Option<f64>,
    #[serde(default)]
    pub solar_radiation: Option<f64>,
}

/// Response of `/api/indices/heat-stress`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatStressResponse {
    pub location: String,
    pub date: String,
    pub index_type: HeatIndexType,
    pub value: f64,
    pub classification: HeatClassification,
    pub inputs: HeatStressInputs,
}

/// Drought index computed server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum DroughtIndexType {
    Spi,
    Spei,
    PalmerDrought,
}

impl DroughtIndexType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DroughtIndexType::Spi => "spi",
            DroughtIndexType::Spei => "spei",
            DroughtIndexType::PalmerDrought => "palmer_drought",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DroughtIndexType::Spi => "SPI",
            DroughtIndexType::Spei => "SPEI",
            DroughtIndexType::PalmerDrought => "Palmer Drought Index",
        }
    }
}

impl fmt::Display for DroughtIndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroughtPoint {
    pub date: String,
    pub value: f64,
    pub severity: DroughtSeverity,
}

/// Response of `/api/indices/drought`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroughtResponse {
    pub location: String,
    pub index_type: DroughtIndexType,
    pub timescale: u32,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub current_value: Option<f64>,
    #[serde(default)]
    pub current_severity: DroughtSeverity,
    #[serde(default)]
    pub timeseries: Vec<DroughtPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ExtremeEventType {
    Temperature,
    Precipitation,
    WindSpeed,
}

impl ExtremeEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtremeEventType::Temperature => "temperature",
            ExtremeEventType::Precipitation => "precipitation",
            ExtremeEventType::WindSpeed => "wind_speed",
        }
    }
}

impl fmt::Display for ExtremeEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeEventCount {
    #[serde(rename = "type")]
    pub kind: String,
    pub count: u32,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeStatistics {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub std: f64,
    pub percentile_95: f64,
    pub percentile_99: f64,
}

/// Response of `/api/indices/extreme-events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtremeEventsResponse {
    pub location: String,
    pub event_type: ExtremeEventType,
    pub start_date: String,
    pub end_date: String,
    pub total_days: u32,
    pub extreme_events: Vec<ExtremeEventCount>,
    /// Keyed `"<years>_year"`.
    #[serde(default)]
    pub return_periods: BTreeMap<String, f64>,
    pub statistics: ExtremeStatistics,
}

impl ExtremeEventsResponse {
    /// Return periods ordered by their year count. Keys that don't follow the
    /// `"<years>_year"` pattern are skipped.
    pub fn sorted_return_periods(&self) -> Vec<(u32, f64)> {
        let mut periods: Vec<(u32, f64)> = self
            .return_periods
            .iter()
            .filter_map(|(key, value)| {
                key.strip_suffix("_year")
                    .and_then(|years| years.parse().ok())
                    .map(|years| (years, *value))
            })
            .collect();
        periods.sort_by_key(|(years, _)| *years);
        periods
    }
}

/// Body of `POST /api/compare`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareRequest {
    pub locations: Vec<String>,
    pub variable: crate::models::Variable,
    /// `"<start> to <end>"`
    pub time_period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionComparison {
    pub location: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub timeseries: Vec<crate::models::TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub variable: String,
    pub time_period: String,
    pub comparison: Vec<RegionComparison>,
}

/// Response of `/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub gee_initialized: bool,
    #[serde(default)]
    pub redis_connected: bool,
    #[serde(default)]
    pub version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extreme_events_return_periods_sorted_numerically() {
        let response: ExtremeEventsResponse = serde_json::from_value(json!({
            "location": "sindh",
            "event_type": "temperature",
            "start_date": "2020-01-01",
            "end_date": "2020-12-31",
            "total_days": 366,
            "extreme_events": [
                {"type": "hot_days", "count": 41, "threshold": 35},
                {"type": "very_hot_days", "count": 3, "threshold": 40}
            ],
            "return_periods": {"100_year": 49.1, "10_year": 41.7, "2_year": 36.2, "odd": 1.0},
            "statistics": {"mean": 28.1, "max": 44.0, "min": 11.2, "std": 5.0,
                           "percentile_95": 36.3, "percentile_99": 39.9}
        }))
        .unwrap();

        assert_eq!(
            response.sorted_return_periods(),
            vec![(2, 36.2), (10, 41.7), (100, 49.1)]
        );
        assert_eq!(response.extreme_events[0].kind, "hot_days");
    }

    #[test]
    fn test_drought_response_unknown_severity() {
        let response: DroughtResponse = serde_json::from_value(json!({
            "location": "balochistan",
            "index_type": "spi",
            "timescale": 3,
            "start_date": "2024-01-01",
            "end_date": "2024-02-01",
            "current_value": null,
            "current_severity": "unknown",
            "timeseries": []
        }))
        .unwrap();
        assert_eq!(response.current_severity, DroughtSeverity::Unknown);
        assert!(response.current_value.is_none());
    }
}
