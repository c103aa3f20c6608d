//! Core request/response types for the climate portal API.
//!
//! Includes:
//! - Query parameter types (`Variable`, `Aggregation`, `YearMonth`, `LocationRef`).
//! - Response types for time series, map (GeoJSON), statistics and forecast endpoints,
//!   together with the shape checks the client runs on receipt.
//! - Download request and payload types.

use crate::error::{AppError, Result};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire format of day-resolution dates.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Climate variables known to the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Variable {
    Temperature,
    Precipitation,
    Humidity,
    WindSpeed,
    SolarRadiation,
}

impl Variable {
    pub const ALL: [Variable; 5] = [
        Variable::Temperature,
        Variable::Precipitation,
        Variable::Humidity,
        Variable::WindSpeed,
        Variable::SolarRadiation,
    ];

    /// Name used in query strings and JSON bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Variable::Temperature => "temperature",
            Variable::Precipitation => "precipitation",
            Variable::Humidity => "humidity",
            Variable::WindSpeed => "wind_speed",
            Variable::SolarRadiation => "solar_radiation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variable::Temperature => "Temperature",
            Variable::Precipitation => "Precipitation",
            Variable::Humidity => "Relative Humidity",
            Variable::WindSpeed => "Wind Speed",
            Variable::SolarRadiation => "Solar Radiation",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Variable::Temperature => "°C",
            Variable::Precipitation => "mm",
            Variable::Humidity => "%",
            Variable::WindSpeed => "m/s",
            Variable::SolarRadiation => "W/m²",
        }
    }

    /// Whether `/api/timeseries` serves this variable.
    pub fn supports_time_series(&self) -> bool {
        !matches!(self, Variable::SolarRadiation)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variable {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Variable::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| AppError::UnsupportedVariable(s.to_string()))
    }
}

/// Temporal aggregation applied by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum Aggregation {
    Hourly,
    Daily,
    Monthly,
    Seasonal,
    Annual,
}

impl Aggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregation::Hourly => "hourly",
            Aggregation::Daily => "daily",
            Aggregation::Monthly => "monthly",
            Aggregation::Seasonal => "seasonal",
            Aggregation::Annual => "annual",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `YYYY-MM` period, as used by the map endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidDate {
                input: format!("{year}-{month}"),
                expected: "YYYY-MM",
            });
        }
        Ok(Self { year, month })
    }

    /// The current UTC month.
    pub fn current() -> Self {
        let today = Utc::now().date_naive();
        Self {
            year: today.year(),
            month: today.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AppError::InvalidDate {
            input: s.to_string(),
            expected: "YYYY-MM",
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).map_err(|_| invalid())
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DAY_FORMAT).map_err(|_| AppError::InvalidDate {
        input: input.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Rejects ranges whose start lies after their end.
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start > end {
        return Err(AppError::InvalidRange { start, end });
    }
    Ok(())
}

/// Opaque identifier for a province, district or national region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: String,
}

impl LocationRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

// --- Time series ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// ISO period (`YYYY-MM-DD` or `YYYY-MM`).
    pub date: String,
    pub value: f64,
}

/// Response of `/api/timeseries`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesResponse {
    pub location: String,
    pub variable: String,
    pub data: Vec<TimeSeriesPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<String>,
}

impl TimeSeriesResponse {
    /// True when `data` is ordered by non-decreasing date.
    pub fn is_chronological(&self) -> bool {
        self.data.windows(2).all(|w| w[0].date <= w[1].date)
    }

    /// Checks the ordering the backend guarantees. The client never re-sorts.
    pub fn validate(&self) -> Result<()> {
        if self.is_chronological() {
            return Ok(());
        }
        let pos = self
            .data
            .windows(2)
            .position(|w| w[0].date > w[1].date)
            .unwrap_or_default();
        Err(AppError::InvalidResponse(format!(
            "time series for {} is out of order at '{}' -> '{}'",
            self.location,
            self.data[pos].date,
            self.data[pos + 1].date
        )))
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|p| p.value).collect()
    }

    pub fn summary(&self) -> Option<SeriesSummary> {
        SeriesSummary::from_values(&self.values())
    }
}

/// Mean/min/max over a series, as shown in the "Average/Max/Min Value" cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub count: usize,
}

impl SeriesSummary {
    /// Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sum: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            mean: sum / values.len() as f64,
            min,
            max,
            count: values.len(),
        })
    }
}

// --- Forecast ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    pub value: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

impl ForecastPoint {
    /// `lower_bound <= value <= upper_bound`
    pub fn bounds_hold(&self) -> bool {
        self.lower_bound <= self.value && self.value <= self.upper_bound
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trained: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_estimators: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

/// Response of `/api/forecast`. The number of periods is whatever the backend returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    pub forecast: Vec<ForecastPoint>,
    pub model_info: ModelInfo,
}

impl ForecastResponse {
    pub fn validate(&self) -> Result<()> {
        if let Some(p) = self.forecast.iter().find(|p| !p.bounds_hold()) {
            return Err(AppError::InvalidResponse(format!(
                "forecast for {} has value {} outside [{}, {}]",
                p.date, p.value, p.lower_bound, p.upper_bound
            )));
        }
        Ok(())
    }
}

// --- Map (GeoJSON) ---

fn feature_collection_type() -> String {
    "FeatureCollection".to_string()
}

fn feature_type() -> String {
    "Feature".to_string()
}

/// GeoJSON `FeatureCollection` returned by `/api/map-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeatureCollection {
    #[serde(rename = "type", default = "feature_collection_type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<MapFeature>,
}

impl MapFeatureCollection {
    pub fn empty() -> Self {
        Self {
            kind: feature_collection_type(),
            features: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    #[serde(rename = "type", default = "feature_type")]
    pub kind: String,
    /// Polygon geometry, passed through untouched. `null` for unlocated features.
    #[serde(default)]
    pub geometry: serde_json::Value,
    pub properties: MapFeatureProperties,
}

impl MapFeature {
    pub fn new(properties: MapFeatureProperties) -> Self {
        Self {
            kind: feature_type(),
            geometry: serde_json::Value::Null,
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeatureProperties {
    pub name: String,
    pub climate_variable: String,
    /// `None` means no data for this region and period.
    #[serde(default)]
    pub climate_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

// --- Statistics ---

/// Response of `/api/statistics`. Absent fields are omitted, never zeroed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default, alias = "national_avg_temp", skip_serializing_if = "Option::is_none")]
    pub avg_temperature: Option<f64>,
    #[serde(default, alias = "total_rainfall", skip_serializing_if = "Option::is_none")]
    pub total_precipitation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_solar: Option<f64>,
}

// --- Download ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    Csv,
    Json,
}

impl DownloadFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DownloadFormat::Csv => "csv",
            DownloadFormat::Json => "json",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DownloadFormat::Csv => "text/csv",
            DownloadFormat::Json => "application/json",
        }
    }
}

/// Body of `POST /api/download`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub location: LocationRef,
    pub variables: Vec<Variable>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub aggregation: Aggregation,
    pub format: DownloadFormat,
}

/// Raw download contents, before they are packaged into a file.
#[derive(Debug, Clone, PartialEq)]
pub enum DownloadPayload {
    Csv(String),
    Json(serde_json::Value),
}
