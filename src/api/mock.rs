//! Provides an offline data provider that generates plausible climate data.
//!
//! Used when the portal backend is unavailable (`CLIMATE_OFFLINE=true` or `--offline`).
//! It honours the same preconditions as `ClimateClient` so pages behave identically
//! with either source.

use crate::error::{AppError, Result};
use crate::models::{
    validate_range, Aggregation, ForecastPoint, ForecastResponse, MapFeature,
    MapFeatureCollection, MapFeatureProperties, ModelInfo, StatisticsResponse, TimeSeriesPoint,
    TimeSeriesResponse, Variable, YearMonth,
};
use chrono::{Datelike, Duration, NaiveDate};
use rand::{thread_rng, Rng};
use tracing::debug;

/// Generates demo climate data for the four provinces.
pub struct DemoDataProvider {
    /// `(location id, display name)`
    provinces: Vec<(&'static str, &'static str)>,
}

impl Default for DemoDataProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoDataProvider {
    pub fn new() -> Self {
        debug!("Creating DemoDataProvider");
        Self {
            provinces: vec![
                ("punjab", "Punjab"),
                ("sindh", "Sindh"),
                ("kpk", "Khyber Pakhtunkhwa"),
                ("balochistan", "Balochistan"),
            ],
        }
    }

    /// Generates a seasonal series with one point per aggregation step between
    /// `start` and `end` (inclusive).
    pub fn get_time_series(
        &self,
        location_id: &str,
        variable: Variable,
        start: NaiveDate,
        end: NaiveDate,
        aggregation: Aggregation,
    ) -> Result<TimeSeriesResponse> {
        validate_range(start, end)?;
        if !variable.supports_time_series() {
            return Err(AppError::UnsupportedVariable(variable.to_string()));
        }

        let mut rng = thread_rng();
        let data: Vec<TimeSeriesPoint> = step_dates(start, end, aggregation)
            .into_iter()
            .map(|(date, label)| TimeSeriesPoint {
                date: label,
                value: seasonal_value(variable, date.month(), &mut rng),
            })
            .collect();

        debug!(
            "Generated {} demo points for {} {}",
            data.len(),
            location_id,
            variable
        );

        Ok(TimeSeriesResponse {
            location: location_id.to_string(),
            variable: variable.to_string(),
            data,
            aggregation: Some(aggregation.to_string()),
        })
    }

    /// Province-level features without geometry. Other levels have no offline data.
    pub fn get_map_data(
        &self,
        variable: Variable,
        date: YearMonth,
        level: u8,
    ) -> Result<MapFeatureCollection> {
        if level != 1 {
            debug!("No demo map data for level {}", level);
            return Ok(MapFeatureCollection::empty());
        }

        let mut rng = thread_rng();
        let range = value_range(variable);
        let features = self
            .provinces
            .iter()
            .map(|(_, name)| {
                let value = range.map(|(lo, hi)| round2(rng.gen_range(lo..hi)));
                MapFeature::new(MapFeatureProperties {
                    name: name.to_string(),
                    climate_variable: variable.to_string(),
                    climate_value: value,
                    value,
                })
            })
            .collect();

        debug!("Generated demo {} map for {}", variable, date);
        Ok(MapFeatureCollection {
            kind: "FeatureCollection".to_string(),
            features,
        })
    }

    /// A partial summary: there is no offline solar data.
    pub fn get_statistics(&self, period: &str) -> Result<StatisticsResponse> {
        let mut rng = thread_rng();
        Ok(StatisticsResponse {
            period: Some(period.to_string()),
            avg_temperature: Some(round2(rng.gen_range(24.0..32.0))),
            total_precipitation: Some(round2(rng.gen_range(20.0..80.0))),
            avg_wind_speed: Some(round2(rng.gen_range(3.0..9.0))),
            avg_solar: None,
        })
    }

    /// Climatological forecast for the next three months.
    pub fn get_forecast(
        &self,
        location_id: &str,
        variable: Variable,
        horizon: &str,
    ) -> Result<ForecastResponse> {
        let mut rng = thread_rng();
        let current = YearMonth::current();

        let forecast = (1..=3)
            .map(|ahead| {
                let index = current.month as i32 - 1 + ahead;
                let year = current.year + index.div_euclid(12);
                let month = index.rem_euclid(12) as u32 + 1;
                let value = round2(seasonal_value(variable, month, &mut rng));
                let spread = round2(1.96 * rng.gen_range(0.5..2.0));
                ForecastPoint {
                    date: format!("{:04}-{:02}-01", year, month),
                    value,
                    lower_bound: round2(value - spread),
                    upper_bound: round2(value + spread),
                }
            })
            .collect();

        debug!("Generated demo {} forecast for {}", horizon, location_id);
        Ok(ForecastResponse {
            location: Some(location_id.to_string()),
            variable: Some(variable.to_string()),
            forecast,
            model_info: ModelInfo {
                model_type: "Climatological Mean".to_string(),
                description: "Using historical monthly averages for prediction".to_string(),
                trained: Some(false),
                features: None,
                n_estimators: None,
                max_depth: None,
            },
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Typical `(min, max)` regional values. `None` for variables without demo data.
fn value_range(variable: Variable) -> Option<(f64, f64)> {
    match variable {
        Variable::Temperature => Some((15.0, 35.0)),
        Variable::Precipitation => Some((0.0, 150.0)),
        Variable::Humidity => Some((30.0, 80.0)),
        Variable::WindSpeed => Some((2.0, 12.0)),
        Variable::SolarRadiation => None,
    }
}

/// Seasonal value for `month`: summer peak for temperature, monsoon (Jul-Sep) for rain.
fn seasonal_value(variable: Variable, month: u32, rng: &mut impl Rng) -> f64 {
    let (base, amplitude): (f64, f64) = match variable {
        Variable::Temperature => (25.0, 8.0),
        Variable::Precipitation => (50.0, 40.0),
        Variable::Humidity => (60.0, 15.0),
        Variable::WindSpeed => (7.0, 3.0),
        Variable::SolarRadiation => (20.0, 5.0),
    };

    let value = if variable == Variable::Precipitation {
        if (7..=9).contains(&month) {
            base + amplitude * rng.gen_range(1.5..2.5)
        } else {
            base * rng.gen_range(0.3..0.8)
        }
    } else {
        let sign = if variable == Variable::Temperature { 1.0 } else { -1.0 };
        let summer = if (5..=8).contains(&month) { 1.0 } else { 0.5 };
        base + amplitude * (1.0 + rng.gen_range(-0.3..0.3)) * sign * summer
    };

    round2((value + rng.gen_range(-5.0..5.0)).max(0.0))
}

/// Period starts and their labels for each aggregation step within `[start, end]`.
fn step_dates(start: NaiveDate, end: NaiveDate, aggregation: Aggregation) -> Vec<(NaiveDate, String)> {
    match aggregation {
        Aggregation::Hourly | Aggregation::Daily => {
            let days = (end - start).num_days();
            (0..=days)
                .map(|offset| {
                    let day = start + Duration::days(offset);
                    (day, day.format("%Y-%m-%d").to_string())
                })
                .collect()
        },
        Aggregation::Monthly | Aggregation::Seasonal | Aggregation::Annual => {
            let stride = match aggregation {
                Aggregation::Monthly => 1,
                Aggregation::Seasonal => 3,
                _ => 12,
            };
            let first = start.year() * 12 + start.month0() as i32;
            let last = end.year() * 12 + end.month0() as i32;
            (first..=last)
                .step_by(stride)
                .filter_map(|index| {
                    let year = index.div_euclid(12);
                    let month = index.rem_euclid(12) as u32 + 1;
                    let date = NaiveDate::from_ymd_opt(year, month, 1)?;
                    let label = if aggregation == Aggregation::Annual {
                        format!("{:04}", year)
                    } else {
                        format!("{:04}-{:02}", year, month)
                    };
                    Some((date, label))
                })
                .collect()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_day;

    #[test]
    fn test_monthly_series_has_one_point_per_month() {
        let provider = DemoDataProvider::new();
        let series = provider
            .get_time_series(
                "punjab",
                Variable::Temperature,
                parse_day("2024-01-01").unwrap(),
                parse_day("2024-06-30").unwrap(),
                Aggregation::Monthly,
            )
            .unwrap();

        let dates: Vec<&str> = series.data.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(
            dates,
            vec!["2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06"]
        );
        assert!(series.is_chronological());
        assert!(series.data.iter().all(|p| p.value >= 0.0));
    }

    #[test]
    fn test_seasonal_values_stay_non_negative() {
        let mut rng = rand::thread_rng();
        for variable in Variable::ALL {
            for month in 1..=12 {
                let value = seasonal_value(variable, month, &mut rng);
                assert!(value.is_finite() && value >= 0.0, "{variable:?} month {month}: {value}");
            }
        }
    }

    #[test]
    fn test_daily_and_annual_steps() {
        let start = parse_day("2023-12-30").unwrap();
        let end = parse_day("2024-01-02").unwrap();
        let daily = step_dates(start, end, Aggregation::Daily);
        assert_eq!(daily.len(), 4);
        assert_eq!(daily[3].1, "2024-01-02");

        let annual = step_dates(start, end, Aggregation::Annual);
        assert_eq!(annual.len(), 1);
        assert_eq!(annual[0].1, "2023");
    }

    #[test]
    fn test_demo_rejects_inverted_range() {
        let provider = DemoDataProvider::new();
        let result = provider.get_time_series(
            "sindh",
            Variable::Precipitation,
            parse_day("2024-06-30").unwrap(),
            parse_day("2024-01-01").unwrap(),
            Aggregation::Monthly,
        );
        assert!(matches!(result, Err(AppError::InvalidRange { .. })));
    }

    #[test]
    fn test_demo_forecast_bounds_hold() {
        let provider = DemoDataProvider::new();
        let forecast = provider
            .get_forecast("kpk", Variable::Temperature, "monthly")
            .unwrap();
        assert_eq!(forecast.forecast.len(), 3);
        assert!(forecast.validate().is_ok());
    }

    #[test]
    fn test_demo_map_levels() {
        let provider = DemoDataProvider::new();
        let date = YearMonth::new(2024, 6).unwrap();

        let provinces = provider.get_map_data(Variable::Humidity, date, 1).unwrap();
        assert_eq!(provinces.features.len(), 4);
        assert!(provinces
            .features
            .iter()
            .all(|f| f.properties.climate_value.is_some()));

        let solar = provider
            .get_map_data(Variable::SolarRadiation, date, 1)
            .unwrap();
        assert!(solar
            .features
            .iter()
            .all(|f| f.properties.climate_value.is_none()));

        assert!(provider.get_map_data(Variable::Humidity, date, 2).unwrap().is_empty());
    }

    #[test]
    fn test_demo_statistics_are_partial() {
        let stats = DemoDataProvider::new().get_statistics("current_month").unwrap();
        assert!(stats.avg_temperature.is_some());
        assert!(stats.avg_solar.is_none());
    }
}
