//! Selects between the live portal backend and offline demo data.

use super::{ClimateClient, DemoDataProvider};
use crate::error::{AppError, Result};
use crate::models::{
    Aggregation, ForecastResponse, MapFeatureCollection, StatisticsResponse, TimeSeriesResponse,
    Variable, YearMonth,
};
use chrono::NaiveDate;

/// Where pages get their data from.
pub enum DataSource {
    Remote(ClimateClient),
    Demo(DemoDataProvider),
}

impl DataSource {
    pub fn is_offline(&self) -> bool {
        matches!(self, DataSource::Demo(_))
    }

    /// The live client, for endpoints that have no offline counterpart.
    pub fn remote(&self, endpoint: &'static str) -> Result<&ClimateClient> {
        match self {
            DataSource::Remote(client) => Ok(client),
            DataSource::Demo(_) => Err(AppError::Offline(endpoint)),
        }
    }

    pub async fn get_time_series(
        &self,
        location_id: &str,
        variable: Variable,
        start: NaiveDate,
        end: NaiveDate,
        aggregation: Aggregation,
    ) -> Result<TimeSeriesResponse> {
        match self {
            DataSource::Remote(client) => {
                client
                    .get_time_series(location_id, variable, start, end, aggregation)
                    .await
            },
            DataSource::Demo(demo) => {
                demo.get_time_series(location_id, variable, start, end, aggregation)
            },
        }
    }

    pub async fn get_map_data(
        &self,
        variable: Variable,
        date: YearMonth,
        level: u8,
    ) -> Result<MapFeatureCollection> {
        match self {
            DataSource::Remote(client) => client.get_map_data(variable, date, level).await,
            DataSource::Demo(demo) => demo.get_map_data(variable, date, level),
        }
    }

    pub async fn get_statistics(&self, period: &str) -> Result<StatisticsResponse> {
        match self {
            DataSource::Remote(client) => client.get_statistics(period).await,
            DataSource::Demo(demo) => demo.get_statistics(period),
        }
    }

    pub async fn get_forecast(
        &self,
        location_id: &str,
        variable: Variable,
        horizon: &str,
    ) -> Result<ForecastResponse> {
        match self {
            DataSource::Remote(client) => client.get_forecast(location_id, variable, horizon).await,
            DataSource::Demo(demo) => demo.get_forecast(location_id, variable, horizon),
        }
    }
}
