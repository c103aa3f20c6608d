//! Provides a client for the climate portal REST API.
//!
//! This module defines the `ClimateClient` struct and its methods for fetching time
//! series, GeoJSON map layers, summary statistics, forecasts, derived indices and
//! downloads from the portal backend.

use crate::error::{AppError, Result};
use crate::models::{
    validate_range, Aggregation, CompareRequest, CompareResponse, DownloadFormat,
    DownloadPayload, DownloadRequest, DroughtIndexType, DroughtResponse, ExtremeEventType,
    ExtremeEventsResponse, ForecastResponse, HealthResponse, HeatIndexType, HeatStressResponse,
    MapFeatureCollection, StatisticsResponse, TimeSeriesResponse, Variable, YearMonth,
    DAY_FORMAT,
};
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};

/// Default base URL of a locally running portal backend.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// An asynchronous client for the climate portal API.
///
/// Requests are never retried: every failure is returned to the calling page.
#[derive(Debug, Clone)]
pub struct ClimateClient {
    client: Client,
    base_url: String,
}

impl ClimateClient {
    /// Creates a new `ClimateClient` for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            error!("Failed to build HTTP client: {}", e);
            AppError::Config(format!("could not build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and turns transport failures and non-success statuses into errors.
    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            error!("Error fetching {}: {}", what, e);
            AppError::Network(e.into())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        error!("API request to {} failed with status {}", url, status);
        if status == StatusCode::NOT_FOUND {
            error!("Received 404 Not Found. Check CLIMATE_API_URL and the endpoint parameters.");
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            error!("Received 401/403. The portal backend rejected the request.");
        }
        Err(AppError::Api { status, url })
    }

    async fn decode<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            error!("Error parsing {} response JSON: {}", what, e);
            if e.is_decode() {
                AppError::InvalidResponse(format!("{what}: {e}"))
            } else {
                AppError::Network(e.into())
            }
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        what: &str,
    ) -> Result<T> {
        let request = self.client.get(self.url(path)).query(query);
        let response = self.send(request, what).await?;
        Self::decode(response, what).await
    }

    /// Fetches a time series for one location.
    ///
    /// Corresponds to `GET /api/timeseries`. The range and variable are checked before
    /// anything is sent; the returned series is verified to be in date order.
    pub async fn get_time_series(
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

        info!(
            "Fetching {} {} time series for {} from {} to {}",
            aggregation, variable, location_id, start, end
        );

        let series: TimeSeriesResponse = self
            .get_json(
                "/api/timeseries",
                &[
                    ("location_id", location_id.to_string()),
                    ("variable", variable.to_string()),
                    ("start", start.format(DAY_FORMAT).to_string()),
                    ("end", end.format(DAY_FORMAT).to_string()),
                    ("aggregation", aggregation.to_string()),
                ],
                "time series",
            )
            .await?;
        series.validate()?;

        debug!(
            "Received {} time series points for {}",
            series.data.len(),
            location_id
        );
        Ok(series)
    }

    /// Fetches the GeoJSON climate layer for a month and administrative level.
    ///
    /// An empty feature collection is a normal result, not an error.
    pub async fn get_map_data(
        &self,
        variable: Variable,
        date: YearMonth,
        level: u8,
    ) -> Result<MapFeatureCollection> {
        info!("Fetching {} map for {} (level {})", variable, date, level);

        let collection: MapFeatureCollection = self
            .get_json(
                "/api/map-data",
                &[
                    ("variable", variable.to_string()),
                    ("date", date.to_string()),
                    ("level", level.to_string()),
                ],
                "map data",
            )
            .await?;

        debug!("Received {} map features", collection.features.len());
        Ok(collection)
    }

    /// Fetches summary statistics for a named period such as `current_month`.
    pub async fn get_statistics(&self, period: &str) -> Result<StatisticsResponse> {
        info!("Fetching statistics for period {}", period);
        self.get_json(
            "/api/statistics",
            &[("period", period.to_string())],
            "statistics",
        )
        .await
    }

    /// Fetches a forecast. The number of periods is whatever the backend returns.
    pub async fn get_forecast(
        &self,
        location_id: &str,
        variable: Variable,
        horizon: &str,
    ) -> Result<ForecastResponse> {
        info!(
            "Fetching {} {} forecast for {}",
            horizon, variable, location_id
        );

        let forecast: ForecastResponse = self
            .get_json(
                "/api/forecast",
                &[
                    ("location_id", location_id.to_string()),
                    ("variable", variable.to_string()),
                    ("horizon", horizon.to_string()),
                ],
                "forecast",
            )
            .await?;
        forecast.validate()?;

        debug!(
            "Received {} forecast periods from model '{}'",
            forecast.forecast.len(),
            forecast.model_info.model_type
        );
        Ok(forecast)
    }

    /// Downloads climate data as CSV text or a JSON value.
    ///
    /// Any failure after the request is built is reported as `AppError::Download`.
    pub async fn download_data(&self, request: &DownloadRequest) -> Result<DownloadPayload> {
        validate_range(request.start_date, request.end_date)?;
        if request.variables.is_empty() {
            return Err(AppError::Download("no variables selected".to_string()));
        }

        info!(
            "Downloading {} variable(s) for {} as {}",
            request.variables.len(),
            request.location.id,
            request.format.extension()
        );

        let download_failed = |e: AppError| {
            error!("Download failed: {}", e);
            AppError::Download(e.to_string())
        };

        let builder = self.client.post(self.url("/api/download")).json(request);
        let response = self
            .send(builder, "download")
            .await
            .map_err(download_failed)?;

        let payload = match request.format {
            DownloadFormat::Csv => response
                .text()
                .await
                .map(DownloadPayload::Csv)
                .map_err(|e| download_failed(AppError::Network(e.into())))?,
            DownloadFormat::Json => Self::decode::<serde_json::Value>(response, "download")
                .await
                .map(DownloadPayload::Json)
                .map_err(download_failed)?,
        };

        debug!("Download for {} completed", request.location.id);
        Ok(payload)
    }

    /// Fetches a heat stress index (`heat_index`, `wbgt` or `humidex`) for a month.
    pub async fn get_heat_stress(
        &self,
        location_id: &str,
        date: YearMonth,
        index_type: HeatIndexType,
    ) -> Result<HeatStressResponse> {
        info!(
            "Fetching {} heat stress for {} in {}",
            index_type, location_id, date
        );
        self.get_json(
            "/api/indices/heat-stress",
            &[
                ("location_id", location_id.to_string()),
                ("date", date.to_string()),
                ("index_type", index_type.to_string()),
            ],
            "heat stress",
        )
        .await
    }

    /// Fetches a drought index time series with its current severity.
    pub async fn get_drought_index(
        &self,
        location_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        index_type: DroughtIndexType,
        timescale: u32,
    ) -> Result<DroughtResponse> {
        validate_range(start, end)?;
        info!(
            "Fetching {} ({}-month) drought index for {} from {} to {}",
            index_type, timescale, location_id, start, end
        );

        let drought: DroughtResponse = self
            .get_json(
                "/api/indices/drought",
                &[
                    ("location_id", location_id.to_string()),
                    ("start_date", start.format(DAY_FORMAT).to_string()),
                    ("end_date", end.format(DAY_FORMAT).to_string()),
                    ("index_type", index_type.to_string()),
                    ("timescale", timescale.to_string()),
                ],
                "drought index",
            )
            .await?;

        debug!("Received {} drought index points", drought.timeseries.len());
        Ok(drought)
    }

    /// Fetches extreme event counts, return periods and distribution statistics.
    pub async fn get_extreme_events(
        &self,
        location_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        event_type: ExtremeEventType,
    ) -> Result<ExtremeEventsResponse> {
        validate_range(start, end)?;
        info!(
            "Fetching {} extreme events for {} from {} to {}",
            event_type, location_id, start, end
        );
        self.get_json(
            "/api/indices/extreme-events",
            &[
                ("location_id", location_id.to_string()),
                ("start_date", start.format(DAY_FORMAT).to_string()),
                ("end_date", end.format(DAY_FORMAT).to_string()),
                ("event_type", event_type.to_string()),
            ],
            "extreme events",
        )
        .await
    }

    /// Compares one variable across several regions over a date range.
    pub async fn compare_regions(
        &self,
        locations: &[String],
        variable: Variable,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<CompareResponse> {
        validate_range(start, end)?;
        let body = CompareRequest {
            locations: locations.to_vec(),
            variable,
            time_period: format!(
                "{} to {}",
                start.format(DAY_FORMAT),
                end.format(DAY_FORMAT)
            ),
        };
        info!(
            "Comparing {} across {} region(s) for {}",
            variable,
            locations.len(),
            body.time_period
        );

        let builder = self.client.post(self.url("/api/compare")).json(&body);
        let response = self.send(builder, "region comparison").await?;
        Self::decode(response, "region comparison").await
    }

    /// Probes backend health.
    pub async fn health(&self) -> Result<HealthResponse> {
        self.get_json("/health", &[], "health").await
    }
}
