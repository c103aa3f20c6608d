use super::commands::{
    command_for_route, location_name, validate_location, Commands, DownloadArgs, RangeArgs,
    SeriesArgs, LOCATIONS,
};
use crate::api::{ClimateClient, DataSource, DemoDataProvider};
use crate::config::AppConfig;
use crate::download::{csv_preview, DownloadArtifact};
use crate::error::{AppError, Result};
use crate::indices::{assess, related_indices, HeatRisk};
use crate::models::{
    DownloadPayload, DownloadRequest, DroughtIndexType, ExtremeEventType, HeatIndexType,
    LocationRef, Variable, YearMonth,
};
use crate::query::{Query, QueryKey};
use crate::routes::{Route, ROUTES};
use crate::view::{self, RenderContext};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Drives one query through `loading` to a settled state and hands back the result.
pub async fn run_query<T, F>(query: &mut Query<T>, key: QueryKey, request: F) -> Result<T>
where
    T: Clone,
    F: Future<Output = Result<T>>,
{
    let ticket = query.begin(key.clone());
    let result = request.await;
    query.settle(ticket, result.clone());

    let state = query.state();
    if let Some(e) = state.error() {
        error!("Query {} failed: {}", key, e);
    } else if state.data().is_some() {
        debug!("Query {} succeeded", key);
    }
    result
}

/// CLI application
pub struct App {
    source: DataSource,
    config: AppConfig,
    ctx: RenderContext,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let source = if config.offline {
            warn!("Offline mode: serving generated demo data");
            DataSource::Demo(DemoDataProvider::new())
        } else {
            DataSource::Remote(ClimateClient::new(&config.api_url, config.timeout)?)
        };
        Ok(Self::with_source(source, config))
    }

    pub fn with_source(source: DataSource, config: AppConfig) -> Self {
        let ctx = config.render_context();
        Self {
            source,
            config,
            ctx,
        }
    }

    pub fn render_context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Runs a page and prints its output.
    pub async fn run(&self, command: Commands) -> Result<()> {
        let output = self.render(command).await?;
        println!("{}", output);
        Ok(())
    }

    /// Runs a page and returns its rendered output.
    pub async fn render(&self, command: Commands) -> Result<String> {
        let command = match command {
            Commands::Open { path } => {
                let route = Route::from_path(&path)?;
                info!("Opening {} as {}", path, route.path());
                command_for_route(route)
            },
            other => other,
        };

        match command {
            Commands::Dashboard { date } => self.dashboard(date.unwrap_or_else(YearMonth::current)).await,
            Commands::Temperature(args) => self.series_page(Variable::Temperature, &args).await,
            Commands::Precipitation(args) => self.series_page(Variable::Precipitation, &args).await,
            Commands::TimeSeries { series, variable } => self.series_page(variable, &series).await,
            Commands::Map {
                variable,
                date,
                level,
            } => {
                self.map(variable, date.unwrap_or_else(YearMonth::current), level)
                    .await
            },
            Commands::Forecast {
                location,
                variable,
                horizon,
            } => self.forecast(&location, variable, &horizon).await,
            Commands::Download(args) => self.download(&args).await,
            Commands::HeatIndex {
                temperature,
                humidity,
                wind,
                solar,
            } => Ok(self.heat_index(temperature, humidity, wind, solar)),
            Commands::HeatStress {
                location,
                date,
                index,
            } => {
                self.heat_stress(&location, date.unwrap_or_else(YearMonth::current), index)
                    .await
            },
            Commands::Drought {
                range,
                index,
                timescale,
            } => self.drought(&range, index, timescale).await,
            Commands::Extremes { range, event_type } => self.extremes(&range, event_type).await,
            Commands::Explore {
                locations,
                variable,
                start,
                end,
            } => {
                self.explore(&locations, variable, RangeArgs {
                    location: String::new(),
                    start,
                    end,
                })
                .await
            },
            Commands::Stats { period } => self.stats(&period).await,
            Commands::Health => self.health().await,
            Commands::Settings => Ok(self.settings()),
            Commands::About => Ok(self.about()),
            Commands::Open { path } => {
                Err(AppError::Cli(format!("Cannot open '{}' from another page", path)))
            },
        }
    }

    fn spinner(&self, message: &str) -> Result<ProgressBar> {
        let template = if self.ctx.colorize {
            "{spinner:.cyan} {msg}"
        } else {
            "{spinner} {msg}"
        };
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template(template)?);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        Ok(spinner)
    }

    /// Renders a failed data region without failing the whole page.
    fn region_error(&self, region: &str, err: &AppError) -> String {
        error!("Failed to load {}: {}", region, err);
        self.ctx.error(&format!("Could not load {}: {}", region, err))
    }

    /// Map and statistics, fetched concurrently. Each region renders on its own, so a
    /// failure in one still shows the other.
    async fn dashboard(&self, date: YearMonth) -> Result<String> {
        let mut map_query = Query::new();
        let mut stats_query = Query::new();
        let map_key = QueryKey::new("/api/map-data")
            .param("variable", Variable::Temperature)
            .param("date", date)
            .param("level", 1);
        let stats_key = QueryKey::new("/api/statistics").param("period", "current_month");

        let spinner = self.spinner("Loading dashboard")?;
        let (map, stats) = tokio::join!(
            run_query(
                &mut map_query,
                map_key,
                self.source.get_map_data(Variable::Temperature, date, 1)
            ),
            run_query(
                &mut stats_query,
                stats_key,
                self.source.get_statistics("current_month")
            ),
        );
        spinner.finish_and_clear();

        let mut out = self.ctx.heading(&format!("Climate Dashboard ({})", date));
        out.push('\n');
        match stats {
            Ok(stats) => out.push_str(&view::render_stat_cards(&self.ctx, &stats)),
            Err(e) => out.push_str(&self.region_error("statistics", &e)),
        }
        out.push('\n');
        match map {
            Ok(map) => out.push_str(&view::render_map(&self.ctx, Variable::Temperature, &map)),
            Err(e) => out.push_str(&self.region_error("map", &e)),
        }
        Ok(out)
    }

    async fn series_page(&self, variable: Variable, args: &SeriesArgs) -> Result<String> {
        if !variable.supports_time_series() {
            return Err(AppError::UnsupportedVariable(variable.to_string()));
        }
        let (location, start, end) = args.range.resolve()?;
        let key = QueryKey::new("/api/timeseries")
            .param("location_id", &location)
            .param("variable", variable)
            .param("start", start)
            .param("end", end)
            .param("aggregation", args.aggregation);

        let spinner = self.spinner(&format!(
            "Loading {} for {}",
            variable.label().to_lowercase(),
            location_name(&location)
        ))?;
        let mut query = Query::new();
        let result = run_query(
            &mut query,
            key,
            self.source
                .get_time_series(&location, variable, start, end, args.aggregation),
        )
        .await;
        spinner.finish_and_clear();

        let series = result?;
        Ok(view::render_time_series(&self.ctx, variable, &series))
    }

    async fn map(&self, variable: Variable, date: YearMonth, level: u8) -> Result<String> {
        let key = QueryKey::new("/api/map-data")
            .param("variable", variable)
            .param("date", date)
            .param("level", level);
        let spinner = self.spinner("Loading map")?;
        let mut query = Query::new();
        let result = run_query(
            &mut query,
            key,
            self.source.get_map_data(variable, date, level),
        )
        .await;
        spinner.finish_and_clear();

        let map = result?;
        info!(
            "Map for {} {}: {} of {} regions coloured",
            variable,
            date,
            view::colored_feature_count(&map),
            map.features.len()
        );
        Ok(view::render_map(&self.ctx, variable, &map))
    }

    async fn forecast(&self, location: &str, variable: Variable, horizon: &str) -> Result<String> {
        let location = validate_location(location)?;
        let key = QueryKey::new("/api/forecast")
            .param("location_id", &location)
            .param("variable", variable)
            .param("horizon", horizon);
        let spinner = self.spinner("Loading forecast")?;
        let mut query = Query::new();
        let result = run_query(
            &mut query,
            key,
            self.source.get_forecast(&location, variable, horizon),
        )
        .await;
        spinner.finish_and_clear();

        Ok(view::render_forecast(&self.ctx, &result?))
    }

    async fn download(&self, args: &DownloadArgs) -> Result<String> {
        let (location, start, end) = args.range.resolve()?;
        let request = DownloadRequest {
            location: LocationRef::new(location),
            variables: args.variables.clone(),
            start_date: start,
            end_date: end,
            aggregation: args.aggregation,
            format: args.format,
        };
        let client = self.source.remote("download")?;

        let key = QueryKey::new("/api/download")
            .param("location", &request.location.id)
            .param("start_date", start)
            .param("end_date", end)
            .param("format", args.format.extension());
        let spinner = self.spinner("Preparing download")?;
        let mut query = Query::new();
        let result = run_query(&mut query, key, client.download_data(&request)).await;
        spinner.finish_and_clear();
        let payload = result?;

        let artifact = DownloadArtifact::from_payload(&payload, start, end)?;
        let dir = args
            .output
            .as_deref()
            .unwrap_or(self.config.download_dir.as_path());
        let path = artifact.write_to(dir).map_err(|e| AppError::Download(e.to_string()))?;

        let mut out = self.ctx.success(&format!(
            "Saved {} ({} bytes, {})",
            path.display(),
            artifact.contents.len(),
            artifact.mime
        ));
        if let DownloadPayload::Csv(text) = &payload {
            match csv_preview(text, 5) {
                Ok(rows) if !rows.is_empty() => {
                    let mut table = self.ctx.table();
                    table.set_header(vec!["Date", "Location", "Variable", "Value", "Units", "Aggregation"]);
                    for row in rows {
                        table.add_row(vec![
                            row.date,
                            row.location,
                            row.variable,
                            view::format_stat(row.value, 2),
                            row.units,
                            row.aggregation,
                        ]);
                    }
                    out.push('\n');
                    out.push_str(&table.to_string());
                },
                Ok(_) => {},
                Err(e) => warn!("Could not preview {}: {}", artifact.file_name, e),
            }
        }
        Ok(out)
    }

    /// Local calculator; no request is made.
    fn heat_index(
        &self,
        temperature: f64,
        humidity: f64,
        wind: Option<f64>,
        solar: Option<f64>,
    ) -> String {
        let assessment = assess(temperature, humidity);
        match assessment.risk {
            Some(HeatRisk::Danger | HeatRisk::Extreme) => warn!(
                "Heat index {:.1}°C is in the {} band",
                assessment.heat_index, assessment.risk.map_or("", |r| r.as_str())
            ),
            None => warn!(
                "Heat index undefined for {}°C at {}% humidity",
                temperature, humidity
            ),
            _ => {},
        }
        let mut out = view::render_heat_assessment(&self.ctx, temperature, humidity, &assessment);
        out.push('\n');
        out.push_str(&view::render_related_indices(
            &self.ctx,
            &related_indices(temperature, humidity, wind, solar),
        ));
        out.push('\n');
        out.push_str(&view::render_heat_legend(&self.ctx));
        out
    }

    async fn heat_stress(
        &self,
        location: &str,
        date: YearMonth,
        index: HeatIndexType,
    ) -> Result<String> {
        let location = validate_location(location)?;
        let client = self.source.remote("heat stress")?;
        let key = QueryKey::new("/api/indices/heat-stress")
            .param("location_id", &location)
            .param("date", date)
            .param("index_type", index);
        let spinner = self.spinner("Loading heat stress")?;
        let mut query = Query::new();
        let result = run_query(&mut query, key, client.get_heat_stress(&location, date, index)).await;
        spinner.finish_and_clear();

        let mut out = view::render_heat_stress(&self.ctx, &result?);
        out.push('\n');
        out.push_str(&view::render_heat_legend(&self.ctx));
        Ok(out)
    }

    async fn drought(
        &self,
        range: &RangeArgs,
        index: DroughtIndexType,
        timescale: u32,
    ) -> Result<String> {
        let (location, start, end) = range.resolve()?;
        let client = self.source.remote("drought index")?;
        let key = QueryKey::new("/api/indices/drought")
            .param("location_id", &location)
            .param("start_date", start)
            .param("end_date", end)
            .param("index_type", index)
            .param("timescale", timescale);
        let spinner = self.spinner("Loading drought index")?;
        let mut query = Query::new();
        let result = run_query(
            &mut query,
            key,
            client.get_drought_index(&location, start, end, index, timescale),
        )
        .await;
        spinner.finish_and_clear();

        Ok(view::render_drought(&self.ctx, &result?))
    }

    async fn extremes(
        &self,
        range: &RangeArgs,
        event_type: ExtremeEventType,
    ) -> Result<String> {
        let (location, start, end) = range.resolve()?;
        let client = self.source.remote("extreme events")?;
        let key = QueryKey::new("/api/indices/extreme-events")
            .param("location_id", &location)
            .param("start_date", start)
            .param("end_date", end)
            .param("event_type", event_type);
        let spinner = self.spinner("Loading extreme events")?;
        let mut query = Query::new();
        let result = run_query(
            &mut query,
            key,
            client.get_extreme_events(&location, start, end, event_type),
        )
        .await;
        spinner.finish_and_clear();

        Ok(view::render_extremes(&self.ctx, &result?))
    }

    async fn explore(
        &self,
        locations: &[String],
        variable: Variable,
        range: RangeArgs,
    ) -> Result<String> {
        let locations = if locations.is_empty() {
            LOCATIONS.iter().map(|(id, _)| id.to_string()).collect()
        } else {
            locations
                .iter()
                .map(|l| validate_location(l))
                .collect::<Result<Vec<_>>>()?
        };
        let (_, start, end) = range.resolve()?;
        let client = self.source.remote("region comparison")?;

        let key = QueryKey::new("/api/compare")
            .param("locations", locations.join(","))
            .param("variable", variable)
            .param("time_period", format!("{} to {}", start, end));
        let spinner = self.spinner("Comparing regions")?;
        let mut query = Query::new();
        let result = run_query(
            &mut query,
            key,
            client.compare_regions(&locations, variable, start, end),
        )
        .await;
        spinner.finish_and_clear();

        Ok(view::render_comparison(&self.ctx, &result?))
    }

    async fn stats(&self, period: &str) -> Result<String> {
        let key = QueryKey::new("/api/statistics").param("period", period);
        let mut query = Query::new();
        let stats = run_query(&mut query, key, self.source.get_statistics(period)).await?;
        Ok(view::render_stat_cards(&self.ctx, &stats))
    }

    async fn health(&self) -> Result<String> {
        let client = self.source.remote("health check")?;
        let mut query = Query::new();
        let health = run_query(&mut query, QueryKey::new("/health"), client.health()).await?;
        Ok(view::render_health(&self.ctx, client.base_url(), &health))
    }

    fn settings(&self) -> String {
        let c = &self.config;
        let mut table = self.ctx.table();
        table.set_header(vec!["Setting", "Value", "Variable"]);
        let source = if self.source.is_offline() {
            "demo data (offline)".to_string()
        } else {
            c.api_url.clone()
        };
        table.add_row(vec![
            "Data source".to_string(),
            source,
            "CLIMATE_API_URL / CLIMATE_OFFLINE".to_string(),
        ]);
        table.add_row(vec![
            "Request timeout".to_string(),
            format!("{}s", c.timeout.as_secs()),
            "CLIMATE_API_TIMEOUT_SECS".to_string(),
        ]);
        table.add_row(vec![
            "Theme".to_string(),
            c.theme.to_string(),
            "CLIMATE_THEME".to_string(),
        ]);
        table.add_row(vec![
            "Colour".to_string(),
            if c.colorize { "on" } else { "off" }.to_string(),
            "NO_COLOR".to_string(),
        ]);
        table.add_row(vec![
            "Download directory".to_string(),
            c.download_dir.display().to_string(),
            "CLIMATE_DOWNLOAD_DIR".to_string(),
        ]);
        table.add_row(vec![
            "Log file directory".to_string(),
            c.log_dir
                .as_ref()
                .map_or_else(|| "stderr".to_string(), |d| d.display().to_string()),
            "CLIMATE_LOG_DIR".to_string(),
        ]);
        table.add_row(vec![
            "Log format".to_string(),
            format!("{:?}", c.log_format).to_lowercase(),
            "CLIMATE_LOG_FORMAT".to_string(),
        ]);
        table.to_string()
    }

    fn about(&self) -> String {
        let mut out = self.ctx.heading(Route::Landing.title());
        out.push_str("\nTemperature, precipitation, heat stress, drought and extreme event data for ");
        out.push_str(
            &LOCATIONS
                .iter()
                .map(|(_, name)| *name)
                .collect::<Vec<_>>()
                .join(", "),
        );
        out.push_str(".\n\n");

        let mut table = self.ctx.table();
        table.set_header(vec!["Path", "Page"]);
        for (path, route) in ROUTES {
            table.add_row(vec![path.to_string(), route.title().to_string()]);
        }
        out.push_str(&table.to_string());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{parse_day, Aggregation, DownloadFormat};
    use crate::view::NO_DATA_MESSAGE;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn plain_config() -> AppConfig {
        AppConfig {
            colorize: false,
            ..AppConfig::default()
        }
    }

    fn demo_app() -> App {
        App::with_source(DataSource::Demo(DemoDataProvider::new()), plain_config())
    }

    fn remote_app(server: &Server) -> App {
        let client = ClimateClient::new(&server.url(), Duration::from_secs(5)).unwrap();
        App::with_source(DataSource::Remote(client), plain_config())
    }

    fn range(start: &str, end: &str) -> RangeArgs {
        RangeArgs::new("punjab", parse_day(start).unwrap(), parse_day(end).unwrap())
    }

    #[tokio::test]
    async fn test_run_query_settles() {
        let mut query: Query<u32> = Query::new();
        let value = run_query(&mut query, QueryKey::new("/test"), async { Ok(3) }).await;
        assert_eq!(value.unwrap(), 3);
        assert_eq!(query.key(), Some(&QueryKey::new("/test")));
        assert_eq!(query.state().data(), Some(&3));

        let err = run_query(&mut query, QueryKey::new("/test"), async {
            Err::<u32, _>(AppError::Cli("boom".to_string()))
        })
        .await;
        assert!(matches!(err, Err(AppError::Cli(_))));
        assert!(matches!(query.state().error(), Some(AppError::Cli(_))));
    }

    #[tokio::test]
    async fn test_demo_temperature_page() {
        let app = demo_app();
        let out = app
            .render(Commands::Temperature(SeriesArgs {
                range: range("2023-01-01", "2023-06-30"),
                aggregation: Aggregation::Monthly,
            }))
            .await
            .unwrap();
        assert!(out.contains("Temperature - punjab"));
        assert!(out.contains("Average:"));
        assert!(out.contains("2023-06"));
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected_before_dispatch() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/timeseries")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let app = remote_app(&server);
        let result = app
            .render(Commands::Precipitation(SeriesArgs {
                range: range("2023-06-30", "2023-01-01"),
                aggregation: Aggregation::Monthly,
            }))
            .await;
        assert!(matches!(result, Err(AppError::InvalidRange { .. })));
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_solar_time_series_is_rejected() {
        let app = demo_app();
        let result = app
            .render(Commands::TimeSeries {
                series: SeriesArgs::default(),
                variable: Variable::SolarRadiation,
            })
            .await;
        assert!(matches!(result, Err(AppError::UnsupportedVariable(_))));
    }

    #[tokio::test]
    async fn test_empty_series_renders_placeholder() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/timeseries")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"location": "punjab", "variable": "temperature", "data": []}).to_string())
            .create_async()
            .await;

        let out = remote_app(&server)
            .render(Commands::Temperature(SeriesArgs {
                range: range("2023-01-01", "2023-06-30"),
                aggregation: Aggregation::Monthly,
            }))
            .await
            .unwrap();
        assert!(out.contains(NO_DATA_MESSAGE));
    }

    #[tokio::test]
    async fn test_dashboard_keeps_map_when_statistics_fail() {
        let mut server = Server::new_async().await;
        let _map = server
            .mock("GET", "/api/map-data")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({"type": "FeatureCollection", "features": [{
                    "type": "Feature",
                    "geometry": null,
                    "properties": {"name": "Punjab", "climate_variable": "temperature", "climate_value": 27.5}
                }]})
                .to_string(),
            )
            .create_async()
            .await;
        let _stats = server
            .mock("GET", "/api/statistics")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let out = remote_app(&server)
            .render(Commands::Dashboard {
                date: Some(YearMonth::new(2024, 6).unwrap()),
            })
            .await
            .unwrap();
        assert!(out.contains("Could not load statistics"));
        assert!(out.contains("Punjab"));
        assert!(out.contains("27.50 °C"));
    }

    #[tokio::test]
    async fn test_offline_refuses_remote_only_pages() {
        let app = demo_app();
        let result = app.render(Commands::Download(DownloadArgs::default())).await;
        assert!(matches!(result, Err(AppError::Offline("download"))));
        let result = app.render(Commands::Health).await;
        assert!(matches!(result, Err(AppError::Offline(_))));
    }

    #[tokio::test]
    async fn test_download_writes_artifact() {
        let mut server = Server::new_async().await;
        let csv = "date,variable,value,location,aggregation,units\n\
                   2023-01-01,temperature,12.5,punjab,daily,°C\n";
        let _m = server
            .mock("POST", "/api/download")
            .with_status(200)
            .with_header("content-type", "text/csv")
            .with_body(csv)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let args = DownloadArgs {
            range: range("2023-01-01", "2023-01-31"),
            output: Some(dir.path().to_path_buf()),
            format: DownloadFormat::Csv,
            ..DownloadArgs::default()
        };
        let out = remote_app(&server).render(Commands::Download(args)).await.unwrap();

        let path = dir.path().join("climate_data_2023-01-01_2023-01-31.csv");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);
        assert!(out.contains("text/csv"));
        assert!(out.contains("12.50"));
    }

    #[tokio::test]
    async fn test_heat_index_page() {
        let out = demo_app()
            .render(Commands::HeatIndex {
                temperature: 35.0,
                humidity: 60.0,
                wind: Some(2.5),
                solar: Some(800.0),
            })
            .await
            .unwrap();
        assert!(out.contains("Risk: Danger"));
        assert!(out.contains("Extreme Danger"));
        assert!(out.contains("Wet Bulb Globe Temperature"));
    }

    #[tokio::test]
    async fn test_open_dispatches_through_routes() {
        let app = demo_app();
        let out = app
            .render(Commands::Open {
                path: "/about/".to_string(),
            })
            .await
            .unwrap();
        assert!(out.contains("/old-dashboard"));

        let result = app
            .render(Commands::Open {
                path: "/missing".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::Cli(_))));
    }

    #[tokio::test]
    async fn test_district_location_is_passed_through() {
        let out = demo_app()
            .render(Commands::Temperature(SeriesArgs {
                range: RangeArgs::new(
                    "Lahore",
                    parse_day("2024-01-01").unwrap(),
                    parse_day("2024-03-31").unwrap(),
                ),
                aggregation: Aggregation::Monthly,
            }))
            .await
            .unwrap();
        assert!(out.contains("lahore"));
    }

    #[tokio::test]
    async fn test_explore_validates_locations() {
        let result = demo_app()
            .render(Commands::Explore {
                locations: vec!["punjab".to_string(), "  ".to_string()],
                variable: Variable::Temperature,
                start: None,
                end: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::Cli(_))));
    }

    #[tokio::test]
    async fn test_settings_reports_offline_source() {
        let out = demo_app().render(Commands::Settings).await.unwrap();
        assert!(out.contains("demo data (offline)"));
        assert!(out.contains("CLIMATE_THEME"));
    }
}
