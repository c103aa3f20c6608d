use crate::error::{AppError, Result};
use crate::models::{
    parse_day, validate_range, Aggregation, DownloadFormat, DroughtIndexType, ExtremeEventType,
    HeatIndexType, Variable, YearMonth,
};
use crate::routes::Route;
use chrono::{Months, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::warn;

/// Provinces served by the portal: `(location id, display name)`.
pub const LOCATIONS: [(&str, &str); 4] = [
    ("punjab", "Punjab"),
    ("sindh", "Sindh"),
    ("kpk", "Khyber Pakhtunkhwa"),
    ("balochistan", "Balochistan"),
];

pub const DEFAULT_LOCATION: &str = "punjab";

/// Normalizes a location id. Ids outside `LOCATIONS` (districts, national) are passed
/// through to the backend; only a blank id is rejected.
pub fn validate_location(location: &str) -> Result<String> {
    let id = location.trim().to_lowercase();
    if id.is_empty() {
        return Err(AppError::Cli(format!(
            "Invalid location '{}'. Known provinces: {:?}",
            location,
            LOCATIONS.iter().map(|(id, _)| *id).collect::<Vec<_>>()
        )));
    }
    if !LOCATIONS.iter().any(|(known, _)| *known == id) {
        warn!("Location '{}' is not a known province; passing it through", id);
    }
    Ok(id)
}

pub fn location_name(id: &str) -> &str {
    LOCATIONS
        .iter()
        .find(|(known, _)| *known == id)
        .map(|(_, name)| *name)
        .unwrap_or(id)
}

/// Command line client for the climate information portal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides CLIMATE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Serve generated demo data instead of calling the backend
    #[arg(long, global = true)]
    pub offline: bool,

    /// Page to show. Starts the interactive menu when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Temperature map and headline statistics for a month
    Dashboard {
        /// Map period (YYYY-MM, default: current month)
        #[arg(long)]
        date: Option<YearMonth>,
    },

    /// Temperature time series for a province
    Temperature(SeriesArgs),

    /// Precipitation time series for a province
    Precipitation(SeriesArgs),

    /// Time series for any supported variable
    #[command(name = "timeseries")]
    TimeSeries {
        #[command(flatten)]
        series: SeriesArgs,

        #[arg(long, value_enum, default_value_t = Variable::Temperature)]
        variable: Variable,
    },

    /// Climate values by region, coloured by bucket
    Map {
        #[arg(long, value_enum, default_value_t = Variable::Temperature)]
        variable: Variable,

        /// Period (YYYY-MM, default: current month)
        #[arg(long)]
        date: Option<YearMonth>,

        /// Administrative level (0 national, 1 provinces, 2 districts)
        #[arg(long, default_value = "1")]
        level: u8,
    },

    /// Model forecast with confidence bounds
    Forecast {
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,

        #[arg(long, value_enum, default_value_t = Variable::Temperature)]
        variable: Variable,

        /// Forecast horizon understood by the backend
        #[arg(long, default_value = "monthly")]
        horizon: String,
    },

    /// Export data as a CSV or JSON file
    Download(DownloadArgs),

    /// Heat index from temperature and humidity, computed locally
    HeatIndex {
        /// Air temperature in °C
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,

        /// Relative humidity in %
        #[arg(short = 'r', long)]
        humidity: f64,

        /// Wind speed in m/s, for the wet bulb globe temperature
        #[arg(long)]
        wind: Option<f64>,

        /// Solar radiation in W/m², enables the wet bulb globe temperature
        #[arg(long)]
        solar: Option<f64>,
    },

    /// Backend heat stress index for a province and month
    HeatStress {
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,

        /// Period (YYYY-MM, default: current month)
        #[arg(long)]
        date: Option<YearMonth>,

        #[arg(long, value_enum, default_value_t = HeatIndexType::HeatIndex)]
        index: HeatIndexType,
    },

    /// Drought index series (SPI, SPEI, Palmer)
    Drought {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long, value_enum, default_value_t = DroughtIndexType::Spi)]
        index: DroughtIndexType,

        /// Accumulation period in months
        #[arg(long, default_value = "3")]
        timescale: u32,
    },

    /// Extreme event counts and return levels
    Extremes {
        #[command(flatten)]
        range: RangeArgs,

        #[arg(long = "event", value_enum, default_value_t = ExtremeEventType::Temperature)]
        event_type: ExtremeEventType,
    },

    /// Compare a variable across provinces
    Explore {
        /// Comma separated location ids (default: all provinces)
        #[arg(long, value_delimiter = ',')]
        locations: Vec<String>,

        #[arg(long, value_enum, default_value_t = Variable::Temperature)]
        variable: Variable,

        #[arg(long, value_parser = parse_day)]
        start: Option<NaiveDate>,

        #[arg(long, value_parser = parse_day)]
        end: Option<NaiveDate>,
    },

    /// Headline statistics for a period
    Stats {
        #[arg(long, default_value = "current_month")]
        period: String,
    },

    /// Backend health check
    Health,

    /// Show the active configuration
    Settings,

    /// About the portal and its pages
    About,

    /// Open a page by its portal path, e.g. `/heat-stress`
    Open {
        path: String,
    },
}

/// Location and date range shared by range-based pages.
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct RangeArgs {
    #[arg(short, long, default_value = DEFAULT_LOCATION)]
    pub location: String,

    /// First day (YYYY-MM-DD, default: twelve months ago)
    #[arg(long, value_parser = parse_day)]
    pub start: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD, default: today)
    #[arg(long, value_parser = parse_day)]
    pub end: Option<NaiveDate>,
}

impl RangeArgs {
    pub fn new(location: &str, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            location: location.to_string(),
            start: Some(start),
            end: Some(end),
        }
    }

    /// Validated `(location, start, end)`, filling in the default range.
    pub fn resolve(&self) -> Result<(String, NaiveDate, NaiveDate)> {
        let location = validate_location(if self.location.is_empty() {
            DEFAULT_LOCATION
        } else {
            &self.location
        })?;
        let (default_start, default_end) = default_range();
        let start = self.start.unwrap_or(default_start);
        let end = self.end.unwrap_or(default_end);
        validate_range(start, end)?;
        Ok((location, start, end))
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct SeriesArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    #[arg(long, value_enum, default_value_t = Aggregation::Monthly)]
    pub aggregation: Aggregation,
}

impl Default for SeriesArgs {
    fn default() -> Self {
        Self {
            range: RangeArgs::default(),
            aggregation: Aggregation::Monthly,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Comma separated variables
    #[arg(long, value_enum, value_delimiter = ',', default_value = "temperature")]
    pub variables: Vec<Variable>,

    #[arg(long, value_enum, default_value_t = Aggregation::Daily)]
    pub aggregation: Aggregation,

    #[arg(long, value_enum, default_value_t = DownloadFormat::Csv)]
    pub format: DownloadFormat,

    /// Directory to write into (overrides CLIMATE_DOWNLOAD_DIR)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl Default for DownloadArgs {
    fn default() -> Self {
        Self {
            range: RangeArgs::default(),
            variables: vec![Variable::Temperature],
            aggregation: Aggregation::Daily,
            format: DownloadFormat::Csv,
            output: None,
        }
    }
}

/// The last twelve months, ending today.
pub fn default_range() -> (NaiveDate, NaiveDate) {
    let end = Utc::now().date_naive();
    let start = end.checked_sub_months(Months::new(12)).unwrap_or(end);
    (start, end)
}

/// The command a route opens with its default filters.
pub fn command_for_route(route: Route) -> Commands {
    match route {
        Route::Landing | Route::About => Commands::About,
        Route::Dashboard | Route::LegacyDashboard => Commands::Dashboard { date: None },
        Route::Temperature => Commands::Temperature(SeriesArgs::default()),
        Route::Precipitation => Commands::Precipitation(SeriesArgs::default()),
        Route::HeatStress => Commands::HeatStress {
            location: DEFAULT_LOCATION.to_string(),
            date: None,
            index: HeatIndexType::HeatIndex,
        },
        Route::Drought => Commands::Drought {
            range: RangeArgs::default(),
            index: DroughtIndexType::Spi,
            timescale: 3,
        },
        Route::ExtremeEvents => Commands::Extremes {
            range: RangeArgs::default(),
            event_type: ExtremeEventType::Temperature,
        },
        Route::DataExplorer => Commands::Explore {
            locations: Vec::new(),
            variable: Variable::Temperature,
            start: None,
            end: None,
        },
        Route::Settings => Commands::Settings,
        Route::Map => Commands::Map {
            variable: Variable::Temperature,
            date: None,
            level: 1,
        },
        Route::TimeSeries => Commands::TimeSeries {
            series: SeriesArgs::default(),
            variable: Variable::Temperature,
        },
        Route::Forecast => Commands::Forecast {
            location: DEFAULT_LOCATION.to_string(),
            variable: Variable::Temperature,
            horizon: "monthly".to_string(),
        },
        Route::Download => Commands::Download(DownloadArgs::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("punjab", "punjab")]
    #[case(" Sindh ", "sindh")]
    #[case("KPK", "kpk")]
    fn test_validate_location(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(validate_location(input).unwrap(), expected);
    }

    #[test]
    fn test_validate_location_passes_unknown_ids_through() {
        assert_eq!(validate_location(" Lahore ").unwrap(), "lahore");
        assert_eq!(location_name("lahore"), "lahore");
        match validate_location("  ") {
            Err(AppError::Cli(msg)) => assert!(msg.contains("Invalid location")),
            other => panic!("Expected Cli error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_series_command() {
        let cli = Cli::try_parse_from([
            "climate-portal",
            "temperature",
            "--location",
            "sindh",
            "--start",
            "2023-01-01",
            "--end",
            "2023-06-30",
            "--aggregation",
            "daily",
        ])
        .unwrap();
        let Some(Commands::Temperature(args)) = cli.command else {
            panic!("Expected temperature command");
        };
        assert_eq!(args.aggregation, Aggregation::Daily);
        let (location, start, end) = args.range.resolve().unwrap();
        assert_eq!(location, "sindh");
        assert_eq!(start, parse_day("2023-01-01").unwrap());
        assert_eq!(end, parse_day("2023-06-30").unwrap());
    }

    #[test]
    fn test_parse_rejects_malformed_date() {
        let result = Cli::try_parse_from(["climate-portal", "drought", "--start", "01/02/2023"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_global_flags_and_lists() {
        let cli = Cli::try_parse_from([
            "climate-portal",
            "download",
            "--variables",
            "temperature,humidity",
            "--format",
            "json",
            "--offline",
            "--api-url",
            "http://backend:8000",
        ])
        .unwrap();
        assert!(cli.offline);
        assert_eq!(cli.api_url.as_deref(), Some("http://backend:8000"));
        let Some(Commands::Download(args)) = cli.command else {
            panic!("Expected download command");
        };
        assert_eq!(args.variables, vec![Variable::Temperature, Variable::Humidity]);
        assert_eq!(args.format, DownloadFormat::Json);
    }

    #[test]
    fn test_parse_heat_index_negative_temperature() {
        let cli =
            Cli::try_parse_from(["climate-portal", "heat-index", "-t", "-5", "-r", "40"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::HeatIndex {
                temperature: -5.0,
                humidity: 40.0,
                wind: None,
                solar: None,
            })
        );
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["climate-portal"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_resolve_rejects_inverted_range() {
        let args = RangeArgs::new(
            "punjab",
            parse_day("2023-06-30").unwrap(),
            parse_day("2023-01-01").unwrap(),
        );
        assert!(matches!(args.resolve(), Err(AppError::InvalidRange { .. })));
    }

    #[test]
    fn test_default_range_spans_twelve_months() {
        let (start, end) = default_range();
        assert!(start < end);
        assert!((end - start).num_days() >= 365);
    }

    #[test]
    fn test_routes_open_their_pages() {
        assert_eq!(command_for_route(Route::LegacyDashboard), Commands::Dashboard { date: None });
        assert!(matches!(command_for_route(Route::Download), Commands::Download(_)));
        assert_eq!(command_for_route(Route::Landing), Commands::About);
    }
}
