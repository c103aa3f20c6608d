//! Maps portal paths to pages.

use crate::error::{AppError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Dashboard,
    Temperature,
    Precipitation,
    HeatStress,
    Drought,
    ExtremeEvents,
    DataExplorer,
    Settings,
    LegacyDashboard,
    Map,
    TimeSeries,
    Forecast,
    Download,
    About,
}

/// Path table. Several paths may lead to the same route.
pub const ROUTES: &[(&str, Route)] = &[
    ("/", Route::Landing),
    ("/main-dashboard", Route::Dashboard),
    ("/dashboard", Route::Dashboard),
    ("/temperature", Route::Temperature),
    ("/precipitation", Route::Precipitation),
    ("/heat-stress", Route::HeatStress),
    ("/drought", Route::Drought),
    ("/extreme-events", Route::ExtremeEvents),
    ("/data-explorer", Route::DataExplorer),
    ("/settings", Route::Settings),
    ("/old-dashboard", Route::LegacyDashboard),
    ("/map", Route::Map),
    ("/timeseries", Route::TimeSeries),
    ("/forecast", Route::Forecast),
    ("/download", Route::Download),
    ("/about", Route::About),
];

impl Route {
    /// Resolves a path. A query string and one trailing slash are ignored.
    pub fn from_path(path: &str) -> Result<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default().trim();
        let normalized = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        let normalized = if normalized.is_empty() { "/" } else { normalized };

        ROUTES
            .iter()
            .find(|(candidate, _)| *candidate == normalized)
            .map(|(_, route)| *route)
            .ok_or_else(|| AppError::Cli(format!("No page at '{}'", path)))
    }

    /// Canonical path (the first table entry for this route).
    pub fn path(&self) -> &'static str {
        ROUTES
            .iter()
            .find(|(_, route)| route == self)
            .map(|(path, _)| *path)
            .unwrap_or("/")
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Climate Information Portal",
            Route::Dashboard => "Dashboard",
            Route::Temperature => "Temperature Analysis",
            Route::Precipitation => "Precipitation Analysis",
            Route::HeatStress => "Heat Stress",
            Route::Drought => "Drought Indices",
            Route::ExtremeEvents => "Extreme Events",
            Route::DataExplorer => "Data Explorer",
            Route::Settings => "Settings",
            Route::LegacyDashboard => "Dashboard (classic)",
            Route::Map => "Interactive Climate Map",
            Route::TimeSeries => "Time Series Analysis",
            Route::Forecast => "Climate Forecast",
            Route::Download => "Download Climate Data",
            Route::About => "About",
        }
    }

    /// Pages offered in the interactive menu, in display order.
    pub const MENU: [Route; 13] = [
        Route::Dashboard,
        Route::Temperature,
        Route::Precipitation,
        Route::HeatStress,
        Route::Drought,
        Route::ExtremeEvents,
        Route::Map,
        Route::TimeSeries,
        Route::Forecast,
        Route::DataExplorer,
        Route::Download,
        Route::Settings,
        Route::About,
    ];
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/", Route::Landing)]
    #[case("", Route::Landing)]
    #[case("/dashboard", Route::Dashboard)]
    #[case("/main-dashboard", Route::Dashboard)]
    #[case("/heat-stress/", Route::HeatStress)]
    #[case("/map?variable=temperature", Route::Map)]
    #[case("/old-dashboard", Route::LegacyDashboard)]
    fn test_from_path(#[case] path: &str, #[case] expected: Route) {
        assert_eq!(Route::from_path(path).unwrap(), expected);
    }

    #[test]
    fn test_unknown_path() {
        assert!(matches!(Route::from_path("/nope"), Err(AppError::Cli(_))));
    }

    #[test]
    fn test_every_route_round_trips_through_its_path() {
        for (_, route) in ROUTES {
            assert_eq!(Route::from_path(route.path()).unwrap(), *route);
        }
        assert_eq!(Route::Dashboard.path(), "/main-dashboard");
    }
}
