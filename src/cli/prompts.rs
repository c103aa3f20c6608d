//! Interactive filter prompts used by the menu loop.

use super::commands::{
    default_range, Commands, DownloadArgs, RangeArgs, SeriesArgs, DEFAULT_LOCATION,
    LOCATIONS,
};
use crate::error::Result;
use crate::models::{
    parse_day, validate_range, Aggregation, DownloadFormat, DroughtIndexType, ExtremeEventType,
    HeatIndexType, Variable, YearMonth, DAY_FORMAT,
};
use crate::routes::Route;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};

/// Menu entries beyond the route pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Page(Route),
    HeatIndexCalculator,
    OpenPath,
    Exit,
}

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Page(route) => route.title(),
            MenuEntry::HeatIndexCalculator => "Heat Index Calculator",
            MenuEntry::OpenPath => "Open a page by path",
            MenuEntry::Exit => "Exit",
        }
    }
}

pub fn menu_entries() -> Vec<MenuEntry> {
    let mut entries: Vec<MenuEntry> = Route::MENU.iter().copied().map(MenuEntry::Page).collect();
    let heat_stress = entries
        .iter()
        .position(|e| *e == MenuEntry::Page(Route::HeatStress))
        .map_or(entries.len(), |i| i + 1);
    entries.insert(heat_stress, MenuEntry::HeatIndexCalculator);
    entries.push(MenuEntry::OpenPath);
    entries.push(MenuEntry::Exit);
    entries
}

/// Shows the main menu. Cancelling (Esc, Ctrl+C) selects `Exit`.
pub fn prompt_menu() -> Result<MenuEntry> {
    let entries = menu_entries();
    let labels: Vec<&str> = entries.iter().map(MenuEntry::label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Which page would you like to open?")
        .items(&labels)
        .default(0)
        .interact_opt()?;
    Ok(selection
        .and_then(|i| entries.get(i).copied())
        .unwrap_or(MenuEntry::Exit))
}

pub fn prompt_location() -> Result<String> {
    let names: Vec<&str> = LOCATIONS.iter().map(|(_, name)| *name).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Province")
        .items(&names)
        .default(0)
        .interact()?;
    Ok(LOCATIONS
        .get(selection)
        .map_or(DEFAULT_LOCATION, |(id, _)| *id)
        .to_string())
}

pub fn prompt_locations() -> Result<Vec<String>> {
    let names: Vec<&str> = LOCATIONS.iter().map(|(_, name)| *name).collect();
    let defaults = vec![true; names.len()];
    let selected = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Provinces to compare (space to toggle)")
        .items(&names)
        .defaults(&defaults)
        .interact()?;
    Ok(selected
        .into_iter()
        .filter_map(|i| LOCATIONS.get(i).map(|(id, _)| id.to_string()))
        .collect())
}

/// Picks a variable. Time series pages only offer variables the backend serves
/// as series.
pub fn prompt_variable(time_series_only: bool) -> Result<Variable> {
    let variables: Vec<Variable> = Variable::ALL
        .into_iter()
        .filter(|v| !time_series_only || v.supports_time_series())
        .collect();
    let labels: Vec<&str> = variables.iter().map(Variable::label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Variable")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(variables.get(selection).copied().unwrap_or(Variable::Temperature))
}

pub fn prompt_variables() -> Result<Vec<Variable>> {
    let variables: Vec<Variable> = Variable::ALL
        .into_iter()
        .filter(Variable::supports_time_series)
        .collect();
    let labels: Vec<&str> = variables.iter().map(Variable::label).collect();
    let mut defaults = vec![false; variables.len()];
    defaults[0] = true;
    let selected = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Variables (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;
    Ok(selected.into_iter().filter_map(|i| variables.get(i).copied()).collect())
}

pub fn prompt_aggregation(default: Aggregation) -> Result<Aggregation> {
    const CHOICES: [Aggregation; 5] = [
        Aggregation::Hourly,
        Aggregation::Daily,
        Aggregation::Monthly,
        Aggregation::Seasonal,
        Aggregation::Annual,
    ];
    let labels: Vec<&str> = CHOICES.iter().map(Aggregation::as_str).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Aggregation")
        .items(&labels)
        .default(CHOICES.iter().position(|a| *a == default).unwrap_or(0))
        .interact()?;
    Ok(CHOICES.get(selection).copied().unwrap_or(default))
}

fn prompt_day(prompt: &str, default: NaiveDate) -> Result<NaiveDate> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default.format(DAY_FORMAT).to_string())
        .validate_with(|input: &String| parse_day(input).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()?;
    parse_day(&input)
}

/// Prompts for start and end dates, re-asking until the range is ordered.
pub fn prompt_range() -> Result<(NaiveDate, NaiveDate)> {
    let (default_start, default_end) = default_range();
    loop {
        let start = prompt_day("Start date (YYYY-MM-DD)", default_start)?;
        let end = prompt_day("End date (YYYY-MM-DD)", default_end)?;
        match validate_range(start, end) {
            Ok(()) => return Ok((start, end)),
            Err(e) => println!("{}", e),
        }
    }
}

pub fn prompt_year_month() -> Result<YearMonth> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Month (YYYY-MM)")
        .default(YearMonth::current().to_string())
        .validate_with(|input: &String| {
            input
                .parse::<YearMonth>()
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()?;
    input.parse()
}

pub fn prompt_f64(prompt: &str, default: f64) -> Result<f64> {
    let value: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact_text()?;
    Ok(value)
}

fn prompt_range_args() -> Result<RangeArgs> {
    let location = prompt_location()?;
    let (start, end) = prompt_range()?;
    Ok(RangeArgs::new(&location, start, end))
}

fn prompt_choice<T: Copy>(prompt: &str, choices: &[(T, &str)]) -> Result<T> {
    let labels: Vec<&str> = choices.iter().map(|(_, label)| *label).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(choices.get(selection).unwrap_or(&choices[0]).0)
}

/// Collects filters for a menu entry. `None` means leave the menu.
pub fn prompt_command(entry: MenuEntry) -> Result<Option<Commands>> {
    let command = match entry {
        MenuEntry::Exit => return Ok(None),
        MenuEntry::OpenPath => {
            let path: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Path")
                .default("/".to_string())
                .interact_text()?;
            Commands::Open { path }
        },
        MenuEntry::HeatIndexCalculator => Commands::HeatIndex {
            temperature: prompt_f64("Temperature (°C)", 35.0)?,
            humidity: prompt_f64("Relative humidity (%)", 60.0)?,
            wind: None,
            solar: None,
        },
        MenuEntry::Page(route) => match route {
            Route::Landing | Route::About => Commands::About,
            Route::Settings => Commands::Settings,
            Route::Dashboard | Route::LegacyDashboard => Commands::Dashboard {
                date: Some(prompt_year_month()?),
            },
            Route::Temperature => Commands::Temperature(SeriesArgs {
                range: prompt_range_args()?,
                aggregation: prompt_aggregation(Aggregation::Monthly)?,
            }),
            Route::Precipitation => Commands::Precipitation(SeriesArgs {
                range: prompt_range_args()?,
                aggregation: prompt_aggregation(Aggregation::Monthly)?,
            }),
            Route::TimeSeries => {
                let variable = prompt_variable(true)?;
                Commands::TimeSeries {
                    series: SeriesArgs {
                        range: prompt_range_args()?,
                        aggregation: prompt_aggregation(Aggregation::Monthly)?,
                    },
                    variable,
                }
            },
            Route::Map => Commands::Map {
                variable: prompt_variable(false)?,
                date: Some(prompt_year_month()?),
                level: 1,
            },
            Route::Forecast => Commands::Forecast {
                location: prompt_location()?,
                variable: prompt_variable(true)?,
                horizon: "monthly".to_string(),
            },
            Route::HeatStress => Commands::HeatStress {
                location: prompt_location()?,
                date: Some(prompt_year_month()?),
                index: prompt_choice(
                    "Index",
                    &[
                        (HeatIndexType::HeatIndex, "Heat Index"),
                        (HeatIndexType::Wbgt, "Wet Bulb Globe Temperature"),
                        (HeatIndexType::Humidex, "Humidex"),
                    ],
                )?,
            },
            Route::Drought => Commands::Drought {
                range: prompt_range_args()?,
                index: prompt_choice(
                    "Index",
                    &[
                        (DroughtIndexType::Spi, "SPI"),
                        (DroughtIndexType::Spei, "SPEI"),
                        (DroughtIndexType::PalmerDrought, "Palmer Drought Index"),
                    ],
                )?,
                timescale: prompt_choice(
                    "Timescale",
                    &[(1, "1 month"), (3, "3 months"), (6, "6 months"), (12, "12 months")],
                )?,
            },
            Route::ExtremeEvents => Commands::Extremes {
                range: prompt_range_args()?,
                event_type: prompt_choice(
                    "Event type",
                    &[
                        (ExtremeEventType::Temperature, "Temperature"),
                        (ExtremeEventType::Precipitation, "Precipitation"),
                        (ExtremeEventType::WindSpeed, "Wind Speed"),
                    ],
                )?,
            },
            Route::DataExplorer => {
                let locations = prompt_locations()?;
                let variable = prompt_variable(true)?;
                let (start, end) = prompt_range()?;
                Commands::Explore {
                    locations,
                    variable,
                    start: Some(start),
                    end: Some(end),
                }
            },
            Route::Download => {
                Commands::Download(DownloadArgs {
                    range: prompt_range_args()?,
                    variables: prompt_variables()?,
                    aggregation: prompt_aggregation(Aggregation::Daily)?,
                    format: prompt_choice(
                        "Format",
                        &[(DownloadFormat::Csv, "CSV"), (DownloadFormat::Json, "JSON")],
                    )?,
                    output: None,
                })
            },
        },
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_entries() {
        let entries = menu_entries();
        assert_eq!(entries.last(), Some(&MenuEntry::Exit));
        let heat = entries
            .iter()
            .position(|e| *e == MenuEntry::Page(Route::HeatStress))
            .unwrap();
        assert_eq!(entries[heat + 1], MenuEntry::HeatIndexCalculator);
        assert_eq!(entries.len(), Route::MENU.len() + 3);
    }

    #[test]
    fn test_exit_needs_no_input() {
        assert_eq!(prompt_command(MenuEntry::Exit).unwrap(), None);
    }
}
