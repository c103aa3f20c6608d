use super::{format_stat, RenderContext};
use crate::models::{CompareResponse, ForecastResponse, SeriesSummary, TimeSeriesResponse, Variable};
use comfy_table::{Cell, CellAlignment};

pub const NO_DATA_MESSAGE: &str = "No data available for the selected period";

/// Rows shown before a table is truncated.
pub const MAX_TABLE_ROWS: usize = 20;

const SPARK_BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Average, minimum and maximum, each to 2 decimals. `--` for an empty series.
pub fn summary_cards(summary: Option<&SeriesSummary>) -> [(&'static str, String); 3] {
    [
        ("Average", format_stat(summary.map(|s| s.mean), 2)),
        ("Minimum", format_stat(summary.map(|s| s.min), 2)),
        ("Maximum", format_stat(summary.map(|s| s.max), 2)),
    ]
}

/// One bar per value, scaled between the series minimum and maximum.
pub fn sparkline(values: &[f64]) -> String {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    let Some(summary) = SeriesSummary::from_values(&finite) else {
        return String::new();
    };
    let span = summary.max - summary.min;

    values
        .iter()
        .map(|v| {
            if !v.is_finite() {
                return ' ';
            }
            if span == 0.0 {
                return SPARK_BARS[SPARK_BARS.len() / 2];
            }
            let idx = ((v - summary.min) / span * (SPARK_BARS.len() - 1) as f64).round() as usize;
            SPARK_BARS[idx.min(SPARK_BARS.len() - 1)]
        })
        .collect()
}

pub fn render_time_series(
    ctx: &RenderContext,
    variable: Variable,
    series: &TimeSeriesResponse,
) -> String {
    let mut out = String::new();
    out.push_str(&ctx.heading(&format!("{} - {}", variable.label(), series.location)));
    out.push('\n');

    if series.is_empty() {
        out.push_str(&ctx.muted(NO_DATA_MESSAGE));
        return out;
    }

    let summary = series.summary();
    let cards = summary_cards(summary.as_ref())
        .iter()
        .map(|(label, value)| format!("{}: {} {}", label, ctx.accent(value), variable.unit()))
        .collect::<Vec<_>>()
        .join("   ");
    out.push_str(&cards);
    out.push('\n');
    out.push_str(&ctx.accent(&sparkline(&series.values())));
    out.push('\n');

    let mut table = ctx.table();
    table.set_header(vec!["Date".to_string(), format!("{} ({})", variable.label(), variable.unit())]);
    for point in series.data.iter().take(MAX_TABLE_ROWS) {
        table.add_row(vec![
            Cell::new(&point.date),
            Cell::new(format!("{:.2}", point.value)).set_alignment(CellAlignment::Right),
        ]);
    }
    out.push_str(&table.to_string());
    if series.data.len() > MAX_TABLE_ROWS {
        out.push('\n');
        out.push_str(&ctx.muted(&format!(
            "... and {} more (showing first {} only)",
            series.data.len() - MAX_TABLE_ROWS,
            MAX_TABLE_ROWS
        )));
    }
    out
}

pub fn render_forecast(ctx: &RenderContext, forecast: &ForecastResponse) -> String {
    let mut out = String::new();
    let title = match (&forecast.location, &forecast.variable) {
        (Some(location), Some(variable)) => format!("Forecast - {} ({})", location, variable),
        _ => "Forecast".to_string(),
    };
    out.push_str(&ctx.heading(&title));
    out.push('\n');

    if forecast.forecast.is_empty() {
        out.push_str(&ctx.muted("No forecast points returned"));
        return out;
    }

    let mut table = ctx.table();
    table.set_header(vec!["Date", "Value", "Lower", "Upper"]);
    for point in &forecast.forecast {
        table.add_row(vec![
            Cell::new(&point.date),
            Cell::new(format!("{:.2}", point.value)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", point.lower_bound)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", point.upper_bound)).set_alignment(CellAlignment::Right),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');

    let info = &forecast.model_info;
    out.push_str(&format!("Model: {} ({})", ctx.accent(&info.model_type), info.description));
    if let Some(features) = info.features.as_ref().filter(|f| !f.is_empty()) {
        out.push_str(&format!("\nFeatures: {}", features.join(", ")));
    }
    if let (Some(trees), Some(depth)) = (info.n_estimators, info.max_depth) {
        out.push_str(&format!("\nEstimators: {}, max depth: {}", trees, depth));
    }
    out
}

pub fn render_comparison(ctx: &RenderContext, comparison: &CompareResponse) -> String {
    let mut out = String::new();
    out.push_str(&ctx.heading(&format!(
        "{} comparison ({})",
        comparison.variable, comparison.time_period
    )));
    out.push('\n');

    if comparison.comparison.is_empty() {
        out.push_str(&ctx.muted(NO_DATA_MESSAGE));
        return out;
    }

    let mut table = ctx.table();
    table.set_header(vec!["Region", "Mean", "Min", "Max", "Trend"]);
    for region in &comparison.comparison {
        let values: Vec<f64> = region.timeseries.iter().map(|p| p.value).collect();
        table.add_row(vec![
            Cell::new(&region.location),
            Cell::new(format!("{:.2}", region.mean)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", region.min)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", region.max)).set_alignment(CellAlignment::Right),
            Cell::new(sparkline(&values)),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastPoint, ModelInfo, TimeSeriesPoint};

    fn series(values: &[f64]) -> TimeSeriesResponse {
        TimeSeriesResponse {
            location: "punjab".to_string(),
            variable: "temperature".to_string(),
            data: values
                .iter()
                .enumerate()
                .map(|(i, v)| TimeSeriesPoint {
                    date: format!("2023-{:02}", i + 1),
                    value: *v,
                })
                .collect(),
            aggregation: Some("monthly".to_string()),
        }
    }

    #[test]
    fn test_summary_cards_two_decimals() {
        let s = series(&[12.5, 15.2, 21.0, 28.4, 33.1, 34.4]);
        let cards = summary_cards(s.summary().as_ref());
        assert_eq!(cards[0], ("Average", "24.10".to_string()));
        assert_eq!(cards[1], ("Minimum", "12.50".to_string()));
        assert_eq!(cards[2], ("Maximum", "34.40".to_string()));
    }

    #[test]
    fn test_summary_cards_empty() {
        for (_, value) in summary_cards(None) {
            assert_eq!(value, "--");
        }
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[0.0, 7.0]), "▁█");
        assert_eq!(sparkline(&[5.0, 5.0, 5.0]), "▅▅▅");
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[1.0, f64::NAN, 2.0]).chars().count(), 3);
    }

    #[test]
    fn test_render_empty_series() {
        let out = render_time_series(&RenderContext::plain(), Variable::Temperature, &series(&[]));
        assert!(out.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_render_series_truncates_long_tables() {
        let values: Vec<f64> = (0..25).map(f64::from).collect();
        let out = render_time_series(&RenderContext::plain(), Variable::Temperature, &series(&values));
        assert!(out.contains("Average: 12.00 °C"));
        assert!(out.contains("... and 5 more (showing first 20 only)"));
    }

    #[test]
    fn test_render_forecast() {
        let forecast = ForecastResponse {
            location: Some("sindh".to_string()),
            variable: Some("temperature".to_string()),
            forecast: vec![ForecastPoint {
                date: "2024-07".to_string(),
                value: 35.2,
                lower_bound: 33.0,
                upper_bound: 37.4,
            }],
            model_info: ModelInfo {
                model_type: "Random Forest".to_string(),
                description: "Seasonal regression".to_string(),
                trained: Some(true),
                features: Some(vec!["month".to_string(), "lag_1".to_string()]),
                n_estimators: Some(100),
                max_depth: Some(10),
            },
        };
        let out = render_forecast(&RenderContext::plain(), &forecast);
        assert!(out.contains("Forecast - sindh (temperature)"));
        assert!(out.contains("37.40"));
        assert!(out.contains("Features: month, lag_1"));
        assert!(out.contains("Estimators: 100, max depth: 10"));
    }
}
