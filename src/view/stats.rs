use super::RenderContext;
use crate::models::{HealthResponse, StatisticsResponse};

/// Placeholder shown for statistics the backend did not report.
pub const MISSING: &str = "--";

pub fn format_stat(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", precision, v),
        _ => MISSING.to_string(),
    }
}

/// Dashboard stat cards: `(label, formatted value, unit)`.
pub fn stat_cards(stats: &StatisticsResponse) -> [(&'static str, String, &'static str); 4] {
    [
        ("Avg Temperature", format_stat(stats.avg_temperature, 1), "°C"),
        ("Total Precipitation", format_stat(stats.total_precipitation, 0), "mm"),
        ("Avg Wind Speed", format_stat(stats.avg_wind_speed, 1), "m/s"),
        ("Avg Solar Radiation", format_stat(stats.avg_solar, 0), "W/m²"),
    ]
}

pub fn render_stat_cards(ctx: &RenderContext, stats: &StatisticsResponse) -> String {
    let mut table = ctx.table();
    let cards = stat_cards(stats);
    table.set_header(cards.iter().map(|(label, _, _)| *label).collect::<Vec<_>>());
    table.add_row(
        cards
            .iter()
            .map(|(_, value, unit)| {
                if value == MISSING {
                    value.clone()
                } else {
                    format!("{} {}", value, unit)
                }
            })
            .collect::<Vec<_>>(),
    );

    let mut out = String::new();
    if let Some(period) = &stats.period {
        out.push_str(&ctx.muted(&format!("Period: {}", period)));
        out.push('\n');
    }
    out.push_str(&table.to_string());
    out
}

pub fn render_health(ctx: &RenderContext, base_url: &str, health: &HealthResponse) -> String {
    let flag = |ok: bool| if ok { ctx.success("yes") } else { ctx.error("no") };
    let status = if health.status == "healthy" {
        ctx.success(&health.status)
    } else {
        ctx.error(&health.status)
    };

    let mut out = format!("Backend {}: {}\n", base_url, status);
    out.push_str(&format!("Earth Engine initialised: {}\n", flag(health.gee_initialized)));
    out.push_str(&format!("Cache connected: {}", flag(health.redis_connected)));
    if let Some(version) = &health.version {
        out.push_str(&format!("\nVersion: {}", version));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(28.46), 1, "28.5")]
    #[case(Some(24.1), 2, "24.10")]
    #[case(Some(812.4), 0, "812")]
    #[case(None, 2, "--")]
    #[case(Some(f64::NAN), 1, "--")]
    fn test_format_stat(#[case] value: Option<f64>, #[case] precision: usize, #[case] expected: &str) {
        assert_eq!(format_stat(value, precision), expected);
    }

    #[test]
    fn test_stat_cards_keep_missing_fields_as_placeholders() {
        let stats = StatisticsResponse {
            avg_temperature: Some(28.5),
            avg_wind_speed: Some(5.0),
            ..Default::default()
        };
        let cards = stat_cards(&stats);
        assert_eq!(cards[1].1, MISSING);
        assert_eq!(cards[3].1, MISSING);

        let out = render_stat_cards(&RenderContext::plain(), &stats);
        assert!(out.contains("28.5 °C"));
        assert!(out.contains("5.0 m/s"));
        assert!(!out.contains(" mm"));
    }

    #[test]
    fn test_render_health() {
        let health = HealthResponse {
            status: "healthy".to_string(),
            gee_initialized: true,
            redis_connected: false,
            version: Some("1.0.0".to_string()),
        };
        let out = render_health(&RenderContext::plain(), "http://localhost:8000", &health);
        assert!(out.starts_with("Backend http://localhost:8000: healthy"));
        assert!(out.contains("Cache connected: no"));
        assert!(out.ends_with("Version: 1.0.0"));
    }
}
