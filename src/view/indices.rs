//! Heat, drought and extreme-event panels.

use super::{format_stat, RenderContext, MAX_TABLE_ROWS};
use crate::indices::{DroughtSeverity, HeatAssessment, HeatRisk, RelatedIndices};
use crate::models::{DroughtResponse, ExtremeEventsResponse, HeatStressResponse};
use colored::Color;
use comfy_table::{Cell, CellAlignment};

fn risk_color(risk: HeatRisk) -> Color {
    match risk {
        HeatRisk::Normal => Color::Green,
        HeatRisk::Caution => Color::Yellow,
        HeatRisk::ExtremeCaution => Color::TrueColor { r: 0xf9, g: 0x73, b: 0x16 },
        HeatRisk::Danger => Color::Red,
        HeatRisk::Extreme => Color::TrueColor { r: 0x99, g: 0x1b, b: 0x1b },
    }
}

/// Calculator output. A non-finite index is shown as "undefined" with no category.
pub fn render_heat_assessment(
    ctx: &RenderContext,
    temperature_c: f64,
    relative_humidity: f64,
    assessment: &HeatAssessment,
) -> String {
    let mut out = format!(
        "Temperature {:.1}°C, relative humidity {:.0}%\n",
        temperature_c, relative_humidity
    );
    match assessment.risk {
        Some(risk) => {
            out.push_str(&format!(
                "Heat index: {}\n",
                ctx.accent(&format!("{:.1}°C", assessment.heat_index))
            ));
            out.push_str(&format!(
                "Risk: {} ({})",
                ctx.paint(risk.label(), risk_color(risk)),
                risk.description()
            ));
        },
        None => out.push_str(&format!("Heat index: {}", ctx.muted("undefined"))),
    }
    out
}

/// Values are shown as "undefined" when the inputs fall outside a formula's domain.
pub fn render_related_indices(ctx: &RenderContext, related: &RelatedIndices) -> String {
    let show = |v: f64| {
        if v.is_finite() {
            format!("{:.1}°C", v)
        } else {
            "undefined".to_string()
        }
    };
    let mut table = ctx.table();
    table.set_header(vec!["Index", "Value"]);
    table.add_row(vec!["NOAA Heat Index".to_string(), show(related.noaa_heat_index)]);
    table.add_row(vec!["Dew Point".to_string(), show(related.dew_point)]);
    table.add_row(vec!["Humidex".to_string(), show(related.humidex)]);
    if let Some(wbgt) = related.wbgt {
        table.add_row(vec!["Wet Bulb Globe Temperature".to_string(), show(wbgt)]);
    }
    table.to_string()
}

pub fn render_heat_legend(ctx: &RenderContext) -> String {
    let mut table = ctx.table();
    table.set_header(vec!["Category", "Heat index", "Effect"]);
    for risk in HeatRisk::LEGEND {
        table.add_row(vec![
            ctx.paint(risk.label(), risk_color(risk)),
            risk.range().to_string(),
            risk.description().to_string(),
        ]);
    }
    table.to_string()
}

pub fn render_heat_stress(ctx: &RenderContext, response: &HeatStressResponse) -> String {
    let mut out = ctx.heading(&format!(
        "{} for {} ({})",
        response.index_type.label(),
        response.location,
        response.date
    ));
    out.push('\n');
    out.push_str(&format!(
        "Value: {}   Level: {}\n",
        ctx.accent(&format!("{:.1}°C", response.value)),
        response.classification.level
    ));
    if let Some(caution) = &response.classification.caution {
        out.push_str(&format!("{}\n", caution));
    }

    let inputs = &response.inputs;
    out.push_str(&ctx.muted(&format!(
        "Inputs: {:.1}°C, {:.0}% RH, wind {} m/s, solar {} W/m²",
        inputs.temperature,
        inputs.humidity,
        format_stat(inputs.wind_speed, 1),
        format_stat(inputs.solar_radiation, 0)
    )));
    out
}

pub fn render_drought(ctx: &RenderContext, response: &DroughtResponse) -> String {
    let mut out = ctx.heading(&format!(
        "{} ({}-month) for {}, {} to {}",
        response.index_type.label(),
        response.timescale,
        response.location,
        response.start_date,
        response.end_date
    ));
    out.push('\n');

    // Older backends leave the severity out; classify locally when a value is present.
    let severity = match (response.current_severity, response.current_value) {
        (DroughtSeverity::Unknown, Some(value)) => DroughtSeverity::from_index(value),
        (severity, _) => severity,
    };
    let painted = if severity.is_drought() {
        ctx.error(severity.label())
    } else {
        ctx.accent(severity.label())
    };
    out.push_str(&format!(
        "Current: {} ({})\n",
        format_stat(response.current_value, 2),
        painted
    ));

    let mut table = ctx.table();
    table.set_header(vec!["Date", "Index", "Severity"]);
    for point in response.timeseries.iter().rev().take(MAX_TABLE_ROWS) {
        table.add_row(vec![
            Cell::new(&point.date),
            Cell::new(format!("{:.2}", point.value)).set_alignment(CellAlignment::Right),
            Cell::new(point.severity.label()),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

pub fn render_extremes(ctx: &RenderContext, response: &ExtremeEventsResponse) -> String {
    let mut out = ctx.heading(&format!(
        "Extreme {} events for {}, {} to {} ({} days)",
        response.event_type, response.location, response.start_date, response.end_date, response.total_days
    ));
    out.push('\n');

    let mut events = ctx.table();
    events.set_header(vec!["Event", "Threshold", "Days"]);
    for event in &response.extreme_events {
        events.add_row(vec![
            Cell::new(event.kind.replace('_', " ")),
            Cell::new(format!("{:.1}", event.threshold)).set_alignment(CellAlignment::Right),
            Cell::new(event.count).set_alignment(CellAlignment::Right),
        ]);
    }
    out.push_str(&events.to_string());
    out.push('\n');

    let periods = response.sorted_return_periods();
    if !periods.is_empty() {
        let line = periods
            .iter()
            .map(|(years, value)| format!("{}-year: {:.1}", years, value))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("Return levels: {}\n", line));
    }

    let s = &response.statistics;
    out.push_str(&ctx.muted(&format!(
        "mean {:.1}, min {:.1}, max {:.1}, std {:.2}, p95 {:.1}, p99 {:.1}",
        s.mean, s.min, s.max, s.std, s.percentile_95, s.percentile_99
    )));
    out
}
