//! Choropleth colouring for map features.

use super::RenderContext;
use crate::models::{MapFeatureCollection, MapFeatureProperties, Variable};
use comfy_table::Cell;

/// Fill for regions with no value, or for variables without a colour scale.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// Values up to and including `max` take `color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBucket {
    pub max: f64,
    pub color: &'static str,
    pub label: &'static str,
}

const fn bucket(max: f64, color: &'static str, label: &'static str) -> ColorBucket {
    ColorBucket { max, color, label }
}

const TEMPERATURE_SCALE: [ColorBucket; 6] = [
    bucket(10.0, "#0571b0", "< 10°C"),
    bucket(15.0, "#92c5de", "10-15°C"),
    bucket(20.0, "#f7f7f7", "15-20°C"),
    bucket(25.0, "#f4a582", "20-25°C"),
    bucket(30.0, "#ca0020", "25-30°C"),
    bucket(f64::INFINITY, "#67001f", "> 30°C"),
];

const PRECIPITATION_SCALE: [ColorBucket; 6] = [
    bucket(20.0, "#ffffcc", "< 20mm"),
    bucket(50.0, "#c7e9b4", "20-50mm"),
    bucket(100.0, "#7fcdbb", "50-100mm"),
    bucket(150.0, "#41b6c4", "100-150mm"),
    bucket(200.0, "#2c7fb8", "150-200mm"),
    bucket(f64::INFINITY, "#253494", "> 200mm"),
];

const HUMIDITY_SCALE: [ColorBucket; 6] = [
    bucket(30.0, "#fff7bc", "< 30%"),
    bucket(45.0, "#fee391", "30-45%"),
    bucket(60.0, "#fec44f", "45-60%"),
    bucket(75.0, "#fe9929", "60-75%"),
    bucket(90.0, "#d95f0e", "75-90%"),
    bucket(f64::INFINITY, "#993404", "> 90%"),
];

const WIND_SPEED_SCALE: [ColorBucket; 6] = [
    bucket(3.0, "#edf8e9", "< 3 m/s"),
    bucket(6.0, "#bae4b3", "3-6 m/s"),
    bucket(9.0, "#74c476", "6-9 m/s"),
    bucket(12.0, "#31a354", "9-12 m/s"),
    bucket(15.0, "#006d2c", "12-15 m/s"),
    bucket(f64::INFINITY, "#00441b", "> 15 m/s"),
];

/// Colour scale for a variable name as it appears in `climate_variable`.
pub fn color_scale(variable: &str) -> Option<&'static [ColorBucket]> {
    match variable {
        "temperature" => Some(&TEMPERATURE_SCALE),
        "precipitation" => Some(&PRECIPITATION_SCALE),
        "humidity" => Some(&HUMIDITY_SCALE),
        "wind_speed" => Some(&WIND_SPEED_SCALE),
        _ => None,
    }
}

pub fn fill_color(variable: &str, value: Option<f64>) -> &'static str {
    let (Some(scale), Some(value)) = (color_scale(variable), value) else {
        return NEUTRAL_COLOR;
    };
    if value.is_nan() {
        return NEUTRAL_COLOR;
    }
    scale
        .iter()
        .find(|b| value <= b.max)
        .map(|b| b.color)
        .unwrap_or(NEUTRAL_COLOR)
}

/// Fill for a feature. Only `climate_value` is coloured; a null value stays neutral
/// even when the raw `value` field is present.
pub fn feature_color(properties: &MapFeatureProperties) -> &'static str {
    fill_color(&properties.climate_variable, properties.climate_value)
}

fn value_label(properties: &MapFeatureProperties, unit: &str) -> String {
    match (properties.climate_value, properties.value) {
        (Some(v), _) => format!("{:.2} {}", v, unit),
        (None, Some(raw)) => format!("N/A (raw {:.2})", raw),
        (None, None) => "N/A".to_string(),
    }
}

/// Number of features that receive a non-neutral fill.
pub fn colored_feature_count(map: &MapFeatureCollection) -> usize {
    map.features
        .iter()
        .filter(|f| feature_color(&f.properties) != NEUTRAL_COLOR)
        .count()
}

pub fn render_map(ctx: &RenderContext, variable: Variable, map: &MapFeatureCollection) -> String {
    let mut out = String::new();
    out.push_str(&ctx.heading(&format!("{} by region", variable.label())));
    out.push('\n');

    if map.is_empty() {
        out.push_str(&ctx.muted("No regions returned for this selection"));
        return out;
    }

    let mut table = ctx.table();
    table.set_header(vec!["", "Region", variable.label()]);
    for feature in &map.features {
        let props = &feature.properties;
        table.add_row(vec![
            Cell::new(ctx.swatch(feature_color(props))),
            Cell::new(&props.name),
            Cell::new(value_label(props, variable.unit())),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');
    out.push_str(&render_legend(ctx, variable));
    out
}

pub fn render_legend(ctx: &RenderContext, variable: Variable) -> String {
    match color_scale(variable.as_str()) {
        Some(scale) => scale
            .iter()
            .map(|b| format!("{} {}", ctx.swatch(b.color), b.label))
            .collect::<Vec<_>>()
            .join("  "),
        None => format!("{} no colour scale", ctx.swatch(NEUTRAL_COLOR)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MapFeature;
    use rstest::rstest;

    fn feature(name: &str, variable: &str, value: Option<f64>) -> MapFeature {
        MapFeature::new(MapFeatureProperties {
            name: name.to_string(),
            climate_variable: variable.to_string(),
            climate_value: value,
            value: None,
        })
    }

    #[rstest]
    #[case("temperature", Some(-5.0), "#0571b0")]
    #[case("temperature", Some(10.0), "#0571b0")]
    #[case("temperature", Some(10.01), "#92c5de")]
    #[case("temperature", Some(45.0), "#67001f")]
    #[case("precipitation", Some(120.0), "#41b6c4")]
    #[case("humidity", Some(90.0), "#d95f0e")]
    #[case("wind_speed", Some(3.5), "#bae4b3")]
    #[case("temperature", None, NEUTRAL_COLOR)]
    #[case("solar_radiation", Some(250.0), NEUTRAL_COLOR)]
    fn test_fill_color(#[case] variable: &str, #[case] value: Option<f64>, #[case] expected: &str) {
        assert_eq!(fill_color(variable, value), expected);
    }

    #[test]
    fn test_colored_feature_count() {
        let map = MapFeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: vec![
                feature("Punjab", "temperature", Some(24.0)),
                feature("Sindh", "temperature", None),
                feature("Balochistan", "solar_radiation", Some(300.0)),
            ],
        };
        assert_eq!(colored_feature_count(&map), 1);
    }

    #[test]
    fn test_null_climate_value_ignores_raw_value() {
        let with_raw = |name: &str, raw: f64| {
            let mut f = feature(name, "temperature", None);
            f.properties.value = Some(raw);
            f
        };
        let map = MapFeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: vec![with_raw("KPK", 24.0), with_raw("Sindh", 31.0)],
        };
        assert_eq!(feature_color(&map.features[0].properties), NEUTRAL_COLOR);
        assert_eq!(colored_feature_count(&map), 0);

        let out = render_map(&RenderContext::plain(), Variable::Temperature, &map);
        assert!(out.contains("N/A (raw 24.00)"));
    }

    #[test]
    fn test_render_map_plain() {
        let map = MapFeatureCollection {
            kind: "FeatureCollection".to_string(),
            features: vec![
                feature("Punjab", "temperature", Some(24.456)),
                feature("Sindh", "temperature", None),
            ],
        };
        let out = render_map(&RenderContext::plain(), Variable::Temperature, &map);
        assert!(out.contains("Punjab"));
        assert!(out.contains("24.46 °C"));
        assert!(out.contains("N/A"));
        assert!(out.contains("#f4a582 20-25°C"));
    }

    #[test]
    fn test_render_empty_map() {
        let out = render_map(
            &RenderContext::plain(),
            Variable::Temperature,
            &MapFeatureCollection::empty(),
        );
        assert!(out.contains("No regions returned"));
    }
}
