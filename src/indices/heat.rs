//! Heat stress formulas evaluated on the client.
//!
//! `compute_heat_index` is the simplified calculator formula shown on the heat stress
//! page. The remaining functions mirror the indices the backend reports so results can
//! be cross-checked offline.

use std::fmt;

/// Saturation vapour pressure (hPa) at `temp_c`, Magnus-type approximation.
fn vapour_pressure(temp_c: f64) -> f64 {
    6.11 * (5417.7530 * ((1.0 / 273.16) - (1.0 / (273.15 + temp_c)))).exp()
}

/// Simplified heat index in °C from air temperature (°C) and relative humidity (%).
///
/// Inputs are not range-checked: out-of-domain values yield whatever the formula
/// produces, and non-numeric input (`NaN`) propagates.
pub fn compute_heat_index(temperature_c: f64, relative_humidity: f64) -> f64 {
    temperature_c + 0.5555 * (vapour_pressure(temperature_c) * (relative_humidity / 100.0) - 10.0)
}

/// NOAA heat index (Rothfusz regression) in °C.
///
/// Below 80 °F the simple Steadman form is used. The low-humidity and high-humidity
/// adjustments apply in their documented temperature windows.
pub fn heat_index_rothfusz(temperature_c: f64, relative_humidity: f64) -> f64 {
    let t = temperature_c * 9.0 / 5.0 + 32.0;
    let rh = relative_humidity;

    let hi = if t < 80.0 {
        0.5 * (t + 61.0 + ((t - 68.0) * 1.2) + (rh * 0.094))
    } else {
        let mut hi = -42.379 + 2.049_015_23 * t + 10.143_331_27 * rh
            - 0.224_755_41 * t * rh
            - 0.006_837_83 * t * t
            - 0.054_817_17 * rh * rh
            + 0.001_228_74 * t * t * rh
            + 0.000_852_82 * t * rh * rh
            - 0.000_001_99 * t * t * rh * rh;

        if rh < 13.0 && (80.0..=112.0).contains(&t) {
            hi -= ((13.0 - rh) / 4.0) * ((17.0 - (t - 95.0).abs()) / 17.0).sqrt();
        } else if rh > 85.0 && (80.0..=87.0).contains(&t) {
            hi += ((rh - 85.0) / 10.0) * ((87.0 - t) / 5.0);
        }
        hi
    };

    (hi - 32.0) * 5.0 / 9.0
}

/// Dew point (°C) from air temperature and relative humidity, Magnus formula.
pub fn dew_point(temperature_c: f64, relative_humidity: f64) -> f64 {
    const A: f64 = 17.625;
    const B: f64 = 243.04;
    let gamma = (relative_humidity / 100.0).ln() + A * temperature_c / (B + temperature_c);
    B * gamma / (A - gamma)
}

/// Canadian humidex from air temperature and dew point (both °C).
pub fn humidex(temperature_c: f64, dewpoint_c: f64) -> f64 {
    temperature_c + 0.5555 * (vapour_pressure(dewpoint_c) - 10.0)
}

/// Outdoor wet bulb globe temperature (°C), simplified Liljegren form.
///
/// `_wind_speed_ms` is accepted for parity with the backend signature; the simplified
/// model does not use it.
pub fn wet_bulb_globe_temperature(
    temperature_c: f64,
    relative_humidity: f64,
    _wind_speed_ms: f64,
    solar_radiation_wm2: f64,
) -> f64 {
    let rh = relative_humidity;
    let wet_bulb = temperature_c * (0.151_977 * (rh + 8.313_659).sqrt()).atan()
        + (temperature_c + rh).atan()
        - (rh - 1.676_331).atan()
        + 0.003_918_38 * rh.powf(1.5) * (0.023_101 * rh).atan()
        - 4.686_035;
    let globe = temperature_c + 0.00184 * solar_radiation_wm2;

    0.7 * wet_bulb + 0.2 * globe + 0.1 * temperature_c
}

/// Risk band for a heat index value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatRisk {
    Normal,
    Caution,
    ExtremeCaution,
    Danger,
    Extreme,
}

impl HeatRisk {
    /// Thresholds are exclusive lower bounds: `> 54`, `> 41`, `> 32`, `> 27`.
    pub fn from_heat_index(heat_index_c: f64) -> Self {
        if heat_index_c > 54.0 {
            HeatRisk::Extreme
        } else if heat_index_c > 41.0 {
            HeatRisk::Danger
        } else if heat_index_c > 32.0 {
            HeatRisk::ExtremeCaution
        } else if heat_index_c > 27.0 {
            HeatRisk::Caution
        } else {
            HeatRisk::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HeatRisk::Normal => "normal",
            HeatRisk::Caution => "caution",
            HeatRisk::ExtremeCaution => "extreme caution",
            HeatRisk::Danger => "danger",
            HeatRisk::Extreme => "extreme",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HeatRisk::Normal => "Normal",
            HeatRisk::Caution => "Caution",
            HeatRisk::ExtremeCaution => "Extreme Caution",
            HeatRisk::Danger => "Danger",
            HeatRisk::Extreme => "Extreme Danger",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            HeatRisk::Normal => "< 27°C",
            HeatRisk::Caution => "27-32°C",
            HeatRisk::ExtremeCaution => "32-41°C",
            HeatRisk::Danger => "41-54°C",
            HeatRisk::Extreme => "> 54°C",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            HeatRisk::Normal => "No significant risk",
            HeatRisk::Caution => "Fatigue possible with prolonged exposure",
            HeatRisk::ExtremeCaution => "Heat exhaustion possible",
            HeatRisk::Danger => "Heat exhaustion and cramps likely",
            HeatRisk::Extreme => "Heat stroke highly likely",
        }
    }

    /// Legend order, most severe first.
    pub const LEGEND: [HeatRisk; 5] = [
        HeatRisk::Extreme,
        HeatRisk::Danger,
        HeatRisk::ExtremeCaution,
        HeatRisk::Caution,
        HeatRisk::Normal,
    ];
}

impl fmt::Display for HeatRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of the heat index calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatAssessment {
    pub heat_index: f64,
    /// `None` when the inputs produced a non-finite index.
    pub risk: Option<HeatRisk>,
}

/// Runs the calculator: heat index plus its risk band.
pub fn assess(temperature_c: f64, relative_humidity: f64) -> HeatAssessment {
    let heat_index = compute_heat_index(temperature_c, relative_humidity);
    let risk = heat_index
        .is_finite()
        .then(|| HeatRisk::from_heat_index(heat_index));
    HeatAssessment { heat_index, risk }
}

/// Other heat stress measures for the same conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelatedIndices {
    pub noaa_heat_index: f64,
    pub dew_point: f64,
    pub humidex: f64,
    /// Needs solar radiation; wind defaults to calm.
    pub wbgt: Option<f64>,
}

pub fn related_indices(
    temperature_c: f64,
    relative_humidity: f64,
    wind_speed_ms: Option<f64>,
    solar_radiation_wm2: Option<f64>,
) -> RelatedIndices {
    let dew = dew_point(temperature_c, relative_humidity);
    RelatedIndices {
        noaa_heat_index: heat_index_rothfusz(temperature_c, relative_humidity),
        dew_point: dew,
        humidex: humidex(temperature_c, dew),
        wbgt: solar_radiation_wm2.map(|solar| {
            wet_bulb_globe_temperature(
                temperature_c,
                relative_humidity,
                wind_speed_ms.unwrap_or(0.0),
                solar,
            )
        }),
    }
}
