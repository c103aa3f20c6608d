use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity class of a standardized drought index (SPI/SPEI/PDSI) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroughtSeverity {
    ExtremelyWet,
    VeryWet,
    ModeratelyWet,
    Normal,
    ModerateDrought,
    SevereDrought,
    ExtremeDrought,
    #[default]
    #[serde(other)]
    Unknown,
}

impl DroughtSeverity {
    /// Same banding the backend applies to index values.
    pub fn from_index(value: f64) -> Self {
        if value.is_nan() {
            DroughtSeverity::Unknown
        } else if value >= 2.0 {
            DroughtSeverity::ExtremelyWet
        } else if value >= 1.5 {
            DroughtSeverity::VeryWet
        } else if value >= 1.0 {
            DroughtSeverity::ModeratelyWet
        } else if value >= -1.0 {
            DroughtSeverity::Normal
        } else if value >= -1.5 {
            DroughtSeverity::ModerateDrought
        } else if value >= -2.0 {
            DroughtSeverity::SevereDrought
        } else {
            DroughtSeverity::ExtremeDrought
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DroughtSeverity::ExtremelyWet => "Extremely Wet",
            DroughtSeverity::VeryWet => "Very Wet",
            DroughtSeverity::ModeratelyWet => "Moderately Wet",
            DroughtSeverity::Normal => "Normal",
            DroughtSeverity::ModerateDrought => "Moderate Drought",
            DroughtSeverity::SevereDrought => "Severe Drought",
            DroughtSeverity::ExtremeDrought => "Extreme Drought",
            DroughtSeverity::Unknown => "Unknown",
        }
    }

    pub fn is_drought(&self) -> bool {
        matches!(
            self,
            DroughtSeverity::ModerateDrought
                | DroughtSeverity::SevereDrought
                | DroughtSeverity::ExtremeDrought
        )
    }
}

impl fmt::Display for DroughtSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2.0, DroughtSeverity::ExtremelyWet)]
    #[case(1.7, DroughtSeverity::VeryWet)]
    #[case(1.0, DroughtSeverity::ModeratelyWet)]
    #[case(0.0, DroughtSeverity::Normal)]
    #[case(-1.0, DroughtSeverity::Normal)]
    #[case(-1.2, DroughtSeverity::ModerateDrought)]
    #[case(-2.0, DroughtSeverity::SevereDrought)]
    #[case(-2.01, DroughtSeverity::ExtremeDrought)]
    #[case(f64::NAN, DroughtSeverity::Unknown)]
    fn test_from_index(#[case] value: f64, #[case] expected: DroughtSeverity) {
        assert_eq!(DroughtSeverity::from_index(value), expected);
    }

    #[test]
    fn test_wire_names() {
        let parsed: DroughtSeverity = serde_json::from_str("\"severe_drought\"").unwrap();
        assert_eq!(parsed, DroughtSeverity::SevereDrought);
        assert!(parsed.is_drought());
        let other: DroughtSeverity = serde_json::from_str("\"something_new\"").unwrap();
        assert_eq!(other, DroughtSeverity::Unknown);
    }
}
