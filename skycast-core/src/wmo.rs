//! WMO weather interpretation codes.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use serde::{Deserialize, Serialize};

/// Sentinel returned by [`describe`] for codes outside the WMO table.
pub const UNKNOWN_DESCRIPTION: &str = "Unknown";

/// Human-readable description of a WMO weather code.
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        56 => "Light freezing drizzle",
        57 => "Dense freezing drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        66 => "Light freezing rain",
        67 => "Heavy freezing rain",
        71 => "Slight snow fall",
        73 => "Moderate snow fall",
        75 => "Heavy snow fall",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_DESCRIPTION,
    }
}

/// Icon category for a WMO code, chosen by range.
pub fn icon_for(code: i32) -> WeatherIcon {
    match code {
        0..=1 => WeatherIcon::Clear,
        2 => WeatherIcon::PartlyCloudy,
        3 => WeatherIcon::Overcast,
        45..=48 => WeatherIcon::Fog,
        51..=57 => WeatherIcon::Drizzle,
        61..=67 => WeatherIcon::Rain,
        71..=77 => WeatherIcon::Snow,
        80..=82 => WeatherIcon::RainShowers,
        85..=86 => WeatherIcon::SnowShowers,
        95..=99 => WeatherIcon::Thunderstorm,
        _ => WeatherIcon::Default,
    }
}

/// Display icon categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    Rain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    /// Fallback for codes with no category.
    Default,
}

impl WeatherIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Clear => "☀️",
            Self::PartlyCloudy => "⛅",
            Self::Overcast => "☁️",
            Self::Fog => "🌫️",
            Self::Drizzle | Self::Rain | Self::RainShowers => "🌧️",
            Self::Snow => "❄️",
            Self::SnowShowers => "🌨️",
            Self::Thunderstorm => "⛈️",
            Self::Default => "🌡️",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::PartlyCloudy => "partly_cloudy",
            Self::Overcast => "overcast",
            Self::Fog => "fog",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::RainShowers => "rain_showers",
            Self::SnowShowers => "snow_showers",
            Self::Thunderstorm => "thunderstorm",
            Self::Default => "default",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESCRIPTIONS: &[(i32, &str)] = &[
        (0, "Clear sky"),
        (1, "Mainly clear"),
        (2, "Partly cloudy"),
        (3, "Overcast"),
        (45, "Fog"),
        (48, "Depositing rime fog"),
        (51, "Light drizzle"),
        (53, "Moderate drizzle"),
        (55, "Dense drizzle"),
        (56, "Light freezing drizzle"),
        (57, "Dense freezing drizzle"),
        (61, "Slight rain"),
        (63, "Moderate rain"),
        (65, "Heavy rain"),
        (66, "Light freezing rain"),
        (67, "Heavy freezing rain"),
        (71, "Slight snow fall"),
        (73, "Moderate snow fall"),
        (75, "Heavy snow fall"),
        (77, "Snow grains"),
        (80, "Slight rain showers"),
        (81, "Moderate rain showers"),
        (82, "Violent rain showers"),
        (85, "Slight snow showers"),
        (86, "Heavy snow showers"),
        (95, "Thunderstorm"),
        (96, "Thunderstorm with slight hail"),
        (99, "Thunderstorm with heavy hail"),
    ];

    #[test]
    fn known_codes_have_exact_descriptions() {
        assert_eq!(DESCRIPTIONS.len(), 28);
        for &(code, expected) in DESCRIPTIONS {
            assert_eq!(describe(code), expected, "code {code}");
        }
    }

    #[test]
    fn every_code_outside_table_is_unknown() {
        for code in -10..=200 {
            if DESCRIPTIONS.iter().all(|&(known, _)| known != code) {
                assert_eq!(describe(code), UNKNOWN_DESCRIPTION, "code {code}");
            }
        }
    }

    #[test]
    fn codes_outside_table_are_unknown() {
        for code in [-1, 4, 44, 46, 50, 60, 100, 999, i32::MIN, i32::MAX] {
            assert_eq!(describe(code), UNKNOWN_DESCRIPTION, "code {code}");
        }
    }

    #[test]
    fn icon_ranges() {
        assert_eq!(icon_for(0), WeatherIcon::Clear);
        assert_eq!(icon_for(1), WeatherIcon::Clear);
        assert_eq!(icon_for(2), WeatherIcon::PartlyCloudy);
        assert_eq!(icon_for(3), WeatherIcon::Overcast);
        assert_eq!(icon_for(45), WeatherIcon::Fog);
        assert_eq!(icon_for(48), WeatherIcon::Fog);
        assert_eq!(icon_for(56), WeatherIcon::Drizzle);
        assert_eq!(icon_for(61), WeatherIcon::Rain);
        assert_eq!(icon_for(67), WeatherIcon::Rain);
        assert_eq!(icon_for(77), WeatherIcon::Snow);
        assert_eq!(icon_for(81), WeatherIcon::RainShowers);
        assert_eq!(icon_for(86), WeatherIcon::SnowShowers);
        assert_eq!(icon_for(95), WeatherIcon::Thunderstorm);
    }

    #[test]
    fn unmapped_codes_use_default_icon() {
        assert_eq!(icon_for(4), WeatherIcon::Default);
        assert_eq!(icon_for(-5), WeatherIcon::Default);
        assert_eq!(icon_for(100), WeatherIcon::Default);
        assert_eq!(WeatherIcon::Default.glyph(), "🌡️");
    }
}
