//! Visual hints derived from free-text report fields
//!
//! The backend sends human labels ("Haze", "Moderate", "Very High", ...),
//! so these are keyword classifiers rather than code tables.

use ratatui::style::Color;

/// Weather condition categories
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeatherCondition {
    ClearSky,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherCondition {
    /// Classify a condition label. More specific keywords win.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| label.contains(w));

        if has(&["thunder", "storm"]) {
            WeatherCondition::Thunderstorm
        } else if has(&["snow", "sleet", "blizzard", "ice"]) {
            WeatherCondition::Snow
        } else if has(&["drizzle"]) {
            WeatherCondition::Drizzle
        } else if has(&["rain", "shower"]) {
            WeatherCondition::Rain
        } else if has(&["fog", "mist", "haze", "smoke", "dust"]) {
            WeatherCondition::Fog
        } else if has(&["partly", "few clouds", "scattered"]) {
            WeatherCondition::PartlyCloudy
        } else if has(&["cloud", "overcast"]) {
            WeatherCondition::Cloudy
        } else if has(&["clear", "sun"]) {
            WeatherCondition::ClearSky
        } else {
            WeatherCondition::Unknown
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WeatherCondition::ClearSky => "\u{2600}\u{fe0f}",
            WeatherCondition::PartlyCloudy => "\u{26c5}",
            WeatherCondition::Cloudy | WeatherCondition::Unknown => "\u{2601}\u{fe0f}",
            WeatherCondition::Fog => "\u{1f32b}\u{fe0f}",
            WeatherCondition::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherCondition::Rain => "\u{1f327}\u{fe0f}",
            WeatherCondition::Snow => "\u{2744}\u{fe0f}",
            WeatherCondition::Thunderstorm => "\u{26c8}\u{fe0f}",
        }
    }
}

/// Coarse severity shared by AQI category, UV risk and traffic level
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Moderate,
    High,
    Severe,
    Unknown,
}

impl Severity {
    /// Classify by whole words, so "Slow" is not read as "low".
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        let words: Vec<&str> = label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();
        let has = |keys: &[&str]| keys.iter().any(|k| words.contains(k));

        let base = if has(&[
            "severe", "extreme", "hazardous", "heavy", "jam", "jammed", "gridlock",
        ]) {
            Severity::Severe
        } else if has(&["unhealthy", "poor", "high", "congested"]) {
            Severity::High
        } else if has(&["moderate", "medium", "satisfactory", "fair", "slow", "sensitive"]) {
            Severity::Moderate
        } else if has(&["good", "low", "light", "clear", "free", "minimal"]) {
            Severity::Low
        } else {
            Severity::Unknown
        };

        // "Very High" / "Very Poor" step up; "Very Low" stays low
        if base == Severity::High && has(&["very"]) {
            Severity::Severe
        } else {
            base
        }
    }

    pub fn color(self) -> Color {
        match self {
            Severity::Low => Color::Rgb(100, 200, 150),
            Severity::Moderate => Color::Rgb(255, 220, 100),
            Severity::High => Color::Rgb(255, 150, 80),
            Severity::Severe => Color::Rgb(255, 70, 70),
            Severity::Unknown => Color::Gray,
        }
    }
}
