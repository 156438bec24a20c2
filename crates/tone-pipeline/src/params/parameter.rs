//! Per-field metadata for the edit model.

use std::fmt;
use std::str::FromStr;

/// Closed range and default value of one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterRange {
    /// Smallest accepted value (inclusive).
    pub min: f32,
    /// Largest accepted value (inclusive).
    pub max: f32,
    /// Value of a fresh edit.
    pub default: f32,
}

impl ParameterRange {
    /// Create a new range.
    pub const fn new(min: f32, max: f32, default: f32) -> Self {
        Self { min, max, default }
    }

    /// Clamp `value` into this range.
    ///
    /// NaN maps to the default; infinities clamp to the nearest bound.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Whether `value` lies inside the range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One of the five adjustable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Additive offset applied before the contrast gain.
    Brightness,
    /// Multiplicative gain around mid-grey.
    Contrast,
    /// Tone curve output at quarter grey.
    Shadows,
    /// Tone curve output at half grey.
    Midtones,
    /// Tone curve output at three-quarter grey.
    Highlights,
}

impl Parameter {
    /// All parameters in presentation order.
    pub const ALL: [Parameter; 5] = [
        Parameter::Brightness,
        Parameter::Contrast,
        Parameter::Shadows,
        Parameter::Midtones,
        Parameter::Highlights,
    ];

    /// Accepted range and default.
    pub const fn range(self) -> ParameterRange {
        match self {
            Parameter::Brightness => ParameterRange::new(-1.0, 1.0, 0.0),
            Parameter::Contrast => ParameterRange::new(0.5, 1.5, 1.0),
            Parameter::Shadows => ParameterRange::new(0.0, 0.5, 0.25),
            Parameter::Midtones => ParameterRange::new(0.0, 1.0, 0.5),
            Parameter::Highlights => ParameterRange::new(0.5, 1.0, 0.75),
        }
    }

    /// Machine name, as used in serialized presets and on the command line.
    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Brightness => "brightness",
            Parameter::Contrast => "contrast",
            Parameter::Shadows => "shadows",
            Parameter::Midtones => "midtones",
            Parameter::Highlights => "highlights",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Parameter::Brightness => "Brightness",
            Parameter::Contrast => "Contrast",
            Parameter::Shadows => "Shadows",
            Parameter::Midtones => "Midtones",
            Parameter::Highlights => "Highlights",
        }
    }

    /// Number of decimals shown when displaying a value.
    pub const fn precision(self) -> usize {
        match self {
            Parameter::Brightness | Parameter::Contrast => 1,
            Parameter::Shadows | Parameter::Midtones | Parameter::Highlights => 2,
        }
    }

    /// Labels for the low and high end of the range, for tone curve fields.
    pub const fn bound_labels(self) -> Option<(&'static str, &'static str)> {
        match self {
            Parameter::Brightness | Parameter::Contrast => None,
            Parameter::Shadows | Parameter::Midtones => Some(("Darker", "Lighter")),
            Parameter::Highlights => Some(("Darker", "Brighter")),
        }
    }

    /// Format `value` with this parameter's display precision.
    pub fn format_value(self, value: f32) -> String {
        format!("{:.*}", self.precision(), value)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a parameter name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseParameterError(String);

impl fmt::Display for ParseParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown parameter '{}' (expected brightness, contrast, shadows, midtones or highlights)",
            self.0
        )
    }
}

impl std::error::Error for ParseParameterError {}

impl FromStr for Parameter {
    type Err = ParseParameterError;

    /// Parse a parameter name, case-insensitively. Single-letter
    /// abbreviations (`b`, `c`, `s`, `m`, `h`) are accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brightness" | "b" => Ok(Parameter::Brightness),
            "contrast" | "c" => Ok(Parameter::Contrast),
            "shadows" | "s" => Ok(Parameter::Shadows),
            "midtones" | "m" => Ok(Parameter::Midtones),
            "highlights" | "h" => Ok(Parameter::Highlights),
            _ => Err(ParseParameterError(s.trim().to_string())),
        }
    }
}
