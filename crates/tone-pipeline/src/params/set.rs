//! The bounded five-field parameter set.

use std::fmt;

use super::parameter::Parameter;
use crate::curve::{control_points, CurvePoint};

/// One complete edit state: five independent bounded scalars.
///
/// Fields are private and every way of producing a `ParameterSet` clamps,
/// so each field is within its [`Parameter::range`] at all times.
///
/// # Defaults
///
/// | field | range | default |
/// |---|---|---|
/// | brightness | -1.0..=1.0 | 0.0 |
/// | contrast | 0.5..=1.5 | 1.0 |
/// | shadows | 0.0..=0.5 | 0.25 |
/// | midtones | 0.0..=1.0 | 0.5 |
/// | highlights | 0.5..=1.0 | 0.75 |
///
/// The defaults leave the tone curve at the identity and the
/// brightness/contrast stage at a pass-through.
///
/// # Example
///
/// ```
/// use tone_pipeline::ParameterSet;
///
/// let params = ParameterSet::default()
///     .with_brightness(0.2)
///     .with_highlights(0.8);
/// assert_eq!(params.brightness(), 0.2);
/// assert_eq!(params.to_string(), "B: 0.2 • C: 1.0 • S: 0.25 • M: 0.50 • H: 0.80");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawParameterSet"))]
pub struct ParameterSet {
    brightness: f32,
    contrast: f32,
    shadows: f32,
    midtones: f32,
    highlights: f32,
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            brightness: Parameter::Brightness.range().default,
            contrast: Parameter::Contrast.range().default,
            shadows: Parameter::Shadows.range().default,
            midtones: Parameter::Midtones.range().default,
            highlights: Parameter::Highlights.range().default,
        }
    }
}

impl ParameterSet {
    /// Create a parameter set with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parameter set from raw values, clamping each one.
    pub fn from_values(
        brightness: f32,
        contrast: f32,
        shadows: f32,
        midtones: f32,
        highlights: f32,
    ) -> Self {
        Self::default()
            .with_brightness(brightness)
            .with_contrast(contrast)
            .with_shadows(shadows)
            .with_midtones(midtones)
            .with_highlights(highlights)
    }

    #[inline]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    #[inline]
    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    #[inline]
    pub fn shadows(&self) -> f32 {
        self.shadows
    }

    #[inline]
    pub fn midtones(&self) -> f32 {
        self.midtones
    }

    #[inline]
    pub fn highlights(&self) -> f32 {
        self.highlights
    }

    /// Set brightness (clamped to -1.0..=1.0).
    #[inline]
    pub fn with_brightness(self, value: f32) -> Self {
        self.with(Parameter::Brightness, value)
    }

    /// Set contrast (clamped to 0.5..=1.5).
    #[inline]
    pub fn with_contrast(self, value: f32) -> Self {
        self.with(Parameter::Contrast, value)
    }

    /// Set the shadows control point (clamped to 0.0..=0.5).
    #[inline]
    pub fn with_shadows(self, value: f32) -> Self {
        self.with(Parameter::Shadows, value)
    }

    /// Set the midtones control point (clamped to 0.0..=1.0).
    #[inline]
    pub fn with_midtones(self, value: f32) -> Self {
        self.with(Parameter::Midtones, value)
    }

    /// Set the highlights control point (clamped to 0.5..=1.0).
    #[inline]
    pub fn with_highlights(self, value: f32) -> Self {
        self.with(Parameter::Highlights, value)
    }

    /// Builder form of [`ParameterSet::set`].
    #[inline]
    pub fn with(mut self, parameter: Parameter, value: f32) -> Self {
        self.set(parameter, value);
        self
    }

    /// Read one field.
    pub fn get(&self, parameter: Parameter) -> f32 {
        match parameter {
            Parameter::Brightness => self.brightness,
            Parameter::Contrast => self.contrast,
            Parameter::Shadows => self.shadows,
            Parameter::Midtones => self.midtones,
            Parameter::Highlights => self.highlights,
        }
    }

    /// Write one field, clamping into its range. Returns the stored value.
    pub fn set(&mut self, parameter: Parameter, value: f32) -> f32 {
        let value = parameter.range().clamp(value);
        let slot = match parameter {
            Parameter::Brightness => &mut self.brightness,
            Parameter::Contrast => &mut self.contrast,
            Parameter::Shadows => &mut self.shadows,
            Parameter::Midtones => &mut self.midtones,
            Parameter::Highlights => &mut self.highlights,
        };
        *slot = value;
        value
    }

    /// Whether every field holds its default value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The five tone curve control points derived from this set.
    pub fn curve_points(&self) -> [CurvePoint; 5] {
        control_points(self.shadows, self.midtones, self.highlights)
    }
}

impl fmt::Display for ParameterSet {
    /// Compact summary, e.g. `B: 0.0 • C: 1.0 • S: 0.25 • M: 0.50 • H: 0.75`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, parameter) in Parameter::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(" • ")?;
            }
            let initial = &parameter.label()[..1];
            write!(
                f,
                "{}: {}",
                initial,
                parameter.format_value(self.get(*parameter))
            )?;
        }
        Ok(())
    }
}

/// Unvalidated mirror used for deserialization; missing fields take defaults.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(default)]
struct RawParameterSet {
    brightness: f32,
    contrast: f32,
    shadows: f32,
    midtones: f32,
    highlights: f32,
}

#[cfg(feature = "serde")]
impl Default for RawParameterSet {
    fn default() -> Self {
        let defaults = ParameterSet::default();
        Self {
            brightness: defaults.brightness,
            contrast: defaults.contrast,
            shadows: defaults.shadows,
            midtones: defaults.midtones,
            highlights: defaults.highlights,
        }
    }
}

#[cfg(feature = "serde")]
impl From<RawParameterSet> for ParameterSet {
    fn from(raw: RawParameterSet) -> Self {
        ParameterSet::from_values(
            raw.brightness,
            raw.contrast,
            raw.shadows,
            raw.midtones,
            raw.highlights,
        )
    }
}
