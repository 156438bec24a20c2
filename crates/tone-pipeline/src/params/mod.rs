//! The five-parameter edit model.
//!
//! [`ParameterSet`] is the complete edit state of one photo. Each field is
//! bounded; constructors, setters and deserialization all clamp, so a value
//! of this type is always within range and the pipeline never re-validates.
//!
//! [`Parameter`] names one field and carries the metadata an edit surface
//! needs to present it (label, range, display precision, bound labels).
//!
//! # Example
//!
//! ```
//! use tone_pipeline::{Parameter, ParameterSet};
//!
//! let mut params = ParameterSet::default();
//! let stored = params.set(Parameter::Contrast, 4.0);
//! assert_eq!(stored, 1.5); // clamped to the upper bound
//!
//! let field: Parameter = "shadows".parse().unwrap();
//! assert_eq!(params.get(field), 0.25);
//! ```

mod parameter;
mod set;

pub use parameter::{Parameter, ParameterRange, ParseParameterError};
pub use set::ParameterSet;
