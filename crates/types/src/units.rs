//! Length parsing for configuration values.
//!
//! Configuration files may state a length either as a bare number (points)
//! or as a string with a unit suffix: `pt`, `px`, `in`, `cm` or `mm`.

use crate::error::GeometryError;
use serde::{Deserialize, Deserializer, de};

pub const POINTS_PER_INCH: f32 = 72.0;
const POINTS_PER_CM: f32 = POINTS_PER_INCH / 2.54;
const POINTS_PER_MM: f32 = POINTS_PER_CM / 10.0;

/// Parses a length such as `"5in"`, `"12.7cm"`, `"14pt"` or `"12"` into points.
pub fn parse_length(input: &str) -> Result<f32, GeometryError> {
    let input = input.trim();
    let invalid = || GeometryError::InvalidLength(input.to_string());

    let (number, factor) = if let Some(val) = input.strip_suffix("pt") {
        (val, 1.0)
    } else if let Some(val) = input.strip_suffix("px") {
        (val, 1.0)
    } else if let Some(val) = input.strip_suffix("in") {
        (val, POINTS_PER_INCH)
    } else if let Some(val) = input.strip_suffix("cm") {
        (val, POINTS_PER_CM)
    } else if let Some(val) = input.strip_suffix("mm") {
        (val, POINTS_PER_MM)
    } else {
        (input, 1.0)
    };

    let value: f32 = number.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    Ok(value * factor)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthDef {
    Points(f32),
    Text(String),
}

impl LengthDef {
    fn into_points<E: de::Error>(self) -> Result<f32, E> {
        match self {
            LengthDef::Points(v) => Ok(v),
            LengthDef::Text(s) => parse_length(&s).map_err(E::custom),
        }
    }
}

/// `deserialize_with` helper for a length given as a number or unit string.
pub fn deserialize_length<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    LengthDef::deserialize(deserializer)?.into_points()
}

/// Like [`deserialize_length`], for optional fields.
pub fn deserialize_opt_length<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<LengthDef>::deserialize(deserializer)?
        .map(LengthDef::into_points)
        .transpose()
}
