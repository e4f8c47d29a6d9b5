//! Equatorial coordinate conversion for catalog text fields.
//!
//! The catalog stores right ascension in decimal hours and declination in
//! signed decimal degrees. The renderer wants radians, with declination
//! shifted so that −90°..+90° maps linearly onto 0..π.

use std::f64::consts::PI;

use crate::error::Error;

/// Decimal places kept in converted coordinates; trimming here bounds the
/// size of the generated module.
const COORD_DECIMALS: i32 = 6;

fn trim_precision(value: f64) -> f64 {
    let scale = 10f64.powi(COORD_DECIMALS);
    (value * scale).round() / scale
}

fn parse_field(text: &str) -> Result<f64, Error> {
    text.trim()
        .parse::<f64>()
        .map_err(|source| Error::InvalidCoordinate {
            text: text.to_string(),
            source,
        })
}

/// Convert right ascension in decimal hours to radians.
///
/// 0h maps to 0 and 24h to 2π; no range clamping is performed.
pub fn ra_hours_to_rad(text: &str) -> Result<f64, Error> {
    Ok(trim_precision(2.0 * PI * parse_field(text)? / 24.0))
}

/// Convert declination in signed decimal degrees to radians.
///
/// −90° maps to 0 and +90° to π; no range clamping is performed.
pub fn dec_degrees_to_rad(text: &str) -> Result<f64, Error> {
    Ok(trim_precision((parse_field(text)? + 90.0) * 2.0 * PI / 360.0))
}
