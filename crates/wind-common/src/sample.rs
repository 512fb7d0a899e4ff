//! Wind observation samples and their validation.

use serde::{Deserialize, Serialize};

use crate::error::{WindError, WindResult};

/// One city's wind observation: position, speed and direction.
///
/// Immutable once validated; one per city per render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindSample {
    pub city: String,
    /// Longitude in degrees.
    pub lon: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Wind speed in meters per second, >= 0.
    pub speed_ms: f64,
    /// Direction in degrees, [0, 360).
    pub direction_deg: f64,
}

impl WindSample {
    pub fn new(
        city: impl Into<String>,
        lon: f64,
        lat: f64,
        speed_ms: f64,
        direction_deg: f64,
    ) -> WindResult<Self> {
        let sample = Self {
            city: city.into(),
            lon,
            lat,
            speed_ms,
            direction_deg,
        };
        sample.validate()?;
        Ok(sample)
    }

    /// Reject malformed observations at ingestion.
    ///
    /// Boundary values like `direction_deg = 0` or `speed_ms = 0` are valid.
    pub fn validate(&self) -> WindResult<()> {
        let reject = |message: String| {
            Err(WindError::InvalidSample {
                city: self.city.clone(),
                message,
            })
        };

        if !self.lon.is_finite() || !self.lat.is_finite() {
            return reject("position must be finite".to_string());
        }
        if !self.speed_ms.is_finite() || self.speed_ms < 0.0 {
            return reject(format!("speed must be >= 0, got {}", self.speed_ms));
        }
        if !self.direction_deg.is_finite()
            || self.direction_deg < 0.0
            || self.direction_deg >= 360.0
        {
            return reject(format!(
                "direction must be in [0, 360), got {}",
                self.direction_deg
            ));
        }
        Ok(())
    }

    /// Direction in radians.
    pub fn direction_rad(&self) -> f64 {
        self.direction_deg.to_radians()
    }

    /// Unit direction vector in screen coordinates (y grows downward).
    pub fn direction_vector(&self) -> (f64, f64) {
        let rad = self.direction_rad();
        (rad.cos(), rad.sin())
    }
}

/// Validate a batch of samples, failing on the first malformed one.
pub fn validate_samples(samples: &[WindSample]) -> WindResult<()> {
    for sample in samples {
        sample.validate()?;
    }
    Ok(())
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// 16-point compass name for a direction in degrees.
pub fn compass_name(direction_deg: f64) -> &'static str {
    let index = (direction_deg / 22.5).round() as usize % 16;
    COMPASS_POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sample() {
        let sample = WindSample::new("Tokyo", 139.69, 35.69, 5.2, 270.0).unwrap();
        assert_eq!(sample.city, "Tokyo");
        assert!(sample.validate().is_ok());
    }

    #[test]
    fn test_boundary_values_accepted() {
        assert!(WindSample::new("A", 0.0, 0.0, 0.0, 0.0).is_ok());
        assert!(WindSample::new("B", 0.0, 0.0, 0.0, 359.99).is_ok());
    }

    #[test]
    fn test_malformed_samples_rejected() {
        assert!(WindSample::new("A", 0.0, 0.0, -1.0, 0.0).is_err());
        assert!(WindSample::new("A", 0.0, 0.0, 1.0, 360.0).is_err());
        assert!(WindSample::new("A", 0.0, 0.0, 1.0, -0.1).is_err());
        assert!(WindSample::new("A", f64::NAN, 0.0, 1.0, 0.0).is_err());
        assert!(WindSample::new("A", 0.0, 0.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_direction_vector_cardinals() {
        let east = WindSample::new("E", 0.0, 0.0, 1.0, 0.0).unwrap();
        let (dx, dy) = east.direction_vector();
        assert!((dx - 1.0).abs() < 1e-9);
        assert!(dy.abs() < 1e-9);

        // 90 degrees points down-screen (y grows downward)
        let down = WindSample::new("S", 0.0, 0.0, 1.0, 90.0).unwrap();
        let (dx, dy) = down.direction_vector();
        assert!(dx.abs() < 1e-9);
        assert!((dy - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_compass_names() {
        assert_eq!(compass_name(0.0), "N");
        assert_eq!(compass_name(22.5), "NNE");
        assert_eq!(compass_name(90.0), "E");
        assert_eq!(compass_name(180.0), "S");
        assert_eq!(compass_name(270.0), "W");
        assert_eq!(compass_name(359.0), "N"); // wraps around
    }
}
