//! Geographic bounds and linear pixel projection.

use serde::{Deserialize, Serialize};

use crate::error::{WindError, WindResult};

/// A geographic rectangle used to project longitude/latitude into pixel space.
///
/// The projection is purely linear (no map projection correction); latitude is
/// inverted because pixel rows increase downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
}

impl GeoBounds {
    /// Create a bounding rectangle, validating its invariants.
    pub fn new(lon_min: f64, lon_max: f64, lat_min: f64, lat_max: f64) -> WindResult<Self> {
        let bounds = Self {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Bounds covering the Japanese archipelago (Okinawa to Hokkaido).
    pub fn japan() -> Self {
        Self {
            lon_min: 127.0,
            lon_max: 146.0,
            lat_min: 24.0,
            lat_max: 46.0,
        }
    }

    pub fn validate(&self) -> WindResult<()> {
        for v in [self.lon_min, self.lon_max, self.lat_min, self.lat_max] {
            if !v.is_finite() {
                return Err(WindError::InvalidBounds(
                    "coordinates must be finite".to_string(),
                ));
            }
        }
        if self.lon_max <= self.lon_min {
            return Err(WindError::InvalidBounds(format!(
                "lon_max ({}) must exceed lon_min ({})",
                self.lon_max, self.lon_min
            )));
        }
        if self.lat_max <= self.lat_min {
            return Err(WindError::InvalidBounds(format!(
                "lat_max ({}) must exceed lat_min ({})",
                self.lat_max, self.lat_min
            )));
        }
        Ok(())
    }

    /// Width of the bounds in degrees of longitude.
    pub fn lon_span(&self) -> f64 {
        self.lon_max - self.lon_min
    }

    /// Height of the bounds in degrees of latitude.
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Project a geographic position into pixel coordinates.
    ///
    /// Positions outside the bounds project outside the canvas and are allowed;
    /// some deployments intentionally extend the bounds, so no clamping or
    /// rejection happens here.
    pub fn project(&self, lon: f64, lat: f64, width: usize, height: usize) -> (i64, i64) {
        let x = ((lon - self.lon_min) / self.lon_span() * width as f64).floor();
        let y = ((self.lat_max - lat) / self.lat_span() * height as f64).floor();
        (x as i64, y as i64)
    }

    /// Check if a geographic position falls within the bounds.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.lon_min && lon <= self.lon_max && lat >= self.lat_min && lat <= self.lat_max
    }
}

impl Default for GeoBounds {
    fn default() -> Self {
        Self::japan()
    }
}
