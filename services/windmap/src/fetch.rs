//! Wind observation sources.
//!
//! Primary source is the Open-Meteo current-weather API, one request per
//! configured city. Any failure falls back to mock observations so a render
//! is always possible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use tracing::{debug, warn};
use wind_common::{WindError, WindResult, WindSample};

/// Major Japanese cities: (name, lon, lat).
pub const JAPAN_CITIES: &[(&str, f64, f64)] = &[
    ("Sapporo", 141.35, 43.06),
    ("Tokyo", 139.69, 35.69),
    ("Osaka", 135.50, 34.69),
    ("Fukuoka", 130.42, 33.61),
    ("Naha", 127.68, 26.21),
];

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentWind,
}

#[derive(Debug, Deserialize)]
struct CurrentWind {
    wind_speed_10m: f64,
    wind_direction_10m: f64,
}

/// Fetch one observation per city from Open-Meteo.
pub async fn fetch_observations(client: &reqwest::Client) -> WindResult<Vec<WindSample>> {
    let mut samples = Vec::with_capacity(JAPAN_CITIES.len());

    for &(city, lon, lat) in JAPAN_CITIES {
        let url = format!(
            "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&current=wind_speed_10m,wind_direction_10m&wind_speed_unit=ms",
            lat, lon
        );

        let response: ForecastResponse = client
            .get(&url)
            .send()
            .await
            .map_err(|e| WindError::FetchError(format!("{}: {}", city, e)))?
            .error_for_status()
            .map_err(|e| WindError::FetchError(format!("{}: {}", city, e)))?
            .json()
            .await
            .map_err(|e| WindError::FetchError(format!("{}: {}", city, e)))?;

        debug!(
            city,
            speed = response.current.wind_speed_10m,
            direction = response.current.wind_direction_10m,
            "fetched observation"
        );

        // The API reports 360 for due north; normalize into [0, 360).
        let direction = response.current.wind_direction_10m.rem_euclid(360.0);
        samples.push(WindSample::new(
            city,
            lon,
            lat,
            response.current.wind_speed_10m,
            direction,
        )?);
    }

    Ok(samples)
}

/// Generate mock observations: 1-11 m/s, whole-degree directions.
///
/// A seed makes the output reproducible; otherwise entropy is used.
pub fn mock_observations(seed: Option<u64>) -> Vec<WindSample> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    JAPAN_CITIES
        .iter()
        .map(|&(city, lon, lat)| WindSample {
            city: city.to_string(),
            lon,
            lat,
            speed_ms: rng.gen_range(1.0..11.0),
            direction_deg: rng.gen_range(0..360) as f64,
        })
        .collect()
}

/// Fetch observations, falling back to mock data on any failure.
pub async fn observations_with_fallback(mock_only: bool, seed: Option<u64>) -> Vec<WindSample> {
    if mock_only {
        return mock_observations(seed);
    }

    let client = reqwest::Client::new();
    match fetch_observations(&client).await {
        Ok(samples) => samples,
        Err(err) => {
            warn!("falling back to mock observations: {}", err);
            mock_observations(seed)
        }
    }
}
