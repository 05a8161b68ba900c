//! IP-based location detection.
//!
//! Queries `ip-api.com` for the machine's approximate geodetic position.
//! Strictly best-effort glue: callers fall back to manual coordinates when
//! this fails.

use serde::Deserialize;

use crate::constants::Degree;
use crate::env_state::SkywatchEnv;
use crate::skywatch_errors::SkywatchError;

const IP_API_URL: &str = "http://ip-api.com/json";

/// A detected observer location.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub latitude: Degree,
    pub longitude: Degree,
    /// Human-readable place, e.g. `"New Delhi, India"`, when the service
    /// knows it.
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

/// Detect the observer's location from the machine's public IP.
///
/// Return
/// ------
/// * The detected [`GeoLocation`], or
///   [`SkywatchError::LocationUnavailable`] when the service cannot place
///   the address.
pub fn detect_location(env: &SkywatchEnv) -> Result<GeoLocation, SkywatchError> {
    let body = env
        .get_from_url(IP_API_URL)
        .map_err(|e| SkywatchError::LocationUnavailable(e.to_string()))?;
    parse_response(&body)
}

fn parse_response(body: &str) -> Result<GeoLocation, SkywatchError> {
    let response: IpApiResponse = serde_json::from_str(body)
        .map_err(|e| SkywatchError::LocationUnavailable(format!("bad response: {e}")))?;

    if response.status != "success" {
        return Err(SkywatchError::LocationUnavailable(format!(
            "service answered status {}",
            response.status
        )));
    }

    let (Some(latitude), Some(longitude)) = (response.lat, response.lon) else {
        return Err(SkywatchError::LocationUnavailable(
            "response carried no coordinates".into(),
        ));
    };

    let address = match (response.city, response.country) {
        (Some(city), Some(country)) => Some(format!("{city}, {country}")),
        _ => None,
    };

    Ok(GeoLocation {
        latitude,
        longitude,
        address,
    })
}
