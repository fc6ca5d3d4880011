use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{MapsError, MapsResult};

/// Road routing rarely follows the straight line; the detour factor and
/// average urban speed turn a haversine distance into a usable estimate.
const DETOUR_FACTOR: f64 = 1.3;
const AVG_SPEED_KMH: f64 = 30.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A travel-time estimate between two points
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteEta {
    pub eta_minutes: u32,
    pub distance_km: f64,
    pub traffic_delay_minutes: u32,
    pub route_summary: String,
    /// "azure_maps" or "estimated"
    pub source: String,
}

/// Route planner over the Azure Maps Route Directions API with a
/// haversine fallback
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    subscription_key: String,
    client: reqwest::Client,
    configured: bool,
}

impl RoutePlanner {
    /// Build the planner from `MAPS_SUBSCRIPTION_KEY`.
    pub fn from_env() -> Self {
        let subscription_key = std::env::var("MAPS_SUBSCRIPTION_KEY").unwrap_or_default();
        let configured = !subscription_key.is_empty() && subscription_key != "your-key";

        if configured {
            info!("Azure Maps routing initialized");
        } else {
            warn!("Azure Maps credentials not configured, using straight-line ETA estimates");
        }

        Self {
            subscription_key,
            client: reqwest::Client::new(),
            configured,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// Travel time from `(from_lat, from_lon)` to `(to_lat, to_lon)`.
    ///
    /// Traffic-aware when Azure Maps is configured; any failure degrades to
    /// the estimate.
    pub async fn route_eta(
        &self,
        from_lat: f64,
        from_lon: f64,
        to_lat: f64,
        to_lon: f64,
    ) -> RouteEta {
        if self.configured {
            match self.azure_route(from_lat, from_lon, to_lat, to_lon).await {
                Ok(eta) => return eta,
                Err(err) => {
                    error!(error = %err, "Azure Maps route failed, using estimate");
                }
            }
        }
        fallback_eta(from_lat, from_lon, to_lat, to_lon)
    }

    async fn azure_route(
        &self,
        from_lat: f64,
        from_lon: f64,
        to_lat: f64,
        to_lon: f64,
    ) -> MapsResult<RouteEta> {
        let query = format!("{},{}:{},{}", from_lat, from_lon, to_lat, to_lon);

        let response = self
            .client
            .get("https://atlas.microsoft.com/route/directions/json")
            .query(&[
                ("subscription-key", self.subscription_key.as_str()),
                ("api-version", "1.0"),
                ("query", query.as_str()),
                ("traffic", "true"),
                ("departAt", "now"),
                ("travelMode", "car"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: RouteResponse = response.json().await?;
        let summary = body
            .routes
            .into_iter()
            .next()
            .map(|r| r.summary)
            .ok_or_else(|| MapsError::Routing("no routes returned".to_string()))?;

        let eta_minutes = ((summary.travel_time_in_seconds as f64 / 60.0).round() as u32).max(1);
        let distance_km = (summary.length_in_meters as f64 / 1000.0 * 10.0).round() / 10.0;
        let traffic_delay_minutes =
            (summary.traffic_delay_in_seconds as f64 / 60.0).round() as u32;

        info!(
            eta_minutes,
            distance_km, traffic_delay_minutes, "Azure Maps route calculated"
        );

        Ok(RouteEta {
            eta_minutes,
            distance_km,
            traffic_delay_minutes,
            route_summary: format!("{} km, ~{} min", distance_km, eta_minutes),
            source: "azure_maps".to_string(),
        })
    }
}

/// Straight-line estimate: haversine distance with a detour factor at
/// average urban driving speed, minimum one minute.
pub fn fallback_eta(from_lat: f64, from_lon: f64, to_lat: f64, to_lon: f64) -> RouteEta {
    let distance_km = haversine_km(from_lat, from_lon, to_lat, to_lon);
    let road_distance = distance_km * DETOUR_FACTOR;
    let eta_minutes = ((road_distance / AVG_SPEED_KMH * 60.0).round() as u32).max(1);
    let distance_rounded = (distance_km * 10.0).round() / 10.0;

    RouteEta {
        eta_minutes,
        distance_km: distance_rounded,
        traffic_delay_minutes: 0,
        route_summary: format!("~{} km, ~{} min (estimated)", distance_rounded, eta_minutes),
        source: "estimated".to_string(),
    }
}

/// Great-circle distance between two GPS points in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    summary: RouteSummary,
}

#[derive(Debug, Deserialize)]
struct RouteSummary {
    #[serde(rename = "travelTimeInSeconds")]
    travel_time_in_seconds: u64,
    #[serde(rename = "lengthInMeters")]
    length_in_meters: u64,
    #[serde(rename = "trafficDelayInSeconds", default)]
    traffic_delay_in_seconds: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_stuttgart_to_munich() {
        // Roughly 190 km apart.
        let dist = haversine_km(48.78, 9.18, 48.14, 11.58);
        assert!((dist - 190.0).abs() < 20.0, "got {}", dist);
    }

    #[test]
    fn fallback_eta_has_a_floor_of_one_minute() {
        let eta = fallback_eta(48.78, 9.18, 48.78, 9.18);
        assert_eq!(eta.eta_minutes, 1);
        assert_eq!(eta.source, "estimated");
    }

    #[test]
    fn fallback_eta_scales_with_distance() {
        let near = fallback_eta(48.78, 9.18, 48.79, 9.19);
        let far = fallback_eta(48.78, 9.18, 48.90, 9.40);
        assert!(far.eta_minutes > near.eta_minutes);
    }
}
