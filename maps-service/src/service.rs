use serde::{Deserialize, Serialize};
use tracing::info;

use crate::directory::{Hospital, HospitalDirectory, Occupancy};
use crate::routing::{RouteEta, RoutePlanner};

/// Candidates farther than this are never offered to the patient.
const SEARCH_RADIUS_KM: f64 = 150.0;
/// At most this many candidates are scored per request.
const MAX_CANDIDATES: usize = 10;
/// Number of ranked hospitals shown to the patient by default.
pub const DEFAULT_RESULT_COUNT: usize = 3;

/// A hospital ranked for a specific patient location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedHospital {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub distance_km: f64,
    /// Travel time only
    pub eta_minutes: u32,
    /// Travel time plus the occupancy penalty; the ranking key
    pub effective_eta_minutes: u32,
    pub occupancy: Occupancy,
    pub route_summary: String,
}

/// Hospital lookup and ETA service
#[derive(Debug, Clone)]
pub struct MapsService {
    directory: HospitalDirectory,
    planner: RoutePlanner,
}

impl MapsService {
    pub fn from_env() -> Self {
        Self {
            directory: HospitalDirectory::demo(),
            planner: RoutePlanner::from_env(),
        }
    }

    pub fn new(directory: HospitalDirectory, planner: RoutePlanner) -> Self {
        Self { directory, planner }
    }

    pub fn is_routing_configured(&self) -> bool {
        self.planner.is_configured()
    }

    /// Rank nearby hospitals for the patient.
    ///
    /// Candidates within 150 km (at most 10) are scored as
    /// `travel_minutes + occupancy_penalty` and the best `count` are
    /// returned, fastest effective arrival first.
    pub async fn nearest_hospitals(
        &self,
        lat: f64,
        lon: f64,
        count: usize,
    ) -> Vec<RankedHospital> {
        let candidates = self
            .directory
            .candidates_near(lat, lon, SEARCH_RADIUS_KM, MAX_CANDIDATES);

        let mut ranked = Vec::with_capacity(candidates.len());
        for (hospital, _distance) in candidates {
            let eta = self
                .planner
                .route_eta(lat, lon, hospital.lat, hospital.lon)
                .await;
            ranked.push(rank_entry(hospital, eta));
        }

        ranked.sort_by_key(|h| h.effective_eta_minutes);
        ranked.truncate(count.max(1));

        info!(
            lat,
            lon,
            results = ranked.len(),
            "Ranked nearby hospitals"
        );
        ranked
    }

    /// Travel time to one specific hospital (used once the patient has
    /// chosen a destination).
    pub async fn eta_to_hospital(
        &self,
        from_lat: f64,
        from_lon: f64,
        to_lat: f64,
        to_lon: f64,
    ) -> RouteEta {
        self.planner
            .route_eta(from_lat, from_lon, to_lat, to_lon)
            .await
    }
}

fn rank_entry(hospital: Hospital, eta: RouteEta) -> RankedHospital {
    let effective = eta.eta_minutes + hospital.occupancy.penalty_minutes();
    RankedHospital {
        name: hospital.name,
        country: hospital.country,
        lat: hospital.lat,
        lon: hospital.lon,
        address: hospital.address,
        distance_km: eta.distance_km,
        eta_minutes: eta.eta_minutes,
        effective_eta_minutes: effective,
        occupancy: hospital.occupancy,
        route_summary: eta.route_summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::fallback_eta;

    fn hospital(name: &str, lat: f64, lon: f64, occupancy: Occupancy) -> Hospital {
        Hospital {
            name: name.to_string(),
            country: "DE".to_string(),
            lat,
            lon,
            address: String::new(),
            occupancy,
        }
    }

    fn offline_service(hospitals: Vec<Hospital>) -> MapsService {
        MapsService::new(
            HospitalDirectory::from_hospitals(hospitals),
            RoutePlanner::from_env(),
        )
    }

    #[tokio::test]
    async fn returns_requested_number_of_hospitals() {
        let service = MapsService::from_env();
        let hospitals = service.nearest_hospitals(48.80, 9.20, 3).await;
        assert_eq!(hospitals.len(), 3);
        for h in &hospitals {
            assert!(h.eta_minutes > 0);
            assert!(h.distance_km > 0.0);
            assert!(!h.name.is_empty());
        }
    }

    #[tokio::test]
    async fn results_are_sorted_by_effective_eta() {
        let service = MapsService::from_env();
        let hospitals = service.nearest_hospitals(48.78, 9.18, 3).await;
        for pair in hospitals.windows(2) {
            assert!(pair[0].effective_eta_minutes <= pair[1].effective_eta_minutes);
        }
    }

    #[tokio::test]
    async fn different_cities_get_different_hospitals() {
        let service = MapsService::from_env();
        let istanbul: Vec<String> = service
            .nearest_hospitals(41.01, 28.98, 3)
            .await
            .into_iter()
            .map(|h| h.name)
            .collect();
        let stuttgart: Vec<String> = service
            .nearest_hospitals(48.78, 9.18, 3)
            .await
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_ne!(istanbul, stuttgart);
        assert!(istanbul.iter().all(|name| !stuttgart.contains(name)));
    }

    #[tokio::test]
    async fn occupancy_penalty_reorders_candidates() {
        // The full hospital is a few minutes closer but its 60 minute
        // penalty must push it behind the empty one.
        let near_but_full = hospital("Near Full", 48.79, 9.19, Occupancy::Full);
        let far_but_empty = hospital("Far Empty", 48.85, 9.25, Occupancy::Low);
        let service = offline_service(vec![near_but_full, far_but_empty]);

        let ranked = service.nearest_hospitals(48.78, 9.18, 2).await;
        assert_eq!(ranked[0].name, "Far Empty");
        assert_eq!(ranked[1].name, "Near Full");
        assert!(ranked[0].eta_minutes > ranked[1].eta_minutes);
        assert!(ranked[0].effective_eta_minutes < ranked[1].effective_eta_minutes);
    }

    #[tokio::test]
    async fn eta_to_specific_hospital_is_positive() {
        let service = MapsService::from_env();
        let eta = service.eta_to_hospital(48.80, 9.20, 48.78, 9.17).await;
        assert!(eta.eta_minutes > 0);
        assert!(eta.distance_km > 0.0);
    }

    #[test]
    fn effective_eta_adds_the_penalty() {
        let entry = rank_entry(
            hospital("H", 48.78, 9.18, Occupancy::High),
            fallback_eta(48.80, 9.20, 48.78, 9.18),
        );
        assert_eq!(
            entry.effective_eta_minutes,
            entry.eta_minutes + 25
        );
    }
}
