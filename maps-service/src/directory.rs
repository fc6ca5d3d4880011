use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::routing::haversine_km;

/// Current emergency-department occupancy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Low,
    Medium,
    High,
    Full,
}

impl Occupancy {
    /// Fixed waiting-time penalty added to the travel time when ranking
    /// candidate hospitals.
    pub fn penalty_minutes(self) -> u32 {
        match self {
            Occupancy::Low => 0,
            Occupancy::Medium => 10,
            Occupancy::High => 25,
            Occupancy::Full => 60,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Occupancy::Low => "Low",
            Occupancy::Medium => "Moderate",
            Occupancy::High => "High",
            Occupancy::Full => "Full",
        }
    }
}

/// A hospital with an emergency department
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hospital {
    pub name: String,
    /// ISO-ish country code of the demo pool ("DE", "TR", "UK")
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub address: String,
    pub occupancy: Occupancy,
}

/// Static directory of demo hospitals
///
/// In production the occupancy would come from a live hospital feed; here
/// it is simulated deterministically from the hospital name so the demo is
/// stable across restarts.
#[derive(Debug, Clone)]
pub struct HospitalDirectory {
    hospitals: Vec<Hospital>,
}

impl HospitalDirectory {
    /// Directory covering the demo regions: greater Stuttgart, Istanbul
    /// and London.
    pub fn demo() -> Self {
        let records: [(&str, &str, f64, f64, &str); 14] = [
            (
                "Klinikum Stuttgart - Katharinenhospital",
                "DE",
                48.7797,
                9.1719,
                "Kriegsbergstraße 60, 70174 Stuttgart",
            ),
            (
                "Robert-Bosch-Krankenhaus",
                "DE",
                48.8210,
                9.2042,
                "Auerbachstraße 110, 70376 Stuttgart",
            ),
            (
                "Marienhospital Stuttgart",
                "DE",
                48.7622,
                9.1680,
                "Böheimstraße 37, 70199 Stuttgart",
            ),
            (
                "Diakonie-Klinikum Stuttgart",
                "DE",
                48.7745,
                9.1655,
                "Rosenbergstraße 38, 70176 Stuttgart",
            ),
            (
                "Klinikum Esslingen",
                "DE",
                48.7483,
                9.3067,
                "Hirschlandstraße 97, 73730 Esslingen",
            ),
            (
                "Rems-Murr-Klinikum Winnenden",
                "DE",
                48.8740,
                9.4006,
                "Am Jakobsweg 1, 71364 Winnenden",
            ),
            (
                "Acıbadem Maslak Hastanesi",
                "TR",
                41.1086,
                29.0194,
                "Büyükdere Cad. No:40, Sarıyer, İstanbul",
            ),
            (
                "İstanbul Tıp Fakültesi Hastanesi",
                "TR",
                41.0091,
                28.9337,
                "Turgut Özal Millet Cad., Fatih, İstanbul",
            ),
            (
                "Memorial Şişli Hastanesi",
                "TR",
                41.0636,
                28.9852,
                "Kaptan Paşa Mah., Şişli, İstanbul",
            ),
            (
                "Cerrahpaşa Tıp Fakültesi Hastanesi",
                "TR",
                41.0042,
                28.9399,
                "Koca Mustafapaşa Cad., Fatih, İstanbul",
            ),
            (
                "St Thomas' Hospital",
                "UK",
                51.4980,
                -0.1177,
                "Westminster Bridge Rd, London SE1 7EH",
            ),
            (
                "King's College Hospital",
                "UK",
                51.4684,
                -0.0937,
                "Denmark Hill, London SE5 9RS",
            ),
            (
                "Royal London Hospital",
                "UK",
                51.5179,
                -0.0593,
                "Whitechapel Rd, London E1 1FR",
            ),
            (
                "University College Hospital",
                "UK",
                51.5246,
                -0.1340,
                "235 Euston Rd, London NW1 2BU",
            ),
        ];

        let hospitals = records
            .into_iter()
            .map(|(name, country, lat, lon, address)| Hospital {
                name: name.to_string(),
                country: country.to_string(),
                lat,
                lon,
                address: address.to_string(),
                occupancy: simulated_occupancy(name),
            })
            .collect();

        Self { hospitals }
    }

    pub fn from_hospitals(hospitals: Vec<Hospital>) -> Self {
        Self { hospitals }
    }

    pub fn all(&self) -> &[Hospital] {
        &self.hospitals
    }

    /// Candidate hospitals within `radius_km` of the patient, nearest
    /// first, capped at `max` entries.
    pub fn candidates_near(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
        max: usize,
    ) -> Vec<(Hospital, f64)> {
        let mut candidates: Vec<(Hospital, f64)> = self
            .hospitals
            .iter()
            .map(|h| (h.clone(), haversine_km(lat, lon, h.lat, h.lon)))
            .filter(|(_, dist)| *dist <= radius_km)
            .collect();

        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        candidates.truncate(max);
        candidates
    }
}

/// Deterministic but varied occupancy per hospital name.
fn simulated_occupancy(name: &str) -> Occupancy {
    let digest = Sha256::digest(name.as_bytes());
    match u16::from_be_bytes([digest[0], digest[1]]) % 4 {
        0 => Occupancy::Low,
        1 => Occupancy::Medium,
        2 => Occupancy::High,
        _ => Occupancy::Full,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn penalty_table_matches_occupancy_levels() {
        assert_eq!(Occupancy::Low.penalty_minutes(), 0);
        assert_eq!(Occupancy::Medium.penalty_minutes(), 10);
        assert_eq!(Occupancy::High.penalty_minutes(), 25);
        assert_eq!(Occupancy::Full.penalty_minutes(), 60);
    }

    #[test]
    fn occupancy_is_deterministic_per_name() {
        assert_eq!(
            simulated_occupancy("St Thomas' Hospital"),
            simulated_occupancy("St Thomas' Hospital")
        );
    }

    #[test]
    fn candidates_are_filtered_by_radius_and_sorted() {
        let directory = HospitalDirectory::demo();
        // Central Stuttgart: all Stuttgart-area hospitals, no Istanbul/London.
        let candidates = directory.candidates_near(48.78, 9.18, 150.0, 10);
        assert!(!candidates.is_empty());
        assert!(candidates.iter().all(|(h, _)| h.country == "DE"));
        for pair in candidates.windows(2) {
            assert!(pair[0].1 <= pair[1].1);
        }
    }

    #[test]
    fn candidate_count_is_capped() {
        let directory = HospitalDirectory::demo();
        let candidates = directory.candidates_near(48.78, 9.18, 150.0, 2);
        assert!(candidates.len() <= 2);
    }
}
