//! SSP models — Magnite, PubMatic, Index Exchange, FreeWheel.
//!
//! Placeholder capability records; real integration would involve direct
//! SSP partnerships and header bidding configuration.

use dreamtraffic_core::types::PlacementType;
use dreamtraffic_core::{DreamTrafficError, DtResult};
use serde::{Deserialize, Serialize};

/// SSP platform configuration and capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SspConfig {
    pub key: String,
    pub name: String,
    pub take_rate_pct: f64,
    pub supported_formats: Vec<PlacementType>,
    pub openrtb_version: String,
    pub specialization: String,
    pub streaming_pod_support: bool,
    pub header_bidding: bool,
    pub notes: String,
}

/// Registry of SSP configurations.
pub struct SspRegistry;

impl SspRegistry {
    pub fn list_all() -> Vec<SspConfig> {
        vec![
            SspConfig {
                key: "magnite".to_string(),
                name: "Magnite".to_string(),
                take_rate_pct: 15.0,
                supported_formats: vec![PlacementType::Olv, PlacementType::Stv],
                openrtb_version: "2.6".to_string(),
                specialization: "Premium video, CTV programmatic guaranteed".to_string(),
                streaming_pod_support: true,
                header_bidding: true,
                notes: "Largest independent sell-side platform. Strong CTV inventory."
                    .to_string(),
            },
            SspConfig {
                key: "pubmatic".to_string(),
                name: "PubMatic".to_string(),
                take_rate_pct: 14.0,
                supported_formats: vec![PlacementType::Olv, PlacementType::Stv],
                openrtb_version: "2.6".to_string(),
                specialization: "Cloud infrastructure, OpenWrap header bidding".to_string(),
                streaming_pod_support: false,
                header_bidding: true,
                notes: "Cloud-native SSP. Strong in mobile + video.".to_string(),
            },
            SspConfig {
                key: "index_exchange".to_string(),
                name: "Index Exchange".to_string(),
                take_rate_pct: 12.0,
                supported_formats: vec![PlacementType::Olv, PlacementType::Stv],
                openrtb_version: "2.6".to_string(),
                specialization: "Transparency, header bidding marketplace".to_string(),
                streaming_pod_support: false,
                header_bidding: true,
                notes: "Known for supply path transparency and exchange-level reporting."
                    .to_string(),
            },
            SspConfig {
                key: "freewheel".to_string(),
                name: "FreeWheel (Comcast)".to_string(),
                take_rate_pct: 18.0,
                supported_formats: vec![PlacementType::Stv],
                openrtb_version: "2.6".to_string(),
                specialization: "Premium streaming TV, ad pod management".to_string(),
                streaming_pod_support: true,
                header_bidding: false,
                notes: "Premium CTV/streaming supply. OpenRTB 2.6 pod bidding support."
                    .to_string(),
            },
        ]
    }

    pub fn get(key: &str) -> DtResult<SspConfig> {
        Self::list_all()
            .into_iter()
            .find(|s| s.key == key)
            .ok_or_else(|| DreamTrafficError::UnknownSsp(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_known_ssp() {
        let magnite = SspRegistry::get("magnite").unwrap();
        assert_eq!(magnite.name, "Magnite");
        assert!(magnite.streaming_pod_support);
    }

    #[test]
    fn test_get_unknown_ssp_errors() {
        assert!(matches!(
            SspRegistry::get("nope"),
            Err(DreamTrafficError::UnknownSsp(_))
        ));
    }

    #[test]
    fn test_freewheel_is_stv_only() {
        let fw = SspRegistry::get("freewheel").unwrap();
        assert!(!fw.supported_formats.contains(&PlacementType::Olv));
        assert!(fw.supported_formats.contains(&PlacementType::Stv));
    }
}
