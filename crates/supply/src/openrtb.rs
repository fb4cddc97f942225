//! OpenRTB 2.6 bid request/response simulation for SSP supply.
//!
//! Real bid requests originate at the SSP with impression opportunities;
//! these helpers produce the same shapes for pipeline demos and tests.

use crate::ssp::SspRegistry;
use dreamtraffic_core::DtResult;
use serde_json::{json, Value};

/// Simulated OpenRTB 2.6 video bid request from an SSP.
pub fn simulate_bid_request(ssp_key: &str, creative_id: &str) -> DtResult<Value> {
    let ssp = SspRegistry::get(ssp_key)?;
    let short_id: String = creative_id.chars().take(8).collect();
    let mut video = json!({
        "mimes": ["video/mp4"],
        // VAST 2.0, 3.0, 4.x
        "protocols": [2, 5, 6],
        "w": 1920,
        "h": 1080,
        // linear in-stream
        "linearity": 1,
        "maxduration": 30,
        "minduration": 5,
    });
    if ssp.streaming_pod_support {
        video["podid"] = json!("pod-1");
    }

    Ok(json!({
        "id": format!("br-{ssp_key}-{short_id}"),
        "imp": [{
            "id": "1",
            "video": video,
            "bidfloor": 8.00,
            "bidfloorcur": "USD",
        }],
        "site": {
            "domain": format!("publisher.{ssp_key}.example.com"),
            // Arts & Entertainment
            "cat": ["IAB1"],
        },
        "device": {
            "ua": "Mozilla/5.0 (CTV)",
            // Connected TV
            "devicetype": 3,
        },
        "openrtb_version": ssp.openrtb_version,
        "_simulated": true,
    }))
}

/// Simulated OpenRTB 2.6 bid response carrying the creative's VAST tag.
pub fn simulate_bid_response(ssp_key: &str, creative_id: &str, vast_url: &str) -> Value {
    let short_id: String = creative_id.chars().take(8).collect();
    json!({
        "id": format!("bresp-{ssp_key}-{short_id}"),
        "seatbid": [{
            "bid": [{
                "id": format!("bid-{short_id}"),
                "impid": "1",
                "price": 10.50,
                "adm": vast_url,
                "crid": creative_id,
                "w": 1920,
                "h": 1080,
            }],
            "seat": "dreamtraffic",
        }],
        "cur": "USD",
        "_simulated": true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bid_request_shape() {
        let req = simulate_bid_request("magnite", "amzn-cr-842e3cf0f0d6").unwrap();
        assert_eq!(req["id"], "br-magnite-amzn-cr-");
        assert_eq!(req["imp"][0]["video"]["linearity"], 1);
        // Magnite supports ad pods.
        assert_eq!(req["imp"][0]["video"]["podid"], "pod-1");
        assert_eq!(req["_simulated"], true);
    }

    #[test]
    fn test_bid_request_no_pod_for_pubmatic() {
        let req = simulate_bid_request("pubmatic", "cr-1").unwrap();
        assert!(req["imp"][0]["video"].get("podid").is_none());
    }

    #[test]
    fn test_bid_request_unknown_ssp() {
        assert!(simulate_bid_request("nope", "cr-1").is_err());
    }

    #[test]
    fn test_bid_response_carries_vast() {
        let resp = simulate_bid_response("magnite", "cr-42", "https://vast.example/tag.xml");
        assert_eq!(resp["seatbid"][0]["bid"][0]["adm"], "https://vast.example/tag.xml");
        assert_eq!(resp["seatbid"][0]["seat"], "dreamtraffic");
    }
}
