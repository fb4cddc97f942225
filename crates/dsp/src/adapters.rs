//! DSP adapter trait and per-platform implementations.
//!
//! Each adapter translates an upload into the platform-specific request
//! shape and simulates the platform's response.

use dreamtraffic_core::types::{AuditStatus, PlacementType};
use dreamtraffic_core::{DreamTrafficError, DtResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

/// Creative upload parameters common to all DSPs.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub video_url: String,
    pub vast_url: String,
    pub duration_seconds: u32,
    pub width: u32,
    pub height: u32,
    pub placement_type: PlacementType,
    pub campaign_name: String,
}

/// Result of uploading a creative to a DSP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResult {
    pub dsp: String,
    pub asset_id: String,
    pub creative_id: String,
    pub audit_status: AuditStatus,
    pub placement_type: PlacementType,
    pub vast_url: String,
    pub request_payload: Value,
    pub response_payload: Value,
    pub simulated: bool,
}

/// Base interface for all DSP integrations.
pub trait DspAdapter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Upload a creative asset and create a creative object in the DSP.
    fn upload_creative(&self, request: &UploadRequest) -> DtResult<UploadResult>;

    /// Check the audit/review status of a creative.
    fn check_audit_status(&self, creative_id: &str) -> AuditStatus;

    fn supported_placements(&self) -> &'static [PlacementType];
}

/// Resolve an adapter by DSP key.
pub fn adapter_for(key: &str) -> DtResult<Box<dyn DspAdapter>> {
    match key {
        "amazon" => Ok(Box::new(AmazonDspAdapter)),
        "thetradedesk" => Ok(Box::new(TradeDeskAdapter)),
        "dv360" => Ok(Box::new(Dv360Adapter)),
        "stackadapt" => Ok(Box::new(ChallengerAdapter::stackadapt())),
        "adelphic" => Ok(Box::new(ChallengerAdapter::adelphic())),
        other => Err(DreamTrafficError::UnknownDsp(other.to_string())),
    }
}

fn short_id(prefix: &str) -> String {
    format!("{prefix}-{}", &Uuid::new_v4().simple().to_string()[..12])
}

// ─── Amazon DSP ─────────────────────────────────────────────────────────────

/// Amazon DSP — OLV/STV, Certified Supply Exchange, post-June-2025 fee
/// schedule (managed-service cut from ~15% to 12%).
pub struct AmazonDspAdapter;

impl AmazonDspAdapter {
    pub const MANAGED_SERVICE_FEE: f64 = 0.12;
    pub const SELF_SERVICE_FEE: f64 = 0.10;
    pub const CERTIFIED_SUPPLY: &'static [&'static str] =
        &["magnite", "pubmatic", "index_exchange"];
}

impl DspAdapter for AmazonDspAdapter {
    fn name(&self) -> &'static str {
        "amazon"
    }

    fn upload_creative(&self, request: &UploadRequest) -> DtResult<UploadResult> {
        let asset_id = short_id("amzn-asset");
        let creative_id = short_id("amzn-cr");

        // Unknown placements fall back to OLV, as the platform does.
        let placement = if self.supported_placements().contains(&request.placement_type) {
            request.placement_type
        } else {
            PlacementType::Olv
        };

        let request_payload = json!({
            "advertiserId": "AMZN_ADV_DEMO",
            "creativeType": "VIDEO",
            "placementType": placement.to_string().to_uppercase(),
            "videoAsset": {
                "url": request.video_url,
                "vastTagUrl": request.vast_url,
                "duration": request.duration_seconds,
                "width": request.width,
                "height": request.height,
            },
            "campaignName": request.campaign_name,
            "certifiedSupplyExchange": Self::CERTIFIED_SUPPLY,
            "feeSchedule": {
                "type": "managed_service",
                "rate": Self::MANAGED_SERVICE_FEE,
                "effective_date": "2025-06-01",
            },
        });

        let response_payload = json!({
            "assetId": asset_id,
            "creativeId": creative_id,
            "auditStatus": "pending",
            "estimatedReviewTime": "24-48 hours",
            "certifiedSupplyPartners": Self::CERTIFIED_SUPPLY,
            "_simulated": true,
        });

        Ok(UploadResult {
            dsp: self.name().to_string(),
            asset_id,
            creative_id,
            audit_status: AuditStatus::Pending,
            placement_type: placement,
            vast_url: request.vast_url.clone(),
            request_payload,
            response_payload,
            simulated: true,
        })
    }

    fn check_audit_status(&self, _creative_id: &str) -> AuditStatus {
        // Simulation: review is always in flight.
        AuditStatus::UnderReview
    }

    fn supported_placements(&self) -> &'static [PlacementType] {
        &[PlacementType::Olv, PlacementType::Stv]
    }
}

// ─── The Trade Desk ─────────────────────────────────────────────────────────

/// The Trade Desk — OpenPath supply, UID 2.0 identity.
pub struct TradeDeskAdapter;

impl DspAdapter for TradeDeskAdapter {
    fn name(&self) -> &'static str {
        "thetradedesk"
    }

    fn upload_creative(&self, request: &UploadRequest) -> DtResult<UploadResult> {
        let asset_id = short_id("ttd-asset");
        let creative_id = short_id("ttd-cr");

        let request_payload = json!({
            "AdvertiserId": "ttd-adv-demo",
            "CreativeName": request.campaign_name,
            "VideoCreative": {
                "VastUrl": request.vast_url,
                "MediaUrl": request.video_url,
                "DurationInSeconds": request.duration_seconds,
                "Width": request.width,
                "Height": request.height,
            },
            "SupplyPreference": "OpenPath",
        });

        let response_payload = json!({
            "CreativeId": creative_id,
            "AssetId": asset_id,
            "AuditStatus": "pending",
            "_simulated": true,
        });

        Ok(UploadResult {
            dsp: self.name().to_string(),
            asset_id,
            creative_id,
            audit_status: AuditStatus::Pending,
            placement_type: request.placement_type,
            vast_url: request.vast_url.clone(),
            request_payload,
            response_payload,
            simulated: true,
        })
    }

    fn check_audit_status(&self, _creative_id: &str) -> AuditStatus {
        AuditStatus::UnderReview
    }

    fn supported_placements(&self) -> &'static [PlacementType] {
        &[PlacementType::Olv, PlacementType::Stv, PlacementType::Preroll]
    }
}

// ─── DV360 ──────────────────────────────────────────────────────────────────

/// Google Display & Video 360 — YouTube plus open web video.
pub struct Dv360Adapter;

impl DspAdapter for Dv360Adapter {
    fn name(&self) -> &'static str {
        "dv360"
    }

    fn upload_creative(&self, request: &UploadRequest) -> DtResult<UploadResult> {
        let asset_id = short_id("dv3-asset");
        let creative_id = short_id("dv3-cr");

        let request_payload = json!({
            "advertiserId": "dv360-adv-demo",
            "displayName": request.campaign_name,
            "creativeType": "CREATIVE_TYPE_VIDEO",
            "vastTagUrl": request.vast_url,
            "dimensions": { "widthPixels": request.width, "heightPixels": request.height },
        });

        let response_payload = json!({
            "creativeId": creative_id,
            "assetId": asset_id,
            "reviewStatus": { "approvalStatus": "APPROVAL_STATUS_PENDING_NOT_SERVABLE" },
            "_simulated": true,
        });

        Ok(UploadResult {
            dsp: self.name().to_string(),
            asset_id,
            creative_id,
            audit_status: AuditStatus::Pending,
            placement_type: request.placement_type,
            vast_url: request.vast_url.clone(),
            request_payload,
            response_payload,
            simulated: true,
        })
    }

    fn check_audit_status(&self, _creative_id: &str) -> AuditStatus {
        AuditStatus::UnderReview
    }

    fn supported_placements(&self) -> &'static [PlacementType] {
        &[PlacementType::Olv, PlacementType::Stv]
    }
}

// ─── Challenger DSPs ────────────────────────────────────────────────────────

/// Shared adapter for challenger platforms (StackAdapt, Adelphic/Viant).
pub struct ChallengerAdapter {
    name: &'static str,
    id_prefix: &'static str,
}

impl ChallengerAdapter {
    pub fn stackadapt() -> Self {
        Self {
            name: "stackadapt",
            id_prefix: "sa",
        }
    }

    pub fn adelphic() -> Self {
        Self {
            name: "adelphic",
            id_prefix: "adl",
        }
    }
}

impl DspAdapter for ChallengerAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn upload_creative(&self, request: &UploadRequest) -> DtResult<UploadResult> {
        if !self.supported_placements().contains(&request.placement_type) {
            return Err(DreamTrafficError::UploadRejected {
                dsp: self.name.to_string(),
                reason: format!("{} placements not supported", request.placement_type),
            });
        }

        let asset_id = short_id(&format!("{}-asset", self.id_prefix));
        let creative_id = short_id(&format!("{}-cr", self.id_prefix));

        let request_payload = json!({
            "platform": self.name,
            "name": request.campaign_name,
            "vast_url": request.vast_url,
            "video_url": request.video_url,
            "duration": request.duration_seconds,
        });

        let response_payload = json!({
            "creative_id": creative_id,
            "asset_id": asset_id,
            "status": "pending",
            "_simulated": true,
        });

        Ok(UploadResult {
            dsp: self.name.to_string(),
            asset_id,
            creative_id,
            audit_status: AuditStatus::Pending,
            placement_type: request.placement_type,
            vast_url: request.vast_url.clone(),
            request_payload,
            response_payload,
            simulated: true,
        })
    }

    fn check_audit_status(&self, _creative_id: &str) -> AuditStatus {
        AuditStatus::Pending
    }

    fn supported_placements(&self) -> &'static [PlacementType] {
        &[PlacementType::Olv]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload_request(placement: PlacementType) -> UploadRequest {
        UploadRequest {
            video_url: "https://cdn.luma.example/hero-6s.mp4".to_string(),
            vast_url: "https://vast.dreamtraffic.demo/inline/1".to_string(),
            duration_seconds: 6,
            width: 720,
            height: 1280,
            placement_type: placement,
            campaign_name: "Luma AI CTV Launch".to_string(),
        }
    }

    #[test]
    fn test_adapter_for_known_keys() {
        for key in ["amazon", "thetradedesk", "dv360", "stackadapt", "adelphic"] {
            assert_eq!(adapter_for(key).unwrap().name(), key);
        }
    }

    #[test]
    fn test_adapter_for_unknown_key() {
        assert!(matches!(
            adapter_for("metaads"),
            Err(DreamTrafficError::UnknownDsp(_))
        ));
    }

    #[test]
    fn test_amazon_upload_shape() {
        let result = AmazonDspAdapter
            .upload_creative(&upload_request(PlacementType::Olv))
            .unwrap();
        assert!(result.asset_id.starts_with("amzn-asset-"));
        assert!(result.creative_id.starts_with("amzn-cr-"));
        assert_eq!(result.audit_status, AuditStatus::Pending);
        assert!(result.simulated);
        assert_eq!(
            result.request_payload["feeSchedule"]["rate"],
            AmazonDspAdapter::MANAGED_SERVICE_FEE
        );
        assert_eq!(result.request_payload["placementType"], "OLV");
    }

    #[test]
    fn test_amazon_unknown_placement_falls_back_to_olv() {
        let result = AmazonDspAdapter
            .upload_creative(&upload_request(PlacementType::Preroll))
            .unwrap();
        assert_eq!(result.placement_type, PlacementType::Olv);
    }

    #[test]
    fn test_challenger_rejects_stv() {
        let err = ChallengerAdapter::stackadapt()
            .upload_creative(&upload_request(PlacementType::Stv))
            .unwrap_err();
        assert!(matches!(err, DreamTrafficError::UploadRejected { .. }));
    }

    #[test]
    fn test_audit_status_simulation() {
        assert_eq!(
            AmazonDspAdapter.check_audit_status("amzn-cr-x"),
            AuditStatus::UnderReview
        );
        assert_eq!(
            ChallengerAdapter::adelphic().check_audit_status("adl-cr-x"),
            AuditStatus::Pending
        );
    }

    #[test]
    fn test_generated_ids_unique() {
        let a = TradeDeskAdapter
            .upload_creative(&upload_request(PlacementType::Olv))
            .unwrap();
        let b = TradeDeskAdapter
            .upload_creative(&upload_request(PlacementType::Olv))
            .unwrap();
        assert_ne!(a.creative_id, b.creative_id);
    }
}
