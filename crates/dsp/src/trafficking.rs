//! Trafficking manager — fans a creative out to its target DSPs and
//! records each upload in the repository.

use chrono::Utc;
use dreamtraffic_core::types::{Creative, TraffickingRecord};
use dreamtraffic_core::DtResult;
use dreamtraffic_store::Repository;
use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::{adapter_for, UploadRequest, UploadResult};

/// Uploads creatives to demand-side platforms and persists the
/// trafficking state for each.
pub struct TraffickingManager {
    store: Arc<dyn Repository>,
}

impl TraffickingManager {
    pub fn new(store: Arc<dyn Repository>) -> Self {
        Self { store }
    }

    /// Upload one creative to each target DSP. Platforms that reject the
    /// creative are skipped with a warning; at least one successful upload
    /// is required for the call to succeed.
    pub fn traffic_creative(
        &self,
        creative_id: i64,
        dsp_keys: &[String],
        campaign_name: &str,
    ) -> DtResult<Vec<UploadResult>> {
        let creative = self.store.creative(creative_id)?;
        let request = upload_request(&creative, campaign_name);

        let mut results = Vec::with_capacity(dsp_keys.len());
        for key in dsp_keys {
            let adapter = adapter_for(key)?;
            match adapter.upload_creative(&request) {
                Ok(result) => {
                    self.store.insert_trafficking_record(TraffickingRecord {
                        creative_id,
                        dsp: result.dsp.clone(),
                        dsp_creative_id: result.creative_id.clone(),
                        dsp_asset_id: result.asset_id.clone(),
                        vast_url: result.vast_url.clone(),
                        audit_status: result.audit_status,
                        placement_type: result.placement_type,
                        request_payload: result.request_payload.clone(),
                        response_payload: result.response_payload.clone(),
                        created_at: Utc::now(),
                    })?;
                    info!(
                        creative_id,
                        dsp = %result.dsp,
                        dsp_creative_id = %result.creative_id,
                        "creative uploaded"
                    );
                    results.push(result);
                }
                Err(err) => {
                    warn!(creative_id, dsp = %key, error = %err, "upload rejected");
                }
            }
        }

        if results.is_empty() {
            return Err(dreamtraffic_core::DreamTrafficError::UploadRejected {
                dsp: dsp_keys.join(", "),
                reason: "no target DSP accepted the creative".to_string(),
            });
        }
        Ok(results)
    }

    /// Poll each DSP for the latest audit status of a creative's uploads.
    pub fn refresh_audit_statuses(&self, creative_id: i64) -> DtResult<Vec<TraffickingRecord>> {
        let mut records = self.store.trafficking_records(Some(creative_id));
        for record in &mut records {
            let adapter = adapter_for(&record.dsp)?;
            record.audit_status = adapter.check_audit_status(&record.dsp_creative_id);
        }
        Ok(records)
    }
}

fn upload_request(creative: &Creative, campaign_name: &str) -> UploadRequest {
    UploadRequest {
        video_url: creative.video_url.clone(),
        vast_url: creative.vast_url.clone().unwrap_or_default(),
        duration_seconds: creative.duration_seconds,
        width: creative.width,
        height: creative.height,
        placement_type: creative.placement_type,
        campaign_name: campaign_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamtraffic_core::seed;
    use dreamtraffic_core::types::AuditStatus;
    use dreamtraffic_store::MemoryStore;

    fn manager() -> (TraffickingManager, i64) {
        let store = Arc::new(MemoryStore::new());
        let creative = seed::demo_creative();
        let id = creative.id;
        store.insert_creative(creative).unwrap();
        (TraffickingManager::new(store.clone()), id)
    }

    #[test]
    fn test_traffic_to_default_targets() {
        let (mgr, id) = manager();
        let targets = vec!["amazon".to_string(), "thetradedesk".to_string()];
        let results = mgr.traffic_creative(id, &targets, "Luma AI CTV Launch").unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].dsp, "amazon");
        assert_eq!(results[1].dsp, "thetradedesk");
        assert!(results.iter().all(|r| r.audit_status == AuditStatus::Pending));
    }

    #[test]
    fn test_records_persisted() {
        let store = Arc::new(MemoryStore::new());
        let creative = seed::demo_creative();
        let id = creative.id;
        store.insert_creative(creative).unwrap();
        let mgr = TraffickingManager::new(store.clone());

        mgr.traffic_creative(id, &["dv360".to_string()], "Luma AI CTV Launch")
            .unwrap();
        let records = store.trafficking_records(Some(id));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].dsp, "dv360");
        assert!(records[0].dsp_creative_id.starts_with("dv3-cr-"));
    }

    #[test]
    fn test_unknown_dsp_errors() {
        let (mgr, id) = manager();
        let err = mgr
            .traffic_creative(id, &["metaads".to_string()], "Luma AI CTV Launch")
            .unwrap_err();
        assert!(matches!(
            err,
            dreamtraffic_core::DreamTrafficError::UnknownDsp(_)
        ));
    }

    #[test]
    fn test_all_rejections_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        let mut creative = seed::demo_creative();
        creative.placement_type = dreamtraffic_core::types::PlacementType::Stv;
        let id = creative.id;
        store.insert_creative(creative).unwrap();
        let mgr = TraffickingManager::new(store);

        // StackAdapt only accepts OLV, so the lone target rejects.
        let err = mgr
            .traffic_creative(id, &["stackadapt".to_string()], "Luma AI CTV Launch")
            .unwrap_err();
        assert!(matches!(
            err,
            dreamtraffic_core::DreamTrafficError::UploadRejected { .. }
        ));
    }

    #[test]
    fn test_refresh_audit_statuses() {
        let store = Arc::new(MemoryStore::new());
        let creative = seed::demo_creative();
        let id = creative.id;
        store.insert_creative(creative).unwrap();
        let mgr = TraffickingManager::new(store);

        mgr.traffic_creative(id, &["amazon".to_string()], "Luma AI CTV Launch")
            .unwrap();
        let refreshed = mgr.refresh_audit_statuses(id).unwrap();
        assert_eq!(refreshed.len(), 1);
        assert_eq!(refreshed[0].audit_status, AuditStatus::UnderReview);
    }

    #[test]
    fn test_missing_creative_errors() {
        let (mgr, _) = manager();
        assert!(mgr
            .traffic_creative(999, &["amazon".to_string()], "x")
            .is_err());
    }
}
