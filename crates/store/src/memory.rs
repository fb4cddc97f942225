//! In-memory repository over concurrent maps, seedable with the demo
//! datasets.

use crate::repository::Repository;
use dashmap::DashMap;
use dreamtraffic_core::seed;
use dreamtraffic_core::types::{
    ApprovalEvent, ApprovalStatus, Campaign, Creative, DspSpec, SupplyPath, TraffickingRecord,
};
use dreamtraffic_core::{DreamTrafficError, DtResult};
use parking_lot::RwLock;
use tracing::info;

/// DashMap-backed store. Campaigns and creatives key by id; events and
/// trafficking records are append-only logs.
#[derive(Default)]
pub struct MemoryStore {
    campaigns: DashMap<i64, Campaign>,
    creatives: DashMap<i64, Creative>,
    approval_events: RwLock<Vec<ApprovalEvent>>,
    trafficking: RwLock<Vec<TraffickingRecord>>,
    supply_paths: Vec<SupplyPath>,
    dsp_specs: Vec<DspSpec>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with the demo campaign, creative, supply paths,
    /// DSP specs, and the happy-path approval timeline.
    pub fn seeded() -> Self {
        let store = Self {
            campaigns: DashMap::new(),
            creatives: DashMap::new(),
            approval_events: RwLock::new(seed::approval_timeline()),
            trafficking: RwLock::new(Vec::new()),
            supply_paths: seed::supply_paths(),
            dsp_specs: seed::dsp_specs(),
        };
        let campaign = seed::demo_campaign();
        let creative = seed::demo_creative();
        info!(
            campaign = %campaign.name,
            supply_paths = store.supply_paths.len(),
            "seeded in-memory store"
        );
        store.campaigns.insert(campaign.id, campaign);
        store.creatives.insert(creative.id, creative);
        store
    }
}

impl Repository for MemoryStore {
    fn campaigns(&self) -> Vec<Campaign> {
        let mut all: Vec<Campaign> = self.campaigns.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|c| std::cmp::Reverse(c.id));
        all
    }

    fn creatives(&self, campaign_id: Option<i64>) -> Vec<Creative> {
        let mut all: Vec<Creative> = self
            .creatives
            .iter()
            .map(|e| e.value().clone())
            .filter(|c| campaign_id.map_or(true, |id| c.campaign_id == id))
            .collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    fn creative(&self, creative_id: i64) -> DtResult<Creative> {
        self.creatives
            .get(&creative_id)
            .map(|e| e.value().clone())
            .ok_or(DreamTrafficError::CreativeNotFound(creative_id))
    }

    fn approval_events(&self, creative_id: i64) -> Vec<ApprovalEvent> {
        let mut events: Vec<ApprovalEvent> = self
            .approval_events
            .read()
            .iter()
            .filter(|e| e.creative_id == creative_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        events
    }

    fn trafficking_records(&self, creative_id: Option<i64>) -> Vec<TraffickingRecord> {
        let mut records: Vec<TraffickingRecord> = self
            .trafficking
            .read()
            .iter()
            .filter(|r| creative_id.map_or(true, |id| r.creative_id == id))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records
    }

    fn supply_paths(&self) -> Vec<SupplyPath> {
        self.supply_paths.clone()
    }

    fn dsp_specs(&self) -> Vec<DspSpec> {
        self.dsp_specs.clone()
    }

    fn insert_creative(&self, creative: Creative) -> DtResult<()> {
        self.creatives.insert(creative.id, creative);
        Ok(())
    }

    fn set_approval_status(&self, creative_id: i64, status: ApprovalStatus) -> DtResult<()> {
        let mut entry = self
            .creatives
            .get_mut(&creative_id)
            .ok_or(DreamTrafficError::CreativeNotFound(creative_id))?;
        entry.approval_status = status;
        Ok(())
    }

    fn set_vast_url(&self, creative_id: i64, vast_url: &str) -> DtResult<()> {
        let mut entry = self
            .creatives
            .get_mut(&creative_id)
            .ok_or(DreamTrafficError::CreativeNotFound(creative_id))?;
        entry.vast_url = Some(vast_url.to_string());
        Ok(())
    }

    fn append_approval_event(&self, event: ApprovalEvent) -> DtResult<()> {
        self.approval_events.write().push(event);
        Ok(())
    }

    fn insert_trafficking_record(&self, record: TraffickingRecord) -> DtResult<()> {
        self.trafficking.write().push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_seeded_store_counts() {
        let store = MemoryStore::seeded();
        assert_eq!(store.campaigns().len(), 1);
        assert_eq!(store.creatives(None).len(), 1);
        assert_eq!(store.supply_paths().len(), 14);
        assert_eq!(store.approval_events(1).len(), 4);
        assert!(store.trafficking_records(None).is_empty());
    }

    #[test]
    fn test_creatives_filtered_by_campaign() {
        let store = MemoryStore::seeded();
        assert_eq!(store.creatives(Some(1)).len(), 1);
        assert!(store.creatives(Some(99)).is_empty());
    }

    #[test]
    fn test_missing_creative_errors() {
        let store = MemoryStore::seeded();
        assert!(matches!(
            store.creative(999),
            Err(DreamTrafficError::CreativeNotFound(999))
        ));
    }

    #[test]
    fn test_status_update_roundtrip() {
        let store = MemoryStore::seeded();
        store
            .set_approval_status(1, ApprovalStatus::Paused)
            .unwrap();
        assert_eq!(store.creative(1).unwrap().approval_status, ApprovalStatus::Paused);
    }

    #[test]
    fn test_approval_events_ordered_by_time() {
        let store = MemoryStore::seeded();
        let mut out_of_order = seed::approval_timeline()[0].clone();
        out_of_order.timestamp = Utc::now();
        store.append_approval_event(out_of_order).unwrap();

        let events = store.approval_events(1);
        for pair in events.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }
}
