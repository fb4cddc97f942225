use dreamtraffic_core::types::{
    ApprovalEvent, ApprovalStatus, Campaign, Creative, DspSpec, SupplyPath, TraffickingRecord,
};
use dreamtraffic_core::DtResult;

/// Read/write access to pipeline records.
///
/// The read side mirrors the six list operations the report and dashboard
/// views consume; the write side is what the approval workflow and
/// trafficking manager need to advance a creative through its lifecycle.
pub trait Repository: Send + Sync {
    /// All campaigns, newest first.
    fn campaigns(&self) -> Vec<Campaign>;

    /// Creatives, optionally filtered to one campaign, newest first.
    fn creatives(&self, campaign_id: Option<i64>) -> Vec<Creative>;

    fn creative(&self, creative_id: i64) -> DtResult<Creative>;

    /// Approval events for a creative, oldest first.
    fn approval_events(&self, creative_id: i64) -> Vec<ApprovalEvent>;

    /// Trafficking records, optionally filtered to one creative, newest first.
    fn trafficking_records(&self, creative_id: Option<i64>) -> Vec<TraffickingRecord>;

    fn supply_paths(&self) -> Vec<SupplyPath>;

    fn dsp_specs(&self) -> Vec<DspSpec>;

    fn insert_creative(&self, creative: Creative) -> DtResult<()>;

    fn set_approval_status(&self, creative_id: i64, status: ApprovalStatus) -> DtResult<()>;

    fn set_vast_url(&self, creative_id: i64, vast_url: &str) -> DtResult<()>;

    fn append_approval_event(&self, event: ApprovalEvent) -> DtResult<()>;

    fn insert_trafficking_record(&self, record: TraffickingRecord) -> DtResult<()>;
}
