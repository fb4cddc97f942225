//! Shared entity types for the DreamTraffic pipeline.
//!
//! Everything here is plain data: campaigns, AI-generated creatives, the
//! approval audit trail, DSP trafficking state, and the supply-path fee
//! records that the metrics and fee-stack layers aggregate over.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a campaign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

/// An advertiser campaign with flight dates and budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub advertiser: String,
    pub objective: String,
    /// Free-text audience description (not a targeting expression).
    pub audience: String,
    pub placements: Vec<String>,
    /// Total campaign budget in whole dollars.
    pub budget: f64,
    pub flight_start: NaiveDate,
    pub flight_end: NaiveDate,
    pub brief: String,
    pub status: CampaignStatus,
}

/// Approval lifecycle of a creative, from first draft to archived.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Draft,
    PendingReview,
    RevisionRequested,
    Approved,
    Trafficked,
    Active,
    Paused,
    Archived,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Draft => "draft",
            ApprovalStatus::PendingReview => "pending_review",
            ApprovalStatus::RevisionRequested => "revision_requested",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Trafficked => "trafficked",
            ApprovalStatus::Active => "active",
            ApprovalStatus::Paused => "paused",
            ApprovalStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DSP-side creative audit status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    Pending,
    UnderReview,
    Approved,
    Rejected,
}

impl std::fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditStatus::Pending => "pending",
            AuditStatus::UnderReview => "under_review",
            AuditStatus::Approved => "approved",
            AuditStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// Video placement type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlacementType {
    /// Online video (desktop/mobile in-stream).
    Olv,
    /// Streaming TV / CTV.
    Stv,
    Preroll,
}

impl std::fmt::Display for PlacementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlacementType::Olv => "olv",
            PlacementType::Stv => "stv",
            PlacementType::Preroll => "preroll",
        };
        f.write_str(s)
    }
}

/// An AI-generated video creative and its trafficking metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creative {
    pub id: i64,
    pub campaign_id: i64,
    pub name: String,
    /// Generation model tag, e.g. "ray2".
    pub model: String,
    pub luma_generation_id: String,
    pub video_url: String,
    pub prompt: String,
    pub duration_seconds: u32,
    pub width: u32,
    pub height: u32,
    pub aspect_ratio: String,
    pub format: String,
    pub codec: String,
    pub file_size: String,
    pub placement_type: PlacementType,
    /// Measurement vendor keys wired into the VAST tag.
    pub measurement_vendors: Vec<String>,
    pub approval_status: ApprovalStatus,
    pub vast_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-DSP trafficking status card data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DspStatus {
    pub dsp: String,
    pub key: String,
    pub audit_status: AuditStatus,
    /// Display fee rate, e.g. "12%".
    pub fee_rate: String,
    pub creative_id: String,
    pub capabilities: Vec<String>,
    pub certified_supply: Vec<String>,
    /// Display color for the dashboard badge.
    pub color: String,
}

/// Open-auction vs. private marketplace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    OpenExchange,
    Pmp,
}

/// One DSP → exchange → SSP supply path with its fee stack.
///
/// Fee percentages are taken as-is from the path record: they are never
/// clamped, so a stack summing over 100 yields a negative publisher net.
/// Consumers flag that condition instead of correcting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyPath {
    pub dsp: String,
    pub exchange: String,
    pub ssp: String,
    pub deal_type: DealType,
    pub dsp_fee_pct: f64,
    pub exchange_fee_pct: f64,
    pub ssp_fee_pct: f64,
    /// Total measurement vendor cost on this path, in dollars per mille.
    pub measurement_cpm: f64,
    /// Estimated auction win rate, 0.0..=1.0. Win rates are independent
    /// per-path estimates; they are not normalized to sum to 1 per DSP.
    pub win_rate: f64,
    pub latency_ms: u32,
    pub notes: String,
}

/// Third-party measurement vendor and its CPM cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementVendor {
    pub name: String,
    pub key: String,
    /// Category label, e.g. "Viewability + Brand Safety".
    pub category: String,
    pub cpm: f64,
    pub omid: bool,
}

/// One transition in a creative's approval audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalEvent {
    pub creative_id: i64,
    pub from_status: ApprovalStatus,
    pub to_status: ApprovalStatus,
    pub reviewer: String,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

/// Record of a creative upload to a single DSP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraffickingRecord {
    pub creative_id: i64,
    pub dsp: String,
    pub dsp_creative_id: String,
    pub dsp_asset_id: String,
    pub vast_url: String,
    pub audit_status: AuditStatus,
    pub placement_type: PlacementType,
    pub request_payload: serde_json::Value,
    pub response_payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// Per-DSP creative spec requirements used by compliance review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DspSpec {
    pub dsp: String,
    pub placement_type: PlacementType,
    pub min_duration_seconds: u32,
    pub max_duration_seconds: u32,
    pub min_width: u32,
    pub min_height: u32,
    pub supported_formats: Vec<String>,
    pub required_codec: String,
    pub max_file_size_mb: f64,
    pub requires_vast: bool,
}

/// Outcome of a single compliance check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
}

/// One row in a compliance review report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub check: String,
    pub status: CheckStatus,
    pub detail: String,
}
