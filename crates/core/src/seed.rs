//! Static demo datasets for the Luma AI CTV launch scenario.
//!
//! These mirror the seed records the pipeline is demonstrated with: one
//! campaign, one Dream Machine creative, five DSP trafficking statuses,
//! fourteen supply paths, three measurement vendors, and the approval
//! timeline of the happy path. All read-only reference data.

use crate::types::*;
use chrono::{NaiveDate, TimeZone, Utc};

pub fn demo_campaign() -> Campaign {
    Campaign {
        id: 1,
        name: "Luma AI CTV Launch".to_string(),
        advertiser: "Luma AI".to_string(),
        objective: "Brand awareness + consideration for Dream Machine".to_string(),
        audience: "Marketing decision makers, creative directors, agency planners".to_string(),
        placements: vec!["Social Video Repurposed for OLV Programmatic Activation".to_string()],
        budget: 250_000.0,
        flight_start: date(2026, 3, 1),
        flight_end: date(2026, 4, 30),
        brief: "Launch campaign for Luma AI Dream Machine targeting enterprise advertisers. \
                Showcase AI-generated video quality for programmatic social and OLV placements. \
                Demonstrate that Dream Machine creative can flow through the full programmatic \
                supply chain with measurement-grade VAST wrapping."
            .to_string(),
        status: CampaignStatus::Active,
    }
}

pub fn demo_creative() -> Creative {
    Creative {
        id: 1,
        campaign_id: 1,
        name: "DreamTraffic Hero - Luma AI Dream Machine".to_string(),
        model: "Ray2".to_string(),
        luma_generation_id: "842e3cf0-f0d6-4a1e-9c2b-7d35c08b11aa".to_string(),
        video_url: "https://dreamtraffic-demo.vercel.app/dreamtraffic-hero-6s.mp4".to_string(),
        prompt: "Cinematic macro shot of liquid light forming a glowing neural network, \
                 morphing into a city skyline at dusk, premium product-launch energy, \
                 vertical composition"
            .to_string(),
        duration_seconds: 6,
        width: 720,
        height: 1280,
        aspect_ratio: "9:16".to_string(),
        format: "mp4".to_string(),
        codec: "H.264".to_string(),
        file_size: "2.8 MB".to_string(),
        placement_type: PlacementType::Olv,
        measurement_vendors: vec![
            "ias".to_string(),
            "moat".to_string(),
            "doubleverify".to_string(),
        ],
        approval_status: ApprovalStatus::Active,
        vast_url: Some("https://vast.dreamtraffic.demo/inline/1".to_string()),
        created_at: ts(2026, 2, 9, 10, 12, 0),
    }
}

pub fn dsp_statuses() -> Vec<DspStatus> {
    vec![
        DspStatus {
            dsp: "Amazon DSP".to_string(),
            key: "amazon".to_string(),
            audit_status: AuditStatus::Approved,
            fee_rate: "12%".to_string(),
            creative_id: "amzn-cr-842e3cf0f0d6".to_string(),
            capabilities: vec![
                "OLV".to_string(),
                "STV".to_string(),
                "Audience Segments".to_string(),
            ],
            certified_supply: vec![
                "Magnite".to_string(),
                "PubMatic".to_string(),
                "Index Exchange".to_string(),
            ],
            color: "#FF9900".to_string(),
        },
        DspStatus {
            dsp: "The Trade Desk".to_string(),
            key: "thetradedesk".to_string(),
            audit_status: AuditStatus::Approved,
            fee_rate: "15%".to_string(),
            creative_id: "ttd-cr-4417ab09e2c1".to_string(),
            capabilities: vec![
                "OLV".to_string(),
                "CTV".to_string(),
                "UID 2.0".to_string(),
            ],
            certified_supply: vec!["OpenPath".to_string()],
            color: "#0099FA".to_string(),
        },
        DspStatus {
            dsp: "DV360".to_string(),
            key: "dv360".to_string(),
            audit_status: AuditStatus::Approved,
            fee_rate: "14%".to_string(),
            creative_id: "dv3-cr-90d21f6b7a54".to_string(),
            capabilities: vec![
                "OLV".to_string(),
                "YouTube".to_string(),
                "Google Audiences".to_string(),
            ],
            certified_supply: vec![],
            color: "#34A853".to_string(),
        },
        DspStatus {
            dsp: "StackAdapt".to_string(),
            key: "stackadapt".to_string(),
            audit_status: AuditStatus::UnderReview,
            fee_rate: "16%".to_string(),
            creative_id: "sa-cr-1fe8c204bb37".to_string(),
            capabilities: vec!["OLV".to_string(), "Contextual".to_string()],
            certified_supply: vec![],
            color: "#7B61FF".to_string(),
        },
        DspStatus {
            dsp: "Adelphic / Viant".to_string(),
            key: "adelphic".to_string(),
            audit_status: AuditStatus::Pending,
            fee_rate: "16%".to_string(),
            creative_id: "adl-cr-63c90ff512de".to_string(),
            capabilities: vec!["OLV".to_string(), "Household ID".to_string()],
            certified_supply: vec![],
            color: "#E94F64".to_string(),
        },
    ]
}

pub fn supply_paths() -> Vec<SupplyPath> {
    vec![
        // Amazon DSP paths
        path("Amazon DSP", "Bidswitch", "Magnite", DealType::OpenExchange, 12.0, 2.0, 15.0, 0.02, 0.18, 85, "Certified Supply Exchange partner"),
        path("Amazon DSP", "Bidswitch", "PubMatic", DealType::OpenExchange, 12.0, 2.0, 14.0, 0.02, 0.15, 90, "Cloud infra, OpenWrap"),
        path("Amazon DSP", "Bidswitch", "Index Exchange", DealType::OpenExchange, 12.0, 2.0, 12.0, 0.02, 0.20, 75, "Header bidding transparency"),
        path("Amazon DSP", "SmartSwitch", "Zeta Global", DealType::Pmp, 12.0, 1.5, 13.0, 0.02, 0.17, 80, "Data-driven PMP, identity graph"),
        path("Amazon DSP", "Direct", "FreeWheel", DealType::Pmp, 12.0, 0.0, 18.0, 0.02, 0.12, 95, "Premium streaming pods"),
        // The Trade Desk paths
        path("The Trade Desk", "Bidswitch", "Magnite", DealType::OpenExchange, 15.0, 2.0, 15.0, 0.03, 0.16, 88, "Premium video"),
        path("The Trade Desk", "Bidswitch", "PubMatic", DealType::OpenExchange, 15.0, 2.0, 14.0, 0.03, 0.14, 92, "Standard path"),
        path("The Trade Desk", "Bidswitch", "Index Exchange", DealType::OpenExchange, 15.0, 2.0, 12.0, 0.03, 0.19, 78, "Header bidding"),
        path("The Trade Desk", "SmartSwitch", "Zeta Global", DealType::Pmp, 15.0, 1.5, 13.0, 0.03, 0.15, 82, "UID 2.0 + Zeta identity"),
        // DV360 paths
        path("DV360", "Bidswitch", "Magnite", DealType::OpenExchange, 14.0, 2.0, 15.0, 0.025, 0.15, 90, "Via Bidswitch"),
        path("DV360", "Direct", "FreeWheel", DealType::Pmp, 14.0, 0.0, 18.0, 0.025, 0.10, 98, "Google-preferred path"),
        // Challenger DSP paths
        path("StackAdapt", "Bidswitch", "Magnite", DealType::OpenExchange, 16.0, 2.5, 15.0, 0.03, 0.12, 95, "Contextual targeting"),
        path("StackAdapt", "SmartSwitch", "Zeta Global", DealType::Pmp, 16.0, 2.0, 13.0, 0.03, 0.10, 88, "Household-level reach"),
        path("Adelphic / Viant", "Bidswitch", "PubMatic", DealType::OpenExchange, 16.0, 2.5, 14.0, 0.03, 0.11, 93, "Viant Household ID graph"),
    ]
}

pub fn measurement_vendors() -> Vec<MeasurementVendor> {
    vec![
        MeasurementVendor {
            name: "Integral Ad Science".to_string(),
            key: "ias".to_string(),
            category: "Viewability + Brand Safety".to_string(),
            cpm: 0.02,
            omid: true,
        },
        MeasurementVendor {
            name: "Moat by Oracle".to_string(),
            key: "moat".to_string(),
            category: "Attention + Viewability".to_string(),
            cpm: 0.03,
            omid: true,
        },
        MeasurementVendor {
            name: "DoubleVerify".to_string(),
            key: "doubleverify".to_string(),
            category: "Brand Safety + Fraud".to_string(),
            cpm: 0.025,
            omid: true,
        },
    ]
}

pub fn approval_timeline() -> Vec<ApprovalEvent> {
    vec![
        ApprovalEvent {
            creative_id: 1,
            from_status: ApprovalStatus::Draft,
            to_status: ApprovalStatus::PendingReview,
            reviewer: "Creative Director".to_string(),
            notes: "Submitted for compliance review — 6s social variant from Dream Machine Ray2"
                .to_string(),
            timestamp: ts(2026, 2, 9, 10, 15, 0),
        },
        ApprovalEvent {
            creative_id: 1,
            from_status: ApprovalStatus::PendingReview,
            to_status: ApprovalStatus::Approved,
            reviewer: "Compliance Reviewer".to_string(),
            notes: "All DSP specs validated. OMID-compliant AdVerification confirmed for IAS, \
                    MOAT, DoubleVerify. Duration within social video limits. H.264 codec verified."
                .to_string(),
            timestamp: ts(2026, 2, 9, 10, 18, 0),
        },
        ApprovalEvent {
            creative_id: 1,
            from_status: ApprovalStatus::Approved,
            to_status: ApprovalStatus::Trafficked,
            reviewer: "Trafficking Manager".to_string(),
            notes: "VAST 4.2 tag generated with full measurement wrapping. Uploaded to Amazon \
                    DSP, The Trade Desk, and DV360."
                .to_string(),
            timestamp: ts(2026, 2, 9, 10, 22, 0),
        },
        ApprovalEvent {
            creative_id: 1,
            from_status: ApprovalStatus::Trafficked,
            to_status: ApprovalStatus::Active,
            reviewer: "System".to_string(),
            notes: "DSP audits passed across all platforms. Creative now serving impressions."
                .to_string(),
            timestamp: ts(2026, 2, 9, 10, 45, 0),
        },
    ]
}

pub fn dsp_specs() -> Vec<DspSpec> {
    vec![
        DspSpec {
            dsp: "Amazon DSP".to_string(),
            placement_type: PlacementType::Olv,
            min_duration_seconds: 6,
            max_duration_seconds: 30,
            min_width: 640,
            min_height: 360,
            supported_formats: vec!["mp4".to_string(), "webm".to_string()],
            required_codec: "H.264".to_string(),
            max_file_size_mb: 500.0,
            requires_vast: true,
        },
        DspSpec {
            dsp: "Amazon DSP".to_string(),
            placement_type: PlacementType::Stv,
            min_duration_seconds: 6,
            max_duration_seconds: 30,
            min_width: 1920,
            min_height: 1080,
            supported_formats: vec!["mp4".to_string()],
            required_codec: "H.264".to_string(),
            max_file_size_mb: 500.0,
            requires_vast: true,
        },
        DspSpec {
            dsp: "The Trade Desk".to_string(),
            placement_type: PlacementType::Olv,
            min_duration_seconds: 5,
            max_duration_seconds: 60,
            min_width: 640,
            min_height: 360,
            supported_formats: vec!["mp4".to_string()],
            required_codec: "H.264".to_string(),
            max_file_size_mb: 500.0,
            requires_vast: true,
        },
        DspSpec {
            dsp: "DV360".to_string(),
            placement_type: PlacementType::Olv,
            min_duration_seconds: 5,
            max_duration_seconds: 60,
            min_width: 640,
            min_height: 360,
            supported_formats: vec!["mp4".to_string(), "webm".to_string()],
            required_codec: "H.264".to_string(),
            max_file_size_mb: 500.0,
            requires_vast: true,
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn path(
    dsp: &str,
    exchange: &str,
    ssp: &str,
    deal_type: DealType,
    dsp_fee_pct: f64,
    exchange_fee_pct: f64,
    ssp_fee_pct: f64,
    measurement_cpm: f64,
    win_rate: f64,
    latency_ms: u32,
    notes: &str,
) -> SupplyPath {
    SupplyPath {
        dsp: dsp.to_string(),
        exchange: exchange.to_string(),
        ssp: ssp.to_string(),
        deal_type,
        dsp_fee_pct,
        exchange_fee_pct,
        ssp_fee_pct,
        measurement_cpm,
        win_rate,
        latency_ms,
        notes: notes.to_string(),
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s)
        .single()
        .expect("valid seed timestamp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_path_fee_sums_under_100() {
        for p in supply_paths() {
            let total = p.dsp_fee_pct + p.exchange_fee_pct + p.ssp_fee_pct;
            assert!(total < 100.0, "path {} -> {} has fee sum {}", p.dsp, p.ssp, total);
        }
    }

    #[test]
    fn test_seed_counts() {
        assert_eq!(supply_paths().len(), 14);
        assert_eq!(dsp_statuses().len(), 5);
        assert_eq!(measurement_vendors().len(), 3);
        assert_eq!(approval_timeline().len(), 4);
    }

    #[test]
    fn test_timeline_is_ordered() {
        let timeline = approval_timeline();
        for pair in timeline.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }
}
