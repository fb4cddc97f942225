//! Campaign report summary — the derived block behind the report view,
//! assembled from the aggregator's individual figures.

use crate::aggregator::{
    approved_count, average_net, estimated_impressions, fee_comparison_by_dsp,
    savings_percentage_points, total_measurement_cpm, DspFeeComparison,
};
use dreamtraffic_core::types::{Campaign, DspStatus, MeasurementVendor, SupplyPath};
use dreamtraffic_core::DtResult;
use serde::{Deserialize, Serialize};

/// Display-ready figures for the campaign report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignReportSummary {
    pub campaign_name: String,
    pub advertiser: String,
    pub budget: f64,
    pub dsp_count: usize,
    pub approved_dsp_count: usize,
    pub supply_path_count: usize,
    /// Mean publisher net across the lowest-cost DSP's paths, when it has any.
    pub lowest_cost_dsp_avg_net: Option<f64>,
    pub total_measurement_cpm: f64,
    pub assumed_cpm: f64,
    pub estimated_impressions: f64,
    /// Fee comparison rows, cheapest DSP first.
    pub fee_comparison: Vec<DspFeeComparison>,
    /// Percentage-point spread between the cheapest and second-cheapest DSP.
    pub savings_vs_runner_up: Option<f64>,
}

/// Assemble the report summary from the static collections.
///
/// Fails only on an invalid assumed CPM; every other degenerate input
/// (no paths, no statuses) produces empty or `None` fields.
pub fn build_report(
    campaign: &Campaign,
    statuses: &[DspStatus],
    paths: &[SupplyPath],
    vendors: &[MeasurementVendor],
    assumed_cpm: f64,
) -> DtResult<CampaignReportSummary> {
    let impressions = estimated_impressions(campaign.budget, assumed_cpm)?;
    let comparison = fee_comparison_by_dsp(paths);

    let lowest_cost_dsp_avg_net = comparison
        .first()
        .and_then(|row| average_net(paths, &row.dsp));

    let savings_vs_runner_up = match comparison.as_slice() {
        [cheapest, runner_up, ..] => Some(savings_percentage_points(
            cheapest.avg_total_cost,
            runner_up.avg_total_cost,
        )),
        _ => None,
    };

    Ok(CampaignReportSummary {
        campaign_name: campaign.name.clone(),
        advertiser: campaign.advertiser.clone(),
        budget: campaign.budget,
        dsp_count: statuses.len(),
        approved_dsp_count: approved_count(statuses),
        supply_path_count: paths.len(),
        lowest_cost_dsp_avg_net,
        total_measurement_cpm: total_measurement_cpm(vendors),
        assumed_cpm,
        estimated_impressions: impressions,
        fee_comparison: comparison,
        savings_vs_runner_up,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamtraffic_core::seed;

    const EPS: f64 = 1e-6;

    #[test]
    fn test_build_report_over_seed_data() {
        let report = build_report(
            &seed::demo_campaign(),
            &seed::dsp_statuses(),
            &seed::supply_paths(),
            &seed::measurement_vendors(),
            10.0,
        )
        .unwrap();

        assert_eq!(report.dsp_count, 5);
        assert_eq!(report.approved_dsp_count, 3);
        assert_eq!(report.supply_path_count, 14);
        assert!((report.estimated_impressions - 25_000_000.0).abs() < EPS);
        assert!((report.total_measurement_cpm - 0.075).abs() < EPS);

        // Amazon DSP is the cheapest at 27.9; TTD is the runner-up at 30.375.
        assert_eq!(report.fee_comparison[0].dsp, "Amazon DSP");
        let savings = report.savings_vs_runner_up.unwrap();
        assert!((savings - 2.475).abs() < EPS);
        let net = report.lowest_cost_dsp_avg_net.unwrap();
        assert!((net - 72.1).abs() < EPS);
    }

    #[test]
    fn test_build_report_rejects_bad_cpm() {
        let result = build_report(
            &seed::demo_campaign(),
            &seed::dsp_statuses(),
            &seed::supply_paths(),
            &seed::measurement_vendors(),
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_build_report_empty_collections() {
        let report = build_report(&seed::demo_campaign(), &[], &[], &[], 10.0).unwrap();
        assert_eq!(report.approved_dsp_count, 0);
        assert!(report.fee_comparison.is_empty());
        assert_eq!(report.lowest_cost_dsp_avg_net, None);
        assert_eq!(report.savings_vs_runner_up, None);
    }
}
