//! The metrics aggregator: stateless arithmetic over supply paths, DSP
//! statuses, and measurement vendors.

use dreamtraffic_core::types::{AuditStatus, DspStatus, MeasurementVendor, SupplyPath};
use dreamtraffic_core::{DreamTrafficError, DtResult};
use serde::{Deserialize, Serialize};

/// Number of DSPs whose creative audit has passed.
pub fn approved_count(statuses: &[DspStatus]) -> usize {
    statuses
        .iter()
        .filter(|s| s.audit_status == AuditStatus::Approved)
        .count()
}

/// Publisher's share of gross spend after the DSP, exchange, and SSP fees.
///
/// Deliberately unclamped: a fee stack summing over 100 produces a negative
/// net, which downstream layers surface as a data-quality anomaly rather
/// than silently correcting (see [`anomalous_paths`]).
pub fn publisher_net(path: &SupplyPath) -> f64 {
    100.0 - (path.dsp_fee_pct + path.exchange_fee_pct + path.ssp_fee_pct)
}

/// Mean publisher net across the paths of one DSP.
///
/// Returns `None` when no path matches `dsp_name`; callers must treat the
/// empty group explicitly instead of dividing by zero.
pub fn average_net(paths: &[SupplyPath], dsp_name: &str) -> Option<f64> {
    let nets: Vec<f64> = paths
        .iter()
        .filter(|p| p.dsp == dsp_name)
        .map(publisher_net)
        .collect();
    if nets.is_empty() {
        return None;
    }
    Some(nets.iter().sum::<f64>() / nets.len() as f64)
}

/// Combined measurement vendor cost in dollars per mille. Zero when no
/// vendors are configured.
pub fn total_measurement_cpm(vendors: &[MeasurementVendor]) -> f64 {
    vendors.iter().map(|v| v.cpm).sum()
}

/// Impressions the budget buys at an assumed media CPM.
///
/// The assumed CPM is an input assumption, not data; a zero, negative, or
/// non-finite value is rejected up front.
pub fn estimated_impressions(budget: f64, assumed_cpm: f64) -> DtResult<f64> {
    if !assumed_cpm.is_finite() || assumed_cpm <= 0.0 {
        return Err(DreamTrafficError::Validation(format!(
            "assumed CPM must be a positive number, got {assumed_cpm}"
        )));
    }
    Ok((budget / assumed_cpm) * 1000.0)
}

/// Impressions one path is expected to win out of the campaign total.
///
/// Win rates are independent per-path estimates — they are not a
/// probability partition, so no normalization happens here.
pub fn path_impressions(total_estimated_impressions: f64, path: &SupplyPath) -> f64 {
    total_estimated_impressions * path.win_rate
}

/// Per-DSP fee averages used by the supply-chain comparison table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DspFeeComparison {
    pub dsp: String,
    pub avg_dsp_fee: f64,
    pub avg_total_cost: f64,
    pub avg_publisher_net: f64,
    pub path_count: usize,
}

/// Group paths by DSP and average each group's fee stack.
///
/// The result is sorted ascending by mean total supply cost, so the first
/// entry is the lowest-cost DSP. Equal costs keep first-encountered DSP
/// order (the sort is stable).
pub fn fee_comparison_by_dsp(paths: &[SupplyPath]) -> Vec<DspFeeComparison> {
    // Insertion-ordered grouping so the tie-break is deterministic.
    let mut groups: Vec<(String, Vec<&SupplyPath>)> = Vec::new();
    for path in paths {
        match groups.iter_mut().find(|(name, _)| *name == path.dsp) {
            Some((_, members)) => members.push(path),
            None => groups.push((path.dsp.clone(), vec![path])),
        }
    }

    let mut rows: Vec<DspFeeComparison> = groups
        .into_iter()
        .map(|(dsp, members)| {
            let n = members.len() as f64;
            let avg_dsp_fee = members.iter().map(|p| p.dsp_fee_pct).sum::<f64>() / n;
            let avg_total_cost = members
                .iter()
                .map(|p| p.dsp_fee_pct + p.exchange_fee_pct + p.ssp_fee_pct)
                .sum::<f64>()
                / n;
            let avg_publisher_net =
                members.iter().map(|p| publisher_net(p)).sum::<f64>() / n;
            DspFeeComparison {
                dsp,
                avg_dsp_fee,
                avg_total_cost,
                avg_publisher_net,
                path_count: members.len(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        a.avg_total_cost
            .partial_cmp(&b.avg_total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    rows
}

/// Difference in percentage points between two precomputed average costs.
///
/// `b - a`: positive when DSP `a` is the cheaper of the two.
pub fn savings_percentage_points(dsp_a_avg_cost: f64, dsp_b_avg_cost: f64) -> f64 {
    dsp_b_avg_cost - dsp_a_avg_cost
}

/// Paths whose fee stack exceeds 100% of gross spend.
///
/// These yield a negative publisher net and should be flagged for review,
/// never displayed as a positive share.
pub fn anomalous_paths(paths: &[SupplyPath]) -> Vec<&SupplyPath> {
    paths.iter().filter(|p| publisher_net(p) < 0.0).collect()
}
