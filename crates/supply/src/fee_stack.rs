//! Full supply chain fee calculator — creative generation through
//! publisher net.

use dreamtraffic_core::config::FeeStackConfig;
use dreamtraffic_core::types::SupplyPath;
use dreamtraffic_metrics::{fee_comparison_by_dsp, publisher_net};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Fee breakdown for a single supply path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeBreakdown {
    pub dsp: String,
    pub exchange: String,
    pub ssp: String,
    /// AI generation cost amortized as dollars per mille.
    pub creative_cpm: f64,
    pub dsp_fee_pct: f64,
    pub exchange_fee_pct: f64,
    pub ssp_fee_pct: f64,
    /// Total measurement vendor CPM on this path.
    pub measurement_cpm: f64,
    pub total_supply_cost_pct: f64,
    pub publisher_net_pct: f64,
    pub notes: String,
}

/// One row of the DSP comparison, averaged over that DSP's paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DspComparison {
    pub dsp: String,
    pub path_count: usize,
    pub avg_dsp_fee: f64,
    pub avg_total_supply_cost: f64,
    pub avg_publisher_net: f64,
    pub avg_measurement_cpm: f64,
    pub creative_cpm: f64,
}

/// Calculate fee stacks across supply paths.
pub struct FeeStackCalculator {
    cost_per_video: f64,
    impression_goal: u64,
}

impl FeeStackCalculator {
    pub fn new(config: &FeeStackConfig) -> Self {
        Self {
            cost_per_video: config.cost_per_video,
            impression_goal: config.impression_goal,
        }
    }

    /// Creative generation cost amortized as CPM over the impression goal.
    pub fn creative_cpm(&self) -> f64 {
        (self.cost_per_video / self.impression_goal as f64) * 1000.0
    }

    /// Fee breakdown for a single supply path.
    pub fn calculate_path(&self, path: &SupplyPath) -> FeeBreakdown {
        let total = path.dsp_fee_pct + path.exchange_fee_pct + path.ssp_fee_pct;
        FeeBreakdown {
            dsp: path.dsp.clone(),
            exchange: path.exchange.clone(),
            ssp: path.ssp.clone(),
            creative_cpm: self.creative_cpm(),
            dsp_fee_pct: path.dsp_fee_pct,
            exchange_fee_pct: path.exchange_fee_pct,
            ssp_fee_pct: path.ssp_fee_pct,
            measurement_cpm: path.measurement_cpm,
            total_supply_cost_pct: total,
            publisher_net_pct: publisher_net(path),
            notes: path.notes.clone(),
        }
    }

    /// Fee breakdowns for every supplied path.
    pub fn calculate_all(&self, paths: &[SupplyPath]) -> Vec<FeeBreakdown> {
        paths.iter().map(|p| self.calculate_path(p)).collect()
    }

    /// Average fee stacks by DSP, cheapest total supply cost first.
    pub fn compare_dsps(&self, paths: &[SupplyPath]) -> Vec<DspComparison> {
        fee_comparison_by_dsp(paths)
            .into_iter()
            .map(|row| {
                let cpms: Vec<f64> = paths
                    .iter()
                    .filter(|p| p.dsp == row.dsp)
                    .map(|p| p.measurement_cpm)
                    .collect();
                let avg_measurement_cpm = if cpms.is_empty() {
                    0.0
                } else {
                    cpms.iter().sum::<f64>() / cpms.len() as f64
                };
                DspComparison {
                    dsp: row.dsp,
                    path_count: row.path_count,
                    avg_dsp_fee: row.avg_dsp_fee,
                    avg_total_supply_cost: row.avg_total_cost,
                    avg_publisher_net: row.avg_publisher_net,
                    avg_measurement_cpm,
                    creative_cpm: self.creative_cpm(),
                }
            })
            .collect()
    }

    /// Render one breakdown as the CLI's readable table.
    pub fn format_breakdown(&self, fb: &FeeBreakdown, base_cpm: f64) -> String {
        let exchange = if fb.exchange.is_empty() {
            "direct"
        } else {
            &fb.exchange
        };
        let mut out = String::new();
        let _ = writeln!(out, "Supply Path: {} -> {} -> {}", fb.dsp, exchange, fb.ssp);
        let _ = writeln!(out, "{}", "-".repeat(50));
        let _ = writeln!(
            out,
            "  Creative Gen         ${:.4}/CPM (amortized)",
            fb.creative_cpm
        );
        let _ = writeln!(
            out,
            "  DSP Fee              {:.1}%  (${:.2})",
            fb.dsp_fee_pct,
            base_cpm * fb.dsp_fee_pct / 100.0
        );
        let _ = writeln!(
            out,
            "  Exchange Fee         {:.1}%  (${:.2})",
            fb.exchange_fee_pct,
            base_cpm * fb.exchange_fee_pct / 100.0
        );
        let _ = writeln!(
            out,
            "  SSP Fee              {:.1}%  (${:.2})",
            fb.ssp_fee_pct,
            base_cpm * fb.ssp_fee_pct / 100.0
        );
        let _ = writeln!(out, "  Measurement          ${:.3}/CPM", fb.measurement_cpm);
        let _ = writeln!(out, "{}", "-".repeat(50));
        let _ = writeln!(
            out,
            "  Total Supply Cost    {:.1}% + measurement",
            fb.total_supply_cost_pct
        );
        let _ = writeln!(
            out,
            "  Publisher Net        {:.1}%  (${:.2})",
            fb.publisher_net_pct,
            base_cpm * fb.publisher_net_pct / 100.0
        );
        if !fb.notes.is_empty() {
            let _ = writeln!(out, "  Note: {}", fb.notes);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamtraffic_core::seed;

    const EPS: f64 = 1e-9;

    fn calculator() -> FeeStackCalculator {
        FeeStackCalculator::new(&FeeStackConfig::default())
    }

    #[test]
    fn test_creative_cpm_amortization() {
        // $0.50 per video over 100k impressions -> $0.005 per mille.
        assert!((calculator().creative_cpm() - 0.005).abs() < EPS);
    }

    #[test]
    fn test_calculate_path() {
        let paths = seed::supply_paths();
        let fb = calculator().calculate_path(&paths[0]);
        assert_eq!(fb.dsp, "Amazon DSP");
        assert!((fb.total_supply_cost_pct - 29.0).abs() < EPS);
        assert!((fb.publisher_net_pct - 71.0).abs() < EPS);
    }

    #[test]
    fn test_compare_dsps_amazon_advantage() {
        // The strategic narrative: Amazon's post-2025 fee schedule beats TTD.
        let comparison = calculator().compare_dsps(&seed::supply_paths());
        let amazon = comparison.iter().find(|c| c.dsp == "Amazon DSP").unwrap();
        let ttd = comparison
            .iter()
            .find(|c| c.dsp == "The Trade Desk")
            .unwrap();
        assert!(amazon.avg_dsp_fee < ttd.avg_dsp_fee);
        assert!(amazon.avg_total_supply_cost < ttd.avg_total_supply_cost);
        assert_eq!(comparison[0].dsp, "Amazon DSP");
    }

    #[test]
    fn test_compare_dsps_measurement_cpm() {
        let comparison = calculator().compare_dsps(&seed::supply_paths());
        let amazon = comparison.iter().find(|c| c.dsp == "Amazon DSP").unwrap();
        assert!((amazon.avg_measurement_cpm - 0.02).abs() < EPS);
    }

    #[test]
    fn test_format_breakdown() {
        let paths = seed::supply_paths();
        let calc = calculator();
        let fb = calc.calculate_path(&paths[0]);
        let formatted = calc.format_breakdown(&fb, 10.0);
        assert!(formatted.contains("Amazon DSP"));
        assert!(formatted.contains("Magnite"));
        assert!(formatted.contains("12.0%"));
        assert!(formatted.contains("29.0%"));
    }
}
