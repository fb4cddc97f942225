//! Derived campaign metrics — counts, fee splits, impression estimates,
//! and the DSP fee comparison over static supply-path data.
//!
//! Every function here is a pure transform over borrowed collections:
//! no I/O, no mutation, no shared state. The inputs are reference data
//! loaded once at startup and never change within a process lifetime.

pub mod aggregator;
pub mod report;

pub use aggregator::{
    anomalous_paths, approved_count, average_net, estimated_impressions, fee_comparison_by_dsp,
    path_impressions, publisher_net, savings_percentage_points, total_measurement_cpm,
    DspFeeComparison,
};
pub use report::{build_report, CampaignReportSummary};
