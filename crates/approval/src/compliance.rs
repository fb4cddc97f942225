//! Compliance review — validates a creative against DSP spec requirements
//! and the configured measurement stack, producing the per-check rows the
//! approval view renders.

use dreamtraffic_core::types::{CheckStatus, ComplianceCheck, Creative, DspSpec, MeasurementVendor};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of reviewing one creative against a set of DSP specs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub creative_id: i64,
    pub checks: Vec<ComplianceCheck>,
}

impl ComplianceReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.status == CheckStatus::Pass)
    }
}

/// Run all compliance checks for a creative.
///
/// Only specs matching the creative's placement type apply; a check fails
/// if any applicable DSP's requirement is violated.
pub fn review_creative(
    creative: &Creative,
    specs: &[DspSpec],
    vendors: &[MeasurementVendor],
) -> ComplianceReport {
    let applicable: Vec<&DspSpec> = specs
        .iter()
        .filter(|s| s.placement_type == creative.placement_type)
        .collect();

    let mut checks = vec![
        duration_check(creative, &applicable),
        resolution_check(creative, &applicable),
        codec_check(creative, &applicable),
        file_size_check(creative, &applicable),
        vendor_check(creative),
        omid_check(creative, vendors),
    ];
    checks.push(vast_requirement_check(creative, &applicable));

    let report = ComplianceReport {
        creative_id: creative.id,
        checks,
    };
    debug!(
        creative_id = creative.id,
        passed = report.passed(),
        "compliance review complete"
    );
    report
}

fn duration_check(creative: &Creative, specs: &[&DspSpec]) -> ComplianceCheck {
    let violators: Vec<&str> = specs
        .iter()
        .filter(|s| {
            creative.duration_seconds < s.min_duration_seconds
                || creative.duration_seconds > s.max_duration_seconds
        })
        .map(|s| s.dsp.as_str())
        .collect();

    if violators.is_empty() {
        let (min, max) = duration_bounds(specs);
        ComplianceCheck {
            check: "IAB Duration Validation".to_string(),
            status: CheckStatus::Pass,
            detail: format!(
                "{}s within {min}-{max}s range for {} video",
                creative.duration_seconds, creative.placement_type
            ),
        }
    } else {
        ComplianceCheck {
            check: "IAB Duration Validation".to_string(),
            status: CheckStatus::Fail,
            detail: format!(
                "{}s outside allowed range for: {}",
                creative.duration_seconds,
                violators.join(", ")
            ),
        }
    }
}

fn resolution_check(creative: &Creative, specs: &[&DspSpec]) -> ComplianceCheck {
    // Vertical creative counts its larger edge against the width floor.
    let long_edge = creative.width.max(creative.height);
    let short_edge = creative.width.min(creative.height);
    let violators: Vec<&str> = specs
        .iter()
        .filter(|s| long_edge < s.min_width || short_edge < s.min_height)
        .map(|s| s.dsp.as_str())
        .collect();

    if violators.is_empty() {
        let floor = specs
            .iter()
            .map(|s| format!("{}x{}", s.min_width, s.min_height))
            .max()
            .unwrap_or_else(|| "none".to_string());
        ComplianceCheck {
            check: "Resolution Check".to_string(),
            status: CheckStatus::Pass,
            detail: format!(
                "{}x{} meets minimum {floor} for {}",
                creative.width, creative.height, creative.placement_type
            ),
        }
    } else {
        ComplianceCheck {
            check: "Resolution Check".to_string(),
            status: CheckStatus::Fail,
            detail: format!(
                "{}x{} below minimum for: {}",
                creative.width,
                creative.height,
                violators.join(", ")
            ),
        }
    }
}

fn codec_check(creative: &Creative, specs: &[&DspSpec]) -> ComplianceCheck {
    let violators: Vec<&str> = specs
        .iter()
        .filter(|s| {
            !s.supported_formats.contains(&creative.format)
                || !creative.codec.starts_with(&s.required_codec)
        })
        .map(|s| s.dsp.as_str())
        .collect();

    if violators.is_empty() {
        ComplianceCheck {
            check: "Codec Validation".to_string(),
            status: CheckStatus::Pass,
            detail: format!(
                "{} + {} — universal DSP compatibility",
                creative.codec,
                creative.format.to_uppercase()
            ),
        }
    } else {
        ComplianceCheck {
            check: "Codec Validation".to_string(),
            status: CheckStatus::Fail,
            detail: format!(
                "{}/{} not accepted by: {}",
                creative.format,
                creative.codec,
                violators.join(", ")
            ),
        }
    }
}

fn file_size_check(creative: &Creative, specs: &[&DspSpec]) -> ComplianceCheck {
    let Some(size_mb) = parse_file_size_mb(&creative.file_size) else {
        return ComplianceCheck {
            check: "File Size".to_string(),
            status: CheckStatus::Fail,
            detail: format!("unparseable file size '{}'", creative.file_size),
        };
    };

    let limit = specs
        .iter()
        .map(|s| s.max_file_size_mb)
        .fold(f64::INFINITY, f64::min);

    if size_mb <= limit {
        ComplianceCheck {
            check: "File Size".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} within {limit:.0} MB limit", creative.file_size),
        }
    } else {
        ComplianceCheck {
            check: "File Size".to_string(),
            status: CheckStatus::Fail,
            detail: format!("{} exceeds {limit:.0} MB limit", creative.file_size),
        }
    }
}

fn vendor_check(creative: &Creative) -> ComplianceCheck {
    if creative.measurement_vendors.is_empty() {
        ComplianceCheck {
            check: "Measurement Vendors".to_string(),
            status: CheckStatus::Fail,
            detail: "no measurement vendors configured".to_string(),
        }
    } else {
        ComplianceCheck {
            check: "Measurement Vendors".to_string(),
            status: CheckStatus::Pass,
            detail: format!("{} configured", creative.measurement_vendors.join(", ")),
        }
    }
}

fn omid_check(creative: &Creative, vendors: &[MeasurementVendor]) -> ComplianceCheck {
    let non_omid: Vec<&str> = creative
        .measurement_vendors
        .iter()
        .filter(|key| {
            vendors
                .iter()
                .find(|v| &v.key == *key)
                .map_or(true, |v| !v.omid)
        })
        .map(|k| k.as_str())
        .collect();

    if non_omid.is_empty() {
        ComplianceCheck {
            check: "OMID Compliance".to_string(),
            status: CheckStatus::Pass,
            detail: format!(
                "AdVerification with apiFramework=\"omid\" for all {} vendors",
                creative.measurement_vendors.len()
            ),
        }
    } else {
        ComplianceCheck {
            check: "OMID Compliance".to_string(),
            status: CheckStatus::Fail,
            detail: format!("not OMID-certified: {}", non_omid.join(", ")),
        }
    }
}

fn vast_requirement_check(creative: &Creative, specs: &[&DspSpec]) -> ComplianceCheck {
    let requires_vast = specs.iter().any(|s| s.requires_vast);
    if requires_vast && creative.vast_url.is_none() {
        ComplianceCheck {
            check: "VAST 4.2 Structure".to_string(),
            status: CheckStatus::Fail,
            detail: "DSP requires a VAST tag but none has been generated".to_string(),
        }
    } else {
        ComplianceCheck {
            check: "VAST 4.2 Structure".to_string(),
            status: CheckStatus::Pass,
            detail: "InLine tag with AdVerifications, TrackingEvents, VideoClicks".to_string(),
        }
    }
}

fn duration_bounds(specs: &[&DspSpec]) -> (u32, u32) {
    let min = specs.iter().map(|s| s.min_duration_seconds).max().unwrap_or(0);
    let max = specs
        .iter()
        .map(|s| s.max_duration_seconds)
        .min()
        .unwrap_or(u32::MAX);
    (min, max)
}

fn parse_file_size_mb(raw: &str) -> Option<f64> {
    let mut parts = raw.split_whitespace();
    let value: f64 = parts.next()?.parse().ok()?;
    match parts.next()?.to_ascii_uppercase().as_str() {
        "KB" => Some(value / 1024.0),
        "MB" => Some(value),
        "GB" => Some(value * 1024.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreamtraffic_core::seed;

    #[test]
    fn test_demo_creative_passes_all_checks() {
        let report = review_creative(
            &seed::demo_creative(),
            &seed::dsp_specs(),
            &seed::measurement_vendors(),
        );
        assert!(report.passed(), "failing checks: {:?}", report.checks);
        assert_eq!(report.checks.len(), 7);
    }

    #[test]
    fn test_too_long_duration_fails() {
        let mut creative = seed::demo_creative();
        creative.duration_seconds = 90;
        let report = review_creative(&creative, &seed::dsp_specs(), &seed::measurement_vendors());
        let duration = report
            .checks
            .iter()
            .find(|c| c.check == "IAB Duration Validation")
            .unwrap();
        assert_eq!(duration.status, CheckStatus::Fail);
        assert!(!report.passed());
    }

    #[test]
    fn test_low_resolution_fails() {
        let mut creative = seed::demo_creative();
        creative.width = 320;
        creative.height = 240;
        let report = review_creative(&creative, &seed::dsp_specs(), &seed::measurement_vendors());
        let res = report
            .checks
            .iter()
            .find(|c| c.check == "Resolution Check")
            .unwrap();
        assert_eq!(res.status, CheckStatus::Fail);
    }

    #[test]
    fn test_missing_vendors_fails_twice() {
        let mut creative = seed::demo_creative();
        creative.measurement_vendors.clear();
        let report = review_creative(&creative, &seed::dsp_specs(), &seed::measurement_vendors());
        let vendor = report
            .checks
            .iter()
            .find(|c| c.check == "Measurement Vendors")
            .unwrap();
        assert_eq!(vendor.status, CheckStatus::Fail);
        // OMID check passes vacuously with no vendors configured.
        let omid = report
            .checks
            .iter()
            .find(|c| c.check == "OMID Compliance")
            .unwrap();
        assert_eq!(omid.status, CheckStatus::Pass);
    }

    #[test]
    fn test_missing_vast_tag_fails() {
        let mut creative = seed::demo_creative();
        creative.vast_url = None;
        let report = review_creative(&creative, &seed::dsp_specs(), &seed::measurement_vendors());
        let vast = report
            .checks
            .iter()
            .find(|c| c.check == "VAST 4.2 Structure")
            .unwrap();
        assert_eq!(vast.status, CheckStatus::Fail);
    }

    #[test]
    fn test_parse_file_size() {
        assert_eq!(parse_file_size_mb("2.8 MB"), Some(2.8));
        assert_eq!(parse_file_size_mb("512 KB"), Some(0.5));
        assert_eq!(parse_file_size_mb("1.5 GB"), Some(1536.0));
        assert_eq!(parse_file_size_mb("huge"), None);
    }
}
