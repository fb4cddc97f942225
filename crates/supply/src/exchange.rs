//! Exchange routing — T-Groups, SmartSwitch-style scoring, DSP↔SSP matching.
//!
//! Models the routing layer between DSPs and SSPs. Scores are simulated
//! from known-good pair affinities plus configurable jitter; real routing
//! would be driven by historical win rates, latency, and fill rates.

use crate::ssp::SspRegistry;
use dreamtraffic_core::config::ExchangeConfig;
use dreamtraffic_core::types::PlacementType;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of exchange routing for one DSP → SSP pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub dsp: String,
    pub ssp: String,
    pub t_group: String,
    pub smartswitch_score: f64,
    pub estimated_latency_ms: u32,
    pub estimated_win_rate: f64,
    pub fee_pct: f64,
    pub route_type: RouteType,
    pub simulated: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    TGroup,
    SmartSwitch,
    Direct,
}

/// Explicit DSP targeting rules for supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TGroup {
    pub name: String,
    pub dsp: String,
    pub allowed_ssps: Vec<String>,
    pub blocked_ssps: Vec<String>,
    pub format_filter: Vec<PlacementType>,
    pub min_bid_floor: f64,
}

// Fee tiers: high-volume DSPs route at a reduced rate.
const BASE_FEE_PCT: f64 = 2.0;
const PREMIUM_FEE_PCT: f64 = 1.5;
const CHALLENGER_FEE_PCT: f64 = 2.5;

const PREMIUM_DSPS: &[&str] = &["amazon", "thetradedesk", "dv360"];
const CHALLENGER_DSPS: &[&str] = &["stackadapt", "adelphic"];

/// Routes a DSP to eligible SSPs via T-Group filtering and scoring.
pub struct ExchangeRouter {
    t_groups: Vec<TGroup>,
    score_jitter: f64,
}

impl ExchangeRouter {
    pub fn new(config: &ExchangeConfig) -> Self {
        Self {
            t_groups: default_t_groups(),
            // A negative jitter would make the sampling range empty.
            score_jitter: config.score_jitter.max(0.0),
        }
    }

    /// Eligible routes for a DSP and placement, best score first.
    pub fn route(&self, dsp: &str, placement: PlacementType) -> Vec<RouteResult> {
        let t_group = self.find_t_group(dsp);

        let eligible: Vec<String> = match t_group {
            Some(tg) => tg
                .allowed_ssps
                .iter()
                .filter(|s| !tg.blocked_ssps.contains(s))
                .cloned()
                .collect(),
            None => SspRegistry::list_all().into_iter().map(|s| s.key).collect(),
        };

        let mut rng = rand::thread_rng();
        let mut results: Vec<RouteResult> = Vec::new();
        for ssp_key in eligible {
            let Ok(ssp) = SspRegistry::get(&ssp_key) else {
                continue;
            };
            if !ssp.supported_formats.contains(&placement) {
                continue;
            }
            let base = pair_affinity(dsp, &ssp_key);
            let score = base + rng.gen_range(-self.score_jitter..=self.score_jitter);
            results.push(RouteResult {
                dsp: dsp.to_string(),
                ssp: ssp_key,
                t_group: t_group.map(|tg| tg.name.clone()).unwrap_or_else(|| "default".to_string()),
                smartswitch_score: score,
                estimated_latency_ms: rng.gen_range(60..=120),
                estimated_win_rate: rng.gen_range(0.08..=0.22),
                fee_pct: fee_for_dsp(dsp),
                route_type: if t_group.is_some() {
                    RouteType::TGroup
                } else {
                    RouteType::SmartSwitch
                },
                simulated: true,
            });
        }

        results.sort_by(|a, b| {
            b.smartswitch_score
                .partial_cmp(&a.smartswitch_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        debug!(dsp, routes = results.len(), "exchange routing complete");
        results
    }

    /// Full DSP → SSP routing adjacency from the configured T-Groups.
    pub fn supply_map(&self) -> Vec<(String, Vec<String>)> {
        self.t_groups
            .iter()
            .map(|tg| (tg.dsp.clone(), tg.allowed_ssps.clone()))
            .collect()
    }

    fn find_t_group(&self, dsp: &str) -> Option<&TGroup> {
        if let Some(tg) = self.t_groups.iter().find(|tg| tg.dsp == dsp) {
            return Some(tg);
        }
        if CHALLENGER_DSPS.contains(&dsp) {
            return self.t_groups.iter().find(|tg| tg.name == "challenger_broad");
        }
        None
    }
}

fn default_t_groups() -> Vec<TGroup> {
    vec![
        TGroup {
            name: "amazon_premium".to_string(),
            dsp: "amazon".to_string(),
            allowed_ssps: strings(&["magnite", "pubmatic", "index_exchange"]),
            blocked_ssps: vec![],
            format_filter: vec![PlacementType::Olv, PlacementType::Stv],
            min_bid_floor: 5.0,
        },
        TGroup {
            name: "ttd_open".to_string(),
            dsp: "thetradedesk".to_string(),
            allowed_ssps: strings(&["magnite", "pubmatic", "index_exchange"]),
            blocked_ssps: vec![],
            format_filter: vec![PlacementType::Olv, PlacementType::Stv],
            min_bid_floor: 3.0,
        },
        TGroup {
            name: "dv360_google".to_string(),
            dsp: "dv360".to_string(),
            allowed_ssps: strings(&["magnite", "pubmatic", "index_exchange"]),
            blocked_ssps: vec![],
            format_filter: vec![PlacementType::Olv, PlacementType::Stv],
            min_bid_floor: 4.0,
        },
        TGroup {
            name: "challenger_broad".to_string(),
            dsp: "challenger".to_string(),
            allowed_ssps: strings(&["pubmatic", "magnite"]),
            blocked_ssps: vec![],
            format_filter: vec![PlacementType::Olv],
            min_bid_floor: 2.0,
        },
    ]
}

/// Known-good pairing affinities; everything else gets a flat baseline.
fn pair_affinity(dsp: &str, ssp: &str) -> f64 {
    match (dsp, ssp) {
        ("amazon", "magnite") => 0.92,
        ("amazon", "pubmatic") => 0.88,
        ("amazon", "index_exchange") => 0.85,
        ("thetradedesk", "pubmatic") => 0.90,
        ("thetradedesk", "magnite") => 0.87,
        ("thetradedesk", "index_exchange") => 0.84,
        ("dv360", "freewheel") => 0.95,
        ("dv360", "magnite") => 0.88,
        _ => 0.75,
    }
}

fn fee_for_dsp(dsp: &str) -> f64 {
    if PREMIUM_DSPS.contains(&dsp) {
        PREMIUM_FEE_PCT
    } else if CHALLENGER_DSPS.contains(&dsp) {
        CHALLENGER_FEE_PCT
    } else {
        BASE_FEE_PCT
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ExchangeRouter {
        ExchangeRouter::new(&ExchangeConfig::default())
    }

    #[test]
    fn test_route_amazon_olv() {
        let routes = router().route("amazon", PlacementType::Olv);
        assert_eq!(routes.len(), 3);
        for r in &routes {
            assert_eq!(r.t_group, "amazon_premium");
            assert_eq!(r.route_type, RouteType::TGroup);
            assert!((r.fee_pct - PREMIUM_FEE_PCT).abs() < f64::EPSILON);
            assert!(r.simulated);
        }
    }

    #[test]
    fn test_routes_sorted_by_score() {
        let routes = router().route("amazon", PlacementType::Olv);
        for pair in routes.windows(2) {
            assert!(pair[0].smartswitch_score >= pair[1].smartswitch_score);
        }
    }

    #[test]
    fn test_challenger_falls_back_to_broad_group() {
        let routes = router().route("stackadapt", PlacementType::Olv);
        assert!(!routes.is_empty());
        for r in &routes {
            assert_eq!(r.t_group, "challenger_broad");
            assert!((r.fee_pct - CHALLENGER_FEE_PCT).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_freewheel_excluded_for_olv() {
        // No T-Group for an unknown DSP -> all SSPs considered, but
        // FreeWheel only carries STV inventory.
        let routes = router().route("unknown-dsp", PlacementType::Olv);
        assert!(routes.iter().all(|r| r.ssp != "freewheel"));
        let stv_routes = router().route("unknown-dsp", PlacementType::Stv);
        assert!(stv_routes.iter().any(|r| r.ssp == "freewheel"));
    }

    #[test]
    fn test_negative_jitter_clamped_to_zero() {
        let router = ExchangeRouter::new(&ExchangeConfig { score_jitter: -0.5 });
        let routes = router.route("amazon", PlacementType::Olv);
        assert_eq!(routes.len(), 3);
        // With zero jitter the scores are exactly the pair affinities.
        let magnite = routes.iter().find(|r| r.ssp == "magnite").unwrap();
        assert!((magnite.smartswitch_score - 0.92).abs() < f64::EPSILON);
    }

    #[test]
    fn test_supply_map_covers_all_t_groups() {
        let map = router().supply_map();
        assert_eq!(map.len(), 4);
        let amazon = map.iter().find(|(dsp, _)| dsp == "amazon").unwrap();
        assert_eq!(amazon.1.len(), 3);
    }
}
