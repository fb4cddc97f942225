//! Measurement vendor configurations — IAS, Moat, DoubleVerify.

use dreamtraffic_core::{DreamTrafficError, DtResult};
use serde::{Deserialize, Serialize};

/// One measurement vendor's VAST wiring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    pub key: String,
    pub name: String,
    pub verification_url: String,
    pub js_url: String,
    pub cpm: f64,
    /// VAST `Verification` vendor attribute value.
    pub vendor_key: String,
}

impl VendorConfig {
    /// OMID partner identifier for VerificationParameters.
    pub fn omid_partner(&self) -> String {
        format!("com.{}", self.key)
    }
}

pub struct VendorRegistry;

impl VendorRegistry {
    pub fn list_all() -> Vec<VendorConfig> {
        vec![
            VendorConfig {
                key: "ias".to_string(),
                name: "Integral Ad Science".to_string(),
                verification_url: "https://pixel.adsafeprotected.com/services/pub".to_string(),
                js_url: "https://fw.adsafeprotected.com/rfw/dv/fwjsvid/st/291582/36966574.js"
                    .to_string(),
                cpm: 0.02,
                vendor_key: "ias-pub-291582".to_string(),
            },
            VendorConfig {
                key: "moat".to_string(),
                name: "Moat by Oracle".to_string(),
                verification_url: "https://z.moatads.com/dreamtrafficpixel/moatvideo.js"
                    .to_string(),
                js_url: "https://z.moatads.com/dreamtrafficpixel/moatvideo.js".to_string(),
                cpm: 0.03,
                vendor_key: "moat-dreamtraffic".to_string(),
            },
            VendorConfig {
                key: "doubleverify".to_string(),
                name: "DoubleVerify".to_string(),
                verification_url: "https://cdn.doubleverify.com/dvbs_src.js".to_string(),
                js_url: "https://cdn.doubleverify.com/dvbs_src.js".to_string(),
                cpm: 0.025,
                vendor_key: "dv-ctx-123456".to_string(),
            },
        ]
    }

    pub fn get(key: &str) -> DtResult<VendorConfig> {
        Self::list_all()
            .into_iter()
            .find(|v| v.key == key)
            .ok_or_else(|| DreamTrafficError::UnknownVendor(key.to_string()))
    }

    /// Resolve a list of vendor keys, failing on the first unknown key.
    pub fn resolve(keys: &[String]) -> DtResult<Vec<VendorConfig>> {
        keys.iter().map(|k| Self::get(k)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omid_partner() {
        let ias = VendorRegistry::get("ias").unwrap();
        assert_eq!(ias.omid_partner(), "com.ias");
    }

    #[test]
    fn test_resolve_all_defaults() {
        let keys: Vec<String> = ["ias", "moat", "doubleverify"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let configs = VendorRegistry::resolve(&keys).unwrap();
        assert_eq!(configs.len(), 3);
    }

    #[test]
    fn test_resolve_unknown_vendor_errors() {
        let keys = vec!["ias".to_string(), "bogus".to_string()];
        assert!(matches!(
            VendorRegistry::resolve(&keys),
            Err(DreamTrafficError::UnknownVendor(_))
        ));
    }
}
