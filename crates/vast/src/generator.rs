//! VAST 4.2 generator — InLine and Wrapper tags with AdVerification
//! elements for each configured measurement vendor.

use crate::vendors::{VendorConfig, VendorRegistry};
use crate::xml::Element;
use dreamtraffic_core::config::VastConfig;
use dreamtraffic_core::DtResult;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

const CACHE_BUSTER: &str = "[CACHEBUSTING]";
const TIMESTAMP: &str = "[TIMESTAMP]";

/// Quartile and interaction events tracked on the Linear creative.
pub const TRACKING_EVENTS: &[&str] = &[
    "start",
    "firstQuartile",
    "midpoint",
    "thirdQuartile",
    "complete",
    "pause",
    "resume",
    "mute",
    "unmute",
    "fullscreen",
    "exitFullscreen",
    "skip",
];

/// Inputs for an InLine tag.
#[derive(Debug, Clone)]
pub struct InlineParams {
    pub video_url: String,
    pub duration_seconds: u32,
    pub title: String,
    pub advertiser: String,
    /// Measurement vendor keys; empty list omits AdVerifications.
    pub vendors: Vec<String>,
    pub width: u32,
    pub height: u32,
    pub bitrate_kbps: u32,
    pub codec: String,
    /// Explicit ad id; generated when absent.
    pub ad_id: Option<String>,
}

/// Inputs for a Wrapper tag referencing another VAST document.
#[derive(Debug, Clone)]
pub struct WrapperParams {
    pub vast_ad_tag_uri: String,
    pub vendors: Vec<String>,
    pub ad_id: Option<String>,
}

/// Generates VAST 4.2 XML with measurement vendor wrapping.
pub struct VastGenerator {
    config: VastConfig,
}

impl VastGenerator {
    pub fn new(config: &VastConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// VAST 4.2 InLine tag with AdVerification elements.
    pub fn inline(&self, params: &InlineParams) -> DtResult<String> {
        let ad_id = params
            .ad_id
            .clone()
            .unwrap_or_else(|| format!("dt-{}", short_uuid()));
        let vendors = VendorRegistry::resolve(&params.vendors)?;
        let track = &self.config.tracking_base_url;

        let mut inline = Element::new("InLine")
            .child(Element::new("AdSystem").text(&self.config.ad_system))
            .child(Element::new("AdTitle").text(&params.title))
            .child(Element::new("Advertiser").text(&params.advertiser))
            .child(
                Element::new("Impression")
                    .attr("id", "dt-imp")
                    .text(&format!("{track}/impression?id={ad_id}&cb={CACHE_BUSTER}")),
            );

        if !vendors.is_empty() {
            inline = inline.child(self.ad_verifications(&vendors));
        }

        let mut tracking_events = Element::new("TrackingEvents");
        for event in TRACKING_EVENTS {
            tracking_events = tracking_events.child(
                Element::new("Tracking").attr("event", event).text(&format!(
                    "{track}/{event}?id={ad_id}&cb={CACHE_BUSTER}&ts={TIMESTAMP}"
                )),
            );
        }

        let linear = Element::new("Linear")
            .child(Element::new("Duration").text(&format_duration(params.duration_seconds)))
            .child(
                Element::new("MediaFiles").child(
                    Element::new("MediaFile")
                        .attr("delivery", "progressive")
                        .attr("type", "video/mp4")
                        .attr("width", &params.width.to_string())
                        .attr("height", &params.height.to_string())
                        .attr("codec", &params.codec)
                        .attr("bitrate", &params.bitrate_kbps.to_string())
                        .text(&params.video_url),
                ),
            )
            .child(tracking_events)
            .child(
                Element::new("VideoClicks")
                    .child(
                        Element::new("ClickThrough")
                            .attr("id", "dt-click")
                            .text(&self.config.click_through),
                    )
                    .child(
                        Element::new("ClickTracking")
                            .attr("id", "dt-click-track")
                            .text(&format!("{track}/click?id={ad_id}&cb={CACHE_BUSTER}")),
                    ),
            );

        let creatives = Element::new("Creatives").child(
            Element::new("Creative")
                .attr("id", &format!("creative-{ad_id}"))
                .attr("adId", &ad_id)
                .child(linear),
        );

        let vast = Element::new("VAST")
            .attr("version", "4.2")
            .attr("xmlns", "http://www.iab.com/VAST")
            .child(
                Element::new("Ad")
                    .attr("id", &ad_id)
                    .child(inline.child(creatives)),
            );

        info!(%ad_id, vendors = params.vendors.len(), "generated inline VAST tag");
        Ok(vast.render())
    }

    /// VAST 4.2 Wrapper tag referencing an existing tag URI.
    pub fn wrapper(&self, params: &WrapperParams) -> DtResult<String> {
        let ad_id = params
            .ad_id
            .clone()
            .unwrap_or_else(|| format!("dt-wrapper-{}", &short_uuid()[..8]));
        let vendors = VendorRegistry::resolve(&params.vendors)?;
        let track = &self.config.tracking_base_url;

        let mut wrapper = Element::new("Wrapper")
            .child(Element::new("AdSystem").text(&format!("{} Wrapper", self.config.ad_system)))
            .child(Element::new("VASTAdTagURI").text(&params.vast_ad_tag_uri))
            .child(
                Element::new("Impression")
                    .attr("id", "dt-wrapper-imp")
                    .text(&format!(
                        "{track}/wrapper-impression?id={ad_id}&cb={CACHE_BUSTER}"
                    )),
            );

        if !vendors.is_empty() {
            wrapper = wrapper.child(self.ad_verifications(&vendors));
        }

        let vast = Element::new("VAST")
            .attr("version", "4.2")
            .attr("xmlns", "http://www.iab.com/VAST")
            .child(Element::new("Ad").attr("id", &ad_id).child(wrapper));

        info!(%ad_id, "generated wrapper VAST tag");
        Ok(vast.render())
    }

    /// OMID-compliant AdVerifications block, one Verification per vendor.
    fn ad_verifications(&self, vendors: &[VendorConfig]) -> Element {
        let mut verifications = Element::new("AdVerifications");
        for vc in vendors {
            let params = json!({
                "partner": vc.omid_partner(),
                "vendorKey": vc.vendor_key,
            });
            verifications = verifications.child(
                Element::new("Verification")
                    .attr("vendor", &vc.vendor_key)
                    .child(
                        Element::new("JavaScriptResource")
                            .attr("apiFramework", "omid")
                            .attr("browserOptional", "true")
                            .text(&vc.js_url),
                    )
                    .child(
                        Element::new("TrackingEvents").child(
                            Element::new("Tracking")
                                .attr("event", "verificationNotExecuted")
                                .text(&format!(
                                    "{}/verify-not-executed?vendor={}",
                                    vc.verification_url, vc.key
                                )),
                        ),
                    )
                    .child(Element::new("VerificationParameters").text(&params.to_string())),
            );
        }
        verifications
    }
}

fn format_duration(seconds: u32) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds / 60) % 60, seconds % 60)
}

fn short_uuid() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> VastGenerator {
        VastGenerator::new(&VastConfig::default())
    }

    fn inline_params() -> InlineParams {
        InlineParams {
            video_url: "https://cdn.luma.example/hero-6s.mp4".to_string(),
            duration_seconds: 6,
            title: "DreamTraffic Hero".to_string(),
            advertiser: "Luma AI".to_string(),
            vendors: vec![
                "ias".to_string(),
                "moat".to_string(),
                "doubleverify".to_string(),
            ],
            width: 720,
            height: 1280,
            bitrate_kbps: 3700,
            codec: "H.264".to_string(),
            ad_id: Some("dt-842e3cf0f0d6".to_string()),
        }
    }

    #[test]
    fn test_inline_structure() {
        let xml = generator().inline(&inline_params()).unwrap();
        assert!(xml.starts_with("<VAST version=\"4.2\""));
        assert!(xml.contains("<Ad id=\"dt-842e3cf0f0d6\">"));
        assert!(xml.contains("<Duration>00:00:06</Duration>"));
        assert!(xml.contains("width=\"720\""));
        assert!(xml.contains("<ClickThrough id=\"dt-click\">https://lumalabs.ai</ClickThrough>"));
        // Impression ampersand must be escaped.
        assert!(xml.contains("&amp;cb=[CACHEBUSTING]"));
    }

    #[test]
    fn test_inline_has_verification_per_vendor() {
        let xml = generator().inline(&inline_params()).unwrap();
        assert_eq!(xml.matches("<Verification vendor=").count(), 3);
        assert!(xml.contains("vendor=\"ias-pub-291582\""));
        assert!(xml.contains("apiFramework=\"omid\""));
        assert!(xml.contains("verificationNotExecuted"));
        assert!(xml.contains("com.doubleverify"));
    }

    #[test]
    fn test_inline_full_quartile_tracking() {
        let xml = generator().inline(&inline_params()).unwrap();
        for event in TRACKING_EVENTS {
            assert!(
                xml.contains(&format!("<Tracking event=\"{event}\">")),
                "missing tracking event {event}"
            );
        }
    }

    #[test]
    fn test_inline_without_vendors_omits_verifications() {
        let mut params = inline_params();
        params.vendors.clear();
        let xml = generator().inline(&params).unwrap();
        assert!(!xml.contains("AdVerifications"));
    }

    #[test]
    fn test_inline_unknown_vendor_errors() {
        let mut params = inline_params();
        params.vendors = vec!["bogus".to_string()];
        assert!(generator().inline(&params).is_err());
    }

    #[test]
    fn test_wrapper_references_tag_uri() {
        let xml = generator()
            .wrapper(&WrapperParams {
                vast_ad_tag_uri: "https://vast.dreamtraffic.demo/inline/1".to_string(),
                vendors: vec!["ias".to_string()],
                ad_id: None,
            })
            .unwrap();
        assert!(xml.contains(
            "<VASTAdTagURI>https://vast.dreamtraffic.demo/inline/1</VASTAdTagURI>"
        ));
        assert!(xml.contains("<Ad id=\"dt-wrapper-"));
        assert_eq!(xml.matches("<Verification vendor=").count(), 1);
    }

    #[test]
    fn test_generated_ad_ids_are_unique() {
        let mut params = inline_params();
        params.ad_id = None;
        let a = generator().inline(&params).unwrap();
        let b = generator().inline(&params).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(6), "00:00:06");
        assert_eq!(format_duration(90), "00:01:30");
        assert_eq!(format_duration(3700), "01:01:40");
    }
}
