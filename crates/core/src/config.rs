use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `DREAMTRAFFIC__`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fees: FeeStackConfig,
    #[serde(default)]
    pub vast: VastConfig,
    #[serde(default)]
    pub dsp: DspConfig,
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

/// Creative generation cost amortization for the fee stack.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeStackConfig {
    /// Estimated generation cost per 5s video, in dollars.
    #[serde(default = "default_cost_per_video")]
    pub cost_per_video: f64,
    /// Impression goal the generation cost is amortized over.
    #[serde(default = "default_impression_goal")]
    pub impression_goal: u64,
    /// Assumed media CPM used for impression estimates, in dollars.
    #[serde(default = "default_assumed_cpm")]
    pub assumed_cpm: f64,
}

impl Default for FeeStackConfig {
    fn default() -> Self {
        Self {
            cost_per_video: default_cost_per_video(),
            impression_goal: default_impression_goal(),
            assumed_cpm: default_assumed_cpm(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VastConfig {
    /// Base URL for first-party tracking pixels.
    #[serde(default = "default_tracking_base")]
    pub tracking_base_url: String,
    /// Base URL where generated inline tags are hosted.
    #[serde(default = "default_vast_base")]
    pub vast_base_url: String,
    #[serde(default = "default_ad_system")]
    pub ad_system: String,
    #[serde(default = "default_click_through")]
    pub click_through: String,
}

impl Default for VastConfig {
    fn default() -> Self {
        Self {
            tracking_base_url: default_tracking_base(),
            vast_base_url: default_vast_base(),
            ad_system: default_ad_system(),
            click_through: default_click_through(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DspConfig {
    /// DSP keys to traffic to by default.
    #[serde(default = "default_dsps")]
    pub default_targets: Vec<String>,
    #[serde(default = "default_advertiser_id")]
    pub advertiser_id: String,
}

impl Default for DspConfig {
    fn default() -> Self {
        Self {
            default_targets: default_dsps(),
            advertiser_id: default_advertiser_id(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeConfig {
    /// Random jitter applied to simulated SmartSwitch scores.
    #[serde(default = "default_score_jitter")]
    pub score_jitter: f64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            score_jitter: default_score_jitter(),
        }
    }
}

fn default_cost_per_video() -> f64 {
    0.50
}

fn default_impression_goal() -> u64 {
    100_000
}

fn default_assumed_cpm() -> f64 {
    10.0
}

fn default_tracking_base() -> String {
    "https://track.dreamtraffic.demo".to_string()
}

fn default_vast_base() -> String {
    "https://vast.dreamtraffic.demo".to_string()
}

fn default_ad_system() -> String {
    "DreamTraffic".to_string()
}

fn default_click_through() -> String {
    "https://lumalabs.ai".to_string()
}

fn default_dsps() -> Vec<String> {
    vec!["amazon".to_string(), "thetradedesk".to_string()]
}

fn default_advertiser_id() -> String {
    "DT_ADV_DEMO".to_string()
}

fn default_score_jitter() -> f64 {
    0.03
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("DREAMTRAFFIC")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
