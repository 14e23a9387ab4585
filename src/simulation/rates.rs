use serde::{Deserialize, Serialize};

use crate::error::{DiagnosticsError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Channel {
    Meta,
    Google,
    Youtube,
    Instagram,
    Blog,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Meta,
        Channel::Google,
        Channel::Youtube,
        Channel::Instagram,
        Channel::Blog,
    ];

    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "meta" | "facebook" => Ok(Channel::Meta),
            "google" => Ok(Channel::Google),
            "youtube" => Ok(Channel::Youtube),
            "instagram" => Ok(Channel::Instagram),
            "blog" => Ok(Channel::Blog),
            _ => Err(DiagnosticsError::UnknownChannel(value.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Meta => "meta",
            Channel::Google => "google",
            Channel::Youtube => "youtube",
            Channel::Instagram => "instagram",
            Channel::Blog => "blog",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum CampaignStrategy {
    Awareness,
    Consideration,
    Conversion,
    Retention,
}

impl CampaignStrategy {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "awareness" => Ok(CampaignStrategy::Awareness),
            "consideration" => Ok(CampaignStrategy::Consideration),
            "conversion" => Ok(CampaignStrategy::Conversion),
            "retention" => Ok(CampaignStrategy::Retention),
            _ => Err(DiagnosticsError::UnknownStrategy(value.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CampaignStrategy::Awareness => "awareness",
            CampaignStrategy::Consideration => "consideration",
            CampaignStrategy::Conversion => "conversion",
            CampaignStrategy::Retention => "retention",
        }
    }
}

impl TryFrom<String> for Channel {
    type Error = DiagnosticsError;

    fn try_from(value: String) -> Result<Self> {
        Channel::parse(&value)
    }
}

impl TryFrom<String> for CampaignStrategy {
    type Error = DiagnosticsError;

    fn try_from(value: String) -> Result<Self> {
        CampaignStrategy::parse(&value)
    }
}

/// Per-channel base rates. `ctr` and `cvr` are percentages, `cpc` and
/// `avg_order_value` are in currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRates {
    pub ctr: f64,
    pub cvr: f64,
    pub cpc: f64,
    pub avg_order_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelRateTable {
    pub meta: ChannelRates,
    pub google: ChannelRates,
    pub youtube: ChannelRates,
    pub instagram: ChannelRates,
    pub blog: ChannelRates,
}

impl Default for ChannelRateTable {
    fn default() -> Self {
        Self {
            meta: ChannelRates {
                ctr: 1.2,
                cvr: 2.5,
                cpc: 800.0,
                avg_order_value: 45_000.0,
            },
            google: ChannelRates {
                ctr: 3.5,
                cvr: 4.0,
                cpc: 1_200.0,
                avg_order_value: 52_000.0,
            },
            youtube: ChannelRates {
                ctr: 0.8,
                cvr: 1.5,
                cpc: 500.0,
                avg_order_value: 40_000.0,
            },
            instagram: ChannelRates {
                ctr: 1.0,
                cvr: 2.0,
                cpc: 700.0,
                avg_order_value: 42_000.0,
            },
            blog: ChannelRates {
                ctr: 2.5,
                cvr: 3.0,
                cpc: 300.0,
                avg_order_value: 38_000.0,
            },
        }
    }
}

impl ChannelRateTable {
    pub fn get(&self, channel: Channel) -> &ChannelRates {
        match channel {
            Channel::Meta => &self.meta,
            Channel::Google => &self.google,
            Channel::Youtube => &self.youtube,
            Channel::Instagram => &self.instagram,
            Channel::Blog => &self.blog,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut ChannelRates {
        match channel {
            Channel::Meta => &mut self.meta,
            Channel::Google => &mut self.google,
            Channel::Youtube => &mut self.youtube,
            Channel::Instagram => &mut self.instagram,
            Channel::Blog => &mut self.blog,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyMultiplier {
    pub ctr: f64,
    pub cvr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyMultiplierTable {
    pub awareness: StrategyMultiplier,
    pub consideration: StrategyMultiplier,
    pub conversion: StrategyMultiplier,
    pub retention: StrategyMultiplier,
}

impl Default for StrategyMultiplierTable {
    fn default() -> Self {
        Self {
            awareness: StrategyMultiplier { ctr: 1.3, cvr: 0.7 },
            consideration: StrategyMultiplier { ctr: 1.1, cvr: 1.0 },
            conversion: StrategyMultiplier { ctr: 0.9, cvr: 1.4 },
            retention: StrategyMultiplier { ctr: 1.0, cvr: 1.6 },
        }
    }
}

impl StrategyMultiplierTable {
    pub fn get(&self, strategy: CampaignStrategy) -> &StrategyMultiplier {
        match strategy {
            CampaignStrategy::Awareness => &self.awareness,
            CampaignStrategy::Consideration => &self.consideration,
            CampaignStrategy::Conversion => &self.conversion,
            CampaignStrategy::Retention => &self.retention,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationTables {
    pub channels: ChannelRateTable,
    pub strategies: StrategyMultiplierTable,
}
