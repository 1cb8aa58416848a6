//! Policy group categories and presets
//!
//! A category pairs one selectable policy group with the rulesets that route
//! traffic into it.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::constants::rulesets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupCategory {
    Streaming,
    Social,
    Ai,
    Techgiants,
    Gaming,
    Finance,
    Shopping,
    News,
    Developer,
    Adblock,
}

impl GroupCategory {
    pub const ALL: [GroupCategory; 10] = [
        GroupCategory::Streaming,
        GroupCategory::Social,
        GroupCategory::Ai,
        GroupCategory::Techgiants,
        GroupCategory::Gaming,
        GroupCategory::Finance,
        GroupCategory::Shopping,
        GroupCategory::News,
        GroupCategory::Developer,
        GroupCategory::Adblock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GroupCategory::Streaming => "streaming",
            GroupCategory::Social => "social",
            GroupCategory::Ai => "ai",
            GroupCategory::Techgiants => "techgiants",
            GroupCategory::Gaming => "gaming",
            GroupCategory::Finance => "finance",
            GroupCategory::Shopping => "shopping",
            GroupCategory::News => "news",
            GroupCategory::Developer => "developer",
            GroupCategory::Adblock => "adblock",
        }
    }

    /// Name of the policy group emitted for this category
    pub fn group_name(self) -> &'static str {
        match self {
            GroupCategory::Streaming => "🎬 流媒体服务",
            GroupCategory::Social => "💬 社交媒体",
            GroupCategory::Ai => "🤖 AI服务",
            GroupCategory::Techgiants => "🏢 科技巨头",
            GroupCategory::Gaming => "🎮 游戏服务",
            GroupCategory::Finance => "💰 金融服务",
            GroupCategory::Shopping => "🛒 购物电商",
            GroupCategory::News => "📰 新闻媒体",
            GroupCategory::Developer => "💻 开发工具",
            GroupCategory::Adblock => "🛡️ 广告拦截",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            GroupCategory::Streaming => "Streaming services (Netflix, YouTube, Spotify)",
            GroupCategory::Social => "Social media (Telegram, Twitter, Facebook)",
            GroupCategory::Ai => "AI services (OpenAI, Anthropic)",
            GroupCategory::Techgiants => "Tech giants (Apple, Google, Microsoft)",
            GroupCategory::Gaming => "Gaming services (Steam, Epic Games)",
            GroupCategory::Finance => "Payment services (PayPal)",
            GroupCategory::Shopping => "Shopping (Amazon, Taobao)",
            GroupCategory::News => "News media (BBC, CNN)",
            GroupCategory::Developer => "Developer tools (GitHub, Stack Overflow)",
            GroupCategory::Adblock => "Advertising and tracker blocking",
        }
    }

    /// Rulesets routed into this category's group, as `(name, url)` pairs
    pub fn rulesets(self) -> &'static [(&'static str, &'static str)] {
        match self {
            GroupCategory::Streaming => rulesets::STREAMING,
            GroupCategory::Social => rulesets::SOCIAL,
            GroupCategory::Ai => rulesets::AI,
            GroupCategory::Techgiants => rulesets::TECHGIANTS,
            GroupCategory::Gaming => rulesets::GAMING,
            GroupCategory::Finance => rulesets::FINANCE,
            GroupCategory::Shopping => rulesets::SHOPPING,
            GroupCategory::News => rulesets::NEWS,
            GroupCategory::Developer => rulesets::DEVELOPER,
            GroupCategory::Adblock => rulesets::ADBLOCK,
        }
    }
}

impl fmt::Display for GroupCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupCategory::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown group category: {}", s))
    }
}

/// Named category bundles for common usage profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    Default,
    Entertainment,
    Developer,
    Gaming,
    Business,
}

impl Preset {
    pub fn categories(self) -> &'static [GroupCategory] {
        use GroupCategory::*;
        match self {
            Preset::Default => &[Streaming, Social, Ai, Adblock],
            Preset::Entertainment => &[Streaming, Social, Adblock],
            Preset::Developer => &[Techgiants, Developer, Ai, Adblock],
            Preset::Gaming => &[Gaming, Social, Streaming, Adblock],
            Preset::Business => &[Techgiants, Finance, Shopping, News, Adblock],
        }
    }
}
