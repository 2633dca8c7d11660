//! Snow Level Module
//!
//! Closed set of snowfall intensities with a total severity order.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Snow Level ==
/// Snowfall intensity, ordered from no snow to blizzard.
///
/// Serialized as the Chinese labels used by the upstream data.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SnowLevel {
    /// Not snowing. The inactive sentinel.
    #[default]
    #[serde(rename = "无")]
    None,
    #[serde(rename = "小雪")]
    Light,
    #[serde(rename = "中雪")]
    Moderate,
    #[serde(rename = "大雪")]
    Heavy,
    #[serde(rename = "暴雪")]
    Blizzard,
}

impl SnowLevel {
    /// Every level in ascending severity.
    pub const ALL: [SnowLevel; 5] = [
        SnowLevel::None,
        SnowLevel::Light,
        SnowLevel::Moderate,
        SnowLevel::Heavy,
        SnowLevel::Blizzard,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SnowLevel::None => "无",
            SnowLevel::Light => "小雪",
            SnowLevel::Moderate => "中雪",
            SnowLevel::Heavy => "大雪",
            SnowLevel::Blizzard => "暴雪",
        }
    }

    /// Looks a label up in the allow-list.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }

    /// True for every level except [`SnowLevel::None`].
    pub fn is_active(self) -> bool {
        self != SnowLevel::None
    }

    /// Label prefixed with one snowflake per severity step, e.g. `❄❄ 中雪`.
    ///
    /// The inactive level renders as its bare label.
    pub fn flakes(self) -> String {
        let count = self as usize;
        if count == 0 {
            return self.label().to_string();
        }
        format!("{} {}", "❄".repeat(count), self.label())
    }

    // == From Weather Code ==
    /// Maps a provider weather code to a level.
    ///
    /// Codes 400-402 are light, 403-404 moderate, 405-406 heavy and
    /// 407-410 blizzard. Any other code means no snow.
    pub fn from_weather_code(code: i64) -> Self {
        match code {
            400..=402 => SnowLevel::Light,
            403..=404 => SnowLevel::Moderate,
            405..=406 => SnowLevel::Heavy,
            407..=410 => SnowLevel::Blizzard,
            _ => SnowLevel::None,
        }
    }
}

impl fmt::Display for SnowLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
