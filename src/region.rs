//! The fixed set of markets the dashboard can query.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A market with a display label and a provider region-code token.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    #[default]
    #[strum(to_string = "United States")]
    UnitedStates,
    #[strum(to_string = "Japan")]
    Japan,
    #[strum(to_string = "Taiwan")]
    Taiwan,
    #[strum(to_string = "Hong Kong")]
    HongKong,
    #[strum(to_string = "Singapore")]
    Singapore,
}

impl Region {
    /// All regions, in selector order.
    pub const ALL: [Region; 5] = [
        Region::UnitedStates,
        Region::Japan,
        Region::Taiwan,
        Region::HongKong,
        Region::Singapore,
    ];

    /// Human-readable label shown in the selector.
    pub fn label(&self) -> &'static str {
        self.into()
    }

    /// Provider region-code token used by the trending-searches endpoint.
    pub fn code(&self) -> &'static str {
        match self {
            Region::UnitedStates => "united_states",
            Region::Japan => "japan",
            Region::Taiwan => "taiwan",
            Region::HongKong => "hong_kong",
            Region::Singapore => "singapore",
        }
    }

    fn position(&self) -> usize {
        Self::ALL
            .iter()
            .position(|region| region == self)
            .unwrap_or(0)
    }

    /// The region after this one, wrapping around.
    pub fn next(&self) -> Region {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// The region before this one, wrapping around.
    pub fn previous(&self) -> Region {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl FromStr for Region {
    type Err = String;

    /// Accepts either the label ("Hong Kong") or the code ("hong_kong").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|region| {
                region.code().eq_ignore_ascii_case(needle)
                    || region.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| {
                let options: Vec<&str> = Self::ALL.iter().map(|r| r.code()).collect();
                format!(
                    "unknown region '{}', expected one of: {}",
                    needle,
                    options.join(", ")
                )
            })
    }
}
