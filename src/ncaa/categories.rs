use crate::{
    config::CategoryPolicy,
    error::{ProxyError, ProxyResult},
};
use itertools::Itertools;
use serde::Serialize;
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Statistical leaderboards published by the NCAA for D1 softball.
/// Names are matched case-insensitively, `strikeoutsTotal` being accepted
/// as an alias of `strikeouts`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
pub enum StatCategory {
    Batting,
    Hits,
    HomeRuns,
    Obp,
    Slg,
    Era,
    StrikeoutsPerSeven,
    #[strum(to_string = "strikeouts", serialize = "strikeoutsTotal")]
    Strikeouts,
}

impl StatCategory {
    /// Identifier of the individual statistic on the NCAA stats pages.
    pub fn upstream_id(&self) -> u16 {
        match self {
            StatCategory::Batting => 271,
            StatCategory::Hits => 1088,
            StatCategory::HomeRuns => 514,
            StatCategory::Obp => 510,
            StatCategory::Slg => 343,
            StatCategory::Era => 276,
            StatCategory::StrikeoutsPerSeven => 278,
            StatCategory::Strikeouts => 539,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StatCategory::Batting => "Batting Average",
            StatCategory::Hits => "Hits",
            StatCategory::HomeRuns => "Home Runs",
            StatCategory::Obp => "On-Base Percentage",
            StatCategory::Slg => "Slugging Percentage",
            StatCategory::Era => "Earned Run Average",
            StatCategory::StrikeoutsPerSeven => "Strikeouts Per Seven Innings",
            StatCategory::Strikeouts => "Strikeouts",
        }
    }

    /// Map a requested category name to a known category, according to the
    /// configured policy for unknown names.
    pub fn resolve(name: &str, policy: CategoryPolicy) -> ProxyResult<StatCategory> {
        match (StatCategory::from_str(name.trim()), policy) {
            (Ok(category), _) => Ok(category),
            (Err(_), CategoryPolicy::Default) => Ok(StatCategory::Batting),
            (Err(_), CategoryPolicy::Reject) => Err(ProxyError::InvalidCategory(format!(
                "'{}'. Expected one of: {}",
                name,
                StatCategory::iter().join(", ")
            ))),
        }
    }
}
