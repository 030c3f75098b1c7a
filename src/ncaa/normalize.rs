use crate::{
    ncaa::categories::StatCategory,
    utils::{as_f64, as_i64, as_text, first_present, round2, today_display},
};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Only the top of each leaderboard is kept.
pub const MAX_LEADERS: usize = 50;

const RANK: &[&str] = &["Rank", "rank", "RANK"];
const PLAYER_NAME: &[&str] = &["Name", "NAME", "name", "Player", "PLAYER", "player"];
const PLAYER_POSITION: &[&str] = &["Position", "POS", "Pos", "pos", "position"];
const PLAYER_CLASS: &[&str] = &["Cl", "CL", "cl", "Class", "class", "Yr", "YR"];
const TEAM_NAME: &[&str] = &["Team", "TEAM", "team", "School", "SCHOOL", "school"];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Int(i64),
    Float(f64),
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Int,
    Float,
}

/// A canonical field and the upstream names it may appear under, tried in order.
struct Field {
    key: &'static str,
    kind: Kind,
    variants: &'static [&'static str],
}

struct CategoryFields {
    primary: Field,
    secondary: &'static [Field],
    // Key of the primary statistic divided by games played, if any
    per_game: Option<&'static str>,
}

const GAMES: Field = Field { key: "g", kind: Kind::Int, variants: &["G", "g", "GP", "gp"] };
const AT_BATS: Field = Field { key: "ab", kind: Kind::Int, variants: &["AB", "ab"] };
const HITS: Field = Field { key: "h", kind: Kind::Int, variants: &["H", "h", "Hits", "hits"] };
const WALKS: Field = Field { key: "bb", kind: Kind::Int, variants: &["BB", "bb"] };
const HIT_BY_PITCH: Field = Field { key: "hbp", kind: Kind::Int, variants: &["HBP", "hbp"] };
const TOTAL_BASES: Field = Field { key: "tb", kind: Kind::Int, variants: &["TB", "tb"] };
const APPEARANCES: Field = Field {
    key: "app",
    kind: Kind::Int,
    variants: &["APP", "App", "app", "G", "g"],
};
const INNINGS: Field = Field { key: "ip", kind: Kind::Float, variants: &["IP", "ip"] };
const EARNED_RUNS: Field = Field { key: "er", kind: Kind::Int, variants: &["ER", "er"] };
const STRIKEOUTS: Field = Field { key: "so", kind: Kind::Int, variants: &["SO", "so", "K", "k"] };

fn fields(category: StatCategory) -> CategoryFields {
    match category {
        StatCategory::Batting => CategoryFields {
            primary: Field {
                key: "ba",
                kind: Kind::Float,
                variants: &["BA", "AVG", "Avg", "avg", "ba", "Value", "value"],
            },
            secondary: &[GAMES, AT_BATS, HITS],
            per_game: None,
        },
        StatCategory::Hits => CategoryFields {
            primary: Field {
                key: "h",
                kind: Kind::Int,
                variants: &["H", "h", "Hits", "hits", "Value", "value"],
            },
            secondary: &[GAMES],
            per_game: None,
        },
        StatCategory::HomeRuns => CategoryFields {
            primary: Field {
                key: "hr",
                kind: Kind::Int,
                variants: &["HR", "hr", "Value", "value"],
            },
            secondary: &[GAMES],
            per_game: Some("hr_g"),
        },
        StatCategory::Obp => CategoryFields {
            primary: Field {
                key: "obp",
                kind: Kind::Float,
                variants: &["OBP", "OB%", "OBPct", "obp", "PCT", "Value", "value"],
            },
            secondary: &[GAMES, AT_BATS, HITS, WALKS, HIT_BY_PITCH],
            per_game: None,
        },
        StatCategory::Slg => CategoryFields {
            primary: Field {
                key: "slg",
                kind: Kind::Float,
                variants: &["SLG", "SLG%", "SLG PCT", "SlgPct", "slg", "PCT", "Value", "value"],
            },
            secondary: &[GAMES, AT_BATS, TOTAL_BASES],
            per_game: None,
        },
        StatCategory::Era => CategoryFields {
            primary: Field {
                key: "era",
                kind: Kind::Float,
                variants: &["ERA", "era", "Value", "value"],
            },
            secondary: &[APPEARANCES, INNINGS, EARNED_RUNS],
            per_game: None,
        },
        StatCategory::StrikeoutsPerSeven => CategoryFields {
            primary: Field {
                key: "k7",
                kind: Kind::Float,
                variants: &["K/7", "SO/7", "K7", "k/7", "so/7", "Value", "value"],
            },
            secondary: &[APPEARANCES, INNINGS, STRIKEOUTS],
            per_game: None,
        },
        StatCategory::Strikeouts => CategoryFields {
            primary: Field {
                key: "so",
                kind: Kind::Int,
                variants: &["SO", "so", "K", "k", "Value", "value"],
            },
            secondary: &[APPEARANCES],
            per_game: None,
        },
    }
}

impl Field {
    /// Never fails: absent or unparsable values read as zero.
    fn read(&self, item: &Value) -> StatValue {
        let present = first_present(item, self.variants);
        match self.kind {
            Kind::Int => StatValue::Int(present.and_then(as_i64).unwrap_or_default()),
            Kind::Float => StatValue::Float(present.and_then(as_f64).unwrap_or_default()),
        }
    }
}

impl StatValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            StatValue::Int(i) => *i as f64,
            StatValue::Float(f) => *f,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub position: String,
    pub class_year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderRecord {
    pub rank: u32,
    pub player: Player,
    pub team: Team,
    pub value: StatValue,
    pub additional_stats: BTreeMap<&'static str, StatValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLeaders {
    pub sport: String,
    pub category: String,
    pub updated: String,
    pub leaders: Vec<LeaderRecord>,
}

fn text(item: &Value, keys: &[&str]) -> String {
    first_present(item, keys)
        .and_then(as_text)
        .unwrap_or_default()
}

/// Canonical record for the upstream item found at `position` (0-based)
/// of the leaderboard.
pub fn normalize_leader(item: &Value, category: StatCategory, position: usize) -> LeaderRecord {
    let fields = fields(category);

    let rank = first_present(item, RANK)
        .and_then(as_i64)
        .filter(|rank| *rank >= 1)
        .and_then(|rank| u32::try_from(rank).ok())
        .unwrap_or(position as u32 + 1);

    let value = fields.primary.read(item);

    let mut additional_stats = fields
        .secondary
        .iter()
        .map(|field| (field.key, field.read(item)))
        .collect::<BTreeMap<&'static str, StatValue>>();

    if let Some(key) = fields.per_game {
        let games = additional_stats
            .get(GAMES.key)
            .map(StatValue::as_f64)
            .unwrap_or_default();
        let per_game = match games > 0.0 {
            true => round2(value.as_f64() / games),
            false => 0.0,
        };
        additional_stats.insert(key, StatValue::Float(per_game));
    }

    LeaderRecord {
        rank,
        player: Player {
            name: text(item, PLAYER_NAME),
            position: text(item, PLAYER_POSITION),
            class_year: text(item, PLAYER_CLASS),
        },
        team: Team {
            name: text(item, TEAM_NAME),
        },
        value,
        additional_stats,
    }
}

/// Leaderboard in canonical shape from a raw upstream stats payload.
/// Upstream order is preserved; malformed input yields an empty list.
pub fn format_stats(payload: &Value, category: StatCategory) -> StatLeaders {
    let leaders = payload
        .get("data")
        .and_then(Value::as_array)
        .map_or(vec![], |items| {
            items
                .iter()
                .take(MAX_LEADERS)
                .enumerate()
                .map(|(position, item)| normalize_leader(item, category, position))
                .collect()
        });

    StatLeaders {
        sport: "Softball".to_string(),
        category: category.title().to_string(),
        updated: first_present(payload, &["updated"])
            .and_then(as_text)
            .unwrap_or_else(today_display),
        leaders,
    }
}
