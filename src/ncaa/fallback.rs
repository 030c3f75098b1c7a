//! Canned datasets served when neither upstream nor the cache can answer.
//! They are written in the upstream format and go through the same parsing
//! as live payloads.

use crate::ncaa::{
    categories::StatCategory,
    normalize::{format_stats, StatLeaders},
    rankings::RankingsSnapshot,
    scoreboard::{GameDate, Scoreboard},
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

const UPDATED: &str = "Sample data";

static RANKINGS: Lazy<RankingsSnapshot> = Lazy::new(|| {
    RankingsSnapshot::from_payload(&json!({
        "title": "NCAA Division I Softball Rankings",
        "updated": UPDATED,
        "data": [
            { "RANK": "1", "COLLEGE": "Texas", "RECORD": "43-8", "POINTS": "775", "PREVIOUS RANK": "1" },
            { "RANK": "2", "COLLEGE": "Oklahoma", "RECORD": "40-9", "POINTS": "741", "PREVIOUS RANK": "3" },
            { "RANK": "3", "COLLEGE": "Florida", "RECORD": "42-11", "POINTS": "712", "PREVIOUS RANK": "2" },
            { "RANK": "4", "COLLEGE": "Texas A&M", "RECORD": "39-10", "POINTS": "680", "PREVIOUS RANK": "4" },
            { "RANK": "5", "COLLEGE": "Tennessee", "RECORD": "38-12", "POINTS": "655", "PREVIOUS RANK": "6" },
            { "RANK": "6", "COLLEGE": "UCLA", "RECORD": "41-10", "POINTS": "630", "PREVIOUS RANK": "5" },
            { "RANK": "7", "COLLEGE": "Arkansas", "RECORD": "39-12", "POINTS": "598", "PREVIOUS RANK": "8" },
            { "RANK": "8", "COLLEGE": "Oklahoma State", "RECORD": "38-13", "POINTS": "570", "PREVIOUS RANK": "7" },
            { "RANK": "9", "COLLEGE": "LSU", "RECORD": "40-13", "POINTS": "541", "PREVIOUS RANK": "9" },
            { "RANK": "10", "COLLEGE": "Florida State", "RECORD": "42-12", "POINTS": "512", "PREVIOUS RANK": "11" }
        ]
    }))
});

// (name, position, class, team)
const PLAYERS: [(&str, &str, &str, &str); 5] = [
    ("Reese Atwood", "C", "Jr.", "Texas"),
    ("Jayda Coleman", "OF", "Sr.", "Oklahoma"),
    ("Skylar Wallace", "SS", "Sr.", "Florida"),
    ("Kenzie Pickens", "UT", "So.", "Tennessee"),
    ("Maya Brady", "1B", "Gr.", "UCLA"),
];

const PITCHERS: [(&str, &str, &str, &str); 5] = [
    ("NiJaree Canady", "P", "Jr.", "Texas Tech"),
    ("Karlie Keeney", "P", "Sr.", "Tennessee"),
    ("Teagan Kavan", "P", "So.", "Texas"),
    ("Sam Landry", "P", "Sr.", "LSU"),
    ("Lexi Kilfoyl", "P", "Sr.", "Oklahoma State"),
];

fn raw_leaders(category: StatCategory) -> Vec<Value> {
    let hitter = |i: usize| {
        let (name, position, class, team) = PLAYERS[i];
        json!({ "Name": name, "Position": position, "Cl": class, "Team": team })
    };
    let pitcher = |i: usize| {
        let (name, position, class, team) = PITCHERS[i];
        json!({ "Name": name, "Position": position, "Cl": class, "Team": team })
    };
    let with = |mut base: Value, stats: Value| {
        if let (Some(base), Some(stats)) = (base.as_object_mut(), stats.as_object()) {
            base.extend(stats.clone());
        }
        base
    };

    (0..PLAYERS.len())
        .map(|i| {
            let step = i as f64;
            let games = 45 - i as i64;
            match category {
                StatCategory::Batting => with(
                    hitter(i),
                    json!({ "BA": format!("{:.3}", 0.480 - step * 0.012), "G": games, "AB": 130 - i, "H": 62 - 2 * i }),
                ),
                StatCategory::Hits => with(hitter(i), json!({ "H": 70 - 2 * i, "G": games })),
                StatCategory::HomeRuns => with(hitter(i), json!({ "HR": 24 - 2 * i, "G": games })),
                StatCategory::Obp => with(
                    hitter(i),
                    json!({ "OBP": format!("{:.3}", 0.590 - step * 0.015), "G": games, "AB": 128 - i, "H": 58 - 2 * i, "BB": 30 - i, "HBP": 6 - i }),
                ),
                StatCategory::Slg => with(
                    hitter(i),
                    json!({ "SLG": format!("{:.3}", 0.990 - step * 0.04), "G": games, "AB": 128 - i, "TB": 126 - 5 * i }),
                ),
                StatCategory::Era => with(
                    pitcher(i),
                    json!({ "ERA": format!("{:.2}", 0.65 + step * 0.18), "APP": 30 - i, "IP": 150.1 - step * 8.0, "ER": 14 + 3 * i }),
                ),
                StatCategory::StrikeoutsPerSeven => with(
                    pitcher(i),
                    json!({ "K/7": format!("{:.2}", 13.1 - step * 0.9), "APP": 30 - i, "IP": 150.1 - step * 8.0, "SO": 280 - 20 * i }),
                ),
                StatCategory::Strikeouts => with(pitcher(i), json!({ "SO": 290 - 22 * i, "APP": 32 - i })),
            }
        })
        .collect()
}

pub fn rankings() -> RankingsSnapshot {
    RANKINGS.clone()
}

pub fn stats(category: StatCategory) -> StatLeaders {
    format_stats(
        &json!({ "updated": UPDATED, "data": raw_leaders(category) }),
        category,
    )
}

pub fn scoreboard(date: &GameDate) -> Scoreboard {
    Scoreboard::from_payload(&json!({ "updated": UPDATED, "games": [] }), date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ncaa::normalize::StatValue;
    use strum::IntoEnumIterator;

    #[test]
    fn every_category_has_canned_leaders() {
        for category in StatCategory::iter() {
            let stats = stats(category);
            assert_eq!(stats.category, category.title());
            assert_eq!(stats.leaders.len(), PLAYERS.len());
            assert!(stats.leaders.iter().all(|l| l.value.as_f64() > 0.0));
            assert!(stats.leaders.iter().all(|l| !l.player.name.is_empty()));
        }
    }

    #[test]
    fn canned_values_keep_their_numeric_kind() {
        let home_runs = stats(StatCategory::HomeRuns);
        assert_eq!(home_runs.leaders[0].value, StatValue::Int(24));
        assert_eq!(home_runs.leaders[0].additional_stats["hr_g"], StatValue::Float(0.53));

        let batting = stats(StatCategory::Batting);
        assert_eq!(batting.leaders[0].value, StatValue::Float(0.48));
    }

    #[test]
    fn canned_rankings_are_ordered() {
        let rankings = rankings();
        assert_eq!(rankings.data.len(), 10);
        assert_eq!(rankings.data[0].rank, "1");
        assert_eq!(rankings.data[9].college_name, "Florida State");
    }

    #[test]
    fn canned_scoreboard_has_no_games() {
        let day = chrono::NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        let board = scoreboard(&GameDate::Day(day));
        assert_eq!(board.date, "2025-04-12");
        assert_eq!(board.updated, UPDATED);
        assert!(board.games.is_empty());
    }
}
