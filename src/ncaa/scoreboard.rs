use crate::{
    error::{ProxyError, ProxyResult},
    utils::{as_text, first_present, today_display},
};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

const DEFAULT_TITLE: &str = "NCAA Division I Softball Scoreboard";
const CURRENT: &str = "current";

/// Day of a scoreboard request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameDate {
    Current,
    Day(NaiveDate),
}

impl GameDate {
    /// Accepts `current`, `YYYY-MM-DD` or `YYYY/MM/DD`.
    pub fn parse(input: &str) -> ProxyResult<Self> {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case(CURRENT) {
            return Ok(GameDate::Current);
        }
        ["%Y-%m-%d", "%Y/%m/%d"]
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
            .map(GameDate::Day)
            .ok_or_else(|| {
                ProxyError::InvalidDate(format!(
                    "'{input}'. Expected 'current', YYYY-MM-DD or YYYY/MM/DD"
                ))
            })
    }
}

impl fmt::Display for GameDate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GameDate::Current => write!(f, "{}", CURRENT),
            GameDate::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoreboard {
    pub title: String,
    pub date: String,
    pub updated: String,
    pub games: Vec<Value>,
}

impl Scoreboard {
    /// Scoreboard from a raw upstream payload; games are passed through untouched.
    pub fn from_payload(payload: &Value, date: &GameDate) -> Self {
        Scoreboard {
            title: first_present(payload, &["title"])
                .and_then(as_text)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            date: date.to_string(),
            updated: first_present(payload, &["updated_at", "updated"])
                .and_then(as_text)
                .unwrap_or_else(today_display),
            games: payload
                .get("games")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn dates_are_parsed() {
        assert_eq!(GameDate::parse("current"), Ok(GameDate::Current));
        assert_eq!(GameDate::parse("CURRENT"), Ok(GameDate::Current));
        let day = NaiveDate::from_ymd_opt(2025, 4, 12).unwrap();
        assert_eq!(GameDate::parse("2025-04-12"), Ok(GameDate::Day(day)));
        assert_eq!(GameDate::parse("2025/04/12"), Ok(GameDate::Day(day)));
        assert_eq!(GameDate::Day(day).to_string(), "2025-04-12");
    }

    #[test]
    fn garbage_dates_are_rejected() {
        for input in ["yesterday", "2025-13-01", "12/04/2025"] {
            assert!(matches!(
                GameDate::parse(input),
                Err(ProxyError::InvalidDate(_))
            ));
        }
    }

    #[test]
    fn games_are_passed_through() {
        let game = json!({ "game": { "gameID": "6354721", "home": { "names": { "short": "LSU" } } } });
        let board = Scoreboard::from_payload(
            &json!({ "updated_at": "04-12-2025 19:00:05", "games": [game.clone()] }),
            &GameDate::Current,
        );
        assert_eq!(board.title, DEFAULT_TITLE);
        assert_eq!(board.date, "current");
        assert_eq!(board.updated, "04-12-2025 19:00:05");
        assert_eq!(board.games, vec![game]);
    }
}
