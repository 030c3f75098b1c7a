use crate::utils::{as_text, de_lenient_string, first_present, today_display};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

const DEFAULT_TITLE: &str = "NCAA Division I Softball Rankings";

/// One team of a poll. Field names are those of the upstream payload and
/// are served as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "RANK", default, deserialize_with = "de_lenient_string")]
    pub rank: String,
    #[serde(rename = "COLLEGE", default, deserialize_with = "de_lenient_string")]
    pub college_name: String,
    #[serde(rename = "RECORD", default, deserialize_with = "de_lenient_string")]
    pub record: String,
    #[serde(rename = "POINTS", default, deserialize_with = "de_lenient_string")]
    pub points: String,
    #[serde(rename = "PREVIOUS RANK", default, deserialize_with = "de_lenient_string")]
    pub previous_rank: String,
    // Anything else upstream sends along (first place votes, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingsSnapshot {
    pub title: String,
    pub updated: String,
    pub data: Vec<RankingEntry>,
}

impl RankingsSnapshot {
    /// Snapshot from a raw upstream rankings payload. Entries that do not
    /// deserialize are skipped.
    pub fn from_payload(payload: &Value) -> Self {
        let data = payload
            .get("data")
            .and_then(Value::as_array)
            .map_or(vec![], |entries| {
                entries
                    .iter()
                    .filter_map(|entry| match RankingEntry::deserialize(entry) {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            warn!("Skipping malformed ranking entry. {e}");
                            None
                        }
                    })
                    .collect()
            });

        RankingsSnapshot {
            title: first_present(payload, &["title"])
                .and_then(as_text)
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            updated: first_present(payload, &["updated"])
                .and_then(as_text)
                .unwrap_or_else(today_display),
            data,
        }
    }
}
