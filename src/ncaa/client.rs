use crate::{
    config::Settings,
    error::{ProxyError, ProxyResult},
    ncaa::{
        categories::StatCategory,
        rankings::RankingsSnapshot,
        scoreboard::GameDate,
    },
};
use reqwest::Client;
use serde_json::Value;
use std::{fmt, time::Duration};
use tokio::{sync::Mutex, time::Instant};
use tracing::{debug, info};

const USER_AGENT: &str = "College Softball App/1.0";

enum Endpoint {
    Rankings,
    Stats(StatCategory),
    Scoreboard(GameDate),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Endpoint::Rankings => write!(f, "/rankings/softball/d1"),
            Endpoint::Stats(category) => {
                write!(
                    f,
                    "/stats/softball/d1/current/individual/{}",
                    category.upstream_id()
                )
            }
            Endpoint::Scoreboard(GameDate::Current) => write!(f, "/scoreboard/softball/d1"),
            Endpoint::Scoreboard(GameDate::Day(day)) => {
                write!(f, "/scoreboard/softball/d1/{}/all-conf", day.format("%Y/%m/%d"))
            }
        }
    }
}

/// Client of the NCAA statistics API. A single instance is meant to be
/// shared by every request handler, as it owns the global rate limit.
pub struct NcaaClient {
    http_client: Client,
    base_url: String,
    min_request_interval: Duration,
    // When the last outbound call was let through, whatever its outcome
    last_request_at: Mutex<Option<Instant>>,
}

impl NcaaClient {
    pub fn new(settings: &Settings) -> ProxyResult<Self> {
        let http_client = Client::builder()
            .timeout(settings.ncaa_api_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http_client,
            base_url: settings.ncaa_api_base_url.trim_end_matches('/').to_string(),
            min_request_interval: settings.min_request_interval(),
            last_request_at: Mutex::new(None),
        })
    }

    pub async fn fetch_rankings(&self) -> ProxyResult<RankingsSnapshot> {
        info!("Fetching rankings from NCAA API");
        let payload = self.get(&Endpoint::Rankings).await?;
        Ok(RankingsSnapshot::from_payload(&payload))
    }

    /// Raw leaderboard payload of a category, to be normalized by the caller.
    pub async fn fetch_stats(&self, category: StatCategory) -> ProxyResult<Value> {
        info!("Fetching {category} stats from NCAA API");
        self.get(&Endpoint::Stats(category)).await
    }

    /// Raw scoreboard payload for a day.
    pub async fn fetch_scoreboard(&self, date: &GameDate) -> ProxyResult<Value> {
        info!("Fetching {date} scoreboard from NCAA API");
        self.get(&Endpoint::Scoreboard(*date)).await
    }

    /// Suspend the caller until the minimum interval since the previous
    /// outbound call has elapsed, then mark the current call.
    pub async fn wait_if_needed(&self) {
        // Held across the sleep so that concurrent callers queue up.
        let mut last_request_at = self.last_request_at.lock().await;
        if let Some(last) = *last_request_at {
            let elapsed = last.elapsed();
            if elapsed < self.min_request_interval {
                let wait = self.min_request_interval - elapsed;
                debug!("Rate limiting: waiting {}ms before next request", wait.as_millis());
                tokio::time::sleep(wait).await;
            }
        }
        *last_request_at = Some(Instant::now());
    }

    async fn get(&self, endpoint: &Endpoint) -> ProxyResult<Value> {
        self.wait_if_needed().await;

        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.http_client.get(&url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.bytes().await?;
                Ok(serde_json::from_slice(&body)?)
            }
            // The NCAA API answers 404 for pages it does not know (yet), e.g. future scoreboards.
            status => Err(ProxyError::Upstream(format!("{status} for {endpoint}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client(interval_ms: u64) -> NcaaClient {
        NcaaClient::new(&Settings {
            min_request_interval_ms: interval_ms,
            ..Settings::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_paths() {
        assert_eq!(Endpoint::Rankings.to_string(), "/rankings/softball/d1");
        assert_eq!(
            Endpoint::Stats(StatCategory::Batting).to_string(),
            "/stats/softball/d1/current/individual/271"
        );
        assert_eq!(
            Endpoint::Stats(StatCategory::Strikeouts).to_string(),
            "/stats/softball/d1/current/individual/539"
        );
        assert_eq!(
            Endpoint::Scoreboard(GameDate::Current).to_string(),
            "/scoreboard/softball/d1"
        );
        let day = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();
        assert_eq!(
            Endpoint::Scoreboard(GameDate::Day(day)).to_string(),
            "/scoreboard/softball/d1/2025/04/02/all-conf"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn first_call_is_not_delayed() {
        let client = client(1000);
        let start = Instant::now();
        client.wait_if_needed().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn back_to_back_calls_are_spaced() {
        let client = client(1000);
        let start = Instant::now();
        client.wait_if_needed().await;
        client.wait_if_needed().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn only_the_remaining_interval_is_waited() {
        let client = client(1000);
        client.wait_if_needed().await;
        tokio::time::advance(Duration::from_millis(600)).await;

        let start = Instant::now();
        client.wait_if_needed().await;
        let waited = start.elapsed();
        assert!(waited >= Duration::from_millis(400));
        assert!(waited < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_callers_queue_up() {
        let client = std::sync::Arc::new(client(1000));
        let start = Instant::now();
        let calls = (0..3).map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.wait_if_needed().await })
        });
        for call in calls.collect::<Vec<_>>() {
            call.await.unwrap();
        }
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }
}
