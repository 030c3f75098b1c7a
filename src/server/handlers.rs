use crate::{
    error::{ProxyError, ProxyResult},
    ncaa::{
        categories::StatCategory,
        fallback,
        normalize::{format_stats, StatLeaders},
        rankings::RankingsSnapshot,
        scoreboard::{GameDate, Scoreboard},
    },
    server::{
        response::{ApiError, Served},
        AppState,
    },
    storage::CacheSlot,
};
use axum::{
    extract::{Path, State},
    Json,
};
use http::StatusCode;
use serde::Serialize;
use std::{future::Future, hash::Hash};
use tracing::{debug, error, info, warn};

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    message: &'static str,
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        message: "Server is running",
    })
}

pub async fn rankings(State(state): State<AppState>) -> Result<Served<RankingsSnapshot>, ApiError> {
    let client = &state.client;
    serve_with_fallback(
        &state,
        &state.cache.rankings,
        (),
        ("rankings", "rankings".to_string()),
        move || client.fetch_rankings(),
        fallback::rankings,
    )
    .await
}

pub async fn stats(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Served<StatLeaders>, ApiError> {
    let category = StatCategory::resolve(&category, state.settings.unknown_category)?;
    let client = &state.client;
    serve_with_fallback(
        &state,
        &state.cache.stats,
        category,
        ("stats", format!("{category} stats")),
        move || async move {
            let payload = client.fetch_stats(category).await?;
            Ok::<_, ProxyError>(format_stats(&payload, category))
        },
        || fallback::stats(category),
    )
    .await
}

pub async fn games_current(State(state): State<AppState>) -> Result<Served<Scoreboard>, ApiError> {
    games_for(&state, GameDate::Current).await
}

pub async fn games(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Served<Scoreboard>, ApiError> {
    let date = GameDate::parse(&date)?;
    games_for(&state, date).await
}

async fn games_for(state: &AppState, date: GameDate) -> Result<Served<Scoreboard>, ApiError> {
    let client = &state.client;
    serve_with_fallback(
        state,
        &state.cache.games,
        date,
        ("games", format!("{date} games")),
        move || async move {
            let payload = client.fetch_scoreboard(&date).await?;
            Ok::<_, ProxyError>(Scoreboard::from_payload(&payload, &date))
        },
        || fallback::scoreboard(&date),
    )
    .await
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed", None)
}

pub async fn not_found() -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, "Endpoint not found", None)
}

/// Answer from the freshest source available: fresh cache, upstream, stale
/// cache, canned data. Only when all of them are exhausted does the request fail.
/// `what` is the kind of data, `subject` the exact data requested (for logs).
async fn serve_with_fallback<K, T, F, Fut>(
    state: &AppState,
    slot: &CacheSlot<K, T>,
    key: K,
    (what, subject): (&str, String),
    fetch: F,
    mock: impl FnOnce() -> T,
) -> Result<Served<T>, ApiError>
where
    K: Eq + Hash,
    T: Clone,
    F: Fn() -> Fut,
    Fut: Future<Output = ProxyResult<T>>,
{
    if let Some(lookup) = slot.get(&key) {
        if lookup.fresh {
            debug!("Serving {subject} from cache");
            return Ok(Served::live(lookup.entry.data));
        }
    }

    let error = match fetch_with_retries(state, &subject, fetch).await {
        Ok(data) => {
            info!("Refreshed cached {subject}");
            slot.put(key, data.clone());
            return Ok(Served::live(data));
        }
        Err(e) => e,
    };
    error!("Error fetching {subject}: {error}");

    // Looked up again, another request may have refreshed the entry meanwhile.
    if let Some(lookup) = slot.get(&key) {
        warn!(
            "Serving stale {subject} cached at {}",
            lookup.entry.cached_at
        );
        return Ok(Served::stale(lookup.entry));
    }

    if state.settings.mock_fallback_enabled {
        warn!("No cached {subject}, serving sample data");
        return Ok(Served::mock(mock()));
    }

    Err(ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to fetch live {what}"),
        Some(error.to_string()),
    ))
}

async fn fetch_with_retries<T, F, Fut>(state: &AppState, what: &str, fetch: F) -> ProxyResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = ProxyResult<T>>,
{
    let attempts = state.settings.upstream_attempts.max(1);
    let mut attempt = 1;
    loop {
        match fetch().await {
            Ok(data) => return Ok(data),
            Err(e) if attempt < attempts => {
                warn!("Attempt {attempt}/{attempts} to fetch {what} failed, retrying. {e}");
                tokio::time::sleep(state.settings.upstream_retry_delay()).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
