//! The lookup endpoint.
//!
//! `GET /api/player?nickname=` — cache check, then profile → history →
//! parallel per-match stats, aggregate, cache, respond. Concurrent
//! misses for the same nickname are collapsed into one upstream pass by
//! the cache's per-key lock.

use anyhow::Context;
use axum::extract::{Query, State};
use axum::Json;
use futures::future::join_all;
use serde::Deserialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::accumulate_kd;
use crate::config::FaceitConfig;
use crate::faceit::{FaceitApi, FaceitError};
use crate::models::PlayerSummary;

#[derive(Debug, Deserialize)]
pub struct LookupParams {
    pub nickname: Option<String>,
}

pub async fn lookup_player(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<PlayerSummary>, ApiError> {
    let nickname = params
        .nickname
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or(ApiError::MissingNickname)?;

    if let Some(hit) = state.cache.get(nickname).await {
        return Ok(Json(hit));
    }

    let faceit = state.faceit.clone().ok_or(ApiError::ApiKeyNotSet)?;

    // Single flight: losers of this race find the winner's entry on the
    // re-check instead of repeating the upstream fan-out.
    let lock = state.cache.key_lock(nickname).await;
    let _guard = lock.lock().await;
    if let Some(hit) = state.cache.get(nickname).await {
        return Ok(Json(hit));
    }

    let summary = fetch_summary(faceit.as_ref(), &state.settings.faceit, nickname).await?;
    state.cache.insert(nickname, summary.clone()).await;

    Ok(Json(summary))
}

/// The fetch-aggregate pipeline behind a cache miss.
async fn fetch_summary(
    faceit: &dyn FaceitApi,
    config: &FaceitConfig,
    nickname: &str,
) -> Result<PlayerSummary, ApiError> {
    let profile = faceit
        .player_by_nickname(nickname)
        .await
        .map_err(|e| match e {
            FaceitError::NotFound => ApiError::PlayerNotFound,
            FaceitError::Status { status } => ApiError::Upstream { status },
            other => ApiError::Internal(other.into()),
        })?;

    let match_ids = faceit
        .match_history(&profile.player_id, &config.game, config.match_limit)
        .await
        .context("Failed to fetch match history")?;

    // Fire all stats requests at once and await the batch. A bad status
    // on one match arrives as None and is skipped by the aggregation; a
    // transport failure fails the whole batch.
    let snapshots: Vec<_> = join_all(match_ids.iter().map(|id| faceit.match_stats(id)))
        .await
        .into_iter()
        .collect::<Result<_, _>>()
        .context("Failed to fetch match stats")?;

    let totals = accumulate_kd(&snapshots, &profile.player_id);
    info!(
        "Aggregated {} of {} matches for {} (K/D {})",
        totals.games_counted,
        match_ids.len(),
        profile.nickname,
        totals.average_kd()
    );

    Ok(PlayerSummary {
        nickname: profile.nickname.clone(),
        elo: profile.elo(&config.game).into(),
        skill_level: profile.skill_level(&config.game),
        average_kd: totals.average_kd(),
    })
}
