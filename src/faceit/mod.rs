//! FACEIT Data API v4 client.
//!
//! Three endpoints are consumed: player-by-nickname, match history, and
//! per-match stats. All are bearer-token authenticated against the same
//! upstream host. Non-2xx answers are failures, except per-match stats
//! where a bad status degrades to "no snapshot" so that one missing
//! match does not sink the whole aggregation.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from the upstream API.
#[derive(Debug, Error)]
pub enum FaceitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("player not found")]
    NotFound,

    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },
}

// ── Wire models ─────────────────────────────────────────────────

/// Profile payload from `/players?nickname=`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerProfile {
    pub player_id: String,
    pub nickname: String,
    /// Per-game sub-objects; absent games simply don't appear.
    #[serde(default)]
    pub games: HashMap<String, GameEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameEntry {
    pub faceit_elo: Option<i64>,
    pub skill_level: Option<u8>,
}

impl PlayerProfile {
    /// Elo for one game, if the profile has data for it.
    pub fn elo(&self, game: &str) -> Option<i64> {
        self.games.get(game).and_then(|g| g.faceit_elo)
    }

    /// Skill level for one game; the upstream default tier is 1.
    pub fn skill_level(&self, game: &str) -> u8 {
        self.games
            .get(game)
            .and_then(|g| g.skill_level)
            .unwrap_or(1)
    }
}

#[derive(Debug, Deserialize)]
struct MatchHistory {
    #[serde(default)]
    items: Vec<MatchReference>,
}

#[derive(Debug, Deserialize)]
struct MatchReference {
    match_id: String,
}

/// Stats payload from `/matches/{id}/stats`.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchStats {
    #[serde(default)]
    pub rounds: Vec<RoundStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoundStats {
    #[serde(default)]
    pub teams: Vec<TeamStats>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamStats {
    #[serde(default)]
    pub players: Vec<MatchPlayer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchPlayer {
    pub player_id: String,
    #[serde(default)]
    pub player_stats: PlayerMatchStats,
}

/// Per-player counters. FACEIT reports these as numeric strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlayerMatchStats {
    #[serde(rename = "Kills", default)]
    pub kills: String,
    #[serde(rename = "Deaths", default)]
    pub deaths: String,
}

// ── Client ──────────────────────────────────────────────────────

/// Trait for the upstream platform, so handlers can be tested against
/// a mock instead of the live API.
#[async_trait]
pub trait FaceitApi: Send + Sync {
    /// Resolve a nickname to a profile. `FaceitError::NotFound` maps the
    /// upstream 404; any other non-2xx becomes `FaceitError::Status`.
    async fn player_by_nickname(&self, nickname: &str) -> Result<PlayerProfile, FaceitError>;

    /// Last `limit` match ids for a player in one game.
    async fn match_history(
        &self,
        player_id: &str,
        game: &str,
        limit: u32,
    ) -> Result<Vec<String>, FaceitError>;

    /// Stats for one match. `Ok(None)` when the upstream answers with a
    /// non-2xx status; `Err` only for transport-level failures.
    async fn match_stats(&self, match_id: &str) -> Result<Option<MatchStats>, FaceitError>;
}

/// Configuration for the live client.
#[derive(Debug, Clone)]
pub struct FaceitClientConfig {
    /// API root, e.g. `https://open.faceit.com/data/v4`
    pub base_url: String,

    /// Bearer token for the Data API.
    pub api_key: String,

    /// Request timeout.
    pub timeout: Duration,
}

/// Live reqwest-backed client.
pub struct FaceitClient {
    client: Client,
    base_url: String,
}

impl FaceitClient {
    pub fn new(config: FaceitClientConfig) -> Result<Self, FaceitError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .unwrap_or_else(|_| HeaderValue::from_static("Bearer invalid"));
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl FaceitApi for FaceitClient {
    async fn player_by_nickname(&self, nickname: &str) -> Result<PlayerProfile, FaceitError> {
        debug!("Fetching profile for nickname {}", nickname);

        let response = self
            .client
            .get(format!("{}/players", self.base_url))
            .query(&[("nickname", nickname)])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FaceitError::NotFound),
            status if !status.is_success() => Err(FaceitError::Status {
                status: status.as_u16(),
            }),
            _ => Ok(response.json().await?),
        }
    }

    async fn match_history(
        &self,
        player_id: &str,
        game: &str,
        limit: u32,
    ) -> Result<Vec<String>, FaceitError> {
        debug!("Fetching last {} {} matches for {}", limit, game, player_id);

        let response = self
            .client
            .get(format!("{}/players/{}/history", self.base_url, player_id))
            .query(&[("game", game), ("limit", &limit.to_string())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FaceitError::Status {
                status: status.as_u16(),
            });
        }

        let history: MatchHistory = response.json().await?;
        Ok(history.items.into_iter().map(|m| m.match_id).collect())
    }

    async fn match_stats(&self, match_id: &str) -> Result<Option<MatchStats>, FaceitError> {
        let response = self
            .client
            .get(format!("{}/matches/{}/stats", self.base_url, match_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Stats for match {} unavailable (HTTP {})", match_id, status);
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }
}
