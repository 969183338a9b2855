use crate::config::FplApiConfig;
use crate::models::*;
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::info;
use whatif_engine::RankConfig;

/// Client for the fantasy API's bootstrap, live and picks endpoints
pub struct FplFetcher {
    config: FplApiConfig,
    client: Client,
}

impl FplFetcher {
    /// Create a new fetcher instance
    pub fn new(config: FplApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    pub fn bootstrap_url(&self) -> String {
        format!("{}/bootstrap-static/", self.config.base_url)
    }

    pub fn live_url(&self, gameweek: u32) -> String {
        format!("{}/event/{}/live/", self.config.base_url, gameweek)
    }

    pub fn picks_url(&self, entry_id: u64, gameweek: u32) -> String {
        format!("{}/entry/{}/event/{}/picks/", self.config.base_url, entry_id, gameweek)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        info!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("API request to {} failed with status: {}", url, response.status());
        }

        response.json().await.with_context(|| format!("Failed to parse JSON from {url}"))
    }

    /// Player metadata, gameweek averages and entrant count
    pub async fn fetch_bootstrap(&self) -> Result<BootstrapPayload> {
        let bootstrap: BootstrapPayload = self.get_json(&self.bootstrap_url()).await?;
        info!(
            "Fetched bootstrap: {} players, {} gameweeks",
            bootstrap.elements.len(),
            bootstrap.events.len()
        );
        Ok(bootstrap)
    }

    /// Per-player minutes and points for a gameweek
    pub async fn fetch_live(&self, gameweek: u32) -> Result<LivePayload> {
        let live: LivePayload = self.get_json(&self.live_url(gameweek)).await?;
        info!("Fetched live scores for {} players in gameweek {}", live.elements.len(), gameweek);
        Ok(live)
    }

    /// A manager's squad for a gameweek
    pub async fn fetch_picks(&self, entry_id: u64, gameweek: u32) -> Result<PicksPayload> {
        let picks: PicksPayload = self.get_json(&self.picks_url(entry_id, gameweek)).await?;
        info!("Fetched {} picks for entry {} in gameweek {}", picks.picks.len(), entry_id, gameweek);
        Ok(picks)
    }

    /// Fetch and map everything needed to simulate one manager's gameweek.
    ///
    /// With a known gameweek the three requests run concurrently; otherwise the
    /// bootstrap is fetched first to detect the current gameweek.
    pub async fn fetch_snapshot(
        &self,
        entry_id: u64,
        gameweek: Option<u32>,
        rank: &RankConfig,
    ) -> Result<GameweekSnapshot> {
        let (bootstrap, live, picks, gameweek) = match gameweek {
            Some(gw) => {
                let (bootstrap, live, picks) = tokio::try_join!(
                    self.fetch_bootstrap(),
                    self.fetch_live(gw),
                    self.fetch_picks(entry_id, gw)
                )?;
                (bootstrap, live, picks, gw)
            }
            None => {
                let bootstrap = self.fetch_bootstrap().await?;
                let gw = bootstrap.current_gameweek();
                info!("Detected current gameweek {}", gw);
                let (live, picks) =
                    tokio::try_join!(self.fetch_live(gw), self.fetch_picks(entry_id, gw))?;
                (bootstrap, live, picks, gw)
            }
        };

        build_snapshot(entry_id, gameweek, &bootstrap, &live, &picks, rank)
    }
}

/// Map raw payloads into the strict records the engine works on
pub fn build_snapshot(
    entry_id: u64,
    gameweek: u32,
    bootstrap: &BootstrapPayload,
    live: &LivePayload,
    picks: &PicksPayload,
    rank: &RankConfig,
) -> Result<GameweekSnapshot> {
    let context = bootstrap.gameweek_context(gameweek, rank)?;
    let player_meta = bootstrap.player_meta()?;
    let live_scores = live.live_scores();
    let squad = picks
        .squad()
        .with_context(|| format!("Invalid squad for entry {entry_id} in gameweek {gameweek}"))?;

    Ok(GameweekSnapshot {
        entry_id,
        context,
        squad,
        live_scores,
        player_meta,
        fetched_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures;

    #[test]
    fn test_endpoint_urls() {
        let fetcher = FplFetcher::new(FplApiConfig {
            base_url: "http://localhost:9000/api".to_string(),
            ..FplApiConfig::default()
        })
        .unwrap();

        assert_eq!(fetcher.bootstrap_url(), "http://localhost:9000/api/bootstrap-static/");
        assert_eq!(fetcher.live_url(7), "http://localhost:9000/api/event/7/live/");
        assert_eq!(fetcher.picks_url(1234, 7), "http://localhost:9000/api/entry/1234/event/7/picks/");
    }

    #[test]
    fn test_build_snapshot() {
        let snapshot = build_snapshot(
            42,
            7,
            &fixtures::bootstrap(),
            &fixtures::live(),
            &fixtures::picks(),
            &RankConfig::default(),
        )
        .unwrap();

        assert_eq!(snapshot.entry_id, 42);
        assert_eq!(snapshot.context.gameweek, 7);
        assert_eq!(snapshot.context.average_score, 55.0);
        assert_eq!(snapshot.squad.captain().player_id, 1);
        assert_eq!(snapshot.live_scores.len(), 15);
        assert_eq!(snapshot.player_meta.len(), 15);
    }

    #[test]
    fn test_build_snapshot_rejects_bad_squad() {
        let mut picks = fixtures::picks();
        picks.picks.pop();
        let err = build_snapshot(
            42,
            7,
            &fixtures::bootstrap(),
            &fixtures::live(),
            &picks,
            &RankConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("entry 42"));
    }
}
