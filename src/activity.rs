//! Fallback activity signal: the player's most recent solo/duo game, found by
//! scanning a bounded window of ranked match history.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::FetchError;
use crate::riot::endpoints::match_v5::RANKED_SOLO_QUEUE_ID;
use crate::riot::{MatchDto, Outcome, RegionCode, RiotClient};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentRankedMatch {
    pub match_id: String,
    pub played_at: DateTime<Utc>,
    pub champion: Option<String>,
}

/// Anything able to tell when a player last played a solo/duo game.
#[async_trait]
pub trait RankedActivitySource: Send + Sync {
    /// `Ok(None)` means no solo/duo game inside the scanned window.
    async fn last_ranked_match(
        &self,
        puuid: &str,
        region: RegionCode,
    ) -> Result<Option<RecentRankedMatch>, FetchError>;
}

#[async_trait]
impl RankedActivitySource for RiotClient {
    #[instrument(skip(self))]
    async fn last_ranked_match(
        &self,
        puuid: &str,
        region: RegionCode,
    ) -> Result<Option<RecentRankedMatch>, FetchError> {
        let cluster = region.cluster();
        let endpoint = format!("match-v5 {cluster}");
        debug!(window = self.match_scan_count(), "📜 Scanning ranked match history");

        let match_ids = match self
            .get_ranked_match_ids(cluster, puuid, self.match_scan_count())
            .await
        {
            Outcome::NotFound => Vec::new(),
            other => other.into_result(&endpoint)?,
        };

        for match_id in match_ids {
            let match_data = match self.get_match(cluster, &match_id).await {
                Outcome::Success(match_data) => match_data,
                Outcome::NotFound => {
                    debug!(%match_id, "📜 Listed match vanished, skipping");
                    continue;
                }
                other => {
                    warn!(%match_id, outcome = other.label(), "📜 ⚠️ Match fetch failed, moving on");
                    continue;
                }
            };

            // The id query already filters on queue, this guards odd payloads.
            if match_data.info.queue_id != RANKED_SOLO_QUEUE_ID {
                continue;
            }

            if let Some(recent) = self.summarize(puuid, match_data) {
                info!(match_id = %recent.match_id, played_at = %recent.played_at, "📜 ✅ Last solo/duo game found");
                return Ok(Some(recent));
            }
        }

        debug!("📜 No solo/duo game in the scanned window");
        Ok(None)
    }
}

impl RiotClient {
    fn summarize(&self, puuid: &str, match_data: MatchDto) -> Option<RecentRankedMatch> {
        let played_at = Utc
            .timestamp_millis_opt(match_data.info.ended_at_millis())
            .single()?;

        let champion = match_data
            .info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .and_then(|p| {
                self.champions()
                    .name(p.champion_id)
                    .map(str::to_string)
                    .or_else(|| Some(p.champion_name.clone()).filter(|name| !name.is_empty()))
            });

        Some(RecentRankedMatch {
            match_id: match_data.metadata.match_id,
            played_at,
            champion,
        })
    }
}
