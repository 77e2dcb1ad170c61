//! Account lookup by Riot ID across routing clusters, and gameplay region
//! detection by probing platform shards.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, FetchError};
use crate::riot::{AccountDto, Outcome, RegionCode, RiotClient, RoutingCluster, SummonerDto};

/// A player as typed by a human (`Name#Tag`) or as an opaque PUUID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIdentity {
    RiotId { game_name: String, tag_line: String },
    Puuid(String),
}

impl FromStr for PlayerIdentity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        match s.rsplit_once('#') {
            Some((game_name, tag_line)) if !game_name.is_empty() && !tag_line.is_empty() => {
                Ok(Self::RiotId {
                    game_name: game_name.to_string(),
                    tag_line: tag_line.to_string(),
                })
            }
            Some(_) => Err(AppError::InvalidIdentity(s.to_string())),
            None if !s.is_empty() => Ok(Self::Puuid(s.to_string())),
            None => Err(AppError::InvalidIdentity(String::new())),
        }
    }
}

impl fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RiotId {
                game_name,
                tag_line,
            } => write!(f, "{game_name}#{tag_line}"),
            Self::Puuid(puuid) => f.write_str(puuid),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRecord {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    /// Only known once the gameplay region has been detected.
    pub region: Option<RegionCode>,
    /// Deprecated by Riot, absent on recent accounts.
    pub summoner_id: Option<String>,
    pub summoner_level: Option<i64>,
}

impl AccountRecord {
    fn from_dto(account: AccountDto, game_name: &str, tag_line: &str) -> Self {
        Self {
            puuid: account.puuid,
            game_name: account.game_name.unwrap_or_else(|| game_name.to_string()),
            tag_line: account.tag_line.unwrap_or_else(|| tag_line.to_string()),
            region: None,
            summoner_id: None,
            summoner_level: None,
        }
    }

    pub fn riot_id(&self) -> String {
        format!("{}#{}", self.game_name, self.tag_line)
    }

    fn attach_summoner(&mut self, region: RegionCode, summoner: SummonerDto) {
        self.region = Some(region);
        self.summoner_id = summoner.id;
        self.summoner_level = Some(summoner.summoner_level);
    }
}

/// Fresh accounts report level 1 on every shard, so they prove nothing.
fn confirms_region(summoner: &SummonerDto) -> bool {
    summoner.summoner_level > 1
}

impl RiotClient {
    /// Find an account by Riot ID, trying the hinted cluster first and then
    /// every other cluster once. A failing cluster never aborts the search.
    #[instrument(skip(self, game_name, tag_line), fields(riot_id = %format!("{game_name}#{tag_line}")))]
    pub async fn resolve_account_by_name(
        &self,
        game_name: &str,
        tag_line: &str,
        region_hint: Option<RegionCode>,
    ) -> Result<AccountRecord, AppError> {
        for cluster in RoutingCluster::search_order(region_hint) {
            match self
                .get_account_by_riot_id(cluster, game_name, tag_line)
                .await
            {
                Outcome::Success(account) => {
                    info!(%cluster, "🔎 ✅ Account found");
                    return Ok(AccountRecord::from_dto(account, game_name, tag_line));
                }
                Outcome::NotFound => debug!(%cluster, "🔎 Account not in cluster"),
                other => warn!(%cluster, outcome = other.label(), "🔎 ⚠️ Cluster lookup failed, moving on"),
            }
        }

        Err(AppError::AccountNotFound {
            game_name: game_name.to_string(),
            tag_line: tag_line.to_string(),
        })
    }

    /// Refresh the Riot ID of a known PUUID with the same clustered search.
    #[instrument(skip(self))]
    pub async fn resolve_account_by_puuid(
        &self,
        puuid: &str,
        region_hint: Option<RegionCode>,
    ) -> Result<AccountRecord, AppError> {
        for cluster in RoutingCluster::search_order(region_hint) {
            match self.get_account_by_puuid(cluster, puuid).await {
                Outcome::Success(account) => {
                    info!(%cluster, "🔎 ✅ Account found");
                    return Ok(AccountRecord::from_dto(account, "", ""));
                }
                Outcome::NotFound => debug!(%cluster, "🔎 Account not in cluster"),
                other => warn!(%cluster, outcome = other.label(), "🔎 ⚠️ Cluster lookup failed, moving on"),
            }
        }

        Err(AppError::PuuidNotFound {
            puuid: puuid.to_string(),
        })
    }

    /// Find which region a PUUID plays on.
    pub async fn detect_region(&self, puuid: &str) -> Result<RegionCode, AppError> {
        self.probe_region(puuid).await.map(|(region, _)| region)
    }

    #[instrument(skip(self))]
    async fn probe_region(&self, puuid: &str) -> Result<(RegionCode, SummonerDto), AppError> {
        for cluster in RoutingCluster::ALL {
            let region = cluster.representative();

            match self.get_summoner_by_puuid(region.shard(), puuid).await {
                Outcome::Success(summoner) if confirms_region(&summoner) => {
                    info!(%region, level = summoner.summoner_level, "🌍 ✅ Region detected");
                    return Ok((region, summoner));
                }
                Outcome::Success(summoner) => debug!(
                    %region,
                    level = summoner.summoner_level,
                    "🌍 Summoner level too low to confirm region"
                ),
                Outcome::NotFound => debug!(%region, "🌍 No summoner on shard"),
                other => warn!(%region, outcome = other.label(), "🌍 ⚠️ Shard probe failed, moving on"),
            }
        }

        Err(AppError::RegionNotDetected {
            puuid: puuid.to_string(),
        })
    }

    pub async fn lookup_summoner(
        &self,
        puuid: &str,
        region: RegionCode,
    ) -> Result<SummonerDto, FetchError> {
        self.get_summoner_by_puuid(region.shard(), puuid)
            .await
            .into_result(&format!("summoner-v4 {}", region.shard()))
    }

    /// Resolve a Riot ID into a complete record: account, gameplay region and
    /// summoner data. The hinted region's shard is checked before the
    /// cluster-wide detection.
    #[instrument(skip(self, game_name, tag_line), fields(riot_id = %format!("{game_name}#{tag_line}")))]
    pub async fn resolve_player(
        &self,
        game_name: &str,
        tag_line: &str,
        region_hint: Option<RegionCode>,
    ) -> Result<AccountRecord, AppError> {
        let mut account = self
            .resolve_account_by_name(game_name, tag_line, region_hint)
            .await?;

        if let Some(region) = region_hint {
            if let Outcome::Success(summoner) =
                self.get_summoner_by_puuid(region.shard(), &account.puuid).await
            {
                if confirms_region(&summoner) {
                    account.attach_summoner(region, summoner);
                    return Ok(account);
                }
            }
        }

        let (region, summoner) = self.probe_region(&account.puuid).await?;
        account.attach_summoner(region, summoner);

        Ok(account)
    }
}
