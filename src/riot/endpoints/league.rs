use crate::riot::client::RiotClient;
use crate::riot::executor::Outcome;
use crate::riot::region::PlatformShard;
use crate::riot::types::LeagueEntryDto;

impl RiotClient {
    /// Get league entries (ranked info) for a player by PUUID
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_league_entries_by_puuid(
        &self,
        shard: PlatformShard,
        puuid: &str,
    ) -> Outcome<Vec<LeagueEntryDto>> {
        let url = format!(
            "{}/lol/league/v4/entries/by-puuid/{}",
            shard.base_url(),
            puuid
        );

        self.get(&url).await
    }

    /// Get league entries keyed by the encrypted summoner id.
    #[deprecated(note = "summoner ids are being phased out, use get_league_entries_by_puuid")]
    pub async fn get_league_entries_by_summoner(
        &self,
        shard: PlatformShard,
        summoner_id: &str,
    ) -> Outcome<Vec<LeagueEntryDto>> {
        let url = format!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            shard.base_url(),
            summoner_id
        );

        self.get(&url).await
    }
}
