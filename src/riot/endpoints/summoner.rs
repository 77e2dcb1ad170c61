use crate::riot::client::RiotClient;
use crate::riot::executor::Outcome;
use crate::riot::region::PlatformShard;
use crate::riot::types::SummonerDto;

impl RiotClient {
    /// Get summoner by PUUID
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_summoner_by_puuid(
        &self,
        shard: PlatformShard,
        puuid: &str,
    ) -> Outcome<SummonerDto> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            shard.base_url(),
            puuid
        );

        self.get(&url).await
    }
}
