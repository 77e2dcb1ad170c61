use crate::riot::client::RiotClient;
use crate::riot::executor::Outcome;
use crate::riot::region::RoutingCluster;
use crate::riot::types::MatchDto;

/// Ranked Solo/Duo queue id.
pub const RANKED_SOLO_QUEUE_ID: i32 = 420;

impl RiotClient {
    /// Get the most recent Solo/Duo match IDs, newest first
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_ranked_match_ids(
        &self,
        cluster: RoutingCluster,
        puuid: &str,
        count: u32,
    ) -> Outcome<Vec<String>> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?queue={}&type=ranked&start=0&count={}",
            cluster.base_url(),
            puuid,
            RANKED_SOLO_QUEUE_ID,
            count
        );

        self.get(&url).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_match(&self, cluster: RoutingCluster, match_id: &str) -> Outcome<MatchDto> {
        let url = format!("{}/lol/match/v5/matches/{}", cluster.base_url(), match_id);

        self.get(&url).await
    }
}
