use crate::riot::client::RiotClient;
use crate::riot::executor::Outcome;
use crate::riot::region::RoutingCluster;
use crate::riot::types::AccountDto;

impl RiotClient {
    /// Get account by Riot ID (game name + tag line)
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_account_by_riot_id(
        &self,
        cluster: RoutingCluster,
        game_name: &str,
        tag_line: &str,
    ) -> Outcome<AccountDto> {
        let url = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            cluster.base_url(),
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line)
        );

        self.get(&url).await
    }

    /// Get account by PUUID
    /// Uses regional routing (americas, europe, asia, sea)
    pub async fn get_account_by_puuid(
        &self,
        cluster: RoutingCluster,
        puuid: &str,
    ) -> Outcome<AccountDto> {
        let url = format!(
            "{}/riot/account/v1/accounts/by-puuid/{}",
            cluster.base_url(),
            puuid
        );

        self.get(&url).await
    }
}
