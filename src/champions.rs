//! Champion id → name lookup, built once from Data Dragon at startup and
//! shared read-only afterwards.

use std::collections::HashMap;

use tracing::info;

use crate::error::AppError;
use crate::riot::types::ChampionListDto;

const DDRAGON_BASE_URL: &str = "https://ddragon.leagueoflegends.com/cdn";

#[derive(Debug, Clone, Default)]
pub struct ChampionTable {
    names: HashMap<u32, String>,
}

impl ChampionTable {
    pub fn from_entries(entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self {
            names: entries.into_iter().collect(),
        }
    }

    /// Download `champion.json` for the given Data Dragon version.
    pub async fn load(client: &reqwest::Client, version: &str) -> Result<Self, AppError> {
        let url = format!("{DDRAGON_BASE_URL}/{version}/data/en_US/champion.json");
        let table = Self::load_from(client, &url).await?;

        info!(
            version,
            champions = table.len(),
            "🧙 Champion table loaded"
        );

        Ok(table)
    }

    pub async fn load_from(client: &reqwest::Client, url: &str) -> Result<Self, AppError> {
        let list: ChampionListDto = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(Self::from_list(list))
    }

    fn from_list(list: ChampionListDto) -> Self {
        Self::from_entries(
            list.data
                .into_values()
                .filter_map(|champion| Some((champion.key.parse().ok()?, champion.name))),
        )
    }

    pub fn name(&self, champion_id: u32) -> Option<&str> {
        self.names.get(&champion_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;

    const CHAMPION_JSON: &str = r#"{
        "type": "champion",
        "version": "16.1.1",
        "data": {
            "Ahri": {"id": "Ahri", "key": "103", "name": "Ahri"},
            "MonkeyKing": {"id": "MonkeyKing", "key": "62", "name": "Wukong"},
            "Broken": {"id": "Broken", "key": "n/a", "name": "Broken"}
        }
    }"#;

    #[tokio::test]
    async fn load_from_keeps_numeric_keys_only() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/champion.json");
                then.status(200).body(CHAMPION_JSON);
            })
            .await;

        let table = ChampionTable::load_from(&reqwest::Client::new(), &server.url("/champion.json"))
            .await
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.name(62), Some("Wukong"));
        assert_eq!(table.name(103), Some("Ahri"));
        assert_eq!(table.name(1), None);
    }

    #[tokio::test]
    async fn load_from_fails_on_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/champion.json");
                then.status(500);
            })
            .await;

        let res = ChampionTable::load_from(&reqwest::Client::new(), &server.url("/champion.json")).await;

        assert!(matches!(res, Err(AppError::Http(_))));
    }
}
