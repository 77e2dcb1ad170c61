use serde::Deserialize;

// ============================================================================
// Account-v1
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub puuid: String,
    pub game_name: Option<String>,
    pub tag_line: Option<String>,
}

// ============================================================================
// Summoner-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummonerDto {
    pub puuid: String,
    /// Encrypted summoner id, deprecated by Riot and missing on newer payloads.
    #[serde(default)]
    pub id: Option<String>,
    pub summoner_level: i64,
    #[serde(default)]
    pub profile_icon_id: i32,
}

// ============================================================================
// League-v4
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueEntryDto {
    pub queue_type: String,
    #[serde(default)]
    pub tier: String,
    #[serde(default)]
    pub rank: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    #[serde(default)]
    pub hot_streak: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default)]
    pub fresh_blood: bool,
    #[serde(default)]
    pub inactive: Option<bool>,
    /// Sent either as epoch milliseconds or as text depending on the shard.
    #[serde(default)]
    pub inactive_start_time: Option<serde_json::Value>,
}

// ============================================================================
// Match-v5
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDto {
    pub metadata: MetadataDto,
    pub info: InfoDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDto {
    pub match_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoDto {
    pub game_creation: i64,
    /// Seconds when `gameEndTimestamp` is present, milliseconds on older
    /// matches that lack it.
    pub game_duration: i64,
    #[serde(default)]
    pub game_end_timestamp: Option<i64>,
    pub queue_id: i32,
    pub participants: Vec<ParticipantDto>,
}

impl InfoDto {
    /// Epoch milliseconds at which the game ended.
    pub fn ended_at_millis(&self) -> i64 {
        match self.game_end_timestamp {
            Some(end) => end,
            None => self.game_creation + self.game_duration,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub puuid: String,
    pub champion_id: u32,
    #[serde(default)]
    pub champion_name: String,
}

// ============================================================================
// Data Dragon
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionListDto {
    pub data: std::collections::HashMap<String, ChampionDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChampionDto {
    /// Numeric champion id, as a string.
    pub key: String,
    pub name: String,
}
