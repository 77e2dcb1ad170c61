//! Ranked queue entries of a resolved player.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::FetchError;
use crate::riot::{LeagueEntryDto, Outcome, RegionCode, RiotClient};

pub const RANKED_SOLO_QUEUE: &str = "RANKED_SOLO_5x5";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub queue_type: String,
    pub tier: String,
    pub division: String,
    pub league_points: i32,
    pub wins: i32,
    pub losses: i32,
    pub hot_streak: bool,
    pub veteran: bool,
    pub fresh_blood: bool,
    pub inactive: Option<bool>,
    /// `None` when absent or not parsable.
    pub inactive_start_time: Option<DateTime<Utc>>,
}

impl RankedEntry {
    pub fn is_solo_queue(&self) -> bool {
        self.queue_type == RANKED_SOLO_QUEUE
    }

    /// Start of inactivity as reported by the league itself. Only trusted when
    /// the entry is flagged inactive.
    pub fn inactivity_start(&self) -> Option<DateTime<Utc>> {
        match self.inactive {
            Some(true) => self.inactive_start_time,
            _ => None,
        }
    }
}

impl From<LeagueEntryDto> for RankedEntry {
    fn from(dto: LeagueEntryDto) -> Self {
        let inactive_start_time = dto.inactive_start_time.as_ref().and_then(parse_timestamp);

        if dto.inactive_start_time.is_some() && inactive_start_time.is_none() {
            debug!(queue = %dto.queue_type, "🏅 Unparsable inactiveStartTime ignored");
        }

        Self {
            queue_type: dto.queue_type,
            tier: dto.tier.to_uppercase(),
            division: dto.rank,
            league_points: dto.league_points,
            wins: dto.wins,
            losses: dto.losses,
            hot_streak: dto.hot_streak,
            veteran: dto.veteran,
            fresh_blood: dto.fresh_blood,
            inactive: dto.inactive,
            inactive_start_time,
        }
    }
}

/// The solo/duo entry, the queue decay applies to.
pub fn primary_entry(entries: &[RankedEntry]) -> Option<&RankedEntry> {
    entries.iter().find(|entry| entry.is_solo_queue())
}

/// Accepts epoch milliseconds (number or numeric text) and RFC 3339 text.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(from_millis),
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(millis) => from_millis(millis),
                Err(_) => DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc)),
            }
        }
        _ => None,
    }
}

fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    if millis <= 0 {
        return None;
    }
    Utc.timestamp_millis_opt(millis).single()
}

impl RiotClient {
    /// Ranked entries of a player. Being unranked everywhere is an empty list.
    #[instrument(skip(self), fields(shard = %region.shard()))]
    pub async fn fetch_ranked_entries(
        &self,
        puuid: &str,
        region: RegionCode,
    ) -> Result<Vec<RankedEntry>, FetchError> {
        let outcome = self
            .get_league_entries_by_puuid(region.shard(), puuid)
            .await;

        collect_entries(outcome, &format!("league-v4 by-puuid {}", region.shard()))
    }

    /// Same as [`RiotClient::fetch_ranked_entries`] for accounts only known by
    /// their encrypted summoner id.
    #[deprecated(note = "summoner ids are being phased out, use fetch_ranked_entries")]
    #[instrument(skip(self), fields(shard = %region.shard()))]
    pub async fn fetch_ranked_entries_by_summoner_id(
        &self,
        summoner_id: &str,
        region: RegionCode,
    ) -> Result<Vec<RankedEntry>, FetchError> {
        #[allow(deprecated)]
        let outcome = self
            .get_league_entries_by_summoner(region.shard(), summoner_id)
            .await;

        collect_entries(outcome, &format!("league-v4 by-summoner {}", region.shard()))
    }
}

fn collect_entries(
    outcome: Outcome<Vec<LeagueEntryDto>>,
    endpoint: &str,
) -> Result<Vec<RankedEntry>, FetchError> {
    match outcome {
        Outcome::NotFound => {
            debug!("🏅 No league entries, player is unranked");
            Ok(Vec::new())
        }
        other => Ok(other
            .into_result(endpoint)?
            .into_iter()
            .map(RankedEntry::from)
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn dto(inactive: Option<bool>, inactive_start_time: Option<Value>) -> LeagueEntryDto {
        LeagueEntryDto {
            queue_type: RANKED_SOLO_QUEUE.into(),
            tier: "master".into(),
            rank: "I".into(),
            league_points: 120,
            wins: 80,
            losses: 60,
            hot_streak: false,
            veteran: true,
            fresh_blood: false,
            inactive,
            inactive_start_time,
        }
    }

    #[test]
    fn inactive_start_time_accepts_millis_and_rfc3339() {
        let expected = Utc.with_ymd_and_hms(2026, 9, 1, 12, 0, 0).unwrap();

        let from_number = RankedEntry::from(dto(Some(true), Some(json!(expected.timestamp_millis()))));
        let from_text = RankedEntry::from(dto(Some(true), Some(json!("2026-09-01T12:00:00Z"))));
        let from_numeric_text = RankedEntry::from(dto(
            Some(true),
            Some(json!(expected.timestamp_millis().to_string())),
        ));

        assert_eq!(from_number.inactivity_start(), Some(expected));
        assert_eq!(from_text.inactivity_start(), Some(expected));
        assert_eq!(from_numeric_text.inactivity_start(), Some(expected));
    }

    #[test]
    fn garbage_timestamp_is_dropped() {
        let entry = RankedEntry::from(dto(Some(true), Some(json!("yesterday"))));

        assert_eq!(entry.inactive_start_time, None);
        assert_eq!(entry.inactivity_start(), None);
    }

    #[test]
    fn timestamp_is_ignored_unless_flagged_inactive() {
        let entry = RankedEntry::from(dto(Some(false), Some(json!(1_700_000_000_000_i64))));

        assert!(entry.inactive_start_time.is_some());
        assert_eq!(entry.inactivity_start(), None);
    }

    #[test]
    fn tier_is_normalized_to_uppercase() {
        assert_eq!(RankedEntry::from(dto(None, None)).tier, "MASTER");
    }

    #[test]
    fn primary_entry_is_solo_queue() {
        let mut flex = RankedEntry::from(dto(None, None));
        flex.queue_type = "RANKED_FLEX_SR".into();
        let solo = RankedEntry::from(dto(None, None));

        let entries = vec![flex, solo.clone()];

        assert_eq!(primary_entry(&entries), Some(&solo));
        assert_eq!(primary_entry(&entries[..1]), None);
    }

    #[test]
    fn not_found_means_unranked() {
        assert_eq!(collect_entries(Outcome::NotFound, "x"), Ok(Vec::new()));
        assert!(matches!(
            collect_entries(Outcome::Exhausted, "x"),
            Err(FetchError::Exhausted { .. })
        ));
    }
}
