//! Rank decay risk projection.
//!
//! Apex and Diamond players bank inactivity days; once the bank is empty their
//! LP starts draining. The reference point for "last activity" comes from one
//! of two sources, in priority order:
//!
//! 1. the league entry itself, when it is flagged inactive with a parsable
//!    `inactiveStartTime`;
//! 2. the most recent solo/duo game found in match history.
//!
//! When neither is available the assessment is [`DecayClassification::Unknown`]
//! rather than a guess.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::activity::{RankedActivitySource, RecentRankedMatch};
use crate::error::FetchError;
use crate::ranked::{RankedEntry, primary_entry};
use crate::riot::{RegionCode, RiotClient};

const DIAMOND_MAX_BANK_DAYS: i64 = 30;
const APEX_MAX_BANK_DAYS: i64 = 14;
const CRITICAL_DAYS: i64 = 3;
const CAUTION_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DecayClassification {
    #[serde(rename = "unranked")]
    Unranked,
    #[serde(rename = "safe")]
    Safe,
    #[serde(rename = "caution")]
    Caution,
    #[serde(rename = "critical")]
    Critical,
    #[serde(rename = "active decay")]
    ActiveDecay,
    #[serde(rename = "unknown")]
    Unknown,
}

impl DecayClassification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unranked => "unranked",
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::Critical => "critical",
            Self::ActiveDecay => "active decay",
            Self::Unknown => "unknown",
        }
    }

    /// Classification of a decay-eligible player from the days left in the bank.
    pub fn from_days_remaining(days_remaining: i64) -> Self {
        if days_remaining <= 0 {
            Self::ActiveDecay
        } else if days_remaining <= CRITICAL_DAYS {
            Self::Critical
        } else if days_remaining <= CAUTION_DAYS {
            Self::Caution
        } else {
            Self::Safe
        }
    }

    pub fn is_at_risk(&self) -> bool {
        matches!(self, Self::Caution | Self::Critical | Self::ActiveDecay)
    }
}

impl fmt::Display for DecayClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signal produced the reference timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalSource {
    InactivityFlag,
    LastRankedMatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferencePoint {
    pub timestamp: DateTime<Utc>,
    pub source: SignalSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecayAssessment {
    pub at_risk: bool,
    pub days_remaining: Option<i64>,
    pub days_in_bank: i64,
    pub max_bank: i64,
    pub reference_timestamp: Option<DateTime<Utc>>,
    pub reference_source: Option<SignalSource>,
    /// `None` only for unranked players.
    pub tier: Option<String>,
    pub division: Option<String>,
    pub league_points: Option<i32>,
    pub classification: DecayClassification,
    pub message: String,
}

impl DecayAssessment {
    fn unranked() -> Self {
        Self {
            at_risk: false,
            days_remaining: None,
            days_in_bank: 0,
            max_bank: 0,
            reference_timestamp: None,
            reference_source: None,
            tier: None,
            division: None,
            league_points: None,
            classification: DecayClassification::Unranked,
            message: "No ranked Solo/Duo entry, decay does not apply.".into(),
        }
    }

    fn for_entry(entry: &RankedEntry, classification: DecayClassification, message: String) -> Self {
        Self {
            at_risk: classification.is_at_risk(),
            days_remaining: None,
            days_in_bank: 0,
            max_bank: 0,
            reference_timestamp: None,
            reference_source: None,
            tier: Some(entry.tier.clone()),
            division: Some(entry.division.clone()),
            league_points: Some(entry.league_points),
            classification,
            message,
        }
    }
}

/// Days of inactivity a tier may bank, `None` for tiers that never decay.
pub fn max_bank_days(tier: &str) -> Option<i64> {
    match tier.to_uppercase().as_str() {
        "DIAMOND" => Some(DIAMOND_MAX_BANK_DAYS),
        "MASTER" | "GRANDMASTER" | "CHALLENGER" => Some(APEX_MAX_BANK_DAYS),
        _ => None,
    }
}

/// Pick the reference point, preferring the league's own inactivity flag.
pub fn reference_point(
    entry: &RankedEntry,
    last_ranked: Option<&RecentRankedMatch>,
) -> Option<ReferencePoint> {
    if let Some(timestamp) = entry.inactivity_start() {
        return Some(ReferencePoint {
            timestamp,
            source: SignalSource::InactivityFlag,
        });
    }

    last_ranked.map(|recent| ReferencePoint {
        timestamp: recent.played_at,
        source: SignalSource::LastRankedMatch,
    })
}

/// Whole days elapsed since `reference`, never negative.
pub fn days_since(reference: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - reference).num_days().max(0)
}

/// Assess decay risk from every ranked entry of a player.
pub fn assess_decay(
    entries: &[RankedEntry],
    last_ranked: Option<&RecentRankedMatch>,
    now: DateTime<Utc>,
) -> DecayAssessment {
    assess_entry(primary_entry(entries), last_ranked, now)
}

/// Assess decay risk from the solo/duo entry alone.
pub fn assess_entry(
    entry: Option<&RankedEntry>,
    last_ranked: Option<&RecentRankedMatch>,
    now: DateTime<Utc>,
) -> DecayAssessment {
    let Some(entry) = entry else {
        return DecayAssessment::unranked();
    };

    let Some(max_bank) = max_bank_days(&entry.tier) else {
        return DecayAssessment::for_entry(
            entry,
            DecayClassification::Safe,
            format!("{} is not subject to inactivity decay.", entry.tier),
        );
    };

    let Some(reference) = reference_point(entry, last_ranked) else {
        let mut assessment = DecayAssessment::for_entry(
            entry,
            DecayClassification::Unknown,
            "No inactivity timestamp and no Solo/Duo game in recent history, decay risk cannot be determined.".into(),
        );
        assessment.max_bank = max_bank;
        return assessment;
    };

    let elapsed = days_since(reference.timestamp, now);
    let days_remaining = (max_bank - elapsed).max(0);
    let classification = DecayClassification::from_days_remaining(days_remaining);

    let message = match classification {
        DecayClassification::ActiveDecay => format!(
            "Decay is active: {} LP are draining until a Solo/Duo game is played.",
            entry.league_points
        ),
        DecayClassification::Critical => format!(
            "Decay starts in {days_remaining} day(s), play a Solo/Duo game now."
        ),
        DecayClassification::Caution => {
            format!("{days_remaining} days left before decay starts.")
        }
        _ => format!("{days_remaining} of {max_bank} days banked, no decay risk."),
    };

    DecayAssessment {
        at_risk: classification.is_at_risk(),
        days_remaining: Some(days_remaining),
        days_in_bank: days_remaining,
        max_bank,
        reference_timestamp: Some(reference.timestamp),
        reference_source: Some(reference.source),
        tier: Some(entry.tier.clone()),
        division: Some(entry.division.clone()),
        league_points: Some(entry.league_points),
        classification,
        message,
    }
}

/// Whether the fallback source has to be queried for this entry.
fn needs_match_history(entry: Option<&RankedEntry>) -> bool {
    entry.is_some_and(|e| max_bank_days(&e.tier).is_some() && e.inactivity_start().is_none())
}

impl RiotClient {
    /// Fetch ranked entries and, only when needed, match history, then assess
    /// decay risk as of `now`.
    #[instrument(skip(self))]
    pub async fn check_decay(
        &self,
        puuid: &str,
        region: RegionCode,
        now: DateTime<Utc>,
    ) -> Result<DecayAssessment, FetchError> {
        let entries = self.fetch_ranked_entries(puuid, region).await?;
        assess_with_source(self, &entries, puuid, region, now).await
    }
}

/// Assess `entries`, asking `source` for the fallback signal if required.
pub async fn assess_with_source(
    source: &dyn RankedActivitySource,
    entries: &[RankedEntry],
    puuid: &str,
    region: RegionCode,
    now: DateTime<Utc>,
) -> Result<DecayAssessment, FetchError> {
    let entry = primary_entry(entries);

    let last_ranked = if needs_match_history(entry) {
        source.last_ranked_match(puuid, region).await?
    } else {
        None
    };

    let assessment = assess_entry(entry, last_ranked.as_ref(), now);
    debug!(
        classification = %assessment.classification,
        days_remaining = ?assessment.days_remaining,
        "⏳ Decay assessed"
    );

    Ok(assessment)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::ranked::RANKED_SOLO_QUEUE;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
    }

    fn entry(tier: &str) -> RankedEntry {
        RankedEntry {
            queue_type: RANKED_SOLO_QUEUE.into(),
            tier: tier.into(),
            division: "I".into(),
            league_points: 75,
            wins: 120,
            losses: 100,
            hot_streak: false,
            veteran: false,
            fresh_blood: false,
            inactive: Some(false),
            inactive_start_time: None,
        }
    }

    fn inactive_since(tier: &str, days: i64) -> RankedEntry {
        RankedEntry {
            inactive: Some(true),
            inactive_start_time: Some(now() - Duration::days(days)),
            ..entry(tier)
        }
    }

    fn played(days_ago: i64) -> RecentRankedMatch {
        RecentRankedMatch {
            match_id: "EUW1_7349112729".into(),
            played_at: now() - Duration::days(days_ago),
            champion: Some("Ahri".into()),
        }
    }

    #[test]
    fn diamond_after_31_days_is_decaying() {
        let assessment = assess_entry(Some(&inactive_since("DIAMOND", 31)), None, now());

        assert_eq!(assessment.days_remaining, Some(0));
        assert_eq!(assessment.classification, DecayClassification::ActiveDecay);
        assert!(assessment.at_risk);
        assert_eq!(assessment.max_bank, 30);
    }

    #[test]
    fn master_after_10_days_has_4_days_left() {
        let assessment = assess_entry(Some(&entry("MASTER")), Some(&played(10)), now());

        assert_eq!(assessment.days_remaining, Some(4));
        assert_eq!(assessment.classification, DecayClassification::Caution);
        assert!(assessment.at_risk);
        assert_eq!(assessment.reference_source, Some(SignalSource::LastRankedMatch));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let cases = [
            (11, DecayClassification::Critical),
            (12, DecayClassification::Critical),
            (7, DecayClassification::Caution),
            (6, DecayClassification::Safe),
            (14, DecayClassification::ActiveDecay),
        ];

        for (days, expected) in cases {
            let assessment = assess_entry(Some(&entry("GRANDMASTER")), Some(&played(days)), now());
            assert_eq!(assessment.classification, expected, "{days} days");
        }
    }

    #[test]
    fn tiers_below_diamond_never_decay() {
        for tier in ["IRON", "GOLD", "EMERALD"] {
            let assessment = assess_entry(Some(&inactive_since(tier, 400)), None, now());

            assert_eq!(assessment.classification, DecayClassification::Safe);
            assert!(!assessment.at_risk);
            assert_eq!(assessment.days_remaining, None);
            assert_eq!(assessment.tier.as_deref(), Some(tier));
        }
    }

    #[test]
    fn missing_solo_entry_is_unranked() {
        let mut flex = entry("CHALLENGER");
        flex.queue_type = "RANKED_FLEX_SR".into();

        let assessment = assess_decay(&[flex], Some(&played(20)), now());

        assert_eq!(assessment.classification, DecayClassification::Unranked);
        assert!(!assessment.at_risk);
        assert_eq!(assessment.tier, None);
    }

    #[test]
    fn no_signal_at_all_is_unknown_not_decay() {
        let assessment = assess_entry(Some(&entry("DIAMOND")), None, now());

        assert_eq!(assessment.classification, DecayClassification::Unknown);
        assert!(!assessment.at_risk);
        assert_eq!(assessment.days_remaining, None);
        assert_eq!(assessment.reference_timestamp, None);
    }

    #[test]
    fn inactivity_flag_wins_over_match_history() {
        let assessment = assess_entry(Some(&inactive_since("DIAMOND", 5)), Some(&played(29)), now());

        assert_eq!(assessment.days_remaining, Some(25));
        assert_eq!(assessment.reference_source, Some(SignalSource::InactivityFlag));
        assert_eq!(assessment.classification, DecayClassification::Safe);
        assert_eq!(assessment.reference_timestamp, Some(now() - Duration::days(5)));
    }

    #[test]
    fn partial_days_are_floored() {
        let reference = now() - Duration::days(10) - Duration::hours(23);

        assert_eq!(days_since(reference, now()), 10);
    }

    #[test]
    fn future_reference_counts_as_today() {
        assert_eq!(days_since(now() + Duration::hours(5), now()), 0);

        let assessment = assess_entry(Some(&entry("MASTER")), Some(&played(-2)), now());
        assert_eq!(assessment.days_remaining, Some(14));
    }

    #[test]
    fn match_history_only_needed_for_eligible_entries_without_flag() {
        assert!(!needs_match_history(None));
        assert!(!needs_match_history(Some(&entry("GOLD"))));
        assert!(!needs_match_history(Some(&inactive_since("MASTER", 2))));
        assert!(needs_match_history(Some(&entry("MASTER"))));
    }

    #[test]
    fn classification_serializes_with_spaces() {
        let json = serde_json::to_string(&DecayClassification::ActiveDecay).unwrap();

        assert_eq!(json, r#""active decay""#);
        assert_eq!(DecayClassification::ActiveDecay.to_string(), "active decay");
    }
}
