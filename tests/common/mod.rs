#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rankdecay::error::TransportError;
use rankdecay::riot::{ApiResponse, ApiTransport, RetryPolicy, RiotClient};

#[derive(Debug, Clone)]
pub enum Reply {
    Json(u16, String),
    Status(u16),
    NetworkError,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Json(200, body.into())
    }
}

/// In-memory Riot API: replies are matched on a URL substring, in
/// registration order. The last reply of a route repeats; unmatched URLs 404.
#[derive(Debug, Default)]
pub struct FakeRiot {
    routes: Mutex<Vec<(String, VecDeque<Reply>)>>,
    calls: Mutex<Vec<String>>,
}

impl FakeRiot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, pattern: &str, reply: Reply) -> &Self {
        let mut routes = self.routes.lock().unwrap();

        match routes.iter_mut().find(|(p, _)| p == pattern) {
            Some((_, replies)) => replies.push_back(reply),
            None => routes.push((pattern.to_string(), VecDeque::from([reply]))),
        }

        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pattern: &str) -> usize {
        self.calls().iter().filter(|url| url.contains(pattern)).count()
    }

    pub fn client(self: &Arc<Self>) -> RiotClient {
        RiotClient::with_transport(self.clone(), fast_policy())
    }
}

#[async_trait]
impl ApiTransport for FakeRiot {
    async fn get(&self, url: &str) -> Result<ApiResponse, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());

        let reply = {
            let mut routes = self.routes.lock().unwrap();
            routes
                .iter_mut()
                .find(|(pattern, _)| url.contains(pattern.as_str()))
                .and_then(|(_, replies)| {
                    if replies.len() > 1 {
                        replies.pop_front()
                    } else {
                        replies.front().cloned()
                    }
                })
        };

        match reply {
            Some(Reply::Json(status, body)) => Ok(ApiResponse::new(status, body)),
            Some(Reply::Status(status)) => Ok(ApiResponse::new(status, "")),
            Some(Reply::NetworkError) => Err(TransportError::Network("connection refused".into())),
            None => Ok(ApiResponse::new(404, "")),
        }
    }
}

pub fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        base_timeout: Duration::from_secs(1),
        timeout_increment: Duration::from_secs(1),
        rate_limit_backoff: Duration::from_millis(100),
        transient_backoff: Duration::from_millis(100),
    }
}

pub fn account_json(puuid: &str, game_name: &str, tag_line: &str) -> String {
    format!(r#"{{"puuid":"{puuid}","gameName":"{game_name}","tagLine":"{tag_line}"}}"#)
}

pub fn summoner_json(puuid: &str, level: i64) -> String {
    format!(
        r#"{{"id":"legacy-{puuid}","puuid":"{puuid}","profileIconId":29,"revisionDate":0,"summonerLevel":{level}}}"#
    )
}

pub fn league_json(tier: &str, lp: i32, inactive_start: Option<i64>) -> String {
    let inactive = match inactive_start {
        Some(millis) => format!(r#""inactive":true,"inactiveStartTime":{millis}"#),
        None => r#""inactive":false"#.to_string(),
    };

    format!(
        r#"[{{"queueType":"RANKED_SOLO_5x5","tier":"{tier}","rank":"I","leaguePoints":{lp},"wins":150,"losses":120,"hotStreak":false,"veteran":true,"freshBlood":false,{inactive}}}]"#
    )
}

pub fn match_json(match_id: &str, queue_id: i32, puuid: &str, champion_id: u32, ended_at: i64) -> String {
    format!(
        r#"{{"metadata":{{"matchId":"{match_id}"}},"info":{{"gameCreation":{creation},"gameDuration":1800,"gameEndTimestamp":{ended_at},"queueId":{queue_id},"participants":[{{"puuid":"{puuid}","championId":{champion_id},"championName":"Fallback"}}]}}}}"#,
        creation = ended_at - 1_800_000,
    )
}
