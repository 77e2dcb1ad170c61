use std::env;
use std::sync::Arc;

use chrono::Utc;
use rankdecay::{AppError, ChampionTable, Config, PlayerIdentity, RegionCode, RiotClient, logging};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    logging::init();

    if let Err(e) = run().await {
        error!(error = %e, "❌ Decay check failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let mut args = env::args().skip(1);
    let identity: PlayerIdentity = args
        .next()
        .ok_or_else(|| AppError::InvalidIdentity("usage: decay-check <Name#Tag|PUUID> [REGION]".into()))?
        .parse()?;
    let region_hint = args.next().map(|r| r.parse::<RegionCode>()).transpose()?;

    let config = Config::from_env()?;

    info!("🐙 Starting...");

    let champions = match ChampionTable::load(&reqwest::Client::new(), &config.ddragon_version).await {
        Ok(table) => table,
        Err(e) => {
            warn!(error = %e, "🧙 ⚠️ Champion table unavailable, names will be missing");
            ChampionTable::default()
        }
    };

    let riot = RiotClient::new(&config).with_champions(Arc::new(champions));

    let (puuid, riot_id, region) = match identity {
        PlayerIdentity::RiotId {
            game_name,
            tag_line,
        } => {
            let account = riot.resolve_player(&game_name, &tag_line, region_hint).await?;
            let region = account
                .region
                .ok_or_else(|| AppError::RegionNotDetected {
                    puuid: account.puuid.clone(),
                })?;
            (account.puuid.clone(), account.riot_id(), region)
        }
        PlayerIdentity::Puuid(puuid) => {
            let region = match region_hint {
                Some(region) => region,
                None => riot.detect_region(&puuid).await?,
            };
            (puuid.clone(), puuid, region)
        }
    };

    let assessment = riot.check_decay(&puuid, region, Utc::now()).await?;

    info!(
        %riot_id,
        %region,
        classification = %assessment.classification,
        "⏳ Decay check complete"
    );

    match serde_json::to_string_pretty(&assessment) {
        Ok(json) => println!("{json}"),
        Err(_) => println!("{}", assessment.message),
    }

    Ok(())
}
