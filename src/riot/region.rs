use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

/// Gameplay regions a player account can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RegionCode {
    Euw,
    Eune,
    Tr,
    Ru,
    Me,
    Na,
    Br,
    Lan,
    Las,
    Kr,
    Jp,
    Oce,
    Ph,
    Sg,
    Th,
    Tw,
    Vn,
}

impl RegionCode {
    /// Every supported region, in routing-table order.
    pub const ALL: [RegionCode; 17] = [
        Self::Euw,
        Self::Eune,
        Self::Tr,
        Self::Ru,
        Self::Me,
        Self::Na,
        Self::Br,
        Self::Lan,
        Self::Las,
        Self::Kr,
        Self::Jp,
        Self::Oce,
        Self::Ph,
        Self::Sg,
        Self::Th,
        Self::Tw,
        Self::Vn,
    ];

    /// Regional routing cluster serving Account-v1 and Match-v5 for this region.
    pub fn cluster(self) -> RoutingCluster {
        match self {
            Self::Euw | Self::Eune | Self::Tr | Self::Ru | Self::Me => RoutingCluster::Europe,
            Self::Na | Self::Br | Self::Lan | Self::Las => RoutingCluster::Americas,
            Self::Kr | Self::Jp => RoutingCluster::Asia,
            Self::Oce | Self::Ph | Self::Sg | Self::Th | Self::Tw | Self::Vn => RoutingCluster::Sea,
        }
    }

    /// Platform shard serving Summoner-v4 and League-v4 for this region.
    pub fn shard(self) -> PlatformShard {
        match self {
            Self::Euw => PlatformShard::EUW1,
            Self::Eune => PlatformShard::EUN1,
            Self::Tr => PlatformShard::TR1,
            Self::Ru => PlatformShard::RU,
            Self::Me => PlatformShard::ME1,
            Self::Na => PlatformShard::NA1,
            Self::Br => PlatformShard::BR1,
            Self::Lan => PlatformShard::LA1,
            Self::Las => PlatformShard::LA2,
            Self::Kr => PlatformShard::KR,
            Self::Jp => PlatformShard::JP1,
            Self::Oce => PlatformShard::OC1,
            Self::Ph => PlatformShard::PH2,
            Self::Sg => PlatformShard::SG2,
            Self::Th => PlatformShard::TH2,
            Self::Tw => PlatformShard::TW2,
            Self::Vn => PlatformShard::VN2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Euw => "EUW",
            Self::Eune => "EUNE",
            Self::Tr => "TR",
            Self::Ru => "RU",
            Self::Me => "ME",
            Self::Na => "NA",
            Self::Br => "BR",
            Self::Lan => "LAN",
            Self::Las => "LAS",
            Self::Kr => "KR",
            Self::Jp => "JP",
            Self::Oce => "OCE",
            Self::Ph => "PH",
            Self::Sg => "SG",
            Self::Th => "TH",
            Self::Tw => "TW",
            Self::Vn => "VN",
        }
    }
}

impl FromStr for RegionCode {
    type Err = AppError;

    /// Accepts both the short region name and the platform shard id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EUW" | "EUW1" => Ok(Self::Euw),
            "EUNE" | "EUN" | "EUN1" => Ok(Self::Eune),
            "TR" | "TR1" => Ok(Self::Tr),
            "RU" => Ok(Self::Ru),
            "ME" | "ME1" => Ok(Self::Me),
            "NA" | "NA1" => Ok(Self::Na),
            "BR" | "BR1" => Ok(Self::Br),
            "LAN" | "LA1" => Ok(Self::Lan),
            "LAS" | "LA2" => Ok(Self::Las),
            "KR" => Ok(Self::Kr),
            "JP" | "JP1" => Ok(Self::Jp),
            "OCE" | "OC" | "OC1" => Ok(Self::Oce),
            "PH" | "PH2" => Ok(Self::Ph),
            "SG" | "SG2" => Ok(Self::Sg),
            "TH" | "TH2" => Ok(Self::Th),
            "TW" | "TW2" => Ok(Self::Tw),
            "VN" | "VN2" => Ok(Self::Vn),
            _ => Err(AppError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform routing values for Riot API (Summoner-v4, League-v4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformShard {
    BR1,
    LA1,
    LA2,
    NA1,
    JP1,
    KR,
    EUN1,
    EUW1,
    ME1,
    RU,
    TR1,
    OC1,
    PH2,
    SG2,
    TH2,
    TW2,
    VN2,
}

impl PlatformShard {
    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BR1 => "br1",
            Self::LA1 => "la1",
            Self::LA2 => "la2",
            Self::NA1 => "na1",
            Self::JP1 => "jp1",
            Self::KR => "kr",
            Self::EUN1 => "eun1",
            Self::EUW1 => "euw1",
            Self::ME1 => "me1",
            Self::RU => "ru",
            Self::TR1 => "tr1",
            Self::OC1 => "oc1",
            Self::PH2 => "ph2",
            Self::SG2 => "sg2",
            Self::TH2 => "th2",
            Self::TW2 => "tw2",
            Self::VN2 => "vn2",
        }
    }
}

impl fmt::Display for PlatformShard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regional routing values for Riot API (Account-v1, Match-v5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutingCluster {
    Europe,
    Americas,
    Asia,
    Sea,
}

impl RoutingCluster {
    pub const ALL: [RoutingCluster; 4] = [Self::Europe, Self::Americas, Self::Asia, Self::Sea];

    pub fn base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.as_str())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Americas => "americas",
            Self::Asia => "asia",
            Self::Europe => "europe",
            Self::Sea => "sea",
        }
    }

    /// First region of the cluster, probed when detecting where a PUUID plays.
    pub fn representative(self) -> RegionCode {
        match self {
            Self::Europe => RegionCode::Euw,
            Self::Americas => RegionCode::Na,
            Self::Asia => RegionCode::Kr,
            Self::Sea => RegionCode::Oce,
        }
    }

    /// Cluster search order for a lookup: the hinted cluster first, then every
    /// other cluster exactly once.
    pub fn search_order(hint: Option<RegionCode>) -> Vec<RoutingCluster> {
        let mut order = Vec::with_capacity(Self::ALL.len());

        if let Some(region) = hint {
            order.push(region.cluster());
        }

        for cluster in Self::ALL {
            if !order.contains(&cluster) {
                order.push(cluster);
            }
        }

        order
    }
}

impl fmt::Display for RoutingCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn every_region_maps_to_a_cluster_and_a_shard() {
        let mut shards = HashSet::new();

        for region in RegionCode::ALL {
            assert!(RoutingCluster::ALL.contains(&region.cluster()));
            assert!(shards.insert(region.shard()), "{region} shares a shard");
        }

        assert_eq!(shards.len(), RegionCode::ALL.len());
    }

    #[test]
    fn representative_belongs_to_its_cluster() {
        for cluster in RoutingCluster::ALL {
            let representative = cluster.representative();
            assert_eq!(representative.cluster(), cluster);
            let first = RegionCode::ALL.into_iter().find(|r| r.cluster() == cluster);
            assert_eq!(first, Some(representative));
        }
    }

    #[test]
    fn region_round_trips_through_its_name() {
        for region in RegionCode::ALL {
            assert_eq!(region.as_str().parse::<RegionCode>().unwrap(), region);
            assert_eq!(
                region.shard().as_str().parse::<RegionCode>().unwrap(),
                region
            );
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        assert!(matches!(
            "MARS".parse::<RegionCode>(),
            Err(AppError::InvalidRegion(_))
        ));
    }

    #[test]
    fn search_order_puts_hint_first_without_duplicates() {
        let order = RoutingCluster::search_order(Some(RegionCode::Kr));

        assert_eq!(order[0], RoutingCluster::Asia);
        assert_eq!(order.len(), RoutingCluster::ALL.len());
        assert_eq!(order.iter().collect::<HashSet<_>>().len(), order.len());
    }

    #[test]
    fn search_order_without_hint_follows_table() {
        assert_eq!(
            RoutingCluster::search_order(None),
            RoutingCluster::ALL.to_vec()
        );
    }
}
