use serde::Deserialize;

pub const ACTIVITY_BET_CREATED: &str = "bet_created";
pub const ACTIVITY_WAGER_PLACED: &str = "wager_placed";

#[derive(Deserialize, Debug)]
pub struct TrackActivityInput {
    pub user_address: String,
    pub activity_type: String,
    pub amount: Option<i64>,
    pub bet_id: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct LeaderboardQuery {
    pub metric: Option<String>,
    pub limit: Option<i64>,
}

/// Allow-listed leaderboard metrics. Every variant maps to a fixed
/// `user_stats` column, so user input never reaches the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderboardMetric {
    BetsCreated,
    TotalVolume,
    WalletsAttracted,
}

impl LeaderboardMetric {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bets_created" => Some(Self::BetsCreated),
            "total_volume" => Some(Self::TotalVolume),
            "wallets_attracted" => Some(Self::WalletsAttracted),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::BetsCreated => "bets_created",
            Self::TotalVolume => "total_volume",
            Self::WalletsAttracted => "wallets_attracted",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_metrics() {
        assert_eq!(
            LeaderboardMetric::parse("bets_created"),
            Some(LeaderboardMetric::BetsCreated)
        );
        assert_eq!(
            LeaderboardMetric::parse("total_volume"),
            Some(LeaderboardMetric::TotalVolume)
        );
        assert_eq!(
            LeaderboardMetric::parse("wallets_attracted"),
            Some(LeaderboardMetric::WalletsAttracted)
        );
    }

    #[test]
    fn rejects_unknown_metrics() {
        assert_eq!(LeaderboardMetric::parse("volume"), None);
        assert_eq!(LeaderboardMetric::parse("TOTAL_VOLUME"), None);
        assert_eq!(LeaderboardMetric::parse(""), None);
        assert_eq!(LeaderboardMetric::parse("total_volume; DROP TABLE user_stats"), None);
    }

    #[test]
    fn column_matches_metric_name() {
        for name in ["bets_created", "total_volume", "wallets_attracted"] {
            let metric = LeaderboardMetric::parse(name).unwrap();
            assert_eq!(metric.column(), name);
        }
    }
}
