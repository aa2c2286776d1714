use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct UserActivityTable {
    pub id: i64,
    pub user_address: String,
    pub activity_type: String,
    pub amount: i64,
    pub bet_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct UserStatsTable {
    pub user_address: String,
    pub bets_created: i64,
    pub total_volume: i64,
    pub wallets_attracted: i64,
    pub last_updated: DateTime<Utc>,
}
