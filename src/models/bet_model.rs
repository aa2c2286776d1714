use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct BetMappingTable {
    pub random_id: String,
    pub numeric_id: i64,
    pub creator_address: String,
    pub bet_name: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}
