use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct CreateBetMappingInput {
    #[validate(range(min = 0, message = "numeric_id must be non-negative"))]
    pub numeric_id: i64,

    pub creator_address: String,

    #[validate(length(min = 1, max = 200, message = "bet_name must be 1 to 200 characters"))]
    pub bet_name: Option<String>,

    pub is_public: Option<bool>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateVisibilityInput {
    pub is_public: bool,
    pub creator_address: String,
}

#[derive(Deserialize, Debug)]
pub struct PublicBetsQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
