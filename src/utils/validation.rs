use crate::types::analytics_types::{ACTIVITY_BET_CREATED, ACTIVITY_WAGER_PLACED};

pub const RANDOM_ID_LEN: usize = 8;

/// Public bet ids are exactly 8 ASCII-alphanumeric characters.
pub fn is_valid_random_id(id: &str) -> bool {
    id.len() == RANDOM_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Wallet addresses are `0x` followed by 40 hex characters.
pub fn is_valid_wallet_address(address: &str) -> bool {
    match address.strip_prefix("0x") {
        Some(hex) => hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

pub fn is_valid_activity_type(activity_type: &str) -> bool {
    matches!(activity_type, ACTIVITY_BET_CREATED | ACTIVITY_WAGER_PLACED)
}
