use std::collections::{HashMap, HashSet};

use crate::models::analytics_model::UserActivityTable;
use crate::types::analytics_types::{ACTIVITY_BET_CREATED, ACTIVITY_WAGER_PLACED};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalletAggregate {
    pub bets_created: i64,
    pub total_volume: i64,
    pub wallets_attracted: i64,
}

/// Replays the activity log into per-wallet aggregates.
///
/// First pass counts created bets and sums wager volume, and resolves each
/// bet id to its creator (first `bet_created` row wins on duplicates). Second
/// pass collects, per creator, the distinct other wallets that wagered on
/// their bets. Pure function of the input rows, so rerunning it over
/// unchanged data yields identical aggregates.
pub fn aggregate_activities(
    activities: &[UserActivityTable],
) -> HashMap<String, WalletAggregate> {
    let mut aggregates: HashMap<String, WalletAggregate> = HashMap::new();
    let mut bet_creators: HashMap<i64, &str> = HashMap::new();

    for activity in activities {
        match activity.activity_type.as_str() {
            ACTIVITY_BET_CREATED => {
                let entry = aggregates
                    .entry(activity.user_address.clone())
                    .or_default();
                entry.bets_created += 1;

                if let Some(bet_id) = activity.bet_id {
                    bet_creators
                        .entry(bet_id)
                        .or_insert(activity.user_address.as_str());
                }
            }
            ACTIVITY_WAGER_PLACED => {
                let entry = aggregates
                    .entry(activity.user_address.clone())
                    .or_default();
                entry.total_volume += activity.amount;
            }
            _ => {}
        }
    }

    let mut attracted: HashMap<&str, HashSet<&str>> = HashMap::new();
    for activity in activities {
        if activity.activity_type != ACTIVITY_WAGER_PLACED {
            continue;
        }
        let Some(bet_id) = activity.bet_id else {
            continue;
        };
        let Some(&creator) = bet_creators.get(&bet_id) else {
            continue;
        };
        if creator == activity.user_address {
            continue;
        }
        attracted
            .entry(creator)
            .or_default()
            .insert(activity.user_address.as_str());
    }

    for (creator, wallets) in attracted {
        let entry = aggregates.entry(creator.to_string()).or_default();
        entry.wallets_attracted = wallets.len() as i64;
    }

    aggregates
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const ALICE: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const BOB: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const CAROL: &str = "0xcccccccccccccccccccccccccccccccccccccccc";

    fn activity(
        user_address: &str,
        activity_type: &str,
        amount: i64,
        bet_id: Option<i64>,
    ) -> UserActivityTable {
        UserActivityTable {
            id: 0,
            user_address: user_address.to_string(),
            activity_type: activity_type.to_string(),
            amount,
            bet_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn counts_bets_and_sums_volume() {
        let activities = vec![
            activity(ALICE, ACTIVITY_BET_CREATED, 0, Some(1)),
            activity(ALICE, ACTIVITY_BET_CREATED, 0, Some(2)),
            activity(BOB, ACTIVITY_WAGER_PLACED, 100, Some(1)),
            activity(BOB, ACTIVITY_WAGER_PLACED, 250, Some(2)),
        ];

        let aggregates = aggregate_activities(&activities);

        assert_eq!(aggregates[ALICE].bets_created, 2);
        assert_eq!(aggregates[ALICE].total_volume, 0);
        assert_eq!(aggregates[BOB].bets_created, 0);
        assert_eq!(aggregates[BOB].total_volume, 350);
    }

    #[test]
    fn attracted_wallets_are_distinct_and_exclude_creator() {
        let activities = vec![
            activity(ALICE, ACTIVITY_BET_CREATED, 0, Some(7)),
            activity(BOB, ACTIVITY_WAGER_PLACED, 100, Some(7)),
            activity(BOB, ACTIVITY_WAGER_PLACED, 50, Some(7)),
            activity(CAROL, ACTIVITY_WAGER_PLACED, 25, Some(7)),
            activity(ALICE, ACTIVITY_WAGER_PLACED, 10, Some(7)),
        ];

        let aggregates = aggregate_activities(&activities);

        // Bob counted once despite two wagers, Alice excluded on her own bet.
        assert_eq!(aggregates[ALICE].wallets_attracted, 2);
        assert_eq!(aggregates[BOB].wallets_attracted, 0);
    }

    #[test]
    fn wagers_without_resolvable_bet_attract_nobody() {
        let activities = vec![
            activity(ALICE, ACTIVITY_BET_CREATED, 0, None),
            activity(BOB, ACTIVITY_WAGER_PLACED, 100, None),
            activity(BOB, ACTIVITY_WAGER_PLACED, 100, Some(99)),
        ];

        let aggregates = aggregate_activities(&activities);

        assert_eq!(aggregates[ALICE].wallets_attracted, 0);
        assert_eq!(aggregates[BOB].total_volume, 200);
    }

    #[test]
    fn unknown_activity_types_are_ignored() {
        let activities = vec![
            activity(ALICE, ACTIVITY_BET_CREATED, 0, Some(1)),
            activity(ALICE, "bet_resolved", 500, Some(1)),
        ];

        let aggregates = aggregate_activities(&activities);

        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[ALICE].bets_created, 1);
        assert_eq!(aggregates[ALICE].total_volume, 0);
    }

    #[test]
    fn recompute_over_unchanged_input_is_identical() {
        let activities = vec![
            activity(ALICE, ACTIVITY_BET_CREATED, 0, Some(1)),
            activity(BOB, ACTIVITY_WAGER_PLACED, 100, Some(1)),
            activity(CAROL, ACTIVITY_WAGER_PLACED, 40, Some(1)),
        ];

        let first = aggregate_activities(&activities);
        let second = aggregate_activities(&activities);

        assert_eq!(first, second);
    }

    #[test]
    fn first_creator_wins_on_duplicate_bet_ids() {
        let activities = vec![
            activity(ALICE, ACTIVITY_BET_CREATED, 0, Some(3)),
            activity(BOB, ACTIVITY_BET_CREATED, 0, Some(3)),
            activity(CAROL, ACTIVITY_WAGER_PLACED, 10, Some(3)),
        ];

        let aggregates = aggregate_activities(&activities);

        assert_eq!(aggregates[ALICE].wallets_attracted, 1);
        assert_eq!(aggregates[BOB].wallets_attracted, 0);
    }
}
