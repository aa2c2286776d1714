use actix_web::{get, post, web, HttpResponse, Responder};
use chrono::Utc;
use log::{error, info};
use serde_json::json;
use sqlx::PgPool;

use crate::models::analytics_model::{UserActivityTable, UserStatsTable};
use crate::services::stats_aggregator::aggregate_activities;
use crate::types::analytics_types::{LeaderboardMetric, LeaderboardQuery, TrackActivityInput};
use crate::utils::validation::{is_valid_activity_type, is_valid_wallet_address};

#[post("/api/analytics/track")]
pub async fn track_activity(
    db_pool: web::Data<PgPool>,
    req: web::Json<TrackActivityInput>,
) -> impl Responder {
    if !is_valid_wallet_address(&req.user_address) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid wallet address"
        }));
    }
    if !is_valid_activity_type(&req.activity_type) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Unknown activity type"
        }));
    }

    let amount = req.amount.unwrap_or(0);
    if amount < 0 {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Amount must be non-negative"
        }));
    }
    if matches!(req.bet_id, Some(bet_id) if bet_id < 0) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid bet id"
        }));
    }

    let user_address = req.user_address.to_lowercase();

    match sqlx::query(
        r#"
        INSERT INTO user_activities (user_address, activity_type, amount, bet_id)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(&user_address)
    .bind(&req.activity_type)
    .bind(amount)
    .bind(req.bet_id)
    .execute(db_pool.get_ref())
    .await
    {
        Ok(_) => {
            info!(
                "Recorded activity: user={}, type={}",
                user_address, req.activity_type
            );
            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": "Activity recorded"
            }))
        }
        Err(e) => {
            error!("Failed to record activity: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to record activity"
            }))
        }
    }
}

/// Full-table scan of the activity log followed by a wholesale rewrite of
/// `user_stats`. Mounted in main on its own resource behind
/// CronAuthMiddleware, so no route macro here.
pub async fn calculate_stats(db_pool: web::Data<PgPool>) -> impl Responder {
    let activities = match sqlx::query_as::<_, UserActivityTable>(
        r#"
        SELECT id, user_address, activity_type, amount, bet_id, created_at
        FROM user_activities
        ORDER BY id ASC
        "#,
    )
    .fetch_all(db_pool.get_ref())
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            error!("Failed to scan user activities: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to recompute stats"
            }));
        }
    };

    let aggregates = aggregate_activities(&activities);
    let last_updated = Utc::now();

    let mut tx = match db_pool.get_ref().begin().await {
        Ok(tx) => tx,
        Err(e) => {
            error!("Failed to open stats transaction: {}", e);
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to recompute stats"
            }));
        }
    };

    if let Err(e) = sqlx::query("DELETE FROM user_stats").execute(&mut *tx).await {
        error!("Failed to clear user stats: {}", e);
        return HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "Failed to recompute stats"
        }));
    }

    for (user_address, aggregate) in &aggregates {
        if let Err(e) = sqlx::query(
            r#"
            INSERT INTO user_stats (user_address, bets_created, total_volume, wallets_attracted, last_updated)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_address)
        .bind(aggregate.bets_created)
        .bind(aggregate.total_volume)
        .bind(aggregate.wallets_attracted)
        .bind(last_updated)
        .execute(&mut *tx)
        .await
        {
            error!("Failed to write stats for {}: {}", user_address, e);
            return HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to recompute stats"
            }));
        }
    }

    if let Err(e) = tx.commit().await {
        error!("Failed to commit stats rewrite: {}", e);
        return HttpResponse::InternalServerError().json(json!({
            "status": "error",
            "message": "Failed to recompute stats"
        }));
    }

    info!(
        "Recomputed user stats: wallets={}, activities={}",
        aggregates.len(),
        activities.len()
    );
    HttpResponse::Ok().json(json!({
        "status": "success",
        "message": "Stats recomputed successfully",
        "wallets_updated": aggregates.len(),
        "activities_scanned": activities.len(),
        "last_updated": last_updated
    }))
}

#[get("/api/analytics/leaderboard")]
pub async fn get_leaderboard(
    db_pool: web::Data<PgPool>,
    query: web::Query<LeaderboardQuery>,
) -> impl Responder {
    let metric_name = match query.metric.as_deref() {
        Some(name) => name,
        None => {
            return HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Missing metric parameter"
            }));
        }
    };
    let metric = match LeaderboardMetric::parse(metric_name) {
        Some(metric) => metric,
        None => {
            return HttpResponse::BadRequest().json(json!({
                "status": "error",
                "message": "Unknown leaderboard metric"
            }));
        }
    };

    let limit = query.limit.unwrap_or(10).clamp(1, 100);

    // metric.column() is a fixed string from the allow-list, never user input.
    let sql = format!(
        "SELECT user_address, bets_created, total_volume, wallets_attracted, last_updated \
         FROM user_stats \
         ORDER BY {} DESC, user_address ASC \
         LIMIT $1",
        metric.column()
    );

    match sqlx::query_as::<_, UserStatsTable>(&sql)
        .bind(limit)
        .fetch_all(db_pool.get_ref())
        .await
    {
        Ok(rows) => {
            let entries: Vec<serde_json::Value> = rows
                .iter()
                .enumerate()
                .map(|(i, row)| {
                    json!({
                        "rank": i + 1,
                        "user_address": row.user_address,
                        "bets_created": row.bets_created,
                        "total_volume": row.total_volume,
                        "wallets_attracted": row.wallets_attracted,
                        "last_updated": row.last_updated
                    })
                })
                .collect();

            HttpResponse::Ok().json(json!({
                "status": "success",
                "message": "Leaderboard fetched successfully",
                "metric": metric.column(),
                "entries": entries,
                "count": entries.len()
            }))
        }
        Err(e) => {
            error!("Failed to fetch leaderboard: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to fetch leaderboard"
            }))
        }
    }
}

#[get("/api/analytics/stats/{address}")]
pub async fn get_user_stats(
    db_pool: web::Data<PgPool>,
    path: web::Path<String>,
) -> impl Responder {
    let address = path.into_inner();
    if !is_valid_wallet_address(&address) {
        return HttpResponse::BadRequest().json(json!({
            "status": "error",
            "message": "Invalid wallet address"
        }));
    }
    let address = address.to_lowercase();

    match sqlx::query_as::<_, UserStatsTable>(
        r#"
        SELECT user_address, bets_created, total_volume, wallets_attracted, last_updated
        FROM user_stats
        WHERE user_address = $1
        "#,
    )
    .bind(&address)
    .fetch_optional(db_pool.get_ref())
    .await
    {
        Ok(Some(stats)) => HttpResponse::Ok().json(json!({
            "status": "success",
            "stats": stats
        })),
        Ok(None) => HttpResponse::NotFound().json(json!({
            "status": "error",
            "message": "No stats found for this wallet"
        })),
        Err(e) => {
            error!("Failed to fetch user stats: {}", e);
            HttpResponse::InternalServerError().json(json!({
                "status": "error",
                "message": "Failed to fetch user stats"
            }))
        }
    }
}
